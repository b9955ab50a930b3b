// Copyright 2024 FastLabs Developers
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Mapping a [`LogLevel`] to one destination per [`Severity`].

use std::sync::Arc;

use crate::Error;
use crate::LogLevel;
use crate::Severity;
use crate::append;
use crate::append::Append;

/// One of the two process console streams.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Stream {
    /// The standard output.
    Stdout,
    /// The standard error.
    Stderr,
}

/// Where the lines of one severity are written.
///
/// Discarding is a real destination: a severity is never left without one.
#[derive(Clone, Debug)]
pub enum Destination {
    /// Lines are silently consumed.
    Discard,
    /// Lines go to a console stream.
    Primary(Stream),
    /// Lines go to the secondary target first, then to a console stream.
    Combined(Stream, Arc<dyn Append>),
}

impl Destination {
    /// The console stream of this destination, if it is not discarding.
    pub fn stream(&self) -> Option<Stream> {
        match self {
            Destination::Discard => None,
            Destination::Primary(stream) | Destination::Combined(stream, _) => Some(*stream),
        }
    }

    /// Whether lines sent here are dropped.
    pub fn is_discard(&self) -> bool {
        matches!(self, Destination::Discard)
    }

    /// Whether lines sent here also reach a secondary target.
    pub fn is_combined(&self) -> bool {
        matches!(self, Destination::Combined(..))
    }

    pub(crate) fn write(&self, console: &Console, line: &[u8]) -> Result<(), Error> {
        match self {
            Destination::Discard => Ok(()),
            Destination::Primary(stream) => console.get(*stream).append(line),
            Destination::Combined(stream, secondary) => {
                let secondary = secondary.append(line);
                let primary = console.get(*stream).append(line);
                secondary.and(primary)
            }
        }
    }
}

impl PartialEq for Destination {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Destination::Discard, Destination::Discard) => true,
            (Destination::Primary(a), Destination::Primary(b)) => a == b,
            (Destination::Combined(a, x), Destination::Combined(b, y)) => {
                a == b && Arc::ptr_eq(x, y)
            }
            _ => false,
        }
    }
}

/// The resolved destinations of all four severities.
///
/// A set is computed once per configuration and replaced as a whole on re-configuration.
///
/// # Examples
///
/// ```
/// use dailylog::LogLevel;
/// use dailylog::Severity;
/// use dailylog::route::DestinationSet;
/// use dailylog::route::Stream;
///
/// let set = DestinationSet::resolve(LogLevel::WARNING, None);
/// assert!(set.get(Severity::Info).is_discard());
/// assert_eq!(set.get(Severity::Warning).stream(), Some(Stream::Stdout));
/// assert_eq!(set.get(Severity::Error).stream(), Some(Stream::Stderr));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct DestinationSet {
    debug: Destination,
    info: Destination,
    warning: Destination,
    error: Destination,
}

impl DestinationSet {
    /// Route every severity enabled by `level` to its console stream, combined with
    /// `secondary` if given. Error goes to stderr, everything else to stdout.
    ///
    /// When several bits are set, the lowest one is the threshold.
    pub fn resolve(level: LogLevel, secondary: Option<Arc<dyn Append>>) -> DestinationSet {
        let route = |severity: Severity| {
            if !level.enables(severity) {
                return Destination::Discard;
            }

            let stream = match severity {
                Severity::Error => Stream::Stderr,
                Severity::Debug | Severity::Info | Severity::Warning => Stream::Stdout,
            };
            match &secondary {
                Some(secondary) => Destination::Combined(stream, secondary.clone()),
                None => Destination::Primary(stream),
            }
        };

        DestinationSet {
            debug: route(Severity::Debug),
            info: route(Severity::Info),
            warning: route(Severity::Warning),
            error: route(Severity::Error),
        }
    }

    /// A set that discards every severity.
    pub fn discard_all() -> DestinationSet {
        DestinationSet::resolve(LogLevel::OFF, None)
    }

    /// The destination of `severity`.
    pub fn get(&self, severity: Severity) -> &Destination {
        match severity {
            Severity::Debug => &self.debug,
            Severity::Info => &self.info,
            Severity::Warning => &self.warning,
            Severity::Error => &self.error,
        }
    }
}

/// The appenders behind [`Stream::Stdout`] and [`Stream::Stderr`].
#[derive(Clone, Debug)]
pub(crate) struct Console {
    stdout: Arc<dyn Append>,
    stderr: Arc<dyn Append>,
}

impl Default for Console {
    fn default() -> Self {
        Console::new(Arc::new(append::Stdout), Arc::new(append::Stderr))
    }
}

impl Console {
    pub(crate) fn new(stdout: Arc<dyn Append>, stderr: Arc<dyn Append>) -> Self {
        Self { stdout, stderr }
    }

    pub(crate) fn get(&self, stream: Stream) -> &dyn Append {
        match stream {
            Stream::Stdout => self.stdout.as_ref(),
            Stream::Stderr => self.stderr.as_ref(),
        }
    }

    pub(crate) fn flush(&self) -> Result<(), Error> {
        let stdout = self.stdout.flush();
        let stderr = self.stderr.flush();
        stdout.and(stderr)
    }
}
