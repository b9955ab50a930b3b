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

use std::sync::Arc;

use jiff::tz::TimeZone;

use super::Logger;
use crate::append;
use crate::append::Append;
use crate::clock::Clock;
use crate::layout::TextLayout;
use crate::route::Console;

/// A builder for configuring a [`Logger`].
///
/// A freshly built logger discards everything until one of [`Logger::start`] or
/// [`Logger::start_with_file`] is called.
///
/// # Examples
///
/// ```
/// use dailylog::LogLevel;
/// use dailylog::Logger;
///
/// let logger = Logger::builder().disable_color(true).utc(true).build();
/// logger.start(LogLevel::INFO);
/// ```
#[must_use = "call `build` to construct the logger"]
#[derive(Debug)]
pub struct LoggerBuilder {
    disable_color: bool,
    utc: bool,
    stdout: Arc<dyn Append>,
    stderr: Arc<dyn Append>,
    clock: Clock,
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl LoggerBuilder {
    /// Create a new [`LoggerBuilder`] writing colored, local-time lines to the process console.
    pub fn new() -> Self {
        Self {
            disable_color: false,
            utc: false,
            stdout: Arc::new(append::Stdout),
            stderr: Arc::new(append::Stderr),
            clock: Clock::DefaultClock,
        }
    }

    /// Do not wrap severity prefixes in ANSI color codes.
    pub fn disable_color(mut self, disable_color: bool) -> Self {
        self.disable_color = disable_color;
        self
    }

    /// Print timestamps in UTC instead of the local time zone.
    pub fn utc(mut self, utc: bool) -> Self {
        self.utc = utc;
        self
    }

    /// Replace the appender behind the stdout stream.
    pub fn stdout(mut self, stdout: impl Append) -> Self {
        self.stdout = Arc::new(stdout);
        self
    }

    /// Replace the appender behind the stderr stream.
    pub fn stderr(mut self, stderr: impl Append) -> Self {
        self.stderr = Arc::new(stderr);
        self
    }

    #[cfg(test)]
    pub(crate) fn clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Build the [`Logger`].
    pub fn build(self) -> Logger {
        let LoggerBuilder {
            disable_color,
            utc,
            stdout,
            stderr,
            clock,
        } = self;

        let mut layout = TextLayout::default();
        if disable_color {
            layout = layout.no_color();
        }
        if utc {
            layout = layout.timezone(TimeZone::UTC);
        }

        Logger::new(Console::new(stdout, stderr), layout, clock)
    }
}
