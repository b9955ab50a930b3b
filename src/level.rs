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

//! Log levels and severities.

use std::fmt;
use std::ops::BitOr;
use std::ops::BitOrAssign;
use std::str::FromStr;

use colored::Color;

use crate::Error;

/// The severity of a single log line, ordered by increasing importance.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    /// Designates lower priority information.
    Debug,
    /// Designates useful information.
    Info,
    /// Designates hazardous situations.
    Warning,
    /// Designates errors.
    Error,
}

impl Severity {
    /// All severities from the least to the most important.
    pub const ALL: [Severity; 4] = [
        Severity::Debug,
        Severity::Info,
        Severity::Warning,
        Severity::Error,
    ];

    /// Return the string representation of the `Severity`.
    ///
    /// This returns the same string as the `fmt::Display` implementation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Debug => "DEBUG",
            Severity::Info => "INFO",
            Severity::Warning => "WARNING",
            Severity::Error => "ERROR",
        }
    }

    /// The fixed prefix every line of this severity starts with.
    pub fn prefix(&self) -> &'static str {
        match self {
            Severity::Debug => "DEBUG: ",
            Severity::Info => "INFO: ",
            Severity::Warning => "WARNING: ",
            Severity::Error => "ERROR: ",
        }
    }

    /// The color of the prefix when colored output is enabled.
    pub fn color(&self) -> Color {
        match self {
            Severity::Debug => Color::Black,
            Severity::Info => Color::Blue,
            Severity::Warning => Color::Yellow,
            Severity::Error => Color::Red,
        }
    }

    /// The [`LogLevel`] bit that enables this severity.
    pub const fn bit(&self) -> LogLevel {
        match self {
            Severity::Debug => LogLevel::DEBUG,
            Severity::Info => LogLevel::INFO,
            Severity::Warning => LogLevel::WARNING,
            Severity::Error => LogLevel::ERROR,
        }
    }
}

impl fmt::Debug for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// A bitmask of severity flags.
///
/// Although several bits may be set at once, a `LogLevel` is interpreted as a threshold: the
/// lowest severity whose bit is set is enabled together with every more severe one. Setting
/// [`LogLevel::INFO`] enables Info, Warning and Error; setting `INFO | ERROR` behaves exactly
/// like `INFO`.
///
/// # Examples
///
/// ```
/// use dailylog::LogLevel;
/// use dailylog::Severity;
///
/// let level = LogLevel::WARNING;
/// assert!(!level.enables(Severity::Info));
/// assert!(level.enables(Severity::Warning));
/// assert!(level.enables(Severity::Error));
///
/// let level: LogLevel = "info".parse().unwrap();
/// assert_eq!(level, LogLevel::INFO);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct LogLevel(u8);

impl LogLevel {
    /// No severity is enabled.
    pub const OFF: LogLevel = LogLevel(0);
    /// Logs everything.
    pub const DEBUG: LogLevel = LogLevel(1);
    /// Logs Info, Warning and Error.
    pub const INFO: LogLevel = LogLevel(2);
    /// Logs Warning and Error.
    pub const WARNING: LogLevel = LogLevel(4);
    /// Logs just Error.
    pub const ERROR: LogLevel = LogLevel(8);

    /// Create a level from raw bits. Unknown bits are kept but never enable anything.
    pub const fn from_bits(bits: u8) -> LogLevel {
        LogLevel(bits)
    }

    /// The raw bits of this level.
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Whether every bit of `other` is also set in `self`.
    pub const fn contains(self, other: LogLevel) -> bool {
        other.0 != 0 && self.0 & other.0 == other.0
    }

    /// The least important enabled severity, or `None` if no known bit is set.
    pub fn threshold(self) -> Option<Severity> {
        Severity::ALL
            .into_iter()
            .find(|severity| self.contains(severity.bit()))
    }

    /// Whether lines of the given severity are written under this level.
    pub fn enables(self, severity: Severity) -> bool {
        self.threshold()
            .is_some_and(|threshold| severity >= threshold)
    }

    /// Read a level from the environment variable `key`.
    ///
    /// Returns `Ok(None)` if the variable is not set.
    ///
    /// # Errors
    ///
    /// Returns an error if the variable is not valid unicode or cannot be parsed.
    pub fn from_env(key: &str) -> Result<Option<LogLevel>, Error> {
        match std::env::var(key) {
            Ok(value) => value
                .parse()
                .map(Some)
                .map_err(|err: Error| err.with_context("env", key)),
            Err(std::env::VarError::NotPresent) => Ok(None),
            Err(err) => Err(Error::new("failed to read log level from env")
                .with_context("env", key)
                .with_source(err)),
        }
    }
}

impl BitOr for LogLevel {
    type Output = LogLevel;

    fn bitor(self, rhs: LogLevel) -> LogLevel {
        LogLevel(self.0 | rhs.0)
    }
}

impl BitOrAssign for LogLevel {
    fn bitor_assign(&mut self, rhs: LogLevel) {
        self.0 |= rhs.0;
    }
}

impl From<Severity> for LogLevel {
    fn from(severity: Severity) -> Self {
        severity.bit()
    }
}

impl fmt::Debug for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names = Severity::ALL
            .into_iter()
            .filter(|severity| self.contains(severity.bit()))
            .map(|severity| severity.as_str())
            .collect::<Vec<_>>();

        if names.is_empty() {
            write!(f, "OFF")
        } else {
            write!(f, "{}", names.join(" | "))
        }
    }
}

impl FromStr for LogLevel {
    type Err = Error;

    /// Parse a level from names (`debug`, `info`, `warn`, `warning`, `error`, `off`) or raw
    /// numeric masks, optionally joined by `|` or `,`.
    fn from_str(s: &str) -> Result<LogLevel, Self::Err> {
        let mut level = LogLevel::OFF;
        let mut parsed_any = false;

        for token in s.split(['|', ',']).map(str::trim) {
            if token.is_empty() {
                continue;
            }
            parsed_any = true;

            if let Ok(bits) = token.parse::<u8>() {
                level |= LogLevel(bits);
                continue;
            }

            let named = [
                ("off", LogLevel::OFF),
                ("debug", LogLevel::DEBUG),
                ("info", LogLevel::INFO),
                ("warn", LogLevel::WARNING),
                ("warning", LogLevel::WARNING),
                ("error", LogLevel::ERROR),
            ]
            .into_iter()
            .find(|(name, _)| token.eq_ignore_ascii_case(name));

            match named {
                Some((_, bits)) => level |= bits,
                None => return Err(Error::malformed_level(s)),
            }
        }

        if parsed_any {
            Ok(level)
        } else {
            Err(Error::malformed_level(s))
        }
    }
}
