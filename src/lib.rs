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

//! Dailylog is a leveled logger that writes colored lines to the console and, optionally, to a
//! log file rotated into one directory per day.
//!
//! # Overview
//!
//! A [`Logger`] routes each of the four severities, Debug, Info, Warning and Error, to one
//! destination: discard it, write it to the console, or write it to the console and to the log
//! file. Warnings and below go to stdout, errors go to stderr. The [`LogLevel`] passed to
//! [`Logger::start`] or [`Logger::start_with_file`] picks the least severe severity that is
//! still written.
//!
//! File logging creates `<base>/<YYYY-MM-DD>/<YYYY-MM-DDTHH-MM-SS>.txt` and then removes dated
//! directories older than the retention window; see [`retention`].
//!
//! # Examples
//!
//! Console logging:
//!
//! ```
//! use dailylog::LogLevel;
//! use dailylog::Logger;
//!
//! let logger = Logger::builder().build();
//! logger.start(LogLevel::INFO);
//!
//! dailylog::info!(logger, "main", "listening on port {}", 8080);
//! dailylog::error!(logger, "main", "failed to open {}", "config.toml");
//! ```
//!
//! File logging with a seven day retention window:
//!
//! ```
//! use dailylog::LogLevel;
//! use dailylog::Logger;
//!
//! let base = tempfile::tempdir().unwrap();
//!
//! let logger = Logger::builder().build();
//! let path = logger.start_with_file(LogLevel::DEBUG, base.path(), 7);
//! assert!(path.exists());
//!
//! logger.started("Run");
//! logger.completed("Run");
//! logger.stop().unwrap();
//! ```

#![cfg_attr(docsrs, feature(doc_auto_cfg))]

pub mod append;
pub mod layout;
pub mod retention;
pub mod route;

#[cfg(feature = "bridge-log")]
pub mod bridge;
#[cfg(feature = "http")]
pub mod http;

mod clock;
mod error;
mod level;
mod logger;
mod macros;
mod record;

pub use self::append::Append;
pub use self::error::Error;
pub use self::level::LogLevel;
pub use self::level::Severity;
pub use self::logger::Logger;
pub use self::logger::LoggerBuilder;
pub use self::record::CallSite;
pub use self::record::Record;
pub use self::record::format_func_name;
