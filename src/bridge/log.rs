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

use crate::CallSite;
use crate::Logger;
use crate::Severity;

#[derive(Debug)]
struct LogCrateLogger(Arc<Logger>);

fn severity(level: log::Level) -> Severity {
    match level {
        log::Level::Error => Severity::Error,
        log::Level::Warn => Severity::Warning,
        log::Level::Info => Severity::Info,
        log::Level::Debug | log::Level::Trace => Severity::Debug,
    }
}

impl log::Log for LogCrateLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        self.0.enabled(severity(metadata.level()))
    }

    fn log(&self, record: &log::Record) {
        let file = record.file().unwrap_or(record.target());
        let line = record.line().unwrap_or_default();

        self.0.log(
            severity(record.level()),
            CallSite::new(file, line),
            "",
            *record.args(),
        );
    }

    fn flush(&self) {
        self.0.flush();
    }
}

/// Set up the log crate global logger.
///
/// This function calls [`log::set_boxed_logger`] so that all logs from the log crate are
/// forwarded to `logger`. Trace lines are written as Debug lines. No caller label is printed
/// for forwarded lines.
///
/// This function will set the global maximum log level to `Trace`. The levels written are still
/// decided by the configuration of `logger`.
///
/// # Errors
///
/// Return an error if the log crate global logger has already been set.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
///
/// use dailylog::LogLevel;
/// use dailylog::Logger;
///
/// let logger = Arc::new(Logger::builder().build());
/// logger.start(LogLevel::INFO);
/// dailylog::bridge::try_setup_log_crate(logger).unwrap();
///
/// log::info!("forwarded");
/// ```
pub fn try_setup_log_crate(logger: Arc<Logger>) -> Result<(), log::SetLoggerError> {
    log::set_boxed_logger(Box::new(LogCrateLogger(logger)))?;
    log::set_max_level(log::LevelFilter::Trace);
    Ok(())
}

/// Set up the log crate global logger.
///
/// Same as [`try_setup_log_crate`], but panics on failure.
///
/// # Panics
///
/// Panic if the log crate global logger has already been set.
pub fn setup_log_crate(logger: Arc<Logger>) {
    try_setup_log_crate(logger).expect(
        "dailylog::bridge::setup_log_crate must be called before the log crate global logger initialized",
    )
}

#[cfg(test)]
mod tests {
    use log::Log;

    use super::*;
    use crate::LogLevel;
    use crate::append::Testing;

    fn bridge(level: LogLevel) -> (LogCrateLogger, Testing, Testing) {
        let stdout = Testing::default();
        let stderr = Testing::default();
        let logger = Logger::builder()
            .disable_color(true)
            .stdout(stdout.clone())
            .stderr(stderr.clone())
            .build();
        logger.start(level);
        (LogCrateLogger(Arc::new(logger)), stdout, stderr)
    }

    fn forward(bridge: &LogCrateLogger, level: log::Level, message: &str) {
        bridge.log(
            &log::Record::builder()
                .level(level)
                .target("app::server")
                .file(Some("src/server.rs"))
                .line(Some(17))
                .args(format_args!("{message}"))
                .build(),
        );
    }

    #[test]
    fn test_levels_are_mapped() {
        let (bridge, stdout, stderr) = bridge(LogLevel::DEBUG);

        forward(&bridge, log::Level::Trace, "trace");
        forward(&bridge, log::Level::Debug, "debug");
        forward(&bridge, log::Level::Info, "info");
        forward(&bridge, log::Level::Warn, "warn");
        forward(&bridge, log::Level::Error, "error");

        let stdout = stdout.lines();
        assert_eq!(stdout.len(), 4);
        assert!(stdout[0].starts_with("DEBUG: "));
        assert!(stdout[0].ends_with(" server.rs:17: trace"));
        assert!(stdout[1].starts_with("DEBUG: "));
        assert!(stdout[2].starts_with("INFO: "));
        assert!(stdout[3].starts_with("WARNING: "));

        let stderr = stderr.lines();
        assert_eq!(stderr.len(), 1);
        assert!(stderr[0].starts_with("ERROR: "));
        assert!(stderr[0].ends_with(" server.rs:17: error"));
    }

    #[test]
    fn test_enabled_follows_logger_level() {
        let (bridge, stdout, _) = bridge(LogLevel::WARNING);

        let metadata = |level| log::Metadata::builder().level(level).build();
        assert!(!bridge.enabled(&metadata(log::Level::Trace)));
        assert!(!bridge.enabled(&metadata(log::Level::Info)));
        assert!(bridge.enabled(&metadata(log::Level::Warn)));
        assert!(bridge.enabled(&metadata(log::Level::Error)));

        forward(&bridge, log::Level::Info, "dropped");
        assert!(stdout.contents().is_empty());
    }
}
