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

use std::fmt;
use std::fs;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::PoisonError;
use std::sync::RwLock;
use std::sync::atomic::AtomicU8;
use std::sync::atomic::Ordering;

use jiff::tz::TimeZone;

use super::LoggerBuilder;
use crate::Error;
use crate::LogLevel;
use crate::Severity;
use crate::append;
use crate::append::Append;
use crate::clock::Clock;
use crate::layout::TextLayout;
use crate::record::CallSite;
use crate::record::Record;
use crate::retention::Cleaner;
use crate::route::Console;
use crate::route::DestinationSet;

/// A leveled logger writing to the console and, optionally, to a daily log file.
///
/// Configure it with [`Logger::start`] or [`Logger::start_with_file`]; each call resolves a
/// fresh [`DestinationSet`] that replaces the previous one as a whole. The logger can be shared
/// between threads behind an [`Arc`].
///
/// # Examples
///
/// ```
/// use dailylog::LogLevel;
/// use dailylog::Logger;
///
/// let logger = Logger::builder().build();
/// logger.start(LogLevel::INFO);
///
/// logger.info("main", format_args!("listening on {}", 8080));
/// logger.debug("main", format_args!("this line is discarded"));
/// ```
#[derive(Debug)]
pub struct Logger {
    level: AtomicU8,
    routes: RwLock<Arc<DestinationSet>>,
    file: Mutex<Option<Arc<append::File>>>,
    console: Console,
    layout: TextLayout,
    clock: Clock,
}

impl Default for Logger {
    fn default() -> Self {
        LoggerBuilder::new().build()
    }
}

impl Logger {
    /// Create a new [`LoggerBuilder`].
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }

    pub(super) fn new(console: Console, layout: TextLayout, clock: Clock) -> Self {
        Self {
            level: AtomicU8::new(LogLevel::OFF.bits()),
            routes: RwLock::new(Arc::new(DestinationSet::discard_all())),
            file: Mutex::new(None),
            console,
            layout,
            clock,
        }
    }

    /// The level of the latest configuration.
    pub fn level(&self) -> LogLevel {
        LogLevel::from_bits(self.level.load(Ordering::Relaxed))
    }

    /// A snapshot of the current destinations.
    pub fn destinations(&self) -> Arc<DestinationSet> {
        self.routes
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Whether lines of `severity` are currently written anywhere.
    pub fn enabled(&self, severity: Severity) -> bool {
        !self.destinations().get(severity).is_discard()
    }

    /// Whether lines are decorated with ANSI colors.
    pub fn is_colored(&self) -> bool {
        self.layout.is_colored()
    }

    /// The log file of the current configuration, if any.
    pub fn log_file(&self) -> Option<PathBuf> {
        self.file
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .map(|file| file.path().to_path_buf())
    }

    /// Route lines to the console only.
    ///
    /// A log file opened by an earlier configuration is closed.
    pub fn start(&self, level: LogLevel) {
        let previous = self.turn_on(level, None);
        close_replaced(previous);
    }

    /// Route lines to the console and to a new file under `base_dir`, then remove dated
    /// directories that are `days_to_keep` days old or older.
    ///
    /// The file is created at `<base_dir>/<YYYY-MM-DD>/<YYYY-MM-DDTHH-MM-SS>.txt` using the
    /// current UTC time. The directory of the new file is never removed by the cleanup, so a
    /// `days_to_keep` of zero removes every other directory dated today or earlier but keeps
    /// today's. Use [`Logger::log_directory_cleanup`] to clean up without that exception.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory or the file cannot be created. The previous
    /// configuration stays in place in that case.
    pub fn try_start_with_file(
        &self,
        level: LogLevel,
        base_dir: impl AsRef<Path>,
        days_to_keep: i64,
    ) -> Result<PathBuf, Error> {
        let base_dir = base_dir.as_ref();
        let now = self.clock.now().to_zoned(TimeZone::UTC);

        let date_dir = base_dir.join(now.strftime("%Y-%m-%d").to_string());
        fs::create_dir_all(&date_dir).map_err(|err| Error::create_dir(&date_dir, err))?;

        let filename = format!("{}.txt", now.strftime("%Y-%m-%dT%H-%M-%S"));
        let file = Arc::new(append::File::create(date_dir.join(filename))?);
        let path = file.path().to_path_buf();
        let previous = self.turn_on(level, Some(file));
        close_replaced(previous);

        Cleaner::new(base_dir, days_to_keep)
            .preserve(&date_dir)
            .with_clock(self.clock.clone())
            .run(self);

        Ok(path)
    }

    /// Same as [`Logger::try_start_with_file`], but a failure to create the log directory or
    /// file is fatal.
    ///
    /// The directory holding the new file survives the cleanup even when `days_to_keep` is zero.
    ///
    /// # Panics
    ///
    /// Never panics; the process exits with status 1 instead, after reporting the error on
    /// stderr.
    pub fn start_with_file(
        &self,
        level: LogLevel,
        base_dir: impl AsRef<Path>,
        days_to_keep: i64,
    ) -> PathBuf {
        match self.try_start_with_file(level, base_dir, days_to_keep) {
            Ok(path) => path,
            Err(err) => {
                let _ = writeln!(std::io::stderr(), "failed to start file logging: {err}");
                std::process::exit(1);
            }
        }
    }

    /// Close the log file, if one is open, and keep logging to the console at the same level.
    ///
    /// Calling `stop` without an open file only logs the start and completion markers.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be flushed to disk.
    pub fn stop(&self) -> Result<(), Error> {
        self.started("Stop");

        let open = self
            .file
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some();
        let result = if open {
            self.debug("Stop", format_args!("Closing File"));
            self.turn_on(self.level(), None).map_or(Ok(()), |file| file.close())
        } else {
            Ok(())
        };

        self.completed("Stop");
        result
    }

    /// Flush the console streams and the log file.
    pub fn flush(&self) {
        let file = self
            .file
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();

        let console = self.console.flush();
        let file = file.map_or(Ok(()), |file| file.flush());
        if let Err(err) = console.and(file) {
            handle_flush_error(err);
        }
    }

    /// Remove the dated directories under `root` that are `days_to_keep` days old or older.
    ///
    /// Progress and failures are reported through this logger. See
    /// [`Cleaner`](crate::retention::Cleaner) for the naming and age rules.
    pub fn log_directory_cleanup(&self, root: impl AsRef<Path>, days_to_keep: i64) {
        Cleaner::new(root.as_ref(), days_to_keep)
            .with_clock(self.clock.clone())
            .run(self);
    }

    // returns the file of the replaced configuration
    fn turn_on(
        &self,
        level: LogLevel,
        file: Option<Arc<append::File>>,
    ) -> Option<Arc<append::File>> {
        let secondary = file.clone().map(|file| file as Arc<dyn Append>);
        let routes = Arc::new(DestinationSet::resolve(level, secondary));

        *self.routes.write().unwrap_or_else(PoisonError::into_inner) = routes;
        self.level.store(level.bits(), Ordering::Relaxed);

        std::mem::replace(
            &mut *self.file.lock().unwrap_or_else(PoisonError::into_inner),
            file,
        )
    }

    /// Write one line of `severity` attributed to `call_site`.
    ///
    /// This is the single writer all emitters go through. Write failures are reported on stderr
    /// and never returned.
    pub fn log(
        &self,
        severity: Severity,
        call_site: CallSite<'_>,
        label: &str,
        args: fmt::Arguments<'_>,
    ) {
        let routes = self.destinations();
        let destination = routes.get(severity);
        if destination.is_discard() {
            return;
        }

        let record = Record::new(self.clock.now(), severity, call_site, label, args);
        let line = self.layout.format(&record);
        if let Err(err) = destination.write(&self.console, &line) {
            handle_log_error(&record, err);
        }
    }

    /// Write a Debug line.
    #[track_caller]
    pub fn debug(&self, label: &str, args: fmt::Arguments<'_>) {
        self.log(Severity::Debug, CallSite::caller(), label, args);
    }

    /// Write an Info line.
    #[track_caller]
    pub fn info(&self, label: &str, args: fmt::Arguments<'_>) {
        self.log(Severity::Info, CallSite::caller(), label, args);
    }

    /// Write a Warning line.
    #[track_caller]
    pub fn warning(&self, label: &str, args: fmt::Arguments<'_>) {
        self.log(Severity::Warning, CallSite::caller(), label, args);
    }

    /// Write an Error line.
    #[track_caller]
    pub fn error(&self, label: &str, args: fmt::Arguments<'_>) {
        self.log(Severity::Error, CallSite::caller(), label, args);
    }

    /// Write an Error line with `err` appended after a colon.
    #[track_caller]
    pub fn error_with(&self, label: &str, err: impl fmt::Display, args: fmt::Arguments<'_>) {
        self.log(
            Severity::Error,
            CallSite::caller(),
            label,
            format_args!("{args}: {err}"),
        );
    }

    /// Write a Debug line marking the start of `label`.
    #[track_caller]
    pub fn started(&self, label: &str) {
        self.log(
            Severity::Debug,
            CallSite::caller(),
            label,
            format_args!("Started"),
        );
    }

    /// Write a Debug line marking the start of `label`, followed by a message.
    #[track_caller]
    pub fn started_with(&self, label: &str, args: fmt::Arguments<'_>) {
        self.log(
            Severity::Debug,
            CallSite::caller(),
            label,
            format_args!("Started {args}"),
        );
    }

    /// Write a Debug line marking the completion of `label`.
    #[track_caller]
    pub fn completed(&self, label: &str) {
        self.log(
            Severity::Debug,
            CallSite::caller(),
            label,
            format_args!("Completed"),
        );
    }

    /// Write a Debug line marking the completion of `label`, followed by a message.
    #[track_caller]
    pub fn completed_with(&self, label: &str, args: fmt::Arguments<'_>) {
        self.log(
            Severity::Debug,
            CallSite::caller(),
            label,
            format_args!("Completed {args}"),
        );
    }

    /// Write an Error line marking that `label` completed with `err`.
    #[track_caller]
    pub fn completed_error(&self, label: &str, err: impl fmt::Display) {
        self.log(
            Severity::Error,
            CallSite::caller(),
            label,
            format_args!("Completed with ERROR: {err}"),
        );
    }
}

fn close_replaced(previous: Option<Arc<append::File>>) {
    if let Some(previous) = previous {
        if let Err(err) = previous.close() {
            handle_flush_error(err);
        }
    }
}

fn handle_log_error(record: &Record, error: Error) {
    let Err(fallback_error) = write!(
        std::io::stderr(),
        r###"
Error perform logging.
    Attempted to log: {args}
    Record: {record:?}
    Error: {error:?}
"###,
        args = record.args(),
        record = record,
        error = error,
    ) else {
        return;
    };

    panic!(
        r###"
Error performing stderr logging after error occurred during regular logging.
    Attempted to log: {args}
    Record: {record:?}
    Error: {error:?}
    Fallback error: {fallback_error}
"###,
        args = record.args(),
        record = record,
        error = error,
        fallback_error = fallback_error,
    );
}

fn handle_flush_error(error: Error) {
    let Err(fallback_error) = write!(
        std::io::stderr(),
        r###"
Error perform flush.
    Error: {error:?}
"###,
    ) else {
        return;
    };

    panic!(
        r###"
Error performing stderr logging after error occurred during regular flush.
    Error: {error:?}
    Fallback error: {fallback_error}
"###,
    );
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;
    use std::thread;

    use jiff::Timestamp;
    use tempfile::TempDir;

    use super::*;
    use crate::append::Testing;
    use crate::clock::ManualClock;

    const NOW: &str = "2024-08-10T12:34:56Z";

    fn test_logger() -> (Logger, Testing, Testing) {
        let stdout = Testing::default();
        let stderr = Testing::default();
        let now = Timestamp::from_str(NOW).unwrap();
        let logger = Logger::builder()
            .disable_color(true)
            .utc(true)
            .stdout(stdout.clone())
            .stderr(stderr.clone())
            .clock(Clock::ManualClock(ManualClock::new(now)))
            .build();
        (logger, stdout, stderr)
    }

    #[test]
    fn test_discards_before_start() {
        let (logger, stdout, stderr) = test_logger();
        logger.error("main", format_args!("nobody hears this"));
        assert_eq!(logger.level(), LogLevel::OFF);
        assert!(stdout.contents().is_empty());
        assert!(stderr.contents().is_empty());
    }

    #[test]
    fn test_emitted_line_format() {
        let (logger, stdout, _) = test_logger();
        logger.start(LogLevel::INFO);

        logger.info("main", format_args!("hello {}", 42));
        let line = line!() - 1;

        assert_eq!(
            stdout.contents(),
            format!("INFO: 2024/08/10 12:34:56 logger.rs:{line}: main() hello 42\n")
        );
    }

    #[test]
    fn test_severities_follow_threshold() {
        let (logger, stdout, stderr) = test_logger();
        logger.start(LogLevel::WARNING);

        logger.debug("Run", format_args!("debug"));
        logger.info("Run", format_args!("info"));
        logger.warning("Run", format_args!("warning"));
        logger.error("Run", format_args!("error"));

        let stdout = stdout.lines();
        assert_eq!(stdout.len(), 1);
        assert!(stdout[0].starts_with("WARNING: "));
        assert!(stdout[0].ends_with("Run() warning"));

        let stderr = stderr.lines();
        assert_eq!(stderr.len(), 1);
        assert!(stderr[0].starts_with("ERROR: "));
        assert!(stderr[0].ends_with("Run() error"));

        assert!(!logger.enabled(Severity::Info));
        assert!(logger.enabled(Severity::Warning));
    }

    #[test]
    fn test_marker_messages() {
        let (logger, stdout, stderr) = test_logger();
        logger.start(LogLevel::DEBUG);

        logger.started("Stop");
        logger.started_with("Cleanup", format_args!("Days[{}]", 3));
        logger.completed("Stop()");
        logger.completed_with("Cleanup", format_args!("Removed[{}]", 2));
        logger.completed_error("Cleanup", "disk full");
        logger.error_with("Cleanup", "permission denied", format_args!("Removing [{}]", "a"));

        let stdout = stdout.lines();
        assert!(stdout[0].ends_with(": Stop() Started"));
        assert!(stdout[1].ends_with(": Cleanup() Started Days[3]"));
        assert!(stdout[2].ends_with(": Stop() Completed"));
        assert!(stdout[3].ends_with(": Cleanup() Completed Removed[2]"));

        let stderr = stderr.lines();
        assert!(stderr[0].ends_with(": Cleanup() Completed with ERROR: disk full"));
        assert!(stderr[1].ends_with(": Cleanup() Removing [a]: permission denied"));
    }

    #[test]
    fn test_reconfigure_replaces_destinations() {
        let (logger, stdout, stderr) = test_logger();
        logger.start(LogLevel::DEBUG);
        let first = logger.destinations();

        logger.start(LogLevel::ERROR);
        assert_eq!(logger.level(), LogLevel::ERROR);
        logger.debug("main", format_args!("dropped"));
        logger.error("main", format_args!("kept"));
        assert!(stdout.contents().is_empty());
        assert_eq!(stderr.lines().len(), 1);

        logger.start(LogLevel::DEBUG);
        assert_eq!(*first, *logger.destinations());
    }

    #[test]
    fn test_start_with_file() {
        let temp_dir = TempDir::new().expect("failed to create a temporary directory");
        let (logger, stdout, stderr) = test_logger();

        let path = logger
            .try_start_with_file(LogLevel::INFO, temp_dir.path(), 7)
            .unwrap();
        assert_eq!(
            path,
            temp_dir
                .path()
                .join("2024-08-10")
                .join("2024-08-10T12-34-56.txt")
        );
        assert_eq!(logger.log_file(), Some(path.clone()));

        logger.debug("main", format_args!("not written"));
        logger.info("main", format_args!("to both"));
        logger.error("main", format_args!("failure"));

        let content = fs::read_to_string(&path).unwrap();
        let lines = content.lines().collect::<Vec<_>>();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with("main() to both"));
        assert!(lines[1].ends_with("main() failure"));
        assert_eq!(stdout.lines().len(), 1);
        assert_eq!(stderr.lines().len(), 1);

        logger.stop().unwrap();
        assert_eq!(logger.log_file(), None);
        assert_eq!(logger.level(), LogLevel::INFO);

        logger.info("main", format_args!("console only"));
        assert_eq!(fs::read_to_string(&path).unwrap(), content);
        assert_eq!(stdout.lines().len(), 2);

        // idempotent without an open file
        logger.stop().unwrap();
    }

    #[test]
    fn test_stop_logs_closing_into_file() {
        let temp_dir = TempDir::new().expect("failed to create a temporary directory");
        let (logger, stdout, _) = test_logger();

        let path = logger
            .try_start_with_file(LogLevel::DEBUG, temp_dir.path(), 7)
            .unwrap();
        stdout.clear();
        logger.stop().unwrap();

        let stdout = stdout.lines();
        assert_eq!(stdout.len(), 3);
        assert!(stdout[0].ends_with("Stop() Started"));
        assert!(stdout[1].ends_with("Stop() Closing File"));
        assert!(stdout[2].ends_with("Stop() Completed"));

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("Stop() Closing File"));
        assert!(!content.contains("Stop() Completed"));
    }

    #[test]
    fn test_silenced_console_still_feeds_file() {
        let temp_dir = TempDir::new().expect("failed to create a temporary directory");
        let logger = Logger::builder()
            .disable_color(true)
            .stdout(append::Discard)
            .stderr(append::Discard)
            .build();

        let path = logger
            .try_start_with_file(LogLevel::INFO, temp_dir.path(), 7)
            .unwrap();
        logger.info("main", format_args!("file only"));
        logger.stop().unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.ends_with("main() file only\n"));
    }

    #[test]
    fn test_start_with_file_removes_expired_directories() {
        let temp_dir = TempDir::new().expect("failed to create a temporary directory");
        fs::create_dir(temp_dir.path().join("2024-08-01")).unwrap();
        fs::create_dir(temp_dir.path().join("2024-08-05")).unwrap();
        let (logger, _, _) = test_logger();

        // keeping zero days would also match today's directory, which holds the new file
        let path = logger
            .try_start_with_file(LogLevel::INFO, temp_dir.path(), 0)
            .unwrap();

        assert!(!temp_dir.path().join("2024-08-01").exists());
        assert!(!temp_dir.path().join("2024-08-05").exists());
        assert!(path.exists());
    }

    #[test]
    fn test_start_with_file_reports_creation_failure() {
        let temp_dir = TempDir::new().expect("failed to create a temporary directory");
        let blocker = temp_dir.path().join("not-a-directory");
        fs::write(&blocker, "occupied").unwrap();
        let (logger, _, _) = test_logger();
        logger.start(LogLevel::ERROR);

        let err = logger
            .try_start_with_file(LogLevel::INFO, &blocker, 7)
            .unwrap_err();
        assert_eq!(err.message(), "failed to create log directory");
        assert_eq!(logger.level(), LogLevel::ERROR);
        assert_eq!(logger.log_file(), None);
    }

    #[test]
    fn test_concurrent_emit_and_reconfigure() {
        let (logger, stdout, stderr) = test_logger();
        let logger = Arc::new(logger);
        logger.start(LogLevel::DEBUG);

        let writers = (0..4)
            .map(|n| {
                let logger = logger.clone();
                thread::spawn(move || {
                    for i in 0..100 {
                        logger.info("worker", format_args!("{n}-{i}"));
                        logger.error("worker", format_args!("{n}-{i}"));
                    }
                })
            })
            .collect::<Vec<_>>();

        for i in 0..100 {
            let level = if i % 2 == 0 {
                LogLevel::ERROR
            } else {
                LogLevel::DEBUG
            };
            logger.start(level);
        }

        for writer in writers {
            writer.join().unwrap();
        }

        // errors are enabled under both levels
        assert_eq!(stderr.lines().len(), 400);
        assert!(stdout.lines().len() <= 400);
    }
}
