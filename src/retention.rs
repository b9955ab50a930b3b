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

//! Removal of dated log directories past a retention window.
//!
//! Log directories are named after the UTC day they were created on, `YYYY-MM-DD`. A cleanup
//! pass lists the immediate subdirectories of a root, parses their names as dates and removes
//! every directory dated on or before `today - days_to_keep`. The pass is best-effort: every
//! failure is reported through the logger and never returned to the caller.

use std::fs;
use std::io;
use std::path::Path;
use std::path::PathBuf;

use jiff::Span;
use jiff::civil::Date;

use crate::Error;
use crate::Logger;
use crate::clock::Clock;

const LABEL: &str = "LogDirectoryCleanup";

/// A directory whose name parsed as a calendar date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetentionEntry {
    name: String,
    date: Date,
    path: PathBuf,
}

impl RetentionEntry {
    /// Parse the last component of `path` as a `YYYY-MM-DD` date.
    ///
    /// # Errors
    ///
    /// Returns an error unless the name splits on `-` into exactly three integers. Months and
    /// days past the end of their range roll over into the following ones, so `2021-02-29`
    /// is read as `2021-03-01`.
    pub fn parse(path: impl Into<PathBuf>) -> Result<RetentionEntry, Error> {
        let path = path.into();
        let name = path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| Error::malformed_dir_name(&path.to_string_lossy()))?
            .to_string();
        let date = parse_date(&name)?;

        Ok(RetentionEntry { name, date, path })
    }

    /// The directory name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The date the directory is named after.
    pub fn date(&self) -> Date {
        self.date
    }

    /// The full path of the directory.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whole days from this entry's date up to `cutoff`; negative if the entry is newer.
    pub fn age_days(&self, cutoff: Date) -> Result<i64, Error> {
        let span = cutoff.since(self.date).map_err(|err| {
            Error::new("failed to compute log directory age")
                .with_context("name", &self.name)
                .with_source(err)
        })?;
        Ok(i64::from(span.get_days()))
    }
}

fn parse_date(name: &str) -> Result<Date, Error> {
    let malformed = || Error::malformed_dir_name(name);

    let parts = name.split('-').collect::<Vec<_>>();
    let [year, month, day] = parts.as_slice() else {
        return Err(malformed());
    };

    let year = year
        .parse::<i16>()
        .map_err(|err| malformed().with_context("year", year).with_source(err))?;
    let month = month
        .parse::<i64>()
        .map_err(|err| malformed().with_context("month", month).with_source(err))?;
    let day = day
        .parse::<i64>()
        .map_err(|err| malformed().with_context("day", day).with_source(err))?;

    // out of range months and days carry over, e.g. 2020-13-01 is 2021-01-01
    let out_of_range = |err: jiff::Error| malformed().with_source(err);
    let months = Span::new().try_months(month.saturating_sub(1)).map_err(out_of_range)?;
    let days = Span::new().try_days(day.saturating_sub(1)).map_err(out_of_range)?;
    Date::new(year, 1, 1)
        .and_then(|date| date.checked_add(months))
        .and_then(|date| date.checked_add(days))
        .map_err(out_of_range)
}

/// A single cleanup pass over the dated directories under a root.
///
/// A negative `days_to_keep` is not rejected: it moves the cutoff into the future, so every
/// correctly named directory up to that future date is removed.
///
/// # Examples
///
/// ```
/// use dailylog::LogLevel;
/// use dailylog::Logger;
/// use dailylog::retention::Cleaner;
///
/// let root = tempfile::tempdir().unwrap();
/// std::fs::create_dir(root.path().join("2020-01-01")).unwrap();
/// std::fs::create_dir(root.path().join("2099-01-01")).unwrap();
///
/// let logger = Logger::builder().build();
/// logger.start(LogLevel::ERROR);
/// Cleaner::new(root.path(), 5).run(&logger);
///
/// assert!(!root.path().join("2020-01-01").exists());
/// assert!(root.path().join("2099-01-01").exists());
/// ```
#[derive(Debug, Clone)]
pub struct Cleaner {
    root: PathBuf,
    days_to_keep: i64,
    preserve: Option<PathBuf>,
    clock: Clock,
    remove: fn(&Path) -> io::Result<()>,
}

fn remove_dir(path: &Path) -> io::Result<()> {
    fs::remove_dir_all(path)
}

impl Cleaner {
    /// Create a pass over `root` keeping `days_to_keep` days.
    pub fn new(root: impl Into<PathBuf>, days_to_keep: i64) -> Self {
        Self {
            root: root.into(),
            days_to_keep,
            preserve: None,
            clock: Clock::DefaultClock,
            remove: remove_dir,
        }
    }

    /// Never remove `dir`, whatever its date.
    pub fn preserve(mut self, dir: impl Into<PathBuf>) -> Self {
        self.preserve = Some(dir.into());
        self
    }

    pub(crate) fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    #[cfg(test)]
    pub(crate) fn with_remover(mut self, remove: fn(&Path) -> io::Result<()>) -> Self {
        self.remove = remove;
        self
    }

    /// Today's UTC date minus the retention window.
    ///
    /// # Errors
    ///
    /// Returns an error if the cutoff falls outside the supported calendar range.
    pub fn cutoff(&self) -> Result<Date, Error> {
        let overflow = |err: jiff::Error| {
            Error::new("failed to compute retention cutoff")
                .with_context("days_to_keep", self.days_to_keep)
                .with_source(err)
        };

        let window = Span::new().try_days(self.days_to_keep).map_err(overflow)?;
        self.clock
            .today_utc()
            .checked_sub(window)
            .map_err(overflow)
    }

    /// Run the pass, reporting every step and failure through `logger`.
    pub fn run(&self, logger: &Logger) {
        logger.started_with(
            LABEL,
            format_args!(
                "BaseFilePath[{}] DaysToKeep[{}]",
                self.root.display(),
                self.days_to_keep
            ),
        );

        let read_dir = match fs::read_dir(&self.root) {
            Ok(read_dir) => read_dir,
            Err(err) => {
                logger.completed_error(LABEL, err);
                return;
            }
        };

        let cutoff = match self.cutoff() {
            Ok(cutoff) => cutoff,
            Err(err) => {
                logger.completed_error(LABEL, err);
                return;
            }
        };
        logger.debug(LABEL, format_args!("CompareDate[{cutoff}]"));

        let mut dirs = vec![];
        for entry in read_dir {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    logger.error_with(LABEL, err, format_args!("Attempting To Read Directory"));
                    continue;
                }
            };

            // symlinks are not followed; only real directories are candidates
            match entry.file_type() {
                Ok(file_type) if file_type.is_dir() => dirs.push(entry.path()),
                Ok(_) => {}
                Err(err) => {
                    logger.error_with(
                        LABEL,
                        err,
                        format_args!("Attempting To Inspect [{}]", entry.path().display()),
                    );
                }
            }
        }
        dirs.sort();

        for dir in dirs {
            self.check(logger, cutoff, dir);
        }

        logger.completed(LABEL);
    }

    fn check(&self, logger: &Logger, cutoff: Date, dir: PathBuf) {
        if self.preserve.as_deref() == Some(dir.as_path()) {
            logger.debug(
                LABEL,
                format_args!("Keeping Active Directory[{}]", dir.display()),
            );
            return;
        }

        let entry = match RetentionEntry::parse(&dir) {
            Ok(entry) => entry,
            Err(err) => {
                logger.error_with(
                    LABEL,
                    err,
                    format_args!("Attempting To Convert Directory [{}]", dir.display()),
                );
                return;
            }
        };

        let days_old = match entry.age_days(cutoff) {
            Ok(days_old) => days_old,
            Err(err) => {
                logger.error_with(
                    LABEL,
                    err,
                    format_args!("Attempting To Date Directory [{}]", dir.display()),
                );
                return;
            }
        };
        logger.debug(
            LABEL,
            format_args!(
                "Checking Directory[{}] DaysOld[{days_old}]",
                entry.path().display()
            ),
        );

        if days_old >= 0 {
            logger.debug(
                LABEL,
                format_args!("Removing Directory[{}]", entry.path().display()),
            );
            if let Err(err) = (self.remove)(entry.path()) {
                logger.error_with(
                    LABEL,
                    err,
                    format_args!("Attempting To Remove Directory [{}]", entry.path().display()),
                );
                return;
            }
            logger.debug(
                LABEL,
                format_args!("Directory Removed [{}]", entry.path().display()),
            );
        }
    }
}
