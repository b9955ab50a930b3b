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

//! Log record and call site.

use std::borrow::Cow;
use std::fmt;
use std::panic::Location;

use jiff::Timestamp;

use crate::Severity;

/// The source location a log line is attributed to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CallSite<'a> {
    file: &'a str,
    line: u32,
}

impl CallSite<'static> {
    /// The location of the caller of the function this is invoked from.
    ///
    /// Every function between the user code and this call must be `#[track_caller]`.
    #[track_caller]
    pub fn caller() -> CallSite<'static> {
        Location::caller().into()
    }
}

impl<'a> CallSite<'a> {
    /// Create a call site from a file path and a line number.
    pub fn new(file: &'a str, line: u32) -> Self {
        Self { file, line }
    }

    /// The source file path.
    pub fn file(&self) -> &'a str {
        self.file
    }

    /// The line in the source file.
    pub fn line(&self) -> u32 {
        self.line
    }

    /// The file name without its directories, as printed in each line.
    pub fn filename(&self) -> Cow<'a, str> {
        std::path::Path::new(self.file)
            .file_name()
            .map(std::ffi::OsStr::to_string_lossy)
            .unwrap_or(Cow::Borrowed(self.file))
    }
}

impl From<&'static Location<'static>> for CallSite<'static> {
    fn from(location: &'static Location<'static>) -> Self {
        CallSite::new(location.file(), location.line())
    }
}

/// The payload of a log line.
#[derive(Clone, Debug)]
pub struct Record<'a> {
    now: Timestamp,
    severity: Severity,
    call_site: CallSite<'a>,
    label: &'a str,
    args: fmt::Arguments<'a>,
}

impl<'a> Record<'a> {
    /// Create a new record observed at `now`.
    pub fn new(
        now: Timestamp,
        severity: Severity,
        call_site: CallSite<'a>,
        label: &'a str,
        args: fmt::Arguments<'a>,
    ) -> Self {
        Self {
            now,
            severity,
            call_site,
            label,
            args,
        }
    }

    /// The observed time.
    pub fn time(&self) -> Timestamp {
        self.now
    }

    /// The severity of the line.
    pub fn severity(&self) -> Severity {
        self.severity
    }

    /// Where the line was emitted.
    pub fn call_site(&self) -> CallSite<'a> {
        self.call_site
    }

    /// The caller label, as given by the caller. May be empty.
    pub fn label(&self) -> &'a str {
        self.label
    }

    /// The message body.
    pub fn args(&self) -> &fmt::Arguments<'a> {
        &self.args
    }
}

/// Normalize a caller label to the `name()` form.
///
/// # Examples
///
/// ```
/// use dailylog::format_func_name;
///
/// assert_eq!(format_func_name("Example"), "Example()");
/// assert_eq!(format_func_name("Example()"), "Example()");
/// ```
pub fn format_func_name(label: &str) -> Cow<'_, str> {
    if label.ends_with("()") {
        Cow::Borrowed(label)
    } else {
        Cow::Owned(format!("{label}()"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_func_name_is_idempotent() {
        assert_eq!(format_func_name("Example"), "Example()");
        assert_eq!(format_func_name("Example()"), "Example()");

        let once = format_func_name("Stop").into_owned();
        assert_eq!(format_func_name(&once), once);
        assert!(matches!(format_func_name(&once), Cow::Borrowed(_)));
    }

    #[test]
    fn test_format_func_name_partial_parens() {
        assert_eq!(format_func_name("Example("), "Example(()");
        assert_eq!(format_func_name(""), "()");
    }

    #[test]
    fn test_call_site_filename() {
        let site = CallSite::new("src/retention.rs", 42);
        assert_eq!(site.filename(), "retention.rs");
        assert_eq!(site.line(), 42);

        let site = CallSite::caller();
        assert_eq!(site.filename(), "record.rs");
    }
}
