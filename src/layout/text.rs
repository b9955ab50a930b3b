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

use std::fmt::Write;

use colored::Colorize;
use jiff::tz::TimeZone;

use crate::record::Record;
use crate::record::format_func_name;

/// A layout that formats a record as one line of text.
///
/// Output format:
///
/// ```text
/// DEBUG: 2024/08/11 22:44:57 retention.rs:88: LogDirectoryCleanup() Started BaseFilePath[logs] DaysToKeep[7]
/// INFO: 2024/08/11 22:44:57 main.rs:12: main() service ready
/// WARNING: 2024/08/11 22:44:57 http.rs:97: [HTTP] | 404 |    1.2ms | 127.0.0.1 | GET     | /missing
/// ERROR: 2024/08/11 22:44:57 main.rs:20: main() failed to bind: address in use
/// ```
///
/// The severity prefix is colored unless [`TextLayout::no_color`] is set. Timestamps use the
/// system time zone unless another one is given with [`TextLayout::timezone`].
///
/// # Examples
///
/// ```
/// use dailylog::layout::TextLayout;
/// use jiff::tz::TimeZone;
///
/// let layout = TextLayout::default().no_color().timezone(TimeZone::UTC);
/// ```
#[derive(Debug, Clone, Default)]
pub struct TextLayout {
    no_color: bool,
    tz: Option<TimeZone>,
}

impl TextLayout {
    /// Disable colored output.
    pub fn no_color(mut self) -> Self {
        self.no_color = true;
        self
    }

    /// Render timestamps in the given time zone.
    pub fn timezone(mut self, tz: TimeZone) -> Self {
        self.tz = Some(tz);
        self
    }

    /// Whether the severity prefix is colored.
    pub fn is_colored(&self) -> bool {
        !self.no_color
    }

    /// Format `record` as one newline-terminated line.
    pub fn format(&self, record: &Record) -> Vec<u8> {
        let severity = record.severity();
        let mut text = if self.no_color {
            severity.prefix().to_string()
        } else {
            severity.prefix().color(severity.color()).to_string()
        };

        let tz = self.tz.clone().unwrap_or_else(TimeZone::system);
        let zoned = record.time().to_zoned(tz);
        let time = zoned.strftime("%Y/%m/%d %H:%M:%S");
        let call_site = record.call_site();
        let file = call_site.filename();
        let line = call_site.line();
        let message = record.args();

        // SAFETY: write to a string always succeeds
        write!(&mut text, "{time} {file}:{line}: ").unwrap();
        let label = record.label();
        if !label.is_empty() {
            write!(&mut text, "{} ", format_func_name(label)).unwrap();
        }
        writeln!(&mut text, "{message}").unwrap();

        text.into_bytes()
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use jiff::Timestamp;

    use super::*;
    use crate::Severity;
    use crate::record::CallSite;

    fn format(layout: &TextLayout, severity: Severity, label: &str) -> String {
        let now = Timestamp::from_str("2024-08-11T14:44:57Z").unwrap();
        let line = layout.format(&Record::new(
            now,
            severity,
            CallSite::new("src/bin/server.rs", 51),
            label,
            format_args!("Hello {}!", "world"),
        ));
        String::from_utf8(line).unwrap()
    }

    #[test]
    fn test_plain_line() {
        let layout = TextLayout::default().no_color().timezone(TimeZone::UTC);
        assert_eq!(
            format(&layout, Severity::Info, "main"),
            "INFO: 2024/08/11 14:44:57 server.rs:51: main() Hello world!\n"
        );
        assert_eq!(
            format(&layout, Severity::Warning, "Run()"),
            "WARNING: 2024/08/11 14:44:57 server.rs:51: Run() Hello world!\n"
        );
    }

    #[test]
    fn test_empty_label_is_omitted() {
        let layout = TextLayout::default().no_color().timezone(TimeZone::UTC);
        assert_eq!(
            format(&layout, Severity::Error, ""),
            "ERROR: 2024/08/11 14:44:57 server.rs:51: Hello world!\n"
        );
    }

    #[test]
    fn test_timezone_shifts_timestamp() {
        let tz = TimeZone::fixed(jiff::tz::offset(8));
        let layout = TextLayout::default().no_color().timezone(tz);
        assert_eq!(
            format(&layout, Severity::Debug, "main"),
            "DEBUG: 2024/08/11 22:44:57 server.rs:51: main() Hello world!\n"
        );
    }

    #[test]
    fn test_colored_line_keeps_prefix_text() {
        let layout = TextLayout::default().timezone(TimeZone::UTC);
        assert!(layout.is_colored());
        let line = format(&layout, Severity::Error, "main");
        assert!(line.contains("ERROR: "));
        assert!(line.ends_with("server.rs:51: main() Hello world!\n"));
    }
}
