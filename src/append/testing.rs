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
use std::sync::Mutex;
use std::sync::PoisonError;

use crate::Error;
use crate::append::Append;

/// An appender that keeps every line in memory so that tests can inspect the output.
///
/// Clones share the same buffer.
///
/// # Examples
///
/// ```
/// use dailylog::LogLevel;
/// use dailylog::Logger;
/// use dailylog::append::Testing;
///
/// let stdout = Testing::default();
/// let logger = Logger::builder()
///     .disable_color(true)
///     .stdout(stdout.clone())
///     .build();
/// logger.start(LogLevel::INFO);
/// logger.info("main", format_args!("hello {}", "world"));
///
/// assert!(stdout.lines()[0].ends_with("main() hello world"));
/// ```
#[derive(Debug, Default, Clone)]
pub struct Testing {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl Testing {
    /// Everything written so far.
    pub fn contents(&self) -> String {
        let buffer = self.buffer.lock().unwrap_or_else(PoisonError::into_inner);
        String::from_utf8_lossy(&buffer).into_owned()
    }

    /// Everything written so far, split into lines without the trailing newlines.
    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(str::to_string).collect()
    }

    /// Drop everything written so far.
    pub fn clear(&self) {
        self.buffer
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl Append for Testing {
    fn append(&self, line: &[u8]) -> Result<(), Error> {
        self.buffer
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .extend_from_slice(line);
        Ok(())
    }
}
