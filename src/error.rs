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
use std::io;
use std::path::Path;

/// An error raised while configuring the logger, writing a line or cleaning up log directories.
///
/// It carries a short message, the context it happened in (a path, a directory name, an
/// environment key) and the underlying cause, if any.
pub struct Error {
    message: String,
    context: Vec<(&'static str, String)>,
    source: Option<anyhow::Error>,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)?;
        for (key, value) in &self.context {
            write!(f, ", {key}: {value}")?;
        }
        if let Some(source) = &self.source {
            write!(f, ": {source}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.message)?;
        for (key, value) in &self.context {
            writeln!(f, "   {key}: {value}")?;
        }
        if let Some(source) = &self.source {
            writeln!(f, "Caused by: {source:#}")?;
        }
        Ok(())
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source.as_ref().map(|source| source.as_ref())
    }
}

impl Error {
    /// Create a new error with a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            context: vec![],
            source: None,
        }
    }

    /// Attach one more piece of context.
    pub fn with_context(mut self, key: &'static str, value: impl ToString) -> Self {
        self.context.push((key, value.to_string()));
        self
    }

    /// Attach the underlying cause. A later cause replaces an earlier one.
    pub fn with_source(mut self, src: impl Into<anyhow::Error>) -> Self {
        self.source = Some(src.into());
        self
    }

    /// The message without context and cause.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// A write or flush on an appender failed.
    pub fn from_io_error(err: io::Error) -> Error {
        Error::new("failed to write log line").with_source(err)
    }

    pub(crate) fn create_dir(path: &Path, err: io::Error) -> Error {
        Error::new("failed to create log directory")
            .with_context("path", path.display())
            .with_source(err)
    }

    pub(crate) fn create_file(path: &Path, err: io::Error) -> Error {
        Error::new("failed to create log file")
            .with_context("path", path.display())
            .with_source(err)
    }

    pub(crate) fn close_file(path: &Path, err: io::Error) -> Error {
        Error::new("failed to close log file")
            .with_context("path", path.display())
            .with_source(err)
    }

    pub(crate) fn malformed_dir_name(name: &str) -> Error {
        Error::new("malformed log directory name").with_context("name", name)
    }

    pub(crate) fn malformed_level(level: &str) -> Error {
        Error::new("malformed log level").with_context("level", format!("{level:?}"))
    }
}
