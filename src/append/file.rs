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

use std::fs;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::sync::Mutex;
use std::sync::PoisonError;

use crate::Error;
use crate::append::Append;

/// An appender that writes log lines to a single file, synchronously.
///
/// Once [closed][File::close], further lines are dropped silently.
#[derive(Debug)]
pub struct File {
    path: PathBuf,
    writer: Mutex<Option<fs::File>>,
}

impl File {
    /// Create (or truncate) the file at `path`.
    ///
    /// The parent directory must exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created.
    pub fn create(path: impl Into<PathBuf>) -> Result<File, Error> {
        let path = path.into();
        let writer = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&path)
            .map_err(|err| Error::create_file(&path, err))?;

        Ok(File {
            path,
            writer: Mutex::new(Some(writer)),
        })
    }

    /// The path of the underlying file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether [`File::close`] has been called.
    pub fn is_closed(&self) -> bool {
        self.writer
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_none()
    }

    /// Flush and close the underlying file. Closing twice is a no-op.
    ///
    /// # Errors
    ///
    /// Returns an error if the pending bytes cannot be synced to disk.
    pub fn close(&self) -> Result<(), Error> {
        let writer = self
            .writer
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();

        match writer {
            Some(mut writer) => {
                writer.flush().map_err(Error::from_io_error)?;
                writer
                    .sync_all()
                    .map_err(|err| Error::close_file(&self.path, err))
            }
            None => Ok(()),
        }
    }
}

impl Append for File {
    fn append(&self, line: &[u8]) -> Result<(), Error> {
        let mut writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        match writer.as_mut() {
            Some(writer) => writer.write_all(line).map_err(Error::from_io_error),
            None => Ok(()),
        }
    }

    fn flush(&self) -> Result<(), Error> {
        let mut writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        match writer.as_mut() {
            Some(writer) => writer.flush().map_err(Error::from_io_error),
            None => Ok(()),
        }
    }
}
