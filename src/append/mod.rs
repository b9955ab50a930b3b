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

//! Sinks that formatted log lines are written to.

use std::fmt;

use crate::Error;

mod discard;
mod file;
mod stdio;
mod testing;

pub use self::discard::Discard;
pub use self::file::File;
pub use self::stdio::Stderr;
pub use self::stdio::Stdout;
pub use self::testing::Testing;

/// A trait representing a sink that receives fully formatted log lines.
///
/// Every call carries exactly one newline-terminated line. Implementations write synchronously.
pub trait Append: fmt::Debug + Send + Sync + 'static {
    /// Writes one formatted line.
    fn append(&self, line: &[u8]) -> Result<(), Error>;

    /// Flushes any buffered bytes.
    fn flush(&self) -> Result<(), Error> {
        Ok(())
    }
}
