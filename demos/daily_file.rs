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

use dailylog::LogLevel;
use dailylog::Logger;

fn main() {
    let logger = Logger::builder().utc(true).build();
    let path = logger.start_with_file(LogLevel::INFO, "logs", 7);

    dailylog::info!(logger, "main", "writing to {}", path.display());
    dailylog::warning!(logger, "main", "this line is also written to the file");
    dailylog::debug!(logger, "main", "this line is discarded");

    if let Err(err) = logger.stop() {
        dailylog::error!(logger, "main", err = err; "failed to close the log file");
    }
}
