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

use dailylog::LogLevel;
use dailylog::Logger;

fn main() {
    let level = LogLevel::from_env("DAILYLOG_LEVEL")
        .unwrap_or_else(|err| panic!("{err}"))
        .unwrap_or(LogLevel::DEBUG);

    let logger = Arc::new(Logger::builder().build());
    logger.start(level);
    dailylog::bridge::setup_log_crate(logger.clone());

    logger.started("main");
    dailylog::debug!(logger, "main", "level is {level:?}");
    dailylog::info!(logger, "main", "Hello {}!", "world");
    dailylog::warning!(logger, "main", "disk usage at {}%", 91);
    dailylog::error!(logger, "main", err = "connection refused"; "failed to reach {}", "db:5432");
    log::info!("forwarded from the log crate");
    logger.completed("main");
}
