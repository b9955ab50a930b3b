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

use dailylog::LogLevel;
use dailylog::Logger;
use dailylog::append::Testing;
use tempfile::TempDir;

#[test]
fn test_file_receives_enabled_severities() {
    let temp_dir = TempDir::new().expect("failed to create a temporary directory");
    let stdout = Testing::default();
    let stderr = Testing::default();
    let logger = Logger::builder()
        .disable_color(true)
        .stdout(stdout.clone())
        .stderr(stderr.clone())
        .build();

    let path = logger.start_with_file(LogLevel::WARNING, temp_dir.path(), 7);
    let date_dir = path.parent().unwrap();
    assert_eq!(date_dir.parent().unwrap(), temp_dir.path());
    assert_eq!(path.extension().unwrap(), "txt");

    dailylog::info!(logger, "Handle", "dropped");
    dailylog::warning!(logger, "Handle", "slow request");
    let warning_line = line!() - 1;
    dailylog::error!(logger, "Handle", err = "timeout"; "request {}", 7);
    logger.flush();

    let content = fs::read_to_string(&path).unwrap();
    let lines = content.lines().collect::<Vec<_>>();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("WARNING: "));
    assert!(lines[0].ends_with(&format!(
        "file_logging.rs:{warning_line}: Handle() slow request"
    )));
    assert!(lines[1].starts_with("ERROR: "));
    assert!(lines[1].ends_with("Handle() request 7: timeout"));

    assert_eq!(stdout.lines().len(), 1);
    assert_eq!(stderr.lines().len(), 1);

    logger.stop().unwrap();
    dailylog::error!(logger, "Handle", "after stop");
    assert_eq!(fs::read_to_string(&path).unwrap(), content);
    assert_eq!(stderr.lines().len(), 2);
}

#[test]
fn test_restart_opens_a_new_file() {
    let temp_dir = TempDir::new().expect("failed to create a temporary directory");
    let logger = Logger::builder()
        .disable_color(true)
        .stdout(Testing::default())
        .stderr(Testing::default())
        .build();

    let first = logger.start_with_file(LogLevel::INFO, temp_dir.path(), 7);
    dailylog::info!(logger, "main", "first run");

    logger.start(LogLevel::INFO);
    assert_eq!(logger.log_file(), None);
    dailylog::info!(logger, "main", "console only");

    let content = fs::read_to_string(&first).unwrap();
    assert!(content.contains("first run"));
    assert!(!content.contains("console only"));
}
