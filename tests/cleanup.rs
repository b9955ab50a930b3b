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
use std::path::Path;

use dailylog::LogLevel;
use dailylog::Logger;
use dailylog::append::Testing;
use tempfile::TempDir;

fn logger() -> (Logger, Testing, Testing) {
    let stdout = Testing::default();
    let stderr = Testing::default();
    let logger = Logger::builder()
        .disable_color(true)
        .stdout(stdout.clone())
        .stderr(stderr.clone())
        .build();
    logger.start(LogLevel::DEBUG);
    (logger, stdout, stderr)
}

fn names(root: &Path) -> Vec<String> {
    let mut names = fs::read_dir(root)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect::<Vec<_>>();
    names.sort();
    names
}

#[test]
fn test_old_directories_are_removed() {
    let temp_dir = TempDir::new().expect("failed to create a temporary directory");
    let root = temp_dir.path();
    fs::create_dir(root.join("2020-01-01")).unwrap();
    fs::create_dir(root.join("2099-01-01")).unwrap();
    fs::write(root.join("2020-01-01").join("run.txt"), "old run").unwrap();
    let (logger, _, stderr) = logger();

    logger.log_directory_cleanup(root, 5);

    assert_eq!(names(root), ["2099-01-01"]);
    assert!(stderr.contents().is_empty());
}

#[test]
fn test_malformed_directory_is_skipped() {
    let temp_dir = TempDir::new().expect("failed to create a temporary directory");
    let root = temp_dir.path();
    fs::create_dir(root.join("not-a-date")).unwrap();
    fs::create_dir(root.join("2020-01-01")).unwrap();
    let (logger, stdout, stderr) = logger();

    logger.log_directory_cleanup(root, 5);

    assert_eq!(names(root), ["not-a-date"]);
    let errors = stderr.lines();
    assert_eq!(errors.len(), 1);
    assert!(errors[0].contains("LogDirectoryCleanup() Attempting To Convert Directory ["));
    assert!(errors[0].contains("not-a-date"));
    assert!(
        stdout
            .lines()
            .last()
            .unwrap()
            .ends_with("LogDirectoryCleanup() Completed")
    );
}

#[test]
fn test_empty_directory() {
    let temp_dir = TempDir::new().expect("failed to create a temporary directory");
    let (logger, _, stderr) = logger();

    logger.log_directory_cleanup(temp_dir.path(), 5);

    assert!(names(temp_dir.path()).is_empty());
    assert!(stderr.contents().is_empty());
}

#[test]
fn test_cleanup_is_silent_below_error_level() {
    let temp_dir = TempDir::new().expect("failed to create a temporary directory");
    fs::create_dir(temp_dir.path().join("2020-01-01")).unwrap();
    let (logger, stdout, stderr) = logger();
    logger.start(LogLevel::INFO);

    logger.log_directory_cleanup(temp_dir.path(), 5);

    assert!(names(temp_dir.path()).is_empty());
    assert!(stdout.contents().is_empty());
    assert!(stderr.contents().is_empty());
}
