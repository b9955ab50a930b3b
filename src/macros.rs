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

/// Write a Debug line through a [`Logger`](crate::Logger).
///
/// # Examples
///
/// ```
/// use dailylog::Logger;
///
/// let logger = Logger::builder().build();
/// dailylog::debug!(logger, "main", "loaded {} entries", 3);
/// ```
#[macro_export]
macro_rules! debug {
    ($logger:expr, $label:expr, $($arg:tt)+) => {
        $logger.debug($label, ::std::format_args!($($arg)+))
    };
}

/// Write an Info line through a [`Logger`](crate::Logger).
#[macro_export]
macro_rules! info {
    ($logger:expr, $label:expr, $($arg:tt)+) => {
        $logger.info($label, ::std::format_args!($($arg)+))
    };
}

/// Write a Warning line through a [`Logger`](crate::Logger).
#[macro_export]
macro_rules! warning {
    ($logger:expr, $label:expr, $($arg:tt)+) => {
        $logger.warning($label, ::std::format_args!($($arg)+))
    };
}

/// Write an Error line through a [`Logger`](crate::Logger).
///
/// An error value can be appended after a colon with the `err = ...;` form.
///
/// # Examples
///
/// ```
/// use dailylog::Logger;
///
/// let logger = Logger::builder().build();
/// let err = std::io::Error::other("disk full");
/// dailylog::error!(logger, "Save", "saving failed");
/// dailylog::error!(logger, "Save", err = err; "saving {} failed", "a.txt");
/// ```
#[macro_export]
macro_rules! error {
    ($logger:expr, $label:expr, err = $err:expr; $($arg:tt)+) => {
        $logger.error_with($label, $err, ::std::format_args!($($arg)+))
    };
    ($logger:expr, $label:expr, $($arg:tt)+) => {
        $logger.error($label, ::std::format_args!($($arg)+))
    };
}
