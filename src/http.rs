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

//! Access logging for [`axum`] services.
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//!
//! use axum::Router;
//! use axum::middleware;
//! use axum::routing::get;
//! use dailylog::LogLevel;
//! use dailylog::Logger;
//!
//! let logger = Arc::new(Logger::builder().build());
//! logger.start(LogLevel::INFO);
//!
//! let app: Router = Router::new()
//!     .route("/", get(|| async { "hello" }))
//!     .layer(middleware::from_fn_with_state(logger, dailylog::http::access_log));
//! ```

use std::fmt::Write;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use std::time::Instant;

use axum::extract::ConnectInfo;
use axum::extract::Request;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::http::Method;
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::Response;
use colored::Color;
use colored::Colorize;

use crate::CallSite;
use crate::Logger;
use crate::Severity;

/// Middleware writing one line per request through the shared [`Logger`].
///
/// The rest of the pipeline runs first; the response is returned unchanged. Client errors are
/// written as Warning lines, server errors as Error lines and everything else as Info lines.
pub async fn access_log(
    State(logger): State<Arc<Logger>>,
    request: Request,
    next: Next,
) -> Response {
    let start = Instant::now();
    let client = client_ip(&request);
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    let response = next.run(request).await;

    let record = AccessRecord {
        status: response.status(),
        latency: start.elapsed(),
        client,
        method,
        path,
    };
    logger.log(
        record.severity(),
        CallSite::caller(),
        "",
        format_args!("{}", record.render(logger.is_colored())),
    );

    response
}

/// The facts written for one request.
#[derive(Debug, Clone)]
pub struct AccessRecord {
    pub status: StatusCode,
    pub latency: Duration,
    pub client: String,
    pub method: Method,
    pub path: String,
}

impl AccessRecord {
    /// The severity the request is written with.
    pub fn severity(&self) -> Severity {
        if self.status.is_client_error() {
            Severity::Warning
        } else if self.status.as_u16() >= 500 {
            Severity::Error
        } else {
            Severity::Info
        }
    }

    /// Render the line body, for example `[HTTP] | 200 |   1.204ms | 10.0.0.1 | GET     | /`.
    pub fn render(&self, colored: bool) -> String {
        let status = format!(" {:>3} ", self.status.as_u16());
        let method = format!(" {:<7} ", self.method.as_str());

        let (status, method) = if colored {
            let status = status.color(status_color(self.status)).to_string();
            let method = match method_color(&self.method) {
                Some(color) => method.color(color).to_string(),
                None => method,
            };
            (status, method)
        } else {
            (status, method)
        };

        let mut line = String::new();
        // SAFETY: write to a string always succeeds
        write!(
            &mut line,
            "[HTTP] |{status}| {latency:>12?} | {client} |{method}| {path}",
            latency = self.latency,
            client = self.client,
            path = self.path,
        )
        .unwrap();
        line
    }
}

fn status_color(status: StatusCode) -> Color {
    match status.as_u16() {
        200..=299 => Color::Green,
        300..=399 => Color::White,
        400..=499 => Color::Yellow,
        _ => Color::Red,
    }
}

fn method_color(method: &Method) -> Option<Color> {
    match method.as_str() {
        "GET" => Some(Color::Blue),
        "POST" => Some(Color::Cyan),
        "PUT" => Some(Color::Yellow),
        "DELETE" => Some(Color::Red),
        "PATCH" => Some(Color::Green),
        "HEAD" => Some(Color::Magenta),
        "OPTIONS" => Some(Color::White),
        _ => None,
    }
}

/// The client address: the first `X-Forwarded-For` hop, then `X-Real-IP`, then the peer
/// address when the service was built with connect info, else `-`.
pub fn client_ip(request: &Request) -> String {
    forwarded_ip(request.headers())
        .or_else(|| {
            request
                .extensions()
                .get::<ConnectInfo<SocketAddr>>()
                .map(|ConnectInfo(addr)| addr.ip().to_string())
        })
        .unwrap_or_else(|| "-".to_string())
}

fn forwarded_ip(headers: &HeaderMap) -> Option<String> {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|value| !value.is_empty())
    };

    if let Some(forwarded) = header("x-forwarded-for") {
        if let Some(first) = forwarded.split(',').map(str::trim).find(|hop| !hop.is_empty()) {
            return Some(first.to_string());
        }
    }
    header("x-real-ip").map(str::to_string)
}
