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

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::http::StatusCode;
use axum::middleware;
use axum::routing::get;
use dailylog::LogLevel;
use dailylog::Logger;

#[tokio::main]
async fn main() {
    let logger = Arc::new(Logger::builder().build());
    logger.start(LogLevel::INFO);

    let app = Router::new()
        .route("/", get(|| async { "hello" }))
        .route("/teapot", get(|| async { StatusCode::IM_A_TEAPOT }))
        .layer(middleware::from_fn_with_state(
            logger.clone(),
            dailylog::http::access_log,
        ));

    let listener = match tokio::net::TcpListener::bind("127.0.0.1:3000").await {
        Ok(listener) => listener,
        Err(err) => {
            dailylog::error!(logger, "main", err = err; "failed to bind");
            return;
        }
    };
    dailylog::info!(logger, "main", "listening on http://127.0.0.1:3000");

    let service = app.into_make_service_with_connect_info::<SocketAddr>();
    if let Err(err) = axum::serve(listener, service).await {
        dailylog::error!(logger, "main", err = err; "server stopped");
    }
}
