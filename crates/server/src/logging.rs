// Copyright (C) 2026 The Pillora Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Request logging middleware.

use axum::{extract::Request, middleware::Next, response::Response};
use std::time::Instant;
use tracing::{info, warn};

/// Logs method, path, status, and latency of every request.
pub async fn log_requests(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path: String = request.uri().path().to_string();
    let started: Instant = Instant::now();

    let response: Response = next.run(request).await;

    let status: u16 = response.status().as_u16();
    let latency_us: u64 = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
    if response.status().is_server_error() {
        warn!(method = %method, path = %path, status, latency_us, "Request failed");
    } else {
        info!(method = %method, path = %path, status, latency_us, "Request handled");
    }

    response
}
