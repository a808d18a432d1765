// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::config::Config;
use crate::server::{run_http_server, AppState};
use anyhow::{Context, Result};
use rusqlite::Connection;

pub fn handle(conn: Connection, config: &Config) -> Result<()> {
    let port = config.port;
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Start async runtime")?;
    runtime
        .block_on(run_http_server(AppState::new(conn), port))
        .with_context(|| format!("HTTP server on port {}", port))
}
