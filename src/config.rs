// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use std::path::PathBuf;

pub const DEFAULT_PORT: u16 = 3000;
pub const DB_ENV: &str = "FINTRACK_DB";
pub const PORT_ENV: &str = "FINTRACK_PORT";

/// Runtime settings. Command-line flags win over the environment, which wins
/// over the built-in defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub db_path: PathBuf,
    pub port: u16,
}

impl Config {
    pub fn resolve(db_flag: Option<&str>, port_flag: Option<u16>) -> Result<Self> {
        Self::resolve_with(db_flag, port_flag, |key| std::env::var(key).ok())
    }

    pub fn resolve_with<F>(db_flag: Option<&str>, port_flag: Option<u16>, env: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let db_path = match db_flag
            .map(str::to_string)
            .or_else(|| env(DB_ENV))
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
        {
            Some(p) => PathBuf::from(p),
            None => crate::db::db_path()?,
        };

        let port = match port_flag {
            Some(p) => p,
            None => match env(PORT_ENV) {
                Some(raw) => raw
                    .trim()
                    .parse::<u16>()
                    .with_context(|| format!("Invalid {} '{}'", PORT_ENV, raw))?,
                None => DEFAULT_PORT,
            },
        };

        Ok(Config { db_path, port })
    }
}
