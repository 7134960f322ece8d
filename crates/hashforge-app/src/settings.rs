// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Configuration resolution: file (if any), then command-line overrides.

use std::path::Path;

use hashforge_core::HashForgeConfig;
use hashforge_core::error::Result;
use tracing::info;

use crate::cli::Cli;

/// Config file picked up from the working directory when `--config` is not
/// given.
pub const DEFAULT_CONFIG_FILE: &str = "hashforge.json";

/// Build the effective configuration for this session.
pub fn resolve(cli: &Cli) -> Result<HashForgeConfig> {
    let mut config = match &cli.config {
        Some(path) => HashForgeConfig::load(path)?,
        None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
            HashForgeConfig::load(DEFAULT_CONFIG_FILE)?
        }
        None => HashForgeConfig::default(),
    };

    if let Some(db) = &cli.database {
        config.database_path = db.clone();
    }
    config.validate()?;

    info!(database = %config.database_path.display(), "configuration resolved");
    Ok(config)
}
