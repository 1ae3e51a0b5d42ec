// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::db::APP;
use crate::export::DEFAULT_CURRENCY_SYMBOL;
use crate::models::{GroupBy, SeriesOrder};
use crate::series::{DEFAULT_PALETTE, Palette};

pub const CONFIG_ENV: &str = "MYEXPENSES_CONFIG";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub currency_symbol: String,
    pub palette: Vec<String>,
    /// Offered as suggestions; other types are still accepted.
    pub payment_types: Vec<String>,
    pub group_by: GroupBy,
    pub order: SeriesOrder,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            currency_symbol: DEFAULT_CURRENCY_SYMBOL.to_string(),
            palette: DEFAULT_PALETTE.iter().map(|c| c.to_string()).collect(),
            payment_types: vec!["cash".into(), "upi".into(), "creditcard".into()],
            group_by: GroupBy::default(),
            order: SeriesOrder::default(),
        }
    }
}

impl Config {
    pub fn config_path() -> Result<PathBuf> {
        if let Ok(p) = std::env::var(CONFIG_ENV) {
            if !p.trim().is_empty() {
                return Ok(PathBuf::from(p));
            }
        }
        let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
            .context("Could not determine platform-specific config dir")?;
        Ok(proj.config_dir().join("config.toml"))
    }

    /// Read `path`, or fall back to defaults when it does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Config::default());
        }
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Read config at {}", path.display()))?;
        let cfg: Config = toml::from_str(&raw)
            .with_context(|| format!("Invalid config at {}", path.display()))?;
        Ok(cfg)
    }

    pub fn palette(&self) -> Palette {
        if self.palette.is_empty() {
            return Palette::default();
        }
        Palette::new(self.palette.clone())
    }

    pub fn default_payment_type(&self) -> &str {
        self.payment_types.first().map(String::as_str).unwrap_or("cash")
    }

    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "currency_symbol = \"$\"\ngroup_by = \"description\"\n").unwrap();
        let cfg = Config::load_or_default(&path).unwrap();
        assert_eq!(cfg.currency_symbol, "$");
        assert_eq!(cfg.group_by, GroupBy::Description);
        assert_eq!(cfg.palette().len(), 6);
        assert_eq!(cfg.default_payment_type(), "cash");
    }

    #[test]
    fn missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = Config::load_or_default(&dir.path().join("nope.toml")).unwrap();
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn empty_palette_falls_back() {
        let cfg = Config {
            palette: vec![],
            ..Config::default()
        };
        assert_eq!(cfg.palette(), Palette::default());
    }
}
