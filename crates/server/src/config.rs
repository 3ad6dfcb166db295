// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Service configuration.
//!
//! Values come from an optional TOML file and are then overridden by the
//! environment:
//! - `INTAKE_ADMIN_USER` / `admin_user`: admin login name (required)
//! - `INTAKE_ADMIN_PASS` / `admin_pass`: admin password (required)
//! - `INTAKE_SECRET_KEY` / `secret_key`: session signing secret
//! - `INTAKE_DEBUG` / `debug`: verbose logging and error details

use serde::Deserialize;
use std::fmt;
use std::fs;
use std::path::Path;

use crate::error::{Error, Result};

pub const ENV_ADMIN_USER: &str = "INTAKE_ADMIN_USER";
pub const ENV_ADMIN_PASS: &str = "INTAKE_ADMIN_PASS";
pub const ENV_SECRET_KEY: &str = "INTAKE_SECRET_KEY";
pub const ENV_DEBUG: &str = "INTAKE_DEBUG";

/// Signing secret used when none is configured. Development only.
pub const DEV_SECRET_KEY: &str = "dev-secret-change-me";

/// On-disk configuration file. Every key is optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub admin_user: Option<String>,
    pub admin_pass: Option<String>,
    pub secret_key: Option<String>,
    pub debug: Option<bool>,
}

impl ConfigFile {
    /// Read a TOML config file.
    pub fn read(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|source| Error::InvalidConfig {
            path: path.display().to_string(),
            source,
        })
    }
}

/// Resolved service configuration.
#[derive(Clone)]
pub struct Config {
    pub admin_user: String,
    pub admin_pass: String,
    pub secret_key: String,
    pub debug: bool,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("admin_user", &self.admin_user)
            .field("admin_pass", &"<redacted>")
            .field("secret_key", &"<redacted>")
            .field("debug", &self.debug)
            .finish()
    }
}

impl Config {
    /// Load from the optional file, then the process environment.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let file = match path {
            Some(path) => ConfigFile::read(path)?,
            None => ConfigFile::default(),
        };
        Self::resolve(file, |key| std::env::var(key).ok())
    }

    /// Merge file values with environment overrides supplied by `env`.
    pub fn resolve(file: ConfigFile, env: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let admin_user = env(ENV_ADMIN_USER)
            .or(file.admin_user)
            .filter(|v| !v.is_empty())
            .ok_or(Error::MissingConfig(ENV_ADMIN_USER))?;
        let admin_pass = env(ENV_ADMIN_PASS)
            .or(file.admin_pass)
            .filter(|v| !v.is_empty())
            .ok_or(Error::MissingConfig(ENV_ADMIN_PASS))?;

        let secret_key = match env(ENV_SECRET_KEY).or(file.secret_key) {
            Some(key) if !key.is_empty() => key,
            _ => {
                tracing::warn!("{ENV_SECRET_KEY} not set, using the development secret");
                DEV_SECRET_KEY.to_string()
            }
        };

        let debug = match env(ENV_DEBUG) {
            Some(value) => parse_flag(&value),
            None => file.debug.unwrap_or(false),
        };

        Ok(Config {
            admin_user,
            admin_pass,
            secret_key,
            debug,
        })
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
