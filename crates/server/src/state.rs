// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Shared handler state.

use std::path::Path;
use std::sync::Arc;
use tokio::sync::Mutex;

use intake_core::db::DB_FILE_NAME;
use intake_core::Database;

use crate::config::Config;
use crate::error::Result;
use crate::session::SessionKey;

/// State handed to every request handler.
#[derive(Clone)]
pub struct AppState {
    /// The request store (one connection, serialized by the mutex).
    pub db: Arc<Mutex<Database>>,
    pub config: Arc<Config>,
    pub sessions: SessionKey,
}

impl AppState {
    pub fn new(db: Database, config: Config) -> Self {
        let sessions = SessionKey::new(&config.secret_key);
        AppState {
            db: Arc::new(Mutex::new(db)),
            config: Arc::new(config),
            sessions,
        }
    }

    /// Open `requests.db` in the data directory.
    pub fn open(data_dir: &Path, config: Config) -> Result<Self> {
        let db = Database::open(&data_dir.join(DB_FILE_NAME))?;
        Ok(Self::new(db, config))
    }
}
