// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rusqlite::{Connection, OptionalExtension, params};

use crate::config::Config;
use crate::errors::{ExpenseError, Result};
use crate::store::SqliteStore;

/// The signed-in identity, passed explicitly to everything that reads or
/// writes expenses.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    uid: Option<String>,
}

impl Session {
    pub fn anonymous() -> Self {
        Session { uid: None }
    }

    pub fn signed_in(uid: impl Into<String>) -> Self {
        Session {
            uid: Some(uid.into()),
        }
    }

    pub fn uid(&self) -> Option<&str> {
        self.uid.as_deref()
    }

    pub fn require_uid(&self) -> Result<&str> {
        self.uid().ok_or(ExpenseError::NoActiveUser)
    }

    /// Restore the persisted session, if any.
    pub fn load(conn: &Connection) -> Result<Self> {
        let uid: Option<String> = conn
            .query_row(
                "SELECT value FROM settings WHERE key='session_uid'",
                [],
                |r| r.get(0),
            )
            .optional()?;
        Ok(Session { uid })
    }

    pub fn save(&self, conn: &Connection) -> Result<()> {
        match &self.uid {
            Some(uid) => {
                conn.execute(
                    "INSERT INTO settings(key, value) VALUES('session_uid', ?1)
                     ON CONFLICT(key) DO UPDATE SET value=excluded.value",
                    params![uid],
                )?;
            }
            None => {
                conn.execute("DELETE FROM settings WHERE key='session_uid'", [])?;
            }
        }
        Ok(())
    }
}

/// Everything a command needs: the store, who is asking, and settings.
pub struct AppContext {
    pub store: SqliteStore,
    pub session: Session,
    pub config: Config,
}

impl AppContext {
    pub fn new(store: SqliteStore, config: Config) -> Result<Self> {
        let session = Session::load(store.connection())?;
        Ok(AppContext {
            store,
            session,
            config,
        })
    }
}
