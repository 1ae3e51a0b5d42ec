// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, mpsc};
use std::time::Duration;

use rusqlite::{Connection, OptionalExtension, params};
use serde_json::Value;

use crate::db;
use crate::errors::{ExpenseError, Result};
use crate::models::RawExpense;

use super::{ExpenseStore, SnapshotEvent, Subscribers, Subscription, with_id};

/// Expenses kept as JSON documents in SQLite, one row per document.
pub struct SqliteStore {
    conn: Connection,
    path: Option<PathBuf>,
    subscribers: Subscribers,
}

impl SqliteStore {
    pub fn open(path: &Path) -> anyhow::Result<Self> {
        let conn = db::open_at(path)?;
        Ok(SqliteStore {
            conn,
            path: Some(path.to_path_buf()),
            subscribers: Subscribers::new(),
        })
    }

    pub fn in_memory() -> anyhow::Result<Self> {
        let mut conn = Connection::open_in_memory()?;
        db::init_schema(&mut conn)?;
        Ok(Self::from_connection(conn))
    }

    /// Wrap a connection whose schema is already in place.
    pub fn from_connection(conn: Connection) -> Self {
        SqliteStore {
            conn,
            path: None,
            subscribers: Subscribers::new(),
        }
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    fn snapshot(&self) -> SnapshotEvent {
        read_all(&self.conn)
    }
}

fn read_all(conn: &Connection) -> Result<Vec<RawExpense>> {
    let mut stmt = conn.prepare("SELECT id, user_id, doc FROM expenses ORDER BY rowid")?;
    let rows = stmt.query_map([], |r| {
        Ok((
            r.get::<_, String>(0)?,
            r.get::<_, Option<String>>(1)?,
            r.get::<_, String>(2)?,
        ))
    })?;
    let mut docs = Vec::new();
    for row in rows {
        let (id, owner, body) = row?;
        docs.push(with_id(parse_doc(&id, owner.as_deref(), &body), &id));
    }
    Ok(docs)
}

/// An unreadable body keeps only its owner, so it stays visible to that
/// user's reports and is rejected by normalization there.
fn parse_doc(id: &str, owner: Option<&str>, body: &str) -> RawExpense {
    match serde_json::from_str::<RawExpense>(body) {
        Ok(doc) => doc,
        Err(err) => {
            tracing::warn!(id, error = %err, "stored document is not a JSON object");
            let mut doc = RawExpense::new();
            if let Some(owner) = owner {
                doc.insert("userId".to_string(), Value::from(owner));
            }
            doc
        }
    }
}

fn owner_of(doc: &RawExpense) -> Option<&str> {
    doc.get("userId").and_then(Value::as_str)
}

fn encode_doc(doc: &RawExpense) -> Result<String> {
    let mut doc = doc.clone();
    doc.remove("id");
    Ok(serde_json::to_string(&doc)?)
}

impl ExpenseStore for SqliteStore {
    fn fetch_all(&self) -> Result<Vec<RawExpense>> {
        self.snapshot()
    }

    fn get(&self, id: &str) -> Result<Option<RawExpense>> {
        let row: Option<(Option<String>, String)> = self
            .conn
            .query_row(
                "SELECT user_id, doc FROM expenses WHERE id=?1",
                params![id],
                |r| Ok((r.get(0)?, r.get(1)?)),
            )
            .optional()?;
        Ok(row.map(|(owner, body)| with_id(parse_doc(id, owner.as_deref(), &body), id)))
    }

    fn add(&self, doc: RawExpense) -> Result<String> {
        let id = uuid::Uuid::new_v4().to_string();
        self.conn.execute(
            "INSERT INTO expenses(id, user_id, doc) VALUES (?1, ?2, ?3)",
            params![id, owner_of(&doc), encode_doc(&doc)?],
        )?;
        tracing::debug!(id = %id, "expense stored");
        self.subscribers.publish(|| self.snapshot());
        Ok(id)
    }

    fn update(&self, id: &str, doc: RawExpense) -> Result<()> {
        let changed = self.conn.execute(
            "UPDATE expenses SET user_id=?2, doc=?3, updated_at=datetime('now') WHERE id=?1",
            params![id, owner_of(&doc), encode_doc(&doc)?],
        )?;
        if changed == 0 {
            return Err(ExpenseError::NotFound(id.to_string()));
        }
        self.subscribers.publish(|| self.snapshot());
        Ok(())
    }

    fn delete(&self, id: &str) -> Result<()> {
        let changed = self
            .conn
            .execute("DELETE FROM expenses WHERE id=?1", params![id])?;
        if changed == 0 {
            return Err(ExpenseError::NotFound(id.to_string()));
        }
        self.subscribers.publish(|| self.snapshot());
        Ok(())
    }

    fn subscribe(&self) -> Subscription {
        self.subscribers.subscribe(self.snapshot())
    }
}

/// Watch the database file for commits made by other connections and
/// deliver a full snapshot after each one, starting with the current state.
/// The background thread exits once the returned subscription is released.
pub fn poll_changes(path: &Path, interval: Duration) -> anyhow::Result<Subscription> {
    let conn = db::open_at(path)?;
    let (tx, rx) = mpsc::channel::<SnapshotEvent>();
    let released = Arc::new(AtomicBool::new(false));
    let stop = Arc::clone(&released);
    std::thread::Builder::new()
        .name("myexpenses-watch".into())
        .spawn(move || {
            let mut last_version: Option<i64> = None;
            let mut failing = false;
            while !stop.load(Ordering::SeqCst) {
                let event = match conn.query_row("PRAGMA data_version", [], |r| r.get::<_, i64>(0)) {
                    Ok(v) if last_version == Some(v) && !failing => None,
                    Ok(v) => {
                        last_version = Some(v);
                        match read_all(&conn) {
                            Err(_) if failing => None,
                            snapshot => {
                                failing = snapshot.is_err();
                                Some(snapshot)
                            }
                        }
                    }
                    // report a failure once, then stay quiet until it recovers
                    Err(_) if failing => None,
                    Err(err) => {
                        failing = true;
                        Some(Err(ExpenseError::from(err)))
                    }
                };
                if let Some(ev) = event {
                    if tx.send(ev).is_err() {
                        break;
                    }
                }
                std::thread::sleep(interval);
            }
            tracing::debug!("watcher stopped: subscription released");
        })?;
    Ok(Subscription::with_release_flag(rx, released))
}
