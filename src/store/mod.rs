// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

mod memory;
mod sqlite;
mod subscription;

pub use memory::MemoryStore;
pub use sqlite::{SqliteStore, poll_changes};
pub use subscription::{SnapshotEvent, Subscribers, Subscription};

use crate::errors::{ExpenseError, Result};
use crate::filter::is_owned_by;
use crate::models::RawExpense;

/// Document store holding expense records. Documents come back with their
/// store-assigned `id` field set. Reads are not scoped to a user; callers
/// must do that themselves.
pub trait ExpenseStore {
    fn fetch_all(&self) -> Result<Vec<RawExpense>>;

    fn get(&self, id: &str) -> Result<Option<RawExpense>>;

    /// Store a new document and return its id.
    fn add(&self, doc: RawExpense) -> Result<String>;

    /// Replace the whole document stored under `id`.
    fn update(&self, id: &str, doc: RawExpense) -> Result<()>;

    fn delete(&self, id: &str) -> Result<()>;

    /// Live view of the whole collection: the current snapshot immediately,
    /// then a fresh full snapshot after every change.
    fn subscribe(&self) -> Subscription;
}

/// Fetch a document only if `uid` owns it. Foreign documents look missing.
pub fn get_owned(store: &dyn ExpenseStore, id: &str, uid: &str) -> Result<RawExpense> {
    match store.get(id)? {
        Some(doc) if is_owned_by(&doc, uid) => Ok(doc),
        _ => Err(ExpenseError::NotFound(id.to_string())),
    }
}

pub(crate) fn with_id(mut doc: RawExpense, id: &str) -> RawExpense {
    doc.insert("id".into(), id.into());
    doc
}
