// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! In-memory document store, used by tests and embedders that bring their own persistence.

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::errors::{ExpenseError, Result};
use crate::models::RawExpense;

use super::{ExpenseStore, SnapshotEvent, Subscribers, Subscription, with_id};

#[derive(Default)]
pub struct MemoryStore {
    docs: Mutex<Vec<(String, RawExpense)>>,
    subscribers: Subscribers,
    offline: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed with documents as-is (malformed ones included). Documents
    /// without an `id` get a generated one.
    pub fn with_documents(docs: Vec<RawExpense>) -> Self {
        let store = Self::new();
        {
            let mut stored = store.lock();
            for doc in docs {
                let id = doc
                    .get("id")
                    .and_then(|v| v.as_str())
                    .map(str::to_string)
                    .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
                stored.push((id.clone(), with_id(doc, &id)));
            }
        }
        store
    }

    /// Simulate the backend being unreachable: reads fail and subscribers
    /// get an error event.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
        self.subscribers.publish(|| self.snapshot());
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    fn snapshot(&self) -> SnapshotEvent {
        self.check_online()?;
        Ok(self.lock().iter().map(|(_, d)| d.clone()).collect())
    }

    fn check_online(&self) -> Result<()> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(ExpenseError::UpstreamFetchFailure(
                "memory store is offline".to_string(),
            ));
        }
        Ok(())
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<(String, RawExpense)>> {
        self.docs.lock().unwrap_or_else(|p| p.into_inner())
    }
}

impl ExpenseStore for MemoryStore {
    fn fetch_all(&self) -> Result<Vec<RawExpense>> {
        self.snapshot()
    }

    fn get(&self, id: &str) -> Result<Option<RawExpense>> {
        self.check_online()?;
        Ok(self
            .lock()
            .iter()
            .find(|(k, _)| k == id)
            .map(|(_, d)| d.clone()))
    }

    fn add(&self, doc: RawExpense) -> Result<String> {
        self.check_online()?;
        let id = uuid::Uuid::new_v4().to_string();
        self.lock().push((id.clone(), with_id(doc, &id)));
        self.subscribers.publish(|| self.snapshot());
        Ok(id)
    }

    fn update(&self, id: &str, doc: RawExpense) -> Result<()> {
        self.check_online()?;
        {
            let mut docs = self.lock();
            let slot = docs
                .iter_mut()
                .find(|(k, _)| k == id)
                .ok_or_else(|| ExpenseError::NotFound(id.to_string()))?;
            slot.1 = with_id(doc, id);
        }
        self.subscribers.publish(|| self.snapshot());
        Ok(())
    }

    fn delete(&self, id: &str) -> Result<()> {
        self.check_online()?;
        {
            let mut docs = self.lock();
            let before = docs.len();
            docs.retain(|(k, _)| k != id);
            if docs.len() == before {
                return Err(ExpenseError::NotFound(id.to_string()));
            }
        }
        self.subscribers.publish(|| self.snapshot());
        Ok(())
    }

    fn subscribe(&self) -> Subscription {
        self.subscribers.subscribe(self.snapshot())
    }
}
