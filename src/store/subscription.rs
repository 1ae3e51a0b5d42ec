// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender, TryRecvError};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::errors::Result;
use crate::models::RawExpense;

/// One delivery from a live subscription: the full record set as of now, or
/// the reason it could not be read.
pub type SnapshotEvent = Result<Vec<RawExpense>>;

/// Receiving end of a live subscription. Iterating blocks until the next
/// snapshot and ends once unsubscribed or once the source goes away.
pub struct Subscription {
    rx: Option<Receiver<SnapshotEvent>>,
    released: Option<Arc<AtomicBool>>,
}

impl Subscription {
    pub(crate) fn new(rx: Receiver<SnapshotEvent>) -> Self {
        Subscription {
            rx: Some(rx),
            released: None,
        }
    }

    /// For producers that need to notice a release without sending first.
    pub(crate) fn with_release_flag(rx: Receiver<SnapshotEvent>, flag: Arc<AtomicBool>) -> Self {
        Subscription {
            rx: Some(rx),
            released: Some(flag),
        }
    }

    pub fn is_active(&self) -> bool {
        self.rx.is_some()
    }

    /// Non-blocking: the next pending snapshot, if one is queued.
    pub fn try_next(&mut self) -> Option<SnapshotEvent> {
        let rx = self.rx.as_ref()?;
        match rx.try_recv() {
            Ok(ev) => Some(ev),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                self.rx = None;
                None
            }
        }
    }

    pub fn next_timeout(&mut self, timeout: Duration) -> Option<SnapshotEvent> {
        let rx = self.rx.as_ref()?;
        match rx.recv_timeout(timeout) {
            Ok(ev) => Some(ev),
            Err(RecvTimeoutError::Timeout) => None,
            Err(RecvTimeoutError::Disconnected) => {
                self.rx = None;
                None
            }
        }
    }

    /// Stop receiving. Safe to call any number of times.
    pub fn unsubscribe(&mut self) {
        if let Some(flag) = &self.released {
            flag.store(true, Ordering::SeqCst);
        }
        if self.rx.take().is_some() {
            tracing::debug!("subscription released");
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}

impl Iterator for Subscription {
    type Item = SnapshotEvent;

    fn next(&mut self) -> Option<Self::Item> {
        let rx = self.rx.as_ref()?;
        match rx.recv() {
            Ok(ev) => Some(ev),
            Err(_) => {
                self.rx = None;
                None
            }
        }
    }
}

/// Sending side kept by a store. Released subscriptions are pruned on the
/// next publish.
#[derive(Default)]
pub struct Subscribers {
    senders: Mutex<Vec<Sender<SnapshotEvent>>>,
}

impl Subscribers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a subscriber and hand it `initial` straight away.
    pub fn subscribe(&self, initial: SnapshotEvent) -> Subscription {
        let (tx, rx) = mpsc::channel();
        // rx is alive here, so the send cannot fail
        let _ = tx.send(initial);
        self.lock().push(tx);
        Subscription::new(rx)
    }

    /// Push a fresh snapshot to every live subscriber. `snapshot` is only
    /// evaluated when someone is listening.
    pub fn publish(&self, snapshot: impl FnOnce() -> SnapshotEvent) {
        let mut senders = self.lock();
        if senders.is_empty() {
            return;
        }
        let ev = snapshot();
        senders.retain(|tx| tx.send(ev.clone()).is_ok());
        tracing::debug!(subscribers = senders.len(), "snapshot published");
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Sender<SnapshotEvent>>> {
        self.senders.lock().unwrap_or_else(|p| p.into_inner())
    }
}
