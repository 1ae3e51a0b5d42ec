// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::errors::Result;
use crate::pipeline::{Report, ReportOptions, build_report};
use crate::session::Session;
use crate::store::SnapshotEvent;

/// Report kept current from a stream of snapshot events.
///
/// Each good snapshot replaces the report with a fresh recomputation; a
/// failed one leaves the last good report in place.
pub struct LiveView {
    session: Session,
    opts: ReportOptions,
    current: Report,
    applied: usize,
}

impl LiveView {
    pub fn new(session: Session, opts: ReportOptions) -> Self {
        LiveView {
            session,
            opts,
            current: Report::default(),
            applied: 0,
        }
    }

    pub fn apply(&mut self, event: SnapshotEvent) -> Result<&Report> {
        match event {
            Ok(raw) => {
                self.current = build_report(&raw, &self.session, &self.opts);
                self.applied += 1;
                Ok(&self.current)
            }
            Err(err) => {
                tracing::warn!(error = %err, "snapshot failed, keeping previous report");
                Err(err)
            }
        }
    }

    pub fn current(&self) -> &Report {
        &self.current
    }

    /// Number of snapshots successfully applied.
    pub fn applied(&self) -> usize {
        self.applied
    }
}
