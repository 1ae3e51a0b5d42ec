// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use serde::Serialize;

use crate::aggregate::{group_by_date, sum_by_key};
use crate::errors::{ExpenseError, Result};
use crate::filter::{apply, is_owned_by};
use crate::models::{DateGroup, FilterSpec, GroupBy, RawExpense, SeriesEntry, SeriesOrder};
use crate::normalize::normalize;
use crate::series::to_series;
use crate::session::Session;
use crate::store::ExpenseStore;

#[derive(Debug, Clone, PartialEq)]
pub struct ReportOptions {
    pub filter: FilterSpec,
    pub group_by: GroupBy,
    pub order: SeriesOrder,
    pub palette_len: usize,
}

impl Default for ReportOptions {
    fn default() -> Self {
        ReportOptions {
            filter: FilterSpec::default(),
            group_by: GroupBy::default(),
            order: SeriesOrder::default(),
            palette_len: crate::series::DEFAULT_PALETTE.len(),
        }
    }
}

/// Everything the list and chart views show for one snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Report {
    pub groups: Vec<DateGroup>,
    pub series: Vec<SeriesEntry>,
    pub total_amount: f64,
    /// Owned records left out because they could not be normalized.
    #[serde(skip)]
    pub skipped: Vec<ExpenseError>,
}

impl Report {
    pub fn record_count(&self) -> usize {
        self.groups.iter().map(|g| g.expenses.len()).sum()
    }
}

/// Full transform over one snapshot. Pure: the same input always gives the
/// same report. Without a signed-in user nothing is read and the report is
/// empty.
pub fn build_report(raw: &[RawExpense], session: &Session, opts: &ReportOptions) -> Report {
    let Some(uid) = session.uid() else {
        tracing::warn!("{}", ExpenseError::NoActiveUser);
        return Report::default();
    };

    let mut owned = Vec::new();
    let mut skipped = Vec::new();
    for doc in raw.iter().filter(|d| is_owned_by(d, uid)) {
        match normalize(doc) {
            Ok(e) => owned.push(e),
            Err(err) => {
                tracing::warn!(error = %err, "skipping expense");
                skipped.push(err);
            }
        }
    }

    let filtered = apply(owned, &opts.filter);
    let totals = sum_by_key(&filtered, opts.group_by);
    Report {
        groups: group_by_date(&filtered),
        series: to_series(&totals, opts.order, opts.palette_len),
        total_amount: totals.total_amount,
        skipped,
    }
}

/// One-shot fetch followed by [`build_report`]. Only store failures are errors.
pub fn load_report(
    store: &dyn ExpenseStore,
    session: &Session,
    opts: &ReportOptions,
) -> Result<Report> {
    if session.uid().is_none() {
        return Ok(build_report(&[], session, opts));
    }
    let raw = store.fetch_all()?;
    Ok(build_report(&raw, session, opts))
}
