// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;

use crate::models::{DateGroup, Expense, GroupBy};

pub const UNKNOWN_BUCKET: &str = "Unknown";
pub const NO_DESCRIPTION_BUCKET: &str = "No Description";

/// Partition by `YYYY-MM-DD`, most recent day first. Records keep their
/// relative order inside a bucket; a blank date lands in [`UNKNOWN_BUCKET`].
pub fn group_by_date(records: &[Expense]) -> Vec<DateGroup> {
    let mut map: BTreeMap<String, Vec<Expense>> = BTreeMap::new();
    for e in records {
        map.entry(group_key(e, GroupBy::Date))
            .or_default()
            .push(e.clone());
    }
    map.into_iter()
        .rev()
        .map(|(date, expenses)| DateGroup { date, expenses })
        .collect()
}

pub fn group_key(e: &Expense, mode: GroupBy) -> String {
    let or_bucket = |s: &str, bucket: &str| {
        if s.trim().is_empty() {
            bucket.to_string()
        } else {
            s.to_string()
        }
    };
    match mode {
        GroupBy::Type => or_bucket(&e.r#type, UNKNOWN_BUCKET),
        GroupBy::Subtype => {
            let ty = or_bucket(&e.r#type, UNKNOWN_BUCKET);
            match &e.subtype {
                Some(sub) => format!("{} → {}", ty, sub),
                None => ty,
            }
        }
        GroupBy::Description => or_bucket(&e.description, NO_DESCRIPTION_BUCKET),
        GroupBy::Date => or_bucket(e.day(), UNKNOWN_BUCKET),
    }
}

/// Per-key sums in first-appearance order, plus the overall total.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Totals {
    entries: Vec<(String, f64)>,
    pub total_amount: f64,
}

impl Totals {
    pub fn entries(&self) -> &[(String, f64)] {
        &self.entries
    }

    pub fn get(&self, key: &str) -> Option<f64> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| *v)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

pub fn sum_by_key(records: &[Expense], mode: GroupBy) -> Totals {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut totals = Totals::default();
    for e in records {
        let key = group_key(e, mode);
        match index.get(&key) {
            Some(&i) => totals.entries[i].1 += e.amount,
            None => {
                index.insert(key.clone(), totals.entries.len());
                totals.entries.push((key, e.amount));
            }
        }
        totals.total_amount += e.amount;
    }
    totals
}
