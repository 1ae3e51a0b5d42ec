// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Result, anyhow};
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::{Expense, FilterSpec, RawExpense, day_prefix};

static YEAR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{4}$").unwrap());
static DATE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").unwrap());

/// Whether a stored document belongs to `uid`. Documents without a `userId`
/// belong to nobody.
pub fn is_owned_by(raw: &RawExpense, uid: &str) -> bool {
    raw.get("userId").and_then(|v| v.as_str()) == Some(uid)
}

pub fn matches(e: &Expense, spec: &FilterSpec) -> bool {
    if let Some(t) = &spec.r#type {
        if &e.r#type != t {
            return false;
        }
    }
    if let Some(y) = &spec.year {
        if !e.date.starts_with(y.as_str()) {
            return false;
        }
    }
    let day = e.day();
    if let Some(start) = &spec.start_date {
        if day < start.as_str() {
            return false;
        }
    }
    if let Some(end) = &spec.end_date {
        if day > end.as_str() {
            return false;
        }
    }
    true
}

/// Subsequence of `records` matching every supplied predicate, order preserved.
pub fn apply(records: Vec<Expense>, spec: &FilterSpec) -> Vec<Expense> {
    records.into_iter().filter(|e| matches(e, spec)).collect()
}

/// Trim inputs, drop blanks, and check year/date shapes before they reach [`apply`].
pub fn parse_filter_spec(
    r#type: Option<&str>,
    year: Option<&str>,
    start_date: Option<&str>,
    end_date: Option<&str>,
) -> Result<FilterSpec> {
    let clean = |s: Option<&str>| {
        s.map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    };
    let spec = FilterSpec {
        r#type: clean(r#type),
        year: clean(year),
        start_date: clean(start_date),
        end_date: clean(end_date),
    };

    if let Some(y) = &spec.year {
        if !YEAR_RE.is_match(y) {
            return Err(anyhow!("Invalid year '{}', expected YYYY", y));
        }
    }
    for d in [&spec.start_date, &spec.end_date].into_iter().flatten() {
        if !DATE_RE.is_match(d) || NaiveDate::parse_from_str(d, "%Y-%m-%d").is_err() {
            return Err(anyhow!("Invalid date '{}', expected YYYY-MM-DD", d));
        }
    }
    if let (Some(s), Some(e)) = (&spec.start_date, &spec.end_date) {
        if s > e {
            return Err(anyhow!("Start date {} is after end date {}", s, e));
        }
    }
    Ok(spec)
}

/// Whether `date` (any ISO-8601 form) carries a usable YYYY-MM-DD prefix.
pub fn is_iso_day(date: &str) -> bool {
    let day = day_prefix(date);
    DATE_RE.is_match(day) && NaiveDate::parse_from_str(day, "%Y-%m-%d").is_ok()
}
