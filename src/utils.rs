// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result, anyhow};
use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use comfy_table::{Cell, Table, presets::UTF8_FULL};

use crate::config::Config;
use crate::export::format_amount;
use crate::filter::{is_iso_day, parse_filter_spec};
use crate::models::{FilterSpec, GroupBy, SeriesOrder};
use crate::pipeline::ReportOptions;

/// Amounts typed by the user: finite and not negative.
pub fn parse_amount(s: &str) -> Result<f64> {
    let t = s.trim();
    let v: f64 = t
        .parse()
        .with_context(|| format!("Invalid amount '{}'", t))?;
    if !v.is_finite() {
        return Err(anyhow!("Invalid amount '{}'", t));
    }
    if v < 0.0 {
        return Err(anyhow!("Amount must not be negative, got {}", t));
    }
    Ok(v)
}

/// Accepts `YYYY-MM-DD` or a full RFC 3339 timestamp and returns it trimmed.
pub fn parse_expense_date(s: &str) -> Result<String> {
    let t = s.trim();
    let ok = if t.len() == 10 {
        NaiveDate::parse_from_str(t, "%Y-%m-%d").is_ok()
    } else {
        DateTime::parse_from_rfc3339(t).is_ok() && is_iso_day(t)
    };
    if !ok {
        return Err(anyhow!(
            "Invalid date '{}', expected YYYY-MM-DD or an RFC 3339 timestamp",
            t
        ));
    }
    Ok(t.to_string())
}

/// Current time the way stored expenses carry it, e.g. `2025-01-05T10:00:00.000Z`.
pub fn now_iso() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub fn fmt_money(v: f64, symbol: &str) -> String {
    format!("{}{}", symbol, format_amount(v))
}

pub fn filter_from_matches(sub: &clap::ArgMatches) -> Result<FilterSpec> {
    let get = |id: &str| sub.get_one::<String>(id).map(String::as_str);
    parse_filter_spec(get("type"), get("year"), get("from"), get("to"))
}

/// Filters plus grouping/ordering flags, with config supplying the defaults.
pub fn report_options_from_matches(sub: &clap::ArgMatches, cfg: &Config) -> Result<ReportOptions> {
    let group_by = match sub.get_one::<String>("group_by") {
        Some(s) => s.parse::<GroupBy>()?,
        None => cfg.group_by,
    };
    let order = match sub.get_one::<String>("order") {
        Some(s) => s.parse::<SeriesOrder>()?,
        None => cfg.order,
    };
    Ok(ReportOptions {
        filter: filter_from_matches(sub)?,
        group_by,
        order,
        palette_len: cfg.palette().len(),
    })
}

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

pub fn maybe_print_json<T: serde::Serialize>(
    json_flag: bool,
    jsonl_flag: bool,
    v: &T,
) -> Result<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(v)?);
        return Ok(true);
    }
    if jsonl_flag {
        // If v is an array, stream each element; else stream single line
        let val = serde_json::to_value(v)?;
        if let Some(arr) = val.as_array() {
            for item in arr {
                println!("{}", serde_json::to_string(item)?);
            }
        } else {
            println!("{}", serde_json::to_string(&val)?);
        }
        return Ok(true);
    }
    Ok(false)
}
