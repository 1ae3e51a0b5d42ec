// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::path::Path;
use std::str::FromStr;

use anyhow::{Context, Result, anyhow};
use maud::html;
use serde_json::json;

use crate::models::SeriesEntry;

pub const DEFAULT_CURRENCY_SYMBOL: &str = "₹";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Html,
    Json,
}

impl FromStr for ExportFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "html" | "pdf" => Ok(ExportFormat::Html),
            "json" => Ok(ExportFormat::Json),
            other => Err(anyhow!("Unknown format: {} (use csv|html|json)", other)),
        }
    }
}

/// Amounts print in shortest round-trip form: `125`, `12.5`.
pub fn format_amount(v: f64) -> String {
    format!("{}", v)
}

/// `Type,Amount` header followed by one `label,value` row per entry, joined
/// with `\n` and without a trailing newline. Labels that contain the
/// delimiter, quotes or line breaks are quoted.
pub fn to_csv(series: &[SeriesEntry]) -> Result<String> {
    let mut wtr = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());
    wtr.write_record(["Type", "Amount"])?;
    for entry in series {
        wtr.write_record([entry.label.as_str(), format_amount(entry.value).as_str()])?;
    }
    let bytes = wtr
        .into_inner()
        .map_err(|e| anyhow!("Failed to finish CSV: {}", e))?;
    let mut out = String::from_utf8(bytes).context("CSV output was not UTF-8")?;
    if out.ends_with('\n') {
        out.pop();
    }
    Ok(out)
}

/// HTML fragment handed to a PDF renderer.
pub fn to_html(series: &[SeriesEntry], total: f64, currency_symbol: &str) -> String {
    html! {
        h1 { "Expense Summary" }
        ul {
            @for entry in series {
                li { (entry.label) ": " (currency_symbol) (format_amount(entry.value)) }
            }
        }
        strong { "Total: " (currency_symbol) (format_amount(total)) }
    }
    .into_string()
}

pub fn to_json(series: &[SeriesEntry], total: f64) -> Result<String> {
    Ok(serde_json::to_string_pretty(&json!({
        "series": series,
        "total": total,
    }))?)
}

pub fn encode(
    format: ExportFormat,
    series: &[SeriesEntry],
    total: f64,
    currency_symbol: &str,
) -> Result<String> {
    match format {
        ExportFormat::Csv => to_csv(series),
        ExportFormat::Html => Ok(to_html(series, total, currency_symbol)),
        ExportFormat::Json => to_json(series, total),
    }
}

/// Encode and write to `out`. Nothing is written if encoding fails.
pub fn write_export(
    out: &Path,
    format: ExportFormat,
    series: &[SeriesEntry],
    total: f64,
    currency_symbol: &str,
) -> Result<()> {
    let blob = encode(format, series, total, currency_symbol)?;
    std::fs::write(out, blob).with_context(|| format!("Write export to {}", out.display()))?;
    tracing::info!(path = %out.display(), entries = series.len(), "export written");
    Ok(())
}
