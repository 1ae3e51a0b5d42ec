// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use myexpenses::commands::exporter;
use myexpenses::config::Config;
use myexpenses::export::{ExportFormat, to_csv, to_html};
use myexpenses::models::{NewExpense, SeriesEntry};
use myexpenses::session::{AppContext, Session};
use myexpenses::store::{ExpenseStore, SqliteStore};
use myexpenses::cli;
use serde_json::json;
use tempfile::tempdir;

fn entry(label: &str, value: f64, color_index: usize) -> SeriesEntry {
    SeriesEntry {
        label: label.to_string(),
        value,
        color_index,
    }
}

fn ctx_with_expenses() -> AppContext {
    let store = SqliteStore::in_memory().unwrap();
    for (amount, ty, subtype, date) in [
        (100.0, "cash", None, "2025-01-05T10:00:00.000Z"),
        (50.0, "upi", Some("metro"), "2025-01-05T12:00:00.000Z"),
        (25.0, "cash", None, "2025-02-01T08:00:00.000Z"),
    ] {
        let e = NewExpense {
            amount,
            r#type: ty.to_string(),
            subtype: subtype.map(str::to_string),
            description: String::new(),
            date: date.to_string(),
        };
        store.add(e.to_document("u1")).unwrap();
    }
    AppContext {
        store,
        session: Session::signed_in("u1"),
        config: Config::default(),
    }
}

#[test]
fn csv_matches_expected_text_exactly() {
    assert_eq!(to_csv(&[entry("cash", 125.0, 0)]).unwrap(), "Type,Amount\ncash,125");
    assert_eq!(
        to_csv(&[entry("cash", 125.0, 0), entry("upi", 12.5, 1)]).unwrap(),
        "Type,Amount\ncash,125\nupi,12.5"
    );
    assert_eq!(to_csv(&[]).unwrap(), "Type,Amount");
}

#[test]
fn csv_quotes_labels_with_delimiters() {
    let out = to_csv(&[entry("food, drinks", 10.0, 0)]).unwrap();
    assert_eq!(out, "Type,Amount\n\"food, drinks\",10");
}

#[test]
fn html_lists_entries_and_total() {
    let html = to_html(&[entry("cash", 125.0, 0), entry("upi", 50.0, 1)], 175.0, "₹");
    assert!(html.starts_with("<h1>Expense Summary</h1>"));
    assert!(html.contains("<li>cash: ₹125</li>"));
    assert!(html.contains("<li>upi: ₹50</li>"));
    assert!(html.ends_with("<strong>Total: ₹175</strong>"));

    let escaped = to_html(&[entry("<b>", 1.0, 0)], 1.0, "$");
    assert!(escaped.contains("<li>&lt;b&gt;: $1</li>"));

    let symbol = to_html(&[entry("Tea & snacks", 2.0, 0)], 2.0, "Rs&");
    assert!(symbol.contains("<li>Tea &amp; snacks: Rs&amp;2</li>"));
    assert!(symbol.ends_with("<strong>Total: Rs&amp;2</strong>"));
}

#[test]
fn format_names_parse() {
    assert_eq!("CSV".parse::<ExportFormat>().unwrap(), ExportFormat::Csv);
    assert_eq!("pdf".parse::<ExportFormat>().unwrap(), ExportFormat::Html);
    assert!("xml".parse::<ExportFormat>().is_err());
}

#[test]
fn export_writes_csv_from_the_cli() {
    let ctx = ctx_with_expenses();
    let dir = tempdir().unwrap();
    let out_path = dir.path().join("expenses.csv");
    let out_str = out_path.to_string_lossy().to_string();

    let matches = cli::build_cli().get_matches_from([
        "myexpenses",
        "export",
        "--format",
        "csv",
        "--group-by",
        "type",
        "--out",
        &out_str,
    ]);
    if let Some(("export", export_m)) = matches.subcommand() {
        exporter::export_summary(&ctx, export_m).unwrap();
    } else {
        panic!("no export subcommand");
    }

    let contents = std::fs::read_to_string(&out_path).unwrap();
    assert_eq!(contents, "Type,Amount\ncash,125\nupi,50");
}

#[test]
fn export_summary_as_pretty_json() {
    let ctx = ctx_with_expenses();
    let dir = tempdir().unwrap();
    let out_path = dir.path().join("summary.json");
    let out_str = out_path.to_string_lossy().to_string();

    let matches = cli::build_cli().get_matches_from([
        "myexpenses",
        "export",
        "--format",
        "json",
        "--year",
        "2025",
        "--out",
        &out_str,
    ]);
    if let Some(("export", export_m)) = matches.subcommand() {
        exporter::export_summary(&ctx, export_m).unwrap();
    } else {
        panic!("no export subcommand");
    }

    let contents = std::fs::read_to_string(&out_path).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&contents).unwrap();
    assert_eq!(
        parsed,
        json!({
            "series": [
                {"label": "cash", "value": 125.0, "color_index": 0},
                {"label": "upi → metro", "value": 50.0, "color_index": 1}
            ],
            "total": 175.0
        })
    );
}

#[test]
fn export_rejects_unknown_format() {
    let ctx = ctx_with_expenses();
    let dir = tempdir().unwrap();
    let out_path = dir.path().join("export.unknown");
    let out_str = out_path.to_string_lossy().to_string();

    let matches = cli::build_cli().get_matches_from([
        "myexpenses",
        "export",
        "--format",
        "xml",
        "--out",
        &out_str,
    ]);
    if let Some(("export", export_m)) = matches.subcommand() {
        assert!(exporter::export_summary(&ctx, export_m).is_err());
    } else {
        panic!("no export subcommand");
    }
    assert!(!out_path.exists());
}
