// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::config::Config;
use crate::pipeline::{Report, load_report};
use crate::session::AppContext;
use crate::utils::{fmt_money, maybe_print_json, pretty_table, report_options_from_matches};
use anyhow::Result;

pub fn handle(ctx: &AppContext, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("summary", sub)) => print_summary_cmd(ctx, sub)?,
        _ => {}
    }
    Ok(())
}

/// Chart data for the signed-in user under the requested filters and grouping.
pub fn summary(ctx: &AppContext, sub: &clap::ArgMatches) -> Result<Report> {
    let opts = report_options_from_matches(sub, &ctx.config)?;
    Ok(load_report(&ctx.store, &ctx.session, &opts)?)
}

fn print_summary_cmd(ctx: &AppContext, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    if ctx.session.uid().is_none() {
        eprintln!("Not signed in; run `myexpenses auth login --user <UID>`");
    }
    let report = summary(ctx, sub)?;
    if jsonl_flag {
        maybe_print_json(false, true, &report.series)?;
        return Ok(());
    }
    if !maybe_print_json(json_flag, false, &report)? {
        print_summary(&report, &ctx.config);
    }
    Ok(())
}

pub fn summary_rows(report: &Report, cfg: &Config) -> Vec<Vec<String>> {
    let palette = cfg.palette();
    report
        .series
        .iter()
        .map(|s| {
            vec![
                s.label.clone(),
                fmt_money(s.value, &cfg.currency_symbol),
                palette.color(s.color_index).unwrap_or("").to_string(),
            ]
        })
        .collect()
}

pub fn print_summary(report: &Report, cfg: &Config) {
    if report.series.is_empty() {
        println!("No data available.");
    } else {
        println!(
            "{}",
            pretty_table(&["Group", "Amount", "Color"], summary_rows(report, cfg))
        );
    }
    println!(
        "Total Amount: {}{:.2}",
        cfg.currency_symbol, report.total_amount
    );
    if !report.skipped.is_empty() {
        eprintln!("{} unreadable expense(s) skipped", report.skipped.len());
    }
}
