// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Result, anyhow};

use crate::models::{Expense, NewExpense};
use crate::normalize::normalize;
use crate::pipeline::{Report, ReportOptions, load_report};
use crate::session::AppContext;
use crate::store::{ExpenseStore, get_owned};
use crate::utils::{
    filter_from_matches, fmt_money, maybe_print_json, now_iso, parse_amount, parse_expense_date,
    pretty_table,
};

pub fn handle(ctx: &AppContext, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let id = add(ctx, sub)?;
            println!("Expense saved ({})", id);
        }
        Some(("edit", sub)) => {
            let id = edit(ctx, sub)?;
            println!("Expense {} updated", id);
        }
        Some(("rm", sub)) => {
            let id = remove(ctx, sub)?;
            println!("Expense {} deleted", id);
        }
        Some(("list", sub)) => list(ctx, sub)?,
        Some(("types", _)) => {
            let rows = ctx
                .config
                .payment_types
                .iter()
                .map(|t| vec![t.clone()])
                .collect();
            println!("{}", pretty_table(&["Payment Type"], rows));
        }
        _ => {}
    }
    Ok(())
}

fn trimmed(sub: &clap::ArgMatches, id: &str) -> Option<String> {
    sub.get_one::<String>(id).map(|s| s.trim().to_string())
}

/// Build the full record from the form flags. Flags left out fall back to
/// `existing` (edit) or to defaults (add).
pub fn expense_from_matches(
    ctx: &AppContext,
    sub: &clap::ArgMatches,
    existing: Option<&Expense>,
) -> Result<NewExpense> {
    let amount = match sub.get_one::<String>("amount") {
        Some(a) => parse_amount(a)?,
        None => existing
            .map(|e| e.amount)
            .ok_or_else(|| anyhow!("Amount is required"))?,
    };

    let r#type = trimmed(sub, "type")
        .filter(|s| !s.is_empty())
        .or_else(|| existing.map(|e| e.r#type.clone()))
        .unwrap_or_else(|| ctx.config.default_payment_type().to_string());
    if !ctx.config.payment_types.iter().any(|t| t == &r#type) {
        tracing::info!(payment_type = %r#type, "payment type is not one of the configured types");
    }

    // an explicit empty --subtype clears it
    let subtype = match trimmed(sub, "subtype") {
        Some(s) => Some(s).filter(|s| !s.is_empty()),
        None => existing.and_then(|e| e.subtype.clone()),
    };
    let description = trimmed(sub, "description")
        .or_else(|| existing.map(|e| e.description.clone()))
        .unwrap_or_default();
    let date = match sub.get_one::<String>("date") {
        Some(d) => parse_expense_date(d)?,
        None => existing.map(|e| e.date.clone()).unwrap_or_else(now_iso),
    };

    Ok(NewExpense {
        amount,
        r#type,
        subtype,
        description,
        date,
    })
}

pub fn add(ctx: &AppContext, sub: &clap::ArgMatches) -> Result<String> {
    let uid = ctx.session.require_uid()?;
    let expense = expense_from_matches(ctx, sub, None)?;
    let id = ctx.store.add(expense.to_document(uid))?;
    tracing::info!(id = %id, amount = expense.amount, "expense added");
    Ok(id)
}

/// Overwrite the whole record. Only the owner may edit.
pub fn edit(ctx: &AppContext, sub: &clap::ArgMatches) -> Result<String> {
    let uid = ctx.session.require_uid()?;
    let id = sub.get_one::<String>("id").unwrap().trim().to_string();
    let current = get_owned(&ctx.store, &id, uid)?;
    // a stored record we can no longer read is still editable from scratch
    let existing = normalize(&current).ok();
    let expense = expense_from_matches(ctx, sub, existing.as_ref())?;
    ctx.store.update(&id, expense.to_document(uid))?;
    Ok(id)
}

pub fn remove(ctx: &AppContext, sub: &clap::ArgMatches) -> Result<String> {
    let uid = ctx.session.require_uid()?;
    let id = sub.get_one::<String>("id").unwrap().trim().to_string();
    get_owned(&ctx.store, &id, uid)?;
    ctx.store.delete(&id)?;
    Ok(id)
}

/// Report for the list view: the signed-in user's expenses grouped by day.
pub fn query_groups(ctx: &AppContext, sub: &clap::ArgMatches) -> Result<Report> {
    let opts = ReportOptions {
        filter: filter_from_matches(sub)?,
        ..ReportOptions::default()
    };
    Ok(load_report(&ctx.store, &ctx.session, &opts)?)
}

fn list(ctx: &AppContext, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    if ctx.session.uid().is_none() {
        eprintln!("Not signed in; run `myexpenses auth login --user <UID>`");
    }
    let report = query_groups(ctx, sub)?;
    if maybe_print_json(json_flag, jsonl_flag, &report.groups)? {
        return Ok(());
    }
    if report.groups.is_empty() {
        println!("No expenses yet.");
        return Ok(());
    }
    let sym = &ctx.config.currency_symbol;
    for group in &report.groups {
        println!("{}", group.date);
        let rows = group
            .expenses
            .iter()
            .map(|e| {
                let ty = match &e.subtype {
                    Some(sub) => format!("{} → {}", e.r#type, sub),
                    None => e.r#type.clone(),
                };
                vec![fmt_money(e.amount, sym), ty, e.description.clone(), e.id.clone()]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Amount", "Type", "Description", "ID"], rows)
        );
    }
    if !report.skipped.is_empty() {
        eprintln!("{} unreadable expense(s) skipped", report.skipped.len());
    }
    Ok(())
}
