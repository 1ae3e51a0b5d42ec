// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use myexpenses::commands::{auth, expenses, reports};
use myexpenses::config::Config;
use myexpenses::errors::ExpenseError;
use myexpenses::session::{AppContext, Session};
use myexpenses::store::{ExpenseStore, SqliteStore};
use myexpenses::cli;

fn setup(session: Session) -> AppContext {
    AppContext {
        store: SqliteStore::in_memory().unwrap(),
        session,
        config: Config::default(),
    }
}

fn run<T>(
    ctx: &AppContext,
    args: &[&str],
    f: impl Fn(&AppContext, &clap::ArgMatches) -> anyhow::Result<T>,
) -> anyhow::Result<T> {
    let mut argv = vec!["myexpenses", "expense"];
    argv.extend_from_slice(args);
    let matches = cli::build_cli().get_matches_from(argv);
    let Some(("expense", expense_m)) = matches.subcommand() else {
        panic!("no expense subcommand");
    };
    let Some((_, sub)) = expense_m.subcommand() else {
        panic!("no expense action");
    };
    f(ctx, sub)
}

#[test]
fn add_then_list_groups_by_day() {
    let ctx = setup(Session::signed_in("u1"));
    for (amount, ty, date) in [
        ("100", "cash", "2025-01-05"),
        ("50", "upi", "2025-01-05T18:00:00.000Z"),
        ("25", "cash", "2025-02-01"),
    ] {
        run(
            &ctx,
            &["add", "--amount", amount, "--type", ty, "--date", date],
            expenses::add,
        )
        .unwrap();
    }

    let report = run(&ctx, &["list"], expenses::query_groups).unwrap();
    let dates: Vec<&str> = report.groups.iter().map(|g| g.date.as_str()).collect();
    assert_eq!(dates, vec!["2025-02-01", "2025-01-05"]);
    assert_eq!(report.groups[1].expenses.len(), 2);

    let cash_only = run(&ctx, &["list", "--type", "cash"], expenses::query_groups).unwrap();
    assert_eq!(cash_only.record_count(), 2);
}

#[test]
fn add_defaults_type_and_stamps_now() {
    let ctx = setup(Session::signed_in("u1"));
    let id = run(
        &ctx,
        &["add", "--amount", " 12.5 ", "-d", " Chai "],
        expenses::add,
    )
    .unwrap();
    let doc = ctx.store.get(&id).unwrap().unwrap();
    assert_eq!(doc["type"], "cash");
    assert_eq!(doc["description"], "Chai");
    assert_eq!(doc["amount"], 12.5);
    let date = doc["date"].as_str().unwrap();
    assert_eq!(date.len(), 24);
    assert!(date.ends_with('Z'));
}

#[test]
fn add_rejects_bad_amounts_and_dates() {
    let ctx = setup(Session::signed_in("u1"));
    assert!(run(&ctx, &["add", "--amount", "abc"], expenses::add).is_err());
    assert!(run(&ctx, &["add", "--amount", "-5"], expenses::add).is_err());
    assert!(run(&ctx, &["add", "--amount", "5", "--date", "05/01/2025"], expenses::add).is_err());
    assert!(ctx.store.fetch_all().unwrap().is_empty());
}

#[test]
fn mutations_need_a_signed_in_user() {
    let ctx = setup(Session::anonymous());
    let err = run(&ctx, &["add", "--amount", "5"], expenses::add).unwrap_err();
    assert_eq!(
        err.downcast_ref::<ExpenseError>(),
        Some(&ExpenseError::NoActiveUser)
    );
    // reads degrade to empty instead of failing
    let report = run(&ctx, &["list"], expenses::query_groups).unwrap();
    assert!(report.groups.is_empty());
}

#[test]
fn edit_overwrites_whole_record_keeping_unset_fields() {
    let ctx = setup(Session::signed_in("u1"));
    let id = run(
        &ctx,
        &[
            "add", "--amount", "40", "--type", "upi", "--subtype", "metro", "-d", "Card top-up",
            "--date", "2025-03-01",
        ],
        expenses::add,
    )
    .unwrap();

    run(
        &ctx,
        &["edit", id.as_str(), "--amount", "45", "--subtype", ""],
        expenses::edit,
    )
    .unwrap();
    let doc = ctx.store.get(&id).unwrap().unwrap();
    assert_eq!(doc["amount"], 45.0);
    assert_eq!(doc["type"], "upi");
    assert!(doc.get("subtype").is_none());
    assert_eq!(doc["description"], "Card top-up");
    assert_eq!(doc["date"], "2025-03-01");
    assert_eq!(doc["userId"], "u1");
}

#[test]
fn edit_without_amount_keeps_the_stored_amount() {
    let ctx = setup(Session::signed_in("u1"));
    let id = run(
        &ctx,
        &[
            "add", "--amount", "72.5", "--type", "cash", "-d", "Groceries", "--date",
            "2025-04-02",
        ],
        expenses::add,
    )
    .unwrap();

    run(&ctx, &["edit", id.as_str(), "--type", "upi"], expenses::edit).unwrap();
    let doc = ctx.store.get(&id).unwrap().unwrap();
    assert_eq!(doc["type"], "upi");
    assert_eq!(doc["amount"], 72.5);
    assert_eq!(doc["description"], "Groceries");
    assert_eq!(doc["date"], "2025-04-02");

    // add still insists on an amount
    let missing =
        cli::build_cli().try_get_matches_from(["myexpenses", "expense", "add", "--type", "upi"]);
    assert!(missing.is_err());
}

#[test]
fn other_users_cannot_edit_or_delete() {
    let mut ctx = setup(Session::signed_in("owner"));
    let id = run(&ctx, &["add", "--amount", "9"], expenses::add).unwrap();

    ctx.session = Session::signed_in("someone-else");
    assert!(run(&ctx, &["edit", id.as_str(), "--amount", "1"], expenses::edit).is_err());
    assert!(run(&ctx, &["rm", id.as_str()], expenses::remove).is_err());
    assert_eq!(run(&ctx, &["list"], expenses::query_groups).unwrap().record_count(), 0);

    ctx.session = Session::signed_in("owner");
    run(&ctx, &["rm", id.as_str()], expenses::remove).unwrap();
    assert!(ctx.store.fetch_all().unwrap().is_empty());
}

#[test]
fn summary_uses_group_and_order_flags() {
    let ctx = setup(Session::signed_in("u1"));
    for (amount, ty, sub) in [("10", "cash", "food"), ("30", "upi", ""), ("5", "cash", "food")] {
        let mut args = vec!["add", "--amount", amount, "--type", ty, "--date", "2025-06-01"];
        if !sub.is_empty() {
            args.extend(["--subtype", sub]);
        }
        run(&ctx, &args, expenses::add).unwrap();
    }

    let matches = cli::build_cli().get_matches_from([
        "myexpenses", "report", "summary", "--group-by", "subtype", "--order", "value",
    ]);
    let Some(("report", report_m)) = matches.subcommand() else {
        panic!("no report subcommand");
    };
    let Some(("summary", summary_m)) = report_m.subcommand() else {
        panic!("no summary subcommand");
    };
    let report = reports::summary(&ctx, summary_m).unwrap();
    let labels: Vec<&str> = report.series.iter().map(|s| s.label.as_str()).collect();
    assert_eq!(labels, vec!["upi", "cash → food"]);
    assert_eq!(report.total_amount, 45.0);

    let rows = reports::summary_rows(&report, &ctx.config);
    assert_eq!(rows[0], vec!["upi", "₹30", "#f39c12"]);
}

#[test]
fn login_persists_across_contexts() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.sqlite");

    let mut ctx = AppContext::new(SqliteStore::open(&path).unwrap(), Config::default()).unwrap();
    assert_eq!(ctx.session.uid(), None);
    auth::login(&mut ctx, " u42 ").unwrap();
    drop(ctx);

    let mut ctx = AppContext::new(SqliteStore::open(&path).unwrap(), Config::default()).unwrap();
    assert_eq!(ctx.session.uid(), Some("u42"));
    auth::logout(&mut ctx).unwrap();
    drop(ctx);

    let ctx = AppContext::new(SqliteStore::open(&path).unwrap(), Config::default()).unwrap();
    assert_eq!(ctx.session.uid(), None);
    assert!(auth::login(&mut setup(Session::anonymous()), "   ").is_err());
}
