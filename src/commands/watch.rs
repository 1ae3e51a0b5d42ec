// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::time::Duration;

use anyhow::{Context, Result};

use crate::commands::reports::print_summary;
use crate::live::LiveView;
use crate::session::AppContext;
use crate::store::poll_changes;
use crate::utils::report_options_from_matches;

pub fn handle(ctx: &AppContext, m: &clap::ArgMatches) -> Result<()> {
    if ctx.session.uid().is_none() {
        eprintln!("Not signed in; run `myexpenses auth login --user <UID>`");
        return Ok(());
    }
    let opts = report_options_from_matches(m, &ctx.config)?;
    let interval = Duration::from_secs(*m.get_one::<u64>("interval").unwrap_or(&2));
    let max_events = m.get_one::<usize>("max_events").copied();
    let path = ctx
        .store
        .path()
        .context("watch needs a database file, not an in-memory store")?;

    let mut subscription = poll_changes(path, interval)?;
    let mut view = LiveView::new(ctx.session.clone(), opts);
    let mut seen = 0usize;
    while let Some(event) = subscription.next() {
        seen += 1;
        match view.apply(event) {
            Ok(report) => {
                println!("--- snapshot {} ---", snapshot_label(seen));
                print_summary(report, &ctx.config);
            }
            // the last good summary stays on screen
            Err(err) => eprintln!("{}", err),
        }
        if max_events.is_some_and(|n| seen >= n) {
            break;
        }
    }
    subscription.unsubscribe();
    Ok(())
}

fn snapshot_label(n: usize) -> String {
    format!("#{} at {}", n, chrono::Local::now().format("%H:%M:%S"))
}
