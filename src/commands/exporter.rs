// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::path::PathBuf;

use anyhow::Result;

use crate::export::{ExportFormat, write_export};
use crate::session::AppContext;

pub fn handle(ctx: &AppContext, m: &clap::ArgMatches) -> Result<()> {
    let out = export_summary(ctx, m)?;
    println!("Exported summary to {}", out.display());
    Ok(())
}

/// Encode the current summary and write it to `--out`. The format is checked
/// before anything is read or written.
pub fn export_summary(ctx: &AppContext, sub: &clap::ArgMatches) -> Result<PathBuf> {
    let fmt: ExportFormat = sub.get_one::<String>("format").unwrap().parse()?;
    let out = PathBuf::from(sub.get_one::<String>("out").unwrap());

    let report = crate::commands::reports::summary(ctx, sub)?;
    write_export(
        &out,
        fmt,
        &report.series,
        report.total_amount,
        &ctx.config.currency_symbol,
    )?;
    Ok(out)
}
