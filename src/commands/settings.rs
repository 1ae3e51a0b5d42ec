// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use crate::config::Config;
use crate::session::AppContext;

pub fn handle(ctx: &AppContext, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("path", _)) => println!("{}", Config::config_path()?.display()),
        Some(("show", _)) => print!("{}", ctx.config.to_toml()?),
        _ => {}
    }
    Ok(())
}
