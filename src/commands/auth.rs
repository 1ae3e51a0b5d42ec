// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Result, anyhow};

use crate::session::{AppContext, Session};

pub fn handle(ctx: &mut AppContext, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("login", sub)) => {
            let uid = sub.get_one::<String>("user").unwrap().trim();
            login(ctx, uid)?;
            println!("Signed in as {}", uid);
        }
        Some(("logout", _)) => {
            logout(ctx)?;
            println!("Signed out");
        }
        Some(("whoami", _)) => match ctx.session.uid() {
            Some(uid) => println!("{}", uid),
            None => println!("Not signed in"),
        },
        _ => {}
    }
    Ok(())
}

pub fn login(ctx: &mut AppContext, uid: &str) -> Result<()> {
    let uid = uid.trim();
    if uid.is_empty() {
        return Err(anyhow!("User id must not be empty"));
    }
    let session = Session::signed_in(uid);
    session.save(ctx.store.connection())?;
    ctx.session = session;
    tracing::info!(uid, "signed in");
    Ok(())
}

pub fn logout(ctx: &mut AppContext) -> Result<()> {
    let session = Session::anonymous();
    session.save(ctx.store.connection())?;
    ctx.session = session;
    Ok(())
}
