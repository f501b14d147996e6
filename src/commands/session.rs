// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::commands::Context;
use crate::session::{Session, TokenStore};
use crate::utils::required_arg;
use anyhow::Result;

pub fn login<S: TokenStore>(ctx: &Context<S>, sub: &clap::ArgMatches) -> Result<()> {
    let username = required_arg(sub, "username")?;
    let password = required_arg(sub, "password")?;
    ctx.gateway.login(username, password)?;
    println!("Logged in as '{}' at {}", username, ctx.gateway.base_url());
    Ok(())
}

pub fn logout<S: TokenStore>(session: &Session<S>) -> Result<()> {
    session.end()?;
    println!("Logged out");
    Ok(())
}

pub fn status<S: TokenStore>(session: &Session<S>) -> Result<()> {
    if session.is_active()? {
        println!("Session stored; dashboard and other commands will use it");
    } else {
        println!("Not logged in; run `dompet login`");
    }
    Ok(())
}
