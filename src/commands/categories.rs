// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::commands::Context;
use crate::models::TransactionKind;
use crate::session::TokenStore;
use crate::utils::{maybe_print_json, pretty_table};
use anyhow::Result;

pub fn handle<S: TokenStore>(ctx: &Context<S>, m: &clap::ArgMatches) -> Result<()> {
    if let Some(("list", sub)) = m.subcommand() {
        let kind = TransactionKind::parse(
            sub.get_one::<String>("type").map_or("expense", String::as_str),
        )?;
        let categories = ctx.gateway.fetch_categories(kind)?;
        if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &categories)? {
            let rows = categories
                .iter()
                .map(|c| vec![c.id.to_string(), c.name.clone()])
                .collect();
            println!("{}", pretty_table(&["ID", "Category"], rows));
        }
    }
    Ok(())
}
