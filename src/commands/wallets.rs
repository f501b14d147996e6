// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::commands::Context;
use crate::format::format_money;
use crate::forms::WalletForm;
use crate::models::WalletKind;
use crate::session::TokenStore;
use crate::utils::{maybe_print_json, pretty_table, required_arg};
use anyhow::Result;
use tracing::info;

pub fn handle<S: TokenStore>(ctx: &Context<S>, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let draft = WalletForm {
                name: required_arg(sub, "name")?.to_string(),
                kind: WalletKind::parse(
                    sub.get_one::<String>("type").map_or("cash", String::as_str),
                )?,
                balance: sub.get_one::<String>("balance").cloned(),
            }
            .into_draft()?;
            ctx.gateway.create_wallet(&draft)?;
            info!(name = %draft.name, "wallet created");
            println!(
                "Wallet '{}' ({}) created with {}",
                draft.name,
                draft.kind,
                format_money(draft.balance)
            );
        }
        Some(("list", sub)) => {
            let wallets = ctx.gateway.fetch_wallets()?;
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &wallets)? {
                let rows = wallets
                    .iter()
                    .map(|w| {
                        vec![
                            w.id.to_string(),
                            w.name.clone(),
                            w.kind.to_string(),
                            format_money(w.opening_balance),
                        ]
                    })
                    .collect();
                println!(
                    "{}",
                    pretty_table(&["ID", "Name", "Type", "Opening balance"], rows)
                );
            }
        }
        _ => {}
    }
    Ok(())
}
