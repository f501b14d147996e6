// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::commands::Context;
use crate::session::TokenStore;
use crate::utils::{maybe_print_json, pretty_table};
use crate::views::{DashboardView, dashboard_on_enter};
use anyhow::Result;

pub fn handle<S: TokenStore>(ctx: &Context<S>, sub: &clap::ArgMatches) -> Result<()> {
    let wallet = sub.get_one::<i64>("wallet").copied();
    let view = dashboard_on_enter(&ctx.gateway, wallet, &ctx.tz)?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &view)? {
        print!("{}", render(&view));
    }
    Ok(())
}

pub fn render(view: &DashboardView) -> String {
    let mut out = format!("{}: {}\n", view.balance_label, view.balance_display);

    let mut chips = vec![if view.selected_wallet.is_none() {
        "[All]".to_string()
    } else {
        "All".to_string()
    }];
    for w in &view.wallets {
        if view.selected_wallet == Some(w.id) {
            chips.push(format!("[{} #{}]", w.name, w.id));
        } else {
            chips.push(format!("{} #{}", w.name, w.id));
        }
    }
    out.push_str(&format!("Wallets: {}\n", chips.join("  ")));

    if view.sections.is_empty() {
        out.push_str("\nNo transactions yet.\n");
        return out;
    }
    for section in &view.sections {
        let rows = section
            .rows
            .iter()
            .map(|r| {
                vec![
                    r.id.to_string(),
                    r.time.clone(),
                    r.category.clone(),
                    r.description.clone(),
                    r.wallet.clone(),
                    r.amount.clone(),
                ]
            })
            .collect();
        out.push_str(&format!("\n{}\n", section.date));
        out.push_str(&format!(
            "{}\n",
            pretty_table(&["ID", "Time", "Category", "Description", "Wallet", "Amount"], rows)
        ));
    }
    out
}
