// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::aggregate::{filter_and_sort, signed_amount};
use crate::commands::Context;
use crate::format::{day_label, time_label};
use crate::gateway::TransactionQuery;
use crate::models::TransactionRecord;
use crate::session::TokenStore;
use crate::utils::required_arg;
use anyhow::{Result, anyhow};
use chrono::{FixedOffset, SecondsFormat};
use std::path::Path;

pub fn handle<S: TokenStore>(ctx: &Context<S>, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("transactions", sub)) => {
            let fmt = required_arg(sub, "format")?.to_lowercase();
            let out = required_arg(sub, "out")?;
            check_format(&fmt)?;
            let records = ctx.gateway.fetch_transactions(&TransactionQuery::default())?;
            let n = write_transactions(&records, &fmt, Path::new(out), &ctx.tz)?;
            println!("Exported {} transactions to {}", n, out);
            Ok(())
        }
        _ => Ok(()),
    }
}

fn check_format(fmt: &str) -> Result<()> {
    match fmt {
        "csv" | "json" => Ok(()),
        other => Err(anyhow!("Unknown format: {} (use csv|json)", other)),
    }
}

/// Writes `records` newest first and returns how many were written.
pub fn write_transactions(
    records: &[TransactionRecord],
    fmt: &str,
    out: &Path,
    tz: &FixedOffset,
) -> Result<usize> {
    check_format(fmt)?;
    let rows = filter_and_sort(records, None);
    match fmt {
        "csv" => {
            let mut wtr = csv::Writer::from_path(out)?;
            wtr.write_record([
                "id",
                "date",
                "day",
                "time",
                "type",
                "amount",
                "signed_amount",
                "category",
                "description",
                "wallet_id",
                "wallet",
            ])?;
            for r in &rows {
                wtr.write_record([
                    r.id.to_string(),
                    r.occurred_at.to_rfc3339_opts(SecondsFormat::Secs, true),
                    day_label(&r.occurred_at, tz),
                    time_label(&r.occurred_at, tz),
                    r.kind.to_string(),
                    r.amount.to_string(),
                    signed_amount(r).to_string(),
                    r.category_name.clone(),
                    r.description.clone().unwrap_or_default(),
                    r.wallet_id.to_string(),
                    r.wallet_name.clone().unwrap_or_default(),
                ])?;
            }
            wtr.flush()?;
        }
        _ => {
            std::fs::write(out, serde_json::to_string_pretty(&rows)?)?;
        }
    }
    Ok(rows.len())
}
