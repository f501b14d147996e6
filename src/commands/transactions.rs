// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::aggregate::{filter_and_sort, transactions_in_month};
use crate::commands::Context;
use crate::format::{day_label, format_money, signed_money, time_label};
use crate::forms::TransactionForm;
use crate::gateway::TransactionQuery;
use crate::models::{TransactionKind, TransactionRecord};
use crate::session::TokenStore;
use crate::utils::{maybe_print_json, month_end, parse_id, parse_month, pretty_table, required_arg};
use anyhow::{Context as _, Result, anyhow};
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, TimeZone, Utc};
use tracing::info;

pub fn handle<S: TokenStore>(ctx: &Context<S>, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(ctx, sub)?,
        Some(("edit", sub)) => edit(ctx, sub)?,
        Some(("show", sub)) => show(ctx, sub)?,
        Some(("rm", sub)) => remove(ctx, sub)?,
        Some(("list", sub)) => list(ctx, sub)?,
        _ => {}
    }
    Ok(())
}

/// RFC 3339, or `YYYY-MM-DD HH:MM` / `YYYY-MM-DD` read in the display offset.
pub fn parse_instant(s: &str, tz: &FixedOffset) -> Result<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    let local = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M")
        .or_else(|_| {
            NaiveDate::parse_from_str(s, "%Y-%m-%d").map(|d| d.and_time(chrono::NaiveTime::MIN))
        })
        .with_context(|| {
            format!("Invalid time '{}', expected RFC 3339 or YYYY-MM-DD HH:MM", s)
        })?;
    tz.from_local_datetime(&local)
        .single()
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or_else(|| anyhow!("Ambiguous local time '{}'", s))
}

fn form_from_args(sub: &clap::ArgMatches, tz: &FixedOffset) -> Result<TransactionForm> {
    Ok(TransactionForm {
        kind: sub
            .get_one::<String>("type")
            .map(|s| TransactionKind::parse(s))
            .transpose()?,
        amount: sub.get_one::<String>("amount").cloned(),
        category_id: sub.get_one::<i64>("category").copied(),
        wallet_id: sub.get_one::<i64>("wallet").copied(),
        description: sub.get_one::<String>("note").cloned(),
        occurred_at: sub
            .get_one::<String>("at")
            .map(|s| parse_instant(s, tz))
            .transpose()?,
    })
}

fn add<S: TokenStore>(ctx: &Context<S>, sub: &clap::ArgMatches) -> Result<()> {
    let form = form_from_args(sub, &ctx.tz)?;
    let wallets = if form.wallet_id.is_none() {
        ctx.gateway.fetch_wallets()?
    } else {
        Vec::new()
    };
    let draft = form.into_new_draft(&wallets, Utc::now())?;
    ctx.gateway.create_transaction(&draft)?;
    info!(wallet = draft.wallet_id, kind = %draft.kind, "transaction created");
    println!(
        "Saved {} {} on {} (wallet #{})",
        draft.kind,
        format_money(draft.amount),
        day_label(&draft.occurred_at, &ctx.tz),
        draft.wallet_id
    );
    Ok(())
}

fn edit<S: TokenStore>(ctx: &Context<S>, sub: &clap::ArgMatches) -> Result<()> {
    let id = parse_id(required_arg(sub, "id")?)?;
    let original = ctx
        .gateway
        .fetch_transaction(id)
        .with_context(|| format!("Failed to load transaction {} for editing", id))?;
    let draft = form_from_args(sub, &ctx.tz)?.into_edit_draft(&original)?;
    ctx.gateway.update_transaction(id, &draft)?;
    info!(id, "transaction updated");
    println!("Updated transaction {}", id);
    Ok(())
}

fn show<S: TokenStore>(ctx: &Context<S>, sub: &clap::ArgMatches) -> Result<()> {
    let id = parse_id(required_arg(sub, "id")?)?;
    let rec = ctx.gateway.fetch_transaction(id)?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &rec)? {
        let rows = vec![
            vec!["ID".into(), rec.id.to_string()],
            vec!["Type".into(), rec.kind.to_string()],
            vec!["Amount".into(), signed_money(rec.kind, rec.amount)],
            vec!["Category".into(), rec.category_name.clone()],
            vec!["Description".into(), rec.description.clone().unwrap_or_default()],
            vec!["Wallet".into(), wallet_cell(&rec)],
            vec![
                "When".into(),
                format!(
                    "{} {}",
                    day_label(&rec.occurred_at, &ctx.tz),
                    time_label(&rec.occurred_at, &ctx.tz)
                ),
            ],
        ];
        println!("{}", pretty_table(&["Field", "Value"], rows));
    }
    Ok(())
}

fn remove<S: TokenStore>(ctx: &Context<S>, sub: &clap::ArgMatches) -> Result<()> {
    let id = parse_id(required_arg(sub, "id")?)?;
    if !sub.get_flag("yes") {
        return Err(anyhow!(
            "Deleting transaction {} cannot be undone; pass --yes to confirm",
            id
        ));
    }
    ctx.gateway.delete_transaction(id)?;
    info!(id, "transaction deleted");
    println!("Deleted transaction {}", id);
    Ok(())
}

fn list<S: TokenStore>(ctx: &Context<S>, sub: &clap::ArgMatches) -> Result<()> {
    let month = sub
        .get_one::<String>("month")
        .map(|s| parse_month(s))
        .transpose()?;
    let query = match month {
        Some(m) => TransactionQuery::between(
            m.pred_opt().unwrap_or(m),
            month_end(m).succ_opt().unwrap_or(month_end(m)),
        ),
        None => TransactionQuery::default(),
    };
    let records = ctx.gateway.fetch_transactions(&query)?;
    let data = select_rows(
        &records,
        month,
        sub.get_one::<i64>("wallet").copied(),
        sub.get_one::<usize>("limit").copied(),
        &ctx.tz,
    );
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let rows = data
            .iter()
            .map(|r| {
                vec![
                    r.id.to_string(),
                    day_label(&r.occurred_at, &ctx.tz),
                    time_label(&r.occurred_at, &ctx.tz),
                    r.kind.to_string(),
                    r.category_name.clone(),
                    r.description.clone().unwrap_or_default(),
                    wallet_cell(r),
                    signed_money(r.kind, r.amount),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["ID", "Date", "Time", "Type", "Category", "Description", "Wallet", "Amount"],
                rows,
            )
        );
    }
    Ok(())
}

fn wallet_cell(r: &TransactionRecord) -> String {
    r.wallet_name
        .clone()
        .unwrap_or_else(|| format!("#{}", r.wallet_id))
}

/// Month window, wallet filter, newest first, then the limit.
pub fn select_rows(
    records: &[TransactionRecord],
    month: Option<NaiveDate>,
    wallet: Option<i64>,
    limit: Option<usize>,
    tz: &FixedOffset,
) -> Vec<TransactionRecord> {
    let windowed;
    let source = match month {
        Some(m) => {
            windowed = transactions_in_month(records, m, tz);
            &windowed[..]
        }
        None => records,
    };
    let mut rows = filter_and_sort(source, wallet);
    if let Some(n) = limit {
        rows.truncate(n);
    }
    rows
}
