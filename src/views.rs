// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::aggregate::{
    CalendarMarkings, build_calendar_markings, compute_balance, filter_and_sort, group_by_date,
    transactions_in_month, transactions_on_day,
};
use crate::error::GatewayError;
use crate::format::{date_heading, format_money, signed_money, time_label};
use crate::gateway::{Gateway, TransactionQuery};
use crate::models::{TransactionKind, TransactionRecord, WalletSummary};
use crate::session::TokenStore;
use crate::utils::{month_end, month_start};
use chrono::{FixedOffset, NaiveDate};
use serde::Serialize;
use tracing::debug;

pub const ALL_WALLETS_LABEL: &str = "Total Balance";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransactionRow {
    pub id: i64,
    pub kind: TransactionKind,
    pub category: String,
    pub time: String,
    pub description: String,
    pub wallet: String,
    pub amount: String,
}

impl TransactionRow {
    fn new(
        r: &TransactionRecord,
        wallets: &[WalletSummary],
        tz: &FixedOffset,
        empty_note: &str,
    ) -> Self {
        let wallet = wallets
            .iter()
            .find(|w| w.id == r.wallet_id)
            .map(|w| w.name.clone())
            .or_else(|| r.wallet_name.clone())
            .unwrap_or_default();
        Self {
            id: r.id,
            kind: r.kind,
            category: r.category_name.clone(),
            time: time_label(&r.occurred_at, tz),
            description: r
                .description
                .clone()
                .filter(|d| !d.is_empty())
                .unwrap_or_else(|| empty_note.to_string()),
            wallet,
            amount: signed_money(r.kind, r.amount),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSection {
    pub date: String,
    pub rows: Vec<TransactionRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView {
    pub balance_label: String,
    pub balance: i64,
    pub balance_display: String,
    pub selected_wallet: Option<i64>,
    pub wallets: Vec<WalletSummary>,
    pub sections: Vec<DashboardSection>,
}

impl DashboardView {
    pub fn derive(
        records: &[TransactionRecord],
        wallets: &[WalletSummary],
        total: i64,
        wallet_filter: Option<i64>,
        tz: &FixedOffset,
    ) -> Self {
        let filtered = filter_and_sort(records, wallet_filter);
        let balance = compute_balance(&filtered, wallet_filter, total);
        let balance_label = match wallet_filter {
            None => ALL_WALLETS_LABEL.to_string(),
            Some(id) => wallets
                .iter()
                .find(|w| w.id == id)
                .map(|w| w.name.clone())
                .unwrap_or_else(|| format!("Wallet #{}", id)),
        };
        let sections = group_by_date(&filtered, tz)
            .into_iter()
            .map(|bucket| DashboardSection {
                rows: bucket
                    .transactions
                    .iter()
                    .map(|r| TransactionRow::new(r, wallets, tz, "No description"))
                    .collect(),
                date: bucket.label,
            })
            .collect();
        Self {
            balance_label,
            balance,
            balance_display: format_money(balance),
            selected_wallet: wallet_filter,
            wallets: wallets.to_vec(),
            sections,
        }
    }
}

pub fn dashboard_on_enter<S: TokenStore>(
    gateway: &Gateway<S>,
    wallet_filter: Option<i64>,
    tz: &FixedOffset,
) -> Result<DashboardView, GatewayError> {
    let total = gateway.fetch_total_balance()?;
    let records = gateway.fetch_transactions(&TransactionQuery::default())?;
    let wallets = gateway.fetch_wallets()?;
    debug!(
        records = records.len(),
        wallets = wallets.len(),
        "dashboard data loaded"
    );
    Ok(DashboardView::derive(&records, &wallets, total, wallet_filter, tz))
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarView {
    pub month: NaiveDate,
    pub selected: NaiveDate,
    pub heading: String,
    pub markings: CalendarMarkings,
    pub day_transactions: Vec<TransactionRow>,
}

impl CalendarView {
    // Selection defaults to the first of the month.
    pub fn derive(
        records: &[TransactionRecord],
        month: NaiveDate,
        selected: Option<NaiveDate>,
        tz: &FixedOffset,
    ) -> Self {
        let month = month_start(month);
        let selected = selected.unwrap_or(month);
        let month_records = transactions_in_month(records, month, tz);
        let markings = build_calendar_markings(&month_records, selected, tz);
        let day_transactions = transactions_on_day(&month_records, selected, tz)
            .iter()
            .map(|r| TransactionRow::new(r, &[], tz, "No note"))
            .collect();
        Self {
            month,
            selected,
            heading: format!("Transactions on {}", date_heading(selected)),
            markings,
            day_transactions,
        }
    }
}

pub fn calendar_on_enter<S: TokenStore>(
    gateway: &Gateway<S>,
    month: NaiveDate,
    selected: Option<NaiveDate>,
    tz: &FixedOffset,
) -> Result<CalendarView, GatewayError> {
    // The window is widened by a day on each side so records near midnight
    // in the display offset are not lost; the month filter trims them.
    let start = month_start(month).pred_opt().unwrap_or(month_start(month));
    let end = month_end(month).succ_opt().unwrap_or(month_end(month));
    let records = gateway.fetch_transactions(&TransactionQuery::between(start, end))?;
    debug!(records = records.len(), %month, "calendar data loaded");
    Ok(CalendarView::derive(&records, month, selected, tz))
}
