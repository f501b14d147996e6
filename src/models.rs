// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Result, anyhow};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
    Transfer,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Income => "income",
            TransactionKind::Expense => "expense",
            TransactionKind::Transfer => "transfer",
        }
    }

    pub fn parse(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "income" => Ok(TransactionKind::Income),
            "expense" => Ok(TransactionKind::Expense),
            "transfer" => Ok(TransactionKind::Transfer),
            other => Err(anyhow!(
                "Invalid transaction type '{}', expected income|expense|transfer",
                other
            )),
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WalletKind {
    Cash,
    Bank,
    #[serde(rename = "ewallet")]
    EWallet,
}

impl WalletKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            WalletKind::Cash => "cash",
            WalletKind::Bank => "bank",
            WalletKind::EWallet => "ewallet",
        }
    }

    pub fn parse(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "cash" => Ok(WalletKind::Cash),
            "bank" => Ok(WalletKind::Bank),
            "ewallet" | "e-wallet" => Ok(WalletKind::EWallet),
            other => Err(anyhow!(
                "Invalid wallet type '{}', expected cash|bank|ewallet",
                other
            )),
        }
    }
}

impl fmt::Display for WalletKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A transaction as the API reports it. `amount` is never negative; the
/// sign comes from `kind`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "WireRecord")]
pub struct TransactionRecord {
    pub id: i64,
    pub amount: i64,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(rename = "date", with = "instant")]
    pub occurred_at: DateTime<Utc>,
    pub wallet_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wallet_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<i64>,
    pub category_name: String,
}

// Older endpoints send the category under `category`; some send both, and
// an uncategorized row carries `null`.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireRecord {
    id: i64,
    amount: i64,
    #[serde(rename = "type")]
    kind: TransactionKind,
    #[serde(default)]
    description: Option<String>,
    #[serde(with = "instant")]
    date: DateTime<Utc>,
    wallet_id: i64,
    #[serde(default)]
    wallet_name: Option<String>,
    #[serde(default)]
    category_id: Option<i64>,
    #[serde(default)]
    category_name: Option<String>,
    #[serde(default)]
    category: Option<String>,
}

impl From<WireRecord> for TransactionRecord {
    fn from(w: WireRecord) -> Self {
        Self {
            id: w.id,
            amount: w.amount,
            kind: w.kind,
            description: w.description,
            occurred_at: w.date,
            wallet_id: w.wallet_id,
            wallet_name: w.wallet_name,
            category_id: w.category_id,
            category_name: w.category_name.or(w.category).unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WalletSummary {
    pub id: i64,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: WalletKind,
    #[serde(rename = "balance", default)]
    pub opening_balance: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
}

/// Body for creating or replacing a transaction.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionDraft {
    pub amount: i64,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub category_id: i64,
    pub description: String,
    pub wallet_id: i64,
    #[serde(rename = "date")]
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WalletDraft {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: WalletKind,
    pub balance: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub token: Option<String>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct TotalBalance {
    pub balance: i64,
}

// Transaction timestamps arrive as epoch milliseconds from list endpoints
// and as RFC 3339 text from the single-record endpoint.
mod instant {
    use chrono::{DateTime, TimeZone, Utc};
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Wire {
        Millis(i64),
        Text(String),
    }

    pub fn serialize<S: Serializer>(at: &DateTime<Utc>, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_i64(at.timestamp_millis())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<DateTime<Utc>, D::Error> {
        match Wire::deserialize(d)? {
            Wire::Millis(ms) => Utc
                .timestamp_millis_opt(ms)
                .single()
                .ok_or_else(|| D::Error::custom(format!("timestamp {} out of range", ms))),
            Wire::Text(s) => DateTime::parse_from_rfc3339(&s)
                .map(|dt| dt.with_timezone(&Utc))
                .map_err(|e| D::Error::custom(format!("invalid date '{}': {}", s, e))),
        }
    }
}
