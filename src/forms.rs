// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Input checks for the transaction and wallet forms, done before anything
//! is sent to the API.

use crate::models::{
    TransactionDraft, TransactionKind, TransactionRecord, WalletDraft, WalletKind, WalletSummary,
};
use crate::utils::parse_amount;
use anyhow::{Result, anyhow};
use chrono::{DateTime, Utc};

pub const MISSING_TRANSACTION_FIELDS: &str =
    "Missing data: please enter Amount, select a Category, and select a Wallet.";
pub const MISSING_WALLET_NAME: &str = "Missing name: please enter a wallet name (e.g. BCA)";

#[derive(Debug, Clone, Default)]
pub struct TransactionForm {
    pub kind: Option<TransactionKind>,
    pub amount: Option<String>,
    pub category_id: Option<i64>,
    pub wallet_id: Option<i64>,
    pub description: Option<String>,
    pub occurred_at: Option<DateTime<Utc>>,
}

impl TransactionForm {
    /// New transaction. Without an explicit wallet the first listed wallet
    /// is used; the kind defaults to expense.
    pub fn into_new_draft(
        self,
        wallets: &[WalletSummary],
        now: DateTime<Utc>,
    ) -> Result<TransactionDraft> {
        let wallet_id = self.wallet_id.or_else(|| wallets.first().map(|w| w.id));
        finish(
            self.kind.unwrap_or(TransactionKind::Expense),
            self.amount.as_deref(),
            self.category_id,
            wallet_id,
            self.description.unwrap_or_default(),
            self.occurred_at.unwrap_or(now),
        )
    }

    /// Edit of an existing record. Unset fields keep their stored value,
    /// except the category: switching the kind drops it, because categories
    /// are per kind.
    pub fn into_edit_draft(self, original: &TransactionRecord) -> Result<TransactionDraft> {
        let kind = self.kind.unwrap_or(original.kind);
        let category_id = match self.category_id {
            Some(c) => Some(c),
            None if kind == original.kind => original.category_id,
            None => None,
        };
        let amount = self.amount.unwrap_or_else(|| original.amount.to_string());
        finish(
            kind,
            Some(&amount),
            category_id,
            Some(self.wallet_id.unwrap_or(original.wallet_id)),
            self.description
                .or_else(|| original.description.clone())
                .unwrap_or_default(),
            self.occurred_at.unwrap_or(original.occurred_at),
        )
    }
}

fn finish(
    kind: TransactionKind,
    amount: Option<&str>,
    category_id: Option<i64>,
    wallet_id: Option<i64>,
    description: String,
    occurred_at: DateTime<Utc>,
) -> Result<TransactionDraft> {
    let (Some(amount), Some(category_id), Some(wallet_id)) = (
        amount.filter(|a| !a.trim().is_empty()),
        category_id,
        wallet_id,
    ) else {
        return Err(anyhow!(MISSING_TRANSACTION_FIELDS));
    };
    Ok(TransactionDraft {
        amount: parse_amount(amount)?,
        kind,
        category_id,
        description,
        wallet_id,
        occurred_at,
    })
}

#[derive(Debug, Clone)]
pub struct WalletForm {
    pub name: String,
    pub kind: WalletKind,
    pub balance: Option<String>,
}

impl WalletForm {
    pub fn into_draft(self) -> Result<WalletDraft> {
        let name = self.name.trim().to_string();
        if name.is_empty() {
            return Err(anyhow!(MISSING_WALLET_NAME));
        }
        let balance = match self.balance.as_deref().map(str::trim) {
            Some(b) if !b.is_empty() => parse_amount(b)?,
            _ => 0,
        };
        Ok(WalletDraft {
            name,
            kind: self.kind,
            balance,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 11, 20, 10, 0, 0).unwrap()
    }

    fn wallets() -> Vec<WalletSummary> {
        vec![
            WalletSummary {
                id: 4,
                name: "BCA".into(),
                kind: WalletKind::Bank,
                opening_balance: 0,
            },
            WalletSummary {
                id: 5,
                name: "Cash".into(),
                kind: WalletKind::Cash,
                opening_balance: 0,
            },
        ]
    }

    fn original() -> TransactionRecord {
        TransactionRecord {
            id: 11,
            amount: 25_000,
            kind: TransactionKind::Expense,
            description: Some("Coffee".into()),
            occurred_at: now(),
            wallet_id: 5,
            wallet_name: None,
            category_id: Some(3),
            category_name: "Food".into(),
        }
    }

    #[test]
    fn new_draft_defaults_to_first_wallet_and_now() {
        let form = TransactionForm {
            amount: Some("15000".into()),
            category_id: Some(2),
            ..Default::default()
        };
        let draft = form.into_new_draft(&wallets(), now()).unwrap();
        assert_eq!(draft.wallet_id, 4);
        assert_eq!(draft.kind, TransactionKind::Expense);
        assert_eq!(draft.occurred_at, now());
        assert_eq!(draft.description, "");
    }

    #[test]
    fn new_draft_requires_amount_category_wallet() {
        let no_category = TransactionForm {
            amount: Some("1".into()),
            ..Default::default()
        };
        let err = no_category.into_new_draft(&wallets(), now()).unwrap_err();
        assert_eq!(err.to_string(), MISSING_TRANSACTION_FIELDS);

        let no_wallets = TransactionForm {
            amount: Some("1".into()),
            category_id: Some(1),
            ..Default::default()
        };
        assert!(no_wallets.into_new_draft(&[], now()).is_err());

        let blank_amount = TransactionForm {
            amount: Some("  ".into()),
            category_id: Some(1),
            ..Default::default()
        };
        assert!(blank_amount.into_new_draft(&wallets(), now()).is_err());
    }

    #[test]
    fn edit_keeps_unset_fields() {
        let form = TransactionForm {
            amount: Some("30000".into()),
            ..Default::default()
        };
        let draft = form.into_edit_draft(&original()).unwrap();
        assert_eq!(draft.amount, 30_000);
        assert_eq!(draft.category_id, 3);
        assert_eq!(draft.wallet_id, 5);
        assert_eq!(draft.description, "Coffee");
        assert_eq!(draft.occurred_at, now());
    }

    #[test]
    fn switching_kind_drops_category() {
        let form = TransactionForm {
            kind: Some(TransactionKind::Income),
            ..Default::default()
        };
        assert!(form.into_edit_draft(&original()).is_err());

        let form = TransactionForm {
            kind: Some(TransactionKind::Income),
            category_id: Some(8),
            ..Default::default()
        };
        let draft = form.into_edit_draft(&original()).unwrap();
        assert_eq!(draft.category_id, 8);
        assert_eq!(draft.kind, TransactionKind::Income);
    }

    #[test]
    fn wallet_form_checks_name_and_balance() {
        let ok = WalletForm {
            name: " OVO ".into(),
            kind: WalletKind::EWallet,
            balance: None,
        }
        .into_draft()
        .unwrap();
        assert_eq!(ok.name, "OVO");
        assert_eq!(ok.balance, 0);

        let err = WalletForm {
            name: "   ".into(),
            kind: WalletKind::Cash,
            balance: Some("100".into()),
        }
        .into_draft()
        .unwrap_err();
        assert_eq!(err.to_string(), MISSING_WALLET_NAME);

        assert!(WalletForm {
            name: "Cash".into(),
            kind: WalletKind::Cash,
            balance: Some("abc".into()),
        }
        .into_draft()
        .is_err());
    }
}
