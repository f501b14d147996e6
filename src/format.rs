// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::TransactionKind;
use chrono::{DateTime, FixedOffset, NaiveDate, Utc};

const CURRENCY_PREFIX: &str = "Rp";
const GROUP_SEPARATOR: char = '.';

/// `50000` -> `"Rp 50.000"`, `-30000` -> `"-Rp 30.000"`.
pub fn format_money(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(GROUP_SEPARATOR);
        }
        grouped.push(ch);
    }
    let sign = if amount < 0 { "-" } else { "" };
    format!("{}{} {}", sign, CURRENCY_PREFIX, grouped)
}

pub fn signed_money(kind: TransactionKind, amount: i64) -> String {
    let sign = if kind == TransactionKind::Income { '+' } else { '-' };
    format!("{}{}", sign, format_money(amount))
}

/// `"Nov 20, 2025"`. Equal labels mean the same calendar day.
pub fn day_label(at: &DateTime<Utc>, tz: &FixedOffset) -> String {
    at.with_timezone(tz).format("%b %-d, %Y").to_string()
}

pub fn time_label(at: &DateTime<Utc>, tz: &FixedOffset) -> String {
    at.with_timezone(tz).format("%I:%M %p").to_string()
}

pub fn calendar_day(at: &DateTime<Utc>, tz: &FixedOffset) -> NaiveDate {
    at.with_timezone(tz).date_naive()
}

pub fn date_heading(day: NaiveDate) -> String {
    day.format("%b %d, %Y").to_string()
}
