// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::format::{calendar_day, day_label};
use crate::models::{TransactionKind, TransactionRecord};
use chrono::{Datelike, FixedOffset, NaiveDate};
use serde::{Serialize, Serializer};
use std::collections::{BTreeMap, HashMap};

pub const SELECTED_COLOR: &str = "#FFC107";

// Stable: records sharing a timestamp keep their input order.
pub fn filter_and_sort(
    records: &[TransactionRecord],
    wallet_filter: Option<i64>,
) -> Vec<TransactionRecord> {
    let mut out: Vec<TransactionRecord> = records
        .iter()
        .filter(|r| wallet_filter.is_none_or(|w| r.wallet_id == w))
        .cloned()
        .collect();
    out.sort_by(|a, b| b.occurred_at.cmp(&a.occurred_at));
    out
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DateBucket {
    pub label: String,
    pub transactions: Vec<TransactionRecord>,
}

/// Buckets appear in the order their label is first seen; a repeated
/// label joins its existing bucket.
pub fn group_by_date(sorted: &[TransactionRecord], tz: &FixedOffset) -> Vec<DateBucket> {
    let mut buckets: Vec<DateBucket> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for record in sorted {
        let label = day_label(&record.occurred_at, tz);
        let slot = match index.get(&label) {
            Some(&i) => i,
            None => {
                index.insert(label.clone(), buckets.len());
                buckets.push(DateBucket {
                    label,
                    transactions: Vec::new(),
                });
                buckets.len() - 1
            }
        };
        buckets[slot].transactions.push(record.clone());
    }
    buckets
}

// Transfers have no counterpart wallet, so they count for nothing.
pub fn signed_amount(record: &TransactionRecord) -> i64 {
    match record.kind {
        TransactionKind::Income => record.amount,
        TransactionKind::Expense => -record.amount,
        TransactionKind::Transfer => 0,
    }
}

/// Without a wallet filter the server's total is returned untouched.
/// The per-wallet sum saturates instead of overflowing.
pub fn compute_balance(
    filtered: &[TransactionRecord],
    wallet_filter: Option<i64>,
    fallback_total: i64,
) -> i64 {
    match wallet_filter {
        None => fallback_total,
        Some(_) => filtered
            .iter()
            .map(signed_amount)
            .fold(0i64, i64::saturating_add),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DotColor {
    Income,
    Spending,
}

impl DotColor {
    pub fn for_kind(kind: TransactionKind) -> Self {
        match kind {
            TransactionKind::Income => DotColor::Income,
            _ => DotColor::Spending,
        }
    }

    pub fn hex(&self) -> &'static str {
        match self {
            DotColor::Income => "#4CAF50",
            DotColor::Spending => "#FF6347",
        }
    }
}

impl Serialize for DotColor {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(self.hex())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayMarking {
    pub dots: Vec<DotColor>,
    pub selected: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_color: Option<&'static str>,
}

impl DayMarking {
    fn add_dot(&mut self, color: DotColor) {
        if !self.dots.contains(&color) {
            self.dots.push(color);
        }
    }
}

pub type CalendarMarkings = BTreeMap<NaiveDate, DayMarking>;

/// The selected day always has an entry and keeps any dots it carries.
pub fn build_calendar_markings(
    month_records: &[TransactionRecord],
    selected: NaiveDate,
    tz: &FixedOffset,
) -> CalendarMarkings {
    let mut markings = CalendarMarkings::new();
    for record in month_records {
        markings
            .entry(calendar_day(&record.occurred_at, tz))
            .or_default()
            .add_dot(DotColor::for_kind(record.kind));
    }

    let day = markings.entry(selected).or_default();
    day.selected = true;
    day.selected_color = Some(SELECTED_COLOR);
    markings
}

pub fn transactions_in_month(
    records: &[TransactionRecord],
    month: NaiveDate,
    tz: &FixedOffset,
) -> Vec<TransactionRecord> {
    records
        .iter()
        .filter(|r| {
            let day = calendar_day(&r.occurred_at, tz);
            day.year() == month.year() && day.month() == month.month()
        })
        .cloned()
        .collect()
}

pub fn transactions_on_day(
    records: &[TransactionRecord],
    day: NaiveDate,
    tz: &FixedOffset,
) -> Vec<TransactionRecord> {
    let mut out: Vec<TransactionRecord> = records
        .iter()
        .filter(|r| calendar_day(&r.occurred_at, tz) == day)
        .cloned()
        .collect();
    out.sort_by(|a, b| b.occurred_at.cmp(&a.occurred_at));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn utc() -> FixedOffset {
        FixedOffset::east_opt(0).unwrap()
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn rec(
        id: i64,
        amount: i64,
        kind: TransactionKind,
        at: (u32, u32, u32),
        wallet: i64,
    ) -> TransactionRecord {
        let (m, d, h) = at;
        TransactionRecord {
            id,
            amount,
            kind,
            description: None,
            occurred_at: Utc.with_ymd_and_hms(2025, m, d, h, 0, 0).unwrap(),
            wallet_id: wallet,
            wallet_name: None,
            category_id: None,
            category_name: format!("cat{}", id),
        }
    }

    fn ids(records: &[TransactionRecord]) -> Vec<i64> {
        records.iter().map(|r| r.id).collect()
    }

    fn sample() -> Vec<TransactionRecord> {
        vec![
            rec(1, 50_000, TransactionKind::Income, (11, 18, 9), 1),
            rec(2, 20_000, TransactionKind::Expense, (11, 20, 12), 1),
            rec(3, 7_500, TransactionKind::Expense, (11, 20, 8), 2),
            rec(4, 10_000, TransactionKind::Transfer, (11, 19, 10), 1),
            rec(5, 3_000, TransactionKind::Income, (11, 20, 12), 2),
        ]
    }

    #[test]
    fn filter_and_sort_without_filter_keeps_everything_newest_first() {
        let input = sample();
        let out = filter_and_sort(&input, None);
        assert_eq!(ids(&out), vec![2, 5, 3, 4, 1]);
        assert!(out.windows(2).all(|w| w[0].occurred_at >= w[1].occurred_at));
        // input untouched
        assert_eq!(ids(&input), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn filter_and_sort_keeps_only_the_wallet() {
        let out = filter_and_sort(&sample(), Some(2));
        assert_eq!(ids(&out), vec![5, 3]);
        assert!(out.iter().all(|r| r.wallet_id == 2));
    }

    #[test]
    fn equal_timestamps_keep_input_order() {
        let mut input = sample();
        input.swap(1, 4);
        // 5 now precedes 2; both at Nov 20 12:00
        let out = filter_and_sort(&input, None);
        assert_eq!(ids(&out)[..2], [5, 2]);
    }

    #[test]
    fn unknown_wallet_gives_empty_view_and_zero_balance() {
        let out = filter_and_sort(&sample(), Some(99));
        assert!(out.is_empty());
        assert_eq!(compute_balance(&out, Some(99), 123_456), 0);
    }

    #[test]
    fn group_by_date_buckets_in_first_seen_order() {
        let sorted = filter_and_sort(&sample(), None);
        let groups = group_by_date(&sorted, &utc());
        let labels: Vec<&str> = groups.iter().map(|g| g.label.as_str()).collect();
        assert_eq!(labels, vec!["Nov 20, 2025", "Nov 19, 2025", "Nov 18, 2025"]);
        assert_eq!(ids(&groups[0].transactions), vec![2, 5, 3]);
    }

    #[test]
    fn group_by_date_merges_non_contiguous_runs_into_first_bucket() {
        let unsorted = vec![
            rec(1, 1, TransactionKind::Expense, (11, 20, 9), 1),
            rec(2, 1, TransactionKind::Expense, (11, 19, 9), 1),
            rec(3, 1, TransactionKind::Expense, (11, 20, 7), 1),
        ];
        let groups = group_by_date(&unsorted, &utc());
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].label, "Nov 20, 2025");
        assert_eq!(ids(&groups[0].transactions), vec![1, 3]);
        assert_eq!(ids(&groups[1].transactions), vec![2]);
    }

    #[test]
    fn group_by_date_is_idempotent_over_flattening() {
        let sorted = filter_and_sort(&sample(), None);
        let groups = group_by_date(&sorted, &utc());
        let flat: Vec<TransactionRecord> = groups
            .iter()
            .flat_map(|g| g.transactions.iter().cloned())
            .collect();
        assert_eq!(group_by_date(&flat, &utc()), groups);
    }

    #[test]
    fn group_by_date_of_nothing_is_empty() {
        assert!(group_by_date(&[], &utc()).is_empty());
    }

    #[test]
    fn balance_without_filter_is_the_fallback() {
        assert_eq!(compute_balance(&sample(), None, 777), 777);
        assert_eq!(compute_balance(&[], None, -5), -5);
    }

    #[test]
    fn balance_with_filter_ignores_transfers() {
        let filtered = filter_and_sort(&sample(), Some(1));
        // 50_000 - 20_000, transfer of 10_000 ignored
        assert_eq!(compute_balance(&filtered, Some(1), 0), 30_000);
    }

    #[test]
    fn balance_saturates_on_huge_amounts() {
        let records = vec![
            rec(1, i64::MAX, TransactionKind::Income, (1, 1, 8), 1),
            rec(2, i64::MAX, TransactionKind::Income, (1, 2, 8), 1),
        ];
        assert_eq!(compute_balance(&records, Some(1), 0), i64::MAX);

        let records = vec![
            rec(1, i64::MAX, TransactionKind::Expense, (1, 1, 8), 1),
            rec(2, i64::MAX, TransactionKind::Expense, (1, 2, 8), 1),
        ];
        assert_eq!(compute_balance(&records, Some(1), 0), i64::MIN);
    }

    #[test]
    fn worked_example_balance() {
        let records = vec![
            rec(1, 50_000, TransactionKind::Income, (1, 1, 8), 1),
            rec(2, 20_000, TransactionKind::Expense, (1, 2, 8), 1),
        ];
        let filtered = filter_and_sort(&records, Some(1));
        assert_eq!(compute_balance(&filtered, Some(1), 0), 30_000);
        assert_eq!(ids(&filtered), vec![2, 1]);
    }

    #[test]
    fn markings_dedupe_dots_by_color() {
        let records = vec![
            rec(1, 1, TransactionKind::Income, (11, 20, 8), 1),
            rec(2, 1, TransactionKind::Income, (11, 20, 9), 1),
            rec(3, 1, TransactionKind::Expense, (11, 20, 10), 1),
            rec(4, 1, TransactionKind::Transfer, (11, 20, 11), 1),
        ];
        let m = build_calendar_markings(&records, day(2025, 11, 1), &utc());
        let nov20 = &m[&day(2025, 11, 20)];
        assert_eq!(nov20.dots, vec![DotColor::Income, DotColor::Spending]);
        assert!(!nov20.selected);
        assert_eq!(nov20.selected_color, None);
    }

    #[test]
    fn selecting_a_marked_day_keeps_its_dots() {
        let records = vec![rec(1, 1, TransactionKind::Expense, (11, 20, 8), 1)];
        let m = build_calendar_markings(&records, day(2025, 11, 20), &utc());
        assert_eq!(m.len(), 1);
        let nov20 = &m[&day(2025, 11, 20)];
        assert_eq!(nov20.dots, vec![DotColor::Spending]);
        assert!(nov20.selected);
        assert_eq!(nov20.selected_color, Some(SELECTED_COLOR));
    }

    #[test]
    fn empty_month_still_marks_selection() {
        let m = build_calendar_markings(&[], day(2025, 1, 1), &utc());
        let mut expected = CalendarMarkings::new();
        expected.insert(
            day(2025, 1, 1),
            DayMarking {
                dots: vec![],
                selected: true,
                selected_color: Some(SELECTED_COLOR),
            },
        );
        assert_eq!(m, expected);
    }

    #[test]
    fn markings_serialize_like_multi_dot_calendar() {
        let records = vec![rec(1, 1, TransactionKind::Income, (1, 1, 8), 1)];
        let m = build_calendar_markings(&records, day(2025, 1, 1), &utc());
        let v = serde_json::to_value(&m).unwrap();
        assert_eq!(
            v,
            serde_json::json!({
                "2025-01-01": {"dots": ["#4CAF50"], "selected": true, "selectedColor": "#FFC107"}
            })
        );
    }

    #[test]
    fn month_and_day_windows() {
        let mut records = sample();
        records.push(rec(6, 1, TransactionKind::Expense, (10, 31, 23), 1));
        let nov = transactions_in_month(&records, day(2025, 11, 15), &utc());
        assert_eq!(ids(&nov), vec![1, 2, 3, 4, 5]);

        let on_20th = transactions_on_day(&nov, day(2025, 11, 20), &utc());
        assert_eq!(ids(&on_20th), vec![2, 5, 3]);
        assert!(transactions_on_day(&nov, day(2025, 11, 21), &utc()).is_empty());
    }

    #[test]
    fn month_window_respects_display_offset() {
        // Oct 31 23:00 UTC is Nov 1 in UTC+7.
        let records = vec![rec(6, 1, TransactionKind::Expense, (10, 31, 23), 1)];
        let wib = FixedOffset::east_opt(7 * 3600).unwrap();
        assert_eq!(transactions_in_month(&records, day(2025, 11, 1), &wib).len(), 1);
        assert!(transactions_in_month(&records, day(2025, 10, 1), &wib).is_empty());
    }
}
