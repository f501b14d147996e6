// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::aggregate::DotColor;
use crate::commands::Context;
use crate::session::TokenStore;
use crate::utils::{month_end, parse_date, parse_month, pretty_table};
use crate::views::{CalendarView, calendar_on_enter};
use anyhow::Result;
use chrono::{Datelike, Utc};

const WEEKDAYS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

pub fn handle<S: TokenStore>(ctx: &Context<S>, sub: &clap::ArgMatches) -> Result<()> {
    let day = sub.get_one::<String>("day").map(|s| parse_date(s)).transpose()?;
    let month = match (sub.get_one::<String>("month"), day) {
        (Some(m), _) => parse_month(m)?,
        (None, Some(d)) => d,
        (None, None) => Utc::now().with_timezone(&ctx.tz).date_naive(),
    };
    // Without an explicit day, today is selected when viewing the current
    // month and the 1st otherwise.
    let today = Utc::now().with_timezone(&ctx.tz).date_naive();
    let selected = day.or_else(|| {
        (today.year() == month.year() && today.month() == month.month()).then_some(today)
    });

    let view = calendar_on_enter(&ctx.gateway, month, selected, &ctx.tz)?;
    if sub.get_flag("json") {
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else {
        print!("{}", render(&view));
    }
    Ok(())
}

fn cell(view: &CalendarView, day: u32) -> String {
    let Some(date) = view.month.with_day(day) else {
        return String::new();
    };
    let mut s = match view.markings.get(&date) {
        Some(m) if m.selected => format!("[{}]", day),
        _ => day.to_string(),
    };
    if let Some(m) = view.markings.get(&date) {
        for dot in &m.dots {
            s.push(match dot {
                DotColor::Income => '+',
                DotColor::Spending => '-',
            });
        }
    }
    s
}

pub fn render(view: &CalendarView) -> String {
    let lead = view.month.weekday().num_days_from_sunday() as usize;
    let days = month_end(view.month).day();

    let mut cells: Vec<String> = vec![String::new(); lead];
    cells.extend((1..=days).map(|d| cell(view, d)));
    while cells.len() % 7 != 0 {
        cells.push(String::new());
    }
    let rows: Vec<Vec<String>> = cells.chunks(7).map(|w| w.to_vec()).collect();

    let mut out = format!("{}\n", view.month.format("%B %Y"));
    out.push_str(&format!("{}\n", pretty_table(&WEEKDAYS, rows)));
    out.push_str("+ income  - spending  [d] selected\n\n");
    out.push_str(&format!("{}\n", view.heading));

    if view.day_transactions.is_empty() {
        out.push_str("No transactions on this date.\n");
        return out;
    }
    let rows = view
        .day_transactions
        .iter()
        .map(|r| {
            vec![
                r.id.to_string(),
                r.time.clone(),
                r.category.clone(),
                r.description.clone(),
                r.amount.clone(),
            ]
        })
        .collect();
    out.push_str(&format!(
        "{}\n",
        pretty_table(&["ID", "Time", "Category", "Note", "Amount"], rows)
    ));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{TransactionKind, TransactionRecord};
    use chrono::{FixedOffset, NaiveDate, TimeZone};

    #[test]
    fn render_marks_days_and_selection() {
        let records = vec![
            TransactionRecord {
                id: 1,
                amount: 10_000,
                kind: TransactionKind::Income,
                description: None,
                occurred_at: Utc.with_ymd_and_hms(2025, 11, 5, 8, 0, 0).unwrap(),
                wallet_id: 1,
                wallet_name: None,
                category_id: None,
                category_name: "Salary".into(),
            },
            TransactionRecord {
                id: 2,
                amount: 2_000,
                kind: TransactionKind::Expense,
                description: None,
                occurred_at: Utc.with_ymd_and_hms(2025, 11, 5, 9, 0, 0).unwrap(),
                wallet_id: 1,
                wallet_name: None,
                category_id: None,
                category_name: "Food".into(),
            },
        ];
        let tz = FixedOffset::east_opt(0).unwrap();
        let month = NaiveDate::from_ymd_opt(2025, 11, 1).unwrap();
        let view = CalendarView::derive(&records, month, NaiveDate::from_ymd_opt(2025, 11, 5), &tz);
        let text = render(&view);
        assert!(text.starts_with("November 2025\n"));
        assert!(text.contains("[5]+-"));
        assert!(text.contains("Transactions on Nov 05, 2025"));
        assert!(text.contains("+Rp 10.000"));
        assert_eq!(cell(&view, 6), "6");
    }
}
