// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::db;
use anyhow::{Context, Result, anyhow};
use chrono::{FixedOffset, Local, Offset};
use rusqlite::Connection;

pub const API_URL_KEY: &str = "api_url";
pub const UTC_OFFSET_KEY: &str = "utc_offset";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub api_url: String,
    pub offset: FixedOffset,
}

/// Flag (or its environment variable, which clap folds in) wins over the
/// stored setting.
pub fn resolve(
    conn: &Connection,
    api_url_flag: Option<&str>,
    offset_flag: Option<&str>,
) -> Result<Config> {
    Ok(Config {
        api_url: resolve_api_url(conn, api_url_flag)?,
        offset: resolve_offset(conn, offset_flag)?,
    })
}

pub fn resolve_api_url(conn: &Connection, flag: Option<&str>) -> Result<String> {
    let raw = match flag {
        Some(v) => Some(v.to_string()),
        None => db::get_setting(conn, API_URL_KEY)?,
    };
    let raw = raw.filter(|v| !v.trim().is_empty()).ok_or_else(|| {
        anyhow!(
            "API URL is not configured; pass --api-url, set DOMPET_API_URL, or run `dompet config set-url <URL>`"
        )
    })?;
    normalize_url(&raw)
}

pub fn normalize_url(raw: &str) -> Result<String> {
    let url = raw.trim().trim_end_matches('/');
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        return Err(anyhow!("API URL '{}' must start with http:// or https://", raw));
    }
    Ok(url.to_string())
}

pub fn resolve_offset(conn: &Connection, flag: Option<&str>) -> Result<FixedOffset> {
    let raw = match flag {
        Some(v) => Some(v.to_string()),
        None => db::get_setting(conn, UTC_OFFSET_KEY)?,
    };
    match raw {
        Some(v) => parse_offset(&v),
        None => Ok(Local::now().offset().fix()),
    }
}

/// Accepts `Z`, `UTC`, `+7`, `+07`, `+0700` and `+07:00`.
pub fn parse_offset(s: &str) -> Result<FixedOffset> {
    let s = s.trim();
    if s.eq_ignore_ascii_case("z") || s.eq_ignore_ascii_case("utc") {
        return FixedOffset::east_opt(0).context("zero offset");
    }
    let bad = || anyhow!("Invalid UTC offset '{}', expected e.g. +07:00", s);
    let (sign, rest) = match s.chars().next() {
        Some('+') => (1, &s[1..]),
        Some('-') => (-1, &s[1..]),
        _ => return Err(bad()),
    };
    let digits: String = rest.chars().filter(|c| *c != ':').collect();
    if digits.is_empty() || digits.len() > 4 || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(bad());
    }
    let (h, m) = if digits.len() <= 2 {
        (digits.as_str(), "0")
    } else {
        digits.split_at(digits.len() - 2)
    };
    let hours: i32 = h.parse().map_err(|_| bad())?;
    let minutes: i32 = m.parse().map_err(|_| bad())?;
    if hours > 14 || minutes > 59 {
        return Err(bad());
    }
    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60)).ok_or_else(bad)
}
