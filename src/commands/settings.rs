// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::config::{API_URL_KEY, UTC_OFFSET_KEY, normalize_url, parse_offset};
use crate::db::{get_setting, set_setting};
use crate::session::{Session, SqliteTokenStore};
use crate::utils::{pretty_table, required_arg};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("set-url", sub)) => {
            let url = normalize_url(required_arg(sub, "url")?)?;
            set_setting(conn, API_URL_KEY, &url)?;
            println!("API URL set to {}", url);
        }
        Some(("set-offset", sub)) => {
            let raw = required_arg(sub, "offset")?;
            let offset = parse_offset(raw)?;
            set_setting(conn, UTC_OFFSET_KEY, &offset.to_string())?;
            println!("Display offset set to {}", offset);
        }
        Some(("show", _)) => {
            let mut rows = Vec::new();
            for key in [API_URL_KEY, UTC_OFFSET_KEY] {
                rows.push(vec![
                    key.to_string(),
                    get_setting(conn, key)?.unwrap_or_else(|| "(unset)".into()),
                ]);
            }
            let logged_in = Session::new(SqliteTokenStore::new(conn)).is_active()?;
            rows.push(vec!["session".into(), if logged_in { "active" } else { "none" }.into()]);
            println!("{}", pretty_table(&["Setting", "Value"], rows));
        }
        _ => {}
    }
    Ok(())
}
