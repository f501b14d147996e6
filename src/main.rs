// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use dompet::commands::{self, Context};
use dompet::gateway::Gateway;
use dompet::session::{Session, SqliteTokenStore};
use dompet::{cli, config, db};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let matches = cli::build_cli().get_matches();
    let conn = db::open_or_init()?;

    match matches.subcommand() {
        Some(("config", sub)) => commands::settings::handle(&conn, sub)?,
        Some(("logout", _)) => {
            commands::session::logout(&Session::new(SqliteTokenStore::new(&conn)))?
        }
        Some(("status", _)) => {
            commands::session::status(&Session::new(SqliteTokenStore::new(&conn)))?
        }
        Some((name, sub)) => {
            let cfg = config::resolve(
                &conn,
                matches.get_one::<String>("api-url").map(String::as_str),
                matches.get_one::<String>("utc-offset").map(String::as_str),
            )?;
            let ctx = Context {
                gateway: Gateway::new(&cfg.api_url, Session::new(SqliteTokenStore::new(&conn)))?,
                tz: cfg.offset,
            };
            match name {
                "login" => commands::session::login(&ctx, sub)?,
                "dashboard" => commands::dashboard::handle(&ctx, sub)?,
                "calendar" => commands::calendar::handle(&ctx, sub)?,
                "tx" => commands::transactions::handle(&ctx, sub)?,
                "wallet" => commands::wallets::handle(&ctx, sub)?,
                "category" => commands::categories::handle(&ctx, sub)?,
                "export" => commands::exporter::handle(&ctx, sub)?,
                _ => {
                    cli::build_cli().print_help()?;
                    println!();
                }
            }
        }
        None => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
