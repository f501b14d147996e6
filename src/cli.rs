// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, value_parser};

fn json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .conflicts_with("jsonl")
            .help("Print JSON instead of a table"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .help("Print one JSON object per line"),
    )
}

fn transaction_fields(cmd: Command, required: bool) -> Command {
    cmd.arg(Arg::new("amount").long("amount").required(required).help("Whole Rupiah"))
        .arg(
            Arg::new("type")
                .long("type")
                .value_parser(["income", "expense", "transfer"])
                .help("Transaction type (default: expense)"),
        )
        .arg(
            Arg::new("category")
                .long("category")
                .value_parser(value_parser!(i64))
                .help("Category id (see `category list`)"),
        )
        .arg(
            Arg::new("wallet")
                .long("wallet")
                .value_parser(value_parser!(i64))
                .help("Wallet id (default: first wallet)"),
        )
        .arg(Arg::new("note").long("note").help("Description"))
        .arg(
            Arg::new("at")
                .long("at")
                .help("When it happened, RFC 3339 or `YYYY-MM-DD HH:MM` in the display offset"),
        )
}

pub fn build_cli() -> Command {
    Command::new("dompet")
        .about("Wallets, transactions and a spending calendar on top of a finance API")
        .version(clap::crate_version!())
        .arg(
            Arg::new("api-url")
                .long("api-url")
                .global(true)
                .env("DOMPET_API_URL")
                .help("Base URL of the finance API"),
        )
        .arg(
            Arg::new("utc-offset")
                .long("utc-offset")
                .global(true)
                .env("DOMPET_UTC_OFFSET")
                .allow_hyphen_values(true)
                .help("Display offset for dates, e.g. +07:00 (default: local)"),
        )
        .subcommand(
            Command::new("login")
                .about("Sign in and store the session token")
                .arg(Arg::new("username").long("username").short('u').required(true))
                .arg(Arg::new("password").long("password").short('p').required(true)),
        )
        .subcommand(Command::new("logout").about("Forget the stored session token"))
        .subcommand(Command::new("status").about("Show whether a session is stored"))
        .subcommand(json_flags(
            Command::new("dashboard")
                .about("Balance and transactions grouped by day")
                .arg(
                    Arg::new("wallet")
                        .long("wallet")
                        .value_parser(value_parser!(i64))
                        .help("Only this wallet; balance is computed from its transactions"),
                ),
        ))
        .subcommand(
            Command::new("calendar")
                .about("Month calendar with income/spending markers")
                .arg(Arg::new("month").long("month").help("YYYY-MM (default: current month)"))
                .arg(Arg::new("day").long("day").help("Selected day YYYY-MM-DD"))
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue)
                        .help("Print markings and the day's transactions as JSON"),
                ),
        )
        .subcommand(
            Command::new("tx")
                .about("Transactions")
                .subcommand(transaction_fields(
                    Command::new("add").about("Record a transaction"),
                    true,
                ))
                .subcommand(transaction_fields(
                    Command::new("edit")
                        .about("Change a transaction")
                        .arg(Arg::new("id").long("id").required(true)),
                    false,
                ))
                .subcommand(json_flags(
                    Command::new("show")
                        .about("Show one transaction")
                        .arg(Arg::new("id").long("id").required(true)),
                ))
                .subcommand(
                    Command::new("rm")
                        .about("Delete a transaction")
                        .arg(Arg::new("id").long("id").required(true))
                        .arg(
                            Arg::new("yes")
                                .long("yes")
                                .action(ArgAction::SetTrue)
                                .help("Confirm the deletion; it cannot be undone"),
                        ),
                )
                .subcommand(json_flags(
                    Command::new("list")
                        .about("List transactions, newest first")
                        .arg(Arg::new("month").long("month").help("YYYY-MM"))
                        .arg(
                            Arg::new("wallet")
                                .long("wallet")
                                .value_parser(value_parser!(i64)),
                        )
                        .arg(
                            Arg::new("limit")
                                .long("limit")
                                .value_parser(value_parser!(usize)),
                        ),
                )),
        )
        .subcommand(
            Command::new("wallet")
                .about("Wallets")
                .subcommand(
                    Command::new("add")
                        .about("Create a wallet")
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(
                            Arg::new("type")
                                .long("type")
                                .default_value("cash")
                                .value_parser(["cash", "bank", "ewallet"]),
                        )
                        .arg(Arg::new("balance").long("balance").help("Initial balance")),
                )
                .subcommand(json_flags(Command::new("list").about("List wallets"))),
        )
        .subcommand(
            Command::new("category").about("Categories").subcommand(json_flags(
                Command::new("list").about("List categories of one type").arg(
                    Arg::new("type")
                        .long("type")
                        .default_value("expense")
                        .value_parser(["income", "expense"]),
                ),
            )),
        )
        .subcommand(
            Command::new("export").about("Export data").subcommand(
                Command::new("transactions")
                    .about("Write all transactions to a file")
                    .arg(
                        Arg::new("format")
                            .long("format")
                            .default_value("csv")
                            .help("csv|json"),
                    )
                    .arg(Arg::new("out").long("out").required(true)),
            ),
        )
        .subcommand(
            Command::new("config")
                .about("Stored settings")
                .subcommand(
                    Command::new("set-url")
                        .about("Store the API base URL")
                        .arg(Arg::new("url").required(true)),
                )
                .subcommand(
                    Command::new("set-offset")
                        .about("Store the display UTC offset")
                        .arg(Arg::new("offset").required(true).allow_hyphen_values(true)),
                )
                .subcommand(Command::new("show").about("Show stored settings")),
        )
}
