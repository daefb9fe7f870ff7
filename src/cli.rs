// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{value_parser, Arg, ArgAction, Command};

fn json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print output as pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .help("Print output as JSON lines"),
    )
}

fn account_arg() -> Arg {
    Arg::new("account")
        .long("account")
        .required(true)
        .value_parser(value_parser!(i64))
        .help("Account id")
}

fn ids_arg() -> Arg {
    Arg::new("ids")
        .long("ids")
        .required(true)
        .num_args(1..)
        .value_parser(value_parser!(i64))
        .help("Row ids")
}

fn year_arg() -> Arg {
    Arg::new("year")
        .long("year")
        .value_parser(value_parser!(i32))
        .help("Calendar year (defaults to the current one)")
}

pub fn build_cli() -> Command {
    Command::new("kasbuk")
        .about("Kasbuk: a small bookkeeping ledger with accounts, categories, and charts")
        .subcommand(Command::new("init").about("Initialize the database"))
        .subcommand(
            Command::new("account")
                .about("Manage accounts")
                .subcommand(
                    Command::new("add")
                        .about("Add an account")
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(
                            Arg::new("initial")
                                .long("initial")
                                .default_value("0")
                                .help("Initial balance"),
                        ),
                )
                .subcommand(json_flags(
                    Command::new("list").about("List accounts with totals"),
                ))
                .subcommand(
                    Command::new("update")
                        .about("Rename an account or change its initial balance")
                        .arg(
                            Arg::new("id")
                                .long("id")
                                .required(true)
                                .value_parser(value_parser!(i64)),
                        )
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(
                            Arg::new("initial")
                                .long("initial")
                                .help("New initial balance (keeps the current one when omitted)"),
                        ),
                )
                .subcommand(
                    Command::new("rm")
                        .about("Remove accounts by id")
                        .arg(ids_arg()),
                ),
        )
        .subcommand(
            Command::new("entry")
                .about("Record and inspect ledger entries")
                .subcommand(
                    Command::new("add")
                        .about("Record one entry")
                        .arg(account_arg())
                        .arg(
                            Arg::new("type")
                                .long("type")
                                .required(true)
                                .help("income, expense or transfer"),
                        )
                        .arg(
                            Arg::new("amount")
                                .long("amount")
                                .required(true)
                                .help("Non-negative magnitude"),
                        )
                        .arg(Arg::new("date").long("date").required(true))
                        .arg(Arg::new("description").long("description"))
                        .arg(Arg::new("category").long("category"))
                        .arg(
                            Arg::new("affected")
                                .long("affected")
                                .value_parser(value_parser!(i64))
                                .help("Receiving account id for transfers"),
                        ),
                )
                .subcommand(json_flags(
                    Command::new("list")
                        .about("List entries, newest first")
                        .arg(account_arg())
                        .arg(Arg::new("month").long("month").help("YYYY-MM"))
                        .arg(Arg::new("from").long("from"))
                        .arg(Arg::new("to").long("to")),
                ))
                .subcommand(
                    Command::new("update")
                        .about("Update one entry")
                        .arg(
                            Arg::new("id")
                                .long("id")
                                .required(true)
                                .value_parser(value_parser!(i64)),
                        )
                        .arg(account_arg())
                        .arg(Arg::new("type").long("type").required(true))
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(Arg::new("date").long("date").required(true))
                        .arg(
                            Arg::new("description")
                                .long("description")
                                .help("New description; the old one is cleared when omitted"),
                        )
                        .arg(
                            Arg::new("category")
                                .long("category")
                                .help("New category name; the old one is cleared when omitted"),
                        ),
                )
                .subcommand(
                    Command::new("rm")
                        .about("Delete entries by id")
                        .arg(ids_arg()),
                ),
        )
        .subcommand(
            Command::new("category").about("Inspect categories").subcommand(
                json_flags(
                    Command::new("list")
                        .about("List an account's categories")
                        .arg(account_arg()),
                ),
            ),
        )
        .subcommand(
            Command::new("chart")
                .about("Aggregated views for charting")
                .subcommand(json_flags(
                    Command::new("balances")
                        .about("Month-start balances per account")
                        .arg(year_arg()),
                ))
                .subcommand(json_flags(
                    Command::new("range")
                        .about("Min/max month-start balance of a year")
                        .arg(year_arg()),
                ))
                .subcommand(json_flags(
                    Command::new("spend")
                        .about("Per-category totals for one month")
                        .arg(account_arg())
                        .arg(
                            Arg::new("month")
                                .long("month")
                                .required(true)
                                .help("YYYY-MM"),
                        )
                        .arg(
                            Arg::new("type")
                                .long("type")
                                .default_value("expense")
                                .help("income or expense"),
                        ),
                )),
        )
        .subcommand(
            Command::new("import").about("Import data").subcommand(
                Command::new("entries")
                    .about("Import entries from a CSV file")
                    .arg(Arg::new("path").long("path").required(true))
                    .arg(account_arg())
                    .arg(
                        Arg::new("affected")
                            .long("affected")
                            .value_parser(value_parser!(i64))
                            .help("Affected account id applied to every row"),
                    ),
            ),
        )
        .subcommand(
            Command::new("export").about("Export data").subcommand(
                Command::new("entries")
                    .about("Export an account's entries to CSV")
                    .arg(account_arg())
                    .arg(Arg::new("out").long("out").required(true)),
            ),
        )
}
