// Copyright (c) AlphaVelocity.
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
            .help("Print as pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .conflicts_with("json")
            .help("Print one JSON object per line"),
    )
}

fn month_arg() -> Arg {
    Arg::new("month")
        .long("month")
        .help("Calendar month YYYY-MM (default: current month)")
}

pub fn build_cli() -> Command {
    Command::new("fintrack")
        .about("Personal finance tracker: transactions, investments, budgets and income tax")
        .version(clap::crate_version!())
        .arg(
            Arg::new("db")
                .long("db")
                .global(true)
                .help("SQLite database path (env FINTRACK_DB)"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Debug logging"),
        )
        .arg(
            Arg::new("quiet")
                .short('q')
                .long("quiet")
                .global(true)
                .action(ArgAction::SetTrue)
                .conflicts_with("verbose")
                .help("Only log errors"),
        )
        .subcommand(Command::new("init").about("Create the database"))
        .subcommand(
            Command::new("tx")
                .about("Income and expense transactions")
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(Arg::new("description").long("description").required(true))
                        .arg(Arg::new("category").long("category").required(true))
                        .arg(
                            Arg::new("type")
                                .long("type")
                                .required(true)
                                .help("income | expense"),
                        )
                        .arg(
                            Arg::new("date")
                                .long("date")
                                .help("YYYY-MM-DD (default: today)"),
                        ),
                )
                .subcommand(json_flags(
                    Command::new("list")
                        .arg(month_arg())
                        .arg(Arg::new("category").long("category"))
                        .arg(Arg::new("type").long("type"))
                        .arg(
                            Arg::new("limit")
                                .long("limit")
                                .value_parser(value_parser!(usize)),
                        ),
                )),
        )
        .subcommand(
            Command::new("invest")
                .about("Investments and their returns")
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(
                            Arg::new("type")
                                .long("type")
                                .required(true)
                                .help("Asset class tag, e.g. stocks, mutual-fund, fd"),
                        )
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(
                            Arg::new("current")
                                .long("current")
                                .help("Current value (default: amount invested)"),
                        )
                        .arg(Arg::new("date").long("date")),
                )
                .subcommand(json_flags(Command::new("list"))),
        )
        .subcommand(
            Command::new("budget")
                .about("Per-category monthly budgets")
                .subcommand(
                    Command::new("set")
                        .arg(Arg::new("category").long("category").required(true))
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(
                            Arg::new("month")
                                .long("month")
                                .help("Month name (default: current month)"),
                        )
                        .arg(
                            Arg::new("year")
                                .long("year")
                                .value_parser(value_parser!(i32)),
                        ),
                )
                .subcommand(json_flags(
                    Command::new("list")
                        .arg(Arg::new("month").long("month").help("Month name"))
                        .arg(
                            Arg::new("year")
                                .long("year")
                                .value_parser(value_parser!(i32)),
                        )
                        .arg(
                            Arg::new("all")
                                .long("all")
                                .action(ArgAction::SetTrue)
                                .help("Every budget regardless of month"),
                        ),
                ))
                .subcommand(json_flags(Command::new("status").arg(month_arg()))),
        )
        .subcommand(
            Command::new("tax")
                .about("Income tax estimation")
                .subcommand(json_flags(
                    Command::new("estimate")
                        .arg(Arg::new("income").long("income").required(true))
                        .arg(
                            Arg::new("regime")
                                .long("regime")
                                .default_value("new")
                                .help("old | new"),
                        )
                        .arg(
                            Arg::new("deductions")
                                .long("deductions")
                                .default_value("0"),
                        )
                        .arg(
                            Arg::new("no-save")
                                .long("no-save")
                                .action(ArgAction::SetTrue)
                                .help("Do not record the estimate"),
                        ),
                ))
                .subcommand(json_flags(Command::new("list"))),
        )
        .subcommand(
            Command::new("report")
                .about("Dashboard views")
                .subcommand(json_flags(Command::new("summary").arg(month_arg())))
                .subcommand(json_flags(
                    Command::new("cashflow").arg(month_arg()).arg(
                        Arg::new("months")
                            .long("months")
                            .value_parser(value_parser!(u16).range(1..=120))
                            .default_value("6")
                            .help("Trailing months to show, 1-120"),
                    ),
                ))
                .subcommand(Command::new("insights").arg(month_arg()))
                .subcommand(
                    Command::new("full")
                        .arg(month_arg())
                        .arg(Arg::new("out").long("out").help("Write to file instead of stdout")),
                ),
        )
        .subcommand(
            Command::new("export")
                .about("Export data")
                .subcommand(
                    Command::new("snapshot")
                        .arg(Arg::new("out").long("out").required(true)),
                )
                .subcommand(
                    Command::new("transactions")
                        .arg(
                            Arg::new("format")
                                .long("format")
                                .default_value("csv")
                                .help("csv | json"),
                        )
                        .arg(Arg::new("out").long("out").required(true)),
                ),
        )
        .subcommand(
            Command::new("import").about("Import data").subcommand(
                Command::new("snapshot")
                    .arg(Arg::new("path").long("path").required(true)),
            ),
        )
        .subcommand(
            Command::new("serve").about("Run the JSON API").arg(
                Arg::new("port")
                    .long("port")
                    .value_parser(value_parser!(u16))
                    .help("Listen port (env FINTRACK_PORT, default 3000)"),
            ),
        )
}
