// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, crate_version, value_parser};
use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "BUDGETBUDDY_LOG";

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
            .help("Print as JSON lines"),
    )
}

fn id_arg() -> Arg {
    Arg::new("id")
        .long("id")
        .required(true)
        .value_parser(value_parser!(i64))
}

fn report_args(cmd: Command) -> Command {
    json_flags(
        cmd.arg(
            Arg::new("range")
                .long("range")
                .default_value("alltime")
                .help("alltime | last30days | last3months | last6months | lastyear | data"),
        )
        .arg(
            Arg::new("from")
                .long("from")
                .requires("to")
                .help("Custom range start, YYYY-MM-DD"),
        )
        .arg(
            Arg::new("to")
                .long("to")
                .requires("from")
                .help("Custom range end, YYYY-MM-DD"),
        )
        .arg(
            Arg::new("category")
                .long("category")
                .help("Limit expenses to one category ('all' for every category)"),
        ),
    )
}

pub fn build_cli() -> Command {
    Command::new("budgetbuddy")
        .version(crate_version!())
        .about("Track income, expenses and monthly budget goals")
        .arg(
            Arg::new("db")
                .long("db")
                .global(true)
                .env("BUDGETBUDDY_DB")
                .help("Path of the data file (defaults to the platform data dir)"),
        )
        .arg(
            Arg::new("memory")
                .long("memory")
                .global(true)
                .action(ArgAction::SetTrue)
                .conflicts_with("db")
                .help("Keep data in memory only"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .global(true)
                .action(ArgAction::Count)
                .help("Log more (-v info, -vv debug, -vvv trace)"),
        )
        .subcommand(Command::new("init").about("Create the data file and seed sample data"))
        .subcommand(
            Command::new("income")
                .about("Manage income entries")
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("description").long("description").required(true))
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(Arg::new("source").long("source").required(true))
                        .arg(
                            Arg::new("frequency")
                                .long("frequency")
                                .default_value("one-time")
                                .help("one-time | weekly | monthly | yearly"),
                        )
                        .arg(Arg::new("date").long("date").help("YYYY-MM-DD, defaults to today")),
                )
                .subcommand(json_flags(
                    Command::new("list")
                        .arg(Arg::new("source").long("source"))
                        .arg(Arg::new("frequency").long("frequency"))
                        .arg(Arg::new("search").long("search"))
                        .arg(
                            Arg::new("limit")
                                .long("limit")
                                .value_parser(value_parser!(usize)),
                        ),
                ))
                .subcommand(Command::new("delete").arg(id_arg())),
        )
        .subcommand(
            Command::new("expense")
                .about("Manage expense entries")
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("description").long("description").required(true))
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(Arg::new("category").long("category").required(true))
                        .arg(Arg::new("date").long("date").help("YYYY-MM-DD, defaults to today")),
                )
                .subcommand(json_flags(
                    Command::new("list")
                        .arg(Arg::new("category").long("category"))
                        .arg(Arg::new("search").long("search"))
                        .arg(
                            Arg::new("limit")
                                .long("limit")
                                .value_parser(value_parser!(usize)),
                        ),
                ))
                .subcommand(Command::new("delete").arg(id_arg())),
        )
        .subcommand(
            Command::new("goal")
                .about("Manage monthly budget goals")
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("category").long("category").required(true))
                        .arg(Arg::new("limit").long("limit").required(true))
                        .arg(
                            Arg::new("inactive")
                                .long("inactive")
                                .action(ArgAction::SetTrue),
                        ),
                )
                .subcommand(json_flags(Command::new("list")))
                .subcommand(
                    Command::new("update")
                        .arg(id_arg())
                        .arg(Arg::new("limit").long("limit"))
                        .arg(
                            Arg::new("active")
                                .long("active")
                                .value_parser(value_parser!(bool)),
                        ),
                )
                .subcommand(Command::new("delete").arg(id_arg()))
                .subcommand(json_flags(Command::new("progress")))
                .subcommand(json_flags(Command::new("insights")))
                .subcommand(json_flags(Command::new("recommend")))
                .subcommand(
                    Command::new("quick")
                        .arg(Arg::new("category").long("category").required(true))
                        .arg(
                            Arg::new("style")
                                .long("style")
                                .default_value("moderate")
                                .help("conservative | moderate | flexible"),
                        ),
                ),
        )
        .subcommand(json_flags(
            Command::new("dashboard").about("Totals and the most recent transactions"),
        ))
        .subcommand(
            Command::new("report")
                .about("Reports over a date range")
                .subcommand(report_args(Command::new("summary")))
                .subcommand(report_args(Command::new("trend")))
                .subcommand(report_args(Command::new("categories")))
                .subcommand(report_args(Command::new("sources"))),
        )
        .subcommand(
            Command::new("export")
                .about("Export data")
                .subcommand(Command::new("json").arg(Arg::new("out").long("out").required(true)))
                .subcommand(Command::new("csv").arg(Arg::new("out").long("out").required(true))),
        )
        .subcommand(
            Command::new("import").about("Import data").subcommand(
                Command::new("json").arg(Arg::new("path").long("path").required(true)),
            ),
        )
        .subcommand(
            Command::new("reset")
                .about("Erase all data and start again from sample data")
                .arg(Arg::new("yes").long("yes").action(ArgAction::SetTrue)),
        )
        .subcommand(
            Command::new("config")
                .about("Show or change settings")
                .subcommand(Command::new("show"))
                .subcommand(
                    Command::new("set-currency")
                        .arg(Arg::new("currency").long("currency").required(true)),
                ),
        )
        .subcommand(Command::new("doctor").about("Check stored data for problems"))
}

/// Logs go to stderr; `BUDGETBUDDY_LOG` overrides the verbosity flag.
pub fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
