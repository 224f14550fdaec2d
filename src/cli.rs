// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{crate_version, value_parser, Arg, ArgAction, Command};

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

fn period_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("month")
            .long("month")
            .short('m')
            .help("Month as 1-12 or a name; defaults to the current month"),
    )
    .arg(
        Arg::new("year")
            .long("year")
            .short('y')
            .help("Four-digit year; defaults to the current year"),
    )
}

fn type_arg(default: &'static str) -> Arg {
    Arg::new("type")
        .long("type")
        .short('t')
        .value_parser(["income", "expense"])
        .default_value(default)
}

pub fn build_cli() -> Command {
    Command::new("expense-tracker")
        .version(crate_version!())
        .about("Record income and expenses; summarize months and chart daily spending")
        .subcommand(Command::new("init").about("Create the database"))
        .subcommand(
            Command::new("tx")
                .about("Record and list transactions")
                .subcommand(
                    Command::new("add")
                        .about("Record a transaction")
                        .arg(Arg::new("amount").long("amount").short('a').required(true))
                        .arg(type_arg("expense"))
                        .arg(Arg::new("category").long("category").short('c').required(true))
                        .arg(
                            Arg::new("date")
                                .long("date")
                                .short('d')
                                .help("YYYY-MM-DD; defaults to today"),
                        )
                        .arg(Arg::new("notes").long("notes").short('n')),
                )
                .subcommand(json_flags(
                    Command::new("list")
                        .about("List transactions, optionally for one month or year")
                        .arg(Arg::new("month").long("month").short('m'))
                        .arg(Arg::new("year").long("year").short('y')),
                ))
                .subcommand(json_flags(
                    Command::new("recent").about("Most recent transactions").arg(
                        Arg::new("limit")
                            .long("limit")
                            .short('l')
                            .value_parser(value_parser!(usize)),
                    ),
                )),
        )
        .subcommand(
            Command::new("report")
                .about("Summaries and chart data")
                .subcommand(json_flags(period_args(
                    Command::new("summary").about("Income, expenses and balance for a month"),
                )))
                .subcommand(json_flags(period_args(
                    Command::new("trends")
                        .about("Daily totals for a month")
                        .arg(
                            Arg::new("category")
                                .long("category")
                                .short('c')
                                .default_value("All"),
                        )
                        .arg(type_arg("expense")),
                )))
                .subcommand(json_flags(period_args(
                    Command::new("split").about("Income against expenses").arg(
                        Arg::new("all-time")
                            .long("all-time")
                            .action(ArgAction::SetTrue)
                            .conflicts_with_all(["month", "year"])
                            .help("Include every transaction instead of one month"),
                    ),
                )))
                .subcommand(json_flags(period_args(
                    Command::new("categories")
                        .about("Totals per category for a month")
                        .arg(type_arg("expense")),
                ))),
        )
        .subcommand(
            Command::new("categories")
                .about("Known categories")
                .subcommand(
                    Command::new("list").arg(
                        Arg::new("type")
                            .long("type")
                            .short('t')
                            .value_parser(["income", "expense"]),
                    ),
                ),
        )
        .subcommand(
            Command::new("config")
                .about("Read or change settings")
                .subcommand(Command::new("get").arg(Arg::new("key")))
                .subcommand(
                    Command::new("set")
                        .arg(Arg::new("key").required(true))
                        .arg(Arg::new("value").required(true).allow_hyphen_values(true)),
                ),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        build_cli().debug_assert();
    }
}
