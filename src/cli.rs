// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, command, value_parser};

fn json_flags() -> [Arg; 2] {
    [
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .conflicts_with("jsonl")
            .help("Print as pretty JSON"),
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .help("Print as JSON lines"),
    ]
}

fn filter_args() -> [Arg; 4] {
    [
        Arg::new("type")
            .long("type")
            .value_name("TYPE")
            .help("Only this payment type"),
        Arg::new("year")
            .long("year")
            .value_name("YYYY")
            .help("Only expenses dated in this year"),
        Arg::new("from")
            .long("from")
            .value_name("YYYY-MM-DD")
            .help("Earliest date, inclusive"),
        Arg::new("to")
            .long("to")
            .value_name("YYYY-MM-DD")
            .help("Latest date, inclusive"),
    ]
}

fn grouping_args() -> [Arg; 2] {
    [
        Arg::new("group_by")
            .long("group-by")
            .value_name("KEY")
            .value_parser(["type", "subtype", "description", "date"])
            .help("Group sums by type, subtype (type → subtype), description or date"),
        Arg::new("order")
            .long("order")
            .value_name("ORDER")
            .value_parser(["insertion", "value", "label"])
            .help("Series order: first appearance, largest first, or by label"),
    ]
}

fn expense_fields(cmd: Command, amount_required: bool) -> Command {
    cmd.arg(
        Arg::new("amount")
            .long("amount")
            .required(amount_required)
            .allow_hyphen_values(true)
            .value_name("AMOUNT"),
    )
    .arg(
        Arg::new("type")
            .long("type")
            .value_name("TYPE")
            .help("Payment type, e.g. cash, upi, creditcard"),
    )
    .arg(Arg::new("subtype").long("subtype").value_name("SUBTYPE"))
    .arg(
        Arg::new("description")
            .long("description")
            .short('d')
            .value_name("TEXT"),
    )
    .arg(
        Arg::new("date")
            .long("date")
            .value_name("DATE")
            .help("YYYY-MM-DD or RFC 3339 timestamp; defaults to now"),
    )
}

pub fn build_cli() -> Command {
    command!()
        .name("myexpenses")
        .about("Track personal expenses, summarise them and export the totals")
        .subcommand_required(false)
        .subcommand(Command::new("init").about("Create the database if needed"))
        .subcommand(
            Command::new("auth")
                .about("Who is signed in")
                .subcommand(
                    Command::new("login")
                        .about("Sign in as a user id")
                        .arg(Arg::new("user").long("user").required(true).value_name("UID")),
                )
                .subcommand(Command::new("logout").about("Sign out"))
                .subcommand(Command::new("whoami").about("Show the signed-in user")),
        )
        .subcommand(
            Command::new("expense")
                .about("Record and browse expenses")
                .subcommand(expense_fields(
                    Command::new("add").about("Record a new expense"),
                    true,
                ))
                .subcommand(expense_fields(
                    Command::new("edit")
                        .about("Overwrite an existing expense")
                        .arg(Arg::new("id").required(true).value_name("ID")),
                    false,
                ))
                .subcommand(
                    Command::new("rm")
                        .about("Delete an expense")
                        .arg(Arg::new("id").required(true).value_name("ID")),
                )
                .subcommand(
                    Command::new("list")
                        .about("List expenses grouped by day, newest first")
                        .args(filter_args())
                        .args(json_flags()),
                )
                .subcommand(Command::new("types").about("List configured payment types")),
        )
        .subcommand(
            Command::new("report").about("Totals for charts").subcommand(
                Command::new("summary")
                    .about("Sum expenses per group with chart colors")
                    .args(filter_args())
                    .args(grouping_args())
                    .args(json_flags()),
            ),
        )
        .subcommand(
            Command::new("export")
                .about("Write the summary as CSV, HTML (for PDF) or JSON")
                .arg(
                    Arg::new("format")
                        .long("format")
                        .default_value("csv")
                        .value_name("FORMAT"),
                )
                .arg(
                    Arg::new("out")
                        .long("out")
                        .required(true)
                        .value_name("PATH"),
                )
                .args(filter_args())
                .args(grouping_args()),
        )
        .subcommand(
            Command::new("watch")
                .about("Re-print the summary whenever the database changes")
                .args(filter_args())
                .args(grouping_args())
                .arg(
                    Arg::new("interval")
                        .long("interval")
                        .value_name("SECS")
                        .default_value("2")
                        .value_parser(value_parser!(u64)),
                )
                .arg(
                    Arg::new("max_events")
                        .long("max-events")
                        .value_name("N")
                        .value_parser(value_parser!(usize))
                        .help("Stop after N snapshots"),
                ),
        )
        .subcommand(
            Command::new("config")
                .about("Configuration file")
                .subcommand(Command::new("path").about("Print the config file location"))
                .subcommand(Command::new("show").about("Print the effective configuration")),
        )
}
