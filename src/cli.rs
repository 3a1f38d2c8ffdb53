// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, value_parser};

use crate::models::Id;

fn id_arg() -> Arg {
    Arg::new("id")
        .required(true)
        .value_parser(value_parser!(Id))
}

fn output_args(cmd: Command) -> Command {
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

fn filter_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("member")
            .long("member")
            .value_parser(value_parser!(Id))
            .help("Only transactions attributed to this member"),
    )
    .arg(Arg::new("from").long("from").help("Start date, inclusive (YYYY-MM-DD)"))
    .arg(Arg::new("to").long("to").help("End date, inclusive (YYYY-MM-DD)"))
    .arg(
        Arg::new("type")
            .long("type")
            .value_parser(["all", "income", "expense"])
            .default_value("all"),
    )
    .arg(
        Arg::new("search")
            .long("search")
            .help("Case-insensitive match on description or category"),
    )
}

fn member_cmd() -> Command {
    Command::new("member")
        .about("Manage family members")
        .subcommand(
            Command::new("add")
                .arg(Arg::new("name").long("name").required(true))
                .arg(Arg::new("role").long("role").required(true))
                .arg(Arg::new("email").long("email"))
                .arg(Arg::new("avatar").long("avatar"))
                .arg(Arg::new("income").long("income").help("Monthly income")),
        )
        .subcommand(output_args(Command::new("list")))
        .subcommand(
            Command::new("update")
                .arg(id_arg())
                .arg(Arg::new("name").long("name"))
                .arg(Arg::new("role").long("role"))
                .arg(Arg::new("email").long("email"))
                .arg(Arg::new("avatar").long("avatar"))
                .arg(Arg::new("income").long("income")),
        )
        .subcommand(Command::new("rm").arg(id_arg()))
}

fn account_cmd() -> Command {
    Command::new("account")
        .about("Manage bank accounts")
        .subcommand(
            Command::new("add")
                .arg(Arg::new("name").long("name").required(true))
                .arg(
                    Arg::new("holder")
                        .long("holder")
                        .required(true)
                        .value_parser(value_parser!(Id)),
                )
                .arg(Arg::new("balance").long("balance").default_value("0"))
                .arg(
                    Arg::new("kind")
                        .long("kind")
                        .value_parser(["checking", "savings"])
                        .default_value("checking"),
                ),
        )
        .subcommand(output_args(Command::new("list")))
        .subcommand(
            Command::new("update")
                .arg(id_arg())
                .arg(Arg::new("name").long("name"))
                .arg(Arg::new("holder").long("holder").value_parser(value_parser!(Id)))
                .arg(Arg::new("balance").long("balance"))
                .arg(
                    Arg::new("kind")
                        .long("kind")
                        .value_parser(["checking", "savings"]),
                ),
        )
        .subcommand(Command::new("rm").arg(id_arg()))
}

fn card_cmd() -> Command {
    let theme = || {
        Arg::new("theme")
            .long("theme")
            .value_parser(["black", "lime", "white"])
    };
    Command::new("card")
        .about("Manage credit cards")
        .subcommand(
            Command::new("add")
                .arg(Arg::new("name").long("name").required(true))
                .arg(
                    Arg::new("holder")
                        .long("holder")
                        .required(true)
                        .value_parser(value_parser!(Id)),
                )
                .arg(
                    Arg::new("closing-day")
                        .long("closing-day")
                        .required(true)
                        .value_parser(value_parser!(u32)),
                )
                .arg(
                    Arg::new("due-day")
                        .long("due-day")
                        .required(true)
                        .value_parser(value_parser!(u32)),
                )
                .arg(Arg::new("limit").long("limit").required(true))
                .arg(Arg::new("bill").long("bill").default_value("0"))
                .arg(theme().default_value("black"))
                .arg(Arg::new("digits").long("digits").help("Last four digits")),
        )
        .subcommand(output_args(Command::new("list")))
        .subcommand(output_args(Command::new("show").arg(id_arg())))
        .subcommand(
            Command::new("update")
                .arg(id_arg())
                .arg(Arg::new("name").long("name"))
                .arg(Arg::new("holder").long("holder").value_parser(value_parser!(Id)))
                .arg(
                    Arg::new("closing-day")
                        .long("closing-day")
                        .value_parser(value_parser!(u32)),
                )
                .arg(
                    Arg::new("due-day")
                        .long("due-day")
                        .value_parser(value_parser!(u32)),
                )
                .arg(Arg::new("limit").long("limit"))
                .arg(Arg::new("bill").long("bill"))
                .arg(theme())
                .arg(Arg::new("digits").long("digits")),
        )
        .subcommand(Command::new("rm").arg(id_arg()))
}

fn goal_cmd() -> Command {
    Command::new("goal")
        .about("Manage savings goals")
        .subcommand(
            Command::new("add")
                .arg(Arg::new("title").long("title").required(true))
                .arg(Arg::new("target").long("target").required(true))
                .arg(Arg::new("current").long("current").default_value("0"))
                .arg(Arg::new("deadline").long("deadline").required(true))
                .arg(Arg::new("description").long("description"))
                .arg(Arg::new("category").long("category"))
                .arg(Arg::new("member").long("member").value_parser(value_parser!(Id))),
        )
        .subcommand(output_args(Command::new("list")))
        .subcommand(
            Command::new("update")
                .arg(id_arg())
                .arg(Arg::new("title").long("title"))
                .arg(Arg::new("target").long("target"))
                .arg(Arg::new("current").long("current"))
                .arg(Arg::new("deadline").long("deadline"))
                .arg(Arg::new("description").long("description"))
                .arg(Arg::new("category").long("category"))
                .arg(Arg::new("member").long("member").value_parser(value_parser!(Id)))
                .arg(
                    Arg::new("completed")
                        .long("completed")
                        .value_parser(value_parser!(bool)),
                ),
        )
        .subcommand(Command::new("rm").arg(id_arg()))
}

fn category_cmd() -> Command {
    Command::new("category")
        .about("Manage categories")
        .subcommand(output_args(Command::new("list")))
        .subcommand(
            Command::new("add")
                .arg(Arg::new("name").required(true))
                .arg(
                    Arg::new("type")
                        .long("type")
                        .value_parser(["income", "expense"])
                        .default_value("expense"),
                ),
        )
}

fn tx_cmd() -> Command {
    Command::new("tx")
        .about("Record and inspect transactions")
        .subcommand(
            Command::new("add")
                .arg(
                    Arg::new("type")
                        .long("type")
                        .required(true)
                        .value_parser(["income", "expense"]),
                )
                .arg(Arg::new("amount").long("amount").required(true))
                .arg(Arg::new("description").long("description").required(true))
                .arg(Arg::new("category").long("category").required(true))
                .arg(Arg::new("date").long("date").required(true))
                .arg(
                    Arg::new("account")
                        .long("account")
                        .required(true)
                        .value_parser(value_parser!(Id)),
                )
                .arg(Arg::new("member").long("member").value_parser(value_parser!(Id)))
                .arg(
                    Arg::new("installments")
                        .long("installments")
                        .value_parser(value_parser!(u32))
                        .default_value("1"),
                )
                .arg(
                    Arg::new("current-installment")
                        .long("current-installment")
                        .value_parser(value_parser!(u32)),
                )
                .arg(
                    Arg::new("status")
                        .long("status")
                        .value_parser(["pending", "completed", "cancelled"])
                        .default_value("completed"),
                )
                .arg(
                    Arg::new("recurring")
                        .long("recurring")
                        .action(ArgAction::SetTrue),
                )
                .arg(Arg::new("paid").long("paid").action(ArgAction::SetTrue)),
        )
        .subcommand(output_args(filter_args(
            Command::new("list").arg(
                Arg::new("page")
                    .long("page")
                    .value_parser(value_parser!(usize))
                    .default_value("1"),
            ),
        )))
        .subcommand(
            Command::new("update")
                .arg(id_arg())
                .arg(Arg::new("amount").long("amount"))
                .arg(Arg::new("description").long("description"))
                .arg(Arg::new("category").long("category"))
                .arg(Arg::new("date").long("date"))
                .arg(Arg::new("account").long("account").value_parser(value_parser!(Id)))
                .arg(Arg::new("member").long("member").value_parser(value_parser!(Id)))
                .arg(
                    Arg::new("status")
                        .long("status")
                        .value_parser(["pending", "completed", "cancelled"]),
                )
                .arg(
                    Arg::new("recurring")
                        .long("recurring")
                        .value_parser(value_parser!(bool)),
                ),
        )
        .subcommand(Command::new("rm").arg(id_arg()))
        .subcommand(
            Command::new("pay")
                .about("Mark an expense paid and schedule what follows it")
                .arg(id_arg())
                .arg(
                    Arg::new("policy")
                        .long("policy")
                        .value_parser(["installment", "both", "reject"])
                        .help("Override lifecycle.recurring_installments for this call"),
                ),
        )
        .subcommand(output_args(Command::new("upcoming").about("Unpaid expenses by due date")))
}

fn report_cmd() -> Command {
    Command::new("report")
        .about("Dashboard figures for the filtered period")
        .subcommand(output_args(filter_args(Command::new("summary"))))
        .subcommand(output_args(filter_args(Command::new("categories"))))
}

fn config_cmd() -> Command {
    Command::new("config")
        .about("Read and write settings")
        .subcommand(Command::new("get").arg(Arg::new("key").required(true)))
        .subcommand(
            Command::new("set")
                .arg(Arg::new("key").required(true))
                .arg(Arg::new("value").required(true)),
        )
        .subcommand(Command::new("list"))
}

pub fn build_cli() -> Command {
    Command::new("mycash")
        .version(clap::crate_version!())
        .about("Household finances from the terminal")
        .subcommand(Command::new("init").about("Create the database and default categories"))
        .subcommand(member_cmd())
        .subcommand(account_cmd())
        .subcommand(card_cmd())
        .subcommand(goal_cmd())
        .subcommand(category_cmd())
        .subcommand(tx_cmd())
        .subcommand(report_cmd())
        .subcommand(config_cmd())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_is_well_formed() {
        build_cli().debug_assert();
    }
}
