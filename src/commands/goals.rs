// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use clap::ArgMatches;

use super::{opt_date, opt_decimal, opt_string, required, required_id};
use crate::config::Settings;
use crate::metrics::goal_progress_percent;
use crate::models::{GoalPatch, Id, NewGoal};
use crate::store::Store;
use crate::utils::{fmt_money, fmt_percent, maybe_print_json, parse_date, parse_decimal, pretty_table};

pub fn handle(store: &Store<'_>, settings: &Settings, m: &ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let draft = NewGoal {
                title: required(sub, "title")?.to_string(),
                description: opt_string(sub, "description"),
                target_amount: parse_decimal(required(sub, "target")?)?,
                current_amount: parse_decimal(required(sub, "current")?)?,
                deadline: parse_date(required(sub, "deadline")?)?,
                category: opt_string(sub, "category"),
                member_id: sub.get_one::<Id>("member").copied(),
                is_completed: false,
            };
            let id = store.insert_goal(&draft)?;
            println!("Added goal '{}' (id {})", draft.title, id);
        }
        Some(("list", sub)) => {
            let goals = store.list_goals()?;
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &goals)? {
                let rows = goals
                    .iter()
                    .map(|g| {
                        vec![
                            g.id.to_string(),
                            g.title.clone(),
                            fmt_money(g.current_amount, &settings.currency),
                            fmt_money(g.target_amount, &settings.currency),
                            fmt_percent(goal_progress_percent(g)),
                            g.deadline.to_string(),
                            if g.is_completed { "yes" } else { "no" }.to_string(),
                        ]
                    })
                    .collect();
                println!(
                    "{}",
                    pretty_table(
                        &["ID", "Title", "Saved", "Target", "Progress", "Deadline", "Done"],
                        rows
                    )
                );
            }
        }
        Some(("update", sub)) => {
            let id = required_id(sub, "id")?;
            let patch = GoalPatch {
                title: opt_string(sub, "title"),
                description: opt_string(sub, "description").map(Some),
                target_amount: opt_decimal(sub, "target")?,
                current_amount: opt_decimal(sub, "current")?,
                deadline: opt_date(sub, "deadline")?,
                category: opt_string(sub, "category").map(Some),
                member_id: sub.get_one::<Id>("member").copied().map(Some),
                is_completed: sub.get_one::<bool>("completed").copied(),
            };
            let updated = store.update_goal(id, &patch)?;
            println!("Updated goal '{}' (id {})", updated.title, id);
        }
        Some(("rm", sub)) => {
            let id = required_id(sub, "id")?;
            store.delete_goal(id)?;
            println!("Removed goal {}", id);
        }
        _ => {}
    }
    Ok(())
}
