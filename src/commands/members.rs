// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use clap::ArgMatches;

use super::{opt_decimal, opt_string, required, required_id};
use crate::config::Settings;
use crate::models::{FamilyMemberPatch, NewFamilyMember};
use crate::store::Store;
use crate::utils::{fmt_money, maybe_print_json, pretty_table};

pub fn handle(store: &Store<'_>, settings: &Settings, m: &ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let draft = NewFamilyMember {
                name: required(sub, "name")?.to_string(),
                role: required(sub, "role")?.to_string(),
                avatar_url: opt_string(sub, "avatar"),
                email: opt_string(sub, "email"),
                monthly_income: opt_decimal(sub, "income")?,
            };
            let id = store.insert_member(&draft)?;
            println!("Added member '{}' (id {})", draft.name, id);
        }
        Some(("list", sub)) => {
            let members = store.list_members()?;
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &members)? {
                let rows = members
                    .iter()
                    .map(|mb| {
                        vec![
                            mb.id.to_string(),
                            mb.name.clone(),
                            mb.role.clone(),
                            mb.email.clone().unwrap_or_default(),
                            mb.monthly_income
                                .map(|v| fmt_money(v, &settings.currency))
                                .unwrap_or_default(),
                        ]
                    })
                    .collect();
                println!(
                    "{}",
                    pretty_table(&["ID", "Name", "Role", "Email", "Monthly income"], rows)
                );
            }
        }
        Some(("update", sub)) => {
            let id = required_id(sub, "id")?;
            let patch = FamilyMemberPatch {
                name: opt_string(sub, "name"),
                role: opt_string(sub, "role"),
                avatar_url: opt_string(sub, "avatar").map(Some),
                email: opt_string(sub, "email").map(Some),
                monthly_income: opt_decimal(sub, "income")?.map(Some),
            };
            let updated = store.update_member(id, &patch)?;
            println!("Updated member '{}' (id {})", updated.name, id);
        }
        Some(("rm", sub)) => {
            let id = required_id(sub, "id")?;
            store.delete_member(id)?;
            println!("Removed member {}", id);
        }
        _ => {}
    }
    Ok(())
}
