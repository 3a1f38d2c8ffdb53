// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use clap::ArgMatches;

use super::{opt_decimal, opt_string, required, required_id};
use crate::config::Settings;
use crate::models::{AccountKind, BankAccountPatch, Id, NewBankAccount};
use crate::store::Store;
use crate::utils::{fmt_money, maybe_print_json, parse_decimal, pretty_table};

pub fn handle(store: &Store<'_>, settings: &Settings, m: &ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let draft = NewBankAccount {
                name: required(sub, "name")?.to_string(),
                holder_id: required_id(sub, "holder")?,
                balance: parse_decimal(required(sub, "balance")?)?,
                kind: required(sub, "kind")?.parse()?,
            };
            let id = store.insert_bank_account(&draft)?;
            println!("Added account '{}' (id {})", draft.name, id);
        }
        Some(("list", sub)) => {
            let accounts = store.list_bank_accounts()?;
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &accounts)? {
                let rows = accounts
                    .iter()
                    .map(|a| {
                        vec![
                            a.id.to_string(),
                            a.name.clone(),
                            a.kind.as_str().to_string(),
                            a.holder_id.to_string(),
                            fmt_money(a.balance, &settings.currency),
                        ]
                    })
                    .collect();
                println!(
                    "{}",
                    pretty_table(&["ID", "Name", "Kind", "Holder", "Balance"], rows)
                );
            }
        }
        Some(("update", sub)) => {
            let id = required_id(sub, "id")?;
            let patch = BankAccountPatch {
                name: opt_string(sub, "name"),
                holder_id: sub.get_one::<Id>("holder").copied(),
                balance: opt_decimal(sub, "balance")?,
                kind: sub
                    .get_one::<String>("kind")
                    .map(|k| k.parse::<AccountKind>())
                    .transpose()?,
            };
            let updated = store.update_bank_account(id, &patch)?;
            println!("Updated account '{}' (id {})", updated.name, id);
        }
        Some(("rm", sub)) => {
            let id = required_id(sub, "id")?;
            store.delete_bank_account(id)?;
            println!("Removed account {}", id);
        }
        _ => {}
    }
    Ok(())
}
