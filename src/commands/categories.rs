// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use clap::ArgMatches;

use super::required;
use crate::models::CategoryType;
use crate::store::Store;
use crate::utils::{maybe_print_json, pretty_table};

pub fn handle(store: &Store<'_>, m: &ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let name = required(sub, "name")?;
            let ty: CategoryType = required(sub, "type")?.parse()?;
            let id = store.ensure_category(name, ty)?;
            println!("Category '{}' ready (id {})", name.trim(), id);
        }
        Some(("list", sub)) => {
            let cats = store.list_categories()?;
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &cats)? {
                let rows = cats
                    .iter()
                    .map(|c| vec![c.name.clone(), c.r#type.as_str().to_string()])
                    .collect();
                println!("{}", pretty_table(&["Name", "Type"], rows));
            }
        }
        _ => {}
    }
    Ok(())
}
