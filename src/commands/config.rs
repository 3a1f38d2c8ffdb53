// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Result, bail};
use clap::ArgMatches;
use rusqlite::Connection;

use super::required;
use crate::config::{KNOWN_KEYS, Settings, set_setting};
use crate::utils::pretty_table;

pub fn handle(conn: &Connection, m: &ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("get", sub)) => {
            let key = required(sub, "key")?;
            if !KNOWN_KEYS.contains(&key) {
                bail!("Unknown setting '{}' (known: {})", key, KNOWN_KEYS.join(", "));
            }
            let settings = Settings::load(conn)?;
            if let Some((_, v)) = settings.entries().into_iter().find(|(k, _)| *k == key) {
                println!("{}", v);
            }
        }
        Some(("set", sub)) => {
            let key = required(sub, "key")?;
            let stored = set_setting(conn, key, required(sub, "value")?)?;
            println!("{} = {}", key, stored);
        }
        Some(("list", _)) => {
            let rows = Settings::load(conn)?
                .entries()
                .into_iter()
                .map(|(k, v)| vec![k.to_string(), v])
                .collect();
            println!("{}", pretty_table(&["Key", "Value"], rows));
        }
        _ => {}
    }
    Ok(())
}
