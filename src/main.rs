// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use mycash::config::Settings;
use mycash::store::Store;
use mycash::{cli, commands, db};

fn init_logging() {
    let filter = EnvFilter::try_from_env("MYCASH_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    init_logging();
    let cli = cli::build_cli();
    let matches = cli.get_matches();

    let conn = db::open_or_init()?;
    let settings = Settings::load(&conn)?;
    let store = Store::new(&conn, settings.user.as_str());

    match matches.subcommand() {
        Some(("init", _)) => {
            let seeded = store.seed_default_categories()?;
            println!(
                "Database initialized at {} ({} categories added)",
                db::db_path()?.display(),
                seeded
            );
        }
        Some(("member", sub)) => commands::members::handle(&store, &settings, sub)?,
        Some(("account", sub)) => commands::accounts::handle(&store, &settings, sub)?,
        Some(("card", sub)) => commands::cards::handle(&store, &settings, sub)?,
        Some(("goal", sub)) => commands::goals::handle(&store, &settings, sub)?,
        Some(("category", sub)) => commands::categories::handle(&store, sub)?,
        Some(("tx", sub)) => commands::transactions::handle(&store, &settings, sub)?,
        Some(("report", sub)) => commands::reports::handle(&store, &settings, sub)?,
        Some(("config", sub)) => commands::config::handle(&conn, sub)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
