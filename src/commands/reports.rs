// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use chrono::{NaiveDate, Utc};
use clap::ArgMatches;
use rust_decimal::Decimal;
use serde::Serialize;

use super::filters_from;
use crate::config::Settings;
use crate::dashboard::{Dashboard, Summary};
use crate::store::Store;
use crate::utils::{fmt_money, fmt_percent, maybe_print_json, pretty_table};

pub fn handle(store: &Store<'_>, settings: &Settings, m: &ArgMatches) -> Result<()> {
    let today = Utc::now().date_naive();
    match m.subcommand() {
        Some(("summary", sub)) => summary(store, settings, sub, today)?,
        Some(("categories", sub)) => categories(store, settings, sub)?,
        _ => {}
    }
    Ok(())
}

fn filtered_dashboard(store: &Store<'_>, sub: &ArgMatches) -> Result<Dashboard> {
    let mut dash = Dashboard::load(store)?;
    dash.set_filters(filters_from(sub)?);
    Ok(dash)
}

pub fn summary_for(store: &Store<'_>, sub: &ArgMatches, today: NaiveDate) -> Result<Summary> {
    Ok(filtered_dashboard(store, sub)?.summary(today))
}

fn summary(store: &Store<'_>, settings: &Settings, sub: &ArgMatches, today: NaiveDate) -> Result<()> {
    let s = summary_for(store, sub, today)?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &s)? {
        return Ok(());
    }
    let ccy = &settings.currency;
    let rows = vec![
        vec!["Total balance".to_string(), fmt_money(s.total_balance, ccy)],
        vec!["Growth (30 days)".to_string(), fmt_percent(s.growth_percent)],
        vec!["Income".to_string(), fmt_money(s.income, ccy)],
        vec!["Expenses".to_string(), fmt_money(s.expenses, ccy)],
        vec!["Savings rate".to_string(), fmt_percent(s.savings_rate)],
    ];
    println!("{}", pretty_table(&["Metric", "Value"], rows));
    Ok(())
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryShare {
    pub category: String,
    pub amount: Decimal,
    pub percent: f64,
}

pub fn category_shares(store: &Store<'_>, sub: &ArgMatches) -> Result<Vec<CategoryShare>> {
    let dash = filtered_dashboard(store, sub)?;
    let filtered = dash.filtered_transactions();
    Ok(dash
        .expenses_by_category()
        .into_iter()
        .map(|c| CategoryShare {
            percent: crate::metrics::category_percentage(&filtered, &c.category),
            category: c.category,
            amount: c.amount,
        })
        .collect())
}

fn categories(store: &Store<'_>, settings: &Settings, sub: &ArgMatches) -> Result<()> {
    let data = category_shares(store, sub)?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let rows = data
            .iter()
            .map(|c| {
                vec![
                    c.category.clone(),
                    fmt_money(c.amount, &settings.currency),
                    fmt_percent(c.percent),
                ]
            })
            .collect();
        println!("{}", pretty_table(&["Category", "Spent", "Share"], rows));
    }
    Ok(())
}
