// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use clap::ArgMatches;
use rust_decimal::Decimal;
use serde::Serialize;

use super::{opt_decimal, opt_string, required, required_id};
use crate::config::Settings;
use crate::dashboard::Dashboard;
use crate::metrics::{card_available_limit, card_statement, card_usage_percent};
use crate::models::{CardTheme, CreditCard, CreditCardPatch, Id, NewCreditCard, Transaction};
use crate::store::Store;
use crate::utils::{fmt_money, fmt_percent, maybe_print_json, parse_decimal, pretty_table};

pub fn handle(store: &Store<'_>, settings: &Settings, m: &ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(store, sub)?,
        Some(("list", sub)) => list(store, settings, sub)?,
        Some(("show", sub)) => show(store, settings, sub)?,
        Some(("update", sub)) => {
            let id = required_id(sub, "id")?;
            let patch = CreditCardPatch {
                name: opt_string(sub, "name"),
                holder_id: sub.get_one::<Id>("holder").copied(),
                closing_day: sub.get_one::<u32>("closing-day").copied(),
                due_day: sub.get_one::<u32>("due-day").copied(),
                limit: opt_decimal(sub, "limit")?,
                current_bill: opt_decimal(sub, "bill")?,
                theme: sub
                    .get_one::<String>("theme")
                    .map(|t| t.parse::<CardTheme>())
                    .transpose()?,
                last_digits: opt_string(sub, "digits").map(Some),
            };
            let updated = store.update_credit_card(id, &patch)?;
            println!("Updated card '{}' (id {})", updated.name, id);
        }
        Some(("rm", sub)) => {
            let id = required_id(sub, "id")?;
            store.delete_credit_card(id)?;
            println!("Removed card {}", id);
        }
        _ => {}
    }
    Ok(())
}

fn add(store: &Store<'_>, sub: &ArgMatches) -> Result<()> {
    let draft = NewCreditCard {
        name: required(sub, "name")?.to_string(),
        holder_id: required_id(sub, "holder")?,
        closing_day: sub.get_one::<u32>("closing-day").copied().unwrap_or_default(),
        due_day: sub.get_one::<u32>("due-day").copied().unwrap_or_default(),
        limit: parse_decimal(required(sub, "limit")?)?,
        current_bill: parse_decimal(required(sub, "bill")?)?,
        theme: required(sub, "theme")?.parse()?,
        last_digits: opt_string(sub, "digits"),
    };
    let id = store.insert_credit_card(&draft)?;
    println!("Added card '{}' (id {})", draft.name, id);
    Ok(())
}

fn list(store: &Store<'_>, settings: &Settings, sub: &ArgMatches) -> Result<()> {
    let cards = store.list_credit_cards()?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &cards)? {
        let rows = cards
            .iter()
            .map(|c| {
                vec![
                    c.id.to_string(),
                    c.name.clone(),
                    c.last_digits.clone().unwrap_or_default(),
                    format!("{}/{}", c.closing_day, c.due_day),
                    fmt_money(c.current_bill, &settings.currency),
                    fmt_money(c.limit, &settings.currency),
                    fmt_percent(card_usage_percent(c)),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["ID", "Name", "Digits", "Closes/Due", "Bill", "Limit", "Usage"],
                rows
            )
        );
    }
    Ok(())
}

#[derive(Serialize)]
struct CardReport {
    card: CreditCard,
    usage_percent: f64,
    available_limit: Decimal,
    statement: Vec<Transaction>,
}

fn show(store: &Store<'_>, settings: &Settings, sub: &ArgMatches) -> Result<()> {
    let id = required_id(sub, "id")?;
    let card = store.get_credit_card(id)?;
    let dash = Dashboard::load(store)?;
    let report = CardReport {
        usage_percent: card_usage_percent(&card),
        available_limit: card_available_limit(&card),
        statement: card_statement(&dash.snapshot().transactions, card.id),
        card,
    };
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &report)? {
        return Ok(());
    }
    let ccy = &settings.currency;
    println!("{}", dash.account_label(report.card.id));
    println!(
        "Bill {} of {} ({} used), {} available",
        fmt_money(report.card.current_bill, ccy),
        fmt_money(report.card.limit, ccy),
        fmt_percent(report.usage_percent),
        fmt_money(report.available_limit, ccy)
    );
    println!(
        "Closes on day {}, due on day {}",
        report.card.closing_day, report.card.due_day
    );
    let rows = report
        .statement
        .iter()
        .map(|t| {
            vec![
                t.date.to_string(),
                t.description.clone(),
                t.category.clone(),
                fmt_money(t.amount, ccy),
                installment_label(t),
                if t.is_paid { "paid" } else { "open" }.to_string(),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(
            &["Date", "Description", "Category", "Amount", "Installment", "State"],
            rows
        )
    );
    Ok(())
}

pub(crate) fn installment_label(t: &Transaction) -> String {
    match t.current_installment {
        Some(n) if t.installments > 1 => format!("{}/{}", n, t.installments),
        _ => "-".to_string(),
    }
}
