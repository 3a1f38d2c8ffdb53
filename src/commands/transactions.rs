// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use clap::ArgMatches;
use rust_decimal::Decimal;
use serde::Serialize;

use super::cards::installment_label;
use super::{filters_from, opt_date, opt_decimal, opt_string, required, required_id};
use crate::config::Settings;
use crate::dashboard::Dashboard;
use crate::lifecycle::RecurringInstallmentPolicy;
use crate::models::{Id, NewTransaction, Transaction, TransactionPatch, TransactionStatus, TransactionType};
use crate::pagination::{Page, PageMarker, page_markers, paginate};
use crate::store::Store;
use crate::utils::{fmt_money, maybe_print_json, parse_date, parse_decimal, pretty_table};

pub fn handle(store: &Store<'_>, settings: &Settings, m: &ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(store, settings, sub)?,
        Some(("list", sub)) => list(store, settings, sub)?,
        Some(("update", sub)) => update(store, sub)?,
        Some(("rm", sub)) => {
            let id = required_id(sub, "id")?;
            store.delete_transaction(id)?;
            println!("Removed transaction {}", id);
        }
        Some(("pay", sub)) => pay(store, settings, sub)?,
        Some(("upcoming", sub)) => upcoming(store, settings, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(store: &Store<'_>, settings: &Settings, sub: &ArgMatches) -> Result<()> {
    let r#type: TransactionType = required(sub, "type")?.parse()?;
    let installments = sub.get_one::<u32>("installments").copied().unwrap_or(1);
    let current_installment = match sub.get_one::<u32>("current-installment") {
        Some(n) => Some(*n),
        None if installments > 1 => Some(1),
        None => None,
    };
    let draft = NewTransaction {
        r#type,
        amount: parse_decimal(required(sub, "amount")?)?,
        description: required(sub, "description")?.to_string(),
        category: required(sub, "category")?.to_string(),
        date: parse_date(required(sub, "date")?)?,
        account_id: required_id(sub, "account")?,
        member_id: sub.get_one::<Id>("member").copied(),
        installments,
        current_installment,
        status: required(sub, "status")?.parse()?,
        is_recurring: sub.get_flag("recurring"),
        is_paid: sub.get_flag("paid"),
    };
    let id = store.insert_transaction(&draft)?;
    println!(
        "Recorded {} {} on {} '{}' (id {})",
        draft.r#type,
        fmt_money(draft.amount, &settings.currency),
        draft.date,
        draft.description,
        id
    );
    Ok(())
}

fn update(store: &Store<'_>, sub: &ArgMatches) -> Result<()> {
    let id = required_id(sub, "id")?;
    let patch = TransactionPatch {
        amount: opt_decimal(sub, "amount")?,
        description: opt_string(sub, "description"),
        category: opt_string(sub, "category"),
        date: opt_date(sub, "date")?,
        account_id: sub.get_one::<Id>("account").copied(),
        member_id: sub.get_one::<Id>("member").copied().map(Some),
        status: sub
            .get_one::<String>("status")
            .map(|s| s.parse::<TransactionStatus>())
            .transpose()?,
        is_recurring: sub.get_one::<bool>("recurring").copied(),
        ..TransactionPatch::default()
    };
    if patch.is_empty() {
        println!("Nothing to update for transaction {}", id);
        return Ok(());
    }
    let updated = store.update_transaction(id, &patch)?;
    println!("Updated transaction {} '{}'", id, updated.description);
    Ok(())
}

#[derive(Debug, Clone, Serialize)]
pub struct TransactionRow {
    pub id: Id,
    pub date: String,
    pub r#type: TransactionType,
    pub description: String,
    pub category: String,
    pub member: String,
    pub account: String,
    pub installment: String,
    pub amount: Decimal,
    pub status: TransactionStatus,
    pub is_paid: bool,
}

fn to_row(dash: &Dashboard, t: &Transaction) -> TransactionRow {
    TransactionRow {
        id: t.id,
        date: t.date.to_string(),
        r#type: t.r#type,
        description: t.description.clone(),
        category: t.category.clone(),
        member: t
            .member_id
            .and_then(|m| dash.member_name(m))
            .unwrap_or("-")
            .to_string(),
        account: dash.account_label(t.account_id),
        installment: installment_label(t),
        amount: t.amount,
        status: t.status,
        is_paid: t.is_paid,
    }
}

/// The requested page of filtered transactions, sized by `page_size`.
pub fn list_page(
    store: &Store<'_>,
    settings: &Settings,
    sub: &ArgMatches,
) -> Result<Page<TransactionRow>> {
    let mut dash = Dashboard::load(store)?;
    dash.set_filters(filters_from(sub)?);
    let rows: Vec<TransactionRow> = dash
        .filtered_transactions()
        .iter()
        .map(|t| to_row(&dash, t))
        .collect();
    let page = sub.get_one::<usize>("page").copied().unwrap_or(1);
    Ok(paginate(&rows, page, settings.page_size))
}

fn signed_amount(row: &TransactionRow, ccy: &str) -> String {
    let sign = match row.r#type {
        TransactionType::Income => "+",
        TransactionType::Expense => "-",
    };
    format!("{}{}", sign, fmt_money(row.amount, ccy))
}

fn list(store: &Store<'_>, settings: &Settings, sub: &ArgMatches) -> Result<()> {
    let page = list_page(store, settings, sub)?;
    if sub.get_flag("jsonl") {
        maybe_print_json(false, true, &page.items)?;
        return Ok(());
    }
    if maybe_print_json(sub.get_flag("json"), false, &page)? {
        return Ok(());
    }
    if page.total_items == 0 {
        println!("Nenhum lançamento encontrado.");
        return Ok(());
    }
    let rows = page
        .items
        .iter()
        .map(|r| {
            vec![
                r.id.to_string(),
                r.date.clone(),
                r.member.clone(),
                r.description.clone(),
                r.category.clone(),
                r.account.clone(),
                r.installment.clone(),
                signed_amount(r, &settings.currency),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(
            &["ID", "Date", "Member", "Description", "Category", "Account", "Installment", "Amount"],
            rows,
        )
    );
    let pager: Vec<String> = page_markers(page.total_pages, page.page)
        .into_iter()
        .map(|m| match m {
            PageMarker::Page(p) if p == page.page => format!("[{}]", p),
            PageMarker::Page(p) => p.to_string(),
            PageMarker::Ellipsis => "...".to_string(),
        })
        .collect();
    println!(
        "Showing {} to {} of {}    {}",
        page.start_item,
        page.end_item,
        page.total_items,
        pager.join(" ")
    );
    Ok(())
}

fn pay(store: &Store<'_>, settings: &Settings, sub: &ArgMatches) -> Result<()> {
    let id = required_id(sub, "id")?;
    let policy = match sub.get_one::<String>("policy") {
        Some(p) => p.parse::<RecurringInstallmentPolicy>()?,
        None => settings.recurring_installments,
    };
    let mut dash = Dashboard::load(store)?;
    let outcome = dash.mark_expense_paid(store, id, policy)?;
    if outcome.already_paid {
        println!("Transaction {} was already paid", id);
        return Ok(());
    }
    println!(
        "Paid '{}' ({})",
        outcome.transaction.description,
        fmt_money(outcome.transaction.amount, &settings.currency)
    );
    for f in &outcome.generated {
        if let Some(next) = dash.snapshot().transactions.iter().find(|t| t.id == f.id) {
            println!(
                "Scheduled {:?} {} due {} ({})",
                f.kind,
                f.id,
                next.date,
                installment_label(next)
            );
        }
    }
    Ok(())
}

fn upcoming(store: &Store<'_>, settings: &Settings, sub: &ArgMatches) -> Result<()> {
    let dash = Dashboard::load(store)?;
    let due = dash.upcoming_expenses();
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &due)? {
        let rows = due
            .iter()
            .map(|t| {
                vec![
                    t.id.to_string(),
                    t.date.to_string(),
                    t.description.clone(),
                    t.category.clone(),
                    installment_label(t),
                    fmt_money(t.amount, &settings.currency),
                    if t.is_recurring { "yes" } else { "no" }.to_string(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["ID", "Due", "Description", "Category", "Installment", "Amount", "Recurring"],
                rows,
            )
        );
    }
    Ok(())
}
