// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use clap::ArgMatches;
use mycash::commands::{self, reports, transactions};
use mycash::config::Settings;
use mycash::db;
use mycash::filters::TypeFilter;
use mycash::models::{NewTransaction, TransactionStatus, TransactionType};
use mycash::store::Store;
use mycash::cli;
use rust_decimal::Decimal;

fn leaf(args: &[&str]) -> ArgMatches {
    let mut m = cli::build_cli().get_matches_from(args);
    loop {
        let next = match m.subcommand() {
            Some((_, sub)) => sub.clone(),
            None => return m,
        };
        m = next;
    }
}

fn seed(store: &Store<'_>, n: u32) {
    for i in 1..=n {
        let expense = i % 2 == 0;
        store
            .insert_transaction(&NewTransaction {
                r#type: if expense {
                    TransactionType::Expense
                } else {
                    TransactionType::Income
                },
                amount: Decimal::from(i * 10),
                description: format!("Lançamento {}", i),
                category: if expense { "Mercado" } else { "Freelance" }.to_string(),
                date: NaiveDate::from_ymd_opt(2024, 3, i).unwrap(),
                account_id: 1,
                member_id: if i <= 3 { Some(7) } else { None },
                installments: 1,
                current_installment: None,
                status: TransactionStatus::Completed,
                is_recurring: false,
                is_paid: true,
            })
            .unwrap();
    }
}

#[test]
fn filter_flags_build_filter_state() {
    let m = leaf(&[
        "mycash", "tx", "list", "--member", "7", "--from", "2024-03-01", "--to", "2024-03-31",
        "--type", "expense", "--search", "merc",
    ]);
    let f = commands::filters_from(&m).unwrap();
    assert_eq!(f.selected_member, Some(7));
    assert_eq!(f.date_range.start, NaiveDate::from_ymd_opt(2024, 3, 1));
    assert_eq!(f.date_range.end, NaiveDate::from_ymd_opt(2024, 3, 31));
    assert_eq!(f.transaction_type, TypeFilter::Expense);
    assert_eq!(f.search_text, "merc");
}

#[test]
fn bad_dates_are_reported() {
    let m = leaf(&["mycash", "report", "summary", "--from", "03/01/2024"]);
    assert!(commands::filters_from(&m).is_err());
}

#[test]
fn tx_list_pages_filtered_rows() {
    let conn = db::open_in_memory().unwrap();
    let store = Store::new(&conn, "u1");
    seed(&store, 12);
    let settings = Settings::default();

    let m = leaf(&["mycash", "tx", "list", "--page", "3"]);
    let page = transactions::list_page(&store, &settings, &m).unwrap();
    assert_eq!(page.total_items, 12);
    assert_eq!(page.total_pages, 3);
    assert_eq!(page.items.len(), 2);
    // most recent first, so the last page holds the oldest
    assert_eq!(page.items[0].date, "2024-03-02");
    assert_eq!(page.items[1].date, "2024-03-01");

    let m = leaf(&["mycash", "tx", "list", "--type", "expense", "--member", "7"]);
    let page = transactions::list_page(&store, &settings, &m).unwrap();
    assert_eq!(page.total_items, 1);
    assert_eq!(page.items[0].description, "Lançamento 2");
}

#[test]
fn report_summary_and_categories() {
    let conn = db::open_in_memory().unwrap();
    let store = Store::new(&conn, "u1");
    seed(&store, 4);
    // income 10 + 30, expenses 20 + 40
    let today = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();

    let m = leaf(&["mycash", "report", "summary"]);
    let s = reports::summary_for(&store, &m, today).unwrap();
    assert_eq!(s.income, Decimal::from(40));
    assert_eq!(s.expenses, Decimal::from(60));
    assert_eq!(s.savings_rate, -50.0);

    let m = leaf(&["mycash", "report", "categories", "--to", "2024-03-02"]);
    let shares = reports::category_shares(&store, &m).unwrap();
    assert_eq!(shares.len(), 1);
    assert_eq!(shares[0].category, "Mercado");
    assert_eq!(shares[0].amount, Decimal::from(20));
    assert_eq!(shares[0].percent, 200.0);
}

#[test]
fn pay_accepts_a_policy_override() {
    let m = leaf(&["mycash", "tx", "pay", "42", "--policy", "both"]);
    assert_eq!(m.get_one::<i64>("id").copied(), Some(42));
    assert_eq!(m.get_one::<String>("policy").map(String::as_str), Some("both"));

    let rejected = cli::build_cli().try_get_matches_from(["mycash", "tx", "pay", "42", "--policy", "never"]);
    assert!(rejected.is_err());
}
