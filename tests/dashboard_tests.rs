// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use mycash::dashboard::Dashboard;
use mycash::db;
use mycash::filters::TypeFilter;
use mycash::lifecycle::RecurringInstallmentPolicy;
use mycash::models::{
    AccountKind, CardTheme, NewBankAccount, NewCreditCard, NewFamilyMember, NewTransaction,
    TransactionStatus, TransactionType,
};
use mycash::store::Store;
use rusqlite::Connection;
use rust_decimal::Decimal;

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn tx(ty: TransactionType, amount: &str, category: &str, date: NaiveDate) -> NewTransaction {
    NewTransaction {
        r#type: ty,
        amount: dec(amount),
        description: format!("{} do mês", category),
        category: category.to_string(),
        date,
        account_id: 1,
        member_id: None,
        installments: 1,
        current_installment: None,
        status: TransactionStatus::Completed,
        is_recurring: false,
        is_paid: true,
    }
}

// income 1000, completed Mercado 300, pending Lazer 200
fn seed(store: &Store<'_>) -> i64 {
    store
        .insert_transaction(&tx(TransactionType::Income, "1000", "Salário", day(2024, 1, 5)))
        .unwrap();
    store
        .insert_transaction(&tx(TransactionType::Expense, "300", "Mercado", day(2024, 1, 10)))
        .unwrap();
    let mut lazer = tx(TransactionType::Expense, "200", "Lazer", day(2024, 1, 12));
    lazer.status = TransactionStatus::Pending;
    lazer.is_paid = false;
    store.insert_transaction(&lazer).unwrap()
}

#[test]
fn metrics_over_the_stored_snapshot() {
    let conn = db::open_in_memory().unwrap();
    let store = Store::new(&conn, "u1");
    seed(&store);

    let dash = Dashboard::load(&store).unwrap();
    assert_eq!(dash.income_for_period(), dec("1000"));
    assert_eq!(dash.expenses_for_period(), dec("300"));
    assert_eq!(dash.category_percentage("Mercado"), 30.0);
    assert_eq!(dash.savings_rate(), 70.0);

    let by_cat = dash.expenses_by_category();
    let sum: Decimal = by_cat.iter().map(|c| c.amount).sum();
    assert_eq!(sum, dash.expenses_for_period());
}

#[test]
fn filters_narrow_every_metric() {
    let conn = db::open_in_memory().unwrap();
    let store = Store::new(&conn, "u1");
    seed(&store);

    let mut dash = Dashboard::load(&store).unwrap();
    dash.set_transaction_type(TypeFilter::Expense);
    assert_eq!(dash.filtered_transactions().len(), 2);
    assert_eq!(dash.income_for_period(), Decimal::ZERO);
    assert_eq!(dash.savings_rate(), 0.0);
    assert_eq!(dash.category_percentage("Mercado"), 0.0);

    dash.set_transaction_type(TypeFilter::All);
    dash.set_search_text("LAZER");
    let only = dash.filtered_transactions();
    assert_eq!(only.len(), 1);
    assert_eq!(only[0].category, "Lazer");

    dash.set_search_text("");
    dash.set_date_range(Some(day(2024, 1, 6)), Some(day(2024, 1, 11)));
    assert_eq!(dash.expenses_for_period(), dec("300"));
    assert_eq!(dash.income_for_period(), Decimal::ZERO);
}

#[test]
fn total_balance_nets_card_bills() {
    let conn = db::open_in_memory().unwrap();
    let store = Store::new(&conn, "u1");
    let holder = store
        .insert_member(&NewFamilyMember {
            name: "Ana Marte".to_string(),
            role: "Mãe".to_string(),
            avatar_url: None,
            email: None,
            monthly_income: None,
        })
        .unwrap();
    store
        .insert_bank_account(&NewBankAccount {
            name: "Conta Itaú".to_string(),
            holder_id: holder,
            balance: dec("5000"),
            kind: AccountKind::Checking,
        })
        .unwrap();
    store
        .insert_bank_account(&NewBankAccount {
            name: "Poupança".to_string(),
            holder_id: holder,
            balance: dec("1500.25"),
            kind: AccountKind::Savings,
        })
        .unwrap();
    store
        .insert_credit_card(&NewCreditCard {
            name: "Inter Black".to_string(),
            holder_id: holder,
            closing_day: 5,
            due_day: 12,
            limit: dec("8000"),
            current_bill: dec("1200.25"),
            theme: CardTheme::Lime,
            last_digits: None,
        })
        .unwrap();

    let dash = Dashboard::load(&store).unwrap();
    assert_eq!(dash.total_balance(), dec("5300"));
}

#[test]
fn paying_refreshes_the_snapshot() {
    let conn = db::open_in_memory().unwrap();
    let store = Store::new(&conn, "u1");
    let lazer = seed(&store);

    let mut dash = Dashboard::load(&store).unwrap();
    assert_eq!(dash.upcoming_expenses().len(), 1);

    let out = dash
        .mark_expense_paid(&store, lazer, RecurringInstallmentPolicy::default())
        .unwrap();
    assert!(out.generated.is_empty());
    assert!(dash.upcoming_expenses().is_empty());
    assert_eq!(dash.expenses_for_period(), dec("500"));
    assert_eq!(dash.savings_rate(), 50.0);
}

#[test]
fn account_labels() {
    let conn = db::open_in_memory().unwrap();
    let store = Store::new(&conn, "u1");
    let card = store
        .insert_credit_card(&NewCreditCard {
            name: "Nubank".to_string(),
            holder_id: 1,
            closing_day: 1,
            due_day: 8,
            limit: dec("1000"),
            current_bill: Decimal::ZERO,
            theme: CardTheme::White,
            last_digits: Some("1234".to_string()),
        })
        .unwrap();
    let dash = Dashboard::load(&store).unwrap();
    assert_eq!(dash.account_label(card), "Crédito Nubank **** 1234");
    assert_eq!(dash.account_label(999), "Desconhecido");
}
