// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{NaiveDate, TimeZone, Utc};
use rust_decimal::Decimal;

use crate::models::{Id, Transaction, TransactionStatus, TransactionType};

pub fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

pub fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn tx(id: Id, ty: TransactionType, amount: &str, category: &str, date: NaiveDate) -> Transaction {
    let stamp = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
    Transaction {
        id,
        r#type: ty,
        amount: dec(amount),
        description: format!("{} #{}", category, id),
        category: category.to_string(),
        date,
        account_id: 1,
        member_id: None,
        installments: 1,
        current_installment: None,
        status: TransactionStatus::Completed,
        is_recurring: false,
        is_paid: true,
        created_at: stamp,
        updated_at: stamp,
    }
}

pub fn income(id: Id, amount: &str, date: NaiveDate) -> Transaction {
    tx(id, TransactionType::Income, amount, "Salário", date)
}

pub fn expense(id: Id, amount: &str, category: &str, date: NaiveDate) -> Transaction {
    tx(id, TransactionType::Expense, amount, category, date)
}
