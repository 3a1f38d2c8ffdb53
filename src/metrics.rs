// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Derived dashboard numbers. Money is summed as `Decimal` and never rounded
//! here; percentages are returned at full precision.

use chrono::{Duration, NaiveDate};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::Serialize;

use crate::filters::FilterState;
use crate::models::{BankAccount, CreditCard, Goal, Id, Transaction, TransactionType};

pub const GROWTH_WINDOW_DAYS: i64 = 30;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryTotal {
    pub category: String,
    pub amount: Decimal,
}

/// `part / whole * 100`, or 0 when `whole` is zero.
fn percent_of(part: Decimal, whole: Decimal) -> f64 {
    if whole.is_zero() {
        return 0.0;
    }
    part.checked_mul(Decimal::ONE_HUNDRED)
        .and_then(|p| p.checked_div(whole))
        .and_then(|p| p.to_f64())
        .unwrap_or(0.0)
}

fn completed_sum(txs: &[Transaction], ty: TransactionType) -> Decimal {
    txs.iter()
        .filter(|t| t.r#type == ty && t.is_completed())
        .map(|t| t.amount)
        .sum()
}

/// Bank balances minus open credit card bills. Not period scoped.
pub fn total_balance(accounts: &[BankAccount], cards: &[CreditCard]) -> Decimal {
    let balances: Decimal = accounts.iter().map(|a| a.balance).sum();
    let bills: Decimal = cards.iter().map(|c| c.current_bill).sum();
    balances - bills
}

pub fn income_for_period(txs: &[Transaction]) -> Decimal {
    completed_sum(txs, TransactionType::Income)
}

pub fn expenses_for_period(txs: &[Transaction]) -> Decimal {
    completed_sum(txs, TransactionType::Expense)
}

/// Completed expenses grouped by exact category label, largest first.
/// Equal amounts keep the order in which the category first appeared.
pub fn expenses_by_category(txs: &[Transaction]) -> Vec<CategoryTotal> {
    let mut totals: Vec<CategoryTotal> = Vec::new();
    for t in txs.iter().filter(|t| t.is_expense() && t.is_completed()) {
        match totals.iter_mut().find(|c| c.category == t.category) {
            Some(entry) => entry.amount += t.amount,
            None => totals.push(CategoryTotal {
                category: t.category.clone(),
                amount: t.amount,
            }),
        }
    }
    totals.sort_by(|a, b| b.amount.cmp(&a.amount));
    totals
}

/// Share of period income spent on `category`.
pub fn category_percentage(txs: &[Transaction], category: &str) -> f64 {
    let income = income_for_period(txs);
    if income.is_zero() {
        return 0.0;
    }
    let spent: Decimal = txs
        .iter()
        .filter(|t| t.is_expense() && t.is_completed() && t.category == category)
        .map(|t| t.amount)
        .sum();
    percent_of(spent, income)
}

pub fn savings_rate(txs: &[Transaction]) -> f64 {
    let income = income_for_period(txs);
    let expenses = expenses_for_period(txs);
    percent_of(income - expenses, income)
}

/// Change of the total balance over the last 30 days, as a percentage of
/// the balance before that window. Honours member, type and search filters
/// but not the selected date range.
pub fn balance_growth_percent(
    all: &[Transaction],
    filters: &FilterState,
    total_balance: Decimal,
    today: NaiveDate,
) -> f64 {
    let since = today - Duration::days(GROWTH_WINDOW_DAYS);
    let net: Decimal = all
        .iter()
        .filter(|t| t.is_completed() && t.date >= since && filters.matches_ignoring_dates(t))
        .map(|t| if t.is_income() { t.amount } else { -t.amount })
        .sum();
    let previous = total_balance - net;
    if previous.is_zero() {
        return if net.is_zero() { 0.0 } else { 100.0 };
    }
    percent_of(net, previous.abs())
}

pub fn card_usage_percent(card: &CreditCard) -> f64 {
    percent_of(card.current_bill, card.limit).min(100.0)
}

pub fn card_available_limit(card: &CreditCard) -> Decimal {
    (card.limit - card.current_bill).max(Decimal::ZERO)
}

/// Expenses charged to `card_id`, most recent first.
pub fn card_statement(all: &[Transaction], card_id: Id) -> Vec<Transaction> {
    let mut out: Vec<Transaction> = all
        .iter()
        .filter(|t| t.is_expense() && t.account_id == card_id)
        .cloned()
        .collect();
    out.sort_by(|a, b| b.date.cmp(&a.date));
    out
}

pub fn goal_progress_percent(goal: &Goal) -> f64 {
    percent_of(goal.current_amount, goal.target_amount).min(100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::TypeFilter;
    use crate::fixtures::{dec, day, expense, income};
    use crate::models::{AccountKind, CardTheme, TransactionStatus};
    use chrono::Utc;

    fn scenario() -> Vec<Transaction> {
        let mut lazer = expense(3, "200", "Lazer", day(2024, 1, 12));
        lazer.status = TransactionStatus::Pending;
        lazer.is_paid = false;
        vec![
            income(1, "1000", day(2024, 1, 5)),
            expense(2, "300", "Mercado", day(2024, 1, 10)),
            lazer,
        ]
    }

    fn card(limit: &str, bill: &str) -> CreditCard {
        CreditCard {
            id: 9,
            name: "Nubank".into(),
            holder_id: 1,
            closing_day: 10,
            due_day: 15,
            limit: dec(limit),
            current_bill: dec(bill),
            theme: CardTheme::Lime,
            last_digits: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn account(balance: &str) -> BankAccount {
        BankAccount {
            id: 1,
            name: "Nubank Conta".into(),
            holder_id: 1,
            balance: dec(balance),
            kind: AccountKind::Checking,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn period_sums_skip_pending() {
        let txs = scenario();
        assert_eq!(income_for_period(&txs), dec("1000"));
        assert_eq!(expenses_for_period(&txs), dec("300"));
        assert_eq!(category_percentage(&txs, "Mercado"), 30.0);
        assert_eq!(category_percentage(&txs, "Lazer"), 0.0);
        assert_eq!(savings_rate(&txs), 70.0);
    }

    #[test]
    fn zero_income_yields_zero_not_nan() {
        let txs = vec![expense(1, "50", "Lazer", day(2024, 1, 1))];
        let pct = category_percentage(&txs, "Lazer");
        let rate = savings_rate(&txs);
        assert_eq!(pct, 0.0);
        assert_eq!(rate, 0.0);
        assert!(!pct.is_nan() && !rate.is_nan());
        assert_eq!(savings_rate(&[]), 0.0);
    }

    #[test]
    fn negative_savings_when_overspending() {
        let txs = vec![
            income(1, "1000", day(2024, 1, 1)),
            expense(2, "1500", "Aluguel", day(2024, 1, 2)),
        ];
        assert_eq!(savings_rate(&txs), -50.0);
    }

    #[test]
    fn category_totals_sorted_and_sum_to_expenses() {
        let txs = vec![
            expense(1, "0.10", "Mercado", day(2024, 1, 1)),
            expense(2, "0.20", "Lazer", day(2024, 1, 2)),
            expense(3, "0.10", "Mercado", day(2024, 1, 3)),
            expense(4, "99.99", "Aluguel", day(2024, 1, 4)),
            expense(5, "0.20", "mercado", day(2024, 1, 5)),
            income(6, "10", day(2024, 1, 6)),
        ];
        let totals = expenses_by_category(&txs);
        let labels: Vec<&str> = totals.iter().map(|c| c.category.as_str()).collect();
        // exact label grouping: "mercado" is its own bucket; ties keep first appearance
        assert_eq!(labels, vec!["Aluguel", "Mercado", "Lazer", "mercado"]);
        assert_eq!(totals[1].amount, dec("0.20"));
        let sum: Decimal = totals.iter().map(|c| c.amount).sum();
        assert_eq!(sum, expenses_for_period(&txs));
        assert_eq!(sum, dec("100.59"));
    }

    #[test]
    fn decimal_sums_do_not_drift() {
        let txs: Vec<Transaction> = (0..10)
            .map(|i| expense(i, "0.10", "Mercado", day(2024, 1, 1)))
            .collect();
        assert_eq!(expenses_for_period(&txs), dec("1.00"));
    }

    #[test]
    fn total_balance_subtracts_bills() {
        let accounts = vec![account("15000"), account("7000")];
        let cards = vec![card("5000", "1200"), card("8000", "2300"), card("3000", "500")];
        assert_eq!(total_balance(&accounts, &cards), dec("18000"));
        assert_eq!(total_balance(&[], &cards), dec("-4000"));
    }

    #[test]
    fn card_usage_and_available() {
        let c = card("5000", "1200");
        assert_eq!(card_usage_percent(&c), 24.0);
        assert_eq!(card_available_limit(&c), dec("3800"));

        let over = card("1000", "1500");
        assert_eq!(card_usage_percent(&over), 100.0);
        assert_eq!(card_available_limit(&over), Decimal::ZERO);
    }

    #[test]
    fn card_statement_keeps_card_expenses() {
        let mut a = expense(1, "10", "Lazer", day(2024, 1, 1));
        a.account_id = 9;
        let mut b = expense(2, "20", "Lazer", day(2024, 1, 3));
        b.account_id = 9;
        let mut inc = income(3, "5", day(2024, 1, 4));
        inc.account_id = 9;
        let other = expense(4, "30", "Lazer", day(2024, 1, 2));
        let out = card_statement(&[a, b, inc, other], 9);
        let ids: Vec<Id> = out.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![2, 1]);
    }

    #[test]
    fn growth_over_last_thirty_days() {
        let today = day(2024, 3, 31);
        let txs = vec![
            income(1, "1000", day(2024, 3, 15)),
            expense(2, "500", "Mercado", day(2024, 3, 20)),
            // outside the window
            income(3, "9999", day(2024, 2, 1)),
        ];
        // previous = 1500 - 500 = 1000; growth = 500 / 1000
        let g = balance_growth_percent(&txs, &FilterState::default(), dec("1500"), today);
        assert_eq!(g, 50.0);

        let mut f = FilterState::default();
        f.set_transaction_type(TypeFilter::Expense);
        // net = -500; previous = 1500 + 500 = 2000
        assert_eq!(balance_growth_percent(&txs, &f, dec("1500"), today), -25.0);
    }

    #[test]
    fn growth_edge_cases() {
        let today = day(2024, 3, 31);
        let txs = vec![income(1, "500", day(2024, 3, 30))];
        assert_eq!(
            balance_growth_percent(&txs, &FilterState::default(), dec("500"), today),
            100.0
        );
        assert_eq!(
            balance_growth_percent(&[], &FilterState::default(), Decimal::ZERO, today),
            0.0
        );
    }

    #[test]
    fn growth_ignores_selected_date_range() {
        let today = day(2024, 3, 31);
        let txs = vec![income(1, "100", day(2024, 3, 30))];
        let mut f = FilterState::default();
        f.set_date_range(Some(day(2020, 1, 1)), Some(day(2020, 1, 2)));
        assert_eq!(balance_growth_percent(&txs, &f, dec("200"), today), 100.0);
    }

    #[test]
    fn goal_progress_caps_at_hundred() {
        let mut g = Goal {
            id: 1,
            title: "Viagem para Europa".into(),
            description: None,
            target_amount: dec("30000"),
            current_amount: dec("15000"),
            deadline: day(2025, 6, 1),
            category: Some("Lazer".into()),
            member_id: None,
            is_completed: false,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        assert_eq!(goal_progress_percent(&g), 50.0);
        g.current_amount = dec("45000");
        assert_eq!(goal_progress_percent(&g), 100.0);
        g.target_amount = Decimal::ZERO;
        assert_eq!(goal_progress_percent(&g), 0.0);
    }
}
