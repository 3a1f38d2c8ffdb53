// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Paying a pending expense: completion plus the next recurring bill or
//! installment, written in one store transaction.

use std::str::FromStr;

use chrono::{Months, NaiveDate};
use serde::Serialize;

use crate::error::{FinanceError, Result};
use crate::models::{Id, NewTransaction, Transaction, TransactionPatch, TransactionStatus};
use crate::store::Store;

/// What to generate when an expense is recurring and still has
/// installments left.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RecurringInstallmentPolicy {
    /// Only the next installment.
    #[default]
    Installment,
    /// Both the next installment and the next recurrence.
    Both,
    /// Refuse to mark the expense paid.
    Reject,
}

impl RecurringInstallmentPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecurringInstallmentPolicy::Installment => "installment",
            RecurringInstallmentPolicy::Both => "both",
            RecurringInstallmentPolicy::Reject => "reject",
        }
    }
}

impl FromStr for RecurringInstallmentPolicy {
    type Err = FinanceError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "installment" => Ok(RecurringInstallmentPolicy::Installment),
            "both" => Ok(RecurringInstallmentPolicy::Both),
            "reject" => Ok(RecurringInstallmentPolicy::Reject),
            other => Err(FinanceError::validation(
                "lifecycle.recurring_installments",
                format!("'{}' is not installment, both or reject", other),
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FollowUpKind {
    Recurrence,
    Installment,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PaidPlan {
    pub already_paid: bool,
    /// Recurring with installments left.
    pub ambiguous: bool,
    pub completion: TransactionPatch,
    pub follow_ups: Vec<(FollowUpKind, NewTransaction)>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FollowUp {
    pub kind: FollowUpKind,
    pub id: Id,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaidOutcome {
    pub transaction: Transaction,
    pub already_paid: bool,
    pub ambiguous: bool,
    pub generated: Vec<FollowUp>,
}

/// Same day next month, clamped to the last day of a shorter month.
pub fn next_month(date: NaiveDate) -> Result<NaiveDate> {
    date.checked_add_months(Months::new(1)).ok_or_else(|| {
        FinanceError::validation("date", format!("{} cannot be advanced a month", date))
    })
}

pub fn plan_mark_paid(tx: &Transaction, policy: RecurringInstallmentPolicy) -> Result<PaidPlan> {
    if !tx.is_expense() {
        return Err(FinanceError::NotAnExpense(tx.id));
    }
    if tx.is_paid {
        return Ok(PaidPlan {
            already_paid: true,
            ambiguous: false,
            completion: TransactionPatch::default(),
            follow_ups: Vec::new(),
        });
    }

    let completion = TransactionPatch {
        status: Some(TransactionStatus::Completed),
        is_paid: Some(true),
        ..TransactionPatch::default()
    };

    let current = tx.current_installment.unwrap_or(1);
    let has_next_installment = tx.installments > current;
    let ambiguous = tx.is_recurring && has_next_installment;
    let (recur, install) = if ambiguous {
        match policy {
            RecurringInstallmentPolicy::Installment => {
                tracing::warn!(
                    "transaction {} is recurring with installments left; generating the installment only",
                    tx.id
                );
                (false, true)
            }
            RecurringInstallmentPolicy::Both => {
                tracing::warn!(
                    "transaction {} is recurring with installments left; generating both follow-ups",
                    tx.id
                );
                (true, true)
            }
            RecurringInstallmentPolicy::Reject => {
                return Err(FinanceError::AmbiguousLifecycle(tx.id));
            }
        }
    } else {
        (tx.is_recurring, has_next_installment)
    };

    let mut follow_ups = Vec::new();
    if recur || install {
        let mut next = tx.to_draft();
        next.date = next_month(tx.date)?;
        next.status = TransactionStatus::Pending;
        next.is_paid = false;
        if recur {
            follow_ups.push((FollowUpKind::Recurrence, next.clone()));
        }
        if install {
            next.current_installment = Some(current + 1);
            follow_ups.push((FollowUpKind::Installment, next));
        }
    }

    Ok(PaidPlan {
        already_paid: false,
        ambiguous,
        completion,
        follow_ups,
    })
}

/// Marks expense `id` paid and inserts its follow-ups. Nothing is persisted
/// unless every write succeeds.
pub fn mark_expense_paid(
    store: &Store<'_>,
    id: Id,
    policy: RecurringInstallmentPolicy,
) -> Result<PaidOutcome> {
    store.atomically(|s| {
        let tx = s.get_transaction(id)?;
        let plan = plan_mark_paid(&tx, policy)?;
        if plan.already_paid {
            tracing::info!("transaction {} already paid; nothing to do", id);
            return Ok(PaidOutcome {
                transaction: tx,
                already_paid: true,
                ambiguous: false,
                generated: Vec::new(),
            });
        }

        let transaction = s.update_transaction(id, &plan.completion)?;
        let mut generated = Vec::with_capacity(plan.follow_ups.len());
        for (kind, draft) in &plan.follow_ups {
            let new_id = s.insert_transaction(draft)?;
            tracing::info!("transaction {} paid; {:?} {} due {}", id, kind, new_id, draft.date);
            generated.push(FollowUp {
                kind: *kind,
                id: new_id,
            });
        }
        Ok(PaidOutcome {
            transaction,
            already_paid: false,
            ambiguous: plan.ambiguous,
            generated,
        })
    })
}

/// Unpaid expenses, earliest due date first.
pub fn upcoming_expenses(all: &[Transaction]) -> Vec<Transaction> {
    let mut out: Vec<Transaction> = all
        .iter()
        .filter(|t| t.is_expense() && !t.is_paid)
        .cloned()
        .collect();
    out.sort_by(|a, b| a.date.cmp(&b.date));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{dec, day, expense, income};

    fn pending(mut t: Transaction) -> Transaction {
        t.status = TransactionStatus::Pending;
        t.is_paid = false;
        t
    }

    fn installment(n: u32, of: u32) -> Transaction {
        let mut t = pending(expense(7, "250", "Eletrônicos", day(2024, 3, 10)));
        t.installments = of;
        t.current_installment = Some(n);
        t
    }

    #[test]
    fn next_month_clamps_to_month_end() {
        assert_eq!(next_month(day(2024, 1, 5)).unwrap(), day(2024, 2, 5));
        assert_eq!(next_month(day(2024, 1, 31)).unwrap(), day(2024, 2, 29));
        assert_eq!(next_month(day(2023, 1, 31)).unwrap(), day(2023, 2, 28));
        assert_eq!(next_month(day(2024, 12, 15)).unwrap(), day(2025, 1, 15));
    }

    #[test]
    fn plain_expense_only_completes() {
        let t = pending(expense(1, "80", "Lazer", day(2024, 1, 5)));
        let plan = plan_mark_paid(&t, RecurringInstallmentPolicy::default()).unwrap();
        assert!(!plan.already_paid);
        assert_eq!(plan.completion.status, Some(TransactionStatus::Completed));
        assert_eq!(plan.completion.is_paid, Some(true));
        assert!(plan.follow_ups.is_empty());
    }

    #[test]
    fn recurring_expense_rolls_to_next_month() {
        let mut t = pending(expense(1, "120.00", "Academia", day(2024, 1, 5)));
        t.is_recurring = true;
        let plan = plan_mark_paid(&t, RecurringInstallmentPolicy::default()).unwrap();
        assert_eq!(plan.follow_ups.len(), 1);
        let (kind, next) = &plan.follow_ups[0];
        assert_eq!(*kind, FollowUpKind::Recurrence);
        assert_eq!(next.date, day(2024, 2, 5));
        assert_eq!(next.status, TransactionStatus::Pending);
        assert!(!next.is_paid);
        assert!(next.is_recurring);
        assert_eq!(next.amount, dec("120.00"));
        assert_eq!(next.category, "Academia");
    }

    #[test]
    fn installment_advances_counter() {
        let plan = plan_mark_paid(&installment(2, 4), RecurringInstallmentPolicy::default()).unwrap();
        assert_eq!(plan.follow_ups.len(), 1);
        let (kind, next) = &plan.follow_ups[0];
        assert_eq!(*kind, FollowUpKind::Installment);
        assert_eq!(next.current_installment, Some(3));
        assert_eq!(next.installments, 4);
        assert_eq!(next.date, day(2024, 4, 10));
    }

    #[test]
    fn last_installment_generates_nothing() {
        let plan = plan_mark_paid(&installment(4, 4), RecurringInstallmentPolicy::default()).unwrap();
        assert!(plan.follow_ups.is_empty());
    }

    #[test]
    fn missing_current_installment_counts_as_first() {
        let mut t = installment(1, 3);
        t.current_installment = None;
        let plan = plan_mark_paid(&t, RecurringInstallmentPolicy::default()).unwrap();
        assert_eq!(plan.follow_ups[0].1.current_installment, Some(2));
    }

    #[test]
    fn already_paid_is_a_no_op() {
        let mut t = installment(2, 4);
        t.is_recurring = true;
        t.is_paid = true;
        let plan = plan_mark_paid(&t, RecurringInstallmentPolicy::Both).unwrap();
        assert!(plan.already_paid);
        assert!(plan.follow_ups.is_empty());
        assert!(plan.completion.is_empty());
    }

    #[test]
    fn income_is_rejected() {
        let t = income(5, "1000", day(2024, 1, 1));
        assert!(matches!(
            plan_mark_paid(&t, RecurringInstallmentPolicy::default()),
            Err(FinanceError::NotAnExpense(5))
        ));
    }

    #[test]
    fn recurring_installment_follows_policy() {
        let mut t = installment(1, 2);
        t.is_recurring = true;

        let plan = plan_mark_paid(&t, RecurringInstallmentPolicy::Installment).unwrap();
        assert!(plan.ambiguous);
        let kinds: Vec<FollowUpKind> = plan.follow_ups.iter().map(|(k, _)| *k).collect();
        assert_eq!(kinds, vec![FollowUpKind::Installment]);

        let plan = plan_mark_paid(&t, RecurringInstallmentPolicy::Both).unwrap();
        let kinds: Vec<FollowUpKind> = plan.follow_ups.iter().map(|(k, _)| *k).collect();
        assert_eq!(kinds, vec![FollowUpKind::Recurrence, FollowUpKind::Installment]);
        // the recurrence copy keeps the original counter
        assert_eq!(plan.follow_ups[0].1.current_installment, Some(1));

        assert!(matches!(
            plan_mark_paid(&t, RecurringInstallmentPolicy::Reject),
            Err(FinanceError::AmbiguousLifecycle(7))
        ));
    }

    #[test]
    fn cancelled_but_unpaid_still_counts_as_pending() {
        let mut t = pending(expense(1, "80", "Lazer", day(2024, 1, 5)));
        t.status = TransactionStatus::Cancelled;
        t.is_recurring = true;
        let plan = plan_mark_paid(&t, RecurringInstallmentPolicy::default()).unwrap();
        assert_eq!(plan.follow_ups.len(), 1);
        assert_eq!(upcoming_expenses(&[t]).len(), 1);
    }

    #[test]
    fn upcoming_lists_unpaid_expenses_ascending() {
        let a = pending(expense(1, "10", "Lazer", day(2024, 2, 10)));
        let b = pending(expense(2, "10", "Lazer", day(2024, 1, 10)));
        let paid = expense(3, "10", "Lazer", day(2024, 1, 1));
        let mut inc = pending(income(4, "10", day(2024, 1, 2)));
        inc.is_paid = false;
        let out = upcoming_expenses(&[a, b, paid, inc]);
        let ids: Vec<Id> = out.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![2, 1]);
    }
}
