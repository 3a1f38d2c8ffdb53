// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Application state: the last snapshot read from the store plus the active
//! filters. Derived numbers are recomputed from the snapshot on demand and
//! the snapshot is re-read after every write.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::error::Result;
use crate::filters::{FilterState, TypeFilter, filter_transactions};
use crate::lifecycle::{self, PaidOutcome, RecurringInstallmentPolicy};
use crate::metrics::{self, CategoryTotal};
use crate::models::{BankAccount, CreditCard, FamilyMember, Goal, Id, Transaction};
use crate::store::Store;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Snapshot {
    pub transactions: Vec<Transaction>,
    pub goals: Vec<Goal>,
    pub credit_cards: Vec<CreditCard>,
    pub bank_accounts: Vec<BankAccount>,
    pub family_members: Vec<FamilyMember>,
}

impl Snapshot {
    pub fn fetch(store: &Store<'_>) -> Result<Snapshot> {
        Ok(Snapshot {
            transactions: store.list_transactions()?,
            goals: store.list_goals()?,
            credit_cards: store.list_credit_cards()?,
            bank_accounts: store.list_bank_accounts()?,
            family_members: store.list_members()?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub total_balance: Decimal,
    pub income: Decimal,
    pub expenses: Decimal,
    pub savings_rate: f64,
    pub growth_percent: f64,
}

#[derive(Debug, Clone, Default)]
pub struct Dashboard {
    snapshot: Snapshot,
    filters: FilterState,
}

impl Dashboard {
    pub fn new(snapshot: Snapshot) -> Self {
        Dashboard {
            snapshot,
            filters: FilterState::default(),
        }
    }

    pub fn load(store: &Store<'_>) -> Result<Self> {
        Ok(Dashboard::new(Snapshot::fetch(store)?))
    }

    /// Replaces the snapshot with a fresh read. Filters are kept.
    pub fn refresh(&mut self, store: &Store<'_>) -> Result<()> {
        self.snapshot = Snapshot::fetch(store)?;
        Ok(())
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn set_filters(&mut self, filters: FilterState) {
        self.filters = filters;
    }

    pub fn set_selected_member(&mut self, member: Option<Id>) {
        self.filters.set_selected_member(member);
    }

    pub fn set_date_range(&mut self, start: Option<NaiveDate>, end: Option<NaiveDate>) {
        self.filters.set_date_range(start, end);
    }

    pub fn set_transaction_type(&mut self, t: TypeFilter) {
        self.filters.set_transaction_type(t);
    }

    pub fn set_search_text(&mut self, text: impl Into<String>) {
        self.filters.set_search_text(text);
    }

    pub fn filtered_transactions(&self) -> Vec<Transaction> {
        filter_transactions(&self.snapshot.transactions, &self.filters)
    }

    pub fn total_balance(&self) -> Decimal {
        metrics::total_balance(&self.snapshot.bank_accounts, &self.snapshot.credit_cards)
    }

    pub fn income_for_period(&self) -> Decimal {
        metrics::income_for_period(&self.filtered_transactions())
    }

    pub fn expenses_for_period(&self) -> Decimal {
        metrics::expenses_for_period(&self.filtered_transactions())
    }

    pub fn expenses_by_category(&self) -> Vec<CategoryTotal> {
        metrics::expenses_by_category(&self.filtered_transactions())
    }

    pub fn category_percentage(&self, category: &str) -> f64 {
        metrics::category_percentage(&self.filtered_transactions(), category)
    }

    pub fn savings_rate(&self) -> f64 {
        metrics::savings_rate(&self.filtered_transactions())
    }

    pub fn balance_growth_percent(&self, today: NaiveDate) -> f64 {
        metrics::balance_growth_percent(
            &self.snapshot.transactions,
            &self.filters,
            self.total_balance(),
            today,
        )
    }

    pub fn summary(&self, today: NaiveDate) -> Summary {
        let filtered = self.filtered_transactions();
        Summary {
            total_balance: self.total_balance(),
            income: metrics::income_for_period(&filtered),
            expenses: metrics::expenses_for_period(&filtered),
            savings_rate: metrics::savings_rate(&filtered),
            growth_percent: self.balance_growth_percent(today),
        }
    }

    pub fn upcoming_expenses(&self) -> Vec<Transaction> {
        lifecycle::upcoming_expenses(&self.snapshot.transactions)
    }

    /// Pays expense `id` through the store, then re-reads the snapshot.
    pub fn mark_expense_paid(
        &mut self,
        store: &Store<'_>,
        id: Id,
        policy: RecurringInstallmentPolicy,
    ) -> Result<PaidOutcome> {
        let outcome = lifecycle::mark_expense_paid(store, id, policy)?;
        self.refresh(store)?;
        Ok(outcome)
    }

    pub fn member_name(&self, id: Id) -> Option<&str> {
        self.snapshot
            .family_members
            .iter()
            .find(|m| m.id == id)
            .map(|m| m.name.as_str())
    }

    /// Human label for the account or card a transaction moved through.
    pub fn account_label(&self, account_id: Id) -> String {
        if let Some(a) = self.snapshot.bank_accounts.iter().find(|a| a.id == account_id) {
            return format!("{} conta", a.name);
        }
        if let Some(c) = self.snapshot.credit_cards.iter().find(|c| c.id == account_id) {
            return format!(
                "Crédito {} **** {}",
                c.name,
                c.last_digits.as_deref().unwrap_or("0000")
            );
        }
        "Desconhecido".to_string()
    }
}
