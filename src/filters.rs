// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Global dashboard filters and the engine that applies them.

use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::FinanceError;
use crate::models::{Id, Transaction, TransactionType};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeFilter {
    #[default]
    All,
    Income,
    Expense,
}

impl TypeFilter {
    pub fn admits(&self, t: TransactionType) -> bool {
        match self {
            TypeFilter::All => true,
            TypeFilter::Income => t == TransactionType::Income,
            TypeFilter::Expense => t == TransactionType::Expense,
        }
    }
}

impl FromStr for TypeFilter {
    type Err = FinanceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(TypeFilter::All),
            "income" => Ok(TypeFilter::Income),
            "expense" => Ok(TypeFilter::Expense),
            other => Err(FinanceError::validation(
                "type",
                format!("'{}' is not all, income or expense", other),
            )),
        }
    }
}

/// Inclusive date bounds; `None` leaves that side open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start.is_none_or(|s| date >= s) && self.end.is_none_or(|e| date <= e)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    pub selected_member: Option<Id>,
    pub date_range: DateRange,
    pub transaction_type: TypeFilter,
    pub search_text: String,
}

impl FilterState {
    pub fn set_selected_member(&mut self, member: Option<Id>) {
        self.selected_member = member;
    }

    pub fn set_date_range(&mut self, start: Option<NaiveDate>, end: Option<NaiveDate>) {
        self.date_range = DateRange { start, end };
    }

    pub fn set_transaction_type(&mut self, t: TypeFilter) {
        self.transaction_type = t;
    }

    pub fn set_search_text(&mut self, text: impl Into<String>) {
        self.search_text = text.into();
    }

    /// Every active predicate must hold.
    pub fn matches(&self, tx: &Transaction) -> bool {
        self.date_range.contains(tx.date) && self.matches_ignoring_dates(tx)
    }

    // Member, type and search predicates only. The balance growth badge
    // applies its own window instead of the selected range.
    pub(crate) fn matches_ignoring_dates(&self, tx: &Transaction) -> bool {
        if let Some(member) = self.selected_member {
            if tx.member_id != Some(member) {
                return false;
            }
        }
        if !self.transaction_type.admits(tx.r#type) {
            return false;
        }
        let needle = self.search_text.trim().to_lowercase();
        if !needle.is_empty() {
            return tx.description.to_lowercase().contains(&needle)
                || tx.category.to_lowercase().contains(&needle);
        }
        true
    }
}

/// Transactions passing `filters`, most recent date first. Equal dates keep
/// their input order.
pub fn filter_transactions(all: &[Transaction], filters: &FilterState) -> Vec<Transaction> {
    let mut out: Vec<Transaction> = all.iter().filter(|t| filters.matches(t)).cloned().collect();
    out.sort_by(|a, b| b.date.cmp(&a.date));
    out
}
