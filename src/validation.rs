// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Input checks applied to drafts before they are written. Updates are
//! validated by applying the patch to the stored record first.

use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;

use crate::error::{FinanceError, Result};
use crate::models::{
    NewBankAccount, NewCreditCard, NewFamilyMember, NewGoal, NewTransaction, TransactionType,
};

static LAST_DIGITS: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]{4}$").expect("valid regex"));

const MIN_NAME_LEN: usize = 3;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

fn min_len(field: &'static str, value: &str) -> Result<()> {
    if value.trim().chars().count() < MIN_NAME_LEN {
        return Err(FinanceError::validation(
            field,
            format!("must have at least {} characters", MIN_NAME_LEN),
        ));
    }
    Ok(())
}

fn not_blank(field: &'static str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(FinanceError::validation(field, "must not be empty"));
    }
    Ok(())
}

fn day_of_month(field: &'static str, day: u32) -> Result<()> {
    if !(1..=31).contains(&day) {
        return Err(FinanceError::validation(
            field,
            format!("{} is not a day of the month", day),
        ));
    }
    Ok(())
}

fn non_negative(field: &'static str, value: Decimal) -> Result<()> {
    if value < Decimal::ZERO {
        return Err(FinanceError::validation(field, "must not be negative"));
    }
    Ok(())
}

fn positive(field: &'static str, value: Decimal) -> Result<()> {
    if value <= Decimal::ZERO {
        return Err(FinanceError::validation(field, "must be greater than zero"));
    }
    Ok(())
}

impl Validate for NewTransaction {
    fn validate(&self) -> Result<()> {
        positive("amount", self.amount)?;
        min_len("description", &self.description)?;
        not_blank("category", &self.category)?;
        if self.installments < 1 {
            return Err(FinanceError::validation(
                "installments",
                "must be at least 1",
            ));
        }
        if let Some(current) = self.current_installment {
            if current < 1 || current > self.installments {
                return Err(FinanceError::validation(
                    "current_installment",
                    format!("{} is outside 1..={}", current, self.installments),
                ));
            }
        }
        if self.r#type == TransactionType::Income {
            if self.is_recurring {
                return Err(FinanceError::validation(
                    "is_recurring",
                    "only expenses can be recurring",
                ));
            }
            if self.installments > 1 {
                return Err(FinanceError::validation(
                    "installments",
                    "only expenses can be split in installments",
                ));
            }
        }
        Ok(())
    }
}

impl Validate for NewCreditCard {
    fn validate(&self) -> Result<()> {
        min_len("name", &self.name)?;
        day_of_month("closing_day", self.closing_day)?;
        day_of_month("due_day", self.due_day)?;
        positive("limit", self.limit)?;
        non_negative("current_bill", self.current_bill)?;
        if let Some(digits) = &self.last_digits {
            if !LAST_DIGITS.is_match(digits) {
                return Err(FinanceError::validation(
                    "last_digits",
                    format!("'{}' is not four digits", digits),
                ));
            }
        }
        Ok(())
    }
}

impl Validate for NewBankAccount {
    fn validate(&self) -> Result<()> {
        min_len("name", &self.name)
    }
}

impl Validate for NewFamilyMember {
    fn validate(&self) -> Result<()> {
        min_len("name", &self.name)?;
        not_blank("role", &self.role)?;
        if let Some(income) = self.monthly_income {
            non_negative("monthly_income", income)?;
        }
        Ok(())
    }
}

impl Validate for NewGoal {
    fn validate(&self) -> Result<()> {
        not_blank("title", &self.title)?;
        positive("target_amount", self.target_amount)?;
        non_negative("current_amount", self.current_amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CardTheme, TransactionStatus};
    use chrono::NaiveDate;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn expense() -> NewTransaction {
        NewTransaction {
            r#type: TransactionType::Expense,
            amount: dec("120.00"),
            description: "Mensalidade academia".into(),
            category: "Academia".into(),
            date: NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
            account_id: 1,
            member_id: None,
            installments: 1,
            current_installment: None,
            status: TransactionStatus::Pending,
            is_recurring: true,
            is_paid: false,
        }
    }

    fn card() -> NewCreditCard {
        NewCreditCard {
            name: "Nubank".into(),
            holder_id: 1,
            closing_day: 10,
            due_day: 15,
            limit: dec("5000"),
            current_bill: dec("1200"),
            theme: CardTheme::Lime,
            last_digits: Some("5877".into()),
        }
    }

    #[test]
    fn accepts_valid_expense() {
        assert!(expense().validate().is_ok());
    }

    #[test]
    fn rejects_zero_and_negative_amounts() {
        let mut tx = expense();
        tx.amount = Decimal::ZERO;
        assert!(matches!(
            tx.validate(),
            Err(FinanceError::Validation { field: "amount", .. })
        ));
        tx.amount = dec("-1");
        assert!(tx.validate().is_err());
    }

    #[test]
    fn rejects_short_description() {
        let mut tx = expense();
        tx.description = "  ab ".into();
        assert!(matches!(
            tx.validate(),
            Err(FinanceError::Validation {
                field: "description",
                ..
            })
        ));
    }

    #[test]
    fn rejects_installment_out_of_range() {
        let mut tx = expense();
        tx.installments = 4;
        tx.current_installment = Some(5);
        assert!(tx.validate().is_err());
        tx.current_installment = Some(0);
        assert!(tx.validate().is_err());
        tx.current_installment = Some(4);
        assert!(tx.validate().is_ok());
    }

    #[test]
    fn rejects_recurring_income() {
        let mut tx = expense();
        tx.r#type = TransactionType::Income;
        assert!(matches!(
            tx.validate(),
            Err(FinanceError::Validation {
                field: "is_recurring",
                ..
            })
        ));
    }

    #[test]
    fn card_days_and_digits() {
        assert!(card().validate().is_ok());
        let mut c = card();
        c.closing_day = 32;
        assert!(c.validate().is_err());
        let mut c = card();
        c.due_day = 0;
        assert!(c.validate().is_err());
        let mut c = card();
        c.last_digits = Some("58a7".into());
        assert!(c.validate().is_err());
        let mut c = card();
        c.limit = Decimal::ZERO;
        assert!(c.validate().is_err());
    }

    #[test]
    fn member_requires_role() {
        let m = NewFamilyMember {
            name: "Maria Silva".into(),
            role: " ".into(),
            avatar_url: None,
            email: None,
            monthly_income: Some(dec("8000")),
        };
        assert!(matches!(
            m.validate(),
            Err(FinanceError::Validation { field: "role", .. })
        ));
    }
}
