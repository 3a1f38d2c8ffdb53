// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::FinanceError;

pub type Id = i64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Income => "income",
            TransactionType::Expense => "expense",
        }
    }
}

impl FromStr for TransactionType {
    type Err = FinanceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "income" => Ok(TransactionType::Income),
            "expense" => Ok(TransactionType::Expense),
            other => Err(FinanceError::validation(
                "type",
                format!("'{}' is not income or expense", other),
            )),
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    Pending,
    Completed,
    Cancelled,
}

impl TransactionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionStatus::Pending => "pending",
            TransactionStatus::Completed => "completed",
            TransactionStatus::Cancelled => "cancelled",
        }
    }
}

impl FromStr for TransactionStatus {
    type Err = FinanceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(TransactionStatus::Pending),
            "completed" => Ok(TransactionStatus::Completed),
            "cancelled" => Ok(TransactionStatus::Cancelled),
            other => Err(FinanceError::validation(
                "status",
                format!("'{}' is not pending, completed or cancelled", other),
            )),
        }
    }
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardTheme {
    Black,
    Lime,
    White,
}

impl CardTheme {
    pub fn as_str(&self) -> &'static str {
        match self {
            CardTheme::Black => "black",
            CardTheme::Lime => "lime",
            CardTheme::White => "white",
        }
    }
}

impl FromStr for CardTheme {
    type Err = FinanceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "black" => Ok(CardTheme::Black),
            "lime" => Ok(CardTheme::Lime),
            "white" => Ok(CardTheme::White),
            other => Err(FinanceError::validation(
                "theme",
                format!("'{}' is not black, lime or white", other),
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountKind {
    Checking,
    Savings,
}

impl AccountKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountKind::Checking => "checking",
            AccountKind::Savings => "savings",
        }
    }
}

impl FromStr for AccountKind {
    type Err = FinanceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "checking" => Ok(AccountKind::Checking),
            "savings" => Ok(AccountKind::Savings),
            other => Err(FinanceError::validation(
                "kind",
                format!("'{}' is not checking or savings", other),
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryType {
    Income,
    Expense,
}

impl CategoryType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CategoryType::Income => "income",
            CategoryType::Expense => "expense",
        }
    }
}

impl From<TransactionType> for CategoryType {
    fn from(t: TransactionType) -> Self {
        match t {
            TransactionType::Income => CategoryType::Income,
            TransactionType::Expense => CategoryType::Expense,
        }
    }
}

impl FromStr for CategoryType {
    type Err = FinanceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TransactionType::from_str(s).map(CategoryType::from)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: Id,
    pub r#type: TransactionType,
    pub amount: Decimal,
    pub description: String,
    pub category: String,
    pub date: NaiveDate,
    pub account_id: Id,
    /// `None` is a household-wide transaction.
    pub member_id: Option<Id>,
    pub installments: u32,
    pub current_installment: Option<u32>,
    pub status: TransactionStatus,
    pub is_recurring: bool,
    pub is_paid: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Transaction {
    pub fn is_income(&self) -> bool {
        self.r#type == TransactionType::Income
    }

    pub fn is_expense(&self) -> bool {
        self.r#type == TransactionType::Expense
    }

    pub fn is_completed(&self) -> bool {
        self.status == TransactionStatus::Completed
    }

    /// Copy of this record without the store-assigned identity fields.
    pub fn to_draft(&self) -> NewTransaction {
        NewTransaction {
            r#type: self.r#type,
            amount: self.amount,
            description: self.description.clone(),
            category: self.category.clone(),
            date: self.date,
            account_id: self.account_id,
            member_id: self.member_id,
            installments: self.installments,
            current_installment: self.current_installment,
            status: self.status,
            is_recurring: self.is_recurring,
            is_paid: self.is_paid,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTransaction {
    pub r#type: TransactionType,
    pub amount: Decimal,
    pub description: String,
    pub category: String,
    pub date: NaiveDate,
    pub account_id: Id,
    pub member_id: Option<Id>,
    pub installments: u32,
    pub current_installment: Option<u32>,
    pub status: TransactionStatus,
    pub is_recurring: bool,
    pub is_paid: bool,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionPatch {
    pub r#type: Option<TransactionType>,
    pub amount: Option<Decimal>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub date: Option<NaiveDate>,
    pub account_id: Option<Id>,
    pub member_id: Option<Option<Id>>,
    pub installments: Option<u32>,
    pub current_installment: Option<Option<u32>>,
    pub status: Option<TransactionStatus>,
    pub is_recurring: Option<bool>,
    pub is_paid: Option<bool>,
}

impl TransactionPatch {
    pub fn is_empty(&self) -> bool {
        *self == TransactionPatch::default()
    }

    pub fn apply(&self, tx: &mut NewTransaction) {
        if let Some(v) = self.r#type {
            tx.r#type = v;
        }
        if let Some(v) = self.amount {
            tx.amount = v;
        }
        if let Some(v) = &self.description {
            tx.description = v.clone();
        }
        if let Some(v) = &self.category {
            tx.category = v.clone();
        }
        if let Some(v) = self.date {
            tx.date = v;
        }
        if let Some(v) = self.account_id {
            tx.account_id = v;
        }
        if let Some(v) = self.member_id {
            tx.member_id = v;
        }
        if let Some(v) = self.installments {
            tx.installments = v;
        }
        if let Some(v) = self.current_installment {
            tx.current_installment = v;
        }
        if let Some(v) = self.status {
            tx.status = v;
        }
        if let Some(v) = self.is_recurring {
            tx.is_recurring = v;
        }
        if let Some(v) = self.is_paid {
            tx.is_paid = v;
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreditCard {
    pub id: Id,
    pub name: String,
    pub holder_id: Id,
    pub closing_day: u32,
    pub due_day: u32,
    pub limit: Decimal,
    pub current_bill: Decimal,
    pub theme: CardTheme,
    pub last_digits: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CreditCard {
    pub fn to_draft(&self) -> NewCreditCard {
        NewCreditCard {
            name: self.name.clone(),
            holder_id: self.holder_id,
            closing_day: self.closing_day,
            due_day: self.due_day,
            limit: self.limit,
            current_bill: self.current_bill,
            theme: self.theme,
            last_digits: self.last_digits.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewCreditCard {
    pub name: String,
    pub holder_id: Id,
    pub closing_day: u32,
    pub due_day: u32,
    pub limit: Decimal,
    pub current_bill: Decimal,
    pub theme: CardTheme,
    pub last_digits: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CreditCardPatch {
    pub name: Option<String>,
    pub holder_id: Option<Id>,
    pub closing_day: Option<u32>,
    pub due_day: Option<u32>,
    pub limit: Option<Decimal>,
    pub current_bill: Option<Decimal>,
    pub theme: Option<CardTheme>,
    pub last_digits: Option<Option<String>>,
}

impl CreditCardPatch {
    pub fn apply(&self, card: &mut NewCreditCard) {
        if let Some(v) = &self.name {
            card.name = v.clone();
        }
        if let Some(v) = self.holder_id {
            card.holder_id = v;
        }
        if let Some(v) = self.closing_day {
            card.closing_day = v;
        }
        if let Some(v) = self.due_day {
            card.due_day = v;
        }
        if let Some(v) = self.limit {
            card.limit = v;
        }
        if let Some(v) = self.current_bill {
            card.current_bill = v;
        }
        if let Some(v) = self.theme {
            card.theme = v;
        }
        if let Some(v) = &self.last_digits {
            card.last_digits = v.clone();
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BankAccount {
    pub id: Id,
    pub name: String,
    pub holder_id: Id,
    pub balance: Decimal,
    pub kind: AccountKind,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl BankAccount {
    pub fn to_draft(&self) -> NewBankAccount {
        NewBankAccount {
            name: self.name.clone(),
            holder_id: self.holder_id,
            balance: self.balance,
            kind: self.kind,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewBankAccount {
    pub name: String,
    pub holder_id: Id,
    pub balance: Decimal,
    pub kind: AccountKind,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BankAccountPatch {
    pub name: Option<String>,
    pub holder_id: Option<Id>,
    pub balance: Option<Decimal>,
    pub kind: Option<AccountKind>,
}

impl BankAccountPatch {
    pub fn apply(&self, account: &mut NewBankAccount) {
        if let Some(v) = &self.name {
            account.name = v.clone();
        }
        if let Some(v) = self.holder_id {
            account.holder_id = v;
        }
        if let Some(v) = self.balance {
            account.balance = v;
        }
        if let Some(v) = self.kind {
            account.kind = v;
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FamilyMember {
    pub id: Id,
    pub name: String,
    pub role: String,
    pub avatar_url: Option<String>,
    pub email: Option<String>,
    pub monthly_income: Option<Decimal>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl FamilyMember {
    pub fn to_draft(&self) -> NewFamilyMember {
        NewFamilyMember {
            name: self.name.clone(),
            role: self.role.clone(),
            avatar_url: self.avatar_url.clone(),
            email: self.email.clone(),
            monthly_income: self.monthly_income,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewFamilyMember {
    pub name: String,
    pub role: String,
    pub avatar_url: Option<String>,
    pub email: Option<String>,
    pub monthly_income: Option<Decimal>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FamilyMemberPatch {
    pub name: Option<String>,
    pub role: Option<String>,
    pub avatar_url: Option<Option<String>>,
    pub email: Option<Option<String>>,
    pub monthly_income: Option<Option<Decimal>>,
}

impl FamilyMemberPatch {
    pub fn apply(&self, member: &mut NewFamilyMember) {
        if let Some(v) = &self.name {
            member.name = v.clone();
        }
        if let Some(v) = &self.role {
            member.role = v.clone();
        }
        if let Some(v) = &self.avatar_url {
            member.avatar_url = v.clone();
        }
        if let Some(v) = &self.email {
            member.email = v.clone();
        }
        if let Some(v) = self.monthly_income {
            member.monthly_income = v;
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    pub id: Id,
    pub title: String,
    pub description: Option<String>,
    pub target_amount: Decimal,
    pub current_amount: Decimal,
    pub deadline: NaiveDate,
    pub category: Option<String>,
    pub member_id: Option<Id>,
    pub is_completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Goal {
    pub fn to_draft(&self) -> NewGoal {
        NewGoal {
            title: self.title.clone(),
            description: self.description.clone(),
            target_amount: self.target_amount,
            current_amount: self.current_amount,
            deadline: self.deadline,
            category: self.category.clone(),
            member_id: self.member_id,
            is_completed: self.is_completed,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewGoal {
    pub title: String,
    pub description: Option<String>,
    pub target_amount: Decimal,
    pub current_amount: Decimal,
    pub deadline: NaiveDate,
    pub category: Option<String>,
    pub member_id: Option<Id>,
    pub is_completed: bool,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GoalPatch {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub target_amount: Option<Decimal>,
    pub current_amount: Option<Decimal>,
    pub deadline: Option<NaiveDate>,
    pub category: Option<Option<String>>,
    pub member_id: Option<Option<Id>>,
    pub is_completed: Option<bool>,
}

impl GoalPatch {
    pub fn apply(&self, goal: &mut NewGoal) {
        if let Some(v) = &self.title {
            goal.title = v.clone();
        }
        if let Some(v) = &self.description {
            goal.description = v.clone();
        }
        if let Some(v) = self.target_amount {
            goal.target_amount = v;
        }
        if let Some(v) = self.current_amount {
            goal.current_amount = v;
        }
        if let Some(v) = self.deadline {
            goal.deadline = v;
        }
        if let Some(v) = &self.category {
            goal.category = v.clone();
        }
        if let Some(v) = self.member_id {
            goal.member_id = v;
        }
        if let Some(v) = self.is_completed {
            goal.is_completed = v;
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: Id,
    pub name: String,
    pub r#type: CategoryType,
}
