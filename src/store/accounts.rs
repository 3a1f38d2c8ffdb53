// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::Utc;
use rusqlite::{OptionalExtension, Row, params};

use super::{Store, corrupt, decimal_col, expect_one, parse_col};
use crate::error::{FinanceError, Result};
use crate::models::{
    BankAccount, BankAccountPatch, CreditCard, CreditCardPatch, Id, NewBankAccount,
    NewCreditCard,
};
use crate::validation::Validate;

const CARD_KIND: &str = "credit_card";

const SELECT_BANK: &str = "SELECT id, name, holder_id, balance, kind, created_at, updated_at
     FROM accounts WHERE user_id=?1 AND kind != 'credit_card'";

const SELECT_CARD: &str = "SELECT id, name, holder_id, closing_day, due_day, credit_limit,
        current_bill, theme, last_digits, created_at, updated_at
     FROM accounts WHERE user_id=?1 AND kind = 'credit_card'";

fn map_bank(r: &Row<'_>) -> rusqlite::Result<BankAccount> {
    Ok(BankAccount {
        id: r.get(0)?,
        name: r.get(1)?,
        holder_id: r.get(2)?,
        balance: decimal_col(r, 3, "balance")?,
        kind: parse_col(4, "account kind", r.get(4)?)?,
        created_at: r.get(5)?,
        updated_at: r.get(6)?,
    })
}

fn map_card(r: &Row<'_>) -> rusqlite::Result<CreditCard> {
    let closing_day: Option<u32> = r.get(3)?;
    let due_day: Option<u32> = r.get(4)?;
    let theme: Option<String> = r.get(7)?;
    Ok(CreditCard {
        id: r.get(0)?,
        name: r.get(1)?,
        holder_id: r.get(2)?,
        closing_day: closing_day.ok_or_else(|| corrupt(3, "closing_day", "NULL".into()))?,
        due_day: due_day.ok_or_else(|| corrupt(4, "due_day", "NULL".into()))?,
        limit: decimal_col(r, 5, "credit_limit")?,
        current_bill: decimal_col(r, 6, "current_bill")?,
        theme: parse_col(7, "theme", theme.unwrap_or_else(|| "black".into()))?,
        last_digits: r.get(8)?,
        created_at: r.get(9)?,
        updated_at: r.get(10)?,
    })
}

impl Store<'_> {
    pub fn list_bank_accounts(&self) -> Result<Vec<BankAccount>> {
        let sql = format!("{} ORDER BY created_at, id", SELECT_BANK);
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map(params![self.user], map_bank)?;
        let mut data = Vec::new();
        for row in rows {
            data.push(row?);
        }
        Ok(data)
    }

    pub fn get_bank_account(&self, id: Id) -> Result<BankAccount> {
        let sql = format!("{} AND id=?2", SELECT_BANK);
        self.conn
            .query_row(&sql, params![self.user, id], map_bank)
            .optional()?
            .ok_or(FinanceError::NotFound {
                entity: "account",
                id,
            })
    }

    pub fn insert_bank_account(&self, a: &NewBankAccount) -> Result<Id> {
        a.validate()?;
        let now = Utc::now();
        self.conn.execute(
            "INSERT INTO accounts(user_id, kind, name, holder_id, balance, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6)",
            params![
                self.user,
                a.kind.as_str(),
                a.name.trim(),
                a.holder_id,
                a.balance.to_string(),
                now,
            ],
        )?;
        let id = self.conn.last_insert_rowid();
        tracing::info!(user = %self.user, "added account '{}' ({})", a.name.trim(), id);
        Ok(id)
    }

    pub fn update_bank_account(&self, id: Id, patch: &BankAccountPatch) -> Result<BankAccount> {
        let mut draft = self.get_bank_account(id)?.to_draft();
        patch.apply(&mut draft);
        draft.validate()?;
        let affected = self.conn.execute(
            "UPDATE accounts SET kind=?3, name=?4, holder_id=?5, balance=?6, updated_at=?7
             WHERE id=?1 AND user_id=?2 AND kind != 'credit_card'",
            params![
                id,
                self.user,
                draft.kind.as_str(),
                draft.name.trim(),
                draft.holder_id,
                draft.balance.to_string(),
                Utc::now(),
            ],
        )?;
        expect_one(affected, "account", id)?;
        tracing::info!(user = %self.user, "updated account {}", id);
        self.get_bank_account(id)
    }

    pub fn delete_bank_account(&self, id: Id) -> Result<()> {
        let affected = self.conn.execute(
            "DELETE FROM accounts WHERE id=?1 AND user_id=?2 AND kind != 'credit_card'",
            params![id, self.user],
        )?;
        expect_one(affected, "account", id)?;
        tracing::info!(user = %self.user, "deleted account {}", id);
        Ok(())
    }

    pub fn list_credit_cards(&self) -> Result<Vec<CreditCard>> {
        let sql = format!("{} ORDER BY created_at, id", SELECT_CARD);
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map(params![self.user], map_card)?;
        let mut data = Vec::new();
        for row in rows {
            data.push(row?);
        }
        Ok(data)
    }

    pub fn get_credit_card(&self, id: Id) -> Result<CreditCard> {
        let sql = format!("{} AND id=?2", SELECT_CARD);
        self.conn
            .query_row(&sql, params![self.user, id], map_card)
            .optional()?
            .ok_or(FinanceError::NotFound { entity: "card", id })
    }

    pub fn insert_credit_card(&self, c: &NewCreditCard) -> Result<Id> {
        c.validate()?;
        let now = Utc::now();
        self.conn.execute(
            "INSERT INTO accounts(user_id, kind, name, holder_id, closing_day, due_day,
                credit_limit, current_bill, theme, last_digits, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?11)",
            params![
                self.user,
                CARD_KIND,
                c.name.trim(),
                c.holder_id,
                c.closing_day,
                c.due_day,
                c.limit.to_string(),
                c.current_bill.to_string(),
                c.theme.as_str(),
                c.last_digits,
                now,
            ],
        )?;
        let id = self.conn.last_insert_rowid();
        tracing::info!(user = %self.user, "added card '{}' ({})", c.name.trim(), id);
        Ok(id)
    }

    pub fn update_credit_card(&self, id: Id, patch: &CreditCardPatch) -> Result<CreditCard> {
        let mut draft = self.get_credit_card(id)?.to_draft();
        patch.apply(&mut draft);
        draft.validate()?;
        let affected = self.conn.execute(
            "UPDATE accounts SET name=?3, holder_id=?4, closing_day=?5, due_day=?6,
                credit_limit=?7, current_bill=?8, theme=?9, last_digits=?10, updated_at=?11
             WHERE id=?1 AND user_id=?2 AND kind = 'credit_card'",
            params![
                id,
                self.user,
                draft.name.trim(),
                draft.holder_id,
                draft.closing_day,
                draft.due_day,
                draft.limit.to_string(),
                draft.current_bill.to_string(),
                draft.theme.as_str(),
                draft.last_digits,
                Utc::now(),
            ],
        )?;
        expect_one(affected, "card", id)?;
        tracing::info!(user = %self.user, "updated card {}", id);
        self.get_credit_card(id)
    }

    pub fn delete_credit_card(&self, id: Id) -> Result<()> {
        let affected = self.conn.execute(
            "DELETE FROM accounts WHERE id=?1 AND user_id=?2 AND kind = 'credit_card'",
            params![id, self.user],
        )?;
        expect_one(affected, "card", id)?;
        tracing::info!(user = %self.user, "deleted card {}", id);
        Ok(())
    }
}
