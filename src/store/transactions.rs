// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::Utc;
use rusqlite::{OptionalExtension, Row, params};

use super::{Store, decimal_col, expect_one, parse_col};
use crate::error::{FinanceError, Result};
use crate::models::{Id, NewTransaction, Transaction, TransactionPatch};
use crate::validation::Validate;

const UNCATEGORIZED: &str = "Sem categoria";

const SELECT_TX: &str = "SELECT t.id, t.type, t.amount, t.description, IFNULL(c.name, ?2), t.date,
        t.account_id, t.member_id, t.installments, t.current_installment, t.status,
        t.is_recurring, t.is_paid, t.created_at, t.updated_at
     FROM transactions t LEFT JOIN categories c ON t.category_id=c.id
     WHERE t.user_id=?1";

fn map_tx(r: &Row<'_>) -> rusqlite::Result<Transaction> {
    Ok(Transaction {
        id: r.get(0)?,
        r#type: parse_col(1, "transaction type", r.get(1)?)?,
        amount: decimal_col(r, 2, "amount")?,
        description: r.get(3)?,
        category: r.get(4)?,
        date: r.get(5)?,
        account_id: r.get(6)?,
        member_id: r.get(7)?,
        installments: r.get(8)?,
        current_installment: r.get(9)?,
        status: parse_col(10, "status", r.get(10)?)?,
        is_recurring: r.get(11)?,
        is_paid: r.get(12)?,
        created_at: r.get(13)?,
        updated_at: r.get(14)?,
    })
}

impl Store<'_> {
    /// All of the user's transactions, most recent date first.
    pub fn list_transactions(&self) -> Result<Vec<Transaction>> {
        let sql = format!("{} ORDER BY t.date DESC, t.id DESC", SELECT_TX);
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map(params![self.user, UNCATEGORIZED], map_tx)?;
        let mut data = Vec::new();
        for row in rows {
            data.push(row?);
        }
        tracing::debug!(user = %self.user, "loaded {} transactions", data.len());
        Ok(data)
    }

    pub fn get_transaction(&self, id: Id) -> Result<Transaction> {
        let sql = format!("{} AND t.id=?3", SELECT_TX);
        self.conn
            .query_row(&sql, params![self.user, UNCATEGORIZED, id], map_tx)
            .optional()?
            .ok_or(FinanceError::NotFound {
                entity: "transaction",
                id,
            })
    }

    pub fn insert_transaction(&self, tx: &NewTransaction) -> Result<Id> {
        tx.validate()?;
        let category_id = self.ensure_category(&tx.category, tx.r#type.into())?;
        let now = Utc::now();
        self.conn.execute(
            "INSERT INTO transactions(user_id, type, amount, description, category_id, date,
                account_id, member_id, installments, current_installment, status,
                is_recurring, is_paid, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?14)",
            params![
                self.user,
                tx.r#type.as_str(),
                tx.amount.to_string(),
                tx.description.trim(),
                category_id,
                tx.date,
                tx.account_id,
                tx.member_id,
                tx.installments,
                tx.current_installment,
                tx.status.as_str(),
                tx.is_recurring,
                tx.is_paid,
                now,
            ],
        )?;
        let id = self.conn.last_insert_rowid();
        tracing::info!(
            user = %self.user,
            "inserted {} {} on {} as transaction {}",
            tx.r#type,
            tx.amount,
            tx.date,
            id
        );
        Ok(id)
    }

    /// Applies `patch` on top of the stored record. Fields the patch leaves
    /// unset keep their prior value.
    pub fn update_transaction(&self, id: Id, patch: &TransactionPatch) -> Result<Transaction> {
        let current = self.get_transaction(id)?;
        let mut draft = current.to_draft();
        patch.apply(&mut draft);
        draft.validate()?;
        let category_id = self.ensure_category(&draft.category, draft.r#type.into())?;
        let affected = self.conn.execute(
            "UPDATE transactions SET type=?3, amount=?4, description=?5, category_id=?6, date=?7,
                account_id=?8, member_id=?9, installments=?10, current_installment=?11,
                status=?12, is_recurring=?13, is_paid=?14, updated_at=?15
             WHERE id=?1 AND user_id=?2",
            params![
                id,
                self.user,
                draft.r#type.as_str(),
                draft.amount.to_string(),
                draft.description.trim(),
                category_id,
                draft.date,
                draft.account_id,
                draft.member_id,
                draft.installments,
                draft.current_installment,
                draft.status.as_str(),
                draft.is_recurring,
                draft.is_paid,
                Utc::now(),
            ],
        )?;
        expect_one(affected, "transaction", id)?;
        tracing::info!(user = %self.user, "updated transaction {}", id);
        self.get_transaction(id)
    }

    pub fn delete_transaction(&self, id: Id) -> Result<()> {
        let affected = self.conn.execute(
            "DELETE FROM transactions WHERE id=?1 AND user_id=?2",
            params![id, self.user],
        )?;
        expect_one(affected, "transaction", id)?;
        tracing::info!(user = %self.user, "deleted transaction {}", id);
        Ok(())
    }
}
