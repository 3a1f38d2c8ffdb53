// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Record store over SQLite. Every query is scoped to the user the store
//! was opened for.

use std::str::FromStr;

use rusqlite::Connection;
use rusqlite::types::Type;
use rust_decimal::Decimal;

use crate::error::{FinanceError, Result};
use crate::models::Id;

pub mod accounts;
pub mod categories;
pub mod goals;
pub mod members;
pub mod transactions;

pub struct Store<'c> {
    conn: &'c Connection,
    user: String,
}

impl<'c> Store<'c> {
    pub fn new(conn: &'c Connection, user: impl Into<String>) -> Self {
        Store {
            conn,
            user: user.into(),
        }
    }

    pub fn user(&self) -> &str {
        &self.user
    }

    pub fn conn(&self) -> &Connection {
        self.conn
    }

    /// Runs `f` inside a SQLite transaction. Commits when `f` succeeds,
    /// rolls back when it fails.
    pub fn atomically<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Store<'c>) -> Result<T>,
    {
        let tx = self.conn.unchecked_transaction()?;
        match f(self) {
            Ok(v) => {
                tx.commit()?;
                Ok(v)
            }
            Err(e) => {
                tracing::warn!("rolling back: {}", e);
                tx.rollback()?;
                Err(e)
            }
        }
    }
}

pub(crate) fn corrupt(idx: usize, field: &'static str, value: String) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(
        idx,
        Type::Text,
        Box::new(FinanceError::Corrupt { field, value }),
    )
}

pub(crate) fn parse_col<T: FromStr>(idx: usize, field: &'static str, raw: String) -> rusqlite::Result<T> {
    match raw.parse::<T>() {
        Ok(v) => Ok(v),
        Err(_) => Err(corrupt(idx, field, raw)),
    }
}

pub(crate) fn decimal_col(row: &rusqlite::Row<'_>, idx: usize, field: &'static str) -> rusqlite::Result<Decimal> {
    let raw: String = row.get(idx)?;
    parse_col(idx, field, raw)
}

pub(crate) fn opt_decimal_col(
    row: &rusqlite::Row<'_>,
    idx: usize,
    field: &'static str,
) -> rusqlite::Result<Option<Decimal>> {
    let raw: Option<String> = row.get(idx)?;
    raw.map(|s| parse_col(idx, field, s)).transpose()
}

pub(crate) fn expect_one(affected: usize, entity: &'static str, id: Id) -> Result<()> {
    if affected == 0 {
        return Err(FinanceError::NotFound { entity, id });
    }
    Ok(())
}
