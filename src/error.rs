// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use thiserror::Error;

use crate::models::Id;

/// Errors raised by the store, the validation layer and the lifecycle rule.
#[derive(Debug, Error)]
pub enum FinanceError {
    /// Input rejected before it reached the store.
    #[error("invalid {field}: {message}")]
    Validation { field: &'static str, message: String },

    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: Id },

    #[error("transaction {0} is not an expense")]
    NotAnExpense(Id),

    /// Recurring transaction that still has installments left, refused by
    /// the `reject` lifecycle policy.
    #[error("transaction {0} is both recurring and split in installments")]
    AmbiguousLifecycle(Id),

    /// A stored value could not be parsed back into its domain type.
    #[error("corrupt {field} value '{value}' in store")]
    Corrupt { field: &'static str, value: String },

    #[error("store error: {0}")]
    Sql(rusqlite::Error),
}

impl FinanceError {
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        FinanceError::Validation {
            field,
            message: message.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, FinanceError::NotFound { .. })
    }
}

impl From<rusqlite::Error> for FinanceError {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            // Row mappers smuggle Corrupt out through rusqlite's conversion error.
            rusqlite::Error::FromSqlConversionFailure(idx, ty, err) => {
                match err.downcast::<FinanceError>() {
                    Ok(inner) => *inner,
                    Err(err) => {
                        let value = rusqlite::Error::FromSqlConversionFailure(idx, ty, err);
                        tracing::error!("unhandled SQL error: {}", value);
                        FinanceError::Sql(value)
                    }
                }
            }
            value => {
                tracing::error!("unhandled SQL error: {}", value);
                FinanceError::Sql(value)
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, FinanceError>;
