// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rusqlite::params;

use super::{Store, parse_col};
use crate::error::{FinanceError, Result};
use crate::models::{Category, CategoryType, Id};

pub const INCOME_CATEGORIES: [&str; 6] = [
    "Salário",
    "Freelance",
    "Investimentos",
    "Aluguéis",
    "Vendas",
    "Outros",
];

pub const EXPENSE_CATEGORIES: [&str; 11] = [
    "Alimentação",
    "Mercado",
    "Transporte",
    "Moradia",
    "Aluguel",
    "Saúde",
    "Educação",
    "Lazer",
    "Manutenção",
    "Academia",
    "Outros",
];

impl Store<'_> {
    pub fn list_categories(&self) -> Result<Vec<Category>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name, type FROM categories WHERE user_id=?1 ORDER BY name")?;
        let rows = stmt.query_map(params![self.user], |r| {
            Ok(Category {
                id: r.get(0)?,
                name: r.get(1)?,
                r#type: parse_col(2, "category type", r.get(2)?)?,
            })
        })?;
        let mut out = Vec::new();
        for row in rows {
            out.push(row?);
        }
        Ok(out)
    }

    /// Case-insensitive lookup of a category by its trimmed name.
    pub fn find_category(&self, name: &str) -> Result<Option<Category>> {
        let wanted = name.trim().to_lowercase();
        Ok(self
            .list_categories()?
            .into_iter()
            .find(|c| c.name.to_lowercase() == wanted))
    }

    /// Returns the id of the category matching `name`, creating it when the
    /// user has none. Matching ignores case and surrounding whitespace.
    pub fn ensure_category(&self, name: &str, r#type: CategoryType) -> Result<Id> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(FinanceError::validation("category", "must not be empty"));
        }
        if let Some(existing) = self.find_category(trimmed)? {
            return Ok(existing.id);
        }
        self.conn.execute(
            "INSERT INTO categories(user_id, name, type) VALUES (?1, ?2, ?3)",
            params![self.user, trimmed, r#type.as_str()],
        )?;
        let id = self.conn.last_insert_rowid();
        tracing::info!(user = %self.user, "created category '{}' ({})", trimmed, id);
        Ok(id)
    }

    /// Inserts the default income and expense categories the user does not
    /// have yet. Returns how many were created.
    pub fn seed_default_categories(&self) -> Result<usize> {
        let mut known: Vec<String> = self
            .list_categories()?
            .into_iter()
            .map(|c| c.name.to_lowercase())
            .collect();
        let defaults = INCOME_CATEGORIES
            .iter()
            .map(|n| (*n, CategoryType::Income))
            .chain(EXPENSE_CATEGORIES.iter().map(|n| (*n, CategoryType::Expense)));
        let mut created = 0;
        for (name, ty) in defaults {
            let key = name.to_lowercase();
            if known.contains(&key) {
                continue;
            }
            self.conn.execute(
                "INSERT INTO categories(user_id, name, type) VALUES (?1, ?2, ?3)",
                params![self.user, name, ty.as_str()],
            )?;
            known.push(key);
            created += 1;
        }
        if created > 0 {
            tracing::info!(user = %self.user, "seeded {} default categories", created);
        }
        Ok(created)
    }
}
