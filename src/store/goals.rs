// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::Utc;
use rusqlite::{OptionalExtension, Row, params};

use super::{Store, decimal_col, expect_one};
use crate::error::{FinanceError, Result};
use crate::models::{Goal, GoalPatch, Id, NewGoal};
use crate::validation::Validate;

const SELECT_GOAL: &str = "SELECT id, title, description, target_amount, current_amount, deadline,
        category, member_id, is_completed, created_at, updated_at
     FROM goals WHERE user_id=?1";

fn map_goal(r: &Row<'_>) -> rusqlite::Result<Goal> {
    Ok(Goal {
        id: r.get(0)?,
        title: r.get(1)?,
        description: r.get(2)?,
        target_amount: decimal_col(r, 3, "target_amount")?,
        current_amount: decimal_col(r, 4, "current_amount")?,
        deadline: r.get(5)?,
        category: r.get(6)?,
        member_id: r.get(7)?,
        is_completed: r.get(8)?,
        created_at: r.get(9)?,
        updated_at: r.get(10)?,
    })
}

impl Store<'_> {
    pub fn list_goals(&self) -> Result<Vec<Goal>> {
        let sql = format!("{} ORDER BY created_at, id", SELECT_GOAL);
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map(params![self.user], map_goal)?;
        let mut data = Vec::new();
        for row in rows {
            data.push(row?);
        }
        Ok(data)
    }

    pub fn get_goal(&self, id: Id) -> Result<Goal> {
        let sql = format!("{} AND id=?2", SELECT_GOAL);
        self.conn
            .query_row(&sql, params![self.user, id], map_goal)
            .optional()?
            .ok_or(FinanceError::NotFound { entity: "goal", id })
    }

    pub fn insert_goal(&self, g: &NewGoal) -> Result<Id> {
        g.validate()?;
        let now = Utc::now();
        self.conn.execute(
            "INSERT INTO goals(user_id, title, description, target_amount, current_amount,
                deadline, category, member_id, is_completed, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?10)",
            params![
                self.user,
                g.title.trim(),
                g.description,
                g.target_amount.to_string(),
                g.current_amount.to_string(),
                g.deadline,
                g.category,
                g.member_id,
                g.is_completed,
                now,
            ],
        )?;
        let id = self.conn.last_insert_rowid();
        tracing::info!(user = %self.user, "added goal '{}' ({})", g.title.trim(), id);
        Ok(id)
    }

    pub fn update_goal(&self, id: Id, patch: &GoalPatch) -> Result<Goal> {
        let mut draft = self.get_goal(id)?.to_draft();
        patch.apply(&mut draft);
        draft.validate()?;
        let affected = self.conn.execute(
            "UPDATE goals SET title=?3, description=?4, target_amount=?5, current_amount=?6,
                deadline=?7, category=?8, member_id=?9, is_completed=?10, updated_at=?11
             WHERE id=?1 AND user_id=?2",
            params![
                id,
                self.user,
                draft.title.trim(),
                draft.description,
                draft.target_amount.to_string(),
                draft.current_amount.to_string(),
                draft.deadline,
                draft.category,
                draft.member_id,
                draft.is_completed,
                Utc::now(),
            ],
        )?;
        expect_one(affected, "goal", id)?;
        tracing::info!(user = %self.user, "updated goal {}", id);
        self.get_goal(id)
    }

    pub fn delete_goal(&self, id: Id) -> Result<()> {
        let affected = self.conn.execute(
            "DELETE FROM goals WHERE id=?1 AND user_id=?2",
            params![id, self.user],
        )?;
        expect_one(affected, "goal", id)?;
        tracing::info!(user = %self.user, "deleted goal {}", id);
        Ok(())
    }
}
