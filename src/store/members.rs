// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::Utc;
use rusqlite::{OptionalExtension, Row, params};

use super::{Store, expect_one, opt_decimal_col};
use crate::error::{FinanceError, Result};
use crate::models::{FamilyMember, FamilyMemberPatch, Id, NewFamilyMember};
use crate::validation::Validate;

const SELECT_MEMBER: &str = "SELECT id, name, role, avatar_url, email, monthly_income, created_at, updated_at
     FROM family_members WHERE user_id=?1";

fn map_member(r: &Row<'_>) -> rusqlite::Result<FamilyMember> {
    Ok(FamilyMember {
        id: r.get(0)?,
        name: r.get(1)?,
        role: r.get(2)?,
        avatar_url: r.get(3)?,
        email: r.get(4)?,
        monthly_income: opt_decimal_col(r, 5, "monthly_income")?,
        created_at: r.get(6)?,
        updated_at: r.get(7)?,
    })
}

impl Store<'_> {
    pub fn list_members(&self) -> Result<Vec<FamilyMember>> {
        let sql = format!("{} ORDER BY created_at, id", SELECT_MEMBER);
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map(params![self.user], map_member)?;
        let mut data = Vec::new();
        for row in rows {
            data.push(row?);
        }
        Ok(data)
    }

    pub fn get_member(&self, id: Id) -> Result<FamilyMember> {
        let sql = format!("{} AND id=?2", SELECT_MEMBER);
        self.conn
            .query_row(&sql, params![self.user, id], map_member)
            .optional()?
            .ok_or(FinanceError::NotFound {
                entity: "member",
                id,
            })
    }

    pub fn insert_member(&self, m: &NewFamilyMember) -> Result<Id> {
        m.validate()?;
        let now = Utc::now();
        self.conn.execute(
            "INSERT INTO family_members(user_id, name, role, avatar_url, email, monthly_income,
                created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?7)",
            params![
                self.user,
                m.name.trim(),
                m.role.trim(),
                m.avatar_url,
                m.email,
                m.monthly_income.map(|d| d.to_string()),
                now,
            ],
        )?;
        let id = self.conn.last_insert_rowid();
        tracing::info!(user = %self.user, "added member '{}' ({})", m.name.trim(), id);
        Ok(id)
    }

    pub fn update_member(&self, id: Id, patch: &FamilyMemberPatch) -> Result<FamilyMember> {
        let mut draft = self.get_member(id)?.to_draft();
        patch.apply(&mut draft);
        draft.validate()?;
        let affected = self.conn.execute(
            "UPDATE family_members SET name=?3, role=?4, avatar_url=?5, email=?6,
                monthly_income=?7, updated_at=?8
             WHERE id=?1 AND user_id=?2",
            params![
                id,
                self.user,
                draft.name.trim(),
                draft.role.trim(),
                draft.avatar_url,
                draft.email,
                draft.monthly_income.map(|d| d.to_string()),
                Utc::now(),
            ],
        )?;
        expect_one(affected, "member", id)?;
        tracing::info!(user = %self.user, "updated member {}", id);
        self.get_member(id)
    }

    pub fn delete_member(&self, id: Id) -> Result<()> {
        let affected = self.conn.execute(
            "DELETE FROM family_members WHERE id=?1 AND user_id=?2",
            params![id, self.user],
        )?;
        expect_one(affected, "member", id)?;
        tracing::info!(user = %self.user, "deleted member {}", id);
        Ok(())
    }
}
