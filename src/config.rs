// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result, bail};
use rusqlite::{Connection, OptionalExtension, params};

use crate::lifecycle::RecurringInstallmentPolicy;

pub const KEY_USER: &str = "user";
pub const KEY_CURRENCY: &str = "currency";
pub const KEY_PAGE_SIZE: &str = "page_size";
pub const KEY_RECURRING_INSTALLMENTS: &str = "lifecycle.recurring_installments";

pub const KNOWN_KEYS: [&str; 4] = [
    KEY_USER,
    KEY_CURRENCY,
    KEY_PAGE_SIZE,
    KEY_RECURRING_INSTALLMENTS,
];

pub const DEFAULT_USER: &str = "default";
pub const DEFAULT_CURRENCY: &str = "BRL";
pub const DEFAULT_PAGE_SIZE: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub user: String,
    pub currency: String,
    pub page_size: usize,
    pub recurring_installments: RecurringInstallmentPolicy,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            user: DEFAULT_USER.to_string(),
            currency: DEFAULT_CURRENCY.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            recurring_installments: RecurringInstallmentPolicy::default(),
        }
    }
}

impl Settings {
    pub fn load(conn: &Connection) -> Result<Settings> {
        let mut s = Settings::default();
        if let Some(v) = get_setting(conn, KEY_USER)? {
            s.user = v;
        }
        if let Some(v) = get_setting(conn, KEY_CURRENCY)? {
            s.currency = v;
        }
        if let Some(v) = get_setting(conn, KEY_PAGE_SIZE)? {
            s.page_size = parse_page_size(&v)?;
        }
        if let Some(v) = get_setting(conn, KEY_RECURRING_INSTALLMENTS)? {
            s.recurring_installments = v
                .parse()
                .with_context(|| format!("Invalid setting {}='{}'", KEY_RECURRING_INSTALLMENTS, v))?;
        }
        Ok(s)
    }

    pub fn entries(&self) -> Vec<(&'static str, String)> {
        vec![
            (KEY_USER, self.user.clone()),
            (KEY_CURRENCY, self.currency.clone()),
            (KEY_PAGE_SIZE, self.page_size.to_string()),
            (
                KEY_RECURRING_INSTALLMENTS,
                self.recurring_installments.as_str().to_string(),
            ),
        ]
    }
}

fn parse_page_size(v: &str) -> Result<usize> {
    let n: usize = v
        .trim()
        .parse()
        .with_context(|| format!("Invalid page size '{}'", v))?;
    if n == 0 {
        bail!("Page size must be at least 1");
    }
    Ok(n)
}

pub fn get_setting(conn: &Connection, key: &str) -> Result<Option<String>> {
    let v: Option<String> = conn
        .query_row(
            "SELECT value FROM settings WHERE key=?1",
            params![key],
            |r| r.get(0),
        )
        .optional()?;
    Ok(v)
}

/// Validates and stores a setting. Values are normalized before storing.
pub fn set_setting(conn: &Connection, key: &str, value: &str) -> Result<String> {
    let value = value.trim();
    let normalized = match key {
        KEY_USER => {
            if value.is_empty() {
                bail!("User must not be empty");
            }
            value.to_string()
        }
        KEY_CURRENCY => {
            if value.len() != 3 || !value.chars().all(|c| c.is_ascii_alphabetic()) {
                bail!("Currency must be a three-letter code, got '{}'", value);
            }
            value.to_uppercase()
        }
        KEY_PAGE_SIZE => parse_page_size(value)?.to_string(),
        KEY_RECURRING_INSTALLMENTS => value
            .parse::<RecurringInstallmentPolicy>()?
            .as_str()
            .to_string(),
        other => bail!(
            "Unknown setting '{}' (known: {})",
            other,
            KNOWN_KEYS.join(", ")
        ),
    };
    conn.execute(
        "INSERT INTO settings(key, value) VALUES(?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value=excluded.value",
        params![key, normalized],
    )?;
    tracing::info!("setting {} = {}", key, normalized);
    Ok(normalized)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;

    #[test]
    fn defaults_when_unset() {
        let conn = db::open_in_memory().unwrap();
        let s = Settings::load(&conn).unwrap();
        assert_eq!(s, Settings::default());
        assert_eq!(s.page_size, 5);
        assert_eq!(s.currency, "BRL");
    }

    #[test]
    fn set_normalizes_and_loads() {
        let conn = db::open_in_memory().unwrap();
        assert_eq!(set_setting(&conn, KEY_CURRENCY, " usd ").unwrap(), "USD");
        set_setting(&conn, KEY_PAGE_SIZE, "10").unwrap();
        set_setting(&conn, KEY_RECURRING_INSTALLMENTS, "Both").unwrap();
        let s = Settings::load(&conn).unwrap();
        assert_eq!(s.currency, "USD");
        assert_eq!(s.page_size, 10);
        assert_eq!(s.recurring_installments, RecurringInstallmentPolicy::Both);
    }

    #[test]
    fn rejects_unknown_and_bad_values() {
        let conn = db::open_in_memory().unwrap();
        assert!(set_setting(&conn, "theme", "dark").is_err());
        assert!(set_setting(&conn, KEY_PAGE_SIZE, "0").is_err());
        assert!(set_setting(&conn, KEY_CURRENCY, "R$").is_err());
        assert!(set_setting(&conn, KEY_RECURRING_INSTALLMENTS, "sometimes").is_err());
        assert!(get_setting(&conn, KEY_PAGE_SIZE).unwrap().is_none());
    }
}
