// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::ArgMatches;
use rust_decimal::Decimal;

use crate::filters::{FilterState, TypeFilter};
use crate::models::Id;
use crate::utils::{parse_date, parse_decimal};

pub mod accounts;
pub mod cards;
pub mod categories;
pub mod config;
pub mod goals;
pub mod members;
pub mod reports;
pub mod transactions;

pub(crate) fn required<'a>(m: &'a ArgMatches, name: &str) -> Result<&'a str> {
    m.get_one::<String>(name)
        .map(String::as_str)
        .with_context(|| format!("Missing argument '{}'", name))
}

pub(crate) fn required_id(m: &ArgMatches, name: &str) -> Result<Id> {
    m.get_one::<Id>(name)
        .copied()
        .with_context(|| format!("Missing argument '{}'", name))
}

pub(crate) fn opt_string(m: &ArgMatches, name: &str) -> Option<String> {
    m.get_one::<String>(name).cloned()
}

pub(crate) fn opt_decimal(m: &ArgMatches, name: &str) -> Result<Option<Decimal>> {
    m.get_one::<String>(name)
        .map(|s| parse_decimal(s))
        .transpose()
}

pub(crate) fn opt_date(m: &ArgMatches, name: &str) -> Result<Option<NaiveDate>> {
    m.get_one::<String>(name).map(|s| parse_date(s)).transpose()
}

/// Builds the dashboard filters from `--member --from --to --type --search`.
pub fn filters_from(m: &ArgMatches) -> Result<FilterState> {
    let mut f = FilterState::default();
    f.set_selected_member(m.get_one::<Id>("member").copied());
    f.set_date_range(opt_date(m, "from")?, opt_date(m, "to")?);
    if let Some(t) = m.get_one::<String>("type") {
        f.set_transaction_type(t.parse::<TypeFilter>()?);
    }
    if let Some(s) = m.get_one::<String>("search") {
        f.set_search_text(s.as_str());
    }
    Ok(f)
}
