// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod cli;
pub mod commands;
pub mod config;
pub mod dashboard;
pub mod db;
pub mod error;
pub mod filters;
pub mod lifecycle;
pub mod metrics;
pub mod models;
pub mod pagination;
pub mod store;
pub mod utils;
pub mod validation;

#[cfg(test)]
mod fixtures;
