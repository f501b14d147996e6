// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::gateway::Gateway;
use crate::session::TokenStore;
use chrono::FixedOffset;

pub mod calendar;
pub mod categories;
pub mod dashboard;
pub mod exporter;
pub mod session;
pub mod settings;
pub mod transactions;
pub mod wallets;

/// What every API-backed command needs.
pub struct Context<S: TokenStore> {
    pub gateway: Gateway<S>,
    pub tz: FixedOffset,
}
