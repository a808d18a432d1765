// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use rusqlite::Connection;

use crate::models::{Budget, Investment, Transaction};
use crate::store;

/// A point-in-time copy of the records every derived view is computed from.
/// Callers load one, pass it around and drop it; nothing is cached.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ledger {
    pub transactions: Vec<Transaction>,
    pub investments: Vec<Investment>,
    pub budgets: Vec<Budget>,
}

impl Ledger {
    pub fn load(conn: &Connection) -> Result<Self> {
        Ok(Ledger {
            transactions: store::list_transactions(conn)?,
            investments: store::list_investments(conn)?,
            budgets: store::list_all_budgets(conn)?,
        })
    }

    /// Like [`Ledger::load`], but a failed read yields an empty ledger so the
    /// dashboard still renders with zeros.
    pub fn load_or_empty(conn: &Connection) -> Self {
        match Self::load(conn) {
            Ok(ledger) => ledger,
            Err(e) => {
                log::warn!("could not load ledger, showing empty data: {:#}", e);
                Ledger::default()
            }
        }
    }
}
