// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! The ledger engine: category resolution, entry CRUD and bulk import,
//! account CRUD over the balance projection, and chart aggregations.
//!
//! Every mutating operation that touches more than one row runs inside a
//! single rusqlite transaction; category creation triggered by an entry save
//! commits or rolls back together with the entry itself.

pub mod accounts;
pub mod categories;
pub mod charts;
pub mod entries;

use rust_decimal::Decimal;

/// Reads an amount column stored as decimal TEXT.
pub(crate) fn get_decimal(row: &rusqlite::Row<'_>, idx: usize) -> rusqlite::Result<Decimal> {
    let s: String = row.get(idx)?;
    s.parse::<Decimal>().map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(e))
    })
}
