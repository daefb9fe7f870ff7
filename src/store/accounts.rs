// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Account CRUD. Balances are never computed here: reads go through the
//! account_total view, which recomputes the signed net of all entries on
//! every query.

use crate::error::{Error, Result};
use crate::models::Account;
use crate::store::get_decimal;
use crate::utils::decimal_from_f64;
use rusqlite::{params, Connection, OptionalExtension, Row};
use rust_decimal::Decimal;

fn row_to_account(r: &Row<'_>) -> rusqlite::Result<Account> {
    Ok(Account {
        id: r.get(0)?,
        name: r.get(1)?,
        initial_amount: get_decimal(r, 2)?,
        total: decimal_from_f64(r.get::<_, f64>(3)?),
    })
}

/// All accounts ordered by name, each with its current total.
pub fn accounts(conn: &Connection) -> Result<Vec<Account>> {
    let mut stmt = conn.prepare(
        "SELECT id, name, initial_amount, total FROM account_total ORDER BY name",
    )?;
    let rows = stmt.query_map([], row_to_account)?;
    let mut out = Vec::new();
    for row in rows {
        out.push(row?);
    }
    Ok(out)
}

pub fn find_account_by_id(conn: &Connection, id: i64) -> Result<Account> {
    conn.query_row(
        "SELECT id, name, initial_amount, total FROM account_total WHERE id = ?1",
        params![id],
        row_to_account,
    )
    .optional()?
    .ok_or(Error::NotFound { what: "account", id })
}

pub fn save_account(conn: &Connection, name: &str, initial_amount: Decimal) -> Result<Account> {
    let name = name.trim();
    if name.is_empty() {
        return Err(Error::validation("Account name must not be empty"));
    }
    conn.execute(
        "INSERT INTO account(name, initial_amount) VALUES (?1, ?2)",
        params![name, initial_amount.to_string()],
    )?;
    find_account_by_id(conn, conn.last_insert_rowid())
}

pub fn update_account(
    conn: &Connection,
    id: i64,
    name: &str,
    initial_amount: Decimal,
) -> Result<()> {
    let name = name.trim();
    if name.is_empty() {
        return Err(Error::validation("Account name must not be empty"));
    }
    let changed = conn.execute(
        "UPDATE account SET name = ?1, initial_amount = ?2 WHERE id = ?3",
        params![name, initial_amount.to_string(), id],
    )?;
    if changed == 0 {
        return Err(Error::NotFound { what: "account", id });
    }
    Ok(())
}

/// Deletes the given ids and reports how many rows actually went away.
/// Entries and categories of a deleted account are left alone.
pub fn delete_accounts(conn: &Connection, ids: &[i64]) -> Result<u64> {
    if ids.is_empty() {
        return Ok(0);
    }
    let placeholders = vec!["?"; ids.len()].join(",");
    let sql = format!("DELETE FROM account WHERE id IN ({})", placeholders);
    let deleted = conn.execute(&sql, rusqlite::params_from_iter(ids.iter()))?;
    Ok(deleted as u64)
}
