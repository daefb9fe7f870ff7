// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Entry CRUD and bulk import. Every save runs category resolution and the
//! row insert under one transaction; a failure anywhere leaves nothing
//! behind, neither entries nor lazily created categories.

use crate::error::{Error, Result};
use crate::models::{Entry, EntryType, EntryUpdate, NewEntry, TimeRange};
use crate::store::{categories, get_decimal};
use rusqlite::{params, Connection, OptionalExtension, Row};
use rust_decimal::Decimal;

const ENTRY_COLUMNS: &str = "e.id, e.account_id, e.affected_account_id,
       a1.name AS account, a2.name AS affected_account,
       e.type, e.description, c.name AS category, e.amount, e.date";

const ENTRY_JOINS: &str = "FROM entry e
       LEFT JOIN account a1 ON e.account_id = a1.id
       LEFT JOIN account a2 ON e.affected_account_id = a2.id
       LEFT JOIN category c ON e.category_id = c.id";

fn row_to_entry(r: &Row<'_>) -> rusqlite::Result<Entry> {
    Ok(Entry {
        id: r.get(0)?,
        account_id: r.get(1)?,
        affected_account_id: r.get(2)?,
        account: r.get(3)?,
        affected_account: r.get(4)?,
        r#type: r.get(5)?,
        description: r.get(6)?,
        category: r.get(7)?,
        amount: get_decimal(r, 8)?,
        date: r.get(9)?,
    })
}

fn check_magnitude(amount: Decimal) -> Result<()> {
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(Error::validation(format!(
            "Entry amount must be a non-negative magnitude, got {}",
            amount
        )));
    }
    Ok(())
}

/// Resolves an optional category name for a save. Entries without a name
/// carry no category and skip resolution entirely.
fn resolve_category_id(
    conn: &Connection,
    account_id: i64,
    r#type: EntryType,
    name: Option<&str>,
) -> Result<Option<i64>> {
    match name.map(str::trim) {
        Some(n) if !n.is_empty() => {
            let category = categories::resolve_or_create(conn, account_id, n, r#type)?;
            Ok(Some(category.id))
        }
        _ => Ok(None),
    }
}

/// Entries where the account is owner or affected party, with dates inside
/// the inclusive range, newest first (same-day ties broken by id).
pub fn list_entries(conn: &Connection, account_id: i64, range: TimeRange) -> Result<Vec<Entry>> {
    let sql = format!(
        "SELECT {} {} WHERE (e.account_id = ?1 OR e.affected_account_id = ?1)
           AND e.date >= ?2 AND e.date <= ?3
         ORDER BY e.date DESC, e.id DESC",
        ENTRY_COLUMNS, ENTRY_JOINS
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params![account_id, range.start, range.end], row_to_entry)?;
    let mut out = Vec::new();
    for row in rows {
        out.push(row?);
    }
    Ok(out)
}

/// One entry by id, joined with account and category names.
pub fn find_entry(conn: &Connection, id: i64) -> Result<Entry> {
    let sql = format!("SELECT {} {} WHERE e.id = ?1", ENTRY_COLUMNS, ENTRY_JOINS);
    conn.query_row(&sql, params![id], row_to_entry)
        .optional()?
        .ok_or(Error::NotFound { what: "entry", id })
}

/// Saves one entry, resolving its category under the same transaction, and
/// returns the stored row with its generated id.
pub fn save_entry(conn: &mut Connection, new: &NewEntry) -> Result<Entry> {
    check_magnitude(new.amount)?;
    let tx = conn.transaction()?;

    let category_id = resolve_category_id(&tx, new.account_id, new.r#type, new.category.as_deref())?;
    tx.execute(
        "INSERT INTO entry(account_id, affected_account_id, type, description, category_id, amount, date)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            new.account_id,
            new.affected_account_id,
            new.r#type,
            new.description,
            category_id,
            new.amount.to_string(),
            new.date
        ],
    )?;
    let id = tx.last_insert_rowid();
    let entry = find_entry(&tx, id)?;

    tx.commit()?;
    Ok(entry)
}

/// Bulk save for one account. Resolves the distinct (name, type) category
/// pairs in one batch, then inserts every entry, all under a single
/// transaction: a failure partway leaves no orphan categories and no
/// partial entry set.
pub fn save_entries(conn: &mut Connection, items: &[NewEntry]) -> Result<Vec<Entry>> {
    let Some(first) = items.first() else {
        return Ok(Vec::new());
    };
    let account_id = first.account_id;

    let mut pairs: Vec<(String, EntryType)> = Vec::new();
    for item in items {
        if item.account_id != account_id {
            return Err(Error::validation(
                "All entries in a batch must belong to the same account",
            ));
        }
        check_magnitude(item.amount)?;
        if let Some(name) = item.category.as_deref().map(str::trim) {
            if !name.is_empty() {
                if !item.r#type.is_categorizable() {
                    return Err(Error::validation(
                        "Transfer entries cannot carry a category",
                    ));
                }
                let key = (name.to_string(), item.r#type);
                if !pairs.contains(&key) {
                    pairs.push(key);
                }
            }
        }
    }

    let tx = conn.transaction()?;
    let resolved = categories::resolve_or_create_batch(&tx, account_id, &pairs)?;

    let mut ids = Vec::with_capacity(items.len());
    {
        let mut stmt = tx.prepare(
            "INSERT INTO entry(account_id, affected_account_id, type, description, category_id, amount, date)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        )?;
        for item in items {
            let category_id = match item.category.as_deref().map(str::trim) {
                Some(n) if !n.is_empty() => {
                    resolved.get(&(n.to_string(), item.r#type)).map(|c| c.id)
                }
                _ => None,
            };
            stmt.execute(params![
                item.account_id,
                item.affected_account_id,
                item.r#type,
                item.description,
                category_id,
                item.amount.to_string(),
                item.date
            ])?;
            ids.push(tx.last_insert_rowid());
        }
    }

    let mut saved = Vec::with_capacity(ids.len());
    for id in ids {
        saved.push(find_entry(&tx, id)?);
    }
    tx.commit()?;
    Ok(saved)
}

/// Updates the mutable fields of the row matching (id, account_id),
/// re-resolving the category first. Rolls everything back (including a
/// freshly created category) when the target row does not exist.
pub fn update_entry(conn: &mut Connection, up: &EntryUpdate) -> Result<()> {
    check_magnitude(up.amount)?;
    let tx = conn.transaction()?;

    let category_id = resolve_category_id(&tx, up.account_id, up.r#type, up.category.as_deref())?;
    let changed = tx.execute(
        "UPDATE entry SET type = ?1, description = ?2, amount = ?3, date = ?4, category_id = ?5
         WHERE id = ?6 AND account_id = ?7",
        params![
            up.r#type,
            up.description,
            up.amount.to_string(),
            up.date,
            category_id,
            up.id,
            up.account_id
        ],
    )?;
    if changed == 0 {
        return Err(Error::NotFound {
            what: "entry",
            id: up.id,
        });
    }
    tx.commit()?;
    Ok(())
}

/// Deletes the given ids in one statement and reports how many rows were
/// actually removed, so callers can surface partial matches.
pub fn delete_entries(conn: &Connection, ids: &[i64]) -> Result<u64> {
    if ids.is_empty() {
        return Ok(0);
    }
    let placeholders = vec!["?"; ids.len()].join(",");
    let sql = format!("DELETE FROM entry WHERE id IN ({})", placeholders);
    let deleted = conn.execute(&sql, rusqlite::params_from_iter(ids.iter()))?;
    Ok(deleted as u64)
}
