// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Create-or-get resolution of categories.
//!
//! A category is identified by (account_id, name, type) and backed by a
//! unique index on that triple. Creation is always a conflict-ignoring
//! insert followed by a fetch of the canonical row, so two writers racing
//! to create the same category both end up with the same identity. The
//! plain select-then-insert the naive version would use is a race and is
//! deliberately not used here.
//!
//! Callers pass the connection (or open transaction) they are already
//! writing under, so resolution commits or rolls back with the entry save
//! that triggered it.

use crate::error::{Error, Result};
use crate::models::{Category, EntryType};
use rusqlite::{params, Connection, OptionalExtension};
use std::collections::HashMap;

fn validate(name: &str, r#type: EntryType) -> Result<()> {
    if name.is_empty() {
        return Err(Error::validation(
            "Category name must not be empty; entries without a category skip resolution",
        ));
    }
    match r#type {
        EntryType::Income | EntryType::Expense => Ok(()),
        EntryType::Transfer => Err(Error::validation(
            "Category type must be income or expense, not transfer",
        )),
    }
}

/// Returns the category with the given (account, name, type), creating it if
/// absent. Idempotent: repeated calls return the same identity.
pub fn resolve_or_create(
    conn: &Connection,
    account_id: i64,
    name: &str,
    r#type: EntryType,
) -> Result<Category> {
    let name = name.trim();
    validate(name, r#type)?;

    conn.execute(
        "INSERT INTO category(account_id, name, type) VALUES (?1, ?2, ?3)
         ON CONFLICT(account_id, name, type) DO NOTHING",
        params![account_id, name, r#type],
    )?;

    let found = conn
        .query_row(
            "SELECT id, account_id, name, type FROM category
             WHERE account_id = ?1 AND name = ?2 AND type = ?3",
            params![account_id, name, r#type],
            |r| {
                Ok(Category {
                    id: r.get(0)?,
                    account_id: r.get(1)?,
                    name: r.get(2)?,
                    r#type: r.get(3)?,
                })
            },
        )
        .optional()?;

    found.ok_or_else(|| {
        Error::Conflict(format!(
            "Category '{}' vanished between insert and fetch",
            name
        ))
    })
}

/// Batch variant of [`resolve_or_create`]: one select of the existing
/// categories, one conflict-ignoring insert pass for the missing ones, one
/// re-select. The returned map is keyed by the canonical (name, type) pair.
pub fn resolve_or_create_batch(
    conn: &Connection,
    account_id: i64,
    pairs: &[(String, EntryType)],
) -> Result<HashMap<(String, EntryType), Category>> {
    let mut requested: Vec<(String, EntryType)> = Vec::new();
    for (name, r#type) in pairs {
        let name = name.trim();
        validate(name, *r#type)?;
        let key = (name.to_string(), *r#type);
        if !requested.contains(&key) {
            requested.push(key);
        }
    }
    if requested.is_empty() {
        return Ok(HashMap::new());
    }

    let names: Vec<String> = requested.iter().map(|(n, _)| n.clone()).collect();
    let existing = find_by_names(conn, account_id, &names)?;

    let mut stmt = conn.prepare(
        "INSERT INTO category(account_id, name, type) VALUES (?1, ?2, ?3)
         ON CONFLICT(account_id, name, type) DO NOTHING",
    )?;
    for (name, r#type) in &requested {
        let present = existing
            .iter()
            .any(|c| &c.name == name && c.r#type == *r#type);
        if !present {
            stmt.execute(params![account_id, name, r#type])?;
        }
    }

    let mut map = HashMap::with_capacity(requested.len());
    for category in find_by_names(conn, account_id, &names)? {
        let key = (category.name.clone(), category.r#type);
        if requested.contains(&key) {
            map.insert(key, category);
        }
    }
    Ok(map)
}

/// All categories of one account, ordered by name.
pub fn categories(conn: &Connection, account_id: i64) -> Result<Vec<Category>> {
    let mut stmt = conn.prepare(
        "SELECT id, account_id, name, type FROM category
         WHERE account_id = ?1 ORDER BY name",
    )?;
    let rows = stmt.query_map(params![account_id], |r| {
        Ok(Category {
            id: r.get(0)?,
            account_id: r.get(1)?,
            name: r.get(2)?,
            r#type: r.get(3)?,
        })
    })?;
    let mut out = Vec::new();
    for row in rows {
        out.push(row?);
    }
    Ok(out)
}

fn find_by_names(conn: &Connection, account_id: i64, names: &[String]) -> Result<Vec<Category>> {
    if names.is_empty() {
        return Ok(Vec::new());
    }
    let placeholders = vec!["?"; names.len()].join(",");
    let sql = format!(
        "SELECT id, account_id, name, type FROM category
         WHERE account_id = ? AND name IN ({})",
        placeholders
    );
    let mut values: Vec<rusqlite::types::Value> = Vec::with_capacity(names.len() + 1);
    values.push(account_id.into());
    for name in names {
        values.push(name.clone().into());
    }

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(rusqlite::params_from_iter(values), |r| {
        Ok(Category {
            id: r.get(0)?,
            account_id: r.get(1)?,
            name: r.get(2)?,
            r#type: r.get(3)?,
        })
    })?;
    let mut out = Vec::new();
    for row in rows {
        out.push(row?);
    }
    Ok(out)
}
