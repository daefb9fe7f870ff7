// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use rusqlite::Connection;
use std::fs;
use std::path::PathBuf;

static APP: Lazy<(&str, &str, &str)> = Lazy::new(|| ("com.alphavelocity", "Kasbuk", "kasbuk"));

pub fn db_path() -> Result<PathBuf> {
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific data dir")?;
    let data_dir = proj.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data dir")?;
    Ok(data_dir.join("kasbuk.sqlite"))
}

pub fn open_or_init() -> Result<Connection> {
    let path = db_path()?;
    let mut conn =
        Connection::open(&path).with_context(|| format!("Open DB at {}", path.display()))?;
    init_schema(&mut conn)?;
    Ok(conn)
}

/// Creates tables, indexes, and the derived read-only views. Amounts are
/// stored as decimal TEXT and aggregated as REAL inside the views.
///
/// The two views are the projections the store reads but never maintains:
/// `account_total` and `cumulative_amount` are recomputed by SQLite on every
/// read, so they always reflect the current entry table.
pub fn init_schema(conn: &mut Connection) -> Result<()> {
    conn.execute_batch(
        r#"
    PRAGMA foreign_keys = ON;

    CREATE TABLE IF NOT EXISTS account(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        initial_amount TEXT NOT NULL DEFAULT '0',
        created_at TEXT NOT NULL DEFAULT (datetime('now'))
    );

    -- One category per (account, name, type). The unique index is what makes
    -- concurrent resolve-or-create safe: inserts are conflict-ignoring and the
    -- canonical row is re-fetched afterwards.
    --
    -- Account references in category and entry are deliberately not declared
    -- as foreign keys: deleting an account must leave its entries and
    -- categories behind as orphans rather than cascade or refuse.
    CREATE TABLE IF NOT EXISTS category(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        account_id INTEGER NOT NULL,
        name TEXT NOT NULL,
        type INTEGER NOT NULL CHECK(type IN (1, 2)),
        UNIQUE(account_id, name, type)
    );

    CREATE TABLE IF NOT EXISTS entry(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        account_id INTEGER NOT NULL,
        affected_account_id INTEGER,
        type INTEGER NOT NULL CHECK(type IN (1, 2, 3)),
        description TEXT,
        category_id INTEGER,
        amount TEXT NOT NULL,
        date TEXT NOT NULL,
        FOREIGN KEY(category_id) REFERENCES category(id)
    );
    CREATE INDEX IF NOT EXISTS idx_entry_date ON entry(date);
    CREATE INDEX IF NOT EXISTS idx_entry_account ON entry(account_id);

    -- Balance per account: initial amount plus the signed net of every entry
    -- touching the account. Income counts +, expense -, transfer - for the
    -- owner and + for the affected account.
    CREATE VIEW IF NOT EXISTS account_total AS
    SELECT a.id,
           a.name,
           a.initial_amount,
           CAST(a.initial_amount AS REAL) + IFNULL((
               SELECT SUM(CASE
                   WHEN e.type = 1 THEN CAST(e.amount AS REAL)
                   WHEN e.type = 2 THEN -CAST(e.amount AS REAL)
                   WHEN e.account_id = a.id THEN -CAST(e.amount AS REAL)
                   ELSE CAST(e.amount AS REAL)
               END)
               FROM entry e
               WHERE e.account_id = a.id
                  OR (e.type = 3 AND e.affected_account_id = a.id)
           ), 0) AS total
    FROM account a;

    -- Balance of each account at the start of every month that occurs in the
    -- entry table (month is 'YYYY-MM').
    CREATE VIEW IF NOT EXISTS cumulative_amount AS
    SELECT a.id AS account_id,
           m.month AS month,
           CAST(a.initial_amount AS REAL) + IFNULL((
               SELECT SUM(CASE
                   WHEN e.type = 1 THEN CAST(e.amount AS REAL)
                   WHEN e.type = 2 THEN -CAST(e.amount AS REAL)
                   WHEN e.account_id = a.id THEN -CAST(e.amount AS REAL)
                   ELSE CAST(e.amount AS REAL)
               END)
               FROM entry e
               WHERE (e.account_id = a.id
                      OR (e.type = 3 AND e.affected_account_id = a.id))
                 AND e.date < m.month || '-01'
           ), 0) AS amount
    FROM account a
    CROSS JOIN (SELECT DISTINCT substr(date, 1, 7) AS month FROM entry) m;
    "#,
    )?;
    Ok(())
}
