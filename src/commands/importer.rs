// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{EntryType, NewEntry};
use crate::store::entries;
use crate::utils::{normalize_date, parse_decimal};
use anyhow::{anyhow, Context, Result};
use csv::ReaderBuilder;
use rusqlite::Connection;

pub fn handle(conn: &mut Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("entries", sub)) => import_entries(conn, sub),
        _ => Ok(()),
    }
}

/// CSV columns: Date and Amount are mandatory, Category and Description
/// optional. The amount column carries the sign: negative rows become
/// expenses (magnitude stored), everything else income. A single malformed
/// row aborts the whole import; nothing is written in that case.
fn import_entries(conn: &mut Connection, sub: &clap::ArgMatches) -> Result<()> {
    let path = sub.get_one::<String>("path").unwrap().trim();
    let account_id = *sub.get_one::<i64>("account").unwrap();
    let affected_account_id = sub.get_one::<i64>("affected").copied();

    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .with_context(|| format!("Open CSV {}", path))?;

    let headers = rdr.headers()?.clone();
    let col = |name: &str| headers.iter().position(|h| h.trim() == name);
    let date_idx = col("Date").ok_or_else(|| anyhow!("'Date' column is mandatory"))?;
    let amount_idx = col("Amount").ok_or_else(|| anyhow!("'Amount' column is mandatory"))?;
    let category_idx = col("Category");
    let description_idx = col("Description");

    let mut items = Vec::new();
    for (i, result) in rdr.records().enumerate() {
        let rec = result?;
        let line = i + 2;

        let date = normalize_date(rec.get(date_idx).unwrap_or(""))
            .with_context(|| format!("Line {}", line))?;
        let signed = parse_decimal(rec.get(amount_idx).unwrap_or(""))
            .with_context(|| format!("Line {}", line))?;
        let (r#type, amount) = if signed.is_sign_negative() && !signed.is_zero() {
            (EntryType::Expense, -signed)
        } else {
            (EntryType::Income, signed)
        };

        let category = category_idx
            .and_then(|idx| rec.get(idx))
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string);
        let description = description_idx
            .and_then(|idx| rec.get(idx))
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string);

        items.push(NewEntry {
            account_id,
            affected_account_id,
            r#type,
            description,
            category,
            amount,
            date,
        });
    }

    let saved = entries::save_entries(conn, &items)?;
    println!("Imported {} entries from {}", saved.len(), path);
    Ok(())
}
