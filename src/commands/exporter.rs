// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::TimeRange;
use crate::store::entries;
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("entries", sub)) => export_entries(conn, sub),
        _ => Ok(()),
    }
}

/// Writes Date/Amount/Category/Description rows, newest first. Amounts get
/// their presentation sign as seen from the exporting account: income
/// positive, expense negative, transfers negative when outgoing and positive
/// when incoming.
fn export_entries(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let account_id = *sub.get_one::<i64>("account").unwrap();
    let out = sub.get_one::<String>("out").unwrap();

    let data = entries::list_entries(conn, account_id, TimeRange::all())?;

    let mut wtr = csv::Writer::from_path(out)?;
    wtr.write_record(["Date", "Amount", "Category", "Description"])?;
    for entry in &data {
        wtr.write_record([
            entry.date.to_string(),
            entry.signed_amount(account_id).to_string(),
            entry.category.clone().unwrap_or_default(),
            entry.description.clone().unwrap_or_default(),
        ])?;
    }
    wtr.flush()?;

    println!("Exported {} entries to {}", data.len(), out);
    Ok(())
}
