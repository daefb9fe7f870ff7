// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::Error;
use crate::models::{EntryType, EntryUpdate, NewEntry, TimeRange};
use crate::store::entries;
use crate::utils::{maybe_print_json, normalize_date, parse_decimal, parse_month, pretty_table};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &mut Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("update", sub)) => update(conn, sub)?,
        Some(("rm", sub)) => rm(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn parse_type(sub: &clap::ArgMatches) -> Result<EntryType> {
    let raw = sub.get_one::<String>("type").unwrap();
    Ok(EntryType::parse(raw)
        .ok_or_else(|| Error::validation(format!("Unknown entry type '{}'", raw)))?)
}

fn add(conn: &mut Connection, sub: &clap::ArgMatches) -> Result<()> {
    let new = NewEntry {
        account_id: *sub.get_one::<i64>("account").unwrap(),
        affected_account_id: sub.get_one::<i64>("affected").copied(),
        r#type: parse_type(sub)?,
        description: sub.get_one::<String>("description").cloned(),
        category: sub.get_one::<String>("category").cloned(),
        amount: parse_decimal(sub.get_one::<String>("amount").unwrap())?,
        date: normalize_date(sub.get_one::<String>("date").unwrap())?,
    };
    let entry = entries::save_entry(conn, &new)?;
    println!(
        "Recorded {} {} on {} (entry {})",
        entry.r#type.as_str(),
        entry.amount,
        entry.date,
        entry.id
    );
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let account_id = *sub.get_one::<i64>("account").unwrap();
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");

    let range = if let Some(month) = sub.get_one::<String>("month") {
        let (y, m) = parse_month(month)?;
        TimeRange::for_month(y, m)
            .ok_or_else(|| Error::validation(format!("Invalid month '{}'", month)))?
    } else {
        match (sub.get_one::<String>("from"), sub.get_one::<String>("to")) {
            (Some(from), Some(to)) => TimeRange::new(normalize_date(from)?, normalize_date(to)?),
            (Some(from), None) => TimeRange::new(normalize_date(from)?, TimeRange::all().end),
            (None, Some(to)) => TimeRange::new(TimeRange::all().start, normalize_date(to)?),
            (None, None) => TimeRange::all(),
        }
    };

    let data = entries::list_entries(conn, account_id, range)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|e| {
                vec![
                    e.id.to_string(),
                    e.date.to_string(),
                    e.r#type.as_str().to_string(),
                    e.signed_amount(account_id).to_string(),
                    e.category.clone().unwrap_or_default(),
                    e.description.clone().unwrap_or_default(),
                    e.affected_account.clone().unwrap_or_default(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Id", "Date", "Type", "Amount", "Category", "Description", "Counterparty"],
                rows,
            )
        );
    }
    Ok(())
}

fn update(conn: &mut Connection, sub: &clap::ArgMatches) -> Result<()> {
    let up = EntryUpdate {
        id: *sub.get_one::<i64>("id").unwrap(),
        account_id: *sub.get_one::<i64>("account").unwrap(),
        r#type: parse_type(sub)?,
        description: sub.get_one::<String>("description").cloned(),
        category: sub.get_one::<String>("category").cloned(),
        amount: parse_decimal(sub.get_one::<String>("amount").unwrap())?,
        date: normalize_date(sub.get_one::<String>("date").unwrap())?,
    };
    entries::update_entry(conn, &up)?;
    println!("Updated entry {}", up.id);
    Ok(())
}

fn rm(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let ids: Vec<i64> = sub.get_many::<i64>("ids").unwrap().copied().collect();
    let deleted = entries::delete_entries(conn, &ids)?;
    println!("Deleted {} of {} entries", deleted, ids.len());
    if deleted != ids.len() as u64 {
        eprintln!("Some ids did not match any entry");
    }
    Ok(())
}
