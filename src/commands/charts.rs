// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::Error;
use crate::models::EntryType;
use crate::store::charts;
use crate::utils::{maybe_print_json, parse_month, pretty_table};
use anyhow::Result;
use chrono::Datelike;
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("balances", sub)) => balances(conn, sub)?,
        Some(("range", sub)) => range(conn, sub)?,
        Some(("spend", sub)) => spend(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn year_of(sub: &clap::ArgMatches) -> i32 {
    sub.get_one::<i32>("year")
        .copied()
        .unwrap_or_else(|| chrono::Utc::now().year())
}

fn balances(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = charts::month_start_balances_for_year(conn, year_of(sub))?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|s| {
                vec![
                    s.account_id.to_string(),
                    format!("{:02}", s.month),
                    s.amount.to_string(),
                ]
            })
            .collect();
        println!("{}", pretty_table(&["Account", "Month", "Balance"], rows));
    }
    Ok(())
}

fn range(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let year = year_of(sub);
    let data = charts::expense_range_for_year(conn, year)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        println!(
            "{}: min {} / max {}",
            year, data.min_amount, data.max_amount
        );
    }
    Ok(())
}

fn spend(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let account_id = *sub.get_one::<i64>("account").unwrap();
    let (year, month) = parse_month(sub.get_one::<String>("month").unwrap())?;
    let raw = sub.get_one::<String>("type").unwrap();
    let r#type = EntryType::parse(raw)
        .ok_or_else(|| Error::validation(format!("Unknown entry type '{}'", raw)))?;

    let data = charts::category_expense_totals(conn, account_id, year, month, r#type)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|s| vec![s.category.name.clone(), s.expense.to_string()])
            .collect();
        println!("{}", pretty_table(&["Category", "Total"], rows));
    }
    Ok(())
}
