// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::store::accounts;
use crate::utils::{maybe_print_json, parse_decimal, pretty_table};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let name = sub.get_one::<String>("name").unwrap();
            let initial = parse_decimal(sub.get_one::<String>("initial").unwrap())?;
            let account = accounts::save_account(conn, name, initial)?;
            println!(
                "Added account '{}' (id {}, starting at {})",
                account.name, account.id, account.initial_amount
            );
        }
        Some(("list", sub)) => {
            let json_flag = sub.get_flag("json");
            let jsonl_flag = sub.get_flag("jsonl");
            let data = accounts::accounts(conn)?;
            if !maybe_print_json(json_flag, jsonl_flag, &data)? {
                let rows: Vec<Vec<String>> = data
                    .iter()
                    .map(|a| {
                        vec![
                            a.id.to_string(),
                            a.name.clone(),
                            a.initial_amount.to_string(),
                            a.total.to_string(),
                        ]
                    })
                    .collect();
                println!("{}", pretty_table(&["Id", "Name", "Initial", "Total"], rows));
            }
        }
        Some(("update", sub)) => {
            let id = *sub.get_one::<i64>("id").unwrap();
            let name = sub.get_one::<String>("name").unwrap();
            // A plain rename keeps the existing initial balance.
            let initial = match sub.get_one::<String>("initial") {
                Some(raw) => parse_decimal(raw)?,
                None => accounts::find_account_by_id(conn, id)?.initial_amount,
            };
            accounts::update_account(conn, id, name, initial)?;
            println!("Updated account {}", id);
        }
        Some(("rm", sub)) => {
            let ids: Vec<i64> = sub.get_many::<i64>("ids").unwrap().copied().collect();
            let deleted = accounts::delete_accounts(conn, &ids)?;
            println!("Deleted {} of {} accounts", deleted, ids.len());
        }
        _ => {}
    }
    Ok(())
}
