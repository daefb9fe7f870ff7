// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use kasbuk::commands::{exporter, importer};
use kasbuk::models::{EntryType, NewEntry, TimeRange};
use kasbuk::store::{accounts, entries};
use kasbuk::{cli, utils};
use rusqlite::Connection;
use rust_decimal::Decimal;
use std::io::Write;
use tempfile::NamedTempFile;

fn setup() -> (Connection, i64) {
    let mut conn = Connection::open_in_memory().unwrap();
    kasbuk::db::init_schema(&mut conn).unwrap();
    let account = accounts::save_account(&conn, "Checking", Decimal::ZERO).unwrap();
    (conn, account.id)
}

fn csv_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{}", content).unwrap();
    file.flush().unwrap();
    file
}

fn run_import(conn: &mut Connection, path: &str, account_id: i64) -> anyhow::Result<()> {
    let account = account_id.to_string();
    let matches = cli::build_cli().get_matches_from([
        "kasbuk", "import", "entries", "--path", path, "--account", &account,
    ]);
    if let Some(("import", import_m)) = matches.subcommand() {
        importer::handle(conn, import_m)
    } else {
        panic!("no import subcommand");
    }
}

#[test]
fn dates_are_normalized_on_input() {
    assert_eq!(
        utils::normalize_date("2024-1-5").unwrap().to_string(),
        "2024-01-05"
    );
    assert_eq!(
        utils::normalize_date("2024-Jan-05").unwrap().to_string(),
        "2024-01-05"
    );
    assert_eq!(
        utils::normalize_date("05/01/2024").unwrap().to_string(),
        "2024-01-05"
    );
    utils::normalize_date("13/13/2024").unwrap_err();
    utils::normalize_date("yesterday").unwrap_err();
}

#[test]
fn import_normalizes_dates_and_derives_types() {
    let (mut conn, account_id) = setup();
    let file = csv_file(
        "Date,Amount,Category,Description\n\
         2024-1-5,-50,Food,groceries\n\
         2024-Jan-05,100,,paycheck\n\
         05/01/2024,-7.50,Food,coffee\n",
    );
    run_import(&mut conn, file.path().to_str().unwrap(), account_id).unwrap();

    let listed =
        entries::list_entries(&conn, account_id, TimeRange::for_month(2024, 1).unwrap()).unwrap();
    assert_eq!(listed.len(), 3);
    for entry in &listed {
        assert_eq!(entry.date.to_string(), "2024-01-05");
    }

    let expenses: Vec<_> = listed
        .iter()
        .filter(|e| e.r#type == EntryType::Expense)
        .collect();
    assert_eq!(expenses.len(), 2);
    // Magnitudes stored positive regardless of the CSV sign.
    assert!(expenses.iter().all(|e| e.amount > Decimal::ZERO));

    let categories: i64 = conn
        .query_row("SELECT COUNT(*) FROM category", [], |r| r.get(0))
        .unwrap();
    assert_eq!(categories, 1); // Food, deduplicated
}

#[test]
fn malformed_date_aborts_whole_import() {
    let (mut conn, account_id) = setup();
    let file = csv_file(
        "Date,Amount,Category,Description\n\
         2024-01-05,-50,Food,ok\n\
         13/13/2024,-10,Drinks,bad date\n",
    );
    run_import(&mut conn, file.path().to_str().unwrap(), account_id).unwrap_err();

    let entry_count: i64 = conn
        .query_row("SELECT COUNT(*) FROM entry", [], |r| r.get(0))
        .unwrap();
    let category_count: i64 = conn
        .query_row("SELECT COUNT(*) FROM category", [], |r| r.get(0))
        .unwrap();
    assert_eq!(entry_count, 0);
    assert_eq!(category_count, 0);
}

#[test]
fn malformed_amount_aborts_whole_import() {
    let (mut conn, account_id) = setup();
    let file = csv_file(
        "Date,Amount,Category,Description\n\
         2024-01-05,fifty,Food,bad amount\n",
    );
    run_import(&mut conn, file.path().to_str().unwrap(), account_id).unwrap_err();

    let entry_count: i64 = conn
        .query_row("SELECT COUNT(*) FROM entry", [], |r| r.get(0))
        .unwrap();
    assert_eq!(entry_count, 0);
}

#[test]
fn missing_amount_column_is_rejected() {
    let (mut conn, account_id) = setup();
    let file = csv_file("Date,Category\n2024-01-05,Food\n");
    run_import(&mut conn, file.path().to_str().unwrap(), account_id).unwrap_err();
}

#[test]
fn export_applies_presentation_signs() {
    let (mut conn, account_id) = setup();
    let receiver = accounts::save_account(&conn, "Savings", Decimal::ZERO).unwrap();

    entries::save_entry(
        &mut conn,
        &NewEntry {
            account_id,
            affected_account_id: None,
            r#type: EntryType::Expense,
            description: Some("groceries".to_string()),
            category: Some("Food".to_string()),
            amount: Decimal::from(30),
            date: chrono::NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
        },
    )
    .unwrap();
    entries::save_entry(
        &mut conn,
        &NewEntry {
            account_id,
            affected_account_id: Some(receiver.id),
            r#type: EntryType::Transfer,
            description: None,
            category: None,
            amount: Decimal::from(40),
            date: chrono::NaiveDate::from_ymd_opt(2024, 1, 6).unwrap(),
        },
    )
    .unwrap();

    let export = |viewer: i64| -> String {
        let out = NamedTempFile::new().unwrap();
        let path = out.path().to_str().unwrap().to_string();
        let viewer = viewer.to_string();
        let matches = cli::build_cli().get_matches_from([
            "kasbuk", "export", "entries", "--account", &viewer, "--out", &path,
        ]);
        if let Some(("export", export_m)) = matches.subcommand() {
            exporter::handle(&conn, export_m).unwrap();
        } else {
            panic!("no export subcommand");
        }
        std::fs::read_to_string(&path).unwrap()
    };

    let from_owner = export(account_id);
    assert!(from_owner.contains("2024-01-05,-30,Food,groceries"));
    assert!(from_owner.contains("2024-01-06,-40,,"));

    // The same transfer row flips sign when the receiver exports it.
    let from_receiver = export(receiver.id);
    assert!(from_receiver.contains("2024-01-06,40,,"));
}
