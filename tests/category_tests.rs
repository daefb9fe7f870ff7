// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use kasbuk::error::Error;
use kasbuk::models::EntryType;
use kasbuk::store::{accounts, categories};
use rusqlite::Connection;
use rust_decimal::Decimal;

fn setup() -> (Connection, i64) {
    let mut conn = Connection::open_in_memory().unwrap();
    kasbuk::db::init_schema(&mut conn).unwrap();
    let account = accounts::save_account(&conn, "Checking", Decimal::ZERO).unwrap();
    (conn, account.id)
}

#[test]
fn resolve_twice_returns_same_identity() {
    let (conn, account_id) = setup();
    let first = categories::resolve_or_create(&conn, account_id, "Groceries", EntryType::Expense)
        .unwrap();
    let second = categories::resolve_or_create(&conn, account_id, "Groceries", EntryType::Expense)
        .unwrap();
    assert_eq!(first.id, second.id);

    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM category", [], |r| r.get(0))
        .unwrap();
    assert_eq!(count, 1);
}

#[test]
fn resolve_rejects_empty_name_and_transfer_type() {
    let (conn, account_id) = setup();
    let err = categories::resolve_or_create(&conn, account_id, "  ", EntryType::Expense);
    assert!(matches!(err, Err(Error::Validation(_))));

    let err = categories::resolve_or_create(&conn, account_id, "Moves", EntryType::Transfer);
    assert!(matches!(err, Err(Error::Validation(_))));
}

#[test]
fn same_name_different_type_are_distinct() {
    let (conn, account_id) = setup();
    let expense =
        categories::resolve_or_create(&conn, account_id, "Misc", EntryType::Expense).unwrap();
    let income =
        categories::resolve_or_create(&conn, account_id, "Misc", EntryType::Income).unwrap();
    assert_ne!(expense.id, income.id);
}

#[test]
fn resolve_returns_row_created_by_another_writer() {
    let (conn, account_id) = setup();
    // Simulate a concurrent writer winning the insert race.
    conn.execute(
        "INSERT INTO category(account_id, name, type) VALUES (?1, 'Rent', 2)",
        [account_id],
    )
    .unwrap();
    let existing: i64 = conn
        .query_row("SELECT id FROM category WHERE name = 'Rent'", [], |r| {
            r.get(0)
        })
        .unwrap();

    let resolved =
        categories::resolve_or_create(&conn, account_id, "Rent", EntryType::Expense).unwrap();
    assert_eq!(resolved.id, existing);
}

#[test]
fn batch_inserts_only_missing_pairs() {
    let (conn, account_id) = setup();
    let existing =
        categories::resolve_or_create(&conn, account_id, "Food", EntryType::Expense).unwrap();

    let pairs = vec![
        ("Food".to_string(), EntryType::Expense),
        ("Salary".to_string(), EntryType::Income),
        ("Salary".to_string(), EntryType::Income), // duplicate within batch
    ];
    let map = categories::resolve_or_create_batch(&conn, account_id, &pairs).unwrap();

    assert_eq!(map.len(), 2);
    assert_eq!(
        map[&("Food".to_string(), EntryType::Expense)].id,
        existing.id
    );
    assert!(map.contains_key(&("Salary".to_string(), EntryType::Income)));

    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM category", [], |r| r.get(0))
        .unwrap();
    assert_eq!(count, 2);
}

#[test]
fn batch_rejects_invalid_pair() {
    let (conn, account_id) = setup();
    let pairs = vec![("Ok".to_string(), EntryType::Expense), (String::new(), EntryType::Income)];
    let err = categories::resolve_or_create_batch(&conn, account_id, &pairs);
    assert!(matches!(err, Err(Error::Validation(_))));
}

#[test]
fn listing_is_ordered_by_name() {
    let (conn, account_id) = setup();
    for name in ["Zoo", "Art", "Mid"] {
        categories::resolve_or_create(&conn, account_id, name, EntryType::Expense).unwrap();
    }
    let listed = categories::categories(&conn, account_id).unwrap();
    let names: Vec<&str> = listed.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, ["Art", "Mid", "Zoo"]);
}
