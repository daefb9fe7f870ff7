// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use kasbuk::error::Error;
use kasbuk::models::{EntryType, NewEntry};
use kasbuk::store::{accounts, charts, entries};
use rusqlite::Connection;
use rust_decimal::Decimal;

fn setup() -> (Connection, i64) {
    let mut conn = Connection::open_in_memory().unwrap();
    kasbuk::db::init_schema(&mut conn).unwrap();
    let account = accounts::save_account(&conn, "Checking", Decimal::ZERO).unwrap();
    (conn, account.id)
}

fn save(conn: &mut Connection, account_id: i64, r#type: EntryType, amount: i64, date: &str, category: Option<&str>) {
    entries::save_entry(
        conn,
        &NewEntry {
            account_id,
            affected_account_id: None,
            r#type,
            description: None,
            category: category.map(str::to_string),
            amount: Decimal::from(amount),
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
        },
    )
    .unwrap();
}

#[test]
fn month_start_balances_cover_months_with_data() {
    let (mut conn, account_id) = setup();
    save(&mut conn, account_id, EntryType::Expense, 100, "2023-05-10", None);
    save(&mut conn, account_id, EntryType::Income, 300, "2023-06-15", None);

    let series = charts::month_start_balances_for_year(&conn, 2023).unwrap();
    assert_eq!(series.len(), 2);
    assert_eq!(series[0].month, 5);
    assert_eq!(series[0].amount, Decimal::ZERO);
    assert_eq!(series[1].month, 6);
    assert_eq!(series[1].amount, Decimal::from(-100));
}

#[test]
fn expense_range_is_scoped_to_the_year() {
    let (mut conn, account_id) = setup();
    save(&mut conn, account_id, EntryType::Expense, 100, "2023-05-10", None);
    save(&mut conn, account_id, EntryType::Income, 300, "2023-06-15", None);

    let range_2023 = charts::expense_range_for_year(&conn, 2023).unwrap();
    assert_eq!(range_2023.min_amount, Decimal::from(-100));
    assert_eq!(range_2023.max_amount, Decimal::ZERO);

    // Nothing dated 2024, so its range must be empty rather than echoing 2023.
    let range_2024 = charts::expense_range_for_year(&conn, 2024).unwrap();
    assert_eq!(range_2024.min_amount, Decimal::ZERO);
    assert_eq!(range_2024.max_amount, Decimal::ZERO);
}

#[test]
fn category_totals_group_by_category_within_one_month() {
    let (mut conn, account_id) = setup();
    save(&mut conn, account_id, EntryType::Expense, 50, "2024-01-05", Some("Food"));
    save(&mut conn, account_id, EntryType::Expense, 25, "2024-01-20", Some("Food"));
    save(&mut conn, account_id, EntryType::Expense, 100, "2024-01-10", Some("Rent"));
    save(&mut conn, account_id, EntryType::Income, 1000, "2024-01-25", Some("Salary"));
    // Same month of a different year must stay out of scope.
    save(&mut conn, account_id, EntryType::Expense, 999, "2023-01-05", Some("Food"));

    let totals =
        charts::category_expense_totals(&conn, account_id, 2024, 1, EntryType::Expense).unwrap();
    assert_eq!(totals.len(), 2);
    assert_eq!(totals[0].category.name, "Food");
    assert_eq!(totals[0].expense, Decimal::from(75));
    assert_eq!(totals[0].month, 1);
    assert_eq!(totals[1].category.name, "Rent");
    assert_eq!(totals[1].expense, Decimal::from(100));

    let income =
        charts::category_expense_totals(&conn, account_id, 2024, 1, EntryType::Income).unwrap();
    assert_eq!(income.len(), 1);
    assert_eq!(income[0].category.name, "Salary");
    assert_eq!(income[0].expense, Decimal::from(1000));
}

#[test]
fn category_totals_reject_transfer_scope() {
    let (conn, account_id) = setup();
    let err = charts::category_expense_totals(&conn, account_id, 2024, 1, EntryType::Transfer);
    assert!(matches!(err, Err(Error::Validation(_))));
}

#[test]
fn category_totals_are_scoped_to_the_account() {
    let (mut conn, account_id) = setup();
    let other = accounts::save_account(&conn, "Other", Decimal::ZERO).unwrap();
    save(&mut conn, account_id, EntryType::Expense, 10, "2024-02-01", Some("Food"));
    save(&mut conn, other.id, EntryType::Expense, 20, "2024-02-01", Some("Food"));

    let totals =
        charts::category_expense_totals(&conn, account_id, 2024, 2, EntryType::Expense).unwrap();
    assert_eq!(totals.len(), 1);
    assert_eq!(totals[0].expense, Decimal::from(10));
}
