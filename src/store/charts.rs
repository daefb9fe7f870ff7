// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Chart aggregations over the cumulative_amount projection and the entry
//! table. Every query here is scoped to the requested year; months carry no
//! meaning across year boundaries.

use crate::error::{Error, Result};
use crate::models::{Category, CategoryExpensesSummary, ChartSeries, EntryType, ExpenseRange};
use crate::utils::decimal_from_f64;
use rusqlite::{params, Connection};

/// Minimum and maximum month-start balances observed within the year.
/// Returns a zero range when the year holds no data.
pub fn expense_range_for_year(conn: &Connection, year: i32) -> Result<ExpenseRange> {
    let (min, max): (Option<f64>, Option<f64>) = conn.query_row(
        "SELECT MIN(amount), MAX(amount) FROM cumulative_amount
         WHERE substr(month, 1, 4) = ?1",
        params![format!("{:04}", year)],
        |r| Ok((r.get(0)?, r.get(1)?)),
    )?;
    Ok(ExpenseRange {
        min_amount: decimal_from_f64(min.unwrap_or(0.0)),
        max_amount: decimal_from_f64(max.unwrap_or(0.0)),
    })
}

/// One point per account per month with data inside the year: the balance
/// at that month's start.
pub fn month_start_balances_for_year(conn: &Connection, year: i32) -> Result<Vec<ChartSeries>> {
    let mut stmt = conn.prepare(
        "SELECT account_id, CAST(substr(month, 6, 2) AS INTEGER) AS month, amount
         FROM cumulative_amount
         WHERE substr(month, 1, 4) = ?1
         ORDER BY account_id, month",
    )?;
    let rows = stmt.query_map(params![format!("{:04}", year)], |r| {
        Ok(ChartSeries {
            account_id: r.get(0)?,
            month: r.get::<_, i64>(1)? as u32,
            amount: decimal_from_f64(r.get::<_, f64>(2)?),
        })
    })?;
    let mut out = Vec::new();
    for row in rows {
        out.push(row?);
    }
    Ok(out)
}

/// Per-category sums of one account's entries of the given type within one
/// calendar month. The year is part of the scope so that, say, January 2023
/// never leaks into January 2024.
pub fn category_expense_totals(
    conn: &Connection,
    account_id: i64,
    year: i32,
    month: u32,
    r#type: EntryType,
) -> Result<Vec<CategoryExpensesSummary>> {
    match r#type {
        EntryType::Income | EntryType::Expense => {}
        EntryType::Transfer => {
            return Err(Error::validation(
                "Category totals exist for income or expense entries only",
            ));
        }
    }
    if !(1..=12).contains(&month) {
        return Err(Error::validation(format!("Invalid month {}", month)));
    }

    let scope = format!("{:04}-{:02}", year, month);
    let mut stmt = conn.prepare(
        "SELECT c.id, c.account_id, c.name, c.type, SUM(CAST(e.amount AS REAL)) AS amount
         FROM entry e
         JOIN category c ON e.category_id = c.id
         WHERE e.type = ?1 AND e.account_id = ?2 AND substr(e.date, 1, 7) = ?3
         GROUP BY c.id
         ORDER BY c.name",
    )?;
    let rows = stmt.query_map(params![r#type, account_id, scope], |r| {
        Ok(CategoryExpensesSummary {
            category: Category {
                id: r.get(0)?,
                account_id: r.get(1)?,
                name: r.get(2)?,
                r#type: r.get(3)?,
            },
            month,
            expense: decimal_from_f64(r.get::<_, f64>(4)?),
        })
    })?;
    let mut out = Vec::new();
    for row in rows {
        out.push(row?);
    }
    Ok(out)
}
