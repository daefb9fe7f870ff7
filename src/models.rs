// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Closed set of entry kinds. Persisted as the integer codes 1..=3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryType {
    Income,
    Expense,
    Transfer,
}

impl EntryType {
    pub fn code(self) -> i64 {
        match self {
            EntryType::Income => 1,
            EntryType::Expense => 2,
            EntryType::Transfer => 3,
        }
    }

    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            1 => Some(EntryType::Income),
            2 => Some(EntryType::Expense),
            3 => Some(EntryType::Transfer),
            _ => None,
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "income" => Some(EntryType::Income),
            "expense" => Some(EntryType::Expense),
            "transfer" => Some(EntryType::Transfer),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            EntryType::Income => "income",
            EntryType::Expense => "expense",
            EntryType::Transfer => "transfer",
        }
    }

    /// Only income and expense entries carry a category.
    pub fn is_categorizable(self) -> bool {
        match self {
            EntryType::Income | EntryType::Expense => true,
            EntryType::Transfer => false,
        }
    }
}

impl ToSql for EntryType {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.code()))
    }
}

impl FromSql for EntryType {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let code = i64::column_result(value)?;
        EntryType::from_code(code).ok_or(FromSqlError::OutOfRange(code))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub id: i64,
    pub name: String,
    pub initial_amount: Decimal,
    /// Current balance, read from the account_total view. Never cached.
    pub total: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub account_id: i64,
    pub name: String,
    pub r#type: EntryType,
}

/// A stored ledger row. `amount` is always a non-negative magnitude;
/// the sign is derived per viewing account, never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entry {
    pub id: i64,
    pub account_id: i64,
    pub affected_account_id: Option<i64>,
    pub r#type: EntryType,
    pub description: Option<String>,
    pub category: Option<String>,
    pub amount: Decimal,
    pub date: NaiveDate,

    // Joined names, filled when reading.
    pub account: Option<String>,
    pub affected_account: Option<String>,
}

impl Entry {
    /// Signed amount as seen from `viewer`. A transfer is outgoing (negative)
    /// for the owning account and incoming (positive) for the affected one.
    pub fn signed_amount(&self, viewer: i64) -> Decimal {
        match self.r#type {
            EntryType::Income => self.amount,
            EntryType::Expense => -self.amount,
            EntryType::Transfer => {
                if self.account_id == viewer {
                    -self.amount
                } else {
                    self.amount
                }
            }
        }
    }
}

/// Input for saving a new entry. The category is given by name and resolved
/// (or lazily created) at save time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewEntry {
    pub account_id: i64,
    pub affected_account_id: Option<i64>,
    pub r#type: EntryType,
    pub description: Option<String>,
    pub category: Option<String>,
    pub amount: Decimal,
    pub date: NaiveDate,
}

/// Mutable fields of an existing entry. The (id, account_id) pair identifies
/// the row; the account predicate blocks cross-account updates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntryUpdate {
    pub id: i64,
    pub account_id: i64,
    pub r#type: EntryType,
    pub description: Option<String>,
    pub category: Option<String>,
    pub amount: Decimal,
    pub date: NaiveDate,
}

/// Inclusive date range for entry listing.
#[derive(Debug, Clone, Copy)]
pub struct TimeRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl TimeRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        TimeRange { start, end }
    }

    pub fn for_month(year: i32, month: u32) -> Option<Self> {
        let start = NaiveDate::from_ymd_opt(year, month, 1)?;
        let next = if month == 12 {
            NaiveDate::from_ymd_opt(year + 1, 1, 1)?
        } else {
            NaiveDate::from_ymd_opt(year, month + 1, 1)?
        };
        Some(TimeRange {
            start,
            end: next.pred_opt()?,
        })
    }

    pub fn for_year(year: i32) -> Option<Self> {
        Some(TimeRange {
            start: NaiveDate::from_ymd_opt(year, 1, 1)?,
            end: NaiveDate::from_ymd_opt(year, 12, 31)?,
        })
    }

    /// The widest range the stored date format can order.
    pub fn all() -> Self {
        TimeRange {
            start: NaiveDate::from_ymd_opt(1, 1, 1).unwrap(),
            end: NaiveDate::from_ymd_opt(9999, 12, 31).unwrap(),
        }
    }
}

/// One chart point: an account's balance at the start of `month` (1..=12).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartSeries {
    pub account_id: i64,
    pub month: u32,
    pub amount: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpenseRange {
    pub min_amount: Decimal,
    pub max_amount: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryExpensesSummary {
    pub category: Category,
    pub month: u32,
    pub expense: Decimal,
}
