// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::{Error, Result};
use chrono::NaiveDate;
use comfy_table::{presets::UTF8_FULL, Cell, Table};
use rust_decimal::Decimal;

/// Date formats accepted on input. Everything is normalized to YYYY-MM-DD.
/// Chrono's numeric fields also take unpadded digits, so "2024-1-5" parses
/// with the first format.
const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%Y-%b-%d", "%d/%m/%Y"];

pub fn normalize_date(s: &str) -> Result<NaiveDate> {
    let s = s.trim();
    for fmt in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Ok(d);
        }
    }
    Err(Error::validation(format!(
        "Invalid date '{}', expected YYYY-MM-DD, YYYY-Mon-DD or DD/MM/YYYY",
        s
    )))
}

pub fn parse_decimal(s: &str) -> Result<Decimal> {
    s.trim()
        .parse::<Decimal>()
        .map_err(|_| Error::validation(format!("Invalid amount '{}'", s)))
}

/// Parses 'YYYY-MM' into (year, month).
pub fn parse_month(s: &str) -> Result<(i32, u32)> {
    let invalid = || Error::validation(format!("Invalid month '{}', expected YYYY-MM", s));
    let (y, m) = s.trim().split_once('-').ok_or_else(invalid)?;
    let year: i32 = y.parse().map_err(|_| invalid())?;
    let month: u32 = m.parse().map_err(|_| invalid())?;
    if !(1..=12).contains(&month) {
        return Err(invalid());
    }
    Ok((year, month))
}

/// Converts a REAL aggregate coming out of a view into a Decimal, rounded to
/// three places the way the views are meant to be read.
pub fn decimal_from_f64(f: f64) -> Decimal {
    Decimal::try_from(f).unwrap_or(Decimal::ZERO).round_dp(3)
}

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

pub fn maybe_print_json<T: serde::Serialize>(
    json_flag: bool,
    jsonl_flag: bool,
    v: &T,
) -> anyhow::Result<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(v)?);
        return Ok(true);
    }
    if jsonl_flag {
        // If v is an array, stream each element; else stream single line
        let val = serde_json::to_value(v)?;
        if let Some(arr) = val.as_array() {
            for item in arr {
                println!("{}", serde_json::to_string(item)?);
            }
        } else {
            println!("{}", serde_json::to_string(&val)?);
        }
        return Ok(true);
    }
    Ok(false)
}
