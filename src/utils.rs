// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use chrono::{FixedOffset, NaiveDate, Utc};
use comfy_table::{presets::UTF8_FULL, Cell, CellAlignment, Table};
use rust_decimal::{Decimal, RoundingStrategy};

use crate::selection::Period;

const UA: &str = concat!("expense-tracker/", env!("CARGO_PKG_VERSION"));

pub fn http_client() -> reqwest::Result<reqwest::blocking::Client> {
    reqwest::blocking::Client::builder()
        .timeout(std::time::Duration::from_secs(15))
        .user_agent(UA)
        .build()
}

/// Today's calendar date in the reporting zone.
pub fn today(zone: FixedOffset) -> NaiveDate {
    Utc::now().with_timezone(&zone).date_naive()
}

pub fn current_period(zone: FixedOffset) -> Period {
    Period::containing(today(zone))
}

pub fn fmt_money(d: &Decimal) -> String {
    format!(
        "{:.2}",
        d.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    )
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

/// Like [`pretty_table`] but right-aligns the given columns.
pub fn numeric_table(headers: &[&str], rows: Vec<Vec<String>>, numeric: &[usize]) -> Table {
    let mut t = pretty_table(headers, rows);
    for idx in numeric {
        if let Some(col) = t.column_mut(*idx) {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }
    t
}

/// Horizontal bar scaled against `max`, `width` characters at most.
pub fn bar(value: Decimal, max: Decimal, width: usize) -> String {
    if max <= Decimal::ZERO || value <= Decimal::ZERO {
        return String::new();
    }
    let ratio = (value / max).min(Decimal::ONE);
    let cells = (ratio * Decimal::from(width))
        .round()
        .to_string()
        .parse::<usize>()
        .unwrap_or(0)
        .clamp(1, width);
    "█".repeat(cells)
}

pub fn maybe_print_json<T: serde::Serialize>(
    json_flag: bool,
    jsonl_flag: bool,
    v: &T,
) -> Result<bool> {
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bar_scales_and_clamps() {
        let max = Decimal::from(100);
        assert_eq!(bar(Decimal::from(100), max, 10).chars().count(), 10);
        assert_eq!(bar(Decimal::from(50), max, 10).chars().count(), 5);
        assert_eq!(bar(Decimal::from(1), max, 10).chars().count(), 1);
        assert_eq!(bar(Decimal::ZERO, max, 10), "");
        assert_eq!(bar(Decimal::MAX, Decimal::MAX, 10).chars().count(), 10);
    }

    #[test]
    fn money_has_two_places() {
        assert_eq!(fmt_money(&Decimal::from(150)), "150.00");
        assert_eq!(fmt_money(&Decimal::new(12345, 3)), "12.35");
    }
}
