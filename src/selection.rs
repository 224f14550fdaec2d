// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::categories::CategoryFilter;
use crate::error::SelectionError;
use chrono::{Datelike, Month, NaiveDate};
use serde::{Serialize, Serializer};
use std::fmt;

/// A calendar month of a particular year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Period {
    year: i32,
    month: Month,
}

impl Period {
    pub fn new(year: i32, month: Month) -> Result<Self, SelectionError> {
        if !(1000..=9999).contains(&year) {
            return Err(SelectionError::InvalidYear(year.to_string()));
        }
        // Years chrono cannot represent fail here, not in last_day().
        NaiveDate::from_ymd_opt(year, month.number_from_month(), 1)
            .ok_or_else(|| SelectionError::InvalidYear(year.to_string()))?;
        Ok(Self { year, month })
    }

    /// Parse free-form year and month input, e.g. `("2024", "March")` or `("2024", "3")`.
    pub fn parse(year: &str, month: &str) -> Result<Self, SelectionError> {
        Self::new(parse_year(year)?, parse_month(month)?)
    }

    pub fn containing(date: NaiveDate) -> Self {
        let month = Month::try_from(date.month() as u8).unwrap_or(Month::January);
        Self {
            year: date.year(),
            month,
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> Month {
        self.month
    }

    /// Day 0 of the following month.
    pub fn last_day(&self) -> NaiveDate {
        let (y, m) = match self.month {
            Month::December => (self.year + 1, 1),
            other => (self.year, other.number_from_month() + 1),
        };
        NaiveDate::from_ymd_opt(y, m, 1)
            .and_then(|d| d.pred_opt())
            .unwrap_or(NaiveDate::MAX)
    }

    pub fn days_in_month(&self) -> u32 {
        self.last_day().day()
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month.number_from_month()
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.month.name(), self.year)
    }
}

impl Serialize for Period {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&format_args!(
            "{:04}-{:02}",
            self.year,
            self.month.number_from_month()
        ))
    }
}

/// What the user is looking at: a period plus a category filter.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Selection {
    pub period: Period,
    pub category: CategoryFilter,
}

impl Selection {
    pub fn new(period: Period) -> Self {
        Self {
            period,
            category: CategoryFilter::All,
        }
    }

    pub fn with_category(self, category: CategoryFilter) -> Self {
        Self { category, ..self }
    }
}

/// Accepts `3`, `03`, `March`, `mar` (any casing).
pub fn parse_month(s: &str) -> Result<Month, SelectionError> {
    let s = s.trim();
    if let Ok(n) = s.parse::<u8>() {
        return Month::try_from(n).map_err(|_| SelectionError::InvalidMonth(s.to_string()));
    }
    s.parse::<Month>()
        .map_err(|_| SelectionError::InvalidMonth(s.to_string()))
}

pub fn parse_year(s: &str) -> Result<i32, SelectionError> {
    let s = s.trim();
    if s.len() != 4 || !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err(SelectionError::InvalidYear(s.to_string()));
    }
    s.parse::<i32>()
        .map_err(|_| SelectionError::InvalidYear(s.to_string()))
}
