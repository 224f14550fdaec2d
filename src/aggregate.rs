// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Transaction aggregation for summaries and charts.
//!
//! Every function here is a pure derivation over a borrowed slice of records:
//! nothing is cached, nothing is mutated, and each call builds a fresh result.
//! Calendar fields are read in the aggregator's reporting zone.
//!
//! Records whose date cannot be resolved are skipped by the period-bound
//! aggregates and sorted last by [`Aggregator::recent`].
//!
//! Sums saturate at `Decimal::MAX` / `Decimal::MIN` instead of overflowing.

use std::collections::HashMap;

use chrono::{Datelike, FixedOffset, NaiveDate, Offset, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

use crate::categories::CategoryFilter;
use crate::models::{TransactionRecord, TransactionType};
use crate::selection::{Period, Selection};

/// Size of the recent-activity list.
pub const DEFAULT_RECENT: usize = 5;

/// Per-day sums for one month, index 0 being the 1st.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailySeries {
    pub period: Period,
    pub kind: TransactionType,
    pub category: CategoryFilter,
    amounts: Vec<Decimal>,
}

impl DailySeries {
    pub fn amounts(&self) -> &[Decimal] {
        &self.amounts
    }

    pub fn len(&self) -> usize {
        self.amounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.amounts.is_empty()
    }

    /// Sum for a 1-based day of month.
    pub fn day(&self, day: u32) -> Option<Decimal> {
        let idx = (day as usize).checked_sub(1)?;
        self.amounts.get(idx).copied()
    }

    /// Whether any bucket is positive. A zero-filled series should be shown as
    /// "no data" rather than a flat line.
    pub fn has_data(&self) -> bool {
        self.amounts.iter().any(|a| *a > Decimal::ZERO)
    }

    pub fn total(&self) -> Decimal {
        self.amounts
            .iter()
            .fold(Decimal::ZERO, |acc, a| acc.saturating_add(*a))
    }

    pub fn labels(&self) -> Vec<String> {
        (1..=self.amounts.len()).map(|d| d.to_string()).collect()
    }

    pub fn legend(&self) -> String {
        match &self.category {
            CategoryFilter::All => format!("All {}", self.kind.label()),
            CategoryFilter::Only(c) => format!("{} {}", c, self.kind.label()),
        }
    }
}

/// Income, expenses and their difference for a period.
///
/// The balance is always derived from the two sums, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SummaryTotals {
    pub total_income: Decimal,
    pub total_expenses: Decimal,
}

impl SummaryTotals {
    pub fn balance(&self) -> Decimal {
        self.total_income.saturating_sub(self.total_expenses)
    }
}

impl Serialize for SummaryTotals {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("SummaryTotals", 3)?;
        s.serialize_field("total_income", &self.total_income)?;
        s.serialize_field("total_expenses", &self.total_expenses)?;
        s.serialize_field("balance", &self.balance())?;
        s.end()
    }
}

/// Income against expenses over an arbitrary, caller-filtered set of records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum IncomeExpenseSplit {
    /// Nothing to chart: income and expenses both sum to zero.
    NoData,
    Totals(SplitTotals),
}

impl IncomeExpenseSplit {
    pub fn totals(&self) -> Option<&SplitTotals> {
        match self {
            IncomeExpenseSplit::NoData => None,
            IncomeExpenseSplit::Totals(t) => Some(t),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitTotals {
    pub income: Decimal,
    pub expenses: Decimal,
}

impl SplitTotals {
    pub fn total(&self) -> Decimal {
        self.income.saturating_add(self.expenses)
    }

    pub fn net(&self) -> Decimal {
        self.income.saturating_sub(self.expenses)
    }

    /// Income as a whole percentage of the total.
    pub fn income_share(&self) -> Decimal {
        share(self.income, self.total())
    }

    pub fn expense_share(&self) -> Decimal {
        share(self.expenses, self.total())
    }
}

impl Serialize for SplitTotals {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("SplitTotals", 4)?;
        s.serialize_field("income", &self.income)?;
        s.serialize_field("expenses", &self.expenses)?;
        s.serialize_field("total", &self.total())?;
        s.serialize_field("net", &self.net())?;
        s.end()
    }
}

fn share(part: Decimal, total: Decimal) -> Decimal {
    if total.is_zero() {
        return Decimal::ZERO;
    }
    // part <= total, so the ratio stays within [0, 1] before scaling.
    ((part / total) * Decimal::ONE_HUNDRED)
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryTotal {
    pub category: String,
    pub amount: Decimal,
}

/// Sums income and expense amounts regardless of date.
///
/// Callers wanting a single period filter the slice first.
pub fn income_expense_split(transactions: &[TransactionRecord]) -> IncomeExpenseSplit {
    let mut totals = SplitTotals {
        income: Decimal::ZERO,
        expenses: Decimal::ZERO,
    };
    for tx in transactions {
        match tx.kind {
            TransactionType::Income => totals.income = totals.income.saturating_add(tx.amount),
            TransactionType::Expense => {
                totals.expenses = totals.expenses.saturating_add(tx.amount)
            }
        }
    }
    if totals.total().is_zero() {
        IncomeExpenseSplit::NoData
    } else {
        IncomeExpenseSplit::Totals(totals)
    }
}

/// Aggregates records using calendar fields of a fixed reporting zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Aggregator {
    zone: FixedOffset,
}

impl Default for Aggregator {
    fn default() -> Self {
        Self { zone: Utc.fix() }
    }
}

impl Aggregator {
    pub fn new(zone: FixedOffset) -> Self {
        Self { zone }
    }

    pub fn zone(&self) -> FixedOffset {
        self.zone
    }

    /// Records falling inside `period`, paired with their local calendar day.
    fn dated_in<'a>(
        &self,
        transactions: &'a [TransactionRecord],
        period: Period,
    ) -> impl Iterator<Item = (&'a TransactionRecord, NaiveDate)> {
        let zone = self.zone;
        transactions.iter().filter_map(move |tx| {
            let Some(day) = tx.local_date(zone) else {
                tracing::debug!(id = %tx.id, date = %tx.date, "skipping transaction with unresolvable date");
                return None;
            };
            period.contains(day).then_some((tx, day))
        })
    }

    /// Records of `period` only; useful to feed [`income_expense_split`].
    pub fn in_period(
        &self,
        transactions: &[TransactionRecord],
        period: Period,
    ) -> Vec<TransactionRecord> {
        self.dated_in(transactions, period)
            .map(|(tx, _)| tx.clone())
            .collect()
    }

    /// Day-bucketed sums of `kind` records for the selected month and category.
    ///
    /// The series always has one bucket per calendar day of the month, zero
    /// where nothing matched.
    pub fn daily_series(
        &self,
        transactions: &[TransactionRecord],
        selection: &Selection,
        kind: TransactionType,
    ) -> DailySeries {
        let period = selection.period;
        let mut amounts = vec![Decimal::ZERO; period.days_in_month() as usize];
        for (tx, day) in self.dated_in(transactions, period) {
            if tx.kind != kind || !selection.category.matches(&tx.category) {
                continue;
            }
            let bucket = &mut amounts[day.day0() as usize];
            *bucket = bucket.saturating_add(tx.amount);
        }
        DailySeries {
            period,
            kind,
            category: selection.category.clone(),
            amounts,
        }
    }

    /// Income and expense sums over every record of `period`.
    pub fn summary_totals(
        &self,
        transactions: &[TransactionRecord],
        period: Period,
    ) -> SummaryTotals {
        let mut totals = SummaryTotals::default();
        for (tx, _) in self.dated_in(transactions, period) {
            match tx.kind {
                TransactionType::Income => {
                    totals.total_income = totals.total_income.saturating_add(tx.amount)
                }
                TransactionType::Expense => {
                    totals.total_expenses = totals.total_expenses.saturating_add(tx.amount)
                }
            }
        }
        totals
    }

    /// The `n` latest records, newest first.
    ///
    /// Ties keep their input order; undated records come after all dated ones.
    pub fn recent(&self, transactions: &[TransactionRecord], n: usize) -> Vec<TransactionRecord> {
        let mut ordered: Vec<_> = transactions
            .iter()
            .map(|tx| (tx.timestamp(self.zone), tx))
            .collect();
        // Stable; `None` sorts below every `Some`.
        ordered.sort_by(|a, b| b.0.cmp(&a.0));
        ordered
            .into_iter()
            .take(n)
            .map(|(_, tx)| tx.clone())
            .collect()
    }

    /// Per-category sums of `kind` records in `period`, largest first.
    pub fn category_totals(
        &self,
        transactions: &[TransactionRecord],
        period: Period,
        kind: TransactionType,
    ) -> Vec<CategoryTotal> {
        let mut sums: HashMap<&str, Decimal> = HashMap::new();
        for (tx, _) in self.dated_in(transactions, period) {
            if tx.kind == kind {
                let sum = sums.entry(tx.category.as_str()).or_insert(Decimal::ZERO);
                *sum = sum.saturating_add(tx.amount);
            }
        }
        let mut totals: Vec<CategoryTotal> = sums
            .into_iter()
            .map(|(category, amount)| CategoryTotal {
                category: category.to_string(),
                amount,
            })
            .collect();
        totals.sort_by(|a, b| b.amount.cmp(&a.amount).then_with(|| a.category.cmp(&b.category)));
        totals
    }
}
