// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::commands::fetch;
use crate::config::Settings;
use crate::models::{TransactionRecord, TransactionType};
use crate::selection::{parse_month, parse_year, Period};
use crate::service::{connect, FetchQuery, TransactionService};
use crate::submission::{sanitize_amount_input, TransactionDraft};
use crate::utils::{fmt_money, maybe_print_json, numeric_table, today};
use anyhow::{Context, Result};
use rusqlite::Connection;
use serde::Serialize;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    let settings = Settings::load(conn)?;
    let service = connect(conn, &settings)?;
    match m.subcommand() {
        Some(("add", sub)) => add(service.as_ref(), &settings, sub)?,
        Some(("list", sub)) => list(service.as_ref(), &settings, sub)?,
        Some(("recent", sub)) => recent(service.as_ref(), &settings, sub)?,
        _ => {}
    }
    Ok(())
}

/// Build a draft from `tx add` arguments. The amount keeps only digits and
/// decimal points, so `"₹1,250.00"` is read as `1250.00`.
pub fn draft_from_args(sub: &clap::ArgMatches) -> Result<TransactionDraft> {
    let kind = sub
        .get_one::<String>("type")
        .map(|s| s.parse::<TransactionType>())
        .transpose()
        .map_err(anyhow::Error::msg)?
        .unwrap_or(TransactionType::Expense);
    let text = |name: &str| sub.get_one::<String>(name).cloned().unwrap_or_default();
    Ok(TransactionDraft {
        amount: sanitize_amount_input(&text("amount")),
        kind,
        category: text("category"),
        date: sub.get_one::<String>("date").cloned(),
        notes: text("notes"),
    })
}

pub fn add_transaction(
    service: &dyn TransactionService,
    settings: &Settings,
    sub: &clap::ArgMatches,
) -> Result<TransactionRecord> {
    let draft = draft_from_args(sub)?;
    let new_tx = draft
        .validate(today(settings.reporting_offset))
        .context("Transaction not recorded")?;
    let stored = service
        .add_transaction(&new_tx)
        .context("Failed to save transaction")?;
    Ok(stored)
}

fn add(service: &dyn TransactionService, settings: &Settings, sub: &clap::ArgMatches) -> Result<()> {
    let rec = add_transaction(service, settings, sub)?;
    println!(
        "Recorded {} of {} in {} on {}",
        rec.kind,
        fmt_money(&rec.amount),
        rec.category,
        rec.date
    );
    Ok(())
}

#[derive(Debug, Serialize)]
pub struct TransactionRow {
    pub id: String,
    pub date: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub category: String,
    pub amount: String,
    pub notes: String,
}

impl TransactionRow {
    fn from_record(rec: &TransactionRecord, settings: &Settings) -> Self {
        let date = rec
            .local_date(settings.reporting_offset)
            .map(|d| d.to_string())
            .unwrap_or_else(|| rec.date.clone());
        let sign = match rec.kind {
            TransactionType::Income => "+",
            TransactionType::Expense => "-",
        };
        Self {
            id: rec.id.clone(),
            date,
            kind: rec.kind.to_string(),
            category: rec.category.clone(),
            amount: format!("{}{}", sign, fmt_money(&rec.amount)),
            notes: rec.notes.clone().unwrap_or_default(),
        }
    }
}

fn list_query(sub: &clap::ArgMatches) -> Result<FetchQuery> {
    // A month without a year matches that month in every year.
    let year = sub.get_one::<String>("year");
    let month = sub.get_one::<String>("month");
    Ok(match (year, month) {
        (Some(y), Some(m)) => FetchQuery::for_period(Period::parse(y, m)?),
        (Some(y), None) => FetchQuery::for_year(parse_year(y)?),
        (None, Some(m)) => FetchQuery {
            year: None,
            month: Some(parse_month(m)?),
        },
        (None, None) => FetchQuery::all(),
    })
}

pub fn query_rows(
    service: &dyn TransactionService,
    settings: &Settings,
    sub: &clap::ArgMatches,
) -> Result<Vec<TransactionRow>> {
    let query = list_query(sub)?;
    let records = fetch(service, query)?;
    // Newest first, same ordering as the recent list.
    let ordered = settings.aggregator().recent(&records, records.len());
    Ok(ordered
        .iter()
        .map(|r| TransactionRow::from_record(r, settings))
        .collect())
}

pub fn recent_rows(
    service: &dyn TransactionService,
    settings: &Settings,
    sub: &clap::ArgMatches,
) -> Result<Vec<TransactionRow>> {
    let limit = sub
        .get_one::<usize>("limit")
        .copied()
        .unwrap_or(settings.recent_limit);
    let records = fetch(service, FetchQuery::all())?;
    Ok(settings
        .aggregator()
        .recent(&records, limit)
        .iter()
        .map(|r| TransactionRow::from_record(r, settings))
        .collect())
}

fn print_rows(sub: &clap::ArgMatches, data: &[TransactionRow], empty: &str) -> Result<()> {
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        return Ok(());
    }
    if data.is_empty() {
        println!("{}", empty);
        return Ok(());
    }
    let rows: Vec<Vec<String>> = data
        .iter()
        .map(|r| {
            vec![
                r.date.clone(),
                r.kind.clone(),
                r.category.clone(),
                r.amount.clone(),
                r.notes.clone(),
            ]
        })
        .collect();
    println!(
        "{}",
        numeric_table(&["Date", "Type", "Category", "Amount", "Notes"], rows, &[3])
    );
    Ok(())
}

fn list(service: &dyn TransactionService, settings: &Settings, sub: &clap::ArgMatches) -> Result<()> {
    let data = query_rows(service, settings, sub)?;
    print_rows(sub, &data, "No transactions found.")
}

fn recent(service: &dyn TransactionService, settings: &Settings, sub: &clap::ArgMatches) -> Result<()> {
    let data = recent_rows(service, settings, sub)?;
    print_rows(sub, &data, "No recent transactions.")
}
