// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::aggregate::{
    income_expense_split, CategoryTotal, DailySeries, IncomeExpenseSplit, SummaryTotals,
};
use crate::categories::CategoryFilter;
use crate::commands::fetch;
use crate::config::Settings;
use crate::models::TransactionType;
use crate::selection::{parse_month, parse_year, Period, Selection};
use crate::service::{connect, FetchQuery, TransactionService};
use crate::utils::{
    bar, current_period, fmt_money, maybe_print_json, numeric_table, pretty_table,
};
use anyhow::{anyhow, Result};
use rusqlite::Connection;

const BAR_WIDTH: usize = 30;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    let settings = Settings::load(conn)?;
    let service = connect(conn, &settings)?;
    match m.subcommand() {
        Some(("summary", sub)) => summary(service.as_ref(), &settings, sub)?,
        Some(("trends", sub)) => trends(service.as_ref(), &settings, sub)?,
        Some(("split", sub)) => split(service.as_ref(), &settings, sub)?,
        Some(("categories", sub)) => categories(service.as_ref(), &settings, sub)?,
        _ => {}
    }
    Ok(())
}

/// Month and year from the arguments, each defaulting to the current one.
pub fn period_from_args(sub: &clap::ArgMatches, settings: &Settings) -> Result<Period> {
    let now = current_period(settings.reporting_offset);
    let year = match sub.get_one::<String>("year") {
        Some(y) => parse_year(y)?,
        None => now.year(),
    };
    let month = match sub.get_one::<String>("month") {
        Some(m) => parse_month(m)?,
        None => now.month(),
    };
    Ok(Period::new(year, month)?)
}

fn kind_from_args(sub: &clap::ArgMatches) -> Result<TransactionType> {
    sub.get_one::<String>("type")
        .map(|s| s.parse::<TransactionType>().map_err(|e| anyhow!(e)))
        .unwrap_or(Ok(TransactionType::Expense))
}

fn json_requested(sub: &clap::ArgMatches) -> (bool, bool) {
    (sub.get_flag("json"), sub.get_flag("jsonl"))
}

pub fn summary_totals(
    service: &dyn TransactionService,
    settings: &Settings,
    sub: &clap::ArgMatches,
) -> Result<(Period, SummaryTotals)> {
    let period = period_from_args(sub, settings)?;
    let records = fetch(service, FetchQuery::for_period(period))?;
    Ok((period, settings.aggregator().summary_totals(&records, period)))
}

fn summary(service: &dyn TransactionService, settings: &Settings, sub: &clap::ArgMatches) -> Result<()> {
    let (period, totals) = summary_totals(service, settings, sub)?;
    let (json, jsonl) = json_requested(sub);
    if maybe_print_json(json, jsonl, &totals)? {
        return Ok(());
    }
    println!("Financial summary for {}", period);
    println!(
        "{}",
        numeric_table(
            &["Income", "Expenses", "Balance"],
            vec![vec![
                fmt_money(&totals.total_income),
                fmt_money(&totals.total_expenses),
                fmt_money(&totals.balance()),
            ]],
            &[0, 1, 2],
        )
    );
    Ok(())
}

pub fn trends_series(
    service: &dyn TransactionService,
    settings: &Settings,
    sub: &clap::ArgMatches,
) -> Result<DailySeries> {
    let period = period_from_args(sub, settings)?;
    let category = sub
        .get_one::<String>("category")
        .map(|c| CategoryFilter::parse(c))
        .unwrap_or_default();
    let kind = kind_from_args(sub)?;
    let records = fetch(service, FetchQuery::for_period(period))?;
    let selection = Selection::new(period).with_category(category);
    Ok(settings.aggregator().daily_series(&records, &selection, kind))
}

fn trends(service: &dyn TransactionService, settings: &Settings, sub: &clap::ArgMatches) -> Result<()> {
    let series = trends_series(service, settings, sub)?;
    let (json, jsonl) = json_requested(sub);
    if maybe_print_json(json, jsonl, &series)? {
        return Ok(());
    }
    if !series.has_data() {
        match &series.category {
            CategoryFilter::All => println!("No {} data for {}", series.kind, series.period),
            CategoryFilter::Only(c) => {
                println!("No {} {} data for {}", c, series.kind, series.period)
            }
        }
        return Ok(());
    }
    let max = series.amounts().iter().copied().max().unwrap_or_default();
    let rows = series
        .labels()
        .into_iter()
        .zip(series.amounts())
        .map(|(day, amt)| vec![day, fmt_money(amt), bar(*amt, max, BAR_WIDTH)])
        .collect();
    println!("{} - {}", series.legend(), series.period);
    println!("{}", numeric_table(&["Day", "Amount", ""], rows, &[0, 1]));
    println!("Total: {}", fmt_money(&series.total()));
    Ok(())
}

pub fn split_totals(
    service: &dyn TransactionService,
    settings: &Settings,
    sub: &clap::ArgMatches,
) -> Result<IncomeExpenseSplit> {
    if sub.get_flag("all-time") {
        let records = fetch(service, FetchQuery::all())?;
        return Ok(income_expense_split(&records));
    }
    let period = period_from_args(sub, settings)?;
    let records = fetch(service, FetchQuery::for_period(period))?;
    let in_period = settings.aggregator().in_period(&records, period);
    Ok(income_expense_split(&in_period))
}

fn split(service: &dyn TransactionService, settings: &Settings, sub: &clap::ArgMatches) -> Result<()> {
    let split = split_totals(service, settings, sub)?;
    let (json, jsonl) = json_requested(sub);
    if maybe_print_json(json, jsonl, &split)? {
        return Ok(());
    }
    let Some(t) = split.totals() else {
        println!("No transactions to compare yet. Add income or expenses first.");
        return Ok(());
    };
    let max = t.income.max(t.expenses);
    let rows = vec![
        vec![
            "Income".to_string(),
            fmt_money(&t.income),
            format!("{}%", t.income_share()),
            bar(t.income, max, BAR_WIDTH),
        ],
        vec![
            "Expenses".to_string(),
            fmt_money(&t.expenses),
            format!("{}%", t.expense_share()),
            bar(t.expenses, max, BAR_WIDTH),
        ],
    ];
    println!("{}", numeric_table(&["", "Amount", "Share", ""], rows, &[1, 2]));
    let label = if t.net().is_sign_negative() { "Net (deficit)" } else { "Net" };
    println!("{}: {}", label, fmt_money(&t.net().abs()));
    Ok(())
}

pub fn category_totals(
    service: &dyn TransactionService,
    settings: &Settings,
    sub: &clap::ArgMatches,
) -> Result<(Period, TransactionType, Vec<CategoryTotal>)> {
    let period = period_from_args(sub, settings)?;
    let kind = kind_from_args(sub)?;
    let records = fetch(service, FetchQuery::for_period(period))?;
    let totals = settings.aggregator().category_totals(&records, period, kind);
    Ok((period, kind, totals))
}

fn categories(service: &dyn TransactionService, settings: &Settings, sub: &clap::ArgMatches) -> Result<()> {
    let (period, kind, totals) = category_totals(service, settings, sub)?;
    let (json, jsonl) = json_requested(sub);
    if maybe_print_json(json, jsonl, &totals)? {
        return Ok(());
    }
    if totals.is_empty() {
        println!("No {} recorded for {}", kind.label().to_lowercase(), period);
        return Ok(());
    }
    let rows = totals
        .into_iter()
        .map(|t| vec![t.category, fmt_money(&t.amount)])
        .collect();
    println!("{} by category - {}", kind.label(), period);
    println!("{}", pretty_table(&["Category", "Amount"], rows));
    Ok(())
}
