// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! The transaction service: where records come from and where new ones go.

use std::fmt;

use chrono::{Datelike, FixedOffset, Month, NaiveDate};
use rusqlite::{params, Connection};
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::config::Settings;
use crate::error::ServiceError;
use crate::models::{NewTransaction, TransactionRecord, TransactionType};
use crate::selection::Period;
use crate::utils::http_client;

/// Which records to fetch. An empty query fetches everything.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct FetchQuery {
    pub year: Option<i32>,
    pub month: Option<Month>,
}

impl FetchQuery {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn for_year(year: i32) -> Self {
        Self {
            year: Some(year),
            month: None,
        }
    }

    pub fn for_period(period: Period) -> Self {
        Self {
            year: Some(period.year()),
            month: Some(period.month()),
        }
    }

    /// Whether a record dated `day` belongs to this query.
    ///
    /// Undated records only belong to the unconstrained query.
    pub fn matches(&self, day: Option<NaiveDate>) -> bool {
        if self.year.is_none() && self.month.is_none() {
            return true;
        }
        let Some(day) = day else {
            return false;
        };
        self.year.is_none_or(|y| day.year() == y)
            && self
                .month
                .is_none_or(|m| day.month() == m.number_from_month())
    }
}

impl fmt::Display for FetchQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.month, self.year) {
            (Some(m), Some(y)) => write!(f, "{} {}", m.name(), y),
            (None, Some(y)) => write!(f, "{}", y),
            (Some(m), None) => write!(f, "{}", m.name()),
            (None, None) => f.write_str("all time"),
        }
    }
}

pub trait TransactionService {
    fn fetch_transactions(&self, query: &FetchQuery)
        -> Result<Vec<TransactionRecord>, ServiceError>;

    fn add_transaction(&self, tx: &NewTransaction) -> Result<TransactionRecord, ServiceError>;
}

/// Pick the remote service when an API URL is configured, the local store otherwise.
pub fn connect<'c>(
    conn: &'c Connection,
    settings: &Settings,
) -> Result<Box<dyn TransactionService + 'c>, ServiceError> {
    match &settings.api_url {
        Some(url) => {
            tracing::debug!(%url, "using remote transaction service");
            Ok(Box::new(HttpService::new(url)?))
        }
        None => Ok(Box::new(SqliteService::new(conn, settings.reporting_offset))),
    }
}

/// Transactions kept in the local SQLite database.
pub struct SqliteService<'c> {
    conn: &'c Connection,
    zone: FixedOffset,
}

impl<'c> SqliteService<'c> {
    pub fn new(conn: &'c Connection, zone: FixedOffset) -> Self {
        Self { conn, zone }
    }
}

fn record_from_row(
    id: i64,
    amount: String,
    kind: String,
    category: String,
    date: String,
    notes: Option<String>,
) -> Result<TransactionRecord, ServiceError> {
    let corrupt = |reason: String| ServiceError::Corrupt { id, reason };
    let amount = amount
        .parse::<Decimal>()
        .map_err(|e| corrupt(format!("amount '{}': {}", amount, e)))?;
    let kind = kind.parse::<TransactionType>().map_err(corrupt)?;
    Ok(TransactionRecord {
        id: id.to_string(),
        amount,
        kind,
        category,
        date,
        notes,
    })
}

impl TransactionService for SqliteService<'_> {
    fn fetch_transactions(
        &self,
        query: &FetchQuery,
    ) -> Result<Vec<TransactionRecord>, ServiceError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, amount, type, category, date, notes FROM transactions ORDER BY id",
        )?;
        let rows = stmt.query_map([], |r| {
            Ok((
                r.get::<_, i64>(0)?,
                r.get::<_, String>(1)?,
                r.get::<_, String>(2)?,
                r.get::<_, String>(3)?,
                r.get::<_, String>(4)?,
                r.get::<_, Option<String>>(5)?,
            ))
        })?;
        let mut out = Vec::new();
        for row in rows {
            let (id, amount, kind, category, date, notes) = row?;
            let rec = record_from_row(id, amount, kind, category, date, notes)?;
            if query.matches(rec.local_date(self.zone)) {
                out.push(rec);
            }
        }
        tracing::debug!(%query, count = out.len(), "fetched local transactions");
        Ok(out)
    }

    fn add_transaction(&self, tx: &NewTransaction) -> Result<TransactionRecord, ServiceError> {
        self.conn.execute(
            "INSERT INTO transactions(amount, type, category, date, notes)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                tx.amount.to_string(),
                tx.kind.as_str(),
                tx.category,
                tx.date,
                tx.notes
            ],
        )?;
        let id = self.conn.last_insert_rowid();
        tracing::info!(id, kind = %tx.kind, category = %tx.category, "stored transaction");
        Ok(TransactionRecord {
            id: id.to_string(),
            amount: tx.amount,
            kind: tx.kind,
            category: tx.category.clone(),
            date: tx.date.clone(),
            notes: tx.notes.clone(),
        })
    }
}

/// A remote REST API exposing `/transactions`.
pub struct HttpService {
    client: reqwest::blocking::Client,
    base_url: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ListPayload {
    Bare(Vec<TransactionRecord>),
    Wrapped { transactions: Vec<TransactionRecord> },
}

impl HttpService {
    pub fn new(base_url: &str) -> Result<Self, ServiceError> {
        Ok(Self {
            client: http_client()?,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/transactions", self.base_url)
    }
}

fn check_status(
    resp: reqwest::blocking::Response,
) -> Result<reqwest::blocking::Response, ServiceError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let message = resp.text().unwrap_or_default();
    tracing::warn!(status = status.as_u16(), %message, "transaction service returned an error");
    Err(ServiceError::Server {
        status: status.as_u16(),
        message,
    })
}

impl TransactionService for HttpService {
    fn fetch_transactions(
        &self,
        query: &FetchQuery,
    ) -> Result<Vec<TransactionRecord>, ServiceError> {
        let mut params: Vec<(&str, String)> = Vec::new();
        if let Some(m) = query.month {
            params.push(("month", m.name().to_string()));
        }
        if let Some(y) = query.year {
            params.push(("year", y.to_string()));
        }
        tracing::info!(url = %self.endpoint(), %query, "fetching transactions");
        let resp = self.client.get(self.endpoint()).query(&params).send()?;
        let body = check_status(resp)?.text()?;
        let records = match serde_json::from_str(&body)? {
            ListPayload::Bare(v) => v,
            ListPayload::Wrapped { transactions } => transactions,
        };
        Ok(records)
    }

    fn add_transaction(&self, tx: &NewTransaction) -> Result<TransactionRecord, ServiceError> {
        tracing::info!(url = %self.endpoint(), kind = %tx.kind, "submitting transaction");
        let resp = self.client.post(self.endpoint()).json(tx).send()?;
        let body = check_status(resp)?.text()?;
        Ok(serde_json::from_str(&body)?)
    }
}
