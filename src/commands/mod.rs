// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod categories;
pub mod config;
pub mod reports;
pub mod transactions;

use anyhow::{anyhow, Result};

use crate::models::TransactionRecord;
use crate::query::{FetchStatus, TransactionQuery};
use crate::service::{FetchQuery, TransactionService};

/// Fetch records for `query`, turning a failed status into an error.
///
/// A retryable failure is retried once before giving up.
pub fn fetch(service: &dyn TransactionService, query: FetchQuery) -> Result<Vec<TransactionRecord>> {
    let q = TransactionQuery::new();
    let mut status = q.refresh(service, query);
    if let FetchStatus::Failed { retryable: true, .. } = status {
        tracing::warn!(%query, "retrying transaction fetch");
        status = q.retry(service).unwrap_or(status);
    }
    match status {
        FetchStatus::Failed { message, retryable } => {
            let hint = if retryable {
                " (temporary failure, run the command again to retry)"
            } else {
                ""
            };
            Err(anyhow!(
                "Failed to load transactions for {}: {}{}",
                query,
                message,
                hint
            ))
        }
        _ => Ok(q.records().unwrap_or_default()),
    }
}
