// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Library error types. Command handlers wrap these in `anyhow`.

use thiserror::Error;

/// Failures of the transaction service, local or remote.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The request never got a response (connection refused, timeout, DNS...).
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("server responded {status}: {message}")]
    Server { status: u16, message: String },

    #[error("could not decode transaction payload: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    /// A stored row could not be turned back into a record.
    #[error("corrupt stored transaction {id}: {reason}")]
    Corrupt { id: i64, reason: String },
}

impl ServiceError {
    /// Whether re-issuing the same request may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ServiceError::Network(_) | ServiceError::Server { .. })
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SelectionError {
    #[error("Invalid month '{0}', expected 1-12 or a month name")]
    InvalidMonth(String),

    #[error("Invalid year '{0}', expected a four-digit year")]
    InvalidYear(String),
}

/// Reasons a transaction draft cannot be submitted.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DraftError {
    #[error("an amount is required")]
    MissingAmount,

    #[error("a category is required")]
    MissingCategory,

    #[error("invalid amount '{0}'")]
    InvalidAmount(String),

    #[error("invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("unknown setting '{0}'")]
    UnknownKey(String),

    #[error("invalid value '{value}' for {key}: {reason}")]
    InvalidValue {
        key: &'static str,
        value: String,
        reason: String,
    },
}
