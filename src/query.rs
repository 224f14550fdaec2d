// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Selection-driven fetching with a per-selection cache.
//!
//! Each [`TransactionQuery::select`] hands out a [`Ticket`]. Only the ticket of
//! the latest selection may change the visible status; results arriving on an
//! older ticket are cached under their own key and otherwise ignored.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::error::ServiceError;
use crate::models::TransactionRecord;
use crate::service::{FetchQuery, TransactionService};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchStatus {
    Idle,
    Loading,
    Succeeded,
    Failed { message: String, retryable: bool },
}

/// Proof of which selection a fetch was started for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    generation: u64,
    query: FetchQuery,
}

impl Ticket {
    pub fn query(&self) -> FetchQuery {
        self.query
    }
}

#[derive(Debug)]
struct State {
    generation: u64,
    current: Option<FetchQuery>,
    status: FetchStatus,
    cache: HashMap<FetchQuery, Vec<TransactionRecord>>,
}

#[derive(Debug)]
pub struct TransactionQuery {
    state: Mutex<State>,
}

impl Default for TransactionQuery {
    fn default() -> Self {
        Self::new()
    }
}

impl TransactionQuery {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(State {
                generation: 0,
                current: None,
                status: FetchStatus::Idle,
                cache: HashMap::new(),
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Make `query` the current selection and start loading it.
    pub fn select(&self, query: FetchQuery) -> Ticket {
        let mut st = self.lock();
        st.generation += 1;
        st.current = Some(query);
        st.status = FetchStatus::Loading;
        Ticket {
            generation: st.generation,
            query,
        }
    }

    /// Deliver a fetch result. Returns `false` when the ticket is stale.
    pub fn complete(
        &self,
        ticket: Ticket,
        result: Result<Vec<TransactionRecord>, ServiceError>,
    ) -> bool {
        let mut st = self.lock();
        let latest = ticket.generation == st.generation;
        match result {
            Ok(records) => {
                st.cache.insert(ticket.query, records);
                if latest {
                    st.status = FetchStatus::Succeeded;
                }
            }
            Err(e) => {
                if latest {
                    tracing::warn!(query = %ticket.query, error = %e, "fetch failed");
                    st.status = FetchStatus::Failed {
                        message: e.to_string(),
                        retryable: e.is_retryable(),
                    };
                }
            }
        }
        if !latest {
            tracing::debug!(query = %ticket.query, "dropping stale fetch result");
        }
        latest
    }

    pub fn status(&self) -> FetchStatus {
        self.lock().status.clone()
    }

    pub fn current(&self) -> Option<FetchQuery> {
        self.lock().current
    }

    /// Cached records of the current selection, possibly from an earlier fetch.
    pub fn records(&self) -> Option<Vec<TransactionRecord>> {
        let st = self.lock();
        st.current.and_then(|q| st.cache.get(&q).cloned())
    }

    pub fn cached(&self, query: &FetchQuery) -> Option<Vec<TransactionRecord>> {
        self.lock().cache.get(query).cloned()
    }

    /// Select `query` and fetch it on the calling thread.
    pub fn refresh(&self, service: &dyn TransactionService, query: FetchQuery) -> FetchStatus {
        let ticket = self.select(query);
        let result = service.fetch_transactions(&ticket.query);
        self.complete(ticket, result);
        self.status()
    }

    /// Re-fetch the current selection; `None` when nothing was ever selected.
    pub fn retry(&self, service: &dyn TransactionService) -> Option<FetchStatus> {
        let query = self.current()?;
        Some(self.refresh(service, query))
    }
}
