// Copyright (C) 2026 The Pillora Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Record of invoice jobs that could not be completed.
//!
//! Entries are kept in memory for inspection and logged at error level.
//! The oldest entry is evicted once the log is full.

use crate::error::JobStage;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, PoisonError};
use time::OffsetDateTime;
use tracing::error;

/// A failed invoice job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeadLetter {
    pub order_number: String,
    pub stage: JobStage,
    pub error: String,
    pub failed_at: OffsetDateTime,
}

/// Bounded, shareable dead-letter log.
#[derive(Debug, Clone)]
pub struct DeadLetterLog {
    entries: Arc<Mutex<VecDeque<DeadLetter>>>,
    capacity: usize,
}

impl DeadLetterLog {
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: Arc::new(Mutex::new(VecDeque::new())),
            capacity: capacity.max(1),
        }
    }

    /// Records a failed job.
    pub fn record(&self, order_number: &str, stage: JobStage, error: &str) {
        error!(
            order_number,
            stage = %stage,
            error,
            "Invoice job dead-lettered"
        );

        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        if entries.len() == self.capacity {
            entries.pop_front();
        }
        entries.push_back(DeadLetter {
            order_number: order_number.to_string(),
            stage,
            error: error.to_string(),
            failed_at: OffsetDateTime::now_utc(),
        });
    }

    /// Returns a copy of the current entries, oldest first.
    #[must_use]
    pub fn snapshot(&self) -> Vec<DeadLetter> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .cloned()
            .collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
