//! Client-side bookkeeping for per-day copy limits
//!
//! The backend owns the quota; this module caches the last fetched
//! allowances, notices day rollovers, and formats the reset countdown.

use std::collections::HashMap;

use baac_client::CopyAllowance;
use chrono::{DateTime, Duration, Utc};

use crate::catalog;

/// Hard upper bound on copies in a single request, before quota applies
pub const MAX_COPIES_PER_REQUEST: u32 = 10;

/// Outcome of comparing the backend's date against the cached one
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DayRollover {
    /// Nothing cached yet; the date was seeded
    FirstObservation,
    /// Same day as before
    Unchanged,
    /// The server's day moved on; cached limits are stale
    Changed { from: String, to: String },
}

/// Session cache of copy allowances plus the day-rollover watch state
#[derive(Debug, Clone)]
pub struct LimitLedger {
    allowances: HashMap<String, CopyAllowance>,
    today: Option<String>,
}

impl LimitLedger {
    /// Ledger seeded with the standard allowances shown before the first
    /// successful fetch
    pub fn new() -> Self {
        let mut allowances = HashMap::new();
        allowances.insert(catalog::CLEARANCE.to_string(), seed_allowance(1));
        allowances.insert(catalog::INDIGENCY.to_string(), seed_allowance(5));
        allowances.insert(catalog::RESIDENCY.to_string(), seed_allowance(2));
        LimitLedger {
            allowances,
            today: None,
        }
    }

    /// Replace cached allowances with a fresh fetch
    pub fn absorb(&mut self, allowances: HashMap<String, CopyAllowance>) {
        self.allowances = allowances;
    }

    /// Allowance for a document name, if the backend reported one
    pub fn allowance(&self, name: &str) -> Option<CopyAllowance> {
        self.allowances.get(name).copied()
    }

    /// Remaining quota for a document, `None` when the backend never
    /// mentioned it
    pub fn remaining(&self, name: &str) -> Option<u32> {
        self.allowance(name).map(|allowance| allowance.remaining)
    }

    /// True when the document's daily quota is spent
    pub fn is_exhausted(&self, name: &str) -> bool {
        self.remaining(name) == Some(0)
    }

    /// Highest copies value a single request may carry for this document
    ///
    /// Unknown documents fall back to the hard cap; exhausted ones get 0.
    pub fn max_copies(&self, name: &str) -> u32 {
        match self.remaining(name) {
            Some(remaining) => remaining.min(MAX_COPIES_PER_REQUEST),
            None => MAX_COPIES_PER_REQUEST,
        }
    }

    /// Record the backend's date, reporting whether the day rolled over
    pub fn note_today(&mut self, date: impl Into<String>) -> DayRollover {
        let date = date.into();
        match self.today.take() {
            None => {
                self.today = Some(date);
                DayRollover::FirstObservation
            }
            Some(previous) if previous == date => {
                self.today = Some(previous);
                DayRollover::Unchanged
            }
            Some(previous) => {
                self.today = Some(date.clone());
                DayRollover::Changed {
                    from: previous,
                    to: date,
                }
            }
        }
    }

    /// Last date observed from the backend
    pub fn today(&self) -> Option<&str> {
        self.today.as_deref()
    }
}

impl Default for LimitLedger {
    fn default() -> Self {
        Self::new()
    }
}

fn seed_allowance(limit: u32) -> CopyAllowance {
    CopyAllowance {
        used: 0,
        limit,
        remaining: limit,
    }
}

/// Live countdown to the next daily quota reset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResetCountdown {
    pub reset_at: DateTime<Utc>,
}

impl ResetCountdown {
    pub fn new(reset_at: DateTime<Utc>) -> Self {
        ResetCountdown { reset_at }
    }

    /// Time left at `now`, or `None` once the reset has passed
    pub fn remaining_at(&self, now: DateTime<Utc>) -> Option<Duration> {
        let left = self.reset_at - now;
        (left > Duration::zero()).then_some(left)
    }

    /// `HH:MM:SS` display text, hours wrapped at 24 like a wall clock
    pub fn format_remaining(&self, now: DateTime<Utc>) -> Option<String> {
        self.remaining_at(now).map(|left| {
            let total = left.num_seconds();
            let hours = (total / 3600) % 24;
            let minutes = (total % 3600) / 60;
            let seconds = total % 60;
            format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
        })
    }
}
