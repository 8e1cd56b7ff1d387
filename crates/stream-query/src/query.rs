//! Selection policies applied to a scan.
//!
//! Each function drives one event sequence to its terminal state: the
//! positional lookup returns early on a hit, the other two exhaust the
//! sequence. Scan-level failures propagate unchanged; "no matching event" is
//! a benign `None`, never an error.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::Serialize;

use common::{Envelope, EventKind};

use crate::error::Result;

/// Returns the payload of the `index`-th envelope of `kind` (zero-based, in
/// log arrival order), or `None` if fewer than `index + 1` matches exist.
///
/// Terminates early on a hit; cost is still proportional to the answer's
/// position in the full log, since non-matching envelopes are consumed too.
pub fn event_at_index<I>(events: I, kind: EventKind, index: u64) -> Result<Option<serde_json::Value>>
where
    I: IntoIterator<Item = Result<Envelope>>,
{
    metrics::counter!("index_queries_total").increment(1);

    let mut remaining = index;
    for event in events {
        let envelope = event?;
        if envelope.kind != kind {
            continue;
        }
        if remaining == 0 {
            tracing::debug!(%kind, index, "index query hit");
            return Ok(Some(envelope.payload));
        }
        remaining -= 1;
    }
    Ok(None)
}

/// Returns the payload of one envelope of `kind`, chosen uniformly over all
/// matches in the log, or `None` if no match exists.
///
/// Exhausts the sequence and buffers every matching payload before picking;
/// memory use grows with the number of matches in the retained log. The
/// selection is not reproducible across calls.
pub fn random_event<I>(events: I, kind: EventKind) -> Result<Option<serde_json::Value>>
where
    I: IntoIterator<Item = Result<Envelope>>,
{
    metrics::counter!("random_queries_total").increment(1);

    let mut matches = Vec::new();
    for event in events {
        let envelope = event?;
        if envelope.kind == kind {
            matches.push(envelope.payload);
        }
    }
    if matches.is_empty() {
        return Ok(None);
    }
    let picked = rand::rng().random_range(0..matches.len());
    tracing::debug!(%kind, matches = matches.len(), picked, "random query hit");
    Ok(Some(matches.swap_remove(picked)))
}

/// Aggregate counts of all recognized event kinds, captured from one scan.
#[derive(Debug, Clone, Serialize)]
pub struct EventStats {
    /// One counter per recognized kind; zero counts are present.
    pub counts: HashMap<EventKind, u64>,
    /// UTC wall-clock time captured at scan completion.
    pub observed_at: DateTime<Utc>,
}

impl EventStats {
    /// Returns the count for one kind.
    pub fn count(&self, kind: EventKind) -> u64 {
        self.counts.get(&kind).copied().unwrap_or(0)
    }

    /// Total envelopes with a recognized kind.
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }
}

/// Tallies one counter per recognized kind over the entire sequence.
///
/// The counts reflect exactly the envelopes observed during this one scan,
/// not a running total across queries.
pub fn collect_stats<I>(events: I) -> Result<EventStats>
where
    I: IntoIterator<Item = Result<Envelope>>,
{
    metrics::counter!("stats_queries_total").increment(1);

    let mut counts: HashMap<EventKind, u64> =
        EventKind::ALL.iter().map(|kind| (*kind, 0)).collect();
    for event in events {
        let envelope = event?;
        *counts.entry(envelope.kind).or_insert(0) += 1;
    }

    let stats = EventStats {
        counts,
        observed_at: Utc::now(),
    };
    tracing::debug!(total = stats.total(), "stats scan complete");
    Ok(stats)
}
