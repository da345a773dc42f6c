// ⚖️ Reconciliation Engine - find existing, else create
//
// Guarantee: at most one target record per distinct natural key, no matter
// how many times the pipeline runs against the same catalog.
//
// Matching always scans a targeted query against the live target system,
// never a local cache. A match means no write and no counter increment.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

use crate::error::{MigrationError, Result};
use crate::target::{EntityKind, Query, Resource, TargetClient};

/// Maximum length of a tender description on the target
pub const TENDER_DESCRIPTION_MAX: usize = 30;

/// Keep the first `max_chars` characters. Idempotent:
/// `truncate(truncate(s, n), n) == truncate(s, n)`.
pub fn truncate(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

// ============================================================================
// CREATION COUNTERS
// ============================================================================

/// One counter per creatable target kind, keyed by kind name so iteration
/// is already sorted for the report. Every counter starts at zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreationCounters {
    counts: BTreeMap<String, u64>,
}

impl CreationCounters {
    pub fn new() -> Self {
        CreationCounters {
            counts: EntityKind::CREATABLE
                .iter()
                .map(|kind| (kind.name().to_string(), 0))
                .collect(),
        }
    }

    pub fn increment(&mut self, kind: EntityKind) {
        *self.counts.entry(kind.name().to_string()).or_insert(0) += 1;
    }

    pub fn get(&self, kind: EntityKind) -> u64 {
        self.counts.get(kind.name()).copied().unwrap_or(0)
    }

    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    /// (kind name, count) sorted by kind name
    pub fn sorted(&self) -> Vec<(&str, u64)> {
        self.counts.iter().map(|(k, v)| (k.as_str(), *v)).collect()
    }
}

impl Default for CreationCounters {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// RECONCILED RECORD
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct Reconciled<R> {
    pub record: R,
    pub created: bool,
}

impl<R: Resource> Reconciled<R> {
    /// Target id of the matched or created record
    pub fn id(&self) -> Result<String> {
        self.record
            .id()
            .map(str::to_string)
            .ok_or_else(|| MigrationError::MissingIdentifier {
                kind: R::KIND.to_string(),
            })
    }
}

// ============================================================================
// RECONCILIATION ENGINE
// ============================================================================

pub struct ReconciliationEngine<'c, C: TargetClient> {
    client: &'c C,

    /// Result-set size limit for every lookup query
    query_limit: usize,
}

impl<'c, C: TargetClient> ReconciliationEngine<'c, C> {
    pub fn new(client: &'c C, query_limit: usize) -> Self {
        ReconciliationEngine {
            client,
            query_limit,
        }
    }

    pub fn client(&self) -> &'c C {
        self.client
    }

    /// Start a query with the configured limit
    pub fn query(&self) -> Query {
        Query::new(self.query_limit)
    }

    /// First record in the live result set that satisfies `predicate`
    pub fn lookup<R, F>(&self, query: &Query, predicate: F) -> Result<Option<R>>
    where
        R: Resource,
        F: Fn(&R) -> bool,
    {
        let results: Vec<R> = self.client.query(query)?;
        Ok(results.into_iter().find(|record| predicate(record)))
    }

    /// Find the record whose natural key equals the candidate's, else create
    /// the candidate and count it
    pub fn find_or_create<R: Resource>(
        &self,
        counters: &mut CreationCounters,
        query: &Query,
        candidate: R,
    ) -> Result<Reconciled<R>> {
        let key = candidate.natural_key();

        if let Some(existing) = self.lookup(query, |record: &R| record.natural_key() == key)? {
            debug!(kind = %R::KIND, key = %key, "matched existing");
            return Ok(Reconciled {
                record: existing,
                created: false,
            });
        }

        let created = self.client.create(&candidate)?;
        if created.id().is_none() {
            return Err(MigrationError::MissingIdentifier {
                kind: R::KIND.to_string(),
            });
        }

        counters.increment(R::KIND);
        debug!(kind = %R::KIND, key = %key, id = ?created.id(), "created");

        Ok(Reconciled {
            record: created,
            created: true,
        })
    }
}

// ============================================================================
// TESTS
// ============================================================================
