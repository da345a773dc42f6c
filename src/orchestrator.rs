// 🎼 Migration Orchestrator - runs the stages in dependency order
//
// One run = one pass over Stage::ORDER against a single target. The first
// fatal error aborts the run; the caller still gets the partial report.
// Soft misses are collected as warnings and never abort.

use chrono::Utc;
use std::time::Instant;
use tracing::{error, info, warn};

use crate::error::MigrationFailure;
use crate::reconcile::{CreationCounters, ReconciliationEngine};
use crate::report::{MigrationReport, MigrationWarning};
use crate::source::SourceCatalog;
use crate::stages::{run_stage, Stage};
use crate::target::TargetClient;
use crate::xref::CrossReferenceStore;

/// Result-set limit used when none is configured
pub const DEFAULT_QUERY_LIMIT: usize = 1000;

// ============================================================================
// MIGRATION CONTEXT (state threaded through every stage)
// ============================================================================

#[derive(Debug, Default)]
pub struct MigrationContext {
    pub xref: CrossReferenceStore,
    pub counters: CreationCounters,
    pub warnings: Vec<MigrationWarning>,
}

impl MigrationContext {
    pub fn new() -> Self {
        MigrationContext {
            xref: CrossReferenceStore::new(),
            counters: CreationCounters::new(),
            warnings: Vec::new(),
        }
    }

    /// Record a soft miss: the record migrates without the attribute
    pub fn warn(&mut self, stage: Stage, source_id: &str, message: impl Into<String>) {
        let message = message.into();
        warn!(stage = %stage, source_id = %source_id, "{}", message);

        self.warnings.push(MigrationWarning {
            stage,
            source_id: source_id.to_string(),
            message,
        });
    }
}

// ============================================================================
// ORCHESTRATOR
// ============================================================================

pub struct Orchestrator<'c, C: TargetClient> {
    engine: ReconciliationEngine<'c, C>,
}

impl<'c, C: TargetClient> Orchestrator<'c, C> {
    pub fn new(client: &'c C, query_limit: usize) -> Self {
        Orchestrator {
            engine: ReconciliationEngine::new(client, query_limit),
        }
    }

    pub fn with_defaults(client: &'c C) -> Self {
        Self::new(client, DEFAULT_QUERY_LIMIT)
    }

    /// Run every stage once, in order
    pub fn run(&self, source: &SourceCatalog) -> Result<MigrationReport, MigrationFailure> {
        let mut report = MigrationReport::empty();
        let mut ctx = MigrationContext::new();
        let timer = Instant::now();

        info!(run_id = %report.run_id, store = %source.store.name, "Migration started");

        for stage in Stage::ORDER {
            info!(stage = %stage, "Stage started");

            if let Err(err) = run_stage(stage, &self.engine, source, &mut ctx) {
                error!(stage = %stage, error = %err, "Stage failed");
                Self::finish(&mut report, ctx, timer);

                return Err(MigrationFailure {
                    stage,
                    error: err,
                    report,
                });
            }

            stage.seal(&mut ctx.xref);
            report.stages_completed.push(stage);
            info!(stage = %stage, created = ctx.counters.total(), "Stage finished");
        }

        Self::finish(&mut report, ctx, timer);
        info!(run_id = %report.run_id, "{}", report.summary());

        Ok(report)
    }

    fn finish(report: &mut MigrationReport, ctx: MigrationContext, timer: Instant) {
        report.completed_at = Utc::now();
        report.duration_ms = timer.elapsed().as_millis() as i64;
        report.counters = ctx.counters;
        report.warnings = ctx.warnings;
    }
}

// ============================================================================
// TESTS
// ============================================================================
