//! Job code stage.

use tracing::info;

use crate::error::Result;
use crate::orchestrator::MigrationContext;
use crate::reconcile::ReconciliationEngine;
use crate::source::SourceCatalog;
use crate::target::{Jobcode, TargetClient};

pub fn migrate_jobcodes<C: TargetClient>(
    engine: &ReconciliationEngine<'_, C>,
    source: &SourceCatalog,
    ctx: &mut MigrationContext,
) -> Result<()> {
    for job_code in &source.job_codes {
        let candidate = Jobcode {
            id: None,
            name: job_code.name.clone(),
        };

        let reconciled =
            engine.find_or_create(&mut ctx.counters, &engine.query().search(&job_code.name), candidate)?;
        ctx.xref.jobcodes.insert(&job_code.id, reconciled.id()?)?;
    }

    info!(count = source.job_codes.len(), "Job codes migrated");
    Ok(())
}
