//! Department stage: every source category becomes a department.

use tracing::info;

use crate::error::Result;
use crate::orchestrator::MigrationContext;
use crate::reconcile::ReconciliationEngine;
use crate::source::SourceCatalog;
use crate::target::{Department, TargetClient};

pub fn migrate_departments<C: TargetClient>(
    engine: &ReconciliationEngine<'_, C>,
    source: &SourceCatalog,
    ctx: &mut MigrationContext,
) -> Result<()> {
    let categories = &source.catalog.categories;

    for category in categories {
        let candidate = Department {
            id: None,
            name: category.name.clone(),
        };

        let reconciled =
            engine.find_or_create(&mut ctx.counters, &engine.query().search(&category.name), candidate)?;
        ctx.xref.departments.insert(&category.id, reconciled.id()?)?;
    }

    info!(count = categories.len(), "Departments migrated");
    Ok(())
}
