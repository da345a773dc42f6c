//! Kitchen printer stage.

use tracing::info;

use crate::error::Result;
use crate::orchestrator::MigrationContext;
use crate::reconcile::ReconciliationEngine;
use crate::source::SourceCatalog;
use crate::target::{KitchenPrinter, TargetClient};

pub fn migrate_printers<C: TargetClient>(
    engine: &ReconciliationEngine<'_, C>,
    source: &SourceCatalog,
    ctx: &mut MigrationContext,
) -> Result<()> {
    for printer in &source.printers {
        let candidate = KitchenPrinter {
            id: None,
            name: printer.name.clone(),
            address: printer.ip_address.clone(),
        };

        let reconciled =
            engine.find_or_create(&mut ctx.counters, &engine.query().search(&printer.name), candidate)?;
        ctx.xref.printers.insert(&printer.id, reconciled.id()?)?;
    }

    info!(count = source.printers.len(), "Printers migrated");
    Ok(())
}
