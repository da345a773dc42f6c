//! Store profile stage.

use tracing::info;

use crate::error::Result;
use crate::orchestrator::MigrationContext;
use crate::reconcile::ReconciliationEngine;
use crate::source::SourceCatalog;
use crate::target::{StoreProfile, TargetClient};

pub fn migrate_store<C: TargetClient>(
    engine: &ReconciliationEngine<'_, C>,
    source: &SourceCatalog,
    ctx: &mut MigrationContext,
) -> Result<()> {
    let store = &source.store;

    let candidate = StoreProfile {
        id: None,
        name: store.name.clone(),
        address1: store.address1.clone(),
        address2: store.address2.clone(),
        city: store.city.clone(),
        state: store.state.clone(),
        zip: store.zip.clone(),
        phone: store.phone.clone(),
    };

    let query = engine.query().search(&store.name);
    let reconciled = engine.find_or_create(&mut ctx.counters, &query, candidate)?;

    info!(name = %store.name, created = reconciled.created, "Store profile migrated");
    Ok(())
}
