//! Modifier stage: standalone modifiers become items flagged `is_modifier`,
//! reconciled by name among modifiers only.

use tracing::info;

use crate::error::Result;
use crate::orchestrator::MigrationContext;
use crate::reconcile::ReconciliationEngine;
use crate::source::SourceCatalog;
use crate::target::{Item, TargetClient};

pub fn migrate_modifiers<C: TargetClient>(
    engine: &ReconciliationEngine<'_, C>,
    source: &SourceCatalog,
    ctx: &mut MigrationContext,
) -> Result<()> {
    let modifiers = &source.catalog.modifiers;

    for modifier in modifiers {
        let candidate = Item {
            name: modifier.name.clone(),
            price: modifier.price,
            is_modifier: true,
            ..Default::default()
        };

        let query = engine
            .query()
            .search(&modifier.name)
            .filter("is_modifier", true);
        let reconciled = engine.find_or_create(&mut ctx.counters, &query, candidate)?;

        ctx.xref.modifiers.insert(&modifier.id, reconciled.record)?;
    }

    info!(count = modifiers.len(), "Modifiers migrated");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{Catalog, Modifier};
    use crate::target::{EntityKind, MemoryTargetClient};
    use crate::xref::Resolution;
    use rust_decimal::Decimal;

    #[test]
    fn test_modifier_does_not_match_regular_item() {
        let target = MemoryTargetClient::new();
        target.seed(Item {
            name: "Bacon".to_string(),
            external_id: Some("i9".to_string()),
            ..Default::default()
        });
        let engine = ReconciliationEngine::new(&target, 100);
        let mut ctx = MigrationContext::new();
        let source = SourceCatalog {
            catalog: Catalog {
                modifiers: vec![Modifier {
                    id: "m1".to_string(),
                    name: "Bacon".to_string(),
                    price: Decimal::new(150, 2),
                }],
                ..Default::default()
            },
            ..Default::default()
        };

        migrate_modifiers(&engine, &source, &mut ctx).unwrap();

        assert_eq!(ctx.counters.get(EntityKind::Item), 1);
        match ctx.xref.modifiers.resolve(Some("m1")) {
            Resolution::Found(item) => {
                assert!(item.is_modifier);
                assert_eq!(item.price, Decimal::new(150, 2));
            }
            Resolution::Absent => panic!("modifier not mapped"),
        }
    }
}
