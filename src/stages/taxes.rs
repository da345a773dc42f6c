//! Tax stage: one rate + one group per named source rate, linked together.
//!
//! Items refer to taxes by key (`bevTax`, `foodTax`, `salesTax`), so the
//! cross-reference maps that key to the tax group id.

use tracing::info;

use crate::error::Result;
use crate::orchestrator::MigrationContext;
use crate::reconcile::ReconciliationEngine;
use crate::source::SourceCatalog;
use crate::target::{TargetClient, TaxGroup, TaxGroupTaxRate, TaxRate};

pub fn migrate_taxes<C: TargetClient>(
    engine: &ReconciliationEngine<'_, C>,
    source: &SourceCatalog,
    ctx: &mut MigrationContext,
) -> Result<()> {
    for named in source.taxes.named() {
        let rate = engine.find_or_create(
            &mut ctx.counters,
            &engine.query().search(named.name),
            TaxRate {
                id: None,
                name: named.name.to_string(),
                rate: named.rate,
            },
        )?;

        let group = engine.find_or_create(
            &mut ctx.counters,
            &engine.query().search(named.name),
            TaxGroup {
                id: None,
                name: named.name.to_string(),
            },
        )?;

        let group_id = group.id()?;
        let rate_id = rate.id()?;

        engine.find_or_create(
            &mut ctx.counters,
            &engine.query().filter("tax_group_id", &group_id),
            TaxGroupTaxRate {
                id: None,
                tax_group_id: group_id.clone(),
                tax_rate_id: rate_id,
            },
        )?;

        info!(key = named.key, rate = %named.rate, "Tax migrated");
        ctx.xref.taxes.insert(named.key, group_id)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::TaxRates;
    use crate::target::{EntityKind, MemoryTargetClient};
    use rust_decimal::Decimal;

    #[test]
    fn test_taxes_linked_and_mapped_by_key() {
        let target = MemoryTargetClient::new();
        let engine = ReconciliationEngine::new(&target, 100);
        let mut ctx = MigrationContext::new();
        let source = SourceCatalog {
            taxes: TaxRates {
                bev_tax: Some(Decimal::new(825, 4)),
                food_tax: Some(Decimal::new(7, 2)),
                sales_tax: None,
            },
            ..Default::default()
        };

        migrate_taxes(&engine, &source, &mut ctx).unwrap();

        assert_eq!(ctx.counters.get(EntityKind::TaxRate), 2);
        assert_eq!(ctx.counters.get(EntityKind::TaxGroup), 2);
        assert_eq!(ctx.counters.get(EntityKind::TaxGroupTaxRate), 2);
        assert!(ctx.xref.taxes.resolve(Some("foodTax")).is_found());
        assert!(!ctx.xref.taxes.resolve(Some("salesTax")).is_found());

        let groups: Vec<TaxGroup> = target.records();
        let food = groups.iter().find(|g| g.name == "Food Tax").unwrap();
        assert_eq!(
            ctx.xref.taxes.resolve(Some("foodTax")).into_option(),
            food.id.as_ref()
        );
    }
}
