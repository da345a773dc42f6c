//! Item stage.
//!
//! Every foreign key on an item is a soft dependency: a department, tax
//! group, unit, printer or modifier group that does not resolve is left
//! unset (and reported as a warning) rather than failing the stage.

use tracing::info;

use crate::error::Result;
use crate::orchestrator::MigrationContext;
use crate::reconcile::ReconciliationEngine;
use crate::source::{self, SourceCatalog};
use crate::stages::Stage;
use crate::target::{
    Item, ItemBarcode, ItemModifierGroup, KitchenPrinterItemMapping, TargetClient, UnitOfMeasure,
};
use crate::xref::{Resolution, TargetId};

pub fn migrate_items<C: TargetClient>(
    engine: &ReconciliationEngine<'_, C>,
    source: &SourceCatalog,
    ctx: &mut MigrationContext,
) -> Result<()> {
    // units are not created here; fetch the target's list once
    let units: Vec<UnitOfMeasure> = engine.client().query(&engine.query())?;
    let items = &source.catalog.items;

    for item in items {
        let candidate = build_item(item, &units, ctx);

        let reconciled = engine.find_or_create(
            &mut ctx.counters,
            &engine.query().filter("external_id", &item.id),
            candidate,
        )?;
        let item_id = reconciled.id()?;

        if let Some(barcode) = item.barcode.as_deref().filter(|b| !b.is_empty()) {
            engine.find_or_create(
                &mut ctx.counters,
                &engine.query().filter("item_id", &item_id),
                ItemBarcode {
                    id: None,
                    item_id: item_id.clone(),
                    barcode: barcode.to_string(),
                },
            )?;
        }

        link_modifier_groups(engine, item, &item_id, ctx)?;
        link_printer(engine, item, &item_id, ctx)?;

        ctx.xref.items.insert(&item.id, reconciled.record)?;
    }

    info!(count = items.len(), "Items migrated");
    Ok(())
}

/// Candidate target item with every resolvable foreign key filled in
fn build_item(item: &source::Item, units: &[UnitOfMeasure], ctx: &mut MigrationContext) -> Item {
    let department = ctx
        .xref
        .departments
        .resolve(item.category_id.as_deref())
        .cloned();
    if !department.is_found() && item.category_id.as_deref().is_some_and(|c| !c.is_empty()) {
        ctx.warn(Stage::Items, &item.id, "category has no department");
    }

    // non-taxable items never carry a tax group
    let tax_group = if item.is_taxable {
        ctx.xref.taxes.resolve(item.tax_type.as_deref()).cloned()
    } else {
        Resolution::Absent
    };
    if item.is_taxable && !tax_group.is_found() {
        ctx.warn(Stage::Items, &item.id, "taxable item has no tax group");
    }

    let unit = resolve_unit(units, item.unit.as_deref());
    if !unit.is_found() && item.unit.as_deref().is_some_and(|u| !u.is_empty()) {
        ctx.warn(Stage::Items, &item.id, "unit of measure not found on target");
    }

    Item {
        id: None,
        name: item.name.clone(),
        external_id: Some(item.id.clone()),
        price: item.price,
        is_modifier: false,
        department_id: department.into_option(),
        tax_group_id: tax_group.into_option(),
        unit_id: unit.into_option(),
    }
}

/// Case-insensitive symbol match against the target's units
pub fn resolve_unit(units: &[UnitOfMeasure], symbol: Option<&str>) -> Resolution<TargetId> {
    let Some(symbol) = symbol.filter(|s| !s.is_empty()) else {
        return Resolution::Absent;
    };
    let symbol = symbol.to_lowercase();

    match units
        .iter()
        .find(|unit| unit.symbol.to_lowercase() == symbol)
        .and_then(|unit| unit.id.clone())
    {
        Some(id) => Resolution::Found(id),
        None => Resolution::Absent,
    }
}

fn link_modifier_groups<C: TargetClient>(
    engine: &ReconciliationEngine<'_, C>,
    item: &source::Item,
    item_id: &str,
    ctx: &mut MigrationContext,
) -> Result<()> {
    for assignment in &item.modifier_groups {
        let group_id = match ctx
            .xref
            .modifier_groups
            .resolve(Some(assignment.modifier_group_id.as_str()))
        {
            Resolution::Found(group) => group.id.clone(),
            Resolution::Absent => None,
        };
        let Some(group_id) = group_id else {
            ctx.warn(
                Stage::Items,
                &item.id,
                format!("modifier group '{}' was not migrated", assignment.modifier_group_id),
            );
            continue;
        };

        engine.find_or_create(
            &mut ctx.counters,
            &engine.query().filter("item_id", item_id),
            ItemModifierGroup {
                id: None,
                item_id: item_id.to_string(),
                modifier_group_id: group_id,
                position: assignment.position,
            },
        )?;
    }

    Ok(())
}

fn link_printer<C: TargetClient>(
    engine: &ReconciliationEngine<'_, C>,
    item: &source::Item,
    item_id: &str,
    ctx: &mut MigrationContext,
) -> Result<()> {
    match ctx.xref.printers.resolve(item.printer_id.as_deref()).cloned() {
        Resolution::Found(printer_id) => {
            engine.find_or_create(
                &mut ctx.counters,
                &engine.query().filter("item_id", item_id),
                KitchenPrinterItemMapping {
                    id: None,
                    kitchen_printer_id: printer_id,
                    item_id: item_id.to_string(),
                },
            )?;
        }
        Resolution::Absent => {
            if item.printer_id.as_deref().is_some_and(|p| !p.is_empty()) {
                ctx.warn(Stage::Items, &item.id, "printer was not migrated");
            }
        }
    }

    Ok(())
}
