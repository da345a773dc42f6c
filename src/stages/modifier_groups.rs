//! Modifier group stage: groups with their selection rule, and one member
//! link per sub item whose modifier was migrated.

use tracing::info;

use crate::error::Result;
use crate::orchestrator::MigrationContext;
use crate::reconcile::ReconciliationEngine;
use crate::source::SourceCatalog;
use crate::stages::Stage;
use crate::target::{ModifierGroup, ModifierGroupMember, TargetClient};
use crate::xref::Resolution;

pub fn migrate_modifier_groups<C: TargetClient>(
    engine: &ReconciliationEngine<'_, C>,
    source: &SourceCatalog,
    ctx: &mut MigrationContext,
) -> Result<()> {
    let groups = &source.catalog.modifier_groups;

    for group in groups {
        let rule = group.rule();
        let candidate = ModifierGroup {
            id: None,
            name: group.group_name.clone(),
            description: group.group_desc.clone(),
            minimum: rule.map(|r| r.minimum),
            maximum: rule.map(|r| r.maximum),
        };

        let reconciled = engine.find_or_create(
            &mut ctx.counters,
            &engine.query().search(&group.group_name),
            candidate,
        )?;
        let group_id = reconciled.id()?;

        for sub_item in &group.modifier_group_sub_items {
            let item_id = match ctx.xref.modifiers.resolve(Some(sub_item.modifier_id.as_str())) {
                Resolution::Found(item) => item.id.clone(),
                Resolution::Absent => None,
            };
            let Some(item_id) = item_id else {
                ctx.warn(
                    Stage::ModifierGroups,
                    &group.id,
                    format!("modifier '{}' was not migrated", sub_item.modifier_id),
                );
                continue;
            };

            engine.find_or_create(
                &mut ctx.counters,
                &engine.query().filter("modifier_group_id", &group_id),
                ModifierGroupMember {
                    id: None,
                    modifier_group_id: group_id.clone(),
                    item_id,
                    position: sub_item.position,
                },
            )?;
        }

        ctx.xref.modifier_groups.insert(&group.id, reconciled.record)?;
    }

    info!(count = groups.len(), "Modifier groups migrated");
    Ok(())
}
