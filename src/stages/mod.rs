// 🪜 Migration Stages - one step per source/target entity kind
//
// Fixed dependency order:
//   Store → Taxes → Tenders → Printers → Job Codes → Users → Departments
//   → Modifiers → Modifier Groups → Items → Menu
//
// Each stage reads only cross-reference tables sealed by earlier stages and
// writes (then seals) only the table it owns.

pub mod departments;
pub mod items;
pub mod jobcodes;
pub mod menu;
pub mod modifier_groups;
pub mod modifiers;
pub mod printers;
pub mod store;
pub mod taxes;
pub mod tenders;
pub mod users;

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::Result;
use crate::orchestrator::MigrationContext;
use crate::reconcile::ReconciliationEngine;
use crate::source::SourceCatalog;
use crate::target::TargetClient;
use crate::xref::CrossReferenceStore;

// ============================================================================
// STAGE
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stage {
    Store,
    Taxes,
    Tenders,
    Printers,
    JobCodes,
    Users,
    Departments,
    Modifiers,
    ModifierGroups,
    Items,
    Menu,
}

impl Stage {
    /// Every stage, in the only order they may run
    pub const ORDER: [Stage; 11] = [
        Stage::Store,
        Stage::Taxes,
        Stage::Tenders,
        Stage::Printers,
        Stage::JobCodes,
        Stage::Users,
        Stage::Departments,
        Stage::Modifiers,
        Stage::ModifierGroups,
        Stage::Items,
        Stage::Menu,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Stage::Store => "Store",
            Stage::Taxes => "Taxes",
            Stage::Tenders => "Tenders",
            Stage::Printers => "Printers",
            Stage::JobCodes => "Job Codes",
            Stage::Users => "Users",
            Stage::Departments => "Departments",
            Stage::Modifiers => "Modifiers",
            Stage::ModifierGroups => "Modifier Groups",
            Stage::Items => "Items",
            Stage::Menu => "Menu",
        }
    }

    /// Seal the cross-reference table this stage owns
    pub fn seal(&self, xref: &mut CrossReferenceStore) {
        match self {
            Stage::Store => {}
            Stage::Taxes => xref.taxes.seal(),
            Stage::Tenders => xref.tenders.seal(),
            Stage::Printers => xref.printers.seal(),
            Stage::JobCodes => xref.jobcodes.seal(),
            Stage::Users => xref.employees.seal(),
            Stage::Departments => xref.departments.seal(),
            Stage::Modifiers => xref.modifiers.seal(),
            Stage::ModifierGroups => xref.modifier_groups.seal(),
            Stage::Items => xref.items.seal(),
            Stage::Menu => xref.panels.seal(),
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Run one stage against the target
pub fn run_stage<C: TargetClient>(
    stage: Stage,
    engine: &ReconciliationEngine<'_, C>,
    source: &SourceCatalog,
    ctx: &mut MigrationContext,
) -> Result<()> {
    match stage {
        Stage::Store => store::migrate_store(engine, source, ctx),
        Stage::Taxes => taxes::migrate_taxes(engine, source, ctx),
        Stage::Tenders => tenders::migrate_tenders(engine, source, ctx),
        Stage::Printers => printers::migrate_printers(engine, source, ctx),
        Stage::JobCodes => jobcodes::migrate_jobcodes(engine, source, ctx),
        Stage::Users => users::migrate_users(engine, source, ctx),
        Stage::Departments => departments::migrate_departments(engine, source, ctx),
        Stage::Modifiers => modifiers::migrate_modifiers(engine, source, ctx),
        Stage::ModifierGroups => modifier_groups::migrate_modifier_groups(engine, source, ctx),
        Stage::Items => items::migrate_items(engine, source, ctx),
        Stage::Menu => menu::migrate_menu(engine, source, ctx),
    }
}
