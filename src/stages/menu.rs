//! Menu stage: navigation and item buttons laid out on station panels.
//!
//! - one "Categories" navigation panel, one button per category, packed
//!   single-column
//! - one item panel per category, one button per item, packed row-major
//!
//! Panels whose button set spills past their page count are updated with
//! the new count.

use std::collections::{HashMap, HashSet};
use tracing::info;

use crate::error::{MigrationError, Result};
use crate::layout::{button_style, GridCapacity, GridPacker, GridPosition};
use crate::orchestrator::MigrationContext;
use crate::reconcile::ReconciliationEngine;
use crate::source::SourceCatalog;
use crate::stages::Stage;
use crate::target::{ButtonAction, MenuButton, MenuPanel, Station, TargetClient};
use crate::xref::Resolution;

pub const NAV_PANEL_NAME: &str = "Categories";
pub const NAV_PANEL_COLUMNS: u32 = 1;
pub const NAV_PANEL_ROWS: u32 = 8;
pub const ITEM_PANEL_COLUMNS: u32 = 4;
pub const ITEM_PANEL_ROWS: u32 = 8;

pub fn migrate_menu<C: TargetClient>(
    engine: &ReconciliationEngine<'_, C>,
    source: &SourceCatalog,
    ctx: &mut MigrationContext,
) -> Result<()> {
    let station: Station = engine
        .lookup(&engine.query(), |_: &Station| true)?
        .ok_or(MigrationError::MissingStation)?;
    let station_id = station
        .id
        .clone()
        .ok_or_else(|| MigrationError::MissingIdentifier {
            kind: "Station".to_string(),
        })?;

    let nav = find_or_create_panel(
        engine,
        ctx,
        &station_id,
        NAV_PANEL_NAME,
        NAV_PANEL_COLUMNS,
        NAV_PANEL_ROWS,
    )?;
    let nav_id = panel_id(&nav)?;
    let mut nav_packer = GridPacker::single_column(GridCapacity::new(&nav.name, nav.columns, nav.rows)?);

    // category panels + navigation buttons, one button per distinct panel
    let mut linked: HashSet<String> = HashSet::new();
    for category in &source.catalog.categories {
        let panel = find_or_create_panel(
            engine,
            ctx,
            &station_id,
            &category.name,
            ITEM_PANEL_COLUMNS,
            ITEM_PANEL_ROWS,
        )?;
        let target_panel_id = panel_id(&panel)?;

        if linked.insert(target_panel_id.clone()) {
            place_button(
                engine,
                ctx,
                &nav_id,
                &category.name,
                ButtonAction::OpenPanel {
                    panel_id: target_panel_id,
                },
                nav_packer.place(),
            )?;
        }

        ctx.xref.panels.insert(&category.id, panel)?;
    }
    grow_pages(engine, &nav, nav_packer.pages_used())?;

    // item buttons, one packer per category panel
    let mut packers: HashMap<String, (MenuPanel, GridPacker)> = HashMap::new();
    let mut panel_order: Vec<String> = Vec::new();

    for item in &source.catalog.items {
        let record = match ctx.xref.items.resolve(Some(item.id.as_str())).cloned() {
            Resolution::Found(record) => record,
            Resolution::Absent => {
                ctx.warn(Stage::Menu, &item.id, "item was not migrated");
                continue;
            }
        };
        let panel = match ctx.xref.panels.resolve(item.category_id.as_deref()).cloned() {
            Resolution::Found(panel) => panel,
            Resolution::Absent => {
                ctx.warn(Stage::Menu, &item.id, "item has no category panel");
                continue;
            }
        };
        let (Some(item_id), Some(id)) = (record.id.clone(), panel.id.clone()) else {
            continue;
        };

        if !packers.contains_key(&id) {
            let capacity = GridCapacity::new(&panel.name, panel.columns, panel.rows)?;
            packers.insert(id.clone(), (panel, GridPacker::row_major(capacity)));
            panel_order.push(id.clone());
        }
        let Some((_, packer)) = packers.get_mut(&id) else {
            continue;
        };
        let position = packer.place();

        place_button(
            engine,
            ctx,
            &id,
            &record.name,
            ButtonAction::AddItem { item_id },
            position,
        )?;
    }

    for id in &panel_order {
        if let Some((panel, packer)) = packers.get(id) {
            grow_pages(engine, panel, packer.pages_used())?;
        }
    }

    info!(
        categories = source.catalog.categories.len(),
        panels = panel_order.len(),
        "Menu migrated"
    );
    Ok(())
}

fn panel_id(panel: &MenuPanel) -> Result<String> {
    panel
        .id
        .clone()
        .ok_or_else(|| MigrationError::MissingIdentifier {
            kind: "MenuPanel".to_string(),
        })
}

fn find_or_create_panel<C: TargetClient>(
    engine: &ReconciliationEngine<'_, C>,
    ctx: &mut MigrationContext,
    station_id: &str,
    name: &str,
    columns: u32,
    rows: u32,
) -> Result<MenuPanel> {
    let candidate = MenuPanel {
        id: None,
        station_id: station_id.to_string(),
        name: name.to_string(),
        columns,
        rows,
        pages: 1,
    };
    let query = engine.query().search(name).filter("station_id", station_id);

    Ok(engine.find_or_create(&mut ctx.counters, &query, candidate)?.record)
}

fn place_button<C: TargetClient>(
    engine: &ReconciliationEngine<'_, C>,
    ctx: &mut MigrationContext,
    panel_id: &str,
    label: &str,
    action: ButtonAction,
    position: GridPosition,
) -> Result<()> {
    let button = MenuButton {
        id: None,
        panel_id: panel_id.to_string(),
        label: label.to_string(),
        action,
        page: position.page,
        column: position.column,
        row: position.row,
        style: button_style(),
    };

    engine.find_or_create(
        &mut ctx.counters,
        &engine.query().filter("panel_id", panel_id),
        button,
    )?;
    Ok(())
}

/// Put the panel back with a larger page count if its buttons spilled over
fn grow_pages<C: TargetClient>(
    engine: &ReconciliationEngine<'_, C>,
    panel: &MenuPanel,
    pages_used: u32,
) -> Result<()> {
    if pages_used <= panel.pages {
        return Ok(());
    }

    let mut updated = panel.clone();
    updated.pages = pages_used;
    engine.client().update(&updated)?;

    info!(panel = %panel.name, pages = pages_used, "Panel pages extended");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{self, Catalog, Category};
    use crate::target::{EntityKind, Item, MemoryTargetClient};

    fn categories(count: usize) -> Vec<Category> {
        (0..count)
            .map(|i| Category {
                id: format!("c{}", i),
                name: format!("Category {}", i),
            })
            .collect()
    }

    fn source_item(id: &str, category: &str) -> source::Item {
        source::Item {
            id: id.to_string(),
            name: format!("Item {}", id),
            price: Default::default(),
            category_id: Some(category.to_string()),
            printer_id: None,
            tax_type: None,
            is_taxable: false,
            unit: None,
            barcode: None,
            modifier_groups: Vec::new(),
        }
    }

    #[test]
    fn test_missing_station_is_fatal() {
        let target = MemoryTargetClient::new();
        let engine = ReconciliationEngine::new(&target, 100);
        let mut ctx = MigrationContext::new();

        let result = migrate_menu(&engine, &SourceCatalog::default(), &mut ctx);
        assert!(matches!(result, Err(MigrationError::MissingStation)));
    }

    #[test]
    fn test_category_buttons_page_after_eight() {
        let target = MemoryTargetClient::with_defaults();
        let engine = ReconciliationEngine::new(&target, 500);
        let mut ctx = MigrationContext::new();
        let source = SourceCatalog {
            catalog: Catalog {
                categories: categories(10),
                ..Default::default()
            },
            ..Default::default()
        };

        migrate_menu(&engine, &source, &mut ctx).unwrap();

        let buttons: Vec<MenuButton> = target.records();
        assert_eq!(buttons.len(), 10);
        assert_eq!((buttons[7].page, buttons[7].row), (1, 7));
        assert_eq!((buttons[8].page, buttons[8].row), (2, 0));
        assert_eq!((buttons[9].page, buttons[9].row), (2, 1));
        assert!(buttons.iter().all(|b| b.column == 0));

        let panels: Vec<MenuPanel> = target.records();
        let nav = panels.iter().find(|p| p.name == NAV_PANEL_NAME).unwrap();
        assert_eq!(nav.pages, 2);
        assert_eq!(ctx.counters.get(EntityKind::MenuPanel), 11);
        assert_eq!(ctx.xref.panels.len(), 10);
    }

    #[test]
    fn test_same_named_categories_share_one_button() {
        let target = MemoryTargetClient::with_defaults();
        let engine = ReconciliationEngine::new(&target, 500);
        let mut ctx = MigrationContext::new();
        let named = |id: &str, name: &str| Category {
            id: id.to_string(),
            name: name.to_string(),
        };
        let source = SourceCatalog {
            catalog: Catalog {
                categories: vec![named("c1", "Drinks"), named("c2", "Drinks"), named("c3", "Food")],
                ..Default::default()
            },
            ..Default::default()
        };

        migrate_menu(&engine, &source, &mut ctx).unwrap();

        let buttons: Vec<(String, u32)> = target
            .records::<MenuButton>()
            .into_iter()
            .map(|b| (b.label, b.row))
            .collect();
        assert_eq!(
            buttons,
            vec![("Drinks".to_string(), 0), ("Food".to_string(), 1)]
        );

        // both source categories still map to the shared panel
        assert_eq!(ctx.xref.panels.len(), 3);
        let first = ctx.xref.panels.resolve(Some("c1")).cloned().into_option();
        let second = ctx.xref.panels.resolve(Some("c2")).cloned().into_option();
        assert_eq!(first, second);
    }

    #[test]
    fn test_item_buttons_row_major_per_panel() {
        let target = MemoryTargetClient::with_defaults();
        let engine = ReconciliationEngine::new(&target, 500);
        let mut ctx = MigrationContext::new();

        let mut items = Vec::new();
        for i in 0..40 {
            let id = format!("i{}", i);
            let record = target.seed(Item {
                name: format!("Item {}", id),
                external_id: Some(id.clone()),
                ..Default::default()
            });
            ctx.xref.items.insert(&id, record).unwrap();
            items.push(source_item(&id, "c0"));
        }
        let orphan = target.seed(Item {
            name: "Item orphan".to_string(),
            external_id: Some("orphan".to_string()),
            ..Default::default()
        });
        ctx.xref.items.insert("orphan", orphan).unwrap();
        items.push(source_item("orphan", "c-unknown"));
        items.push(source_item("never-migrated", "c0"));

        let source = SourceCatalog {
            catalog: Catalog {
                categories: categories(1),
                items,
                ..Default::default()
            },
            ..Default::default()
        };

        migrate_menu(&engine, &source, &mut ctx).unwrap();

        let panel_id = match ctx.xref.panels.resolve(Some("c0")) {
            Resolution::Found(panel) => panel.id.clone().unwrap(),
            Resolution::Absent => panic!("category panel not mapped"),
        };
        let buttons: Vec<MenuButton> = target
            .records::<MenuButton>()
            .into_iter()
            .filter(|b| b.panel_id == panel_id)
            .collect();

        assert_eq!(buttons.len(), 40);
        assert_eq!((buttons[31].page, buttons[31].row, buttons[31].column), (1, 7, 3));
        assert_eq!((buttons[32].page, buttons[32].row, buttons[32].column), (2, 0, 0));
        assert_eq!(ctx.warnings.len(), 2);

        let panels: Vec<MenuPanel> = target.records();
        let category_panel = panels.iter().find(|p| p.id.as_deref() == Some(&panel_id)).unwrap();
        assert_eq!(category_panel.pages, 2);
    }

    #[test]
    fn test_zero_row_panel_is_fatal() {
        let target = MemoryTargetClient::with_defaults();
        let station: Vec<Station> = target.records();
        target.seed(MenuPanel {
            id: None,
            station_id: station[0].id.clone().unwrap(),
            name: NAV_PANEL_NAME.to_string(),
            columns: 1,
            rows: 0,
            pages: 1,
        });
        let engine = ReconciliationEngine::new(&target, 100);
        let mut ctx = MigrationContext::new();

        let result = migrate_menu(&engine, &SourceCatalog::default(), &mut ctx);
        assert!(matches!(result, Err(MigrationError::InvalidPanel { .. })));
    }
}
