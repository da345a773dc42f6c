// Full pipeline against the in-memory target, driven by a fixture export

use leaf_import::target::{Item, MenuButton, MenuPanel, Tender, TenderKind};
use leaf_import::{
    load_export, source, EntityKind, MemoryTargetClient, Orchestrator, SourceCatalog, Stage,
};
use rust_decimal::Decimal;

const FIXTURE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/site_export.json");

fn fixture() -> SourceCatalog {
    load_export(FIXTURE).unwrap()
}

fn panel_named(target: &MemoryTargetClient, name: &str) -> MenuPanel {
    target
        .records::<MenuPanel>()
        .into_iter()
        .find(|p| p.name == name)
        .unwrap()
}

fn buttons_on(target: &MemoryTargetClient, panel: &MenuPanel) -> Vec<MenuButton> {
    target
        .records::<MenuButton>()
        .into_iter()
        .filter(|b| Some(&b.panel_id) == panel.id.as_ref())
        .collect()
}

#[test]
fn test_first_run_creates_full_catalog() {
    let target = MemoryTargetClient::with_defaults();
    let report = Orchestrator::with_defaults(&target).run(&fixture()).unwrap();

    assert_eq!(report.stages_completed, Stage::ORDER.to_vec());

    let counters = &report.counters;
    assert_eq!(counters.get(EntityKind::Store), 1);
    assert_eq!(counters.get(EntityKind::TaxRate), 3);
    assert_eq!(counters.get(EntityKind::TaxGroup), 3);
    assert_eq!(counters.get(EntityKind::Tender), 5);
    assert_eq!(counters.get(EntityKind::PaymentProfileTender), 5);
    assert_eq!(counters.get(EntityKind::KitchenPrinter), 2);
    assert_eq!(counters.get(EntityKind::Employee), 2);
    assert_eq!(counters.get(EntityKind::EmployeeJobcode), 2);
    assert_eq!(counters.get(EntityKind::Department), 2);
    // 3 modifiers + 5 items
    assert_eq!(counters.get(EntityKind::Item), 8);
    assert_eq!(counters.get(EntityKind::ModifierGroupMember), 3);
    assert_eq!(counters.get(EntityKind::ItemModifierGroup), 4);
    assert_eq!(counters.get(EntityKind::KitchenPrinterItemMapping), 3);
    assert_eq!(counters.get(EntityKind::MenuPanel), 3);
    assert_eq!(counters.get(EntityKind::MenuButton), 6);

    // pre-existing records are never created
    assert_eq!(counters.get(EntityKind::PaymentProfile), 0);
    assert_eq!(target.count(EntityKind::Station), 1);
}

#[test]
fn test_second_run_creates_nothing() {
    let target = MemoryTargetClient::with_defaults();
    let orchestrator = Orchestrator::with_defaults(&target);
    let source = fixture();

    let first = orchestrator.run(&source).unwrap();
    let items_after_first = target.count(EntityKind::Item);
    let buttons_after_first = target.count(EntityKind::MenuButton);

    let second = orchestrator.run(&source).unwrap();

    assert!(first.total_created() > 0);
    assert_eq!(second.total_created(), 0);
    assert_eq!(target.count(EntityKind::Item), items_after_first);
    assert_eq!(target.count(EntityKind::MenuButton), buttons_after_first);
    assert_eq!(
        second.counters.sorted().len(),
        EntityKind::CREATABLE.len()
    );
    assert!(second.counters.sorted().iter().all(|(_, count)| *count == 0));
}

#[test]
fn test_soft_misses_become_warnings() {
    let target = MemoryTargetClient::with_defaults();
    let report = Orchestrator::with_defaults(&target).run(&fixture()).unwrap();

    let sources: Vec<(Stage, &str)> = report
        .warnings
        .iter()
        .map(|w| (w.stage, w.source_id.as_str()))
        .collect();

    assert!(sources.contains(&(Stage::Users, "u-2")));
    assert!(sources.contains(&(Stage::Items, "i-3")));
    assert!(sources.contains(&(Stage::Items, "i-5")));
    assert!(sources.contains(&(Stage::Menu, "i-5")));
    assert_eq!(report.warnings.len(), 4);

    // the burger still migrates with the group that did resolve
    let burger = target
        .records::<Item>()
        .into_iter()
        .find(|i| i.external_id.as_deref() == Some("i-3"))
        .unwrap();
    assert!(burger.tax_group_id.is_some());
    assert!(burger.unit_id.is_some());
}

#[test]
fn test_non_taxable_item_has_no_tax_group() {
    let target = MemoryTargetClient::with_defaults();
    Orchestrator::with_defaults(&target).run(&fixture()).unwrap();

    let water = target
        .records::<Item>()
        .into_iter()
        .find(|i| i.name == "Bottled Water")
        .unwrap();

    assert_eq!(water.tax_group_id, None);
    assert!(water.department_id.is_some());
    assert_eq!(water.price, Decimal::new(200, 2));
}

#[test]
fn test_tenders_classified_and_truncated() {
    let target = MemoryTargetClient::with_defaults();
    Orchestrator::with_defaults(&target).run(&fixture()).unwrap();

    let tenders: Vec<Tender> = target.records();
    let by_description = |d: &str| tenders.iter().find(|t| t.description == d).unwrap();

    let cash = by_description("Cash");
    assert_eq!(cash.kind, TenderKind::Cash);
    assert!(cash.given_as_change);
    assert!(cash.is_primary_currency);

    assert_eq!(by_description("Visa Credit").kind, TenderKind::Credit);
    assert_eq!(by_description("Debit Card").kind, TenderKind::Debit);
    assert_eq!(by_description("Gift Card").kind, TenderKind::Gift);

    let house = by_description("House Account - Corporate Cate");
    assert_eq!(house.description.chars().count(), 30);
    assert_eq!(house.kind, TenderKind::General);
}

#[test]
fn test_menu_layout_pages_overflowing_panel() {
    let mut source = fixture();
    for n in 0..35 {
        source.catalog.items.push(source::Item {
            id: format!("gen-{}", n),
            name: format!("Special {}", n),
            price: Decimal::new(500, 2),
            category_id: Some("c-2".to_string()),
            printer_id: None,
            tax_type: None,
            is_taxable: false,
            unit: None,
            barcode: None,
            modifier_groups: Vec::new(),
        });
    }

    let target = MemoryTargetClient::with_defaults();
    Orchestrator::with_defaults(&target).run(&source).unwrap();

    // navigation panel: one column, one row per category
    let nav = panel_named(&target, "Categories");
    let nav_buttons = buttons_on(&target, &nav);
    assert_eq!((nav.columns, nav.rows, nav.pages), (1, 8, 1));
    assert_eq!(nav_buttons.len(), 2);
    assert_eq!((nav_buttons[1].page, nav_buttons[1].column, nav_buttons[1].row), (1, 0, 1));

    // food panel: burger + 35 specials on a 4x8 grid
    let food = panel_named(&target, "Food");
    let food_buttons = buttons_on(&target, &food);
    assert_eq!(food_buttons.len(), 36);
    assert_eq!(food.pages, 2);
    assert_eq!(food_buttons[0].label, "Burger");
    assert_eq!((food_buttons[4].page, food_buttons[4].column, food_buttons[4].row), (1, 0, 1));
    assert_eq!((food_buttons[31].page, food_buttons[31].column, food_buttons[31].row), (1, 3, 7));
    assert_eq!((food_buttons[32].page, food_buttons[32].column, food_buttons[32].row), (2, 0, 0));

    let drinks = panel_named(&target, "Drinks");
    assert_eq!(drinks.pages, 1);
    assert_eq!(buttons_on(&target, &drinks).len(), 3);
}
