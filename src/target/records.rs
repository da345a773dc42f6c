// Target records as the Automation API serialises them.
// `id` is None on candidates and filled in by the target on create.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{EntityKind, Resource};

macro_rules! resource {
    ($ty:ident, $kind:ident, |$r:ident| $key:expr) => {
        impl Resource for $ty {
            const KIND: EntityKind = EntityKind::$kind;

            fn id(&self) -> Option<&str> {
                self.id.as_deref()
            }

            fn natural_key(&self) -> String {
                let $r = self;
                $key
            }
        }
    };
}

fn link(parent: &str, child: &str) -> String {
    format!("{}:{}", parent, child)
}

// ============================================================================
// STORE & TAXES
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoreProfile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub address1: Option<String>,
    #[serde(default)]
    pub address2: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub zip: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}
resource!(StoreProfile, Store, |r| r.name.clone());

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxRate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub rate: Decimal,
}
resource!(TaxRate, TaxRate, |r| r.name.clone());

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxGroup {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
}
resource!(TaxGroup, TaxGroup, |r| r.name.clone());

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxGroupTaxRate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub tax_group_id: String,
    pub tax_rate_id: String,
}
resource!(TaxGroupTaxRate, TaxGroupTaxRate, |r| link(&r.tax_group_id, &r.tax_rate_id));

// ============================================================================
// TENDERS
// ============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TenderKind {
    Cash,
    Debit,
    Credit,
    Check,
    Gift,
    #[default]
    General,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Tender {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub description: String,
    pub kind: TenderKind,
    #[serde(default)]
    pub allow_payouts: bool,
    #[serde(default)]
    pub allow_change: bool,
    #[serde(default)]
    pub allow_cashback: bool,
    #[serde(default)]
    pub require_signature: bool,
    #[serde(default)]
    pub opens_cash_drawer: bool,
    #[serde(default)]
    pub given_as_change: bool,
    #[serde(default)]
    pub is_primary_currency: bool,
    #[serde(default)]
    pub currency_symbol: Option<String>,
}
resource!(Tender, Tender, |r| r.description.clone());

/// Pre-existing on the target; never created by the pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentProfile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
}
resource!(PaymentProfile, PaymentProfile, |r| r.name.clone());

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentProfileTender {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub payment_profile_id: String,
    pub tender_id: String,
}
resource!(PaymentProfileTender, PaymentProfileTender, |r| link(
    &r.payment_profile_id,
    &r.tender_id
));

// ============================================================================
// PRINTERS & STAFF
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KitchenPrinter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub address: Option<String>,
}
resource!(KitchenPrinter, KitchenPrinter, |r| r.name.clone());

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Jobcode {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
}
resource!(Jobcode, Jobcode, |r| r.name.clone());

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// User-friendly id carried over from the source user
    pub external_id: String,
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
}
resource!(Employee, Employee, |r| r.external_id.clone());

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeEmail {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub employee_id: String,
    pub email: String,
}
resource!(EmployeeEmail, EmployeeEmail, |r| link(&r.employee_id, &r.email));

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeePhoneNumber {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub employee_id: String,
    pub number: String,
}
resource!(EmployeePhoneNumber, EmployeePhoneNumber, |r| link(&r.employee_id, &r.number));

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeJobcode {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub employee_id: String,
    pub jobcode_id: String,
    #[serde(default)]
    pub pay_rate: Option<Decimal>,
}
resource!(EmployeeJobcode, EmployeeJobcode, |r| link(&r.employee_id, &r.jobcode_id));

// ============================================================================
// CATALOG
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Department {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
}
resource!(Department, Department, |r| r.name.clone());

/// Sellable item, or a standalone modifier when `is_modifier` is set
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Item {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    /// Present on items; modifiers are keyed by name
    #[serde(default)]
    pub external_id: Option<String>,
    #[serde(default)]
    pub price: Decimal,
    #[serde(default)]
    pub is_modifier: bool,
    #[serde(default)]
    pub department_id: Option<String>,
    #[serde(default)]
    pub tax_group_id: Option<String>,
    #[serde(default)]
    pub unit_id: Option<String>,
}
resource!(Item, Item, |r| r
    .external_id
    .clone()
    .unwrap_or_else(|| r.name.clone()));

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemBarcode {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub item_id: String,
    pub barcode: String,
}
resource!(ItemBarcode, ItemBarcode, |r| link(&r.item_id, &r.barcode));

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModifierGroup {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub minimum: Option<u32>,
    #[serde(default)]
    pub maximum: Option<u32>,
}
resource!(ModifierGroup, ModifierGroup, |r| r.name.clone());

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModifierGroupMember {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub modifier_group_id: String,
    pub item_id: String,
    #[serde(default)]
    pub position: u32,
}
resource!(ModifierGroupMember, ModifierGroupMember, |r| link(
    &r.modifier_group_id,
    &r.item_id
));

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemModifierGroup {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub item_id: String,
    pub modifier_group_id: String,
    #[serde(default)]
    pub position: u32,
}
resource!(ItemModifierGroup, ItemModifierGroup, |r| link(
    &r.item_id,
    &r.modifier_group_id
));

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KitchenPrinterItemMapping {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub kitchen_printer_id: String,
    pub item_id: String,
}
resource!(KitchenPrinterItemMapping, KitchenPrinterItemMapping, |r| link(
    &r.kitchen_printer_id,
    &r.item_id
));

/// Pre-existing on the target; never created by the pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitOfMeasure {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub symbol: String,
}
resource!(UnitOfMeasure, UnitOfMeasure, |r| r.symbol.clone());

// ============================================================================
// MENU
// ============================================================================

/// Pre-existing on the target; never created by the pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Station {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
}
resource!(Station, Station, |r| r.name.clone());

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuPanel {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub station_id: String,
    pub name: String,
    pub columns: u32,
    pub rows: u32,
    #[serde(default = "default_pages")]
    pub pages: u32,
}
resource!(MenuPanel, MenuPanel, |r| link(&r.station_id, &r.name));

fn default_pages() -> u32 {
    1
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ButtonAction {
    /// Navigate to another panel
    OpenPanel { panel_id: String },

    /// Ring up an item
    AddItem { item_id: String },
}

impl ButtonAction {
    pub fn target_id(&self) -> &str {
        match self {
            ButtonAction::OpenPanel { panel_id } => panel_id,
            ButtonAction::AddItem { item_id } => item_id,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextAlignment {
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ButtonStyle {
    pub width: u32,
    pub height: u32,
    pub background_color: String,
    pub font_family: String,
    pub font_size: u32,
    pub font_color: String,
    pub alignment: TextAlignment,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuButton {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub panel_id: String,
    pub label: String,
    pub action: ButtonAction,
    pub page: u32,
    pub column: u32,
    pub row: u32,
    #[serde(flatten)]
    pub style: ButtonStyle,
}
resource!(MenuButton, MenuButton, |r| link(&r.panel_id, r.action.target_id()));

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_association_keys_are_composite() {
        let link = TaxGroupTaxRate {
            id: None,
            tax_group_id: "g1".to_string(),
            tax_rate_id: "r1".to_string(),
        };
        assert_eq!(link.natural_key(), "g1:r1");
        assert_eq!(link.id(), None);
    }

    #[test]
    fn test_item_key_prefers_external_id() {
        let item = Item {
            name: "Latte".to_string(),
            external_id: Some("leaf-42".to_string()),
            ..Default::default()
        };
        let modifier = Item {
            name: "Oat Milk".to_string(),
            is_modifier: true,
            ..Default::default()
        };

        assert_eq!(item.natural_key(), "leaf-42");
        assert_eq!(modifier.natural_key(), "Oat Milk");
    }

    #[test]
    fn test_menu_button_serialises_flat_style() {
        let button = MenuButton {
            id: None,
            panel_id: "p1".to_string(),
            label: "Drinks".to_string(),
            action: ButtonAction::OpenPanel {
                panel_id: "p2".to_string(),
            },
            page: 1,
            column: 0,
            row: 3,
            style: ButtonStyle {
                width: 1,
                height: 1,
                background_color: "#FF1F6FB2".to_string(),
                font_family: "Arial".to_string(),
                font_size: 14,
                font_color: "#FFFFFFFF".to_string(),
                alignment: TextAlignment::Center,
            },
        };

        let json = serde_json::to_value(&button).unwrap();
        assert_eq!(json["font_family"], "Arial");
        assert_eq!(json["action"]["type"], "open_panel");
        assert!(json.get("id").is_none());
        assert_eq!(button.natural_key(), "p1:p2");

        let back: MenuButton = serde_json::from_value(json).unwrap();
        assert_eq!(back, button);
    }
}
