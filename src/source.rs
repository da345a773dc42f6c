// 📥 Source Export - Leaf site export model
// Read-only records parsed from the vendor's JSON export

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::info;

use crate::error::{MigrationError, Result};

// ============================================================================
// SITE EXPORT (document root)
// ============================================================================

/// The whole export document, already validated by the vendor
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SourceCatalog {
    pub store: Store,

    #[serde(default)]
    pub taxes: TaxRates,

    #[serde(default)]
    pub pay_methods: Vec<PayMethod>,

    #[serde(default)]
    pub printers: Vec<Printer>,

    #[serde(default)]
    pub job_codes: Vec<JobCode>,

    #[serde(default)]
    pub users: Vec<User>,

    #[serde(default)]
    pub catalog: Catalog,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub categories: Vec<Category>,

    #[serde(default)]
    pub modifiers: Vec<Modifier>,

    #[serde(default)]
    pub modifier_groups: Vec<ModifierGroup>,

    #[serde(default)]
    pub items: Vec<Item>,
}

// ============================================================================
// STORE PROFILE & TAXES
// ============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Store {
    #[serde(default)]
    pub id: String,
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

/// The export carries exactly three named rates
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaxRates {
    #[serde(rename = "bevTax", default)]
    pub bev_tax: Option<Decimal>,

    #[serde(rename = "foodTax", default)]
    pub food_tax: Option<Decimal>,

    #[serde(rename = "salesTax", default)]
    pub sales_tax: Option<Decimal>,
}

/// One named rate, keyed the way items refer to it (`taxType`)
#[derive(Debug, Clone, PartialEq)]
pub struct TaxRate {
    pub key: &'static str,
    pub name: &'static str,
    pub rate: Decimal,
}

impl TaxRates {
    /// Present rates in fixed order: bevTax, foodTax, salesTax
    pub fn named(&self) -> Vec<TaxRate> {
        [
            ("bevTax", "Beverage Tax", self.bev_tax),
            ("foodTax", "Food Tax", self.food_tax),
            ("salesTax", "Sales Tax", self.sales_tax),
        ]
        .into_iter()
        .filter_map(|(key, name, rate)| rate.map(|rate| TaxRate { key, name, rate }))
        .collect()
    }
}

// ============================================================================
// TENDERS, PRINTERS, STAFF
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayMethod {
    pub id: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Printer {
    pub id: String,
    pub name: String,
    #[serde(rename = "ipAddress", default)]
    pub ip_address: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobCode {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    #[serde(rename = "firstName")]
    pub first_name: String,
    #[serde(rename = "lastName", default)]
    pub last_name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(rename = "jobCodes", default)]
    pub job_codes: Vec<JobCodeAssignment>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobCodeAssignment {
    #[serde(rename = "jobCodeId")]
    pub job_code_id: String,
    #[serde(rename = "payRate", default)]
    pub pay_rate: Option<Decimal>,
}

// ============================================================================
// CATALOG
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Modifier {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub price: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModifierGroup {
    pub id: String,
    #[serde(rename = "groupName")]
    pub group_name: String,
    #[serde(rename = "groupDesc", default)]
    pub group_desc: Option<String>,
    #[serde(default)]
    pub modifier_group_sub_items: Vec<SubItem>,
    #[serde(default)]
    pub modifier_group_rule: Vec<Rule>,
}

impl ModifierGroup {
    /// The export wraps the selection rule in a list; only the first one counts
    pub fn rule(&self) -> Option<&Rule> {
        self.modifier_group_rule.first()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubItem {
    #[serde(rename = "modifierId")]
    pub modifier_id: String,
    #[serde(default)]
    pub position: u32,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Rule {
    #[serde(default)]
    pub minimum: u32,
    #[serde(default)]
    pub maximum: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub price: Decimal,
    #[serde(rename = "categoryId", default)]
    pub category_id: Option<String>,
    #[serde(rename = "printerId", default)]
    pub printer_id: Option<String>,
    #[serde(rename = "taxType", default)]
    pub tax_type: Option<String>,
    #[serde(rename = "isTaxable", default)]
    pub is_taxable: bool,
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(default)]
    pub barcode: Option<String>,
    #[serde(rename = "modifierGroups", default)]
    pub modifier_groups: Vec<ModifierGroupAssignment>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModifierGroupAssignment {
    #[serde(rename = "modifierGroupId")]
    pub modifier_group_id: String,
    #[serde(default)]
    pub position: u32,
}

// ============================================================================
// LOADER
// ============================================================================

/// Load the site export from disk
pub fn load_export<P: AsRef<Path>>(path: P) -> Result<SourceCatalog> {
    let path = path.as_ref();
    let shown = path.display().to_string();

    let content = fs::read_to_string(path)
        .map_err(|e| MigrationError::source_read(&shown, e.to_string()))?;

    let catalog = parse_export(&content)
        .map_err(|e| MigrationError::source_read(&shown, e.to_string()))?;

    info!(
        path = %shown,
        items = catalog.catalog.items.len(),
        categories = catalog.catalog.categories.len(),
        users = catalog.users.len(),
        "Loaded source export"
    );

    Ok(catalog)
}

/// Parse an export document already held in memory
pub fn parse_export(content: &str) -> Result<SourceCatalog> {
    Ok(serde_json::from_str(content)?)
}

// ============================================================================
// TESTS
// ============================================================================
