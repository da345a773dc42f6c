// 🎯 Target System - Automation POS remote API boundary
//
// The pipeline only ever talks to the target through `TargetClient`:
// - query: targeted Get with a result-set limit and optional search/filters
// - create: Post returning the record with its generated id
// - update: Put of an existing record
//
// Two implementations: `HttpTargetClient` (the real API) and
// `MemoryTargetClient` (in-process fake with the same contract).

pub mod http;
pub mod memory;
pub mod records;

pub use http::HttpTargetClient;
pub use memory::MemoryTargetClient;
pub use records::*;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::Result;

// ============================================================================
// ENTITY KIND
// ============================================================================

/// Every target entity kind the pipeline reads or writes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EntityKind {
    Store,
    TaxRate,
    TaxGroup,
    TaxGroupTaxRate,
    Tender,
    PaymentProfile,
    PaymentProfileTender,
    KitchenPrinter,
    Jobcode,
    Employee,
    EmployeeEmail,
    EmployeePhoneNumber,
    EmployeeJobcode,
    Department,
    Item,
    ItemBarcode,
    ModifierGroup,
    ModifierGroupMember,
    ItemModifierGroup,
    KitchenPrinterItemMapping,
    Station,
    UnitOfMeasure,
    MenuPanel,
    MenuButton,
}

impl EntityKind {
    /// Kinds the pipeline creates; payment profiles, stations and units
    /// already exist on the target
    pub const CREATABLE: [EntityKind; 21] = [
        EntityKind::Store,
        EntityKind::TaxRate,
        EntityKind::TaxGroup,
        EntityKind::TaxGroupTaxRate,
        EntityKind::Tender,
        EntityKind::PaymentProfileTender,
        EntityKind::KitchenPrinter,
        EntityKind::Jobcode,
        EntityKind::Employee,
        EntityKind::EmployeeEmail,
        EntityKind::EmployeePhoneNumber,
        EntityKind::EmployeeJobcode,
        EntityKind::Department,
        EntityKind::Item,
        EntityKind::ItemBarcode,
        EntityKind::ModifierGroup,
        EntityKind::ModifierGroupMember,
        EntityKind::ItemModifierGroup,
        EntityKind::KitchenPrinterItemMapping,
        EntityKind::MenuPanel,
        EntityKind::MenuButton,
    ];

    /// Display name, also the sort key of the creation report
    pub fn name(&self) -> &'static str {
        match self {
            EntityKind::Store => "Store",
            EntityKind::TaxRate => "TaxRate",
            EntityKind::TaxGroup => "TaxGroup",
            EntityKind::TaxGroupTaxRate => "TaxGroupTaxRate",
            EntityKind::Tender => "Tender",
            EntityKind::PaymentProfile => "PaymentProfile",
            EntityKind::PaymentProfileTender => "PaymentProfileTender",
            EntityKind::KitchenPrinter => "KitchenPrinter",
            EntityKind::Jobcode => "Jobcode",
            EntityKind::Employee => "Employee",
            EntityKind::EmployeeEmail => "EmployeeEmail",
            EntityKind::EmployeePhoneNumber => "EmployeePhoneNumber",
            EntityKind::EmployeeJobcode => "EmployeeJobcode",
            EntityKind::Department => "Department",
            EntityKind::Item => "Item",
            EntityKind::ItemBarcode => "ItemBarcode",
            EntityKind::ModifierGroup => "ModifierGroup",
            EntityKind::ModifierGroupMember => "ModifierGroupMember",
            EntityKind::ItemModifierGroup => "ItemModifierGroup",
            EntityKind::KitchenPrinterItemMapping => "KitchenPrinterItemMapping",
            EntityKind::Station => "Station",
            EntityKind::UnitOfMeasure => "UnitOfMeasure",
            EntityKind::MenuPanel => "MenuPanel",
            EntityKind::MenuButton => "MenuButton",
        }
    }

    /// REST collection path under `/api/`
    pub fn path(&self) -> &'static str {
        match self {
            EntityKind::Store => "stores",
            EntityKind::TaxRate => "taxrates",
            EntityKind::TaxGroup => "taxgroups",
            EntityKind::TaxGroupTaxRate => "taxgrouptaxrates",
            EntityKind::Tender => "tenders",
            EntityKind::PaymentProfile => "paymentprofiles",
            EntityKind::PaymentProfileTender => "paymentprofiletenders",
            EntityKind::KitchenPrinter => "kitchenprinters",
            EntityKind::Jobcode => "jobcodes",
            EntityKind::Employee => "employees",
            EntityKind::EmployeeEmail => "employeeemails",
            EntityKind::EmployeePhoneNumber => "employeephonenumbers",
            EntityKind::EmployeeJobcode => "employeejobcodes",
            EntityKind::Department => "departments",
            EntityKind::Item => "items",
            EntityKind::ItemBarcode => "itembarcodes",
            EntityKind::ModifierGroup => "modifiergroups",
            EntityKind::ModifierGroupMember => "modifiergroupmembers",
            EntityKind::ItemModifierGroup => "itemmodifiergroups",
            EntityKind::KitchenPrinterItemMapping => "kitchenprinteritemmappings",
            EntityKind::Station => "stations",
            EntityKind::UnitOfMeasure => "unitsofmeasure",
            EntityKind::MenuPanel => "menupanels",
            EntityKind::MenuButton => "menubuttons",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ============================================================================
// RESOURCE
// ============================================================================

/// A record type the target API can query and create
pub trait Resource: Serialize + DeserializeOwned + Clone + fmt::Debug {
    const KIND: EntityKind;

    /// System-generated id; `None` until the record has been created
    fn id(&self) -> Option<&str>;

    /// Human-meaningful key used to recognise the same entity across runs.
    /// Associations use `parent:child` composites.
    fn natural_key(&self) -> String;
}

// ============================================================================
// QUERY
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    /// Result-set size limit
    pub limit: usize,

    /// Free-text search term
    pub search: Option<String>,

    /// Exact field filters (`field=value`)
    pub filters: Vec<(String, String)>,
}

impl Query {
    pub fn new(limit: usize) -> Self {
        Query {
            limit,
            search: None,
            filters: Vec::new(),
        }
    }

    /// Builder pattern: add search term
    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    /// Builder pattern: add exact field filter
    pub fn filter(mut self, field: impl Into<String>, value: impl ToString) -> Self {
        self.filters.push((field.into(), value.to_string()));
        self
    }
}

// ============================================================================
// TARGET CLIENT
// ============================================================================

/// Synchronous request/response access to the target system
pub trait TargetClient {
    /// Get: run a targeted query and return the result set
    fn query<R: Resource>(&self, query: &Query) -> Result<Vec<R>>;

    /// Post: create the record and return it with its generated id
    fn create<R: Resource>(&self, record: &R) -> Result<R>;

    /// Put: overwrite an existing record
    fn update<R: Resource>(&self, record: &R) -> Result<()>;
}
