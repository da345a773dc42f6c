// 🔗 Cross-Reference Store - source id → target id/record
//
// One table per source entity kind. A table is written only by the stage
// that owns its kind, then sealed before any later stage reads it.
// A missing mapping is a visible `Resolution::Absent`, never an error.

use std::collections::HashMap;
use tracing::debug;

use crate::error::{MigrationError, Result};
use crate::target::{Item, MenuPanel, ModifierGroup};

// ============================================================================
// RESOLUTION
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution<T> {
    Found(T),
    Absent,
}

impl<T> Resolution<T> {
    pub fn is_found(&self) -> bool {
        matches!(self, Resolution::Found(_))
    }

    /// Collapse into an optional target field
    pub fn into_option(self) -> Option<T> {
        match self {
            Resolution::Found(value) => Some(value),
            Resolution::Absent => None,
        }
    }
}

impl<T: Clone> Resolution<&T> {
    /// Detach from the table so the context can be mutated afterwards
    pub fn cloned(self) -> Resolution<T> {
        match self {
            Resolution::Found(value) => Resolution::Found(value.clone()),
            Resolution::Absent => Resolution::Absent,
        }
    }
}

// ============================================================================
// XREF TABLE
// ============================================================================

#[derive(Debug, Clone)]
pub struct XrefTable<V> {
    name: &'static str,
    entries: HashMap<String, V>,
    sealed: bool,
}

impl<V> XrefTable<V> {
    pub fn new(name: &'static str) -> Self {
        XrefTable {
            name,
            entries: HashMap::new(),
            sealed: false,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Record a mapping; each source id may be written once
    pub fn insert(&mut self, source_id: &str, value: V) -> Result<()> {
        if self.sealed {
            return Err(MigrationError::SealedTable {
                table: self.name.to_string(),
            });
        }
        if self.entries.contains_key(source_id) {
            return Err(MigrationError::DuplicateSourceId {
                table: self.name.to_string(),
                source_id: source_id.to_string(),
            });
        }

        debug!(table = self.name, source_id, "xref mapped");
        self.entries.insert(source_id.to_string(), value);
        Ok(())
    }

    /// Look up a source key. Empty or missing keys resolve to `Absent`.
    pub fn resolve(&self, source_key: Option<&str>) -> Resolution<&V> {
        match source_key.filter(|key| !key.is_empty()) {
            Some(key) => match self.entries.get(key) {
                Some(value) => Resolution::Found(value),
                None => Resolution::Absent,
            },
            None => Resolution::Absent,
        }
    }

    /// Close the table once its owning stage has finished
    pub fn seal(&mut self) {
        self.sealed = true;
    }

    pub fn is_sealed(&self) -> bool {
        self.sealed
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ============================================================================
// CROSS-REFERENCE STORE
// ============================================================================

/// Target ids are opaque strings generated by the target system
pub type TargetId = String;

#[derive(Debug, Clone)]
pub struct CrossReferenceStore {
    /// taxType key (bevTax/foodTax/salesTax) → tax group id
    pub taxes: XrefTable<TargetId>,
    /// pay method id → tender id
    pub tenders: XrefTable<TargetId>,
    pub printers: XrefTable<TargetId>,
    pub jobcodes: XrefTable<TargetId>,
    /// user id → employee id
    pub employees: XrefTable<TargetId>,
    /// category id → department id
    pub departments: XrefTable<TargetId>,
    /// modifier id → item record (is_modifier)
    pub modifiers: XrefTable<Item>,
    pub modifier_groups: XrefTable<ModifierGroup>,
    pub items: XrefTable<Item>,
    /// category id → the category's item panel
    pub panels: XrefTable<MenuPanel>,
}

impl CrossReferenceStore {
    pub fn new() -> Self {
        CrossReferenceStore {
            taxes: XrefTable::new("taxes"),
            tenders: XrefTable::new("tenders"),
            printers: XrefTable::new("printers"),
            jobcodes: XrefTable::new("jobcodes"),
            employees: XrefTable::new("employees"),
            departments: XrefTable::new("departments"),
            modifiers: XrefTable::new("modifiers"),
            modifier_groups: XrefTable::new("modifier_groups"),
            items: XrefTable::new("items"),
            panels: XrefTable::new("panels"),
        }
    }
}

impl Default for CrossReferenceStore {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_found_and_absent() {
        let mut table: XrefTable<TargetId> = XrefTable::new("printers");
        table.insert("p1", "kp-9".to_string()).unwrap();

        assert_eq!(table.resolve(Some("p1")), Resolution::Found(&"kp-9".to_string()));
        assert_eq!(table.resolve(Some("p2")), Resolution::Absent);
        assert_eq!(table.resolve(Some("")), Resolution::Absent);
        assert_eq!(table.resolve(None), Resolution::Absent);
    }

    #[test]
    fn test_duplicate_key_rejected() {
        let mut table: XrefTable<TargetId> = XrefTable::new("jobcodes");
        table.insert("j1", "a".to_string()).unwrap();

        let result = table.insert("j1", "b".to_string());
        assert!(matches!(result, Err(MigrationError::DuplicateSourceId { .. })));
        assert_eq!(table.resolve(Some("j1")).into_option(), Some(&"a".to_string()));
    }

    #[test]
    fn test_sealed_table_rejects_writes() {
        let mut table: XrefTable<TargetId> = XrefTable::new("departments");
        table.insert("c1", "d1".to_string()).unwrap();
        table.seal();

        assert!(table.is_sealed());
        assert!(matches!(
            table.insert("c2", "d2".to_string()),
            Err(MigrationError::SealedTable { .. })
        ));
        assert!(table.resolve(Some("c1")).is_found());
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_store_starts_empty() {
        let store = CrossReferenceStore::new();
        assert!(store.items.is_empty());
        assert_eq!(store.panels.name(), "panels");
    }
}
