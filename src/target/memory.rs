// 🧪 In-memory target - same contract as the HTTP client, no network
//
// Records are stored as JSON values per entity kind, exactly as the API
// would hold them. Used by tests and by `--dry-run`.

use serde_json::Value;
use std::cell::RefCell;
use std::collections::HashMap;

use super::{
    EntityKind, PaymentProfile, Query, Resource, Station, TargetClient, UnitOfMeasure,
};
use crate::error::{MigrationError, Result};

pub struct MemoryTargetClient {
    tables: RefCell<HashMap<EntityKind, Vec<Value>>>,
}

impl MemoryTargetClient {
    /// Create an empty target
    pub fn new() -> Self {
        MemoryTargetClient {
            tables: RefCell::new(HashMap::new()),
        }
    }

    /// Create a target that looks like a freshly installed system:
    /// a "Manual" payment profile, one station, and the stock units
    pub fn with_defaults() -> Self {
        let target = MemoryTargetClient::new();

        target.seed(PaymentProfile {
            id: None,
            name: "Manual".to_string(),
        });
        target.seed(Station {
            id: None,
            name: "Register 1".to_string(),
        });
        for (name, symbol) in [("Each", "ea"), ("Pound", "lb"), ("Ounce", "oz")] {
            target.seed(UnitOfMeasure {
                id: None,
                name: name.to_string(),
                symbol: symbol.to_string(),
            });
        }

        target
    }

    /// Insert a record directly, bypassing nothing but the network
    pub fn seed<R: Resource>(&self, record: R) -> R {
        let mut value = match serde_json::to_value(&record) {
            Ok(value) => value,
            Err(_) => return record,
        };
        let id = record
            .id()
            .map(str::to_string)
            .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
        if let Value::Object(map) = &mut value {
            map.insert("id".to_string(), Value::String(id));
        }

        self.tables
            .borrow_mut()
            .entry(R::KIND)
            .or_default()
            .push(value.clone());

        serde_json::from_value(value).unwrap_or(record)
    }

    /// Number of stored records of one kind
    pub fn count(&self, kind: EntityKind) -> usize {
        self.tables.borrow().get(&kind).map_or(0, |rows| rows.len())
    }

    /// All stored records of one kind, in insertion order
    pub fn records<R: Resource>(&self) -> Vec<R> {
        self.tables
            .borrow()
            .get(&R::KIND)
            .map(|rows| {
                rows.iter()
                    .filter_map(|row| serde_json::from_value(row.clone()).ok())
                    .collect()
            })
            .unwrap_or_default()
    }

    fn matches(row: &Value, query: &Query) -> bool {
        let Value::Object(fields) = row else {
            return false;
        };

        if let Some(term) = &query.search {
            let term = term.to_lowercase();
            let hit = fields.values().any(|v| match v {
                Value::String(s) => s.to_lowercase().contains(&term),
                _ => false,
            });
            if !hit {
                return false;
            }
        }

        query.filters.iter().all(|(field, expected)| match fields.get(field) {
            Some(Value::String(s)) => s == expected,
            Some(Value::Null) | None => expected.is_empty(),
            Some(other) => other.to_string() == *expected,
        })
    }
}

impl Default for MemoryTargetClient {
    fn default() -> Self {
        Self::new()
    }
}

impl TargetClient for MemoryTargetClient {
    fn query<R: Resource>(&self, query: &Query) -> Result<Vec<R>> {
        let tables = self.tables.borrow();
        let Some(rows) = tables.get(&R::KIND) else {
            return Ok(Vec::new());
        };

        rows.iter()
            .filter(|row| Self::matches(row, query))
            .take(query.limit)
            .map(|row| Ok(serde_json::from_value(row.clone())?))
            .collect()
    }

    fn create<R: Resource>(&self, record: &R) -> Result<R> {
        let mut value = serde_json::to_value(record)?;
        if let Value::Object(map) = &mut value {
            map.insert(
                "id".to_string(),
                Value::String(uuid::Uuid::new_v4().to_string()),
            );
        }

        self.tables
            .borrow_mut()
            .entry(R::KIND)
            .or_default()
            .push(value.clone());

        Ok(serde_json::from_value(value)?)
    }

    fn update<R: Resource>(&self, record: &R) -> Result<()> {
        let id = record.id().ok_or_else(|| MigrationError::MissingIdentifier {
            kind: R::KIND.to_string(),
        })?;
        let value = serde_json::to_value(record)?;

        let mut tables = self.tables.borrow_mut();
        let slot = tables
            .get_mut(&R::KIND)
            .and_then(|rows| rows.iter_mut().find(|row| row["id"] == id));

        match slot {
            Some(row) => {
                *row = value;
                Ok(())
            }
            None => Err(MigrationError::remote(
                404,
                format!("{} {} not found", R::KIND, id),
            )),
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
