// Leaf Import - Core Library
// Migrates a Leaf site export into an Automation POS target, stage by stage

pub mod error;
pub mod config;
pub mod source;         // Leaf export reader
pub mod target;         // Automation API boundary (HTTP + in-memory)
pub mod xref;           // Cross-reference store: source id → target record
pub mod reconcile;      // FindOrCreate + creation counters
pub mod tender;         // Tender classification rules
pub mod layout;         // Grid packer for menu buttons
pub mod report;
pub mod stages;
pub mod orchestrator;

// Re-export commonly used types
pub use error::{MigrationError, MigrationFailure, Result};
pub use config::{MigrationConfig, DEFAULT_API_KEY, DEFAULT_BASE_URL};
pub use source::{load_export, parse_export, SourceCatalog};
pub use target::{
    EntityKind, HttpTargetClient, MemoryTargetClient, Query, Resource, TargetClient,
};
pub use xref::{CrossReferenceStore, Resolution, XrefTable};
pub use reconcile::{CreationCounters, Reconciled, ReconciliationEngine};
pub use tender::{HeldFlags, TenderClassifier};
pub use layout::{GridCapacity, GridPacker, GridPosition, PackingMode};
pub use report::{MigrationReport, MigrationWarning};
pub use stages::Stage;
pub use orchestrator::{MigrationContext, Orchestrator, DEFAULT_QUERY_LIMIT};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
