// 🚨 Migration Errors
// One error type for the whole pipeline: fatal resolution misses, remote failures, bad input

use thiserror::Error;

use crate::report::MigrationReport;
use crate::stages::Stage;

// ============================================================================
// MIGRATION ERROR
// ============================================================================

#[derive(Error, Debug)]
pub enum MigrationError {
    /// Invalid configuration or command-line input
    #[error("Configuration error: {0}")]
    Config(String),

    /// The source export could not be read or parsed
    #[error("Failed to read source export {path}: {message}")]
    SourceRead { path: String, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Transport-level failure talking to the target API
    #[error("Target API transport error: {0}")]
    Http(#[from] reqwest::Error),

    /// The target API answered with a non-success status
    #[error("Target API returned {status}: {message}")]
    Remote { status: u16, message: String },

    /// A create call came back without a generated identifier
    #[error("Target API created a {kind} without an identifier")]
    MissingIdentifier { kind: String },

    /// Tenders cannot be linked without the manual payment profile
    #[error("No '{0}' payment profile exists on the target system")]
    MissingPaymentProfile(String),

    /// Menu buttons need a station to hang panels on
    #[error("No station exists on the target system")]
    MissingStation,

    #[error("Panel '{panel}' has an unusable grid of {columns}x{rows}")]
    InvalidPanel {
        panel: String,
        columns: u32,
        rows: u32,
    },

    /// A cross-reference key was written twice
    #[error("Source id '{source_id}' already mapped in the {table} table")]
    DuplicateSourceId { table: String, source_id: String },

    /// A cross-reference table was written after its owning stage finished
    #[error("The {table} table is sealed")]
    SealedTable { table: String },
}

impl MigrationError {
    pub fn source_read(path: impl Into<String>, message: impl Into<String>) -> Self {
        MigrationError::SourceRead {
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn remote(status: u16, message: impl Into<String>) -> Self {
        MigrationError::Remote {
            status,
            message: message.into(),
        }
    }

    /// Format error with full details including error chain
    pub fn format_detailed(&self) -> String {
        let mut output = format!("Error: {}\n", self);

        let mut source = std::error::Error::source(self);
        let mut depth = 1;
        while let Some(err) = source {
            output.push_str(&format!("\nCaused by:\n  {}: {}", depth, err));
            source = err.source();
            depth += 1;
        }

        output
    }
}

/// Result type alias for migration operations.
pub type Result<T> = std::result::Result<T, MigrationError>;

// ============================================================================
// MIGRATION FAILURE (aborted run + what succeeded so far)
// ============================================================================

#[derive(Error, Debug)]
#[error("Migration aborted during {stage} stage: {error}")]
pub struct MigrationFailure {
    pub stage: Stage,
    #[source]
    pub error: MigrationError,
    pub report: MigrationReport,
}

// ============================================================================
// TESTS
// ============================================================================
