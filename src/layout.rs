// 🧱 Grid Layout Packer - deterministic button placement
//
// The target UI addresses buttons by (page, column, row), not list order.
// Two modes:
// - SingleColumn: one button per row in column 0, new page after the last row
// - RowMajor: fill a row left to right, then the next row, then a new page
//
// Pages are 1-based, columns and rows 0-based. The last usable row is
// `rows - 1`.

use serde::{Deserialize, Serialize};

use crate::error::{MigrationError, Result};
use crate::target::{ButtonStyle, TextAlignment};

// ============================================================================
// FIXED STYLING POLICY
// ============================================================================

pub const BUTTON_BACKGROUND: &str = "#FF1F6FB2";
pub const BUTTON_FONT_FAMILY: &str = "Arial";
pub const BUTTON_FONT_SIZE: u32 = 14;
pub const BUTTON_FONT_COLOR: &str = "#FFFFFFFF";

/// Every generated button: one cell, accent background, centred white text
pub fn button_style() -> ButtonStyle {
    ButtonStyle {
        width: 1,
        height: 1,
        background_color: BUTTON_BACKGROUND.to_string(),
        font_family: BUTTON_FONT_FAMILY.to_string(),
        font_size: BUTTON_FONT_SIZE,
        font_color: BUTTON_FONT_COLOR.to_string(),
        alignment: TextAlignment::Center,
    }
}

// ============================================================================
// GRID TYPES
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PackingMode {
    SingleColumn,
    RowMajor,
}

/// Usable grid of a panel; only constructed through `new`, so both
/// dimensions are at least 1
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GridCapacity {
    columns: u32,
    rows: u32,
}

impl GridCapacity {
    /// Reject grids with no usable cell
    pub fn new(panel: &str, columns: u32, rows: u32) -> Result<Self> {
        if columns == 0 || rows == 0 {
            return Err(MigrationError::InvalidPanel {
                panel: panel.to_string(),
                columns,
                rows,
            });
        }
        Ok(GridCapacity { columns, rows })
    }

    pub fn columns(&self) -> u32 {
        self.columns
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridPosition {
    pub page: u32,
    pub column: u32,
    pub row: u32,
}

// ============================================================================
// GRID PACKER
// ============================================================================

/// Cursor over one panel's grid. Each `place()` returns the next cell.
#[derive(Debug, Clone)]
pub struct GridPacker {
    mode: PackingMode,
    capacity: GridCapacity,
    page: u32,
    column: u32,
    row: u32,
}

impl GridPacker {
    pub fn new(mode: PackingMode, capacity: GridCapacity) -> Self {
        GridPacker {
            mode,
            capacity,
            page: 1,
            column: 0,
            row: 0,
        }
    }

    pub fn single_column(capacity: GridCapacity) -> Self {
        Self::new(PackingMode::SingleColumn, capacity)
    }

    pub fn row_major(capacity: GridCapacity) -> Self {
        Self::new(PackingMode::RowMajor, capacity)
    }

    /// Assign the next cell
    pub fn place(&mut self) -> GridPosition {
        let last_row = self.capacity.rows - 1;
        let last_column = self.capacity.columns - 1;

        match self.mode {
            PackingMode::SingleColumn => {
                if self.row > last_row {
                    self.page += 1;
                    self.row = 0;
                }
                let position = GridPosition {
                    page: self.page,
                    column: 0,
                    row: self.row,
                };
                self.row += 1;
                position
            }
            PackingMode::RowMajor => {
                // column overflow first, then row overflow
                if self.column > last_column {
                    self.column = 0;
                    self.row += 1;
                }
                if self.row > last_row {
                    self.page += 1;
                    self.row = 0;
                    self.column = 0;
                }
                let position = GridPosition {
                    page: self.page,
                    column: self.column,
                    row: self.row,
                };
                self.column += 1;
                position
            }
        }
    }

    /// Pages touched so far (at least 1)
    pub fn pages_used(&self) -> u32 {
        self.page
    }
}

// ============================================================================
// TESTS
// ============================================================================
