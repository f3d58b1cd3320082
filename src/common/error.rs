//! Error types for grid_astar

use std::fmt;

use crate::common::types::Cell;

/// Structural problem found while validating an occupancy grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridDefect {
    /// The grid has no rows or no columns
    Empty,
    /// A row whose length differs from the first row
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
    /// A required marker does not appear anywhere in the grid
    MissingMarker(char),
    /// A marker that must be unique appears more than once
    DuplicateMarker {
        marker: char,
        first: Cell,
        second: Cell,
    },
}

impl fmt::Display for GridDefect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GridDefect::Empty => write!(f, "grid is empty"),
            GridDefect::RaggedRow { row, expected, found } => write!(
                f,
                "row {} has {} cells, expected {}",
                row, found, expected
            ),
            GridDefect::MissingMarker(marker) => write!(f, "marker '{}' not found", marker),
            GridDefect::DuplicateMarker { marker, first, second } => write!(
                f,
                "marker '{}' appears more than once (at {} and {})",
                marker, first, second
            ),
        }
    }
}

/// Main error type for the planner
#[derive(Debug, Clone, PartialEq)]
pub enum PlannerError {
    /// The grid failed structural validation before any search ran
    InvalidGrid(GridDefect),
    /// Invalid planner parameter
    InvalidParameter(String),
}

impl fmt::Display for PlannerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlannerError::InvalidGrid(defect) => write!(f, "Invalid grid: {}", defect),
            PlannerError::InvalidParameter(msg) => write!(f, "Invalid parameter: {}", msg),
        }
    }
}

impl std::error::Error for PlannerError {}

impl From<GridDefect> for PlannerError {
    fn from(defect: GridDefect) -> Self {
        PlannerError::InvalidGrid(defect)
    }
}

/// Result type alias for planner operations
pub type PlannerResult<T> = Result<T, PlannerError>;
