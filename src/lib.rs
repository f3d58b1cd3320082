//! grid_astar - A* path planning on 2D occupancy grids
//!
//! This crate finds a 4-connected path between the start and end markers
//! of a character grid. Grids are validated up front; a missing route is
//! reported as a value, not an error.

// Core modules
pub mod common;
pub mod utils;

// Algorithm modules
pub mod path_planning;

// Re-export common types for convenience
pub use common::{Cell, GridNode, GridPath, NoPathReason, Search, SearchResult, SearchStats};
pub use common::{CostModel, GridPathPlanner, Manhattan, SquaredEuclidean};
pub use common::{GridDefect, PlannerError, PlannerResult};
pub use path_planning::{find_path, find_path_str, AStarConfig, AStarPlanner};
pub use utils::{GridMarkers, OccupancyGrid};
