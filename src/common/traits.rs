//! Common traits defining interfaces for grid planners

use crate::common::error::PlannerResult;
use crate::common::types::*;
use crate::utils::grid_map::OccupancyGrid;

/// Trait for grid-based path planning algorithms
pub trait GridPathPlanner {
    /// Plan a path between the start and end markers of `grid`
    fn plan(&self, grid: &OccupancyGrid) -> PlannerResult<SearchResult>;
}

/// Step cost and goal estimate used by a best-first grid search
pub trait CostModel {
    /// Cost of moving from `from` to the adjacent cell `to`
    fn step_cost(&self, from: Cell, to: Cell) -> f64;

    /// Estimated remaining cost from `from` to `goal`
    fn estimate(&self, from: Cell, goal: Cell) -> f64;
}

/// Squared Euclidean distance for both step cost and estimate.
///
/// Not admissible for unit moves, so returned paths are not guaranteed
/// to be shortest.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SquaredEuclidean;

impl CostModel for SquaredEuclidean {
    fn step_cost(&self, from: Cell, to: Cell) -> f64 {
        from.distance_squared(&to)
    }

    fn estimate(&self, from: Cell, goal: Cell) -> f64 {
        from.distance_squared(&goal)
    }
}

/// Manhattan distance: unit steps and an admissible estimate on 4-connected grids
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Manhattan;

impl CostModel for Manhattan {
    fn step_cost(&self, from: Cell, to: Cell) -> f64 {
        from.manhattan(&to)
    }

    fn estimate(&self, from: Cell, goal: Cell) -> f64 {
        from.manhattan(&goal)
    }
}
