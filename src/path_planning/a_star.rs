//! A* path planning on an occupancy grid
//!
//! 4-connected moves. With the default [`SquaredEuclidean`] cost model both
//! the step cost and the heuristic are squared Euclidean distances, which is
//! not admissible, so the returned path is not guaranteed to be the shortest.

use std::collections::HashMap;

use log::{debug, trace};
use ordered_float::NotNan;

use crate::common::{
    Cell, CostModel, GridPath, GridPathPlanner, NoPathReason, PlannerError, PlannerResult,
    Search, SearchResult, SearchStats, SquaredEuclidean,
};
use crate::path_planning::frontier::{Frontier, NodeId, SearchNode};
use crate::utils::grid_map::{text_rows, GridMarkers, OccupancyGrid};

/// Configuration for the A* planner
#[derive(Debug, Clone, PartialEq)]
pub struct AStarConfig {
    /// Start, end and obstacle symbols used when the planner parses a grid
    pub markers: GridMarkers,
    /// Heuristic weight (1.0 keeps the plain cost model estimate)
    pub heuristic_weight: f64,
    /// Stop after this many expansions, `None` for no limit
    pub max_iterations: Option<usize>,
}

impl Default for AStarConfig {
    fn default() -> Self {
        Self {
            markers: GridMarkers::default(),
            heuristic_weight: 1.0,
            max_iterations: None,
        }
    }
}

impl AStarConfig {
    pub fn validate(&self) -> PlannerResult<()> {
        if !self.heuristic_weight.is_finite() || self.heuristic_weight < 0.0 {
            return Err(PlannerError::InvalidParameter(format!(
                "heuristic_weight must be finite and non-negative, got {}",
                self.heuristic_weight
            )));
        }
        self.markers.validate()
    }
}

/// A* grid planner
#[derive(Debug, Clone)]
pub struct AStarPlanner<C: CostModel = SquaredEuclidean> {
    config: AStarConfig,
    cost_model: C,
}

impl AStarPlanner<SquaredEuclidean> {
    pub fn new(config: AStarConfig) -> PlannerResult<Self> {
        Self::with_cost_model(config, SquaredEuclidean)
    }
}

impl Default for AStarPlanner<SquaredEuclidean> {
    fn default() -> Self {
        AStarPlanner {
            config: AStarConfig::default(),
            cost_model: SquaredEuclidean,
        }
    }
}

impl<C: CostModel> AStarPlanner<C> {
    pub fn with_cost_model(config: AStarConfig, cost_model: C) -> PlannerResult<Self> {
        config.validate()?;
        Ok(AStarPlanner { config, cost_model })
    }

    pub fn config(&self) -> &AStarConfig {
        &self.config
    }

    /// Validate `rows` with the configured markers and plan on them.
    /// An empty grid is a "no path" outcome rather than an error.
    pub fn plan_rows(&self, rows: Vec<Vec<char>>) -> PlannerResult<SearchResult> {
        if rows.iter().all(Vec::is_empty) {
            debug!("Empty grid, nothing to search");
            return Ok(SearchResult::NoPath(NoPathReason::EmptyGrid));
        }
        let grid = OccupancyGrid::from_rows(rows, &self.config.markers)?;
        self.plan(&grid)
    }

    pub fn plan_str(&self, text: &str) -> PlannerResult<SearchResult> {
        self.plan_rows(text_rows(text))
    }

    /// Run the search and report its counters along with the result
    pub fn search(&self, grid: &OccupancyGrid) -> PlannerResult<Search> {
        let mut stats = SearchStats::default();

        if !grid.reachable(grid.start()) {
            debug!("Start {} is boxed in by obstacles", grid.start());
            return Ok(Search {
                result: SearchResult::NoPath(NoPathReason::StartBlocked),
                stats,
            });
        }
        if !grid.reachable(grid.end()) {
            debug!("End {} is boxed in by obstacles", grid.end());
            return Ok(Search {
                result: SearchResult::NoPath(NoPathReason::EndBlocked),
                stats,
            });
        }

        let endpoints = grid.endpoints();
        let goal = endpoints.goal;
        debug!(
            "A* search from {} to {} (reversed: {})",
            endpoints.start, goal, endpoints.reversed
        );

        let mut frontier = Frontier::new();
        let mut closed_set: HashMap<Cell, NodeId> = HashMap::new();
        let mut node_storage: Vec<SearchNode> = Vec::new();

        let start_g = self.calc_cost(0.0)?;
        let start_h = self.calc_heuristic(endpoints.start, goal)?;
        frontier.insert(SearchNode::new(endpoints.start, start_g, start_h, None));
        stats.discovered += 1;

        while let Some(current) = frontier.extract_min() {
            if current.cell == goal {
                let path = reconstruct_path(&current, &node_storage, endpoints.reversed);
                debug!(
                    "Found goal after {} expansions, path has {} cells",
                    stats.expanded,
                    path.len()
                );
                return Ok(Search {
                    result: SearchResult::Found(path),
                    stats,
                });
            }

            if let Some(limit) = self.config.max_iterations {
                if stats.expanded >= limit {
                    debug!("Stopped after {} expansions without reaching goal", limit);
                    return Ok(Search {
                        result: SearchResult::NoPath(NoPathReason::IterationLimit),
                        stats,
                    });
                }
            }

            // Move current node from frontier to closed set
            node_storage.push(current);
            let current_index = node_storage.len() - 1;
            closed_set.insert(current.cell, current_index);
            stats.expanded += 1;
            if stats.expanded % 100 == 0 {
                trace!(
                    "Iteration: {}, open set size: {}, closed set size: {}",
                    stats.expanded,
                    frontier.len(),
                    closed_set.len()
                );
            }

            for neighbor in grid.neighbors(current.cell) {
                if closed_set.contains_key(&neighbor) {
                    continue;
                }

                let step = self.calc_cost(self.cost_model.step_cost(current.cell, neighbor))?;
                let new_g = current.g + step;

                match frontier.get(neighbor).map(|open| open.g) {
                    Some(open_g) => {
                        if new_g < open_g {
                            frontier.update(neighbor, new_g, current_index);
                            stats.relaxed += 1;
                        }
                    }
                    None => {
                        let h = self.calc_heuristic(neighbor, goal)?;
                        frontier.insert(SearchNode::new(neighbor, new_g, h, Some(current_index)));
                        stats.discovered += 1;
                    }
                }
            }
        }

        debug!(
            "Open set is empty after {} expansions, no path",
            stats.expanded
        );
        Ok(Search {
            result: SearchResult::NoPath(NoPathReason::FrontierExhausted),
            stats,
        })
    }

    fn calc_heuristic(&self, cell: Cell, goal: Cell) -> PlannerResult<NotNan<f64>> {
        self.calc_cost(self.config.heuristic_weight * self.cost_model.estimate(cell, goal))
    }

    fn calc_cost(&self, value: f64) -> PlannerResult<NotNan<f64>> {
        if !value.is_finite() || value < 0.0 {
            return Err(PlannerError::InvalidParameter(format!(
                "cost model produced {}, expected a finite non-negative cost",
                value
            )));
        }
        NotNan::new(value).map_err(|e| PlannerError::InvalidParameter(e.to_string()))
    }
}

impl<C: CostModel> GridPathPlanner for AStarPlanner<C> {
    fn plan(&self, grid: &OccupancyGrid) -> PlannerResult<SearchResult> {
        self.search(grid).map(|search| search.result)
    }
}

/// Walk parent links back from `goal` and emit the cells as `(x, y)`.
///
/// Backtracking yields goal-to-start order, so the sequence is reversed
/// unless the endpoints were already swapped before the search.
pub fn reconstruct_path(goal: &SearchNode, node_storage: &[SearchNode], reversed: bool) -> GridPath {
    let mut points = vec![goal.cell.to_grid_node()];
    let mut parent = goal.parent;
    while let Some(index) = parent {
        let node = &node_storage[index];
        points.push(node.cell.to_grid_node());
        parent = node.parent;
    }

    if !reversed {
        points.reverse();
    }
    GridPath::from_points(points)
}

/// Plan on `rows` with the default configuration
pub fn find_path(rows: Vec<Vec<char>>) -> PlannerResult<SearchResult> {
    AStarPlanner::default().plan_rows(rows)
}

/// Plan on a text grid, one row per line, with the default configuration
pub fn find_path_str(text: &str) -> PlannerResult<SearchResult> {
    AStarPlanner::default().plan_str(text)
}
