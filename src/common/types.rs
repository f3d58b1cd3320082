//! Common types used throughout grid_astar

use std::fmt;

/// Grid coordinate in `(row, col)` form, row-major.
///
/// Ordering is lexicographic on `(row, col)`; the frontier relies on it to
/// break ties between nodes of equal total cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

impl Cell {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Squared Euclidean distance between two cells
    pub fn distance_squared(&self, other: &Cell) -> f64 {
        let dr = self.row.abs_diff(other.row) as f64;
        let dc = self.col.abs_diff(other.col) as f64;
        dr * dr + dc * dc
    }

    /// Manhattan distance between two cells
    pub fn manhattan(&self, other: &Cell) -> f64 {
        (self.row.abs_diff(other.row) + self.col.abs_diff(other.col)) as f64
    }

    /// Offset by `(dr, dc)`, `None` if it would go below zero
    pub fn offset(&self, dr: isize, dc: isize) -> Option<Cell> {
        Some(Cell {
            row: self.row.checked_add_signed(dr)?,
            col: self.col.checked_add_signed(dc)?,
        })
    }

    /// The same cell in `(x, y)` form
    pub fn to_grid_node(&self) -> GridNode {
        GridNode::new(self.col, self.row)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

impl From<(usize, usize)> for Cell {
    fn from(tuple: (usize, usize)) -> Self {
        Self { row: tuple.0, col: tuple.1 }
    }
}

/// Grid point in `(x, y)` form: `x` is the column, `y` the row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridNode {
    pub x: usize,
    pub y: usize,
}

impl GridNode {
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

impl From<GridNode> for (usize, usize) {
    fn from(node: GridNode) -> Self {
        (node.x, node.y)
    }
}

/// Path on the grid, from start to end inclusive
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridPath {
    pub points: Vec<GridNode>,
}

impl GridPath {
    pub fn new() -> Self {
        Self { points: Vec::new() }
    }

    pub fn from_points(points: Vec<GridNode>) -> Self {
        Self { points }
    }

    pub fn push(&mut self, point: GridNode) {
        self.points.push(point);
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> Option<&GridNode> {
        self.points.first()
    }

    pub fn last(&self) -> Option<&GridNode> {
        self.points.last()
    }

    /// True if every step moves exactly one cell horizontally or vertically
    pub fn is_orthogonal(&self) -> bool {
        self.points
            .windows(2)
            .all(|w| w[0].x.abs_diff(w[1].x) + w[0].y.abs_diff(w[1].y) == 1)
    }

    pub fn to_tuples(&self) -> Vec<(usize, usize)> {
        self.points.iter().map(|&p| p.into()).collect()
    }
}

impl Default for GridPath {
    fn default() -> Self {
        Self::new()
    }
}

/// Why a search produced no path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoPathReason {
    /// The grid had no cells
    EmptyGrid,
    /// The start cell has no open orthogonal neighbor
    StartBlocked,
    /// The end cell has no open orthogonal neighbor
    EndBlocked,
    /// Every reachable cell was expanded without meeting the goal
    FrontierExhausted,
    /// The configured expansion cap was hit
    IterationLimit,
}

impl fmt::Display for NoPathReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            NoPathReason::EmptyGrid => "grid is empty",
            NoPathReason::StartBlocked => "start is boxed in",
            NoPathReason::EndBlocked => "end is boxed in",
            NoPathReason::FrontierExhausted => "no route between start and end",
            NoPathReason::IterationLimit => "iteration limit reached",
        };
        f.write_str(msg)
    }
}

/// Outcome of a single search
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchResult {
    Found(GridPath),
    NoPath(NoPathReason),
}

impl SearchResult {
    pub fn is_found(&self) -> bool {
        matches!(self, SearchResult::Found(_))
    }

    pub fn path(&self) -> Option<&GridPath> {
        match self {
            SearchResult::Found(path) => Some(path),
            SearchResult::NoPath(_) => None,
        }
    }

    pub fn into_path(self) -> Option<GridPath> {
        match self {
            SearchResult::Found(path) => Some(path),
            SearchResult::NoPath(_) => None,
        }
    }
}

/// Counters collected during one search
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Nodes moved to the closed set
    pub expanded: usize,
    /// Nodes inserted into the frontier, start included
    pub discovered: usize,
    /// In-place cost improvements of frontier nodes
    pub relaxed: usize,
}

/// Result of a search together with its counters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Search {
    pub result: SearchResult,
    pub stats: SearchStats,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_ordering_is_row_major() {
        let mut cells = vec![Cell::new(1, 0), Cell::new(0, 2), Cell::new(0, 1)];
        cells.sort();
        assert_eq!(cells, vec![Cell::new(0, 1), Cell::new(0, 2), Cell::new(1, 0)]);
    }

    #[test]
    fn test_cell_distances() {
        let a = Cell::new(0, 0);
        let b = Cell::new(3, 4);
        assert_eq!(a.distance_squared(&b), 25.0);
        assert_eq!(b.distance_squared(&a), 25.0);
        assert_eq!(a.manhattan(&b), 7.0);
    }

    #[test]
    fn test_cell_offset() {
        let c = Cell::new(0, 2);
        assert_eq!(c.offset(-1, 0), None);
        assert_eq!(c.offset(1, -1), Some(Cell::new(1, 1)));
    }

    #[test]
    fn test_cell_to_grid_node_swaps_axes() {
        assert_eq!(Cell::new(2, 5).to_grid_node(), GridNode::new(5, 2));
    }

    #[test]
    fn test_grid_path_is_orthogonal() {
        let path = GridPath::from_points(vec![
            GridNode::new(0, 0),
            GridNode::new(1, 0),
            GridNode::new(1, 1),
        ]);
        assert!(path.is_orthogonal());
        assert_eq!(path.to_tuples(), vec![(0, 0), (1, 0), (1, 1)]);

        let diagonal = GridPath::from_points(vec![GridNode::new(0, 0), GridNode::new(1, 1)]);
        assert!(!diagonal.is_orthogonal());

        let stay = GridPath::from_points(vec![GridNode::new(0, 0), GridNode::new(0, 0)]);
        assert!(!stay.is_orthogonal());
    }

    #[test]
    fn test_search_result_accessors() {
        let found = SearchResult::Found(GridPath::from_points(vec![GridNode::new(0, 0)]));
        assert!(found.is_found());
        assert_eq!(found.path().map(|p| p.len()), Some(1));

        let none = SearchResult::NoPath(NoPathReason::StartBlocked);
        assert!(!none.is_found());
        assert!(none.into_path().is_none());
    }
}
