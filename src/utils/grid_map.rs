// Occupancy grid definition
// Cells are single chars; start, end and obstacle markers are configurable.

use std::ops::Deref;
use std::str::FromStr;

use itertools::{iproduct, Itertools};
extern crate nalgebra as na;

use crate::common::{Cell, GridDefect, PlannerError, PlannerResult};

/// Orthogonal moves in expansion order: up, down, right, left
pub const ORTHOGONAL: [(isize, isize); 4] = [(-1, 0), (1, 0), (0, 1), (0, -1)];

/// Symbols with special meaning in a grid; anything else is free space
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridMarkers {
    pub start: char,
    pub end: char,
    pub obstacle: char,
}

impl Default for GridMarkers {
    fn default() -> Self {
        Self {
            start: 'S',
            end: 'E',
            obstacle: 'X',
        }
    }
}

impl GridMarkers {
    pub fn validate(&self) -> PlannerResult<()> {
        if self.start == self.end || self.start == self.obstacle || self.end == self.obstacle {
            return Err(PlannerError::InvalidParameter(format!(
                "markers must be distinct, got start '{}', end '{}', obstacle '{}'",
                self.start, self.end, self.obstacle
            )));
        }
        Ok(())
    }
}

/// Search endpoints after direction normalization
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Endpoints {
    pub start: Cell,
    pub goal: Cell,
    /// Set when start and end were swapped
    pub reversed: bool,
}

/// Swap the endpoints when the end lies to the left of the start, so the
/// search always runs left to right.
pub fn canonicalize_direction(start: Cell, end: Cell) -> Endpoints {
    if start.col > end.col {
        Endpoints {
            start: end,
            goal: start,
            reversed: true,
        }
    } else {
        Endpoints {
            start,
            goal: end,
            reversed: false,
        }
    }
}

/// Validated rectangular grid with exactly one start and one end marker
#[derive(Debug, Clone, PartialEq)]
pub struct OccupancyGrid {
    grid: na::DMatrix<char>,
    markers: GridMarkers,
    start: Cell,
    end: Cell,
}

impl OccupancyGrid {
    pub fn from_rows(rows: Vec<Vec<char>>, markers: &GridMarkers) -> PlannerResult<Self> {
        markers.validate()?;

        if rows.iter().all(Vec::is_empty) {
            return Err(GridDefect::Empty.into());
        }
        let ncols = rows[0].len();
        if let Some((row, cells)) = rows.iter().find_position(|row| row.len() != ncols) {
            return Err(GridDefect::RaggedRow {
                row,
                expected: ncols,
                found: cells.len(),
            }
            .into());
        }

        let nrows = rows.len();
        let cells: Vec<char> = rows.into_iter().flatten().collect();
        let grid = na::DMatrix::from_row_slice(nrows, ncols, &cells);

        let start = locate_unique(&grid, markers.start)?;
        let end = locate_unique(&grid, markers.end)?;

        Ok(Self {
            grid,
            markers: *markers,
            start,
            end,
        })
    }

    /// Parse one row per non-empty line, one cell per char
    pub fn parse(text: &str, markers: &GridMarkers) -> PlannerResult<Self> {
        Self::from_rows(text_rows(text), markers)
    }

    pub fn markers(&self) -> &GridMarkers {
        &self.markers
    }

    pub fn start(&self) -> Cell {
        self.start
    }

    pub fn end(&self) -> Cell {
        self.end
    }

    /// First cell holding `marker` in row-major order
    pub fn locate(&self, marker: char) -> Option<Cell> {
        scan(&self.grid, marker).next()
    }

    pub fn in_bounds(&self, cell: Cell) -> bool {
        cell.row < self.grid.nrows() && cell.col < self.grid.ncols()
    }

    pub fn is_obstacle(&self, cell: Cell) -> bool {
        self.in_bounds(cell) && self.grid[(cell.row, cell.col)] == self.markers.obstacle
    }

    pub fn is_free(&self, cell: Cell) -> bool {
        self.in_bounds(cell) && self.grid[(cell.row, cell.col)] != self.markers.obstacle
    }

    /// In-bounds, non-obstacle orthogonal neighbors of `cell`
    pub fn neighbors(&self, cell: Cell) -> impl Iterator<Item = Cell> + '_ {
        ORTHOGONAL
            .iter()
            .filter_map(move |&(dr, dc)| cell.offset(dr, dc))
            .filter(move |&n| self.is_free(n))
    }

    /// True if at least one orthogonal neighbor is open.
    /// Only checks adjacency, not connectivity to anything further away.
    pub fn reachable(&self, cell: Cell) -> bool {
        self.neighbors(cell).next().is_some()
    }

    pub fn endpoints(&self) -> Endpoints {
        canonicalize_direction(self.start, self.end)
    }
}

impl Deref for OccupancyGrid {
    type Target = na::DMatrix<char>;

    fn deref(&self) -> &Self::Target {
        &self.grid
    }
}

impl FromStr for OccupancyGrid {
    type Err = PlannerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s, &GridMarkers::default())
    }
}

/// Split text into rows of cells, skipping blank lines
pub(crate) fn text_rows(text: &str) -> Vec<Vec<char>> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| line.chars().collect())
        .collect()
}

fn scan(grid: &na::DMatrix<char>, marker: char) -> impl Iterator<Item = Cell> + '_ {
    iproduct!(0..grid.nrows(), 0..grid.ncols())
        .filter(move |&(r, c)| grid[(r, c)] == marker)
        .map(Cell::from)
}

fn locate_unique(grid: &na::DMatrix<char>, marker: char) -> PlannerResult<Cell> {
    let mut hits = scan(grid, marker);
    let first = hits.next().ok_or(GridDefect::MissingMarker(marker))?;
    match hits.next() {
        Some(second) => Err(GridDefect::DuplicateMarker {
            marker,
            first,
            second,
        }
        .into()),
        None => Ok(first),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(lines: &[&str]) -> Vec<Vec<char>> {
        lines.iter().map(|l| l.chars().collect()).collect()
    }

    #[test]
    fn test_locate_markers() {
        let grid: OccupancyGrid = "S.X\n...\nX.E".parse().unwrap();
        assert_eq!(grid.nrows(), 3);
        assert_eq!(grid.ncols(), 3);
        assert_eq!(grid.start(), Cell::new(0, 0));
        assert_eq!(grid.end(), Cell::new(2, 2));
        assert_eq!(grid.locate('X'), Some(Cell::new(0, 2)));
        assert_eq!(grid.locate('#'), None);
    }

    #[test]
    fn test_empty_grid_is_rejected() {
        let err = OccupancyGrid::from_rows(vec![], &GridMarkers::default()).unwrap_err();
        assert_eq!(err, PlannerError::InvalidGrid(GridDefect::Empty));

        let err = OccupancyGrid::from_rows(vec![vec![], vec![]], &GridMarkers::default())
            .unwrap_err();
        assert_eq!(err, PlannerError::InvalidGrid(GridDefect::Empty));

        let err = "\n  \n".parse::<OccupancyGrid>().unwrap_err();
        assert_eq!(err, PlannerError::InvalidGrid(GridDefect::Empty));
    }

    #[test]
    fn test_ragged_rows_are_rejected() {
        let err = OccupancyGrid::from_rows(rows(&["S..", "..", "..E"]), &GridMarkers::default())
            .unwrap_err();
        assert_eq!(
            err,
            PlannerError::InvalidGrid(GridDefect::RaggedRow {
                row: 1,
                expected: 3,
                found: 2,
            })
        );
    }

    #[test]
    fn test_missing_marker_is_rejected() {
        let err = "S..\n...".parse::<OccupancyGrid>().unwrap_err();
        assert_eq!(err, PlannerError::InvalidGrid(GridDefect::MissingMarker('E')));

        let err = "...\n..E".parse::<OccupancyGrid>().unwrap_err();
        assert_eq!(err, PlannerError::InvalidGrid(GridDefect::MissingMarker('S')));
    }

    #[test]
    fn test_duplicate_marker_is_rejected() {
        let err = "S.S\n..E".parse::<OccupancyGrid>().unwrap_err();
        assert_eq!(
            err,
            PlannerError::InvalidGrid(GridDefect::DuplicateMarker {
                marker: 'S',
                first: Cell::new(0, 0),
                second: Cell::new(0, 2),
            })
        );
    }

    #[test]
    fn test_custom_markers() {
        let markers = GridMarkers {
            start: 'A',
            end: 'B',
            obstacle: '#',
        };
        let grid = OccupancyGrid::parse("A#\n.B", &markers).unwrap();
        assert_eq!(grid.start(), Cell::new(0, 0));
        assert_eq!(grid.end(), Cell::new(1, 1));
        assert!(grid.is_obstacle(Cell::new(0, 1)));
        // 'X' is plain free space under these markers
        let grid = OccupancyGrid::parse("AX\nXB", &markers).unwrap();
        assert!(grid.is_free(Cell::new(0, 1)));
    }

    #[test]
    fn test_markers_must_be_distinct() {
        let markers = GridMarkers {
            start: 'S',
            end: 'S',
            obstacle: 'X',
        };
        let err = OccupancyGrid::parse("S.E", &markers).unwrap_err();
        assert!(matches!(err, PlannerError::InvalidParameter(_)));
    }

    #[test]
    fn test_bounds_and_obstacles() {
        let grid: OccupancyGrid = "SX\n.E".parse().unwrap();
        assert!(grid.in_bounds(Cell::new(1, 1)));
        assert!(!grid.in_bounds(Cell::new(2, 0)));
        assert!(!grid.in_bounds(Cell::new(0, 2)));
        assert!(grid.is_obstacle(Cell::new(0, 1)));
        assert!(!grid.is_free(Cell::new(0, 1)));
        assert!(!grid.is_free(Cell::new(5, 5)));
        assert!(!grid.is_obstacle(Cell::new(5, 5)));
        // markers themselves are free space
        assert!(grid.is_free(grid.start()));
        assert!(grid.is_free(grid.end()));
    }

    #[test]
    fn test_neighbors_order_and_filtering() {
        let grid: OccupancyGrid = "...\n.S.\nXE.".parse().unwrap();
        let n: Vec<Cell> = grid.neighbors(Cell::new(1, 1)).collect();
        assert_eq!(
            n,
            vec![Cell::new(0, 1), Cell::new(2, 1), Cell::new(1, 2), Cell::new(1, 0)]
        );

        let corner: Vec<Cell> = grid.neighbors(Cell::new(2, 0)).collect();
        assert_eq!(corner, vec![Cell::new(1, 0), Cell::new(2, 1)]);
    }

    #[test]
    fn test_reachable() {
        let grid: OccupancyGrid = "XX.\nSX.\nXXE".parse().unwrap();
        assert!(!grid.reachable(grid.start()));
        assert!(grid.reachable(grid.end()));

        // a 1x2 grid: each marker only has the other as a neighbor
        let grid: OccupancyGrid = "SE".parse().unwrap();
        assert!(grid.reachable(grid.start()));
        assert!(grid.reachable(grid.end()));
    }

    #[test]
    fn test_canonicalize_direction() {
        let e = canonicalize_direction(Cell::new(0, 0), Cell::new(2, 2));
        assert_eq!(e.start, Cell::new(0, 0));
        assert_eq!(e.goal, Cell::new(2, 2));
        assert!(!e.reversed);

        let e = canonicalize_direction(Cell::new(0, 3), Cell::new(2, 1));
        assert_eq!(e.start, Cell::new(2, 1));
        assert_eq!(e.goal, Cell::new(0, 3));
        assert!(e.reversed);

        // same column keeps the original order
        let e = canonicalize_direction(Cell::new(3, 1), Cell::new(0, 1));
        assert!(!e.reversed);
        assert_eq!(e.start, Cell::new(3, 1));
    }

    #[test]
    fn test_endpoints_do_not_mutate_grid() {
        let grid: OccupancyGrid = "E.S".parse().unwrap();
        let e = grid.endpoints();
        assert!(e.reversed);
        assert_eq!(e.start, Cell::new(0, 0));
        assert_eq!(grid.start(), Cell::new(0, 2));
        assert_eq!(grid.end(), Cell::new(0, 0));
    }
}
