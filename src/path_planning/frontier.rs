//! Open set for best-first grid search
//!
//! A binary min-heap keyed by `(f, cell)` plus a cell -> node map. Cost
//! updates push a fresh heap entry and leave the old one behind; stale
//! entries are dropped when they surface in `extract_min`.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};

use ordered_float::NotNan;

use crate::common::Cell;

/// Index of an expanded node in the search's node storage
pub type NodeId = usize;

/// Search state for one grid cell
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchNode {
    pub cell: Cell,
    /// Expanded node this one was reached from, `None` for the start
    pub parent: Option<NodeId>,
    /// Cost from the start
    pub g: NotNan<f64>,
    /// Estimated cost to the goal
    pub h: NotNan<f64>,
}

impl SearchNode {
    pub fn new(cell: Cell, g: NotNan<f64>, h: NotNan<f64>, parent: Option<NodeId>) -> Self {
        SearchNode { cell, parent, g, h }
    }

    pub fn f(&self) -> NotNan<f64> {
        self.g + self.h
    }
}

/// Discovered but not yet expanded nodes.
///
/// `extract_min` returns the lowest `f`; ties go to the smallest cell in
/// `(row, col)` order so results do not depend on insertion order.
#[derive(Debug, Default)]
pub struct Frontier {
    heap: BinaryHeap<Reverse<(NotNan<f64>, Cell)>>,
    open: HashMap<Cell, SearchNode>,
}

impl Frontier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of open nodes
    pub fn len(&self) -> usize {
        self.open.len()
    }

    pub fn is_empty(&self) -> bool {
        self.open.is_empty()
    }

    pub fn contains(&self, cell: Cell) -> bool {
        self.open.contains_key(&cell)
    }

    pub fn get(&self, cell: Cell) -> Option<&SearchNode> {
        self.open.get(&cell)
    }

    /// Add a node, replacing any open node for the same cell
    pub fn insert(&mut self, node: SearchNode) {
        self.heap.push(Reverse((node.f(), node.cell)));
        self.open.insert(node.cell, node);
    }

    pub fn remove(&mut self, cell: Cell) -> Option<SearchNode> {
        self.open.remove(&cell)
    }

    /// Set a new cost and parent for an open node. Returns `false` if the
    /// cell is not in the frontier.
    pub fn update(&mut self, cell: Cell, new_g: NotNan<f64>, new_parent: NodeId) -> bool {
        let Some(node) = self.open.get_mut(&cell) else {
            return false;
        };
        node.g = new_g;
        node.parent = Some(new_parent);
        self.heap.push(Reverse((node.f(), cell)));
        true
    }

    pub fn extract_min(&mut self) -> Option<SearchNode> {
        while let Some(Reverse((f, cell))) = self.heap.pop() {
            // Skip stale entries
            match self.open.get(&cell) {
                Some(node) if node.f() == f => return self.open.remove(&cell),
                _ => continue,
            }
        }
        None
    }
}
