//! Utility modules for grid_astar

pub mod grid_map;

pub use grid_map::*;
