//! Common types, traits, and error definitions for grid_astar
//!
//! This module provides the building blocks shared by the grid model
//! and the planner.

pub mod types;
pub mod traits;
pub mod error;

pub use types::*;
pub use traits::*;
pub use error::*;
