// Path Planning algorithms module

pub mod frontier;
pub mod a_star;

pub use frontier::*;
pub use a_star::*;
