//! Data models

pub mod features;
pub mod verdict;

pub use features::*;
pub use verdict::*;
