//! Report module - cluster reference table and prediction summaries

pub mod clusters;
pub mod summary;

pub use clusters::*;
pub use summary::*;
