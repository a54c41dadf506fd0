//! Theme Module
//!
//! Clay and glaze colors plus frame builders used by every view.

pub mod colors;
pub mod styles;

pub use colors::*;
pub use styles::*;
