//! Single-level planners usable as hierarchy levels.

mod qrrt;

pub use qrrt::{Qrrt, DEFAULT_RANGE_FACTOR};
