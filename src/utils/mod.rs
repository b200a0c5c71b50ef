//! Numerical utilities shared by the segmentation stages.

pub mod linalg;

pub use linalg::{least_squares, solve_in_place};
