//! Statistical core of the dip test.
//!
//! This module provides the machinery the dip statistic is built from:
//! - Step-function ECDF construction with tie merging
//! - Greatest convex minorant / least concave majorant touch-point walks
//! - The iterative modal-interval search yielding the dip value

pub mod dip;
pub mod ecdf;
mod hull;

pub use dip::{dip_statistic, DipResult};
pub use ecdf::StepEcdf;
