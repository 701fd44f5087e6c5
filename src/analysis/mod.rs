//! P-value estimation for an observed dip.
//!
//! Two interchangeable strategies:
//!
//! 1. **Monte Carlo** ([`simulation`]): dips of simulated Uniform(0,1)
//!    null samples, seeded and order-independent
//! 2. **Table interpolation** ([`table`]): lookup against a precomputed
//!    critical-value grid supplied by the caller
//!
//! [`estimator`] dispatches between them based on configuration.

pub mod estimator;
pub mod simulation;
pub mod table;

pub use estimator::PValueEstimator;
pub use simulation::simulate_p_value;
pub use table::CriticalValueTable;
