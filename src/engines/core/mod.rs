//! Execution engines
//!
//! Parallel batches, the long-lived worker pool and stream translation.

pub mod io;
pub mod parallel;
pub mod pool;
pub mod stream;
