//! Bundle module: ordered execution of test cases with lifecycle hooks
//!
//! A Bundle owns its cases and runs them strictly sequentially: one case's
//! full lifecycle (hooks included) completes before the next starts. The
//! Manager provides the concurrency *between* bundles; there is none within
//! one.
//!
//! # Example
//!
//! ```ignore
//! use testbundle_core::Bundle;
//!
//! let mut bundle = Bundle::new("math");
//! bundle
//!     .before_bundle(|| async { Ok(()) })
//!     .add_case("1+1=2", || async { Ok(ensure_structural_eq(&(1 + 1), &2)?) });
//! bundle.execute().await?;
//! ```

mod executor;
mod stats;

pub use executor::Bundle;
pub use stats::BundleStats;

#[cfg(test)]
mod tests;
