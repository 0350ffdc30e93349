//! Manager module: bundle registry and concurrent run coordination
//!
//! The Manager is an explicit context object: construct one at program
//! start and pass it to every registration site. It owns the registered
//! bundles, the two run-level hook slots, and the shared output sink, and it
//! runs every distinct bundle concurrently when asked.
//!
//! # Example
//!
//! ```ignore
//! use testbundle_core::Manager;
//!
//! let mut manager = Manager::new();
//! manager.before_all(|| async { Ok(()) });
//! manager
//!     .register("math")
//!     .add_case("1+1=2", || async { Ok(ensure_structural_eq(&(1 + 1), &2)?) });
//! manager.run_all().await?;
//! ```

mod executor;

pub use executor::Manager;
