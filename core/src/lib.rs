//! testbundle-core: a minimal test-orchestration engine.
//!
//! This crate provides the three cooperating pieces of the orchestration
//! logic, plus the small surface test authors interact with:
//!
//! - **TestCase**: one unit of verification, a name plus an async operation
//!   that either completes (pass) or signals failure (fail)
//! - **Bundle**: a named, ordered group of test cases with its own lifecycle
//!   hooks and pass/total tally
//! - **Manager**: the coordinator holding all bundles and global lifecycle
//!   hooks, responsible for deduplication and concurrent execution
//! - **Equality**: a structural comparison helper for use inside test bodies
//! - **Emit**: the line-of-text sink all human-readable output flows through
//!
//! # Example
//!
//! ```ignore
//! use testbundle_core::{ensure_structural_eq, Manager};
//!
//! let mut manager = Manager::new();
//! manager
//!     .register("math")
//!     .add_case("1+1=2", || async { Ok(ensure_structural_eq(&(1 + 1), &2)?) });
//! manager.run_all().await?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod bundle;
pub mod case;
pub mod emit;
pub mod equality;
pub mod error;
pub mod hooks;
pub mod logging;
pub mod manager;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use bundle::{Bundle, BundleStats};
pub use case::{CaseStatus, TestCase};
pub use emit::{ConsoleEmitter, Emitter};
pub use equality::{ensure_structural_eq, ensure_structural_eq_msg, structurally_equal, NotEqual};
pub use error::{Error, Result};
pub use hooks::{hook_fn, BundleHooks, Hook, RunHooks};
pub use manager::Manager;
