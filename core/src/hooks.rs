//! Lifecycle hook types
//!
//! Hooks are optional async callbacks attached to a scope (bundle or whole
//! run). Absence means "no-op", never an error. Each slot is independently
//! settable; setting a slot replaces any prior hook for that slot.

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use futures::future::BoxFuture;
use futures::FutureExt;

/// Future returned by a hook invocation
pub type HookFuture = BoxFuture<'static, anyhow::Result<()>>;

/// A stored lifecycle hook: a zero-argument async operation
pub type Hook = Arc<dyn Fn() -> HookFuture + Send + Sync>;

/// Wrap an async closure into a storable [`Hook`]
pub fn hook_fn<F, Fut>(f: F) -> Hook
where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
{
    Arc::new(move || f().boxed())
}

/// Run a hook slot, treating an empty slot as success
pub(crate) async fn run_hook(hook: Option<&Hook>) -> anyhow::Result<()> {
    match hook {
        Some(hook) => hook().await,
        None => Ok(()),
    }
}

/// Hook slots for one bundle
#[derive(Clone, Default)]
pub struct BundleHooks {
    /// Runs once before the bundle's first case
    pub before_bundle: Option<Hook>,
    /// Runs once after the bundle's last case
    pub after_bundle: Option<Hook>,
    /// Runs before every case
    pub before_each_case: Option<Hook>,
    /// Runs after every case
    pub after_each_case: Option<Hook>,
}

impl fmt::Debug for BundleHooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BundleHooks")
            .field("before_bundle", &self.before_bundle.is_some())
            .field("after_bundle", &self.after_bundle.is_some())
            .field("before_each_case", &self.before_each_case.is_some())
            .field("after_each_case", &self.after_each_case.is_some())
            .finish()
    }
}

/// Hook slots for the whole run
#[derive(Clone, Default)]
pub struct RunHooks {
    /// Runs once before any bundle starts
    pub before_all: Option<Hook>,
    /// Runs once after all bundles have settled, regardless of outcome
    pub after_all: Option<Hook>,
}

impl fmt::Debug for RunHooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RunHooks")
            .field("before_all", &self.before_all.is_some())
            .field("after_all", &self.after_all.is_some())
            .finish()
    }
}
