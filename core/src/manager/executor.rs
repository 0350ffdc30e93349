//! Manager execution logic

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use colored::Colorize;

use crate::bundle::Bundle;
use crate::emit::{ConsoleEmitter, Emitter};
use crate::error::{Error, Result};
use crate::hooks::{hook_fn, run_hook, RunHooks};

/// Coordinator holding all bundles and the run-level hooks
///
/// Responsible for registration, name deduplication, and concurrent
/// execution of every distinct bundle.
pub struct Manager {
    bundles: Vec<Bundle>,
    hooks: RunHooks,
    emitter: Arc<dyn Emitter>,
}

impl Manager {
    /// Create a manager writing to the console
    pub fn new() -> Self {
        Self {
            bundles: Vec::new(),
            hooks: RunHooks::default(),
            emitter: Arc::new(ConsoleEmitter),
        }
    }

    /// Replace the output sink; propagated onto every bundle at registration
    pub fn with_emitter(mut self, emitter: Arc<dyn Emitter>) -> Self {
        self.emitter = emitter;
        self
    }

    /// Register a bundle and return it for further configuration
    ///
    /// Accepts either an existing [`Bundle`] or a name (`&str`/`String`),
    /// which constructs a new empty bundle. The manager's emitter is wired
    /// into the bundle so all output goes through one sink.
    pub fn register(&mut self, bundle: impl Into<Bundle>) -> &mut Bundle {
        let mut bundle = bundle.into();
        bundle.set_emitter(Arc::clone(&self.emitter));
        tracing::debug!(bundle = %bundle.name(), "registering bundle");
        self.bundles.push(bundle);
        self.bundles.last_mut().expect("bundle was just pushed")
    }

    /// Fail-fast registration: rejects a bundle with no cases
    ///
    /// # Errors
    /// Returns [`Error::EmptyBundle`] if the bundle's case list is empty.
    pub fn try_register(&mut self, bundle: Bundle) -> Result<&mut Bundle> {
        if bundle.cases().is_empty() {
            return Err(Error::EmptyBundle(bundle.name().to_string()));
        }
        Ok(self.register(bundle))
    }

    /// Set the hook run once before any bundle starts
    pub fn before_all<F, Fut>(&mut self, hook: F) -> &mut Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
    {
        self.hooks.before_all = Some(hook_fn(hook));
        self
    }

    /// Set the hook run once after all bundles have settled
    pub fn after_all<F, Fut>(&mut self, hook: F) -> &mut Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
    {
        self.hooks.after_all = Some(hook_fn(hook));
        self
    }

    /// The registered bundles, in registration order
    pub fn bundles(&self) -> &[Bundle] {
        &self.bundles
    }

    /// Run every distinct bundle concurrently and wait for all to settle.
    ///
    /// Steps, in order:
    /// 1. Zero registered bundles fail fast with [`Error::NoTestsDefined`]
    ///    before invoking anything, `before_all` included.
    /// 2. `before_all` runs; its failure propagates and skips the rest.
    /// 3. Bundles are deduplicated by name, first-registered-wins, with one
    ///    warning line per discarded duplicate.
    /// 4. Every surviving bundle's `execute()` is spawned as its own task;
    ///    all tasks are awaited, none is failed early.
    /// 5. Any bundle failure or panic is folded, after all have settled, into
    ///    the single generic [`Error::BundleExecution`]; causes go to the log,
    ///    not the error.
    /// 6. `after_all` always runs once bundles have settled, whatever the
    ///    outcome (guaranteed cleanup).
    ///
    /// Bundles are moved into their tasks and reclaimed afterward in
    /// registration order, so case statuses and tallies stay inspectable via
    /// [`Manager::bundles`]. There is no cancellation: a hook or test
    /// function that never completes stalls its bundle and this call.
    pub async fn run_all(&mut self) -> Result<()> {
        if self.bundles.is_empty() {
            return Err(Error::NoTestsDefined);
        }

        run_hook(self.hooks.before_all.as_ref())
            .await
            .map_err(|e| Error::hook("before-all", e))?;

        let bundles = self.dedup_bundles();
        tracing::info!(bundles = bundles.len(), "starting concurrent bundle execution");

        let mut handles = Vec::with_capacity(bundles.len());
        for mut bundle in bundles {
            handles.push(tokio::spawn(async move {
                let outcome = bundle.execute().await;
                (bundle, outcome)
            }));
        }

        let mut failures = 0usize;
        for handle in handles {
            match handle.await {
                Ok((bundle, Ok(()))) => {
                    self.bundles.push(bundle);
                }
                Ok((bundle, Err(error))) => {
                    failures += 1;
                    tracing::error!(
                        bundle = %bundle.name(),
                        error = %error,
                        "bundle execution failed"
                    );
                    self.bundles.push(bundle);
                }
                Err(error) => {
                    failures += 1;
                    tracing::error!(error = %error, "bundle task panicked");
                }
            }
        }

        let run_result = if failures == 0 {
            Ok(())
        } else {
            Err(Error::BundleExecution)
        };

        // Guaranteed cleanup: after-all runs whether or not bundles failed.
        match (run_result, run_hook(self.hooks.after_all.as_ref()).await) {
            (Ok(()), Ok(())) => Ok(()),
            (Ok(()), Err(cleanup)) => Err(Error::hook("after-all", cleanup)),
            (Err(run), Ok(())) => Err(run),
            (Err(run), Err(cleanup)) => {
                tracing::warn!(error = %cleanup, "after-all hook failed");
                Err(run)
            }
        }
    }

    /// Drain the registry, keeping the first bundle per name and warning
    /// about every later duplicate.
    fn dedup_bundles(&mut self) -> Vec<Bundle> {
        let mut unique: Vec<Bundle> = Vec::with_capacity(self.bundles.len());
        for bundle in self.bundles.drain(..) {
            if unique.iter().any(|kept| kept.name() == bundle.name()) {
                tracing::warn!(
                    bundle = %bundle.name(),
                    "duplicate bundle name, keeping the first registration"
                );
                self.emitter.emit(
                    &format!(
                        "The bundle named \"{}\" has been inserted multiple times",
                        bundle.name()
                    )
                    .yellow()
                    .to_string(),
                );
            } else {
                unique.push(bundle);
            }
        }
        unique
    }
}

impl Default for Manager {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Manager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Manager")
            .field("bundles", &self.bundles)
            .field("hooks", &self.hooks)
            .finish()
    }
}
