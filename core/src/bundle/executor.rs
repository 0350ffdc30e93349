//! Bundle execution state machine

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use anyhow::Context;
use colored::Colorize;

use crate::case::{CaseStatus, TestCase};
use crate::emit::{ConsoleEmitter, Emitter};
use crate::error::{Error, Result};
use crate::hooks::{hook_fn, run_hook, BundleHooks};

use super::stats::BundleStats;

/// A named, ordered group of test cases with lifecycle hooks
///
/// Configuration is builder-style: every setter returns `&mut Self` for
/// chaining. A bundle executes at most once; a second execution request is an
/// idempotent no-op, not an error.
pub struct Bundle {
    name: String,
    cases: Vec<TestCase>,
    hooks: BundleHooks,
    executed: bool,
    stats: BundleStats,
    emitter: Arc<dyn Emitter>,
}

impl Bundle {
    /// Create an empty bundle writing to the console
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            cases: Vec::new(),
            hooks: BundleHooks::default(),
            executed: false,
            stats: BundleStats::new(),
            emitter: Arc::new(ConsoleEmitter),
        }
    }

    /// Bundle name, the unique key within a manager
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether an execution attempt has already happened
    pub fn executed(&self) -> bool {
        self.executed
    }

    /// Pass/total tally; valid only after execution completes
    pub fn stats(&self) -> BundleStats {
        self.stats
    }

    /// The cases in registration order
    pub fn cases(&self) -> &[TestCase] {
        &self.cases
    }

    /// Set the hook run once before the bundle's cases
    pub fn before_bundle<F, Fut>(&mut self, hook: F) -> &mut Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
    {
        self.hooks.before_bundle = Some(hook_fn(hook));
        self
    }

    /// Set the hook run once after the bundle's cases
    pub fn after_bundle<F, Fut>(&mut self, hook: F) -> &mut Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
    {
        self.hooks.after_bundle = Some(hook_fn(hook));
        self
    }

    /// Set the hook run before every case
    pub fn before_each_case<F, Fut>(&mut self, hook: F) -> &mut Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
    {
        self.hooks.before_each_case = Some(hook_fn(hook));
        self
    }

    /// Set the hook run after every case
    pub fn after_each_case<F, Fut>(&mut self, hook: F) -> &mut Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
    {
        self.hooks.after_each_case = Some(hook_fn(hook));
        self
    }

    /// Append one new case
    pub fn add_case<F, Fut>(&mut self, name: impl Into<String>, test: F) -> &mut Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
    {
        self.cases.push(TestCase::new(name, test));
        self
    }

    /// Replace the entire case sequence
    pub fn set_cases(&mut self, cases: Vec<TestCase>) -> &mut Self {
        self.cases = cases;
        self
    }

    /// Append a sequence of cases, preserving existing order
    pub fn add_cases(&mut self, cases: impl IntoIterator<Item = TestCase>) -> &mut Self {
        self.cases.extend(cases);
        self
    }

    /// Replace the output sink
    pub fn with_emitter(&mut self, emitter: Arc<dyn Emitter>) -> &mut Self {
        self.emitter = emitter;
        self
    }

    pub(crate) fn set_emitter(&mut self, emitter: Arc<dyn Emitter>) {
        self.emitter = emitter;
    }

    /// Run the bundle's cases sequentially, in registration order.
    ///
    /// The first call sets the executed flag and emits the starting banner;
    /// any later call returns `Ok(())` immediately with no further output.
    /// An empty case sequence is permitted (zero tests, trivially complete).
    ///
    /// Test-function failures never propagate: they are folded into each
    /// case's status and the tally. A *hook* failure aborts the remaining
    /// steps (including the summary line) and is returned as [`Error::Hook`]
    /// so the manager can fold it into the aggregate run outcome.
    pub async fn execute(&mut self) -> Result<()> {
        if self.executed {
            tracing::debug!(bundle = %self.name, "bundle already executed, skipping");
            return Ok(());
        }
        self.executed = true;

        self.emit_notice(&format!("starting bundle {}", self.name));

        if let Err(error) = self.run_phases().await {
            tracing::warn!(bundle = %self.name, error = %error, "bundle aborted by hook failure");
            return Err(Error::hook(format!("bundle '{}'", self.name), error));
        }
        Ok(())
    }

    async fn run_phases(&mut self) -> anyhow::Result<()> {
        run_hook(self.hooks.before_bundle.as_ref())
            .await
            .context("before-bundle hook")?;

        self.stats.total = self.cases.len();
        for (index, case) in self.cases.iter_mut().enumerate() {
            run_hook(self.hooks.before_each_case.as_ref())
                .await
                .context("before-each-case hook")?;

            if case.execute().await {
                self.stats.record_pass();
            }
            let line = format!("{}/{} {}", index + 1, self.stats.total, case.describe());
            let painted = match case.status() {
                CaseStatus::Passed => line.green(),
                CaseStatus::Failed => line.red(),
                CaseStatus::NotExecuted => line.yellow(),
            };
            self.emitter.emit(&painted.to_string());

            run_hook(self.hooks.after_each_case.as_ref())
                .await
                .context("after-each-case hook")?;
        }

        run_hook(self.hooks.after_bundle.as_ref())
            .await
            .context("after-bundle hook")?;

        self.emit_notice(&self.stats.summary_line());
        Ok(())
    }

    fn emit_notice(&self, line: &str) {
        self.emitter.emit(&line.blue().to_string());
    }
}

impl From<&str> for Bundle {
    fn from(name: &str) -> Self {
        Bundle::new(name)
    }
}

impl From<String> for Bundle {
    fn from(name: String) -> Self {
        Bundle::new(name)
    }
}

impl fmt::Debug for Bundle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bundle")
            .field("name", &self.name)
            .field("cases", &self.cases.len())
            .field("hooks", &self.hooks)
            .field("executed", &self.executed)
            .field("stats", &self.stats)
            .finish()
    }
}
