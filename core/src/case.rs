//! Individual test case execution and outcome capture

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use futures::future::BoxFuture;
use futures::FutureExt;
use serde::{Deserialize, Serialize};

/// Future returned by a test function invocation
pub type TestFuture = BoxFuture<'static, anyhow::Result<()>>;

/// A stored test function: a zero-argument async operation that either
/// completes (pass) or returns an error (fail)
pub type TestFn = Arc<dyn Fn() -> TestFuture + Send + Sync>;

/// Outcome of a test case
///
/// Transitions exactly once, `NotExecuted` to `Passed` or `Failed`, and never
/// reverts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaseStatus {
    /// The case has not run yet
    NotExecuted,
    /// The test function completed
    Passed,
    /// The test function returned an error
    Failed,
}

/// One unit of verification: a name plus a test function
pub struct TestCase {
    name: String,
    test: TestFn,
    status: CaseStatus,
    failure_message: String,
}

impl TestCase {
    /// Create a new case with status [`CaseStatus::NotExecuted`]
    pub fn new<F, Fut>(name: impl Into<String>, test: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
    {
        Self {
            name: name.into(),
            test: Arc::new(move || test().boxed()),
            status: CaseStatus::NotExecuted,
            failure_message: String::new(),
        }
    }

    /// Case name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current outcome
    pub fn status(&self) -> CaseStatus {
        self.status
    }

    /// Failure message, empty unless the case failed with one
    pub fn failure_message(&self) -> &str {
        &self.failure_message
    }

    /// Run the test function and record the outcome; returns `true` on pass.
    ///
    /// No error escapes here: a failing test function is converted into the
    /// `Failed` status plus a `false` result, with its message captured
    /// verbatim. Re-executing an already-executed case is a no-op that
    /// reports the recorded outcome, protecting the single-transition
    /// invariant of [`CaseStatus`].
    pub async fn execute(&mut self) -> bool {
        if self.status != CaseStatus::NotExecuted {
            return self.status == CaseStatus::Passed;
        }

        match (self.test)().await {
            Ok(()) => {
                self.status = CaseStatus::Passed;
                true
            }
            Err(error) => {
                tracing::debug!(case = %self.name, error = %error, "test case failed");
                self.status = CaseStatus::Failed;
                self.failure_message = error.to_string();
                false
            }
        }
    }

    /// Render the status-tagged result line for this case
    pub fn describe(&self) -> String {
        match self.status {
            CaseStatus::Passed => format!("PASSED: {}", self.name),
            CaseStatus::Failed => format!("FAILED: {}\t{}", self.name, self.failure_message),
            CaseStatus::NotExecuted => format!("NOT EVALUATED: {}", self.name),
        }
    }
}

impl fmt::Debug for TestCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TestCase")
            .field("name", &self.name)
            .field("status", &self.status)
            .field("failure_message", &self.failure_message)
            .finish()
    }
}
