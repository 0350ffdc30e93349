//! Error types for testbundle-core

use thiserror::Error;

/// Core error type
#[derive(Debug, Error)]
pub enum Error {
    /// A run was requested with no bundles registered
    #[error("no tests have been defined")]
    NoTestsDefined,

    /// Fail-fast registration rejected a bundle without cases
    #[error("bundle '{0}' has no test cases; add at least one")]
    EmptyBundle(String),

    /// A lifecycle hook failed, aborting its scope
    #[error("{scope} hook failed")]
    Hook {
        /// Where the hook ran, e.g. `bundle 'math'` or `after-all`
        scope: String,
        /// The underlying hook error
        #[source]
        source: anyhow::Error,
    },

    /// One or more bundles failed to complete; individual causes are logged,
    /// not attributed here
    #[error("an error occurred during bundle execution")]
    BundleExecution,
}

impl Error {
    pub(crate) fn hook(scope: impl Into<String>, source: anyhow::Error) -> Self {
        Error::Hook {
            scope: scope.into(),
            source,
        }
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
