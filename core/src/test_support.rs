//! Shared helpers for exercising the engine in tests

use std::sync::{Arc, Mutex};

use crate::case::TestCase;
use crate::emit::Emitter;

/// Emitter that records every line for later assertions
#[derive(Debug, Default)]
pub struct CaptureEmitter {
    lines: Mutex<Vec<String>>,
}

impl CaptureEmitter {
    /// Create a shareable capture emitter
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Snapshot of the captured lines, in emission order
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().expect("emitter lock poisoned").clone()
    }

    /// Whether any captured line contains `needle`
    pub fn contains(&self, needle: &str) -> bool {
        self.lines().iter().any(|line| line.contains(needle))
    }
}

impl Emitter for CaptureEmitter {
    fn emit(&self, line: &str) {
        self.lines
            .lock()
            .expect("emitter lock poisoned")
            .push(line.to_string());
    }
}

/// A case that always passes
pub fn passing_case(name: &str) -> TestCase {
    TestCase::new(name, || async { Ok(()) })
}

/// A case that always fails with `message`
pub fn failing_case(name: &str, message: &str) -> TestCase {
    let message = message.to_string();
    TestCase::new(name, move || {
        let message = message.clone();
        async move { Err(anyhow::anyhow!(message)) }
    })
}
