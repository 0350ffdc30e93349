//! Line-of-text output sink
//!
//! Product output (progress lines, summaries, duplicate warnings) flows
//! through [`Emitter`] rather than `tracing`: tracing carries dev diagnostics,
//! the emitter carries what the engine is expected to show its users. Swapping
//! the emitter is also the seam tests use to capture output.

/// Sink for human-readable output lines
pub trait Emitter: Send + Sync {
    /// Emit one line of text
    fn emit(&self, line: &str);
}

/// Default emitter: writes each line to stdout
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleEmitter;

impl Emitter for ConsoleEmitter {
    fn emit(&self, line: &str) {
        println!("{line}");
    }
}
