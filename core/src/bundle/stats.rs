//! Pass/total tally for one bundle execution

/// Statistics captured during a bundle's single execution
///
/// Only meaningful after the bundle has executed; `total` is fixed at the
/// start of execution and `passed` never exceeds it.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BundleStats {
    /// Number of cases the bundle ran
    pub total: usize,
    /// Number of cases that passed
    pub passed: usize,
}

impl BundleStats {
    /// Create an empty tally
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one passing case
    pub fn record_pass(&mut self) {
        self.passed += 1;
    }

    /// Number of cases that did not pass
    pub fn failed(&self) -> usize {
        self.total - self.passed
    }

    /// Success percentage rendered to two decimals; `0.00%` for zero cases
    pub fn success_percentage(&self) -> String {
        if self.total == 0 {
            "0.00%".to_string()
        } else {
            format!("{:.2}%", self.passed as f64 / self.total as f64 * 100.0)
        }
    }

    /// The bundle summary line
    pub fn summary_line(&self) -> String {
        format!(
            "{}/{} success rate: {}",
            self.passed,
            self.total,
            self.success_percentage()
        )
    }
}
