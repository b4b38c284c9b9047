//! Bounded retry counter for generate-until-valid loops.

/// Tracks attempts against a fixed maximum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryBudget {
    max: usize,
    used: usize,
}

impl RetryBudget {
    pub fn new(max: usize) -> Self {
        Self { max, used: 0 }
    }

    /// Consume one attempt. Returns false once the budget is spent.
    pub fn try_consume(&mut self) -> bool {
        if self.used >= self.max {
            return false;
        }
        self.used += 1;
        true
    }

    /// Record a failed attempt without gating on it.
    pub fn record_failure(&mut self) {
        self.used = self.used.saturating_add(1);
    }

    /// True when no attempts remain.
    pub fn exhausted(&self) -> bool {
        self.used >= self.max
    }

    /// Restart counting, e.g. after progress was made.
    pub fn reset(&mut self) {
        self.used = 0;
    }

    pub fn used(&self) -> usize {
        self.used
    }
}
