//! Per-session stop flag

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Shared flag the control side raises and the capture worker polls.
///
/// Clones observe the same flag. Each session gets a fresh signal so a
/// `stop` aimed at an earlier session never reaches a later one.
#[derive(Debug, Clone, Default)]
pub struct StopSignal {
    triggered: Arc<AtomicBool>,
}

impl StopSignal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raise the flag. Raising it again has no further effect.
    pub fn trigger(&self) {
        self.triggered.store(true, Ordering::SeqCst);
    }

    pub fn is_triggered(&self) -> bool {
        self.triggered.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_untriggered() {
        assert!(!StopSignal::new().is_triggered());
    }

    #[test]
    fn trigger_is_visible_through_clones_and_idempotent() {
        let signal = StopSignal::new();
        let observer = signal.clone();

        signal.trigger();
        signal.trigger();

        assert!(observer.is_triggered());
    }

    #[test]
    fn fresh_signals_are_independent() {
        let old = StopSignal::new();
        old.trigger();
        let fresh = StopSignal::new();
        assert!(!fresh.is_triggered());
    }
}
