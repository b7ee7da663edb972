//! Duration-in-state bookkeeping.

use std::cell::Cell;
use std::time::Duration;

/// Accumulates tick time for the currently active state.
///
/// The timer only grows between transitions; machines reset it whenever the
/// active state changes.
///
/// # Example
///
/// ```rust
/// use statecraft::core::StateTimer;
/// use std::time::Duration;
///
/// let timer = StateTimer::new();
/// timer.advance(Duration::from_millis(500));
/// timer.advance(Duration::from_millis(250));
/// assert_eq!(timer.elapsed(), Duration::from_millis(750));
///
/// timer.reset();
/// assert_eq!(timer.elapsed(), Duration::ZERO);
/// ```
#[derive(Debug, Default)]
pub struct StateTimer {
    elapsed: Cell<Duration>,
}

impl StateTimer {
    /// Create a timer at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one tick's worth of time.
    ///
    /// Saturates at `Duration::MAX` instead of overflowing.
    pub fn advance(&self, delta_time: Duration) {
        self.elapsed.set(self.elapsed.get().saturating_add(delta_time));
    }

    /// Set the elapsed time back to zero.
    pub fn reset(&self) {
        self.elapsed.set(Duration::ZERO);
    }

    /// Time accumulated since the last reset.
    pub fn elapsed(&self) -> Duration {
        self.elapsed.get()
    }

    /// Elapsed time in seconds as `f32`.
    pub fn elapsed_secs(&self) -> f32 {
        self.elapsed.get().as_secs_f32()
    }

    /// Elapsed time in seconds as `f64`.
    pub fn elapsed_secs_f64(&self) -> f64 {
        self.elapsed.get().as_secs_f64()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_timer_is_zero() {
        let timer = StateTimer::new();
        assert_eq!(timer.elapsed(), Duration::ZERO);
        assert_eq!(timer.elapsed_secs(), 0.0);
    }

    #[test]
    fn advance_accumulates() {
        let timer = StateTimer::new();
        timer.advance(Duration::from_millis(100));
        timer.advance(Duration::from_millis(150));
        assert_eq!(timer.elapsed(), Duration::from_millis(250));
    }

    #[test]
    fn reset_returns_to_zero() {
        let timer = StateTimer::new();
        timer.advance(Duration::from_secs(3));
        timer.reset();
        assert_eq!(timer.elapsed(), Duration::ZERO);
    }

    #[test]
    fn float_views_match_duration() {
        let timer = StateTimer::new();
        timer.advance(Duration::from_millis(1500));
        assert_eq!(timer.elapsed_secs(), 1.5);
        assert_eq!(timer.elapsed_secs_f64(), 1.5);
    }

    #[test]
    fn advance_saturates() {
        let timer = StateTimer::new();
        timer.advance(Duration::MAX);
        timer.advance(Duration::from_secs(1));
        assert_eq!(timer.elapsed(), Duration::MAX);
    }
}
