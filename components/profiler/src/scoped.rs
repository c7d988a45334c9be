//! Scope-bound intervals

use crate::Profiler;

/// Keeps an interval open for as long as it lives
///
/// `start` is called on construction and `stop` exactly once on drop, so the
/// interval closes on every exit path: normal return, early return, `?`,
/// or unwinding.
///
/// Only one `ScopedProfiler` may be open on a given [`Profiler`] at a time.
/// Overlapping guards on the same profiler misattribute interval boundaries;
/// this is not checked.
#[must_use = "the interval closes as soon as the guard is dropped"]
#[derive(Debug)]
pub struct ScopedProfiler<'a> {
    profiler: &'a Profiler,
}

impl<'a> ScopedProfiler<'a> {
    /// Start an interval labelled `task` on `profiler`
    pub fn new(profiler: &'a Profiler, task: &str) -> Self {
        profiler.start(task);
        Self { profiler }
    }
}

impl Drop for ScopedProfiler<'_> {
    fn drop(&mut self) {
        self.profiler.stop();
    }
}
