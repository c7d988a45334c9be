//! Interval annotation for external tracing tools
//!
//! This module provides `Profiler`, which owns one tracing domain per active
//! backend and opens/closes named intervals in it, and `ScopedProfiler`,
//! which ties an interval to a lexical scope.
//!
//! # Example
//!
//! ```
//! use profiler::{profile_scope, Profiler};
//!
//! let profiler = Profiler::new("demo");
//!
//! profiler.start("load");
//! // ... work ...
//! profiler.stop();
//!
//! {
//!     profile_scope!(profiler, "parse");
//!     // ... work, stopped when the scope exits ...
//! }
//! ```

mod interval_profiler;
mod scoped;

pub use interval_profiler::Profiler;
pub use scoped::ScopedProfiler;

pub use trace_backend::{
    current_thread_name, BackendSet, RecordingBackend, TraceBackend, TraceDomain,
};
pub use trace_types::{DomainDescriptor, IntervalStyle, ProfilerConfig, TraceError, TraceEvent};

/// Opens an interval on `profiler` that closes when the enclosing scope exits
///
/// ```
/// # use profiler::{profile_scope, Profiler};
/// let profiler = Profiler::new("demo");
/// for _ in 0..3 {
///     profile_scope!(profiler, "iteration");
/// }
/// ```
#[macro_export]
macro_rules! profile_scope {
    ($profiler:expr, $task:expr) => {
        let _markscope_scope = $crate::ScopedProfiler::new(&$profiler, $task);
    };
}
