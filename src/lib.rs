//! Public API for MarkScope
//!
//! Annotate time intervals and thread identities so they show up in vendor
//! profiling tools, and bracket rendered frames automatically.
//!
//! # Example
//!
//! ```
//! use markscope::{FrameProfiler, MockEngine, Profiler, ScopedProfiler};
//!
//! Profiler::set_thread_name("Main");
//!
//! let profiler = Profiler::new("demo");
//! {
//!     let _scope = ScopedProfiler::new(&profiler, "startup");
//!     // ... work ...
//! }
//!
//! let (engine, window) = MockEngine::with_window("main");
//! let frames = FrameProfiler::new(&engine);
//! window.swap_frames(2);
//! assert_eq!(frames.frames_observed(), 2);
//! ```
//!
//! Backends are selected with Cargo features: `itt`, `signpost` and
//! `trace-events`. With none enabled every annotation is a no-op.

#![warn(missing_docs)]

// Re-export public types from the components
pub use frame_profiler::{
    ApplicationEngine, FrameCallback, FrameProfiler, MockEngine, MockItem, MockWindow,
    RenderSurface, RootObject,
};
pub use profiler::{profile_scope, Profiler, ScopedProfiler};
pub use trace_backend::{
    current_thread_name, BackendSet, DomainSet, InertDomain, RecordingBackend, TraceBackend,
    TraceDomain,
};
pub use trace_types::{
    DomainDescriptor, FrameProfilerConfig, IntervalStyle, ProfilerConfig, Result, SignpostId,
    TraceError, TraceEvent,
};
