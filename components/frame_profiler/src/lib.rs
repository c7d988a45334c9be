//! Frame profiling for GUI render loops
//!
//! This module provides `FrameProfiler`, which subscribes to a render
//! surface's "frame swapped" notification and emits one interval per frame
//! without the application calling start/stop.
//!
//! # Features
//!
//! - **FrameProfiler**: first-frame thread rename plus back-to-back frame intervals
//! - **Render surface contract**: `ApplicationEngine`, `RootObject`, `RenderSurface`
//! - **MockEngine / MockWindow**: simulated GUI side for tests and demos
//!
//! ## Usage
//!
//! ```rust
//! use frame_profiler::{FrameProfiler, MockEngine};
//!
//! let (engine, window) = MockEngine::with_window("main");
//! let frames = FrameProfiler::new(&engine);
//! assert!(frames.is_enabled());
//!
//! window.swap_frames(3);
//! assert_eq!(frames.frames_observed(), 3);
//! ```

mod frame_profiler;
mod mock_window;
mod surface;

pub use frame_profiler::FrameProfiler;
pub use mock_window::{MockEngine, MockItem, MockWindow};
pub use surface::{ApplicationEngine, FrameCallback, RenderSurface, RootObject};

pub use trace_types::FrameProfilerConfig;
