//! FrameProfiler implementation
//!
//! Turns a stream of "frame swapped" notifications into back-to-back
//! intervals, one per frame.
//!
//! Only a single "completed" signal is available, so the interval emitted
//! for frame N spans from the completion of frame N-1 to the completion of
//! frame N. That one-frame lag is the documented behavior.

use profiler::Profiler;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use trace_backend::BackendSet;
use trace_types::{FrameProfilerConfig, Result, TraceError};
use tracing::{debug, warn};

use crate::surface::{ApplicationEngine, RenderSurface};

/// Emits one interval per rendered frame
///
/// Construction looks up the render surface and subscribes to its
/// frame-swapped signal. If no surface is available a warning is logged and
/// the instance stays inert for its whole lifetime; frame profiling is never
/// a hard dependency for application startup.
///
/// Frame notifications must be delivered on a single render thread.
/// Concurrent notifications corrupt begin/end alternation; this is a
/// precondition, not something the profiler defends against.
#[derive(Debug)]
pub struct FrameProfiler {
    /// Shared with the subscribed callback; `None` when disabled
    driver: Option<Arc<FrameDriver>>,
}

impl FrameProfiler {
    /// Profile frames of the engine's first root object on the compiled-in
    /// backends
    pub fn new(engine: &dyn ApplicationEngine) -> Self {
        Self::with_config(engine, &FrameProfilerConfig::default(), BackendSet::compiled())
    }

    /// Profile frames with explicit configuration and backends
    ///
    /// Only the first root object is inspected; later ones are ignored.
    pub fn with_config(
        engine: &dyn ApplicationEngine,
        config: &FrameProfilerConfig,
        backends: BackendSet,
    ) -> Self {
        if let Err(e) = config.validate() {
            warn!("{}, frame profiling will not work", e);
            return Self::disabled();
        }

        let roots = engine.root_objects();
        match roots.first().and_then(|root| root.as_render_surface()) {
            Some(surface) => Self::attach(surface, config, backends),
            None => {
                warn!("Failed to get render window, frame profiling will not work");
                Self::disabled()
            }
        }
    }

    /// Like [`FrameProfiler::with_config`], but returns the failure instead
    /// of degrading
    ///
    /// Fails with [`TraceError::NoRenderSurface`] when the first root object
    /// is missing or not renderable, and with the backend's error when a
    /// domain cannot be created.
    pub fn try_new(
        engine: &dyn ApplicationEngine,
        config: &FrameProfilerConfig,
        backends: BackendSet,
    ) -> Result<Self> {
        config.validate()?;

        let roots = engine.root_objects();
        let surface = roots
            .first()
            .and_then(|root| root.as_render_surface())
            .ok_or(TraceError::NoRenderSurface)?;

        let backends = backends.without(config.disabled_backends());
        let profiler = Profiler::try_with_backends(config.descriptor(), backends)?;
        Ok(Self::subscribe(surface, FrameDriver::new(profiler, config)))
    }

    /// Profile frames of a known render surface
    pub fn attach(
        surface: &dyn RenderSurface,
        config: &FrameProfilerConfig,
        backends: BackendSet,
    ) -> Self {
        let backends = backends.without(config.disabled_backends());
        let profiler = Profiler::with_backends(config.descriptor(), backends);
        Self::subscribe(surface, FrameDriver::new(profiler, config))
    }

    /// Whether frame notifications are being profiled
    pub fn is_enabled(&self) -> bool {
        self.driver.is_some()
    }

    /// Number of frame notifications handled so far
    pub fn frames_observed(&self) -> u64 {
        self.driver
            .as_ref()
            .map_or(0, |driver| driver.frames.load(Ordering::Acquire))
    }

    fn disabled() -> Self {
        Self { driver: None }
    }

    fn subscribe(surface: &dyn RenderSurface, driver: FrameDriver) -> Self {
        let driver = Arc::new(driver);
        let callback_driver = Arc::clone(&driver);
        surface.connect_frame_swapped(Box::new(move || callback_driver.profile_frame()));
        debug!(
            "Frame profiling enabled for domain '{}'",
            driver.profiler.domain()
        );

        Self {
            driver: Some(driver),
        }
    }
}

/// First-frame state machine driven by the frame-swapped callback
#[derive(Debug)]
struct FrameDriver {
    profiler: Profiler,
    render_thread_name: String,
    frame_task_name: String,
    /// Set until the first notification has been handled
    first_frame: AtomicBool,
    frames: AtomicU64,
}

impl FrameDriver {
    fn new(profiler: Profiler, config: &FrameProfilerConfig) -> Self {
        Self {
            profiler,
            render_thread_name: config.render_thread_name().to_string(),
            frame_task_name: config.frame_task_name().to_string(),
            first_frame: AtomicBool::new(true),
            frames: AtomicU64::new(0),
        }
    }

    fn profile_frame(&self) {
        if self.first_frame.swap(false, Ordering::AcqRel) {
            // The notifying thread is the render thread, which need not be
            // the thread that constructed the profiler.
            self.profiler.rename_current_thread(&self.render_thread_name);
        } else {
            self.profiler.stop();
        }
        self.profiler.start(&self.frame_task_name);
        self.frames.fetch_add(1, Ordering::AcqRel);
    }
}
