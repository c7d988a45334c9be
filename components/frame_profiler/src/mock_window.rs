//! Mock GUI objects for testing frame profiling
//!
//! Provides a simulated application engine and window so the frame profiler
//! can be driven without a real GUI toolkit.

use parking_lot::Mutex;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::surface::{ApplicationEngine, FrameCallback, RenderSurface, RootObject};

/// Mock render window
///
/// `swap_frame` plays the role of the render loop: it invokes every
/// subscribed callback synchronously on the calling thread. Callbacks run
/// without the subscriber lock held, so they may connect new subscribers or
/// close the window.
pub struct MockWindow {
    /// Object name
    name: String,
    /// Subscribed frame-swapped callbacks
    callbacks: Mutex<Vec<FrameCallback>>,
    /// Bumped by `close` so an in-flight `swap_frame` drops its batch
    closes: AtomicU64,
    /// Frames presented so far
    frames: AtomicU64,
}

impl MockWindow {
    /// Create a new window
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            callbacks: Mutex::new(Vec::new()),
            closes: AtomicU64::new(0),
            frames: AtomicU64::new(0),
        }
    }

    /// Present one frame and notify subscribers
    pub fn swap_frame(&self) {
        self.frames.fetch_add(1, Ordering::SeqCst);
        let closes = self.closes.load(Ordering::SeqCst);
        let mut batch = std::mem::take(&mut *self.callbacks.lock());
        for callback in batch.iter_mut() {
            callback();
        }

        let mut callbacks = self.callbacks.lock();
        if self.closes.load(Ordering::SeqCst) == closes {
            // Keep subscription order: the batch first, then anything
            // connected while it ran.
            batch.append(&mut callbacks);
            *callbacks = batch;
        }
    }

    /// Present `count` frames
    pub fn swap_frames(&self, count: usize) {
        for _ in 0..count {
            self.swap_frame();
        }
    }

    /// Number of frames presented
    pub fn frames_presented(&self) -> u64 {
        self.frames.load(Ordering::SeqCst)
    }

    /// Number of frame-swapped subscriptions
    pub fn subscriber_count(&self) -> usize {
        self.callbacks.lock().len()
    }

    /// Tear the window down; subscribers stop receiving notifications
    pub fn close(&self) {
        let mut callbacks = self.callbacks.lock();
        self.closes.fetch_add(1, Ordering::SeqCst);
        callbacks.clear();
    }
}

impl RenderSurface for MockWindow {
    fn connect_frame_swapped(&self, callback: FrameCallback) {
        self.callbacks.lock().push(callback);
    }
}

impl RootObject for MockWindow {
    fn object_name(&self) -> &str {
        &self.name
    }

    fn as_render_surface(&self) -> Option<&dyn RenderSurface> {
        Some(self)
    }
}

impl fmt::Debug for MockWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MockWindow")
            .field("name", &self.name)
            .field("subscribers", &self.subscriber_count())
            .field("frames", &self.frames_presented())
            .finish()
    }
}

/// Mock root object that is not renderable
#[derive(Debug, Clone)]
pub struct MockItem {
    name: String,
}

impl MockItem {
    /// Create a new item
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl RootObject for MockItem {
    fn object_name(&self) -> &str {
        &self.name
    }
}

/// Mock application engine holding a list of root objects
#[derive(Default)]
pub struct MockEngine {
    roots: Vec<Arc<dyn RootObject>>,
}

impl MockEngine {
    /// Create an engine without root objects
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an engine whose only root object is a window
    pub fn with_window(name: impl Into<String>) -> (Self, Arc<MockWindow>) {
        let window = Arc::new(MockWindow::new(name));
        let engine = Self::new().with_root(window.clone());
        (engine, window)
    }

    /// Append a root object
    pub fn with_root(mut self, root: Arc<dyn RootObject>) -> Self {
        self.roots.push(root);
        self
    }
}

impl ApplicationEngine for MockEngine {
    fn root_objects(&self) -> Vec<Arc<dyn RootObject>> {
        self.roots.clone()
    }
}

impl fmt::Debug for MockEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.roots.iter().map(|root| root.object_name()).collect();
        f.debug_struct("MockEngine").field("roots", &names).finish()
    }
}
