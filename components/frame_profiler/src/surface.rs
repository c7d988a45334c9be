//! The narrow view of the GUI toolkit that frame profiling needs

use std::sync::Arc;

/// Callback invoked synchronously on the render thread after each frame is
/// presented
pub type FrameCallback = Box<dyn FnMut() + Send + 'static>;

/// A window that renders frames and announces each completed one
pub trait RenderSurface: Send + Sync {
    /// Subscribe to the parameterless "frame swapped" notification
    ///
    /// The callback is invoked directly by the render loop, with no queuing.
    /// There is no unsubscribe: delivery stops when the surface goes away.
    fn connect_frame_swapped(&self, callback: FrameCallback);
}

/// A top-level object owned by an application engine
pub trait RootObject: Send + Sync {
    /// Object name, for diagnostics
    fn object_name(&self) -> &str;

    /// Cast to a render surface, if this object is one
    fn as_render_surface(&self) -> Option<&dyn RenderSurface> {
        None
    }
}

/// The application engine owning the top-level objects
pub trait ApplicationEngine {
    /// Top-level objects, in creation order
    fn root_objects(&self) -> Vec<Arc<dyn RootObject>>;
}
