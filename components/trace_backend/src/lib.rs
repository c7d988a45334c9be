//! Tracing backend capability and fan-out dispatch
//!
//! This module provides the narrow contract every vendor tracing SDK is
//! consumed through, and the dispatch layer that fans each annotation out to
//! all compiled-in backends.
//!
//! ## Backends
//!
//! - **itt** (feature `itt`): Intel ITT task annotations, shown by VTune
//! - **signpost** (feature `signpost`, macOS only): os_signpost intervals, shown by Instruments
//! - **trace-events** (feature `trace-events`): `tracing` events at TRACE level
//! - **RecordingBackend**: in-memory recorder, never compiled into the default set
//!
//! A backend that is not compiled in is simply absent from the set; no call
//! site needs to branch on it.

#[cfg(feature = "itt")]
mod itt;
mod recording;
#[cfg(all(feature = "signpost", target_os = "macos"))]
mod signpost;
pub mod thread_name;
#[cfg(feature = "trace-events")]
mod trace_events;

use std::fmt;
use std::sync::{Arc, OnceLock};
use trace_types::{DomainDescriptor, Result};
use tracing::{debug, warn};

#[cfg(feature = "itt")]
pub use itt::IttBackend;
pub use recording::RecordingBackend;
#[cfg(all(feature = "signpost", target_os = "macos"))]
pub use signpost::SignpostBackend;
pub use thread_name::{current_thread_name, set_current_thread_name};
#[cfg(feature = "trace-events")]
pub use trace_events::TraceEventsBackend;

/// Trait that all tracing backends must implement
///
/// Every operation is best-effort: it must not panic and must not block.
pub trait TraceBackend: Send + Sync {
    /// Returns the name of this backend (e.g., "itt", "signpost")
    fn name(&self) -> &str;

    /// Create a domain handle for the given descriptor
    ///
    /// Called once per profiler instance. The returned handle is owned
    /// exclusively by that profiler.
    fn create_domain(&self, descriptor: &DomainDescriptor) -> Result<Box<dyn TraceDomain>>;

    /// Relabel the calling thread for display purposes
    fn set_thread_name(&self, name: &str);
}

/// A backend-specific domain handle
pub trait TraceDomain: Send + Sync {
    /// Open an interval labelled `task`
    ///
    /// Backends may intern `task` by value, so callers should pass stable
    /// labels rather than per-call unique strings.
    fn begin_interval(&self, task: &str);

    /// Close the most recently opened interval
    ///
    /// With no interval open this is a no-op as far as this crate is
    /// concerned; what the external tool displays is backend-defined.
    fn end_interval(&self);
}

/// Domain handle that ignores every call
///
/// Stands in for a backend whose domain could not be created.
#[derive(Debug, Default, Clone, Copy)]
pub struct InertDomain;

impl TraceDomain for InertDomain {
    fn begin_interval(&self, _task: &str) {}

    fn end_interval(&self) {}
}

/// The set of backends a profiler fans out to
#[derive(Clone, Default)]
pub struct BackendSet {
    backends: Vec<Arc<dyn TraceBackend>>,
}

static COMPILED: OnceLock<BackendSet> = OnceLock::new();

impl BackendSet {
    /// Create an empty set; every annotation becomes a no-op
    pub fn empty() -> Self {
        Self::default()
    }

    /// The process-wide set of compiled-in backends
    ///
    /// Built once on first use; later calls share the same backend instances.
    pub fn compiled() -> Self {
        COMPILED.get_or_init(build_compiled).clone()
    }

    /// Create a set from explicit backends
    pub fn from_backends<I>(backends: I) -> Self
    where
        I: IntoIterator<Item = Arc<dyn TraceBackend>>,
    {
        Self {
            backends: backends.into_iter().collect(),
        }
    }

    /// Add a backend
    pub fn with(mut self, backend: Arc<dyn TraceBackend>) -> Self {
        debug!("Registering trace backend: {}", backend.name());
        self.backends.push(backend);
        self
    }

    /// A copy of this set without the named backends
    pub fn without(&self, names: &[String]) -> Self {
        Self {
            backends: self
                .backends
                .iter()
                .filter(|backend| !names.iter().any(|name| name == backend.name()))
                .cloned()
                .collect(),
        }
    }

    /// Number of active backends
    pub fn len(&self) -> usize {
        self.backends.len()
    }

    /// Whether no backend is active
    pub fn is_empty(&self) -> bool {
        self.backends.is_empty()
    }

    /// Names of the active backends, in fan-out order
    pub fn names(&self) -> Vec<&str> {
        self.backends.iter().map(|backend| backend.name()).collect()
    }

    /// Create one domain per backend
    ///
    /// A backend that fails is logged and replaced by an [`InertDomain`], so
    /// the remaining backends keep working.
    pub fn open_domains(&self, descriptor: &DomainDescriptor) -> DomainSet {
        let domains = self
            .backends
            .iter()
            .map(|backend| match backend.create_domain(descriptor) {
                Ok(domain) => domain,
                Err(e) => {
                    warn!(
                        "Trace backend '{}' disabled for domain '{}': {}",
                        backend.name(),
                        descriptor,
                        e
                    );
                    Box::new(InertDomain) as Box<dyn TraceDomain>
                }
            })
            .collect();

        DomainSet { domains }
    }

    /// Create one domain per backend, failing on the first error
    pub fn try_open_domains(&self, descriptor: &DomainDescriptor) -> Result<DomainSet> {
        let domains = self
            .backends
            .iter()
            .map(|backend| backend.create_domain(descriptor))
            .collect::<Result<Vec<_>>>()?;

        Ok(DomainSet { domains })
    }

    /// Relabel the calling thread on every backend
    pub fn set_thread_name(&self, name: &str) {
        for backend in &self.backends {
            backend.set_thread_name(name);
        }
    }
}

impl fmt::Debug for BackendSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BackendSet")
            .field("backends", &self.names())
            .finish()
    }
}

/// Domain handles opened for one profiler, one per backend
pub struct DomainSet {
    domains: Vec<Box<dyn TraceDomain>>,
}

impl DomainSet {
    /// Open an interval on every domain, in backend order
    pub fn begin_interval(&self, task: &str) {
        for domain in &self.domains {
            domain.begin_interval(task);
        }
    }

    /// Close the most recent interval on every domain, in backend order
    pub fn end_interval(&self) {
        for domain in &self.domains {
            domain.end_interval();
        }
    }

    /// Number of domains
    pub fn len(&self) -> usize {
        self.domains.len()
    }

    /// Whether there are no domains
    pub fn is_empty(&self) -> bool {
        self.domains.is_empty()
    }
}

impl fmt::Debug for DomainSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DomainSet")
            .field("len", &self.domains.len())
            .finish()
    }
}

fn build_compiled() -> BackendSet {
    #[allow(unused_mut)]
    let mut set = BackendSet::empty();

    #[cfg(feature = "itt")]
    {
        set = set.with(Arc::new(IttBackend::new()));
    }

    #[cfg(all(feature = "signpost", target_os = "macos"))]
    {
        set = set.with(Arc::new(SignpostBackend::new()));
    }

    #[cfg(feature = "trace-events")]
    {
        set = set.with(Arc::new(TraceEventsBackend::new()));
    }

    debug!("Compiled trace backends: {:?}", set.names());
    set
}
