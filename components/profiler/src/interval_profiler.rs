//! Profiler implementation
//!
//! Owns one domain per active backend and fans every start/stop out to all
//! of them.

use trace_backend::{set_current_thread_name, BackendSet, DomainSet};
use trace_types::{DomainDescriptor, ProfilerConfig, Result};
use tracing::debug;

use crate::ScopedProfiler;

/// Named interval annotation against every active tracing backend
///
/// Intervals are not reentrant: `stop` always closes the most recently
/// started interval. Call `stop` exactly once per `start`, with no `start`
/// in between. Misuse is not detected; it only misattributes intervals in
/// the external tool.
///
/// There is no internal locking. Sharing one `Profiler` between threads is
/// only meaningful if the caller keeps at most one interval open at a time;
/// one `Profiler` per thread is the safe default.
#[derive(Debug)]
pub struct Profiler {
    /// Domain this profiler annotates into
    descriptor: DomainDescriptor,
    /// Backends the domains were created on
    backends: BackendSet,
    /// One domain handle per backend
    domains: DomainSet,
}

impl Profiler {
    /// Create a profiler on every compiled-in backend
    ///
    /// # Example
    ///
    /// ```
    /// use profiler::Profiler;
    ///
    /// let profiler = Profiler::new("demo");
    /// profiler.start("taskA");
    /// profiler.stop();
    /// ```
    pub fn new(domain: impl Into<DomainDescriptor>) -> Self {
        Self::with_backends(domain, BackendSet::compiled())
    }

    /// Create a profiler on an explicit backend set
    ///
    /// A backend that cannot create its domain is logged and left inert;
    /// the others are unaffected.
    pub fn with_backends(domain: impl Into<DomainDescriptor>, backends: BackendSet) -> Self {
        let descriptor = domain.into();
        let domains = backends.open_domains(&descriptor);
        debug!(
            "Created profiler for domain '{}' on backends {:?}",
            descriptor,
            backends.names()
        );

        Self {
            descriptor,
            backends,
            domains,
        }
    }

    /// Create a profiler, failing if any backend cannot create its domain
    ///
    /// An invalid signpost id is reported here instead of silently
    /// misattributing every later interval.
    pub fn try_with_backends(
        domain: impl Into<DomainDescriptor>,
        backends: BackendSet,
    ) -> Result<Self> {
        let descriptor = domain.into();
        let domains = backends.try_open_domains(&descriptor)?;

        Ok(Self {
            descriptor,
            backends,
            domains,
        })
    }

    /// Create a profiler from configuration, on the compiled-in backends
    /// minus the disabled ones
    pub fn from_config(config: &ProfilerConfig) -> Result<Self> {
        config.validate()?;
        let backends = BackendSet::compiled().without(config.disabled_backends());
        Ok(Self::with_backends(config.descriptor(), backends))
    }

    /// Open an interval labelled `task` on every backend
    ///
    /// Pass a stable label: backends may intern it by value, so per-call
    /// unique strings defeat their caching.
    #[inline]
    pub fn start(&self, task: &str) {
        self.domains.begin_interval(task);
    }

    /// Close the most recently opened interval on every backend
    #[inline]
    pub fn stop(&self) {
        self.domains.end_interval();
    }

    /// Open an interval that closes when the returned guard is dropped
    pub fn scope<'a>(&'a self, task: &str) -> ScopedProfiler<'a> {
        ScopedProfiler::new(self, task)
    }

    /// Label the calling thread on every compiled-in backend
    pub fn set_thread_name(name: &str) {
        set_current_thread_name(name);
        BackendSet::compiled().set_thread_name(name);
    }

    /// Label the calling thread on this profiler's backends
    pub fn rename_current_thread(&self, name: &str) {
        set_current_thread_name(name);
        self.backends.set_thread_name(name);
    }

    /// The domain this profiler annotates into
    pub fn domain(&self) -> &DomainDescriptor {
        &self.descriptor
    }

    /// Names of the backends this profiler fans out to
    pub fn backend_names(&self) -> Vec<&str> {
        self.backends.names()
    }
}
