//! In-memory recording backend
//!
//! Records every annotation it receives as a [`TraceEvent`]. Useful for
//! asserting on instrumentation without an external tracing tool attached.

use parking_lot::Mutex;
use std::sync::Arc;
use trace_types::{DomainDescriptor, Result, TraceError, TraceEvent};

use crate::{TraceBackend, TraceDomain};

/// Backend that records annotations in memory
///
/// Clones share the same event log.
#[derive(Debug, Clone)]
pub struct RecordingBackend {
    /// Backend name reported through [`TraceBackend::name`]
    name: String,
    /// Shared event log
    events: Arc<Mutex<Vec<TraceEvent>>>,
    /// Whether domain creation should fail
    fail_domains: bool,
}

impl RecordingBackend {
    /// Create a recording backend named "recording"
    pub fn new() -> Self {
        Self::named("recording")
    }

    /// Create a recording backend with a custom name
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            events: Arc::new(Mutex::new(Vec::new())),
            fail_domains: false,
        }
    }

    /// Create a backend whose domain creation always fails
    pub fn failing(name: impl Into<String>) -> Self {
        Self {
            fail_domains: true,
            ..Self::named(name)
        }
    }

    /// Snapshot of all recorded events, in call order
    pub fn events(&self) -> Vec<TraceEvent> {
        self.events.lock().clone()
    }

    /// Number of interval begins
    pub fn begin_count(&self) -> usize {
        self.events.lock().iter().filter(|e| e.is_begin()).count()
    }

    /// Number of interval ends
    pub fn end_count(&self) -> usize {
        self.events.lock().iter().filter(|e| e.is_end()).count()
    }

    /// Begins minus ends
    pub fn open_depth(&self) -> i64 {
        self.begin_count() as i64 - self.end_count() as i64
    }

    /// Highest and lowest number of simultaneously open intervals seen
    ///
    /// Returns `(min, max)`. Strict begin/end alternation yields `(0, 1)`.
    pub fn depth_bounds(&self) -> (i64, i64) {
        let mut depth = 0i64;
        let mut min = 0i64;
        let mut max = 0i64;
        for event in self.events.lock().iter() {
            match event {
                TraceEvent::IntervalBegin { .. } => depth += 1,
                TraceEvent::IntervalEnd { .. } => depth -= 1,
                _ => continue,
            }
            min = min.min(depth);
            max = max.max(depth);
        }
        (min, max)
    }

    /// Labels of every opened interval, in order
    pub fn tasks(&self) -> Vec<String> {
        self.events
            .lock()
            .iter()
            .filter_map(|event| match event {
                TraceEvent::IntervalBegin { task, .. } => Some(task.clone()),
                _ => None,
            })
            .collect()
    }

    /// Thread names received, in order
    pub fn thread_names(&self) -> Vec<String> {
        self.events
            .lock()
            .iter()
            .filter_map(|event| match event {
                TraceEvent::ThreadNamed { name, .. } => Some(name.clone()),
                _ => None,
            })
            .collect()
    }

    /// Clear the event log
    pub fn clear(&self) {
        self.events.lock().clear();
    }

    fn record(&self, event: TraceEvent) {
        self.events.lock().push(event);
    }
}

impl Default for RecordingBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl TraceBackend for RecordingBackend {
    fn name(&self) -> &str {
        &self.name
    }

    fn create_domain(&self, descriptor: &DomainDescriptor) -> Result<Box<dyn TraceDomain>> {
        if self.fail_domains {
            return Err(TraceError::domain_creation(
                &self.name,
                "domain creation disabled",
            ));
        }

        self.record(TraceEvent::DomainCreated {
            backend: self.name.clone(),
            domain: descriptor.name.clone(),
        });

        Ok(Box::new(RecordingDomain {
            backend: self.clone(),
            domain: descriptor.name.clone(),
        }))
    }

    fn set_thread_name(&self, name: &str) {
        self.record(TraceEvent::ThreadNamed {
            backend: self.name.clone(),
            name: name.to_string(),
        });
    }
}

struct RecordingDomain {
    backend: RecordingBackend,
    domain: String,
}

impl TraceDomain for RecordingDomain {
    fn begin_interval(&self, task: &str) {
        self.backend.record(TraceEvent::IntervalBegin {
            backend: self.backend.name.clone(),
            domain: self.domain.clone(),
            task: task.to_string(),
        });
    }

    fn end_interval(&self) {
        self.backend.record(TraceEvent::IntervalEnd {
            backend: self.backend.name.clone(),
            domain: self.domain.clone(),
        });
    }
}
