//! Backend forwarding annotations to `tracing`

use trace_types::{DomainDescriptor, Result};
use tracing::trace;

use crate::{TraceBackend, TraceDomain};

/// Emits every annotation as a TRACE-level event on target `markscope::trace`
#[derive(Debug, Default, Clone, Copy)]
pub struct TraceEventsBackend;

impl TraceEventsBackend {
    /// Create a new backend
    pub fn new() -> Self {
        Self
    }
}

impl TraceBackend for TraceEventsBackend {
    fn name(&self) -> &str {
        "trace-events"
    }

    fn create_domain(&self, descriptor: &DomainDescriptor) -> Result<Box<dyn TraceDomain>> {
        trace!(target: "markscope::trace", domain = %descriptor.name, "domain created");
        Ok(Box::new(TraceEventsDomain {
            domain: descriptor.name.clone(),
        }))
    }

    fn set_thread_name(&self, name: &str) {
        trace!(target: "markscope::trace", thread = name, "thread named");
    }
}

struct TraceEventsDomain {
    domain: String,
}

impl TraceDomain for TraceEventsDomain {
    fn begin_interval(&self, task: &str) {
        trace!(target: "markscope::trace", domain = %self.domain, task, "interval begin");
    }

    fn end_interval(&self) {
        trace!(target: "markscope::trace", domain = %self.domain, "interval end");
    }
}
