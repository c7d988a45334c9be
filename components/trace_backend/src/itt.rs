//! Intel ITT backend
//!
//! Tasks show up in VTune when the collector is attached. Without a
//! collector every ITT call is a cheap no-op inside `ittapi` itself.

use ittapi::{Domain, Task};
use parking_lot::Mutex;
use trace_types::{DomainDescriptor, Result, TraceError};
use tracing::debug;

use crate::{TraceBackend, TraceDomain};

/// ITT task annotations
#[derive(Debug, Default, Clone, Copy)]
pub struct IttBackend;

impl IttBackend {
    /// Create a new backend
    pub fn new() -> Self {
        Self
    }
}

impl TraceBackend for IttBackend {
    fn name(&self) -> &str {
        "itt"
    }

    fn create_domain(&self, descriptor: &DomainDescriptor) -> Result<Box<dyn TraceDomain>> {
        if descriptor.name.contains('\0') {
            return Err(TraceError::domain_creation(
                "itt",
                "domain name contains a NUL byte",
            ));
        }

        // ITT domains are never destroyed: __itt_domain_destroy is not safe
        // to call while the collector may still reference the domain.
        let domain: &'static Domain = Box::leak(Box::new(Domain::new(&descriptor.name)));
        debug!("Created ITT domain '{}'", descriptor.name);

        Ok(Box::new(IttDomain {
            domain,
            open_tasks: Mutex::new(Vec::new()),
        }))
    }

    fn set_thread_name(&self, name: &str) {
        set_itt_thread_name(name);
    }
}

#[cfg(not(windows))]
fn set_itt_thread_name(name: &str) {
    let Ok(name) = std::ffi::CString::new(name) else {
        return;
    };
    // SAFETY: the function pointer is filled in by the ITT static part once a
    // collector is loaded and accepts any NUL-terminated string.
    unsafe {
        if let Some(set_name) = ittapi_sys::__itt_thread_set_name_ptr__3_0 {
            set_name(name.as_ptr());
        }
    }
}

#[cfg(windows)]
fn set_itt_thread_name(_name: &str) {}

struct IttDomain {
    domain: &'static Domain,
    /// Tasks begun and not yet ended, most recent last
    open_tasks: Mutex<Vec<Task<'static>>>,
}

// SAFETY: the ITT API is thread-safe and the domain pointer lives for the
// rest of the process. Tasks only carry a reference to that domain.
unsafe impl Send for IttDomain {}
unsafe impl Sync for IttDomain {}

impl TraceDomain for IttDomain {
    fn begin_interval(&self, task: &str) {
        // __itt_string_handle_create interns by value, so stable labels are
        // registered once per process.
        let task = Task::begin(self.domain, task);
        self.open_tasks.lock().push(task);
    }

    fn end_interval(&self) {
        if let Some(task) = self.open_tasks.lock().pop() {
            task.end();
        }
    }
}
