//! Apple os_signpost backend
//!
//! Intervals are emitted under the "PointsOfInterest" category so Instruments
//! shows them without extra configuration.

use std::ffi::{c_char, c_void, CStr, CString};
use trace_types::{
    DomainDescriptor, IntervalStyle, Result, SignpostId, TraceError, POINTS_OF_INTEREST,
};
use tracing::debug;

use crate::{TraceBackend, TraceDomain};

#[repr(C)]
struct OsLogOpaque {
    _private: [u8; 0],
}

type OsLog = *mut OsLogOpaque;

const OS_SIGNPOST_INTERVAL_BEGIN: u8 = 0x01;
const OS_SIGNPOST_INTERVAL_END: u8 = 0x02;

/// Summary flag: the buffer carries a non-scalar argument
const OSLF_HAS_NON_SCALAR: u8 = 0x02;
/// Argument descriptor: public string
const OSLF_ARG_PUBLIC_STRING: u8 = 0x22;

const BEGIN_FORMAT: &CStr = c"task: %{public}s";
const EMPTY_FORMAT: &CStr = c"";

#[link(name = "System", kind = "dylib")]
extern "C" {
    static __dso_handle: u8;

    fn os_log_create(subsystem: *const c_char, category: *const c_char) -> OsLog;
    fn os_signpost_id_generate(log: OsLog) -> u64;
    fn os_signpost_enabled(log: OsLog) -> bool;
    fn _os_signpost_emit_with_name_impl(
        dso: *const c_void,
        log: OsLog,
        kind: u8,
        spid: u64,
        name: *const c_char,
        format: *const c_char,
        buf: *mut u8,
        size: u32,
    );
}

/// os_signpost intervals
#[derive(Debug, Default, Clone, Copy)]
pub struct SignpostBackend;

impl SignpostBackend {
    /// Create a new backend
    pub fn new() -> Self {
        Self
    }
}

impl TraceBackend for SignpostBackend {
    fn name(&self) -> &str {
        "signpost"
    }

    fn create_domain(&self, descriptor: &DomainDescriptor) -> Result<Box<dyn TraceDomain>> {
        let subsystem = CString::new(descriptor.log_subsystem())
            .map_err(|e| TraceError::domain_creation("signpost", e.to_string()))?;
        let category = CString::new(POINTS_OF_INTEREST)
            .map_err(|e| TraceError::domain_creation("signpost", e.to_string()))?;

        // SAFETY: both arguments are valid NUL-terminated strings; os_log
        // copies them.
        let log = unsafe { os_log_create(subsystem.as_ptr(), category.as_ptr()) };
        if log.is_null() {
            return Err(TraceError::domain_creation(
                "signpost",
                "os_log_create returned null",
            ));
        }

        // SAFETY: `log` is a valid handle returned above.
        let id = SignpostId::checked(unsafe { os_signpost_id_generate(log) })?;
        debug!(
            "Created signpost log '{}' with id {:#x}",
            descriptor.log_subsystem(),
            id.0
        );

        Ok(Box::new(SignpostDomain {
            log,
            id,
            style: descriptor.interval_style,
        }))
    }

    fn set_thread_name(&self, _name: &str) {}
}

struct SignpostDomain {
    log: OsLog,
    id: SignpostId,
    style: IntervalStyle,
}

// SAFETY: os_log handles are immutable after creation and documented as safe
// to use from any thread. The handle is never released.
unsafe impl Send for SignpostDomain {}
unsafe impl Sync for SignpostDomain {}

impl SignpostDomain {
    fn emit(&self, kind: u8, format: &CStr, buf: &mut [u8]) {
        // SAFETY: `log` is valid for the process lifetime, name and format
        // are static strings inside this image, and `buf` is a correctly
        // encoded os_log argument buffer of the given size.
        unsafe {
            if !os_signpost_enabled(self.log) {
                return;
            }
            _os_signpost_emit_with_name_impl(
                &__dso_handle as *const u8 as *const c_void,
                self.log,
                kind,
                self.id.0,
                self.style.signpost_name().as_ptr(),
                format.as_ptr(),
                buf.as_mut_ptr(),
                buf.len() as u32,
            );
        }
    }
}

impl TraceDomain for SignpostDomain {
    fn begin_interval(&self, task: &str) {
        if !self.style.labels_intervals() {
            let mut buf = [0u8; 2];
            self.emit(OS_SIGNPOST_INTERVAL_BEGIN, EMPTY_FORMAT, &mut buf);
            return;
        }

        let Ok(task) = CString::new(task) else {
            return;
        };

        let mut buf = [0u8; 12];
        buf[0] = OSLF_HAS_NON_SCALAR;
        buf[1] = 1;
        buf[2] = OSLF_ARG_PUBLIC_STRING;
        buf[3] = 8;
        buf[4..].copy_from_slice(&(task.as_ptr() as u64).to_le_bytes());

        self.emit(OS_SIGNPOST_INTERVAL_BEGIN, BEGIN_FORMAT, &mut buf);
    }

    fn end_interval(&self) {
        let mut buf = [0u8; 2];
        self.emit(OS_SIGNPOST_INTERVAL_END, EMPTY_FORMAT, &mut buf);
    }
}
