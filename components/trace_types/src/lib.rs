// Tracing domain descriptors, trace events, and error definitions
//
// This module is part of the MarkScope instrumentation shim.

pub mod config;
pub mod errors;

// Re-export commonly used types
pub use config::{
    FrameProfilerConfig, FrameProfilerConfigBuilder, ProfilerConfig, ProfilerConfigBuilder,
};
pub use errors::{Result, TraceError};

use serde::{Deserialize, Serialize};
use std::ffi::CStr;
use std::fmt;

/// Category under which signpost intervals are logged so that Instruments
/// shows them in the "Points of Interest" track
pub const POINTS_OF_INTEREST: &str = "PointsOfInterest";

/// How intervals of a domain are named in os_log-style tools
///
/// Signpost names must be static strings, so the set is closed.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum IntervalStyle {
    /// Intervals named "Profile", labelled by a `task: <label>` message
    #[default]
    Task,
    /// Intervals named "frame" with no message
    Frame,
}

impl IntervalStyle {
    /// Signpost interval name
    pub fn signpost_name(self) -> &'static CStr {
        match self {
            IntervalStyle::Task => c"Profile",
            IntervalStyle::Frame => c"frame",
        }
    }

    /// Whether begin events carry the task label as their message
    pub fn labels_intervals(self) -> bool {
        matches!(self, IntervalStyle::Task)
    }
}

/// Describes a tracing domain to be created by every active backend
///
/// The `name` is what ITT-style tools display; the log subsystem is what
/// os_log-style tools group by. When no subsystem is given the name is used.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub struct DomainDescriptor {
    /// Display name of the domain
    pub name: String,
    /// Optional log subsystem (e.g. "com.markscope.frameprofiler")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_subsystem: Option<String>,
    /// Naming of signpost intervals
    #[serde(default)]
    pub interval_style: IntervalStyle,
}

impl DomainDescriptor {
    /// Create a descriptor whose log subsystem equals its name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            log_subsystem: None,
            interval_style: IntervalStyle::Task,
        }
    }

    /// Set an explicit log subsystem
    pub fn with_log_subsystem(mut self, subsystem: impl Into<String>) -> Self {
        self.log_subsystem = Some(subsystem.into());
        self
    }

    /// Set how signpost intervals are named
    pub fn with_interval_style(mut self, style: IntervalStyle) -> Self {
        self.interval_style = style;
        self
    }

    /// The subsystem backends should log under
    pub fn log_subsystem(&self) -> &str {
        self.log_subsystem.as_deref().unwrap_or(&self.name)
    }
}

impl From<&str> for DomainDescriptor {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for DomainDescriptor {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}

impl fmt::Display for DomainDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Identifier of one logical stream of signpost intervals
///
/// Generated once per domain and reused for every interval it emits.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct SignpostId(pub u64);

impl SignpostId {
    /// `OS_SIGNPOST_ID_NULL`
    pub const NULL: SignpostId = SignpostId(0);
    /// `OS_SIGNPOST_ID_INVALID`
    pub const INVALID: SignpostId = SignpostId(!0);

    /// Whether the id can be used to attribute intervals
    pub fn is_valid(self) -> bool {
        self != Self::NULL && self != Self::INVALID
    }

    /// Validate a freshly generated id
    pub fn checked(raw: u64) -> Result<Self> {
        let id = SignpostId(raw);
        if id.is_valid() {
            Ok(id)
        } else {
            Err(TraceError::InvalidSignpostId(raw))
        }
    }
}

/// Annotation event as observed by a recording backend
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum TraceEvent {
    /// A domain was created
    DomainCreated {
        /// Backend that created the domain
        backend: String,
        /// Domain name
        domain: String,
    },
    /// An interval was opened
    IntervalBegin {
        /// Backend that received the call
        backend: String,
        /// Domain name
        domain: String,
        /// Task label
        task: String,
    },
    /// The most recent interval was closed
    IntervalEnd {
        /// Backend that received the call
        backend: String,
        /// Domain name
        domain: String,
    },
    /// The calling thread was relabelled
    ThreadNamed {
        /// Backend that received the call
        backend: String,
        /// New display name
        name: String,
    },
}

impl TraceEvent {
    /// Whether this is an interval begin
    pub fn is_begin(&self) -> bool {
        matches!(self, TraceEvent::IntervalBegin { .. })
    }

    /// Whether this is an interval end
    pub fn is_end(&self) -> bool {
        matches!(self, TraceEvent::IntervalEnd { .. })
    }

    /// Name of the backend the event was recorded by
    pub fn backend(&self) -> &str {
        match self {
            TraceEvent::DomainCreated { backend, .. }
            | TraceEvent::IntervalBegin { backend, .. }
            | TraceEvent::IntervalEnd { backend, .. }
            | TraceEvent::ThreadNamed { backend, .. } => backend,
        }
    }
}
