//! Configuration for profilers and the frame profiler

use serde::{Deserialize, Serialize};

use crate::errors::{Result, TraceError};
use crate::{DomainDescriptor, IntervalStyle};

/// Configuration for a profiler
///
/// Holds the domain the profiler annotates into and the compiled backends
/// it should leave out.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct ProfilerConfig {
    /// Domain name shown by the tracing tool
    domain_name: String,

    /// os_log subsystem; the domain name is used when unset
    log_subsystem: Option<String>,

    /// Names of compiled backends to skip
    disabled_backends: Vec<String>,
}

impl ProfilerConfig {
    /// Create a new builder for ProfilerConfig
    ///
    /// # Example
    ///
    /// ```
    /// use trace_types::ProfilerConfig;
    ///
    /// let config = ProfilerConfig::builder()
    ///     .domain_name("demo")
    ///     .disabled_backend("trace-events")
    ///     .build();
    /// assert_eq!(config.domain_name(), "demo");
    /// ```
    pub fn builder() -> ProfilerConfigBuilder {
        ProfilerConfigBuilder::default()
    }

    /// Get the domain name
    pub fn domain_name(&self) -> &str {
        &self.domain_name
    }

    /// Get the explicit log subsystem, if any
    pub fn log_subsystem(&self) -> Option<&str> {
        self.log_subsystem.as_deref()
    }

    /// Get the names of disabled backends
    pub fn disabled_backends(&self) -> &[String] {
        &self.disabled_backends
    }

    /// Domain descriptor built from this configuration
    pub fn descriptor(&self) -> DomainDescriptor {
        descriptor(&self.domain_name, self.log_subsystem.as_deref())
    }

    /// Reject configurations that would produce unnamed domains
    pub fn validate(&self) -> Result<()> {
        require_non_empty("domain_name", &self.domain_name)?;
        if let Some(subsystem) = &self.log_subsystem {
            require_non_empty("log_subsystem", subsystem)?;
        }
        Ok(())
    }
}

impl Default for ProfilerConfig {
    /// Default values:
    /// - domain_name: "MarkScope"
    /// - log_subsystem: none
    /// - disabled_backends: none
    fn default() -> Self {
        Self {
            domain_name: "MarkScope".to_string(),
            log_subsystem: None,
            disabled_backends: Vec::new(),
        }
    }
}

/// Builder for ProfilerConfig
#[derive(Debug, Clone, Default)]
pub struct ProfilerConfigBuilder {
    domain_name: Option<String>,
    log_subsystem: Option<String>,
    disabled_backends: Vec<String>,
}

impl ProfilerConfigBuilder {
    /// Set the domain name
    pub fn domain_name(mut self, name: impl Into<String>) -> Self {
        self.domain_name = Some(name.into());
        self
    }

    /// Set the os_log subsystem
    pub fn log_subsystem(mut self, subsystem: impl Into<String>) -> Self {
        self.log_subsystem = Some(subsystem.into());
        self
    }

    /// Skip a compiled backend by name (e.g. "itt", "signpost")
    pub fn disabled_backend(mut self, name: impl Into<String>) -> Self {
        self.disabled_backends.push(name.into());
        self
    }

    /// Build the ProfilerConfig
    ///
    /// Uses default values for any options not explicitly set.
    pub fn build(self) -> ProfilerConfig {
        let default = ProfilerConfig::default();

        ProfilerConfig {
            domain_name: self.domain_name.unwrap_or(default.domain_name),
            log_subsystem: self.log_subsystem.or(default.log_subsystem),
            disabled_backends: self.disabled_backends,
        }
    }
}

/// Configuration for the frame profiler
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct FrameProfilerConfig {
    /// Domain name shown by the tracing tool
    domain_name: String,

    /// os_log subsystem
    log_subsystem: Option<String>,

    /// Display name given to the render thread on the first frame
    render_thread_name: String,

    /// Label of every frame interval
    frame_task_name: String,

    /// Names of compiled backends to skip
    disabled_backends: Vec<String>,
}

impl FrameProfilerConfig {
    /// Create a new builder for FrameProfilerConfig
    pub fn builder() -> FrameProfilerConfigBuilder {
        FrameProfilerConfigBuilder::default()
    }

    /// Get the domain name
    pub fn domain_name(&self) -> &str {
        &self.domain_name
    }

    /// Get the explicit log subsystem, if any
    pub fn log_subsystem(&self) -> Option<&str> {
        self.log_subsystem.as_deref()
    }

    /// Get the render thread display name
    pub fn render_thread_name(&self) -> &str {
        &self.render_thread_name
    }

    /// Get the frame interval label
    pub fn frame_task_name(&self) -> &str {
        &self.frame_task_name
    }

    /// Get the names of disabled backends
    pub fn disabled_backends(&self) -> &[String] {
        &self.disabled_backends
    }

    /// Domain descriptor built from this configuration
    ///
    /// Frame intervals are grouped under the signpost name "frame".
    pub fn descriptor(&self) -> DomainDescriptor {
        descriptor(&self.domain_name, self.log_subsystem.as_deref())
            .with_interval_style(IntervalStyle::Frame)
    }

    /// Reject configurations with empty names
    pub fn validate(&self) -> Result<()> {
        require_non_empty("domain_name", &self.domain_name)?;
        require_non_empty("render_thread_name", &self.render_thread_name)?;
        require_non_empty("frame_task_name", &self.frame_task_name)?;
        if let Some(subsystem) = &self.log_subsystem {
            require_non_empty("log_subsystem", subsystem)?;
        }
        Ok(())
    }
}

impl Default for FrameProfilerConfig {
    /// Default values:
    /// - domain_name: "FrameProfiler"
    /// - log_subsystem: "com.markscope.frameprofiler"
    /// - render_thread_name: "QtRenderer"
    /// - frame_task_name: "startFrame"
    /// - disabled_backends: none
    fn default() -> Self {
        Self {
            domain_name: "FrameProfiler".to_string(),
            log_subsystem: Some("com.markscope.frameprofiler".to_string()),
            render_thread_name: "QtRenderer".to_string(),
            frame_task_name: "startFrame".to_string(),
            disabled_backends: Vec::new(),
        }
    }
}

/// Builder for FrameProfilerConfig
#[derive(Debug, Clone, Default)]
pub struct FrameProfilerConfigBuilder {
    domain_name: Option<String>,
    log_subsystem: Option<String>,
    render_thread_name: Option<String>,
    frame_task_name: Option<String>,
    disabled_backends: Vec<String>,
}

impl FrameProfilerConfigBuilder {
    /// Set the domain name
    pub fn domain_name(mut self, name: impl Into<String>) -> Self {
        self.domain_name = Some(name.into());
        self
    }

    /// Set the os_log subsystem
    pub fn log_subsystem(mut self, subsystem: impl Into<String>) -> Self {
        self.log_subsystem = Some(subsystem.into());
        self
    }

    /// Set the render thread display name
    pub fn render_thread_name(mut self, name: impl Into<String>) -> Self {
        self.render_thread_name = Some(name.into());
        self
    }

    /// Set the frame interval label
    pub fn frame_task_name(mut self, name: impl Into<String>) -> Self {
        self.frame_task_name = Some(name.into());
        self
    }

    /// Skip a compiled backend by name
    pub fn disabled_backend(mut self, name: impl Into<String>) -> Self {
        self.disabled_backends.push(name.into());
        self
    }

    /// Build the FrameProfilerConfig
    pub fn build(self) -> FrameProfilerConfig {
        let default = FrameProfilerConfig::default();

        FrameProfilerConfig {
            domain_name: self.domain_name.unwrap_or(default.domain_name),
            log_subsystem: self.log_subsystem.or(default.log_subsystem),
            render_thread_name: self
                .render_thread_name
                .unwrap_or(default.render_thread_name),
            frame_task_name: self.frame_task_name.unwrap_or(default.frame_task_name),
            disabled_backends: self.disabled_backends,
        }
    }
}

fn descriptor(name: &str, subsystem: Option<&str>) -> DomainDescriptor {
    match subsystem {
        Some(subsystem) => DomainDescriptor::new(name).with_log_subsystem(subsystem),
        None => DomainDescriptor::new(name),
    }
}

fn require_non_empty(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(TraceError::InvalidConfiguration(format!(
            "{} must not be empty",
            field
        )));
    }
    Ok(())
}
