//! Unit tests for Profiler
//!
//! These tests verify fan-out of start/stop to every active backend.

use profiler::{
    current_thread_name, BackendSet, Profiler, ProfilerConfig, RecordingBackend, TraceBackend,
    TraceError, TraceEvent,
};
use std::sync::Arc;

fn backends(recorders: &[&RecordingBackend]) -> BackendSet {
    BackendSet::from_backends(
        recorders
            .iter()
            .map(|r| Arc::new((*r).clone()) as Arc<dyn TraceBackend>),
    )
}

// ============================================================================
// Fan-out Tests
// ============================================================================

#[test]
fn test_demo_scenario() {
    let a = RecordingBackend::named("a");
    let b = RecordingBackend::named("b");
    let profiler = Profiler::with_backends("demo", backends(&[&a, &b]));

    profiler.start("taskA");
    profiler.stop();

    for (recorder, name) in [(&a, "a"), (&b, "b")] {
        let intervals: Vec<TraceEvent> = recorder
            .events()
            .into_iter()
            .filter(|e| e.is_begin() || e.is_end())
            .collect();
        assert_eq!(
            intervals,
            vec![
                TraceEvent::IntervalBegin {
                    backend: name.to_string(),
                    domain: "demo".to_string(),
                    task: "taskA".to_string(),
                },
                TraceEvent::IntervalEnd {
                    backend: name.to_string(),
                    domain: "demo".to_string(),
                },
            ]
        );
    }
}

#[test]
fn test_alternating_calls_preserve_order() {
    let recorder = RecordingBackend::new();
    let profiler = Profiler::with_backends("demo", backends(&[&recorder]));

    let tasks = ["load", "parse", "layout", "paint"];
    for task in tasks {
        profiler.start(task);
        profiler.stop();
    }

    assert_eq!(recorder.begin_count(), tasks.len());
    assert_eq!(recorder.end_count(), tasks.len());
    assert_eq!(recorder.tasks(), tasks.map(String::from).to_vec());
    assert_eq!(recorder.depth_bounds(), (0, 1));

    // Strict begin/end alternation, starting with a begin
    let kinds: Vec<bool> = recorder
        .events()
        .iter()
        .filter(|e| e.is_begin() || e.is_end())
        .map(TraceEvent::is_begin)
        .collect();
    for (i, is_begin) in kinds.iter().enumerate() {
        assert_eq!(*is_begin, i % 2 == 0);
    }
}

#[test]
fn test_zero_backends_is_noop() {
    let profiler = Profiler::with_backends("demo", BackendSet::empty());
    assert!(profiler.backend_names().is_empty());

    profiler.start("taskA");
    profiler.stop();
    // Unbalanced stop must not crash either
    profiler.stop();
}

// ============================================================================
// Failure Tests
// ============================================================================

#[test]
fn test_failing_backend_degrades() {
    let broken = RecordingBackend::failing("broken");
    let healthy = RecordingBackend::named("healthy");
    let profiler = Profiler::with_backends("demo", backends(&[&broken, &healthy]));

    profiler.start("taskA");
    profiler.stop();

    assert!(broken.events().is_empty());
    assert_eq!(healthy.begin_count(), 1);
    assert_eq!(healthy.end_count(), 1);
}

#[test]
fn test_try_with_backends_reports_failure() {
    let broken = RecordingBackend::failing("broken");
    let result = Profiler::try_with_backends("demo", backends(&[&broken]));
    assert!(matches!(result, Err(TraceError::DomainCreation { .. })));
}

#[test]
fn test_try_with_backends_succeeds() {
    let recorder = RecordingBackend::new();
    let profiler = Profiler::try_with_backends("demo", backends(&[&recorder])).unwrap();
    assert_eq!(profiler.backend_names(), vec!["recording"]);
}

// ============================================================================
// Thread Name Tests
// ============================================================================

#[test]
fn test_static_set_thread_name() {
    let name = std::thread::spawn(|| {
        Profiler::set_thread_name("Loader");
        current_thread_name()
    })
    .join()
    .unwrap();

    assert_eq!(name.as_deref(), Some("Loader"));
}

#[cfg(target_os = "linux")]
#[test]
fn test_static_set_thread_name_renames_os_thread() {
    let comm = std::thread::Builder::new()
        .name("orig".to_string())
        .spawn(|| {
            Profiler::set_thread_name("Loader");
            std::fs::read_to_string("/proc/thread-self/comm").unwrap()
        })
        .unwrap()
        .join()
        .unwrap();

    assert_eq!(comm.trim_end(), "Loader");
}

// ============================================================================
// Configuration Tests
// ============================================================================

#[test]
fn test_from_config() {
    let config = ProfilerConfig::builder()
        .domain_name("configured")
        .log_subsystem("com.example.configured")
        .disabled_backend("itt")
        .disabled_backend("signpost")
        .disabled_backend("trace-events")
        .build();

    let profiler = Profiler::from_config(&config).unwrap();
    assert_eq!(profiler.domain().name, "configured");
    assert_eq!(profiler.domain().log_subsystem(), "com.example.configured");
    assert!(profiler.backend_names().is_empty());
}
