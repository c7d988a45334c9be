//! Unit tests for BackendSet fan-out

use std::sync::Arc;
use trace_backend::{BackendSet, RecordingBackend, TraceBackend};
use trace_types::{DomainDescriptor, TraceError, TraceEvent};

fn set_of(backends: &[&RecordingBackend]) -> BackendSet {
    BackendSet::from_backends(
        backends
            .iter()
            .map(|b| Arc::new((*b).clone()) as Arc<dyn TraceBackend>),
    )
}

// ============================================================================
// Fan-out Tests
// ============================================================================

#[test]
fn test_fan_out_to_every_backend() {
    let a = RecordingBackend::named("a");
    let b = RecordingBackend::named("b");
    let set = set_of(&[&a, &b]);
    assert_eq!(set.names(), vec!["a", "b"]);

    let domains = set.open_domains(&DomainDescriptor::new("demo"));
    assert_eq!(domains.len(), 2);

    domains.begin_interval("taskA");
    domains.end_interval();

    for backend in [&a, &b] {
        assert_eq!(backend.begin_count(), 1);
        assert_eq!(backend.end_count(), 1);
        assert_eq!(backend.tasks(), vec!["taskA".to_string()]);
    }
}

#[test]
fn test_thread_name_fan_out() {
    let a = RecordingBackend::named("a");
    let b = RecordingBackend::named("b");
    let set = set_of(&[&a, &b]);

    set.set_thread_name("worker-1");

    assert_eq!(a.thread_names(), vec!["worker-1".to_string()]);
    assert_eq!(b.thread_names(), vec!["worker-1".to_string()]);
}

// ============================================================================
// Failure Isolation Tests
// ============================================================================

#[test]
fn test_failing_backend_does_not_affect_others() {
    let broken = RecordingBackend::failing("broken");
    let healthy = RecordingBackend::named("healthy");
    let set = set_of(&[&broken, &healthy]);

    let domains = set.open_domains(&DomainDescriptor::new("demo"));
    // The failed backend still occupies a slot, as an inert domain
    assert_eq!(domains.len(), 2);

    domains.begin_interval("taskA");
    domains.end_interval();

    assert!(broken.events().is_empty());
    assert_eq!(healthy.begin_count(), 1);
    assert_eq!(healthy.end_count(), 1);
}

#[test]
fn test_try_open_domains_surfaces_error() {
    let broken = RecordingBackend::failing("broken");
    let set = set_of(&[&broken]);

    let result = set.try_open_domains(&DomainDescriptor::new("demo"));
    match result {
        Err(TraceError::DomainCreation { backend, .. }) => assert_eq!(backend, "broken"),
        other => panic!("unexpected result: {:?}", other),
    }
}

// ============================================================================
// Selection Tests
// ============================================================================

#[test]
fn test_without_filters_by_name() {
    let a = RecordingBackend::named("a");
    let b = RecordingBackend::named("b");
    let set = set_of(&[&a, &b]).without(&["a".to_string()]);

    assert_eq!(set.names(), vec!["b"]);

    let domains = set.open_domains(&DomainDescriptor::new("demo"));
    domains.begin_interval("only-b");

    assert!(a.events().is_empty());
    assert_eq!(b.tasks(), vec!["only-b".to_string()]);
}

#[test]
fn test_with_appends_backend() {
    let a = RecordingBackend::named("a");
    let set = BackendSet::empty().with(Arc::new(a.clone()));
    assert_eq!(set.len(), 1);

    set.open_domains(&DomainDescriptor::new("demo"));
    assert_eq!(
        a.events(),
        vec![TraceEvent::DomainCreated {
            backend: "a".to_string(),
            domain: "demo".to_string(),
        }]
    );
}

#[test]
fn test_debug_lists_backend_names() {
    let set = set_of(&[&RecordingBackend::named("a")]);
    assert_eq!(format!("{:?}", set), "BackendSet { backends: [\"a\"] }");
}
