//! Unit tests for ScopedProfiler
//!
//! `stop` must run exactly once after exactly one `start`, whatever way the
//! scope is left.

use profiler::{profile_scope, BackendSet, Profiler, RecordingBackend, ScopedProfiler};
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

fn recording_profiler() -> (Profiler, RecordingBackend) {
    let recorder = RecordingBackend::new();
    let profiler =
        Profiler::with_backends("scoped", BackendSet::empty().with(Arc::new(recorder.clone())));
    (profiler, recorder)
}

#[test]
fn test_normal_exit() {
    let (profiler, recorder) = recording_profiler();

    {
        let _guard = ScopedProfiler::new(&profiler, "normal");
    }

    assert_eq!(recorder.begin_count(), 1);
    assert_eq!(recorder.end_count(), 1);
}

#[test]
fn test_early_return() {
    let (profiler, recorder) = recording_profiler();

    fn work(profiler: &Profiler, bail: bool) -> u32 {
        let _guard = ScopedProfiler::new(profiler, "early");
        if bail {
            return 0;
        }
        1
    }

    assert_eq!(work(&profiler, true), 0);
    assert_eq!(recorder.begin_count(), 1);
    assert_eq!(recorder.end_count(), 1);

    assert_eq!(work(&profiler, false), 1);
    assert_eq!(recorder.begin_count(), 2);
    assert_eq!(recorder.end_count(), 2);
}

#[test]
fn test_error_propagation() {
    let (profiler, recorder) = recording_profiler();

    fn fallible(profiler: &Profiler) -> Result<(), String> {
        let _guard = profiler.scope("fallible");
        Err::<(), _>("failed".to_string())?;
        Ok(())
    }

    assert!(fallible(&profiler).is_err());
    assert_eq!(recorder.begin_count(), 1);
    assert_eq!(recorder.end_count(), 1);
}

#[test]
fn test_unwind() {
    let (profiler, recorder) = recording_profiler();

    let result = panic::catch_unwind(AssertUnwindSafe(|| {
        let _guard = ScopedProfiler::new(&profiler, "unwind");
        panic!("boom");
    }));

    assert!(result.is_err());
    assert_eq!(recorder.begin_count(), 1);
    assert_eq!(recorder.end_count(), 1);
    assert_eq!(recorder.depth_bounds(), (0, 1));
}

#[test]
fn test_stop_runs_after_start() {
    let (profiler, recorder) = recording_profiler();
    recorder.clear();

    {
        let _guard = ScopedProfiler::new(&profiler, "ordered");
    }

    let events = recorder.events();
    assert_eq!(events.len(), 2);
    assert!(events[0].is_begin());
    assert!(events[1].is_end());
}

#[test]
fn test_profile_scope_macro() {
    let (profiler, recorder) = recording_profiler();

    for _ in 0..3 {
        profile_scope!(profiler, "iteration");
        assert_eq!(recorder.open_depth(), 1);
    }

    assert_eq!(recorder.begin_count(), 3);
    assert_eq!(recorder.end_count(), 3);
    assert_eq!(recorder.tasks(), vec!["iteration".to_string(); 3]);
}
