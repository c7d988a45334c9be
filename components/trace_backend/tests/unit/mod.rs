//! Unit tests for trace_backend component

mod backend_set_tests;
