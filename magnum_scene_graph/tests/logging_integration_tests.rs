//! Integration tests for the logging facade
//!
//! These tests verify that scene graph operations report through the
//! installed logger and honor the severity filter.
//!
//! Run with: cargo test --test logging_integration_tests

use magnum_scene_graph::glam::Vec3;
use magnum_scene_graph::magnum::{Engine, Error};
use magnum_scene_graph::magnum::log::{Logger, LogEntry, LogSeverity};
use magnum_scene_graph::magnum::scene_graph::{MatrixTransformation3D, SceneGraph};
use std::sync::{Arc, Mutex};
use serial_test::serial;

// ============================================================================
// TEST LOGGER IMPLEMENTATION
// ============================================================================

/// Test logger that captures log entries for verification
struct TestLogger {
    entries: Arc<Mutex<Vec<LogEntry>>>,
}

impl TestLogger {
    fn new() -> (Self, Arc<Mutex<Vec<LogEntry>>>) {
        let entries = Arc::new(Mutex::new(Vec::new()));
        (Self { entries: entries.clone() }, entries)
    }
}

impl Logger for TestLogger {
    fn log(&self, entry: &LogEntry) {
        self.entries.lock().unwrap().push(entry.clone());
    }
}

// ============================================================================
// LOGGING TESTS
// ============================================================================

#[test]
#[serial]
fn test_integration_custom_logger() {
    let (test_logger, entries) = TestLogger::new();
    Engine::set_logger(test_logger);

    Engine::log(LogSeverity::Info, "test::module", "Test info message".to_string());
    Engine::log(LogSeverity::Warn, "test::module", "Test warning message".to_string());

    {
        let captured = entries.lock().unwrap();
        assert_eq!(captured.len(), 2);
        assert_eq!(captured[0].severity, LogSeverity::Info);
        assert_eq!(captured[0].source, "test::module");
        assert_eq!(captured[1].message, "Test warning message");
    }

    Engine::reset_logger();
}

#[test]
#[serial]
fn test_integration_failed_operation_logs_error_with_location() {
    let (test_logger, entries) = TestLogger::new();
    Engine::set_logger(test_logger);

    let mut graph = SceneGraph::<MatrixTransformation3D>::new();
    let o = graph.add_object(None).unwrap();
    graph.remove_object(o).unwrap();

    let result = graph.object_mut(o);
    assert!(matches!(result, Err(Error::InvalidObject(_))));

    {
        let captured = entries.lock().unwrap();
        let error = captured
            .iter()
            .find(|entry| entry.severity == LogSeverity::Error)
            .expect("failed lookup should log an error");
        assert_eq!(error.source, "magnum::SceneGraph");
        assert!(error.message.contains("doesn't exist"));
        assert!(error.file.is_some());
        assert!(error.line.is_some());
    }

    Engine::reset_logger();
}

#[test]
#[serial]
fn test_integration_rejected_reparent_is_traced() {
    let (test_logger, entries) = TestLogger::new();
    Engine::set_logger(test_logger);
    Engine::set_min_severity(LogSeverity::Trace);

    let mut graph = SceneGraph::<MatrixTransformation3D>::new();
    let scene = graph.add_scene();
    let parent = graph.add_object(Some(scene)).unwrap();
    let child = graph.add_object(Some(parent)).unwrap();

    assert!(!graph.set_parent(parent, Some(child)).unwrap());
    assert_eq!(graph.parent(child).unwrap(), Some(parent));

    {
        let captured = entries.lock().unwrap();
        assert!(captured
            .iter()
            .any(|entry| entry.severity == LogSeverity::Trace && entry.message.starts_with("Ignored set_parent()")));
        assert!(captured.iter().all(|entry| entry.severity != LogSeverity::Error));
    }

    Engine::reset_logger();
}

#[test]
#[serial]
fn test_integration_default_severity_hides_mutation_traces() {
    Engine::reset_logger();
    let (test_logger, entries) = TestLogger::new();
    Engine::set_logger(test_logger);

    let mut graph = SceneGraph::<MatrixTransformation3D>::new();
    let scene = graph.add_scene();
    let o = graph.add_object(Some(scene)).unwrap();
    graph.object_mut(o).unwrap().translate(Vec3::X);
    graph.set_clean(o).unwrap();
    graph.remove_object(o).unwrap();

    assert!(entries.lock().unwrap().is_empty());

    // Creation and removal show up as traces once enabled
    Engine::set_min_severity(LogSeverity::Trace);
    let other = graph.add_object(Some(scene)).unwrap();
    graph.remove_object(other).unwrap();
    {
        let captured = entries.lock().unwrap();
        let traced = |prefix: &str| {
            captured
                .iter()
                .any(|entry| entry.severity == LogSeverity::Trace && entry.message.starts_with(prefix))
        };
        assert!(traced("Created object"));
        assert!(traced("Removed object"));
        assert!(captured.iter().all(|entry| entry.severity != LogSeverity::Debug));
    }

    Engine::reset_logger();
    assert_eq!(Engine::min_severity(), LogSeverity::Info);
}

#[test]
#[serial]
fn test_integration_logger_reset() {
    let (test_logger, entries) = TestLogger::new();
    Engine::set_logger(test_logger);

    Engine::log(LogSeverity::Info, "test", "Message 1".to_string());
    assert_eq!(entries.lock().unwrap().len(), 1);

    Engine::reset_logger();

    // Goes to the default logger, not captured
    Engine::log(LogSeverity::Info, "test", "Message 2".to_string());
    assert_eq!(entries.lock().unwrap().len(), 1);
}
