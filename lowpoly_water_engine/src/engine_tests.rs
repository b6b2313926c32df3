use super::*;
use serial_test::serial;

// ============================================================================
// Lifecycle
// ============================================================================

#[test]
#[serial]
fn test_initialize_and_shutdown() {
    Engine::reset_for_testing();

    assert!(!Engine::is_initialized());
    Engine::initialize().unwrap();
    assert!(Engine::is_initialized());

    Engine::shutdown();
    assert!(!Engine::is_initialized());
}

#[test]
#[serial]
fn test_double_initialize_fails() {
    Engine::reset_for_testing();

    Engine::initialize().unwrap();
    let second = Engine::initialize();
    assert!(second.is_err());
    match second.unwrap_err() {
        Error::InitializationFailed(_) => {}
        other => panic!("unexpected error: {:?}", other),
    }

    Engine::shutdown();
}

#[test]
#[serial]
fn test_shutdown_without_initialize_is_noop() {
    Engine::reset_for_testing();

    // Must not panic or log spuriously
    Engine::shutdown();
    assert!(!Engine::is_initialized());
}

#[test]
#[serial]
fn test_reinitialize_after_shutdown() {
    Engine::reset_for_testing();

    Engine::initialize().unwrap();
    Engine::shutdown();
    Engine::initialize().unwrap();
    assert!(Engine::is_initialized());

    Engine::shutdown();
}
