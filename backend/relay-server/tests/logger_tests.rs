//! Logger installation. Lives in its own test binary because the global
//! logger can only be set once per process.

use relay_config::LogLevel;
use relay_hub::{ConnectionId, create_connection_span};
use relay_server::{ServerError, logger};

use std::fs;

use log::LevelFilter;
use tempfile::TempDir;

#[test]
fn given_file_logger_when_tracing_span_and_event_emitted_then_both_written_and_reinit_rejected() {
    // Given
    let temp = TempDir::new().unwrap();
    let log_path = temp.path().join("relay.log");
    logger::initialize(LogLevel(LevelFilter::Info), Some(log_path.clone()), false).unwrap();
    let connection_id = ConnectionId::new();

    // When
    let span = create_connection_span(&connection_id);
    span.in_scope(|| {
        tracing::info!("subscriber frame accepted");
        log::info!("plain log record");
    });
    log::logger().flush();
    let second = logger::initialize(LogLevel(LevelFilter::Info), None, false);

    // Then
    let contents = fs::read_to_string(&log_path).unwrap();
    assert!(contents.contains("Logger initialized"), "got {contents}");
    assert!(contents.contains("ws_connection"), "got {contents}");
    assert!(contents.contains(&connection_id.to_string()), "got {contents}");
    assert!(contents.contains("subscriber frame accepted"), "got {contents}");
    assert!(contents.contains("plain log record"), "got {contents}");
    assert!(matches!(second, Err(ServerError::Logger { .. })));
}
