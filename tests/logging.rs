use std::sync::{Arc, Mutex};

use crypto_graph_wasm::domain::logging::{
    LogComponent, LogEntry, LogLevel, Logger, get_logger, init_logger, min_level, set_min_level,
};
use crypto_graph_wasm::{log_debug, log_error, log_info, log_warn};

#[derive(Clone, Default)]
struct Recorder(Arc<Mutex<Vec<LogEntry>>>);

impl Logger for Recorder {
    fn log(&self, entry: LogEntry) {
        self.0.lock().unwrap().push(entry);
    }
}

// one test: the logger and the level are process-wide
#[test]
fn level_filter_and_macros_reach_the_installed_logger() {
    let recorder = Recorder::default();
    init_logger(Box::new(recorder.clone()));
    assert_eq!(min_level(), LogLevel::Debug);

    log_debug!(LogComponent::Domain("Test"), "kept {}", 1);
    set_min_level(LogLevel::Info);
    assert_eq!(min_level(), LogLevel::Info);
    log_debug!(LogComponent::Domain("Test"), "dropped");
    log_info!(LogComponent::Application("Test"), "info {}", 2);
    log_warn!(LogComponent::Infrastructure("Test"), "warn");
    get_logger().log_with_metadata(
        LogLevel::Debug,
        LogComponent::Infrastructure("HTTP"),
        "also dropped",
        "https://example.org",
    );
    log_error!(LogComponent::Presentation("Test"), "error");
    get_logger().log_with_metadata(
        LogLevel::Error,
        LogComponent::Infrastructure("HTTP"),
        "HTTP error: 500 - Internal Server Error",
        "https://api.upbit.com/v1/ticker",
    );

    let entries = recorder.0.lock().unwrap().clone();
    let messages: Vec<&str> = entries.iter().map(|e| e.message.as_str()).collect();
    assert_eq!(
        messages,
        vec!["kept 1", "info 2", "warn", "error", "HTTP error: 500 - Internal Server Error"]
    );
    let levels: Vec<LogLevel> = entries.iter().map(|e| e.level).collect();
    assert_eq!(
        levels,
        vec![LogLevel::Debug, LogLevel::Info, LogLevel::Warn, LogLevel::Error, LogLevel::Error]
    );

    let last = entries.last().unwrap();
    assert_eq!(last.metadata.as_deref(), Some("https://api.upbit.com/v1/ticker"));
    assert!(
        last.render()
            .ends_with("ERROR INF:HTTP | HTTP error: 500 - Internal Server Error | https://api.upbit.com/v1/ticker")
    );
    assert!(entries[1].render().ends_with(" INFO APP:Test | info 2"));
}
