use fraudwatch::logger::Logger;
use log::{Level, LevelFilter, Record};
use tempfile::TempDir;

#[test]
fn test_memory_only_logger() {
    let logger = Logger::from_config(false).unwrap();
    assert!(!logger.is_enabled());
    assert!(logger.log_file().is_none());

    logger.log("Test message".to_string());
    let logs = logger.get_logs();
    assert_eq!(logs.len(), 1);
    assert!(logs[0].starts_with('['));
    assert!(logs[0].ends_with("] Test message"));
}

#[test]
fn test_logs_newest_first_and_clear() {
    let logger = Logger::new();
    logger.log("first".to_string());
    logger.log("second".to_string());

    let logs = logger.get_logs();
    assert!(logs[0].contains("second"));
    assert!(logs[1].contains("first"));

    // Clones share one buffer
    let clone = logger.clone();
    clone.clear();
    assert!(logger.get_logs().is_empty());
}

#[test]
fn test_buffer_drops_oldest_entries() {
    let logger = Logger::new();
    for i in 0..2005 {
        logger.log(format!("entry {}", i));
    }

    let logs = logger.get_logs();
    assert_eq!(logs.len(), 2000);
    assert!(logs[0].ends_with("] entry 2004"));
    assert!(logs[1999].ends_with("] entry 5"));
}

#[test]
fn test_dispatch_feeds_buffer_and_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("logs").join("fraudwatch.log");
    let logger = Logger::with_file(&path).unwrap();
    assert!(logger.is_enabled());
    assert_eq!(logger.log_file(), Some(path.as_path()));

    let (_, sink) = logger.dispatch(LevelFilter::Info).unwrap().into_log();
    sink.log(
        &Record::builder()
            .args(format_args!("fetched page 1"))
            .level(Level::Info)
            .target("fraudwatch::list")
            .build(),
    );
    sink.log(
        &Record::builder()
            .args(format_args!("too chatty"))
            .level(Level::Debug)
            .target("fraudwatch::list")
            .build(),
    );
    sink.flush();

    let logs = logger.get_logs();
    assert_eq!(logs.len(), 1);
    assert!(logs[0].contains("INFO  fetched page 1"));

    let file = std::fs::read_to_string(&path).unwrap();
    assert!(file.contains("[fraudwatch::list] fetched page 1"));
    assert!(!file.contains("too chatty"));
}

#[test]
fn test_http_internals_are_capped() {
    let logger = Logger::new();
    let (_, sink) = logger.dispatch(LevelFilter::Debug).unwrap().into_log();

    sink.log(
        &Record::builder()
            .args(format_args!("connection pooled"))
            .level(Level::Debug)
            .target("hyper_util")
            .build(),
    );

    assert!(logger.get_logs().is_empty());
}
