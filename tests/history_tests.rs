// History log tests
// Author: kelexine (https://github.com/kelexine)

use clixaw::history::{HistoryLog, MAX_HISTORY_ENTRIES};
use tempfile::TempDir;

#[test]
fn test_history_is_capped() {
    let dir = TempDir::new().unwrap();
    let log = HistoryLog::new(dir.path());

    for i in 0..=MAX_HISTORY_ENTRIES {
        log.append(&format!("query {i}"), &format!("echo {i}"), false, None);
    }

    let entries = log.list(None);
    assert_eq!(entries.len(), 1000);
    assert_eq!(entries[0].query, "query 1000");
    // Entry 0 was the oldest and got dropped
    assert_eq!(entries[999].query, "query 1");
}

#[test]
fn test_list_reverses_insertion_order() {
    let dir = TempDir::new().unwrap();
    let log = HistoryLog::new(dir.path());

    let queries = ["one", "two", "three", "four"];
    for q in queries {
        log.append(q, "true", true, Some(0));
    }

    let listed: Vec<_> = log.list(None).into_iter().map(|e| e.query).collect();
    let mut expected: Vec<_> = queries.iter().map(|q| q.to_string()).collect();
    expected.reverse();
    assert_eq!(listed, expected);

    let timestamps: Vec<_> = log.list(None).into_iter().map(|e| e.timestamp).collect();
    assert!(timestamps.windows(2).all(|w| w[0] >= w[1]));
}

#[test]
fn test_execution_outcome_is_recorded() {
    let dir = TempDir::new().unwrap();
    let log = HistoryLog::new(dir.path());

    log.append("failing", "false", true, Some(1));
    log.append("printed", "ls", false, None);

    let printed = log.get(0).unwrap();
    assert!(!printed.executed);
    assert_eq!(printed.exit_code, None);

    let failing = log.get(1).unwrap();
    assert!(failing.executed);
    assert_eq!(failing.exit_code, Some(1));
}

#[test]
fn test_persisted_format() {
    let dir = TempDir::new().unwrap();
    let log = HistoryLog::new(dir.path());

    log.append("list files", "ls -la", false, None);

    let contents = std::fs::read_to_string(log.path()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&contents).unwrap();
    let entry = &value.as_array().unwrap()[0];

    assert_eq!(entry["query"], "list files");
    assert_eq!(entry["command"], "ls -la");
    assert_eq!(entry["executed"], false);
    assert!(entry["exit_code"].is_null());
    assert!(entry["timestamp"].is_string());
}

#[test]
fn test_limit_larger_than_history() {
    let dir = TempDir::new().unwrap();
    let log = HistoryLog::new(dir.path());

    log.append("only", "ls", false, None);
    assert_eq!(log.list(Some(20)).len(), 1);
    assert!(log.list(Some(0)).is_empty());
}
