// SPDX-FileCopyrightText: 2026 AdaptKit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for the logger against mock hosts.

use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{mpsc, Arc, Mutex};
use std::time::Duration;

use adaptkit_core::{
    AdaptKitError, Disposable, InspectOptions, OutputPanel, Uri, WindowHost, WorkspaceFolder,
};
use adaptkit_log::{
    FileTarget, Inspect, Log, LogArg, TargetKind, ValueRenderer, LOGFILE_KEY, LOGPANEL_KEY,
    UNRENDERABLE,
};
use adaptkit_test_utils::{Journal, MockWindow, MockWorkspace};
use regex::Regex;
use serde::{Serialize, Serializer};
use serde_json::json;

const SECTION: &str = "testExplorer";
const OUTPUT: &str = "Test Explorer Log";

struct Fixture {
    workspace: Arc<MockWorkspace>,
    window: Arc<MockWindow>,
    journal: Journal,
}

impl Fixture {
    fn new() -> Self {
        let journal = Journal::new();
        Self {
            workspace: Arc::new(MockWorkspace::new()),
            window: Arc::new(MockWindow::new(journal.clone())),
            journal,
        }
    }

    fn log(&self) -> Log {
        Log::new(
            SECTION,
            None,
            OUTPUT,
            self.workspace.clone(),
            self.window.clone(),
        )
    }

    fn set(&self, key: &str, value: serde_json::Value) {
        self.workspace.set(SECTION, key, value, None).unwrap();
    }

    fn panel_lines(&self) -> Vec<String> {
        self.journal.panel_lines(OUTPUT)
    }
}

/// Counts how often it was captured for rendering.
struct Counted(Arc<AtomicUsize>);

impl Serialize for Counted {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.fetch_add(1, Ordering::SeqCst);
        serializer.serialize_str("counted")
    }
}

fn read_lines(path: &Path) -> Vec<String> {
    std::fs::read_to_string(path)
        .unwrap_or_default()
        .lines()
        .map(str::to_string)
        .collect()
}

async fn wait_for_lines(path: &Path, count: usize) -> Vec<String> {
    for _ in 0..200 {
        let lines = read_lines(path);
        if lines.len() >= count {
            return lines;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    read_lines(path)
}

#[test]
fn disabled_log_never_renders_values() {
    let fx = Fixture::new();
    let log = fx.log();
    let captured = Arc::new(AtomicUsize::new(0));

    log.info(&["value".into(), LogArg::value(&Counted(Arc::clone(&captured)))]);

    assert!(!log.enabled());
    assert!(log.target_kinds().is_empty());
    assert_eq!(captured.load(Ordering::SeqCst), 0);
    assert!(fx.journal.entries().is_empty());
}

#[test]
fn panel_line_has_timestamp_level_and_joined_parts() {
    let fx = Fixture::new();
    fx.set(LOGPANEL_KEY, json!(true));
    let log = fx.log();

    let one = 1;
    let two = vec![2];
    log.warn(&["hello".into(), LogArg::value(&one), LogArg::value(&two)]);

    let lines = fx.panel_lines();
    assert_eq!(lines.len(), 1);
    let shape = Regex::new(
        r"^\[\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}\.\d{3}\] \[WARN\] hello 1 \| \[ 2 \]$",
    )
    .unwrap();
    assert!(shape.is_match(&lines[0]), "unexpected line: {}", lines[0]);
    assert_eq!(fx.window.panels_created(OUTPUT), 1);
}

#[test]
fn every_level_is_written() {
    let fx = Fixture::new();
    fx.set(LOGPANEL_KEY, json!(true));
    let log = fx.log();

    log.debug(&["d".into()]);
    log.info(&["i".into()]);
    log.warn(&["w".into()]);
    log.error(&["e".into()]);

    let levels: Vec<String> = fx
        .panel_lines()
        .iter()
        .map(|l| l.split("] [").nth(1).unwrap().split(']').next().unwrap().to_string())
        .collect();
    assert_eq!(levels, ["DEBUG", "INFO", "WARN", "ERROR"]);
}

#[test]
fn configuration_change_rebuilds_targets() {
    let fx = Fixture::new();
    let log = fx.log();
    assert!(!log.enabled());

    fx.set(LOGPANEL_KEY, json!(true));
    assert!(log.enabled());
    assert_eq!(log.target_kinds(), vec![TargetKind::Panel]);

    fx.set(LOGPANEL_KEY, json!(false));
    assert!(!log.enabled());
    assert_eq!(fx.window.panels_created(OUTPUT), 1);
    assert_eq!(fx.window.panels_disposed(OUTPUT), 1);
}

#[test]
fn unrelated_configuration_change_is_ignored() {
    let fx = Fixture::new();
    fx.set(LOGPANEL_KEY, json!(true));
    let _log = fx.log();

    fx.workspace
        .set("otherSection", LOGPANEL_KEY, json!(true), None)
        .unwrap();
    fx.workspace.touch("editor.fontSize", None);

    assert_eq!(fx.window.panels_created(OUTPUT), 1);
    assert_eq!(fx.window.panels_disposed(OUTPUT), 0);
}

#[test]
fn relevant_change_rebuilds_even_when_value_is_equivalent() {
    let fx = Fixture::new();
    fx.set(LOGPANEL_KEY, json!(true));
    let _log = fx.log();

    fx.workspace.touch(&format!("{SECTION}.{LOGFILE_KEY}"), None);

    assert_eq!(fx.window.panels_created(OUTPUT), 2);
    assert_eq!(fx.window.panels_disposed(OUTPUT), 1);
}

#[test]
fn non_boolean_logpanel_creates_no_panel() {
    let fx = Fixture::new();
    fx.workspace
        .set_raw(SECTION, LOGPANEL_KEY, json!("yes"), None);
    let log = fx.log();
    assert!(!log.enabled());
    assert_eq!(fx.window.panels_created(OUTPUT), 0);
}

#[test]
fn folder_scoped_log_follows_its_folder() {
    let fx = Fixture::new();
    let a = WorkspaceFolder::local("/work/a", 0);
    let b = WorkspaceFolder::local("/work/b", 1);
    let log = Log::new(
        SECTION,
        Some(a.clone()),
        OUTPUT,
        fx.workspace.clone(),
        fx.window.clone(),
    );
    assert_eq!(log.folder(), Some(&a));

    fx.workspace
        .set(SECTION, LOGPANEL_KEY, json!(true), Some(&b.uri))
        .unwrap();
    assert!(!log.enabled());

    fx.workspace
        .set(SECTION, LOGPANEL_KEY, json!(true), Some(&a.uri))
        .unwrap();
    assert!(log.enabled());

    // A global value does not override the folder's own setting.
    fx.set(LOGPANEL_KEY, json!(false));
    assert!(log.enabled());
}

#[test]
fn next_inspect_options_apply_once_and_are_consumed_when_disabled() {
    let fx = Fixture::new();
    let log = fx.log();
    let nested = json!({"a": {"b": {"c": {"d": 1}}}});

    log.set_next_inspect_options(InspectOptions {
        depth: Some(0),
        ..Default::default()
    });
    log.info(&[LogArg::value(&nested)]);
    assert_eq!(log.effective_inspect_options(), InspectOptions::default());

    fx.set(LOGPANEL_KEY, json!(true));
    log.update_next_inspect_options(&InspectOptions {
        depth: Some(0),
        ..Default::default()
    });
    log.info(&[LogArg::value(&nested)]);
    log.info(&[LogArg::value(&nested)]);

    let lines = fx.panel_lines();
    assert!(lines[0].ends_with("{ a: [Object] }"), "{}", lines[0]);
    assert!(lines[1].ends_with("{ a: { b: { c: [Object] } } }"), "{}", lines[1]);
}

#[test]
fn default_inspect_options_can_be_set_and_merged() {
    let fx = Fixture::new();
    fx.set(LOGPANEL_KEY, json!(true));
    let log = fx.log();

    log.set_default_inspect_options(InspectOptions {
        max_array_length: Some(1),
        ..Default::default()
    });
    log.update_default_inspect_options(&InspectOptions {
        sort_keys: Some(true),
        ..Default::default()
    });
    log.update_next_inspect_options(&InspectOptions {
        max_array_length: Some(2),
        ..Default::default()
    });
    let effective = log.effective_inspect_options();
    assert_eq!(effective.max_array_length, Some(2));
    assert_eq!(effective.sort_keys, Some(true));

    log.info(&[LogArg::value(&json!({"z": [1, 2, 3], "a": 0}))]);
    log.info(&[LogArg::value(&json!([1, 2, 3]))]);

    let lines = fx.panel_lines();
    assert!(lines[0].ends_with("{ a: 0, z: [ 1, 2, ... 1 more item ] }"), "{}", lines[0]);
    assert!(lines[1].ends_with("[ 1, ... 2 more items ]"), "{}", lines[1]);
}

#[test]
fn failing_value_is_replaced_by_placeholder() {
    struct Broken;
    impl Serialize for Broken {
        fn serialize<S: Serializer>(&self, _: S) -> Result<S::Ok, S::Error> {
            Err(serde::ser::Error::custom("cannot serialize"))
        }
    }

    let fx = Fixture::new();
    fx.set(LOGPANEL_KEY, json!(true));
    let log = fx.log();
    log.error(&["x".into(), LogArg::value(&Broken), "y".into()]);

    assert!(fx.panel_lines()[0].ends_with(&format!("x {UNRENDERABLE} y")));
}

#[test]
fn custom_renderer_is_used() {
    struct Upper;
    impl ValueRenderer for Upper {
        fn render(
            &self,
            value: &dyn Inspect,
            _options: &InspectOptions,
        ) -> Result<String, AdaptKitError> {
            Ok(value.inspect()?.to_string().to_uppercase())
        }
    }

    let fx = Fixture::new();
    fx.set(LOGPANEL_KEY, json!(true));
    let log = Log::builder(SECTION, OUTPUT)
        .renderer(Arc::new(Upper))
        .build(fx.workspace.clone(), fx.window.clone());
    log.info(&[LogArg::value(&"abc")]);

    assert!(fx.panel_lines()[0].ends_with("\"ABC\""));
}

#[test]
fn dispose_is_idempotent_and_detaches() {
    let fx = Fixture::new();
    fx.set(LOGPANEL_KEY, json!(true));
    let log = fx.log();
    assert_eq!(fx.workspace.configuration_listener_count(), 1);

    log.dispose();
    log.dispose();

    assert!(!log.enabled());
    assert_eq!(fx.window.panels_disposed(OUTPUT), 1);
    assert_eq!(fx.workspace.configuration_listener_count(), 0);

    fx.set(LOGPANEL_KEY, json!(false));
    fx.set(LOGPANEL_KEY, json!(true));
    assert!(!log.enabled());
    assert_eq!(fx.window.panels_created(OUTPUT), 1);
}

/// Window whose panel asks the log whether it is enabled on every line.
#[derive(Default)]
struct ReentrantWindow {
    log: Arc<Mutex<Option<Log>>>,
    seen: Arc<Mutex<Vec<bool>>>,
}

struct ReentrantPanel {
    log: Arc<Mutex<Option<Log>>>,
    seen: Arc<Mutex<Vec<bool>>>,
}

impl Disposable for ReentrantPanel {
    fn dispose(&self) {}
}

impl OutputPanel for ReentrantPanel {
    fn append_line(&self, _line: &str) {
        let log = self.log.lock().unwrap().clone();
        if let Some(log) = log {
            self.seen.lock().unwrap().push(log.enabled());
        }
    }
}

impl WindowHost for ReentrantWindow {
    fn create_output_panel(&self, _name: &str) -> Arc<dyn OutputPanel> {
        Arc::new(ReentrantPanel {
            log: Arc::clone(&self.log),
            seen: Arc::clone(&self.seen),
        })
    }

    fn show_error_message(&self, _message: &str) {}
}

#[test]
fn panel_can_call_back_into_the_log_while_writing() {
    let fx = Fixture::new();
    fx.set(LOGPANEL_KEY, json!(true));
    let window = Arc::new(ReentrantWindow::default());
    let log = Log::new(SECTION, None, OUTPUT, fx.workspace.clone(), window.clone());
    *window.log.lock().unwrap() = Some(log.clone());

    let (done_tx, done_rx) = mpsc::channel();
    let writer = log.clone();
    std::thread::spawn(move || {
        writer.info(&["x".into()]);
        let _ = done_tx.send(());
    });

    assert!(
        done_rx.recv_timeout(Duration::from_secs(5)).is_ok(),
        "log.info did not return"
    );
    assert_eq!(*window.seen.lock().unwrap(), vec![true]);

    window.log.lock().unwrap().take();
    log.dispose();
}

#[test]
fn dropping_last_handle_releases_everything() {
    let fx = Fixture::new();
    fx.set(LOGPANEL_KEY, json!(true));
    let log = fx.log();
    let clone = log.clone();
    drop(log);
    assert_eq!(fx.workspace.configuration_listener_count(), 1);
    drop(clone);
    assert_eq!(fx.workspace.configuration_listener_count(), 0);
    assert_eq!(fx.window.panels_disposed(OUTPUT), 1);
}

#[tokio::test]
async fn file_target_appends_lines_in_order() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("explorer.log");
    std::fs::write(&path, "existing\n").unwrap();

    let fx = Fixture::new();
    fx.set(LOGFILE_KEY, json!(path.to_string_lossy()));
    let log = fx.log();
    assert_eq!(log.target_kinds(), vec![TargetKind::File]);

    for i in 0..100 {
        log.info(&["line".into(), i.to_string().into()]);
    }
    log.shutdown().await;

    let lines = read_lines(&path);
    assert_eq!(lines.len(), 101);
    assert_eq!(lines[0], "existing");
    for (i, line) in lines[1..].iter().enumerate() {
        assert!(line.ends_with(&format!("[INFO] line {i}")), "line {i}: {line}");
    }
    assert!(std::fs::read_to_string(&path).unwrap().ends_with('\n'));
}

#[tokio::test]
async fn panel_and_file_targets_are_ordered_panel_first() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("both.log");

    let fx = Fixture::new();
    fx.set(LOGPANEL_KEY, json!(true));
    fx.set(LOGFILE_KEY, json!(path.to_string_lossy()));
    let log = fx.log();
    assert_eq!(log.target_kinds(), vec![TargetKind::Panel, TargetKind::File]);

    log.info(&["both".into()]);
    log.shutdown().await;

    assert_eq!(fx.panel_lines().len(), 1);
    assert_eq!(read_lines(&path), fx.panel_lines());
}

#[tokio::test]
async fn unopenable_file_notifies_and_keeps_panel() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing-dir").join("x.log");

    let fx = Fixture::new();
    fx.set(LOGPANEL_KEY, json!(true));
    fx.set(LOGFILE_KEY, json!(path.to_string_lossy()));
    let log = fx.log();

    assert_eq!(log.target_kinds(), vec![TargetKind::Panel]);
    let errors = fx.journal.errors();
    assert_eq!(errors.len(), 1);
    assert!(errors[0].contains("x.log"), "{}", errors[0]);
}

#[tokio::test]
async fn empty_logfile_means_no_file_target() {
    let fx = Fixture::new();
    fx.set(LOGFILE_KEY, json!(""));
    let log = fx.log();
    assert!(!log.enabled());
    assert!(fx.journal.errors().is_empty());
}

#[tokio::test]
async fn changing_logfile_moves_output_to_the_new_file() {
    let dir = tempfile::tempdir().unwrap();
    let first = dir.path().join("first.log");
    let second = dir.path().join("second.log");

    let fx = Fixture::new();
    fx.set(LOGFILE_KEY, json!(first.to_string_lossy()));
    let log = fx.log();
    log.info(&["one".into()]);

    fx.set(LOGFILE_KEY, json!(second.to_string_lossy()));
    log.info(&["two".into()]);
    log.shutdown().await;

    let first_lines = wait_for_lines(&first, 1).await;
    assert_eq!(first_lines.len(), 1);
    assert!(first_lines[0].ends_with("one"));
    let second_lines = read_lines(&second);
    assert_eq!(second_lines.len(), 1);
    assert!(second_lines[0].ends_with("two"));
}

#[cfg(target_os = "linux")]
#[tokio::test]
async fn write_failures_notify_and_draining_continues() {
    let journal = Journal::new();
    let window: Arc<dyn WindowHost> = Arc::new(MockWindow::new(journal.clone()));
    let target = FileTarget::open("/dev/full", window).unwrap();

    target.write("a");
    target.write("b");
    target.write("c");
    target.close().await;

    assert_eq!(journal.errors().len(), 3);
    assert!(journal.errors()[0].contains("/dev/full"));
}

#[test]
fn file_target_outside_runtime_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let window: Arc<dyn WindowHost> = Arc::new(MockWindow::default());
    let result = FileTarget::open(dir.path().join("x.log"), window);
    assert!(matches!(result, Err(AdaptKitError::Runtime(_))));
}

#[tokio::test]
async fn writes_after_dispose_are_ignored() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("late.log");
    let window: Arc<dyn WindowHost> = Arc::new(MockWindow::default());
    let target = FileTarget::open(&path, window).unwrap();
    assert_eq!(target.path(), path.as_path());

    target.write("kept");
    target.dispose();
    target.write("dropped");
    target.close().await;

    assert_eq!(read_lines(&path), vec!["kept".to_string()]);
}

#[test]
fn scoped_uri_change_for_other_scheme_is_ignored() {
    let fx = Fixture::new();
    let folder = WorkspaceFolder::local("/work/a", 0);
    let log = Log::new(
        SECTION,
        Some(folder),
        OUTPUT,
        fx.workspace.clone(),
        fx.window.clone(),
    );
    let remote: Uri = "ssh://box/work/a".parse().unwrap();
    fx.workspace
        .set(SECTION, LOGPANEL_KEY, json!(true), Some(&remote))
        .unwrap();
    assert!(!log.enabled());
}
