//! Integration tests for mutator-shell-core
//!
//! These tests run complete runs end-to-end against small shell scripts that
//! stand in for the host runtime, so they only build on unix.
#![cfg(unix)]

use mutator_shell_core::{
    config::LauncherConfig,
    destination::{open_destination, FolderOpener},
    error::{Error, Result},
    relay::OutputLine,
    runner::{RunEvent, Runner},
    selection::PathSelection,
};
use std::cell::Cell;
use std::fs::{self, File};
use std::io::Write;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tempfile::TempDir;
use tokio::time::timeout;

/// Writes an executable script and a placeholder jar, returning a launcher using them.
fn fake_launcher(dir: &TempDir, script: &str) -> LauncherConfig {
    let program = dir.path().join("fake-java");
    {
        let mut file = File::create(&program).unwrap();
        write!(file, "#!/bin/sh\n{script}\n").unwrap();
        file.sync_all().unwrap();
    }
    fs::set_permissions(&program, fs::Permissions::from_mode(0o755)).unwrap();

    let jar = dir.path().join("tool.jar");
    File::create(&jar).unwrap();

    LauncherConfig::new(program.display().to_string(), jar)
}

async fn collect(mut events: tokio::sync::mpsc::UnboundedReceiver<RunEvent>) -> Vec<RunEvent> {
    let mut collected = Vec::new();
    while let Some(event) = timeout(Duration::from_secs(20), events.recv())
        .await
        .expect("run did not finish in time")
    {
        collected.push(event);
    }
    collected
}

fn outputs(events: &[RunEvent]) -> Vec<OutputLine> {
    events
        .iter()
        .filter_map(|event| match event {
            RunEvent::Output(line) => Some(line.clone()),
            _ => None,
        })
        .collect()
}

/// Test a single-file run: arguments, relayed lines, stderr block and closing events
#[tokio::test]
async fn test_single_file_run_workflow() {
    let dir = tempfile::tempdir().unwrap();
    let launcher = fake_launcher(
        &dir,
        r#"printf '\r|\n  mode=%s path=%s  \n' "$3" "$4"
printf 'Unable to reach model\n' >&2
exit 3"#,
    );
    let source = dir.path().join("Foo.java");
    File::create(&source).unwrap();

    let selection = PathSelection::from_chosen(&source).unwrap();
    let mut runner = Runner::new(launcher);
    let run = runner.start_run(&selection).unwrap();
    let id = run.id();

    let events = collect(run.launch()).await;
    runner.finish_run(id);
    assert!(!runner.is_active());

    let lines = outputs(&events);
    assert!(lines.contains(&OutputLine::Progress("\r|".to_string())));
    assert!(lines.contains(&OutputLine::Normal(format!(
        "mode=-f path={}\n",
        source.display()
    ))));

    assert!(events.iter().any(|event| matches!(
        event,
        RunEvent::Failed(Error::Subprocess(block)) if block == "Unable to reach model\n"
    )));

    let finished: Vec<_> = events
        .iter()
        .filter_map(|event| match event {
            RunEvent::Finished { line, code } => Some((line.clone(), *code)),
            _ => None,
        })
        .collect();
    assert_eq!(finished.len(), 1);
    assert_eq!(finished[0].1, Some(3));
    assert!(finished[0].0.contains("finished with code 3"));

    let completions = events
        .iter()
        .filter(|event| matches!(event, RunEvent::Complete))
        .count();
    assert_eq!(completions, 1);
    assert!(matches!(events.last(), Some(RunEvent::Complete)));
}

/// Test a directory run with a clean exit
#[tokio::test]
async fn test_directory_run_reports_code_zero() {
    let dir = tempfile::tempdir().unwrap();
    let launcher = fake_launcher(&dir, r#"echo "$3 $4""#);
    let project = dir.path().join("project");
    fs::create_dir(&project).unwrap();

    let selection = PathSelection::from_chosen(&project).unwrap();
    let mut runner = Runner::new(launcher);
    let events = collect(runner.start_run(&selection).unwrap().launch()).await;

    let text: String = outputs(&events).iter().map(|line| line.text().to_string()).collect();
    assert!(text.contains(&format!("-dir {}\n", project.display())));

    assert!(!events.iter().any(|event| matches!(event, RunEvent::Failed(_))));
    let finished_index = events
        .iter()
        .position(|event| matches!(event, RunEvent::Finished { .. }))
        .unwrap();
    match &events[finished_index] {
        RunEvent::Finished { line, code } => {
            assert_eq!(*code, Some(0));
            assert!(line.contains("finished with code 0"));
        }
        _ => unreachable!(),
    }
    assert!(matches!(events[finished_index + 1], RunEvent::Complete));
    assert_eq!(events.len(), finished_index + 2);
}

/// Test that stopping clears the handle before the process has exited
#[tokio::test]
async fn test_stop_is_fire_and_forget() {
    let dir = tempfile::tempdir().unwrap();
    let launcher = fake_launcher(&dir, "echo started\nexec sleep 30");
    let selection = PathSelection::Directory(dir.path().to_path_buf());

    let mut runner = Runner::new(launcher);
    let mut events = runner.start_run(&selection).unwrap().launch();

    let first = timeout(Duration::from_secs(20), events.recv())
        .await
        .unwrap()
        .unwrap();
    assert!(matches!(first, RunEvent::Output(OutputLine::Normal(ref text)) if text == "started\n"));

    assert!(runner.stop_run());
    assert!(!runner.is_active());

    let rest = collect(events).await;
    let code = rest.iter().find_map(|event| match event {
        RunEvent::Finished { line, code } => Some((line.clone(), *code)),
        _ => None,
    });
    let (line, code) = code.expect("finished line after stop");
    assert_eq!(code, None);
    assert!(line.contains("terminated by signal 15"));
    assert!(matches!(rest.last(), Some(RunEvent::Complete)));
}

/// Test that an unlaunchable host runtime is reported as a spawn failure
#[tokio::test]
async fn test_missing_runtime_is_spawn_failure() {
    let dir = tempfile::tempdir().unwrap();
    let jar = dir.path().join("tool.jar");
    File::create(&jar).unwrap();
    let launcher = LauncherConfig::new(
        dir.path().join("no-such-java").display().to_string(),
        jar,
    );

    let mut runner = Runner::new(launcher);
    let selection = PathSelection::Directory(dir.path().to_path_buf());
    let events = collect(runner.start_run(&selection).unwrap().launch()).await;

    assert_eq!(events.len(), 2);
    assert!(matches!(events[0], RunEvent::Failed(Error::SpawnFailed { .. })));
    assert!(matches!(events[1], RunEvent::Complete));
}

/// Test that a selection deleted after picking surfaces as an access error
#[test]
fn test_vanished_selection_is_access_error() {
    let dir = tempfile::tempdir().unwrap();
    let project = dir.path().join("project");
    fs::create_dir(&project).unwrap();
    let selection = PathSelection::from_chosen(&project).unwrap();
    fs::remove_dir(&project).unwrap();

    let mut runner = Runner::new(LauncherConfig::new("java".to_string(), PathBuf::from("x.jar")));
    assert!(matches!(runner.start_run(&selection), Err(Error::Access { .. })));
    assert!(!runner.is_active());
}

struct CountingOpener {
    calls: Cell<usize>,
}

impl FolderOpener for CountingOpener {
    fn open(&self, _folder: &Path) -> Result<()> {
        self.calls.set(self.calls.get() + 1);
        Ok(())
    }
}

/// Test opening the output destination before and after the tool created it
#[test]
fn test_output_destination_workflow() {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("Foo.java");
    File::create(&source).unwrap();
    let selection = PathSelection::from_chosen(&source).unwrap();
    let opener = CountingOpener { calls: Cell::new(0) };

    let destination = selection.output_destination();
    assert!(matches!(
        open_destination(&destination, &opener),
        Err(Error::NotFound { .. })
    ));
    assert_eq!(opener.calls.get(), 0);

    fs::create_dir(&destination).unwrap();
    let opened = open_destination(&destination, &opener).unwrap();
    assert!(opened.ends_with("output"));
    assert_eq!(opener.calls.get(), 1);
}
