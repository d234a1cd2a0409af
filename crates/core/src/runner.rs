//! Lifecycle of the external mutation tool process.
//!
//! A [`Runner`] tracks at most one active run. Starting a run hands back a
//! [`PendingRun`], which spawns the process the first time its event stream is
//! polled and then forwards [`RunEvent`]s until the process has exited. Stopping
//! is fire-and-forget: the handle is cleared at once while the process still
//! reports its exit through the stream.

use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Stdio};

use futures::stream::{self, Stream};
use log::{debug, info, warn};
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::{Child, Command};
use tokio::sync::{mpsc, oneshot};

use crate::config::LauncherConfig;
use crate::error::{Error, Result};
use crate::relay::{finished_line, split_chunk, ChunkDecoder, OutputLine};
use crate::selection::PathSelection;

const READ_BUFFER_SIZE: usize = 8 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvocationMode {
    SingleFile,
    Directory,
}

impl InvocationMode {
    pub fn flag(self) -> &'static str {
        match self {
            Self::SingleFile => "-f",
            Self::Directory => "-dir",
        }
    }
}

/// A fully resolved command line for the external tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
    pub mode: InvocationMode,
}

impl Invocation {
    /// Resolves the command line for `path`, choosing the mode from what is on
    /// disk right now.
    ///
    /// # Errors
    ///
    /// Returns `Access` if `path` cannot be stat'ed.
    pub fn resolve(path: &Path, launcher: &LauncherConfig) -> Result<Self> {
        let metadata = std::fs::metadata(path)
            .map_err(|e| Error::access(path.display().to_string(), e))?;

        let mode = if metadata.is_file() {
            InvocationMode::SingleFile
        } else {
            InvocationMode::Directory
        };

        Ok(Self::with_mode(path, mode, launcher))
    }

    pub fn with_mode(path: &Path, mode: InvocationMode, launcher: &LauncherConfig) -> Self {
        Self {
            program: launcher.java.clone(),
            args: vec![
                "-jar".to_string(),
                launcher.jar.display().to_string(),
                mode.flag().to_string(),
                path.display().to_string(),
            ],
            mode,
        }
    }

    /// The arguments after the jar path, i.e. the ones the tool itself parses.
    pub fn tool_args(&self) -> &[String] {
        &self.args[2..]
    }

    fn command(&self) -> Command {
        let mut command = Command::new(&self.program);
        command
            .args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        command
    }
}

impl std::fmt::Display for Invocation {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{} {}", self.program, self.args.join(" "))
    }
}

/// Everything a presenter needs to follow a run.
#[derive(Debug)]
pub enum RunEvent {
    Output(OutputLine),
    /// Error reported by the run: `SpawnFailed` or the collected stderr block.
    Failed(Error),
    /// The closing line carrying the exit code.
    Finished { line: String, code: Option<i32> },
    /// The run has fully ended. Always the last event, sent exactly once.
    Complete,
}

pub type RunId = u64;

/// The single active run, owned by the [`Runner`].
#[derive(Debug)]
pub struct RunHandle {
    id: RunId,
    stop: oneshot::Sender<()>,
}

impl RunHandle {
    pub fn id(&self) -> RunId {
        self.id
    }
}

/// A run that has been accepted but whose process has not been spawned yet.
#[derive(Debug)]
pub struct PendingRun {
    id: RunId,
    invocation: Invocation,
    artifact: PathBuf,
    stop: oneshot::Receiver<()>,
}

/// Owns the optional active run.
#[derive(Debug)]
pub struct Runner {
    launcher: LauncherConfig,
    active: Option<RunHandle>,
    next_id: RunId,
}

impl Runner {
    pub fn new(launcher: LauncherConfig) -> Self {
        Self {
            launcher,
            active: None,
            next_id: 1,
        }
    }

    pub fn launcher(&self) -> &LauncherConfig {
        &self.launcher
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    pub fn active_id(&self) -> Option<RunId> {
        self.active.as_ref().map(RunHandle::id)
    }

    /// Accepts a new run for `selection`.
    ///
    /// # Errors
    ///
    /// Returns `RunInProgress` while another run is active, leaving that run
    /// untouched, and `Access` if the selected path can no longer be stat'ed.
    pub fn start_run(&mut self, selection: &PathSelection) -> Result<PendingRun> {
        if self.active.is_some() {
            warn!("Rejecting run for `{}`: a run is already active", selection);
            return Err(Error::RunInProgress);
        }

        let invocation = Invocation::resolve(selection.path(), &self.launcher)?;
        let (stop_tx, stop_rx) = oneshot::channel();

        let id = self.next_id;
        self.next_id += 1;
        self.active = Some(RunHandle { id, stop: stop_tx });

        info!("Run {} accepted: {}", id, invocation);

        Ok(PendingRun {
            id,
            invocation,
            artifact: self.launcher.jar.clone(),
            stop: stop_rx,
        })
    }

    /// Asks the active process to terminate and clears the handle without
    /// waiting for the exit. Returns whether a run was active.
    pub fn stop_run(&mut self) -> bool {
        let Some(handle) = self.active.take() else {
            return false;
        };

        info!("Stopping run {}", handle.id);
        // The receiver is gone once the process has already exited.
        let _ = handle.stop.send(());
        true
    }

    /// Clears the handle after run `id` completed. A completion for a run
    /// that is no longer the active one is ignored.
    pub fn finish_run(&mut self, id: RunId) {
        if self.active_id() == Some(id) {
            debug!("Run {} cleared", id);
            self.active = None;
        }
    }
}

impl PendingRun {
    pub fn id(&self) -> RunId {
        self.id
    }

    pub fn invocation(&self) -> &Invocation {
        &self.invocation
    }

    /// Spawns the process and returns the receiving end of its events.
    ///
    /// Must be called from within a Tokio runtime. The channel is unbounded
    /// so the process monitor never waits on the presenter.
    pub fn launch(self) -> mpsc::UnboundedReceiver<RunEvent> {
        let (tx, rx) = mpsc::unbounded_channel();
        tokio::spawn(self.drive(tx));
        rx
    }

    /// The run as a stream of events; the process is spawned on first poll.
    pub fn into_events(self) -> impl Stream<Item = RunEvent> + Send + 'static {
        enum State {
            Pending(PendingRun),
            Running(mpsc::UnboundedReceiver<RunEvent>),
        }

        stream::unfold(State::Pending(self), |state| async move {
            let mut events = match state {
                State::Pending(run) => run.launch(),
                State::Running(events) => events,
            };
            let event = events.recv().await?;
            Some((event, State::Running(events)))
        })
    }

    async fn drive(self, tx: mpsc::UnboundedSender<RunEvent>) {
        let PendingRun {
            id,
            invocation,
            artifact,
            stop,
        } = self;

        let mut child = match spawn(&invocation, &artifact) {
            Ok(child) => child,
            Err(e) => {
                warn!("Run {} failed to start: {}", id, e);
                let _ = tx.send(RunEvent::Failed(e));
                let _ = tx.send(RunEvent::Complete);
                return;
            }
        };
        debug!("Run {} spawned with pid {:?}", id, child.id());

        let stdout = child.stdout.take().map(|stdout| {
            let tx = tx.clone();
            tokio::spawn(relay_stdout(stdout, tx))
        });
        let stderr = child.stderr.take().map(|stderr| tokio::spawn(collect_stderr(stderr)));

        let status = wait_or_stop(&mut child, stop).await;

        if let Some(stdout) = stdout {
            let _ = stdout.await;
        }
        if let Some(stderr) = stderr {
            match stderr.await {
                Ok(block) if !block.is_empty() => {
                    let _ = tx.send(RunEvent::Failed(Error::Subprocess(block)));
                }
                _ => {}
            }
        }

        match status {
            Ok(status) => {
                info!("Run {} exited: {}", id, status);
                let _ = tx.send(RunEvent::Finished {
                    line: finished_line(&status),
                    code: status.code(),
                });
            }
            Err(e) => {
                warn!("Run {} could not be awaited: {}", id, e);
                let _ = tx.send(RunEvent::Failed(Error::Subprocess(e.to_string())));
            }
        }

        let _ = tx.send(RunEvent::Complete);
    }
}

fn spawn(invocation: &Invocation, artifact: &Path) -> Result<Child> {
    if !artifact.is_file() {
        return Err(Error::spawn_failed(
            invocation.program.clone(),
            format!("external tool not found at `{}`", artifact.display()),
        ));
    }

    invocation
        .command()
        .spawn()
        .map_err(|e| Error::spawn_failed(invocation.program.clone(), e.to_string()))
}

async fn wait_or_stop(
    child: &mut Child,
    mut stop: oneshot::Receiver<()>,
) -> std::io::Result<ExitStatus> {
    tokio::select! {
        status = child.wait() => status,
        requested = &mut stop => {
            // A dropped sender is not a stop request.
            if requested.is_ok() {
                terminate(child);
            }
            child.wait().await
        }
    }
}

#[cfg(unix)]
fn terminate(child: &mut Child) {
    match child.id() {
        Some(pid) => {
            // SAFETY: plain syscall on a pid we spawned and have not reaped yet.
            let result = unsafe { libc::kill(pid as libc::pid_t, libc::SIGTERM) };
            if result != 0 {
                warn!("SIGTERM to {} failed: {}", pid, std::io::Error::last_os_error());
            }
        }
        None => debug!("Process already reaped, nothing to stop"),
    }
}

#[cfg(not(unix))]
fn terminate(child: &mut Child) {
    if let Err(e) = child.start_kill() {
        warn!("Failed to stop process: {}", e);
    }
}

async fn relay_stdout<R: AsyncRead + Unpin>(mut reader: R, tx: mpsc::UnboundedSender<RunEvent>) {
    let mut decoder = ChunkDecoder::new();
    let mut buffer = vec![0u8; READ_BUFFER_SIZE];

    loop {
        match reader.read(&mut buffer).await {
            Ok(0) => break,
            Ok(n) => {
                let chunk = decoder.decode(&buffer[..n]);
                if !chunk.is_empty() {
                    forward(&tx, &chunk);
                }
            }
            Err(e) => {
                warn!("Reading stdout failed: {}", e);
                break;
            }
        }
    }

    if let Some(tail) = decoder.finish() {
        forward(&tx, &tail);
    }
}

fn forward(tx: &mpsc::UnboundedSender<RunEvent>, chunk: &str) {
    for line in split_chunk(chunk) {
        let _ = tx.send(RunEvent::Output(line));
    }
}

async fn collect_stderr<R: AsyncRead + Unpin>(mut reader: R) -> String {
    let mut bytes = Vec::new();
    if let Err(e) = reader.read_to_end(&mut bytes).await {
        warn!("Reading stderr failed: {}", e);
    }
    String::from_utf8_lossy(&bytes).into_owned()
}
