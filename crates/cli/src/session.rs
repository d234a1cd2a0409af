//! Following one run in the terminal.
//!
//! The first interrupt asks the tool to stop and keeps relaying until it has
//! exited; a second interrupt gives up on the run altogether.

use std::io::Write;

use log::{debug, warn};
use mutator_shell_core::error::Result;
use mutator_shell_core::runner::{RunEvent, RunId, Runner};
use tokio::sync::mpsc::UnboundedReceiver;

use crate::render::Renderer;

/// Exit status conventionally reported after an interrupt
pub const INTERRUPTED_EXIT: u8 = 130;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The run ended, with the tool's exit code if it had one.
    Finished(Option<i32>),
    /// Interrupted twice; the run was abandoned before it reported its exit.
    Abandoned,
}

/// Renders `events` until the run completes or is abandoned.
pub async fn follow_run<W: Write>(
    runner: &mut Runner,
    id: RunId,
    events: &mut UnboundedReceiver<RunEvent>,
    interrupts: &mut UnboundedReceiver<()>,
    renderer: &mut Renderer<W>,
) -> Result<Outcome> {
    let mut exit_code = None;
    let mut stop_requested = false;

    loop {
        tokio::select! {
            event = events.recv() => {
                let Some(event) = event else {
                    break;
                };

                match event {
                    RunEvent::Output(line) => renderer.line(&line)?,
                    RunEvent::Failed(e) => renderer.error(&e)?,
                    RunEvent::Finished { line, code } => {
                        renderer.finished(&line)?;
                        exit_code = code;
                    }
                    RunEvent::Complete => {
                        debug!("Run {} complete", id);
                        runner.finish_run(id);
                    }
                }
            }
            Some(()) = interrupts.recv() => {
                if stop_requested {
                    warn!("Interrupted again, abandoning run {}", id);
                    return Ok(Outcome::Abandoned);
                }

                warn!("Interrupted, stopping the mutation run");
                stop_requested = true;
                runner.stop_run();
            }
        }
    }

    Ok(Outcome::Finished(exit_code))
}
