use crate::app::{Failure, Message, OutputBuffer, RunUpdate};
use crate::dialogs::{pick_path, show_error};
use crate::shell::{ShellContext, WINDOW_TITLE};
use iced::{Element, Task};
use mutator_shell_core::config::LauncherConfig;
use mutator_shell_core::destination::{open_destination, SystemOpener};
use mutator_shell_core::error::Error;
use mutator_shell_core::runner::{RunId, Runner};
use mutator_shell_core::selection::PathSelection;
use std::path::PathBuf;

pub struct MutatorShell {
    pub shell: ShellContext,
    pub runner: Runner,
    pub selection: Option<PathSelection>,
    pub output: OutputBuffer,
    /// The run whose events feed the output panel, kept after a stop so the
    /// closing lines still show.
    pub current_run: Option<RunId>,
    pub status: String,
    /// Most recent error of a run, cleared when the next run starts.
    pub last_error: Option<Failure>,
}

impl MutatorShell {
    pub fn new(launcher: LauncherConfig) -> Self {
        Self {
            shell: ShellContext::default(),
            runner: Runner::new(launcher),
            selection: None,
            output: OutputBuffer::default(),
            current_run: None,
            status: "Select a Java file or project".to_string(),
            last_error: None,
        }
    }

    pub fn boot() -> (Self, Task<Message>) {
        (
            Self::new(LauncherConfig::from_env()),
            ShellContext::locate_window(),
        )
    }

    pub fn title(&self) -> String {
        WINDOW_TITLE.to_string()
    }

    pub fn is_running(&self) -> bool {
        self.runner.is_active()
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::WindowOpened(id) => {
                self.shell.attach(id);
                Task::none()
            }
            Message::Pick(kind) => Task::perform(pick_path(kind), Message::PathPicked),
            Message::PathPicked(Ok(Some(selection))) => {
                self.status = format!("Selected: {}", selection);
                self.selection = Some(selection);
                Task::none()
            }
            // Cancelled
            Message::PathPicked(Ok(None)) => Task::none(),
            Message::PathPicked(Err(failure)) => error_dialog(failure),
            Message::RunRequested => self.start_run(),
            Message::StopRequested => {
                if self.runner.stop_run() {
                    self.status = "Stopping...".to_string();
                }
                Task::none()
            }
            Message::Run(id, update) => self.apply_run_update(id, update),
            Message::ResizeWindow(height) => self.shell.resize_height(height),
            Message::OpenDestination => {
                let Some(selection) = &self.selection else {
                    return Task::none();
                };

                let destination = selection.output_destination();
                Task::perform(open_in_file_browser(destination), Message::DestinationOpened)
            }
            Message::DestinationOpened(Ok(path)) => {
                log::info!("Opened `{}`", path.display());
                Task::none()
            }
            Message::DestinationOpened(Err(failure)) => error_dialog(failure),
            Message::DialogClosed => Task::none(),
        }
    }

    pub fn view(&self) -> Element<Message> {
        crate::ui::views::main_view(self)
    }

    fn start_run(&mut self) -> Task<Message> {
        let Some(selection) = &self.selection else {
            return Task::none();
        };

        match self.runner.start_run(selection) {
            Ok(run) => {
                let id = run.id();
                self.current_run = Some(id);
                self.output.clear();
                self.last_error = None;
                self.status = format!("Running on {}", selection);

                let events = Task::run(run.into_events(), move |event| {
                    Message::Run(id, RunUpdate::from(event))
                });
                Task::batch([self.shell.expand_for_output(), events])
            }
            Err(Error::Access { path, original }) => {
                self.output
                    .push_text(&format!("Error accessing path: {}: {}\n", path, original));
                self.shell.expand_for_output()
            }
            Err(e) => error_dialog(e.into()),
        }
    }

    fn apply_run_update(&mut self, id: RunId, update: RunUpdate) -> Task<Message> {
        if update == RunUpdate::Complete {
            self.runner.finish_run(id);
            if self.current_run == Some(id) {
                self.status = "Process complete".to_string();
            }
            return Task::none();
        }

        let superseded = self.current_run != Some(id);

        match update {
            // Errors are shown even for a replaced run.
            RunUpdate::Failed(failure) => {
                if superseded {
                    log::warn!("Run {} failed after being replaced: {}", id, failure.message);
                }
                self.last_error = Some(failure.clone());
                return error_dialog(failure);
            }
            _ if superseded => log::debug!("Ignoring output of superseded run {}", id),
            RunUpdate::Output(line) => self.output.push(&line),
            RunUpdate::Finished(line) => self.output.push_text(&line),
            RunUpdate::Complete => {}
        }

        Task::none()
    }
}

/// Launching the file browser waits on the opener process, so it runs off the
/// executor threads.
async fn open_in_file_browser(destination: PathBuf) -> Result<PathBuf, Failure> {
    tokio::task::spawn_blocking(move || open_destination(&destination, &SystemOpener))
        .await
        .map_err(|e| Failure {
            title: "Error Opening Folder".to_string(),
            message: e.to_string(),
        })?
        .map_err(Failure::from)
}

fn error_dialog(failure: Failure) -> Task<Message> {
    Task::perform(show_error(failure), |_| Message::DialogClosed)
}
