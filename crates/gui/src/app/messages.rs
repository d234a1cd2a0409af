use std::path::PathBuf;

use iced::window;
use mutator_shell_core::error::Error;
use mutator_shell_core::relay::OutputLine;
use mutator_shell_core::runner::{RunEvent, RunId};
use mutator_shell_core::selection::PathSelection;

use crate::dialogs::PickKind;

#[derive(Debug, Clone)]
pub enum Message {
    WindowOpened(Option<window::Id>),
    Pick(PickKind),
    PathPicked(Result<Option<PathSelection>, Failure>),
    RunRequested,
    StopRequested,
    Run(RunId, RunUpdate),
    ResizeWindow(f32),
    OpenDestination,
    DestinationOpened(Result<PathBuf, Failure>),
    DialogClosed,
}

/// An error ready to be shown in a message dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    pub title: String,
    pub message: String,
}

impl From<&Error> for Failure {
    fn from(error: &Error) -> Self {
        Self {
            title: error.title().to_string(),
            message: error.to_string(),
        }
    }
}

impl From<Error> for Failure {
    fn from(error: Error) -> Self {
        Self::from(&error)
    }
}

/// Clonable view of a [`RunEvent`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunUpdate {
    Output(OutputLine),
    Failed(Failure),
    Finished(String),
    Complete,
}

impl From<RunEvent> for RunUpdate {
    fn from(event: RunEvent) -> Self {
        match event {
            RunEvent::Output(line) => Self::Output(line),
            RunEvent::Failed(e) => Self::Failed(e.into()),
            RunEvent::Finished { line, .. } => Self::Finished(line),
            RunEvent::Complete => Self::Complete,
        }
    }
}
