//! Native file choosers and message boxes.

use std::path::PathBuf;

use mutator_shell_core::selection::PathSelection;
use rfd::{AsyncFileDialog, AsyncMessageDialog, MessageButtons, MessageLevel};

use crate::app::Failure;

/// Which chooser to show. Native dialogs pick either files or folders, never both.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickKind {
    File,
    Folder,
}

/// Shows a chooser and validates the choice.
///
/// Cancelling yields `Ok(None)`. A file without the `.java` suffix yields the
/// `Invalid Selection` failure.
pub async fn pick_path(kind: PickKind) -> Result<Option<PathSelection>, Failure> {
    let Some(path) = choose(kind).await else {
        return Ok(None);
    };

    PathSelection::from_chosen(&path)
        .map(Some)
        .map_err(Failure::from)
}

async fn choose(kind: PickKind) -> Option<PathBuf> {
    let dialog = AsyncFileDialog::new();
    let handle = match kind {
        PickKind::File => {
            dialog
                .set_title("Select a Java file")
                .add_filter("Java source", &["java"])
                .pick_file()
                .await
        }
        PickKind::Folder => dialog.set_title("Select a Java project").pick_folder().await,
    };

    handle.map(|handle| handle.path().to_path_buf())
}

/// Shows a blocking error box and resolves once the user dismissed it.
pub async fn show_error(failure: Failure) {
    log::warn!("{}: {}", failure.title, failure.message);

    let _ = AsyncMessageDialog::new()
        .set_level(MessageLevel::Error)
        .set_title(failure.title)
        .set_description(failure.message)
        .set_buttons(MessageButtons::Ok)
        .show()
        .await;
}
