//! Opening the tool's result folder in the OS file browser.

use std::path::{Path, PathBuf};
use std::process::Command;

use log::info;

use crate::error::{Error, Result};

/// Launches a file browser on a folder.
pub trait FolderOpener {
    fn open(&self, folder: &Path) -> Result<()>;
}

/// Opens folders with the platform's default file browser.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemOpener;

impl FolderOpener for SystemOpener {
    fn open(&self, folder: &Path) -> Result<()> {
        let program = if cfg!(target_os = "macos") {
            "open"
        } else if cfg!(target_os = "windows") {
            "explorer"
        } else {
            "xdg-open"
        };

        let mut command = Command::new(program);
        command.arg(folder);

        // `explorer` exits with 1 even when the window opened, so only a
        // failure to launch counts there.
        match command.status() {
            Ok(status) if status.success() || cfg!(target_os = "windows") => Ok(()),
            Ok(status) => Err(Error::open_failed(
                folder.display().to_string(),
                format!("`{program}` exited with {status}"),
            )),
            Err(e) => Err(Error::open_failed(
                folder.display().to_string(),
                format!("failed to execute `{program}`: {e}"),
            )),
        }
    }
}

/// Resolves `folder` to an absolute path and opens it.
///
/// # Errors
///
/// Returns `NotFound` without launching anything when the folder does not
/// exist, and whatever the opener reports otherwise.
pub fn open_destination<O: FolderOpener + ?Sized>(folder: &Path, opener: &O) -> Result<PathBuf> {
    let resolved = std::path::absolute(folder)
        .map_err(|e| Error::access(folder.display().to_string(), e))?;

    if !resolved.exists() {
        return Err(Error::not_found(resolved.display().to_string()));
    }

    info!("Opening `{}`", resolved.display());
    opener.open(&resolved)?;

    Ok(resolved)
}
