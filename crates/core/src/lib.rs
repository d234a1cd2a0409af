//! LLM Mutator Shell Core Library
//!
//! This crate provides the functionality shared by the desktop and terminal
//! front-ends of the LLM Mutator shell: choosing a Java file or project,
//! launching the external mutation jar against it, relaying its console output
//! and opening the folder the results were written to.
//!
//! # Key Features
//!
//! - **Path Validation**: Accept `.java` files and directories, reject anything else
//! - **Process Runner**: Spawn the jar in single-file (`-f`) or directory (`-dir`) mode,
//!   with at most one active run and fire-and-forget stopping
//! - **Output Relay**: Split stdout into progress redraws and trimmed lines
//! - **Destination Opening**: Open the result folder in the OS file browser
//!
//! # Examples
//!
//! Running the tool on a project and printing what it reports:
//!
//! ```no_run
//! use std::path::Path;
//!
//! use mutator_shell_core::config::LauncherConfig;
//! use mutator_shell_core::runner::{RunEvent, Runner};
//! use mutator_shell_core::selection::PathSelection;
//!
//! # async fn run() -> mutator_shell_core::error::Result<()> {
//! let selection = PathSelection::from_chosen(Path::new("./my-project"))?;
//! let mut runner = Runner::new(LauncherConfig::from_env());
//! let run = runner.start_run(&selection)?;
//! let id = run.id();
//!
//! let mut events = run.launch();
//! while let Some(event) = events.recv().await {
//!     match event {
//!         RunEvent::Output(line) => print!("{line}"),
//!         RunEvent::Failed(e) => eprintln!("{e}"),
//!         RunEvent::Finished { line, .. } => println!("{line}"),
//!         RunEvent::Complete => runner.finish_run(id),
//!     }
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod destination;
pub mod error;
pub mod relay;
pub mod runner;
pub mod selection;

/// Version string of the shell, answered to version queries.
pub fn app_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
