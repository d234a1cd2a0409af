//! Command-line argument parsing.

use std::path::PathBuf;

use clap::Parser;

/// Command-line arguments for the `mutator` binary.
///
/// # Examples
///
/// ```rust
/// use clap::Parser;
/// use mutator_shell_cli::cli_args::Args;
///
/// let args = Args::parse_from(["mutator", "--open", "Foo.java"]);
/// assert!(args.open);
/// ```
#[derive(Parser, Debug)] // requires `derive` feature
#[command(term_width = 0, version = mutator_shell_core::app_version())]
pub struct Args {
    /// The `.java` file or project directory to mutate.
    pub path: PathBuf,

    /// Host runtime used to start the jar.
    ///
    /// If not provided, `MUTATOR_JAVA` is used, then `java` from `PATH`.
    #[arg(long)]
    pub java: Option<String>,

    /// Path to the LLM Mutator jar.
    ///
    /// If not provided, `MUTATOR_JAR` is used, then
    /// `../target/LLM_Mutator-jar-with-dependencies.jar` next to this binary.
    #[arg(long)]
    pub jar: Option<String>,

    /// Open the output folder in the file browser once the run has finished.
    #[arg(long, short = 'o', action)]
    pub open: bool,
}
