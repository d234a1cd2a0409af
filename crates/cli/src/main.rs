use std::io::stdout;
use std::process::ExitCode;

use clap::Parser;
use log::info;
use mutator_shell_core::config::LauncherConfig;
use mutator_shell_core::destination::{open_destination, SystemOpener};
use mutator_shell_core::error::Result;
use mutator_shell_core::runner::Runner;
use mutator_shell_core::selection::PathSelection;

use mutator_shell_cli::cli_args::Args;
use mutator_shell_cli::render::Renderer;
use mutator_shell_cli::session::{follow_run, Outcome, INTERRUPTED_EXIT};
use tokio::sync::mpsc;

/// Exit status used when the tool was stopped or never produced a code
const NO_CODE_EXIT: u8 = 1;

/// Forwards every Ctrl-C for as long as the process lives.
fn forward_interrupts() -> mpsc::UnboundedReceiver<()> {
    let (tx, rx) = mpsc::unbounded_channel();
    tokio::spawn(async move {
        while tokio::signal::ctrl_c().await.is_ok() {
            if tx.send(()).is_err() {
                break;
            }
        }
    });
    rx
}

/// Runs the tool once and reports how the run ended.
async fn run(args: &Args, selection: &PathSelection) -> Result<Outcome> {
    let launcher = LauncherConfig::resolve(args.java.clone(), args.jar.clone());
    let mut runner = Runner::new(launcher);

    let run = runner.start_run(selection)?;
    let id = run.id();
    info!("Running: {}", run.invocation());

    let mut events = run.launch();
    let mut interrupts = forward_interrupts();
    let mut renderer = Renderer::new(stdout());

    follow_run(&mut runner, id, &mut events, &mut interrupts, &mut renderer).await
}

fn open_results(selection: &PathSelection) -> Result<()> {
    let opened = open_destination(&selection.output_destination(), &SystemOpener)?;
    info!("Opened `{}`", opened.display());
    Ok(())
}

fn report(error: &mutator_shell_core::error::Error) {
    let mut renderer = Renderer::new(std::io::stderr());
    if renderer.error(error).is_err() {
        eprintln!("{}: {}", error.title(), error);
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    let selection = match PathSelection::from_chosen(&args.path) {
        Ok(selection) => selection,
        Err(e) => {
            report(&e);
            return ExitCode::FAILURE;
        }
    };

    let exit_code = match run(&args, &selection).await {
        Ok(Outcome::Finished(code)) => code,
        // Returning drops the runtime, and with it the child through `kill_on_drop`.
        Ok(Outcome::Abandoned) => return ExitCode::from(INTERRUPTED_EXIT),
        Err(e) => {
            report(&e);
            return ExitCode::FAILURE;
        }
    };

    if args.open && exit_code.is_some() {
        if let Err(e) = open_results(&selection) {
            report(&e);
        }
    }

    match exit_code {
        Some(code) => ExitCode::from(u8::try_from(code).unwrap_or(NO_CODE_EXIT)),
        None => ExitCode::from(NO_CODE_EXIT),
    }
}
