mod app;
mod dialogs;
mod shell;
mod ui;

use app::MutatorShell;

pub fn main() -> iced::Result {
    tracing_subscriber::fmt::init();

    iced::application(MutatorShell::title, MutatorShell::update, MutatorShell::view)
        .window(shell::window_settings())
        .centered()
        .run_with(MutatorShell::boot)
}
