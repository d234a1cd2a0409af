mod messages;
mod output;
mod state;

pub use messages::{Failure, Message, RunUpdate};
pub use output::OutputBuffer;
pub use state::MutatorShell;
