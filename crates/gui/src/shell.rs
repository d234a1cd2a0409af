//! The application window and OS-level shell actions.

use iced::{window, Size, Task};

use crate::app::Message;

pub const WINDOW_TITLE: &str = "LLM Mutator GUI";
pub const WINDOW_SIZE: Size = Size::new(800.0, 510.0);
/// Height the window grows to once the output panel is in use
pub const EXPANDED_HEIGHT: f32 = 760.0;

/// Window settings for the single top-level window.
pub fn window_settings() -> window::Settings {
    window::Settings {
        size: WINDOW_SIZE,
        resizable: false,
        ..window::Settings::default()
    }
}

/// Handle on the one application window, created once at startup and owned by
/// the application state.
#[derive(Debug, Default)]
pub struct ShellContext {
    window: Option<window::Id>,
    expanded: bool,
}

impl ShellContext {
    /// Asks the runtime for the id of the window it opened at startup.
    pub fn locate_window() -> Task<Message> {
        window::get_oldest().map(Message::WindowOpened)
    }

    pub fn attach(&mut self, window: Option<window::Id>) {
        self.window = window;
    }

    pub fn window(&self) -> Option<window::Id> {
        self.window
    }

    /// Resizes the window to `height`, keeping its current width.
    pub fn resize_height(&mut self, height: f32) -> Task<Message> {
        let Some(id) = self.window else {
            log::debug!("No window to resize yet");
            return Task::none();
        };

        self.expanded = height > WINDOW_SIZE.height;
        window::get_size(id).then(move |size| window::resize(id, Size::new(size.width, height)))
    }

    /// The resize request for the output panel, issued once per session.
    pub fn expand_for_output(&self) -> Task<Message> {
        if self.expanded {
            Task::none()
        } else {
            Task::done(Message::ResizeWindow(EXPANDED_HEIGHT))
        }
    }

    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    pub fn version(&self) -> &'static str {
        mutator_shell_core::app_version()
    }
}
