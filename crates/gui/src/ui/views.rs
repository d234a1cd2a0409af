use crate::app::{Message, MutatorShell};
use crate::ui::components;
use iced::widget::{column, container, row, scrollable, text, Space};
use iced::{Element, Font, Length};

pub fn main_view(app: &MutatorShell) -> Element<Message> {
    let is_running = app.is_running();
    let has_selection = app.selection.is_some();

    let selection = match &app.selection {
        Some(selection) => text(selection.to_string()).size(14),
        None => text("No file or folder selected").size(14),
    };

    let header = column![
        text("LLM Mutator").size(24),
        components::picker_buttons(!is_running),
        selection,
        components::run_buttons(has_selection && !is_running, is_running, has_selection),
    ]
    .spacing(15);

    let output = container(
        scrollable(text(app.output.as_str()).size(13).font(Font::MONOSPACE))
            .width(Length::Fill)
            .height(Length::Fill),
    )
    .padding(10)
    .style(container::bordered_box)
    .width(Length::Fill)
    .height(Length::Fill);

    let status = match &app.last_error {
        Some(failure) => format!("{} ({})", app.status, failure.title),
        None => app.status.clone(),
    };

    let footer = row![
        text(status).size(12),
        Space::with_width(Length::Fill),
        text(format!("v{}", app.shell.version())).size(12),
    ];

    container(column![header, output, footer].spacing(15))
        .padding(20)
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}
