use crate::app::Message;
use crate::dialogs::PickKind;
use iced::widget::{button, row, text, Row};

fn action_button(label: &str, message: Option<Message>) -> button::Button<'_, Message> {
    button(text(label).size(16))
        .padding([10, 20])
        .on_press_maybe(message)
}

pub fn picker_buttons(enabled: bool) -> Row<'static, Message> {
    row![
        action_button("Select File", enabled.then_some(Message::Pick(PickKind::File)))
            .style(button::secondary),
        action_button("Select Folder", enabled.then_some(Message::Pick(PickKind::Folder)))
            .style(button::secondary),
    ]
    .spacing(10)
}

pub fn run_buttons(can_run: bool, is_running: bool, can_open: bool) -> Row<'static, Message> {
    row![
        action_button("Run", can_run.then_some(Message::RunRequested)).style(button::success),
        action_button("Stop", is_running.then_some(Message::StopRequested)).style(button::danger),
        action_button("Open Output", can_open.then_some(Message::OpenDestination))
            .style(button::primary),
    ]
    .spacing(10)
}
