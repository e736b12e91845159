// SPDX-License-Identifier: MPL-2.0
//! Toast playground: a window with buttons that fire notifications.

use iced::widget::{button, checkbox, column, row, text, Stack};
use iced::{Element, Length, Subscription, Task};
use iced_toasts::config;
use iced_toasts::notifications::{
    self, NotificationManager, NotifyOptions, Position, Priority, Severity,
};
use iced_toasts::ui::{self, ToastLayer};

#[derive(Debug, Clone)]
enum Message {
    Notify(Severity),
    SelectPosition(Position),
    ToggleHighPriority(bool),
    ToggleProgress(bool),
    DismissAll,
    Toast(notifications::Message),
}

struct Playground {
    manager: NotificationManager,
    layer: ToastLayer,
    position: Position,
    high_priority: bool,
    show_progress: bool,
    sent: u32,
}

impl Playground {
    fn new() -> Self {
        let (defaults, warning) = config::load();
        let layer = ToastLayer::new();
        let mut manager = NotificationManager::new()
            .with_defaults(defaults)
            .with_host(layer.clone(), layer.clone());
        if let Some(warning) = warning {
            manager.warning(
                NotifyOptions::text("Could not load notification defaults").description(warning),
            );
        }
        let position = manager.defaults().position;
        Self {
            manager,
            layer,
            position,
            high_priority: false,
            show_progress: true,
            sent: 0,
        }
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Notify(kind) => {
                self.sent += 1;
                let priority = if self.high_priority {
                    Priority::High
                } else {
                    Priority::Normal
                };
                let options = NotifyOptions::text(format!("{kind:?} notification #{}", self.sent))
                    .kind(kind)
                    .position(self.position)
                    .priority(priority)
                    .closable(true)
                    .show_progress(self.show_progress)
                    .on_close(|id| tracing::info!("notification {id} closed"));
                let options = if kind == Severity::Error {
                    options.persistent(true).action("Retry", |id| {
                        tracing::info!("retry requested from notification {id}");
                    })
                } else {
                    options
                };
                self.manager.notify(options);
            }
            Message::SelectPosition(position) => self.position = position,
            Message::ToggleHighPriority(enabled) => self.high_priority = enabled,
            Message::ToggleProgress(enabled) => self.show_progress = enabled,
            Message::DismissAll => self.manager.dismiss_all(None),
            Message::Toast(message) => self.manager.update(message),
        }
        Task::none()
    }

    fn view(&self) -> Element<'_, Message> {
        let severities = row(
            [Severity::Success, Severity::Info, Severity::Warning, Severity::Error]
                .into_iter()
                .map(|kind| {
                    button(text(format!("{kind:?}")))
                        .on_press(Message::Notify(kind))
                        .into()
                }),
        )
        .spacing(8);

        let positions = row(Position::ALL.into_iter().map(|position| {
            let label = if position == self.position {
                format!("[{position}]")
            } else {
                position.to_string()
            };
            button(text(label))
                .on_press(Message::SelectPosition(position))
                .into()
        }))
        .spacing(8);

        let controls = column![
            text(format!(
                "{} live, {} queued",
                self.manager.count(None),
                self.manager.queued_count()
            )),
            severities,
            positions,
            checkbox(self.high_priority)
                .label("High priority")
                .on_toggle(Message::ToggleHighPriority),
            checkbox(self.show_progress)
                .label("Progress bar")
                .on_toggle(Message::ToggleProgress),
            button(text("Dismiss all")).on_press(Message::DismissAll),
        ]
        .spacing(12)
        .padding(24);

        Stack::new()
            .push(controls)
            .push(self.layer.view().map(Message::Toast))
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }

    fn subscription(&self) -> Subscription<Message> {
        ui::subscription(&self.manager).map(Message::Toast)
    }
}

fn setup_logging() {
    use tracing_subscriber::prelude::*;

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "iced_toasts=info".into()),
        )
        .init();
}

fn main() -> iced::Result {
    setup_logging();

    iced::application(Playground::new, Playground::update, Playground::view)
        .title("Toast playground")
        .subscription(Playground::subscription)
        .run()
}
