// SPDX-License-Identifier: MPL-2.0
//! Iced rendering host for toast notifications.
//!
//! [`ToastLayer`] keeps the views the manager mounts and renders them as an
//! overlay with one aligned column per position. Clones share the same
//! state, so one clone can be handed to the manager while the application
//! keeps another for its `view` function.

use crate::config::TICK_INTERVAL_MS;
use crate::error::HostError;
use crate::notifications::{
    AnimationCompletion, AnimationDriver, ExitDirection, HorizontalAnchor, Layout, Message,
    NotificationId, NotificationManager, Phase, Position, Severity, Size, SlotHandle, ToastProps,
    VerticalAnchor, ViewHandle, ViewRegistry, ViewState,
};
use crate::ui::design_tokens::{
    border, opacity, palette, radius, shadow, sizing, spacing, typography,
};
use iced::widget::{
    button, container, mouse_area, progress_bar, text, Column, Container, Row, Stack, Text,
};
use iced::{alignment, Color, Element, Length, Subscription, Theme};
use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};
use std::rc::Rc;
use std::time::Duration;

#[derive(Debug, Clone)]
struct MountedToast {
    slot: SlotHandle,
    props: ToastProps,
    state: ViewState,
    exiting: Option<ExitDirection>,
}

#[derive(Debug, Default)]
struct LayerState {
    next_view: u64,
    mounted: HashMap<ViewHandle, MountedToast>,
    by_slot: HashMap<SlotHandle, ViewHandle>,
    /// Visual order of each position, as last reported by `reflow`.
    order: BTreeMap<Position, Vec<SlotHandle>>,
}

/// Overlay that renders every mounted toast.
#[derive(Debug, Clone, Default)]
pub struct ToastLayer {
    state: Rc<RefCell<LayerState>>,
}

impl ToastLayer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of mounted views, exiting ones included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.state.borrow().mounted.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.state.borrow().mounted.is_empty()
    }

    /// Ids of the toasts at `position`, in the order they are drawn.
    #[must_use]
    pub fn visual_order(&self, position: Position) -> Vec<NotificationId> {
        let state = self.state.borrow();
        state
            .order
            .get(&position)
            .into_iter()
            .flatten()
            .filter_map(|slot| state.by_slot.get(slot))
            .filter_map(|view| state.mounted.get(view))
            .map(|toast| toast.props.id)
            .collect()
    }

    /// Renders the overlay. Place it on top of the application content with a `Stack`.
    pub fn view(&self) -> Element<'static, Message> {
        let state = self.state.borrow();
        let layers: Vec<Element<'static, Message>> = Position::ALL
            .iter()
            .filter_map(|&position| {
                let toasts: Vec<Element<'static, Message>> = state
                    .order
                    .get(&position)?
                    .iter()
                    .filter_map(|slot| state.by_slot.get(slot))
                    .filter_map(|view| state.mounted.get(view))
                    .map(view_toast)
                    .collect();
                (!toasts.is_empty()).then(|| view_column(position, toasts))
            })
            .collect();

        if layers.is_empty() {
            // Return an empty container that takes no space
            Container::new(text(""))
                .width(Length::Shrink)
                .height(Length::Shrink)
                .into()
        } else {
            Stack::with_children(layers)
                .width(Length::Fill)
                .height(Length::Fill)
                .into()
        }
    }
}

impl ViewRegistry for ToastLayer {
    fn mount(&mut self, slot: SlotHandle, props: ToastProps) -> Result<ViewHandle, HostError> {
        let mut state = self.state.borrow_mut();
        if state.by_slot.contains_key(&slot) {
            return Err(HostError::MountFailed(format!(
                "slot {} at {} is already taken",
                slot.slot, slot.position
            )));
        }
        state.next_view += 1;
        let view = ViewHandle(state.next_view);
        state.by_slot.insert(slot, view);
        state.mounted.insert(
            view,
            MountedToast {
                slot,
                props,
                state: ViewState {
                    phase: Phase::Pending,
                    progress: None,
                },
                exiting: None,
            },
        );
        Ok(view)
    }

    fn unmount(&mut self, view: ViewHandle) -> Result<(), HostError> {
        let mut state = self.state.borrow_mut();
        let toast = state
            .mounted
            .remove(&view)
            .ok_or_else(|| HostError::UnmountFailed(format!("unknown view {}", view.0)))?;
        state.by_slot.remove(&toast.slot);
        if let Some(order) = state.order.get_mut(&toast.slot.position) {
            order.retain(|slot| *slot != toast.slot);
        }
        Ok(())
    }

    fn refresh(&mut self, view: ViewHandle, view_state: ViewState) {
        if let Some(toast) = self.state.borrow_mut().mounted.get_mut(&view) {
            toast.state = view_state;
        }
    }
}

impl AnimationDriver for ToastLayer {
    fn animate_out(&mut self, view: ViewHandle, direction: ExitDirection) -> AnimationCompletion {
        match self.state.borrow_mut().mounted.get_mut(&view) {
            Some(toast) => {
                toast.exiting = Some(direction);
                AnimationCompletion::Standard
            }
            None => AnimationCompletion::Immediate,
        }
    }

    fn reflow(&mut self, position: Position, slots: &[SlotHandle]) {
        self.state
            .borrow_mut()
            .order
            .insert(position, slots.to_vec());
    }
}

/// Ticks the manager while it has timers pending.
pub fn subscription(manager: &NotificationManager) -> Subscription<Message> {
    if manager.has_pending_work() {
        iced::time::every(Duration::from_millis(TICK_INTERVAL_MS)).map(|_| Message::Tick)
    } else {
        Subscription::none()
    }
}

fn view_column(
    position: Position,
    toasts: Vec<Element<'static, Message>>,
) -> Element<'static, Message> {
    let layout = Layout::for_position(position);
    let align_x = match layout.horizontal {
        HorizontalAnchor::Start => alignment::Horizontal::Left,
        HorizontalAnchor::Center => alignment::Horizontal::Center,
        HorizontalAnchor::End => alignment::Horizontal::Right,
    };
    let align_y = match layout.vertical {
        VerticalAnchor::Top => alignment::Vertical::Top,
        VerticalAnchor::Bottom => alignment::Vertical::Bottom,
    };

    let column = Column::with_children(toasts)
        .spacing(spacing::XS)
        .align_x(align_x);

    Container::new(column)
        .width(Length::Fill)
        .height(Length::Fill)
        .align_x(align_x)
        .align_y(align_y)
        .padding(spacing::MD)
        .into()
}

fn view_toast(toast: &MountedToast) -> Element<'static, Message> {
    let props = &toast.props;
    let id = props.id;
    let accent_color = severity_color(props.kind);

    let message_widget = Text::new(props.text.clone())
        .size(text_size(props.size))
        .style(|theme: &Theme| text::Style {
            color: Some(theme.palette().text),
        });
    let mut body = Column::new().spacing(spacing::XXS).push(message_widget);
    if let Some(description) = &props.description {
        body = body.push(
            Text::new(description.clone())
                .size(typography::CAPTION)
                .style(|theme: &Theme| text::Style {
                    color: Some(theme.extended_palette().background.strong.text),
                }),
        );
    }

    // Layout: [icon] [text] [action] [close]
    let mut content = Row::new()
        .spacing(spacing::SM)
        .align_y(alignment::Vertical::Center);
    if props.show_icon {
        let glyph = Text::new(severity_glyph(props.kind))
            .size(sizing::ICON_MD)
            .style(move |_theme: &Theme| text::Style {
                color: Some(accent_color),
            });
        content = content.push(Container::new(glyph).padding(spacing::XXS));
    }
    content = content.push(
        Container::new(body)
            .width(Length::Fill)
            .align_x(alignment::Horizontal::Left),
    );
    if let Some(label) = &props.action_label {
        content = content.push(
            button(Text::new(label.clone()).size(typography::BODY_SM))
                .on_press(Message::ActionPressed(id))
                .padding(spacing::XXS)
                .style(dismiss_button_style),
        );
    }
    if props.closable {
        content = content.push(
            button(Text::new("\u{2715}").size(sizing::ICON_SM))
                .on_press(Message::CloseRequested(id))
                .padding(spacing::XXS)
                .style(dismiss_button_style),
        );
    }

    let mut card = Column::new().spacing(spacing::XS).push(content);
    if let Some(progress) = toast.state.progress.filter(|_| props.show_progress) {
        card = card.push(progress_bar(0.0..=1.0, progress));
    }

    let chrome = Chrome {
        accent: accent_color,
        bordered: props.bordered,
        rounded: props.rounded,
        alpha: toast_alpha(toast),
    };
    let card = Container::new(card)
        .width(Length::Fixed(toast_width(props.size)))
        .padding(spacing::SM)
        .style(move |theme: &Theme| toast_container_style(theme, chrome));

    mouse_area(card)
        .on_enter(Message::PointerEntered(id))
        .on_exit(Message::PointerLeft(id))
        .into()
}

fn toast_alpha(toast: &MountedToast) -> f32 {
    if toast.exiting.is_some() || toast.state.phase == Phase::Pending {
        opacity::OVERLAY_MEDIUM
    } else {
        opacity::OPAQUE
    }
}

fn severity_color(severity: Severity) -> Color {
    match severity {
        Severity::Success => palette::SUCCESS_500,
        Severity::Info => palette::INFO_500,
        Severity::Warning => palette::WARNING_500,
        Severity::Error => palette::ERROR_500,
    }
}

fn severity_glyph(severity: Severity) -> &'static str {
    match severity {
        Severity::Success => "\u{2714}",
        Severity::Info => "\u{2139}",
        Severity::Warning => "\u{26A0}",
        Severity::Error => "\u{2716}",
    }
}

fn text_size(size: Size) -> f32 {
    match size {
        Size::Small => typography::BODY_SM,
        Size::Medium => typography::BODY,
        Size::Large => typography::BODY_LG,
    }
}

fn toast_width(size: Size) -> f32 {
    match size {
        Size::Small => sizing::TOAST_WIDTH_SM,
        Size::Medium => sizing::TOAST_WIDTH,
        Size::Large => sizing::TOAST_WIDTH_LG,
    }
}

#[derive(Debug, Clone, Copy)]
struct Chrome {
    accent: Color,
    bordered: bool,
    rounded: bool,
    alpha: f32,
}

/// Style function for the toast container.
fn toast_container_style(theme: &Theme, chrome: Chrome) -> container::Style {
    let bg_color = theme.extended_palette().background.base.color;

    container::Style {
        background: Some(iced::Background::Color(Color {
            a: bg_color.a * chrome.alpha,
            ..bg_color
        })),
        border: iced::Border {
            color: Color {
                a: chrome.alpha,
                ..chrome.accent
            },
            width: if chrome.bordered { border::WIDTH_MD } else { 0.0 },
            radius: (if chrome.rounded { radius::MD } else { radius::NONE }).into(),
        },
        shadow: if chrome.alpha < opacity::OPAQUE {
            shadow::NONE
        } else {
            shadow::MD
        },
        text_color: Some(Color {
            a: chrome.alpha,
            ..theme.palette().text
        }),
        ..Default::default()
    }
}

/// Style function for the close and action buttons.
fn dismiss_button_style(theme: &Theme, status: button::Status) -> button::Style {
    let base = theme.extended_palette().background.base;

    match status {
        button::Status::Active => button::Style {
            background: None,
            text_color: base.text,
            border: iced::Border::default(),
            shadow: shadow::NONE,
            snap: true,
        },
        button::Status::Hovered | button::Status::Pressed => {
            let alpha = match status {
                button::Status::Hovered => opacity::OVERLAY_SUBTLE,
                _ => opacity::OVERLAY_MEDIUM,
            };
            button::Style {
                background: Some(iced::Background::Color(Color {
                    a: alpha,
                    ..palette::GRAY_400
                })),
                text_color: base.text,
                border: iced::Border {
                    radius: radius::SM.into(),
                    ..Default::default()
                },
                shadow: shadow::NONE,
                snap: true,
            }
        }
        button::Status::Disabled => button::Style {
            background: None,
            text_color: Color {
                a: opacity::OVERLAY_MEDIUM,
                ..base.text
            },
            border: iced::Border::default(),
            shadow: shadow::NONE,
            snap: true,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notifications::{ManualClock, NotifyOptions, Priority, Timings};

    fn manager_with_layer() -> (NotificationManager, ToastLayer, ManualClock) {
        let layer = ToastLayer::new();
        let clock = ManualClock::new();
        let manager = NotificationManager::new()
            .with_clock(clock.clone())
            .with_host(layer.clone(), layer.clone());
        (manager, layer, clock)
    }

    fn urgent(text: &str) -> NotifyOptions {
        NotifyOptions::text(text).priority(Priority::High)
    }

    #[test]
    fn mount_and_unmount_track_views() {
        let (mut manager, layer, clock) = manager_with_layer();
        let id = manager.notify(urgent("saved"));
        assert_eq!(layer.len(), 1);

        manager.dismiss(id);
        assert_eq!(layer.len(), 1, "exiting toast stays mounted");

        clock.advance(Timings::default().exit_animation);
        manager.tick();
        assert!(layer.is_empty());
    }

    #[test]
    fn reflow_follows_stacking_direction() {
        let (mut manager, layer, _clock) = manager_with_layer();
        let top_first = manager.notify(urgent("a"));
        let top_second = manager.notify(urgent("b"));
        let bottom_first = manager.notify(urgent("c").position(Position::BottomLeft));
        let bottom_second = manager.notify(urgent("d").position(Position::BottomLeft));

        assert_eq!(layer.visual_order(Position::TopRight), vec![top_first, top_second]);
        assert_eq!(
            layer.visual_order(Position::BottomLeft),
            vec![bottom_second, bottom_first]
        );
    }

    #[test]
    fn duplicate_slot_is_rejected() {
        let mut layer = ToastLayer::new();
        let slot = SlotHandle {
            position: Position::Top,
            slot: 7,
        };
        let props = ToastProps {
            id: NotificationId::from_raw(1),
            text: "x".into(),
            description: None,
            kind: Severity::Info,
            size: Size::Medium,
            show_icon: true,
            bordered: true,
            rounded: true,
            closable: false,
            show_progress: false,
            action_label: None,
            position: Position::Top,
        };
        assert!(layer.mount(slot, props.clone()).is_ok());
        assert!(matches!(
            layer.mount(slot, props),
            Err(HostError::MountFailed(_))
        ));
    }

    #[test]
    fn unknown_view_unmount_errors() {
        let mut layer = ToastLayer::new();
        assert!(matches!(
            layer.unmount(ViewHandle(42)),
            Err(HostError::UnmountFailed(_))
        ));
    }

    #[test]
    fn view_renders_every_kind_of_toast() {
        let (mut manager, layer, _clock) = manager_with_layer();
        manager.notify(
            urgent("everything")
                .description("with a description")
                .closable(true)
                .show_progress(true)
                .action("Undo", |_| {}),
        );
        manager.notify(urgent("plain").show_icon(false).position(Position::Bottom));

        let _element = layer.view();
        let _empty = ToastLayer::new().view();
    }

    #[test]
    fn subscription_is_idle_without_timers() {
        let manager = NotificationManager::new();
        assert!(!manager.has_pending_work());
        let _ = subscription(&manager);
    }

    #[test]
    fn toast_container_style_uses_accent_color() {
        let theme = Theme::Dark;
        let accent = palette::SUCCESS_500;
        let style = toast_container_style(
            &theme,
            Chrome {
                accent,
                bordered: true,
                rounded: true,
                alpha: opacity::OPAQUE,
            },
        );

        assert_eq!(style.border.color, accent);
        assert_eq!(style.border.width, border::WIDTH_MD);
        assert!(style.background.is_some());
    }

    #[test]
    fn unbordered_square_toast_has_no_border() {
        let style = toast_container_style(
            &Theme::Light,
            Chrome {
                accent: palette::ERROR_500,
                bordered: false,
                rounded: false,
                alpha: opacity::OVERLAY_MEDIUM,
            },
        );
        assert_eq!(style.border.width, 0.0);
        assert_eq!(style.shadow.blur_radius, 0.0);
    }

    #[test]
    fn severity_colors_are_distinct() {
        let colors = [
            severity_color(Severity::Success),
            severity_color(Severity::Info),
            severity_color(Severity::Warning),
            severity_color(Severity::Error),
        ];
        for (i, a) in colors.iter().enumerate() {
            for b in &colors[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
