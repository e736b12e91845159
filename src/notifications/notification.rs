// SPDX-License-Identifier: MPL-2.0
//! Core notification data structures.
//!
//! This module defines the identifiers, enums and configuration types shared
//! by every part of the notification system. A [`NotifyOptions`] is what
//! callers hand to the manager; it is merged over the process defaults into
//! an immutable [`NotificationConfig`] at submission time.

use super::position::{Position, PositionSpec};
use crate::config::defaults::{MAX_MAX_COUNT, MIN_MAX_COUNT};
use crate::config::NotificationDefaults;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::rc::Rc;
use std::time::Duration;

/// Unique identifier for a notification.
///
/// Ids are handed out by a single manager in strictly increasing order and
/// never reused for the lifetime of that manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NotificationId(u64);

impl NotificationId {
    pub(crate) fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw numeric value.
    #[must_use]
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for NotificationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Severity level determines the accent color and icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Severity {
    /// Operation completed successfully.
    Success,
    /// Informational message.
    #[default]
    Info,
    /// Warning that doesn't block operation.
    Warning,
    /// Error requiring attention.
    Error,
}

/// Visual size of a toast card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Size {
    Small,
    #[default]
    Medium,
    Large,
}

/// Admission priority.
///
/// Only two tiers are operational: `High` mounts synchronously and bypasses
/// the admission queue, while `Low` and `Normal` queue identically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Priority {
    Low,
    #[default]
    Normal,
    High,
}

impl Priority {
    /// Returns whether notifications of this priority skip the admission queue.
    #[must_use]
    pub fn bypasses_queue(self) -> bool {
        matches!(self, Priority::High)
    }
}

/// Maximum number of live notifications a container keeps.
///
/// This newtype enforces validity at the type level: values are clamped to
/// the `MIN_MAX_COUNT..=MAX_MAX_COUNT` range.
///
/// # Example
///
/// ```
/// use iced_toasts::notifications::MaxCount;
///
/// assert_eq!(MaxCount::new(3).value(), 3);
/// assert_eq!(MaxCount::new(0).value(), 1); // Clamped to min
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "usize", into = "usize")]
pub struct MaxCount(usize);

impl MaxCount {
    /// Creates a new max-count, clamping to the valid range.
    #[must_use]
    pub fn new(value: usize) -> Self {
        Self(value.clamp(MIN_MAX_COUNT, MAX_MAX_COUNT))
    }

    #[must_use]
    pub fn value(self) -> usize {
        self.0
    }
}

impl Default for MaxCount {
    fn default() -> Self {
        Self(crate::config::defaults::DEFAULT_MAX_COUNT)
    }
}

impl From<usize> for MaxCount {
    fn from(value: usize) -> Self {
        Self::new(value)
    }
}

impl From<MaxCount> for usize {
    fn from(value: MaxCount) -> Self {
        value.0
    }
}

/// A caller-supplied hook invoked with the id of the notification it belongs to.
#[derive(Clone)]
pub struct Callback(Rc<dyn Fn(NotificationId)>);

impl Callback {
    pub fn new(f: impl Fn(NotificationId) + 'static) -> Self {
        Self(Rc::new(f))
    }

    pub(crate) fn call(&self, id: NotificationId) {
        (self.0)(id);
    }
}

impl fmt::Debug for Callback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Callback(..)")
    }
}

/// An inline action button shown on the toast.
#[derive(Debug, Clone)]
pub struct Action {
    pub label: String,
    pub callback: Callback,
}

impl Action {
    pub fn new(label: impl Into<String>, callback: impl Fn(NotificationId) + 'static) -> Self {
        Self {
            label: label.into(),
            callback: Callback::new(callback),
        }
    }
}

/// Fully resolved configuration of one notification.
///
/// Built once by merging [`NotifyOptions`] over [`NotificationDefaults`];
/// never modified after submission.
#[derive(Debug, Clone)]
pub struct NotificationConfig {
    pub text: String,
    pub description: Option<String>,
    pub kind: Severity,
    /// Auto-dismiss countdown in milliseconds. Zero or negative disables it.
    pub duration_ms: i64,
    pub position: Position,
    pub closable: bool,
    pub size: Size,
    pub show_icon: bool,
    pub bordered: bool,
    pub rounded: bool,
    pub max_count: MaxCount,
    pub pause_on_hover: bool,
    pub show_progress: bool,
    pub action: Option<Action>,
    /// Disables auto-dismiss and the progress bar regardless of duration.
    pub persistent: bool,
    pub priority: Priority,
    pub on_close: Option<Callback>,
}

impl NotificationConfig {
    /// Merges `options` over `defaults`.
    ///
    /// Unknown position names fall back to the default position with a warning.
    pub fn resolve(options: NotifyOptions, defaults: &NotificationDefaults) -> Self {
        let position = options
            .position
            .map_or(defaults.position, |spec| spec.resolve(defaults.position));

        Self {
            text: options.text.unwrap_or_default(),
            description: options.description,
            kind: options.kind.unwrap_or(defaults.kind),
            duration_ms: options.duration_ms.unwrap_or(defaults.duration_ms),
            position,
            closable: options.closable.unwrap_or(defaults.closable),
            size: options.size.unwrap_or(defaults.size),
            show_icon: options.show_icon.unwrap_or(defaults.show_icon),
            bordered: options.bordered.unwrap_or(defaults.bordered),
            rounded: options.rounded.unwrap_or(defaults.rounded),
            max_count: options.max_count.unwrap_or(defaults.max_count),
            pause_on_hover: options.pause_on_hover.unwrap_or(defaults.pause_on_hover),
            show_progress: options.show_progress.unwrap_or(defaults.show_progress),
            action: options.action,
            persistent: options.persistent.unwrap_or(defaults.persistent),
            priority: options.priority.unwrap_or(defaults.priority),
            on_close: options.on_close,
        }
    }

    /// Returns the auto-dismiss countdown, or `None` when the notification
    /// only leaves through an explicit dismissal or eviction.
    #[must_use]
    pub fn auto_dismiss(&self) -> Option<Duration> {
        if self.persistent || self.duration_ms <= 0 {
            return None;
        }
        u64::try_from(self.duration_ms)
            .ok()
            .map(Duration::from_millis)
    }

    /// Returns whether a progress bar should be drawn.
    #[must_use]
    pub fn shows_progress(&self) -> bool {
        self.show_progress && self.auto_dismiss().is_some()
    }

    /// Returns whether hovering freezes the countdown.
    #[must_use]
    pub fn pauses_on_hover(&self) -> bool {
        self.pause_on_hover && self.auto_dismiss().is_some()
    }
}

/// Partial configuration accepted by `notify` and `configure`.
///
/// Every field left at `None` is taken from the process defaults.
///
/// ```
/// use iced_toasts::notifications::{NotifyOptions, Position, Severity};
///
/// let options = NotifyOptions::text("Saved")
///     .kind(Severity::Success)
///     .position(Position::BottomLeft)
///     .duration_ms(1500);
/// assert_eq!(options.duration_ms, Some(1500));
/// ```
#[derive(Debug, Clone, Default)]
pub struct NotifyOptions {
    pub text: Option<String>,
    pub description: Option<String>,
    pub kind: Option<Severity>,
    pub duration_ms: Option<i64>,
    pub position: Option<PositionSpec>,
    pub closable: Option<bool>,
    pub size: Option<Size>,
    pub show_icon: Option<bool>,
    pub bordered: Option<bool>,
    pub rounded: Option<bool>,
    pub max_count: Option<MaxCount>,
    pub pause_on_hover: Option<bool>,
    pub show_progress: Option<bool>,
    pub action: Option<Action>,
    pub persistent: Option<bool>,
    pub priority: Option<Priority>,
    pub on_close: Option<Callback>,
}

impl NotifyOptions {
    /// Starts a set of options with the given message text.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn kind(mut self, kind: Severity) -> Self {
        self.kind = Some(kind);
        self
    }

    #[must_use]
    pub fn duration_ms(mut self, duration_ms: i64) -> Self {
        self.duration_ms = Some(duration_ms);
        self
    }

    /// Sets the anchor, either as a [`Position`] or by name (`"bottom-left"`).
    #[must_use]
    pub fn position(mut self, position: impl Into<PositionSpec>) -> Self {
        self.position = Some(position.into());
        self
    }

    #[must_use]
    pub fn closable(mut self, closable: bool) -> Self {
        self.closable = Some(closable);
        self
    }

    #[must_use]
    pub fn size(mut self, size: Size) -> Self {
        self.size = Some(size);
        self
    }

    #[must_use]
    pub fn show_icon(mut self, show_icon: bool) -> Self {
        self.show_icon = Some(show_icon);
        self
    }

    #[must_use]
    pub fn bordered(mut self, bordered: bool) -> Self {
        self.bordered = Some(bordered);
        self
    }

    #[must_use]
    pub fn rounded(mut self, rounded: bool) -> Self {
        self.rounded = Some(rounded);
        self
    }

    #[must_use]
    pub fn max_count(mut self, max_count: usize) -> Self {
        self.max_count = Some(MaxCount::new(max_count));
        self
    }

    #[must_use]
    pub fn pause_on_hover(mut self, pause_on_hover: bool) -> Self {
        self.pause_on_hover = Some(pause_on_hover);
        self
    }

    #[must_use]
    pub fn show_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = Some(show_progress);
        self
    }

    #[must_use]
    pub fn action(
        mut self,
        label: impl Into<String>,
        callback: impl Fn(NotificationId) + 'static,
    ) -> Self {
        self.action = Some(Action::new(label, callback));
        self
    }

    #[must_use]
    pub fn persistent(mut self, persistent: bool) -> Self {
        self.persistent = Some(persistent);
        self
    }

    #[must_use]
    pub fn priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Registers a hook fired once, after the notification has been removed.
    #[must_use]
    pub fn on_close(mut self, callback: impl Fn(NotificationId) + 'static) -> Self {
        self.on_close = Some(Callback::new(callback));
        self
    }
}

impl From<&str> for NotifyOptions {
    fn from(text: &str) -> Self {
        Self::text(text)
    }
}

impl From<String> for NotifyOptions {
    fn from(text: String) -> Self {
        Self::text(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn persistent_disables_auto_dismiss_and_progress() {
        let defaults = NotificationDefaults::default();
        let config = NotificationConfig::resolve(
            NotifyOptions::text("x")
                .duration_ms(5000)
                .show_progress(true)
                .persistent(true),
            &defaults,
        );
        assert!(config.auto_dismiss().is_none());
        assert!(!config.shows_progress());
        assert!(!config.pauses_on_hover());
    }

    #[test]
    fn non_positive_duration_disables_auto_dismiss() {
        let defaults = NotificationDefaults::default();
        for duration in [0, -1, -5000] {
            let config =
                NotificationConfig::resolve(NotifyOptions::text("x").duration_ms(duration), &defaults);
            assert!(config.auto_dismiss().is_none(), "duration {duration}");
        }
    }

    #[test]
    fn resolve_takes_unset_fields_from_defaults() {
        let defaults = NotificationDefaults {
            kind: Severity::Warning,
            position: Position::Bottom,
            duration_ms: 1234,
            ..NotificationDefaults::default()
        };
        let config = NotificationConfig::resolve(NotifyOptions::text("hello"), &defaults);

        assert_eq!(config.text, "hello");
        assert_eq!(config.kind, Severity::Warning);
        assert_eq!(config.position, Position::Bottom);
        assert_eq!(config.auto_dismiss(), Some(Duration::from_millis(1234)));
    }

    #[test]
    fn unknown_position_name_falls_back_to_default() {
        let defaults = NotificationDefaults {
            position: Position::BottomLeft,
            ..NotificationDefaults::default()
        };
        let config =
            NotificationConfig::resolve(NotifyOptions::text("x").position("middle-ish"), &defaults);
        assert_eq!(config.position, Position::BottomLeft);
    }

    #[test]
    fn max_count_is_clamped() {
        assert_eq!(MaxCount::new(0).value(), MIN_MAX_COUNT);
        assert_eq!(MaxCount::new(10_000).value(), MAX_MAX_COUNT);
        assert_eq!(NotifyOptions::default().max_count(0).max_count, Some(MaxCount::new(1)));
    }

    #[test]
    fn only_high_priority_bypasses_queue() {
        assert!(Priority::High.bypasses_queue());
        assert!(!Priority::Normal.bypasses_queue());
        assert!(!Priority::Low.bypasses_queue());
    }

    #[test]
    fn callback_receives_notification_id() {
        let seen = Rc::new(Cell::new(0));
        let sink = Rc::clone(&seen);
        let callback = Callback::new(move |id| sink.set(id.get()));

        callback.call(NotificationId::from_raw(7));
        assert_eq!(seen.get(), 7);
    }

    #[test]
    fn strings_convert_into_text_options() {
        let from_str: NotifyOptions = "saved".into();
        let from_string: NotifyOptions = String::from("saved").into();
        assert_eq!(from_str.text.as_deref(), Some("saved"));
        assert_eq!(from_string.text.as_deref(), Some("saved"));
    }
}
