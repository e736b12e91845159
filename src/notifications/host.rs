// SPDX-License-Identifier: MPL-2.0
//! Capabilities the notification manager consumes from its environment.
//!
//! The manager never draws anything itself. A rendering host supplies a
//! [`ViewRegistry`] to mount and destroy toast views, an [`AnimationDriver`]
//! to choreograph exit and reflow animations, and optionally a [`Clock`].
//! [`crate::ui::ToastLayer`] is the iced implementation of both traits.

use super::lifecycle::Phase;
use super::notification::{NotificationConfig, NotificationId, Severity, Size};
use super::position::{ExitDirection, Position};
use crate::error::HostError;
use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Host-assigned handle of a mounted view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ViewHandle(pub u64);

/// A reserved place in one container's slot sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SlotHandle {
    pub position: Position,
    pub slot: u64,
}

/// Everything a host needs to render one toast.
///
/// Close, hover and action interactions are reported back to the manager by
/// id (see [`crate::notifications::Message`]).
#[derive(Debug, Clone, PartialEq)]
pub struct ToastProps {
    pub id: NotificationId,
    pub text: String,
    pub description: Option<String>,
    pub kind: Severity,
    pub size: Size,
    pub show_icon: bool,
    pub bordered: bool,
    pub rounded: bool,
    pub closable: bool,
    pub show_progress: bool,
    pub action_label: Option<String>,
    pub position: Position,
}

impl ToastProps {
    pub(crate) fn from_config(id: NotificationId, config: &NotificationConfig) -> Self {
        Self {
            id,
            text: config.text.clone(),
            description: config.description.clone(),
            kind: config.kind,
            size: config.size,
            show_icon: config.show_icon,
            bordered: config.bordered,
            rounded: config.rounded,
            closable: config.closable,
            show_progress: config.shows_progress(),
            action_label: config.action.as_ref().map(|action| action.label.clone()),
            position: config.position,
        }
    }
}

/// Live state pushed to a mounted view whenever it changes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewState {
    pub phase: Phase,
    /// Remaining fraction of the countdown in `[0, 1]`, when a progress bar is shown.
    pub progress: Option<f32>,
}

/// Mount/unmount capability of the rendering host.
pub trait ViewRegistry {
    /// Mounts a view for `props` into `slot`.
    fn mount(&mut self, slot: SlotHandle, props: ToastProps) -> Result<ViewHandle, HostError>;

    /// Destroys a view. The manager calls this at most once per handle.
    fn unmount(&mut self, view: ViewHandle) -> Result<(), HostError>;

    /// Receives phase and progress updates for a mounted view.
    fn refresh(&mut self, _view: ViewHandle, _state: ViewState) {}
}

/// When an exit animation is over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationCompletion {
    /// Nothing to wait for; unmount right away.
    Immediate,
    /// Wait for the standard exit window.
    Standard,
    /// Wait for a driver-specific duration.
    After(Duration),
}

/// Exit and reflow choreography, kept apart from the lifecycle logic.
pub trait AnimationDriver {
    /// Starts the exit animation of `view`.
    fn animate_out(&mut self, view: ViewHandle, direction: ExitDirection) -> AnimationCompletion;

    /// Lays out `slots` (in visual order) after an insertion or removal.
    fn reflow(&mut self, _position: Position, _slots: &[SlotHandle]) {}
}

/// Driver for hosts without animations: every exit waits the standard window.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoAnimation;

impl AnimationDriver for NoAnimation {
    fn animate_out(&mut self, _view: ViewHandle, _direction: ExitDirection) -> AnimationCompletion {
        AnimationCompletion::Standard
    }
}

/// Source of the current time.
pub trait Clock {
    fn now(&self) -> Instant;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// A clock that only moves when told to. Clones share the same time.
///
/// ```
/// use iced_toasts::notifications::{Clock, ManualClock};
/// use std::time::Duration;
///
/// let clock = ManualClock::new();
/// let start = clock.now();
/// clock.advance(Duration::from_millis(250));
/// assert_eq!(clock.now() - start, Duration::from_millis(250));
/// ```
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Rc<Cell<Instant>>,
}

impl ManualClock {
    #[must_use]
    pub fn new() -> Self {
        Self {
            now: Rc::new(Cell::new(Instant::now())),
        }
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.now.get()
    }
}
