// SPDX-License-Identifier: MPL-2.0
//! Per-notification lifecycle state machine.
//!
//! ```text
//! Pending -> Visible -> (Paused <-> Visible) -> Exiting -> Removed
//! ```
//!
//! The countdown is armed when the view is mounted. Pausing folds the elapsed
//! time into `remaining`, so the total active countdown always equals the
//! configured duration however many pause/resume cycles occur.

use super::host::{SlotHandle, ViewHandle, ViewState};
use super::notification::{NotificationConfig, NotificationId};
use super::position::Position;
use super::timer::{TimerEvent, TimerHandle, TimerWheel};
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Mounted, waiting out the display delay.
    Pending,
    Visible,
    /// Countdown frozen while hovered.
    Paused,
    /// Dismissed; exit animation in progress.
    Exiting,
    Removed,
}

impl Phase {
    /// Returns whether the item still occupies a live slot.
    #[must_use]
    pub fn is_live(self) -> bool {
        matches!(self, Phase::Pending | Phase::Visible | Phase::Paused)
    }
}

/// Auto-dismiss countdown that survives pause/resume cycles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Countdown {
    duration: Duration,
    remaining: Duration,
    /// Set while running.
    started_at: Option<Instant>,
}

impl Countdown {
    pub(crate) fn new(duration: Duration) -> Self {
        Self {
            duration,
            remaining: duration,
            started_at: None,
        }
    }

    /// Starts (or restarts) the countdown and returns its deadline.
    pub(crate) fn start(&mut self, now: Instant) -> Instant {
        self.started_at = Some(now);
        now + self.remaining
    }

    /// Freezes the countdown, folding elapsed time into `remaining`.
    pub(crate) fn pause(&mut self, now: Instant) {
        if let Some(started_at) = self.started_at.take() {
            let elapsed = now.saturating_duration_since(started_at);
            self.remaining = self.remaining.saturating_sub(elapsed);
        }
    }

    pub(crate) fn is_running(&self) -> bool {
        self.started_at.is_some()
    }

    pub(crate) fn remaining_at(&self, now: Instant) -> Duration {
        match self.started_at {
            Some(started_at) => self
                .remaining
                .saturating_sub(now.saturating_duration_since(started_at)),
            None => self.remaining,
        }
    }

    /// Remaining fraction, clamped to `[0, 1]`.
    pub(crate) fn fraction(&self, now: Instant) -> f32 {
        if self.duration.is_zero() {
            return 0.0;
        }
        let fraction = self.remaining_at(now).as_secs_f32() / self.duration.as_secs_f32();
        fraction.clamp(0.0, 1.0)
    }
}

/// One admitted notification and everything it exclusively owns.
#[derive(Debug)]
pub(crate) struct NotificationItem {
    id: NotificationId,
    config: NotificationConfig,
    slot: SlotHandle,
    view: Option<ViewHandle>,
    countdown: Option<Countdown>,
    /// The single auto-dismiss timer.
    dismiss_timer: Option<TimerHandle>,
    /// Reveal or exit-sequencing timer.
    phase_timer: Option<TimerHandle>,
    phase: Phase,
    hovered: bool,
}

impl NotificationItem {
    pub(crate) fn new(
        id: NotificationId,
        config: NotificationConfig,
        slot: SlotHandle,
        view: ViewHandle,
    ) -> Self {
        let countdown = config.auto_dismiss().map(Countdown::new);
        Self {
            id,
            config,
            slot,
            view: Some(view),
            countdown,
            dismiss_timer: None,
            phase_timer: None,
            phase: Phase::Pending,
            hovered: false,
        }
    }

    pub(crate) fn config(&self) -> &NotificationConfig {
        &self.config
    }

    pub(crate) fn position(&self) -> Position {
        self.slot.position
    }

    pub(crate) fn view(&self) -> Option<ViewHandle> {
        self.view
    }

    pub(crate) fn phase(&self) -> Phase {
        self.phase
    }

    /// Hands out the view handle; later calls return `None`.
    pub(crate) fn take_view(&mut self) -> Option<ViewHandle> {
        self.view.take()
    }

    /// Arms the countdown at mount time and schedules the reveal.
    pub(crate) fn arm(&mut self, now: Instant, display_delay: Duration, timers: &mut TimerWheel) {
        if let Some(countdown) = self.countdown.as_mut() {
            let deadline = countdown.start(now);
            self.dismiss_timer = Some(timers.schedule(deadline, TimerEvent::AutoDismiss(self.id)));
        }
        self.phase_timer = Some(timers.schedule(now + display_delay, TimerEvent::Reveal(self.id)));
    }

    /// `Pending -> Visible`. A pointer already resting on the toast pauses it at once.
    pub(crate) fn reveal(&mut self, now: Instant, timers: &mut TimerWheel) -> bool {
        self.phase_timer = None;
        if self.phase != Phase::Pending {
            return false;
        }
        self.phase = Phase::Visible;
        if self.hovered {
            self.pause(now, timers);
        }
        true
    }

    /// Records a pointer-enter; returns whether the countdown was frozen.
    pub(crate) fn pointer_entered(&mut self, now: Instant, timers: &mut TimerWheel) -> bool {
        self.hovered = true;
        self.phase == Phase::Visible && self.pause(now, timers)
    }

    /// Records a pointer-leave; returns whether the countdown was re-armed.
    pub(crate) fn pointer_left(&mut self, now: Instant, timers: &mut TimerWheel) -> bool {
        self.hovered = false;
        if self.phase != Phase::Paused {
            return false;
        }
        self.phase = Phase::Visible;
        if let Some(countdown) = self.countdown.as_mut() {
            let deadline = countdown.start(now);
            self.dismiss_timer = Some(timers.schedule(deadline, TimerEvent::AutoDismiss(self.id)));
        }
        true
    }

    fn pause(&mut self, now: Instant, timers: &mut TimerWheel) -> bool {
        if !self.config.pauses_on_hover() {
            return false;
        }
        let Some(countdown) = self.countdown.as_mut() else {
            return false;
        };
        countdown.pause(now);
        if let Some(handle) = self.dismiss_timer.take() {
            timers.cancel(handle);
        }
        self.phase = Phase::Paused;
        true
    }

    /// The auto-dismiss timer fired and is no longer pending.
    pub(crate) fn dismiss_timer_fired(&mut self) {
        self.dismiss_timer = None;
    }

    pub(crate) fn set_phase_timer(&mut self, handle: Option<TimerHandle>) {
        self.phase_timer = handle;
    }

    /// Moves a live item to `Exiting`, cancelling every pending timer.
    ///
    /// Returns `false` if the item was already leaving, so concurrent
    /// triggers collapse into a single transition.
    pub(crate) fn begin_exit(&mut self, now: Instant, timers: &mut TimerWheel) -> bool {
        if !self.phase.is_live() {
            return false;
        }
        if let Some(countdown) = self.countdown.as_mut() {
            countdown.pause(now);
        }
        for handle in [self.dismiss_timer.take(), self.phase_timer.take()]
            .into_iter()
            .flatten()
        {
            timers.cancel(handle);
        }
        self.phase = Phase::Exiting;
        true
    }

    pub(crate) fn mark_removed(&mut self, timers: &mut TimerWheel) {
        for handle in [self.dismiss_timer.take(), self.phase_timer.take()]
            .into_iter()
            .flatten()
        {
            timers.cancel(handle);
        }
        self.phase = Phase::Removed;
    }

    /// Remaining countdown fraction; frozen while paused and `None` when no bar is shown.
    pub(crate) fn progress(&self, now: Instant) -> Option<f32> {
        if !self.config.shows_progress() {
            return None;
        }
        self.countdown.as_ref().map(|countdown| countdown.fraction(now))
    }

    pub(crate) fn remaining(&self, now: Instant) -> Option<Duration> {
        self.countdown
            .as_ref()
            .map(|countdown| countdown.remaining_at(now))
    }

    pub(crate) fn is_counting_down(&self) -> bool {
        self.countdown.as_ref().is_some_and(Countdown::is_running)
    }

    #[cfg(test)]
    pub(crate) fn has_dismiss_timer(&self) -> bool {
        self.dismiss_timer.is_some()
    }

    pub(crate) fn view_state(&self, now: Instant) -> ViewState {
        ViewState {
            phase: self.phase,
            progress: self.progress(now),
        }
    }
}
