// SPDX-License-Identifier: MPL-2.0
//! Notification lifecycle management.
//!
//! The [`NotificationManager`] owns all notification state: containers, the
//! admission queue, the id → item map and the timer wheel. Every public
//! method completes its mutations before returning, and none of them fail:
//! problems degrade to no-ops and `tracing` warnings.
//!
//! Time only advances through [`NotificationManager::tick`], which the
//! rendering host calls periodically (see [`crate::ui::subscription`]).

use super::capacity;
use super::container::Containers;
use super::host::{
    AnimationCompletion, AnimationDriver, Clock, NoAnimation, SystemClock, ToastProps,
    ViewRegistry,
};
use super::lifecycle::{NotificationItem, Phase};
use super::notification::{Callback, NotificationConfig, NotificationId, NotifyOptions, Severity};
use super::position::Position;
use super::queue::AdmissionQueue;
use super::timer::{TimerEvent, TimerWheel};
use crate::config::defaults::{
    DISPLAY_DELAY_MS, EVICTION_STAGGER_MS, EXIT_ANIMATION_MS, QUEUE_INTERVAL_MS,
};
use crate::config::NotificationDefaults;
use crate::error::HostError;
use std::collections::BTreeMap;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// Messages for notification state changes, emitted by the rendering host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    /// Advance timers and redraw progress.
    Tick,
    /// Dismiss a specific notification by ID.
    Dismiss(NotificationId),
    /// The user pressed the close control.
    CloseRequested(NotificationId),
    PointerEntered(NotificationId),
    PointerLeft(NotificationId),
    ActionPressed(NotificationId),
}

/// Timing policy applied by the manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timings {
    pub display_delay: Duration,
    pub exit_animation: Duration,
    pub eviction_stagger: Duration,
    pub queue_interval: Duration,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            display_delay: Duration::from_millis(DISPLAY_DELAY_MS),
            exit_animation: Duration::from_millis(EXIT_ANIMATION_MS),
            eviction_stagger: Duration::from_millis(EVICTION_STAGGER_MS),
            queue_interval: Duration::from_millis(QUEUE_INTERVAL_MS),
        }
    }
}

/// A caller hook that fires once the manager is done mutating.
#[derive(Debug)]
pub(crate) struct PendingCallback {
    callback: Callback,
    id: NotificationId,
}

impl PendingCallback {
    pub(crate) fn run(self) {
        self.callback.call(self.id);
    }
}

/// Owns every notification and drives their lifecycle.
pub struct NotificationManager {
    defaults: NotificationDefaults,
    timings: Timings,
    containers: Containers,
    items: BTreeMap<NotificationId, NotificationItem>,
    queue: AdmissionQueue,
    timers: TimerWheel,
    next_id: u64,
    registry: Option<Box<dyn ViewRegistry>>,
    animation: Box<dyn AnimationDriver>,
    clock: Box<dyn Clock>,
    pending_callbacks: Vec<PendingCallback>,
    /// When set, callbacks wait for `take_pending_callbacks` instead of
    /// running at the end of each call.
    defer_callbacks: bool,
}

impl std::fmt::Debug for NotificationManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotificationManager")
            .field("defaults", &self.defaults)
            .field("containers", &self.containers)
            .field("items", &self.items.len())
            .field("queued", &self.queue.len())
            .field("timers", &self.timers.len())
            .field("has_host", &self.registry.is_some())
            .finish_non_exhaustive()
    }
}

impl Default for NotificationManager {
    fn default() -> Self {
        Self::new()
    }
}

impl NotificationManager {
    /// Creates a manager with no rendering host and the system clock.
    ///
    /// Until a host is attached, `notify` hands out ids without showing anything.
    #[must_use]
    pub fn new() -> Self {
        Self {
            defaults: NotificationDefaults::default(),
            timings: Timings::default(),
            containers: Containers::default(),
            items: BTreeMap::new(),
            queue: AdmissionQueue::default(),
            timers: TimerWheel::default(),
            next_id: 1,
            registry: None,
            animation: Box::new(NoAnimation),
            clock: Box::new(SystemClock),
            pending_callbacks: Vec::new(),
            defer_callbacks: false,
        }
    }

    #[must_use]
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    #[must_use]
    pub fn with_host(
        mut self,
        registry: impl ViewRegistry + 'static,
        animation: impl AnimationDriver + 'static,
    ) -> Self {
        self.attach_host(registry, animation);
        self
    }

    #[must_use]
    pub fn with_defaults(mut self, defaults: NotificationDefaults) -> Self {
        self.defaults = defaults;
        self
    }

    #[must_use]
    pub fn with_timings(mut self, timings: Timings) -> Self {
        self.timings = timings;
        self
    }

    pub(crate) fn deferring_callbacks(mut self) -> Self {
        self.defer_callbacks = true;
        self
    }

    /// Attaches the rendering host. Replaces any previous one.
    pub fn attach_host(
        &mut self,
        registry: impl ViewRegistry + 'static,
        animation: impl AnimationDriver + 'static,
    ) {
        self.registry = Some(Box::new(registry));
        self.animation = Box::new(animation);
    }

    /// Detaches the rendering host. Views still mounted are not unmounted.
    pub fn detach_host(&mut self) -> Option<Box<dyn ViewRegistry>> {
        self.animation = Box::new(NoAnimation);
        self.registry.take()
    }

    #[must_use]
    pub fn has_host(&self) -> bool {
        self.registry.is_some()
    }

    // ------------------------------------------------------------------
    // Public notification API
    // ------------------------------------------------------------------

    /// Submits a notification and returns its id.
    ///
    /// High-priority notifications are mounted before this returns. Others
    /// go through the admission queue; their id is predicted from the queue
    /// length and is only guaranteed to match once admission completes (a
    /// high-priority notification admitted in between shifts it).
    pub fn notify(&mut self, options: impl Into<NotifyOptions>) -> NotificationId {
        let options = options.into();
        let now = self.clock.now();
        self.settle(now);
        let config = NotificationConfig::resolve(options, &self.defaults);

        if self.registry.is_none() {
            let id = self.allocate_id();
            warn!("notification {id} not shown: {}", HostError::Unavailable);
            return id;
        }

        let id = if config.priority.bypasses_queue() {
            self.create(config, now)
        } else {
            self.enqueue(config, now)
        };
        self.flush_callbacks();
        id
    }

    pub fn success(&mut self, options: impl Into<NotifyOptions>) -> NotificationId {
        self.notify_with_kind(Severity::Success, options.into())
    }

    pub fn error(&mut self, options: impl Into<NotifyOptions>) -> NotificationId {
        self.notify_with_kind(Severity::Error, options.into())
    }

    pub fn info(&mut self, options: impl Into<NotifyOptions>) -> NotificationId {
        self.notify_with_kind(Severity::Info, options.into())
    }

    pub fn warning(&mut self, options: impl Into<NotifyOptions>) -> NotificationId {
        self.notify_with_kind(Severity::Warning, options.into())
    }

    fn notify_with_kind(&mut self, kind: Severity, options: NotifyOptions) -> NotificationId {
        self.notify(options.kind(kind))
    }

    /// Starts dismissing a notification. Unknown or already dismissed ids are ignored.
    pub fn dismiss(&mut self, id: NotificationId) {
        let now = self.clock.now();
        self.settle(now);
        if !self.begin_dismiss(id, now, Duration::ZERO) {
            debug!("dismiss({id}) ignored: unknown or already dismissed");
        }
        self.flush_callbacks();
    }

    /// Dismisses every live notification in one container, or in all of them.
    pub fn dismiss_all(&mut self, position: Option<Position>) {
        let now = self.clock.now();
        self.settle(now);
        let ids: Vec<NotificationId> = self
            .containers
            .iter()
            .filter(|container| position.is_none_or(|p| container.position() == p))
            .flat_map(|container| container.live_items())
            .collect();
        for id in ids {
            self.begin_dismiss(id, now, Duration::ZERO);
        }
        self.flush_callbacks();
    }

    /// Live notifications in one container, or across all containers.
    ///
    /// Notifications already animating out are not counted.
    #[must_use]
    pub fn count(&self, position: Option<Position>) -> usize {
        self.containers.live_count(position)
    }

    /// Updates the process defaults; only notifications created afterwards see the change.
    pub fn configure(&mut self, options: impl Into<NotifyOptions>) {
        self.defaults.apply(&options.into());
    }

    #[must_use]
    pub fn defaults(&self) -> &NotificationDefaults {
        &self.defaults
    }

    // ------------------------------------------------------------------
    // Host events
    // ------------------------------------------------------------------

    /// Handles a notification message.
    pub fn update(&mut self, message: Message) {
        match message {
            Message::Tick => self.tick(),
            Message::Dismiss(id) | Message::CloseRequested(id) => self.dismiss(id),
            Message::PointerEntered(id) => self.pointer_entered(id),
            Message::PointerLeft(id) => self.pointer_left(id),
            Message::ActionPressed(id) => self.action_pressed(id),
        }
    }

    /// Fires every timer due by now, then redraws progress.
    pub fn tick(&mut self) {
        let now = self.clock.now();
        self.settle(now);
        self.refresh_progress(now);
        self.flush_callbacks();
    }

    /// Pauses the countdown of a hovered notification.
    ///
    /// Timers already due fire first, so an expired notification is not frozen.
    pub fn pointer_entered(&mut self, id: NotificationId) {
        let now = self.clock.now();
        self.settle(now);
        if let Some(item) = self.items.get_mut(&id) {
            if item.pointer_entered(now, &mut self.timers) {
                debug!("notification {id} paused");
                self.refresh_view(id, now);
            }
        }
        self.flush_callbacks();
    }

    pub fn pointer_left(&mut self, id: NotificationId) {
        let now = self.clock.now();
        self.settle(now);
        if let Some(item) = self.items.get_mut(&id) {
            if item.pointer_left(now, &mut self.timers) {
                debug!("notification {id} resumed");
                self.refresh_view(id, now);
            }
        }
        self.flush_callbacks();
    }

    /// The user clicked the close control.
    pub fn close_requested(&mut self, id: NotificationId) {
        self.dismiss(id);
    }

    /// Runs the notification's action callback, then dismisses it.
    pub fn action_pressed(&mut self, id: NotificationId) {
        let now = self.clock.now();
        self.settle(now);
        let action = self
            .items
            .get(&id)
            .filter(|item| item.phase().is_live())
            .map(|item| item.config().action.clone());
        match action {
            Some(action) => {
                if let Some(action) = action {
                    self.pending_callbacks.push(PendingCallback {
                        callback: action.callback,
                        id,
                    });
                }
                self.dismiss(id);
            }
            None => self.flush_callbacks(),
        }
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    #[must_use]
    pub fn phase(&self, id: NotificationId) -> Option<Phase> {
        self.items.get(&id).map(NotificationItem::phase)
    }

    /// Returns whether `id` is mounted and not yet dismissed.
    #[must_use]
    pub fn is_live(&self, id: NotificationId) -> bool {
        self.phase(id).is_some_and(Phase::is_live)
    }

    /// Remaining countdown fraction in `[0, 1]` for notifications showing a progress bar.
    #[must_use]
    pub fn progress(&self, id: NotificationId) -> Option<f32> {
        let now = self.clock.now();
        self.items.get(&id).and_then(|item| item.progress(now))
    }

    /// Remaining countdown, or `None` when the notification does not auto-dismiss.
    #[must_use]
    pub fn remaining(&self, id: NotificationId) -> Option<Duration> {
        let now = self.clock.now();
        self.items.get(&id).and_then(|item| item.remaining(now))
    }

    #[must_use]
    pub fn queued_count(&self) -> usize {
        self.queue.len()
    }

    /// Returns whether any timer is pending, i.e. whether the host should keep ticking.
    #[must_use]
    pub fn has_pending_work(&self) -> bool {
        !self.timers.is_empty()
    }

    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.timers.next_deadline()
    }

    #[must_use]
    pub fn containers(&self) -> &Containers {
        &self.containers
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    fn allocate_id(&mut self) -> NotificationId {
        let id = NotificationId::from_raw(self.next_id);
        self.next_id += 1;
        id
    }

    /// Fires every timer due by `now`, in deadline order.
    fn settle(&mut self, now: Instant) {
        while let Some((at, event)) = self.timers.pop_due(now) {
            self.fire(event, at);
        }
    }

    fn enqueue(&mut self, config: NotificationConfig, now: Instant) -> NotificationId {
        let predicted = NotificationId::from_raw(self.next_id + self.queue.len() as u64);
        if self.queue.enqueue(config) {
            self.drain_step(now);
        }
        predicted
    }

    fn drain_step(&mut self, now: Instant) {
        if let Some(config) = self.queue.next() {
            self.create(config, now);
            self.timers
                .schedule(now + self.timings.queue_interval, TimerEvent::DrainQueue);
        }
    }

    /// Admits one notification: mount, evict, insert, arm.
    fn create(&mut self, config: NotificationConfig, now: Instant) -> NotificationId {
        let id = self.allocate_id();
        let Some(registry) = self.registry.as_mut() else {
            warn!("notification {id} dropped: {}", HostError::Unavailable);
            return id;
        };

        let position = config.position;
        let slot = self.containers.next_handle(position);
        let view = match registry.mount(slot, ToastProps::from_config(id, &config)) {
            Ok(view) => view,
            Err(err) => {
                warn!("failed to mount notification {id}: {err}");
                return id;
            }
        };

        let evictions = capacity::enforce(
            self.containers.get_or_create(position),
            config.max_count,
            self.timings.eviction_stagger,
        );
        for eviction in evictions {
            debug!("evicting notification {} from {position}", eviction.id);
            self.begin_dismiss(eviction.id, now, eviction.delay);
        }

        self.containers.get_or_create(position).insert(slot, id);
        let mut item = NotificationItem::new(id, config, slot, view);
        item.arm(now, self.timings.display_delay, &mut self.timers);
        self.items.insert(id, item);
        debug!("notification {id} mounted at {position}");

        self.refresh_view(id, now);
        self.reflow(position);
        id
    }

    /// `live -> Exiting`. The exit animation starts after `delay`.
    ///
    /// Returns `false` for unknown ids and items already leaving.
    fn begin_dismiss(&mut self, id: NotificationId, now: Instant, delay: Duration) -> bool {
        let Some(item) = self.items.get_mut(&id) else {
            return false;
        };
        if !item.begin_exit(now, &mut self.timers) {
            return false;
        }
        if let Some(container) = self.containers.get_mut(item.position()) {
            container.mark_exiting(id);
        }

        if delay.is_zero() {
            self.start_exit_animation(id, now);
        } else {
            let handle = self.timers.schedule(now + delay, TimerEvent::BeginExit(id));
            item.set_phase_timer(Some(handle));
        }
        true
    }

    fn start_exit_animation(&mut self, id: NotificationId, now: Instant) {
        let Some((view, position)) = self
            .items
            .get(&id)
            .map(|item| (item.view(), item.position()))
        else {
            return;
        };
        let completion = match view {
            Some(view) => {
                self.refresh_view(id, now);
                self.animation.animate_out(view, position.exit_direction())
            }
            None => AnimationCompletion::Immediate,
        };

        let window = match completion {
            AnimationCompletion::Immediate => {
                self.finalize(id);
                return;
            }
            AnimationCompletion::Standard => self.timings.exit_animation,
            AnimationCompletion::After(window) => window,
        };
        let handle = self.timers.schedule(now + window, TimerEvent::ExitComplete(id));
        if let Some(item) = self.items.get_mut(&id) {
            item.set_phase_timer(Some(handle));
        }
    }

    /// `Exiting -> Removed`: unmount, free the slot, purge, queue `on_close`.
    fn finalize(&mut self, id: NotificationId) {
        let Some(mut item) = self.items.remove(&id) else {
            return;
        };
        item.mark_removed(&mut self.timers);
        let position = item.position();

        if let Some(view) = item.take_view() {
            match self.registry.as_mut() {
                Some(registry) => {
                    if let Err(err) = registry.unmount(view) {
                        warn!("failed to unmount notification {id}: {err}");
                    }
                }
                None => warn!("rendering host detached, view of notification {id} not unmounted"),
            }
        }

        if let Some(container) = self.containers.get_mut(position) {
            container.remove(id);
        }
        self.reflow(position);
        debug!("notification {id} removed");

        if let Some(callback) = item.config().on_close.clone() {
            self.pending_callbacks.push(PendingCallback { callback, id });
        }
    }

    fn fire(&mut self, event: TimerEvent, at: Instant) {
        match event {
            TimerEvent::Reveal(id) => {
                if let Some(item) = self.items.get_mut(&id) {
                    if item.reveal(at, &mut self.timers) {
                        self.refresh_view(id, at);
                    }
                }
            }
            TimerEvent::AutoDismiss(id) => {
                if let Some(item) = self.items.get_mut(&id) {
                    item.dismiss_timer_fired();
                    debug!("notification {id} expired");
                    self.begin_dismiss(id, at, Duration::ZERO);
                }
            }
            TimerEvent::BeginExit(id) => {
                if let Some(item) = self.items.get_mut(&id) {
                    item.set_phase_timer(None);
                    self.start_exit_animation(id, at);
                }
            }
            TimerEvent::ExitComplete(id) => self.finalize(id),
            TimerEvent::DrainQueue => self.drain_step(at),
        }
    }

    fn refresh_view(&mut self, id: NotificationId, now: Instant) {
        let (Some(registry), Some(item)) = (self.registry.as_mut(), self.items.get(&id)) else {
            return;
        };
        if let Some(view) = item.view() {
            registry.refresh(view, item.view_state(now));
        }
    }

    fn refresh_progress(&mut self, now: Instant) {
        let Some(registry) = self.registry.as_mut() else {
            return;
        };
        for item in self.items.values() {
            if item.is_counting_down() && item.config().shows_progress() {
                if let Some(view) = item.view() {
                    registry.refresh(view, item.view_state(now));
                }
            }
        }
    }

    fn reflow(&mut self, position: Position) {
        if let Some(container) = self.containers.get(position) {
            self.animation.reflow(position, &container.visual_order());
        }
    }

    fn flush_callbacks(&mut self) {
        if self.defer_callbacks {
            return;
        }
        for pending in std::mem::take(&mut self.pending_callbacks) {
            pending.run();
        }
    }

    pub(crate) fn take_pending_callbacks(&mut self) -> Vec<PendingCallback> {
        std::mem::take(&mut self.pending_callbacks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notifications::host::{ManualClock, SlotHandle, ViewHandle, ViewState};
    use crate::notifications::{ExitDirection, Priority};
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Debug, Default)]
    struct Recorded {
        mounted: Vec<(SlotHandle, ToastProps)>,
        unmounted: Vec<ViewHandle>,
        refreshed: Vec<(ViewHandle, ViewState)>,
    }

    #[derive(Clone, Default)]
    struct Recorder(Rc<RefCell<Recorded>>);

    impl ViewRegistry for Recorder {
        fn mount(&mut self, slot: SlotHandle, props: ToastProps) -> Result<ViewHandle, HostError> {
            let mut state = self.0.borrow_mut();
            state.mounted.push((slot, props));
            Ok(ViewHandle(state.mounted.len() as u64))
        }

        fn unmount(&mut self, view: ViewHandle) -> Result<(), HostError> {
            self.0.borrow_mut().unmounted.push(view);
            Ok(())
        }

        fn refresh(&mut self, view: ViewHandle, state: ViewState) {
            self.0.borrow_mut().refreshed.push((view, state));
        }
    }

    fn manager() -> (NotificationManager, ManualClock, Recorder) {
        let clock = ManualClock::new();
        let recorder = Recorder::default();
        let manager = NotificationManager::new()
            .with_clock(clock.clone())
            .with_host(recorder.clone(), NoAnimation);
        (manager, clock, recorder)
    }

    fn advance(manager: &mut NotificationManager, clock: &ManualClock, ms: u64) {
        clock.advance(Duration::from_millis(ms));
        manager.tick();
    }

    #[test]
    fn new_manager_is_empty() {
        let manager = NotificationManager::new();
        assert_eq!(manager.count(None), 0);
        assert_eq!(manager.queued_count(), 0);
        assert!(!manager.has_pending_work());
        assert!(!manager.has_host());
    }

    #[test]
    fn ids_are_strictly_increasing() {
        let (mut manager, _clock, _recorder) = manager();
        let ids: Vec<_> = (0..5)
            .map(|i| {
                manager.notify(NotifyOptions::text(format!("n{i}")).priority(Priority::High))
            })
            .collect();
        assert!(ids.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn first_queued_notification_mounts_immediately() {
        let (mut manager, _clock, recorder) = manager();
        let id = manager.notify("hello");

        assert!(manager.is_live(id));
        assert_eq!(manager.phase(id), Some(Phase::Pending));
        assert_eq!(recorder.0.borrow().mounted.len(), 1);
    }

    #[test]
    fn burst_is_spread_over_queue_interval() {
        let (mut manager, clock, recorder) = manager();
        let a = manager.notify("a");
        let b = manager.notify("b");

        assert_eq!(recorder.0.borrow().mounted.len(), 1);
        assert_eq!(manager.queued_count(), 1);
        assert!(!manager.is_live(b));

        advance(&mut manager, &clock, QUEUE_INTERVAL_MS);
        let mounted: Vec<_> = recorder
            .0
            .borrow()
            .mounted
            .iter()
            .map(|(_, props)| props.id)
            .collect();
        assert_eq!(mounted, vec![a, b]);
    }

    #[test]
    fn high_priority_mounts_ahead_of_queued_notifications() {
        let (mut manager, clock, recorder) = manager();
        let mounted_texts = |recorder: &Recorder| -> Vec<String> {
            recorder
                .0
                .borrow()
                .mounted
                .iter()
                .map(|(_, props)| props.text.clone())
                .collect()
        };

        let a = manager.notify("a");
        let predicted_b = manager.notify("b");
        let c = manager.notify(NotifyOptions::text("c").priority(Priority::High));
        assert_eq!(mounted_texts(&recorder), vec!["a", "c"]);
        assert_eq!(manager.queued_count(), 1);

        advance(&mut manager, &clock, QUEUE_INTERVAL_MS);
        assert_eq!(mounted_texts(&recorder), vec!["a", "c", "b"]);

        // The high-priority admission took the id predicted for "b".
        let actual_b = recorder.0.borrow().mounted[2].1.id;
        assert_eq!(a, NotificationId::from_raw(1));
        assert_eq!(predicted_b, NotificationId::from_raw(2));
        assert_eq!(c, predicted_b);
        assert_eq!(actual_b, NotificationId::from_raw(3));
        assert!(manager.is_live(actual_b));
    }

    #[test]
    fn hover_after_missed_deadline_does_not_freeze_expired_item() {
        let (mut manager, clock, _recorder) = manager();
        let id = manager.notify(
            NotifyOptions::text("x")
                .duration_ms(1000)
                .pause_on_hover(true)
                .priority(Priority::High),
        );
        advance(&mut manager, &clock, 100);

        // The deadline passes with no tick before the pointer arrives.
        clock.advance(Duration::from_millis(910));
        manager.pointer_entered(id);
        assert!(!manager.is_live(id));
        assert_eq!(manager.phase(id), Some(Phase::Exiting));

        advance(&mut manager, &clock, 60_000);
        assert_eq!(manager.phase(id), None);
    }

    #[test]
    fn host_events_fire_overdue_timers_first() {
        let (mut manager, clock, recorder) = manager();
        let closed = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&closed);
        let id = manager.notify(
            NotifyOptions::text("x")
                .duration_ms(500)
                .on_close(move |id| sink.borrow_mut().push(id)),
        );

        clock.advance(Duration::from_millis(500 + EXIT_ANIMATION_MS));
        manager.pointer_left(id);

        assert_eq!(manager.phase(id), None);
        assert_eq!(recorder.0.borrow().unmounted.len(), 1);
        assert_eq!(*closed.borrow(), vec![id]);
    }

    #[test]
    fn reveal_follows_display_delay() {
        let (mut manager, clock, _recorder) = manager();
        let id = manager.notify("hello");
        advance(&mut manager, &clock, DISPLAY_DELAY_MS);
        assert_eq!(manager.phase(id), Some(Phase::Visible));
    }

    #[test]
    fn dismiss_twice_unmounts_once_and_fires_on_close_once() {
        let (mut manager, clock, recorder) = manager();
        let closed = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&closed);
        let id = manager
            .notify(NotifyOptions::text("x").on_close(move |id| sink.borrow_mut().push(id)));

        manager.dismiss(id);
        manager.dismiss(id);
        assert_eq!(manager.phase(id), Some(Phase::Exiting));
        assert_eq!(manager.count(None), 0);

        advance(&mut manager, &clock, EXIT_ANIMATION_MS);
        manager.dismiss(id);
        advance(&mut manager, &clock, EXIT_ANIMATION_MS);

        assert_eq!(manager.phase(id), None);
        assert_eq!(recorder.0.borrow().unmounted.len(), 1);
        assert_eq!(*closed.borrow(), vec![id]);
    }

    #[test]
    fn dismiss_unknown_id_is_a_no_op() {
        let (mut manager, _clock, recorder) = manager();
        manager.dismiss(NotificationId::from_raw(999));
        assert!(recorder.0.borrow().unmounted.is_empty());
    }

    #[test]
    fn missing_host_returns_id_without_state() {
        let mut manager = NotificationManager::new();
        let first = manager.notify("headless");
        let second = manager.notify("headless");

        assert!(first < second);
        assert_eq!(manager.count(None), 0);
        assert_eq!(manager.containers().iter().count(), 0);
        assert!(!manager.has_pending_work());
    }

    #[test]
    fn mount_failure_leaves_no_slot() {
        struct Refusing;
        impl ViewRegistry for Refusing {
            fn mount(&mut self, _: SlotHandle, _: ToastProps) -> Result<ViewHandle, HostError> {
                Err(HostError::MountFailed("detached".into()))
            }
            fn unmount(&mut self, _: ViewHandle) -> Result<(), HostError> {
                Ok(())
            }
        }

        let mut manager = NotificationManager::new()
            .with_clock(ManualClock::new())
            .with_host(Refusing, NoAnimation);
        let id = manager.notify(NotifyOptions::text("x").priority(Priority::High));

        assert!(!manager.is_live(id));
        assert_eq!(manager.count(None), 0);
        assert!(manager.containers().get(Position::TopRight).is_none());
        assert_eq!(manager.containers().iter().count(), 0);
        assert!(!manager.has_pending_work());
    }

    #[test]
    fn failed_mount_does_not_consume_a_slot() {
        struct FailOnce(Rc<RefCell<Vec<SlotHandle>>>);
        impl ViewRegistry for FailOnce {
            fn mount(&mut self, slot: SlotHandle, _: ToastProps) -> Result<ViewHandle, HostError> {
                let mut seen = self.0.borrow_mut();
                seen.push(slot);
                if seen.len() == 1 {
                    return Err(HostError::MountFailed("not ready".into()));
                }
                Ok(ViewHandle(seen.len() as u64))
            }
            fn unmount(&mut self, _: ViewHandle) -> Result<(), HostError> {
                Ok(())
            }
        }

        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut manager = NotificationManager::new()
            .with_clock(ManualClock::new())
            .with_host(FailOnce(Rc::clone(&seen)), NoAnimation);
        let high = Priority::High;
        let failed = manager.notify(NotifyOptions::text("x").priority(high));
        let shown = manager.notify(NotifyOptions::text("y").priority(high));

        assert!(!manager.is_live(failed));
        assert!(manager.is_live(shown));
        let slots: Vec<u64> = seen.borrow().iter().map(|handle| handle.slot).collect();
        assert_eq!(slots, vec![0, 0]);
        assert_eq!(
            manager.containers().get(Position::TopRight).map(|c| c.len()),
            Some(1)
        );
    }

    #[test]
    fn unmount_failure_still_purges_state() {
        struct Flaky(Rc<RefCell<u64>>);
        impl ViewRegistry for Flaky {
            fn mount(&mut self, _: SlotHandle, _: ToastProps) -> Result<ViewHandle, HostError> {
                *self.0.borrow_mut() += 1;
                Ok(ViewHandle(*self.0.borrow()))
            }
            fn unmount(&mut self, _: ViewHandle) -> Result<(), HostError> {
                Err(HostError::UnmountFailed("already detached".into()))
            }
        }

        let clock = ManualClock::new();
        let mut manager = NotificationManager::new()
            .with_clock(clock.clone())
            .with_host(Flaky(Rc::default()), NoAnimation);
        let id = manager.notify("x");
        manager.dismiss(id);
        advance(&mut manager, &clock, EXIT_ANIMATION_MS);

        assert_eq!(manager.phase(id), None);
        assert_eq!(
            manager.containers().get(Position::TopRight).map(|c| c.len()),
            Some(0)
        );
    }

    #[test]
    fn configure_only_affects_later_notifications() {
        let (mut manager, _clock, recorder) = manager();
        let high = Priority::High;
        manager.notify(NotifyOptions::text("before").priority(high));
        manager.configure(NotifyOptions::default().position(Position::BottomLeft));
        manager.notify(NotifyOptions::text("after").priority(high));

        let positions: Vec<_> = recorder
            .0
            .borrow()
            .mounted
            .iter()
            .map(|(slot, _)| slot.position)
            .collect();
        assert_eq!(positions, vec![Position::TopRight, Position::BottomLeft]);
        assert_eq!(manager.count(Some(Position::TopRight)), 1);
    }

    #[test]
    fn severity_sugar_sets_kind() {
        let (mut manager, _clock, recorder) = manager();
        let high = Priority::High;
        manager.success(NotifyOptions::text("ok").priority(high));
        manager.error(NotifyOptions::text("bad").priority(high));
        manager.warning(NotifyOptions::text("hmm").priority(high));
        manager.info(NotifyOptions::text("fyi").priority(high));

        let kinds: Vec<_> = recorder
            .0
            .borrow()
            .mounted
            .iter()
            .map(|(_, props)| props.kind)
            .collect();
        assert_eq!(
            kinds,
            vec![Severity::Success, Severity::Error, Severity::Warning, Severity::Info]
        );
    }

    #[test]
    fn action_runs_callback_and_dismisses() {
        let (mut manager, _clock, _recorder) = manager();
        let pressed = Rc::new(RefCell::new(None));
        let sink = Rc::clone(&pressed);
        let id = manager.notify(NotifyOptions::text("deleted").action("Undo", move |id| {
            *sink.borrow_mut() = Some(id);
        }));

        manager.update(Message::ActionPressed(id));
        manager.update(Message::ActionPressed(id));
        assert_eq!(*pressed.borrow(), Some(id));
        assert_eq!(manager.phase(id), Some(Phase::Exiting));
    }

    #[test]
    fn driver_completion_controls_exit_window() {
        struct Quick;
        impl AnimationDriver for Quick {
            fn animate_out(&mut self, _: ViewHandle, _: ExitDirection) -> AnimationCompletion {
                AnimationCompletion::Immediate
            }
        }

        let recorder = Recorder::default();
        let mut manager = NotificationManager::new()
            .with_clock(ManualClock::new())
            .with_host(recorder.clone(), Quick);
        let id = manager.notify("x");
        manager.dismiss(id);

        assert_eq!(manager.phase(id), None);
        assert_eq!(recorder.0.borrow().unmounted.len(), 1);
    }

    #[test]
    fn progress_freezes_while_paused() {
        let (mut manager, clock, _recorder) = manager();
        let id = manager.notify(
            NotifyOptions::text("x")
                .duration_ms(1000)
                .show_progress(true)
                .pause_on_hover(true),
        );
        advance(&mut manager, &clock, 500);
        manager.pointer_entered(id);
        let frozen = manager.progress(id).expect("progress shown");
        advance(&mut manager, &clock, 300);

        assert_eq!(manager.progress(id), Some(frozen));
        approx::assert_abs_diff_eq!(frozen, 0.5, epsilon = 1e-6);
    }
}
