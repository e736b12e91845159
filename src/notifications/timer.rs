// SPDX-License-Identifier: MPL-2.0
//! Deadline-ordered timers driven by the manager's `tick`.

use super::notification::NotificationId;
use std::collections::BTreeMap;
use std::time::Instant;

/// Handle of a scheduled timer, used to cancel it.
///
/// Ordered by deadline, then by scheduling order for equal deadlines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub(crate) struct TimerHandle {
    deadline: Instant,
    seq: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TimerEvent {
    /// Display delay elapsed: `Pending -> Visible`.
    Reveal(NotificationId),
    /// Countdown elapsed.
    AutoDismiss(NotificationId),
    /// Staggered eviction reached its turn to animate out.
    BeginExit(NotificationId),
    /// Exit animation window is over: unmount and purge.
    ExitComplete(NotificationId),
    /// Admit the next queued notification.
    DrainQueue,
}

#[derive(Debug, Default)]
pub(crate) struct TimerWheel {
    next_seq: u64,
    entries: BTreeMap<TimerHandle, TimerEvent>,
}

impl TimerWheel {
    pub(crate) fn schedule(&mut self, deadline: Instant, event: TimerEvent) -> TimerHandle {
        let handle = TimerHandle {
            deadline,
            seq: self.next_seq,
        };
        self.next_seq += 1;
        self.entries.insert(handle, event);
        handle
    }

    /// Returns `true` if the timer was still pending.
    pub(crate) fn cancel(&mut self, handle: TimerHandle) -> bool {
        self.entries.remove(&handle).is_some()
    }

    /// Pops the earliest timer due at or before `now`, with its deadline.
    pub(crate) fn pop_due(&mut self, now: Instant) -> Option<(Instant, TimerEvent)> {
        let (handle, _) = self.entries.first_key_value()?;
        if handle.deadline > now {
            return None;
        }
        self.entries
            .pop_first()
            .map(|(handle, event)| (handle.deadline, event))
    }

    pub(crate) fn next_deadline(&self) -> Option<Instant> {
        self.entries.keys().next().map(|handle| handle.deadline)
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
