// SPDX-License-Identifier: MPL-2.0
//! FIFO admission queue for normal- and low-priority notifications.
//!
//! Bursts of `notify` calls are spread out: the head entry is admitted as
//! soon as the queue goes from idle to busy, later entries one per queue
//! interval. A single `draining` flag keeps drain steps from overlapping.

use super::notification::NotificationConfig;
use std::collections::VecDeque;

#[derive(Debug, Default)]
pub(crate) struct AdmissionQueue {
    pending: VecDeque<NotificationConfig>,
    draining: bool,
}

impl AdmissionQueue {
    /// Queues `config`. Returns `true` if the queue was idle and the caller
    /// must run a drain step now.
    pub(crate) fn enqueue(&mut self, config: NotificationConfig) -> bool {
        self.pending.push_back(config);
        if self.draining {
            false
        } else {
            self.draining = true;
            true
        }
    }

    /// Takes the next entry to admit. When the queue is empty the drain loop
    /// stops and the next `enqueue` restarts it.
    pub(crate) fn next(&mut self) -> Option<NotificationConfig> {
        let next = self.pending.pop_front();
        if next.is_none() {
            self.draining = false;
        }
        next
    }

    #[cfg(test)]
    pub(crate) fn is_draining(&self) -> bool {
        self.draining
    }

    pub(crate) fn len(&self) -> usize {
        self.pending.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::NotificationDefaults;
    use crate::notifications::NotifyOptions;

    fn config(text: &str) -> NotificationConfig {
        NotificationConfig::resolve(NotifyOptions::text(text), &NotificationDefaults::default())
    }

    #[test]
    fn only_the_first_enqueue_kicks_a_drain() {
        let mut queue = AdmissionQueue::default();
        assert!(queue.enqueue(config("a")));
        assert!(!queue.enqueue(config("b")));
        assert!(queue.is_draining());
        assert_eq!(queue.len(), 2);
    }

    #[test]
    fn drains_in_fifo_order_then_goes_idle() {
        let mut queue = AdmissionQueue::default();
        queue.enqueue(config("a"));
        queue.enqueue(config("b"));

        assert_eq!(queue.next().map(|c| c.text), Some("a".to_string()));
        assert_eq!(queue.next().map(|c| c.text), Some("b".to_string()));
        assert!(queue.is_draining());
        assert!(queue.next().is_none());
        assert!(!queue.is_draining());

        assert!(queue.enqueue(config("c")));
    }
}
