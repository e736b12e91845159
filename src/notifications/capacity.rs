// SPDX-License-Identifier: MPL-2.0
//! Per-container max-count enforcement.

use super::container::Container;
use super::notification::{MaxCount, NotificationId};
use std::time::Duration;

/// One item selected for eviction, and how long to wait before animating it out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Eviction {
    pub id: NotificationId,
    pub delay: Duration,
}

/// Selects the oldest live items to evict so one more fits under `max_count`.
///
/// Called right before an insertion. Victims are returned oldest first, with
/// exit animations staggered by `stagger` so they don't visually collide.
pub(crate) fn enforce(container: &Container, max_count: MaxCount, stagger: Duration) -> Vec<Eviction> {
    let live = container.live_count();
    let max = max_count.value();
    if live < max {
        return Vec::new();
    }

    let excess = live - max + 1;
    container
        .oldest_live(excess)
        .zip(0u32..)
        .map(|(id, index)| Eviction {
            id,
            delay: stagger * index,
        })
        .collect()
}
