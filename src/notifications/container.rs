// SPDX-License-Identifier: MPL-2.0
//! Position containers and their slot sequences.
//!
//! One container exists per [`Position`], created lazily on first use and
//! kept for the manager's lifetime. Slots are stored in insertion order,
//! which is also the eviction order; the on-screen order is derived from the
//! anchor's [`Stacking`] direction.

use super::host::SlotHandle;
use super::notification::NotificationId;
use super::position::Position;
use std::collections::{BTreeMap, VecDeque};

/// Where new toasts enter the visual stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stacking {
    /// New toasts appear below existing ones.
    Append,
    /// New toasts appear above existing ones.
    Prepend,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HorizontalAnchor {
    Start,
    Center,
    End,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerticalAnchor {
    Top,
    Bottom,
}

/// Anchor-specific layout policy of a container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    pub stacking: Stacking,
    pub horizontal: HorizontalAnchor,
    pub vertical: VerticalAnchor,
}

impl Layout {
    #[must_use]
    pub fn for_position(position: Position) -> Self {
        let (stacking, vertical) = if position.is_top() {
            (Stacking::Append, VerticalAnchor::Top)
        } else {
            (Stacking::Prepend, VerticalAnchor::Bottom)
        };
        let horizontal = match position {
            Position::TopLeft | Position::BottomLeft => HorizontalAnchor::Start,
            Position::Top | Position::Bottom => HorizontalAnchor::Center,
            Position::TopRight | Position::BottomRight => HorizontalAnchor::End,
        };
        Self {
            stacking,
            horizontal,
            vertical,
        }
    }
}

/// A slot bound to exactly one notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slot {
    pub handle: SlotHandle,
    pub item: NotificationId,
    exiting: bool,
}

impl Slot {
    #[must_use]
    pub fn is_exiting(&self) -> bool {
        self.exiting
    }
}

#[derive(Debug)]
pub struct Container {
    position: Position,
    layout: Layout,
    /// Insertion order, oldest first.
    slots: VecDeque<Slot>,
    next_slot: u64,
}

impl Container {
    fn new(position: Position) -> Self {
        Self {
            position,
            layout: Layout::for_position(position),
            slots: VecDeque::new(),
            next_slot: 0,
        }
    }

    #[must_use]
    pub fn position(&self) -> Position {
        self.position
    }

    #[must_use]
    pub fn layout(&self) -> Layout {
        self.layout
    }

    /// The handle the next inserted slot will carry.
    #[must_use]
    pub fn next_handle(&self) -> SlotHandle {
        SlotHandle {
            position: self.position,
            slot: self.next_slot,
        }
    }

    /// Binds `item` to `handle`, which must come from [`Container::next_handle`].
    pub(crate) fn insert(&mut self, handle: SlotHandle, item: NotificationId) {
        debug_assert_eq!(handle, self.next_handle());
        self.next_slot = handle.slot + 1;
        self.slots.push_back(Slot {
            handle,
            item,
            exiting: false,
        });
    }

    /// Flags the item's slot as leaving; it no longer counts as live.
    pub(crate) fn mark_exiting(&mut self, item: NotificationId) -> bool {
        match self.slots.iter_mut().find(|slot| slot.item == item) {
            Some(slot) if !slot.exiting => {
                slot.exiting = true;
                true
            }
            _ => false,
        }
    }

    pub(crate) fn remove(&mut self, item: NotificationId) -> Option<Slot> {
        let index = self.slots.iter().position(|slot| slot.item == item)?;
        self.slots.remove(index)
    }

    /// Number of slots, including ones still animating out.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Number of slots whose notification has not been dismissed.
    #[must_use]
    pub fn live_count(&self) -> usize {
        self.slots.iter().filter(|slot| !slot.exiting).count()
    }

    /// The `n` oldest live items by insertion order, independent of stacking.
    pub fn oldest_live(&self, n: usize) -> impl Iterator<Item = NotificationId> + '_ {
        self.slots
            .iter()
            .filter(|slot| !slot.exiting)
            .take(n)
            .map(|slot| slot.item)
    }

    /// Live item ids in insertion order.
    pub fn live_items(&self) -> impl Iterator<Item = NotificationId> + '_ {
        self.oldest_live(usize::MAX)
    }

    /// Slot handles in on-screen order, top of the screen first.
    #[must_use]
    pub fn visual_order(&self) -> Vec<SlotHandle> {
        match self.layout.stacking {
            Stacking::Append => self.slots.iter().map(|slot| slot.handle).collect(),
            Stacking::Prepend => self.slots.iter().rev().map(|slot| slot.handle).collect(),
        }
    }
}

/// Registry of every container, keyed by anchor.
#[derive(Debug, Default)]
pub struct Containers {
    map: BTreeMap<Position, Container>,
}

impl Containers {
    /// Returns the container for `position`, creating it on first use.
    pub fn get_or_create(&mut self, position: Position) -> &mut Container {
        self.map.entry(position).or_insert_with(|| {
            tracing::debug!("creating notification container at {position}");
            Container::new(position)
        })
    }

    /// The handle the next slot at `position` will carry, without creating
    /// the container.
    #[must_use]
    pub fn next_handle(&self, position: Position) -> SlotHandle {
        self.get(position).map_or(
            SlotHandle { position, slot: 0 },
            Container::next_handle,
        )
    }

    #[must_use]
    pub fn get(&self, position: Position) -> Option<&Container> {
        self.map.get(&position)
    }

    pub(crate) fn get_mut(&mut self, position: Position) -> Option<&mut Container> {
        self.map.get_mut(&position)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Container> {
        self.map.values()
    }

    /// Live slots in one container, or across all of them.
    #[must_use]
    pub fn live_count(&self, position: Option<Position>) -> usize {
        match position {
            Some(position) => self.get(position).map_or(0, Container::live_count),
            None => self.map.values().map(Container::live_count).sum(),
        }
    }
}
