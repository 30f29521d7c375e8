//! Center-out priority ring.
//!
//! Items are kept in on-screen slot order (left to right). Rank 0 lives in
//! the center slot and ranks alternate right, left, right, ... outwards, so
//! `priority(rank)` is the item index shown at that distance from focus.
//! Scrolling rotates the ring by one slot, which relabels every rank while
//! touching a single element.

use std::collections::VecDeque;
use std::ops::Range;

/// Center slot for a ring of `len` items (left-biased for even lengths).
#[inline]
pub fn center_slot(len: usize) -> usize {
    match len {
        0 => 0,
        n if n % 2 == 0 => n / 2 - 1,
        n => n / 2,
    }
}

/// Slot holding `rank`, given the center slot. Odd ranks sit to the right of
/// center, even ranks to the left.
#[inline]
pub fn slot_for_rank(center: usize, rank: usize) -> usize {
    if rank % 2 == 1 {
        center + rank.div_ceil(2)
    } else {
        center - rank / 2
    }
}

/// Inverse of [`slot_for_rank`].
#[inline]
pub fn rank_for_slot(center: usize, slot: usize) -> usize {
    if slot > center {
        2 * (slot - center) - 1
    } else {
        2 * (center - slot)
    }
}

/// Slots given real positions for a window of `max_visible` ranks.
///
/// Walks outwards from the center alternating right then left until
/// `min(max_visible, len)` slots are covered.
pub fn visible_window(len: usize, max_visible: usize) -> Range<usize> {
    let count = max_visible.min(len);
    let center = center_slot(len);
    if count == 0 {
        return center..center;
    }
    let (mut left, mut right) = (center, center);
    for step in 1..count {
        if step % 2 == 1 {
            right += 1;
        } else {
            left -= 1;
        }
    }
    left..right + 1
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PriorityRing {
    slots: VecDeque<usize>,
}

impl PriorityRing {
    /// Identity ring: slot `i` holds item `i`, so the array-middle item is
    /// focused.
    pub fn new(len: usize) -> Self {
        Self {
            slots: (0..len).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn center_slot(&self) -> usize {
        center_slot(self.len())
    }

    /// Slot of `rank`, taken modulo the ring length.
    pub fn slot_of_rank(&self, rank: usize) -> Option<usize> {
        if self.is_empty() {
            return None;
        }
        Some(slot_for_rank(self.center_slot(), rank % self.len()))
    }

    pub fn rank_of_slot(&self, slot: usize) -> Option<usize> {
        (slot < self.len()).then(|| rank_for_slot(self.center_slot(), slot))
    }

    /// `priority[rank]`: the item index shown at `rank`.
    pub fn item_at_rank(&self, rank: usize) -> Option<usize> {
        self.slot_of_rank(rank)
            .and_then(|slot| self.slots.get(slot).copied())
    }

    pub fn item_at_slot(&self, slot: usize) -> Option<usize> {
        self.slots.get(slot).copied()
    }

    pub fn slot_of_item(&self, item: usize) -> Option<usize> {
        self.slots.iter().position(|&i| i == item)
    }

    pub fn rank_of_item(&self, item: usize) -> Option<usize> {
        self.slot_of_item(item)
            .and_then(|slot| self.rank_of_slot(slot))
    }

    /// Full rank-ordered permutation: `priority()[rank] == item index`.
    pub fn priority(&self) -> Vec<usize> {
        (0..self.len())
            .filter_map(|rank| self.item_at_rank(rank))
            .collect()
    }

    /// Items in on-screen slot order.
    pub fn slots(&self) -> impl Iterator<Item = usize> + '_ {
        self.slots.iter().copied()
    }

    /// The leftmost item leaves and re-enters at the right end.
    pub fn rotate_left(&mut self) {
        if self.len() > 1 {
            self.slots.rotate_left(1);
        }
    }

    /// The rightmost item leaves and re-enters at the left end.
    pub fn rotate_right(&mut self) {
        if self.len() > 1 {
            self.slots.rotate_right(1);
        }
    }
}
