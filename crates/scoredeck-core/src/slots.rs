//! Counter slots: the ordered set of named tallies for one station.
//!
//! A slot is one trackable named counter. The set holds `target_len`
//! slots for the configured occupancy and supports resize, rotation, and
//! per-slot edits. Reserved ("empty") slots are structurally present but
//! excluded from edits; their markers travel with the slot under
//! rotation.

use serde::{Deserialize, Serialize};

/// Highest supported occupancy (the station has four physical seats).
pub const MAX_OCCUPANCY: u32 = 4;

/// Clamp a raw occupancy value into the supported `[1, 4]` range.
pub fn clamp_occupancy(raw: u32) -> u32 {
    raw.clamp(1, MAX_OCCUPANCY)
}

/// Number of slots the set holds for a given occupancy.
///
/// The three-seat layout keeps a fourth, permanently reserved slot so the
/// physical 4-slot arrangement of the station is preserved. This is a
/// quirk of the station layout, not a general occupancy rule; it lives
/// here and nowhere else.
pub fn target_len(occupancy: u32) -> usize {
    if occupancy == 3 {
        4
    } else {
        clamp_occupancy(occupancy) as usize
    }
}

/// One trackable named counter.
///
/// A reserved slot (`is_empty`) always has `count == 0` and ignores
/// edits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    pub name: String,
    pub count: u32,
    #[serde(default)]
    pub is_empty: bool,
}

impl Slot {
    fn vacant() -> Self {
        Self {
            name: String::new(),
            count: 0,
            is_empty: false,
        }
    }

    fn reserved() -> Self {
        Self {
            name: String::new(),
            count: 0,
            is_empty: true,
        }
    }
}

/// Ordered sequence of counter slots, sized by [`target_len`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotSet {
    slots: Vec<Slot>,
}

impl SlotSet {
    pub fn new(occupancy: u32) -> Self {
        let mut set = Self { slots: Vec::new() };
        set.resize(occupancy);
        set
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Slot> {
        self.slots.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Slot> {
        self.slots.iter()
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Resize the set for a new occupancy.
    ///
    /// Names and counts carry over positionally up to the new length; new
    /// positions start vacant. When occupancy becomes 3, index 3 is
    /// forced to a reserved slot regardless of what was there.
    pub fn resize(&mut self, occupancy: u32) {
        let occupancy = clamp_occupancy(occupancy);
        self.slots.resize_with(target_len(occupancy), Slot::vacant);
        for slot in &mut self.slots {
            slot.is_empty = false;
        }
        if occupancy == 3 {
            self.slots[3] = Slot::reserved();
        }
    }

    /// Add one to a slot's tally. No-op on reserved or out-of-range slots.
    pub fn increment(&mut self, index: usize) -> bool {
        match self.slots.get_mut(index) {
            Some(slot) if !slot.is_empty => {
                slot.count = slot.count.saturating_add(1);
                true
            }
            _ => false,
        }
    }

    /// Subtract one from a slot's tally, never going below zero.
    pub fn decrement(&mut self, index: usize) -> bool {
        match self.slots.get_mut(index) {
            Some(slot) if !slot.is_empty && slot.count > 0 => {
                slot.count -= 1;
                true
            }
            _ => false,
        }
    }

    /// Rename a slot. No-op on reserved or out-of-range slots.
    pub fn rename(&mut self, index: usize, name: &str) -> bool {
        match self.slots.get_mut(index) {
            Some(slot) if !slot.is_empty => {
                slot.name = name.to_string();
                true
            }
            _ => false,
        }
    }

    /// Shift every slot one position toward the front; the first slot
    /// wraps to the end. No-op when there is nothing to rotate.
    pub fn rotate_left(&mut self) -> bool {
        if self.slots.len() < 2 {
            return false;
        }
        self.slots.rotate_left(1);
        true
    }

    /// Shift every slot one position toward the back; the last slot
    /// wraps to the front. No-op when there is nothing to rotate.
    pub fn rotate_right(&mut self) -> bool {
        if self.slots.len() < 2 {
            return false;
        }
        self.slots.rotate_right(1);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn target_len_reserves_fourth_slot_for_three() {
        assert_eq!(target_len(1), 1);
        assert_eq!(target_len(2), 2);
        assert_eq!(target_len(3), 4);
        assert_eq!(target_len(4), 4);
    }

    #[test]
    fn occupancy_clamps_into_range() {
        assert_eq!(clamp_occupancy(0), 1);
        assert_eq!(clamp_occupancy(9), 4);
        assert_eq!(target_len(0), 1);
        assert_eq!(target_len(99), 4);
    }

    #[test]
    fn resize_to_three_pins_reserved_slot() {
        let mut set = SlotSet::new(4);
        set.rename(3, "dana");
        set.increment(3);
        set.resize(3);
        assert_eq!(set.len(), 4);
        let reserved = set.get(3).unwrap();
        assert!(reserved.is_empty);
        assert_eq!(reserved.count, 0);
        assert_eq!(reserved.name, "");
    }

    #[test]
    fn resize_carries_slots_positionally() {
        let mut set = SlotSet::new(2);
        set.rename(0, "alice");
        set.increment(0);
        set.increment(1);
        set.resize(4);
        assert_eq!(set.len(), 4);
        assert_eq!(set.get(0).unwrap().name, "alice");
        assert_eq!(set.get(0).unwrap().count, 1);
        assert_eq!(set.get(1).unwrap().count, 1);
        assert_eq!(set.get(2).unwrap().count, 0);
        assert!(!set.get(3).unwrap().is_empty);
    }

    #[test]
    fn shrink_drops_trailing_slots() {
        let mut set = SlotSet::new(4);
        set.increment(3);
        set.resize(2);
        assert_eq!(set.len(), 2);
        set.resize(4);
        assert_eq!(set.get(3).unwrap().count, 0);
    }

    #[test]
    fn reserved_slot_ignores_edits() {
        let mut set = SlotSet::new(3);
        assert!(!set.increment(3));
        assert!(!set.decrement(3));
        assert!(!set.rename(3, "nobody"));
        assert_eq!(set.get(3).unwrap().count, 0);
    }

    #[test]
    fn decrement_saturates_at_zero() {
        let mut set = SlotSet::new(1);
        assert!(!set.decrement(0));
        assert_eq!(set.get(0).unwrap().count, 0);
        set.increment(0);
        assert!(set.decrement(0));
        assert!(!set.decrement(0));
    }

    #[test]
    fn out_of_range_index_is_noop() {
        let mut set = SlotSet::new(2);
        assert!(!set.increment(2));
        assert!(!set.rename(9, "ghost"));
    }

    #[test]
    fn rotation_moves_reserved_marker_with_its_slot() {
        let mut set = SlotSet::new(3);
        set.rename(0, "alice");
        set.increment(0);
        assert!(set.rotate_right());
        // The reserved slot moved from index 3 to index 0.
        assert!(set.get(0).unwrap().is_empty);
        assert_eq!(set.get(1).unwrap().name, "alice");
        assert_eq!(set.get(1).unwrap().count, 1);
    }

    #[test]
    fn rotation_noop_for_single_slot() {
        let mut set = SlotSet::new(1);
        set.rename(0, "solo");
        assert!(!set.rotate_left());
        assert!(!set.rotate_right());
        assert_eq!(set.get(0).unwrap().name, "solo");
    }

    #[test]
    fn resize_to_same_occupancy_keeps_data() {
        let mut set = SlotSet::new(1);
        set.increment(0);
        set.resize(1);
        assert_eq!(set.len(), 1);
        assert_eq!(set.get(0).unwrap().count, 1);
    }

    proptest! {
        /// Counts track a saturating model under any edit sequence, so a
        /// decrement can never wrap below zero.
        #[test]
        fn counts_follow_saturating_model(
            ops in prop::collection::vec((0usize..4, any::<bool>()), 0..64)
        ) {
            let mut set = SlotSet::new(4);
            let mut model = [0u32; 4];
            for (index, up) in ops {
                if up {
                    set.increment(index);
                    model[index] = model[index].saturating_add(1);
                } else {
                    set.decrement(index);
                    model[index] = model[index].saturating_sub(1);
                }
            }
            for (index, expected) in model.iter().enumerate() {
                prop_assert_eq!(set.get(index).unwrap().count, *expected);
            }
        }

        /// A left rotation followed by a right rotation (and vice versa)
        /// restores the original sequence.
        #[test]
        fn rotation_is_a_bijection(
            occupancy in 1u32..=4,
            counts in prop::collection::vec(0u32..100, 4),
            left_first in any::<bool>(),
        ) {
            let mut set = SlotSet::new(occupancy);
            for (index, count) in counts.iter().enumerate().take(set.len()) {
                for _ in 0..*count {
                    set.increment(index);
                }
            }
            let before = set.clone();
            if left_first {
                set.rotate_left();
                set.rotate_right();
            } else {
                set.rotate_right();
                set.rotate_left();
            }
            prop_assert_eq!(set, before);
        }
    }
}
