use serde::{Deserialize, Serialize};

/// One persisted placement: draggable `draggable` sits in slot `droppable`.
///
/// This is the wire shape of resumable state. Indices are `usize`, so
/// non-numeric or negative values in stored state already fail at the serde
/// boundary before [`AssignmentModel::restore`] sees them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    pub draggable: usize,
    pub droppable: usize,
}

/// Raised when externally supplied prior state references tokens or slots
/// that don't exist. Fatal: exercise construction aborts rather than
/// resuming from a corrupt session.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidStateError {
    #[error("stored state references draggable {index}, but only {count} exist")]
    DraggableOutOfRange { index: usize, count: usize },
    #[error("stored state references droppable {index}, but only {count} exist")]
    DroppableOutOfRange { index: usize, count: usize },
}

/// Tracks which draggable token occupies which droppable slot.
///
/// Two invariants hold after every operation:
///
/// - a draggable occupies at most one slot at a time;
/// - there is exactly one entry per slot (possibly empty); slots are never
///   added or removed after construction.
///
/// Out-of-range ids passed to [`place`](Self::place) or
/// [`clear`](Self::clear) are programming errors, not recoverable runtime
/// errors; only [`restore`](Self::restore) validates, because its input
/// crosses a trust boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignmentModel {
    /// Indexed by slot id; `Some(token id)` when filled.
    slots: Vec<Option<usize>>,
    token_count: usize,
}

impl AssignmentModel {
    /// Creates an empty model for `token_count` draggables and `slot_count`
    /// slots. Drag-text exercises always pair them 1:1, but the model does
    /// not rely on that.
    pub fn new(token_count: usize, slot_count: usize) -> Self {
        Self {
            slots: vec![None; slot_count],
            token_count,
        }
    }

    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    pub fn token_count(&self) -> usize {
        self.token_count
    }

    /// Puts `draggable` into `slot`, first removing it from any slot it
    /// already occupies. Returns the previous occupant of `slot`, evicted
    /// back to the available pool.
    pub fn place(&mut self, draggable: usize, slot: usize) -> Option<usize> {
        debug_assert!(draggable < self.token_count);
        self.clear(draggable);
        self.slots[slot].replace(draggable)
    }

    /// Removes `draggable` from whichever slot holds it, returning that
    /// slot. No-op (`None`) when the draggable is in the pool.
    pub fn clear(&mut self, draggable: usize) -> Option<usize> {
        debug_assert!(draggable < self.token_count);
        for (slot, held) in self.slots.iter_mut().enumerate() {
            if *held == Some(draggable) {
                *held = None;
                return Some(slot);
            }
        }
        None
    }

    /// The draggable currently in `slot`, if any.
    pub fn holder_of(&self, slot: usize) -> Option<usize> {
        self.slots[slot]
    }

    /// The slot currently holding `draggable`, if any.
    pub fn slot_of(&self, draggable: usize) -> Option<usize> {
        self.slots.iter().position(|held| *held == Some(draggable))
    }

    pub fn is_filled(&self, slot: usize) -> bool {
        self.slots[slot].is_some()
    }

    /// True iff every slot holds a draggable.
    pub fn all_filled(&self) -> bool {
        self.slots.iter().all(Option::is_some)
    }

    /// Empties every slot.
    pub fn reset(&mut self) {
        self.slots.fill(None);
    }

    /// The persisted/resumable representation: one entry per filled slot,
    /// in slot-id order.
    pub fn serialize(&self) -> Vec<Placement> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(droppable, held)| {
                held.map(|draggable| Placement {
                    draggable,
                    droppable,
                })
            })
            .collect()
    }

    /// Applies externally supplied prior state.
    ///
    /// Every entry is range-checked before any is applied, so a bad entry
    /// leaves the model untouched. Valid entries are applied via
    /// [`place`](Self::place) in input order, so later entries win conflicts
    /// the same way live interaction would.
    pub fn restore(&mut self, entries: &[Placement]) -> Result<(), InvalidStateError> {
        for entry in entries {
            if entry.draggable >= self.token_count {
                return Err(InvalidStateError::DraggableOutOfRange {
                    index: entry.draggable,
                    count: self.token_count,
                });
            }
            if entry.droppable >= self.slots.len() {
                return Err(InvalidStateError::DroppableOutOfRange {
                    index: entry.droppable,
                    count: self.slots.len(),
                });
            }
        }
        for entry in entries {
            self.place(entry.draggable, entry.droppable);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn starts_empty() {
        let model = AssignmentModel::new(3, 3);
        assert!(!model.is_filled(0));
        assert!(!model.all_filled());
        assert_eq!(model.serialize(), vec![]);
    }

    #[test]
    fn place_fills_a_slot() {
        let mut model = AssignmentModel::new(3, 3);
        assert_eq!(model.place(1, 0), None);
        assert!(model.is_filled(0));
        assert_eq!(model.holder_of(0), Some(1));
        assert_eq!(model.slot_of(1), Some(0));
    }

    #[test]
    fn place_evicts_previous_occupant() {
        let mut model = AssignmentModel::new(3, 3);
        model.place(0, 2);
        let evicted = model.place(1, 2);
        assert_eq!(evicted, Some(0));
        assert_eq!(model.holder_of(2), Some(1));
        assert_eq!(model.slot_of(0), None);
    }

    #[test]
    fn moving_a_draggable_vacates_its_old_slot() {
        let mut model = AssignmentModel::new(3, 3);
        model.place(0, 1);
        model.place(0, 2);
        assert!(!model.is_filled(1));
        assert_eq!(model.holder_of(2), Some(0));
    }

    #[test]
    fn clear_removes_from_any_slot() {
        let mut model = AssignmentModel::new(3, 3);
        model.place(2, 1);
        assert_eq!(model.clear(2), Some(1));
        assert!(!model.is_filled(1));
        // Clearing again is a no-op.
        assert_eq!(model.clear(2), None);
    }

    #[test]
    fn no_draggable_in_two_slots_after_arbitrary_moves() {
        let mut model = AssignmentModel::new(4, 4);
        let moves = [(0, 0), (1, 1), (0, 1), (2, 0), (1, 3), (0, 0), (3, 1)];
        for (draggable, slot) in moves {
            model.place(draggable, slot);
            // Scan the whole map: each draggable appears at most once.
            for token in 0..4 {
                let occurrences = (0..4)
                    .filter(|&s| model.holder_of(s) == Some(token))
                    .count();
                assert!(occurrences <= 1, "draggable {token} in {occurrences} slots");
            }
        }
    }

    #[test]
    fn all_filled_requires_every_slot() {
        let mut model = AssignmentModel::new(2, 2);
        model.place(0, 0);
        assert!(!model.all_filled());
        model.place(1, 1);
        assert!(model.all_filled());
    }

    #[test]
    fn serialize_is_in_slot_order() {
        let mut model = AssignmentModel::new(3, 3);
        model.place(2, 1);
        model.place(0, 2);
        model.place(1, 0);
        assert_eq!(
            model.serialize(),
            vec![
                Placement {
                    draggable: 1,
                    droppable: 0
                },
                Placement {
                    draggable: 2,
                    droppable: 1
                },
                Placement {
                    draggable: 0,
                    droppable: 2
                },
            ]
        );
    }

    #[test]
    fn restore_round_trips_serialize() {
        let mut model = AssignmentModel::new(3, 3);
        model.place(2, 0);
        model.place(0, 2);
        let saved = model.serialize();

        let mut restored = AssignmentModel::new(3, 3);
        restored.restore(&saved).unwrap();
        assert_eq!(restored, model);
    }

    #[test]
    fn restore_rejects_out_of_range_draggable() {
        let mut model = AssignmentModel::new(3, 3);
        let err = model
            .restore(&[Placement {
                draggable: 5,
                droppable: 0,
            }])
            .unwrap_err();
        assert_eq!(
            err,
            InvalidStateError::DraggableOutOfRange { index: 5, count: 3 }
        );
    }

    #[test]
    fn restore_rejects_out_of_range_droppable() {
        let mut model = AssignmentModel::new(3, 3);
        let err = model
            .restore(&[Placement {
                draggable: 0,
                droppable: 3,
            }])
            .unwrap_err();
        assert_eq!(
            err,
            InvalidStateError::DroppableOutOfRange { index: 3, count: 3 }
        );
    }

    #[test]
    fn restore_is_all_or_nothing() {
        let mut model = AssignmentModel::new(3, 3);
        let entries = [
            Placement {
                draggable: 0,
                droppable: 0,
            },
            Placement {
                draggable: 9,
                droppable: 1,
            },
        ];
        assert!(model.restore(&entries).is_err());
        // The valid first entry was not applied either.
        assert!(!model.is_filled(0));
    }

    #[test]
    fn placement_deserialization_rejects_non_numeric_indices() {
        let bad = serde_json::from_str::<Placement>(r#"{"draggable":"x","droppable":0}"#);
        assert!(bad.is_err());
        let negative = serde_json::from_str::<Placement>(r#"{"draggable":-1,"droppable":0}"#);
        assert!(negative.is_err());
    }
}
