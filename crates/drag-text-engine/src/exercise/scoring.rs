use crate::exercise::assignment::AssignmentModel;
use crate::models::{DraggableToken, DroppableSlot};

/// The outcome of evaluating one assignment state against the answer key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreResult {
    per_slot: Vec<bool>,
    correct: usize,
}

impl ScoreResult {
    /// Per-slot correctness, indexed by slot id.
    pub fn per_slot(&self) -> &[bool] {
        &self.per_slot
    }

    pub fn correct(&self) -> usize {
        self.correct
    }

    /// One point per slot.
    pub fn max(&self) -> usize {
        self.per_slot.len()
    }

    pub fn is_full_score(&self) -> bool {
        self.correct == self.max()
    }
}

/// Scores the current assignments.
///
/// A slot is correct iff it is filled and the held token's text matches any
/// of the slot's alternatives; an empty slot is simply incorrect. Pure and
/// idempotent: re-evaluation never mutates the model.
pub fn score(
    model: &AssignmentModel,
    tokens: &[DraggableToken],
    slots: &[DroppableSlot],
) -> ScoreResult {
    let per_slot: Vec<bool> = slots
        .iter()
        .map(|slot| {
            model
                .holder_of(slot.id())
                .is_some_and(|token| slot.spec().matches(tokens[token].text()))
        })
        .collect();
    let correct = per_slot.iter().filter(|&&ok| ok).count();
    ScoreResult { per_slot, correct }
}
