//! Report payloads for the host's analytics contract.
//!
//! The host wraps these in its own statement envelope; this module only
//! produces the question definition, the response string and the score
//! triple, in the exact wire shape the reporting engine expects.

use serde::Serialize;

use crate::exercise::assignment::AssignmentModel;
use crate::models::{DraggableToken, DroppableSlot};
use crate::parsing::TextSegment;

/// Joins per-slot values in reports. Multi-character on purpose so it can
/// never collide with natural-language answer text.
pub const RESPONSE_SEPARATOR: &str = "[,]";
/// Stands in for each blank in the question description.
pub const BLANK_PLACEHOLDER: &str = "__________";
/// The reporting engine's interaction type for cloze exercises.
pub const INTERACTION_TYPE: &str = "fill-in";
/// Activity type URI for the question definition.
pub const ACTIVITY_TYPE: &str = "http://adlnet.gov/expapi/activities/cmi.interaction";

/// The question-definition record: what was asked and what counts as
/// correct.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionDefinition {
    pub interaction_type: &'static str,
    #[serde(rename = "type")]
    pub activity_type: &'static str,
    /// Task description plus the cloze text with every blank replaced by
    /// [`BLANK_PLACEHOLDER`].
    pub description: String,
    /// One entry: the canonical solutions in slot order, joined by
    /// [`RESPONSE_SEPARATOR`].
    pub correct_responses_pattern: Vec<String>,
}

/// The response record: what the user currently has in the slots.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResponseReport {
    /// Per-slot answer text in slot order, empty string for unfilled slots,
    /// joined by [`RESPONSE_SEPARATOR`].
    pub response: String,
    pub score: Score,
}

/// The numeric score triple.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Score {
    pub min: usize,
    pub raw: usize,
    pub max: usize,
    /// `raw / max` rounded to 4 decimal places; 0 when there are no slots.
    pub scaled: f64,
}

impl Score {
    pub fn new(raw: usize, max: usize) -> Self {
        let scaled = if max == 0 {
            0.0
        } else {
            (raw as f64 / max as f64 * 10_000.0).round() / 10_000.0
        };
        Self {
            min: 0,
            raw,
            max,
            scaled,
        }
    }
}

/// Builds the question definition from the parsed segments.
pub fn question_definition(
    task_description: &str,
    segments: &[TextSegment],
) -> QuestionDefinition {
    let mut blanked = String::new();
    let mut solutions = vec![];
    for segment in segments {
        match segment {
            TextSegment::Literal(text) => blanked.push_str(text),
            TextSegment::Blank { spec, .. } => {
                blanked.push_str(BLANK_PLACEHOLDER);
                solutions.push(spec.primary().to_string());
            }
        }
    }
    QuestionDefinition {
        interaction_type: INTERACTION_TYPE,
        activity_type: ACTIVITY_TYPE,
        description: format!("{task_description}<br/>{blanked}"),
        correct_responses_pattern: vec![solutions.join(RESPONSE_SEPARATOR)],
    }
}

/// Builds the response record from the current assignments.
pub fn response_report(
    model: &AssignmentModel,
    tokens: &[DraggableToken],
    slots: &[DroppableSlot],
) -> ResponseReport {
    let response = slots
        .iter()
        .map(|slot| {
            model
                .holder_of(slot.id())
                .map(|token| tokens[token].text())
                .unwrap_or("")
        })
        .collect::<Vec<_>>()
        .join(RESPONSE_SEPARATOR);
    let result = crate::exercise::scoring::score(model, tokens, slots);
    ResponseReport {
        response,
        score: Score::new(result.correct(), result.max()),
    }
}
