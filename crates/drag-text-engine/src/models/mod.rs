use crate::parsing::AnswerSpec;

/// The movable representation of one accepted answer.
///
/// One token exists per blank, created in parse order; `id` is the stable
/// index into that order and never changes, no matter where the token is
/// dragged. The display text is the blank's first alternative.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraggableToken {
    id: usize,
    text: String,
    short_text: String,
}

impl DraggableToken {
    /// Texts longer than this many characters get a truncated form for
    /// narrow layouts.
    pub const TRUNCATE_THRESHOLD: usize = 20;
    /// How many characters of the original survive truncation.
    pub const TRUNCATE_KEEP: usize = 17;

    pub fn new(id: usize, text: &str) -> Self {
        let short_text = if text.chars().count() > Self::TRUNCATE_THRESHOLD {
            let mut short: String = text.chars().take(Self::TRUNCATE_KEEP).collect();
            short.push_str("...");
            short
        } else {
            text.to_string()
        };
        Self {
            id,
            text: text.to_string(),
            short_text,
        }
    }

    /// Stable index into the original blank order.
    pub fn id(&self) -> usize {
        self.id
    }

    /// Full display text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Truncated display text for narrow layouts.
    pub fn short_text(&self) -> &str {
        &self.short_text
    }
}

/// The fixed position where exactly one draggable token may be placed.
///
/// Slot `id` equals the index of its originating blank, pairing it 1:1 with
/// the token of the same id as the default correct answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DroppableSlot {
    id: usize,
    spec: AnswerSpec,
}

impl DroppableSlot {
    pub fn new(id: usize, spec: AnswerSpec) -> Self {
        Self { id, spec }
    }

    pub fn id(&self) -> usize {
        self.id
    }

    /// The accepted answers and tip for this slot.
    pub fn spec(&self) -> &AnswerSpec {
        &self.spec
    }

    /// The canonical solution shown in reports and the solution view.
    pub fn solution_text(&self) -> &str {
        self.spec.primary()
    }
}
