use std::sync::LazyLock;

use rand::seq::SliceRandom;
use regex::Regex;

use crate::exercise::assignment::{AssignmentModel, InvalidStateError, Placement};
use crate::exercise::params::Params;
use crate::exercise::scoring::{self, ScoreResult};
use crate::models::{DraggableToken, DroppableSlot};
use crate::parsing::{self, InvalidSpecError, TextSegment};
use crate::report::{self, QuestionDefinition, ResponseReport};

/// Matches the host's line-break convention in the raw cloze text.
static LINE_BREAKS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\r\n|\n|\r").unwrap()
});

/// Raised during exercise construction; all later operations are total.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExerciseError {
    #[error(transparent)]
    InvalidSpec(#[from] InvalidSpecError),
    #[error(transparent)]
    InvalidState(#[from] InvalidStateError),
}

/// Where the exercise is in its lifecycle.
///
/// `SolutionShown` is terminal for the session: once the solutions are
/// revealed, no mutation (including retry) is accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Unanswered,
    InProgress,
    Evaluated,
    SolutionShown,
}

/// The evaluation feedback the host should render, with the score template
/// already substituted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feedback {
    pub text: String,
    pub score: usize,
    pub max_score: usize,
}

/// Which of the host's buttons should currently be visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Buttons {
    pub check_answer: bool,
    pub try_again: bool,
    pub show_solution: bool,
}

/// The drag-text exercise controller.
///
/// Owns the parsed segments, the token and slot lists and the assignment
/// model for the lifetime of one exercise instance. The presentation layer
/// drives it through explicit commands ([`place`](Self::place),
/// [`clear`](Self::clear), [`evaluate`](Self::evaluate),
/// [`retry`](Self::retry), [`show_solution`](Self::show_solution)) and reads
/// state back through queries; the controller never reaches into
/// presentation state.
#[derive(Debug, Clone)]
pub struct DragTextExercise {
    params: Params,
    segments: Vec<TextSegment>,
    tokens: Vec<DraggableToken>,
    slots: Vec<DroppableSlot>,
    model: AssignmentModel,
    /// Display order of the available pool; shuffled at construction and on
    /// retry.
    pool: Vec<usize>,
    phase: Phase,
    /// Sticky for the session: stays true after clears, reset by retry.
    answered: bool,
    feedback: Option<Feedback>,
    buttons: Buttons,
    pending_resize: bool,
}

impl DragTextExercise {
    /// Builds a fresh exercise from host configuration.
    pub fn new(params: Params) -> Result<Self, ExerciseError> {
        let html = LINE_BREAKS.replace_all(&params.text_field, "<br/>");
        let segments = parsing::parse(&html)?;

        let mut tokens = vec![];
        let mut slots = vec![];
        for segment in &segments {
            if let TextSegment::Blank { index, spec } = segment {
                tokens.push(DraggableToken::new(*index, spec.primary()));
                slots.push(DroppableSlot::new(*index, spec.clone()));
            }
        }

        let model = AssignmentModel::new(tokens.len(), slots.len());
        let mut pool: Vec<usize> = (0..tokens.len()).collect();
        pool.shuffle(&mut rand::rng());

        let buttons = Buttons {
            check_answer: !params.behaviour.instant_feedback,
            ..Buttons::default()
        };

        Ok(Self {
            params,
            segments,
            tokens,
            slots,
            model,
            pool,
            phase: Phase::Unanswered,
            answered: false,
            feedback: None,
            buttons,
            pending_resize: true,
        })
    }

    /// Builds an exercise and resumes it from persisted placement state.
    ///
    /// Invalid indices abort construction; a resumed session with at least
    /// one placement counts as answered. In instant-feedback mode a fully
    /// filled restore is evaluated immediately, exactly as if the user had
    /// just dropped the last token.
    pub fn with_previous_state(
        params: Params,
        state: &[Placement],
    ) -> Result<Self, ExerciseError> {
        let mut exercise = Self::new(params)?;
        exercise.model.restore(state)?;
        if !state.is_empty() {
            exercise.answered = true;
            exercise.phase = Phase::InProgress;
        }
        if exercise.params.behaviour.instant_feedback && exercise.model.all_filled() {
            exercise.evaluate();
        }
        Ok(exercise)
    }

    // ---- commands -------------------------------------------------------

    /// Drops `draggable` into `slot`, returning the evicted occupant (which
    /// goes back to the pool). Marks the session answered. Refused once
    /// interaction is disabled.
    pub fn place(&mut self, draggable: usize, slot: usize) -> Option<usize> {
        if self.interaction_disabled() {
            return None;
        }
        let evicted = self.model.place(draggable, slot);
        self.answered = true;
        if self.phase == Phase::Unanswered {
            self.phase = Phase::InProgress;
        }
        self.pending_resize = true;
        if self.params.behaviour.instant_feedback {
            self.refresh_instant_feedback();
        }
        evicted
    }

    /// Returns `draggable` to the pool from whichever slot holds it.
    pub fn clear(&mut self, draggable: usize) {
        if self.interaction_disabled() {
            return;
        }
        if self.model.clear(draggable).is_none() {
            return;
        }
        self.pending_resize = true;
        if self.params.behaviour.instant_feedback {
            self.refresh_instant_feedback();
        }
    }

    /// Scores the current assignments and shows feedback.
    ///
    /// Full score hides every button and locks the exercise; a partial
    /// score swaps the check button for retry/show-solution as configured.
    pub fn evaluate(&mut self) -> ScoreResult {
        let result = scoring::score(&self.model, &self.tokens, &self.slots);
        if self.phase == Phase::SolutionShown {
            // Terminal state: report but leave the display untouched.
            return result;
        }

        let text = self
            .params
            .score
            .replace("@score", &result.correct().to_string())
            .replace("@total", &result.max().to_string());
        self.feedback = Some(Feedback {
            text,
            score: result.correct(),
            max_score: result.max(),
        });
        self.answered = true;
        self.phase = Phase::Evaluated;

        if result.is_full_score() {
            self.buttons = Buttons::default();
        } else {
            self.buttons.check_answer = false;
            self.buttons.try_again = self.params.behaviour.enable_retry;
            self.buttons.show_solution = self.params.behaviour.enable_solutions_button;
        }
        self.pending_resize = true;
        result
    }

    /// Starts over: empties every slot, reshuffles the pool and clears the
    /// answered flag and feedback.
    ///
    /// Accepted from `Evaluated`, or from `InProgress` in instant-feedback
    /// mode where evaluation is implicit. No-op elsewhere.
    pub fn retry(&mut self) {
        if self.interaction_disabled() {
            return;
        }
        let implicit_evaluation =
            self.params.behaviour.instant_feedback && self.phase == Phase::InProgress;
        if self.phase != Phase::Evaluated && !implicit_evaluation {
            return;
        }
        self.start_over();
    }

    /// Reveals the solutions. Accepted from `Evaluated` only; the
    /// assignments are left untouched and the exercise becomes terminal.
    pub fn show_solution(&mut self) {
        if self.phase != Phase::Evaluated {
            return;
        }
        self.phase = Phase::SolutionShown;
        self.buttons = Buttons::default();
        self.pending_resize = true;
    }

    /// Host contract: unconditionally returns the exercise to its pristine
    /// state, whatever phase it is in.
    pub fn reset(&mut self) {
        self.start_over();
    }

    fn start_over(&mut self) {
        self.model.reset();
        self.pool.shuffle(&mut rand::rng());
        self.answered = false;
        self.feedback = None;
        self.phase = Phase::Unanswered;
        self.buttons = Buttons {
            check_answer: !self.params.behaviour.instant_feedback,
            ..Buttons::default()
        };
        self.pending_resize = true;
    }

    /// Re-derives evaluation state after a mutation in instant-feedback
    /// mode: all filled evaluates silently, a new gap hides the feedback
    /// again.
    fn refresh_instant_feedback(&mut self) {
        if self.model.all_filled() {
            self.evaluate();
        } else {
            self.feedback = None;
            self.buttons.try_again = false;
            self.buttons.show_solution = false;
            if self.phase == Phase::Evaluated {
                self.phase = Phase::InProgress;
            }
            self.pending_resize = true;
        }
    }

    // ---- queries --------------------------------------------------------

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Whether an answer was given this session. Sticky across clears;
    /// only retry or reset lowers it.
    pub fn answer_given(&self) -> bool {
        self.answered
    }

    /// The current evaluation feedback, if evaluation is showing.
    pub fn feedback(&self) -> Option<&Feedback> {
        self.feedback.as_ref()
    }

    pub fn buttons(&self) -> Buttons {
        self.buttons
    }

    /// True once the presentation layer must deactivate the interactive
    /// elements: the exercise was completed with full score, or the
    /// solutions were revealed.
    pub fn interaction_disabled(&self) -> bool {
        match self.phase {
            Phase::SolutionShown => true,
            Phase::Evaluated => self
                .feedback
                .as_ref()
                .is_some_and(|f| f.score == f.max_score),
            _ => false,
        }
    }

    /// Drains the resize signal: true when a layout-affecting mutation
    /// happened since the last call.
    pub fn take_pending_resize(&mut self) -> bool {
        std::mem::take(&mut self.pending_resize)
    }

    /// Token ids still in the available pool, in shuffled display order.
    pub fn pool(&self) -> Vec<usize> {
        self.pool
            .iter()
            .copied()
            .filter(|&token| self.model.slot_of(token).is_none())
            .collect()
    }

    pub fn tokens(&self) -> &[DraggableToken] {
        &self.tokens
    }

    pub fn slots(&self) -> &[DroppableSlot] {
        &self.slots
    }

    pub fn segments(&self) -> &[TextSegment] {
        &self.segments
    }

    pub fn params(&self) -> &Params {
        &self.params
    }

    pub fn assignments(&self) -> &AssignmentModel {
        &self.model
    }

    /// The persisted/resumable representation of the current placements.
    pub fn current_state(&self) -> Vec<Placement> {
        self.model.serialize()
    }

    /// Freshly computed score, independent of whether evaluation is showing.
    pub fn get_score(&self) -> usize {
        scoring::score(&self.model, &self.tokens, &self.slots).correct()
    }

    pub fn max_score(&self) -> usize {
        self.slots.len()
    }

    // ---- reports --------------------------------------------------------

    /// The question-definition record for the host's analytics contract.
    pub fn question_definition(&self) -> QuestionDefinition {
        report::question_definition(&self.params.task_description, &self.segments)
    }

    /// The response record: current per-slot answers plus the score triple.
    pub fn response_report(&self) -> ResponseReport {
        report::response_report(&self.model, &self.tokens, &self.slots)
    }
}
