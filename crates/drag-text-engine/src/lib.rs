pub mod exercise;
pub mod models;
pub mod parsing;
pub mod report;

// Re-export key types for easier usage
pub use exercise::{
    AssignmentModel, Behaviour, Buttons, DragTextExercise, ExerciseError, Feedback,
    InvalidStateError, Params, Phase, Placement, ScoreResult,
};
pub use models::{DraggableToken, DroppableSlot};
pub use parsing::{AnswerSpec, InvalidSpecError, TextSegment};
pub use report::{QuestionDefinition, ResponseReport, Score};
