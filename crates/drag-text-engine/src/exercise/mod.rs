pub mod assignment;
pub mod controller;
pub mod params;
pub mod scoring;

pub use assignment::{AssignmentModel, InvalidStateError, Placement};
pub use controller::{Buttons, DragTextExercise, ExerciseError, Feedback, Phase};
pub use params::{Behaviour, Params};
pub use scoring::{ScoreResult, score};
