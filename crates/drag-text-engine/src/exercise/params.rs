use serde::{Deserialize, Serialize};

/// Exercise configuration as supplied by the host.
///
/// Every field has a default, so a partial params document deserializes
/// cleanly. The wire shape is camelCase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Params {
    /// Introduction shown above the exercise.
    pub task_description: String,
    /// Raw cloze text; line breaks are literal newline sequences.
    pub text_field: String,
    /// Label for the check-answer button.
    pub check_answer: String,
    /// Label for the retry button.
    pub try_again: String,
    /// Label for the show-solution button.
    pub show_solution: String,
    /// Feedback template with `@score` and `@total` placeholders.
    pub score: String,
    pub behaviour: Behaviour,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Behaviour {
    /// Offer a retry button after evaluation.
    pub enable_retry: bool,
    /// Offer a show-solution button after evaluation.
    pub enable_solutions_button: bool,
    /// Evaluate automatically whenever all slots are filled, without an
    /// explicit check action.
    pub instant_feedback: bool,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            task_description: "Set in adjectives in the following sentence".to_string(),
            text_field: "This is a *nice*, *flexible* content type, which allows you to \
                         highlight all the *wonderful* words in this *exciting* sentence.\n\
                         This is another line of *fantastic* text."
                .to_string(),
            check_answer: "Check".to_string(),
            try_again: "Retry".to_string(),
            show_solution: "Show solution".to_string(),
            score: "You got @score of @total points".to_string(),
            behaviour: Behaviour::default(),
        }
    }
}

impl Default for Behaviour {
    fn default() -> Self {
        Self {
            enable_retry: true,
            enable_solutions_button: true,
            instant_feedback: false,
        }
    }
}
