//! End-to-end exercise scenarios through the public API.

use drag_text_engine::{
    Behaviour, DragTextExercise, ExerciseError, Params, Phase, Placement, TextSegment,
};
use pretty_assertions::assert_eq;

fn params(text: &str, instant: bool) -> Params {
    Params {
        task_description: "Fill in the words".to_string(),
        text_field: text.to_string(),
        behaviour: Behaviour {
            instant_feedback: instant,
            ..Default::default()
        },
        ..Default::default()
    }
}

#[test]
fn cat_feline_scenario() {
    let mut ex = DragTextExercise::new(params("The *cat/feline* sat.", false)).unwrap();

    // One blank with both alternatives.
    assert_eq!(ex.slots().len(), 1);
    assert_eq!(ex.slots()[0].spec().alternatives(), ["cat", "feline"]);

    // Unfilled slot reports as the empty string.
    assert_eq!(ex.response_report().response, "");

    // The paired token displays the first alternative and scores correct.
    assert_eq!(ex.tokens()[0].text(), "cat");
    ex.place(0, 0);
    assert!(ex.evaluate().is_full_score());
}

#[test]
fn a_token_matching_a_secondary_alternative_scores_correct() {
    // Two blanks whose specs overlap: the "feline" token belongs to the
    // second blank but also matches the first blank's alternatives.
    let mut ex =
        DragTextExercise::new(params("The *cat/feline* chased the *feline*.", false)).unwrap();
    assert_eq!(ex.tokens()[1].text(), "feline");
    ex.place(1, 0);
    let result = ex.evaluate();
    assert_eq!(result.per_slot(), [true, false]);
}

#[test]
fn a_wrong_token_scores_incorrect() {
    let mut ex = DragTextExercise::new(params("The *cat/feline* saw a *dog*.", false)).unwrap();
    ex.place(1, 0); // "dog" into the cat slot
    let result = ex.evaluate();
    assert_eq!(result.per_slot(), [false, false]);
    assert_eq!(result.correct(), 0);
    assert_eq!(ex.response_report().response, "dog[,]");
}

#[test]
fn instant_feedback_two_blank_scenario() {
    let mut ex = DragTextExercise::new(params("*sun* and *moon*", true)).unwrap();

    // Filling only one slot: still in progress, nothing evaluated.
    ex.place(0, 0);
    assert_eq!(ex.phase(), Phase::InProgress);
    assert!(ex.feedback().is_none());

    // Filling the second triggers automatic evaluation.
    ex.place(1, 1);
    assert_eq!(ex.phase(), Phase::Evaluated);
    assert_eq!(ex.feedback().unwrap().text, "You got 2 of 2 points");

    // Full score: the exercise is complete and locked.
    assert!(ex.interaction_disabled());
}

#[test]
fn instant_feedback_unevaluates_on_clear() {
    let mut ex = DragTextExercise::new(params("*sun* and *moon*", true)).unwrap();
    ex.place(0, 1);
    ex.place(1, 0);
    assert_eq!(ex.phase(), Phase::Evaluated);
    assert_eq!(ex.feedback().unwrap().score, 0);

    // Wrong answers don't lock, so a clear hides the evaluation again.
    ex.clear(0);
    assert_eq!(ex.phase(), Phase::InProgress);
    assert!(ex.feedback().is_none());
}

#[test]
fn state_round_trips_through_json() {
    let mut ex = DragTextExercise::new(params("*a* *b* *c*", false)).unwrap();
    ex.place(2, 0);
    ex.place(0, 2);

    let json = serde_json::to_string(&ex.current_state()).unwrap();
    let state: Vec<Placement> = serde_json::from_str(&json).unwrap();

    let resumed = DragTextExercise::with_previous_state(params("*a* *b* *c*", false), &state)
        .unwrap();
    assert_eq!(resumed.current_state(), ex.current_state());
    assert_eq!(resumed.phase(), Phase::InProgress);
    assert!(resumed.answer_given());
}

#[test]
fn restore_with_out_of_range_index_is_fatal() {
    let state = [Placement {
        draggable: 5,
        droppable: 0,
    }];
    let err =
        DragTextExercise::with_previous_state(params("*a* *b* *c*", false), &state).unwrap_err();
    assert!(matches!(err, ExerciseError::InvalidState(_)));
}

#[test]
fn full_check_retry_cycle() {
    let mut ex = DragTextExercise::new(params("*north* and *south*", false)).unwrap();
    ex.place(0, 1);
    ex.place(1, 0);
    let result = ex.evaluate();
    assert_eq!(result.correct(), 0);
    assert!(ex.buttons().try_again);

    ex.retry();
    assert_eq!(ex.phase(), Phase::Unanswered);
    assert!(ex.current_state().is_empty());

    ex.place(0, 0);
    ex.place(1, 1);
    assert!(ex.evaluate().is_full_score());
    assert_eq!(ex.response_report().score.scaled, 1.0);
}

#[test]
fn question_definition_matches_the_wire_contract() {
    let ex = DragTextExercise::new(params("The *cat* sat on the *mat*.", false)).unwrap();
    let definition = ex.question_definition();
    assert_eq!(
        definition.description,
        "Fill in the words<br/>The __________ sat on the __________."
    );
    assert_eq!(definition.correct_responses_pattern, vec!["cat[,]mat"]);
}

#[test]
fn shuffle_preserves_the_token_multiset() {
    // The pool order is random; assert membership only, never order.
    for _ in 0..10 {
        let ex = DragTextExercise::new(params("*a* *b* *c* *d* *e*", false)).unwrap();
        let mut pool = ex.pool();
        pool.sort_unstable();
        assert_eq!(pool, vec![0, 1, 2, 3, 4]);
    }
}

#[test]
fn segments_expose_document_order() {
    let ex = DragTextExercise::new(params("x *a* y *b* z", false)).unwrap();
    let kinds: Vec<&str> = ex
        .segments()
        .iter()
        .map(|seg| match seg {
            TextSegment::Literal(_) => "literal",
            TextSegment::Blank { .. } => "blank",
        })
        .collect();
    assert_eq!(
        kinds,
        vec!["literal", "blank", "literal", "blank", "literal"]
    );
}
