use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use drag_text_engine::{DragTextExercise, Params, Placement, TextSegment};

/// Authoring tool for drag-the-words exercises: validate cloze text, list
/// blanks, and score stored sessions.
#[derive(Parser)]
#[command(name = "drag-text", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Parse an exercise params file and list its blanks and report payload
    Inspect {
        /// Path to the params JSON file
        params: PathBuf,
    },
    /// Score a stored placement state against an exercise
    Score {
        /// Path to the params JSON file
        params: PathBuf,
        /// Path to the placement state JSON file
        #[arg(long)]
        state: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Command::Inspect { params } => inspect(&params),
        Command::Score { params, state } => score(&params, &state),
    }
}

fn load_params(path: &PathBuf) -> anyhow::Result<Params> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading params file {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing params file {}", path.display()))
}

fn inspect(path: &PathBuf) -> anyhow::Result<()> {
    let params = load_params(path)?;
    let exercise = DragTextExercise::new(params)?;

    println!("{} blank(s):", exercise.slots().len());
    for slot in exercise.slots() {
        let spec = slot.spec();
        print!("  [{}] {}", slot.id(), spec.alternatives().join(" / "));
        if let Some(tip) = spec.tip() {
            print!("  (tip: {tip})");
        }
        println!();
    }

    let literal_count = exercise
        .segments()
        .iter()
        .filter(|seg| matches!(seg, TextSegment::Literal(_)))
        .count();
    println!("{literal_count} literal segment(s)");

    println!(
        "{}",
        serde_json::to_string_pretty(&exercise.question_definition())?
    );
    Ok(())
}

fn score(params_path: &PathBuf, state_path: &PathBuf) -> anyhow::Result<()> {
    let params = load_params(params_path)?;
    let text = fs::read_to_string(state_path)
        .with_context(|| format!("reading state file {}", state_path.display()))?;
    let state: Vec<Placement> = serde_json::from_str(&text)
        .with_context(|| format!("parsing state file {}", state_path.display()))?;

    let mut exercise = DragTextExercise::with_previous_state(params, &state)?;
    exercise.evaluate();

    if let Some(feedback) = exercise.feedback() {
        println!("{}", feedback.text);
    }
    println!(
        "{}",
        serde_json::to_string_pretty(&exercise.response_report())?
    );
    Ok(())
}
