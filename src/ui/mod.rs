//! User interface module - interaction (prompts) and formatting.
//!
//! Separates concerns:
//! - `formatter` - Pure formatting functions
//! - This module - Yes/no confirmation prompts
//!
//! The orchestrator takes prompts through the [Prompter] trait so the whole
//! workflow can run under test without real console I/O.

use std::collections::VecDeque;
use std::io::{self, Write};

use crate::error::Result;

pub mod formatter;

// Re-export formatter functions for convenience
pub use formatter::{
    display_error, display_item_line, display_manual_instructions, display_pending_changelog,
    display_status, display_success, display_warning,
};

/// Default answer for a yes/no prompt, shown as `[Y/n]` or `[y/N]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Answer {
    Yes,
    No,
}

/// Source of yes/no confirmations.
///
/// The console implementation blocks on stdin; tests use
/// [ScriptedPrompter] with canned answers.
pub trait Prompter {
    /// Ask a yes/no question and return the user's choice.
    fn confirm(&mut self, question: &str, default: Answer) -> Result<bool>;
}

/// Interprets one input token.
///
/// Accepted tokens are case-insensitive `yes`, `y`, `ye`, `no`, `n`. Empty
/// input selects the default. Anything else returns `None` so the caller
/// can reprompt.
fn parse_answer(token: &str, default: Answer) -> Option<bool> {
    match token.to_lowercase().as_str() {
        "" => Some(default == Answer::Yes),
        "yes" | "y" | "ye" => Some(true),
        "no" | "n" => Some(false),
        _ => None,
    }
}

/// Prompter reading answers from stdin.
pub struct ConsolePrompter;

impl Prompter for ConsolePrompter {
    fn confirm(&mut self, question: &str, default: Answer) -> Result<bool> {
        let suffix = match default {
            Answer::Yes => " [Y/n] ",
            Answer::No => " [y/N] ",
        };

        loop {
            print!("{}{}", question, suffix);
            io::stdout().flush()?;

            let mut input = String::new();
            io::stdin().read_line(&mut input)?;

            match parse_answer(input.trim(), default) {
                Some(choice) => return Ok(choice),
                None => println!("Please respond with 'yes' or 'no' (or 'y' or 'n')."),
            }
        }
    }
}

/// Prompter returning canned answers, for driving the workflow in tests.
///
/// Records every question asked. When the script runs out of answers it
/// answers No, the safe direction for every gate in the workflow.
pub struct ScriptedPrompter {
    answers: VecDeque<bool>,
    questions: Vec<String>,
}

impl ScriptedPrompter {
    /// Create a prompter that will give the provided answers in order.
    pub fn new(answers: &[bool]) -> Self {
        ScriptedPrompter {
            answers: answers.iter().copied().collect(),
            questions: Vec::new(),
        }
    }

    /// The questions asked so far, in order.
    pub fn questions(&self) -> &[String] {
        &self.questions
    }
}

impl Prompter for ScriptedPrompter {
    fn confirm(&mut self, question: &str, _default: Answer) -> Result<bool> {
        self.questions.push(question.to_string());
        Ok(self.answers.pop_front().unwrap_or(false))
    }
}
