//! Interactive discrepancy prompts
//!
//! Uses dialoguer for terminal input. An empty answer means yes.

use dialoguer::Input;
use marks_core::{Decision, Discrepancy, Resolver};

/// Asks the operator on the terminal about every discrepancy.
#[derive(Debug, Default)]
pub struct TerminalResolver;

impl TerminalResolver {
    pub fn new() -> Self {
        Self
    }
}

impl Resolver for TerminalResolver {
    fn resolve(&mut self, discrepancy: &Discrepancy) -> marks_core::Result<Decision> {
        let keeps = discrepancy.proceed_keeps();
        let prompt = if keeps {
            format!("{discrepancy}\nKeep it with the actual size? [Y/a/n/q]")
        } else {
            format!("{discrepancy}\nSkip it and proceed? [Y/a/n]")
        };

        loop {
            let answer: String = Input::new()
                .with_prompt(&prompt)
                .allow_empty(true)
                .interact_text()
                .map_err(|e| marks_core::Error::Prompt {
                    message: e.to_string(),
                })?;

            match parse_answer(&answer, keeps) {
                Some(decision) => return Ok(decision),
                None => eprintln!("Please answer one of the letters in brackets."),
            }
        }
    }
}

/// Map a typed answer to a decision.
///
/// `y` proceeds and `a` proceeds for every later discrepancy of the same
/// kind. For a size mismatch `n` skips the entry and `q` aborts; elsewhere
/// `n` aborts.
pub fn parse_answer(answer: &str, keeps: bool) -> Option<Decision> {
    match (answer.trim().to_ascii_lowercase().as_str(), keeps) {
        ("" | "y" | "yes", _) => Some(Decision::Proceed),
        ("a" | "all", _) => Some(Decision::SkipAll),
        ("n" | "no", true) => Some(Decision::Skip),
        ("n" | "no", false) | ("q" | "quit", true) => Some(Decision::Abort),
        _ => None,
    }
}
