//! [`ScriptedResolver`] for driving split and join without a terminal.

use std::collections::VecDeque;

use marks_core::{Decision, Discrepancy, Resolver};

/// Replays a fixed queue of decisions and records every discrepancy it was asked about.
///
/// Panics when asked more often than it has answers, so an unexpected
/// prompt fails the test instead of being silently accepted.
#[derive(Debug, Default)]
pub struct ScriptedResolver {
    answers: VecDeque<Decision>,
    /// Every discrepancy seen, in order.
    pub asked: Vec<Discrepancy>,
}

impl ScriptedResolver {
    pub fn new(answers: impl IntoIterator<Item = Decision>) -> Self {
        Self {
            answers: answers.into_iter().collect(),
            asked: Vec::new(),
        }
    }

    /// A resolver that must never be asked.
    pub fn silent() -> Self {
        Self::default()
    }

    /// Answers not yet given.
    pub fn remaining(&self) -> usize {
        self.answers.len()
    }
}

impl Resolver for ScriptedResolver {
    fn resolve(&mut self, discrepancy: &Discrepancy) -> marks_core::Result<Decision> {
        self.asked.push(discrepancy.clone());
        match self.answers.pop_front() {
            Some(decision) => Ok(decision),
            None => panic!("ScriptedResolver: unexpected discrepancy: {discrepancy}"),
        }
    }
}
