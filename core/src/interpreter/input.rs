//! Input providers
//!
//! `PLEASE LISTEN :8. NAME` suspends the VM. Whoever drives the VM
//! asks an [`InputProvider`] for the value and resumes.

use std::collections::VecDeque;
use std::future::Future;

use tracing::warn;

/// Source of values for `PLEASE LISTEN :8.`
pub trait InputProvider {
    /// Produce the input for the named Datasub
    fn provide(&mut self, name: &str) -> impl Future<Output = String>;
}

/// Prepared answers, handed out in order
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    answers: VecDeque<String>,
    asked: Vec<String>,
}

impl ScriptedInput {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
            asked: Vec::new(),
        }
    }

    /// Names requested so far, in order
    pub fn asked(&self) -> &[String] {
        &self.asked
    }

    pub fn remaining(&self) -> usize {
        self.answers.len()
    }

    /// Take the next prepared answer, if any
    pub fn next_answer(&mut self, name: &str) -> Option<String> {
        self.asked.push(name.to_string());
        self.answers.pop_front()
    }
}

impl InputProvider for ScriptedInput {
    async fn provide(&mut self, name: &str) -> String {
        self.next_answer(name).unwrap_or_else(|| {
            warn!(datasub = %name, "scripted input exhausted, using empty string");
            String::new()
        })
    }
}
