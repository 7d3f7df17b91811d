//! Interactive prompts using dialoguer, plus scripted stand-ins

use std::collections::VecDeque;

use anyhow::{bail, Result};
use dialoguer::{Confirm, Input};

use crate::pipeline::Prompter;

/// Prompts on the controlling terminal
#[derive(Debug, Default)]
pub struct TerminalPrompter;

impl Prompter for TerminalPrompter {
    fn ask(&mut self, question: &str, valid_answers: Option<&[&str]>) -> Result<String> {
        let prompt = match valid_answers {
            Some(valid) if !valid.is_empty() => {
                format!("{} [{}]", question, valid.join("/"))
            }
            _ => question.to_string(),
        };

        let answer: String = Input::new()
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()?;
        Ok(answer)
    }

    fn confirm(&mut self, question: &str) -> Result<bool> {
        let confirmed = Confirm::new()
            .with_prompt(question)
            .default(true)
            .interact()?;
        Ok(confirmed)
    }
}

/// Answers questions from a fixed script, in order
///
/// Every question asked is recorded, so callers can check what was shown.
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    answers: VecDeque<String>,
    pub questions: Vec<String>,
}

impl ScriptedPrompter {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
            questions: Vec::new(),
        }
    }

    /// Answers not yet consumed
    pub fn remaining(&self) -> usize {
        self.answers.len()
    }
}

impl Prompter for ScriptedPrompter {
    fn ask(&mut self, question: &str, _valid_answers: Option<&[&str]>) -> Result<String> {
        self.questions.push(question.to_string());
        match self.answers.pop_front() {
            Some(answer) => Ok(answer),
            None => bail!("No scripted answer for: {}", question),
        }
    }
}

/// Accepts every yes/no question and refuses free-text input
///
/// Used with `--no-confirm`: a saved mapping is reused, and building a new
/// one fails instead of blocking on the terminal.
#[derive(Debug, Default)]
pub struct NonInteractivePrompter;

impl Prompter for NonInteractivePrompter {
    fn ask(&mut self, question: &str, _valid_answers: Option<&[&str]>) -> Result<String> {
        bail!(
            "Interactive input required ({}); run without --no-confirm or save a mapping first",
            question
        )
    }

    fn confirm(&mut self, _question: &str) -> Result<bool> {
        Ok(true)
    }
}
