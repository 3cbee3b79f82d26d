//! Operator prompts
//!
//! The resolve workflow asks questions through `Prompter` so its decisions
//! can be driven by a scripted answer list in tests.

use console::Term;
use dialoguer::{Confirm, Input};
use std::io::{self, BufRead, Write};
use thiserror::Error;

#[derive(Debug, Error)]
#[error("Failed to read {what}: {message}")]
pub struct PromptError {
    pub what: String,
    pub message: String,
}

impl PromptError {
    fn new(what: &str, err: impl ToString) -> Self {
        Self {
            what: what.to_string(),
            message: err.to_string(),
        }
    }
}

pub trait Prompter {
    /// Free-text answer; an empty answer yields `default` (or "")
    fn input(&mut self, prompt: &str, default: Option<&str>) -> Result<String, PromptError>;

    fn confirm(&mut self, prompt: &str, default: bool) -> Result<bool, PromptError>;
}

/// Prompts on the controlling terminal
///
/// Falls back to plain line reads from stdin when stderr is not a terminal,
/// so answers can be piped in.
pub struct TerminalPrompter {
    term: Term,
}

impl TerminalPrompter {
    pub fn new() -> Self {
        Self {
            term: Term::stderr(),
        }
    }

    fn read_line(&self, prompt: &str) -> io::Result<String> {
        eprint!("{}: ", prompt);
        io::stderr().flush()?;
        let mut line = String::new();
        io::stdin().lock().read_line(&mut line)?;
        Ok(line.trim().to_string())
    }
}

impl Default for TerminalPrompter {
    fn default() -> Self {
        Self::new()
    }
}

impl Prompter for TerminalPrompter {
    fn input(&mut self, prompt: &str, default: Option<&str>) -> Result<String, PromptError> {
        let answer = if self.term.is_term() {
            let mut input = Input::<String>::new().with_prompt(prompt).allow_empty(true);
            if let Some(default) = default {
                input = input.default(default.to_string()).show_default(true);
            }
            input
                .interact_text_on(&self.term)
                .map_err(|e| PromptError::new(prompt, e))?
        } else {
            self.read_line(prompt).map_err(|e| PromptError::new(prompt, e))?
        };

        let answer = answer.trim().to_string();
        if answer.is_empty() {
            Ok(default.unwrap_or_default().to_string())
        } else {
            Ok(answer)
        }
    }

    fn confirm(&mut self, prompt: &str, default: bool) -> Result<bool, PromptError> {
        if self.term.is_term() {
            return Confirm::new()
                .with_prompt(prompt)
                .default(default)
                .interact_on(&self.term)
                .map_err(|e| PromptError::new(prompt, e));
        }

        let hint = if default { "[Y/n]" } else { "[y/N]" };
        let answer = self
            .read_line(&format!("{} {}", prompt, hint))
            .map_err(|e| PromptError::new(prompt, e))?;
        Ok(parse_yes_no(&answer).unwrap_or(default))
    }
}

fn parse_yes_no(answer: &str) -> Option<bool> {
    match answer.trim().to_ascii_lowercase().as_str() {
        "y" | "yes" => Some(true),
        "n" | "no" => Some(false),
        _ => None,
    }
}

/// Replays canned answers; an exhausted script answers with defaults
#[cfg(test)]
#[derive(Default)]
pub struct ScriptedPrompter {
    answers: std::collections::VecDeque<String>,
    pub asked: Vec<String>,
}

#[cfg(test)]
impl ScriptedPrompter {
    pub fn new(answers: &[&str]) -> Self {
        Self {
            answers: answers.iter().map(|a| a.to_string()).collect(),
            asked: Vec::new(),
        }
    }
}

#[cfg(test)]
impl Prompter for ScriptedPrompter {
    fn input(&mut self, prompt: &str, default: Option<&str>) -> Result<String, PromptError> {
        self.asked.push(prompt.to_string());
        let answer = self.answers.pop_front().unwrap_or_default();
        if answer.is_empty() {
            Ok(default.unwrap_or_default().to_string())
        } else {
            Ok(answer)
        }
    }

    fn confirm(&mut self, prompt: &str, default: bool) -> Result<bool, PromptError> {
        self.asked.push(prompt.to_string());
        let answer = self.answers.pop_front().unwrap_or_default();
        Ok(parse_yes_no(&answer).unwrap_or(default))
    }
}
