//! Question value object.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::domain::foundation::QuestionId;

/// How a question expects to be answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionKind {
    /// Answer must be one of the listed options.
    Choice,
    /// Any non-empty text is accepted.
    Text,
}

/// A single questionnaire entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: QuestionId,
    pub prompt: String,
    /// `None` means free-text input.
    #[serde(default)]
    pub options: Option<Vec<String>>,
    /// Canned follow-up keyed by option value.
    #[serde(default)]
    pub reactions: HashMap<String, String>,
    #[serde(default = "default_required")]
    pub required: bool,
}

fn default_required() -> bool {
    true
}

impl Question {
    /// Creates a multiple-choice question with no reactions.
    pub fn choice(
        id: QuestionId,
        prompt: impl Into<String>,
        options: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            id,
            prompt: prompt.into(),
            options: Some(options.into_iter().map(Into::into).collect()),
            reactions: HashMap::new(),
            required: true,
        }
    }

    /// Creates a free-text question.
    pub fn text(id: QuestionId, prompt: impl Into<String>) -> Self {
        Self {
            id,
            prompt: prompt.into(),
            options: None,
            reactions: HashMap::new(),
            required: true,
        }
    }

    pub fn with_reaction(mut self, option: impl Into<String>, reaction: impl Into<String>) -> Self {
        self.reactions.insert(option.into(), reaction.into());
        self
    }

    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    pub fn kind(&self) -> QuestionKind {
        match self.options {
            Some(_) => QuestionKind::Choice,
            None => QuestionKind::Text,
        }
    }

    /// Options as a slice; empty for free-text questions.
    pub fn option_list(&self) -> &[String] {
        self.options.as_deref().unwrap_or(&[])
    }

    /// Returns the canonical option matching `answer`, ignoring surrounding whitespace.
    pub fn matching_option(&self, answer: &str) -> Option<&str> {
        let answer = answer.trim();
        self.option_list()
            .iter()
            .find(|option| option.as_str() == answer)
            .map(String::as_str)
    }

    pub fn reaction_for(&self, answer: &str) -> Option<&str> {
        self.reactions.get(answer).map(String::as_str)
    }

    /// Prompt followed by one `- option` line per choice.
    pub fn render_prompt(&self) -> String {
        match &self.options {
            Some(options) if !options.is_empty() => {
                let lines: Vec<String> = options.iter().map(|o| format!("- {}", o)).collect();
                format!("{}\n\n{}", self.prompt, lines.join("\n"))
            }
            _ => self.prompt.clone(),
        }
    }
}
