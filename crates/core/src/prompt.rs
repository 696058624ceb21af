//! Prompt Composition
//!
//! Turns the student profile and a [`PromptRequest`] into the exact message
//! sequences sent to the generative model. All wording lives in
//! [`PromptTemplates`]; this module only substitutes placeholders and picks
//! the generation policy for each kind.

use crate::{error::TutorError, profile::StudentProfile};
use anyhow::{Context, Result};
use std::collections::HashMap;
use std::fmt;

/// Concept taught when the caller does not name one.
pub const DEFAULT_TOPIC: &str = "fraction multiplication";

const PERSONA_TEMPLATE: &str = include_str!("../prompts/persona.md");
const EXPLANATION_TEMPLATE: &str = include_str!("../prompts/explanation.md");
const QUESTION_TEMPLATE: &str = include_str!("../prompts/question.md");
const FEEDBACK_TEMPLATE: &str = include_str!("../prompts/feedback.md");

/// What the caller is asking the tutor for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestKind {
    Explanation,
    Question,
    Feedback,
    Combined,
}

impl RequestKind {
    /// The single-call kinds a request expands into, in reply order.
    pub fn parts(self) -> &'static [RequestKind] {
        match self {
            RequestKind::Explanation => &[RequestKind::Explanation],
            RequestKind::Question => &[RequestKind::Question],
            RequestKind::Feedback => &[RequestKind::Feedback],
            RequestKind::Combined => &[RequestKind::Explanation, RequestKind::Question],
        }
    }

    fn template_key(self) -> &'static str {
        match self {
            RequestKind::Explanation => "explanation",
            RequestKind::Question => "question",
            RequestKind::Feedback => "feedback",
            RequestKind::Combined => "combined",
        }
    }
}

impl fmt::Display for RequestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.template_key())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    System,
    User,
}

/// One `(role, text)` entry of a model conversation.
#[derive(Debug, Clone, PartialEq)]
pub struct PromptMessage {
    pub role: Role,
    pub text: String,
}

impl PromptMessage {
    pub fn system(text: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            text: text.into(),
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            text: text.into(),
        }
    }
}

/// Output ceiling and sampling temperature passed with every model call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationParams {
    pub max_output_tokens: u32,
    pub temperature: f32,
}

/// A fully-formed model call.
#[derive(Debug, Clone, PartialEq)]
pub struct Prompt {
    pub kind: RequestKind,
    pub messages: Vec<PromptMessage>,
    pub params: GenerationParams,
}

/// A transient description of one incoming tutor request.
#[derive(Debug, Clone, PartialEq)]
pub enum PromptRequest {
    Explanation { topic: Option<String> },
    Question { topic: Option<String> },
    Feedback { question: String, answer: String },
    Combined { topic: Option<String> },
}

impl PromptRequest {
    pub fn kind(&self) -> RequestKind {
        match self {
            PromptRequest::Explanation { .. } => RequestKind::Explanation,
            PromptRequest::Question { .. } => RequestKind::Question,
            PromptRequest::Feedback { .. } => RequestKind::Feedback,
            PromptRequest::Combined { .. } => RequestKind::Combined,
        }
    }

    /// The student's answer, for kinds that carry one.
    pub fn answer(&self) -> Option<&str> {
        match self {
            PromptRequest::Feedback { answer, .. } => Some(answer),
            _ => None,
        }
    }

    /// The concept to teach, falling back to [`DEFAULT_TOPIC`] when unset or blank.
    fn topic(&self) -> &str {
        let topic = match self {
            PromptRequest::Explanation { topic }
            | PromptRequest::Question { topic }
            | PromptRequest::Combined { topic } => topic.as_deref(),
            PromptRequest::Feedback { .. } => None,
        };
        topic
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .unwrap_or(DEFAULT_TOPIC)
    }
}

/// Per-kind instruction block, user turn and generation policy.
#[derive(Debug, Clone, PartialEq)]
pub struct InstructionTemplate {
    pub block: String,
    pub user_turn: String,
    pub params: GenerationParams,
}

/// The template table: one persona plus one instruction entry per single-call kind.
#[derive(Debug, Clone, PartialEq)]
pub struct PromptTemplates {
    persona: String,
    instructions: HashMap<RequestKind, InstructionTemplate>,
}

impl Default for PromptTemplates {
    fn default() -> Self {
        let instructions = HashMap::from([
            (
                RequestKind::Explanation,
                InstructionTemplate {
                    block: EXPLANATION_TEMPLATE.to_string(),
                    user_turn: "Hi Kai, I want to learn about {topic}".to_string(),
                    params: GenerationParams {
                        max_output_tokens: 300,
                        temperature: 0.7,
                    },
                },
            ),
            (
                RequestKind::Question,
                InstructionTemplate {
                    block: QUESTION_TEMPLATE.to_string(),
                    user_turn: "Now ask me a fun question about {topic}".to_string(),
                    params: GenerationParams {
                        max_output_tokens: 150,
                        temperature: 0.6,
                    },
                },
            ),
            (
                RequestKind::Feedback,
                InstructionTemplate {
                    block: FEEDBACK_TEMPLATE.to_string(),
                    user_turn: "Give me my feedback".to_string(),
                    params: GenerationParams {
                        max_output_tokens: 200,
                        temperature: 0.9,
                    },
                },
            ),
        ]);
        Self {
            persona: PERSONA_TEMPLATE.to_string(),
            instructions,
        }
    }
}

impl PromptTemplates {
    /// Replaces compiled-in defaults with any matching entries from `overrides`.
    ///
    /// Keys are template names (`persona`, `explanation`, `question`,
    /// `feedback`), typically the file stems of a prompts directory. Unknown
    /// keys are ignored.
    pub fn with_overrides(mut self, overrides: &HashMap<String, String>) -> Self {
        if let Some(persona) = overrides.get("persona") {
            self.persona = persona.clone();
        }
        for (kind, entry) in self.instructions.iter_mut() {
            if let Some(block) = overrides.get(kind.template_key()) {
                entry.block = block.clone();
            }
        }
        self
    }

    pub fn persona(&self) -> &str {
        &self.persona
    }

    pub fn instruction(&self, kind: RequestKind) -> Result<&InstructionTemplate> {
        self.instructions
            .get(&kind)
            .with_context(|| format!("Missing prompt template: '{}'", kind))
    }
}

/// Substitutes every `{key}` placeholder in `template` in one left-to-right pass.
///
/// Substituted values are copied verbatim and never scanned again, so braces
/// inside user text or profile fields stay literal. Placeholders without a
/// matching key are left as they are.
pub fn render(template: &str, vars: &[(&str, String)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let after = &rest[start + 1..];
        let found = after.find('}').and_then(|end| {
            let key = &after[..end];
            vars.iter()
                .find(|(name, _)| *name == key)
                .map(|(_, value)| (value, end))
        });
        match found {
            Some((value, end)) => {
                out.push_str(value);
                rest = &after[end + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

/// Builds model prompts from the template table. Pure and deterministic.
#[derive(Debug, Clone, Default)]
pub struct PromptComposer {
    templates: PromptTemplates,
}

impl PromptComposer {
    pub fn new(templates: PromptTemplates) -> Self {
        Self { templates }
    }

    /// Builds one prompt per model call the request needs.
    ///
    /// Combined requests yield the explanation prompt followed by the question
    /// prompt. Feedback without both a question and an answer is rejected
    /// here, before anything reaches the model.
    pub fn build(
        &self,
        profile: &StudentProfile,
        request: &PromptRequest,
    ) -> Result<Vec<Prompt>, TutorError> {
        if let PromptRequest::Feedback { question, answer } = request {
            if question.trim().is_empty() || answer.trim().is_empty() {
                return Err(TutorError::Validation(
                    "Missing parameters: question and answer are required".to_string(),
                ));
            }
        }

        let mut vars = profile.fields();
        vars.push(("topic", request.topic().to_string()));
        if let PromptRequest::Feedback { question, answer } = request {
            vars.push(("question", question.clone()));
            vars.push(("answer", answer.clone()));
        }

        let persona = render(&self.templates.persona, &vars);

        request
            .kind()
            .parts()
            .iter()
            .map(|&kind| -> Result<Prompt, TutorError> {
                let instruction = self
                    .templates
                    .instruction(kind)
                    .map_err(|e| TutorError::Internal(e.to_string()))?;
                let system = format!("{}\n{}", persona, render(&instruction.block, &vars));
                Ok(Prompt {
                    kind,
                    messages: vec![
                        PromptMessage::system(system),
                        PromptMessage::user(render(&instruction.user_turn, &vars)),
                    ],
                    params: instruction.params,
                })
            })
            .collect()
    }
}
