/// Browser-provided AI capabilities behind one interface

use crate::bridge;
use crate::config::NotebookConfig;
use crate::error::AiError;
use crate::note::NoteKind;
use async_trait::async_trait;
use wasm_bindgen::prelude::*;

/// One AI action: text in, text out.
#[async_trait(?Send)]
pub trait AiCapability {
    fn kind(&self) -> NoteKind;

    async fn run(&self, text: &str) -> Result<String, AiError>;

    async fn is_available(&self) -> bool {
        true
    }
}

/// The set of capabilities the dispatcher can route to
#[derive(Default)]
pub struct Capabilities {
    entries: Vec<Box<dyn AiCapability>>,
}

impl Capabilities {
    pub fn new() -> Self {
        Capabilities { entries: Vec::new() }
    }

    /// Registering a kind twice replaces the earlier capability.
    pub fn with(mut self, capability: Box<dyn AiCapability>) -> Self {
        self.entries.retain(|c| c.kind() != capability.kind());
        self.entries.push(capability);
        self
    }

    pub fn get(&self, kind: NoteKind) -> Option<&dyn AiCapability> {
        self.entries
            .iter()
            .find(|c| c.kind() == kind)
            .map(|c| c.as_ref())
    }

    /// Run the capability registered for `kind`.
    pub async fn run(&self, kind: NoteKind, text: &str) -> Result<String, AiError> {
        match self.get(kind) {
            Some(capability) => capability.run(text).await,
            None => Err(AiError::Unavailable(kind)),
        }
    }

    /// Number of registered capabilities the host reports as usable
    pub async fn available_count(&self) -> usize {
        let mut count = 0;
        for capability in &self.entries {
            if capability.is_available().await {
                count += 1;
            }
        }
        count
    }

    /// Chrome built-in AI for all three kinds
    pub fn chrome(config: &NotebookConfig) -> Self {
        NoteKind::ALL.iter().fold(Capabilities::new(), |caps, kind| {
            caps.with(Box::new(ChromeAi::new(*kind, config)))
        })
    }
}

/// Instruction sent to the prompt API for "Quiz Me"
pub fn quiz_prompt(text: &str, question_count: u8) -> String {
    format!(
        "Create {} multiple-choice questions with correct answers based on this text:\n{}",
        question_count, text
    )
}

/// Blank answers count as no answer; anything else is kept exactly as given.
pub fn non_empty_result(kind: NoteKind, output: Option<String>) -> Result<String, AiError> {
    match output {
        Some(text) if !text.trim().is_empty() => Ok(text),
        _ => Err(AiError::Empty(kind)),
    }
}

/// Chrome's Summarizer / Rewriter / Prompt APIs via the JS bridge
pub struct ChromeAi {
    kind: NoteKind,
    rewrite_style: String,
    quiz_question_count: u8,
}

impl ChromeAi {
    pub fn new(kind: NoteKind, config: &NotebookConfig) -> Self {
        ChromeAi {
            kind,
            rewrite_style: config.rewrite_style.clone(),
            quiz_question_count: config.quiz_question_count,
        }
    }

    fn host_api(&self) -> &'static str {
        match self.kind {
            NoteKind::Summarize => "summarizer",
            NoteKind::Simplify => "rewriter",
            NoteKind::Quiz => "prompt",
        }
    }

    fn map_js_error(&self, err: JsValue) -> AiError {
        let unsupported = err
            .dyn_ref::<js_sys::Error>()
            .map(|e| String::from(e.name()) == "NotSupportedError")
            .unwrap_or(false);

        if unsupported {
            AiError::Unavailable(self.kind)
        } else {
            AiError::Failed {
                kind: self.kind,
                message: bridge::js_error_message(&err),
            }
        }
    }
}

#[async_trait(?Send)]
impl AiCapability for ChromeAi {
    fn kind(&self) -> NoteKind {
        self.kind
    }

    async fn run(&self, text: &str) -> Result<String, AiError> {
        let output = match self.kind {
            NoteKind::Summarize => bridge::summarize(text).await,
            NoteKind::Simplify => bridge::rewrite(text, &self.rewrite_style).await,
            NoteKind::Quiz => {
                bridge::promptGenerate(&quiz_prompt(text, self.quiz_question_count)).await
            }
        }
        .map_err(|e| self.map_js_error(e))?;

        non_empty_result(self.kind, output.as_string())
    }

    async fn is_available(&self) -> bool {
        match bridge::aiAvailability(self.host_api()).await {
            Ok(value) => value.as_bool().unwrap_or(false),
            Err(e) => {
                log::warn!(
                    "{} availability check failed: {}",
                    self.host_api(),
                    bridge::js_error_message(&e)
                );
                false
            }
        }
    }
}
