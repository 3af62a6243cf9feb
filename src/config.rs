/// Extension settings, read from chrome.storage.sync with built-in defaults

use crate::bridge;
use serde::{Deserialize, Serialize};

/// chrome.storage.sync key holding user overrides
pub const SETTINGS_KEY: &str = "pocket_mentor_settings";

/// chrome.storage.local key holding the note list
pub const DEFAULT_NOTES_KEY: &str = "notes";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct NotebookConfig {
    /// Key of the note list in chrome.storage.local
    pub storage_key: String,
    /// Style passed to the rewriter for "Simplify"
    pub rewrite_style: String,
    /// Number of multiple-choice questions asked for by "Quiz Me"
    pub quiz_question_count: u8,
    /// Show a browser notification after each menu action
    pub notify: bool,
}

impl Default for NotebookConfig {
    fn default() -> Self {
        NotebookConfig {
            storage_key: DEFAULT_NOTES_KEY.to_string(),
            rewrite_style: "simple".to_string(),
            quiz_question_count: 2,
            notify: true,
        }
    }
}

impl NotebookConfig {
    /// Clamp out-of-range overrides back to something the AI can use.
    pub fn normalized(mut self) -> Self {
        if self.storage_key.trim().is_empty() {
            self.storage_key = DEFAULT_NOTES_KEY.to_string();
        }
        if self.rewrite_style.trim().is_empty() {
            self.rewrite_style = "simple".to_string();
        }
        self.quiz_question_count = self.quiz_question_count.clamp(1, 10);
        self
    }
}

/// Load settings, falling back to defaults when absent or unreadable.
pub async fn load_config() -> NotebookConfig {
    let value = match bridge::getSyncStorage(SETTINGS_KEY).await {
        Ok(value) => value,
        Err(e) => {
            log::warn!("Failed to read settings, using defaults: {:?}", e);
            return NotebookConfig::default();
        }
    };

    if value.is_null() || value.is_undefined() {
        return NotebookConfig::default();
    }

    match serde_wasm_bindgen::from_value::<NotebookConfig>(value) {
        Ok(config) => config.normalized(),
        Err(e) => {
            log::warn!("Ignoring malformed settings: {}", e);
            NotebookConfig::default()
        }
    }
}
