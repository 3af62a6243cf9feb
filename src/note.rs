/// Data structures for the Pocket Mentor notebook
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The AI action that produced a note. Doubles as the context menu item id.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum NoteKind {
    Summarize,
    Simplify,
    Quiz,
}

impl NoteKind {
    pub const ALL: [NoteKind; 3] = [NoteKind::Summarize, NoteKind::Simplify, NoteKind::Quiz];

    pub fn from_id(id: &str) -> Option<NoteKind> {
        match id {
            "summarize" => Some(NoteKind::Summarize),
            "simplify" => Some(NoteKind::Simplify),
            "quiz" => Some(NoteKind::Quiz),
            _ => None,
        }
    }

    pub fn id(&self) -> &'static str {
        match self {
            NoteKind::Summarize => "summarize",
            NoteKind::Simplify => "simplify",
            NoteKind::Quiz => "quiz",
        }
    }

    /// Upper-cased id shown above each note in the notebook
    pub fn label(&self) -> String {
        self.id().to_uppercase()
    }

    /// "Summarize", "Simplify", "Quiz"
    pub fn display_name(&self) -> String {
        let id = self.id();
        let mut chars = id.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }
}

impl std::fmt::Display for NoteKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

/// One stored result of an AI action
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Note {
    #[serde(rename = "type")]
    pub kind: NoteKind,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    /// Fields written by other builds, carried through untouched
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Note {
    pub fn new(kind: NoteKind, content: String, timestamp: Option<String>) -> Note {
        Note {
            kind,
            content,
            timestamp,
            extra: Map::new(),
        }
    }
}
