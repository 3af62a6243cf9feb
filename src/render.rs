/// View model for the notebook page

use crate::note::{Note, NoteKind};
use crate::storage::NotebookData;

/// chrome.storage.sync key holding the popup theme
pub const THEME_KEY: &str = "theme";

/// One labeled block in the notebook container
#[derive(Debug, Clone, PartialEq)]
pub struct NoteBlock {
    pub key: String,
    pub kind: NoteKind,
    pub label: String,
    pub content: String,
    pub timestamp: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum NoteFilter {
    #[default]
    All,
    Only(NoteKind),
}

impl NoteFilter {
    /// Parse a `<select>` value: "all" or a note kind id
    pub fn from_value(value: &str) -> NoteFilter {
        NoteKind::from_id(value)
            .map(NoteFilter::Only)
            .unwrap_or(NoteFilter::All)
    }

    pub fn value(&self) -> &'static str {
        match self {
            NoteFilter::All => "all",
            NoteFilter::Only(kind) => kind.id(),
        }
    }

    fn matches(&self, note: &Note) -> bool {
        match self {
            NoteFilter::All => true,
            NoteFilter::Only(kind) => note.kind == *kind,
        }
    }
}

/// Rebuild the block list from scratch, one block per readable note in stored
/// order. Keys are stored positions, stable because the list only appends.
pub fn render_blocks(data: &NotebookData, filter: NoteFilter) -> Vec<NoteBlock> {
    data.indexed_notes()
        .filter(|(_, note)| filter.matches(note))
        .map(|(index, note)| NoteBlock {
            key: format!("note-{}", index),
            kind: note.kind,
            label: note.kind.label(),
            content: note.content.clone(),
            timestamp: note.timestamp.clone(),
        })
        .collect()
}

/// Local wall-clock rendering of a note timestamp, e.g. "2024-10-28 10:30".
/// Date parts come from `js_sys::Date`'s local getters, so `month` is 0-based.
pub fn format_local_date(year: u32, month: u32, day: u32, hours: u32, minutes: u32) -> String {
    format!(
        "{:04}-{:02}-{:02} {:02}:{:02}",
        year,
        month + 1,
        day,
        hours,
        minutes
    )
}

pub fn stats_line(data: &NotebookData) -> String {
    let per_kind: Vec<String> = data
        .kind_counts()
        .into_iter()
        .map(|(kind, count)| format!("{} {}", count, kind))
        .collect();

    format!("{} notes • {}", data.note_count(), per_kind.join(" • "))
}

/// Status banner text for the AI availability check
pub fn availability_message(available: usize, total: usize) -> String {
    if available == 0 {
        "⚠️ No AI capabilities detected. \
         Enable Chrome's built-in AI and restart the browser."
            .to_string()
    } else if available < total {
        format!("⚠️ {} of {} AI capabilities available.", available, total)
    } else {
        format!("✅ {} AI capabilities available and ready!", available)
    }
}

pub fn export_filename(now_ms: f64) -> String {
    format!("pocket-mentor-notes-{}.json", now_ms as i64)
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// Anything other than "dark" falls back to light
    pub fn from_stored(value: Option<&str>) -> Theme {
        match value {
            Some("dark") => Theme::Dark,
            _ => Theme::Light,
        }
    }

    pub fn value(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn toggled(&self) -> Theme {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn body_class(&self) -> String {
        format!("{}-theme", self.value())
    }

    /// Label of the toggle button: names the theme it switches to
    pub fn toggle_label(&self) -> &'static str {
        match self {
            Theme::Light => "🌙 Dark Mode",
            Theme::Dark => "☀️ Light Mode",
        }
    }
}
