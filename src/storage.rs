/// Note persistence on top of chrome.storage.local

use crate::bridge;
use crate::error::StoreError;
use crate::note::{Note, NoteKind};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// One entry of the stored list. Entries this build can't read (other note
/// types, missing fields) are kept as raw JSON so write-backs never drop them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum StoredRecord {
    Note(Note),
    Foreign(serde_json::Value),
}

impl StoredRecord {
    pub fn as_note(&self) -> Option<&Note> {
        match self {
            StoredRecord::Note(note) => Some(note),
            StoredRecord::Foreign(_) => None,
        }
    }
}

/// Root storage structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct NotebookData {
    #[serde(rename = "notes")]
    pub records: Vec<StoredRecord>,
}

impl NotebookData {
    pub fn new() -> Self {
        NotebookData { records: Vec::new() }
    }

    pub fn from_notes(notes: Vec<Note>) -> Self {
        NotebookData {
            records: notes.into_iter().map(StoredRecord::Note).collect(),
        }
    }

    /// Records are only ever appended; insertion order is display order.
    pub fn append(&mut self, note: Note) {
        self.records.push(StoredRecord::Note(note));
    }

    /// Stored records, readable or not
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Readable notes with their position in the stored list
    pub fn indexed_notes(&self) -> impl Iterator<Item = (usize, &Note)> {
        self.records
            .iter()
            .enumerate()
            .filter_map(|(index, record)| record.as_note().map(|note| (index, note)))
    }

    pub fn notes(&self) -> Vec<Note> {
        self.indexed_notes().map(|(_, note)| note.clone()).collect()
    }

    pub fn note_count(&self) -> usize {
        self.indexed_notes().count()
    }

    pub fn notes_of_kind(&self, kind: NoteKind) -> Vec<&Note> {
        self.indexed_notes()
            .map(|(_, note)| note)
            .filter(|n| n.kind == kind)
            .collect()
    }

    /// Per-kind counts in menu order
    pub fn kind_counts(&self) -> Vec<(NoteKind, usize)> {
        NoteKind::ALL
            .iter()
            .map(|kind| (*kind, self.notes_of_kind(*kind).len()))
            .collect()
    }
}

/// Injectable store for the persisted note list
#[async_trait(?Send)]
pub trait NoteStore {
    /// Read the full list; an absent record reads as empty.
    async fn get(&self) -> Result<NotebookData, StoreError>;

    /// Read, push `note`, write the whole list back. Returns the new record.
    async fn append(&self, note: Note) -> Result<NotebookData, StoreError>;
}

/// chrome.storage.local backed store. The list lives under one key as a
/// plain array of objects, the layout other builds write too.
pub struct ChromeNoteStore {
    key: String,
}

impl ChromeNoteStore {
    pub fn new(key: impl Into<String>) -> Self {
        ChromeNoteStore { key: key.into() }
    }
}

#[async_trait(?Send)]
impl NoteStore for ChromeNoteStore {
    async fn get(&self) -> Result<NotebookData, StoreError> {
        let notes_js = bridge::getStorage(&self.key)
            .await
            .map_err(|e| StoreError::Read(bridge::js_error_message(&e)))?;

        if notes_js.is_null() || notes_js.is_undefined() {
            return Ok(NotebookData::new());
        }

        let records: Vec<StoredRecord> = serde_wasm_bindgen::from_value(notes_js)
            .map_err(|e| StoreError::Decode(e.to_string()))?;

        Ok(NotebookData { records })
    }

    async fn append(&self, note: Note) -> Result<NotebookData, StoreError> {
        let mut data = self.get().await?;
        data.append(note);

        // Plain objects, not JS Maps, so chrome.storage can persist them
        let notes_js = data
            .records
            .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
            .map_err(|e| StoreError::Encode(e.to_string()))?;

        bridge::setStorage(&self.key, notes_js)
            .await
            .map_err(|e| StoreError::Write(bridge::js_error_message(&e)))?;

        Ok(data)
    }
}
