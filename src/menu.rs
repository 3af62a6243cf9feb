/// Context menu entries shown on text selections

use crate::bridge;
use crate::note::NoteKind;
use serde::Serialize;

/// A chrome.contextMenus item, serialized straight into `create()`
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MenuItem {
    pub id: String,
    pub title: String,
    pub contexts: Vec<String>,
}

impl MenuItem {
    fn for_kind(kind: NoteKind) -> MenuItem {
        let title = match kind {
            NoteKind::Summarize => "📝 Summarize with Pocket Mentor",
            NoteKind::Simplify => "✏️ Simplify with Pocket Mentor",
            NoteKind::Quiz => "❓ Quiz Me with Pocket Mentor",
        };

        MenuItem {
            id: kind.id().to_string(),
            title: title.to_string(),
            contexts: vec!["selection".to_string()],
        }
    }
}

pub fn menu_items() -> Vec<MenuItem> {
    NoteKind::ALL.iter().map(|kind| MenuItem::for_kind(*kind)).collect()
}

/// Replace any existing items with ours. Called on install and update.
pub async fn register_menus() -> Result<(), String> {
    let items = serde_wasm_bindgen::to_value(&menu_items())
        .map_err(|e| format!("Failed to serialize menu items: {:?}", e))?;

    bridge::createMenus(items)
        .await
        .map_err(|e| format!("Failed to create menus: {}", bridge::js_error_message(&e)))?;

    log::info!("Pocket Mentor context menus created");
    Ok(())
}
