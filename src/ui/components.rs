/// Reusable UI components

use crate::render::{format_local_date, NoteBlock};
use wasm_bindgen::JsValue;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct NoteCardProps {
    pub block: NoteBlock,
    #[prop_or(false)]
    pub copied: bool,
    pub on_copy: Callback<NoteBlock>,
}

/// One note: upper-cased type label, then the content as literal text
#[function_component(NoteCard)]
pub fn note_card(props: &NoteCardProps) -> Html {
    let block = &props.block;

    html! {
        <div class={classes!("note", format!("note-{}", block.kind.id()))}>
            <div class="note-header">
                <strong class="note-label">{&block.label}</strong>
                if let Some(ts) = &block.timestamp {
                    <span class="note-date">{local_timestamp(ts)}</span>
                }
            </div>
            <p class="note-content">{&block.content}</p>
            <div class="note-actions">
                <button
                    class="copy-button"
                    onclick={props.on_copy.reform({
                        let block = block.clone();
                        move |_| block.clone()
                    })}
                >
                    {if props.copied { "✓ Copied" } else { "📋 Copy" }}
                </button>
            </div>
        </div>
    }
}

// Stored timestamps are UTC ISO strings; show them in the browser's zone
fn local_timestamp(iso: &str) -> String {
    let date = js_sys::Date::new(&JsValue::from_str(iso));
    if date.get_time().is_nan() {
        return iso.to_string();
    }

    format_local_date(
        date.get_full_year(),
        date.get_month(),
        date.get_date(),
        date.get_hours(),
        date.get_minutes(),
    )
}

#[derive(Properties, PartialEq)]
pub struct EmptyStateProps {
    pub filtered: bool,
}

#[function_component(EmptyState)]
pub fn empty_state(props: &EmptyStateProps) -> Html {
    html! {
        <div class="empty-state">
            if props.filtered {
                <p>{"No notes of this type yet."}</p>
            } else {
                <p>{"Your notebook is empty."}</p>
                <p class="empty-state-hint">
                    {"Select text on any page, right-click, and choose a Pocket Mentor action."}
                </p>
            }
        </div>
    }
}
