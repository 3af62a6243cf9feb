/// Notebook popup page

use yew::prelude::*;
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlSelectElement;
use patternfly_yew::prelude::*;
use crate::ai::Capabilities;
use crate::bridge;
use crate::config::load_config;
use crate::error::StoreError;
use crate::note::NoteKind;
use crate::render::{
    availability_message, export_filename, render_blocks, stats_line, NoteBlock, NoteFilter,
    Theme, THEME_KEY,
};
use crate::storage::{ChromeNoteStore, NoteStore, NotebookData};
use crate::ui::components::{EmptyState, NoteCard};

#[derive(Clone, PartialEq)]
enum ViewState {
    Loading,
    Idle,
    Error(String),
}

#[derive(Clone, PartialEq)]
struct AiStatus {
    available: usize,
    total: usize,
}

#[function_component(NotebookPage)]
pub fn notebook_page() -> Html {
    let state = use_state(|| ViewState::Loading);
    let notebook = use_state(NotebookData::new);
    let filter = use_state(NoteFilter::default);
    let ai_status = use_state(|| None::<AiStatus>);
    let reload = use_state(|| 0u32);
    let theme = use_state(Theme::default);
    let copied_key = use_state(|| None::<String>);

    // Re-read the whole list on mount and on every refresh
    {
        let state = state.clone();
        let notebook = notebook.clone();

        use_effect_with(*reload, move |_| {
            state.set(ViewState::Loading);
            spawn_local(async move {
                match load_notebook().await {
                    Ok(data) => {
                        notebook.set(data);
                        state.set(ViewState::Idle);
                    }
                    Err(e) => {
                        log::error!("Failed to load notebook: {}", e);
                        state.set(ViewState::Error(e.to_string()));
                    }
                }
            });
            || ()
        });
    }

    // Check the built-in AI and restore the saved theme once
    {
        let ai_status = ai_status.clone();
        let theme = theme.clone();

        use_effect_with((), move |_| {
            spawn_local(async move {
                let saved = load_theme().await;
                apply_theme(saved);
                theme.set(saved);

                let config = load_config().await;
                let capabilities = Capabilities::chrome(&config);
                let available = capabilities.available_count().await;
                ai_status.set(Some(AiStatus {
                    available,
                    total: NoteKind::ALL.len(),
                }));
            });
            || ()
        });
    }

    let on_refresh = {
        let reload = reload.clone();
        Callback::from(move |_| {
            reload.set(reload.wrapping_add(1));
        })
    };

    let on_toggle_theme = {
        let theme = theme.clone();
        Callback::from(move |_| {
            let next = theme.toggled();
            apply_theme(next);
            theme.set(next);

            spawn_local(async move {
                let value = JsValue::from_str(next.value());
                if let Err(e) = bridge::setSyncStorage(THEME_KEY, value).await {
                    log::warn!("Failed to save theme: {}", bridge::js_error_message(&e));
                }
            });
        })
    };

    let on_filter_change = {
        let filter = filter.clone();
        Callback::from(move |e: Event| {
            if let Some(select) = e.target_dyn_into::<HtmlSelectElement>() {
                filter.set(NoteFilter::from_value(&select.value()));
            }
        })
    };

    let on_export = {
        let notebook = notebook.clone();

        Callback::from(move |_| {
            match serde_json::to_string_pretty(&*notebook) {
                Ok(json) => {
                    bridge::exportToFile(&json, &export_filename(js_sys::Date::now()));
                }
                Err(e) => {
                    log::error!("Export failed: {:?}", e);
                }
            }
        })
    };

    let on_copy = {
        let copied_key = copied_key.clone();

        Callback::from(move |block: NoteBlock| {
            let copied_key = copied_key.clone();
            spawn_local(async move {
                match bridge::copyToClipboard(&block.content).await {
                    Ok(_) => copied_key.set(Some(block.key)),
                    Err(e) => {
                        log::warn!("Copy failed: {}", bridge::js_error_message(&e));
                    }
                }
            });
        })
    };

    let blocks = render_blocks(&notebook, *filter);
    let is_loading = matches!(*state, ViewState::Loading);

    html! {
        <div class="container">
            <div class="header">
                <h1 class="main-title">{"Pocket Mentor Notebook"}</h1>
                <div class="header-actions">
                    <Button onclick={on_toggle_theme} variant={ButtonVariant::Secondary}>
                        {theme.toggle_label()}
                    </Button>
                    <Button
                        onclick={on_refresh}
                        disabled={is_loading}
                        variant={ButtonVariant::Secondary}
                    >
                        {"🔄 Refresh"}
                    </Button>
                    <Button
                        onclick={on_export}
                        disabled={notebook.is_empty()}
                        variant={ButtonVariant::Secondary}
                    >
                        {"📥 Export"}
                    </Button>
                </div>
            </div>

            if let Some(status) = (*ai_status).clone() {
                <Alert
                    r#type={if status.available == status.total {
                        AlertType::Success
                    } else {
                        AlertType::Warning
                    }}
                    title={availability_message(status.available, status.total)}
                    inline={true}
                >
                </Alert>
            }

            // Status display
            {match &*state {
                ViewState::Loading => html! {
                    <div class="loading-text-center">
                        <Spinner />
                        <p class="loading-text">{"Loading notes..."}</p>
                    </div>
                },
                ViewState::Error(err) => html! {
                    <Alert r#type={AlertType::Danger} title={"Error"} inline={true}>
                        {err.clone()}
                    </Alert>
                },
                ViewState::Idle => html! {}
            }}

            <div class="filter-container">
                <select class="notes-filter" onchange={on_filter_change}>
                    <option
                        value={NoteFilter::All.value()}
                        selected={*filter == NoteFilter::All}
                    >
                        {"All notes"}
                    </option>
                    {for NoteKind::ALL.iter().map(|kind| html! {
                        <option
                            value={kind.id()}
                            selected={*filter == NoteFilter::Only(*kind)}
                        >
                            {kind.display_name()}
                        </option>
                    })}
                </select>
            </div>

            // Container is rebuilt from the stored list on every render
            <div id="notes" class="notes-list">
                if blocks.is_empty() && !is_loading {
                    <EmptyState filtered={*filter != NoteFilter::All} />
                } else {
                    {for blocks.into_iter().map(|block| {
                        let key = block.key.clone();
                        let copied = (*copied_key).as_ref() == Some(&key);
                        html! {
                            <NoteCard
                                key={key}
                                block={block}
                                copied={copied}
                                on_copy={on_copy.clone()}
                            />
                        }
                    })}
                }
            </div>

            <div class="footer">
                {stats_line(&notebook)}
            </div>
        </div>
    }
}

async fn load_notebook() -> Result<NotebookData, StoreError> {
    let config = load_config().await;
    ChromeNoteStore::new(config.storage_key).get().await
}

async fn load_theme() -> Theme {
    match bridge::getSyncStorage(THEME_KEY).await {
        Ok(value) => Theme::from_stored(value.as_string().as_deref()),
        Err(e) => {
            log::warn!("Failed to load theme: {}", bridge::js_error_message(&e));
            Theme::default()
        }
    }
}

fn apply_theme(theme: Theme) {
    if let Some(body) = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.body())
    {
        body.set_class_name(&theme.body_class());
    }
}
