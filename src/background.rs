/// Service-worker entry points called from background.js

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;

use crate::ai::Capabilities;
use crate::bridge;
use crate::config::{load_config, NotebookConfig};
use crate::dispatcher::{outcome_message, Dispatcher};
use crate::menu;
use crate::storage::ChromeNoteStore;

const NOTIFICATION_TITLE: &str = "Pocket Mentor";

struct Worker {
    config: NotebookConfig,
    dispatcher: Dispatcher<ChromeNoteStore>,
}

impl Worker {
    fn new(config: NotebookConfig) -> Self {
        let dispatcher = Dispatcher::new(
            ChromeNoteStore::new(config.storage_key.clone()),
            Capabilities::chrome(&config),
        )
        .with_clock(|| Some(bridge::now_iso()));

        Worker { config, dispatcher }
    }
}

thread_local! {
    // One dispatcher per worker so its append lock spans every click
    static WORKER: RefCell<Option<Rc<Worker>>> = const { RefCell::new(None) };
}

async fn worker() -> Rc<Worker> {
    if let Some(worker) = WORKER.with(|cell| cell.borrow().clone()) {
        return worker;
    }

    let config = load_config().await;
    WORKER.with(|cell| {
        cell.borrow_mut()
            .get_or_insert_with(|| Rc::new(Worker::new(config)))
            .clone()
    })
}

/// chrome.runtime.onInstalled
#[wasm_bindgen]
pub async fn on_installed() -> Result<(), JsValue> {
    menu::register_menus()
        .await
        .map_err(|e| JsValue::from_str(&e))
}

/// chrome.contextMenus.onClicked
#[wasm_bindgen]
pub async fn on_menu_click(menu_item_id: String, selection_text: Option<String>) {
    let worker = worker().await;

    let result = worker
        .dispatcher
        .dispatch(&menu_item_id, selection_text.as_deref())
        .await;

    if let Err(e) = &result {
        log::warn!("{} action did not produce a note: {}", menu_item_id, e);
    }

    if worker.config.notify {
        bridge::notify(NOTIFICATION_TITLE, &outcome_message(&result));
    }
}
