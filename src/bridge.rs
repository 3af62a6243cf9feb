/// JS bridge to the chrome.* extension APIs (see bridge.js)

use wasm_bindgen::prelude::*;

#[wasm_bindgen(module = "/bridge.js")]
extern "C" {
    #[wasm_bindgen(catch)]
    pub async fn getStorage(key: &str) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    pub async fn setStorage(key: &str, value: JsValue) -> Result<(), JsValue>;

    #[wasm_bindgen(catch)]
    pub async fn getSyncStorage(key: &str) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    pub async fn setSyncStorage(key: &str, value: JsValue) -> Result<(), JsValue>;

    // Built-in AI. Each resolves to the result text, or null when the
    // capability answered with nothing.
    #[wasm_bindgen(catch)]
    pub async fn summarize(text: &str) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    pub async fn rewrite(text: &str, style: &str) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    pub async fn promptGenerate(input: &str) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    pub async fn aiAvailability(capability: &str) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    pub async fn createMenus(items: JsValue) -> Result<(), JsValue>;

    pub fn notify(title: &str, message: &str);

    pub fn exportToFile(data: &str, filename: &str);

    #[wasm_bindgen(catch)]
    pub async fn copyToClipboard(text: &str) -> Result<(), JsValue>;
}

/// Render a rejected promise value as a readable message.
pub fn js_error_message(err: &JsValue) -> String {
    if let Some(s) = err.as_string() {
        return s;
    }
    if let Some(e) = err.dyn_ref::<js_sys::Error>() {
        return String::from(e.message());
    }
    format!("{:?}", err)
}

/// Current time as an ISO-8601 string
pub fn now_iso() -> String {
    String::from(js_sys::Date::new_0().to_iso_string())
}
