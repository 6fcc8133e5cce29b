//! JavaScript Bridge バインディング
//!
//! カメラ読取（html5-qrcode）・クリップボード・PNG保存をJavaScript側に委譲する。

use wasm_bindgen::prelude::*;

#[wasm_bindgen(module = "/js/qr-bridge.js")]
extern "C" {
    #[wasm_bindgen(js_name = "startScanner", catch)]
    fn start_scanner_js(
        element_id: &str,
        on_decode: &Closure<dyn FnMut(String)>,
        on_error: &Closure<dyn FnMut(String, String)>,
    ) -> Result<(), JsValue>;

    #[wasm_bindgen(js_name = "stopScanner", catch)]
    fn stop_scanner_js() -> Result<(), JsValue>;

    #[wasm_bindgen(js_name = "copyText", catch)]
    async fn copy_text_js(text: &str) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(js_name = "downloadSvgAsPng")]
    fn download_svg_as_png_js(svg: &str, file_name: &str, caption: &str);
}

/// カメラ読取を開始（失敗は `on_error` に非同期で通知される）
pub fn start_scanner(
    element_id: &str,
    on_decode: &Closure<dyn FnMut(String)>,
    on_error: &Closure<dyn FnMut(String, String)>,
) -> Result<(), String> {
    start_scanner_js(element_id, on_decode, on_error).map_err(|e| js_error_message(&e))
}

/// カメラ読取を停止（取得待ちの場合は取得後に停止される）
pub fn stop_scanner() {
    if let Err(e) = stop_scanner_js() {
        log::warn!("failed to stop scanner: {}", js_error_message(&e));
    }
}

pub async fn copy_text(text: &str) -> Result<(), String> {
    copy_text_js(text)
        .await
        .map(|_| ())
        .map_err(|e| format!("Failed to copy: {}", js_error_message(&e)))
}

pub fn download_svg_as_png(svg: &str, file_name: &str, caption: &str) {
    download_svg_as_png_js(svg, file_name, caption);
}

fn js_error_message(value: &JsValue) -> String {
    value
        .as_string()
        .or_else(|| {
            value
                .dyn_ref::<js_sys::Error>()
                .map(|e| String::from(e.message()))
        })
        .unwrap_or_else(|| format!("{:?}", value))
}
