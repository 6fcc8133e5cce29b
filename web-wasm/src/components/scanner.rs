//! カメラ読取コンポーネント
//!
//! 読取結果は ScanSession（容量1）で受け取り、最初の1件で読取を停止する。
//! 画面を離れる時も必ずカメラを解放する。

use leptos::prelude::*;
use mediscan_common::{DecodeSender, DecodeSource, ScanSession};
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use crate::bridge;

const READER_ELEMENT_ID: &str = "qr-reader";

/// カメラ読取元
pub struct CameraSource {
    element_id: &'static str,
    on_error: Rc<dyn Fn(String)>,
    on_decoded: Rc<dyn Fn()>,
    decode_cb: Option<Closure<dyn FnMut(String)>>,
    error_cb: Option<Closure<dyn FnMut(String, String)>>,
}

impl CameraSource {
    pub fn new(element_id: &'static str, on_error: Rc<dyn Fn(String)>, on_decoded: Rc<dyn Fn()>) -> Self {
        Self {
            element_id,
            on_error,
            on_decoded,
            decode_cb: None,
            error_cb: None,
        }
    }
}

impl DecodeSource for CameraSource {
    fn start(&mut self, sender: DecodeSender) -> Result<(), String> {
        let on_decoded = Rc::clone(&self.on_decoded);
        let decode_cb = Closure::<dyn FnMut(String)>::new(move |text: String| {
            if sender.offer(text) {
                on_decoded();
            }
        });

        let on_error = Rc::clone(&self.on_error);
        let error_cb = Closure::<dyn FnMut(String, String)>::new(move |name: String, message: String| {
            on_error(camera_error_message(&name, &message));
        });

        bridge::start_scanner(self.element_id, &decode_cb, &error_cb)?;
        self.decode_cb = Some(decode_cb);
        self.error_cb = Some(error_cb);
        Ok(())
    }

    fn stop(&mut self) {
        bridge::stop_scanner();
        self.decode_cb = None;
        self.error_cb = None;
    }
}

/// カメラ取得エラーの表示メッセージ
pub fn camera_error_message(name: &str, message: &str) -> String {
    match name {
        "NotAllowedError" => {
            "Camera permission denied. Please allow camera access in your browser settings.".to_string()
        }
        "NotFoundError" => "No camera found on this device.".to_string(),
        "NotReadableError" => "Camera is already in use by another application.".to_string(),
        _ if !message.is_empty() => message.to_string(),
        _ => "Failed to access camera".to_string(),
    }
}

#[component]
pub fn Scanner<F>(on_decode: F) -> impl IntoView
where
    F: Fn(String) + 'static + Clone,
{
    let (is_scanning, set_is_scanning) = signal(false);
    let (error, set_error) = signal(None::<String>);
    let (decoded_tick, set_decoded_tick) = signal(0u32);
    let session = StoredValue::new_local(None::<ScanSession<CameraSource>>);

    let stop = move || {
        session.update_value(|s| {
            if let Some(s) = s.take() {
                s.close();
            }
        });
        set_is_scanning.set(false);
    };

    let start = move || {
        stop();
        set_error.set(None);

        let on_error: Rc<dyn Fn(String)> = Rc::new(move |message: String| {
            log::warn!("camera error: {}", message);
            set_error.set(Some(message));
        });
        let on_decoded: Rc<dyn Fn()> = Rc::new(move || set_decoded_tick.update(|n| *n += 1));

        match ScanSession::open(CameraSource::new(READER_ELEMENT_ID, on_error, on_decoded)) {
            Ok(s) => {
                session.set_value(Some(s));
                set_is_scanning.set(true);
            }
            Err(e) => set_error.set(Some(e.to_string())),
        }
    };

    // 読取通知 → 1件取り出して停止
    Effect::new(move |_| {
        if decoded_tick.get() == 0 {
            return;
        }
        let payload = session.with_value(|s| s.as_ref().and_then(|s| s.poll()));
        if let Some(payload) = payload {
            stop();
            on_decode(payload);
        }
    });

    // エラー時の停止はJSコールバックの外で行う
    Effect::new(move |_| {
        if error.with(|e| e.is_some()) {
            stop();
        }
    });

    on_cleanup(move || stop());

    view! {
        <div class="scanner">
            <div
                id=READER_ELEMENT_ID
                class="qr-reader-container"
                style:display=move || if is_scanning.get() { "block" } else { "none" }
            />

            <Show when=move || !is_scanning.get()>
                <div class="scanner-placeholder">
                    {move || match error.get() {
                        Some(message) => view! {
                            <div class="scanner-error">
                                <p class="error-title">"Camera Error"</p>
                                <p class="text-muted">{message}</p>
                                <button class="btn btn-tertiary" on:click=move |_| start()>
                                    "Try Again"
                                </button>
                            </div>
                        }.into_any(),
                        None => view! {
                            <div class="scanner-ready">
                                <p class="ready-title">"Camera Ready"</p>
                                <p class="text-muted">"Click the button below to start scanning"</p>
                            </div>
                        }.into_any(),
                    }}
                </div>
            </Show>

            <div class="scanner-controls">
                {move || if is_scanning.get() {
                    view! {
                        <button class="btn btn-danger" on:click=move |_| stop()>"Stop Scanner"</button>
                    }.into_any()
                } else {
                    view! {
                        <button class="btn btn-primary" on:click=move |_| start()>"Start Scanner"</button>
                    }.into_any()
                }}
            </div>

            <Show when=move || is_scanning.get()>
                <p class="scanner-status">"Camera active - Point at QR code"</p>
            </Show>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camera_error_message() {
        assert!(camera_error_message("NotAllowedError", "").contains("permission denied"));
        assert_eq!(camera_error_message("NotFoundError", "x"), "No camera found on this device.");
        assert_eq!(camera_error_message("TypeError", "boom"), "boom");
        assert_eq!(camera_error_message("TypeError", ""), "Failed to access camera");
    }
}
