//! QRコード生成画面コンポーネント

use gloo::timers::callback::Timeout;
use leptos::prelude::*;
use mediscan_common::qr::{self, GeneratedQr};
use mediscan_common::{Catalog, SvgQrRenderer};
use crate::app::base_address;
use crate::bridge;
use wasm_bindgen_futures::spawn_local;

const COPIED_RESET_MS: u32 = 2000;

fn render_qr(id: &str) -> Option<GeneratedQr<String>> {
    match qr::generate(Catalog::builtin(), id, &base_address(), &SvgQrRenderer::default()) {
        Ok(generated) => Some(generated),
        Err(e) => {
            log::error!("qr generation failed for {}: {}", id, e);
            None
        }
    }
}

#[component]
pub fn GeneratePage() -> impl IntoView {
    let catalog = Catalog::builtin();
    let first_id = catalog.all().first().map(|d| d.id.clone()).unwrap_or_default();

    let (selected, set_selected) = signal(first_id);
    let (copied, set_copied) = signal(false);
    let (copy_error, set_copy_error) = signal(None::<String>);

    let generated = Memo::new(move |_| {
        selected.with(|id| render_qr(id).map(|g| (g.drug_id, g.url, g.image)))
    });
    let url = move || generated.with(|g| g.as_ref().map(|(_, url, _)| url.clone()).unwrap_or_default());
    let svg = move || generated.with(|g| g.as_ref().map(|(_, _, svg)| svg.clone()).unwrap_or_default());

    let on_copy = move |_| {
        let text = url();
        spawn_local(async move {
            match bridge::copy_text(&text).await {
                Ok(()) => {
                    set_copy_error.set(None);
                    set_copied.set(true);
                    Timeout::new(COPIED_RESET_MS, move || set_copied.set(false)).forget();
                }
                Err(e) => {
                    log::warn!("{}", e);
                    set_copy_error.set(Some(e));
                }
            }
        });
    };

    let on_download = move |_| {
        let Some((drug_id, url, svg)) = generated.get() else {
            return;
        };
        bridge::download_svg_as_png(&svg, &format!("{}-qrcode.png", drug_id), &url);
    };

    view! {
        <section class="generate-page">
            <h1>"Generate QR Code"</h1>

            <label for="drug-select">"Medicine"</label>
            <select
                id="drug-select"
                prop:value=move || selected.get()
                on:change=move |ev| {
                    set_copied.set(false);
                    set_selected.set(event_target_value(&ev));
                }
            >
                {catalog.all().iter().map(|drug| view! {
                    <option value=drug.id.clone()>{drug.name.clone()}</option>
                }).collect_view()}
            </select>

            <div class="qr-preview" inner_html=svg />

            <div class="qr-url">
                <code>{url}</code>
            </div>

            <div class="result-actions">
                <button class="btn btn-primary" on:click=on_copy>
                    {move || if copied.get() { "Copied!" } else { "Copy URL" }}
                </button>
                <button class="btn btn-secondary" on:click=on_download>
                    "Download PNG"
                </button>
            </div>

            {move || copy_error.get().map(|e| view! { <p class="field-error">{e}</p> })}
        </section>
    }
}
