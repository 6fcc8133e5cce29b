//! トップ画面コンポーネント

use leptos::prelude::*;
use crate::app::{Navigator, Page};

#[component]
pub fn Home() -> impl IntoView {
    let nav = expect_context::<Navigator>();

    view! {
        <section class="home">
            <h1>"Verify your medicine in seconds"</h1>
            <p class="text-muted">
                "Scan the QR code on the package to see drug information and check its serial number."
            </p>
            <div class="home-actions">
                <button class="btn btn-primary" on:click=move |_| nav.go(Page::Scan)>
                    "Scan QR Code"
                </button>
                <button class="btn btn-secondary" on:click=move |_| nav.go(Page::Generate)>
                    "Generate QR Code"
                </button>
            </div>
        </section>
    }
}
