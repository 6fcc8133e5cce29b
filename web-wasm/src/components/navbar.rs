//! ナビゲーションバーコンポーネント

use leptos::prelude::*;
use crate::app::{Navigator, Page};

#[component]
pub fn Navbar(page: ReadSignal<Page>) -> impl IntoView {
    let nav = expect_context::<Navigator>();

    let link = move |label: &'static str, target: Page| {
        let is_active = {
            let target = target.clone();
            move || page.get() == target
        };
        view! {
            <button
                class="nav-link"
                class:active=is_active
                on:click=move |_| nav.go(target.clone())
            >
                {label}
            </button>
        }
    };

    view! {
        <nav class="navbar">
            <span class="brand">"MediScan"</span>
            {link("Home", Page::Home)}
            {link("Scan", Page::Scan)}
            {link("Generate QR", Page::Generate)}
        </nav>
    }
}
