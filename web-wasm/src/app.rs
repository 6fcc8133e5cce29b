//! メインアプリケーションコンポーネント

use leptos::prelude::*;
use crate::components::{
    navbar::Navbar,
    home::Home,
    scan_page::ScanPage,
    drug_info::DrugInfo,
    generate_page::GeneratePage,
};
use mediscan_common::qr::DRUG_PATH;
use mediscan_common::extract_drug_id;
use wasm_bindgen::prelude::*;

/// 表示中の画面
#[derive(Clone, Debug, PartialEq)]
pub enum Page {
    Home,
    Scan,
    Generate,
    /// 医薬品詳細（`authenticated`: 今回シリアル確認済み）
    Drug { id: String, authenticated: bool },
}

impl Page {
    /// URLパスから画面を決定
    pub fn from_path(path: &str) -> Self {
        if path.contains(DRUG_PATH) {
            return Page::Drug {
                id: extract_drug_id(path).to_string(),
                authenticated: false,
            };
        }

        match path.trim_end_matches('/') {
            "/scan" => Page::Scan,
            "/generate" => Page::Generate,
            _ => Page::Home,
        }
    }

    pub fn path(&self) -> String {
        match self {
            Page::Home => "/".to_string(),
            Page::Scan => "/scan".to_string(),
            Page::Generate => "/generate".to_string(),
            Page::Drug { id, .. } => format!("{}{}", DRUG_PATH, id),
        }
    }
}

/// 画面遷移（履歴にも積む）
#[derive(Clone, Copy)]
pub struct Navigator {
    set_page: WriteSignal<Page>,
}

impl Navigator {
    pub fn go(&self, page: Page) {
        if let Some(history) = web_sys::window().and_then(|w| w.history().ok()) {
            if let Err(e) = history.push_state_with_url(&wasm_bindgen::JsValue::NULL, "", Some(&page.path())) {
                log::warn!("history push failed: {:?}", e);
            }
        }
        self.set_page.set(page);
    }
}

/// 現在のオリジン（QRのベースURL）
pub fn base_address() -> String {
    web_sys::window()
        .and_then(|w| w.location().origin().ok())
        .unwrap_or_default()
}

fn current_path() -> String {
    web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_else(|| "/".to_string())
}

/// ブラウザの戻る/進むで画面を追従させる
pub fn watch_history(set_page: WriteSignal<Page>) {
    let Some(window) = web_sys::window() else {
        return;
    };

    let closure = Closure::wrap(Box::new(move |_: web_sys::Event| {
        set_page.set(Page::from_path(&current_path()));
    }) as Box<dyn FnMut(_)>);

    if let Err(e) = window.add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref()) {
        log::warn!("popstate listener not installed: {:?}", e);
        return;
    }
    // アプリと同じ寿命
    closure.forget();
}

/// メインアプリケーションコンポーネント
#[component]
pub fn App() -> impl IntoView {
    let (page, set_page) = signal(Page::from_path(&current_path()));
    provide_context(Navigator { set_page });
    watch_history(set_page);

    view! {
        <div class="container">
            <Navbar page=page />

            {move || match page.get() {
                Page::Home => view! { <Home /> }.into_any(),
                Page::Scan => view! { <ScanPage /> }.into_any(),
                Page::Generate => view! { <GeneratePage /> }.into_any(),
                Page::Drug { id, authenticated } => {
                    view! { <DrugInfo id=id authenticated=authenticated /> }.into_any()
                }
            }}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_from_path() {
        assert_eq!(Page::from_path("/"), Page::Home);
        assert_eq!(Page::from_path("/scan/"), Page::Scan);
        assert_eq!(Page::from_path("/generate"), Page::Generate);
        assert_eq!(
            Page::from_path("/drug/amoxicillin"),
            Page::Drug { id: "amoxicillin".into(), authenticated: false }
        );
        assert_eq!(Page::from_path("/unknown"), Page::Home);
    }

    #[test]
    fn test_page_path_roundtrip() {
        let page = Page::Drug { id: "ibuprofen".into(), authenticated: true };
        assert_eq!(page.path(), "/drug/ibuprofen");
        assert_eq!(Page::from_path(&Page::Generate.path()), Page::Generate);
    }
}
