//! 読取画面コンポーネント
//!
//! カメラ読取・手入力検索 → 結果表示 → シリアル確認の流れを
//! 共通ワークフローで駆動する。

use leptos::prelude::*;
use mediscan_common::{Action, Catalog, Effect, ScanCounterStore, Stage, Workflow, WorkflowState};
use crate::app::{Navigator, Page};
use crate::components::{scanner::Scanner, serial_form::SerialForm};
use crate::storage::BrowserStorage;

pub type WebWorkflow = Workflow<'static, BrowserStorage>;

#[component]
pub fn ScanPage() -> impl IntoView {
    let nav = expect_context::<Navigator>();
    let workflow = RwSignal::new(Workflow::new(
        Catalog::builtin(),
        ScanCounterStore::new(BrowserStorage),
    ));
    let stage = Memo::new(move |_| workflow.with(|wf| wf.state().stage()));

    let dispatch = move |action: Action| {
        if let Some(Effect::ShowDetails(req)) = workflow.try_update(|wf| wf.dispatch(action)) {
            nav.go(Page::Drug {
                id: req.drug_id,
                authenticated: req.authenticated,
            });
        }
    };

    let state = move || workflow.with(|wf| wf.state().clone());

    view! {
        <section class="scan-page">
            <h1>"Scan Medicine"</h1>

            <Show when=move || stage.get() == Stage::Idle>
                <Scanner on_decode=move |payload: String| dispatch(Action::Scan(payload)) />
                <SearchForm workflow=workflow on_action=dispatch />
            </Show>

            <Show when=move || stage.get() == Stage::Found>
                {move || match state() {
                    WorkflowState::Found { drug } => view! {
                        <div class="result-card">
                            <p class="result-title">"Medicine found"</p>
                            <h2>{drug.name.clone()}</h2>
                            <p class="text-muted">{drug.generic_name.clone()}" - "{drug.category.clone()}</p>
                            <div class="result-actions">
                                <button class="btn btn-primary" on:click=move |_| dispatch(Action::ViewDetails)>
                                    "View Details"
                                </button>
                                <button class="btn btn-secondary" on:click=move |_| dispatch(Action::ChooseVerify)>
                                    "Verify Authenticity"
                                </button>
                                <button class="btn btn-tertiary" on:click=move |_| dispatch(Action::Reset)>
                                    "Back"
                                </button>
                            </div>
                        </div>
                    }.into_any(),
                    _ => ().into_any(),
                }}
            </Show>

            <Show when=move || stage.get() == Stage::NotFound>
                {move || match state() {
                    WorkflowState::NotFound { query, message } => view! {
                        <div class="result-card not-found">
                            <p class="result-title">"Medicine not found"</p>
                            <p>{message}</p>
                            <p class="text-muted">{query}</p>
                            <button class="btn btn-primary" on:click=move |_| dispatch(Action::Reset)>
                                "Try Again"
                            </button>
                        </div>
                    }.into_any(),
                    _ => ().into_any(),
                }}
            </Show>

            <Show when=move || stage.get() == Stage::EnteringSerial>
                <SerialForm workflow=workflow on_action=dispatch />
            </Show>

            <Show when=move || stage.get() == Stage::Authenticated>
                {move || match state() {
                    WorkflowState::Authenticated { drug, serial, scan_count } => view! {
                        <div class="result-card authenticated">
                            <p class="result-title">"Authentic medicine"</p>
                            <h2>{drug.name.clone()}</h2>
                            <p>"Serial number "<strong>{serial.to_string()}</strong>" verified."</p>
                            <p class="scan-count">
                                {scan_count_message(scan_count)}
                            </p>
                            <div class="result-actions">
                                <button class="btn btn-primary" on:click=move |_| dispatch(Action::ViewDetails)>
                                    "View Details"
                                </button>
                                <button class="btn btn-secondary" on:click=move |_| dispatch(Action::Reset)>
                                    "Scan Another"
                                </button>
                            </div>
                        </div>
                    }.into_any(),
                    _ => ().into_any(),
                }}
            </Show>
        </section>
    }
}

/// 手入力検索とカタログへのクイックリンク
#[component]
fn SearchForm<F>(workflow: RwSignal<WebWorkflow>, on_action: F) -> impl IntoView
where
    F: Fn(Action) + Copy + 'static,
{
    let search = move || {
        workflow.with(|wf| match wf.state() {
            WorkflowState::Idle { search } => search.clone(),
            _ => String::new(),
        })
    };

    let quick_links = Catalog::builtin()
        .all()
        .iter()
        .map(|drug| {
            let id = drug.id.clone();
            view! {
                <button
                    class="quick-link"
                    on:click=move |_| {
                        on_action(Action::SetSearchInput(id.clone()));
                        on_action(Action::SubmitSearch);
                    }
                >
                    {drug.name.clone()}
                </button>
            }
        })
        .collect_view();

    view! {
        <form
            class="search-form"
            on:submit=move |ev| {
                ev.prevent_default();
                on_action(Action::SubmitSearch);
            }
        >
            <label for="drug-search">"Or search by name or ID"</label>
            <div class="search-row">
                <input
                    id="drug-search"
                    type="text"
                    placeholder="e.g. amoxicillin"
                    prop:value=search
                    on:input=move |ev| on_action(Action::SetSearchInput(event_target_value(&ev)))
                />
                <button type="submit" class="btn btn-primary">"Search"</button>
            </div>
        </form>

        <div class="quick-links">
            <p class="text-muted">"Available medicines"</p>
            {quick_links}
        </div>
    }
}

/// 回数表示
pub fn scan_count_message(scan_count: u32) -> String {
    match scan_count {
        1 => "Scanned 1 time".to_string(),
        n => format!("Scanned {} times", n),
    }
}
