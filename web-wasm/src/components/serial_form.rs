//! シリアル番号入力フォーム

use leptos::prelude::*;
use mediscan_common::{Action, WorkflowState};
use crate::components::scan_page::WebWorkflow;

#[component]
pub fn SerialForm<F>(workflow: RwSignal<WebWorkflow>, on_action: F) -> impl IntoView
where
    F: Fn(Action) + Copy + 'static,
{
    let drug_name = move || workflow.with(|wf| wf.state().drug().map(|d| d.name.clone()).unwrap_or_default());
    let input = move || {
        workflow.with(|wf| match wf.state() {
            WorkflowState::EnteringSerial { input, .. } => input.clone(),
            _ => String::new(),
        })
    };
    let error = move || {
        workflow.with(|wf| match wf.state() {
            WorkflowState::EnteringSerial { error, .. } => error.map(|e| e.to_string()),
            _ => None,
        })
    };

    view! {
        <form
            class="serial-form result-card"
            on:submit=move |ev| {
                ev.prevent_default();
                on_action(Action::SubmitSerial);
            }
        >
            <p class="result-title">"Verify Authenticity"</p>
            <p class="text-muted">
                "Enter the serial number printed on the package of " {drug_name}
            </p>

            <input
                type="text"
                class="serial-input"
                class:invalid=move || error().is_some()
                maxlength="12"
                placeholder="ABC123456"
                autocomplete="off"
                prop:value=input
                on:input=move |ev| on_action(Action::SetSerialInput(event_target_value(&ev)))
            />

            {move || error().map(|message| view! { <p class="field-error">{message}</p> })}

            <div class="result-actions">
                <button type="submit" class="btn btn-primary">"Verify"</button>
                <button type="button" class="btn btn-tertiary" on:click=move |_| on_action(Action::Reset)>
                    "Cancel"
                </button>
            </div>
        </form>
    }
}
