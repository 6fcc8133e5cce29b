//! 医薬品詳細画面コンポーネント

use leptos::prelude::*;
use mediscan_common::{Catalog, DrugRecord, Usefulness};
use crate::app::{Navigator, Page};

#[component]
pub fn DrugInfo(id: String, authenticated: bool) -> impl IntoView {
    let nav = expect_context::<Navigator>();

    let Some(drug) = Catalog::builtin().find_by_id(&id) else {
        log::warn!("unknown drug id in url: {}", id);
        return view! {
            <section class="drug-info not-found">
                <h1>"Medicine not found"</h1>
                <p class="text-muted">"No medicine with ID \"" {id} "\" exists in our database."</p>
                <button class="btn btn-primary" on:click=move |_| nav.go(Page::Scan)>
                    "Scan QR Code"
                </button>
            </section>
        }
        .into_any();
    };

    view! {
        <section class="drug-info">
            <Show when=move || authenticated>
                <div class="auth-banner">"Serial number verified - this package is authentic"</div>
            </Show>

            <header class="drug-header">
                <h1>{drug.name.clone()}</h1>
                <p class="text-muted">{drug.generic_name.clone()}</p>
                <span class="badge">{drug.category.clone()}</span>
            </header>

            <Overview drug=drug />
            <Doses drug=drug />
            <Warnings drug=drug />
            <Indications drug=drug />
            <RegimenSection drug=drug />
            <Interactions drug=drug />

            <button class="btn btn-secondary" on:click=move |_| nav.go(Page::Scan)>
                "Scan Another"
            </button>
        </section>
    }
    .into_any()
}

#[component]
fn Overview(drug: &'static DrugRecord) -> impl IntoView {
    let row = |label: &'static str, value: &str| {
        view! {
            <tr>
                <th>{label}</th>
                <td>{value.to_string()}</td>
            </tr>
        }
    };

    view! {
        <div class="card">
            <h2>"Product"</h2>
            <table class="info-table">
                {row("Manufacturer", &drug.manufacturer)}
                {row("Batch No.", &drug.batch_no)}
                {row("Mfg. Date", &drug.mfg_date)}
                {row("Exp. Date", &drug.exp_date)}
                {row("Authenticity", if drug.authenticity_verified { "Listed as authentic" } else { "Not listed" })}
            </table>
            {(!drug.authenticity_note.is_empty()).then(|| view! {
                <p class="text-muted">{drug.authenticity_note.clone()}</p>
            })}
        </div>
    }
}

#[component]
fn Doses(drug: &'static DrugRecord) -> impl IntoView {
    (!drug.doses.is_empty()).then(|| {
        view! {
            <div class="card">
                <h2>"Available Doses"</h2>
                <ul class="dose-list">
                    {drug.doses.iter().map(|dose| view! {
                        <li>
                            <strong>{dose.strength.clone()}</strong>
                            " "
                            <span class="text-muted">{dose.form.clone()}</span>
                        </li>
                    }).collect_view()}
                </ul>
            </div>
        }
    })
}

#[component]
fn Warnings(drug: &'static DrugRecord) -> impl IntoView {
    (!drug.warnings.is_empty()).then(|| {
        view! {
            <div class="card warnings">
                <h2>"Warnings"</h2>
                {drug.warnings.iter().map(|(category, text)| view! {
                    <div class="warning-item">
                        <h3>{category.clone()}</h3>
                        <p>{text.clone()}</p>
                    </div>
                }).collect_view()}
            </div>
        }
    })
}

#[component]
fn Indications(drug: &'static DrugRecord) -> impl IntoView {
    (!drug.indications.is_empty()).then(|| {
        view! {
            <div class="card">
                <h2>"Indications"</h2>
                <ul>
                    {drug.indications.iter().map(|i| view! { <li>{i.clone()}</li> }).collect_view()}
                </ul>
            </div>
        }
    })
}

#[component]
fn RegimenSection(drug: &'static DrugRecord) -> impl IntoView {
    let regimen = &drug.regimen;
    (!regimen.general.is_empty() || !regimen.specific.is_empty()).then(|| {
        view! {
            <div class="card">
                <h2>"Dosage Regimen"</h2>
                <p>{regimen.general.clone()}</p>
                <table class="info-table">
                    {regimen.specific.iter().map(|entry| view! {
                        <tr>
                            <th>{entry.condition.clone()}</th>
                            <td>{entry.duration.clone()}</td>
                        </tr>
                    }).collect_view()}
                </table>
            </div>
        }
    })
}

#[component]
fn Interactions(drug: &'static DrugRecord) -> impl IntoView {
    view! {
        {(!drug.food_interactions.is_empty()).then(|| view! {
            <div class="card">
                <h2>"Food Interactions"</h2>
                <ul>
                    {drug.food_interactions.iter().map(|fi| view! {
                        <li><strong>{fi.item.clone()}</strong>": "{fi.effect.clone()}</li>
                    }).collect_view()}
                </ul>
            </div>
        })}

        {(!drug.drug_interactions.is_empty()).then(|| view! {
            <div class="card">
                <h2>"Drug Interactions"</h2>
                {drug.drug_interactions.iter().map(|di| view! {
                    <div class="interaction-item">
                        <div class="interaction-head">
                            <strong>{di.drug.clone()}</strong>
                            <span class=format!("badge {}", usefulness_class(di.useful))>
                                {di.useful.label()}
                            </span>
                        </div>
                        <p>{di.description.clone()}</p>
                    </div>
                }).collect_view()}
            </div>
        })}
    }
}

/// 有用性バッジのCSSクラス
fn usefulness_class(useful: Usefulness) -> &'static str {
    match useful {
        Usefulness::Useful => "badge-success",
        Usefulness::UsefulButRisky => "badge-warning",
        Usefulness::NotUseful => "badge-danger",
    }
}
