//! 端末でのワークフロー操作
//!
//! - 対話モード: dialoguer で状態ごとに選択肢を出す
//! - 一括モード: シリアル番号を引数で受け取り、結果をそのまま返す

use crate::display::{format_details, format_summary};
use crate::error::{MediscanError, Result};
use dialoguer::{Input, Select};
use mediscan_common::{Error, KeyValueStorage, SerialError, Workflow, WorkflowState};

/// ワークフローの入口
#[derive(Debug, Clone)]
pub enum Lookup {
    /// QRの読取結果
    Scan(String),
    /// 手入力の検索語
    Search(String),
}

impl Lookup {
    fn apply<S: KeyValueStorage>(&self, workflow: &mut Workflow<'_, S>) {
        match self {
            Lookup::Scan(payload) => workflow.scan(payload),
            Lookup::Search(term) => workflow.search(term),
        };
    }
}

/// 一括モードの結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// 医薬品を特定（シリアル未指定）
    Found { drug_id: String },
    /// 真正性を確認
    Authenticated {
        drug_id: String,
        serial: String,
        scan_count: u32,
    },
}

/// 対話なしで1回だけ実行
///
/// 見つからない・シリアル不一致はエラーとして返す。
pub fn run_scripted<S: KeyValueStorage>(
    workflow: &mut Workflow<'_, S>,
    lookup: &Lookup,
    serial: Option<&str>,
) -> Result<Outcome> {
    workflow.reset();
    lookup.apply(workflow);

    let drug_id = match workflow.state() {
        WorkflowState::Found { drug } => drug.id.clone(),
        WorkflowState::NotFound { query, .. } => {
            return Err(Error::LookupNotFound(query.clone()).into());
        }
        other => unreachable!("lookup left workflow in {}", other.stage()),
    };

    let Some(serial) = serial else {
        return Ok(Outcome::Found { drug_id });
    };

    workflow.choose_verify();
    workflow.set_serial_input(serial.to_string());
    match workflow.submit_serial() {
        Some(Ok(_)) => {}
        Some(Err(e)) => return Err(Error::Serial(e).into()),
        None => unreachable!("verify choice did not enter serial entry"),
    }

    match workflow.state() {
        WorkflowState::Authenticated {
            drug,
            serial,
            scan_count,
        } => Ok(Outcome::Authenticated {
            drug_id: drug.id.clone(),
            serial: serial.to_string(),
            scan_count: *scan_count,
        }),
        other => unreachable!("accepted serial left workflow in {}", other.stage()),
    }
}

/// 対話モード
pub fn run_interactive<S: KeyValueStorage>(
    workflow: &mut Workflow<'_, S>,
    first: Lookup,
) -> Result<()> {
    workflow.reset();
    first.apply(workflow);

    loop {
        match workflow.state().clone() {
            WorkflowState::Idle { .. } => match prompt_lookup()? {
                Some(lookup) => lookup.apply(workflow),
                None => break,
            },

            WorkflowState::Found { drug } => {
                println!("✔ Medicine found: {}\n", format_summary(&drug));
                match select("Next", &["View details", "Verify authenticity", "Back"])? {
                    0 => {
                        show_details(workflow);
                        break;
                    }
                    1 => {
                        workflow.choose_verify();
                    }
                    _ => workflow.reset(),
                }
            }

            WorkflowState::NotFound { query, message } => {
                println!("✗ Not found: {}\n  {}\n", query, message);
                match select("Next", &["Try again", "Quit"])? {
                    0 => workflow.reset(),
                    _ => break,
                }
            }

            WorkflowState::EnteringSerial { drug, input, error } => {
                if let Some(e) = error {
                    println!("  ✗ {}", serial_hint(e));
                }

                let entered: String = Input::new()
                    .with_prompt(format!("Serial number for {} (empty to cancel)", drug.name))
                    .with_initial_text(input)
                    .allow_empty(true)
                    .interact_text()?;

                if entered.trim().is_empty() {
                    workflow.reset();
                    continue;
                }

                workflow.set_serial_input(entered);
                workflow.submit_serial();
            }

            WorkflowState::Authenticated {
                drug,
                serial,
                scan_count,
            } => {
                println!(
                    "✔ {} is authentic (serial {})\n  Scan count: {}\n",
                    drug.name, serial, scan_count
                );
                match select("Next", &["View details", "Scan another", "Quit"])? {
                    0 => {
                        show_details(workflow);
                        break;
                    }
                    1 => workflow.scan_another(),
                    _ => break,
                }
            }
        }
    }

    Ok(())
}

/// 入力欄に添えるエラーメッセージ
pub fn serial_hint(error: SerialError) -> String {
    match error {
        SerialError::WrongLength(_) | SerialError::WrongFormat => {
            format!("{} (e.g. ABC123456)", error)
        }
        SerialError::Mismatch => format!("{}. Check the code printed on the package.", error),
    }
}

fn show_details<S: KeyValueStorage>(workflow: &Workflow<'_, S>) {
    let Some(request) = workflow.view_details() else {
        return;
    };
    if let Some(drug) = workflow.catalog().find_by_id(&request.drug_id) {
        println!("\n{}", format_details(drug, request.authenticated));
    }
}

fn prompt_lookup() -> Result<Option<Lookup>> {
    let choice = select("Look up a medicine", &["Enter scanned QR payload", "Search by name or ID", "Quit"])?;
    if choice == 2 {
        return Ok(None);
    }

    let text: String = Input::new()
        .with_prompt(if choice == 0 { "Payload" } else { "Name or ID" })
        .interact_text()?;

    Ok(Some(if choice == 0 {
        Lookup::Scan(text)
    } else {
        Lookup::Search(text)
    }))
}

fn select(prompt: &str, items: &[&str]) -> Result<usize> {
    Select::new()
        .with_prompt(prompt)
        .items(items)
        .default(0)
        .interact()
        .map_err(MediscanError::from)
}
