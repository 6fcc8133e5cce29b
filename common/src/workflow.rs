//! 読取・検索ワークフロー（状態機械）
//!
//! ```text
//! Idle ──scan/search──▶ Found ──choose_verify──▶ EnteringSerial ──submit ok──▶ Authenticated
//!   │                     │                          │  ▲ submit ng (入力保持)
//!   └──────────────▶ NotFound                        └──┘
//! reset: 全状態 → Idle（入力バッファ破棄）
//! ```
//!
//! スキャン回数の加算は Authenticated に入る時の1回だけ。

use crate::catalog::Catalog;
use crate::error::SerialError;
use crate::qr::extract_drug_id;
use crate::scan_counter::ScanCounterStore;
use crate::serial::{self, NormalizedSerial};
use crate::storage::KeyValueStorage;
use crate::types::DrugRecord;
use std::fmt;

/// 読取結果がカタログにない場合のメッセージ
pub const SCAN_NOT_FOUND_MESSAGE: &str =
    "The scanned QR code doesn't match any medicine in our database.";
/// 手入力検索で見つからない場合のメッセージ
pub const SEARCH_NOT_FOUND_MESSAGE: &str = "No medicine found with that name or ID";

/// ワークフローの状態
#[derive(Debug, Clone, PartialEq)]
pub enum WorkflowState {
    /// 読取・検索待ち
    Idle { search: String },
    /// 医薬品を特定（詳細表示 or 真正性確認を選ぶ）
    Found { drug: DrugRecord },
    /// 該当なし
    NotFound { query: String, message: String },
    /// シリアル番号入力中
    EnteringSerial {
        drug: DrugRecord,
        input: String,
        error: Option<SerialError>,
    },
    /// 真正性確認済み
    Authenticated {
        drug: DrugRecord,
        serial: NormalizedSerial,
        scan_count: u32,
    },
}

impl Default for WorkflowState {
    fn default() -> Self {
        WorkflowState::Idle { search: String::new() }
    }
}

impl WorkflowState {
    pub fn stage(&self) -> Stage {
        match self {
            WorkflowState::Idle { .. } => Stage::Idle,
            WorkflowState::Found { .. } => Stage::Found,
            WorkflowState::NotFound { .. } => Stage::NotFound,
            WorkflowState::EnteringSerial { .. } => Stage::EnteringSerial,
            WorkflowState::Authenticated { .. } => Stage::Authenticated,
        }
    }

    /// 現在対象としている医薬品
    pub fn drug(&self) -> Option<&DrugRecord> {
        match self {
            WorkflowState::Found { drug }
            | WorkflowState::EnteringSerial { drug, .. }
            | WorkflowState::Authenticated { drug, .. } => Some(drug),
            WorkflowState::Idle { .. } | WorkflowState::NotFound { .. } => None,
        }
    }
}

/// 状態の種類（表示・ログ用）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Idle,
    Found,
    NotFound,
    EnteringSerial,
    Authenticated,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Idle => "idle",
            Stage::Found => "found",
            Stage::NotFound => "not-found",
            Stage::EnteringSerial => "entering-serial",
            Stage::Authenticated => "authenticated",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 詳細画面への遷移要求
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailsRequest {
    pub drug_id: String,
    /// 真正性を確認済みか
    pub authenticated: bool,
}

/// ユーザー操作
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Scan(String),
    SetSearchInput(String),
    SubmitSearch,
    ChooseVerify,
    SetSerialInput(String),
    SubmitSerial,
    ViewDetails,
    Reset,
}

/// 操作の結果
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// 状態が変わった（入力バッファの更新を含む）
    Updated,
    /// 現在の状態では無効な操作
    Ignored,
    /// 詳細画面へ
    ShowDetails(DetailsRequest),
}

/// ワークフロー
pub struct Workflow<'c, S> {
    catalog: &'c Catalog,
    counter: ScanCounterStore<S>,
    state: WorkflowState,
}

impl<'c, S: KeyValueStorage> Workflow<'c, S> {
    pub fn new(catalog: &'c Catalog, counter: ScanCounterStore<S>) -> Self {
        Self {
            catalog,
            counter,
            state: WorkflowState::default(),
        }
    }

    pub fn state(&self) -> &WorkflowState {
        &self.state
    }

    pub fn catalog(&self) -> &'c Catalog {
        self.catalog
    }

    pub fn counter(&self) -> &ScanCounterStore<S> {
        &self.counter
    }

    pub fn dispatch(&mut self, action: Action) -> Effect {
        let changed = match action {
            Action::Scan(payload) => self.scan(&payload),
            Action::SetSearchInput(text) => self.set_search_input(text),
            Action::SubmitSearch => self.submit_search(),
            Action::ChooseVerify => self.choose_verify(),
            Action::SetSerialInput(text) => self.set_serial_input(text),
            Action::SubmitSerial => self.submit_serial().is_some(),
            Action::ViewDetails => {
                return match self.view_details() {
                    Some(req) => Effect::ShowDetails(req),
                    None => Effect::Ignored,
                };
            }
            Action::Reset => {
                self.reset();
                true
            }
        };

        if changed {
            Effect::Updated
        } else {
            Effect::Ignored
        }
    }

    /// 読取結果を処理（Idle 以外では無視）
    pub fn scan(&mut self, payload: &str) -> bool {
        if !matches!(self.state, WorkflowState::Idle { .. }) {
            log::debug!("ignoring decode event while {}", self.state.stage());
            return false;
        }

        let id = extract_drug_id(payload);
        let next = match self.catalog.find_by_id(id) {
            Some(drug) => WorkflowState::Found { drug: drug.clone() },
            None => WorkflowState::NotFound {
                query: payload.trim().to_string(),
                message: SCAN_NOT_FOUND_MESSAGE.to_string(),
            },
        };
        self.transition(next);
        true
    }

    pub fn set_search_input(&mut self, text: String) -> bool {
        match &mut self.state {
            WorkflowState::Idle { search } => {
                *search = text;
                true
            }
            _ => false,
        }
    }

    /// 入力済みの検索語で検索
    pub fn submit_search(&mut self) -> bool {
        let term = match &self.state {
            WorkflowState::Idle { search } => search.clone(),
            _ => return false,
        };

        let next = match self.catalog.search(&term) {
            Some(drug) => WorkflowState::Found { drug: drug.clone() },
            None => WorkflowState::NotFound {
                query: term.trim().to_string(),
                message: SEARCH_NOT_FOUND_MESSAGE.to_string(),
            },
        };
        self.transition(next);
        true
    }

    /// 検索語を入れて検索
    pub fn search(&mut self, term: &str) -> bool {
        self.set_search_input(term.to_string()) && self.submit_search()
    }

    /// 真正性確認を選択
    pub fn choose_verify(&mut self) -> bool {
        match std::mem::take(&mut self.state) {
            WorkflowState::Found { drug } => {
                self.transition(WorkflowState::EnteringSerial {
                    drug,
                    input: String::new(),
                    error: None,
                });
                true
            }
            other => {
                self.state = other;
                false
            }
        }
    }

    /// シリアル入力欄の更新（前回のエラー表示は消す）
    pub fn set_serial_input(&mut self, text: String) -> bool {
        match &mut self.state {
            WorkflowState::EnteringSerial { input, error, .. } => {
                *input = text;
                *error = None;
                true
            }
            _ => false,
        }
    }

    /// シリアル番号を確定
    ///
    /// 成功時は回数を1回だけ加算して Authenticated へ。
    /// 失敗時は入力を残したままエラーを付ける。
    pub fn submit_serial(&mut self) -> Option<Result<u32, SerialError>> {
        let (drug, input) = match std::mem::take(&mut self.state) {
            WorkflowState::EnteringSerial { drug, input, .. } => (drug, input),
            other => {
                self.state = other;
                return None;
            }
        };

        match serial::verify(&input, &drug) {
            Ok(serial) => {
                let scan_count = self.counter.increment(serial.as_str());
                self.transition(WorkflowState::Authenticated {
                    drug,
                    serial,
                    scan_count,
                });
                Some(Ok(scan_count))
            }
            Err(e) => {
                log::debug!("serial rejected for {}: {}", drug.id, e);
                self.state = WorkflowState::EnteringSerial {
                    drug,
                    input,
                    error: Some(e),
                };
                Some(Err(e))
            }
        }
    }

    /// 詳細表示（Found: 真正性の主張なし / Authenticated: 確認済み）
    pub fn view_details(&self) -> Option<DetailsRequest> {
        match &self.state {
            WorkflowState::Found { drug } => Some(DetailsRequest {
                drug_id: drug.id.clone(),
                authenticated: false,
            }),
            WorkflowState::Authenticated { drug, .. } => Some(DetailsRequest {
                drug_id: drug.id.clone(),
                authenticated: true,
            }),
            _ => None,
        }
    }

    /// 戻る・キャンセル
    pub fn reset(&mut self) {
        self.transition(WorkflowState::default());
    }

    /// 続けて読み取る
    pub fn scan_another(&mut self) {
        self.reset();
    }

    fn transition(&mut self, next: WorkflowState) {
        log::debug!("workflow {} -> {}", self.state.stage(), next.stage());
        self.state = next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    fn workflow() -> Workflow<'static, MemoryStorage> {
        Workflow::new(Catalog::builtin(), ScanCounterStore::new(MemoryStorage::new()))
    }

    fn authenticate(wf: &mut Workflow<'static, MemoryStorage>, payload: &str, serial: &str) -> u32 {
        assert!(wf.scan(payload));
        assert!(wf.choose_verify());
        wf.set_serial_input(serial.to_string());
        wf.submit_serial().expect("not entering serial").expect("serial rejected")
    }

    #[test]
    fn test_scan_url_found() {
        let mut wf = workflow();
        wf.scan("https://example.com/drug/amoxicillin");

        match wf.state() {
            WorkflowState::Found { drug } => assert_eq!(drug.id, "amoxicillin"),
            other => panic!("unexpected state: {:?}", other),
        }
    }

    #[test]
    fn test_scan_unknown_not_found() {
        let mut wf = workflow();
        wf.scan("unknown-id");

        match wf.state() {
            WorkflowState::NotFound { query, message } => {
                assert_eq!(query, "unknown-id");
                assert_eq!(message, SCAN_NOT_FOUND_MESSAGE);
            }
            other => panic!("unexpected state: {:?}", other),
        }
        assert!(wf.counter().snapshot().is_empty());
    }

    #[test]
    fn test_further_decodes_ignored_until_reset() {
        let mut wf = workflow();
        assert!(wf.scan("amoxicillin"));
        assert!(!wf.scan("ibuprofen"));
        assert_eq!(wf.state().drug().map(|d| d.id.as_str()), Some("amoxicillin"));

        wf.reset();
        assert!(wf.scan("ibuprofen"));
        assert_eq!(wf.state().drug().map(|d| d.id.as_str()), Some("ibuprofen"));
    }

    #[test]
    fn test_verify_success_increments_once() {
        let mut wf = workflow();
        let count = authenticate(&mut wf, "https://example.com/drug/amoxicillin", "abc123456");

        assert_eq!(count, 1);
        assert_eq!(wf.counter().get_count("ABC123456"), 1);
        match wf.state() {
            WorkflowState::Authenticated { serial, scan_count, .. } => {
                assert_eq!(serial.as_str(), "ABC123456");
                assert_eq!(*scan_count, 1);
            }
            other => panic!("unexpected state: {:?}", other),
        }

        // 詳細表示は回数を変えない
        assert_eq!(
            wf.view_details(),
            Some(DetailsRequest { drug_id: "amoxicillin".into(), authenticated: true })
        );
        assert_eq!(wf.counter().get_count("ABC123456"), 1);
    }

    #[test]
    fn test_reauthentication_is_cumulative() {
        let mut wf = workflow();
        authenticate(&mut wf, "amoxicillin", "ABC123456");
        wf.scan_another();
        let count = authenticate(&mut wf, "amoxicillin", "abc 123 456");

        assert_eq!(count, 2);
        assert_eq!(wf.counter().get_count("ABC123456"), 2);
    }

    #[test]
    fn test_mismatch_keeps_input() {
        let mut wf = workflow();
        wf.scan("amoxicillin");
        wf.choose_verify();
        wf.set_serial_input("xyz999999".to_string());

        assert_eq!(wf.submit_serial(), Some(Err(SerialError::Mismatch)));
        match wf.state() {
            WorkflowState::EnteringSerial { input, error, .. } => {
                assert_eq!(input, "xyz999999");
                assert_eq!(*error, Some(SerialError::Mismatch));
            }
            other => panic!("unexpected state: {:?}", other),
        }
        assert_eq!(wf.counter().get_count("XYZ999999"), 0);
        assert_eq!(wf.counter().get_count("ABC123456"), 0);
    }

    #[test]
    fn test_format_errors_surface_separately() {
        let mut wf = workflow();
        wf.scan("amoxicillin");
        wf.choose_verify();

        wf.set_serial_input("abc12".to_string());
        assert_eq!(wf.submit_serial(), Some(Err(SerialError::WrongLength(5))));

        wf.set_serial_input("123456ABC".to_string());
        assert_eq!(wf.submit_serial(), Some(Err(SerialError::WrongFormat)));

        // 修正して再送信
        wf.set_serial_input("ABC123456".to_string());
        assert_eq!(wf.submit_serial(), Some(Ok(1)));
    }

    #[test]
    fn test_editing_clears_error() {
        let mut wf = workflow();
        wf.scan("amoxicillin");
        wf.choose_verify();
        wf.submit_serial();
        wf.set_serial_input("A".to_string());

        assert!(matches!(wf.state(), WorkflowState::EnteringSerial { error: None, .. }));
    }

    #[test]
    fn test_view_details_without_verification() {
        let mut wf = workflow();
        wf.scan("ibuprofen");

        assert_eq!(
            wf.dispatch(Action::ViewDetails),
            Effect::ShowDetails(DetailsRequest { drug_id: "ibuprofen".into(), authenticated: false })
        );
        assert!(wf.counter().snapshot().is_empty());
    }

    #[test]
    fn test_reset_discards_buffers() {
        let mut wf = workflow();
        wf.scan("amoxicillin");
        wf.choose_verify();
        wf.set_serial_input("ABC".to_string());

        wf.dispatch(Action::Reset);
        assert_eq!(*wf.state(), WorkflowState::Idle { search: String::new() });
    }

    #[test]
    fn test_manual_search() {
        let mut wf = workflow();
        assert_eq!(wf.dispatch(Action::SetSearchInput("Amoxi".into())), Effect::Updated);
        assert_eq!(wf.dispatch(Action::SubmitSearch), Effect::Updated);
        assert_eq!(wf.state().stage(), Stage::Found);

        wf.reset();
        wf.search("aspirin");
        match wf.state() {
            WorkflowState::NotFound { message, .. } => assert_eq!(message, SEARCH_NOT_FOUND_MESSAGE),
            other => panic!("unexpected state: {:?}", other),
        }
    }

    #[test]
    fn test_invalid_actions_ignored() {
        let mut wf = workflow();
        assert_eq!(wf.dispatch(Action::ChooseVerify), Effect::Ignored);
        assert_eq!(wf.dispatch(Action::SubmitSerial), Effect::Ignored);
        assert_eq!(wf.dispatch(Action::SetSerialInput("x".into())), Effect::Ignored);
        assert_eq!(wf.dispatch(Action::ViewDetails), Effect::Ignored);
        assert_eq!(wf.state().stage(), Stage::Idle);
    }

    #[test]
    fn test_reset_reproduces_outcome() {
        let mut wf = workflow();
        for _ in 0..3 {
            wf.scan("https://example.com/drug/amoxicillin");
            assert_eq!(wf.state().stage(), Stage::Found);
            wf.reset();
            wf.scan("unknown-id");
            assert_eq!(wf.state().stage(), Stage::NotFound);
            wf.reset();
        }
    }

    /// 常に失敗するストレージ
    struct BrokenStorage;

    impl KeyValueStorage for BrokenStorage {
        fn get_item(&self, _key: &str) -> crate::error::Result<Option<String>> {
            Err(crate::error::Error::StorageUnavailable("localStorage disabled".into()))
        }

        fn set_item(&mut self, _key: &str, _value: &str) -> crate::error::Result<()> {
            Err(crate::error::Error::StorageUnavailable("localStorage disabled".into()))
        }
    }

    #[test]
    fn test_verification_proceeds_without_storage() {
        let mut wf = Workflow::new(Catalog::builtin(), ScanCounterStore::new(BrokenStorage));
        assert!(wf.scan("https://example.com/drug/amoxicillin"));
        assert!(wf.choose_verify());
        wf.set_serial_input("abc123456".into());

        assert_eq!(wf.submit_serial(), Some(Ok(1)));
        match wf.state() {
            WorkflowState::Authenticated { serial, scan_count, .. } => {
                assert_eq!(serial.as_str(), "ABC123456");
                assert_eq!(*scan_count, 1);
            }
            other => panic!("unexpected state: {:?}", other),
        }
    }
}
