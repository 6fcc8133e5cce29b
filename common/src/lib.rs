//! MediScan Common Library
//!
//! CLIとWeb(WASM)で共有される医薬品カタログ・シリアル検証・ワークフロー

pub mod types;
pub mod catalog;
pub mod error;
pub mod serial;
pub mod storage;
pub mod scan_counter;
pub mod workflow;
pub mod qr;
pub mod scanner;

pub use types::{DrugRecord, Usefulness};
pub use catalog::Catalog;
pub use error::{Error, Result, SerialError};
pub use serial::NormalizedSerial;
pub use storage::{KeyValueStorage, MemoryStorage};
pub use scan_counter::{ScanCounterStore, STORAGE_KEY};
pub use workflow::{Action, DetailsRequest, Effect, Stage, Workflow, WorkflowState};
pub use qr::{drug_url, extract_drug_id, QrRenderer, SvgQrRenderer};
pub use scanner::{DecodeSender, DecodeSource, ScanSession};
