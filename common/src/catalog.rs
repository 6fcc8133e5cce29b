//! 医薬品カタログ
//!
//! 読み込み後は不変。識別子はカタログ内で一意。

use crate::error::{Error, Result};
use crate::types::DrugRecord;
use std::collections::HashSet;

const BUILTIN_CATALOG: &str = include_str!("../data/drugs.json");

lazy_static::lazy_static! {
    static ref BUILTIN: Catalog = Catalog::from_json(BUILTIN_CATALOG)
        .expect("bundled drugs.json must be a valid catalog");
}

/// 医薬品カタログ（挿入順を保持）
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    drugs: Vec<DrugRecord>,
}

impl Catalog {
    /// レコード列からカタログを作成（識別子の重複はエラー）
    pub fn new(drugs: Vec<DrugRecord>) -> Result<Self> {
        let mut seen = HashSet::new();
        for drug in &drugs {
            if !seen.insert(drug.id.as_str()) {
                return Err(Error::DuplicateDrugId(drug.id.clone()));
            }
        }
        Ok(Self { drugs })
    }

    /// 同梱カタログ
    pub fn builtin() -> &'static Catalog {
        &BUILTIN
    }

    /// JSON文字列から読み込み
    pub fn from_json(json: &str) -> Result<Self> {
        let drugs: Vec<DrugRecord> = serde_json::from_str(json)?;
        Self::new(drugs)
    }

    /// JSONファイルから読み込み（非WASM環境のみ）
    #[cfg(not(feature = "wasm"))]
    pub fn from_file(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn find_by_id(&self, id: &str) -> Option<&DrugRecord> {
        self.drugs.iter().find(|d| d.id == id)
    }

    pub fn all(&self) -> &[DrugRecord] {
        &self.drugs
    }

    /// 手入力検索
    ///
    /// IDまたは表示名に部分一致した最初のレコードを返す（大文字小文字無視）。
    /// 空の検索語は何にも一致しない。
    pub fn search(&self, term: &str) -> Option<&DrugRecord> {
        let term = term.trim().to_lowercase();
        if term.is_empty() {
            return None;
        }

        self.drugs.iter().find(|d| {
            d.id.to_lowercase().contains(&term) || d.name.to_lowercase().contains(&term)
        })
    }

    pub fn len(&self) -> usize {
        self.drugs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.drugs.is_empty()
    }
}
