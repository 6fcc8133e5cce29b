//! 医薬品レコードの型定義
//!
//! CLIとWeb(WASM)で共有される型:
//! - DrugRecord: カタログの1件（実行時は読み取り専用）
//! - Dose / Regimen / FoodInteraction / DrugInteraction: 詳細表示用の付属情報

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 医薬品レコード
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DrugRecord {
    pub id: String,
    pub name: String,

    #[serde(default)]
    pub generic_name: String,

    #[serde(default)]
    pub category: String,

    #[serde(default)]
    pub manufacturer: String,

    #[serde(default)]
    pub batch_no: String,         // ロット番号

    #[serde(default)]
    pub mfg_date: String,         // 製造日（書式検証なし）

    #[serde(default)]
    pub exp_date: String,         // 使用期限（書式検証なし）

    /// 正規シリアル番号（英大文字3桁 + 数字6桁）
    pub serial_number: String,

    /// 真正性フラグ（静的データ、検証結果ではない）
    #[serde(default)]
    pub authenticity_verified: bool,

    #[serde(default)]
    pub authenticity_note: String,

    #[serde(default)]
    pub doses: Vec<Dose>,

    /// 警告カテゴリ → 本文
    #[serde(default)]
    pub warnings: BTreeMap<String, String>,

    #[serde(default)]
    pub indications: Vec<String>,

    #[serde(default)]
    pub regimen: Regimen,

    #[serde(default)]
    pub food_interactions: Vec<FoodInteraction>,

    #[serde(default)]
    pub drug_interactions: Vec<DrugInteraction>,
}

/// 用量（規格・剤形）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dose {
    pub strength: String,
    pub form: String,
}

/// 投与期間
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Regimen {
    pub general: String,
    pub specific: Vec<RegimenEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RegimenEntry {
    pub condition: String,
    pub duration: String,
}

/// 食品との相互作用
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FoodInteraction {
    pub item: String,
    pub effect: String,
}

/// 他剤との相互作用
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrugInteraction {
    pub drug: String,
    pub useful: Usefulness,
    #[serde(default)]
    pub description: String,
}

/// 併用の有用性（3値）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Usefulness {
    #[serde(rename = "Useful")]
    Useful,
    #[serde(rename = "Useful (but risky)")]
    UsefulButRisky,
    #[serde(rename = "Not useful")]
    NotUseful,
}

impl Usefulness {
    pub fn as_str(&self) -> &'static str {
        match self {
            Usefulness::Useful => "useful",
            Usefulness::UsefulButRisky => "useful-but-risky",
            Usefulness::NotUseful => "not-useful",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Usefulness::Useful => "Useful",
            Usefulness::UsefulButRisky => "Useful (but risky)",
            Usefulness::NotUseful => "Not useful",
        }
    }
}
