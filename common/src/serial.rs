//! シリアル番号検証モジュール
//!
//! 入力を正規化（空白除去・大文字化）してから、長さ → 書式の順に検証する。
//! 長さ不足の入力はどのレコードとも比較しない。

use crate::error::SerialError;
use crate::types::DrugRecord;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

/// シリアル番号の文字数
pub const SERIAL_LEN: usize = 9;

lazy_static::lazy_static! {
    static ref SERIAL_RE: Regex = Regex::new(r"^[A-Z]{3}[0-9]{6}$").unwrap();
}

/// 正規化済みシリアル番号（英大文字3桁 + 数字6桁）
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NormalizedSerial(String);

impl NormalizedSerial {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl AsRef<str> for NormalizedSerial {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NormalizedSerial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// 空白を全て除去して大文字化
pub fn normalize(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(|c| c.to_uppercase())
        .collect()
}

/// シリアル番号を検証して正規化済みの値を返す
pub fn validate(raw: &str) -> Result<NormalizedSerial, SerialError> {
    let normalized = normalize(raw);

    let len = normalized.chars().count();
    if len != SERIAL_LEN {
        return Err(SerialError::WrongLength(len));
    }

    if !SERIAL_RE.is_match(&normalized) {
        return Err(SerialError::WrongFormat);
    }

    Ok(NormalizedSerial(normalized))
}

/// レコードの正規シリアルと一致するか
pub fn matches(normalized: &NormalizedSerial, record: &DrugRecord) -> bool {
    normalized.as_str() == record.serial_number.to_uppercase()
}

/// 検証と照合をまとめて実行
///
/// 書式は正しいが一致しない場合は `SerialError::Mismatch`。
pub fn verify(raw: &str, record: &DrugRecord) -> Result<NormalizedSerial, SerialError> {
    let serial = validate(raw)?;
    if matches(&serial, record) {
        Ok(serial)
    } else {
        Err(SerialError::Mismatch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(serial: &str) -> DrugRecord {
        DrugRecord {
            id: "amoxicillin".to_string(),
            name: "Amoxicillin".to_string(),
            serial_number: serial.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_validate_normalizes_case_and_whitespace() {
        let serial = validate(" abc123456 ").unwrap();
        assert_eq!(serial.as_str(), "ABC123456");

        let spaced = validate("aBc 123\t456").unwrap();
        assert_eq!(spaced, serial);
    }

    #[test]
    fn test_validate_wrong_length() {
        assert_eq!(validate("AB12345"), Err(SerialError::WrongLength(7)));
        assert_eq!(validate(""), Err(SerialError::WrongLength(0)));
        assert_eq!(validate("ABC1234567"), Err(SerialError::WrongLength(10)));
    }

    #[test]
    fn test_validate_wrong_format_at_full_length() {
        assert_eq!(validate("123456ABC"), Err(SerialError::WrongFormat));
        assert_eq!(validate("AB1234567"), Err(SerialError::WrongFormat));
        assert_eq!(validate("ABC12345X"), Err(SerialError::WrongFormat));
    }

    #[test]
    fn test_validate_rejects_non_ascii_digits() {
        // 全角数字は9文字でも書式エラー
        assert_eq!(validate("ABC１２３４５６"), Err(SerialError::WrongFormat));
    }

    #[test]
    fn test_matches_is_case_normalized() {
        let serial = validate("abc123456").unwrap();
        assert!(matches(&serial, &record("ABC123456")));
        assert!(matches(&serial, &record("abc123456")));
        assert!(!matches(&serial, &record("ABC123457")));
    }

    #[test]
    fn test_verify_distinguishes_mismatch() {
        let amoxicillin = record("ABC123456");
        assert_eq!(verify("abc123456", &amoxicillin).unwrap().as_str(), "ABC123456");
        assert_eq!(verify("xyz999999", &amoxicillin), Err(SerialError::Mismatch));
        assert_eq!(verify("abc12", &amoxicillin), Err(SerialError::WrongLength(5)));
        assert_eq!(verify("999999XYZ", &amoxicillin), Err(SerialError::WrongFormat));
    }
}
