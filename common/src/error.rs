//! エラー型定義

use thiserror::Error;

/// シリアル番号の検証エラー
///
/// 入力欄の横にそのまま表示するため、種類ごとにメッセージを分ける。
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SerialError {
    #[error("Serial number must be exactly 9 characters (got {0})")]
    WrongLength(usize),

    #[error("Serial number must be 3 letters followed by 6 digits")]
    WrongFormat,

    #[error("Serial number does not match this medicine")]
    Mismatch,
}

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    #[error("No medicine found for: {0}")]
    LookupNotFound(String),

    #[error("Invalid serial number: {0}")]
    Serial(#[from] SerialError),

    #[error("Scanner unavailable: {0}")]
    ScannerAcquisitionFailed(String),

    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    #[error("Unknown drug id: {0}")]
    DrugNotFound(String),

    #[error("Duplicate drug id in catalog: {0}")]
    DuplicateDrugId(String),

    #[error("QR render error: {0}")]
    QrRender(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_io() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let error = Error::Io(io_error);
        let display = format!("{}", error);
        assert!(display.contains("IO error"));
        assert!(display.contains("file not found"));
    }

    #[test]
    fn test_error_display_serial() {
        let error: Error = SerialError::WrongLength(7).into();
        assert_eq!(
            format!("{}", error),
            "Invalid serial number: Serial number must be exactly 9 characters (got 7)"
        );
    }

    #[test]
    fn test_serial_errors_have_distinct_messages() {
        let messages = [
            SerialError::WrongLength(3).to_string(),
            SerialError::WrongFormat.to_string(),
            SerialError::Mismatch.to_string(),
        ];
        assert_ne!(messages[0], messages[1]);
        assert_ne!(messages[1], messages[2]);
        assert_ne!(messages[0], messages[2]);
    }

    #[test]
    fn test_error_from_json() {
        let json_error = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let error: Error = json_error.into();
        assert!(matches!(error, Error::Json(_)));
    }

    #[test]
    fn test_error_display_lookup() {
        let error = Error::LookupNotFound("unknown-id".to_string());
        assert_eq!(format!("{}", error), "No medicine found for: unknown-id");
    }
}
