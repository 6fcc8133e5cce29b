//! QR生成・読取の結合テスト
//!
//! 生成したPNGを読み取り、ワークフローで同じ医薬品に辿り着くことを検証

use mediscan::cli::QrFormat;
use mediscan::export::export_qr;
use mediscan::scanner::{decode_qr, ImageFileSource};
use mediscan_common::{
    Catalog, MemoryStorage, ScanCounterStore, ScanSession, Workflow, WorkflowState,
};
use tempfile::tempdir;

/// PNGを生成して読み取る
#[test]
fn test_generated_png_scans_back_to_drug() {
    let dir = tempdir().expect("Failed to create temp dir");
    let exported = export_qr(
        Catalog::builtin(),
        "amoxicillin",
        "https://example.com",
        QrFormat::Png,
        dir.path(),
        250,
    )
    .expect("QR出力失敗");

    assert_eq!(exported.url, "https://example.com/drug/amoxicillin");
    assert_eq!(exported.path, dir.path().join("amoxicillin-qrcode.png"));

    let session = ScanSession::open(ImageFileSource::new(&exported.path)).expect("読取開始失敗");
    let payload = session.poll().expect("読取結果なし");
    session.close();
    assert_eq!(payload, exported.url);

    let mut workflow = Workflow::new(Catalog::builtin(), ScanCounterStore::new(MemoryStorage::new()));
    workflow.scan(&payload);
    match workflow.state() {
        WorkflowState::Found { drug } => assert_eq!(drug.id, "amoxicillin"),
        other => panic!("unexpected state: {:?}", other),
    }
}

/// SVG出力
#[test]
fn test_svg_export() {
    let dir = tempdir().expect("Failed to create temp dir");
    let exported = export_qr(
        Catalog::builtin(),
        "ibuprofen",
        "http://localhost:5173",
        QrFormat::Svg,
        dir.path(),
        200,
    )
    .unwrap();

    let svg = std::fs::read_to_string(&exported.path).unwrap();
    assert!(svg.contains("<svg"));
    assert!(exported.path.ends_with("ibuprofen-qrcode.svg"));
}

/// 存在しない医薬品
#[test]
fn test_unknown_drug_is_error() {
    let dir = tempdir().expect("Failed to create temp dir");
    let result = export_qr(Catalog::builtin(), "aspirin", "http://x", QrFormat::Png, dir.path(), 250);
    assert!(result.is_err());
    assert!(!dir.path().join("aspirin-qrcode.png").exists());
}

/// 読取元が開けない場合はカメラ取得失敗と同じ扱い
#[test]
fn test_unreadable_image_fails_acquisition() {
    let dir = tempdir().expect("Failed to create temp dir");
    let result = ScanSession::open(ImageFileSource::new(dir.path().join("missing.png")));
    assert!(matches!(
        result,
        Err(mediscan_common::Error::ScannerAcquisitionFailed(_))
    ));
    assert!(decode_qr(&dir.path().join("missing.png")).is_err());
}
