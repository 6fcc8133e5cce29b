//! ファイル版ストレージとスキャン回数のテスト
//!
//! 欠損・破損したファイルでも処理が止まらないことを検証

use mediscan::storage::FileStorage;
use mediscan_common::{KeyValueStorage, ScanCounterStore, STORAGE_KEY};
use tempfile::tempdir;

/// ファイルがなければ空
#[test]
fn test_missing_file_is_empty() {
    let dir = tempdir().expect("Failed to create temp dir");
    let storage = FileStorage::new(dir.path().join("storage.json"));

    assert_eq!(storage.get_item(STORAGE_KEY).unwrap(), None);
    assert_eq!(ScanCounterStore::new(storage).get_count("ABC123456"), 0);
}

/// 保存した値はインスタンスをまたいで残る
#[test]
fn test_counts_survive_reopen() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("nested").join("storage.json");

    let mut store = ScanCounterStore::new(FileStorage::new(&path));
    store.increment("ABC123456");
    store.increment("ABC123456");
    store.increment("IBU739204");

    let reopened = ScanCounterStore::new(FileStorage::new(&path));
    assert_eq!(reopened.get_count("ABC123456"), 2);
    assert_eq!(reopened.get_count("IBU739204"), 1);
}

/// 破損ファイルは空として扱い、上書きで復旧する
#[test]
fn test_corrupt_file_fails_open() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("storage.json");
    std::fs::write(&path, "not json at all").unwrap();

    let mut store = ScanCounterStore::new(FileStorage::new(&path));
    assert_eq!(store.get_count("ABC123456"), 0);
    assert_eq!(store.increment("ABC123456"), 1);
    assert_eq!(store.increment("ABC123456"), 2);
}

/// 回数マップ以外のキーは保持される
#[test]
fn test_other_keys_preserved() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("storage.json");

    let mut storage = FileStorage::new(&path);
    storage.set_item("theme", "dark").unwrap();

    let mut store = ScanCounterStore::new(storage);
    store.increment("ABC123456");

    let storage = store.into_inner();
    assert_eq!(storage.get_item("theme").unwrap().as_deref(), Some("dark"));
    assert_eq!(
        storage.get_item(STORAGE_KEY).unwrap().as_deref(),
        Some(r#"{"ABC123456":1}"#)
    );
}
