//! スキャン回数ストア
//!
//! シリアル番号 → 認証成功回数のマップを、1つのキーにJSONとして保存する。
//! 読み込み・書き込みに失敗しても処理は止めない（警告ログのみ）。

use crate::storage::KeyValueStorage;
use std::collections::BTreeMap;

/// 保存キー
pub const STORAGE_KEY: &str = "mediscan_serial_scans";

type ScanMap = BTreeMap<String, u32>;

/// スキャン回数ストア
#[derive(Debug, Clone, Default)]
pub struct ScanCounterStore<S> {
    storage: S,
}

impl<S: KeyValueStorage> ScanCounterStore<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn into_inner(self) -> S {
        self.storage
    }

    /// 保存済みマップを読み込み（欠損・破損時は空）
    fn load(&self) -> ScanMap {
        let stored = match self.storage.get_item(STORAGE_KEY) {
            Ok(Some(s)) => s,
            Ok(None) => return ScanMap::new(),
            Err(e) => {
                log::warn!("scan counts unreadable, starting empty: {}", e);
                return ScanMap::new();
            }
        };

        let raw: BTreeMap<String, serde_json::Value> = match serde_json::from_str(&stored) {
            Ok(raw) => raw,
            Err(e) => {
                log::warn!("scan counts corrupt, starting empty: {}", e);
                return ScanMap::new();
            }
        };

        // 壊れたエントリだけ捨てて、他のシリアルの回数は残す
        raw.into_iter()
            .filter_map(|(serial, value)| {
                match value.as_u64().and_then(|n| u32::try_from(n).ok()) {
                    Some(count) => Some((serial, count)),
                    None => {
                        log::warn!("dropping invalid scan count for {}: {}", serial, value);
                        None
                    }
                }
            })
            .collect()
    }

    /// シリアル番号の回数（未登録は0）
    pub fn get_count(&self, serial: &str) -> u32 {
        self.load().get(serial).copied().unwrap_or(0)
    }

    /// 回数を1増やして新しい値を返す
    ///
    /// 書き込みに失敗した場合は暫定値として1を返す。
    pub fn increment(&mut self, serial: &str) -> u32 {
        let mut scans = self.load();
        let count = scans.entry(serial.to_string()).or_insert(0);
        *count = count.saturating_add(1);
        let count = *count;

        let written = serde_json::to_string(&scans)
            .map_err(crate::error::Error::from)
            .and_then(|json| self.storage.set_item(STORAGE_KEY, &json));

        match written {
            Ok(()) => {
                log::debug!("scan count for {} is now {}", serial, count);
                count
            }
            Err(e) => {
                log::warn!("failed to persist scan count for {}: {}", serial, e);
                1
            }
        }
    }

    /// まだ一度も認証されていないか
    pub fn is_first_scan(&self, serial: &str) -> bool {
        self.get_count(serial) == 0
    }

    /// 全件（シリアル順）
    pub fn snapshot(&self) -> BTreeMap<String, u32> {
        self.load()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Error, Result};
    use crate::storage::MemoryStorage;

    /// 常に失敗するストレージ
    struct BrokenStorage;

    impl KeyValueStorage for BrokenStorage {
        fn get_item(&self, _key: &str) -> Result<Option<String>> {
            Err(Error::StorageUnavailable("quota exceeded".into()))
        }

        fn set_item(&mut self, _key: &str, _value: &str) -> Result<()> {
            Err(Error::StorageUnavailable("quota exceeded".into()))
        }
    }

    #[test]
    fn test_fresh_store_counts_zero() {
        let store = ScanCounterStore::new(MemoryStorage::new());
        assert_eq!(store.get_count("ABC123456"), 0);
        assert!(store.is_first_scan("ABC123456"));
    }

    #[test]
    fn test_increment_sequential() {
        let mut store = ScanCounterStore::new(MemoryStorage::new());
        for n in 1..=5 {
            assert_eq!(store.increment("ABC123456"), n);
        }
        assert_eq!(store.get_count("ABC123456"), 5);
        assert!(!store.is_first_scan("ABC123456"));
    }

    #[test]
    fn test_serials_are_independent() {
        let mut store = ScanCounterStore::new(MemoryStorage::new());
        store.increment("ABC123456");
        store.increment("ABC123456");
        store.increment("XYZ999999");

        assert_eq!(store.get_count("ABC123456"), 2);
        assert_eq!(store.get_count("XYZ999999"), 1);
        assert_eq!(store.snapshot().len(), 2);
    }

    #[test]
    fn test_persisted_layout() {
        let mut store = ScanCounterStore::new(MemoryStorage::new());
        store.increment("ABC123456");

        let raw = store.storage().get_item(STORAGE_KEY).unwrap().unwrap();
        assert_eq!(raw, r#"{"ABC123456":1}"#);
    }

    #[test]
    fn test_corrupt_data_treated_as_empty() {
        let mut storage = MemoryStorage::new();
        storage.set_item(STORAGE_KEY, "{not json").unwrap();

        let mut store = ScanCounterStore::new(storage);
        assert_eq!(store.get_count("ABC123456"), 0);
        assert_eq!(store.increment("ABC123456"), 1);
        assert_eq!(store.get_count("ABC123456"), 1);
    }

    #[test]
    fn test_wrong_shape_treated_as_empty() {
        let mut storage = MemoryStorage::new();
        storage.set_item(STORAGE_KEY, r#"{"ABC123456":"many"}"#).unwrap();

        let mut store = ScanCounterStore::new(storage);
        assert_eq!(store.increment("ABC123456"), 1);
    }

    #[test]
    fn test_invalid_entry_keeps_other_counts() {
        let mut storage = MemoryStorage::new();
        storage
            .set_item(STORAGE_KEY, r#"{"ABC123456":5,"XYZ999999":-1,"CIP482915":"x"}"#)
            .unwrap();

        let mut store = ScanCounterStore::new(storage);
        assert_eq!(store.get_count("XYZ999999"), 0);
        assert_eq!(store.increment("IBU739204"), 1);
        assert_eq!(store.get_count("ABC123456"), 5);

        let raw = store.storage().get_item(STORAGE_KEY).unwrap().unwrap();
        assert_eq!(raw, r#"{"ABC123456":5,"IBU739204":1}"#);
    }

    #[test]
    fn test_unavailable_storage_fails_open() {
        let mut store = ScanCounterStore::new(BrokenStorage);
        assert_eq!(store.get_count("ABC123456"), 0);
        assert_eq!(store.increment("ABC123456"), 1);
        assert_eq!(store.increment("ABC123456"), 1);
    }
}
