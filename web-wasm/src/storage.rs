//! localStorage 版キー・バリューストレージ
//!
//! localStorage が使えない環境（プライベートモード等）ではエラーを返し、
//! スキャン回数ストア側で空として扱わせる。

use mediscan_common::{Error, KeyValueStorage, Result};
use web_sys::Storage;

#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserStorage;

fn local_storage() -> Result<Storage> {
    web_sys::window()
        .ok_or_else(|| Error::StorageUnavailable("no window".into()))?
        .local_storage()
        .map_err(|e| Error::StorageUnavailable(format!("{:?}", e)))?
        .ok_or_else(|| Error::StorageUnavailable("localStorage disabled".into()))
}

impl KeyValueStorage for BrowserStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        local_storage()?
            .get_item(key)
            .map_err(|e| Error::StorageUnavailable(format!("{:?}", e)))
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        local_storage()?
            .set_item(key, value)
            .map_err(|e| Error::StorageUnavailable(format!("{:?}", e)))
    }
}
