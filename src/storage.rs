//! ファイル版キー・バリューストレージ
//!
//! ブラウザの localStorage 相当を1つのJSONファイル（キー → 文字列）で持つ。
//! 呼び出しごとにファイルを読み直す。

use mediscan_common::{Error, KeyValueStorage, Result};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

type Items = BTreeMap<String, String>;

#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// ファイル全体を読み込み（ファイルなしは空）
    fn load(&self) -> Result<Items> {
        if !self.path.exists() {
            return Ok(Items::new());
        }

        let file = File::open(&self.path)
            .map_err(|e| Error::StorageUnavailable(format!("{}: {}", self.path.display(), e)))?;
        let reader = BufReader::new(file);
        serde_json::from_reader(reader)
            .map_err(|e| Error::StorageUnavailable(format!("{}: {}", self.path.display(), e)))
    }

    fn save(&self, items: &Items) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = File::create(&self.path)?;
        let writer = BufWriter::new(file);
        serde_json::to_writer_pretty(writer, items)?;
        Ok(())
    }
}

impl KeyValueStorage for FileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.load()?.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        // 壊れたファイルは作り直す
        let mut items = self.load().unwrap_or_else(|e| {
            log::warn!("storage file unreadable, recreating: {}", e);
            Items::new()
        });
        items.insert(key.to_string(), value.to_string());
        self.save(&items)
    }
}
