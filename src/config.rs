use crate::error::{MediscanError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

const BASE_URL_ENV: &str = "MEDISCAN_BASE_URL";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// QRに埋め込むURLのベース（末尾の `/` なし）
    pub base_url: String,
    /// スキャン回数の保存先（省略時は設定ディレクトリ）
    pub storage_path: Option<PathBuf>,
    /// 差し替えカタログJSON（省略時は同梱カタログ）
    pub catalog_path: Option<PathBuf>,
    /// PNG出力時のQRサイズ(px)
    pub qr_size: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5173".into(),
            storage_path: None,
            catalog_path: None,
            qr_size: 250,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn config_dir() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| MediscanError::Config("home directory not found".into()))?;
        Ok(home.join(".config").join("mediscan"))
    }

    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.json"))
    }

    /// スキャン回数ファイルのパス
    pub fn storage_path(&self) -> Result<PathBuf> {
        match &self.storage_path {
            Some(path) => Ok(path.clone()),
            None => Ok(Self::config_dir()?.join("storage.json")),
        }
    }

    /// ベースURL（環境変数を優先）
    pub fn base_url(&self) -> String {
        if let Ok(url) = std::env::var(BASE_URL_ENV) {
            return normalize_base_url(&url);
        }
        self.base_url.clone()
    }

    pub fn set_base_url(&mut self, url: &str) -> Result<()> {
        let url = normalize_base_url(url);
        if url.is_empty() {
            return Err(MediscanError::Config("base URL must not be empty".into()));
        }
        self.base_url = url;
        self.save()
    }
}

fn normalize_base_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}
