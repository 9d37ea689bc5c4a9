use crate::error::{Result, VerifyError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// APIベースURLを指定する環境変数
pub const API_BASE_ENV: &str = "AADHAAR_API_BASE";

pub const DEFAULT_API_BASE: &str = "http://127.0.0.1:8000";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    pub api_base: Option<String>,
}

impl Config {
    pub fn load() -> Result<Self> {
        // カレントディレクトリの .env も読む（既存の環境変数が優先）
        let _ = dotenvy::dotenv();
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| VerifyError::Config("home directory not found".into()))?;
        Ok(home.join(".config").join("aadhaar-verify").join("config.json"))
    }

    /// 実際に使うベースURL
    ///
    /// 優先順位: コマンドライン > 環境変数 > 設定ファイル > 既定値
    pub fn api_base(&self, flag: Option<&str>) -> Result<String> {
        let env = std::env::var(API_BASE_ENV).ok();
        resolve_api_base(flag, env.as_deref(), self.api_base.as_deref())
    }

    pub fn set_api_base(&mut self, url: String) -> Result<()> {
        self.api_base = Some(validate_base(&url)?);
        self.save()
    }
}

pub fn resolve_api_base(
    flag: Option<&str>,
    env: Option<&str>,
    stored: Option<&str>,
) -> Result<String> {
    let chosen = [flag, env, stored]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|s| !s.is_empty())
        .unwrap_or(DEFAULT_API_BASE);
    validate_base(chosen)
}

fn validate_base(url: &str) -> Result<String> {
    let trimmed = url.trim().trim_end_matches('/');
    if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
        return Err(VerifyError::Config(format!(
            "API base must start with http:// or https://: {}",
            url
        )));
    }
    Ok(trimmed.to_string())
}
