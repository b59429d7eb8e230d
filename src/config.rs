use crate::error::{ExsearchError, Result};
use serde::Deserialize;
use std::path::PathBuf;

/// 既定の検索対象拡張子
pub const DEFAULT_EXTENSIONS: &[&str] = &["xlsm", "xlsx"];

/// 暗号化ブック1件あたりのパスワード試行回数
pub const DEFAULT_PASSWORD_ATTEMPTS: u32 = 3;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub extensions: Vec<String>,
    pub password_attempts: u32,
    pub pause_on_exit: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            extensions: DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            password_attempts: DEFAULT_PASSWORD_ATTEMPTS,
            pause_on_exit: true,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            Self::from_json(&content)
        } else {
            Ok(Self::default())
        }
    }

    pub fn from_json(content: &str) -> Result<Self> {
        let mut config: Config = serde_json::from_str(content)?;
        config.extensions = normalize_extensions(&config.extensions);

        if config.password_attempts == 0 {
            return Err(ExsearchError::Config(
                "password_attempts must be at least 1".into(),
            ));
        }
        if config.extensions.is_empty() {
            return Err(ExsearchError::Config("extensions must not be empty".into()));
        }

        Ok(config)
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| ExsearchError::Config("home directory not found".into()))?;
        Ok(home.join(".config").join("exsearch").join("config.json"))
    }
}

/// 拡張子を小文字・先頭ドットなしに揃える（重複は除去）
pub fn normalize_extensions(extensions: &[String]) -> Vec<String> {
    let mut normalized: Vec<String> = Vec::new();
    for ext in extensions {
        let ext = ext.trim().trim_start_matches('.').to_lowercase();
        if !ext.is_empty() && !normalized.contains(&ext) {
            normalized.push(ext);
        }
    }
    normalized
}
