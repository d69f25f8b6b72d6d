#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{validate_non_empty_secret, validate_range, validate_url, Validate};
use toml_config::{TomlConfig, DEFAULT_TIMEOUT_SECONDS};

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

/// 合併設定檔與命令列後實際使用的連線設定
#[derive(Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub token: Option<String>,
    pub timeout_seconds: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            token: None,
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
        }
    }
}

// token 不可出現在日誌
impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("timeout_seconds", &self.timeout_seconds)
            .finish()
    }
}

impl From<TomlConfig> for ClientConfig {
    fn from(file: TomlConfig) -> Self {
        Self {
            base_url: file.base_url().to_string(),
            token: file.token().map(str::to_string),
            timeout_seconds: file.timeout_seconds(),
        }
    }
}

impl ClientConfig {
    /// 命令列的值覆蓋設定檔
    pub fn with_overrides(
        mut self,
        base_url: Option<String>,
        token: Option<String>,
        timeout_seconds: Option<u64>,
    ) -> Self {
        if let Some(base_url) = base_url {
            self.base_url = base_url;
        }
        if token.is_some() {
            self.token = token;
        }
        if let Some(timeout) = timeout_seconds {
            self.timeout_seconds = timeout;
        }
        self
    }
}

impl ConfigProvider for ClientConfig {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    fn timeout_seconds(&self) -> u64 {
        self.timeout_seconds
    }
}

impl Validate for ClientConfig {
    fn validate(&self) -> Result<()> {
        validate_url("base_url", &self.base_url)?;
        validate_range("timeout_seconds", self.timeout_seconds, 1, 300)?;
        if let Some(token) = &self.token {
            validate_non_empty_secret("token", token)?;
        }
        Ok(())
    }
}
