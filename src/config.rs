//! 起動時設定 - APIキー・モデル・タイムアウト

use crate::vision::ApiKey;
use std::time::Duration;
use thiserror::Error;

/// APIキーの環境変数名
pub const API_KEY_VAR: &str = "GEMINI_API_KEY";
/// モデル名の環境変数名
pub const MODEL_VAR: &str = "GEMINI_MODEL";

pub const DEFAULT_MODEL: &str = "gemini-3-flash-preview";
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("API key not found. Set GEMINI_API_KEY in the environment or a .env file, or pass --api-key")]
    MissingApiKey,

    #[error("timeout must be greater than zero")]
    ZeroTimeout,
}

/// コマンドラインからの上書き値
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub api_key: Option<String>,
    pub model: Option<String>,
    pub timeout: Option<Duration>,
}

/// Vision クライアントの設定（起動時に一度だけ確定）
#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: ApiKey,
    pub model: String,
    pub endpoint: String,
    pub timeout: Duration,
}

impl Config {
    /// プロセス環境変数と上書き値から設定を作成
    pub fn from_env(overrides: ConfigOverrides) -> Result<Self, ConfigError> {
        Self::resolve(overrides, |name| std::env::var(name).ok())
    }

    /// 任意の変数参照関数から設定を作成（上書き値が優先）
    pub fn resolve(
        overrides: ConfigOverrides,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let api_key = overrides
            .api_key
            .as_deref()
            .and_then(ApiKey::new)
            .or_else(|| lookup(API_KEY_VAR).and_then(ApiKey::new))
            .ok_or(ConfigError::MissingApiKey)?;

        let model = overrides
            .model
            .or_else(|| lookup(MODEL_VAR))
            .map(|m| m.trim().to_string())
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());

        let timeout = overrides.timeout.unwrap_or(DEFAULT_TIMEOUT);
        if timeout.is_zero() {
            return Err(ConfigError::ZeroTimeout);
        }

        Ok(Self {
            api_key,
            model,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout,
        })
    }
}
