//! Gemini API クライアント

use super::models::{ErrorResponse, GenerateRequest, GenerateResponse};
use super::{ApiKey, VisionError, VisionService, LABEL_PROMPT};
use crate::config::Config;
use anyhow::{Context, Result};
use base64::{engine::general_purpose::STANDARD, Engine};

/// Gemini APIクライアント
pub struct GeminiClient {
    api_key: ApiKey,
    url: String,
    http_client: reqwest::Client,
}

impl GeminiClient {
    /// 設定から新しいクライアントを作成
    pub fn new(config: &Config) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            api_key: config.api_key.clone(),
            url: generate_url(&config.endpoint, &config.model),
            http_client,
        })
    }
}

impl VisionService for GeminiClient {
    async fn describe(&self, image: &[u8], mime_type: &str) -> Result<String, VisionError> {
        let request = GenerateRequest::with_image(LABEL_PROMPT, mime_type, STANDARD.encode(image));

        tracing::debug!("POST {} ({} bytes, {})", self.url, image.len(), mime_type);

        let response = self
            .http_client
            .post(&self.url)
            .header("x-goog-api-key", self.api_key.expose())
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(VisionError::Status {
                status: status.as_u16(),
                message: error_message(&body),
            });
        }

        parse_label(&body)
    }
}

/// generateContent のエンドポイントURL
fn generate_url(endpoint: &str, model: &str) -> String {
    let model = model.trim_start_matches("models/");
    format!(
        "{}/models/{}:generateContent",
        endpoint.trim_end_matches('/'),
        model
    )
}

/// エラーレスポンスからメッセージを取り出す
fn error_message(body: &str) -> String {
    match serde_json::from_str::<ErrorResponse>(body) {
        Ok(e) if !e.error.message.trim().is_empty() => e.error.message,
        _ if !body.trim().is_empty() => body.trim().chars().take(200).collect(),
        _ => "no error details".to_string(),
    }
}

/// 成功レスポンスからラベル文字列を取り出す
fn parse_label(body: &str) -> Result<String, VisionError> {
    let response: GenerateResponse =
        serde_json::from_str(body).map_err(|e| VisionError::Decode(e.to_string()))?;

    let text = response.first_text().unwrap_or_default();
    let label = text.trim();
    if label.is_empty() {
        let finish_reason = response
            .candidates
            .first()
            .and_then(|c| c.finish_reason.as_deref());
        tracing::debug!("No label in response (finish reason: {:?})", finish_reason);
        return Err(VisionError::EmptyLabel);
    }

    Ok(label.to_string())
}
