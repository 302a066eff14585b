//! Vision API - 画像から短い説明ラベルを得る

mod auth;
mod client;
mod models;

pub use auth::ApiKey;
pub use client::GeminiClient;

use thiserror::Error;

/// ラベル生成の指示文
pub const LABEL_PROMPT: &str = "Analyze this image and provide a unique and concise filename (1-3 words). \
     Use lowercase and underscores. Output ONLY the filename, nothing else.";

/// Vision API 呼び出しのエラー
#[derive(Debug, Error)]
pub enum VisionError {
    #[error("request timed out")]
    Timeout,

    #[error("request failed: {0}")]
    Request(#[source] reqwest::Error),

    #[error("API error ({status}): {message}")]
    Status { status: u16, message: String },

    #[error("malformed response: {0}")]
    Decode(String),

    #[error("empty label returned")]
    EmptyLabel,
}

impl From<reqwest::Error> for VisionError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            Self::Timeout
        } else {
            Self::Request(e)
        }
    }
}

/// 画像バイト列から説明ラベルを返すサービス
///
/// 本番では [`GeminiClient`]、テストでは固定ラベルを返すスタブを使う。
pub trait VisionService {
    fn describe(
        &self,
        image: &[u8],
        mime_type: &str,
    ) -> impl Future<Output = Result<String, VisionError>>;
}

impl<T: VisionService> VisionService for &T {
    fn describe(
        &self,
        image: &[u8],
        mime_type: &str,
    ) -> impl Future<Output = Result<String, VisionError>> {
        (**self).describe(image, mime_type)
    }
}

/// 拡張子から MIME タイプを推定
pub fn mime_type_for(extension: &str) -> &'static str {
    image::ImageFormat::from_extension(extension)
        .map(|f| f.to_mime_type())
        .unwrap_or("application/octet-stream")
}
