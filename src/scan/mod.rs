//! フォルダ走査モジュール - 対象画像ファイルの列挙

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// 対応する画像拡張子（小文字）
pub const SUPPORTED_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "bmp", "webp"];

/// リネーム対象の画像ファイル
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageFile {
    /// フルパス
    pub path: PathBuf,
    /// 元のファイル名（表示用）
    pub name: String,
    /// 拡張子（元の表記のまま）
    pub extension: String,
}

impl ImageFile {
    /// パスから画像ファイルを作成（対応拡張子でなければ `None`）
    ///
    /// UTF-8 でないファイル名も対象にする（表示名のみ置換文字で表す）。
    pub fn from_path(path: impl Into<PathBuf>) -> Option<Self> {
        let path = path.into();
        let extension = path.extension()?.to_string_lossy().into_owned();
        if !is_supported_extension(&extension) {
            return None;
        }
        let name = path.file_name()?.to_string_lossy().into_owned();

        Some(Self {
            path,
            name,
            extension,
        })
    }

    /// ファイルのあるディレクトリ
    pub fn directory(&self) -> &Path {
        self.path.parent().unwrap_or(Path::new("."))
    }
}

/// 対応拡張子かどうか（大文字小文字を区別しない）
pub fn is_supported_extension(extension: &str) -> bool {
    SUPPORTED_EXTENSIONS
        .iter()
        .any(|e| e.eq_ignore_ascii_case(extension))
}

/// ディレクトリ直下の画像ファイルを列挙（サブディレクトリは見ない）
///
/// 読み取れないエントリは警告を出して読み飛ばす。
pub fn discover_images(directory: impl AsRef<Path>) -> Result<Vec<ImageFile>> {
    let directory = directory.as_ref();
    let entries = std::fs::read_dir(directory)
        .with_context(|| format!("Failed to read directory: {:?}", directory))?;

    let mut images = Vec::new();
    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!("Skipping unreadable entry in {:?}: {}", directory, e);
                continue;
            }
        };

        let is_file = entry.file_type().map(|t| t.is_file()).unwrap_or(false);
        if !is_file {
            continue;
        }

        if let Some(image) = ImageFile::from_path(entry.path()) {
            images.push(image);
        }
    }

    tracing::debug!("Discovered {} images in {:?}", images.len(), directory);
    Ok(images)
}
