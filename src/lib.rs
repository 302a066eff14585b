//! AIイメージリネーマー - Google Gemini API を使用した画像自動リネームツール
//!
//! # 機能
//! - フォルダ直下の画像（jpg/jpeg/png/gif/bmp/webp）を列挙
//! - Gemini API で画像ごとに短い説明ラベルを取得
//! - プレフィックス・日付・サフィックスを付けてリネーム
//! - 同名ファイルがあれば連番を付与し、既存ファイルは上書きしない

pub mod cli;
pub mod config;
pub mod naming;
pub mod renamer;
pub mod scan;
pub mod vision;

pub use naming::NamingRule;
pub use renamer::{BatchRenamer, RenameReport, RenameResult};
