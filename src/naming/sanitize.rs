//! ファイル名のサニタイズ処理

use regex::Regex;
use std::sync::LazyLock;

/// ラベルの最大文字数
pub const MAX_LABEL_LEN: usize = 200;

/// ファイル名に使用できない文字
const INVALID_CHARS: [char; 9] = ['\\', '/', ':', '*', '?', '"', '<', '>', '|'];

static WHITESPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern"));
static UNDERSCORE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"_+").expect("underscore pattern"));

/// Vision API のラベルをファイル名用トークンに変換
///
/// 小文字化し、空白をアンダースコアに置換した上で `[a-z0-9_]` 以外を削除する。
/// 使える文字が残らなかった場合は `None`。
pub fn sanitize_label(label: &str) -> Option<String> {
    let lower = label.trim().to_lowercase();
    let underscored = WHITESPACE_RE.replace_all(&lower, "_");

    let kept: String = underscored
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '_')
        .collect();

    let collapsed = UNDERSCORE_RE.replace_all(&kept, "_");
    let token: String = collapsed
        .trim_matches('_')
        .chars()
        .take(MAX_LABEL_LEN)
        .collect();
    let token = token.trim_end_matches('_');

    if token.is_empty() {
        None
    } else {
        Some(token.to_string())
    }
}

/// プレフィックス/サフィックス用のサニタイズ
///
/// 大文字小文字はそのまま残し、ファイル名に使えない文字だけを落とす。
pub fn sanitize_decoration(text: &str) -> Option<String> {
    let result: String = text
        .replace(['\r', '\n'], " ")
        .chars()
        .filter(|c| !INVALID_CHARS.contains(c))
        .collect();

    let result = WHITESPACE_RE.replace_all(result.trim(), "_");
    let result = UNDERSCORE_RE.replace_all(&result, "_");
    let result = result.trim_matches(|c| c == '_' || c == '.');

    if result.is_empty() {
        None
    } else {
        Some(result.to_string())
    }
}
