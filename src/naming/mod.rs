//! 命名ルール - 新しいファイル名の組み立てと衝突回避

mod sanitize;

pub use sanitize::{sanitize_decoration, sanitize_label, MAX_LABEL_LEN};

use chrono::NaiveDate;
use std::collections::HashSet;
use std::path::Path;

/// 日付スタンプの書式
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// 各パーツの区切り文字
const SEPARATOR: &str = "_";

/// 1回の実行で全ファイルに共通して適用される命名ルール
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NamingRule {
    /// 先頭に付ける文字列
    pub prefix: Option<String>,
    /// 末尾に付ける文字列
    pub suffix: Option<String>,
    /// 日付スタンプ（実行開始時に確定させる）
    pub date: Option<NaiveDate>,
}

impl NamingRule {
    /// ユーザー入力から命名ルールを作成
    ///
    /// 空文字列や使えない文字だけの装飾は無視する。
    pub fn new(prefix: Option<&str>, suffix: Option<&str>, date: Option<NaiveDate>) -> Self {
        Self {
            prefix: prefix.and_then(sanitize_decoration),
            suffix: suffix.and_then(sanitize_decoration),
            date,
        }
    }

    /// ラベルと拡張子から候補ファイル名を生成
    /// フォーマット: [prefix]_[label]_[YYYY-MM-DD]_[suffix].[ext]
    pub fn compose(&self, label: &str, extension: &str) -> String {
        let mut parts: Vec<String> = Vec::new();

        if let Some(ref prefix) = self.prefix {
            parts.push(prefix.clone());
        }

        parts.push(label.to_string());

        if let Some(date) = self.date {
            parts.push(date.format(DATE_FORMAT).to_string());
        }

        if let Some(ref suffix) = self.suffix {
            parts.push(suffix.clone());
        }

        let stem = parts.join(SEPARATOR);
        let extension = extension.trim_start_matches('.').to_lowercase();
        if extension.is_empty() {
            stem
        } else {
            format!("{}.{}", stem, extension)
        }
    }
}

/// ユニークなファイル名を取得（同名ファイルがある場合は連番を付与）
///
/// ディレクトリ内に既に存在する名前と、今回の実行で割り当て済みの名前の
/// どちらとも重ならない名前を返す。
pub fn resolve_collision(directory: &Path, candidate: &str, claimed: &HashSet<String>) -> String {
    let path = Path::new(candidate);
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(candidate);
    let ext = path.extension().and_then(|s| s.to_str());

    let is_taken = |name: &str| claimed.contains(name) || directory.join(name).exists();

    let mut final_name = candidate.to_string();
    let mut counter = 1;

    while is_taken(&final_name) {
        final_name = match ext {
            Some(ext) => format!("{}_{}.{}", stem, counter, ext),
            None => format!("{}_{}", stem, counter),
        };
        counter += 1;
    }

    final_name
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn jan_first() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    }

    #[test]
    fn test_compose_plain() {
        let rule = NamingRule::default();
        assert_eq!(
            rule.compose("sunset_over_mountains", "jpg"),
            "sunset_over_mountains.jpg"
        );
    }

    #[test]
    fn test_compose_with_date() {
        let rule = NamingRule::new(None, None, Some(jan_first()));
        assert_eq!(
            rule.compose("sunset_over_mountains", "jpg"),
            "sunset_over_mountains_2024-01-01.jpg"
        );
    }

    #[test]
    fn test_compose_order() {
        let rule = NamingRule::new(Some("trip"), Some("final"), Some(jan_first()));
        assert_eq!(rule.compose("beach", ".PNG"), "trip_beach_2024-01-01_final.png");
    }

    #[test]
    fn test_compose_ignores_blank_decorations() {
        let rule = NamingRule::new(Some("  "), Some(""), None);
        assert_eq!(rule, NamingRule::default());
        assert_eq!(rule.compose("beach", "jpg"), "beach.jpg");
    }

    #[test]
    fn test_compose_is_deterministic() {
        let rule = NamingRule::new(Some("My Trip"), None, Some(jan_first()));
        let a = rule.compose("dog", "webp");
        let b = rule.clone().compose("dog", "webp");
        assert_eq!(a, b);
        assert_eq!(a, "My_Trip_dog_2024-01-01.webp");
    }

    #[test]
    fn test_resolve_no_collision() {
        let dir = TempDir::new().unwrap();
        let name = resolve_collision(dir.path(), "beach.jpg", &HashSet::new());
        assert_eq!(name, "beach.jpg");
    }

    #[test]
    fn test_resolve_existing_files() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("beach.jpg"), b"x").unwrap();
        fs::write(dir.path().join("beach_1.jpg"), b"x").unwrap();

        let name = resolve_collision(dir.path(), "beach.jpg", &HashSet::new());
        assert_eq!(name, "beach_2.jpg");
    }

    #[test]
    fn test_resolve_claimed_names() {
        let dir = TempDir::new().unwrap();
        let claimed: HashSet<String> = ["beach.jpg".to_string()].into_iter().collect();

        let name = resolve_collision(dir.path(), "beach.jpg", &claimed);
        assert_eq!(name, "beach_1.jpg");
    }

    #[test]
    fn test_resolve_sequence() {
        let dir = TempDir::new().unwrap();
        let mut claimed = HashSet::new();
        let mut names = Vec::new();

        for _ in 0..4 {
            let name = resolve_collision(dir.path(), "beach.jpg", &claimed);
            claimed.insert(name.clone());
            names.push(name);
        }

        assert_eq!(names, ["beach.jpg", "beach_1.jpg", "beach_2.jpg", "beach_3.jpg"]);
    }
}
