//! 端末表示の装飾 - ANSIエスケープ

use std::io::IsTerminal;

/// ANSIカラーコード
pub struct Colors;

impl Colors {
    pub const BOLD: &'static str = "\x1b[1m";
    pub const SUCCESS: &'static str = "\x1b[32m";
    pub const ERROR: &'static str = "\x1b[31m";
    pub const DIM: &'static str = "\x1b[2m";
    pub const RESET: &'static str = "\x1b[0m";
}

/// 標準出力が端末で、NO_COLOR が設定されていなければ色を使う
pub fn color_enabled() -> bool {
    std::io::stdout().is_terminal() && std::env::var_os("NO_COLOR").is_none()
}

/// 色付け（無効なら素の文字列）
pub fn paint(text: &str, color: &str, enabled: bool) -> String {
    if enabled {
        format!("{}{}{}", color, text, Colors::RESET)
    } else {
        text.to_string()
    }
}

pub fn bold(text: &str) -> String {
    paint(text, Colors::BOLD, color_enabled())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paint() {
        assert_eq!(paint("ok", Colors::SUCCESS, false), "ok");
        assert_eq!(paint("ok", Colors::SUCCESS, true), "\x1b[32mok\x1b[0m");
    }
}
