//! 対話入力 - フォルダと命名ルールを順に尋ねる

use anyhow::{bail, Context, Result};
use std::io::{BufRead, Write};
use std::path::PathBuf;

/// 対話入力の結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Answers {
    pub folder: PathBuf,
    pub prefix: Option<String>,
    pub suffix: Option<String>,
    pub add_date: bool,
}

/// コマンドラインで指定済みの値（指定された項目は質問しない）
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Preset {
    pub prefix: Option<String>,
    pub suffix: Option<String>,
    pub add_date: bool,
}

/// 標準入力から実行内容を尋ねる
pub fn ask(input: &mut impl BufRead, output: &mut impl Write, preset: &Preset) -> Result<Answers> {
    let folder = read_answer(input, output, "Enter the path to the folder: ")?;
    let folder = folder.trim_matches(|c| c == '"' || c == '\'').trim();
    if folder.is_empty() {
        bail!("No folder given");
    }

    let prefix = match preset.prefix {
        Some(ref prefix) => Some(prefix.clone()),
        None => non_empty(read_answer(input, output, "Enter text to PREPEND (leave blank): ")?),
    };
    let suffix = match preset.suffix {
        Some(ref suffix) => Some(suffix.clone()),
        None => non_empty(read_answer(input, output, "Enter text to APPEND (leave blank): ")?),
    };
    let add_date = preset.add_date
        || read_answer(input, output, "Add date stamp? (y/n): ")?
            .to_lowercase()
            .starts_with('y');

    Ok(Answers {
        folder: PathBuf::from(folder),
        prefix,
        suffix,
        add_date,
    })
}

fn read_answer(input: &mut impl BufRead, output: &mut impl Write, question: &str) -> Result<String> {
    write!(output, "{}", question)?;
    output.flush()?;

    let mut line = String::new();
    let read = input.read_line(&mut line).context("Failed to read input")?;
    if read == 0 {
        bail!("Input closed before all questions were answered");
    }

    Ok(line.trim().to_string())
}

fn non_empty(text: String) -> Option<String> {
    if text.is_empty() { None } else { Some(text) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_full_answers() {
        let mut input = Cursor::new("\"/home/me/Photos\"\ntrip\n\nYes\n");
        let mut output = Vec::new();

        let answers = ask(&mut input, &mut output, &Preset::default()).unwrap();
        assert_eq!(
            answers,
            Answers {
                folder: PathBuf::from("/home/me/Photos"),
                prefix: Some("trip".to_string()),
                suffix: None,
                add_date: true,
            }
        );

        let shown = String::from_utf8(output).unwrap();
        assert!(shown.contains("Enter the path to the folder"));
        assert!(shown.contains("Add date stamp?"));
    }

    #[test]
    fn test_date_defaults_to_no() {
        let mut input = Cursor::new("photos\n\n\n\n");
        let answers = ask(&mut input, &mut Vec::new(), &Preset::default()).unwrap();
        assert!(!answers.add_date);
        assert_eq!(answers.prefix, None);
    }

    #[test]
    fn test_empty_folder() {
        let mut input = Cursor::new("  \n");
        assert!(ask(&mut input, &mut Vec::new(), &Preset::default()).is_err());
    }

    #[test]
    fn test_input_closed() {
        let mut input = Cursor::new("photos\n");
        assert!(ask(&mut input, &mut Vec::new(), &Preset::default()).is_err());
    }

    #[test]
    fn test_preset_skips_questions() {
        let preset = Preset {
            prefix: Some("trip".to_string()),
            suffix: None,
            add_date: true,
        };
        let mut input = Cursor::new("photos\nfinal\n");
        let mut output = Vec::new();

        let answers = ask(&mut input, &mut output, &preset).unwrap();
        assert_eq!(answers.prefix.as_deref(), Some("trip"));
        assert_eq!(answers.suffix.as_deref(), Some("final"));
        assert!(answers.add_date);

        let shown = String::from_utf8(output).unwrap();
        assert!(!shown.contains("PREPEND"));
        assert!(shown.contains("APPEND"));
        assert!(!shown.contains("Add date stamp?"));
    }
}
