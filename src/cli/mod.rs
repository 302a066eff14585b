//! コマンドラインインターフェース

mod progress;
mod prompt;
mod theme;

pub use progress::TerminalReporter;
pub use prompt::{ask, Answers, Preset};

use crate::config::{Config, ConfigOverrides};
use crate::naming::NamingRule;
use crate::renamer::BatchRenamer;
use crate::vision::GeminiClient;
use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// Rename images in a folder using descriptions from Google Gemini
#[derive(Debug, Parser)]
#[command(name = "ai_image_renamer", version, about)]
pub struct Args {
    /// Folder containing the images (prompted for when omitted)
    pub folder: Option<PathBuf>,

    /// Text to put in front of every new name
    #[arg(long)]
    pub prefix: Option<String>,

    /// Text to put at the end of every new name
    #[arg(long)]
    pub suffix: Option<String>,

    /// Append today's date (YYYY-MM-DD)
    #[arg(long)]
    pub date: bool,

    /// Gemini API key (overrides GEMINI_API_KEY)
    #[arg(long, value_name = "KEY")]
    pub api_key: Option<String>,

    /// Gemini model name (overrides GEMINI_MODEL)
    #[arg(long, value_name = "NAME")]
    pub model: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long, value_name = "SECS", default_value_t = 30)]
    pub timeout: u64,

    /// Log verbosity on stderr (default: warnings or RUST_LOG, -v: info, -vv: debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    /// ログフィルタ（-v 指定がなければ RUST_LOG、未設定なら warn）
    pub fn log_filter(&self) -> EnvFilter {
        match self.verbose {
            0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
            1 => EnvFilter::new("info"),
            _ => EnvFilter::new("debug"),
        }
    }

    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            api_key: self.api_key.clone(),
            model: self.model.clone(),
            timeout: Some(Duration::from_secs(self.timeout)),
        }
    }

    fn preset(&self) -> Preset {
        Preset {
            prefix: self.prefix.clone(),
            suffix: self.suffix.clone(),
            add_date: self.date,
        }
    }

    /// フォルダ指定があれば引数から、なければ対話入力から実行内容を決める
    ///
    /// 対話入力でも、コマンドラインで指定済みの項目はそのまま使う。
    fn answers(&self, input: &mut impl BufRead, output: &mut impl Write) -> Result<Answers> {
        match self.folder {
            Some(ref folder) => Ok(Answers {
                folder: folder.clone(),
                prefix: self.prefix.clone(),
                suffix: self.suffix.clone(),
                add_date: self.date,
            }),
            None => ask(input, output, &self.preset()),
        }
    }
}

/// CLIを実行
pub async fn run(args: Args) -> Result<()> {
    println!("{}", theme::bold("--- AI Image Renamer ---"));

    let config = Config::from_env(args.overrides())?;
    tracing::debug!("Using model {} (timeout {:?})", config.model, config.timeout);

    let answers = {
        let stdin = std::io::stdin();
        args.answers(&mut stdin.lock(), &mut std::io::stdout())?
    };
    if !answers.folder.is_dir() {
        anyhow::bail!("'{}' is not a valid directory", answers.folder.display());
    }

    let date = answers.add_date.then(|| Local::now().date_naive());
    let rule = NamingRule::new(answers.prefix.as_deref(), answers.suffix.as_deref(), date);

    let client = GeminiClient::new(&config).context("Failed to initialize Gemini client")?;
    let renamer = BatchRenamer::new(client, rule);

    let mut reporter = TerminalReporter::stdout();
    renamer.run(&answers.folder, &mut reporter).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flags() {
        let args = Args::try_parse_from([
            "ai_image_renamer",
            "/photos",
            "--prefix",
            "trip",
            "--suffix",
            "v2",
            "--date",
            "--api-key",
            "abc",
            "--timeout",
            "10",
        ])
        .unwrap();

        assert_eq!(args.folder, Some(PathBuf::from("/photos")));
        assert_eq!(args.prefix.as_deref(), Some("trip"));
        assert_eq!(args.suffix.as_deref(), Some("v2"));
        assert!(args.date);

        let overrides = args.overrides();
        assert_eq!(overrides.api_key.as_deref(), Some("abc"));
        assert_eq!(overrides.timeout, Some(Duration::from_secs(10)));

        let answers = args.answers(&mut std::io::empty(), &mut Vec::new()).unwrap();
        assert_eq!(answers.folder, PathBuf::from("/photos"));
        assert!(answers.add_date);
    }

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["ai_image_renamer"]).unwrap();
        assert_eq!(args.folder, None);
        assert!(!args.date);
        assert_eq!(args.timeout, 30);
    }

    #[test]
    fn test_verbosity() {
        let args = Args::try_parse_from(["ai_image_renamer", "-v", "."]).unwrap();
        assert!(args.log_filter().to_string().contains("info"));

        let args = Args::try_parse_from(["ai_image_renamer", "-vv", "."]).unwrap();
        assert!(args.log_filter().to_string().contains("debug"));
    }

    #[test]
    fn test_prompt_keeps_flags() {
        let args = Args::try_parse_from(["ai_image_renamer", "--prefix", "trip", "--date"]).unwrap();
        let mut input = std::io::Cursor::new("/photos\n\n");
        let mut output = Vec::new();

        let answers = args.answers(&mut input, &mut output).unwrap();
        assert_eq!(
            answers,
            Answers {
                folder: PathBuf::from("/photos"),
                prefix: Some("trip".to_string()),
                suffix: None,
                add_date: true,
            }
        );

        let shown = String::from_utf8(output).unwrap();
        assert!(!shown.contains("PREPEND"));
        assert!(!shown.contains("Add date stamp?"));
    }
}
