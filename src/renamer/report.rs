//! 処理結果と進捗イベント

use crate::scan::ImageFile;
use crate::vision::VisionError;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// ファイル単位のエラー（バッチ全体は止めない）
#[derive(Debug, Error)]
pub enum RenameError {
    #[error("failed to read image: {0}")]
    ReadImage(#[source] std::io::Error),

    #[error("vision API: {0}")]
    Vision(#[from] VisionError),

    #[error("label {0:?} has no usable characters")]
    DegenerateLabel(String),

    #[error("failed to rename to {to}: {source}")]
    Rename {
        to: String,
        #[source]
        source: std::io::Error,
    },
}

/// 1ファイル分の処理結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenameResult {
    Renamed { from: PathBuf, to: PathBuf },
    Failed { path: PathBuf, reason: String },
}

impl RenameResult {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Renamed { .. })
    }

    /// 元のパス
    pub fn original(&self) -> &Path {
        match self {
            Self::Renamed { from, .. } => from,
            Self::Failed { path, .. } => path,
        }
    }

    /// 新しいファイル名（成功時のみ）
    pub fn new_name(&self) -> Option<&str> {
        match self {
            Self::Renamed { to, .. } => to.file_name().and_then(|n| n.to_str()),
            Self::Failed { .. } => None,
        }
    }

    /// 失敗理由（失敗時のみ）
    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::Renamed { .. } => None,
            Self::Failed { reason, .. } => Some(reason),
        }
    }
}

/// バッチ全体の結果
#[derive(Debug, Clone, Default)]
pub struct RenameReport {
    pub results: Vec<RenameResult>,
    pub elapsed: Duration,
}

impl RenameReport {
    pub fn total(&self) -> usize {
        self.results.len()
    }

    pub fn succeeded(&self) -> usize {
        self.results.iter().filter(|r| r.is_success()).count()
    }

    pub fn failed(&self) -> usize {
        self.total() - self.succeeded()
    }

    pub fn failures(&self) -> impl Iterator<Item = &RenameResult> {
        self.results.iter().filter(|r| !r.is_success())
    }
}

/// パイプラインから表示層へ送られるイベント
#[derive(Debug, Clone, Copy)]
pub enum RenameEvent<'a> {
    /// 1ファイルの処理開始（index は1始まり）
    Started {
        index: usize,
        total: usize,
        image: &'a ImageFile,
    },
    /// 1ファイルの処理完了
    Processed {
        result: &'a RenameResult,
        elapsed: Duration,
    },
    /// 全ファイル完了
    Finished { report: &'a RenameReport },
}

/// 進捗イベントの受け取り口
pub trait ProgressReporter {
    fn on_event(&mut self, event: RenameEvent<'_>);
}

impl<F> ProgressReporter for F
where
    F: FnMut(RenameEvent<'_>),
{
    fn on_event(&mut self, event: RenameEvent<'_>) {
        self(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_counts() {
        let report = RenameReport {
            results: vec![
                RenameResult::Renamed {
                    from: "/p/a.jpg".into(),
                    to: "/p/beach.jpg".into(),
                },
                RenameResult::Failed {
                    path: "/p/b.jpg".into(),
                    reason: "vision API: request timed out".to_string(),
                },
                RenameResult::Renamed {
                    from: "/p/c.png".into(),
                    to: "/p/dog.png".into(),
                },
            ],
            elapsed: Duration::from_millis(1500),
        };

        assert_eq!(report.total(), 3);
        assert_eq!(report.succeeded(), 2);
        assert_eq!(report.failed(), 1);

        let failure = report.failures().next().unwrap();
        assert_eq!(failure.original(), Path::new("/p/b.jpg"));
        assert_eq!(failure.reason(), Some("vision API: request timed out"));
        assert_eq!(report.results[0].new_name(), Some("beach.jpg"));
    }

    #[test]
    fn test_error_messages() {
        let err = RenameError::from(VisionError::EmptyLabel);
        assert_eq!(err.to_string(), "vision API: empty label returned");

        let err = RenameError::DegenerateLabel("!!!".to_string());
        assert_eq!(err.to_string(), "label \"!!!\" has no usable characters");
    }

    #[test]
    fn test_closure_reporter() {
        let mut seen = 0;
        {
            let mut reporter = |_: RenameEvent<'_>| seen += 1;
            let report = RenameReport::default();
            reporter.on_event(RenameEvent::Finished { report: &report });
        }
        assert_eq!(seen, 1);
    }
}
