//! バッチリネーマー - 画像ごとに説明ラベルを取得してリネーム
//!
//! 1ファイルずつ順番に 読み込み → ラベル取得 → ファイル名生成 → 衝突回避 → リネーム
//! を行う。途中のファイルで失敗しても残りのファイルは処理を続ける。

mod report;

pub use report::{ProgressReporter, RenameError, RenameEvent, RenameReport, RenameResult};

use crate::naming::{resolve_collision, sanitize_label, NamingRule};
use crate::scan::{discover_images, ImageFile};
use crate::vision::{mime_type_for, VisionService};
use anyhow::Result;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// 1回の実行分のリネーム処理
pub struct BatchRenamer<V> {
    vision: V,
    rule: NamingRule,
}

impl<V: VisionService> BatchRenamer<V> {
    pub fn new(vision: V, rule: NamingRule) -> Self {
        Self { vision, rule }
    }

    pub fn rule(&self) -> &NamingRule {
        &self.rule
    }

    /// ディレクトリ直下の画像をすべて処理
    ///
    /// ディレクトリが読めない場合のみエラーを返す。
    pub async fn run(
        &self,
        directory: impl AsRef<Path>,
        reporter: &mut impl ProgressReporter,
    ) -> Result<RenameReport> {
        let images = discover_images(directory)?;
        Ok(self.process_images(&images, reporter).await)
    }

    /// 画像リストを順番に処理して結果をまとめる
    pub async fn process_images(
        &self,
        images: &[ImageFile],
        reporter: &mut impl ProgressReporter,
    ) -> RenameReport {
        let started = Instant::now();
        let total = images.len();
        let mut claimed: HashSet<String> = HashSet::new();
        let mut results = Vec::with_capacity(total);

        for (i, image) in images.iter().enumerate() {
            reporter.on_event(RenameEvent::Started {
                index: i + 1,
                total,
                image,
            });

            let file_started = Instant::now();
            let result = match self.process_file(image, &mut claimed).await {
                Ok(new_path) => {
                    tracing::info!("Renamed {:?} -> {:?}", image.path, new_path);
                    RenameResult::Renamed {
                        from: image.path.clone(),
                        to: new_path,
                    }
                }
                Err(e) => {
                    tracing::warn!("Skipped {:?}: {}", image.path, e);
                    RenameResult::Failed {
                        path: image.path.clone(),
                        reason: e.to_string(),
                    }
                }
            };

            reporter.on_event(RenameEvent::Processed {
                result: &result,
                elapsed: file_started.elapsed(),
            });
            results.push(result);
        }

        let report = RenameReport {
            results,
            elapsed: started.elapsed(),
        };

        tracing::info!(
            "Finished: {} renamed, {} failed in {:.1}s",
            report.succeeded(),
            report.failed(),
            report.elapsed.as_secs_f64()
        );
        reporter.on_event(RenameEvent::Finished { report: &report });

        report
    }

    /// 単一の画像ファイルを処理して新しいパスを返す
    async fn process_file(
        &self,
        image: &ImageFile,
        claimed: &mut HashSet<String>,
    ) -> Result<PathBuf, RenameError> {
        let label = self.describe(image).await?;

        let candidate = self.rule.compose(&label, &image.extension);
        let directory = image.directory();
        let final_name = resolve_collision(directory, &candidate, claimed);
        let new_path = directory.join(&final_name);

        apply_rename(&image.path, &new_path)
            .await
            .map_err(|source| RenameError::Rename {
                to: final_name.clone(),
                source,
            })?;

        claimed.insert(final_name);
        Ok(new_path)
    }

    /// 画像を読み込み、Vision API からファイル名用ラベルを得る
    async fn describe(&self, image: &ImageFile) -> Result<String, RenameError> {
        let bytes = tokio::fs::read(&image.path)
            .await
            .map_err(RenameError::ReadImage)?;

        let raw = self
            .vision
            .describe(&bytes, mime_type_for(&image.extension))
            .await?;
        tracing::debug!("Label for {}: {:?}", image.name, raw);

        sanitize_label(&raw).ok_or(RenameError::DegenerateLabel(raw))
    }
}

/// リネーム実行（移動先が既にあれば上書きせずにエラー）
async fn apply_rename(from: &Path, to: &Path) -> std::io::Result<()> {
    if tokio::fs::try_exists(to).await? {
        return Err(std::io::Error::new(
            std::io::ErrorKind::AlreadyExists,
            "destination already exists",
        ));
    }
    tokio::fs::rename(from, to).await
}
