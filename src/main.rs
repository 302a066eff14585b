//! AIイメージリネーマー - メインエントリポイント

use ai_image_renamer::cli::{self, Args};
use anyhow::Result;
use clap::Parser;

#[tokio::main]
async fn main() -> Result<()> {
    // 環境変数の読み込み（RUST_LOG も .env から拾う）
    dotenvy::dotenv().ok();

    let args = Args::parse();

    // ロギング初期化
    tracing_subscriber::fmt()
        .with_env_filter(args.log_filter())
        .with_writer(std::io::stderr)
        .init();

    cli::run(args).await
}
