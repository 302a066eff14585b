//! 進捗表示 - パイプラインのイベントを端末に書き出す

use super::theme::{color_enabled, paint, Colors};
use crate::renamer::{ProgressReporter, RenameEvent, RenameResult};
use std::io::{IsTerminal, Write};
use std::sync::mpsc::{channel, RecvTimeoutError, Sender};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

const ANALYSIS_MESSAGE: &str = "AI analysis in progress";
const TICK: Duration = Duration::from_millis(300);
const FRAMES: [&str; 6] = [".  ", ".. ", "...", " ..", "  .", "   "];

/// API応答待ちの間、同じ行に経過時間を描き続ける
struct Ticker {
    stop: Sender<()>,
    handle: JoinHandle<()>,
}

impl Ticker {
    fn start<W: Write + Send + 'static>(mut out: W) -> Self {
        let (stop, stop_rx) = channel();
        let started = Instant::now();

        let handle = std::thread::spawn(move || {
            let mut frame = 0;
            loop {
                let _ = write!(
                    out,
                    "\r  {} {} ({:.1}s)",
                    ANALYSIS_MESSAGE,
                    FRAMES[frame % FRAMES.len()],
                    started.elapsed().as_secs_f64()
                );
                let _ = out.flush();
                frame += 1;

                match stop_rx.recv_timeout(TICK) {
                    Err(RecvTimeoutError::Timeout) => continue,
                    _ => break,
                }
            }
        });

        Self { stop, handle }
    }

    fn stop(self) {
        let _ = self.stop.send(());
        let _ = self.handle.join();
    }
}

/// 端末向けの進捗表示
pub struct TerminalReporter<W> {
    out: W,
    color: bool,
    /// 端末なら応答待ちの経過時間をその場で更新する
    live: bool,
    ticker: Option<Ticker>,
}

impl TerminalReporter<std::io::Stdout> {
    pub fn stdout() -> Self {
        let mut reporter = Self::new(std::io::stdout(), color_enabled());
        reporter.live = std::io::stdout().is_terminal();
        reporter
    }
}

impl<W: Write> TerminalReporter<W> {
    pub fn new(out: W, color: bool) -> Self {
        Self {
            out,
            color,
            live: false,
            ticker: None,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_event(&mut self, event: RenameEvent<'_>) -> std::io::Result<()> {
        match event {
            RenameEvent::Started { index, total, image } => {
                if index == 1 {
                    writeln!(self.out, "Analyzing {} images...", total)?;
                }
                writeln!(self.out, "\n[{}/{}] {}", index, total, image.name)?;
                if self.live {
                    self.out.flush()?;
                    self.ticker = Some(Ticker::start(std::io::stdout()));
                } else {
                    writeln!(self.out, "  {}...", ANALYSIS_MESSAGE)?;
                }
            }
            RenameEvent::Processed { result, elapsed } => {
                if let Some(ticker) = self.ticker.take() {
                    ticker.stop();
                    // ティッカーの行を消す
                    write!(self.out, "\r\x1b[2K")?;
                }
                let secs = elapsed.as_secs_f64();
                match result {
                    RenameResult::Renamed { .. } => {
                        let status = paint("Done!", Colors::SUCCESS, self.color);
                        writeln!(self.out, "  AI analysis -> {} ({:.1}s)", status, secs)?;
                        writeln!(
                            self.out,
                            "    Renamed to: {}",
                            result.new_name().unwrap_or_default()
                        )?;
                    }
                    RenameResult::Failed { reason, .. } => {
                        let status = paint("Failed!", Colors::ERROR, self.color);
                        writeln!(self.out, "  AI analysis -> {} ({:.1}s)", status, secs)?;
                        writeln!(self.out, "    Reason: {}", reason)?;
                    }
                }
            }
            RenameEvent::Finished { report } => {
                if report.total() == 0 {
                    writeln!(self.out, "No supported images found.")?;
                } else {
                    writeln!(
                        self.out,
                        "\nRenamed {} of {} images ({} failed) in {:.1}s.",
                        report.succeeded(),
                        report.total(),
                        report.failed(),
                        report.elapsed.as_secs_f64()
                    )?;
                    for failure in report.failures() {
                        let name = failure
                            .original()
                            .file_name()
                            .map(|n| n.to_string_lossy())
                            .unwrap_or_default();
                        let line = format!("  ✗ {}: {}", name, failure.reason().unwrap_or_default());
                        writeln!(self.out, "{}", paint(&line, Colors::DIM, self.color))?;
                    }
                }
            }
        }
        self.out.flush()
    }
}

impl<W: Write> ProgressReporter for TerminalReporter<W> {
    fn on_event(&mut self, event: RenameEvent<'_>) {
        if let Err(e) = self.write_event(event) {
            tracing::warn!("Failed to write progress: {}", e);
        }
    }
}
