//! Terminal spinner that follows pipeline progress.

use std::time::Duration;

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use pricebase_lib::PipelineProgress;

/// Shows the current pipeline stage on a single spinner line.
pub struct SpinnerProgress {
    pb: ProgressBar,
}

impl SpinnerProgress {
    /// When `quiet` is true the spinner is never drawn.
    pub fn new(quiet: bool) -> Self {
        let pb = ProgressBar::new_spinner();
        if quiet {
            pb.set_draw_target(ProgressDrawTarget::hidden());
        }
        pb.set_style(
            ProgressStyle::with_template("  {spinner:.cyan} {msg}")
                .expect("static pattern")
                .tick_chars("/-\\|"),
        );
        pb.enable_steady_tick(Duration::from_millis(100));
        Self { pb }
    }

    pub fn finish(&self) {
        self.pb.disable_steady_tick();
        self.pb.finish_and_clear();
    }
}

impl PipelineProgress for SpinnerProgress {
    fn on_phase(&self, message: &str) {
        log::debug!("{message}");
        self.pb.set_message(format!("{message}..."));
    }

    fn on_download_start(&self, url: &str) {
        self.pb.set_message(format!("Downloading {url}..."));
    }

    fn on_download_finish(&self, bytes: Option<u64>) {
        if let Some(bytes) = bytes {
            self.pb.suspend(|| log::info!("Downloaded {bytes} bytes"));
        }
    }
}
