//! Pipeline progress reporting.

/// Trait for receiving progress updates from a run.
pub trait PipelineProgress {
    /// Called when a pipeline stage starts (e.g., "Reading price list").
    fn on_phase(&self, message: &str);

    /// Called right before the blocking download request.
    fn on_download_start(&self, url: &str);

    /// Called when the download is finished, successfully or not.
    fn on_download_finish(&self, bytes: Option<u64>);
}

/// A no-op progress reporter that discards all updates.
pub struct SilentProgress;

impl PipelineProgress for SilentProgress {
    fn on_phase(&self, _message: &str) {}
    fn on_download_start(&self, _url: &str) {}
    fn on_download_finish(&self, _bytes: Option<u64>) {}
}

/// A progress reporter that logs to the `log` crate.
pub struct LogProgress;

impl PipelineProgress for LogProgress {
    fn on_phase(&self, message: &str) {
        log::info!("{}", message);
    }

    fn on_download_start(&self, url: &str) {
        log::info!("Downloading {}", url);
    }

    fn on_download_finish(&self, bytes: Option<u64>) {
        if let Some(bytes) = bytes {
            log::info!("Downloaded {} bytes", bytes);
        }
    }
}
