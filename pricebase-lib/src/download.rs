//! Fetching the source price list into a temporary file.

use std::fs;
use std::path::{Path, PathBuf};

use reqwest::StatusCode;

use crate::error::PipelineError;
use crate::progress::PipelineProgress;

/// Some price-list hosts refuse requests without a browser user agent.
const USER_AGENT: &str = "Mozilla/5.0";

/// Spreadsheet flavour of the source, inferred from the URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Xls,
    Xlsx,
}

impl SourceFormat {
    /// `.xlsx` URLs are OOXML; everything else is assumed to be legacy `.xls`.
    pub fn from_url(url: &str) -> Self {
        if url.trim().to_lowercase().ends_with(".xlsx") {
            Self::Xlsx
        } else {
            Self::Xls
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Self::Xls => "xls",
            Self::Xlsx => "xlsx",
        }
    }
}

/// Path of the temporary download for a URL.
pub fn temp_path(work_dir: &Path, basename: &str, url: &str) -> PathBuf {
    work_dir.join(format!("{basename}.{}", SourceFormat::from_url(url).extension()))
}

/// A downloaded file that is deleted when dropped.
#[derive(Debug)]
pub struct TempDownload {
    path: PathBuf,
    removed: bool,
}

impl TempDownload {
    /// Take ownership of `path`; it will be removed on drop.
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            removed: false,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Remove the file now and report it.
    pub fn cleanup(mut self) {
        if remove_quietly(&self.path) {
            log::info!("Removed temporary file {}", self.path.display());
        }
        self.removed = true;
    }
}

impl Drop for TempDownload {
    fn drop(&mut self) {
        if !self.removed {
            remove_quietly(&self.path);
        }
    }
}

/// Best-effort removal. A file that is already gone is not an error.
fn remove_quietly(path: &Path) -> bool {
    match fs::remove_file(path) {
        Ok(()) => true,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => false,
        Err(e) => {
            log::warn!("Could not remove {}: {e}", path.display());
            false
        }
    }
}

fn classify_request_error(url: &str, e: reqwest::Error) -> PipelineError {
    if e.is_builder() || e.is_connect() || e.is_redirect() {
        PipelineError::Url {
            reason: e.to_string(),
            url: url.to_string(),
        }
    } else {
        PipelineError::download(format!("{url}: {e}"))
    }
}

/// Download `url` into `<work_dir>/<basename>.<ext>`.
///
/// One attempt, no retries. Any partial file is removed if this fails.
pub fn download(
    url: &str,
    work_dir: &Path,
    basename: &str,
    progress: &dyn PipelineProgress,
) -> Result<TempDownload, PipelineError> {
    let path = temp_path(work_dir, basename, url);
    let guard = TempDownload::new(path);

    progress.on_download_start(url);
    let result = fetch_to(url, guard.path());
    progress.on_download_finish(result.as_ref().ok().copied());

    let size = result?;
    if size == 0 || !guard.path().is_file() {
        return Err(PipelineError::EmptyDownload(guard.path().to_path_buf()));
    }
    log::info!("Saved {} ({} bytes)", guard.path().display(), size);
    Ok(guard)
}

/// Perform the request and write the body. Returns the size on disk.
fn fetch_to(url: &str, path: &Path) -> Result<u64, PipelineError> {
    let client = reqwest::blocking::Client::builder()
        .user_agent(USER_AGENT)
        .build()
        .map_err(|e| PipelineError::download(format!("could not build HTTP client: {e}")))?;

    let response = client
        .get(url)
        .send()
        .map_err(|e| classify_request_error(url, e))?;

    let status = response.status();
    if !status.is_success() {
        return Err(PipelineError::HttpStatus {
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or("").to_string(),
            url: url.to_string(),
        });
    }
    if status != StatusCode::OK {
        return Err(PipelineError::UnexpectedStatus {
            status: status.as_u16(),
            url: url.to_string(),
        });
    }

    let bytes = response
        .bytes()
        .map_err(|e| PipelineError::download(format!("failed to read response body: {e}")))?;

    fs::write(path, &bytes)
        .map_err(|e| PipelineError::download(format!("failed to write {}: {e}", path.display())))?;

    Ok(fs::metadata(path).map(|m| m.len()).unwrap_or(0))
}
