use std::path::PathBuf;

use thiserror::Error;

/// Fatal errors that abort a run. Every variant maps to a distinct process
/// exit code via [`PipelineError::exit_code`].
#[derive(Debug, Error)]
pub enum PipelineError {
    /// No source URL from the environment, the command line or the config file
    #[error(
        "SOURCE_URL is not set. Export SOURCE_URL=https://... or pass the URL as the first argument"
    )]
    MissingUrl,

    /// The server answered with a success status other than 200
    #[error("HTTP {status} while downloading {url}")]
    UnexpectedStatus { status: u16, url: String },

    /// The server answered with an error status
    #[error("HTTP {status} {reason}: {url}")]
    HttpStatus {
        status: u16,
        reason: String,
        url: String,
    },

    /// Bad URL, DNS or connection failure
    #[error("URL error: {reason} ({url})")]
    Url { reason: String, url: String },

    /// Any other failure while fetching or saving the download
    #[error("Download failed: {0}")]
    Download(String),

    /// The download finished but left nothing on disk
    #[error("Downloaded file is missing or empty: {}", .0.display())]
    EmptyDownload(PathBuf),

    /// No reader for this spreadsheet format
    #[error("Unsupported spreadsheet format: {0}")]
    UnsupportedFormat(String),

    /// The spreadsheet could not be opened or parsed
    #[error("Could not read spreadsheet {}: {reason}", .path.display())]
    Unreadable { path: PathBuf, reason: String },

    /// The header row has no recognizable name and/or article column
    #[error(
        "Required columns not found (name/Наименование and/or article/Артикул). Header row: [{}]",
        .headers.join(" | ")
    )]
    MissingColumns { headers: Vec<String> },

    /// Configuration file or value error
    #[error("Config error: {0}")]
    Config(String),

    /// Writing the result failed
    #[error("Output error: {0}")]
    Output(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl PipelineError {
    pub fn download(msg: impl Into<String>) -> Self {
        Self::Download(msg.into())
    }

    pub fn unsupported_format(msg: impl Into<String>) -> Self {
        Self::UnsupportedFormat(msg.into())
    }

    pub fn unreadable(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::Unreadable {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn output(msg: impl Into<String>) -> Self {
        Self::Output(msg.into())
    }

    /// Process exit code for this failure.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::MissingUrl => 2,
            Self::UnexpectedStatus { .. } => 3,
            Self::HttpStatus { .. } => 4,
            Self::Url { .. } => 5,
            Self::Download(_) => 6,
            Self::EmptyDownload(_) => 7,
            Self::UnsupportedFormat(_) => 8,
            Self::Unreadable { .. } => 9,
            Self::MissingColumns { .. } => 10,
            Self::Config(_) => 11,
            Self::Output(_) | Self::Io(_) => 12,
        }
    }
}
