//! Build an enriched product base (`base.xlsx`) from a remote price list.
//!
//! This crate owns the I/O around the pure rules in `pricebase-core`:
//! configuration, the download, spreadsheet reading and writing, the optional
//! catalog and document listing, and the pipeline tying them together.

pub mod catalog;
pub mod config;
pub mod doc_csv;
pub mod download;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod progress;
pub mod sheet;

pub use config::{Config, Overrides};
pub use error::PipelineError;
pub use pipeline::{RunSummary, process_file, run};
pub use progress::{LogProgress, PipelineProgress, SilentProgress};
