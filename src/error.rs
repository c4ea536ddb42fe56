//! Error types for the onenote2logseq library.
//!
//! Three error types reflect three distinct failure scopes:
//!
//! * [`Onenote2LogseqError`]: **Fatal**: the run cannot proceed at all
//!   (input folder missing, output file not writable, bad configuration).
//!   Returned as `Err(Onenote2LogseqError)` from [`crate::convert_folder`].
//!
//! * [`PageError`]: **Non-fatal**: a single page failed (unreadable file,
//!   `updated` timestamp that does not match the dialect) but every other
//!   page is fine. Stored inside [`crate::output::PageResult`]; the failed
//!   page is left out of the output file.
//!
//! * [`AssetError`]: **Non-fatal**: one image could not be copied into the
//!   assets folder. Counted in the run statistics, never aborts a page.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

/// All fatal errors returned by the onenote2logseq library.
#[derive(Debug, Error)]
pub enum Onenote2LogseqError {
    // ── Input errors ──────────────────────────────────────────────────────
    /// The input folder does not exist or is not a directory.
    #[error("The input folder '{path}' does not exist.")]
    InputNotFound { path: PathBuf },

    /// The input folder exists but could not be listed.
    #[error("Failed to list input folder '{path}': {source}")]
    InputListFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Output errors ─────────────────────────────────────────────────────
    /// Could not create an output directory.
    #[error("Failed to create output folder '{path}': {source}")]
    OutputDirFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Could not create or append to the output Markdown file.
    #[error("Failed to write output file '{path}': {source}")]
    OutputWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Config errors ─────────────────────────────────────────────────────
    /// The dialect selector is neither exporter nor converter style.
    #[error(
        "Unknown format '{value}'\nExpected 'onenote-md-exporter' or 'ConvertOneNoteToMarkDown'."
    )]
    UnknownDialect { value: String },

    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Run-level failures ────────────────────────────────────────────────
    /// Every page in the folder failed; the output would be empty.
    #[error("All {total} pages failed.\nFirst error: {first_error}")]
    AllPagesFailed { total: usize, first_error: String },

    /// Some pages succeeded but at least one failed.
    ///
    /// Returned by [`crate::output::ConversionOutput::into_result`] when
    /// the caller wants to treat any page failure as an error.
    #[error("{failed}/{total} pages failed during conversion")]
    PartialFailure {
        success: usize,
        failed: usize,
        total: usize,
    },
}

/// A non-fatal error for a single page.
///
/// Stored alongside [`crate::output::PageResult`] when a page fails.
/// The folder conversion continues unless ALL pages fail.
#[derive(Debug, Clone, Error, Serialize, Deserialize, PartialEq, Eq)]
pub enum PageError {
    /// The source file could not be read as UTF-8 text.
    #[error("{file}: failed to read page: {detail}")]
    ReadFailed { file: String, detail: String },

    /// The page's `updated` value does not parse under the dialect's format.
    #[error("{file}: invalid updated timestamp '{value}' (expected {format}): {detail}")]
    InvalidTimestamp {
        file: String,
        value: String,
        format: String,
        detail: String,
    },
}

impl PageError {
    /// File name of the page the error belongs to.
    pub fn file(&self) -> &str {
        match self {
            PageError::ReadFailed { file, .. } | PageError::InvalidTimestamp { file, .. } => file,
        }
    }
}

/// A non-fatal failure to copy one asset into the output assets folder.
#[derive(Debug, Clone, Error, Serialize, Deserialize, PartialEq, Eq)]
pub enum AssetError {
    /// The referenced image does not exist in the resource folder.
    #[error("The source file '{src}' was not found.")]
    NotFound { src: PathBuf },

    /// Read or write permission was refused.
    #[error("Permission denied copying '{src}' to '{dst}'. Check your read/write permissions.")]
    PermissionDenied { src: PathBuf, dst: PathBuf },

    /// Source or destination is a directory rather than a file.
    #[error("The source or destination is a directory: '{src}' -> '{dst}'")]
    IsADirectory { src: PathBuf, dst: PathBuf },

    /// Any other OS-level error.
    #[error("Unexpected OS error copying '{src}' to '{dst}': {detail}")]
    Io {
        src: PathBuf,
        dst: PathBuf,
        detail: String,
    },
}

impl AssetError {
    /// Whether this is the "image did not resolve" case counted separately
    /// in the run summary.
    pub fn is_not_found(&self) -> bool {
        matches!(self, AssetError::NotFound { .. })
    }
}
