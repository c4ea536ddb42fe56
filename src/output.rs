//! Result types returned by a folder conversion.

use crate::error::{AssetError, Onenote2LogseqError, PageError};
use crate::pipeline::assets::AssetReference;
use crate::pipeline::metadata::PageMetadata;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Outcome of one source page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageResult {
    /// 1-indexed position in file-name order.
    pub page_num: usize,
    pub file_name: String,
    /// The outline fragment appended to the output file. Empty on error.
    pub markdown: String,
    pub metadata: PageMetadata,
    /// Hierarchy depth inferred from the file name.
    pub depth: usize,
    pub assets: Vec<AssetReference>,
    /// Images that could not be copied.
    pub asset_errors: Vec<AssetError>,
    /// Set when the page failed and was left out of the output.
    pub error: Option<PageError>,
}

/// Run-level counters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionStats {
    /// `.md` files found in the input folder.
    pub total_pages: usize,
    /// Pages appended to the output file.
    pub processed_pages: usize,
    pub failed_pages: usize,
    pub assets_copied: usize,
    /// Referenced images missing from the resource folder.
    pub assets_not_found: usize,
    /// Other copy failures (permissions, directories, OS errors).
    pub asset_errors: usize,
    pub total_duration_ms: u64,
}

/// Everything a folder conversion produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionOutput {
    /// The Markdown file the pages were appended to.
    pub output_file: PathBuf,
    pub assets_dir: PathBuf,
    pub pages: Vec<PageResult>,
    pub stats: ConversionStats,
}

impl ConversionOutput {
    /// Treat any failed page as an error.
    pub fn into_result(self) -> Result<Self, Onenote2LogseqError> {
        let failed = self.stats.failed_pages;
        if failed > 0 {
            return Err(Onenote2LogseqError::PartialFailure {
                success: self.stats.processed_pages,
                failed,
                total: self.stats.total_pages,
            });
        }
        Ok(self)
    }

    /// End-of-run message: pages and assets processed, plus the number of
    /// images that did not resolve when there are any.
    pub fn summary(&self) -> String {
        let s = &self.stats;
        let mut msg = format!(
            "Processed {} MD files and {} images/assets from within them.",
            s.processed_pages, s.assets_copied
        );
        if s.assets_not_found > 0 {
            msg.push_str(&format!(
                "\nErrors: There were {} assets/images that did not resolve and were not copied.",
                s.assets_not_found
            ));
        }
        msg
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn output(stats: ConversionStats) -> ConversionOutput {
        ConversionOutput {
            output_file: PathBuf::from("out/pages/N.md"),
            assets_dir: PathBuf::from("out/assets"),
            pages: Vec::new(),
            stats,
        }
    }

    #[test]
    fn into_result_ok_without_failures() {
        let out = output(ConversionStats {
            total_pages: 2,
            processed_pages: 2,
            ..Default::default()
        });
        assert!(out.into_result().is_ok());
    }

    #[test]
    fn into_result_reports_partial_failure() {
        let out = output(ConversionStats {
            total_pages: 3,
            processed_pages: 2,
            failed_pages: 1,
            ..Default::default()
        });
        let err = out.into_result().unwrap_err();
        assert_eq!(err.to_string(), "1/3 pages failed during conversion");
    }

    #[test]
    fn summary_mentions_missing_assets_only_when_present() {
        let clean = output(ConversionStats {
            processed_pages: 4,
            assets_copied: 7,
            ..Default::default()
        });
        assert_eq!(
            clean.summary(),
            "Processed 4 MD files and 7 images/assets from within them."
        );

        let missing = output(ConversionStats {
            processed_pages: 4,
            assets_copied: 5,
            assets_not_found: 2,
            ..Default::default()
        });
        assert!(missing.summary().contains("There were 2 assets/images"));
    }
}
