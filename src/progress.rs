//! Progress-callback trait for per-page conversion events.
//!
//! Inject an [`Arc<dyn ConversionProgressCallback>`] via
//! [`crate::config::ConversionConfigBuilder::progress_callback`] to receive
//! events as the folder is converted. Pages are processed one at a time in
//! file-name order, so events for a page always arrive in the order
//! `on_page_start` → (`on_asset_error`)* → `on_page_complete` | `on_page_error`.
//!
//! # Example
//!
//! ```rust
//! use onenote2logseq::{ConversionProgressCallback, ConversionConfig};
//! use std::sync::{Arc, atomic::{AtomicUsize, Ordering}};
//!
//! struct CountingCallback {
//!     completed: Arc<AtomicUsize>,
//! }
//!
//! impl ConversionProgressCallback for CountingCallback {
//!     fn on_page_complete(&self, page_num: usize, total_pages: usize, file: &str, _assets: usize) {
//!         self.completed.fetch_add(1, Ordering::SeqCst);
//!         eprintln!("{page_num}/{total_pages} {file}");
//!     }
//! }
//!
//! let counter = Arc::new(CountingCallback {
//!     completed: Arc::new(AtomicUsize::new(0)),
//! });
//!
//! let config = ConversionConfig::builder()
//!     .progress_callback(counter as Arc<dyn ConversionProgressCallback>)
//!     .build()
//!     .unwrap();
//! ```

use crate::error::AssetError;
use std::sync::Arc;

/// Called by the folder conversion as it processes each page.
///
/// All methods have default no-op implementations so callers only override
/// what they care about. The trait is `Send + Sync` so a callback can be
/// shared with a UI thread.
pub trait ConversionProgressCallback: Send + Sync {
    /// Called once after the input folder has been listed.
    ///
    /// # Arguments
    /// * `total_pages`: number of `.md` files that will be processed
    fn on_conversion_start(&self, total_pages: usize) {
        let _ = total_pages;
    }

    /// Called before a page is read.
    ///
    /// # Arguments
    /// * `page_num`   : 1-indexed position in file-name order
    /// * `total_pages`: total pages in the folder
    /// * `file`       : source file name
    fn on_page_start(&self, page_num: usize, total_pages: usize, file: &str) {
        let _ = (page_num, total_pages, file);
    }

    /// Called after a page has been appended to the output file.
    ///
    /// # Arguments
    /// * `assets`: number of image references rewritten on the page
    fn on_page_complete(&self, page_num: usize, total_pages: usize, file: &str, assets: usize) {
        let _ = (page_num, total_pages, file, assets);
    }

    /// Called when a page fails and is left out of the output.
    fn on_page_error(&self, page_num: usize, total_pages: usize, error: &str) {
        let _ = (page_num, total_pages, error);
    }

    /// Called for every image that could not be copied.
    fn on_asset_error(&self, page_num: usize, error: &AssetError) {
        let _ = (page_num, error);
    }

    /// Called once after all pages have been attempted.
    ///
    /// # Arguments
    /// * `total_pages`  : pages in the folder
    /// * `success_count`: pages written to the output file
    fn on_conversion_complete(&self, total_pages: usize, success_count: usize) {
        let _ = (total_pages, success_count);
    }
}

/// A no-op implementation for callers that don't need progress events.
pub struct NoopProgressCallback;

impl ConversionProgressCallback for NoopProgressCallback {}

/// Convenience alias matching the type stored in [`crate::config::ConversionConfig`].
pub type ProgressCallback = Arc<dyn ConversionProgressCallback>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct TrackingCallback {
        starts: AtomicUsize,
        completes: AtomicUsize,
        errors: AtomicUsize,
        asset_errors: AtomicUsize,
        completed_total: AtomicUsize,
    }

    impl ConversionProgressCallback for TrackingCallback {
        fn on_page_start(&self, _page_num: usize, _total_pages: usize, _file: &str) {
            self.starts.fetch_add(1, Ordering::SeqCst);
        }

        fn on_page_complete(&self, _page_num: usize, _total: usize, _file: &str, _assets: usize) {
            self.completes.fetch_add(1, Ordering::SeqCst);
        }

        fn on_page_error(&self, _page_num: usize, _total_pages: usize, _error: &str) {
            self.errors.fetch_add(1, Ordering::SeqCst);
        }

        fn on_asset_error(&self, _page_num: usize, _error: &AssetError) {
            self.asset_errors.fetch_add(1, Ordering::SeqCst);
        }

        fn on_conversion_complete(&self, _total_pages: usize, success_count: usize) {
            self.completed_total.store(success_count, Ordering::SeqCst);
        }
    }

    #[test]
    fn noop_callback_does_not_panic() {
        let cb = NoopProgressCallback;
        cb.on_conversion_start(5);
        cb.on_page_start(1, 5, "A.md");
        cb.on_page_complete(1, 5, "A.md", 2);
        cb.on_page_error(2, 5, "bad timestamp");
        cb.on_asset_error(
            1,
            &AssetError::NotFound {
                src: PathBuf::from("x.png"),
            },
        );
        cb.on_conversion_complete(5, 4);
    }

    #[test]
    fn tracking_callback_receives_events() {
        let tracker = TrackingCallback::default();

        tracker.on_page_start(1, 2, "A.md");
        tracker.on_asset_error(
            1,
            &AssetError::NotFound {
                src: PathBuf::from("x.png"),
            },
        );
        tracker.on_page_complete(1, 2, "A.md", 1);
        tracker.on_page_start(2, 2, "B.md");
        tracker.on_page_error(2, 2, "bad timestamp");
        tracker.on_conversion_complete(2, 1);

        assert_eq!(tracker.starts.load(Ordering::SeqCst), 2);
        assert_eq!(tracker.completes.load(Ordering::SeqCst), 1);
        assert_eq!(tracker.errors.load(Ordering::SeqCst), 1);
        assert_eq!(tracker.asset_errors.load(Ordering::SeqCst), 1);
        assert_eq!(tracker.completed_total.load(Ordering::SeqCst), 1);
    }
}
