//! Folder conversion entry point.
//!
//! [`convert_folder`] owns everything that is not pure text processing: it
//! lists the input folder, appends each converted page to the output file in
//! file-name order, copies the page's images and keeps the run counters.
//! The per-page transformation itself is [`crate::pipeline::page::convert_page`].

use crate::config::ConversionConfig;
use crate::error::{Onenote2LogseqError, PageError};
use crate::output::{ConversionOutput, ConversionStats, PageResult};
use crate::pipeline::copy::copy_assets;
use crate::pipeline::input::{resolve_input, OutputLayout, SourcePage};
use crate::pipeline::page::convert_page;
use std::borrow::Cow;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Convert every `.md` page in `input` into one Logseq outline file.
///
/// Pages are processed one at a time in file-name order and appended to
/// `<output>/pages/<input name>.md`, each followed by a blank line. Unless
/// [`ConversionConfig::overwrite`] is set, an existing output file is
/// appended to rather than replaced.
///
/// # Returns
/// `Ok(ConversionOutput)` on success, even if some pages failed
/// (check `output.stats.failed_pages`, or call
/// [`ConversionOutput::into_result`]).
///
/// # Errors
/// Returns `Err(Onenote2LogseqError)` only for fatal errors:
/// - Input folder missing or unreadable
/// - Output folder or file cannot be written
/// - Every page failed
pub fn convert_folder(
    input: impl AsRef<Path>,
    config: &ConversionConfig,
) -> Result<ConversionOutput, Onenote2LogseqError> {
    let total_start = Instant::now();
    let input = input.as_ref();
    info!("Starting conversion: {} ({})", input.display(), config.dialect);

    // ── Step 1: List pages ───────────────────────────────────────────────
    let sources = resolve_input(input)?;
    let total_pages = sources.len();
    info!("Found {} pages", total_pages);

    // ── Step 2: Prepare output ───────────────────────────────────────────
    let layout = OutputLayout::new(input, config);
    layout.create()?;
    let mut writer = open_output(&layout.markdown_file, config.overwrite)?;
    debug!("Writing to {}", layout.markdown_file.display());

    if let Some(ref cb) = config.progress_callback {
        cb.on_conversion_start(total_pages);
    }

    // ── Step 3: Convert, append, copy ────────────────────────────────────
    let mut stats = ConversionStats {
        total_pages,
        ..Default::default()
    };
    let mut pages = Vec::with_capacity(total_pages);

    for (idx, source) in sources.iter().enumerate() {
        let page_num = idx + 1;
        if let Some(ref cb) = config.progress_callback {
            cb.on_page_start(page_num, total_pages, &source.file_name);
        }

        let mut result = match process_page(page_num, source, config) {
            Ok(result) => result,
            Err(e) => {
                warn!("Page {} failed: {}", page_num, e);
                if let Some(ref cb) = config.progress_callback {
                    cb.on_page_error(page_num, total_pages, &e.to_string());
                }
                stats.failed_pages += 1;
                pages.push(failed_page(page_num, source, e));
                continue;
            }
        };

        writer
            .write_all(result.markdown.as_bytes())
            .and_then(|_| writer.write_all(b"\n"))
            .map_err(|e| Onenote2LogseqError::OutputWriteFailed {
                path: layout.markdown_file.clone(),
                source: e,
            })?;
        stats.processed_pages += 1;

        if config.copy_assets && !result.assets.is_empty() {
            let report = copy_assets(&result.assets, &layout.resources_dir, &layout.assets_dir);
            stats.assets_copied += report.copied;
            for err in &report.errors {
                if err.is_not_found() {
                    stats.assets_not_found += 1;
                } else {
                    stats.asset_errors += 1;
                }
                if let Some(ref cb) = config.progress_callback {
                    cb.on_asset_error(page_num, err);
                }
            }
            result.asset_errors = report.errors;
        }

        if let Some(ref cb) = config.progress_callback {
            cb.on_page_complete(page_num, total_pages, &source.file_name, result.assets.len());
        }
        pages.push(result);
    }

    writer
        .flush()
        .map_err(|e| Onenote2LogseqError::OutputWriteFailed {
            path: layout.markdown_file.clone(),
            source: e,
        })?;

    // ── Step 4: Summarise ────────────────────────────────────────────────
    if total_pages > 0 && stats.processed_pages == 0 {
        if let Some(ref cb) = config.progress_callback {
            cb.on_conversion_complete(total_pages, 0);
        }
        let first_error = pages
            .iter()
            .find_map(|p| p.error.as_ref())
            .map(|e| e.to_string())
            .unwrap_or_else(|| "Unknown error".to_string());
        return Err(Onenote2LogseqError::AllPagesFailed {
            total: total_pages,
            first_error,
        });
    }

    stats.total_duration_ms = total_start.elapsed().as_millis() as u64;
    info!(
        "Conversion complete: {}/{} pages, {} assets copied, {} not found, {}ms total",
        stats.processed_pages,
        total_pages,
        stats.assets_copied,
        stats.assets_not_found,
        stats.total_duration_ms
    );

    if let Some(ref cb) = config.progress_callback {
        cb.on_conversion_complete(total_pages, stats.processed_pages);
    }

    Ok(ConversionOutput {
        output_file: layout.markdown_file,
        assets_dir: layout.assets_dir,
        pages,
        stats,
    })
}

// ── Internal helpers ─────────────────────────────────────────────────────

fn open_output(path: &Path, overwrite: bool) -> Result<BufWriter<File>, Onenote2LogseqError> {
    let mut options = OpenOptions::new();
    options.create(true);
    if overwrite {
        options.write(true).truncate(true);
    } else {
        options.append(true);
    }
    options
        .open(path)
        .map(BufWriter::new)
        .map_err(|e| Onenote2LogseqError::OutputWriteFailed {
            path: path.to_path_buf(),
            source: e,
        })
}

/// Read and convert one page. Asset copying is left to the caller.
fn process_page(
    page_num: usize,
    source: &SourcePage,
    config: &ConversionConfig,
) -> Result<PageResult, PageError> {
    let raw = std::fs::read_to_string(&source.path).map_err(|e| PageError::ReadFailed {
        file: source.file_name.clone(),
        detail: e.to_string(),
    })?;
    let text = normalize_newlines(&raw);

    let page = convert_page(&source.file_name, &text, config)?;

    Ok(PageResult {
        page_num,
        file_name: source.file_name.clone(),
        markdown: page.markdown,
        metadata: page.metadata,
        depth: page.depth,
        assets: page.assets,
        asset_errors: Vec::new(),
        error: None,
    })
}

/// Turn `\r\n` and lone `\r` line endings into `\n`. The header patterns
/// only match `\n`-terminated lines.
fn normalize_newlines(text: &str) -> Cow<'_, str> {
    if text.contains('\r') {
        Cow::Owned(text.replace("\r\n", "\n").replace('\r', "\n"))
    } else {
        Cow::Borrowed(text)
    }
}

fn failed_page(page_num: usize, source: &SourcePage, error: PageError) -> PageResult {
    PageResult {
        page_num,
        file_name: source.file_name.clone(),
        markdown: String::new(),
        metadata: Default::default(),
        depth: 0,
        assets: Vec::new(),
        asset_errors: Vec::new(),
        error: Some(error),
    }
}
