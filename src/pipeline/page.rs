//! Per-page pipeline: one source file in, one nested outline fragment out.
//!
//! ```text
//! text ─▶ metadata ─▶ assets ─▶ outline ─▶ indent(1) ─▶ + header block ─▶ indent(depth)
//! ```
//!
//! `depth` is the number of hierarchy separators in the file name, so
//! `Parent_Child.md` lands one level (two tabs) below `Parent.md`.
//! This stage is pure: reading the file and copying images happen in
//! [`crate::convert`].

use super::assets::{rewrite_asset_paths, AssetReference};
use super::indent::indent;
use super::metadata::{extract_metadata, PageMetadata};
use super::outline::convert_to_outline;
use crate::config::ConversionConfig;
use crate::error::PageError;
use tracing::debug;

/// A converted page, ready to be appended to the output file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertedPage {
    pub markdown: String,
    pub metadata: PageMetadata,
    /// Hierarchy depth inferred from the file name.
    pub depth: usize,
    pub assets: Vec<AssetReference>,
}

/// Number of ancestor levels encoded in `file_name`.
pub fn hierarchy_depth(file_name: &str, separator: char) -> usize {
    file_name.matches(separator).count()
}

/// Run the full text pipeline on one page.
///
/// # Errors
/// [`PageError::InvalidTimestamp`] when the header's `updated` value does not
/// match the dialect's date format.
pub fn convert_page(
    file_name: &str,
    text: &str,
    config: &ConversionConfig,
) -> Result<ConvertedPage, PageError> {
    let dialect = config.dialect;

    let extracted = extract_metadata(text, config.add_property_metadata, dialect);
    if extracted.metadata.is_empty() {
        debug!("{}: no {} header found", file_name, dialect);
    }

    let (body, assets) = rewrite_asset_paths(
        &extracted.body,
        extracted.metadata.updated.as_deref(),
        dialect,
    )
    .map_err(|e| PageError::InvalidTimestamp {
        file: file_name.to_string(),
        value: e.value,
        format: e.format.to_string(),
        detail: e.detail,
    })?;

    let outline = convert_to_outline(&body);
    let nested = indent(&outline, Some(1));
    let page = format!("{}{}", extracted.metadata_block, nested);

    let depth = hierarchy_depth(file_name, config.hierarchy_separator);
    let markdown = indent(&page, Some(depth));

    debug!(
        file = file_name,
        depth,
        assets = assets.len(),
        len = markdown.len(),
        "page converted"
    );

    Ok(ConvertedPage {
        markdown,
        metadata: extracted.metadata,
        depth,
        assets,
    })
}
