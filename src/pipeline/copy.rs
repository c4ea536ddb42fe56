//! Asset copying: put every renamed image into the output `assets/` folder.
//!
//! A failed copy never aborts the page or the run. Each failure is
//! classified into an [`AssetError`] and handed back to the caller, which
//! counts it. Copying the same pair twice simply overwrites the first copy.

use super::assets::AssetReference;
use crate::error::AssetError;
use std::io::ErrorKind;
use std::path::Path;
use tracing::{debug, warn};

/// Outcome of copying one page's assets.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CopyReport {
    pub copied: usize,
    pub errors: Vec<AssetError>,
}

/// Copy `assets` from `resources_dir` into `assets_dir` under their new names.
pub fn copy_assets(assets: &[AssetReference], resources_dir: &Path, assets_dir: &Path) -> CopyReport {
    let mut report = CopyReport::default();
    for asset in assets {
        match copy_asset(asset, resources_dir, assets_dir) {
            Ok(bytes) => {
                debug!(
                    "Copied {} -> {} ({} bytes)",
                    asset.original_name, asset.new_name, bytes
                );
                report.copied += 1;
            }
            Err(e) => {
                warn!("{}", e);
                report.errors.push(e);
            }
        }
    }
    report
}

fn copy_asset(
    asset: &AssetReference,
    resources_dir: &Path,
    assets_dir: &Path,
) -> Result<u64, AssetError> {
    let src = resources_dir.join(&asset.original_name);
    let dst = assets_dir.join(&asset.new_name);

    if src.is_dir() || dst.is_dir() {
        return Err(AssetError::IsADirectory { src, dst });
    }

    std::fs::copy(&src, &dst).map_err(|e| match e.kind() {
        ErrorKind::NotFound => AssetError::NotFound { src: src.clone() },
        ErrorKind::PermissionDenied => AssetError::PermissionDenied {
            src: src.clone(),
            dst: dst.clone(),
        },
        ErrorKind::IsADirectory => AssetError::IsADirectory {
            src: src.clone(),
            dst: dst.clone(),
        },
        _ => AssetError::Io {
            src: src.clone(),
            dst: dst.clone(),
            detail: e.to_string(),
        },
    })
}
