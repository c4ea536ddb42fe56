//! Input resolution: validate the source folder, list its pages and derive
//! the output layout.
//!
//! Pages are the `.md` regular files directly inside the input folder,
//! sorted by file name. Sorting puts every `Parent_Child.md` right after its
//! `Parent.md`, which is what lets indentation alone rebuild the hierarchy.

use crate::config::{ConversionConfig, Dialect};
use crate::error::Onenote2LogseqError;
use std::path::{Path, PathBuf};
use tracing::debug;

/// A page file found in the input folder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourcePage {
    pub file_name: String,
    pub path: PathBuf,
}

/// List the `.md` files of `folder`, sorted by file name.
pub fn resolve_input(folder: &Path) -> Result<Vec<SourcePage>, Onenote2LogseqError> {
    if !folder.is_dir() {
        return Err(Onenote2LogseqError::InputNotFound {
            path: folder.to_path_buf(),
        });
    }

    let list_err = |e| Onenote2LogseqError::InputListFailed {
        path: folder.to_path_buf(),
        source: e,
    };

    let mut pages = Vec::new();
    for entry in std::fs::read_dir(folder).map_err(list_err)? {
        let entry = entry.map_err(list_err)?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
            debug!("Skipping non UTF-8 file name: {}", path.display());
            continue;
        };
        if !file_name.ends_with(".md") {
            continue;
        }
        pages.push(SourcePage {
            file_name: file_name.to_string(),
            path: path.clone(),
        });
    }

    pages.sort_by(|a, b| a.file_name.cmp(&b.file_name));
    debug!("Found {} pages in {}", pages.len(), folder.display());
    Ok(pages)
}

/// Where a run writes its results.
///
/// ```text
/// <root>/
/// ├── pages/<input folder name>.md
/// └── assets/
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLayout {
    pub root: PathBuf,
    pub pages_dir: PathBuf,
    pub assets_dir: PathBuf,
    pub markdown_file: PathBuf,
    /// Folder the dialect keeps its images in.
    pub resources_dir: PathBuf,
}

impl OutputLayout {
    /// Derive the layout for `input` from the configuration.
    pub fn new(input: &Path, config: &ConversionConfig) -> Self {
        let root = config
            .output_dir
            .clone()
            .unwrap_or_else(|| input.join("for_logseq"));
        let pages_dir = root.join("pages");
        let assets_dir = root.join("assets");
        let file_name = config
            .output_file_name
            .clone()
            .unwrap_or_else(|| format!("{}.md", folder_base_name(input)));
        Self {
            markdown_file: pages_dir.join(file_name),
            resources_dir: resources_dir(input, config.dialect),
            root,
            pages_dir,
            assets_dir,
        }
    }

    /// Create the output root, `pages/` and `assets/` if missing.
    pub fn create(&self) -> Result<(), Onenote2LogseqError> {
        for dir in [&self.root, &self.pages_dir, &self.assets_dir] {
            std::fs::create_dir_all(dir).map_err(|e| Onenote2LogseqError::OutputDirFailed {
                path: dir.clone(),
                source: e,
            })?;
        }
        Ok(())
    }
}

/// Image folder for `input` under `dialect`.
pub fn resources_dir(input: &Path, dialect: Dialect) -> PathBuf {
    input.join(dialect.resources_dir())
}

/// Last normal component of `path`, ignoring trailing separators and `.`.
fn folder_base_name(path: &Path) -> String {
    let absolute;
    let path = if path.file_name().is_none() {
        absolute = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
        absolute.as_path()
    } else {
        path
    };
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "notebook".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn missing_folder_is_fatal() {
        let err = resolve_input(Path::new("/definitely/not/here")).unwrap_err();
        assert!(matches!(err, Onenote2LogseqError::InputNotFound { .. }));
    }

    #[test]
    fn lists_only_markdown_files_sorted() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["b.md", "a_child.md", "a.md", "notes.txt", "c.MD"] {
            fs::write(dir.path().join(name), "x").unwrap();
        }
        fs::create_dir(dir.path().join("sub.md")).unwrap();

        let pages = resolve_input(dir.path()).unwrap();
        let names: Vec<_> = pages.iter().map(|p| p.file_name.as_str()).collect();
        assert_eq!(names, ["a.md", "a_child.md", "b.md"]);
        assert_eq!(pages[0].path, dir.path().join("a.md"));
    }

    #[test]
    fn default_layout() {
        let input = Path::new("/data/export/Notebook");
        let layout = OutputLayout::new(input, &ConversionConfig::default());
        assert_eq!(layout.root, input.join("for_logseq"));
        assert_eq!(
            layout.markdown_file,
            input.join("for_logseq/pages/Notebook.md")
        );
        assert_eq!(layout.assets_dir, input.join("for_logseq/assets"));
        assert_eq!(layout.resources_dir, input.join("../../resources"));
    }

    #[test]
    fn trailing_slash_keeps_base_name() {
        let layout = OutputLayout::new(
            Path::new("/data/export/Notebook/"),
            &ConversionConfig::default(),
        );
        assert!(layout.markdown_file.ends_with("pages/Notebook.md"));
    }

    #[test]
    fn configured_layout() {
        let config = ConversionConfig::builder()
            .dialect(Dialect::Converter)
            .output_dir("/out")
            .output_file_name("Imported.md")
            .build()
            .unwrap();
        let layout = OutputLayout::new(Path::new("/in/Notebook"), &config);
        assert_eq!(layout.markdown_file, PathBuf::from("/out/pages/Imported.md"));
        assert_eq!(layout.resources_dir, PathBuf::from("/in/Notebook/../media"));
    }

    #[test]
    fn create_makes_directories() {
        let dir = tempfile::tempdir().unwrap();
        let config = ConversionConfig::builder()
            .output_dir(dir.path().join("out"))
            .build()
            .unwrap();
        let layout = OutputLayout::new(dir.path(), &config);
        layout.create().unwrap();
        assert!(layout.pages_dir.is_dir());
        assert!(layout.assets_dir.is_dir());
    }
}
