//! # onenote2logseq
//!
//! Convert a folder of exported OneNote pages (Markdown plus an image
//! resource folder) into a single Markdown file ready to import into Logseq,
//! keeping the page hierarchy, page metadata and images.
//!
//! ## Pipeline Overview
//!
//! ```text
//! Notebook/*.md (sorted)
//!  │
//!  ├─ 1. Header   strip title/created/updated, emit "- {title}" block
//!  ├─ 2. Assets   (../../resources/x.png) → (../assets/x_{unix ts}.png)
//!  ├─ 3. Outline  one "- " block per paragraph, tables kept whole
//!  ├─ 4. Nest     body under its title, page under its parents ("A_B.md")
//!  └─ 5. Output   append to for_logseq/pages/Notebook.md, copy images
//! ```
//!
//! Two source dialects are understood, see [`Dialect`]: the output of
//! `onenote-md-exporter` and of `ConvertOneNoteToMarkDown`.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use onenote2logseq::{convert_folder, ConversionConfig, Dialect};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ConversionConfig::builder()
//!         .dialect(Dialect::Exporter)
//!         .add_property_metadata(true)
//!         .build()?;
//!     let output = convert_folder("export/Notebook", &config)?;
//!     println!("{}", output.summary());
//!     Ok(())
//! }
//! ```
//!
//! The text pipeline is available on its own through [`convert_page`], which
//! never touches the filesystem:
//!
//! ```rust
//! use onenote2logseq::{convert_page, ConversionConfig};
//!
//! let text = "---\ntitle: Parent\nupdated: 2023-05-01T10:00:00\ncreated: 2023-04-01T09:00:00\n---\nHello\n";
//! let page = convert_page("Parent_Child.md", text, &ConversionConfig::default()).unwrap();
//! assert_eq!(page.markdown, "\t\t- Parent\n\t\t\t\t- Hello\n");
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `onenote2logseq` binary (clap + anyhow + tracing-subscriber + indicatif) |

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod convert;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod progress;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{parse_bool, ConversionConfig, ConversionConfigBuilder, Dialect};
pub use convert::convert_folder;
pub use error::{AssetError, Onenote2LogseqError, PageError};
pub use output::{ConversionOutput, ConversionStats, PageResult};
pub use pipeline::assets::AssetReference;
pub use pipeline::metadata::PageMetadata;
pub use pipeline::page::{convert_page, ConvertedPage};
pub use progress::{ConversionProgressCallback, NoopProgressCallback, ProgressCallback};
