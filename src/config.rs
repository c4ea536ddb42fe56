//! Configuration types for OneNote-to-Logseq conversion.
//!
//! All conversion behaviour is controlled through [`ConversionConfig`], built
//! via its [`ConversionConfigBuilder`]. The source [`Dialect`] is chosen once
//! per run and stays constant across every file in the folder.

use crate::error::Onenote2LogseqError;
use crate::progress::ProgressCallback;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Configuration for a folder conversion.
///
/// Built via [`ConversionConfig::builder()`] or using
/// [`ConversionConfig::default()`].
///
/// # Example
/// ```rust
/// use onenote2logseq::{ConversionConfig, Dialect};
///
/// let config = ConversionConfig::builder()
///     .dialect(Dialect::Converter)
///     .add_property_metadata(true)
///     .build()
///     .unwrap();
/// assert_eq!(config.dialect.resources_dir(), "../media");
/// ```
#[derive(Clone)]
pub struct ConversionConfig {
    /// Which exporter produced the Markdown. Default: [`Dialect::Exporter`].
    pub dialect: Dialect,

    /// Emit `Created:` / `Updated:` property lines under each page title.
    /// Default: false.
    pub add_property_metadata: bool,

    /// Character whose occurrences in a file name give the page's depth in
    /// the hierarchy. Default: `_` (`Parent_Child.md` nests under `Parent.md`).
    pub hierarchy_separator: char,

    /// Output root. `None` means `<input>/for_logseq`.
    pub output_dir: Option<PathBuf>,

    /// Output file name inside `<output>/pages/`. `None` means the input
    /// folder's base name with an `.md` extension.
    pub output_file_name: Option<String>,

    /// Truncate the output file before the run instead of appending to it.
    /// Default: false.
    pub overwrite: bool,

    /// Copy referenced images into `<output>/assets/`. Default: true.
    pub copy_assets: bool,

    /// Optional per-page progress events.
    pub progress_callback: Option<ProgressCallback>,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            dialect: Dialect::default(),
            add_property_metadata: false,
            hierarchy_separator: '_',
            output_dir: None,
            output_file_name: None,
            overwrite: false,
            copy_assets: true,
            progress_callback: None,
        }
    }
}

impl fmt::Debug for ConversionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConversionConfig")
            .field("dialect", &self.dialect)
            .field("add_property_metadata", &self.add_property_metadata)
            .field("hierarchy_separator", &self.hierarchy_separator)
            .field("output_dir", &self.output_dir)
            .field("output_file_name", &self.output_file_name)
            .field("overwrite", &self.overwrite)
            .field("copy_assets", &self.copy_assets)
            .field(
                "progress_callback",
                &self.progress_callback.as_ref().map(|_| "<dyn ConversionProgressCallback>"),
            )
            .finish()
    }
}

impl ConversionConfig {
    /// Create a new builder for `ConversionConfig`.
    pub fn builder() -> ConversionConfigBuilder {
        ConversionConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`ConversionConfig`].
#[derive(Debug)]
pub struct ConversionConfigBuilder {
    config: ConversionConfig,
}

impl ConversionConfigBuilder {
    pub fn dialect(mut self, dialect: Dialect) -> Self {
        self.config.dialect = dialect;
        self
    }

    pub fn add_property_metadata(mut self, v: bool) -> Self {
        self.config.add_property_metadata = v;
        self
    }

    pub fn hierarchy_separator(mut self, c: char) -> Self {
        self.config.hierarchy_separator = c;
        self
    }

    pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.output_dir = Some(dir.into());
        self
    }

    pub fn output_file_name(mut self, name: impl Into<String>) -> Self {
        self.config.output_file_name = Some(name.into());
        self
    }

    pub fn overwrite(mut self, v: bool) -> Self {
        self.config.overwrite = v;
        self
    }

    pub fn copy_assets(mut self, v: bool) -> Self {
        self.config.copy_assets = v;
        self
    }

    pub fn progress_callback(mut self, cb: ProgressCallback) -> Self {
        self.config.progress_callback = Some(cb);
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<ConversionConfig, Onenote2LogseqError> {
        let c = &self.config;
        let sep = c.hierarchy_separator;
        if sep.is_whitespace() || sep == '/' || sep == '\\' || sep == '.' {
            return Err(Onenote2LogseqError::InvalidConfig(format!(
                "hierarchy separator must not be whitespace, a path separator or '.', got {sep:?}"
            )));
        }
        if let Some(ref name) = c.output_file_name {
            if name.trim().is_empty() || name.contains(['/', '\\']) {
                return Err(Onenote2LogseqError::InvalidConfig(format!(
                    "output file name must be a bare file name, got {name:?}"
                )));
            }
        }
        Ok(self.config)
    }
}

// ── Dialect ──────────────────────────────────────────────────────────────

/// The tool that exported the OneNote pages.
///
/// Each dialect fixes three things: the shape of the page header, the
/// format of its timestamps, and where the images live relative to the
/// input folder.
///
/// | Dialect | Header | `updated` format | Resources |
/// |---------|--------|------------------|-----------|
/// | `onenote-md-exporter` | YAML-like `---` block | `2023-05-01T10:00:00` (local time) | `../../resources` |
/// | `ConvertOneNoteToMarkDown` | `# Title` + `Created:` / `Modified:` | `2023-05-01 10:00:00 +0200` | `../media` |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Dialect {
    /// Output of `onenote-md-exporter`. (default)
    #[default]
    #[serde(rename = "onenote-md-exporter")]
    Exporter,
    /// Output of `ConvertOneNoteToMarkDown`.
    #[serde(rename = "ConvertOneNoteToMarkDown")]
    Converter,
}

static RE_EXPORTER_HEADER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"---\ntitle: (?P<title>.*)\nupdated: (?P<updated>.*)\ncreated: (?P<created>.*)\n---\n")
        .unwrap()
});

// The first timestamp (`Created:`) is the page's `updated` value and drives
// asset renaming; the second (`Modified:`) is kept as `created`.
static RE_CONVERTER_HEADER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"# (?P<title>.*)\n\nCreated: (?P<updated>.*)\n\nModified: (?P<created>.*)\n")
        .unwrap()
});

impl Dialect {
    /// The selector string used on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            Dialect::Exporter => "onenote-md-exporter",
            Dialect::Converter => "ConvertOneNoteToMarkDown",
        }
    }

    /// `chrono` format string of the header's `updated` value.
    pub fn date_format(&self) -> &'static str {
        match self {
            Dialect::Exporter => "%Y-%m-%dT%H:%M:%S",
            Dialect::Converter => "%Y-%m-%d %H:%M:%S %z",
        }
    }

    /// Image folder relative to the input folder.
    pub fn resources_dir(&self) -> &'static str {
        match self {
            Dialect::Exporter => "../../resources",
            Dialect::Converter => "../media",
        }
    }

    /// Header matcher with `title`, `updated` and `created` named captures.
    pub fn header_regex(&self) -> &'static Regex {
        match self {
            Dialect::Exporter => &RE_EXPORTER_HEADER,
            Dialect::Converter => &RE_CONVERTER_HEADER,
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Dialect {
    type Err = Onenote2LogseqError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let v = s.trim();
        if v.eq_ignore_ascii_case(Dialect::Exporter.as_str()) {
            Ok(Dialect::Exporter)
        } else if v.eq_ignore_ascii_case(Dialect::Converter.as_str()) {
            Ok(Dialect::Converter)
        } else {
            Err(Onenote2LogseqError::UnknownDialect {
                value: s.to_string(),
            })
        }
    }
}

/// Parse a loose boolean flag value (`true`/`1`/`t`/`y`/`yes` and their
/// negatives), case-insensitively. Returns `None` for anything else.
pub fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" | "t" | "y" | "yes" => Some(true),
        "false" | "0" | "f" | "n" | "no" => Some(false),
        _ => None,
    }
}
