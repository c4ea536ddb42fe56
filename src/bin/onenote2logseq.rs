//! CLI binary for onenote2logseq.
//!
//! A thin shim over the library crate that maps CLI flags
//! to `ConversionConfig` and prints results.

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use onenote2logseq::{
    convert_folder, parse_bool, AssetError, ConversionConfig, ConversionProgressCallback, Dialect,
    ProgressCallback,
};
use std::io;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn red(s: &str) -> String {
    format!("\x1b[31m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}
fn cyan(s: &str) -> String {
    format!("\x1b[36m{s}\x1b[0m")
}

// ── CLI progress callback using indicatif ────────────────────────────────────

/// Terminal progress callback: one bar over the pages of the folder plus a
/// log line per failed page or image.
struct CliProgressCallback {
    bar: ProgressBar,
    asset_errors: AtomicUsize,
}

impl CliProgressCallback {
    fn new() -> Arc<Self> {
        let bar = ProgressBar::new(0);
        let style = ProgressStyle::with_template(
            "{spinner:.cyan} {prefix:.bold}  [{bar:42.green/238}] {pos:>3}/{len} pages  {wide_msg:.dim}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏  ")
        .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"]);
        bar.set_style(style);
        bar.set_prefix("Converting");
        bar.enable_steady_tick(Duration::from_millis(80));

        Arc::new(Self {
            bar,
            asset_errors: AtomicUsize::new(0),
        })
    }
}

impl ConversionProgressCallback for CliProgressCallback {
    fn on_conversion_start(&self, total_pages: usize) {
        self.bar.set_length(total_pages as u64);
        self.bar.println(format!(
            "{} {}",
            cyan("◆"),
            bold(&format!("Converting {total_pages} pages…"))
        ));
    }

    fn on_page_start(&self, _page_num: usize, _total_pages: usize, file: &str) {
        self.bar.set_message(file.to_string());
    }

    fn on_page_complete(&self, _page_num: usize, _total_pages: usize, _file: &str, _assets: usize) {
        self.bar.inc(1);
    }

    fn on_page_error(&self, page_num: usize, total_pages: usize, error: &str) {
        self.bar.println(format!(
            "  {} Page {:>3}/{:<3}  {}",
            red("✗"),
            page_num,
            total_pages,
            red(error),
        ));
        self.bar.inc(1);
    }

    fn on_asset_error(&self, page_num: usize, error: &AssetError) {
        self.asset_errors.fetch_add(1, Ordering::SeqCst);
        self.bar.println(format!(
            "  {} Page {:>3}  {}",
            cyan("⚠"),
            page_num,
            dim(&error.to_string())
        ));
    }

    fn on_conversion_complete(&self, total_pages: usize, success_count: usize) {
        self.bar.finish_and_clear();
        let failed = total_pages.saturating_sub(success_count);
        let asset_errors = self.asset_errors.load(Ordering::SeqCst);
        if failed == 0 && asset_errors == 0 {
            eprintln!(
                "{} {} pages converted successfully",
                green("✔"),
                bold(&success_count.to_string())
            );
        } else {
            eprintln!(
                "{} {}/{} pages converted  ({} failed, {} image errors)",
                cyan("⚠"),
                bold(&success_count.to_string()),
                total_pages,
                red(&failed.to_string()),
                red(&asset_errors.to_string()),
            );
        }
    }
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Convert the notebook in the current folder
  onenote2logseq

  # Exporter output with page properties
  onenote2logseq --input-folder export/md/Work --add-property-metadata true

  # ConvertOneNoteToMarkDown output into a custom folder
  onenote2logseq --format ConvertOneNoteToMarkDown \
    --input-folder notes/Work --output-folder logseq-import/

  # Re-run from scratch instead of appending
  onenote2logseq --input-folder export/md/Work --overwrite

LAYOUT:
  <input>/                       pages: Parent.md, Parent_Child.md, ...
  <input>/../../resources/       images (onenote-md-exporter)
  <input>/../media/              images (ConvertOneNoteToMarkDown)
  <output>/pages/<input>.md      converted outline (appended to)
  <output>/assets/               renamed images: name_<unix ts>.ext

HIERARCHY:
  Every '_' in a file name is one level of nesting: 'Parent_Child.md'
  becomes a child block of 'Parent.md'. Files are processed in name order.
"#;

/// Convert exported OneNote Markdown pages into a Logseq outline.
#[derive(Parser, Debug)]
#[command(
    name = "onenote2logseq",
    version,
    about = "Convert exported OneNote Markdown pages into a single Logseq outline",
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Folder with the exported .md pages. Default: current directory.
    #[arg(long, env = "ONENOTE2LOGSEQ_INPUT")]
    input_folder: Option<PathBuf>,

    /// Output folder. Default: <input>/for_logseq/.
    #[arg(long, env = "ONENOTE2LOGSEQ_OUTPUT")]
    output_folder: Option<PathBuf>,

    /// Add Created/Updated properties under each page title (true/false, yes/no, 1/0).
    #[arg(long, env = "ONENOTE2LOGSEQ_ADD_PROPERTY_METADATA", default_value = "false")]
    add_property_metadata: String,

    /// Source format: onenote-md-exporter or ConvertOneNoteToMarkDown.
    #[arg(long, env = "ONENOTE2LOGSEQ_FORMAT", default_value = "onenote-md-exporter")]
    format: String,

    /// Character marking one hierarchy level in file names.
    #[arg(long, env = "ONENOTE2LOGSEQ_SEPARATOR", default_value_t = '_')]
    separator: char,

    /// Truncate the output file instead of appending to it.
    #[arg(long)]
    overwrite: bool,

    /// Rewrite image links but do not copy the images.
    #[arg(long)]
    no_assets: bool,

    /// Exit with an error if any page failed.
    #[arg(long)]
    strict: bool,

    /// Print the run result as JSON on stdout.
    #[arg(long)]
    json: bool,

    /// Disable progress bar.
    #[arg(long, env = "ONENOTE2LOGSEQ_NO_PROGRESS")]
    no_progress: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "ONENOTE2LOGSEQ_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, env = "ONENOTE2LOGSEQ_QUIET")]
    quiet: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    // The progress bar covers INFO-level feedback, so only errors are
    // logged while it is shown.
    let show_progress = !cli.quiet && !cli.no_progress && !cli.json && !cli.verbose;
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet || show_progress {
        "error"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    let input = match cli.input_folder.clone() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => std::env::current_dir().context("Failed to read the current directory")?,
    };

    let progress_cb: Option<ProgressCallback> = if show_progress {
        Some(CliProgressCallback::new() as Arc<dyn ConversionProgressCallback>)
    } else {
        None
    };

    let config = build_config(&cli, progress_cb)?;

    // ── Run conversion ───────────────────────────────────────────────────
    let output = convert_folder(&input, &config).context("Conversion failed")?;

    if cli.json {
        let json = serde_json::to_string_pretty(&output).context("Failed to serialise output")?;
        println!("{json}");
    } else if !cli.quiet {
        println!("{}", output.summary());
        eprintln!(
            "   {}  →  {}",
            dim(&format!("{}ms", output.stats.total_duration_ms)),
            bold(&output.output_file.display().to_string()),
        );
    }

    if cli.strict {
        output.into_result().context("Some pages failed")?;
    }

    Ok(())
}

/// Map CLI args to `ConversionConfig`.
fn build_config(cli: &Cli, progress: Option<ProgressCallback>) -> Result<ConversionConfig> {
    let dialect: Dialect = cli.format.parse().context("Invalid --format")?;

    let add_property_metadata = if cli.add_property_metadata.trim().is_empty() {
        false
    } else {
        parse_bool(&cli.add_property_metadata).unwrap_or_else(|| {
            tracing::warn!(
                "Invalid value for --add-property-metadata: '{}', using false",
                cli.add_property_metadata
            );
            false
        })
    };

    let mut builder = ConversionConfig::builder()
        .dialect(dialect)
        .add_property_metadata(add_property_metadata)
        .hierarchy_separator(cli.separator)
        .overwrite(cli.overwrite)
        .copy_assets(!cli.no_assets);

    if let Some(ref dir) = cli.output_folder {
        builder = builder.output_dir(dir);
    }
    if let Some(cb) = progress {
        builder = builder.progress_callback(cb);
    }

    builder.build().context("Invalid configuration")
}
