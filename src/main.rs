//! tailview - A terminal pager for logs and tabular text.
//!
//! # Usage
//!
//! ```bash
//! tailview access.log
//! tailview --follow --line-number /var/log/syslog
//! tailview -c -H 1 -d , data.csv
//! journalctl | tailview
//! ```

use std::fs::File;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use tailview::app::App;
use tailview::config::{
    ConfigFlags, clear_config_flags, global_config_path, load_config_flags, local_override_path,
    save_config_flags,
};
use tailview::document::Document;
use tailview::ui::style::Theme;

/// A terminal pager for logs and tabular text
#[derive(Parser, Debug)]
#[command(name = "tailview", version, about, long_about = None)]
struct Cli {
    /// Files to view; reads standard input when none are given
    #[arg(value_name = "FILE")]
    files: Vec<PathBuf>,

    /// Do not wrap long lines
    #[arg(long)]
    no_wrap: bool,

    /// Start in column mode
    #[arg(short, long)]
    column_mode: bool,

    /// Show line numbers
    #[arg(short = 'n', long)]
    line_number: bool,

    /// Color every other row
    #[arg(short = 'C', long)]
    alternate_rows: bool,

    /// Print the input and exit if it fits on one screen
    #[arg(short = 'F', long)]
    quit_if_one_screen: bool,

    /// Match searches case-sensitively
    #[arg(long)]
    case_sensitive: bool,

    /// Keep reading as the file grows and stay at the bottom
    #[arg(short, long)]
    follow: bool,

    /// Print the last screen after quitting
    #[arg(short = 'X', long)]
    exit_write: bool,

    /// Number of header lines to keep on screen
    #[arg(short = 'H', long, value_name = "N")]
    header: Option<usize>,

    /// Tab stop width
    #[arg(short = 'x', long, value_name = "N", value_parser = clap::value_parser!(u16).range(1..))]
    tab_width: Option<u16>,

    /// Column delimiter
    #[arg(short, long, value_name = "STR")]
    delimiter: Option<String>,

    /// Header color (name, index or #rrggbb)
    #[arg(long, value_name = "COLOR")]
    header_color: Option<String>,

    /// Background of alternate rows
    #[arg(long, value_name = "COLOR")]
    alternate_color: Option<String>,

    /// Background of the selected column
    #[arg(long, value_name = "COLOR")]
    column_color: Option<String>,

    /// Write debug logs to a file (filter with RUST_LOG)
    #[arg(long, value_name = "PATH")]
    debug_log: Option<PathBuf>,

    /// Save current command-line flags as defaults
    #[arg(long)]
    save: bool,

    /// Clear saved defaults
    #[arg(long)]
    clear: bool,
}

impl Cli {
    /// The flags that can be saved as defaults.
    fn config_flags(&self) -> ConfigFlags {
        ConfigFlags {
            no_wrap: self.no_wrap,
            column_mode: self.column_mode,
            line_number: self.line_number,
            alternate_rows: self.alternate_rows,
            quit_if_one_screen: self.quit_if_one_screen,
            case_sensitive: self.case_sensitive,
            follow: self.follow,
            exit_write: self.exit_write,
            header: self.header,
            tab_width: self.tab_width.map(usize::from),
            delimiter: self.delimiter.clone(),
            header_color: self.header_color.clone(),
            alternate_color: self.alternate_color.clone(),
            column_color: self.column_color.clone(),
            debug_log: self.debug_log.clone(),
        }
    }
}

/// Send logs to `path`; without one they are dropped, since the screen is in use.
fn init_logging(path: Option<&Path>) -> Result<()> {
    let Some(path) = path else {
        return Ok(());
    };
    let file = File::create(path)
        .with_context(|| format!("Failed to create debug log {}", path.display()))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn open_documents(files: &[PathBuf], flags: &ConfigFlags) -> Result<Vec<Document>> {
    let mut docs = Vec::with_capacity(files.len().max(1));
    if files.is_empty() {
        if std::io::stdin().is_terminal() {
            anyhow::bail!("missing filename (\"tailview --help\" for help)");
        }
        docs.push(Document::from_reader("(stdin)", std::io::stdin()).context("Failed to read stdin")?);
    }
    for path in files {
        if !path.exists() {
            anyhow::bail!("File not found: {}", path.display());
        }
        let doc = Document::open(path, flags.follow)
            .with_context(|| format!("Failed to open {}", path.display()))?;
        docs.push(doc);
    }
    for doc in &mut docs {
        apply_settings(doc, flags);
    }
    Ok(docs)
}

fn apply_settings(doc: &mut Document, flags: &ConfigFlags) {
    let settings = &mut doc.settings;
    settings.wrap = !flags.no_wrap;
    settings.column_mode = flags.column_mode;
    settings.line_numbers = flags.line_number;
    settings.alternate_rows = flags.alternate_rows;
    settings.follow |= flags.follow;
    if let Some(header) = flags.header {
        settings.header = header;
    }
    if let Some(width) = flags.tab_width.filter(|&w| w > 0) {
        settings.tab_width = width;
    }
    if let Some(delim) = &flags.delimiter {
        settings.column_delimiter.clone_from(delim);
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let global_path = global_config_path();
    let local_path = local_override_path();
    let cli_flags = cli.config_flags();

    if cli.clear {
        clear_config_flags(&global_path)?;
    }
    if cli.save {
        save_config_flags(&global_path, &cli_flags)?;
    }

    let file_flags = if cli.clear {
        ConfigFlags::default()
    } else {
        let global_flags = load_config_flags(&global_path)?;
        let local_flags = load_config_flags(&local_path)?;
        global_flags.union(&local_flags)
    };
    let effective = file_flags.union(&cli_flags);

    init_logging(effective.debug_log.as_deref())?;
    tracing::info!(?effective, "starting");

    let theme = Theme::with_colors(
        effective.header_color.as_deref(),
        effective.alternate_color.as_deref(),
        effective.column_color.as_deref(),
    )?;
    let docs = open_documents(&cli.files, &effective)?;

    App::new(docs)
        .with_theme(theme)
        .with_case_sensitive(effective.case_sensitive)
        .with_quit_if_one_screen(effective.quit_if_one_screen)
        .with_exit_write(effective.exit_write)
        .run()
        .context("Application error")
}
