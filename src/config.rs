use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Defaults that can live in a config file as well as on the command line.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConfigFlags {
    pub no_wrap: bool,
    pub column_mode: bool,
    pub line_number: bool,
    pub alternate_rows: bool,
    pub quit_if_one_screen: bool,
    pub case_sensitive: bool,
    pub follow: bool,
    pub exit_write: bool,
    pub header: Option<usize>,
    pub tab_width: Option<usize>,
    pub delimiter: Option<String>,
    pub header_color: Option<String>,
    pub alternate_color: Option<String>,
    pub column_color: Option<String>,
    pub debug_log: Option<PathBuf>,
}

impl ConfigFlags {
    /// Merge `other` over `self`: switches add up, values from `other` win.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        Self {
            no_wrap: self.no_wrap || other.no_wrap,
            column_mode: self.column_mode || other.column_mode,
            line_number: self.line_number || other.line_number,
            alternate_rows: self.alternate_rows || other.alternate_rows,
            quit_if_one_screen: self.quit_if_one_screen || other.quit_if_one_screen,
            case_sensitive: self.case_sensitive || other.case_sensitive,
            follow: self.follow || other.follow,
            exit_write: self.exit_write || other.exit_write,
            header: other.header.or(self.header),
            tab_width: other.tab_width.or(self.tab_width),
            delimiter: other.delimiter.clone().or_else(|| self.delimiter.clone()),
            header_color: other.header_color.clone().or_else(|| self.header_color.clone()),
            alternate_color: other
                .alternate_color
                .clone()
                .or_else(|| self.alternate_color.clone()),
            column_color: other.column_color.clone().or_else(|| self.column_color.clone()),
            debug_log: other.debug_log.clone().or_else(|| self.debug_log.clone()),
        }
    }
}

pub fn global_config_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        if let Some(appdata) = std::env::var_os("APPDATA") {
            return PathBuf::from(appdata).join("tailview").join("config");
        }
    }

    #[cfg(target_os = "macos")]
    {
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join("Library")
                .join("Application Support")
                .join("tailview")
                .join("config");
        }
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
            return PathBuf::from(xdg).join("tailview").join("config");
        }
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home).join(".config").join("tailview").join("config");
        }
    }

    local_override_path()
}

pub fn local_override_path() -> PathBuf {
    PathBuf::from(".tailviewrc")
}

/// Read flags from `path`; a missing file means no defaults.
///
/// # Errors
/// Returns an error if the file exists but cannot be read.
pub fn load_config_flags(path: &Path) -> Result<ConfigFlags> {
    if !path.exists() {
        return Ok(ConfigFlags::default());
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let tokens = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .flat_map(|line| line.split_whitespace().map(ToOwned::to_owned))
        .collect::<Vec<_>>();
    Ok(parse_flag_tokens(&tokens))
}

/// Write `flags` to `path`, one flag per line.
///
/// # Errors
/// Returns an error if the directory or file cannot be written.
pub fn save_config_flags(path: &Path, flags: &ConfigFlags) -> Result<()> {
    let mut lines = vec!["# tailview defaults (saved with --save)".to_string()];
    let switches = [
        (flags.no_wrap, "--no-wrap"),
        (flags.column_mode, "--column-mode"),
        (flags.line_number, "--line-number"),
        (flags.alternate_rows, "--alternate-rows"),
        (flags.quit_if_one_screen, "--quit-if-one-screen"),
        (flags.case_sensitive, "--case-sensitive"),
        (flags.follow, "--follow"),
        (flags.exit_write, "--exit-write"),
    ];
    lines.extend(switches.iter().filter(|(on, _)| *on).map(|(_, flag)| (*flag).to_string()));
    if let Some(n) = flags.header {
        lines.push(format!("--header {n}"));
    }
    if let Some(n) = flags.tab_width {
        lines.push(format!("--tab-width {n}"));
    }
    // The file is split on whitespace, so a whitespace delimiter does not survive a save.
    if let Some(delim) = &flags.delimiter {
        lines.push(format!("--delimiter={delim}"));
    }
    if let Some(color) = &flags.header_color {
        lines.push(format!("--header-color {color}"));
    }
    if let Some(color) = &flags.alternate_color {
        lines.push(format!("--alternate-color {color}"));
    }
    if let Some(color) = &flags.column_color {
        lines.push(format!("--column-color {color}"));
    }
    if let Some(path) = &flags.debug_log {
        lines.push(format!("--debug-log {}", path.display()));
    }
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config dir {}", parent.display()))?;
    }
    fs::write(path, format!("{}\n", lines.join("\n")))
        .with_context(|| format!("Failed to write config {}", path.display()))
}

/// Remove saved defaults at `path`, if any.
///
/// # Errors
/// Returns an error if the file exists but cannot be removed.
pub fn clear_config_flags(path: &Path) -> Result<()> {
    if path.exists() {
        fs::remove_file(path).with_context(|| format!("Failed to remove {}", path.display()))?;
    }
    Ok(())
}

/// Pick the known flags out of `tokens`, ignoring everything else.
///
/// Values may follow as the next token or after `=`. Short aliases match
/// the command line's.
pub fn parse_flag_tokens(tokens: &[String]) -> ConfigFlags {
    let mut flags = ConfigFlags::default();
    let mut i = 0;
    while i < tokens.len() {
        let (name, inline) = match tokens[i].split_once('=') {
            Some((name, value)) => (name, Some(value.to_string())),
            None => (tokens[i].as_str(), None),
        };
        let mut value = || {
            inline.clone().or_else(|| {
                let next = tokens.get(i + 1).cloned();
                if next.is_some() {
                    i += 1;
                }
                next
            })
        };
        match name {
            "--no-wrap" => flags.no_wrap = true,
            "-c" | "--column-mode" => flags.column_mode = true,
            "-n" | "--line-number" => flags.line_number = true,
            "-C" | "--alternate-rows" => flags.alternate_rows = true,
            "-F" | "--quit-if-one-screen" => flags.quit_if_one_screen = true,
            "--case-sensitive" => flags.case_sensitive = true,
            "-f" | "--follow" => flags.follow = true,
            "-X" | "--exit-write" => flags.exit_write = true,
            "-H" | "--header" => flags.header = value().and_then(|v| v.parse().ok()),
            "-x" | "--tab-width" => flags.tab_width = value().and_then(|v| v.parse().ok()),
            "-d" | "--delimiter" => flags.delimiter = value(),
            "--header-color" => flags.header_color = value(),
            "--alternate-color" => flags.alternate_color = value(),
            "--column-color" => flags.column_color = value(),
            "--debug-log" => flags.debug_log = value().map(PathBuf::from),
            _ => {}
        }
        i += 1;
    }
    flags
}
