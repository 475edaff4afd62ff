//! Platform path resolution for configuration and trace output.

use std::path::PathBuf;

/// Directory name used under the platform data and config roots.
const APP_DIR: &str = "threatscope";

/// Returns the data directory for trace files.
///
/// Resolves to `<local data dir>/threatscope`, e.g.
/// `~/.local/share/threatscope` on Linux. Falls back to the working directory
/// when the platform reports no data directory.
#[must_use]
pub fn data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
}

/// Returns the default configuration file path,
/// `<config dir>/threatscope/config.toml`.
#[must_use]
pub fn default_config_file() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
        .join("config.toml")
}

/// Expands a leading `~` to the user's home directory.
///
/// Paths without a leading tilde, or with no resolvable home directory, are
/// returned unchanged.
///
/// # Examples
///
/// ```
/// use threatscope::infrastructure::expand_tilde;
///
/// assert_eq!(expand_tilde("/absolute/path"), std::path::PathBuf::from("/absolute/path"));
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> PathBuf {
    let home = dirs::home_dir();

    match (path, home) {
        ("~", Some(home)) => home,
        (path, Some(home)) if path.starts_with("~/") => home.join(&path[2..]),
        (path, _) => PathBuf::from(path),
    }
}
