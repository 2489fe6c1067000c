//! Generic path utilities.

use std::path::{Path, PathBuf};

/// Directory containing the running executable, if it can be determined.
pub fn binary_dir() -> Option<PathBuf> {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
}

/// Expand a leading `~` to the user's home directory.
///
/// # Example
///
/// ```
/// use mdctx_core::util::paths::expand_tilde;
///
/// let path = expand_tilde("/absolute/stays");
/// assert_eq!(path.to_str(), Some("/absolute/stays"));
/// ```
pub fn expand_tilde(path: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(path).into_owned())
}

/// Walk up from `start` looking for a directory containing `marker`.
///
/// `marker` may be nested (e.g. `"docs/payment-api-guides"`). Returns the
/// ancestor that contains it, not the marker path itself.
pub fn find_dir_with_marker(start: &Path, marker: &str) -> Option<PathBuf> {
    start
        .ancestors()
        .find(|dir| dir.join(marker).exists())
        .map(Path::to_path_buf)
}
