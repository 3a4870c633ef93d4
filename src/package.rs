//! Detects whether a path belongs to an Xbox / Store package.

use std::path::{Path, PathBuf};

use tracing::debug;

/// Manifests that mark the root of a package's content directory.
pub const PACKAGE_MANIFESTS: [&str; 2] = ["MicrosoftGame.config", "AppxManifest.xml"];

/// Content directory of the package `path` belongs to, if any.
///
/// `path` may be a file inside the package (usually the game executable)
/// or a directory. The nearest ancestor holding a package manifest wins.
pub fn resolve_content_dir(path: &Path) -> Option<PathBuf> {
    let start = if path.is_dir() { path } else { path.parent()? };

    for dir in start.ancestors() {
        if let Some(manifest) = find_manifest(dir) {
            debug!("Found package manifest {:?}", manifest);
            return Some(dir.to_path_buf());
        }
    }
    None
}

/// Manifest files are matched case-insensitively; installers are not
/// consistent about their capitalization.
fn find_manifest(dir: &Path) -> Option<PathBuf> {
    let entries = std::fs::read_dir(dir).ok()?;
    entries
        .flatten()
        .filter(|entry| entry.file_type().map(|t| t.is_file()).unwrap_or(false))
        .map(|entry| entry.path())
        .find(|path| {
            path.file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| {
                    PACKAGE_MANIFESTS
                        .iter()
                        .any(|manifest| name.eq_ignore_ascii_case(manifest))
                })
        })
}
