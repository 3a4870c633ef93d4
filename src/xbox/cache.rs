use std::path::{Path, PathBuf};
use std::sync::Arc;

use dashmap::DashMap;
use tracing::debug;

use super::candidate::{IconCandidate, discover_candidates};
use crate::error::Result;

/// Per-directory candidate lists, shared across lookups.
///
/// Packages do not change while the process runs, so a directory is scanned
/// at most once per cache unless two lookups race; the first result stored
/// wins and both callers see it.
#[derive(Debug, Default)]
pub struct CandidateCache {
    entries: DashMap<PathBuf, Arc<[IconCandidate]>>,
}

impl CandidateCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached candidates for `content_dir`, scanning it on first use.
    pub fn get_or_discover(&self, content_dir: &Path) -> Result<Arc<[IconCandidate]>> {
        let key = normalize_key(content_dir);
        if let Some(hit) = self.entries.get(&key) {
            debug!("Candidate cache hit for {:?}", key);
            return Ok(Arc::clone(hit.value()));
        }

        let discovered: Arc<[IconCandidate]> = discover_candidates(content_dir)?.into();
        let stored = self.entries.entry(key).or_insert(discovered);
        Ok(Arc::clone(stored.value()))
    }

    pub fn contains(&self, content_dir: &Path) -> bool {
        self.entries.contains_key(&normalize_key(content_dir))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Canonical form of a directory path used as the cache key.
fn normalize_key(path: &Path) -> PathBuf {
    let resolved = std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
    if cfg!(windows) {
        PathBuf::from(resolved.to_string_lossy().to_lowercase())
    } else {
        resolved
    }
}
