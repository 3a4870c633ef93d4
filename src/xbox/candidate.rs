use std::path::{Path, PathBuf};

use rayon::prelude::*;
use tracing::debug;
use walkdir::WalkDir;

use super::naming::{
    IconKind, IconLocation, classify_file_name, classify_location, location_bonus, name_bonus,
    size_from_file_name,
};
use crate::error::{IconError, Result};
use crate::png_header::read_png_dimensions;

const BASE_PRIORITY: i32 = 100;
const SPLASH_PENALTY: i32 = 10;

/// A PNG inside a package that could serve as the app's icon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconCandidate {
    pub path: PathBuf,
    /// Smaller of width and height, in pixels.
    pub size: u32,
    pub display_name: String,
    pub priority: i32,
    pub is_splash: bool,
    pub location: IconLocation,
}

impl IconCandidate {
    pub fn new(path: PathBuf, size: u32, kind: IconKind, location: IconLocation) -> Self {
        let display_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        let is_splash = kind.is_splash() || display_name.to_ascii_lowercase().contains("splash");
        Self {
            path,
            size,
            display_name,
            priority: priority_for(kind, location, is_splash),
            is_splash,
            location,
        }
    }
}

pub fn priority_for(kind: IconKind, location: IconLocation, is_splash: bool) -> i32 {
    let mut priority = BASE_PRIORITY + location_bonus(location) + name_bonus(kind);
    if is_splash {
        priority -= SPLASH_PENALTY;
    }
    priority
}

/// A file that passed the name and folder filters but has no size yet.
#[derive(Debug)]
struct PendingCandidate {
    path: PathBuf,
    kind: IconKind,
    location: IconLocation,
}

impl PendingCandidate {
    fn resolve(self) -> Result<IconCandidate> {
        let size = match self.file_name().and_then(size_from_file_name) {
            Some(size) => size,
            None => {
                let (width, height) = read_png_dimensions(&self.path)?;
                width.min(height)
            }
        };
        Ok(IconCandidate::new(self.path, size, self.kind, self.location))
    }

    fn file_name(&self) -> Option<&str> {
        self.path.file_name().and_then(|name| name.to_str())
    }
}

/// Walk `content_dir` and collect every recognized logo PNG with its
/// resolved size and priority. Files whose size cannot be read are dropped.
///
/// The result is sorted by path.
pub fn discover_candidates(content_dir: &Path) -> Result<Vec<IconCandidate>> {
    if !content_dir.is_dir() {
        return Err(IconError::NotFound(format!(
            "content directory '{}' does not exist",
            content_dir.display()
        )));
    }

    let pending: Vec<PendingCandidate> = WalkDir::new(content_dir)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                debug!("Skipping unreadable entry under {:?}: {}", content_dir, e);
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .filter_map(|entry| {
            let path = entry.into_path();
            let kind = classify_file_name(path.file_name()?.to_str()?)?;
            let relative_dir = path.parent()?.strip_prefix(content_dir).ok()?;
            let location = classify_location(relative_dir)?;
            Some(PendingCandidate {
                path,
                kind,
                location,
            })
        })
        .collect();

    let mut candidates: Vec<IconCandidate> = pending
        .into_par_iter()
        .filter_map(|pending| {
            let path = pending.path.clone();
            match pending.resolve() {
                Ok(candidate) => Some(candidate),
                Err(e) => {
                    debug!("Dropping candidate {:?}: {}", path, e);
                    None
                }
            }
        })
        .collect();

    candidates.sort_by(|a, b| a.path.cmp(&b.path));
    debug!(
        "Found {} icon candidates under {:?}",
        candidates.len(),
        content_dir
    );
    Ok(candidates)
}
