//! Icon selection for Xbox / Microsoft Store packaged games.
//!
//! Packaged apps ship their artwork as loose PNGs with a handful of naming
//! conventions instead of an embedded icon resource. This module scans a
//! package's content directory, resolves the pixel size of every logo-like
//! file, and picks the one that best fits the requested output size.

mod cache;
mod candidate;
pub mod naming;
mod scoring;

use std::path::Path;

use tracing::{debug, info};

pub use cache::CandidateCache;
pub use candidate::{IconCandidate, discover_candidates, priority_for};
pub use naming::{IconKind, IconLocation};
pub use scoring::{ScoredCandidate, match_score, rank, size_fit};

use crate::detect::MAX_CANONICAL_SIZE;
use crate::error::{IconError, Result};

/// What the caller wants out of a package. Built through
/// [`SelectionRequest::new`] so the target is always positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionRequest {
    target_size: u32,
    /// Only honoured when `target_size` is the largest canonical size.
    require_larger: bool,
    allow_splash_fallback: bool,
}

impl SelectionRequest {
    pub fn new(target_size: u32) -> Result<Self> {
        if target_size == 0 {
            return Err(IconError::InvalidInput(
                "target size must be positive".into(),
            ));
        }
        Ok(Self {
            target_size,
            require_larger: false,
            allow_splash_fallback: false,
        })
    }

    pub fn require_larger(mut self, require_larger: bool) -> Self {
        self.require_larger = require_larger;
        self
    }

    pub fn allow_splash_fallback(mut self, allow: bool) -> Self {
        self.allow_splash_fallback = allow;
        self
    }

    pub fn target_size(&self) -> u32 {
        self.target_size
    }

    pub fn requires_larger(&self) -> bool {
        self.require_larger
    }

    pub fn allows_splash_fallback(&self) -> bool {
        self.allow_splash_fallback
    }

    fn has_size_floor(&self) -> bool {
        self.require_larger && self.target_size == MAX_CANONICAL_SIZE
    }
}

/// Pick the best candidate for `request`, or `None` if nothing qualifies.
///
/// Regular logos are ranked by match score. Splash screens are a last
/// resort: they are only considered when no regular logo exists, or when
/// a size floor is in effect, nothing meets it and the request allows the
/// fallback. Among splash screens the largest wins.
pub fn choose_best<'a>(
    candidates: &'a [IconCandidate],
    request: &SelectionRequest,
) -> Option<&'a IconCandidate> {
    let (splash, regular): (Vec<&IconCandidate>, Vec<&IconCandidate>) =
        candidates.iter().partition(|c| c.is_splash);

    if regular.is_empty() {
        return if request.allow_splash_fallback {
            largest(&splash)
        } else {
            None
        };
    }

    let target = request.target_size;
    if request.has_size_floor() {
        let eligible = regular.iter().copied().filter(|c| c.size >= target);
        if let Some(best) = rank(eligible, target).first() {
            return Some(best.candidate);
        }
        debug!("No logo meets the {}px floor", target);
        if request.allow_splash_fallback {
            if let Some(fallback) = largest(&splash) {
                return Some(fallback);
            }
        }
    }

    rank(regular.iter().copied(), target)
        .first()
        .map(|scored| scored.candidate)
}

fn largest<'a>(candidates: &[&'a IconCandidate]) -> Option<&'a IconCandidate> {
    candidates
        .iter()
        .copied()
        .max_by(|a, b| a.size.cmp(&b.size).then_with(|| b.path.cmp(&a.path)))
}

/// Select the best icon inside a package content directory.
///
/// Returns [`IconError::NotFound`] when the directory is missing, holds no
/// recognized logos, or nothing satisfies the request.
pub fn select_best_icon(
    content_dir: &Path,
    request: &SelectionRequest,
    cache: &CandidateCache,
) -> Result<IconCandidate> {
    let candidates = cache.get_or_discover(content_dir)?;
    if candidates.is_empty() {
        return Err(IconError::NotFound(format!(
            "no logo images under '{}'",
            content_dir.display()
        )));
    }

    let chosen = choose_best(&candidates, request).ok_or_else(|| {
        IconError::NotFound(format!(
            "no suitable logo under '{}' for {}px",
            content_dir.display(),
            request.target_size
        ))
    })?;

    info!(
        "Package icon: '{}' ({}px, priority {}{})",
        chosen.display_name,
        chosen.size,
        chosen.priority,
        if chosen.is_splash { ", splash" } else { "" }
    );
    Ok(chosen.clone())
}

/// [`select_best_icon`] with the request given as plain arguments.
pub fn select_best_icon_with(
    content_dir: &Path,
    target_size: u32,
    require_larger: bool,
    allow_splash_fallback: bool,
    cache: &CandidateCache,
) -> Result<IconCandidate> {
    let request = SelectionRequest::new(target_size)?
        .require_larger(require_larger)
        .allow_splash_fallback(allow_splash_fallback);
    select_best_icon(content_dir, &request, cache)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn candidate(name: &str, size: u32, priority: i32) -> IconCandidate {
        IconCandidate {
            path: PathBuf::from(name),
            size,
            display_name: name.to_string(),
            priority,
            is_splash: name.to_ascii_lowercase().contains("splash"),
            location: IconLocation::Root,
        }
    }

    fn request(target: u32) -> SelectionRequest {
        SelectionRequest::new(target).unwrap()
    }

    #[test]
    fn perfect_match_dominates() {
        let list = vec![
            candidate("logo.png", 256, 125),
            candidate("storelogo44x44.png", 44, 115),
        ];
        let best = choose_best(&list, &request(256)).unwrap();
        assert_eq!(best.display_name, "logo.png");
    }

    #[test]
    fn downscale_preferred_over_upscale() {
        let list = vec![
            candidate("Square44x44Logo.png", 44, 120),
            candidate("Square150x150Logo.png", 150, 120),
        ];
        let best = choose_best(&list, &request(64)).unwrap();
        assert_eq!(best.size, 150);
    }

    #[test]
    fn splash_only_needs_fallback() {
        let list = vec![candidate("SplashScreen.png", 620, 110)];
        assert!(choose_best(&list, &request(256)).is_none());

        let allowed = request(256).allow_splash_fallback(true);
        let best = choose_best(&list, &allowed).unwrap();
        assert_eq!(best.display_name, "SplashScreen.png");
    }

    #[test]
    fn largest_splash_wins_regardless_of_score() {
        let list = vec![
            candidate("splash.png", 256, 110),
            candidate("SplashScreen.scale-200.png", 1240, 110),
        ];
        let allowed = request(256).allow_splash_fallback(true);
        assert_eq!(choose_best(&list, &allowed).unwrap().size, 1240);
    }

    #[test]
    fn size_floor_filters_small_logos() {
        let list = vec![
            candidate("logo.png", 128, 145),
            candidate("StoreLogo.png", 300, 100),
        ];
        let strict = request(256).require_larger(true);
        assert_eq!(choose_best(&list, &strict).unwrap().size, 300);
    }

    #[test]
    fn size_floor_only_applies_at_256() {
        let list = vec![
            candidate("logo.png", 64, 145),
            candidate("StoreLogo.png", 30, 100),
        ];
        let strict = request(128).require_larger(true);
        assert_eq!(choose_best(&list, &strict).unwrap().size, 64);
    }

    #[test]
    fn unmet_floor_without_splash_fallback_keeps_best_logo() {
        let list = vec![
            candidate("logo.png", 150, 145),
            candidate("StoreLogo.png", 50, 135),
            candidate("SplashScreen.png", 620, 110),
        ];
        let strict = request(256).require_larger(true);
        assert_eq!(choose_best(&list, &strict).unwrap().display_name, "logo.png");
    }

    #[test]
    fn unmet_floor_with_splash_fallback_uses_splash() {
        let list = vec![
            candidate("logo.png", 150, 145),
            candidate("SplashScreen.png", 620, 110),
        ];
        let strict = request(256)
            .require_larger(true)
            .allow_splash_fallback(true);
        assert_eq!(
            choose_best(&list, &strict).unwrap().display_name,
            "SplashScreen.png"
        );
    }

    #[test]
    fn unmet_floor_with_fallback_but_no_splash_keeps_logo() {
        let list = vec![candidate("logo.png", 150, 145)];
        let strict = request(256)
            .require_larger(true)
            .allow_splash_fallback(true);
        assert_eq!(choose_best(&list, &strict).unwrap().size, 150);
    }

    #[test]
    fn splash_ignored_when_regular_logos_exist() {
        let list = vec![
            candidate("StoreLogo.png", 50, 135),
            candidate("SplashScreen.png", 620, 110),
        ];
        let allowed = request(256).allow_splash_fallback(true);
        assert_eq!(
            choose_best(&list, &allowed).unwrap().display_name,
            "StoreLogo.png"
        );
    }

    #[test]
    fn empty_candidate_list_yields_none() {
        assert!(choose_best(&[], &request(256).allow_splash_fallback(true)).is_none());
    }

    #[test]
    fn zero_target_is_rejected() {
        assert!(matches!(
            SelectionRequest::new(0),
            Err(IconError::InvalidInput(_))
        ));
        let cache = CandidateCache::new();
        assert!(select_best_icon_with(Path::new("."), 0, false, true, &cache).is_err());
        assert!(cache.is_empty());
    }

    #[test]
    fn builder_sets_every_field() {
        let request = request(44).require_larger(true).allow_splash_fallback(true);
        assert_eq!(request.target_size(), 44);
        assert!(request.requires_larger());
        assert!(request.allows_splash_fallback());
        assert!(!request.has_size_floor());
    }
}
