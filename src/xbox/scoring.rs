//! Ranking of candidates against a requested icon size.

use std::cmp::Ordering;

use super::candidate::IconCandidate;

const SIZE_WEIGHT: f64 = 0.5;
const QUALITY_WEIGHT: f64 = 0.3;
const PRIORITY_WEIGHT: f64 = 0.2;
const PRIORITY_SCALE: f64 = 200.0;

/// How well `size` fits `target`. Downscaling is preferred over upscaling.
pub fn size_fit(size: u32, target: u32) -> f64 {
    let ratio = size as f64 / target as f64;
    if size == target {
        1.0
    } else if ratio > 1.0 {
        1.0 - 0.1 * ratio.log2()
    } else {
        ratio * ratio
    }
}

/// Combined match score of a candidate for a target size.
pub fn match_score(candidate: &IconCandidate, target: u32) -> f64 {
    let quality = if candidate.size >= target { 1.0 } else { 0.7 };
    let priority = candidate.priority as f64 / PRIORITY_SCALE;

    SIZE_WEIGHT * size_fit(candidate.size, target)
        + QUALITY_WEIGHT * quality
        + PRIORITY_WEIGHT * priority
}

#[derive(Debug, Clone, Copy)]
pub struct ScoredCandidate<'a> {
    pub candidate: &'a IconCandidate,
    pub score: f64,
}

/// Score and sort candidates best first.
///
/// Equal scores fall back to the larger size, then to path order.
pub fn rank<'a, I>(candidates: I, target: u32) -> Vec<ScoredCandidate<'a>>
where
    I: IntoIterator<Item = &'a IconCandidate>,
{
    let mut scored: Vec<ScoredCandidate<'a>> = candidates
        .into_iter()
        .map(|candidate| ScoredCandidate {
            candidate,
            score: match_score(candidate, target),
        })
        .collect();
    scored.sort_by(compare_scored);
    scored
}

fn compare_scored(a: &ScoredCandidate<'_>, b: &ScoredCandidate<'_>) -> Ordering {
    b.score
        .total_cmp(&a.score)
        .then_with(|| b.candidate.size.cmp(&a.candidate.size))
        .then_with(|| a.candidate.path.cmp(&b.candidate.path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xbox::naming::IconLocation;
    use std::path::PathBuf;

    fn candidate(name: &str, size: u32, priority: i32) -> IconCandidate {
        IconCandidate {
            path: PathBuf::from(name),
            size,
            display_name: name.to_string(),
            priority,
            is_splash: false,
            location: IconLocation::Root,
        }
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn size_fit_curve() {
        assert!(approx(size_fit(256, 256), 1.0));
        assert!(approx(size_fit(512, 256), 0.9));
        assert!(approx(size_fit(1024, 256), 0.8));
        assert!(approx(size_fit(128, 256), 0.25));
        assert!(approx(size_fit(64, 256), 0.0625));
    }

    #[test]
    fn combined_score_weights() {
        // 0.5 * 1.0 + 0.3 * 1.0 + 0.2 * (125 / 200)
        assert!(approx(match_score(&candidate("logo.png", 256, 125), 256), 0.925));
        // 0.5 * (44/256)^2 + 0.3 * 0.7 + 0.2 * (115 / 200)
        let expected = 0.5 * (44.0f64 / 256.0).powi(2) + 0.21 + 0.115;
        assert!(approx(
            match_score(&candidate("storelogo44x44.png", 44, 115), 256),
            expected
        ));
    }

    #[test]
    fn larger_beats_smaller_at_equal_distance() {
        let list = [candidate("a.png", 128, 120), candidate("b.png", 512, 120)];
        let ranked = rank(list.iter(), 256);
        assert_eq!(ranked[0].candidate.size, 512);
    }

    #[test]
    fn ties_break_on_size_then_path() {
        let list = [
            candidate("z.png", 64, 120),
            candidate("a.png", 64, 120),
        ];
        let ranked = rank(list.iter(), 64);
        assert_eq!(ranked[0].candidate.path, PathBuf::from("a.png"));
        assert_eq!(ranked[1].candidate.path, PathBuf::from("z.png"));
    }
}
