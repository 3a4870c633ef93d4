//! Package scanning and selection against real directory trees.

use std::fs;
use std::path::Path;

use image::{Rgba, RgbaImage};
use oxide_icon::IconError;
use oxide_icon::xbox::{
    CandidateCache, IconLocation, SelectionRequest, discover_candidates, select_best_icon,
    select_best_icon_with,
};
use tempfile::TempDir;

fn write_png(path: &Path, width: u32, height: u32) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    RgbaImage::from_pixel(width, height, Rgba([40, 80, 160, 255]))
        .save(path)
        .unwrap();
}

/// A typical Xbox PC install: logos in the root and `Media/Logos`, a splash
/// screen, and unrelated PNGs elsewhere.
fn xbox_package() -> TempDir {
    let dir = TempDir::new().expect("temp dir");
    let root = dir.path();
    fs::write(root.join("MicrosoftGame.config"), "<Game/>").unwrap();
    write_png(&root.join("StoreLogo.png"), 100, 100);
    write_png(&root.join("Square150x150Logo.png"), 150, 150);
    write_png(&root.join("Square44x44Logo.png"), 44, 44);
    write_png(&root.join("SplashScreen.png"), 620, 300);
    write_png(&root.join("Media").join("Logos").join("Logo.png"), 256, 256);
    write_png(&root.join("textures").join("logo.png"), 1024, 1024);
    write_png(&root.join("ui").join("background.png"), 1920, 1080);
    dir
}

#[test]
fn enumerates_only_recognized_names_and_folders() {
    let package = xbox_package();
    let candidates = discover_candidates(package.path()).unwrap();

    let mut names: Vec<&str> = candidates.iter().map(|c| c.display_name.as_str()).collect();
    names.sort();
    assert_eq!(
        names,
        [
            "Logo.png",
            "SplashScreen.png",
            "Square150x150Logo.png",
            "Square44x44Logo.png",
            "StoreLogo.png",
        ]
    );

    let logo = candidates
        .iter()
        .find(|c| c.display_name == "Logo.png")
        .unwrap();
    assert_eq!(logo.location, IconLocation::Logos);
    assert_eq!(logo.priority, 140);
    assert_eq!(logo.size, 256);

    let splash = candidates.iter().find(|c| c.is_splash).unwrap();
    assert_eq!(splash.size, 300);
    assert_eq!(splash.priority, 110);
}

#[test]
fn picks_exact_size_for_256() {
    let package = xbox_package();
    let cache = CandidateCache::new();
    let best = select_best_icon_with(package.path(), 256, false, false, &cache).unwrap();
    assert_eq!(best.display_name, "Logo.png");
}

#[test]
fn picks_exact_size_for_small_targets() {
    let package = xbox_package();
    let cache = CandidateCache::new();
    let best = select_best_icon_with(package.path(), 44, false, false, &cache).unwrap();
    assert_eq!(best.display_name, "Square44x44Logo.png");
}

#[test]
fn filename_size_token_beats_header() {
    let dir = TempDir::new().unwrap();
    // Deliberately mislabelled: the name wins without opening the file.
    write_png(&dir.path().join("StoreLogo150x150.png"), 10, 10);

    let candidates = discover_candidates(dir.path()).unwrap();
    assert_eq!(candidates.len(), 1);
    assert_eq!(candidates[0].size, 150);
}

#[test]
fn header_size_used_without_token() {
    let dir = TempDir::new().unwrap();
    write_png(&dir.path().join("StoreLogo.png"), 44, 44);

    let candidates = discover_candidates(dir.path()).unwrap();
    assert_eq!(candidates[0].size, 44);
}

#[test]
fn unity_streaming_assets_are_searched() {
    let dir = TempDir::new().unwrap();
    write_png(
        &dir.path()
            .join("MyGame_Data")
            .join("StreamingAssets")
            .join("logo.png"),
        128,
        128,
    );
    write_png(&dir.path().join("Resources").join("xbc_logo.png"), 64, 64);

    let candidates = discover_candidates(dir.path()).unwrap();
    let streaming = candidates
        .iter()
        .find(|c| c.location == IconLocation::StreamingAssets)
        .unwrap();
    assert_eq!(streaming.priority, 125);
    let resources = candidates
        .iter()
        .find(|c| c.location == IconLocation::Resources)
        .unwrap();
    assert_eq!(resources.priority, 122);
}

#[test]
fn corrupt_candidates_do_not_abort_selection() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("Logo.png"), b"\x89PNG garbage").unwrap();
    write_png(&dir.path().join("SmallLogo.png"), 32, 32);

    let cache = CandidateCache::new();
    let best = select_best_icon_with(dir.path(), 256, false, false, &cache).unwrap();
    assert_eq!(best.display_name, "SmallLogo.png");
}

#[test]
fn size_floor_with_and_without_splash_fallback() {
    let dir = TempDir::new().unwrap();
    write_png(&dir.path().join("StoreLogo.png"), 100, 100);
    write_png(&dir.path().join("SplashScreen.png"), 620, 620);
    let cache = CandidateCache::new();

    let strict = select_best_icon_with(dir.path(), 256, true, false, &cache).unwrap();
    assert_eq!(strict.display_name, "StoreLogo.png");

    let fallback = select_best_icon_with(dir.path(), 256, true, true, &cache).unwrap();
    assert_eq!(fallback.display_name, "SplashScreen.png");
    assert!(fallback.is_splash);
}

#[test]
fn splash_only_package() {
    let dir = TempDir::new().unwrap();
    write_png(&dir.path().join("SplashScreen.png"), 620, 300);
    let cache = CandidateCache::new();

    let allowed = select_best_icon_with(dir.path(), 256, false, true, &cache).unwrap();
    assert_eq!(allowed.display_name, "SplashScreen.png");

    let refused = select_best_icon_with(dir.path(), 256, false, false, &cache).unwrap_err();
    assert!(matches!(refused, IconError::NotFound(_)));
}

#[test]
fn empty_or_missing_directories_are_not_found() {
    let dir = TempDir::new().unwrap();
    write_png(&dir.path().join("unrelated.png"), 64, 64);
    let cache = CandidateCache::new();

    let request = SelectionRequest::new(256).unwrap();
    assert!(
        select_best_icon(dir.path(), &request, &cache)
            .unwrap_err()
            .is_not_found()
    );
    assert!(
        select_best_icon(&dir.path().join("gone"), &request, &cache)
            .unwrap_err()
            .is_not_found()
    );
}

#[test]
fn repeated_selection_is_stable() {
    let package = xbox_package();
    let cache = CandidateCache::new();
    let request = SelectionRequest::new(128).unwrap();

    let first = select_best_icon(package.path(), &request, &cache).unwrap();
    for _ in 0..5 {
        assert_eq!(select_best_icon(package.path(), &request, &cache).unwrap(), first);
    }
    assert_eq!(cache.len(), 1);
}
