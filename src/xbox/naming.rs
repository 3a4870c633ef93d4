//! Filename and folder conventions used by Xbox / Store packages for
//! their logo assets.

use std::path::{Component, Path};
use std::sync::OnceLock;

use regex::Regex;

/// Which logo convention a filename follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IconKind {
    /// `Logo.png`
    Logo,
    /// `Square150x150Logo.png`, `Square44x44Logo.png`, `SquareLogo.png`
    SquareLogo,
    /// `StoreLogo.png`, `StoreLogo150x150.png`
    StoreLogo,
    /// `xbc_logo.png`
    XbcLogo,
    SmallLogo,
    LargeLogo,
    /// `SplashScreen.png`, `splash.png`
    Splash,
}

impl IconKind {
    pub fn is_splash(self) -> bool {
        self == IconKind::Splash
    }
}

/// Where a candidate lives relative to the package content root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IconLocation {
    Root,
    /// Under a `media/logos` folder.
    Logos,
    /// Under a `resources` folder.
    Resources,
    /// Under a Unity `<game>_Data/StreamingAssets` folder.
    StreamingAssets,
}

fn name_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(
            r"(?ix)
            ^(?P<kind>
                logo
              | storelogo
              | square(?:\d+x\d+|_)?logo
              | xbc_logo
              | small_?logo
              | large_?logo
              | splash(?:_?screen)?
            )
            (?:[._-]?(?:\d+x\d+|scale-\d+|targetsize-\d+|altform-[a-z]+|contrast-[a-z]+|theme-[a-z]+))*
            \.png$",
        )
        .expect("icon name pattern is valid")
    })
}

fn dimension_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(?i)(\d+)x(\d+)").expect("dimension pattern is valid"))
}

fn target_size_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(?i)targetsize-(\d+)").expect("targetsize pattern is valid"))
}

/// Match a filename (with extension) against the recognized logo names.
pub fn classify_file_name(file_name: &str) -> Option<IconKind> {
    let captures = name_pattern().captures(file_name)?;
    let kind = captures.name("kind")?.as_str().to_ascii_lowercase();

    let kind = if kind == "logo" {
        IconKind::Logo
    } else if kind == "storelogo" {
        IconKind::StoreLogo
    } else if kind.starts_with("square") {
        IconKind::SquareLogo
    } else if kind == "xbc_logo" {
        IconKind::XbcLogo
    } else if kind.starts_with("small") {
        IconKind::SmallLogo
    } else if kind.starts_with("large") {
        IconKind::LargeLogo
    } else {
        IconKind::Splash
    };
    Some(kind)
}

/// Pixel size encoded in a filename: the smaller side of a `WxH` token, or a
/// `targetsize-N` qualifier.
///
/// A `WxH` token always wins, so `targetsize-N` only sizes names without one
/// (`Square44x44Logo.targetsize-256.png` is 44).
pub fn size_from_file_name(file_name: &str) -> Option<u32> {
    if let Some(captures) = dimension_pattern().captures(file_name) {
        let width: u32 = captures[1].parse().ok()?;
        let height: u32 = captures[2].parse().ok()?;
        let size = width.min(height);
        return (size > 0).then_some(size);
    }

    let captures = target_size_pattern().captures(file_name)?;
    let size: u32 = captures[1].parse().ok()?;
    (size > 0).then_some(size)
}

/// Classify the folder a candidate sits in, given its parent directory
/// relative to the content root. `None` means the folder is not one that
/// packages use for logo assets.
pub fn classify_location(relative_dir: &Path) -> Option<IconLocation> {
    let segments: Vec<String> = relative_dir
        .components()
        .filter_map(|component| match component {
            Component::Normal(name) => Some(name.to_string_lossy().to_ascii_lowercase()),
            _ => None,
        })
        .collect();

    if segments.is_empty() {
        return Some(IconLocation::Root);
    }

    let follows = |parent: fn(&str) -> bool, child: &str| {
        segments
            .windows(2)
            .any(|pair| parent(&pair[0]) && pair[1] == child)
    };

    if follows(|s: &str| s == "media", "logos") {
        Some(IconLocation::Logos)
    } else if segments.iter().any(|s| s == "resources") {
        Some(IconLocation::Resources)
    } else if follows(|s: &str| s.ends_with("_data"), "streamingassets") {
        Some(IconLocation::StreamingAssets)
    } else {
        None
    }
}

pub fn location_bonus(location: IconLocation) -> i32 {
    match location {
        IconLocation::Root => 20,
        IconLocation::Logos => 15,
        IconLocation::Resources => 10,
        IconLocation::StreamingAssets => 0,
    }
}

pub fn name_bonus(kind: IconKind) -> i32 {
    match kind {
        IconKind::Logo => 25,
        IconKind::SquareLogo => 20,
        IconKind::StoreLogo => 15,
        IconKind::XbcLogo => 12,
        IconKind::SmallLogo | IconKind::LargeLogo => 10,
        IconKind::Splash => 0,
    }
}
