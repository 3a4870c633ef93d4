//! End-to-end icon extraction: package logos first, shell icon otherwise.

use std::path::{Path, PathBuf};

use image::RgbaImage;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::detect::{MAX_CANONICAL_SIZE, crop_to_native, detect_native_size};
use crate::error::Result;
use crate::package::resolve_content_dir;
use crate::resize::resize_icon;
use crate::shell::extract_shell_bitmap;
use crate::xbox::{CandidateCache, SelectionRequest, select_best_icon};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractOptions {
    /// Output size; `None` keeps the native resolution.
    pub size: Option<u32>,
    pub require_larger: bool,
    pub allow_splash_fallback: bool,
    pub resize_tool: Option<PathBuf>,
}

impl From<&Config> for ExtractOptions {
    fn from(config: &Config) -> Self {
        Self {
            size: config.default_size,
            require_larger: config.require_larger,
            allow_splash_fallback: config.allow_splash_fallback,
            resize_tool: config.resize_tool.clone(),
        }
    }
}

impl ExtractOptions {
    fn selection_request(&self) -> Result<SelectionRequest> {
        Ok(SelectionRequest::new(self.size.unwrap_or(MAX_CANONICAL_SIZE))?
            .require_larger(self.require_larger)
            .allow_splash_fallback(self.allow_splash_fallback))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IconSource {
    /// A logo PNG picked from a package.
    Package { path: PathBuf, native_size: u32 },
    /// The shell icon, trimmed to its detected size.
    Shell { native_size: u32 },
}

#[derive(Debug, Clone)]
pub struct ExtractedIcon {
    pub image: RgbaImage,
    pub source: IconSource,
}

/// Extract the best icon for `input`.
pub fn extract_icon(
    input: &Path,
    options: &ExtractOptions,
    cache: &CandidateCache,
) -> Result<ExtractedIcon> {
    let request = options.selection_request()?;

    let native = match package_icon(input, &request, cache) {
        Some(icon) => icon,
        None => shell_icon(input)?,
    };

    match options.size {
        Some(size) if native.image.dimensions() != (size, size) => {
            let image = resize_icon(&native.image, size, options.resize_tool.as_deref())?;
            Ok(ExtractedIcon {
                image,
                source: native.source,
            })
        }
        _ => Ok(native),
    }
}

fn package_icon(
    input: &Path,
    request: &SelectionRequest,
    cache: &CandidateCache,
) -> Option<ExtractedIcon> {
    let content_dir = resolve_content_dir(input)?;
    info!("{:?} is packaged, content at {:?}", input, content_dir);

    let candidate = match select_best_icon(&content_dir, request, cache) {
        Ok(candidate) => candidate,
        Err(e) => {
            debug!("Package selection failed, using shell icon: {}", e);
            return None;
        }
    };

    match image::open(&candidate.path) {
        Ok(img) => Some(ExtractedIcon {
            image: square_crop(img.to_rgba8()),
            source: IconSource::Package {
                path: candidate.path,
                native_size: candidate.size,
            },
        }),
        Err(e) => {
            warn!("Could not decode {:?}, using shell icon: {}", candidate.path, e);
            None
        }
    }
}

fn shell_icon(input: &Path) -> Result<ExtractedIcon> {
    let bitmap = extract_shell_bitmap(input)?;
    let native_size = detect_native_size(&bitmap)?;
    info!(
        "Detected native size {}px on a {}x{} canvas",
        native_size,
        bitmap.width(),
        bitmap.height()
    );
    Ok(ExtractedIcon {
        image: crop_to_native(&bitmap, native_size),
        source: IconSource::Shell { native_size },
    })
}

/// Centre-crop non-square artwork to its smaller side.
fn square_crop(img: RgbaImage) -> RgbaImage {
    let (width, height) = img.dimensions();
    if width == height {
        return img;
    }
    let side = width.min(height);
    let x = (width - side) / 2;
    let y = (height - side) / 2;
    image::imageops::crop_imm(&img, x, y, side, side).to_image()
}
