//! Resizing through an external tool (ImageMagick), with an in-process
//! Lanczos3 fallback when the tool is missing or fails.

use std::path::{Path, PathBuf};
use std::process::Command;

use image::RgbaImage;
use image::imageops::FilterType;
use tracing::{debug, info, warn};

use crate::error::{IconError, Result};

pub const DEFAULT_RESIZE_TOOL: &str = "magick";

/// Locate the resize tool.
///
/// An explicit tool may be a path or a bare name looked up on PATH. When it
/// cannot be found, `magick` is not used in its place.
pub fn find_resize_tool(explicit: Option<&Path>) -> Option<PathBuf> {
    match explicit {
        Some(tool) => match which::which(tool) {
            Ok(path) => Some(path),
            Err(e) => {
                warn!("Resize tool {:?} not found: {}", tool, e);
                None
            }
        },
        None => which::which(DEFAULT_RESIZE_TOOL).ok(),
    }
}

/// Resize `img` to `size`×`size`.
///
/// Never fails because of the external tool: any problem with it drops back
/// to resizing in-process.
pub fn resize_icon(img: &RgbaImage, size: u32, tool: Option<&Path>) -> Result<RgbaImage> {
    if size == 0 {
        return Err(IconError::InvalidInput("resize target must be positive".into()));
    }
    if img.dimensions() == (size, size) {
        return Ok(img.clone());
    }

    if let Some(tool) = find_resize_tool(tool) {
        match resize_with_tool(img, size, &tool) {
            Ok(resized) => {
                info!("Resized to {}px with {:?}", size, tool);
                return Ok(resized);
            }
            Err(e) => warn!("External resize failed, using built-in resize: {}", e),
        }
    } else {
        debug!("No external resize tool, using built-in resize");
    }

    Ok(resize_in_process(img, size))
}

pub fn resize_in_process(img: &RgbaImage, size: u32) -> RgbaImage {
    image::imageops::resize(img, size, size, FilterType::Lanczos3)
}

fn resize_with_tool(img: &RgbaImage, size: u32, tool: &Path) -> Result<RgbaImage> {
    let workdir = tempfile::tempdir().map_err(|e| IconError::io(std::env::temp_dir(), e))?;
    let input = workdir.path().join("input.png");
    let output = workdir.path().join("output.png");
    img.save(&input)?;

    let geometry = format!("{}x{}!", size, size);
    let status = Command::new(tool)
        .arg(&input)
        .arg("-resize")
        .arg(&geometry)
        .arg(&output)
        .status()
        .map_err(|e| IconError::io(tool, e))?;
    if !status.success() {
        return Err(IconError::Shell(format!(
            "{:?} exited with {}",
            tool, status
        )));
    }

    let resized = image::open(&output)?.to_rgba8();
    if resized.dimensions() != (size, size) {
        return Err(IconError::Shell(format!(
            "{:?} produced {}x{} instead of {}px",
            tool,
            resized.width(),
            resized.height(),
            size
        )));
    }
    Ok(resized)
}
