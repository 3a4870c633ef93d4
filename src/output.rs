use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process::Command;

use image::{ImageEncoder, RgbaImage};
use image::codecs::png::PngEncoder;
use tracing::{info, warn};

use crate::error::{IconError, Result};

/// Default output location for an input: `<output_dir>/<input stem>.png`.
pub fn default_output_path(input: &Path, output_dir: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .or_else(|| input.file_name())
        .map(|s| s.to_string_lossy().into_owned())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "icon".to_string());
    output_dir.join(format!("{}.png", stem))
}

/// Encode `img` as PNG at `path`, creating parent directories.
///
/// The image is written to a temporary file next to `path` first so a
/// failed write never leaves a truncated PNG behind.
pub fn save_png(img: &RgbaImage, path: &Path) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    std::fs::create_dir_all(&dir).map_err(|e| IconError::io(&dir, e))?;

    let mut temp = tempfile::NamedTempFile::new_in(&dir).map_err(|e| IconError::io(&dir, e))?;
    {
        let mut writer = BufWriter::new(temp.as_file_mut());
        PngEncoder::new(&mut writer).write_image(
            img.as_raw(),
            img.width(),
            img.height(),
            image::ExtendedColorType::Rgba8,
        )?;
        writer.flush().map_err(|e| IconError::io(path, e))?;
    }
    temp.persist(path)
        .map_err(|e| IconError::io(path, e.error))?;

    info!(
        "Saved {}x{} icon to {:?}",
        img.width(),
        img.height(),
        path
    );
    Ok(())
}

/// Open `path` in the platform's default viewer without waiting for it.
/// Failure to launch is logged, never fatal.
pub fn open_in_viewer(path: &Path) {
    let mut command = if cfg!(windows) {
        let mut c = Command::new("cmd");
        c.args(["/C", "start", ""]).arg(path);
        c
    } else if cfg!(target_os = "macos") {
        let mut c = Command::new("open");
        c.arg(path);
        c
    } else {
        let mut c = Command::new("xdg-open");
        c.arg(path);
        c
    };

    if let Err(e) = command.spawn() {
        warn!("Could not open viewer for {:?}: {}", path, e);
    }
}
