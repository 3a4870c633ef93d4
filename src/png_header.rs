//! Reads PNG dimensions straight from the IHDR chunk without decoding.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::{IconError, Result};

pub const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1a, b'\n'];

/// Signature (8) + IHDR length (4) + chunk type (4) + width (4) + height (4).
pub const HEADER_LEN: usize = 24;

/// Parse `(width, height)` from the first 24 bytes of a PNG stream.
pub fn parse_png_dimensions(header: &[u8]) -> Result<(u32, u32)> {
    if header.len() < HEADER_LEN {
        return Err(IconError::InvalidPng(format!(
            "need {} bytes, got {}",
            HEADER_LEN,
            header.len()
        )));
    }
    if header[..8] != PNG_SIGNATURE {
        return Err(IconError::InvalidPng("bad signature".into()));
    }
    if &header[12..16] != b"IHDR" {
        return Err(IconError::InvalidPng("first chunk is not IHDR".into()));
    }

    let width = u32::from_be_bytes([header[16], header[17], header[18], header[19]]);
    let height = u32::from_be_bytes([header[20], header[21], header[22], header[23]]);
    if width == 0 || height == 0 {
        return Err(IconError::InvalidPng(format!(
            "zero dimension {}x{}",
            width, height
        )));
    }

    Ok((width, height))
}

/// Read just the header prefix of the file at `path` and return its dimensions.
pub fn read_png_dimensions(path: &Path) -> Result<(u32, u32)> {
    let mut file = File::open(path).map_err(|e| IconError::io(path, e))?;
    let mut header = [0u8; HEADER_LEN];
    file.read_exact(&mut header)
        .map_err(|e| IconError::io(path, e))?;
    parse_png_dimensions(&header)
}
