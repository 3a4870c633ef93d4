//! Shell icon retrieval.
//!
//! Uses `SHGetImageList(SHIL_JUMBO)` to get the 256×256 canvas on modern
//! Windows, falling back to `SHIL_EXTRALARGE` (48×48) and then to the
//! windows-icons crate. The canvas usually needs trimming afterwards, see
//! [`crate::detect`].

use std::path::Path;

use image::RgbaImage;

use crate::error::{IconError, Result};

#[cfg(windows)]
pub fn extract_shell_bitmap(path: &Path) -> Result<RgbaImage> {
    use tracing::{debug, info};
    use windows::Win32::UI::Shell::{SHIL_EXTRALARGE, SHIL_JUMBO};

    if !path.exists() {
        return Err(IconError::NotFound(format!(
            "'{}' does not exist",
            path.display()
        )));
    }

    for (list, label) in [(SHIL_JUMBO, "JUMBO"), (SHIL_EXTRALARGE, "EXTRALARGE")] {
        match imp::extract_from_image_list(path, list as i32) {
            Ok(img) => {
                info!(
                    "Shell icon OK: {:?} ({}x{}) [{}]",
                    path,
                    img.width(),
                    img.height(),
                    label
                );
                return Ok(img);
            }
            Err(e) => debug!("Shell icon {} failed for {:?}: {}", label, path, e),
        }
    }

    let path_str = path
        .to_str()
        .ok_or_else(|| IconError::InvalidInput(format!("non-UTF-8 path {:?}", path)))?;
    let icon = windows_icons::get_icon_by_path(path_str)
        .map_err(|e| IconError::Shell(format!("{:?}: {}", path, e)))?;
    info!(
        "Shell icon OK: {:?} ({}x{}) [fallback]",
        path,
        icon.width(),
        icon.height()
    );
    Ok(icon)
}

#[cfg(not(windows))]
pub fn extract_shell_bitmap(path: &Path) -> Result<RgbaImage> {
    Err(IconError::Unsupported(format!(
        "shell icons are only available on Windows (requested {:?})",
        path
    )))
}

#[cfg(windows)]
mod imp {
    use std::ffi::OsStr;
    use std::os::windows::ffi::OsStrExt;
    use std::path::Path;

    use image::RgbaImage;
    use windows::Win32::Foundation::{HWND, SIZE};
    use windows::Win32::Graphics::Gdi::{
        BI_RGB, BITMAPINFO, BITMAPINFOHEADER, CreateCompatibleDC, CreateDIBSection,
        DIB_RGB_COLORS, DeleteDC, DeleteObject, GetDC, GetDIBits, ReleaseDC, SelectObject,
    };
    use windows::Win32::Storage::FileSystem::FILE_ATTRIBUTE_NORMAL;
    use windows::Win32::UI::Controls::IImageList;
    use windows::Win32::UI::Shell::{
        SHFILEINFOW, SHGFI_SYSICONINDEX, SHGetFileInfoW, SHGetImageList,
    };
    use windows::Win32::UI::WindowsAndMessaging::{
        DI_NORMAL, DestroyIcon, DrawIconEx, GetIconInfo, HICON, ICONINFO,
    };
    use windows::core::PCWSTR;

    use crate::error::{IconError, Result};

    fn to_wide(path: &Path) -> Vec<u16> {
        OsStr::new(path)
            .encode_wide()
            .chain(std::iter::once(0))
            .collect()
    }

    pub(super) fn extract_from_image_list(path: &Path, image_list_type: i32) -> Result<RgbaImage> {
        let wide_path = to_wide(path);
        let mut shfi = SHFILEINFOW::default();

        // Index of the file's icon in the system image list.
        let result = unsafe {
            SHGetFileInfoW(
                PCWSTR(wide_path.as_ptr()),
                FILE_ATTRIBUTE_NORMAL,
                Some(&mut shfi),
                std::mem::size_of::<SHFILEINFOW>() as u32,
                SHGFI_SYSICONINDEX,
            )
        };
        if result == 0 {
            return Err(IconError::Shell("SHGetFileInfoW returned no icon index".into()));
        }

        let image_list: IImageList = unsafe { SHGetImageList(image_list_type) }
            .map_err(|e| IconError::Shell(format!("SHGetImageList: {}", e)))?;

        let mut size = SIZE::default();
        unsafe { image_list.GetIconSize(&mut size.cx, &mut size.cy) }
            .map_err(|e| IconError::Shell(format!("GetIconSize: {}", e)))?;
        let (width, height) = (size.cx as u32, size.cy as u32);
        if width == 0 || height == 0 {
            return Err(IconError::Shell("image list reports a zero icon size".into()));
        }

        let hicon = unsafe { image_list.GetIcon(shfi.iIcon, 0) }
            .map_err(|e| IconError::Shell(format!("GetIcon: {}", e)))?;

        let img = hicon_to_rgba(hicon, width, height);

        unsafe {
            let _ = DestroyIcon(hicon);
        }

        img
    }

    /// Render `hicon` into a top-down 32-bit DIB and read it back as RGBA.
    fn hicon_to_rgba(hicon: HICON, width: u32, height: u32) -> Result<RgbaImage> {
        let mut icon_info = ICONINFO::default();
        if unsafe { GetIconInfo(hicon, &mut icon_info) }.is_err() {
            return Err(IconError::Shell("GetIconInfo failed".into()));
        }

        let mut bmi = BITMAPINFO {
            bmiHeader: BITMAPINFOHEADER {
                biSize: std::mem::size_of::<BITMAPINFOHEADER>() as u32,
                biWidth: width as i32,
                biHeight: -(height as i32), // Top-down DIB
                biPlanes: 1,
                biBitCount: 32,
                biCompression: BI_RGB.0,
                biSizeImage: 0,
                biXPelsPerMeter: 0,
                biYPelsPerMeter: 0,
                biClrUsed: 0,
                biClrImportant: 0,
            },
            bmiColors: [Default::default()],
        };
        let mut pixels = vec![0u8; (width * height) as usize * 4];

        let drawn = unsafe {
            let hdc_screen = GetDC(HWND::default());
            let hdc = CreateCompatibleDC(hdc_screen);

            let mut bits_ptr: *mut std::ffi::c_void = std::ptr::null_mut();
            let drawn = match CreateDIBSection(hdc, &bmi, DIB_RGB_COLORS, &mut bits_ptr, None, 0)
            {
                Ok(hbm) => {
                    let old_bm = SelectObject(hdc, hbm);
                    let drawn = DrawIconEx(
                        hdc,
                        0,
                        0,
                        hicon,
                        width as i32,
                        height as i32,
                        0,
                        None,
                        DI_NORMAL,
                    )
                    .is_ok();
                    if drawn {
                        GetDIBits(
                            hdc,
                            hbm,
                            0,
                            height,
                            Some(pixels.as_mut_ptr() as *mut _),
                            &mut bmi,
                            DIB_RGB_COLORS,
                        );
                    }
                    SelectObject(hdc, old_bm);
                    DeleteObject(hbm);
                    drawn
                }
                Err(_) => false,
            };

            DeleteDC(hdc);
            ReleaseDC(HWND::default(), hdc_screen);
            if !icon_info.hbmColor.is_invalid() {
                DeleteObject(icon_info.hbmColor);
            }
            if !icon_info.hbmMask.is_invalid() {
                DeleteObject(icon_info.hbmMask);
            }
            drawn
        };
        if !drawn {
            return Err(IconError::Shell("could not render icon into a DIB".into()));
        }

        // BGRA -> RGBA
        for px in pixels.chunks_exact_mut(4) {
            px.swap(0, 2);
        }

        let img = RgbaImage::from_raw(width, height, pixels)
            .ok_or_else(|| IconError::Shell("pixel buffer size mismatch".into()))?;

        // A fully transparent result means the list had no real icon.
        if img.pixels().any(|p| p.0[3] > 0) {
            Ok(img)
        } else {
            Err(IconError::Shell("icon is blank".into()))
        }
    }
}
