//! Full-screen capture of the primary monitor using GDI.

use anyhow::Result;
use image::{ImageBuffer, Rgba};

/// Captures the primary monitor as an RGBA image.
#[cfg(windows)]
pub fn capture_primary_screen() -> Result<ImageBuffer<Rgba<u8>, Vec<u8>>> {
    use anyhow::anyhow;
    use windows::Win32::Foundation::HWND;
    use windows::Win32::Graphics::Gdi::{
        BitBlt, CreateCompatibleBitmap, CreateCompatibleDC, DeleteDC, DeleteObject, GetDC,
        GetDIBits, ReleaseDC, SelectObject, BITMAPINFO, BITMAPINFOHEADER, BI_RGB,
        DIB_RGB_COLORS, SRCCOPY,
    };
    use windows::Win32::UI::WindowsAndMessaging::{GetSystemMetrics, SM_CXSCREEN, SM_CYSCREEN};

    let width = unsafe { GetSystemMetrics(SM_CXSCREEN) };
    let height = unsafe { GetSystemMetrics(SM_CYSCREEN) };
    if width <= 0 || height <= 0 {
        return Err(anyhow!("Invalid screen size {}x{}", width, height));
    }
    tracing::debug!("Capturing screen {}x{}", width, height);

    let mut bgra = vec![0u8; (width * height * 4) as usize];

    unsafe {
        let screen_dc = GetDC(HWND::default());
        let mem_dc = CreateCompatibleDC(screen_dc);
        let bitmap = CreateCompatibleBitmap(screen_dc, width, height);
        let previous = SelectObject(mem_dc, bitmap);

        let blit = BitBlt(mem_dc, 0, 0, width, height, screen_dc, 0, 0, SRCCOPY);

        // Negative height requests a top-down DIB
        let mut info = BITMAPINFO {
            bmiHeader: BITMAPINFOHEADER {
                biSize: std::mem::size_of::<BITMAPINFOHEADER>() as u32,
                biWidth: width,
                biHeight: -height,
                biPlanes: 1,
                biBitCount: 32,
                biCompression: BI_RGB.0,
                ..Default::default()
            },
            ..Default::default()
        };
        let lines = GetDIBits(
            mem_dc,
            bitmap,
            0,
            height as u32,
            Some(bgra.as_mut_ptr() as *mut _),
            &mut info,
            DIB_RGB_COLORS,
        );

        SelectObject(mem_dc, previous);
        let _ = DeleteObject(bitmap);
        let _ = DeleteDC(mem_dc);
        ReleaseDC(HWND::default(), screen_dc);

        blit?;
        if lines == 0 {
            return Err(anyhow!("GetDIBits returned no scan lines"));
        }
    }

    // BGRA -> RGBA, alpha forced opaque (GDI leaves it undefined)
    for px in bgra.chunks_exact_mut(4) {
        px.swap(0, 2);
        px[3] = 255;
    }

    ImageBuffer::from_raw(width as u32, height as u32, bgra)
        .ok_or_else(|| anyhow!("Screen buffer size mismatch"))
}

#[cfg(not(windows))]
pub fn capture_primary_screen() -> Result<ImageBuffer<Rgba<u8>, Vec<u8>>> {
    Err(anyhow::anyhow!(
        "Screen capture is only supported on Windows"
    ))
}
