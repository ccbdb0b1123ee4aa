//! Win32 implementation: DWM caption color, z-order and `StretchDIBits`
#![allow(unsafe_code)]

use crate::backend::NativeHandle;
use crate::color::Rgb;
use crate::error::{WindowError, WindowResult};
use crate::frame::Dib;
use std::ffi::c_void;
use windows::Win32::Foundation::HWND;
use windows::Win32::Graphics::Dwm::{DwmSetWindowAttribute, DWMWA_CAPTION_COLOR};
use windows::Win32::Graphics::Gdi::{
    GetDC, ReleaseDC, StretchDIBits, BITMAPINFO, BITMAPINFOHEADER, BI_RGB, DIB_RGB_COLORS, SRCCOPY,
};
use windows::Win32::UI::WindowsAndMessaging::{
    GetForegroundWindow, SetWindowPos, HWND_BOTTOM, HWND_TOP, HWND_TOPMOST, SWP_NOMOVE, SWP_NOSIZE,
};

fn hwnd(window: &glfw::Window) -> HWND {
    HWND(window.get_win32_window())
}

fn platform_error(call: &'static str, error: &windows::core::Error) -> WindowError {
    WindowError::Platform {
        call,
        message: error.to_string(),
    }
}

pub(crate) fn set_caption_color(window: &glfw::Window, color: Rgb) -> WindowResult<()> {
    let colorref = color.to_colorref();
    log::debug!("DwmSetWindowAttribute(CAPTION_COLOR, {:#08x})", colorref);

    // SAFETY: the HWND belongs to a live GLFW window and the attribute
    // pointer refers to a u32 that outlives the call.
    unsafe {
        DwmSetWindowAttribute(
            hwnd(window),
            DWMWA_CAPTION_COLOR,
            std::ptr::from_ref(&colorref).cast::<c_void>(),
            std::mem::size_of::<u32>() as u32,
        )
    }
    .map_err(|e| platform_error("DwmSetWindowAttribute", &e))
}

pub(crate) fn raise(window: &mut glfw::Window, top_most: bool) -> WindowResult<()> {
    let insert_after = if top_most { HWND_TOPMOST } else { HWND_TOP };
    // SAFETY: plain z-order change on a live window handle.
    unsafe { SetWindowPos(hwnd(window), insert_after, 0, 0, 0, 0, SWP_NOMOVE | SWP_NOSIZE) }
        .map_err(|e| platform_error("SetWindowPos", &e))
}

pub(crate) fn lower(window: &glfw::Window) -> WindowResult<()> {
    // SAFETY: plain z-order change on a live window handle.
    unsafe { SetWindowPos(hwnd(window), HWND_BOTTOM, 0, 0, 0, 0, SWP_NOMOVE | SWP_NOSIZE) }
        .map_err(|e| platform_error("SetWindowPos", &e))
}

pub(crate) fn is_foreground(window: &glfw::Window) -> bool {
    // SAFETY: no arguments, returns a possibly null handle.
    unsafe { GetForegroundWindow() } == hwnd(window)
}

pub(crate) fn native_handle(window: &glfw::Window) -> Option<NativeHandle> {
    Some(NativeHandle(window.get_win32_window() as isize))
}

pub(crate) fn blit(window: &glfw::Window, dib: &Dib) -> WindowResult<()> {
    let info = BITMAPINFO {
        bmiHeader: BITMAPINFOHEADER {
            biSize: std::mem::size_of::<BITMAPINFOHEADER>() as u32,
            biWidth: dib.header.width,
            biHeight: dib.header.height,
            biPlanes: 1,
            biBitCount: dib.header.bit_count,
            biCompression: BI_RGB.0,
            biSizeImage: dib.header.size_image,
            ..Default::default()
        },
        ..Default::default()
    };
    let (width, height) = (dib.width() as i32, dib.height() as i32);
    let hwnd = hwnd(window);

    // SAFETY: the DC is released before returning, and `dib.pixels` holds
    // `size_image` bytes laid out as `info` describes.
    unsafe {
        let hdc = GetDC(hwnd);
        if hdc.is_invalid() {
            return Err(WindowError::Platform {
                call: "GetDC",
                message: "no device context for window".to_string(),
            });
        }
        let lines = StretchDIBits(
            hdc,
            0,
            0,
            width,
            height,
            0,
            0,
            width,
            height,
            Some(dib.pixels.as_ptr().cast::<c_void>()),
            &info,
            DIB_RGB_COLORS,
            SRCCOPY,
        );
        ReleaseDC(hwnd, hdc);

        if lines == 0 {
            return Err(WindowError::Platform {
                call: "StretchDIBits",
                message: "no scan lines copied".to_string(),
            });
        }
    }
    Ok(())
}
