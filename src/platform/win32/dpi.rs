// ── DPI helpers ───────────────────────────────────────────────────────────────
//
// Sizes in `EditorConfig` are authored at 96 DPI and scaled here.

#![allow(unsafe_code)]

use windows::Win32::{
    Foundation::HWND,
    UI::HiDpi::{
        GetDpiForSystem, GetDpiForWindow, SetProcessDpiAwarenessContext,
        DPI_AWARENESS_CONTEXT_PER_MONITOR_AWARE_V2,
    },
};

pub(crate) const BASE_DPI: u32 = 96;

/// Scale a pixel value defined at 96 DPI to `dpi`.
pub(crate) fn scale(px: i32, dpi: u32) -> i32 {
    px * dpi as i32 / BASE_DPI as i32
}

/// Opt into Per-Monitor v2 DPI awareness.
/// MUST be called before any window is created on the calling thread.
pub(crate) fn init() {
    // SAFETY: precedes all window creation; single call at process start.
    // Failure (already set by a manifest) leaves the existing awareness.
    unsafe {
        let _ = SetProcessDpiAwarenessContext(DPI_AWARENESS_CONTEXT_PER_MONITOR_AWARE_V2);
    }
}

/// DPI of the monitor `hwnd` is on.
pub(crate) fn for_window(hwnd: HWND) -> u32 {
    // SAFETY: hwnd is a valid window handle provided by the caller.
    or_base(unsafe { GetDpiForWindow(hwnd) })
}

/// Primary-monitor DPI, for sizing before the window exists.
pub(crate) fn system() -> u32 {
    // SAFETY: GetDpiForSystem takes no parameters.
    or_base(unsafe { GetDpiForSystem() })
}

/// Both queries report failure as 0.
fn or_base(dpi: u32) -> u32 {
    if dpi == 0 {
        BASE_DPI
    } else {
        dpi
    }
}
