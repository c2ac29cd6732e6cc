// ── Scintilla child-window hosting ────────────────────────────────────────────
//
// This is one of exactly two modules where `unsafe` is permitted.
// Every `unsafe` block MUST carry a `// SAFETY:` comment.
//
// ── DLL ownership model ───────────────────────────────────────────────────────
//
// `SciDll` owns the single `LoadLibraryW` call for `SciLexer.dll`.  It is
// created by `window::run()` before the main window and dropped after the
// message loop returns, so it outlives the `ScintillaView` child window.
//
// ── Security note ─────────────────────────────────────────────────────────────
//
// `SciDll::load()` calls `LoadLibraryW("SciLexer.dll")` (filename only).
// Windows resolves this to the application directory first on Win10/11.

#![allow(unsafe_code)]

pub mod messages;

use messages::{
    MARGIN_COUNT, SC_CP_UTF8, SC_WRAP_CHAR, SCI_BEGINUNDOACTION, SCI_COUNTCHARACTERS,
    SCI_EMPTYUNDOBUFFER, SCI_ENDUNDOACTION, SCI_GETCURRENTPOS, SCI_GETLENGTH, SCI_GETTEXT,
    SCI_GOTOPOS, SCI_LINEFROMPOSITION, SCI_POSITIONFROMLINE, SCI_SETCODEPAGE,
    SCI_SETMARGINLEFT, SCI_SETMARGINRIGHT, SCI_SETMARGINWIDTHN, SCI_SETTEXT,
    SCI_SETUNDOCOLLECTION, SCI_SETWRAPMODE, SCI_STYLECLEARALL, SCI_STYLESETFONT,
    SCI_STYLESETSIZE, STYLE_DEFAULT,
};

use windows::{
    core::PCWSTR,
    Win32::{
        Foundation::{FreeLibrary, HINSTANCE, HMODULE, HWND, LPARAM, WPARAM},
        System::LibraryLoader::LoadLibraryW,
        UI::WindowsAndMessaging::{
            CreateWindowExW, IsWindow, SendMessageW, HMENU, WINDOW_EX_STYLE, WINDOW_STYLE,
            WS_CHILD, WS_CLIPSIBLINGS, WS_HSCROLL, WS_VISIBLE, WS_VSCROLL,
        },
    },
};

use crate::{
    config::EditorConfig,
    editor::{Caret, TextSurface},
    error::{NotepadError, Result},
    platform::win32::wide,
};

// ── DLL identity ──────────────────────────────────────────────────────────────

const DLL_NAME: &str = "SciLexer.dll";
const CLASS_NAME: &str = "Scintilla";

// ── SciDll ────────────────────────────────────────────────────────────────────

/// RAII handle to the loaded `SciLexer.dll`.
///
/// Loading the DLL causes it to register the `"Scintilla"` window class.
/// `FreeLibrary` is called on `Drop`, which must happen after the
/// `ScintillaView` child window has been destroyed.
pub(crate) struct SciDll(HMODULE);

impl SciDll {
    /// Load `SciLexer.dll` from the application directory.
    pub(crate) fn load() -> Result<Self> {
        let path = wide(DLL_NAME);
        // SAFETY: path is a valid null-terminated UTF-16 string.
        // LoadLibraryW searches the application directory first on Win10/11.
        let dll = unsafe { LoadLibraryW(PCWSTR(path.as_ptr())) }.map_err(|e| {
            tracing::error!(dll = DLL_NAME, error = %e, "cannot load Scintilla");
            NotepadError::from(e)
        })?;
        Ok(Self(dll))
    }
}

impl Drop for SciDll {
    fn drop(&mut self) {
        // SAFETY: self.0 was returned by a successful LoadLibraryW and has not
        // been freed since.  The main window and its Scintilla child are gone:
        // `run()` drops the DLL only after the message loop has returned.
        unsafe {
            let _ = FreeLibrary(self.0);
        }
    }
}

// ── ScintillaView ─────────────────────────────────────────────────────────────

/// The hosted Scintilla editor child window: the document buffer.
///
/// Does **not** own the `SciLexer.dll` module handle.  The child `HWND` is
/// destroyed automatically by Windows when the parent is destroyed.
pub(crate) struct ScintillaView {
    hwnd: HWND,
}

impl ScintillaView {
    /// Create a visible Scintilla child window inside `hwnd_parent` and
    /// configure it from `config`.
    ///
    /// `_dll` proves that `SciLexer.dll` is loaded and the `"Scintilla"` class
    /// is registered.  The window starts with zero size; the parent lays it
    /// out on `WM_SIZE`.
    pub(crate) fn create(
        hwnd_parent: HWND,
        hinstance: HINSTANCE,
        config: &EditorConfig,
        _dll: &SciDll,
    ) -> Result<Self> {
        let class_wide = wide(CLASS_NAME);

        // SAFETY: class_wide is null-terminated UTF-16 for the class registered
        // by SciLexer.dll (_dll proves the DLL is loaded).  hwnd_parent and
        // hinstance are valid Win32 handles owned by the caller.
        let hwnd = unsafe {
            CreateWindowExW(
                WINDOW_EX_STYLE(0),
                PCWSTR(class_wide.as_ptr()),
                PCWSTR::null(),
                WS_CHILD | WS_VISIBLE | WS_VSCROLL | WS_HSCROLL | WS_CLIPSIBLINGS
                    | WINDOW_STYLE(0x0200_0000), // WS_CLIPCHILDREN
                0, 0, 0, 0,
                hwnd_parent,
                HMENU::default(),
                hinstance,
                None,
            )
        }
        .map_err(|e| match NotepadError::from(e) {
            NotepadError::Win32 { code, .. } => NotepadError::Win32 {
                function: "CreateWindowExW (Scintilla)",
                code,
            },
            other => other,
        })?;

        let view = Self { hwnd };
        view.configure(config);
        Ok(view)
    }

    /// The Scintilla child window handle.  Valid until the parent is destroyed.
    pub(crate) fn hwnd(&self) -> HWND {
        self.hwnd
    }

    /// UTF-8, monospaced font, no gutters, character wrapping, undo on.
    fn configure(&self, config: &EditorConfig) {
        let mut face = config.font_face.as_bytes().to_vec();
        face.push(0);
        self.send(SCI_SETCODEPAGE, SC_CP_UTF8, 0);
        self.send(SCI_STYLESETFONT, STYLE_DEFAULT, face.as_ptr() as isize);
        self.send(SCI_STYLESETSIZE, STYLE_DEFAULT, config.font_size as isize);
        self.send(SCI_STYLECLEARALL, 0, 0);
        // Padding comes from the parent's layout; no extra gutters here.
        for margin in 0..MARGIN_COUNT {
            self.send(SCI_SETMARGINWIDTHN, margin, 0);
        }
        self.send(SCI_SETMARGINLEFT, 0, 0);
        self.send(SCI_SETMARGINRIGHT, 0, 0);
        self.send(SCI_SETWRAPMODE, SC_WRAP_CHAR, 0);
        self.send(SCI_SETUNDOCOLLECTION, 1, 0);
    }

    /// Send a Scintilla message and return its raw result.
    fn send(&self, msg: u32, wparam: usize, lparam: isize) -> isize {
        // SAFETY: hwnd is a live Scintilla window.  Every message this module
        // sends is either scalar-only or passes a pointer to a buffer that the
        // calling method keeps alive until SendMessageW returns.
        unsafe { SendMessageW(self.hwnd, msg, WPARAM(wparam), LPARAM(lparam)).0 }
    }

    /// `false` once the child window has been destroyed.
    fn is_alive(&self) -> bool {
        // SAFETY: IsWindow accepts any value and only reports validity.
        unsafe { IsWindow(self.hwnd) }.as_bool()
    }

    /// Read the full document text as UTF-8 bytes (without null terminator).
    fn text_bytes(&self) -> Vec<u8> {
        let len = self.send(SCI_GETLENGTH, 0, 0) as usize;
        let mut buf = vec![0u8; len + 1];
        // buf is len+1 bytes; SCI_GETTEXT with a matching size writes in bounds.
        self.send(SCI_GETTEXT, len + 1, buf.as_mut_ptr() as isize);
        buf.truncate(len);
        buf
    }
}

impl TextSurface for ScintillaView {
    fn text(&self) -> String {
        // Scintilla runs in UTF-8 mode and only ever receives UTF-8.
        String::from_utf8_lossy(&self.text_bytes()).into_owned()
    }

    fn set_text(&mut self, text: &str) {
        let mut buf: Vec<u8> = Vec::with_capacity(text.len() + 1);
        buf.extend_from_slice(text.as_bytes());
        buf.push(0);
        // buf is null-terminated UTF-8 that outlives the call.
        self.send(SCI_SETTEXT, 0, buf.as_ptr() as isize);
        self.send(SCI_GOTOPOS, 0, 0);
    }

    fn reset_undo(&mut self) {
        self.send(SCI_EMPTYUNDOBUFFER, 0, 0);
    }

    fn separate_undo(&mut self) {
        // An empty compound action marks the current action as
        // non-coalescing, so the next keystroke opens a new undo step.
        self.send(SCI_BEGINUNDOACTION, 0, 0);
        self.send(SCI_ENDUNDOACTION, 0, 0);
    }

    fn caret(&self) -> Option<Caret> {
        if !self.is_alive() {
            return None;
        }
        let pos = self.send(SCI_GETCURRENTPOS, 0, 0);
        let line = self.send(SCI_LINEFROMPOSITION, pos as usize, 0);
        let start = self.send(SCI_POSITIONFROMLINE, line as usize, 0);
        let column = self.send(SCI_COUNTCHARACTERS, start as usize, pos);
        if pos < 0 || line < 0 || start < 0 || column < 0 {
            return None;
        }
        Some(Caret {
            line: line as usize + 1,
            column: column as usize,
        })
    }
}
