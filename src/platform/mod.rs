// ── Platform abstraction layer ────────────────────────────────────────────────
//
// This module defines the interface that the controller uses to talk to the
// OS.  No `unsafe` lives here; all Win32 FFI is confined to the `win32`
// sub-module and never leaks outward.

use std::path::PathBuf;

#[cfg(windows)]
pub mod win32;

/// Everything around the text surface: modal dialogs and the status label.
///
/// Every dialog is modal; the call returns once the user has answered.
pub(crate) trait Shell {
    /// Ask for an existing file to open.  `None` when cancelled.
    fn pick_open_path(&mut self) -> Option<PathBuf>;

    /// Ask for a destination file.  `default_extension` (without the dot) is
    /// appended when the user types a name without one.  `None` when
    /// cancelled.
    fn pick_save_path(&mut self, default_extension: &str) -> Option<PathBuf>;

    /// Yes/no question.  `true` means yes.
    fn confirm(&mut self, title: &str, question: &str) -> bool;

    /// Error box with a single OK button.
    fn show_error(&mut self, title: &str, message: &str);

    /// Replace the status label text.
    fn set_status(&mut self, text: &str);
}
