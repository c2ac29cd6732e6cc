// ── Built-in editor settings ──────────────────────────────────────────────────
//
// One `EditorConfig` is built at startup and handed to the window and the
// Scintilla view.  Nothing here is read from or written to disk.

use std::time::Duration;

/// Static configuration for the editor window and its text surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct EditorConfig {
    /// Title bar text.
    pub(crate) title: &'static str,
    /// Initial client width in pixels at 96 DPI.
    pub(crate) width: i32,
    /// Initial client height in pixels at 96 DPI.
    pub(crate) height: i32,
    /// Fixed-width display font.
    pub(crate) font_face: &'static str,
    /// Font size in points.
    pub(crate) font_size: u32,
    /// Interior padding around the text, all four sides, at 96 DPI.
    pub(crate) padding: i32,
    /// Typing pause after which the open undo group is closed.
    pub(crate) undo_pause: Duration,
    /// Extension appended by the save dialog when the user types none.
    pub(crate) default_extension: &'static str,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            title: "NotePad",
            width: 900,
            height: 700,
            font_face: "Consolas",
            font_size: 16,
            padding: 15,
            undo_pause: Duration::from_millis(500),
            default_extension: "txt",
        }
    }
}
