// ── Scintilla message constants ───────────────────────────────────────────────
//
// Source of truth: Scintilla.h (https://www.scintilla.org/ScintillaDoc.html)
// Only the subset NotePad sends is listed here.
// All SCI_* values are sent via SendMessageW(hwnd_sci, SCI_*, wparam, lparam).

// ── Code page ─────────────────────────────────────────────────────────────────

/// Set the code page.  Pass `SC_CP_UTF8` as WPARAM.
pub(super) const SCI_SETCODEPAGE: u32 = 2037;
/// UTF-8 code page value for `SCI_SETCODEPAGE`.
pub(super) const SC_CP_UTF8: usize = 65001;

// ── Document content ──────────────────────────────────────────────────────────

/// Replace all document text.  WPARAM=0; LPARAM=null-terminated UTF-8 string.
pub(super) const SCI_SETTEXT: u32 = 2181;
/// Return byte count of the document (excluding null terminator).
pub(super) const SCI_GETLENGTH: u32 = 2006;
/// Copy document bytes.  WPARAM=buffer len (incl. null); LPARAM=buffer ptr.
pub(super) const SCI_GETTEXT: u32 = 2182;

// ── Caret / position ──────────────────────────────────────────────────────────

/// Return the byte position of the caret.
pub(super) const SCI_GETCURRENTPOS: u32 = 2008;
/// Move the caret to a byte position (also scrolls into view).
pub(super) const SCI_GOTOPOS: u32 = 2025;
/// Convert a byte position to a 0-based line number.
pub(super) const SCI_LINEFROMPOSITION: u32 = 2166;
/// Byte position of the start of a 0-based line.
pub(super) const SCI_POSITIONFROMLINE: u32 = 2167;
/// Number of characters between two byte positions.
pub(super) const SCI_COUNTCHARACTERS: u32 = 2633;

// ── Undo ──────────────────────────────────────────────────────────────────────

/// Enable or disable undo collection.  WPARAM = 1 / 0.
pub(super) const SCI_SETUNDOCOLLECTION: u32 = 2012;
/// Discard the whole undo and redo history.
pub(super) const SCI_EMPTYUNDOBUFFER: u32 = 2175;
/// Begin a compound undo action.  Also stops typing from coalescing with
/// earlier actions.
pub(super) const SCI_BEGINUNDOACTION: u32 = 2078;
/// End the compound undo action started by `SCI_BEGINUNDOACTION`.
pub(super) const SCI_ENDUNDOACTION: u32 = 2079;

// ── Styling ───────────────────────────────────────────────────────────────────

/// Style every other style is reset to by `SCI_STYLECLEARALL`.
pub(super) const STYLE_DEFAULT: usize = 32;
/// Copy `STYLE_DEFAULT` onto every style.
pub(super) const SCI_STYLECLEARALL: u32 = 2050;
/// Font size in points.  WPARAM = style; LPARAM = size.
pub(super) const SCI_STYLESETSIZE: u32 = 2055;
/// Font face.  WPARAM = style; LPARAM = null-terminated UTF-8 name.
pub(super) const SCI_STYLESETFONT: u32 = 2056;

// ── Margins ───────────────────────────────────────────────────────────────────

/// Set the pixel width of margin WPARAM.
pub(super) const SCI_SETMARGINWIDTHN: u32 = 2242;
/// Number of margins Scintilla exposes by default.
pub(super) const MARGIN_COUNT: usize = 5;
/// Blank pixels between the left edge and the text.
pub(super) const SCI_SETMARGINLEFT: u32 = 2155;
/// Blank pixels between the text and the right edge.
pub(super) const SCI_SETMARGINRIGHT: u32 = 2157;

// ── Word wrap ─────────────────────────────────────────────────────────────────

/// Set word-wrap mode.
pub(super) const SCI_SETWRAPMODE: u32 = 2268;
/// Wrap at any character boundary.
pub(super) const SC_WRAP_CHAR: usize = 2;
