// ── Editor component abstraction ──────────────────────────────────────────────
//
// The text widget owns the document text and its undo history; the controller
// never keeps a copy.  `TextSurface` is the narrow, safe API the controller
// uses to talk to it.  On Windows it is implemented by `ScintillaView`.

#[cfg(windows)]
pub mod scintilla;
pub mod undo;

pub(crate) use undo::AutoSeparator;

// ── Caret ─────────────────────────────────────────────────────────────────────

/// Insertion-point position: 1-based line, 0-based character column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Caret {
    pub(crate) line: usize,
    pub(crate) column: usize,
}

impl Caret {
    /// Start of the document.
    pub(crate) const ORIGIN: Caret = Caret { line: 1, column: 0 };
}

// ── TextSurface ───────────────────────────────────────────────────────────────

/// The editable text widget, as seen by the controller.
pub(crate) trait TextSurface {
    /// The logical document text.
    ///
    /// Never includes a terminator the widget keeps for its own bookkeeping;
    /// this is exactly what Save writes to disk.
    fn text(&self) -> String;

    /// Replace the whole document and put the caret at its start.
    fn set_text(&mut self, text: &str);

    /// Discard every undo and redo step.
    fn reset_undo(&mut self);

    /// Close the current undo group so the next edit starts a new one.
    fn separate_undo(&mut self);

    /// Current caret position, or `None` if the widget cannot answer yet.
    fn caret(&self) -> Option<Caret>;

    /// Empty the document.
    fn clear(&mut self) {
        self.set_text("");
    }

    /// `true` when the document holds at least one character.
    fn has_text(&self) -> bool {
        !self.text().is_empty()
    }
}
