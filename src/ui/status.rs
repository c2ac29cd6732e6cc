// ── Status bar text ───────────────────────────────────────────────────────────

use crate::editor::Caret;

/// Status text for a caret position: `"Line: 3, Col: 14"`.
pub(crate) fn caret_text(caret: Caret) -> String {
    format!("Line: {}, Col: {}", caret.line, caret.column)
}

/// What the status bar shows before any key or mouse release.
pub(crate) fn initial_text() -> String {
    caret_text(Caret::ORIGIN)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn startup_text() {
        assert_eq!(initial_text(), "Line: 1, Col: 0");
    }

    #[test]
    fn formats_line_and_column() {
        assert_eq!(caret_text(Caret { line: 12, column: 7 }), "Line: 12, Col: 7");
    }
}
