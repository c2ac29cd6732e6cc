// ── Application controller ────────────────────────────────────────────────────
//
// A single `App` is created on startup and owned by `WindowState` for the
// lifetime of the main window.  It holds no document state: the text lives in
// the `TextSurface`, dialogs and the status label live behind `Shell`.  All
// calls happen on the UI thread.

use std::time::Instant;

use tracing::{debug, warn};

use crate::{
    config::EditorConfig,
    document,
    editor::{AutoSeparator, TextSurface},
    platform::Shell,
    ui::{menu::Command, menu::Modifier, status},
};

/// Question asked before New discards text.
const CLEAR_PROMPT: &str = "Clear current text?";
/// Title of file-error dialogs.
const ERROR_TITLE: &str = "Error";

/// What the window should do after a command ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Flow {
    Continue,
    /// Destroy the main window now.
    Exit,
}

/// Top-level application controller.
pub(crate) struct App {
    config: EditorConfig,
    /// Resolved once; drives both menu hints and accelerators.
    modifier: Modifier,
    separator: AutoSeparator,
}

impl App {
    pub(crate) fn new(config: EditorConfig, modifier: Modifier) -> Self {
        let separator = AutoSeparator::new(config.undo_pause);
        Self {
            config,
            modifier,
            separator,
        }
    }

    pub(crate) fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub(crate) fn modifier(&self) -> Modifier {
        self.modifier
    }

    /// Run `command`.  Menu clicks and shortcuts both land here.
    pub(crate) fn execute(
        &mut self,
        command: Command,
        surface: &mut impl TextSurface,
        shell: &mut impl Shell,
    ) -> Flow {
        debug!(?command, "execute");
        match command {
            Command::New => self.new_document(surface, shell),
            Command::Open => self.open_document(surface, shell),
            Command::Save => self.save_document(surface, shell),
            Command::Exit => return Flow::Exit,
        }
        Flow::Continue
    }

    // ── File commands ─────────────────────────────────────────────────────────

    /// Clear the buffer, asking first if it holds any text.
    pub(crate) fn new_document(&mut self, surface: &mut impl TextSurface, shell: &mut impl Shell) {
        if surface.has_text() && !shell.confirm(self.config.title, CLEAR_PROMPT) {
            return;
        }
        surface.clear();
        self.discard_history(surface);
        refresh_status(&*surface, shell);
    }

    /// Replace the buffer with a file chosen by the user.
    ///
    /// The buffer and its undo history are only touched when the file was
    /// read and decoded successfully.
    pub(crate) fn open_document(&mut self, surface: &mut impl TextSurface, shell: &mut impl Shell) {
        let Some(path) = shell.pick_open_path() else {
            return;
        };
        match document::load(&path) {
            Ok(text) => {
                surface.set_text(&text);
                self.discard_history(surface);
                refresh_status(&*surface, shell);
            }
            Err(e) => {
                warn!(error = %e, "open failed");
                shell.show_error(ERROR_TITLE, &format!("Could not open file: {e}"));
            }
        }
    }

    /// Write the buffer to a file chosen by the user.  Always prompts.
    pub(crate) fn save_document(&mut self, surface: &mut impl TextSurface, shell: &mut impl Shell) {
        let Some(path) = shell.pick_save_path(self.config.default_extension) else {
            return;
        };
        if let Err(e) = document::store(&path, &surface.text()) {
            warn!(error = %e, "save failed");
            shell.show_error(ERROR_TITLE, &format!("Could not save file: {e}"));
        }
    }

    fn discard_history(&mut self, surface: &mut impl TextSurface) {
        self.separator.flush();
        surface.reset_undo();
    }

    // ── Buffer events ─────────────────────────────────────────────────────────

    /// A key was released inside the buffer.
    ///
    /// Keeps the current undo group open and refreshes the status.  The window
    /// must (re)arm its pause timer for `self.config().undo_pause`.
    pub(crate) fn on_key_release(
        &mut self,
        now: Instant,
        surface: &impl TextSurface,
        shell: &mut impl Shell,
    ) {
        self.separator.note_edit(now);
        refresh_status(&*surface, shell);
    }

    /// A mouse button was released inside the buffer.
    pub(crate) fn on_mouse_release(&mut self, surface: &mut impl TextSurface, shell: &mut impl Shell) {
        if self.separator.flush() {
            surface.separate_undo();
        }
        refresh_status(&*surface, shell);
    }

    /// The pause timer fired.
    ///
    /// Returns `true` once no undo group is open, i.e. when the window may
    /// stop the timer.
    pub(crate) fn on_pause_timer(&mut self, now: Instant, surface: &mut impl TextSurface) -> bool {
        if self.separator.poll(now) {
            surface.separate_undo();
        }
        !self.separator.is_open()
    }
}

/// Show the caret position in the status label.
///
/// A caret query failure leaves the label as it was.
pub(crate) fn refresh_status(surface: &impl TextSurface, shell: &mut impl Shell) {
    if let Some(caret) = surface.caret() {
        shell.set_status(&status::caret_text(caret));
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::{fs, path::PathBuf, time::Duration};

    use super::*;
    use crate::editor::Caret;

    /// In-memory widget with an undo stack of whole-document snapshots.
    #[derive(Default)]
    struct FakeSurface {
        text: String,
        undo: Vec<String>,
        separators: usize,
        caret: Option<Caret>,
    }

    impl FakeSurface {
        fn with_text(text: &str) -> Self {
            let mut s = Self::realized();
            s.type_text(text);
            s
        }

        fn realized() -> Self {
            Self {
                caret: Some(Caret::ORIGIN),
                ..Self::default()
            }
        }

        fn type_text(&mut self, text: &str) {
            self.undo.push(self.text.clone());
            self.text.push_str(text);
            let line = self.text.matches('\n').count() + 1;
            let column = self.text.rsplit('\n').next().map_or(0, |l| l.chars().count());
            self.caret = Some(Caret { line, column });
        }

        fn undo(&mut self) -> bool {
            match self.undo.pop() {
                Some(prev) => {
                    self.text = prev;
                    true
                }
                None => false,
            }
        }
    }

    impl TextSurface for FakeSurface {
        fn text(&self) -> String {
            self.text.clone()
        }

        fn set_text(&mut self, text: &str) {
            self.undo.push(std::mem::replace(&mut self.text, text.to_owned()));
            self.caret = Some(Caret::ORIGIN);
        }

        fn reset_undo(&mut self) {
            self.undo.clear();
        }

        fn separate_undo(&mut self) {
            self.separators += 1;
        }

        fn caret(&self) -> Option<Caret> {
            self.caret
        }
    }

    /// Scripted dialog answers plus a record of what was shown.
    #[derive(Default)]
    struct FakeShell {
        open_answer: Option<PathBuf>,
        save_answer: Option<PathBuf>,
        confirm_answer: bool,
        questions: Vec<String>,
        errors: Vec<String>,
        save_extensions: Vec<String>,
        status: Option<String>,
    }

    impl Shell for FakeShell {
        fn pick_open_path(&mut self) -> Option<PathBuf> {
            self.open_answer.clone()
        }

        fn pick_save_path(&mut self, default_extension: &str) -> Option<PathBuf> {
            self.save_extensions.push(default_extension.to_owned());
            self.save_answer.clone()
        }

        fn confirm(&mut self, _title: &str, question: &str) -> bool {
            self.questions.push(question.to_owned());
            self.confirm_answer
        }

        fn show_error(&mut self, _title: &str, message: &str) {
            self.errors.push(message.to_owned());
        }

        fn set_status(&mut self, text: &str) {
            self.status = Some(text.to_owned());
        }
    }

    fn app() -> App {
        App::new(EditorConfig::default(), Modifier::Control)
    }

    // ── New ───────────────────────────────────────────────────────────────────

    #[test]
    fn new_on_empty_buffer_does_not_ask() {
        let mut surface = FakeSurface::realized();
        let mut shell = FakeShell::default();
        app().execute(Command::New, &mut surface, &mut shell);
        assert!(shell.questions.is_empty());
        assert_eq!(surface.text, "");
        assert_eq!(shell.status.as_deref(), Some("Line: 1, Col: 0"));
    }

    #[test]
    fn new_confirmed_clears_text_and_history() {
        let mut surface = FakeSurface::with_text("draft");
        let mut shell = FakeShell { confirm_answer: true, ..FakeShell::default() };
        app().execute(Command::New, &mut surface, &mut shell);
        assert_eq!(shell.questions, ["Clear current text?"]);
        assert_eq!(surface.text, "");
        assert!(!surface.undo(), "undo history must be empty");
    }

    #[test]
    fn new_declined_leaves_buffer_alone() {
        let mut surface = FakeSurface::with_text("keep me\n");
        let mut shell = FakeShell { confirm_answer: false, ..FakeShell::default() };
        app().execute(Command::New, &mut surface, &mut shell);
        assert_eq!(shell.questions.len(), 1);
        assert_eq!(surface.text, "keep me\n");
        assert!(surface.undo(), "history is untouched");
        assert!(shell.status.is_none());
    }

    #[test]
    fn whitespace_only_buffer_still_asks() {
        let mut surface = FakeSurface::with_text(" \n");
        let mut shell = FakeShell::default();
        app().execute(Command::New, &mut surface, &mut shell);
        assert_eq!(shell.questions.len(), 1);
    }

    // ── Open ──────────────────────────────────────────────────────────────────

    #[test]
    fn open_cancelled_is_a_no_op() {
        let mut surface = FakeSurface::with_text("abc");
        let mut shell = FakeShell::default();
        app().execute(Command::Open, &mut surface, &mut shell);
        assert_eq!(surface.text, "abc");
        assert!(shell.errors.is_empty());
        assert!(shell.status.is_none());
    }

    #[test]
    fn open_replaces_text_resets_undo_and_shows_origin() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("in.txt");
        fs::write(&path, "line one\nline two").expect("seed");

        let mut surface = FakeSurface::with_text("old\ncontent");
        let mut shell = FakeShell { open_answer: Some(path), ..FakeShell::default() };
        app().execute(Command::Open, &mut surface, &mut shell);

        assert_eq!(surface.text, "line one\nline two");
        assert!(!surface.undo());
        assert_eq!(shell.status.as_deref(), Some("Line: 1, Col: 0"));
    }

    #[test]
    fn open_undecodable_file_reports_and_keeps_buffer() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("bin.dat");
        fs::write(&path, [0xFF, 0xFE, 0x00, 0xC3]).expect("seed");

        let mut surface = FakeSurface::with_text("unchanged");
        let mut shell = FakeShell { open_answer: Some(path), ..FakeShell::default() };
        app().execute(Command::Open, &mut surface, &mut shell);

        assert_eq!(surface.text, "unchanged");
        assert!(surface.undo(), "history is untouched");
        assert_eq!(shell.errors.len(), 1);
        assert!(shell.errors[0].starts_with("Could not open file: "));
    }

    #[test]
    fn open_unreadable_path_reports_and_keeps_buffer() {
        // A directory cannot be read as a file on any platform.
        let dir = tempfile::tempdir().expect("tempdir");
        let mut surface = FakeSurface::with_text("unchanged");
        let mut shell = FakeShell {
            open_answer: Some(dir.path().to_path_buf()),
            ..FakeShell::default()
        };
        app().execute(Command::Open, &mut surface, &mut shell);
        assert_eq!(surface.text, "unchanged");
        assert_eq!(shell.errors.len(), 1);
    }

    // ── Save ──────────────────────────────────────────────────────────────────

    #[test]
    fn save_writes_exact_text_with_txt_default() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("out.txt");
        let mut surface = FakeSurface::with_text("hello");
        let mut shell = FakeShell { save_answer: Some(path.clone()), ..FakeShell::default() };

        app().execute(Command::Save, &mut surface, &mut shell);

        assert_eq!(fs::read(&path).expect("read"), b"hello");
        assert_eq!(shell.save_extensions, ["txt"]);
        assert!(surface.undo(), "save keeps undo history");
    }

    #[test]
    fn save_cancelled_writes_nothing() {
        let mut surface = FakeSurface::with_text("hello");
        let mut shell = FakeShell::default();
        app().execute(Command::Save, &mut surface, &mut shell);
        assert!(shell.errors.is_empty());
        assert_eq!(surface.text, "hello");
    }

    #[test]
    fn save_failure_reports_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("missing").join("out.txt");
        let mut surface = FakeSurface::with_text("hello");
        let mut shell = FakeShell { save_answer: Some(path), ..FakeShell::default() };
        app().execute(Command::Save, &mut surface, &mut shell);
        assert_eq!(shell.errors.len(), 1);
        assert!(shell.errors[0].starts_with("Could not save file: "));
        assert_eq!(surface.text, "hello");
    }

    #[test]
    fn type_save_new_open_scenario() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("p.txt");
        let mut app = app();
        let mut surface = FakeSurface::realized();
        surface.type_text("abc");

        let mut shell = FakeShell {
            save_answer: Some(path.clone()),
            open_answer: Some(path.clone()),
            confirm_answer: true,
            ..FakeShell::default()
        };
        assert_eq!(app.execute(Command::Save, &mut surface, &mut shell), Flow::Continue);
        assert_eq!(fs::read_to_string(&path).expect("read"), "abc");

        app.execute(Command::New, &mut surface, &mut shell);
        assert_eq!(surface.text, "");

        app.execute(Command::Open, &mut surface, &mut shell);
        assert_eq!(surface.text, "abc");
        assert!(shell.errors.is_empty());
    }

    // ── Exit & status ─────────────────────────────────────────────────────────

    #[test]
    fn exit_asks_nothing() {
        let mut surface = FakeSurface::with_text("unsaved");
        let mut shell = FakeShell::default();
        assert_eq!(app().execute(Command::Exit, &mut surface, &mut shell), Flow::Exit);
        assert!(shell.questions.is_empty());
    }

    #[test]
    fn status_follows_caret() {
        let mut surface = FakeSurface::realized();
        surface.type_text("ab\ncdé");
        let mut shell = FakeShell::default();
        refresh_status(&surface, &mut shell);
        assert_eq!(shell.status.as_deref(), Some("Line: 2, Col: 3"));
    }

    #[test]
    fn status_unchanged_when_caret_unknown() {
        let surface = FakeSurface::default();
        let mut shell = FakeShell { status: Some("Line: 1, Col: 0".into()), ..FakeShell::default() };
        refresh_status(&surface, &mut shell);
        assert_eq!(shell.status.as_deref(), Some("Line: 1, Col: 0"));
    }

    // ── Undo grouping ─────────────────────────────────────────────────────────

    #[test]
    fn typing_pause_separates_once() {
        let mut app = app();
        let pause = app.config().undo_pause;
        let mut surface = FakeSurface::realized();
        let mut shell = FakeShell::default();
        let t0 = Instant::now();

        app.on_key_release(t0, &surface, &mut shell);
        assert!(!app.on_pause_timer(t0 + pause / 2, &mut surface));
        assert_eq!(surface.separators, 0);

        assert!(app.on_pause_timer(t0 + pause + Duration::from_millis(1), &mut surface));
        assert_eq!(surface.separators, 1);
        assert!(app.on_pause_timer(t0 + pause * 3, &mut surface));
        assert_eq!(surface.separators, 1);
    }

    #[test]
    fn mouse_release_closes_open_group() {
        let mut app = app();
        let mut surface = FakeSurface::realized();
        let mut shell = FakeShell::default();

        app.on_mouse_release(&mut surface, &mut shell);
        assert_eq!(surface.separators, 0);

        app.on_key_release(Instant::now(), &surface, &mut shell);
        app.on_mouse_release(&mut surface, &mut shell);
        assert_eq!(surface.separators, 1);
        assert_eq!(shell.status.as_deref(), Some("Line: 1, Col: 0"));
    }
}
