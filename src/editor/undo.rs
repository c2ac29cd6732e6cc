// ── Auto-separator undo grouping ──────────────────────────────────────────────
//
// The widget merges consecutive keystrokes into one undo step until something
// separates them.  `AutoSeparator` decides when: after a pause in typing, or
// when the caret is moved by the mouse.  Pure Rust; the window drives it from
// a Win32 timer and from release events.

use std::time::{Duration, Instant};

/// Tracks the currently open undo group.
#[derive(Debug)]
pub(crate) struct AutoSeparator {
    pause: Duration,
    last_edit: Option<Instant>,
}

impl AutoSeparator {
    pub(crate) fn new(pause: Duration) -> Self {
        Self {
            pause,
            last_edit: None,
        }
    }

    /// How long typing must pause before the group closes.
    pub(crate) fn pause(&self) -> Duration {
        self.pause
    }

    /// Record a keystroke at `now`; the group stays open.
    pub(crate) fn note_edit(&mut self, now: Instant) {
        self.last_edit = Some(now);
    }

    /// `true` while keystrokes have been recorded since the last separation.
    pub(crate) fn is_open(&self) -> bool {
        self.last_edit.is_some()
    }

    /// Close the group if typing has paused long enough.
    ///
    /// Returns `true` exactly once per group, when the caller must insert the
    /// separator into the widget's undo history.
    pub(crate) fn poll(&mut self, now: Instant) -> bool {
        match self.last_edit {
            Some(at) if now.saturating_duration_since(at) >= self.pause => {
                self.last_edit = None;
                true
            }
            _ => false,
        }
    }

    /// Close the group unconditionally (caret moved, document replaced).
    pub(crate) fn flush(&mut self) -> bool {
        self.last_edit.take().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAUSE: Duration = Duration::from_millis(500);

    #[test]
    fn idle_separator_never_fires() {
        let mut sep = AutoSeparator::new(PAUSE);
        let t0 = Instant::now();
        assert!(!sep.is_open());
        assert!(!sep.poll(t0 + PAUSE * 4));
        assert!(!sep.flush());
    }

    #[test]
    fn burst_closes_after_pause() {
        let mut sep = AutoSeparator::new(PAUSE);
        let t0 = Instant::now();
        sep.note_edit(t0);
        sep.note_edit(t0 + Duration::from_millis(100));
        assert!(!sep.poll(t0 + Duration::from_millis(400)));
        assert!(sep.poll(t0 + Duration::from_millis(600)));
        // Fires once per group.
        assert!(!sep.poll(t0 + Duration::from_millis(700)));
    }

    #[test]
    fn keystroke_extends_the_group() {
        let mut sep = AutoSeparator::new(PAUSE);
        let t0 = Instant::now();
        sep.note_edit(t0);
        sep.note_edit(t0 + Duration::from_millis(450));
        assert!(!sep.poll(t0 + Duration::from_millis(600)));
        assert!(sep.poll(t0 + Duration::from_millis(950)));
    }

    #[test]
    fn flush_closes_open_group_once() {
        let mut sep = AutoSeparator::new(PAUSE);
        sep.note_edit(Instant::now());
        assert!(sep.flush());
        assert!(!sep.flush());
        assert!(!sep.is_open());
    }
}
