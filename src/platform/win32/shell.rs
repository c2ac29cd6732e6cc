// ── Win32 shell ───────────────────────────────────────────────────────────────
//
// `Shell` for the main window: common dialogs, message boxes and the status
// bar control.

#![allow(unsafe_code)]

use std::path::PathBuf;

use windows::{
    core::PCWSTR,
    Win32::{
        Foundation::{HWND, LPARAM, WPARAM},
        UI::{
            Controls::SB_SETTEXTW,
            WindowsAndMessaging::{
                MessageBoxW, SendMessageW, IDYES, MB_ICONERROR, MB_ICONQUESTION, MB_OK, MB_YESNO,
                MESSAGEBOX_RESULT, MESSAGEBOX_STYLE,
            },
        },
    },
};

use super::{dialogs, wide};
use crate::platform::Shell;

/// Dialogs owned by the main window plus its status bar.
pub(crate) struct Win32Shell {
    owner: HWND,
    status_bar: HWND,
}

impl Win32Shell {
    pub(crate) fn new(owner: HWND, status_bar: HWND) -> Self {
        Self { owner, status_bar }
    }

    fn message_box(&self, title: &str, text: &str, style: MESSAGEBOX_STYLE) -> MESSAGEBOX_RESULT {
        let text_wide = wide(text);
        let title_wide = wide(title);
        // SAFETY: both strings are null-terminated UTF-16 that stay allocated
        // for the duration of the call; owner is the live main window.
        unsafe {
            MessageBoxW(
                self.owner,
                PCWSTR(text_wide.as_ptr()),
                PCWSTR(title_wide.as_ptr()),
                style,
            )
        }
    }
}

impl Shell for Win32Shell {
    fn pick_open_path(&mut self) -> Option<PathBuf> {
        dialogs::show_open_dialog(self.owner)
    }

    fn pick_save_path(&mut self, default_extension: &str) -> Option<PathBuf> {
        dialogs::show_save_dialog(self.owner, default_extension)
    }

    fn confirm(&mut self, title: &str, question: &str) -> bool {
        self.message_box(title, question, MB_YESNO | MB_ICONQUESTION) == IDYES
    }

    fn show_error(&mut self, title: &str, message: &str) {
        let _ = self.message_box(title, message, MB_OK | MB_ICONERROR);
    }

    fn set_status(&mut self, text: &str) {
        // Text after a second tab is right-justified in a status bar part.
        let text_wide = wide(&format!("\t\t{text}"));
        // SAFETY: status_bar is the live status control; text_wide outlives
        // the synchronous SendMessageW.  Part 0 is the only part.
        unsafe {
            let _ = SendMessageW(
                self.status_bar,
                SB_SETTEXTW,
                WPARAM(0),
                LPARAM(text_wide.as_ptr() as isize),
            );
        }
    }
}
