// ── Safety policy ────────────────────────────────────────────────────────────
// Unsafe code is forbidden everywhere except:
//   • `platform::win32`   – Win32 / WinAPI FFI
//   • `editor::scintilla` – Scintilla child-window hosting
// Each unsafe block in those modules MUST carry a `// SAFETY:` comment.
#![deny(unsafe_code)]
// Without the Win32 front end the event hooks and widget settings go unused.
#![cfg_attr(not(windows), allow(dead_code))]
// Release builds run as a GUI application (no console window).
// Debug builds keep the console so that log output is visible.
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod app;
mod config;
mod document;
mod editor;
mod error;
mod platform;
mod ui;

use tracing::error;
use tracing_subscriber::EnvFilter;

use crate::{app::App, config::EditorConfig, ui::menu::Modifier};

fn main() {
    // Logs go to stderr.  RUST_LOG=notepad=debug shows command dispatch.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let app = App::new(EditorConfig::default(), Modifier::host());
    if let Err(e) = run(app) {
        // Startup failed before or during the message loop.
        error!(error = %e, "NotePad stopped");
        show_fatal(&e.to_string());
        std::process::exit(1);
    }
}

#[cfg(windows)]
fn run(app: App) -> error::Result<()> {
    platform::win32::window::run(app)
}

#[cfg(not(windows))]
fn run(_app: App) -> error::Result<()> {
    Err(error::NotepadError::Unsupported {
        os: std::env::consts::OS,
    })
}

/// A modal dialog is the only output a GUI user sees.
#[cfg(windows)]
fn show_fatal(message: &str) {
    platform::win32::window::show_error_dialog(message);
}

#[cfg(not(windows))]
fn show_fatal(_message: &str) {}
