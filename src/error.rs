// ── Central error type ────────────────────────────────────────────────────────
//
// All fallible operations in NotePad return `error::Result<T>`.  No panics
// in production paths; file errors surface as error dialogs raised by the
// controller, startup errors as a fatal dialog raised by `main()`.

use std::{path::PathBuf, string::FromUtf8Error};

use thiserror::Error;

/// Every error that NotePad can produce.
#[derive(Debug, Error)]
pub(crate) enum NotepadError {
    /// A Win32 API call returned a failure code.
    #[error("{function} failed (error {code:#010x})")]
    Win32 {
        /// The name of the failing function, for display purposes.
        function: &'static str,
        /// The raw Win32 error code (`GetLastError()` value) or HRESULT.
        code: u32,
    },

    /// Reading or writing a document failed.
    #[error("{}: {source}", .path.display())]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file was read but its bytes are not UTF-8.
    #[error("{} is not valid UTF-8 text: {source}", .path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: FromUtf8Error,
    },

    /// No window backend exists for the host OS.
    #[error("NotePad has no window backend for {os}")]
    Unsupported { os: &'static str },
}

impl NotepadError {
    /// Wrap an I/O error with the path it happened on.
    pub(crate) fn file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::File {
            path: path.into(),
            source,
        }
    }
}

// Convert a windows-crate error (HRESULT) directly into a NotepadError so that
// `?` can be used on `windows::core::Result<T>` throughout the platform module.
#[cfg(windows)]
impl From<windows::core::Error> for NotepadError {
    fn from(e: windows::core::Error) -> Self {
        // HRESULT.0 is i32; reinterpret bits as u32 for display purposes.
        // Win32 errors appear as 0x8007xxxx HRESULTs.
        Self::Win32 {
            function: "windows",
            code: e.code().0 as u32,
        }
    }
}

/// Convenience alias used throughout the crate.
pub(crate) type Result<T> = std::result::Result<T, NotepadError>;
