// ── Document file I/O ─────────────────────────────────────────────────────────
//
// Whole-file UTF-8 reads and writes.  Bytes go to and from disk verbatim:
// no BOM handling, no newline translation.  No `unsafe`, no Win32.

use std::{fs, path::Path};

use tracing::info;

use crate::error::{NotepadError, Result};

/// Read `path` as UTF-8 text.
///
/// Fails with `NotepadError::File` when the file cannot be read and with
/// `NotepadError::Decode` when its bytes are not valid UTF-8.
pub(crate) fn load(path: &Path) -> Result<String> {
    let bytes = fs::read(path).map_err(|e| NotepadError::file(path, e))?;
    let len = bytes.len();
    let text = String::from_utf8(bytes).map_err(|source| NotepadError::Decode {
        path: path.to_path_buf(),
        source,
    })?;
    info!(path = %path.display(), bytes = len, "opened document");
    Ok(text)
}

/// Write `text` to `path` as UTF-8, replacing any existing file.
pub(crate) fn store(path: &Path, text: &str) -> Result<()> {
    fs::write(path, text.as_bytes()).map_err(|e| NotepadError::file(path, e))?;
    info!(path = %path.display(), bytes = text.len(), "saved document");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_then_load_is_exact() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("notes.txt");
        let text = "first line\r\nsecond\tline\nüñíçødé ✓\n\n";
        store(&path, text).expect("store");
        assert_eq!(load(&path).expect("load"), text);
    }

    #[test]
    fn store_writes_no_trailing_newline() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("hello.txt");
        store(&path, "hello").expect("store");
        assert_eq!(fs::read(&path).expect("read"), b"hello");
    }

    #[test]
    fn store_overwrites_existing_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("old.txt");
        fs::write(&path, "a much longer previous content").expect("seed");
        store(&path, "new").expect("store");
        assert_eq!(load(&path).expect("load"), "new");
    }

    #[test]
    fn load_keeps_utf8_bom() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("bom.txt");
        fs::write(&path, b"\xEF\xBB\xBFhi").expect("seed");
        assert_eq!(load(&path).expect("load"), "\u{feff}hi");
    }

    #[test]
    fn load_missing_file_is_file_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = load(&dir.path().join("absent.txt")).unwrap_err();
        assert!(matches!(err, NotepadError::File { .. }));
    }

    #[test]
    fn load_invalid_utf8_is_decode_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("latin1.txt");
        fs::write(&path, b"caf\xE9").expect("seed");
        let err = load(&path).unwrap_err();
        assert!(matches!(err, NotepadError::Decode { .. }));
        assert!(err.to_string().contains("latin1.txt"));
    }

    #[test]
    fn store_into_missing_directory_fails() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("no-such-dir").join("x.txt");
        assert!(matches!(store(&path, "x"), Err(NotepadError::File { .. })));
    }
}
