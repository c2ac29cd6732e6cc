/// NotePad build script.
///
/// The window backend (Win32 + SciLexer.dll) only exists on Windows.  Other
/// targets still build and test the controller, but the binary exits with an
/// error at startup, so say so at build time.
fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    let target_os = std::env::var("CARGO_CFG_TARGET_OS").unwrap_or_default();
    if target_os != "windows" {
        println!(
            "cargo:warning=NotePad has no window backend for \
             {target_os:?}; the binary will refuse to start"
        );
    }

    // SciLexer.dll is loaded at runtime via LoadLibraryW and must sit next
    // to the executable.  If we switch to a static Scintilla, the `cc`
    // compilation goes here.
}
