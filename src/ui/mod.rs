// ── UI model ──────────────────────────────────────────────────────────────────
//
// Pure Rust descriptions of what the Win32 controls display.  No Win32 calls
// here; the window module turns these into menus, accelerators and status
// bar text.

pub mod menu;
pub mod status;
