// ── Main window ───────────────────────────────────────────────────────────────
//
// Responsibilities in this file (unsafe confined here):
//   • Register the main window class and create the top-level window with
//     its File menu.
//   • Create the child controls: Scintilla buffer and status bar.
//   • Register the keyboard accelerators for the File commands.
//   • Run the Win32 message loop and dispatch WM_COMMAND, WM_SIZE, WM_TIMER,
//     buffer release notifications, WM_CLOSE and WM_DESTROY.
//   • Expose a safe fatal-error dialog helper for use by main().

#![allow(unsafe_code)]

use std::{cell::RefCell, time::Instant};

use tracing::{debug, info};
use windows::{
    core::{w, PCWSTR},
    Win32::{
        Foundation::{GetLastError, HINSTANCE, HWND, LPARAM, LRESULT, RECT, TRUE, WPARAM},
        Graphics::Gdi::{GetStockObject, HBRUSH, WHITE_BRUSH},
        System::LibraryLoader::GetModuleHandleW,
        UI::{
            Controls::{
                InitCommonControlsEx, ICC_BAR_CLASSES, INITCOMMONCONTROLSEX, SBARS_SIZEGRIP,
                STATUSCLASSNAMEW,
            },
            Input::KeyboardAndMouse::SetFocus,
            Shell::{DefSubclassProc, RemoveWindowSubclass, SetWindowSubclass},
            WindowsAndMessaging::{
                AdjustWindowRectEx, AppendMenuW, CreateAcceleratorTableW, CreateMenu,
                CreateWindowExW, DefWindowProcW, DestroyAcceleratorTable, DestroyWindow,
                DispatchMessageW, GetClientRect, GetMessageW, GetWindowLongPtrW, GetWindowRect,
                KillTimer, LoadCursorW, LoadIconW, MessageBoxW, MoveWindow, PostMessageW,
                PostQuitMessage, RegisterClassExW, SendMessageW, SetTimer, SetWindowLongPtrW,
                ShowWindow, TranslateAcceleratorW, TranslateMessage, UpdateWindow, ACCEL,
                ACCEL_VIRT_FLAGS, CS_HREDRAW, CS_VREDRAW, CW_USEDEFAULT, FCONTROL, FVIRTKEY,
                GWLP_USERDATA, HACCEL, HMENU, IDC_ARROW, IDI_APPLICATION, MB_ICONERROR, MB_OK,
                MF_POPUP, MF_SEPARATOR, MF_STRING, MSG, SW_SHOW, WINDOW_EX_STYLE, WINDOW_STYLE,
                WM_APP, WM_CLOSE, WM_COMMAND, WM_DESTROY, WM_KEYUP, WM_LBUTTONUP, WM_MBUTTONUP,
                WM_NCDESTROY, WM_RBUTTONUP, WM_SETFOCUS, WM_SIZE, WM_SYSKEYUP, WM_TIMER,
                WNDCLASSEXW, WS_CHILD, WS_OVERLAPPEDWINDOW, WS_VISIBLE,
            },
        },
    },
};

use super::{dpi, shell::Win32Shell, wide};
use crate::{
    app::{self, App, Flow},
    config::EditorConfig,
    editor::scintilla::{SciDll, ScintillaView},
    error::{NotepadError, Result},
    platform::Shell,
    ui::{
        menu::{self, Command, MenuEntry, Modifier, FILE_MENU},
        status,
    },
};

// ── Window identity ───────────────────────────────────────────────────────────

/// Atom name used to register (and later find) the main window class.
const CLASS_NAME: PCWSTR = w!("NotePadMainWindow");

// ── Private messages and timers ───────────────────────────────────────────────

/// Posted by the buffer subclass after a key is released.
const WM_APP_KEY_RELEASED: u32 = WM_APP + 1;
/// Posted by the buffer subclass after a mouse button is released.
const WM_APP_MOUSE_RELEASED: u32 = WM_APP + 2;

/// Fires once typing has paused for `EditorConfig::undo_pause`.
const PAUSE_TIMER_ID: usize = 1;
const BUFFER_SUBCLASS_ID: usize = 1;

// ── Window state ──────────────────────────────────────────────────────────────

/// Everything the window procedure needs, boxed into `GWLP_USERDATA` once
/// the child controls exist and freed on `WM_NCDESTROY`.
struct WindowState {
    sci: HWND,
    status_bar: HWND,
    /// Text padding at 96 DPI.
    padding: i32,
    /// Borrowed for the duration of a handler.  Modal dialogs re-enter the
    /// window procedure; re-entrant handlers find it borrowed and skip.
    inner: RefCell<Inner>,
}

struct Inner {
    app: App,
    view: ScintillaView,
    shell: Win32Shell,
}

impl WindowState {
    /// Status bar along the bottom, buffer filling the rest inside the padding.
    fn layout(&self, hwnd: HWND) {
        let mut client = RECT::default();
        let mut bar = RECT::default();
        // SAFETY: hwnd, status_bar and sci are live windows owned by this
        // thread; the RECTs are valid out-pointers.  The status bar
        // repositions itself along the bottom edge when it receives WM_SIZE.
        unsafe {
            let _ = SendMessageW(self.status_bar, WM_SIZE, WPARAM(0), LPARAM(0));
            if GetClientRect(hwnd, &mut client).is_err()
                || GetWindowRect(self.status_bar, &mut bar).is_err()
            {
                return;
            }
            let pad = dpi::scale(self.padding, dpi::for_window(hwnd));
            let (x, y, w, h) = text_area(
                client.right - client.left,
                client.bottom - client.top,
                bar.bottom - bar.top,
                pad,
            );
            let _ = MoveWindow(self.sci, x, y, w, h, TRUE);
        }
    }
}

/// Rectangle `(x, y, width, height)` of the text buffer inside a client area
/// of `width × height` with a status bar of `status_height` along the bottom.
fn text_area(width: i32, height: i32, status_height: i32, pad: i32) -> (i32, i32, i32, i32) {
    let w = (width - 2 * pad).max(0);
    let h = (height - status_height - 2 * pad).max(0);
    (pad, pad, w, h)
}

/// The state stored in `GWLP_USERDATA`, if the window has one yet.
fn window_state<'a>(hwnd: HWND) -> Option<&'a WindowState> {
    // SAFETY: GWLP_USERDATA holds either 0 or the pointer stored by
    // `attach_children`, which stays valid until WM_NCDESTROY frees it.
    unsafe {
        let ptr = GetWindowLongPtrW(hwnd, GWLP_USERDATA) as *const WindowState;
        ptr.as_ref()
    }
}

/// Run `f` against the controller, unless a handler further up the stack is
/// already using it.
fn with_inner<R>(hwnd: HWND, f: impl FnOnce(&mut Inner) -> R) -> Option<R> {
    let state = window_state(hwnd)?;
    let Ok(mut inner) = state.inner.try_borrow_mut() else {
        debug!("window state busy; event dropped");
        return None;
    };
    Some(f(&mut inner))
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Create the main window around `app` and drive the message loop until the
/// user closes the application.
pub(crate) fn run(app: App) -> Result<()> {
    let t0 = Instant::now();

    dpi::init();
    init_common_controls();

    // SAFETY: GetModuleHandleW(None) returns the .exe's own HMODULE, which is
    // always valid for the process lifetime.
    let hmodule = unsafe { GetModuleHandleW(None) }?;
    let hinstance = HINSTANCE(hmodule.0);

    // Declared before the window so it is dropped after the message loop,
    // once Scintilla's child window is gone.
    let sci_dll = SciDll::load()?;

    register_class(hinstance)?;
    let modifier = app.modifier();
    let menu_bar = build_menu(modifier)?;
    let accel = build_accelerators(modifier)?;
    let hwnd = create_window(hinstance, app.config(), menu_bar)?;

    if let Err(e) = attach_children(hwnd, hinstance, app, &sci_dll) {
        // SAFETY: hwnd is the window created above; nothing else refers to it.
        unsafe {
            let _ = DestroyWindow(hwnd);
        }
        return Err(e);
    }

    // SAFETY: hwnd was just created and is valid.  Return values (previous
    // visibility, repaint success) are intentionally ignored.
    unsafe {
        let _ = ShowWindow(hwnd, SW_SHOW);
        let _ = UpdateWindow(hwnd);
    }
    info!(elapsed_ms = t0.elapsed().as_secs_f64() * 1000.0, "window visible");

    let result = message_loop(hwnd, accel);

    // SAFETY: accel was created by CreateAcceleratorTableW and is no longer
    // used once the loop has returned.
    unsafe {
        let _ = DestroyAcceleratorTable(accel);
    }
    drop(sci_dll);
    result
}

/// Show a modal error dialog with the given message.
///
/// Used by `main()` when `run()` returns an error.
pub(crate) fn show_error_dialog(message: &str) {
    let msg_wide = wide(message);
    let title_wide = wide("NotePad: fatal error");

    // SAFETY: msg_wide and title_wide are valid null-terminated UTF-16 strings
    // that remain allocated for the duration of the MessageBoxW call.
    // HWND::default() (null) means the dialog has no owner window.
    unsafe {
        let _ = MessageBoxW(
            HWND::default(),
            PCWSTR(msg_wide.as_ptr()),
            PCWSTR(title_wide.as_ptr()),
            MB_OK | MB_ICONERROR,
        );
    }
}

// ── Setup ─────────────────────────────────────────────────────────────────────

fn init_common_controls() {
    let icc = INITCOMMONCONTROLSEX {
        dwSize: std::mem::size_of::<INITCOMMONCONTROLSEX>() as u32,
        dwICC: ICC_BAR_CLASSES,
    };
    // SAFETY: icc is fully initialised.  A failure only means the status bar
    // class is missing, which CreateWindowExW reports later.
    unsafe {
        let _ = InitCommonControlsEx(&icc);
    }
}

fn register_class(hinstance: HINSTANCE) -> Result<()> {
    // SAFETY: IDI_APPLICATION and IDC_ARROW are built-in resources that exist
    // on all Windows versions.
    let icon = unsafe { LoadIconW(None, IDI_APPLICATION) }?;
    let cursor = unsafe { LoadCursorW(None, IDC_ARROW) }?;

    // SAFETY: GetStockObject with WHITE_BRUSH always returns a valid HGDIOBJ.
    // The padding around the buffer is painted with it.
    let bg_brush = unsafe { HBRUSH(GetStockObject(WHITE_BRUSH).0) };

    let wndclass = WNDCLASSEXW {
        cbSize: std::mem::size_of::<WNDCLASSEXW>() as u32,
        style: CS_HREDRAW | CS_VREDRAW,
        lpfnWndProc: Some(wnd_proc),
        cbClsExtra: 0,
        cbWndExtra: 0,
        hInstance: hinstance,
        hIcon: icon,
        hCursor: cursor,
        hbrBackground: bg_brush,
        lpszMenuName: PCWSTR::null(),
        lpszClassName: CLASS_NAME,
        hIconSm: icon,
    };

    // SAFETY: wndclass is fully initialised with valid handles;
    // CLASS_NAME is a valid null-terminated UTF-16 string literal.
    let atom = unsafe { RegisterClassExW(&wndclass) };
    if atom == 0 {
        return Err(last_error("RegisterClassExW"));
    }
    Ok(())
}

fn create_window(hinstance: HINSTANCE, config: &EditorConfig, menu: HMENU) -> Result<HWND> {
    // The configured size is the client area; grow it by the frame and menu.
    let system_dpi = dpi::system();
    let mut rect = RECT {
        left: 0,
        top: 0,
        right: dpi::scale(config.width, system_dpi),
        bottom: dpi::scale(config.height, system_dpi),
    };
    // SAFETY: rect is a valid in/out pointer.
    unsafe { AdjustWindowRectEx(&mut rect, WS_OVERLAPPEDWINDOW, TRUE, WINDOW_EX_STYLE(0)) }?;

    let title = wide(config.title);
    // SAFETY: CLASS_NAME was just registered; hinstance is the exe's module;
    // title outlives the call; menu is a fresh menu bar that the window takes
    // ownership of.
    let hwnd = unsafe {
        CreateWindowExW(
            WINDOW_EX_STYLE(0),
            CLASS_NAME,
            PCWSTR(title.as_ptr()),
            WS_OVERLAPPEDWINDOW,
            CW_USEDEFAULT,
            CW_USEDEFAULT,
            rect.right - rect.left,
            rect.bottom - rect.top,
            HWND::default(),
            menu,
            hinstance,
            None,
        )
    }?;
    Ok(hwnd)
}

/// Create the status bar and Scintilla buffer, then hand `app` to the window.
fn attach_children(hwnd: HWND, hinstance: HINSTANCE, app: App, dll: &SciDll) -> Result<()> {
    // SAFETY: hwnd is the live main window; STATUSCLASSNAMEW is registered by
    // InitCommonControlsEx.  Size 0×0: the control sizes itself on WM_SIZE.
    let status_bar = unsafe {
        CreateWindowExW(
            WINDOW_EX_STYLE(0),
            STATUSCLASSNAMEW,
            PCWSTR::null(),
            WS_CHILD | WS_VISIBLE | WINDOW_STYLE(SBARS_SIZEGRIP),
            0, 0, 0, 0,
            hwnd,
            HMENU::default(),
            hinstance,
            None,
        )
    }?;

    let view = ScintillaView::create(hwnd, hinstance, app.config(), dll)?;
    let sci = view.hwnd();

    // SAFETY: sci is the live Scintilla child; the parent HWND passed as
    // reference data outlives it.
    let hooked = unsafe {
        SetWindowSubclass(sci, Some(buffer_subclass_proc), BUFFER_SUBCLASS_ID, hwnd.0 as usize)
    };
    if !hooked.as_bool() {
        return Err(last_error("SetWindowSubclass"));
    }

    let mut shell = Win32Shell::new(hwnd, status_bar);
    shell.set_status(&status::initial_text());
    app::refresh_status(&view, &mut shell);

    let state = Box::new(WindowState {
        sci,
        status_bar,
        padding: app.config().padding,
        inner: RefCell::new(Inner { app, view, shell }),
    });
    // SAFETY: ownership of the box moves into GWLP_USERDATA; WM_NCDESTROY
    // takes it back exactly once.
    unsafe {
        let _ = SetWindowLongPtrW(hwnd, GWLP_USERDATA, Box::into_raw(state) as isize);
    }

    if let Some(state) = window_state(hwnd) {
        state.layout(hwnd);
    }
    // SAFETY: sci is a live child of the foreground window.
    unsafe {
        let _ = SetFocus(sci);
    }
    Ok(())
}

// ── Menu and accelerators ─────────────────────────────────────────────────────

fn build_menu(modifier: Modifier) -> Result<HMENU> {
    // SAFETY: CreateMenu has no preconditions; every string passed to
    // AppendMenuW is null-terminated and lives until the call returns (the
    // menu copies it).
    unsafe {
        let bar = CreateMenu()?;
        let file = CreateMenu()?;

        for entry in FILE_MENU {
            match entry {
                MenuEntry::Item(command) => {
                    let text = wide(&menu::item_text(command, modifier));
                    AppendMenuW(file, MF_STRING, command.id() as usize, PCWSTR(text.as_ptr()))?;
                }
                MenuEntry::Separator => AppendMenuW(file, MF_SEPARATOR, 0, PCWSTR::null())?,
            }
        }

        // The uIDNewItem parameter for MF_POPUP is the child HMENU cast to usize.
        AppendMenuW(bar, MF_POPUP, file.0 as usize, w!("&File"))?;
        Ok(bar)
    }
}

/// Win32 has no Command key; the Control chord stands in for it.
fn accel_modifier(_modifier: Modifier) -> ACCEL_VIRT_FLAGS {
    FCONTROL
}

fn build_accelerators(modifier: Modifier) -> Result<HACCEL> {
    let table: Vec<ACCEL> = menu::shortcuts(modifier)
        .map(|(shortcut, command)| ACCEL {
            fVirt: FVIRTKEY | accel_modifier(shortcut.modifier),
            // Virtual-key codes for letters are their upper-case ASCII values.
            key: shortcut.key as u16,
            cmd: command.id(),
        })
        .collect();
    // SAFETY: table is a valid slice of initialised ACCEL entries.
    let accel = unsafe { CreateAcceleratorTableW(&table) }?;
    Ok(accel)
}

// ── Message loop ──────────────────────────────────────────────────────────────

fn message_loop(hwnd: HWND, accel: HACCEL) -> Result<()> {
    let mut msg = MSG::default();

    loop {
        // SAFETY: &mut msg is a valid MSG pointer; None retrieves messages
        // for all windows on this thread; 0,0 filter accepts all.
        let ret = unsafe { GetMessageW(&mut msg, None, 0, 0) };

        match ret.0 {
            -1 => return Err(last_error("GetMessageW")),
            // WM_QUIT.
            0 => break,
            _ => unsafe {
                // SAFETY: msg was populated by a successful GetMessageW call.
                // Accelerator chords become WM_COMMAND on the main window, even
                // while the Scintilla child has focus.
                if TranslateAcceleratorW(hwnd, accel, &msg) == 0 {
                    let _ = TranslateMessage(&msg);
                    let _ = DispatchMessageW(&msg);
                }
            },
        }
    }

    Ok(())
}

// ── Window procedure ──────────────────────────────────────────────────────────

// SAFETY: wnd_proc is registered as lpfnWndProc in WNDCLASSEXW.
// Windows guarantees that hwnd, msg, wparam, and lparam are valid for the
// lifetime of this call; we must not store hwnd beyond the message handler.
unsafe extern "system" fn wnd_proc(
    hwnd: HWND,
    msg: u32,
    wparam: WPARAM,
    lparam: LPARAM,
) -> LRESULT {
    match msg {
        // ── Layout & focus ────────────────────────────────────────────────────
        WM_SIZE => {
            if let Some(state) = window_state(hwnd) {
                state.layout(hwnd);
            }
            LRESULT(0)
        }

        WM_SETFOCUS => {
            if let Some(state) = window_state(hwnd) {
                let _ = SetFocus(state.sci);
            }
            LRESULT(0)
        }

        // ── Commands (menu and accelerators) ──────────────────────────────────
        WM_COMMAND => {
            // Low word of WPARAM is the command identifier.
            match Command::from_id((wparam.0 & 0xFFFF) as u16) {
                Some(command) => {
                    run_command(hwnd, command);
                    LRESULT(0)
                }
                None => DefWindowProcW(hwnd, msg, wparam, lparam),
            }
        }

        // ── Buffer events ─────────────────────────────────────────────────────
        WM_APP_KEY_RELEASED => {
            let pause = with_inner(hwnd, |Inner { app, view, shell }| {
                app.on_key_release(Instant::now(), &*view, shell);
                app.config().undo_pause
            });
            if let Some(pause) = pause {
                // Re-arming an existing timer ID restarts its countdown.
                let ms = u32::try_from(pause.as_millis()).unwrap_or(u32::MAX);
                let _ = SetTimer(hwnd, PAUSE_TIMER_ID, ms, None);
            }
            LRESULT(0)
        }

        WM_APP_MOUSE_RELEASED => {
            with_inner(hwnd, |Inner { app, view, shell }| app.on_mouse_release(view, shell));
            LRESULT(0)
        }

        WM_TIMER if wparam.0 == PAUSE_TIMER_ID => {
            let idle = with_inner(hwnd, |Inner { app, view, .. }| {
                app.on_pause_timer(Instant::now(), view)
            });
            if idle == Some(true) {
                let _ = KillTimer(hwnd, PAUSE_TIMER_ID);
            }
            LRESULT(0)
        }

        // ── Lifecycle ─────────────────────────────────────────────────────────
        WM_CLOSE => {
            // Same as File > Exit: no prompt.
            let _ = DestroyWindow(hwnd);
            LRESULT(0)
        }

        WM_DESTROY => {
            // SAFETY: PostQuitMessage is always safe from WM_DESTROY.
            PostQuitMessage(0);
            LRESULT(0)
        }

        WM_NCDESTROY => {
            // SAFETY: the pointer was produced by Box::into_raw in
            // attach_children; clearing the slot first guarantees a single free.
            let ptr = SetWindowLongPtrW(hwnd, GWLP_USERDATA, 0) as *mut WindowState;
            if !ptr.is_null() {
                drop(Box::from_raw(ptr));
            }
            DefWindowProcW(hwnd, msg, wparam, lparam)
        }

        // Default processing for all unhandled messages.
        _ => DefWindowProcW(hwnd, msg, wparam, lparam),
    }
}

/// Dispatch a File command and destroy the window if it asks to exit.
fn run_command(hwnd: HWND, command: Command) {
    let flow = with_inner(hwnd, |Inner { app, view, shell }| app.execute(command, view, shell));
    if flow == Some(Flow::Exit) {
        // SAFETY: hwnd is the live main window.  The state borrow has ended;
        // WM_NCDESTROY frees it during this call.
        unsafe {
            let _ = DestroyWindow(hwnd);
        }
    }
}

// ── Buffer subclass ───────────────────────────────────────────────────────────

// SAFETY: installed by SetWindowSubclass on the Scintilla child; `parent` is
// the main window HWND passed as reference data, alive for the child's life.
unsafe extern "system" fn buffer_subclass_proc(
    hwnd: HWND,
    msg: u32,
    wparam: WPARAM,
    lparam: LPARAM,
    id: usize,
    parent: usize,
) -> LRESULT {
    // Let Scintilla handle the event first so the caret is already updated
    // when the parent queries it.
    let result = DefSubclassProc(hwnd, msg, wparam, lparam);

    let notify = match msg {
        WM_KEYUP | WM_SYSKEYUP => Some(WM_APP_KEY_RELEASED),
        WM_LBUTTONUP | WM_MBUTTONUP | WM_RBUTTONUP => Some(WM_APP_MOUSE_RELEASED),
        WM_NCDESTROY => {
            let _ = RemoveWindowSubclass(hwnd, Some(buffer_subclass_proc), id);
            None
        }
        _ => None,
    };
    if let Some(notify) = notify {
        let _ = PostMessageW(HWND(parent as _), notify, WPARAM(0), LPARAM(0));
    }
    result
}

// ── Error helpers ─────────────────────────────────────────────────────────────

/// Capture the current Win32 last-error code and wrap it in a `NotepadError`.
///
/// Call immediately after a Win32 function that signals failure; `GetLastError`
/// reads thread-local state that can be overwritten by any subsequent API call.
fn last_error(function: &'static str) -> NotepadError {
    // SAFETY: GetLastError reads thread-local state and never fails.
    let code = unsafe { GetLastError() };
    NotepadError::Win32 {
        function,
        code: code.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_area_insets_by_padding_above_status_bar() {
        assert_eq!(text_area(900, 700, 22, 15), (15, 15, 870, 648));
    }

    #[test]
    fn text_area_never_negative() {
        assert_eq!(text_area(10, 10, 22, 15), (15, 15, 0, 0));
    }

    #[test]
    fn private_messages_are_distinct() {
        assert_ne!(WM_APP_KEY_RELEASED, WM_APP_MOUSE_RELEASED);
    }
}
