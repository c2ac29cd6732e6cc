// ── File menu and keyboard shortcuts ──────────────────────────────────────────
//
// The menu items and their shortcuts come from one table so that a menu click
// and the matching key chord always reach the same command.

use std::fmt;

// ── Commands ──────────────────────────────────────────────────────────────────

/// A user-invokable editor command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum Command {
    New,
    Open,
    Save,
    Exit,
}

impl Command {
    /// Every command, in menu order.
    pub(crate) const ALL: [Command; 4] = [Command::New, Command::Open, Command::Save, Command::Exit];

    /// Menu label without mnemonic or hint.
    pub(crate) fn label(self) -> &'static str {
        match self {
            Self::New => "New",
            Self::Open => "Open",
            Self::Save => "Save",
            Self::Exit => "Exit",
        }
    }

    /// Letter pressed together with the primary modifier.
    pub(crate) fn key(self) -> char {
        match self {
            Self::New => 'N',
            Self::Open => 'O',
            Self::Save => 'S',
            Self::Exit => 'Q',
        }
    }

    /// Win32 `WM_COMMAND` identifier shared by the menu item and the
    /// accelerator.
    pub(crate) fn id(self) -> u16 {
        match self {
            Self::New => 1001,
            Self::Open => 1002,
            Self::Save => 1003,
            Self::Exit => 1099,
        }
    }

    /// Inverse of [`Command::id`].
    pub(crate) fn from_id(id: u16) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.id() == id)
    }
}

// ── Modifier convention ───────────────────────────────────────────────────────

/// The primary shortcut modifier of the host platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Modifier {
    /// macOS Command key.
    Command,
    /// Control key everywhere else.
    Control,
}

impl Modifier {
    /// Resolve the convention for an OS identifier as reported by
    /// `std::env::consts::OS`.
    pub(crate) fn for_os(os: &str) -> Self {
        if os == "macos" {
            Self::Command
        } else {
            Self::Control
        }
    }

    /// The convention of the host this binary runs on.
    pub(crate) fn host() -> Self {
        Self::for_os(std::env::consts::OS)
    }

    /// Abbreviation shown in menu hints.
    pub(crate) fn hint(self) -> &'static str {
        match self {
            Self::Command => "Cmd",
            Self::Control => "Ctrl",
        }
    }
}

// ── Menu entries ──────────────────────────────────────────────────────────────

/// One row of the File menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MenuEntry {
    Item(Command),
    Separator,
}

/// The File menu, top to bottom.
pub(crate) const FILE_MENU: [MenuEntry; 5] = [
    MenuEntry::Item(Command::New),
    MenuEntry::Item(Command::Open),
    MenuEntry::Item(Command::Save),
    MenuEntry::Separator,
    MenuEntry::Item(Command::Exit),
];

/// A key chord: modifier plus letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Shortcut {
    pub(crate) modifier: Modifier,
    pub(crate) key: char,
}

impl Shortcut {
    pub(crate) fn for_command(command: Command, modifier: Modifier) -> Self {
        Self {
            modifier,
            key: command.key(),
        }
    }
}

impl fmt::Display for Shortcut {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}+{}", self.modifier.hint(), self.key)
    }
}

/// Full menu item text, hint right-aligned after a tab: `"New\tCtrl+N"`.
pub(crate) fn item_text(command: Command, modifier: Modifier) -> String {
    format!(
        "{}\t{}",
        command.label(),
        Shortcut::for_command(command, modifier)
    )
}

/// Every shortcut the window must register, paired with its command.
pub(crate) fn shortcuts(modifier: Modifier) -> impl Iterator<Item = (Shortcut, Command)> {
    Command::ALL
        .into_iter()
        .map(move |c| (Shortcut::for_command(c, modifier), c))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn macos_uses_command() {
        assert_eq!(Modifier::for_os("macos"), Modifier::Command);
        assert_eq!(Modifier::Command.hint(), "Cmd");
    }

    #[test]
    fn other_hosts_use_control() {
        for os in ["windows", "linux", "freebsd", ""] {
            assert_eq!(Modifier::for_os(os), Modifier::Control, "{os}");
        }
    }

    #[test]
    fn item_text_carries_hint() {
        assert_eq!(item_text(Command::New, Modifier::Control), "New\tCtrl+N");
        assert_eq!(item_text(Command::Exit, Modifier::Command), "Exit\tCmd+Q");
    }

    #[test]
    fn menu_order_has_separator_before_exit() {
        assert_eq!(FILE_MENU[3], MenuEntry::Separator);
        assert_eq!(FILE_MENU[4], MenuEntry::Item(Command::Exit));
    }

    #[test]
    fn shortcut_keys_are_n_o_s_q() {
        let keys: String = shortcuts(Modifier::Control).map(|(s, _)| s.key).collect();
        assert_eq!(keys, "NOSQ");
    }

    #[test]
    fn ids_round_trip_and_are_distinct() {
        for c in Command::ALL {
            assert_eq!(Command::from_id(c.id()), Some(c));
        }
        assert_eq!(Command::from_id(0), None);
    }
}
