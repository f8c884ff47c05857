use crate::message::{Key, Modifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shortcut {
    DeleteSelection,
    Undo,
    Redo,
    SelectAll,
    ClearSelection,
}

/// Default key bindings. Ctrl and Cmd are interchangeable.
pub fn shortcut_for(key: Key, modifiers: Modifiers) -> Option<Shortcut> {
    match key {
        Key::Delete | Key::Backspace => Some(Shortcut::DeleteSelection),
        Key::Escape => Some(Shortcut::ClearSelection),
        Key::Char(c) if modifiers.command() => match c.to_ascii_lowercase() {
            'z' if modifiers.shift => Some(Shortcut::Redo),
            'z' => Some(Shortcut::Undo),
            'y' => Some(Shortcut::Redo),
            'a' => Some(Shortcut::SelectAll),
            _ => None,
        },
        Key::Char(_) => None,
    }
}
