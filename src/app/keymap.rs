//! Keymap for the pager.
//!
//! Maps crossterm key events to pager [Action]s. Bindings are fixed:
//! - `j`/`k`/arrows scroll one line
//! - `PgUp`/`PgDn`/space/`b` scroll one page
//! - `Ctrl-d`/`Ctrl-u` scroll half a page
//! - `g`/`G`/`Home`/`End` jump to either end
//! - `q`/`Esc`/`Ctrl-c` quit

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    ScrollUp,
    ScrollDown,
    HalfPageUp,
    HalfPageDown,
    PageUp,
    PageDown,
    Top,
    Bottom,
    Quit,
}

#[derive(Hash, Eq, PartialEq, Debug, Clone, Copy)]
struct Key {
    code: KeyCode,
    modifiers: KeyModifiers,
}

impl Key {
    fn plain(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: KeyModifiers::NONE,
        }
    }

    fn ctrl(c: char) -> Self {
        Self {
            code: KeyCode::Char(c),
            modifiers: KeyModifiers::CONTROL,
        }
    }
}

pub struct Keymap {
    map: HashMap<Key, Action>,
}

impl Keymap {
    pub fn new() -> Self {
        use Action as A;
        use KeyCode as K;

        let mut map = HashMap::new();

        macro_rules! bind {
            ($action:expr, $($key:expr),+ $(,)?) => {
                $( map.insert($key, $action); )+
            };
        }

        bind!(A::ScrollUp,     Key::plain(K::Char('k')), Key::plain(K::Up));
        bind!(A::ScrollDown,   Key::plain(K::Char('j')), Key::plain(K::Down), Key::plain(K::Enter));
        bind!(A::HalfPageUp,   Key::ctrl('u'));
        bind!(A::HalfPageDown, Key::ctrl('d'));
        bind!(A::PageUp,       Key::plain(K::PageUp), Key::plain(K::Char('b')));
        bind!(A::PageDown,     Key::plain(K::PageDown), Key::plain(K::Char(' ')));
        bind!(A::Top,          Key::plain(K::Char('g')), Key::plain(K::Home));
        bind!(A::Bottom,       Key::plain(K::Char('G')), Key::plain(K::End));
        bind!(A::Quit,         Key::plain(K::Char('q')), Key::plain(K::Esc), Key::ctrl('c'));

        Keymap { map }
    }

    /// Looks up the action for a given key event
    pub fn lookup(&self, key: KeyEvent) -> Option<Action> {
        let k = Key {
            code: key.code,
            modifiers: key.modifiers,
        };

        if let Some(action) = self.map.get(&k).copied() {
            return Some(action);
        }

        // Terminals report `G` with or without SHIFT.
        if matches!(key.code, KeyCode::Char(_)) && key.modifiers.contains(KeyModifiers::SHIFT) {
            let k2 = Key {
                code: key.code,
                modifiers: key.modifiers - KeyModifiers::SHIFT,
            };
            return self.map.get(&k2).copied();
        }
        None
    }
}

impl Default for Keymap {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shifted_letters_match_unshifted_bindings() {
        let keymap = Keymap::new();
        let shifted_g = KeyEvent::new(KeyCode::Char('G'), KeyModifiers::SHIFT);
        assert_eq!(keymap.lookup(shifted_g), Some(Action::Bottom));

        let plain_g = KeyEvent::new(KeyCode::Char('g'), KeyModifiers::NONE);
        assert_eq!(keymap.lookup(plain_g), Some(Action::Top));
    }

    #[test]
    fn control_bindings_need_the_modifier() {
        let keymap = Keymap::new();
        let ctrl_d = KeyEvent::new(KeyCode::Char('d'), KeyModifiers::CONTROL);
        assert_eq!(keymap.lookup(ctrl_d), Some(Action::HalfPageDown));

        let plain_d = KeyEvent::new(KeyCode::Char('d'), KeyModifiers::NONE);
        assert_eq!(keymap.lookup(plain_d), None);
    }
}
