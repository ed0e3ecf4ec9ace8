//! Adapter to convert winit key events to dispatcher [`KeyEvent`]s

use winit::keyboard::{Key, KeyCode as WinitKeyCode, ModifiersState, NamedKey, PhysicalKey};

use super::dispatcher::KeyEvent;
use super::types::{KeyCode, ModifierKey, Modifiers};

/// Convert winit key event data to a dispatcher key event
///
/// Ctrl, Super and Alt become control, meta and alt. Shift is not a flag:
/// it is already folded into the logical character (`J` vs `j`). Bare
/// modifier presses map to [`KeyCode::Modifier`] so the dispatcher can track
/// held keys. Returns None for keys with no meaning to a keymap.
pub fn key_event_from_winit(
    logical_key: &Key,
    physical_key: PhysicalKey,
    state: ModifiersState,
) -> Option<KeyEvent> {
    let mods = Modifiers::new(state.control_key(), state.super_key(), state.alt_key());

    // Numpad digits count the same as the top row
    if let Some(digit) = numpad_digit(physical_key) {
        return Some(KeyEvent::new(KeyCode::Char(digit), mods));
    }

    let code = match logical_key {
        Key::Named(named) => match named {
            NamedKey::Enter => KeyCode::Enter,
            NamedKey::Escape => KeyCode::Escape,
            NamedKey::Tab => KeyCode::Tab,
            NamedKey::Backspace => KeyCode::Backspace,
            NamedKey::Delete => KeyCode::Delete,
            NamedKey::Space => KeyCode::Space,

            // Arrows
            NamedKey::ArrowUp => KeyCode::Up,
            NamedKey::ArrowDown => KeyCode::Down,
            NamedKey::ArrowLeft => KeyCode::Left,
            NamedKey::ArrowRight => KeyCode::Right,

            // Navigation
            NamedKey::Home => KeyCode::Home,
            NamedKey::End => KeyCode::End,
            NamedKey::PageUp => KeyCode::PageUp,
            NamedKey::PageDown => KeyCode::PageDown,
            NamedKey::Insert => KeyCode::Insert,

            // Function keys
            NamedKey::F1 => KeyCode::F(1),
            NamedKey::F2 => KeyCode::F(2),
            NamedKey::F3 => KeyCode::F(3),
            NamedKey::F4 => KeyCode::F(4),
            NamedKey::F5 => KeyCode::F(5),
            NamedKey::F6 => KeyCode::F(6),
            NamedKey::F7 => KeyCode::F(7),
            NamedKey::F8 => KeyCode::F(8),
            NamedKey::F9 => KeyCode::F(9),
            NamedKey::F10 => KeyCode::F(10),
            NamedKey::F11 => KeyCode::F(11),
            NamedKey::F12 => KeyCode::F(12),

            // Modifiers on their own
            NamedKey::Control => KeyCode::Modifier(ModifierKey::Control),
            NamedKey::Alt => KeyCode::Modifier(ModifierKey::Alt),
            NamedKey::Super | NamedKey::Meta => KeyCode::Modifier(ModifierKey::Meta),
            NamedKey::Shift => KeyCode::Modifier(ModifierKey::Shift),

            _ => return None,
        },

        // Character keys keep their case
        Key::Character(s) => {
            let mut chars = s.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => KeyCode::Char(c),
                _ => return None,
            }
        }

        _ => return None,
    };

    Some(KeyEvent::new(code, mods))
}

fn numpad_digit(physical_key: PhysicalKey) -> Option<char> {
    let PhysicalKey::Code(code) = physical_key else {
        return None;
    };
    let digit = match code {
        WinitKeyCode::Numpad0 => '0',
        WinitKeyCode::Numpad1 => '1',
        WinitKeyCode::Numpad2 => '2',
        WinitKeyCode::Numpad3 => '3',
        WinitKeyCode::Numpad4 => '4',
        WinitKeyCode::Numpad5 => '5',
        WinitKeyCode::Numpad6 => '6',
        WinitKeyCode::Numpad7 => '7',
        WinitKeyCode::Numpad8 => '8',
        WinitKeyCode::Numpad9 => '9',
        _ => return None,
    };
    Some(digit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keymap::types::KeyCombo;
    use winit::keyboard::NativeKey;

    #[test]
    fn test_character_key_with_control() {
        let event = key_event_from_winit(
            &Key::Character("s".into()),
            PhysicalKey::Code(WinitKeyCode::KeyS),
            ModifiersState::CONTROL,
        )
        .expect("should map");

        assert_eq!(event.code, KeyCode::Char('s'));
        assert!(event.mods.control());
        assert_eq!(KeyCombo::new(event.code, event.mods), KeyCombo::ctrl('s'));
    }

    #[test]
    fn test_shifted_character_keeps_case() {
        let event = key_event_from_winit(
            &Key::Character("J".into()),
            PhysicalKey::Code(WinitKeyCode::KeyJ),
            ModifiersState::SHIFT,
        )
        .expect("should map");

        assert_eq!(event.code, KeyCode::Char('J'));
        assert!(event.mods.is_empty());
    }

    #[test]
    fn test_super_is_meta_and_alt_is_alt() {
        let event = key_event_from_winit(
            &Key::Named(NamedKey::ArrowLeft),
            PhysicalKey::Code(WinitKeyCode::ArrowLeft),
            ModifiersState::SUPER | ModifiersState::ALT,
        )
        .expect("should map");

        assert_eq!(event.code, KeyCode::Left);
        assert!(event.mods.meta());
        assert!(event.mods.alt());
        assert!(!event.mods.control());
    }

    #[test]
    fn test_bare_modifier_keys() {
        let event = key_event_from_winit(
            &Key::Named(NamedKey::Control),
            PhysicalKey::Code(WinitKeyCode::ControlLeft),
            ModifiersState::CONTROL,
        )
        .expect("should map");

        assert_eq!(event.code, KeyCode::Modifier(ModifierKey::Control));
    }

    #[test]
    fn test_numpad_digit_is_plain_digit() {
        let event = key_event_from_winit(
            &Key::Unidentified(NativeKey::Unidentified),
            PhysicalKey::Code(WinitKeyCode::Numpad7),
            ModifiersState::empty(),
        )
        .expect("should map");

        assert_eq!(event.code, KeyCode::Char('7'));
    }

    #[test]
    fn test_function_keys() {
        let keys = [
            NamedKey::F1,
            NamedKey::F2,
            NamedKey::F3,
            NamedKey::F4,
            NamedKey::F5,
            NamedKey::F6,
            NamedKey::F7,
            NamedKey::F8,
            NamedKey::F9,
            NamedKey::F10,
            NamedKey::F11,
            NamedKey::F12,
        ];
        for (n, named) in (1..=12).zip(keys) {
            let event = key_event_from_winit(
                &Key::Named(named),
                PhysicalKey::Code(WinitKeyCode::F1),
                ModifiersState::empty(),
            )
            .expect("should map");
            assert_eq!(event.code, KeyCode::F(n));
        }
    }

    #[test]
    fn test_unmapped_keys() {
        assert!(key_event_from_winit(
            &Key::Named(NamedKey::F24),
            PhysicalKey::Code(WinitKeyCode::F24),
            ModifiersState::empty(),
        )
        .is_none());
        assert!(key_event_from_winit(
            &Key::Dead(None),
            PhysicalKey::Code(WinitKeyCode::Quote),
            ModifiersState::empty(),
        )
        .is_none());
    }
}
