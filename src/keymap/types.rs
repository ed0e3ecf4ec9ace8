//! Core types for the keymap system: KeyCombo, Modifiers, KeyCode

use std::fmt;
use std::str::FromStr;

/// Modifier keys as a bitfield for efficient storage and comparison
///
/// Shift is not a flag: it is carried by the character itself
/// (`J` vs `j`), the way Helix key-specs spell it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Modifiers(u8);

impl Modifiers {
    pub const NONE: Modifiers = Modifiers(0);
    pub const CONTROL: Modifiers = Modifiers(0b001);
    pub const META: Modifiers = Modifiers(0b010);
    pub const ALT: Modifiers = Modifiers(0b100);

    /// Create modifiers from individual flags
    pub const fn new(control: bool, meta: bool, alt: bool) -> Self {
        let mut bits = 0u8;
        if control {
            bits |= 0b001;
        }
        if meta {
            bits |= 0b010;
        }
        if alt {
            bits |= 0b100;
        }
        Modifiers(bits)
    }

    /// Check if control is held
    #[inline]
    pub const fn control(self) -> bool {
        self.0 & 0b001 != 0
    }

    /// Check if meta (cmd/win) is held
    #[inline]
    pub const fn meta(self) -> bool {
        self.0 & 0b010 != 0
    }

    /// Check if alt/option is held
    #[inline]
    pub const fn alt(self) -> bool {
        self.0 & 0b100 != 0
    }

    /// Check if no modifiers are held
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Combine two modifier sets
    #[inline]
    pub const fn union(self, other: Modifiers) -> Modifiers {
        Modifiers(self.0 | other.0)
    }

    /// Remove every modifier in `other`
    #[inline]
    pub const fn difference(self, other: Modifiers) -> Modifiers {
        Modifiers(self.0 & !other.0)
    }

    /// Check if this contains all modifiers in other
    #[inline]
    pub const fn contains(self, other: Modifiers) -> bool {
        (self.0 & other.0) == other.0
    }
}

impl std::ops::BitOr for Modifiers {
    type Output = Modifiers;

    fn bitor(self, rhs: Self) -> Self::Output {
        self.union(rhs)
    }
}

impl fmt::Display for Modifiers {
    /// Key-spec prefixes in canonical order: `C-`, `M-`, `A-`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.control() {
            f.write_str("C-")?;
        }
        if self.meta() {
            f.write_str("M-")?;
        }
        if self.alt() {
            f.write_str("A-")?;
        }
        Ok(())
    }
}

/// A physical modifier key, for hosts that report modifiers as separate
/// press/release events
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ModifierKey {
    Control,
    Meta,
    Alt,
    Shift,
}

impl ModifierKey {
    /// The flag this key contributes to a chord (shift contributes none)
    pub const fn flag(self) -> Modifiers {
        match self {
            ModifierKey::Control => Modifiers::CONTROL,
            ModifierKey::Meta => Modifiers::META,
            ModifierKey::Alt => Modifiers::ALT,
            ModifierKey::Shift => Modifiers::NONE,
        }
    }
}

/// A key code representing a printable character or a logical key
///
/// Logical keys are their own variants, so they can never collide with a
/// literal character.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum KeyCode {
    /// A character key, case preserved
    Char(char),

    // Named keys
    Escape,
    Enter,
    Space,
    Tab,
    Backspace,
    Delete,

    // Arrow keys
    Up,
    Down,
    Left,
    Right,

    // Navigation
    Home,
    End,
    PageUp,
    PageDown,
    Insert,

    // Function keys
    F(u8), // F1-F12

    /// A bare modifier press; never part of a chord
    Modifier(ModifierKey),
}

impl KeyCode {
    /// Resolve a reserved key name (already lowercased) to its logical key
    pub fn from_name(name: &str) -> Option<KeyCode> {
        let code = match name {
            "escape" | "esc" => KeyCode::Escape,
            "enter" | "ret" | "return" => KeyCode::Enter,
            "space" => KeyCode::Space,
            "tab" => KeyCode::Tab,
            "backspace" => KeyCode::Backspace,
            "delete" | "del" => KeyCode::Delete,
            "up" => KeyCode::Up,
            "down" => KeyCode::Down,
            "left" => KeyCode::Left,
            "right" => KeyCode::Right,
            "home" => KeyCode::Home,
            "end" => KeyCode::End,
            "pageup" => KeyCode::PageUp,
            "pagedown" => KeyCode::PageDown,
            "insert" | "ins" => KeyCode::Insert,
            "minus" => KeyCode::Char('-'),
            _ => {
                let n: u8 = name.strip_prefix('f')?.parse().ok()?;
                if (1..=12).contains(&n) {
                    KeyCode::F(n)
                } else {
                    return None;
                }
            }
        };
        Some(code)
    }

    /// Check if this is an ASCII digit character
    pub fn digit(self) -> Option<char> {
        match self {
            KeyCode::Char(c) if c.is_ascii_digit() => Some(c),
            _ => None,
        }
    }
}

impl fmt::Display for KeyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // Collapsed control codes render as the letter they came from
            KeyCode::Char(c @ '\u{1}'..='\u{1a}') => {
                write!(f, "{}", char::from(*c as u8 + 0x60))
            }
            KeyCode::Char(c) => write!(f, "{}", c),
            KeyCode::Escape => f.write_str("escape"),
            KeyCode::Enter => f.write_str("enter"),
            KeyCode::Space => f.write_str("space"),
            KeyCode::Tab => f.write_str("tab"),
            KeyCode::Backspace => f.write_str("backspace"),
            KeyCode::Delete => f.write_str("delete"),
            KeyCode::Up => f.write_str("up"),
            KeyCode::Down => f.write_str("down"),
            KeyCode::Left => f.write_str("left"),
            KeyCode::Right => f.write_str("right"),
            KeyCode::Home => f.write_str("home"),
            KeyCode::End => f.write_str("end"),
            KeyCode::PageUp => f.write_str("pageup"),
            KeyCode::PageDown => f.write_str("pagedown"),
            KeyCode::Insert => f.write_str("insert"),
            KeyCode::F(n) => write!(f, "f{}", n),
            KeyCode::Modifier(m) => write!(f, "{:?}", m),
        }
    }
}

/// A single normalized keystroke: a key with control/meta/alt flags
///
/// Always build through [`KeyCombo::new`], which applies the canonical form:
/// control + ASCII letter collapses to the terminal control code, and raw
/// whitespace/control characters without control map to their named keys.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct KeyCombo {
    pub code: KeyCode,
    pub mods: Modifiers,
}

impl KeyCombo {
    /// Create a normalized combo
    pub fn new(code: KeyCode, mods: Modifiers) -> Self {
        Self {
            code: normalize(code, mods),
            mods,
        }
    }

    /// Create a combo with no modifiers
    pub fn key(code: KeyCode) -> Self {
        Self::new(code, Modifiers::NONE)
    }

    /// Create a combo for a plain character
    pub fn char(c: char) -> Self {
        Self::new(KeyCode::Char(c), Modifiers::NONE)
    }

    /// Create a combo for control + character
    pub fn ctrl(c: char) -> Self {
        Self::new(KeyCode::Char(c), Modifiers::CONTROL)
    }
}

fn normalize(code: KeyCode, mods: Modifiers) -> KeyCode {
    let KeyCode::Char(c) = code else {
        return code;
    };

    if mods.control() {
        if c.is_ascii_alphabetic() {
            return KeyCode::Char(char::from(c.to_ascii_lowercase() as u8 - 0x60));
        }
        // Already a control code: C-h must stay distinct from backspace
        if ('\u{1}'..='\u{1a}').contains(&c) {
            return code;
        }
    }

    match c {
        ' ' => KeyCode::Space,
        '\t' => KeyCode::Tab,
        '\n' | '\r' => KeyCode::Enter,
        '\u{1b}' => KeyCode::Escape,
        '\u{8}' => KeyCode::Backspace,
        '\u{7f}' => KeyCode::Delete,
        _ => code,
    }
}

impl fmt::Display for KeyCombo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.mods, self.code)
    }
}

/// Why a key-spec string could not be turned into a [`KeyCombo`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidKeySpec(pub String);

impl fmt::Display for InvalidKeySpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid key: {:?}", self.0)
    }
}

impl std::error::Error for InvalidKeySpec {}

impl FromStr for KeyCombo {
    type Err = InvalidKeySpec;

    /// Parse a key-spec like `C-M-x`, `A-left` or `space`
    ///
    /// Modifier prefixes may repeat and come in any order. A prefix is only
    /// stripped while something follows it, so `C--` is control + `-`.
    fn from_str(spec: &str) -> Result<Self, Self::Err> {
        let mut mods = Modifiers::NONE;
        let mut rest = spec;

        loop {
            let flag = if rest.starts_with("C-") {
                Modifiers::CONTROL
            } else if rest.starts_with("M-") {
                Modifiers::META
            } else if rest.starts_with("A-") {
                Modifiers::ALT
            } else {
                break;
            };
            if rest.len() <= 2 {
                break;
            }
            mods = mods | flag;
            rest = &rest[2..];
        }

        let mut chars = rest.chars();
        let code = match (chars.next(), chars.next()) {
            (Some(c), None) => KeyCode::Char(c),
            (Some(_), Some(_)) => KeyCode::from_name(&rest.to_lowercase())
                .ok_or_else(|| InvalidKeySpec(spec.to_string()))?,
            (None, _) => return Err(InvalidKeySpec(spec.to_string())),
        };

        Ok(KeyCombo::new(code, mods))
    }
}
