//! Editing modes and the observable mode cell

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Mutually exclusive editing state selecting which binding tree is active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Normal,
    Insert,
    Select,
}

impl Mode {
    pub const ALL: [Mode; 3] = [Mode::Normal, Mode::Insert, Mode::Select];

    /// Lowercase name as used in config section headers
    pub const fn name(self) -> &'static str {
        match self {
            Mode::Normal => "normal",
            Mode::Insert => "insert",
            Mode::Select => "select",
        }
    }

    /// Short label for a status bar
    pub const fn status_label(self) -> &'static str {
        match self {
            Mode::Normal => "NOR",
            Mode::Insert => "INS",
            Mode::Select => "SEL",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Mode {
    type Err = ();

    /// Case-insensitive match against the mode names
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Mode::ALL
            .into_iter()
            .find(|mode| mode.name().eq_ignore_ascii_case(s))
            .ok_or(())
    }
}

/// Callback fired with the new mode after every change
pub type ModeObserver = Box<dyn FnMut(Mode)>;

/// The single active mode plus the observers watching it
pub struct ModeState {
    current: Mode,
    /// Bumped on every actual change, so A -> B -> A is still visible
    changes: u64,
    observers: Vec<ModeObserver>,
}

impl ModeState {
    pub fn new(initial: Mode) -> Self {
        Self {
            current: initial,
            changes: 0,
            observers: Vec::new(),
        }
    }

    #[inline]
    pub fn current(&self) -> Mode {
        self.current
    }

    /// Replace the active mode
    ///
    /// Observers run synchronously, in subscription order, and only when the
    /// mode actually changed. Returns whether it changed.
    pub fn set(&mut self, mode: Mode) -> bool {
        if self.current == mode {
            return false;
        }

        tracing::debug!(from = %self.current, to = %mode, "mode change");
        self.current = mode;
        self.changes += 1;
        for observer in &mut self.observers {
            observer(mode);
        }
        true
    }

    /// Number of mode changes so far
    #[inline]
    pub fn changes(&self) -> u64 {
        self.changes
    }

    /// Register an observer for future mode changes
    pub fn subscribe(&mut self, observer: impl FnMut(Mode) + 'static) {
        self.observers.push(Box::new(observer));
    }
}

impl Default for ModeState {
    fn default() -> Self {
        Self::new(Mode::Normal)
    }
}

impl fmt::Debug for ModeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModeState")
            .field("current", &self.current)
            .field("changes", &self.changes)
            .field("observers", &self.observers.len())
            .finish()
    }
}
