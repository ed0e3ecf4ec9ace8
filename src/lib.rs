//! helix-keys - modal, Helix-style key-chord dispatch
//!
//! This crate provides the keymap engine a host editor needs for Normal,
//! Insert and Select modes: declarative binding trees, chord sequences with
//! sub-menus, numeric repeat counts and an observable mode. The host supplies
//! the actual editing operations through a [`keymap::CommandRegistry`].

pub mod cli;
pub mod config_paths;
pub mod keymap;
pub mod settings;
pub mod tracing;

// Re-export commonly used types
pub use keymap::{Command, Dispatcher, KeyAction, KeyCombo, Mode, ModeBindingSet};
pub use settings::EngineSettings;
