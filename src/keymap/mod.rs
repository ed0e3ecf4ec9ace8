//! Modal, Helix-style keyboard dispatch
//!
//! This module provides a data-driven modal keymap that:
//! - Loads one binding tree per mode from a TOML or YAML document
//! - Resolves multi-key chord sequences through nested sub-menus
//! - Accumulates numeric repeat prefixes
//! - Tracks the active mode and notifies observers when it changes
//!
//! # Architecture
//!
//! ```text
//! winit key data → KeyEvent → Dispatcher::key_down() → BindingNode walk
//!                                   ↓                          ↓
//!                             CommandRegistry::invoke    Overlay::show
//! ```
//!
//! # Loading Keymaps
//!
//! ```ignore
//! let report = load_keymap(keymap_file().as_deref(), settings.inherit_defaults);
//! let mut dispatcher = Dispatcher::new(report.bindings, registry, NoOverlay)
//!     .with_options(settings.dispatch_options());
//! ```

mod binding;
mod command;
mod config;
mod defaults;
mod dispatcher;
mod mode;
mod overlay;
mod registry;
mod types;
mod winit_adapter;

pub use binding::{format_sequence, Binding, BindingConflict, BindingNode, ModeBindingSet};
pub use command::{Command, UnknownCommand};
pub use config::{
    load_keymap_file, load_or_empty, parse_keymap, parse_keymap_toml, parse_keymap_yaml,
    ConfigFormat, ConfigWarning, KeymapError, LoadReport, WarningKind,
};
pub use defaults::{default_bindings, default_keymap_toml, layer_over_defaults, load_keymap};
pub use dispatcher::{DispatchOptions, Dispatcher, KeyAction, KeyEvent, ModeGuard};
pub use mode::{Mode, ModeObserver, ModeState};
pub use overlay::{overlay_entries, NoOverlay, Overlay, OverlayEntry, OverlayState, OverlayTarget};
pub use registry::{CommandHandler, CommandRegistry, HandlerFn, Invocation};
pub use types::{InvalidKeySpec, KeyCode, KeyCombo, ModifierKey, Modifiers};
pub use winit_adapter::key_event_from_winit;

#[cfg(test)]
mod tests;
