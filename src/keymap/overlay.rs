//! Overlay boundary: what the dispatcher tells a which-key style popup
//!
//! Rendering is the host's business. The dispatcher only emits the entries
//! of the sub-menu it just entered, and a hide signal when it leaves one.

use super::binding::{Binding, BindingNode};
use super::command::Command;

/// What a single overlay row points at
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OverlayTarget {
    Command(Command),
    /// Another sub-menu with this many entries
    Menu(usize),
}

/// One row of the overlay: the formatted combo and its target
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverlayEntry {
    pub key: String,
    pub target: OverlayTarget,
}

impl OverlayEntry {
    /// Right-hand label: the command name, or `+menu` for a nested level
    pub fn label(&self) -> String {
        match &self.target {
            OverlayTarget::Command(command) => command.name().to_string(),
            OverlayTarget::Menu(_) => "+menu".to_string(),
        }
    }
}

/// Snapshot a node's children for display, in config order
pub fn overlay_entries(node: &BindingNode) -> Vec<OverlayEntry> {
    node.entries()
        .map(|(combo, binding)| OverlayEntry {
            key: combo.to_string(),
            target: match binding {
                Binding::Leaf(command) => OverlayTarget::Command(*command),
                Binding::Node(sub) => OverlayTarget::Menu(sub.len()),
            },
        })
        .collect()
}

/// Receiver for sub-menu display updates
pub trait Overlay {
    /// A sub-menu was entered; these are its bindings
    fn show(&mut self, entries: &[OverlayEntry]);
    /// The sequence resolved or was abandoned
    fn hide(&mut self);
}

/// Overlay that ignores everything, for hosts without a popup
#[derive(Debug, Default, Clone, Copy)]
pub struct NoOverlay;

impl Overlay for NoOverlay {
    fn show(&mut self, _entries: &[OverlayEntry]) {}
    fn hide(&mut self) {}
}

/// Overlay that keeps the last shown entries, for tests and text frontends
#[derive(Debug, Default, Clone)]
pub struct OverlayState {
    pub visible: Option<Vec<OverlayEntry>>,
    pub show_count: usize,
    pub hide_count: usize,
}

impl Overlay for OverlayState {
    fn show(&mut self, entries: &[OverlayEntry]) {
        self.visible = Some(entries.to_vec());
        self.show_count += 1;
    }

    fn hide(&mut self) {
        self.visible = None;
        self.hide_count += 1;
    }
}
