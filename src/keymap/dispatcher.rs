//! Chord dispatcher: the modal state machine between raw keys and commands
//!
//! The dispatcher owns everything a key event can touch: the loaded binding
//! trees, the mode cell, the path into the current sub-menu, the numeric
//! repeat prefix, the held modifiers and the overlay. Every transition
//! happens inside one `&mut self` call, so there is no way to observe a
//! half-updated state.

use std::fmt;
use std::ops::{Deref, DerefMut};

use super::binding::{format_sequence, Binding, BindingNode, ModeBindingSet};
use super::command::Command;
use super::mode::{Mode, ModeState};
use super::overlay::{overlay_entries, NoOverlay, Overlay, OverlayEntry};
use super::registry::{CommandRegistry, Invocation};
use super::types::{KeyCode, KeyCombo, Modifiers};

/// A key press or release as delivered by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub code: KeyCode,
    pub mods: Modifiers,
}

impl KeyEvent {
    pub fn new(code: KeyCode, mods: Modifiers) -> Self {
        Self { code, mods }
    }

    pub fn char(c: char) -> Self {
        Self::new(KeyCode::Char(c), Modifiers::NONE)
    }
}

impl From<KeyCombo> for KeyEvent {
    fn from(combo: KeyCombo) -> Self {
        Self::new(combo.code, combo.mods)
    }
}

/// Result of handling a key-down
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// A command ran (or was an unbound no-op) `count` times
    Execute { command: Command, count: usize },
    /// Entered a sub-menu, waiting for the next chord
    AwaitMore,
    /// A digit was added to the repeat prefix, which now reads this value
    Count(usize),
    /// Nothing bound; the dispatcher is back at the mode root
    NoMatch,
    /// A bare modifier press; state untouched
    Ignored,
}

impl KeyAction {
    /// Whether the host should stop processing this key
    pub fn is_consumed(&self) -> bool {
        matches!(
            self,
            KeyAction::Execute { .. } | KeyAction::AwaitMore | KeyAction::Count(_)
        )
    }
}

impl fmt::Display for KeyAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyAction::Execute { command, count: 1 } => write!(f, "execute {}", command),
            KeyAction::Execute { command, count } => write!(f, "execute {} x{}", command, count),
            KeyAction::AwaitMore => f.write_str("await more"),
            KeyAction::Count(n) => write!(f, "count {}", n),
            KeyAction::NoMatch => f.write_str("no match"),
            KeyAction::Ignored => f.write_str("ignored"),
        }
    }
}

/// Tunables for count handling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchOptions {
    /// Accept digits as a repeat prefix inside a sub-menu too
    pub repeat_in_submenu: bool,
    /// Accept a repeat prefix in Select mode
    pub count_in_select: bool,
    /// Upper bound for a repeat count
    pub max_repeat: usize,
}

impl Default for DispatchOptions {
    fn default() -> Self {
        Self {
            repeat_in_submenu: false,
            count_in_select: false,
            max_repeat: 10_000,
        }
    }
}

enum Step {
    Run(Command),
    Descend(Vec<OverlayEntry>),
    Miss,
}

/// Modal key-chord dispatcher for a host of type `H`
pub struct Dispatcher<H, O = NoOverlay> {
    bindings: ModeBindingSet,
    modes: ModeState,
    registry: CommandRegistry<H>,
    overlay: O,
    options: DispatchOptions,

    /// Path from the current mode's root to the active node
    pending: Vec<KeyCombo>,
    /// Digits typed so far as a repeat prefix
    pending_count: String,
    /// Modifiers reported as separate key presses and not yet released
    held: Modifiers,
    /// Mode change count the pending state belongs to
    seen_changes: u64,
    /// Last key-down combo and whether it was consumed, for key-typed
    last_key: Option<(KeyCombo, bool)>,
    overlay_visible: bool,
}

impl<H, O: Overlay> Dispatcher<H, O> {
    pub fn new(bindings: ModeBindingSet, registry: CommandRegistry<H>, overlay: O) -> Self {
        let modes = ModeState::default();
        let seen_changes = modes.changes();
        Self {
            bindings,
            modes,
            registry,
            overlay,
            options: DispatchOptions::default(),
            pending: Vec::new(),
            pending_count: String::new(),
            held: Modifiers::NONE,
            seen_changes,
            last_key: None,
            overlay_visible: false,
        }
    }

    pub fn with_options(mut self, options: DispatchOptions) -> Self {
        self.options = options;
        self
    }

    /// Start in `mode` without notifying observers
    pub fn with_initial_mode(mut self, mode: Mode) -> Self {
        self.modes = ModeState::new(mode);
        self.seen_changes = self.modes.changes();
        self
    }

    #[inline]
    pub fn mode(&self) -> Mode {
        self.modes.current()
    }

    /// Force a mode, abandoning any pending sequence
    pub fn set_mode(&mut self, mode: Mode) {
        self.modes.set(mode);
        self.reset();
    }

    /// Mode cell, for subscribing observers or setting the mode from outside
    ///
    /// Any change made through the guard resets the pending sequence and
    /// hides the overlay when the guard drops.
    pub fn modes_mut(&mut self) -> ModeGuard<'_, H, O> {
        ModeGuard { dispatcher: self }
    }

    pub fn subscribe(&mut self, observer: impl FnMut(Mode) + 'static) {
        self.modes.subscribe(observer);
    }

    pub fn bindings(&self) -> &ModeBindingSet {
        &self.bindings
    }

    /// Swap in a freshly loaded binding set
    pub fn set_bindings(&mut self, bindings: ModeBindingSet) {
        self.bindings = bindings;
        self.reset();
    }

    pub fn registry_mut(&mut self) -> &mut CommandRegistry<H> {
        &mut self.registry
    }

    pub fn overlay(&self) -> &O {
        &self.overlay
    }

    pub fn options(&self) -> DispatchOptions {
        self.options
    }

    pub fn held(&self) -> Modifiers {
        self.held
    }

    /// Combos entered so far in the current sub-menu
    pub fn pending(&self) -> &[KeyCombo] {
        &self.pending
    }

    pub fn is_pending(&self) -> bool {
        !self.pending.is_empty() || !self.pending_count.is_empty()
    }

    /// The repeat prefix typed so far, if any
    pub fn pending_count(&self) -> Option<usize> {
        if self.pending_count.is_empty() {
            None
        } else {
            Some(self.parse_count())
        }
    }

    /// Pending prefix and chords for a status bar, e.g. `3 g`
    pub fn pending_display(&self) -> Option<String> {
        if !self.is_pending() {
            return None;
        }
        let mut parts: Vec<String> = Vec::with_capacity(self.pending.len() + 1);
        if !self.pending_count.is_empty() {
            parts.push(self.pending_count.clone());
        }
        parts.extend(self.pending.iter().map(|combo| combo.to_string()));
        Some(parts.join(" "))
    }

    /// Node the next chord is looked up in; `None` when the mode has no tree
    ///
    /// After a mode change the pending path no longer applies, so this is the
    /// new mode's root.
    pub fn active_node(&self) -> Option<&BindingNode> {
        let root = self.bindings.root(self.modes.current())?;
        if self.mode_changed() {
            Some(root)
        } else {
            root.descend(&self.pending)
        }
    }

    /// Abandon any pending sequence and return to the mode root
    pub fn reset(&mut self) {
        self.pending.clear();
        self.pending_count.clear();
        self.seen_changes = self.modes.changes();
        self.last_key = None;
        if self.overlay_visible {
            self.overlay.hide();
            self.overlay_visible = false;
        }
    }

    /// Handle a key press
    pub fn key_down(&mut self, host: &mut H, event: KeyEvent) -> KeyAction {
        self.sync_mode();

        if let KeyCode::Modifier(key) = event.code {
            self.held = self.held | key.flag();
            return KeyAction::Ignored;
        }

        let combo = KeyCombo::new(event.code, event.mods | self.held);

        if let Some(digit) = self.count_digit(&combo) {
            self.pending_count.push(digit);
            self.last_key = Some((combo, true));
            let count = self.parse_count();
            tracing::debug!(count, "repeat count");
            return KeyAction::Count(count);
        }

        let step = match self.active_node().and_then(|node| node.get(&combo)) {
            Some(Binding::Leaf(command)) => Step::Run(*command),
            Some(Binding::Node(node)) => Step::Descend(overlay_entries(node)),
            None => Step::Miss,
        };

        let action = match step {
            Step::Run(command) => self.execute(host, command),
            Step::Descend(entries) => {
                self.pending.push(combo);
                tracing::debug!(
                    mode = %self.modes.current(),
                    pending = %format_sequence(&self.pending),
                    "sub-menu"
                );
                self.overlay.show(&entries);
                self.overlay_visible = true;
                KeyAction::AwaitMore
            }
            Step::Miss => {
                tracing::debug!(mode = %self.modes.current(), key = %combo, "no binding");
                self.reset();
                KeyAction::NoMatch
            }
        };

        self.last_key = Some((combo, action.is_consumed()));
        action
    }

    /// Whether a typed character belongs to the engine rather than the text
    ///
    /// Answers for the key-down that produced the character when there was
    /// one; otherwise checks the active node. Never changes state.
    pub fn key_typed(&self, c: char, mods: Modifiers) -> bool {
        let combo = KeyCombo::new(KeyCode::Char(c), mods | self.held);
        match self.last_key {
            Some((last, consumed)) if last == combo && !self.mode_changed() => consumed,
            _ => self
                .active_node()
                .is_some_and(|node| node.contains(&combo)),
        }
    }

    /// Handle a key release; only modifier releases matter
    pub fn key_up(&mut self, event: KeyEvent) {
        if let KeyCode::Modifier(key) = event.code {
            self.held = self.held.difference(key.flag());
        }
    }

    fn execute(&mut self, host: &mut H, command: Command) -> KeyAction {
        let count = if command.is_repeatable() {
            self.take_count()
        } else {
            1
        };

        if let Invocation::Executed(n) = self.registry.invoke(host, command, count) {
            tracing::debug!(command = %command, count = n, "executed");
        }

        if let Some(mode) = command.mode_transition() {
            self.modes.set(mode);
        }
        self.reset();

        KeyAction::Execute { command, count }
    }

    /// The digit to append to the repeat prefix, if this combo is one
    fn count_digit(&self, combo: &KeyCombo) -> Option<char> {
        let digit = combo.code.digit()?;
        if !combo.mods.is_empty() {
            return None;
        }
        // Leading zero stays bindable
        if digit == '0' && self.pending_count.is_empty() {
            return None;
        }
        if !self.pending.is_empty() && !self.options.repeat_in_submenu {
            return None;
        }
        let allowed = match self.modes.current() {
            Mode::Normal => true,
            Mode::Select => self.options.count_in_select,
            Mode::Insert => false,
        };
        allowed.then_some(digit)
    }

    fn parse_count(&self) -> usize {
        self.pending_count
            .parse::<usize>()
            .unwrap_or(usize::MAX)
            .clamp(1, self.options.max_repeat.max(1))
    }

    fn take_count(&mut self) -> usize {
        let count = if self.pending_count.is_empty() {
            1
        } else {
            self.parse_count()
        };
        self.pending_count.clear();
        count
    }

    fn mode_changed(&self) -> bool {
        self.modes.changes() != self.seen_changes
    }

    fn sync_mode(&mut self) {
        if self.mode_changed() {
            tracing::debug!(mode = %self.modes.current(), "mode changed outside dispatcher");
            self.reset();
        }
    }
}

/// Mutable access to a dispatcher's [`ModeState`]
///
/// Dropping the guard resets the dispatcher if the mode changed meanwhile.
pub struct ModeGuard<'a, H, O: Overlay> {
    dispatcher: &'a mut Dispatcher<H, O>,
}

impl<H, O: Overlay> Deref for ModeGuard<'_, H, O> {
    type Target = ModeState;

    fn deref(&self) -> &ModeState {
        &self.dispatcher.modes
    }
}

impl<H, O: Overlay> DerefMut for ModeGuard<'_, H, O> {
    fn deref_mut(&mut self) -> &mut ModeState {
        &mut self.dispatcher.modes
    }
}

impl<H, O: Overlay> Drop for ModeGuard<'_, H, O> {
    fn drop(&mut self) {
        self.dispatcher.sync_mode();
    }
}

impl<H, O> fmt::Debug for Dispatcher<H, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("mode", &self.modes.current())
            .field("pending", &self.pending)
            .field("pending_count", &self.pending_count)
            .field("held", &self.held)
            .finish()
    }
}
