//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use helix_keys::keymap::{
    parse_keymap_toml, parse_keymap_yaml, Command, CommandRegistry, DispatchOptions, Dispatcher,
    KeyAction, KeyCombo, Mode, ModeBindingSet, OverlayState,
};

/// Host that records every command it is asked to run
#[derive(Debug, Default)]
pub struct RecordingHost {
    pub ran: Vec<Command>,
}

pub type TestDispatcher = Dispatcher<RecordingHost, OverlayState>;

/// Registry with every command bound to a recorder
pub fn recording_registry() -> CommandRegistry<RecordingHost> {
    let mut registry = CommandRegistry::new();
    for &command in Command::ALL {
        registry.bind(command, move |host: &mut RecordingHost| host.ran.push(command));
    }
    registry
}

pub fn toml_bindings(toml: &str) -> ModeBindingSet {
    parse_keymap_toml(toml).expect("valid toml").bindings
}

pub fn json_like_bindings(yaml: &str) -> ModeBindingSet {
    // JSON is valid YAML
    parse_keymap_yaml(yaml).expect("valid yaml").bindings
}

pub fn dispatcher(bindings: ModeBindingSet) -> TestDispatcher {
    Dispatcher::new(bindings, recording_registry(), OverlayState::default())
}

pub fn dispatcher_with(bindings: ModeBindingSet, options: DispatchOptions) -> TestDispatcher {
    dispatcher(bindings).with_options(options)
}

/// Press each space-separated key-spec, returning the actions
pub fn press(d: &mut TestDispatcher, host: &mut RecordingHost, keys: &str) -> Vec<KeyAction> {
    keys.split_whitespace()
        .map(|spec| {
            let combo: KeyCombo = spec.parse().expect("valid key spec");
            d.key_down(host, combo.into())
        })
        .collect()
}

/// Record every mode change the dispatcher announces
pub fn watch_modes(d: &mut TestDispatcher) -> Rc<RefCell<Vec<Mode>>> {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    d.subscribe(move |mode| sink.borrow_mut().push(mode));
    seen
}

pub const GOTO_MENU: &str = r#"{"keys":{"normal":{"g":{"g":"goto_file_start"}}}}"#;

pub const SAMPLE_TOML: &str = r#"
[keys.normal]
j = "move_line_down"
k = "move_line_up"
i = "insert_mode"
v = "select_mode"
0 = "goto_line_start"

[keys.normal.g]
g = "goto_file_start"
e = "goto_last_line"

[keys.normal.space.w]
v = "vsplit"

[keys.insert]
esc = "normal_mode"
C-w = "delete_word_backward"

[keys.select]
j = "extend_line_down"
esc = "exit_select_mode"
"#;
