//! Cross-module tests for the keymap system

use super::*;

#[derive(Default)]
struct Editor {
    ran: Vec<Command>,
}

fn recording_registry(commands: &[Command]) -> CommandRegistry<Editor> {
    let mut registry = CommandRegistry::new();
    for &command in commands {
        registry.bind(command, move |editor: &mut Editor| editor.ran.push(command));
    }
    registry
}

fn dispatch_all(
    dispatcher: &mut Dispatcher<Editor, OverlayState>,
    editor: &mut Editor,
    keys: &str,
) -> Vec<KeyAction> {
    keys.split_whitespace()
        .map(|spec| {
            let combo: KeyCombo = spec.parse().expect("valid key spec");
            dispatcher.key_down(editor, combo.into())
        })
        .collect()
}

#[test]
fn test_default_keymap_drives_dispatcher() {
    let registry = recording_registry(&[
        Command::MoveLineDown,
        Command::GotoFileStart,
        Command::Vsplit,
        Command::ExtendLineDown,
    ]);
    let mut dispatcher = Dispatcher::new(default_bindings(), registry, OverlayState::default());
    let mut editor = Editor::default();

    dispatch_all(&mut dispatcher, &mut editor, "j g g C-w v");
    assert_eq!(
        editor.ran,
        vec![Command::MoveLineDown, Command::GotoFileStart, Command::Vsplit]
    );

    // `v` enters select mode, where `j` extends
    dispatch_all(&mut dispatcher, &mut editor, "v j");
    assert_eq!(dispatcher.mode(), Mode::Select);
    assert_eq!(editor.ran.last(), Some(&Command::ExtendLineDown));

    dispatch_all(&mut dispatcher, &mut editor, "esc");
    assert_eq!(dispatcher.mode(), Mode::Normal);
}

#[test]
fn test_every_default_sequence_dispatches() {
    let bindings = default_bindings();
    let mut dispatcher: Dispatcher<Editor, OverlayState> = Dispatcher::new(
        bindings.clone(),
        recording_registry(Command::ALL),
        OverlayState::default(),
    );

    for mode in Mode::ALL {
        let Some(root) = bindings.root(mode) else {
            continue;
        };
        for (sequence, command) in root.sequences() {
            let mut editor = Editor::default();
            dispatcher.set_mode(mode);

            let mut last = KeyAction::NoMatch;
            for combo in &sequence {
                last = dispatcher.key_down(&mut editor, (*combo).into());
            }

            assert_eq!(
                last,
                KeyAction::Execute { command, count: 1 },
                "{} `{}`",
                mode,
                format_sequence(&sequence)
            );
            assert_eq!(editor.ran, vec![command]);
            assert!(dispatcher.pending().is_empty());
        }
    }
}

#[test]
fn test_yaml_and_toml_load_the_same_tree() {
    let toml = parse_keymap_toml(
        r#"
[keys.normal]
j = "move_line_down"
C-d = "page_cursor_half_down"

[keys.normal.space]
f = "file_picker"
"#,
    )
    .unwrap();
    let yaml = parse_keymap_yaml(
        r#"
keys:
  normal:
    j: move_line_down
    C-d: page_cursor_half_down
    space:
      f: file_picker
"#,
    )
    .unwrap();

    assert_eq!(toml.bindings, yaml.bindings);
}

#[test]
fn test_overlay_lists_sub_menu_in_config_order() {
    let report = parse_keymap_toml(
        r#"
[keys.normal.space]
f = "file_picker"
b = "buffer_picker"

[keys.normal.space.w]
v = "vsplit"
"#,
    )
    .unwrap();
    let mut dispatcher = Dispatcher::new(
        report.bindings,
        CommandRegistry::new(),
        OverlayState::default(),
    );
    let mut editor = Editor::default();

    dispatch_all(&mut dispatcher, &mut editor, "space");
    let rows: Vec<(String, String)> = dispatcher
        .overlay()
        .visible
        .as_ref()
        .unwrap()
        .iter()
        .map(|entry| (entry.key.clone(), entry.label()))
        .collect();

    assert_eq!(
        rows,
        vec![
            ("f".to_string(), "file_picker".to_string()),
            ("b".to_string(), "buffer_picker".to_string()),
            ("w".to_string(), "+menu".to_string()),
        ]
    );
}

#[test]
fn test_observers_see_command_mode_switches() {
    use std::cell::RefCell;
    use std::rc::Rc;

    let seen = Rc::new(RefCell::new(Vec::new()));
    let mut dispatcher = Dispatcher::new(
        default_bindings(),
        CommandRegistry::<Editor>::new(),
        NoOverlay,
    );
    let sink = Rc::clone(&seen);
    dispatcher.subscribe(move |mode| sink.borrow_mut().push(mode));

    let mut editor = Editor::default();
    for spec in ["i", "esc", "v", "v"] {
        let combo: KeyCombo = spec.parse().unwrap();
        dispatcher.key_down(&mut editor, combo.into());
    }

    assert_eq!(
        *seen.borrow(),
        vec![Mode::Insert, Mode::Normal, Mode::Select, Mode::Normal]
    );
}
