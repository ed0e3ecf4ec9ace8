//! Configuration system tests
//!
//! Tests for config paths, engine settings, and keymap loading/layering.

use std::fs;

use helix_keys::config_paths;
use helix_keys::keymap::{
    default_bindings, load_keymap, load_keymap_file, load_or_empty, Binding, Command,
    ConfigFormat, KeyCombo, KeymapError, Mode, WarningKind,
};
use helix_keys::EngineSettings;
use tempfile::TempDir;

fn write(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

fn leaf(bindings: &helix_keys::ModeBindingSet, mode: Mode, keys: &[KeyCombo]) -> Option<Command> {
    let (last, path) = keys.split_last()?;
    match bindings.root(mode)?.descend(path)?.get(last)? {
        Binding::Leaf(command) => Some(*command),
        Binding::Node(_) => None,
    }
}

// ========================================================================
// Config Paths Tests
// ========================================================================

#[test]
fn test_config_dir_contains_app_name() {
    if let Some(dir) = config_paths::config_dir() {
        assert!(dir.to_string_lossy().contains("helix-keys"));
    }
}

#[test]
fn test_settings_and_logs_live_under_config_dir() {
    let (Some(config), Some(settings), Some(logs)) = (
        config_paths::config_dir(),
        config_paths::settings_file(),
        config_paths::logs_dir(),
    ) else {
        return;
    };
    assert!(settings.starts_with(&config));
    assert!(settings.to_string_lossy().ends_with("settings.yaml"));
    assert!(logs.starts_with(&config));
}

#[test]
fn test_keymap_file_prefers_toml() {
    let dir = TempDir::new().unwrap();
    assert!(config_paths::keymap_file_in(dir.path()).ends_with("keys.toml"));

    write(&dir, "keys.yaml", "keys: {}\n");
    assert!(config_paths::keymap_file_in(dir.path()).ends_with("keys.yaml"));

    write(&dir, "keys.toml", "[keys]\n");
    assert!(config_paths::keymap_file_in(dir.path()).ends_with("keys.toml"));
}

// ========================================================================
// Engine Settings Tests
// ========================================================================

#[test]
fn test_settings_defaults() {
    let settings = EngineSettings::default();
    let options = settings.dispatch_options();
    assert!(!options.repeat_in_submenu);
    assert!(!options.count_in_select);
    assert_eq!(options.max_repeat, 10_000);
    assert_eq!(settings.initial_mode, Mode::Normal);
}

#[test]
fn test_settings_partial_file_fills_defaults() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "settings.yaml", "repeat_in_submenu: true\nmax_repeat: 0\n");

    let settings = EngineSettings::load_from(&path);
    assert!(settings.repeat_in_submenu);
    assert!(!settings.count_in_select);
    assert_eq!(settings.dispatch_options().max_repeat, 1);
}

#[test]
fn test_settings_malformed_file_gives_defaults() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "settings.yaml", "max_repeat: [not, a, number]\n");
    assert_eq!(EngineSettings::load_from(&path), EngineSettings::default());
}

#[test]
fn test_settings_save_and_reload() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("settings.yaml");
    let settings = EngineSettings {
        inherit_defaults: true,
        initial_mode: Mode::Select,
        ..EngineSettings::default()
    };

    settings.save_to(&path).unwrap();
    assert_eq!(EngineSettings::load_from(&path), settings);
}

// ========================================================================
// Keymap File Tests
// ========================================================================

#[test]
fn test_format_from_extension() {
    let format = |name: &str| ConfigFormat::from_path(std::path::Path::new(name));
    assert_eq!(format("keys.toml"), Ok(ConfigFormat::Toml));
    assert_eq!(format("keys"), Ok(ConfigFormat::Toml));
    assert_eq!(format("keys.yaml"), Ok(ConfigFormat::Yaml));
    assert_eq!(format("keys.yml"), Ok(ConfigFormat::Yaml));
    assert!(matches!(
        format("keys.json"),
        Err(KeymapError::UnsupportedFormat(_))
    ));
}

#[test]
fn test_load_toml_and_yaml_files() {
    let dir = TempDir::new().unwrap();
    let toml = write(
        &dir,
        "keys.toml",
        "[keys.normal]\nw = \"move_next_word_start\"\n[keys.normal.g]\ng = \"goto_file_start\"\n",
    );
    let yaml = write(
        &dir,
        "keys.yaml",
        "keys:\n  normal:\n    w: move_next_word_start\n    g:\n      g: goto_file_start\n",
    );

    let from_toml = load_keymap_file(&toml).unwrap();
    let from_yaml = load_keymap_file(&yaml).unwrap();
    assert!(from_toml.warnings.is_empty());
    assert_eq!(from_toml.bindings, from_yaml.bindings);
    assert_eq!(
        leaf(
            &from_toml.bindings,
            Mode::Normal,
            &[KeyCombo::char('g'), KeyCombo::char('g')]
        ),
        Some(Command::GotoFileStart)
    );
}

#[test]
fn test_bad_entries_skipped_rest_loaded() {
    let dir = TempDir::new().unwrap();
    let path = write(
        &dir,
        "keys.toml",
        r#"
[keys.normal]
j = "move_line_down"
k = "fly_to_the_moon"
"C-Q-x" = "move_line_up"

[keys.visual]
j = "extend_line_down"
"#,
    );

    let report = load_keymap_file(&path).unwrap();
    assert_eq!(
        leaf(&report.bindings, Mode::Normal, &[KeyCombo::char('j')]),
        Some(Command::MoveLineDown)
    );
    assert_eq!(leaf(&report.bindings, Mode::Normal, &[KeyCombo::char('k')]), None);

    let kinds: Vec<&WarningKind> = report.warnings.iter().map(|w| &w.kind).collect();
    assert!(kinds
        .iter()
        .any(|k| matches!(k, WarningKind::UnknownCommand(name) if name == "fly_to_the_moon")));
    assert!(kinds.iter().any(|k| matches!(k, WarningKind::InvalidKey(_))));
    assert!(kinds
        .iter()
        .any(|k| matches!(k, WarningKind::UnknownMode(name) if name == "visual")));
}

#[test]
fn test_load_or_empty_missing_file() {
    let dir = TempDir::new().unwrap();
    let report = load_or_empty(&dir.path().join("keys.toml"));
    assert!(report.bindings.is_empty());
    assert!(report.warnings.is_empty());
}

#[test]
fn test_load_or_empty_malformed_file() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "keys.toml", "[keys.normal\nj = ");

    let report = load_or_empty(&path);
    assert!(report.bindings.is_empty());
    assert_eq!(report.warnings.len(), 1);
    assert!(matches!(
        report.warnings[0].kind,
        WarningKind::Unreadable(KeymapError::Parse(_))
    ));
}

// ========================================================================
// Layering Tests
// ========================================================================

#[test]
fn test_load_keymap_without_defaults_is_user_only() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "keys.toml", "[keys.normal]\nj = \"move_line_up\"\n");

    let report = load_keymap(Some(&path), false);
    assert_eq!(report.bindings.summary()[0], (Mode::Normal, 1));
}

#[test]
fn test_load_keymap_layers_user_over_defaults() {
    let dir = TempDir::new().unwrap();
    let path = write(
        &dir,
        "keys.toml",
        "[keys.normal]\nj = \"move_line_up\"\n[keys.normal.g]\nq = \"goto_last_line\"\n",
    );

    let report = load_keymap(Some(&path), true);
    let bindings = &report.bindings;

    // Replaced
    assert_eq!(
        leaf(bindings, Mode::Normal, &[KeyCombo::char('j')]),
        Some(Command::MoveLineUp)
    );
    // Added to a default sub-menu, which keeps its own entries
    assert_eq!(
        leaf(bindings, Mode::Normal, &[KeyCombo::char('g'), KeyCombo::char('q')]),
        Some(Command::GotoLastLine)
    );
    assert_eq!(
        leaf(bindings, Mode::Normal, &[KeyCombo::char('g'), KeyCombo::char('g')]),
        Some(Command::GotoFileStart)
    );
    // Untouched modes come through whole
    assert_eq!(
        bindings.root(Mode::Insert),
        default_bindings().root(Mode::Insert)
    );
}

#[test]
fn test_load_keymap_no_path() {
    assert!(load_keymap(None, false).bindings.is_empty());
    assert_eq!(load_keymap(None, true).bindings, default_bindings());
}
