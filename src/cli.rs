//! Command-line interface for inspecting and exercising keymaps
//!
//! Supports:
//! - Validating a keymap file and listing its diagnostics
//! - Printing a mode's binding tree
//! - Feeding key-specs through a dispatcher to see what they resolve to
//! - Printing the resolved config paths and the built-in keymap
//! - Printing the effective settings or writing a default settings file

use std::cell::RefCell;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use clap::{Parser, Subcommand};

use crate::config_paths;
use crate::settings::EngineSettings;
use crate::keymap::{
    layer_over_defaults, load_keymap_file, Binding, BindingNode, Command, CommandRegistry,
    DispatchOptions, Dispatcher, InvalidKeySpec, KeyCombo, KeymapError, LoadReport, Mode,
    ModeBindingSet, Overlay, OverlayEntry,
};

/// Inspect and exercise modal Helix-style keymaps
#[derive(Parser, Debug)]
#[command(name = "helix-keys", version, about = "Inspect and exercise modal Helix-style keymaps")]
pub struct CliArgs {
    /// Log dispatcher transitions to stderr (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Layer the keymap over the built-in Helix bindings
    #[arg(long, global = true)]
    pub inherit_defaults: bool,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Subcommand, Debug)]
pub enum CliCommand {
    /// Load a keymap and report warnings and binding counts
    Check {
        /// Keymap file (defaults to the user keymap)
        #[arg(value_name = "PATH")]
        path: Option<PathBuf>,
    },
    /// Print a mode's binding tree
    Show {
        #[arg(value_name = "PATH")]
        path: Option<PathBuf>,

        #[arg(long, default_value = "normal", value_parser = parse_mode)]
        mode: Mode,
    },
    /// Feed key-specs through a dispatcher and print each result
    Simulate {
        #[arg(long, value_name = "PATH")]
        keymap: Option<PathBuf>,

        /// Mode to start in (defaults to settings.yaml)
        #[arg(long, value_parser = parse_mode)]
        mode: Option<Mode>,

        /// Key-specs such as `3 g g` or `C-w v`
        #[arg(value_name = "KEYS", required = true, num_args = 1..)]
        keys: Vec<String>,
    },
    /// Print the resolved config, keymap, settings and log paths
    Paths,
    /// Print the built-in keymap, a starting point for keys.toml
    Defaults,
    /// Print the effective engine settings
    Settings {
        /// Write a settings.yaml with the defaults if none exists yet
        #[arg(long)]
        init: bool,
    },
}

fn parse_mode(s: &str) -> Result<Mode, String> {
    s.parse()
        .map_err(|_| format!("unknown mode `{}` (expected normal, insert or select)", s))
}

/// The keymap path a command should read
pub fn resolve_keymap_path(path: Option<PathBuf>) -> Option<PathBuf> {
    path.or_else(config_paths::keymap_file)
}

/// Load a keymap strictly: a missing or malformed file is an error
///
/// With `inherit_defaults` a missing user keymap is fine and the built-in
/// bindings are used alone.
pub fn load_for_cli(path: Option<&Path>, inherit_defaults: bool) -> Result<LoadReport, KeymapError> {
    let user = match path {
        Some(path) if path.exists() || !inherit_defaults => load_keymap_file(path)?,
        Some(_) => LoadReport::empty(),
        None if inherit_defaults => LoadReport::empty(),
        None => return Err(KeymapError::Io("No config directory available".to_string())),
    };

    Ok(if inherit_defaults {
        layer_over_defaults(user)
    } else {
        user
    })
}

/// Settings as they would be written to settings.yaml
pub fn render_settings(settings: &EngineSettings) -> Result<String, String> {
    serde_yaml::to_string(settings).map_err(|e| format!("Failed to serialize settings: {}", e))
}

/// Write default settings to `path` unless a file is already there
///
/// Returns whether a file was written.
pub fn init_settings(path: &Path) -> Result<bool, String> {
    if path.exists() {
        return Ok(false);
    }
    EngineSettings::default().save_to(path)?;
    Ok(true)
}

/// Diagnostics followed by a per-mode command count
pub fn render_check(report: &LoadReport) -> String {
    let mut out = String::new();
    for warning in &report.warnings {
        let _ = writeln!(out, "warning: {}", warning);
    }
    for (mode, count) in report.bindings.summary() {
        let _ = writeln!(out, "{:<7} {} bindings", mode.name(), count);
    }
    out
}

/// Indented listing of a binding tree
pub fn render_tree(node: &BindingNode) -> String {
    let mut out = String::new();
    render_level(node, 0, &mut out);
    out
}

fn render_level(node: &BindingNode, depth: usize, out: &mut String) {
    let indent = "  ".repeat(depth);
    let width = node
        .entries()
        .map(|(combo, _)| combo.to_string().len())
        .max()
        .unwrap_or(0);

    for (combo, binding) in node.entries() {
        let key = combo.to_string();
        match binding {
            Binding::Leaf(command) => {
                let _ = writeln!(out, "{}{:<width$}  {}", indent, key, command, width = width);
            }
            Binding::Node(sub) => {
                let _ = writeln!(out, "{}{}", indent, key);
                render_level(sub, depth + 1, out);
            }
        }
    }
}

/// Host used by `simulate`: records the commands it was asked to run
#[derive(Debug, Default)]
pub struct RecordingEditor {
    pub ran: Vec<Command>,
}

#[derive(Default)]
struct TranscriptOverlay {
    lines: Rc<RefCell<Vec<String>>>,
}

impl Overlay for TranscriptOverlay {
    fn show(&mut self, entries: &[OverlayEntry]) {
        let items: Vec<String> = entries
            .iter()
            .map(|entry| format!("{} {}", entry.key, entry.label()))
            .collect();
        self.lines
            .borrow_mut()
            .push(format!("    overlay: {}", items.join(", ")));
    }

    fn hide(&mut self) {}
}

/// Run key-specs through a fresh dispatcher and describe every step
pub fn simulate(
    bindings: ModeBindingSet,
    options: DispatchOptions,
    initial_mode: Mode,
    keys: &[String],
) -> Result<Vec<String>, InvalidKeySpec> {
    let combos = keys
        .iter()
        .flat_map(|arg| arg.split_whitespace())
        .map(str::parse::<KeyCombo>)
        .collect::<Result<Vec<_>, _>>()?;

    let lines = Rc::new(RefCell::new(Vec::new()));
    let mut registry = CommandRegistry::new();
    for &command in Command::ALL {
        registry.bind(command, move |editor: &mut RecordingEditor| editor.ran.push(command));
    }

    let overlay = TranscriptOverlay {
        lines: Rc::clone(&lines),
    };
    let mut dispatcher = Dispatcher::new(bindings, registry, overlay)
        .with_options(options)
        .with_initial_mode(initial_mode);

    let mode_lines = Rc::clone(&lines);
    dispatcher.subscribe(move |mode| {
        mode_lines
            .borrow_mut()
            .push(format!("    mode -> {}", mode.status_label()))
    });

    let mut editor = RecordingEditor::default();
    for combo in combos {
        lines
            .borrow_mut()
            .push(format!("[{}] {}", dispatcher.mode().status_label(), combo));
        let action = dispatcher.key_down(&mut editor, combo.into());
        // Overlay and mode lines were pushed during key_down; the action goes first
        let mut buffer = lines.borrow_mut();
        let at = buffer
            .iter()
            .rposition(|line| line.starts_with('['))
            .map_or(buffer.len(), |i| i + 1);
        buffer.insert(at, format!("    {}", action));
    }

    if let Some(pending) = dispatcher.pending_display() {
        lines.borrow_mut().push(format!("pending: {}", pending));
    }

    let transcript = lines.borrow().clone();
    Ok(transcript)
}
