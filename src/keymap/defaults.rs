//! Built-in bindings and keymap layering
//!
//! The stock Helix subset lives in `keys.toml` at the repository root and is
//! compiled into the binary. It only applies when the user asks for it with
//! `inherit_defaults`; otherwise the user's keymap stands alone.

use std::path::Path;

use super::binding::ModeBindingSet;
use super::config::{load_or_empty, parse_keymap_toml, LoadReport};

/// Default keymap TOML embedded at compile time
const DEFAULT_KEYMAP_TOML: &str = include_str!("../../keys.toml");

/// The embedded keymap source, for `show`-style tooling
pub fn default_keymap_toml() -> &'static str {
    DEFAULT_KEYMAP_TOML
}

/// Parse the embedded keymap
pub fn default_bindings() -> ModeBindingSet {
    match parse_keymap_toml(DEFAULT_KEYMAP_TOML) {
        Ok(report) => {
            if !report.warnings.is_empty() {
                tracing::warn!(
                    "Embedded keymap has {} warnings",
                    report.warnings.len()
                );
            }
            report.bindings
        }
        Err(e) => {
            tracing::error!("Failed to parse embedded keymap: {}", e);
            ModeBindingSet::empty()
        }
    }
}

/// Load the user keymap at `path`, optionally layered over the defaults
///
/// Loading order (each layer overrides the previous):
/// 1. Embedded default keymap, when `inherit_defaults` is set
/// 2. The user keymap, if it exists and parses
///
/// User entries replace default entries at the same sequence; sub-menus on
/// both sides merge.
pub fn load_keymap(path: Option<&Path>, inherit_defaults: bool) -> LoadReport {
    let user = match path {
        Some(path) => load_or_empty(path),
        None => {
            tracing::debug!("No config directory available, no user keymap");
            LoadReport::empty()
        }
    };

    if inherit_defaults {
        layer_over_defaults(user)
    } else {
        user
    }
}

/// Merge a loaded user keymap over the embedded defaults, keeping its warnings
pub fn layer_over_defaults(user: LoadReport) -> LoadReport {
    let LoadReport { bindings, warnings } = user;
    let mut merged = default_bindings();
    merged.merge(bindings);

    tracing::info!(
        "Layered user keymap over defaults ({} commands)",
        merged
            .summary()
            .iter()
            .map(|(_, count)| count)
            .sum::<usize>()
    );

    LoadReport {
        bindings: merged,
        warnings,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keymap::binding::Binding;
    use crate::keymap::command::Command;
    use crate::keymap::mode::Mode;
    use crate::keymap::types::KeyCombo;

    #[test]
    fn test_embedded_keymap_is_clean() {
        let report = parse_keymap_toml(DEFAULT_KEYMAP_TOML).unwrap();
        assert!(
            report.warnings.is_empty(),
            "embedded keymap warnings: {:?}",
            report.warnings
        );
        for (mode, count) in report.bindings.summary() {
            assert!(count > 0, "{} has no default bindings", mode);
        }
    }

    #[test]
    fn test_embedded_keymap_has_helix_basics() {
        let set = default_bindings();
        let normal = set.root(Mode::Normal).unwrap();

        assert_eq!(
            normal.get(&KeyCombo::char('j')).and_then(Binding::command),
            Some(Command::MoveLineDown)
        );
        assert_eq!(
            normal
                .descend(&[KeyCombo::char('g')])
                .and_then(|g| g.get(&KeyCombo::char('g')))
                .and_then(Binding::command),
            Some(Command::GotoFileStart)
        );
        assert!(normal.descend(&[KeyCombo::ctrl('w'), KeyCombo::char('n')]).is_some());
    }

    #[test]
    fn test_user_keymap_layers_over_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("keys.toml");
        std::fs::write(
            &path,
            "[keys.normal]\nj = \"move_visual_line_down\"\n\n[keys.normal.g]\nq = \"wclose\"\n",
        )
        .unwrap();

        let report = load_keymap(Some(&path), true);
        let normal = report.bindings.root(Mode::Normal).unwrap();

        assert_eq!(
            normal.get(&KeyCombo::char('j')).and_then(Binding::command),
            Some(Command::MoveVisualLineDown)
        );
        let g = normal.descend(&[KeyCombo::char('g')]).unwrap();
        assert!(g.contains(&KeyCombo::char('q')));
        assert!(g.contains(&KeyCombo::char('g')));
        // Untouched defaults survive
        assert!(normal.contains(&KeyCombo::char('k')));
    }

    #[test]
    fn test_user_keymap_alone_without_inherit() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("keys.toml");
        std::fs::write(&path, "[keys.normal]\nj = \"move_line_down\"\n").unwrap();

        let report = load_keymap(Some(&path), false);
        assert_eq!(report.bindings.root(Mode::Normal).map(|n| n.len()), Some(1));
    }
}
