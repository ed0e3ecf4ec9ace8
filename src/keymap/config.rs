//! Keymap document parsing
//!
//! Parses `keys.toml` (or `keys.yaml`) documents of the shape
//! `{ keys: { <mode>: { <key-spec>: <command> | { nested } } } }` into one
//! binding tree per mode. Individual bad entries become [`ConfigWarning`]s;
//! only an unreadable document is a [`KeymapError`].

use std::collections::HashMap;
use std::fmt;
use std::path::Path;

use serde::de::{self, Deserializer, IgnoredAny, MapAccess, SeqAccess, Visitor};
use serde::Deserialize;

use super::binding::{BindingNode, ModeBindingSet};
use super::command::Command;
use super::mode::Mode;
use super::types::KeyCombo;

/// Document syntax, picked from the file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Toml,
    Yaml,
}

impl ConfigFormat {
    /// `.toml` or no extension is TOML, `.yaml`/`.yml` is YAML
    pub fn from_path(path: &Path) -> Result<Self, KeymapError> {
        match path.extension().and_then(|ext| ext.to_str()) {
            None => Ok(ConfigFormat::Toml),
            Some(ext) if ext.eq_ignore_ascii_case("toml") => Ok(ConfigFormat::Toml),
            Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
                Ok(ConfigFormat::Yaml)
            }
            Some(ext) => Err(KeymapError::UnsupportedFormat(ext.to_string())),
        }
    }
}

/// Result of a successful parse
#[derive(Debug, Clone, Default)]
pub struct LoadReport {
    pub bindings: ModeBindingSet,
    pub warnings: Vec<ConfigWarning>,
}

impl LoadReport {
    pub fn empty() -> Self {
        Self::default()
    }
}

/// A problem with one entry; the entry was skipped and loading went on
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigWarning {
    /// Dotted location, e.g. `normal.g.x`
    pub path: String,
    pub kind: WarningKind,
}

#[derive(Debug, Clone, PartialEq)]
pub enum WarningKind {
    MissingKeysSection,
    UnknownMode(String),
    InvalidKey(String),
    UnknownCommand(String),
    /// Value was neither a command name nor a table
    UnexpectedValue(&'static str),
    EmptyTable,
    Conflict(String),
    /// The whole document was rejected
    Unreadable(KeymapError),
}

impl fmt::Display for WarningKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WarningKind::MissingKeysSection => write!(f, "no `keys` section"),
            WarningKind::UnknownMode(name) => write!(f, "unknown mode `{}`", name),
            WarningKind::InvalidKey(spec) => write!(f, "invalid key `{}`", spec),
            WarningKind::UnknownCommand(name) => write!(f, "unknown command `{}`", name),
            WarningKind::UnexpectedValue(kind) => {
                write!(f, "expected a command name or a table, found {}", kind)
            }
            WarningKind::EmptyTable => write!(f, "empty table"),
            WarningKind::Conflict(msg) => write!(f, "{}", msg),
            WarningKind::Unreadable(err) => write!(f, "{}", err),
        }
    }
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "{}", self.kind)
        } else {
            write!(f, "{}: {}", self.path, self.kind)
        }
    }
}

/// Errors that reject a whole keymap document
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeymapError {
    Io(String),
    Parse(String),
    UnsupportedFormat(String),
}

impl fmt::Display for KeymapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeymapError::Io(e) => write!(f, "IO error: {}", e),
            KeymapError::Parse(e) => write!(f, "Parse error: {}", e),
            KeymapError::UnsupportedFormat(ext) => {
                write!(f, "Unsupported keymap format: .{}", ext)
            }
        }
    }
}

impl std::error::Error for KeymapError {}

/// Load a keymap file, choosing the syntax from its extension
pub fn load_keymap_file(path: &Path) -> Result<LoadReport, KeymapError> {
    let format = ConfigFormat::from_path(path)?;
    let content = std::fs::read_to_string(path).map_err(|e| KeymapError::Io(e.to_string()))?;
    let report = parse_keymap(&content, format)?;

    tracing::info!(
        "Loaded keymap from {} ({} warnings)",
        path.display(),
        report.warnings.len()
    );
    Ok(report)
}

/// Load a keymap file, never failing
///
/// A missing file is an empty set. An unreadable or malformed one is logged,
/// reported as a single [`WarningKind::Unreadable`] warning and also yields an
/// empty set, so every key falls through to the host.
pub fn load_or_empty(path: &Path) -> LoadReport {
    if !path.exists() {
        tracing::debug!("No keymap at {}, starting empty", path.display());
        return LoadReport::empty();
    }

    match load_keymap_file(path) {
        Ok(report) => report,
        Err(e) => {
            tracing::error!("Failed to load keymap from {}: {}", path.display(), e);
            LoadReport {
                bindings: ModeBindingSet::empty(),
                warnings: vec![ConfigWarning {
                    path: path.display().to_string(),
                    kind: WarningKind::Unreadable(e),
                }],
            }
        }
    }
}

pub fn parse_keymap(content: &str, format: ConfigFormat) -> Result<LoadReport, KeymapError> {
    match format {
        ConfigFormat::Toml => parse_keymap_toml(content),
        ConfigFormat::Yaml => parse_keymap_yaml(content),
    }
}

pub fn parse_keymap_toml(content: &str) -> Result<LoadReport, KeymapError> {
    let doc: KeymapDocument =
        toml::from_str(content).map_err(|e| KeymapError::Parse(e.to_string()))?;
    Ok(build_report(doc))
}

pub fn parse_keymap_yaml(content: &str) -> Result<LoadReport, KeymapError> {
    // An empty YAML file is a null document, not an error
    if content.trim().is_empty() {
        return Ok(build_report(KeymapDocument { keys: None }));
    }
    let doc: KeymapDocument =
        serde_yaml::from_str(content).map_err(|e| KeymapError::Parse(e.to_string()))?;
    Ok(build_report(doc))
}

#[derive(Debug, Deserialize)]
struct KeymapDocument {
    #[serde(default)]
    keys: Option<RawValue>,
}

fn build_report(doc: KeymapDocument) -> LoadReport {
    let mut warnings = Vec::new();
    let mut roots: HashMap<Mode, BindingNode> = HashMap::new();

    match doc.keys {
        Some(RawValue::Table(modes)) => {
            for (name, value) in modes {
                let Ok(mode) = name.parse::<Mode>() else {
                    warnings.push(ConfigWarning {
                        kind: WarningKind::UnknownMode(name.clone()),
                        path: format!("keys.{}", name),
                    });
                    continue;
                };
                match value {
                    RawValue::Table(entries) => {
                        let root = build_node(entries, mode.name(), &mut warnings);
                        roots.entry(mode).or_default().merge(root);
                    }
                    RawValue::Command(_) => warnings.push(ConfigWarning {
                        path: mode.name().to_string(),
                        kind: WarningKind::UnexpectedValue("a string"),
                    }),
                    RawValue::Other(kind) => warnings.push(ConfigWarning {
                        path: mode.name().to_string(),
                        kind: WarningKind::UnexpectedValue(kind),
                    }),
                }
            }
        }
        Some(RawValue::Command(_)) => warnings.push(ConfigWarning {
            path: "keys".to_string(),
            kind: WarningKind::UnexpectedValue("a string"),
        }),
        Some(RawValue::Other(kind)) => warnings.push(ConfigWarning {
            path: "keys".to_string(),
            kind: WarningKind::UnexpectedValue(kind),
        }),
        None => warnings.push(ConfigWarning {
            path: String::new(),
            kind: WarningKind::MissingKeysSection,
        }),
    }

    let mut bindings = ModeBindingSet::empty();
    for mode in Mode::ALL {
        bindings.set_root(mode, roots.remove(&mode).unwrap_or_default());
    }

    for warning in &warnings {
        tracing::warn!("keymap: {}", warning);
    }
    for (mode, count) in bindings.summary() {
        tracing::debug!(mode = %mode, bindings = count, "keymap mode loaded");
    }

    LoadReport { bindings, warnings }
}

fn build_node(
    entries: Vec<(String, RawValue)>,
    path: &str,
    warnings: &mut Vec<ConfigWarning>,
) -> BindingNode {
    let mut node = BindingNode::new();

    for (spec, value) in entries {
        let entry_path = format!("{}.{}", path, spec);
        let warn = |warnings: &mut Vec<ConfigWarning>, kind| {
            warnings.push(ConfigWarning {
                path: entry_path.clone(),
                kind,
            })
        };

        let Ok(combo) = spec.parse::<KeyCombo>() else {
            warn(warnings, WarningKind::InvalidKey(spec.clone()));
            continue;
        };

        let inserted = match value {
            RawValue::Command(name) => match name.parse::<Command>() {
                Ok(command) => node.insert(&[combo], command),
                Err(_) => {
                    warn(warnings, WarningKind::UnknownCommand(name));
                    continue;
                }
            },
            RawValue::Table(children) => {
                let sub = build_node(children, &entry_path, warnings);
                if sub.is_empty() {
                    warn(warnings, WarningKind::EmptyTable);
                    continue;
                }
                node.insert_node(combo, sub)
            }
            RawValue::Other(kind) => {
                warn(warnings, WarningKind::UnexpectedValue(kind));
                continue;
            }
        };

        if let Err(conflict) = inserted {
            warn(warnings, WarningKind::Conflict(conflict.to_string()));
        }
    }

    node
}

/// Untyped document value that keeps table entries in document order
#[derive(Debug)]
enum RawValue {
    Command(String),
    Table(Vec<(String, RawValue)>),
    /// Anything else, named for the diagnostic
    Other(&'static str),
}

impl<'de> Deserialize<'de> for RawValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(RawValueVisitor)
    }
}

struct RawValueVisitor;

impl<'de> Visitor<'de> for RawValueVisitor {
    type Value = RawValue;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a command name or a table of key bindings")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<RawValue, E> {
        Ok(RawValue::Command(v.to_string()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<RawValue, E> {
        Ok(RawValue::Command(v))
    }

    fn visit_bool<E: de::Error>(self, _: bool) -> Result<RawValue, E> {
        Ok(RawValue::Other("a boolean"))
    }

    fn visit_i64<E: de::Error>(self, _: i64) -> Result<RawValue, E> {
        Ok(RawValue::Other("a number"))
    }

    fn visit_u64<E: de::Error>(self, _: u64) -> Result<RawValue, E> {
        Ok(RawValue::Other("a number"))
    }

    fn visit_f64<E: de::Error>(self, _: f64) -> Result<RawValue, E> {
        Ok(RawValue::Other("a number"))
    }

    fn visit_unit<E: de::Error>(self) -> Result<RawValue, E> {
        Ok(RawValue::Other("nothing"))
    }

    fn visit_none<E: de::Error>(self) -> Result<RawValue, E> {
        Ok(RawValue::Other("nothing"))
    }

    fn visit_some<D>(self, deserializer: D) -> Result<RawValue, D::Error>
    where
        D: Deserializer<'de>,
    {
        RawValue::deserialize(deserializer)
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<RawValue, A::Error>
    where
        A: SeqAccess<'de>,
    {
        while seq.next_element::<IgnoredAny>()?.is_some() {}
        Ok(RawValue::Other("an array"))
    }

    fn visit_map<A>(self, mut map: A) -> Result<RawValue, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut entries = Vec::new();
        while let Some(RawKey(key)) = map.next_key()? {
            let value = map.next_value::<RawValue>()?;
            entries.push((key, value));
        }
        Ok(RawValue::Table(entries))
    }
}

/// Table key; YAML lets `1:` or `true:` through as non-strings
struct RawKey(String);

impl<'de> Deserialize<'de> for RawKey {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(RawKeyVisitor)
    }
}

struct RawKeyVisitor;

impl<'de> Visitor<'de> for RawKeyVisitor {
    type Value = RawKey;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a key spec")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<RawKey, E> {
        Ok(RawKey(v.to_string()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<RawKey, E> {
        Ok(RawKey(v))
    }

    fn visit_char<E: de::Error>(self, v: char) -> Result<RawKey, E> {
        Ok(RawKey(v.to_string()))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<RawKey, E> {
        Ok(RawKey(v.to_string()))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<RawKey, E> {
        Ok(RawKey(v.to_string()))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<RawKey, E> {
        Ok(RawKey(v.to_string()))
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<RawKey, E> {
        Ok(RawKey(v.to_string()))
    }

    fn visit_unit<E: de::Error>(self) -> Result<RawKey, E> {
        Ok(RawKey("~".to_string()))
    }
}
