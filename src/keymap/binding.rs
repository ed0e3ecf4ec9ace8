//! Binding tree: chord sequences mapped to commands or sub-menus
//!
//! Each node owns its children by value. There are no back-references, so
//! trees are finite and acyclic by construction; descending is done by the
//! caller, one combo at a time.

use std::collections::HashMap;
use std::fmt;

use super::command::Command;
use super::mode::Mode;
use super::types::KeyCombo;

/// One entry of a binding tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Binding {
    /// Terminal: run this command
    Leaf(Command),
    /// Non-terminal: wait for another chord
    Node(BindingNode),
}

impl Binding {
    pub fn as_node(&self) -> Option<&BindingNode> {
        match self {
            Binding::Node(node) => Some(node),
            Binding::Leaf(_) => None,
        }
    }

    pub fn command(&self) -> Option<Command> {
        match self {
            Binding::Leaf(command) => Some(*command),
            Binding::Node(_) => None,
        }
    }
}

/// Inserting would turn a leaf into a sub-menu or the other way round
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindingConflict {
    /// Path (from the node the insert started at) of the clashing combo
    pub path: Vec<KeyCombo>,
    /// The existing binding is a sub-menu (true) or a command (false)
    pub existing_is_node: bool,
}

impl fmt::Display for BindingConflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let path = format_sequence(&self.path);
        if self.existing_is_node {
            write!(f, "`{}` is already a sub-menu and cannot be a command", path)
        } else {
            write!(f, "`{}` is already a command and cannot be a sub-menu", path)
        }
    }
}

impl std::error::Error for BindingConflict {}

/// One level of the tree
///
/// Keeps insertion order next to the lookup map so overlays list bindings
/// the way the config wrote them.
#[derive(Debug, Clone, Default)]
pub struct BindingNode {
    children: HashMap<KeyCombo, Binding>,
    order: Vec<KeyCombo>,
}

impl PartialEq for BindingNode {
    fn eq(&self, other: &Self) -> bool {
        self.children == other.children
    }
}

impl Eq for BindingNode {}

impl BindingNode {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    /// Single-level lookup
    pub fn get(&self, combo: &KeyCombo) -> Option<&Binding> {
        self.children.get(combo)
    }

    pub fn contains(&self, combo: &KeyCombo) -> bool {
        self.children.contains_key(combo)
    }

    /// Walk a path of combos, returning the node it ends on
    ///
    /// An empty path is this node. A path through a leaf is `None`.
    pub fn descend(&self, path: &[KeyCombo]) -> Option<&BindingNode> {
        path.iter()
            .try_fold(self, |node, combo| node.get(combo)?.as_node())
    }

    /// Children in insertion order
    pub fn entries(&self) -> impl Iterator<Item = (&KeyCombo, &Binding)> {
        self.order
            .iter()
            .filter_map(move |combo| self.children.get(combo).map(|b| (combo, b)))
    }

    /// Insert a command at `path`, creating sub-menus along the way
    ///
    /// A command replaces an existing command (last write wins). Crossing or
    /// replacing a sub-menu with a command, or a command with a sub-menu, is
    /// a [`BindingConflict`] and leaves the tree untouched.
    pub fn insert(&mut self, path: &[KeyCombo], command: Command) -> Result<(), BindingConflict> {
        let Some((last, prefix)) = path.split_last() else {
            return Ok(());
        };

        // Validate the whole path first so a conflict never leaves half-built menus
        let mut node = Some(&*self);
        for (depth, combo) in path.iter().enumerate() {
            let Some(current) = node else { break };
            node = match current.get(combo) {
                Some(Binding::Node(child)) if depth < prefix.len() => Some(child),
                Some(Binding::Leaf(_)) if depth < prefix.len() => {
                    return Err(BindingConflict {
                        path: path[..=depth].to_vec(),
                        existing_is_node: false,
                    });
                }
                Some(Binding::Node(_)) => {
                    return Err(BindingConflict {
                        path: path.to_vec(),
                        existing_is_node: true,
                    });
                }
                _ => None,
            };
        }

        let mut node = self;
        for (depth, combo) in prefix.iter().enumerate() {
            match node.child_node_mut(*combo) {
                Some(child) => node = child,
                None => {
                    return Err(BindingConflict {
                        path: path[..=depth].to_vec(),
                        existing_is_node: false,
                    })
                }
            }
        }
        node.put(*last, Binding::Leaf(command));
        Ok(())
    }

    /// Attach a sub-menu under `combo`, merging into an existing one
    ///
    /// A conflict anywhere inside the merge leaves the tree untouched.
    pub fn insert_node(&mut self, combo: KeyCombo, sub: BindingNode) -> Result<(), BindingConflict> {
        match self.children.get_mut(&combo) {
            Some(Binding::Leaf(_)) => Err(BindingConflict {
                path: vec![combo],
                existing_is_node: false,
            }),
            Some(Binding::Node(existing)) => existing.merge_checked(sub).map_err(|mut conflict| {
                conflict.path.insert(0, combo);
                conflict
            }),
            None => {
                self.put(combo, Binding::Node(sub));
                Ok(())
            }
        }
    }

    /// Overlay `other` on top of this tree
    ///
    /// Sub-menus present on both sides merge recursively; any other overlap
    /// is won by `other`. Used to layer user bindings over defaults.
    pub fn merge(&mut self, other: BindingNode) {
        let BindingNode {
            mut children,
            order,
        } = other;
        for combo in order {
            let Some(incoming) = children.remove(&combo) else {
                continue;
            };
            match incoming {
                Binding::Node(sub) => {
                    if let Some(Binding::Node(existing)) = self.children.get_mut(&combo) {
                        existing.merge(sub);
                    } else {
                        self.put(combo, Binding::Node(sub));
                    }
                }
                leaf => self.put(combo, leaf),
            }
        }
    }

    /// Merge a sub-menu into this one; on conflict the tree is left untouched
    fn merge_checked(&mut self, other: BindingNode) -> Result<(), BindingConflict> {
        let mut merged = self.clone();
        merged.merge_into(other)?;
        *self = merged;
        Ok(())
    }

    fn merge_into(&mut self, other: BindingNode) -> Result<(), BindingConflict> {
        let BindingNode {
            mut children,
            order,
        } = other;
        for combo in order {
            let Some(incoming) = children.remove(&combo) else {
                continue;
            };
            match incoming {
                Binding::Leaf(command) => self.insert(&[combo], command)?,
                Binding::Node(sub) => self.insert_node(combo, sub)?,
            }
        }
        Ok(())
    }

    /// Total number of commands reachable from this node
    pub fn leaf_count(&self) -> usize {
        self.children
            .values()
            .map(|binding| match binding {
                Binding::Leaf(_) => 1,
                Binding::Node(node) => node.leaf_count(),
            })
            .sum()
    }

    /// Every (sequence, command) pair under this node, depth first
    pub fn sequences(&self) -> Vec<(Vec<KeyCombo>, Command)> {
        let mut out = Vec::new();
        self.collect_sequences(&mut Vec::new(), &mut out);
        out
    }

    fn collect_sequences(&self, prefix: &mut Vec<KeyCombo>, out: &mut Vec<(Vec<KeyCombo>, Command)>) {
        for (combo, binding) in self.entries() {
            prefix.push(*combo);
            match binding {
                Binding::Leaf(command) => out.push((prefix.clone(), *command)),
                Binding::Node(node) => node.collect_sequences(prefix, out),
            }
            prefix.pop();
        }
    }

    fn child_node_mut(&mut self, combo: KeyCombo) -> Option<&mut BindingNode> {
        if !self.children.contains_key(&combo) {
            self.put(combo, Binding::Node(BindingNode::new()));
        }
        match self.children.get_mut(&combo) {
            Some(Binding::Node(node)) => Some(node),
            _ => None,
        }
    }

    fn put(&mut self, combo: KeyCombo, binding: Binding) {
        if self.children.insert(combo, binding).is_none() {
            self.order.push(combo);
        }
    }
}

/// Render a chord sequence the way a user would type it in a config
pub fn format_sequence(path: &[KeyCombo]) -> String {
    path.iter()
        .map(|combo| combo.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

/// One root node per mode, produced once by the loader
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModeBindingSet {
    roots: HashMap<Mode, BindingNode>,
}

impl ModeBindingSet {
    /// A set with no bindings in any mode
    pub fn empty() -> Self {
        Self::default()
    }

    /// Root of a mode's tree; `None` means lookups in that mode always miss
    pub fn root(&self, mode: Mode) -> Option<&BindingNode> {
        self.roots.get(&mode)
    }

    pub fn set_root(&mut self, mode: Mode, root: BindingNode) {
        self.roots.insert(mode, root);
    }

    /// Builder-style [`set_root`](Self::set_root)
    pub fn with_root(mut self, mode: Mode, root: BindingNode) -> Self {
        self.set_root(mode, root);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.roots.values().all(BindingNode::is_empty)
    }

    /// Command count per mode, in `Mode::ALL` order
    pub fn summary(&self) -> Vec<(Mode, usize)> {
        Mode::ALL
            .into_iter()
            .map(|mode| (mode, self.root(mode).map_or(0, BindingNode::leaf_count)))
            .collect()
    }

    /// Layer `other` over this set, mode by mode
    pub fn merge(&mut self, other: ModeBindingSet) {
        for (mode, root) in other.roots {
            self.roots.entry(mode).or_default().merge(root);
        }
    }
}
