//! Inclusion (whitelist) filtering.
//!
//! Two strategies are available:
//!
//! - [`InclusionTree`] prunes the data in place. Every field that is not
//!   reachable through the compiled tree is deleted, and a branch whose
//!   subtree ended up without a single matched leaf is deleted as a whole.
//! - [`InclusionPaths`] rebuilds a fresh object by copying each declared path
//!   that resolves in the input.
//!
//! Both return an empty object when no declared path matches.

use crate::{Data, segments};
use serde_json::Value;
use std::collections::HashMap;
use tracing::debug;

/// A node of a compiled inclusion tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InclusionNode {
    /// The path ends here; the field is kept with its whole value.
    Leaf,
    /// Deeper paths were declared under this field.
    Branch(HashMap<String, InclusionNode>),
}

impl InclusionNode {
    pub fn is_leaf(&self) -> bool {
        matches!(self, Self::Leaf)
    }

    /// Returns the child node for `key`, if this is a branch declaring it.
    pub fn child(&self, key: &str) -> Option<&InclusionNode> {
        match self {
            Self::Leaf => None,
            Self::Branch(children) => children.get(key),
        }
    }
}

/// Inclusion paths compiled into a prefix tree.
///
/// Paths sharing a prefix share nodes. When declarations conflict (`"a"` and
/// `"a.b"`), the later one decides whether `a` is a leaf or a branch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InclusionTree {
    root: HashMap<String, InclusionNode>,
}

impl InclusionTree {
    /// Compiles dotted paths into a tree.
    pub fn compile<I, S>(paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut root = HashMap::new();
        for path in paths {
            let path: Vec<&str> = segments(path.as_ref()).collect();
            insert(&mut root, &path);
        }
        Self { root }
    }

    /// Returns the top-level node for `key`.
    pub fn get(&self, key: &str) -> Option<&InclusionNode> {
        self.root.get(key)
    }

    /// Iterates over the top-level fields and their nodes.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &InclusionNode)> {
        self.root.iter()
    }

    /// Number of top-level fields declared.
    pub fn len(&self) -> usize {
        self.root.len()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }

    /// Prunes `data` in place so that only declared fields survive.
    ///
    /// If no declared leaf matched anywhere, `data` is cleared completely
    /// rather than left as a partially pruned shell.
    pub fn prune(&self, data: &mut Data) {
        if prune_level(&self.root, data) {
            debug!(fields = data.len(), "No inclusion path matched, clearing data");
            data.clear();
        }
    }
}

fn insert(children: &mut HashMap<String, InclusionNode>, path: &[&str]) {
    match path {
        [] => {}
        [leaf] => {
            children.insert((*leaf).to_string(), InclusionNode::Leaf);
        }
        [head, rest @ ..] => {
            let child = children
                .entry((*head).to_string())
                .or_insert(InclusionNode::Leaf);
            if let InclusionNode::Branch(grandchildren) = child {
                insert(grandchildren, rest);
            } else {
                let mut grandchildren = HashMap::new();
                insert(&mut grandchildren, rest);
                *child = InclusionNode::Branch(grandchildren);
            }
        }
    }
}

/// Deletes every entry of `data` not allowed by `allowed`.
///
/// Returns `true` when no leaf was kept at this level or below, meaning the
/// caller may discard the whole object.
fn prune_level(allowed: &HashMap<String, InclusionNode>, data: &mut Data) -> bool {
    let mut discard_whole = true;
    data.retain(|key, value| match allowed.get(key) {
        None => false,
        Some(InclusionNode::Leaf) => {
            discard_whole = false;
            true
        }
        Some(InclusionNode::Branch(children)) => match value {
            Value::Object(nested) => {
                if prune_level(children, nested) {
                    false
                } else {
                    discard_whole = false;
                    true
                }
            }
            // Declared as nested but the value is a scalar or an array.
            Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) | Value::Array(_) => {
                false
            }
        },
    });
    discard_whole
}

/// Inclusion paths kept as a list, applied by copying rather than deleting.
///
/// Unlike [`InclusionTree`], each path is resolved on its own, so `"a"`
/// together with `"a.b"` keeps all of `a` regardless of declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InclusionPaths {
    paths: Vec<Vec<String>>,
}

impl InclusionPaths {
    pub fn compile<I, S>(paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let paths = paths
            .into_iter()
            .map(|path| segments(path.as_ref()).map(str::to_string).collect())
            .collect();
        Self { paths }
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Builds a new object holding only the declared paths found in `data`.
    pub fn select(&self, data: &Data) -> Data {
        let mut selected = Data::new();
        for path in &self.paths {
            let Some((leaf, parents)) = path.split_last() else {
                continue;
            };
            let Some(value) = find_object(data, parents).and_then(|source| source.get(leaf))
            else {
                continue;
            };
            if let Some(target) = build_object(&mut selected, parents) {
                target.insert(leaf.clone(), value.clone());
            }
        }
        selected
    }

    /// Replaces `data` with [`select`](Self::select)'s result.
    pub fn apply(&self, data: &mut Data) {
        let selected = self.select(data);
        if selected.is_empty() {
            debug!(fields = data.len(), "No inclusion path matched, clearing data");
        }
        *data = selected;
    }
}

fn find_object<'a>(root: &'a Data, parents: &[String]) -> Option<&'a Data> {
    parents
        .iter()
        .try_fold(root, |node, segment| node.get(segment)?.as_object())
}

/// Walks `parents` from `root`, creating objects along the way and replacing
/// anything that is not an object.
fn build_object<'a>(root: &'a mut Data, parents: &[String]) -> Option<&'a mut Data> {
    let Some((head, rest)) = parents.split_first() else {
        return Some(root);
    };
    let child = root
        .entry(head.clone())
        .or_insert_with(|| Value::Object(Data::new()));
    if !child.is_object() {
        *child = Value::Object(Data::new());
    }
    build_object(child.as_object_mut()?, rest)
}
