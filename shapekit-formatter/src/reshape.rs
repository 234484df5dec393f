//! Target extraction, renaming and grouping.

use crate::{Data, segments};
use serde_json::Value;
use std::collections::HashMap;

/// Replaces `data` with the object stored under `target`.
///
/// A missing target, or one whose value is not an object, leaves `data`
/// empty. Nothing else from the original tree is retained.
pub fn extract_target(target: &str, data: &mut Data) {
    *data = match data.remove(target) {
        Some(Value::Object(inner)) => inner,
        Some(_) | None => Data::new(),
    };
}

/// Nests the whole of `data` under a single `group` key.
pub fn group_under(group: &str, data: &mut Data) {
    let inner = std::mem::take(data);
    data.insert(group.to_string(), Value::Object(inner));
}

/// Renames applied to top-level fields.
///
/// Destinations are truncated to their first dotted segment when compiled, so
/// `"a" -> "b.c"` renames `a` to `b`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenameTable {
    renames: HashMap<String, String>,
}

impl RenameTable {
    pub fn compile<I, K, V>(mapping: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: AsRef<str>,
    {
        let renames = mapping
            .into_iter()
            .map(|(from, to)| {
                let to = segments(to.as_ref()).next().unwrap_or_default();
                (from.into(), to.to_string())
            })
            .collect();
        Self { renames }
    }

    /// Returns the compiled destination for `from`.
    pub fn destination(&self, from: &str) -> Option<&str> {
        self.renames.get(from).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.renames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.renames.is_empty()
    }

    /// Moves each renamed field to its destination, overwriting any value
    /// already stored there, then removes the source.
    ///
    /// A field renamed onto itself is therefore dropped. Two sources sharing a
    /// destination resolve in unspecified order.
    pub fn apply(&self, data: &mut Data) {
        for (from, to) in &self.renames {
            if let Some(value) = data.remove(from) {
                if from != to {
                    data.insert(to.clone(), value);
                }
            }
        }
    }
}
