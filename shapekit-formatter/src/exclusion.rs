//! Exclusion (blacklist) filtering.

use crate::{Data, segments};
use serde_json::Value;
use std::collections::HashMap;

/// Exclusion paths compiled into a table of top-level fields.
///
/// A field mapped to an empty list is removed entirely. A field mapped to a
/// non-empty list keeps its value but loses the listed sub-fields. Only the
/// first two segments of a path are honored; `"a.b.c"` excludes `a.b`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExclusionTable {
    rules: HashMap<String, Vec<String>>,
}

impl ExclusionTable {
    pub fn compile<I, S>(paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut rules: HashMap<String, Vec<String>> = HashMap::new();
        for path in paths {
            let mut path = segments(path.as_ref());
            let Some(field) = path.next() else {
                continue;
            };
            match path.next() {
                Some(sub_field) => rules
                    .entry(field.to_string())
                    .or_default()
                    .push(sub_field.to_string()),
                // A bare field resets whatever sub-fields were listed before it.
                None => {
                    rules.insert(field.to_string(), Vec::new());
                }
            }
        }
        Self { rules }
    }

    /// Returns the sub-fields excluded under `field`.
    ///
    /// `Some(&[])` means the whole field is excluded; `None` means the field
    /// is not mentioned at all.
    pub fn sub_fields(&self, field: &str) -> Option<&[String]> {
        self.rules.get(field).map(Vec::as_slice)
    }

    /// Number of top-level fields with a rule.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Removes every excluded field from `data`, leaving everything else as is.
    ///
    /// Sub-field rules only apply when the top-level value is an object.
    pub fn apply(&self, data: &mut Data) {
        for (field, sub_fields) in &self.rules {
            if sub_fields.is_empty() {
                data.remove(field);
                continue;
            }
            if let Some(Value::Object(nested)) = data.get_mut(field) {
                for sub_field in sub_fields {
                    nested.remove(sub_field);
                }
            }
        }
    }
}
