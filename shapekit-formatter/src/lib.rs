//! Response shaping for shapekit.
//!
//! A [`Formatter`] is compiled once per route from a [`FormatterConfig`] and
//! then applied to every [`Response`] that route produces. Each call runs a
//! fixed pipeline over the response's data:
//!
//! 1. target extraction ([`extract_target`]) narrows the data to one subtree
//! 2. field filtering, either by inclusion ([`InclusionTree`], or
//!    [`InclusionPaths`] for the rebuilding strategy) or by exclusion
//!    ([`ExclusionTable`]), never both
//! 3. renaming of surviving top-level fields ([`RenameTable`])
//! 4. grouping of the whole result under a single key ([`group_under`])
//!
//! Formatting never fails. Data that does not match the configuration is
//! dropped, and the response's `is_complete` flag is passed through untouched.

mod config;
mod exclusion;
mod formatter;
mod inclusion;
mod reshape;

pub use config::{ConfigError, ConfigResult, FormatterConfig, InclusionStrategy};
pub use exclusion::ExclusionTable;
pub use formatter::{EntityFormatter, Formatter, FormatterFn};
pub use inclusion::{InclusionNode, InclusionPaths, InclusionTree};
pub use reshape::{RenameTable, extract_target, group_under};
pub use shapekit_types::{Data, Response};

/// Splits a dotted field path into its segments.
///
/// Always yields at least one segment; an empty path yields one empty segment.
pub(crate) fn segments(path: &str) -> std::str::Split<'_, char> {
    path.split('.')
}
