use crate::{
    Data, ExclusionTable, FormatterConfig, InclusionPaths, InclusionStrategy, InclusionTree,
    RenameTable, Response, extract_target, group_under,
};
use std::sync::Arc;
use tracing::{debug, trace};

/// Shapes the data of a response.
///
/// Implementations must not fail: data that does not fit is dropped instead.
/// Formatters are shared across concurrent requests, hence `Send + Sync`.
pub trait EntityFormatter: Send + Sync {
    fn format(&self, entity: Response) -> Response;
}

impl<T: EntityFormatter + ?Sized> EntityFormatter for Box<T> {
    fn format(&self, entity: Response) -> Response {
        (**self).format(entity)
    }
}

impl<T: EntityFormatter + ?Sized> EntityFormatter for Arc<T> {
    fn format(&self, entity: Response) -> Response {
        (**self).format(entity)
    }
}

/// Adapts a plain function or closure into an [`EntityFormatter`].
#[derive(Debug, Clone, Copy)]
pub struct FormatterFn<F>(F);

impl<F> FormatterFn<F>
where
    F: Fn(Response) -> Response + Send + Sync,
{
    pub fn new(func: F) -> Self {
        Self(func)
    }
}

impl<F> EntityFormatter for FormatterFn<F>
where
    F: Fn(Response) -> Response + Send + Sync,
{
    fn format(&self, entity: Response) -> Response {
        (self.0)(entity)
    }
}

#[derive(Debug, Clone)]
enum PropertyFilter {
    Prune(InclusionTree),
    Rebuild(InclusionPaths),
    Exclude(ExclusionTable),
}

impl PropertyFilter {
    fn mode(&self) -> &'static str {
        match self {
            Self::Prune(_) => "whitelist",
            Self::Rebuild(_) => "whitelist-rebuild",
            Self::Exclude(_) => "blacklist",
        }
    }

    fn rules(&self) -> usize {
        match self {
            Self::Prune(tree) => tree.len(),
            Self::Rebuild(paths) => paths.len(),
            Self::Exclude(table) => table.len(),
        }
    }

    fn apply(&self, data: &mut Data) {
        match self {
            Self::Prune(tree) => tree.prune(data),
            Self::Rebuild(paths) => paths.apply(data),
            Self::Exclude(table) => table.apply(data),
        }
    }
}

/// The compiled shaping rules of one route.
///
/// Built once and reused for every response; formatting only mutates the
/// response it is handed.
#[derive(Debug, Clone)]
pub struct Formatter {
    target: Option<String>,
    filter: PropertyFilter,
    renames: RenameTable,
    group: Option<String>,
}

impl Formatter {
    /// Compiles `config` into a formatter.
    pub fn new(config: &FormatterConfig) -> Self {
        let filter = if config.whitelist.is_empty() {
            PropertyFilter::Exclude(ExclusionTable::compile(&config.blacklist))
        } else {
            match config.inclusion_strategy {
                InclusionStrategy::Prune => {
                    PropertyFilter::Prune(InclusionTree::compile(&config.whitelist))
                }
                InclusionStrategy::Rebuild => {
                    PropertyFilter::Rebuild(InclusionPaths::compile(&config.whitelist))
                }
            }
        };
        let formatter = Self {
            target: non_empty(&config.target),
            filter,
            renames: RenameTable::compile(&config.mapping),
            group: non_empty(&config.group),
        };
        debug!(
            target_key = formatter.target.as_deref().unwrap_or(""),
            mode = formatter.filter.mode(),
            rules = formatter.filter.rules(),
            renames = formatter.renames.len(),
            group = formatter.group.as_deref().unwrap_or(""),
            "Compiled entity formatter"
        );
        formatter
    }

    pub fn target(&self) -> Option<&str> {
        self.target.as_deref()
    }

    pub fn group(&self) -> Option<&str> {
        self.group.as_deref()
    }
}

impl From<&FormatterConfig> for Formatter {
    fn from(config: &FormatterConfig) -> Self {
        Self::new(config)
    }
}

impl From<FormatterConfig> for Formatter {
    fn from(config: FormatterConfig) -> Self {
        Self::new(&config)
    }
}

impl EntityFormatter for Formatter {
    fn format(&self, mut entity: Response) -> Response {
        if let Some(target) = &self.target {
            extract_target(target, &mut entity.data);
            trace!(target_key = %target, fields = entity.data.len(), "Extracted target");
        }
        if !entity.data.is_empty() {
            self.filter.apply(&mut entity.data);
            trace!(mode = self.filter.mode(), fields = entity.data.len(), "Filtered fields");
        }
        if !entity.data.is_empty() {
            self.renames.apply(&mut entity.data);
        }
        if let Some(group) = &self.group {
            group_under(group, &mut entity.data);
            trace!(group = %group, "Grouped data");
        }
        entity
    }
}

fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}
