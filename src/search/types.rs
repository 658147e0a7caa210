//! Core types for aggregated search.
//!
//! These types define the per-module result shape returned by module search
//! handlers and the aggregate structure returned to the API boundary.

use serde::{Deserialize, Serialize};

/// A single search result produced by a module.
///
/// The coordinator treats items as opaque payload; only the shape matters to
/// aggregation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultItem {
    /// Display title.
    pub title: String,

    /// Optional longer description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Link target for the result.
    pub url: String,

    /// Icon identifier for the UI.
    pub icon: String,

    /// Accent color for the UI.
    pub color: String,
}

impl ResultItem {
    /// Create a new result item.
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            url: url.into(),
            icon: String::new(),
            color: String::new(),
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the icon.
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = icon.into();
        self
    }

    /// Set the color.
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }
}

/// One module's answer to a search call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchPage {
    /// Total matches known to the module (may exceed `items.len()`).
    pub total_count: u64,

    /// Result items in module-defined order.
    pub items: Vec<ResultItem>,
}

impl SearchPage {
    /// Create a page from items, with `total_count` equal to the item count.
    pub fn from_items(items: Vec<ResultItem>) -> Self {
        Self {
            total_count: items.len() as u64,
            items,
        }
    }

    /// Create a page with an explicit total.
    pub fn new(total_count: u64, items: Vec<ResultItem>) -> Self {
        Self { total_count, items }
    }

    /// An empty page.
    pub fn empty() -> Self {
        Self::default()
    }
}

/// Terminal state of one module's dispatched search call.
#[derive(Debug, Clone)]
pub enum ModuleOutcome {
    /// The module answered within its deadline.
    Completed(SearchPage),
    /// The module exceeded its per-module timeout.
    TimedOut,
    /// The module returned an error or its task panicked.
    Failed(String),
}

impl ModuleOutcome {
    /// Whether this outcome is a recovered fault (timeout or failure).
    pub fn is_fault(&self) -> bool {
        !matches!(self, Self::Completed(_))
    }
}

/// A dispatched module paired with its terminal outcome.
#[derive(Debug, Clone)]
pub struct ModuleDispatch {
    /// Module key, the aggregation identity.
    pub module_key: String,

    /// Terminal per-module state.
    pub outcome: ModuleOutcome,
}

/// Per-module group in the aggregate response.
///
/// Faulted modules still appear, with a zero count and no items: the
/// aggregate reports participation, not just success.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModuleResultGroup {
    /// Key of the module that produced (or failed to produce) these results.
    pub module_key: String,

    /// Total matches reported by the module.
    pub total_count: u64,

    /// Result items in module-defined order.
    pub items: Vec<ResultItem>,
}

impl ModuleResultGroup {
    /// Group for a module that answered.
    pub fn from_page(module_key: impl Into<String>, page: SearchPage) -> Self {
        Self {
            module_key: module_key.into(),
            total_count: page.total_count,
            items: page.items,
        }
    }

    /// Empty group for a module that timed out or failed.
    pub fn empty(module_key: impl Into<String>) -> Self {
        Self {
            module_key: module_key.into(),
            total_count: 0,
            items: Vec::new(),
        }
    }
}

/// Ordered aggregate of all dispatched module groups.
///
/// Group order equals module registration order, invariant under completion
/// timing. Created fresh per request and owned by the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AggregateResult {
    /// One group per dispatched search-capable module.
    pub groups: Vec<ModuleResultGroup>,
}

impl AggregateResult {
    /// Number of module groups (dispatched modules).
    pub fn module_count(&self) -> usize {
        self.groups.len()
    }

    /// Sum of per-module totals across all groups.
    pub fn total_count(&self) -> u64 {
        self.groups.iter().map(|g| g.total_count).sum()
    }

    /// Look up a group by module key.
    pub fn group(&self, module_key: &str) -> Option<&ModuleResultGroup> {
        self.groups.iter().find(|g| g.module_key == module_key)
    }
}
