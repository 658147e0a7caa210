//! Dashboard widget registry.

use serde::{Deserialize, Serialize};

/// Dashboard area a widget renders into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum WidgetArea {
    /// Main dashboard column.
    #[default]
    Main,
    /// Side column.
    Side,
}

/// A widget contributed by a module.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WidgetDescriptor {
    /// Widget identifier, unique within its module.
    pub id: String,

    /// Display title.
    pub title: String,

    /// Dashboard area.
    #[serde(default)]
    pub area: WidgetArea,

    /// Sort order within the area, ascending.
    #[serde(default)]
    pub sort_order: u32,
}

impl WidgetDescriptor {
    /// Create a widget descriptor.
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            area: WidgetArea::default(),
            sort_order: 0,
        }
    }

    /// Set the dashboard area.
    pub fn with_area(mut self, area: WidgetArea) -> Self {
        self.area = area;
        self
    }

    /// Set the sort order.
    pub fn with_sort_order(mut self, sort_order: u32) -> Self {
        self.sort_order = sort_order;
        self
    }
}

/// A registered widget with its owning module.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisteredWidget {
    /// Key of the module that registered the widget.
    pub module_key: String,

    /// The widget itself.
    #[serde(flatten)]
    pub widget: WidgetDescriptor,
}

/// Collects widgets during registration.
///
/// Widgets are stored in registration order; [`WidgetRegistry::list`] returns
/// them sorted by area and sort order for rendering.
#[derive(Debug, Default)]
pub struct WidgetRegistry {
    widgets: Vec<RegisteredWidget>,
}

impl WidgetRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register all widgets of one module.
    pub fn register(&mut self, module_key: &str, widgets: Vec<WidgetDescriptor>) {
        for widget in widgets {
            self.widgets.push(RegisteredWidget {
                module_key: module_key.to_string(),
                widget,
            });
        }
    }

    /// All widgets sorted for rendering.
    pub fn list(&self) -> Vec<RegisteredWidget> {
        let mut sorted = self.widgets.clone();
        sorted.sort_by_key(|w| (w.widget.area as u8, w.widget.sort_order));
        sorted
    }

    /// Number of registered widgets.
    pub fn len(&self) -> usize {
        self.widgets.len()
    }

    /// Whether no widget is registered.
    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty()
    }
}
