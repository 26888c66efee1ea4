use std::fmt;
use std::rc::Rc;

/// Callback invoked when a menu item is activated.
pub type MenuAction = Rc<dyn Fn()>;

/// A single selectable row of a context menu.
///
/// `key` only needs to be unique within its sibling group; the globally
/// unique identifier is the [`MenuKey`](super::MenuKey) of the whole menu.
#[derive(Clone)]
pub struct MenuItem {
    pub key: String,
    pub label: String,
    pub shortcut: Option<String>,
    action: Option<MenuAction>,
    /// Nested sections shown as a submenu. Structure is fixed at
    /// registration time, so menus nest to any depth without cycles.
    pub children: Vec<MenuGroup>,
}

impl MenuItem {
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            shortcut: None,
            action: None,
            children: Vec::new(),
        }
    }

    /// Attach a keyboard shortcut hint (display only).
    pub fn shortcut(mut self, shortcut: impl Into<String>) -> Self {
        self.shortcut = Some(shortcut.into());
        self
    }

    /// Attach the activation callback.
    pub fn on_activate(mut self, action: impl Fn() + 'static) -> Self {
        self.action = Some(Rc::new(action));
        self
    }

    /// Attach submenu sections.
    pub fn submenu(mut self, groups: Vec<MenuGroup>) -> Self {
        self.children = groups;
        self
    }

    /// Run the activation callback, if any.
    pub fn activate(&self) {
        if let Some(action) = &self.action {
            action();
        }
    }

    /// Whether the item opens a submenu instead of running an action.
    pub fn has_submenu(&self) -> bool {
        !self.children.is_empty()
    }
}

impl fmt::Debug for MenuItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MenuItem")
            .field("key", &self.key)
            .field("label", &self.label)
            .field("shortcut", &self.shortcut)
            .field("has_action", &self.action.is_some())
            .field("children", &self.children)
            .finish()
    }
}

/// A visually separated run of items.
#[derive(Clone, Debug, Default)]
pub struct MenuGroup {
    pub items: Vec<MenuItem>,
}

impl MenuGroup {
    pub fn new(items: Vec<MenuItem>) -> Self {
        Self { items }
    }
}

/// An ordered list of groups making up one renderable menu.
#[derive(Clone, Debug, Default)]
pub struct MenuDefinition {
    pub groups: Vec<MenuGroup>,
}

impl MenuDefinition {
    pub fn new(groups: Vec<MenuGroup>) -> Self {
        Self { groups }
    }

    /// Total number of items across all top-level groups.
    pub fn len(&self) -> usize {
        self.groups.iter().map(|group| group.items.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Menu content handed to registration: either a ready definition or a
/// factory run once, lazily, at first registration of the key.
pub enum MenuSource {
    Static(MenuDefinition),
    Lazy(Box<dyn FnOnce() -> MenuDefinition>),
}

impl MenuSource {
    /// Build the definition, consuming the source.
    pub(crate) fn resolve(self) -> MenuDefinition {
        match self {
            MenuSource::Static(definition) => definition,
            MenuSource::Lazy(factory) => factory(),
        }
    }
}

impl From<MenuDefinition> for MenuSource {
    fn from(definition: MenuDefinition) -> Self {
        MenuSource::Static(definition)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn activate_runs_the_attached_action() {
        let hits = Rc::new(Cell::new(0));
        let seen = hits.clone();
        let item = MenuItem::new("open", "Open").on_activate(move || seen.set(seen.get() + 1));
        item.activate();
        item.activate();
        assert_eq!(hits.get(), 2);
    }

    #[test]
    fn activate_without_action_is_a_no_op() {
        MenuItem::new("noop", "Nothing").activate();
    }

    #[test]
    fn lazy_source_resolves_to_factory_output() {
        let source = MenuSource::Lazy(Box::new(|| {
            MenuDefinition::new(vec![MenuGroup::new(vec![MenuItem::new("a", "A")])])
        }));
        let definition = source.resolve();
        assert_eq!(definition.len(), 1);
        assert_eq!(definition.groups[0].items[0].key, "a");
    }

    #[test]
    fn definition_len_counts_top_level_items_per_group() {
        let definition = MenuDefinition::new(vec![
            MenuGroup::new(vec![MenuItem::new("a", "A"), MenuItem::new("b", "B")]),
            MenuGroup::new(vec![MenuItem::new("c", "C")]),
        ]);
        assert_eq!(definition.len(), 3);
        assert!(!definition.is_empty());
    }
}
