use std::{
    cell::{Cell, Ref, RefCell},
    collections::HashMap,
    fmt,
    rc::Rc,
};

use super::definition::{MenuDefinition, MenuSource};

/// Identifier of one logical context menu across all of its trigger sites.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MenuKey(String);

impl MenuKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for MenuKey {
    fn from(key: &str) -> Self {
        Self(key.to_string())
    }
}

impl fmt::Display for MenuKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Screen position where a menu should be anchored.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MenuPosition {
    pub x: i32,
    pub y: i32,
}

/// Pointer event carrying the screen coordinates of a secondary click.
///
/// `consume` marks the event as handled so ancestor handlers (such as the
/// global click-away close in the renderer) skip it within the same event
/// turn; without that, a freshly opened menu would be closed immediately.
#[derive(Debug)]
pub struct PointerEvent {
    pub x: i32,
    pub y: i32,
    consumed: Cell<bool>,
}

impl PointerEvent {
    pub fn new(x: i32, y: i32) -> Self {
        Self {
            x,
            y,
            consumed: Cell::new(false),
        }
    }

    pub fn consume(&self) {
        self.consumed.set(true);
    }

    pub fn is_consumed(&self) -> bool {
        self.consumed.get()
    }
}

/// Mutable display record driving one menu's on-screen presentation.
#[derive(Clone, Debug, Default)]
pub struct MenuDisplay<P> {
    /// Context captured at trigger time (e.g. which row was clicked).
    pub payload: P,
    pub visible: bool,
    pub position: MenuPosition,
}

struct MenuEntry<P> {
    definition: Rc<MenuDefinition>,
    display: Rc<RefCell<MenuDisplay<P>>>,
}

/// Keyed store of context menus, one shared display cell per key.
///
/// The registry is an explicit service object: the app constructs one
/// instance at startup and hands it (via `Rc`) to every consumer, so tests
/// can run against isolated instances. There is no unregister; menu keys
/// are a small set fixed by the UI's design.
pub struct MenuRegistry<P> {
    entries: RefCell<HashMap<MenuKey, MenuEntry<P>>>,
}

impl<P: Default> MenuRegistry<P> {
    pub fn new() -> Self {
        Self {
            entries: RefCell::new(HashMap::new()),
        }
    }

    /// Bind `key` to a menu and return a handle for triggering it.
    ///
    /// The first registration for a key resolves `source` (a lazy factory
    /// runs exactly once) and creates the display cell hidden at (0,0).
    /// Every later registration for the same key returns a handle to the
    /// existing entry and ignores its `source` argument, keeping a single
    /// source of truth for state shared across mount points. Callers must
    /// therefore treat keys as globally unique: a colliding registration
    /// with a different definition silently keeps the first one.
    pub fn register(&self, key: impl Into<MenuKey>, source: impl Into<MenuSource>) -> MenuHandle<P> {
        let key = key.into();
        let mut entries = self.entries.borrow_mut();
        let entry = entries.entry(key.clone()).or_insert_with(|| MenuEntry {
            definition: Rc::new(source.into().resolve()),
            display: Rc::new(RefCell::new(MenuDisplay::default())),
        });
        MenuHandle {
            key,
            definition: entry.definition.clone(),
            display: entry.display.clone(),
        }
    }

    /// Handle for an already registered key.
    pub fn handle(&self, key: &MenuKey) -> Option<MenuHandle<P>> {
        let entries = self.entries.borrow();
        entries.get(key).map(|entry| MenuHandle {
            key: key.clone(),
            definition: entry.definition.clone(),
            display: entry.display.clone(),
        })
    }

    /// Keys of menus currently flagged visible, in stable order.
    ///
    /// Triggering one menu never hides another; exclusivity (at most one
    /// open menu) is the renderer's policy, built on this iteration.
    pub fn visible_keys(&self) -> Vec<MenuKey> {
        let mut keys: Vec<MenuKey> = self
            .entries
            .borrow()
            .iter()
            .filter(|(_, entry)| entry.display.borrow().visible)
            .map(|(key, _)| key.clone())
            .collect();
        keys.sort();
        keys
    }

    /// Hide every menu except `keep`, if given. Used by the renderer to
    /// enforce single-open-menu policy and click-away closing.
    pub fn close_all_except(&self, keep: Option<&MenuKey>) {
        for (key, entry) in self.entries.borrow().iter() {
            if Some(key) != keep {
                entry.display.borrow_mut().visible = false;
            }
        }
    }

    pub fn close_all(&self) {
        self.close_all_except(None);
    }
}

impl<P: Default> Default for MenuRegistry<P> {
    fn default() -> Self {
        Self::new()
    }
}

/// Handle bound to one registered menu entry.
///
/// Cloning a handle, or re-registering its key, aliases the same display
/// cell; a missing-key lookup is impossible through a handle because it
/// closes over its own entry.
#[derive(Clone)]
pub struct MenuHandle<P> {
    key: MenuKey,
    definition: Rc<MenuDefinition>,
    display: Rc<RefCell<MenuDisplay<P>>>,
}

impl<P> MenuHandle<P> {
    pub fn key(&self) -> &MenuKey {
        &self.key
    }

    pub fn definition(&self) -> &MenuDefinition {
        &self.definition
    }

    /// Open the menu at the event position.
    ///
    /// Consumes the event and flips visibility synchronously within the
    /// current event turn, before any click-away listener can observe it.
    /// Prior position and visibility are overwritten unconditionally.
    pub fn trigger(&self, event: &PointerEvent) {
        event.consume();
        let mut display = self.display.borrow_mut();
        display.position = MenuPosition {
            x: event.x,
            y: event.y,
        };
        display.visible = true;
    }

    /// Open the menu at the event position with a fresh payload.
    pub fn trigger_with(&self, event: &PointerEvent, payload: P) {
        self.display.borrow_mut().payload = payload;
        self.trigger(event);
    }

    pub fn hide(&self) {
        self.display.borrow_mut().visible = false;
    }

    pub fn display(&self) -> Ref<'_, MenuDisplay<P>> {
        self.display.borrow()
    }

    /// Whether `other` is bound to the same display cell.
    pub fn shares_display_with(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.display, &other.display)
    }

    /// Whether `other` is bound to the same resolved definition.
    pub fn shares_definition_with(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.definition, &other.definition)
    }
}
