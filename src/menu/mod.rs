//! Menu model - static and dynamic menus and items.
//!
//! A menu is either a fixed title plus item list ([`StaticMenu`]) or a set
//! of generator functions ([`DynamicMenu`]) that produce items on demand.
//! Items likewise carry either a fixed label or a label function. The
//! manager only ever uses the shared operations on [`Menu`] and
//! [`MenuItem`], so both variants navigate and render the same way.
//!
//! Descriptors are `'static` and owned by the application; the manager
//! keeps references and compares menus by address.

pub mod manager;

use crate::config::LABEL_CAPACITY;
use crate::display::TextDisplay;

pub use manager::MenuManager;

/// Rendered title or item label.
pub type Label = heapless::String<LABEL_CAPACITY>;

/// Build a [`Label`], truncating at the capacity.
pub fn label(s: &str) -> Label {
    let mut out = Label::new();
    for c in s.chars() {
        if out.push(c).is_err() {
            break;
        }
    }
    out
}

/// Which neighbour of a cursor item a dynamic menu is asked for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    Prior,
    Next,
}

/// Item handler. Receives the root menu and the selected item; returns
/// `true` to reactivate the menu manager when it returns.
pub type ItemHandler = fn(&mut MenuContext<'_>, &'static Menu, &'static MenuItem) -> bool;

/// Fixed title and item list.
pub struct StaticMenu {
    pub title: &'static str,
    pub items: &'static [&'static MenuItem],
}

/// Menu whose title and items come from functions.
///
/// `item` is called with `None` for the first item and with the previous
/// item to walk forward (`Direction::Next`) or back (`Direction::Prior`).
pub struct DynamicMenu {
    /// Opaque word for the generator functions.
    pub data: usize,
    pub title: fn(&DynamicMenu) -> Label,
    pub item: fn(&DynamicMenu, Option<&'static MenuItem>, Direction) -> Option<&'static MenuItem>,
    pub has_item: fn(&DynamicMenu, Option<&'static MenuItem>, Direction) -> bool,
}

pub enum Menu {
    Static(StaticMenu),
    Dynamic(DynamicMenu),
}

impl Menu {
    pub fn title(&self) -> Label {
        match self {
            Menu::Static(m) => label(m.title),
            Menu::Dynamic(m) => (m.title)(m),
        }
    }

    /// Walk the items from the first. Static menus step by slot, so an
    /// item listed twice shows up twice.
    pub fn items(&self) -> MenuItems<'_> {
        MenuItems {
            menu: self,
            slot: 0,
            last: None,
        }
    }

    pub fn is_dynamic(&self) -> bool {
        matches!(self, Menu::Dynamic(_))
    }

    /// Address identity.
    pub fn same(&self, other: &Menu) -> bool {
        core::ptr::eq(self, other)
    }
}

/// Cursor over a menu's items, see [`Menu::items`].
pub struct MenuItems<'m> {
    menu: &'m Menu,
    slot: usize,
    last: Option<&'static MenuItem>,
}

impl MenuItems<'_> {
    /// Whether another item follows the ones already yielded.
    pub fn has_more(&self) -> bool {
        match self.menu {
            Menu::Static(m) => self.slot < m.items.len(),
            Menu::Dynamic(m) => (m.has_item)(m, self.last, Direction::Next),
        }
    }
}

impl Iterator for MenuItems<'_> {
    type Item = &'static MenuItem;

    fn next(&mut self) -> Option<Self::Item> {
        let item = match self.menu {
            Menu::Static(m) => m.items.get(self.slot).copied(),
            Menu::Dynamic(m) => (m.item)(m, self.last, Direction::Next),
        }?;
        self.slot += 1;
        self.last = Some(item);
        Some(item)
    }
}

/// Fixed label.
pub struct StaticItem {
    pub data: usize,
    pub label: &'static str,
    pub handler: Option<ItemHandler>,
}

/// Item whose label is produced on demand.
pub struct DynamicItem {
    pub data: usize,
    pub label: fn(&Menu, &DynamicItem) -> Label,
    pub handler: Option<ItemHandler>,
}

pub enum MenuItem {
    Static(StaticItem),
    Dynamic(DynamicItem),
}

impl MenuItem {
    pub fn label(&self, menu: &Menu) -> Label {
        match self {
            MenuItem::Static(i) => label(i.label),
            MenuItem::Dynamic(i) => (i.label)(menu, i),
        }
    }

    pub fn handler(&self) -> Option<ItemHandler> {
        match self {
            MenuItem::Static(i) => i.handler,
            MenuItem::Dynamic(i) => i.handler,
        }
    }

    pub fn data(&self) -> usize {
        match self {
            MenuItem::Static(i) => i.data,
            MenuItem::Dynamic(i) => i.data,
        }
    }
}

/// Follow-up a handler asked the manager for.
#[derive(Clone, Copy)]
pub(crate) enum Request {
    Enter(&'static Menu),
    Redisplay,
}

/// What an item handler gets to work with.
///
/// Navigation requested here is applied after the handler returns, so a
/// handler never sees the menu stack change underneath it.
pub struct MenuContext<'a> {
    display: &'a mut dyn TextDisplay,
    current: &'static Menu,
    request: Option<Request>,
}

impl<'a> MenuContext<'a> {
    pub(crate) fn new(display: &'a mut dyn TextDisplay, current: &'static Menu) -> Self {
        Self {
            display,
            current,
            request: None,
        }
    }

    /// The screen, for handlers that take over the display.
    pub fn display(&mut self) -> &mut dyn TextDisplay {
        &mut *self.display
    }

    /// The menu on top of the stack when the item was selected.
    pub fn current_menu(&self) -> &'static Menu {
        self.current
    }

    /// Enter `menu` once the handler returns.
    pub fn enter(&mut self, menu: &'static Menu) {
        self.request = Some(Request::Enter(menu));
    }

    /// Redraw the current menu and reactivate once the handler returns.
    pub fn redisplay(&mut self) {
        self.request = Some(Request::Redisplay);
    }

    pub(crate) fn into_request(self) -> Option<Request> {
        self.request
    }
}
