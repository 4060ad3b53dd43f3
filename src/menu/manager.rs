//! Menu manager - menu stack, cursor and input handling.
//!
//! The manager owns the text display and a bounded stack of menus. The
//! top of the stack is the menu on screen: row 0 holds its title, rows
//! 1.. hold as many items as fit, and the current item is drawn inverse.
//!
//! Input arrives as [`Message`]s. While inactive (an item handler owns
//! the screen) every message is ignored.
//!
//! ```text
//!  any menu ── CMD release (not at root) ──► parent menu
//!           ── CMD long-press ─────────────► main menu
//!           ── rotary push release ────────► item handler
//!           ── rotary step ────────────────► cursor up/down
//! ```

use crate::config::{DOWN_ARROW, INVERT_BIT, MENU_STACK_DEPTH, NORMAL_MASK, ROTARY_DEBOUNCE_MS, ROWS};
use crate::display::{DisplayInfo, TextDisplay};
use crate::error::Error;
use crate::input::{Message, MessageKind, SwitchAction, SwitchId};
use crate::menu::{Menu, MenuContext, MenuItem, Request};

/// Message kinds [`MenuManager::handle_message`] acts on.
const SUBSCRIPTIONS: [MessageKind; 3] = [
    MessageKind::RotaryChange,
    MessageKind::SwitchAction,
    MessageKind::Housekeeping,
];

/// One entry of the menu stack.
#[derive(Clone, Copy)]
pub struct Frame {
    pub menu: &'static Menu,
}

pub struct MenuManager<D> {
    display: D,
    info: DisplayInfo,
    active: bool,
    main_menu: Option<&'static Menu>,
    stack: heapless::Vec<Frame, MENU_STACK_DEPTH>,
    items_on_display: heapless::Vec<&'static MenuItem, ROWS>,
    item_current: Option<usize>,
    last_rotary_ms: Option<u32>,
    housekeeping_ticks: u32,
}

impl<D: TextDisplay> MenuManager<D> {
    /// Take over `display`. Nothing is drawn until a menu is entered.
    pub fn new(display: D) -> Self {
        let info = display.info();
        debug!("menu: {}x{} text grid", info.cols, info.rows);
        Self {
            display,
            info,
            active: false,
            main_menu: None,
            stack: heapless::Vec::new(),
            items_on_display: heapless::Vec::new(),
            item_current: None,
            last_rotary_ms: None,
            housekeeping_ticks: 0,
        }
    }

    /// Message kinds to route to [`handle_message`](Self::handle_message).
    pub fn subscriptions(&self) -> &'static [MessageKind] {
        &SUBSCRIPTIONS
    }

    /// Set the menu a long press on the CMD switch returns to.
    pub fn menu_main_set(&mut self, menu: &'static Menu) {
        self.main_menu = Some(menu);
    }

    /// Show `menu`, popping back to it if it is already on the stack.
    pub fn menu_enter(&mut self, menu: &'static Menu) -> Result<(), Error> {
        if !self.pop_to_menu(menu) {
            self.push_menu(menu)?;
        }
        self.show_current_menu()?;
        self.active = true;
        Ok(())
    }

    /// Redraw the current menu and take input again.
    pub fn menu_display_current(&mut self) -> Result<(), Error> {
        self.show_current_menu()?;
        self.active = true;
        Ok(())
    }

    pub fn handle_message(&mut self, msg: &mut Message) -> Result<(), Error> {
        match msg {
            Message::RotaryChange { t_ms, delta } => self.on_rotary(*t_ms, *delta),
            Message::SwitchAction(action) => self.on_switch(action),
            Message::Housekeeping => {
                self.housekeeping_ticks = self.housekeeping_ticks.wrapping_add(1);
                Ok(())
            }
            Message::Other(id) => {
                trace!("menu: ignoring message {}", *id);
                Ok(())
            }
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn item_current(&self) -> Option<usize> {
        self.item_current
    }

    pub fn items_displayed(&self) -> usize {
        self.items_on_display.len()
    }

    pub fn items_on_display(&self) -> &[&'static MenuItem] {
        &self.items_on_display
    }

    pub fn stack_depth(&self) -> usize {
        self.stack.len()
    }

    pub fn frames(&self) -> &[Frame] {
        &self.stack
    }

    pub fn current_menu(&self) -> Option<&'static Menu> {
        self.stack.last().map(|f| f.menu)
    }

    pub fn main_menu(&self) -> Option<&'static Menu> {
        self.main_menu
    }

    pub fn housekeeping_ticks(&self) -> u32 {
        self.housekeeping_ticks
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn display_mut(&mut self) -> &mut D {
        &mut self.display
    }

    // ── Stack ────────────────────────────────────────────────────────────

    fn push_menu(&mut self, menu: &'static Menu) -> Result<(), Error> {
        self.stack
            .push(Frame { menu })
            .map_err(|_| Error::MenuStackFull)?;
        if self.main_menu.is_none() {
            self.main_menu = Some(menu);
        }
        debug!("menu: push, depth {}", self.stack.len());
        Ok(())
    }

    /// Drop the top frame and return the menu now on top.
    fn pop_menu(&mut self) -> Option<&'static Menu> {
        self.stack.pop();
        debug!("menu: pop, depth {}", self.stack.len());
        self.current_menu()
    }

    /// Pop until `menu` is on top. Leaves the stack alone and returns
    /// `false` when `menu` is not on it.
    fn pop_to_menu(&mut self, menu: &'static Menu) -> bool {
        let Some(pos) = self.stack.iter().rposition(|f| f.menu.same(menu)) else {
            return false;
        };
        self.stack.truncate(pos + 1);
        true
    }

    // ── Drawing ──────────────────────────────────────────────────────────

    fn rows(&self) -> usize {
        (self.info.rows as usize).min(ROWS)
    }

    fn cols(&self) -> usize {
        self.info.cols as usize
    }

    fn show_current_menu(&mut self) -> Result<(), Error> {
        let menu = self.current_menu().ok_or(Error::NoMenu)?;
        let (rows, cols) = (self.rows(), self.cols());

        self.items_on_display.clear();
        self.item_current = None;

        self.display.clear(true)?;

        // Title, centered and underlined across the whole row.
        let title = menu.title();
        let len = title.len().min(cols);
        let left = (cols - len) / 2;
        for col in 0..cols {
            let c = match col.checked_sub(left) {
                Some(i) if i < len => title.as_bytes()[i] & NORMAL_MASK,
                _ => b' ',
            };
            self.display.put_char(0, col, c, true, false)?;
        }
        self.display.paint()?;

        let mut items = menu.items();
        for _ in 1..rows {
            let Some(item) = items.next() else {
                break;
            };
            if self.items_on_display.push(item).is_err() {
                break;
            }
            self.item_display(self.items_on_display.len() - 1, false)?;
        }

        if !self.items_on_display.is_empty() && items.has_more() {
            self.display.put_char(rows - 1, cols - 1, DOWN_ARROW, false, true)?;
        }

        if !self.items_on_display.is_empty() {
            self.item_make_current(0)?;
        }
        Ok(())
    }

    /// Move the highlight to item `ndx`.
    fn item_make_current(&mut self, ndx: usize) -> Result<(), Error> {
        if let Some(prev) = self.item_current {
            self.item_display(prev, false)?;
        }
        self.item_current = Some(ndx);
        self.item_display(ndx, true)
    }

    /// Draw item `ndx` on row `ndx + 1`, space-padded to the full width.
    fn item_display(&mut self, ndx: usize, inverse: bool) -> Result<(), Error> {
        let (Some(&item), Some(menu)) = (self.items_on_display.get(ndx), self.current_menu()) else {
            return Ok(());
        };
        let label = item.label(menu);
        let attr = if inverse { INVERT_BIT } else { 0 };
        for col in 0..self.cols() {
            let c = label.as_bytes().get(col).map_or(b' ', |b| b & NORMAL_MASK);
            self.display.put_char(ndx + 1, col, c | attr, false, false)?;
        }
        self.display.paint()
    }

    /// Run the handler of item `ndx`, then apply whatever it asked for.
    fn item_select(&mut self, ndx: usize) -> Result<(), Error> {
        let Some(&item) = self.items_on_display.get(ndx) else {
            return Ok(());
        };
        let Some(handler) = item.handler() else {
            return Ok(());
        };
        let (Some(root), Some(current)) = (self.stack.first().map(|f| f.menu), self.current_menu())
        else {
            return Ok(());
        };

        debug!("menu: select item {}", ndx);
        self.active = false;
        let mut ctx = MenuContext::new(&mut self.display, current);
        let reactivate = handler(&mut ctx, root, item);
        let request = ctx.into_request();
        self.active = reactivate;

        match request {
            Some(Request::Enter(menu)) => self.menu_enter(menu),
            Some(Request::Redisplay) => self.menu_display_current(),
            None => Ok(()),
        }
    }

    // ── Input ────────────────────────────────────────────────────────────

    fn on_rotary(&mut self, t_ms: u32, delta: i16) -> Result<(), Error> {
        if !self.active {
            return Ok(());
        }
        if let Some(last) = self.last_rotary_ms {
            if t_ms.wrapping_sub(last) < ROTARY_DEBOUNCE_MS {
                trace!("menu: rotary debounced");
                return Ok(());
            }
        }
        self.last_rotary_ms = Some(t_ms);

        let Some(cur) = self.item_current else {
            return Ok(());
        };
        let next = if delta > 0 {
            select_prev(cur)
        } else if delta < 0 {
            select_next(cur, self.items_displayed())
        } else {
            cur
        };
        if next != cur {
            self.item_make_current(next)?;
        }
        Ok(())
    }

    fn on_switch(&mut self, action: &mut SwitchAction) -> Result<(), Error> {
        if !self.active {
            return Ok(());
        }
        action.abort = true;

        match action.switch {
            SwitchId::AttnCmd if action.longpress => {
                if let Some(main) = self.main_menu {
                    self.pop_to_menu(main);
                    self.show_current_menu()?;
                }
            }
            SwitchId::AttnCmd if !action.pressed => {
                if self.stack.len() > 1 {
                    self.pop_menu();
                    self.show_current_menu()?;
                }
            }
            SwitchId::Rotary if !action.pressed => {
                if let Some(cur) = self.item_current {
                    self.item_select(cur)?;
                }
            }
            _ => {}
        }
        Ok(())
    }
}

/// Cursor one item up, stopping at the first.
fn select_prev(selected: usize) -> usize {
    selected.saturating_sub(1)
}

/// Cursor one item down if another item is displayed.
fn select_next(selected: usize, item_count: usize) -> usize {
    if selected + 1 < item_count {
        selected + 1
    } else {
        selected
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{COLS, HRES};
    use crate::display::screen::Screen;
    use crate::menu::{DynamicItem, DynamicMenu, Direction, Label, StaticItem, StaticMenu};
    use crate::testutil::{test_screen, Recorder};
    use core::sync::atomic::{AtomicUsize, Ordering};

    type Manager = MenuManager<Screen<Recorder>>;

    const fn item(label: &'static str) -> MenuItem {
        MenuItem::Static(StaticItem {
            data: 0,
            label,
            handler: None,
        })
    }

    static X: MenuItem = item("X");
    static Y: MenuItem = item("Y");
    static Z: MenuItem = item("Z");
    static XYZ: Menu = Menu::Static(StaticMenu {
        title: "Main",
        items: &XYZ_ITEMS,
    });
    static XYZ_ITEMS: [&MenuItem; 3] = [&X, &Y, &Z];

    fn enter_child(ctx: &mut MenuContext<'_>, _root: &'static Menu, _item: &'static MenuItem) -> bool {
        ctx.enter(&CHILD);
        false
    }

    static TO_CHILD: MenuItem = MenuItem::Static(StaticItem {
        data: 0,
        label: "Settings",
        handler: Some(enter_child),
    });
    static PARENT: Menu = Menu::Static(StaticMenu {
        title: "A",
        items: &PARENT_ITEMS,
    });
    static PARENT_ITEMS: [&MenuItem; 2] = [&TO_CHILD, &X];
    static CHILD: Menu = Menu::Static(StaticMenu {
        title: "B",
        items: &CHILD_ITEMS,
    });
    static CHILD_ITEMS: [&MenuItem; 2] = [&Y, &Z];

    static SELECTIONS: AtomicUsize = AtomicUsize::new(0);

    fn count_and_stay(_ctx: &mut MenuContext<'_>, _root: &'static Menu, _item: &'static MenuItem) -> bool {
        SELECTIONS.fetch_add(1, Ordering::Relaxed);
        true
    }

    fn take_over(ctx: &mut MenuContext<'_>, _root: &'static Menu, _item: &'static MenuItem) -> bool {
        let _ = ctx.display().clear(true);
        let _ = ctx.display().put_str(2, 0, "Busy", false, false, true);
        false
    }

    static COUNTER: MenuItem = MenuItem::Static(StaticItem {
        data: 0,
        label: "Count",
        handler: Some(count_and_stay),
    });
    static BUSY: MenuItem = MenuItem::Static(StaticItem {
        data: 0,
        label: "Busy",
        handler: Some(take_over),
    });
    static ACTIONS: Menu = Menu::Static(StaticMenu {
        title: "Actions",
        items: &ACTION_ITEMS,
    });
    static ACTION_ITEMS: [&MenuItem; 3] = [&COUNTER, &BUSY, &X];

    static L0: MenuItem = item("0");
    static L1: MenuItem = item("1");
    static L2: MenuItem = item("2");
    static L3: MenuItem = item("3");
    static L4: MenuItem = item("4");
    static L5: MenuItem = item("5");
    static L6: MenuItem = item("6");
    static LONG: Menu = Menu::Static(StaticMenu {
        title: "Long",
        items: &LONG_ITEMS,
    });
    static LONG_ITEMS: [&MenuItem; 7] = [&L0, &L1, &L2, &L3, &L4, &L5, &L6];

    static EMPTY: Menu = Menu::Static(StaticMenu {
        title: "Empty",
        items: &[],
    });

    static D_ITEMS: [MenuItem; 3] = [dyn_item(0), dyn_item(1), dyn_item(2)];

    const fn dyn_item(data: usize) -> MenuItem {
        MenuItem::Dynamic(DynamicItem {
            data,
            label: dyn_label,
            handler: None,
        })
    }

    fn dyn_label(_menu: &Menu, item: &DynamicItem) -> Label {
        let mut l = crate::menu::label("Row ");
        let _ = l.push(char::from(b'0' + item.data as u8));
        l
    }

    fn dyn_title(_menu: &DynamicMenu) -> Label {
        crate::menu::label("Dyn")
    }

    fn dyn_next(
        _menu: &DynamicMenu,
        cursor: Option<&'static MenuItem>,
        dir: Direction,
    ) -> Option<&'static MenuItem> {
        if dir == Direction::Prior {
            return None;
        }
        let next = cursor.map_or(0, |c| c.data() + 1);
        D_ITEMS.get(next)
    }

    fn dyn_has(menu: &DynamicMenu, cursor: Option<&'static MenuItem>, dir: Direction) -> bool {
        dyn_next(menu, cursor, dir).is_some()
    }

    static DYN: Menu = Menu::Dynamic(DynamicMenu {
        data: 0,
        title: dyn_title,
        item: dyn_next,
        has_item: dyn_has,
    });

    fn manager() -> Manager {
        MenuManager::new(test_screen())
    }

    fn rotate(m: &mut Manager, t_ms: u32, delta: i16) {
        m.handle_message(&mut Message::RotaryChange { t_ms, delta })
            .unwrap();
    }

    fn switch(m: &mut Manager, action: SwitchAction) -> SwitchAction {
        let mut msg = Message::SwitchAction(action);
        m.handle_message(&mut msg).unwrap();
        match msg {
            Message::SwitchAction(a) => a,
            _ => unreachable!(),
        }
    }

    fn row_text(m: &Manager, row: usize) -> [u8; COLS] {
        m.display().text()[row]
    }

    fn is_inverse(m: &Manager, row: usize) -> bool {
        row_text(m, row)[0] & INVERT_BIT != 0
    }

    #[test]
    fn nothing_drawn_before_first_menu() {
        let m = manager();
        assert!(!m.is_active());
        assert_eq!(m.item_current(), None);
        assert_eq!(m.stack_depth(), 0);
        assert!(m.display().panel().transport().ops.is_empty());
        assert_eq!(m.subscriptions().len(), 3);
    }

    #[test]
    fn enter_draws_title_and_items() {
        let mut m = manager();
        m.menu_enter(&XYZ).unwrap();

        assert!(m.is_active());
        assert_eq!(m.items_displayed(), 3);
        assert_eq!(m.item_current(), Some(0));
        assert_eq!(&row_text(&m, 0), b"     Main     ");
        assert_eq!(row_text(&m, 1)[0], b'X' | INVERT_BIT);
        assert_eq!(row_text(&m, 1)[1], b' ' | INVERT_BIT);
        assert_eq!(&row_text(&m, 2), b"Y             ");
        assert_eq!(&row_text(&m, 4), &[0u8; COLS]);
        // First menu entered becomes the main menu.
        assert!(m.main_menu().unwrap().same(&XYZ));
    }

    #[test]
    fn title_row_is_underlined() {
        let mut m = manager();
        m.menu_enter(&XYZ).unwrap();
        // Row 0 underline is bit 9 of the cell: bit 1 of page 1.
        let frame = m.display().frame();
        for col in 2..2 + COLS * 9 {
            assert_ne!(frame[HRES + col] & 0x02, 0, "column {col}");
        }
    }

    #[test]
    fn rotary_moves_and_clamps() {
        let mut m = manager();
        m.menu_enter(&XYZ).unwrap();

        rotate(&mut m, 1000, -1);
        assert_eq!(m.item_current(), Some(1));
        assert!(!is_inverse(&m, 1));
        assert!(is_inverse(&m, 2));

        rotate(&mut m, 1300, -1);
        rotate(&mut m, 1600, -1);
        assert_eq!(m.item_current(), Some(2));

        for t in [1900, 2200, 2500] {
            rotate(&mut m, t, 1);
        }
        assert_eq!(m.item_current(), Some(0));
        rotate(&mut m, 2800, 1);
        assert_eq!(m.item_current(), Some(0));
    }

    #[test]
    fn rotary_debounce_drops_close_events() {
        let mut m = manager();
        m.menu_enter(&XYZ).unwrap();
        rotate(&mut m, 1000, -1);
        rotate(&mut m, 1100, -1);
        assert_eq!(m.item_current(), Some(1));
        // 200 ms after the last handled event is far enough apart.
        rotate(&mut m, 1200, -1);
        assert_eq!(m.item_current(), Some(2));
        rotate(&mut m, 1399, 1);
        assert_eq!(m.item_current(), Some(2));
        rotate(&mut m, 1400, 1);
        assert_eq!(m.item_current(), Some(1));
    }

    #[test]
    fn exactly_one_row_inverse() {
        let mut m = manager();
        m.menu_enter(&XYZ).unwrap();
        for (i, t) in [1000u32, 1300, 1600, 1900].into_iter().enumerate() {
            rotate(&mut m, t, if i % 2 == 0 { -1 } else { 1 });
            let inverse = (1..ROWS).filter(|&r| is_inverse(&m, r)).count();
            assert_eq!(inverse, 1);
            assert!(is_inverse(&m, m.item_current().unwrap() + 1));
        }
    }

    #[test]
    fn submenu_and_back() {
        let mut m = manager();
        m.menu_enter(&PARENT).unwrap();
        let released = switch(&mut m, SwitchAction::release(SwitchId::Rotary));
        assert!(released.abort);

        assert_eq!(m.stack_depth(), 2);
        assert!(m.current_menu().unwrap().same(&CHILD));
        assert!(m.is_active());
        assert_eq!(&row_text(&m, 0), b"      B       ");

        rotate(&mut m, 1000, -1);
        assert_eq!(m.item_current(), Some(1));

        switch(&mut m, SwitchAction::release(SwitchId::AttnCmd));
        assert_eq!(m.stack_depth(), 1);
        assert!(m.current_menu().unwrap().same(&PARENT));
        assert_eq!(m.item_current(), Some(0));
    }

    #[test]
    fn back_at_root_does_nothing() {
        let mut m = manager();
        m.menu_enter(&XYZ).unwrap();
        rotate(&mut m, 1000, -1);
        let ops = m.display().panel().transport().ops.len();
        switch(&mut m, SwitchAction::release(SwitchId::AttnCmd));
        assert_eq!(m.stack_depth(), 1);
        assert_eq!(m.item_current(), Some(1));
        assert_eq!(m.display().panel().transport().ops.len(), ops);
    }

    #[test]
    fn long_press_returns_to_main() {
        let mut m = manager();
        m.menu_enter(&XYZ).unwrap();
        m.menu_enter(&PARENT).unwrap();
        m.menu_enter(&CHILD).unwrap();
        assert_eq!(m.stack_depth(), 3);

        switch(&mut m, SwitchAction::long(SwitchId::AttnCmd, false));
        assert_eq!(m.stack_depth(), 1);
        assert!(m.current_menu().unwrap().same(&XYZ));
    }

    #[test]
    fn press_events_do_not_navigate() {
        let mut m = manager();
        m.menu_enter(&PARENT).unwrap();
        m.menu_enter(&CHILD).unwrap();
        let pressed = switch(&mut m, SwitchAction::press(SwitchId::AttnCmd));
        assert!(pressed.abort);
        switch(&mut m, SwitchAction::press(SwitchId::Rotary));
        assert_eq!(m.stack_depth(), 2);
    }

    #[test]
    fn enter_existing_menu_pops_to_it() {
        let mut m = manager();
        m.menu_enter(&XYZ).unwrap();
        m.menu_enter(&PARENT).unwrap();
        m.menu_enter(&CHILD).unwrap();
        m.menu_enter(&PARENT).unwrap();
        assert_eq!(m.stack_depth(), 2);
        assert!(m.current_menu().unwrap().same(&PARENT));
        let count = m.frames().iter().filter(|f| f.menu.same(&PARENT)).count();
        assert_eq!(count, 1);
    }

    #[test]
    fn stack_overflow_is_reported() {
        const DEEP_MENU: Menu = Menu::Static(StaticMenu {
            title: "Deep",
            items: &[],
        });
        static DEEP: [Menu; MENU_STACK_DEPTH + 1] = [DEEP_MENU; MENU_STACK_DEPTH + 1];

        let mut m = manager();
        for menu in &DEEP[..MENU_STACK_DEPTH] {
            m.menu_enter(menu).unwrap();
        }
        assert_eq!(m.menu_enter(&DEEP[MENU_STACK_DEPTH]), Err(Error::MenuStackFull));
        assert_eq!(m.stack_depth(), MENU_STACK_DEPTH);
    }

    #[test]
    fn long_menu_shows_arrow() {
        let mut m = manager();
        m.menu_enter(&LONG).unwrap();
        assert_eq!(m.items_displayed(), ROWS - 1);
        // The arrow is overdrawn when its row is repainted; it stays until then.
        assert_eq!(m.display().char_at(ROWS - 1, COLS - 1), Some(DOWN_ARROW));
    }

    static REPEATED: Menu = Menu::Static(StaticMenu {
        title: "Again",
        items: &REPEATED_ITEMS,
    });
    static REPEATED_ITEMS: [&MenuItem; 4] = [&X, &Y, &X, &Z];

    #[test]
    fn repeated_item_keeps_its_slots() {
        let mut m = manager();
        m.menu_enter(&REPEATED).unwrap();
        assert_eq!(m.items_displayed(), 4);
        let firsts: Vec<u8> = (1..=4).map(|r| row_text(&m, r)[0] & NORMAL_MASK).collect();
        assert_eq!(firsts, b"XYXZ");
        assert_ne!(m.display().char_at(ROWS - 1, COLS - 1), Some(DOWN_ARROW));
    }

    #[test]
    fn short_menu_has_no_arrow() {
        let mut m = manager();
        m.menu_enter(&XYZ).unwrap();
        assert_ne!(m.display().char_at(ROWS - 1, COLS - 1), Some(DOWN_ARROW));
    }

    #[test]
    fn empty_menu_has_no_cursor() {
        let mut m = manager();
        m.menu_enter(&EMPTY).unwrap();
        assert_eq!(m.items_displayed(), 0);
        assert_eq!(m.item_current(), None);
        rotate(&mut m, 1000, -1);
        switch(&mut m, SwitchAction::release(SwitchId::Rotary));
        assert_eq!(m.item_current(), None);
    }

    #[test]
    fn redraw_is_idempotent() {
        let mut m = manager();
        m.menu_enter(&LONG).unwrap();
        rotate(&mut m, 1000, -1);
        m.menu_display_current().unwrap();
        let frame = *m.display().frame();
        let items: Vec<_> = m.items_on_display().iter().map(|i| *i as *const MenuItem).collect();

        m.menu_display_current().unwrap();
        assert_eq!(m.display().frame(), &frame);
        let again: Vec<_> = m.items_on_display().iter().map(|i| *i as *const MenuItem).collect();
        assert_eq!(items, again);
        assert_eq!(m.item_current(), Some(0));
    }

    #[test]
    fn handler_returning_true_stays_active() {
        let mut m = manager();
        m.menu_enter(&ACTIONS).unwrap();
        let before = SELECTIONS.load(Ordering::Relaxed);
        switch(&mut m, SwitchAction::release(SwitchId::Rotary));
        assert!(SELECTIONS.load(Ordering::Relaxed) > before);
        assert!(m.is_active());
    }

    #[test]
    fn handler_returning_false_blocks_input() {
        let mut m = manager();
        m.menu_enter(&ACTIONS).unwrap();
        rotate(&mut m, 1000, -1);
        switch(&mut m, SwitchAction::release(SwitchId::Rotary));
        assert!(!m.is_active());
        assert_eq!(&row_text(&m, 2)[..4], b"Busy");

        // Ignored while the handler owns the screen.
        rotate(&mut m, 2000, -1);
        let ignored = switch(&mut m, SwitchAction::release(SwitchId::AttnCmd));
        assert!(!ignored.abort);
        assert_eq!(m.item_current(), Some(1));

        m.menu_display_current().unwrap();
        assert!(m.is_active());
        assert_eq!(m.item_current(), Some(0));
        assert_eq!(&row_text(&m, 0), b"   Actions    ");
    }

    #[test]
    fn item_without_handler_is_noop() {
        let mut m = manager();
        m.menu_enter(&XYZ).unwrap();
        let ops = m.display().panel().transport().ops.len();
        switch(&mut m, SwitchAction::release(SwitchId::Rotary));
        assert!(m.is_active());
        assert_eq!(m.display().panel().transport().ops.len(), ops);
    }

    #[test]
    fn dynamic_menu_renders_generated_items() {
        let mut m = manager();
        m.menu_enter(&DYN).unwrap();
        assert_eq!(m.items_displayed(), 3);
        assert_eq!(&row_text(&m, 0), b"     Dyn      ");
        assert_eq!(&row_text(&m, 3), b"Row 2         ");
        rotate(&mut m, 1000, -1);
        rotate(&mut m, 1200, -1);
        rotate(&mut m, 1400, -1);
        assert_eq!(m.item_current(), Some(2));
    }

    #[test]
    fn housekeeping_and_unknown_messages() {
        let mut m = manager();
        m.handle_message(&mut Message::Housekeeping).unwrap();
        m.handle_message(&mut Message::Housekeeping).unwrap();
        m.handle_message(&mut Message::Other(9)).unwrap();
        assert_eq!(m.housekeeping_ticks(), 2);
        assert_eq!(m.stack_depth(), 0);
    }

    #[test]
    fn redisplay_without_menu_fails() {
        let mut m = manager();
        assert_eq!(m.menu_display_current(), Err(Error::NoMenu));
    }

    #[test]
    fn select_helpers_clamp() {
        assert_eq!(select_prev(0), 0);
        assert_eq!(select_prev(3), 2);
        assert_eq!(select_next(0, 1), 0);
        assert_eq!(select_next(0, 3), 1);
        assert_eq!(select_next(2, 3), 2);
    }
}
