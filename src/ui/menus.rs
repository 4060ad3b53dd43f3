//! Demo menu tree.
//!
//! ```text
//! Main Menu
//!   Settings  ──► Sound: on/off, Back
//!   Counter   ──► (generated) Add 1, Add 5, Add 10, Reset
//!   About     ──► full-screen text until the next switch release
//! ```

use core::fmt::Write;
use core::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use oledmenu::menu::{
    label, Direction, DynamicItem, DynamicMenu, Label, Menu, MenuContext, MenuItem, StaticItem,
    StaticMenu,
};
use oledmenu::{Error, TextDisplay};

pub static MAIN: Menu = Menu::Static(StaticMenu {
    title: "Main Menu",
    items: &MAIN_ITEMS,
});

static MAIN_ITEMS: [&MenuItem; 3] = [&SETTINGS_ITEM, &COUNTER_ITEM, &ABOUT_ITEM];

static SETTINGS_ITEM: MenuItem = MenuItem::Static(StaticItem {
    data: 0,
    label: "Settings",
    handler: Some(open_settings),
});

static COUNTER_ITEM: MenuItem = MenuItem::Static(StaticItem {
    data: 0,
    label: "Counter",
    handler: Some(open_counter),
});

static ABOUT_ITEM: MenuItem = MenuItem::Static(StaticItem {
    data: 0,
    label: "About",
    handler: Some(show_about),
});

fn open_settings(ctx: &mut MenuContext<'_>, _root: &'static Menu, _item: &'static MenuItem) -> bool {
    ctx.enter(&SETTINGS);
    true
}

fn open_counter(ctx: &mut MenuContext<'_>, _root: &'static Menu, _item: &'static MenuItem) -> bool {
    ctx.enter(&COUNTER);
    true
}

/// Take over the screen; the UI task hands it back on the next release.
fn show_about(ctx: &mut MenuContext<'_>, _root: &'static Menu, _item: &'static MenuItem) -> bool {
    if draw_about(ctx.display()).is_err() {
        // Back in the menu straight away if the panel did not take it.
        ctx.redisplay();
        return true;
    }
    false
}

fn draw_about(display: &mut dyn TextDisplay) -> Result<(), Error> {
    display.clear(false)?;
    display.put_str(1, 0, "oledmenu", false, true, false)?;
    display.put_str(3, 0, env!("CARGO_PKG_VERSION"), false, false, false)?;
    display.put_str(5, 0, "any key: back", false, false, true)
}

// Settings

static SOUND: AtomicBool = AtomicBool::new(true);

static SETTINGS: Menu = Menu::Static(StaticMenu {
    title: "Settings",
    items: &SETTINGS_ITEMS,
});

static SETTINGS_ITEMS: [&MenuItem; 2] = [&SOUND_ITEM, &BACK_ITEM];

static SOUND_ITEM: MenuItem = MenuItem::Dynamic(DynamicItem {
    data: 0,
    label: sound_label,
    handler: Some(toggle_sound),
});

static BACK_ITEM: MenuItem = MenuItem::Static(StaticItem {
    data: 0,
    label: "Back",
    handler: Some(go_root),
});

fn sound_label(_menu: &Menu, _item: &DynamicItem) -> Label {
    label(if SOUND.load(Ordering::Relaxed) {
        "Sound: on"
    } else {
        "Sound: off"
    })
}

fn toggle_sound(ctx: &mut MenuContext<'_>, _root: &'static Menu, _item: &'static MenuItem) -> bool {
    SOUND.fetch_xor(true, Ordering::Relaxed);
    ctx.redisplay();
    true
}

fn go_root(ctx: &mut MenuContext<'_>, root: &'static Menu, _item: &'static MenuItem) -> bool {
    ctx.enter(root);
    true
}

// Counter

static COUNT: AtomicUsize = AtomicUsize::new(0);

/// `data` is the increment; 0 resets.
static STEPS: [MenuItem; 4] = [step(1), step(5), step(10), step(0)];

const fn step(n: usize) -> MenuItem {
    MenuItem::Dynamic(DynamicItem {
        data: n,
        label: step_label,
        handler: Some(apply_step),
    })
}

static COUNTER: Menu = Menu::Dynamic(DynamicMenu {
    data: 0,
    title: counter_title,
    item: counter_item,
    has_item: counter_has_item,
});

fn counter_title(_menu: &DynamicMenu) -> Label {
    let mut title = Label::new();
    let _ = write!(title, "Count {}", COUNT.load(Ordering::Relaxed));
    title
}

fn counter_item(
    _menu: &DynamicMenu,
    cursor: Option<&'static MenuItem>,
    dir: Direction,
) -> Option<&'static MenuItem> {
    let pos = match cursor {
        None => {
            return match dir {
                Direction::Next => STEPS.first(),
                Direction::Prior => None,
            }
        }
        Some(cur) => STEPS.iter().position(|s| core::ptr::eq(s, cur))?,
    };
    match dir {
        Direction::Next => STEPS.get(pos + 1),
        Direction::Prior => pos.checked_sub(1).and_then(|p| STEPS.get(p)),
    }
}

fn counter_has_item(menu: &DynamicMenu, cursor: Option<&'static MenuItem>, dir: Direction) -> bool {
    counter_item(menu, cursor, dir).is_some()
}

fn step_label(_menu: &Menu, item: &DynamicItem) -> Label {
    if item.data == 0 {
        return label("Reset");
    }
    let mut l = Label::new();
    let _ = write!(l, "Add {}", item.data);
    l
}

fn apply_step(ctx: &mut MenuContext<'_>, _root: &'static Menu, item: &'static MenuItem) -> bool {
    match item.data() {
        0 => COUNT.store(0, Ordering::Relaxed),
        n => {
            COUNT.fetch_add(n, Ordering::Relaxed);
        }
    }
    ctx.redisplay();
    true
}
