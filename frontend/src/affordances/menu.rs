use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, MouseEvent, Node};

use crate::config::ClassNames;
use crate::dom;

/// What a click means for the mobile menu, given whether it is open and
/// where the click landed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuAction {
    Open,
    Close,
    Nothing,
}

pub fn on_toggle_click(open: bool) -> MenuAction {
    if open { MenuAction::Close } else { MenuAction::Open }
}

pub fn on_document_click(open: bool, inside_menu: bool, on_toggle: bool) -> MenuAction {
    if open && !inside_menu && !on_toggle {
        MenuAction::Close
    } else {
        MenuAction::Nothing
    }
}

/// The three elements whose classes move together when the menu opens.
/// The open flag lives in the nav's class list, nowhere else.
#[derive(Clone)]
pub struct MenuElements {
    toggle: Element,
    nav: Element,
    body: Element,
    classes: ClassNames,
}

impl MenuElements {
    pub fn find(
        document: &Document,
        toggle_selector: &str,
        nav_selector: &str,
        classes: ClassNames,
    ) -> Result<Option<Self>, JsValue> {
        let toggle = document.query_selector(toggle_selector)?;
        let nav = document.query_selector(nav_selector)?;
        let body = document.body().map(|b| b.unchecked_into::<Element>());
        Ok(match (toggle, nav, body) {
            (Some(toggle), Some(nav), Some(body)) => Some(Self { toggle, nav, body, classes }),
            _ => None,
        })
    }

    pub fn is_open(&self) -> bool {
        self.nav.class_list().contains(self.classes.nav_open)
    }

    fn set_open(&self, open: bool) {
        let pairs = [
            (&self.toggle, self.classes.toggle_active),
            (&self.nav, self.classes.nav_open),
            (&self.body, self.classes.body_menu_open),
        ];
        for (element, class) in pairs {
            let _ = element.class_list().toggle_with_force(class, open);
        }
    }

    pub fn apply(&self, action: MenuAction) {
        match action {
            MenuAction::Open => self.set_open(true),
            MenuAction::Close => self.set_open(false),
            MenuAction::Nothing => {}
        }
    }

    pub fn close(&self) {
        if self.is_open() {
            self.apply(MenuAction::Close);
        }
    }
}

pub fn install(document: &Document, menu: &MenuElements) -> Result<(), JsValue> {
    let on_toggle = menu.clone();
    dom::listen(&menu.toggle, "click", move |_: MouseEvent| {
        on_toggle.apply(on_toggle_click(on_toggle.is_open()));
    })?;

    let outside = menu.clone();
    dom::listen(document, "click", move |e: MouseEvent| {
        let target = e.target().and_then(|t| t.dyn_into::<Node>().ok());
        let action = on_document_click(
            outside.is_open(),
            outside.nav.contains(target.as_ref()),
            outside.toggle.contains(target.as_ref()),
        );
        outside.apply(action);
    })
}
