use dominator::{Dom, html};

use crate::constants::{PROP_HTML, TAG_SPAN};

fn icon(svg: &'static str) -> Dom {
    html!(TAG_SPAN, {
        .class("icon")
        .prop(PROP_HTML, svg)
    })
}

pub fn icon_asterisk() -> Dom {
    icon(include_str!("../icons/asterisk.svg"))
}

pub fn icon_attach() -> Dom {
    icon(include_str!("../icons/attach.svg"))
}

pub fn icon_close() -> Dom {
    icon(include_str!("../icons/close.svg"))
}
