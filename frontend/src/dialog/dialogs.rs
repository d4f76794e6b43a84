use dominator::{Dom, events, html};
use futures_signals::signal::{Signal, SignalExt};
use futures_signals::signal_vec::{MutableVec, SignalVecExt};
use once_cell::sync::Lazy;

use crate::constants::{TAG_BUTTON, TAG_DIV};

pub static DIALOGS: Lazy<MutableVec<Dialog>> = Lazy::new(|| {
    MutableVec::new()
});

#[derive(Clone, Debug, Default)]
pub struct Dialog {
    pub message: String,
}

impl Dialog {
    pub fn alert(message: &str) {
        DIALOGS.lock_mut().push_cloned(Self {
            message: message.to_string(),
        });
    }
}

// ===

fn css_class(label: &str) -> String {
    format!("dialogs__{label}")
}

pub fn dialogs() -> impl Signal<Item=Option<Dom>> {
    DIALOGS.signal_vec_cloned()
        .to_signal_cloned()
        .map(|list| list.last().map(dialog_alert))
}

fn dialog_alert(data: &Dialog) -> Dom {
    html!(TAG_DIV, {
        .class(css_class("back"))
        .child(html!(TAG_DIV, {
            .class(css_class("container"))
            .children([
                html!(TAG_DIV,{
                    .class(css_class("body"))
                    .text(&data.message)
                }),
                html!(TAG_DIV,{
                    .class(css_class("footer"))
                    .child(html!(TAG_BUTTON, {
                        .text("Ok")
                        .attr("aria-label", "confirm")
                        .event(|_: events::Click|{
                            dialog_close();
                        })
                    }))
                }),
            ])
        }))
    })
}

fn dialog_close() {
    let mut list = DIALOGS.lock_mut();
    let count = list.len();
    if count > 0 {
        list.remove(count - 1);
    }
}
