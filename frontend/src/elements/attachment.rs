use std::rc::Rc;

use dominator::{clone, Dom, events, html};
use futures_signals::signal::ReadOnlyMutable;
use futures_signals::signal_vec::SignalVecExt;
use wasm_bindgen_futures::spawn_local;

use shared::card::{AttachOutcome, SuggestionState};
use shared::constants::ACCEPT_IMAGES;
use shared::types::Thumbnail;

use crate::constants::{CLASS_DISABLED, PROP_DISABLED, PROP_TITLE, PROP_TYPE, TAG_BUTTON, TAG_DIV, TAG_INPUT};
use crate::elements::icons::{icon_attach, icon_close};
use crate::thumbnail::CanvasThumbnailer;
use crate::utils::get_input_from_target;

fn css_class(label: &str) -> String {
    format!("suggestion-card__{label}")
}

pub fn attach_button(state: &Rc<SuggestionState>) -> Dom {
    html!("label", {
        .class(css_class("attach-button"))
        .class_signal(CLASS_DISABLED, state.attach_disabled.signal())
        .child(icon_attach())
        .text("Attach")
        .child(html!(TAG_INPUT, {
            .attr(PROP_TYPE, "file")
            .attr("accept", ACCEPT_IMAGES)
            .style("display", "none")
            .prop_signal(PROP_DISABLED, state.attach_disabled.signal())
            .event(clone!(state => move |e: events::Change| {
                handle_attach(&state, e);
            }))
        }))
    })
}

fn handle_attach(state: &Rc<SuggestionState>, e: events::Change) {
    // only the first picked file is used
    let file = get_input_from_target(e.target())
        .and_then(|input| input.files())
        .and_then(|files| files.item(0));
    let Some(file) = file else {
        return;
    };
    let name = file.name();
    if let Some(task) = state.attach_file(CanvasThumbnailer, file) {
        spawn_local(async move {
            match task.await {
                AttachOutcome::Attached => log::info!("attached {name}"),
                outcome => log::warn!("attachment {name} not added: {outcome:?}"),
            }
        });
    }
}

pub fn attached_files(state: &Rc<SuggestionState>) -> Dom {
    html!(TAG_DIV, {
        .class(css_class("attached-files"))
        .children_signal_vec(state.attached_files.signal_vec_cloned()
            .enumerate()
            .map(clone!(state => move |(index, file)| item_active(&state, index, &file))))
    })
}

fn item_active(state: &Rc<SuggestionState>, index: ReadOnlyMutable<Option<usize>>, file: &Thumbnail) -> Dom {
    html!(TAG_DIV, {
        .class(css_class("file"))
        .children([
            html!("img", {
                .class(css_class("file-image"))
                .attr("src", file.src())
                .attr("alt", "Attached File")
            }),
            html!(TAG_BUTTON, {
                .class(css_class("file-remove"))
                .attr(PROP_TITLE, "remove")
                .child(icon_close())
                .event(clone!(state => move |_: events::Click| {
                    if let Some(index) = index.get() {
                        state.remove_file(index);
                    }
                }))
            }),
        ])
    })
}
