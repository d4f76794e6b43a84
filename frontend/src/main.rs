use std::rc::Rc;

use shared::card::{SuggestionProps, SuggestionState};

use crate::constants::{MODE_GUEST, QUERY_MODE};
use crate::dialog::dialogs::{dialogs, Dialog};
use crate::elements::suggestion_card::suggestion_card;
use crate::utils::get_query_param;

mod constants;
mod dialog;
mod elements;
mod thumbnail;
mod utils;

fn handle_submit(message: &str) {
    log::info!("suggestion submitted");
    Dialog::alert(message);
}

pub fn main() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::default());

    let login = get_query_param(QUERY_MODE).as_deref() != Some(MODE_GUEST);
    log::info!("mounting suggestion card, login: {login}");

    let props = SuggestionProps {
        login,
        handle_submit: Rc::new(handle_submit),
    };
    let state = SuggestionState::new(props);

    dominator::append_dom(&dominator::body(), suggestion_card(state));
    dominator::append_dom(&dominator::body(), dominator::html!("div", {
        .child_signal(dialogs())
    }));
}
