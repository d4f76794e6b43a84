use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, EventTarget, HtmlInputElement, Location, UrlSearchParams, Window};

fn get_window() -> Option<Window> {
    web_sys::window()
}

fn get_document() -> Option<Document> {
    get_window().and_then(|w| w.document())
}

pub fn get_location() -> Option<Location> {
    get_window().map(|w|w.location())
}

pub fn create_element(node_name: &str) -> Option<Element> {
    get_document().and_then(|d| d.create_element(node_name).ok())
}

pub fn get_query_param(name: &str) -> Option<String> {
    get_location()
        .and_then(|l| l.search().ok())
        .and_then(|search| UrlSearchParams::new_with_str(&search).ok())
        .and_then(|params| params.get(name))
}

pub fn get_input_from_target(target: Option<EventTarget>) -> Option<HtmlInputElement> {
    target.and_then(|target| JsValue::from(target).dyn_into::<HtmlInputElement>().ok())
}

pub fn js_message(err: &JsValue) -> String {
    if let Some(text) = err.as_string() {
        text
    } else if let Some(err) = err.dyn_ref::<js_sys::Error>() {
        err.message().into()
    } else {
        format!("{err:?}")
    }
}
