pub static PROP_HTML: &'static str = "innerHTML";
pub static PROP_PLACEHOLDER: &'static str = "placeholder";
pub static PROP_TITLE: &'static str = "title";
pub static PROP_TYPE: &'static str = "type";
pub static PROP_VALUE: &'static str = "value";
pub static PROP_DISABLED: &'static str = "disabled";

pub static TAG_DIV: &'static str = "div";
pub static TAG_SPAN: &'static str = "span";
pub static TAG_INPUT: &'static str = "input";
pub static TAG_BUTTON: &'static str = "button";
pub static TAG_OPTION: &'static str = "option";

pub static CLASS_DISABLED: &'static str = "disabled";

pub static QUERY_MODE: &'static str = "mode";
pub static MODE_GUEST: &'static str = "guest";
