use std::rc::Rc;

use dominator::{clone, Dom, events, html, with_node};
use futures_signals::signal::SignalExt;
use web_sys::{HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};

use shared::card::SuggestionState;
use shared::constants::MESSAGE_MAX_LEN;
use shared::types::Section;

use crate::constants::{CLASS_DISABLED, PROP_DISABLED, PROP_PLACEHOLDER, PROP_TYPE, PROP_VALUE, TAG_BUTTON, TAG_DIV, TAG_OPTION, TAG_SPAN};
use crate::elements::attachment::{attach_button, attached_files};
use crate::elements::icons::icon_asterisk;

fn css_class(label: &str) -> String {
    format!("suggestion-card__{label}")
}

/// Mounts one card. Pending attachments are cancelled when it leaves the DOM.
pub fn suggestion_card(state: Rc<SuggestionState>) -> Dom {
    let mut rows = vec![
        section_selector(&state),
        html!(TAG_DIV, {
            .class(css_class("container"))
            .children([
                detail_label(),
                message_input(&state),
                attach_button(&state),
                attached_files(&state),
            ])
        }),
    ];
    if !state.login {
        rows.push(email_input(&state));
    }
    rows.push(submit_button(&state));

    html!(TAG_DIV, {
        .class("suggestion-card")
        .children([
            header(),
            html!(TAG_DIV, {
                .class(css_class("content"))
                .children(rows)
            }),
        ])
        .after_removed(clone!(state => move |_| state.unmount()))
    })
}

fn header() -> Dom {
    html!("header", {
        .class(css_class("header"))
        .child(html!("p", {
            .text("Share your ")
            .child(html!(TAG_SPAN, {.text("Suggestions")}))
            .text(" with us")
            .child(html!("br"))
            .text("for a chance to earn rewards!")
        }))
    })
}

fn section_selector(state: &Rc<SuggestionState>) -> Dom {
    html!(TAG_DIV, {
        .class(css_class("section"))
        .children([
            html!("label", {.text("Choose a section")}),
            html!("select" => HtmlSelectElement, {
                .children(Section::ALL.iter().map(|section| html!(TAG_OPTION, {
                    .attr(PROP_VALUE, section.value())
                    .text(section.label())
                })))
                .with_node!(select => {
                    .event(clone!(state => move |_: events::Change| {
                        state.set_section(Section::from_value(&select.value()));
                    }))
                })
            }),
        ])
    })
}

fn detail_label() -> Dom {
    html!(TAG_DIV, {
        .class("suggestion-detail__container")
        .child(html!("p", {
            .class("suggestion-detail__label")
            .text("Describe the suggestion in detail")
            .child(html!(TAG_SPAN, {
                .class("suggestion-detail__astrix")
                .child(icon_asterisk())
            }))
        }))
    })
}

fn message_input(state: &Rc<SuggestionState>) -> Dom {
    let size = if state.login { "large" } else { "small" };
    html!("textarea" => HtmlTextAreaElement, {
        .class(css_class("textarea"))
        .class(size)
        .attr(PROP_PLACEHOLDER, "Write here...")
        .attr("maxlength", &MESSAGE_MAX_LEN.to_string())
        .with_node!(textarea => {
            .event(clone!(state => move |_: events::Input| {
                state.set_message(&textarea.value());
            }))
        })
    })
}

fn email_input(state: &Rc<SuggestionState>) -> Dom {
    html!(TAG_DIV, {
        .class(css_class("email"))
        .children([
            html!("label", {.text("Enter your email to receive an update")}),
            html!("input" => HtmlInputElement, {
                .attr(PROP_TYPE, "email")
                .attr(PROP_PLACEHOLDER, "Enter your Email")
                .prop_signal(PROP_VALUE, state.email.signal_cloned())
                .with_node!(input => {
                    .event(clone!(state => move |_: events::Input| {
                        state.set_email(&input.value());
                    }))
                })
            }),
        ])
        .child_signal(state.email_error.signal_cloned().map(|error| {
            if error.is_empty() {
                None
            } else {
                Some(html!("p", {
                    .class(css_class("error"))
                    .text(&error)
                }))
            }
        }))
    })
}

fn submit_button(state: &Rc<SuggestionState>) -> Dom {
    html!(TAG_BUTTON, {
        .class(css_class("submit"))
        .class_signal(CLASS_DISABLED, state.submit_state_signal().map(|s| s.is_disabled()))
        .prop_signal(PROP_DISABLED, state.submit_state_signal().map(|s| s.is_disabled()))
        .text("Submit")
        .event(clone!(state => move |_: events::Click| {
            state.handle_submission();
        }))
    })
}
