use api::{counter_path, CounterView, DEFAULT_COUNTER};
use dioxus::prelude::*;

use super::layout::Layout;

#[component]
pub fn CounterPage(view: CounterView) -> Element {
    let name = view.name.clone();
    let value = view.value;
    let remaining = view.remaining();
    let limit = view.limit;
    let action = format!("/counters/{name}");

    rsx! {
        Layout { title: "Counter {name}",
            h1 {
                "Counter "
                code { "{name}" }
            }
            p { class: "value", "{value}" }
            p { class: "remaining", "{remaining} of {limit} left" }
            form { method: "post", action: "{action}/increment",
                input { r#type: "number", name: "by", value: "1", min: "1" }
                button { r#type: "submit", "Increment" }
            }
            form { method: "post", action: "{action}/reset",
                button { r#type: "submit", "Reset" }
            }
        }
    }
}

/// Shown once the default counter has reached its limit.
#[component]
pub fn LimitPage(limit: i64) -> Element {
    let home = counter_path(DEFAULT_COUNTER);
    let reset = format!("/counters/{DEFAULT_COUNTER}/reset");

    rsx! {
        Layout { title: "Limit reached",
            h1 { "Limit reached" }
            p { "Counters stop at {limit}." }
            form { method: "post", action: "{reset}",
                button { r#type: "submit", "Reset" }
            }
            p {
                a { href: "{home}", "Back" }
            }
        }
    }
}
