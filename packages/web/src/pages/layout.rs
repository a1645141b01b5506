use dioxus::prelude::*;

/// Common document shell.
#[component]
pub fn Layout(title: String, children: Element) -> Element {
    rsx! {
        html { lang: "en",
            head {
                meta { charset: "utf-8" }
                title { "{title}" }
            }
            body { {children} }
        }
    }
}

#[component]
pub fn MetaRefreshPage(url: String) -> Element {
    rsx! {
        html { lang: "en",
            head {
                meta { charset: "utf-8" }
                meta { http_equiv: "refresh", content: "0;url={url}" }
                title { "Redirecting" }
            }
            body {
                p {
                    "Redirecting to "
                    a { href: "{url}", "{url}" }
                }
            }
        }
    }
}

#[component]
pub fn ErrorPage(code: u16, reason: String, message: String) -> Element {
    rsx! {
        Layout { title: reason.clone(),
            h1 { "{code} {reason}" }
            p { "{message}" }
        }
    }
}
