//! Root application component

use dioxus::prelude::*;

use crate::routes::Route;

/// Root application component
#[component]
pub fn App() -> Element {
    rsx! {
        // Global styles
        document::Stylesheet { href: asset!("/assets/tailwind.css") }
        document::Stylesheet { href: "https://unpkg.com/leaflet@1.9.4/dist/leaflet.css" }
        document::Script { src: "https://unpkg.com/leaflet@1.9.4/dist/leaflet.js" }

        Router::<Route> {}
    }
}
