//! Loading indicators

use dioxus::prelude::*;

/// Overlay shown on the map while a provider fetch is in flight
#[component]
pub fn LoadingOverlay() -> Element {
    rsx! {
        div {
            class: "map-overlay absolute top-3 right-3 rounded-md px-3 py-2 shadow",
            div {
                class: "flex items-center space-x-2",
                LoadingDots {}
                span { class: "text-sm text-gray-600", "Lädt..." }
            }
        }
    }
}

/// Inline loading indicator
#[component]
pub fn LoadingDots() -> Element {
    rsx! {
        div {
            class: "inline-flex space-x-1",
            div { class: "w-2 h-2 bg-gray-400 rounded-full animate-bounce" }
            div { class: "w-2 h-2 bg-gray-400 rounded-full animate-bounce", style: "animation-delay: 0.1s" }
            div { class: "w-2 h-2 bg-gray-400 rounded-full animate-bounce", style: "animation-delay: 0.2s" }
        }
    }
}

#[cfg(test)]
mod tests {
    const STYLESHEET: &str = include_str!("../../assets/tailwind.css");

    #[test]
    fn overlay_sits_above_leaflet_panes() {
        let rule = STYLESHEET
            .split(".map-overlay")
            .nth(1)
            .expect("map-overlay rule missing");
        let z_index: u32 = rule
            .split("z-index:")
            .nth(1)
            .and_then(|rest| rest.split(';').next())
            .and_then(|value| value.trim().parse().ok())
            .expect("map-overlay has no z-index");

        assert!(z_index > 1000);
    }
}
