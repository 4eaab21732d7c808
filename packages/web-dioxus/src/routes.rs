//! Route definitions for the application

use dioxus::prelude::*;

use crate::components::{LoadingOverlay, MapView, Sidebar, TopBar};
use crate::state::{use_map_state, MapStateProvider};

/// All application routes
#[derive(Clone, Debug, PartialEq, Routable)]
#[rustfmt::skip]
pub enum Route {
    #[route("/")]
    Home {},

    #[route("/:..segments")]
    NotFound { segments: Vec<String> },
}

/// Filter bar over a list and map side by side
#[component]
pub fn Home() -> Element {
    rsx! {
        MapStateProvider {
            div {
                class: "flex flex-col h-screen",
                TopBar {}
                main {
                    class: "flex flex-1 min-h-0",
                    Sidebar {}
                    div {
                        class: "relative flex-1",
                        MapView {}
                        MapLoading {}
                    }
                }
            }
        }
    }
}

#[component]
fn MapLoading() -> Element {
    let state = use_map_state();
    let loading = state.snapshot.read().loading;
    rsx! {
        if loading {
            LoadingOverlay {}
        }
    }
}

#[component]
pub fn NotFound(segments: Vec<String>) -> Element {
    let path = segments.join("/");
    rsx! {
        div {
            class: "flex flex-col items-center justify-center h-screen gap-4",
            p { class: "text-gray-600", "Seite nicht gefunden: /{path}" }
            Link { to: Route::Home {}, class: "text-blue-600 hover:underline", "Zur Karte" }
        }
    }
}
