//! Filter bar: city selector, category segments, result count

use dioxus::prelude::*;
use laborsuche_core::CategoryFilter;

use crate::components::LoadingDots;
use crate::state::use_map_state;

/// "1 Ergebnis" / "N Ergebnisse"
pub fn result_label(count: usize) -> String {
    match count {
        1 => "1 Ergebnis".to_string(),
        n => format!("{n} Ergebnisse"),
    }
}

#[component]
pub fn TopBar() -> Element {
    let state = use_map_state();
    let snapshot = state.snapshot.read().clone();
    let filters = state.filters();

    let on_city = {
        let state = state.clone();
        move |evt: FormEvent| state.set_city(evt.value())
    };

    rsx! {
        header {
            class: "flex items-center gap-4 px-4 py-3 bg-white border-b border-gray-200",
            h1 { class: "text-lg font-semibold text-gray-900", "Laborsuche" }

            select {
                class: "border border-gray-300 rounded-md px-2 py-1 text-sm",
                value: "{filters.city}",
                onchange: on_city,
                if snapshot.cities.is_empty() {
                    option { value: "{filters.city}", "{filters.city}" }
                }
                for city in snapshot.cities.iter() {
                    option {
                        key: "{city}",
                        value: "{city}",
                        selected: *city == filters.city,
                        "{city}"
                    }
                }
            }

            div {
                class: "inline-flex rounded-md border border-gray-300 overflow-hidden",
                for category in CategoryFilter::variants().iter().copied() {
                    button {
                        key: "{category.label()}",
                        class: if category == filters.category {
                            "px-3 py-1 text-sm bg-gray-900 text-white"
                        } else {
                            "px-3 py-1 text-sm bg-white text-gray-700 hover:bg-gray-100"
                        },
                        onclick: {
                            let state = state.clone();
                            move |_| state.set_category(category)
                        },
                        "{category.label()}"
                    }
                }
            }

            div {
                class: "ml-auto flex items-center gap-2 text-sm text-gray-600",
                if snapshot.loading {
                    LoadingDots {}
                }
                span {
                    class: "rounded-full bg-gray-100 px-3 py-1",
                    "{result_label(snapshot.count())}"
                }
            }
        }

        if let Some(error) = snapshot.last_error.as_ref() {
            div {
                class: "px-4 py-2 text-sm bg-red-50 text-red-700 border-b border-red-200",
                "Daten konnten nicht geladen werden: {error}"
            }
        }
    }
}
