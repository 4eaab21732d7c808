//! Provider list and detail panel

use dioxus::prelude::*;
use laborsuche_core::{ProviderItem, SelectionEvent};

use crate::state::use_map_state;

/// Every provider in the working set, mappable or not
#[component]
pub fn Sidebar() -> Element {
    let state = use_map_state();
    let snapshot = state.snapshot.read().clone();

    rsx! {
        aside {
            class: "flex flex-col w-96 h-full border-r border-gray-200 bg-white",
            if let Some(item) = snapshot.selected_item() {
                ProviderDetail { item: item.clone() }
            } else {
                DetailPlaceholder {}
            }
            ul {
                class: "flex-1 overflow-y-auto divide-y divide-gray-100",
                if snapshot.items.is_empty() && !snapshot.loading {
                    li { class: "p-4 text-sm text-gray-500", "Keine Anbieter gefunden." }
                }
                for item in snapshot.items.iter() {
                    ProviderRow {
                        key: "{item.id}",
                        item: item.clone(),
                        active: snapshot.is_selected(&item.id),
                    }
                }
            }
        }
    }
}

#[component]
fn ProviderRow(item: ProviderItem, active: bool) -> Element {
    let state = use_map_state();
    let category = item.category();
    let id = item.id.clone();

    rsx! {
        li {
            class: if active { "p-3 cursor-pointer bg-blue-50" } else { "p-3 cursor-pointer hover:bg-gray-50" },
            onclick: move |_| state.select(SelectionEvent::from_list(id.clone())),
            div {
                class: "flex items-center gap-2",
                span {
                    class: "rounded px-1.5 text-xs text-white",
                    style: "background: {category.color()}",
                    "{category.short_label()}"
                }
                span { class: "font-medium text-gray-900", "{item.display_name()}" }
            }
            p { class: "mt-1 text-xs text-gray-500", "{item.subtitle()}" }
            if !item.is_mappable() {
                p { class: "mt-1 text-xs text-amber-600", "Keine Kartenposition" }
            }
        }
    }
}

/// A field worth showing: present and not blank
fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

/// Category label, followed by the Google category when known
fn detail_meta(item: &ProviderItem) -> String {
    match present(&item.record.google_category) {
        Some(kind) => format!("{} • {kind}", item.category().label()),
        None => item.category().label().to_string(),
    }
}

#[component]
fn ProviderDetail(item: ProviderItem) -> Element {
    let state = use_map_state();
    let record = &item.record;
    let meta = detail_meta(&item);
    let domain = present(&record.domain);
    let address = present(&record.address);
    let phone = present(&record.phone);
    let city = present(&record.city);
    let website = present(&record.website);

    rsx! {
        section {
            class: "p-4 border-b border-gray-200 bg-gray-50",
            div {
                class: "flex items-start justify-between",
                h2 { class: "text-base font-semibold text-gray-900", "{item.display_name()}" }
                button {
                    class: "text-sm text-gray-500 hover:text-gray-900",
                    onclick: move |_| state.clear_selection(),
                    "Schließen"
                }
            }
            p { class: "text-sm text-gray-600", "{meta}" }
            dl {
                class: "mt-2 grid grid-cols-3 gap-1 text-sm",
                if let Some(domain) = domain {
                    dt { class: "text-gray-500", "Domain" }
                    dd { class: "col-span-2", "{domain}" }
                }
                if let Some(address) = address {
                    dt { class: "text-gray-500", "Adresse" }
                    dd { class: "col-span-2", "{address}" }
                }
                if let Some(phone) = phone {
                    dt { class: "text-gray-500", "Telefon" }
                    dd {
                        class: "col-span-2",
                        a { href: "tel:{phone}", class: "text-blue-600 hover:underline", "{phone}" }
                    }
                }
                if let Some(city) = city {
                    dt { class: "text-gray-500", "Stadt" }
                    dd { class: "col-span-2", "{city}" }
                }
            }
            if let Some(website) = website {
                a {
                    href: "{website}",
                    target: "_blank",
                    rel: "noreferrer",
                    class: "mt-3 inline-block text-sm text-blue-600 hover:underline",
                    "Website öffnen"
                }
            }
        }
    }
}

#[component]
fn DetailPlaceholder() -> Element {
    rsx! {
        section {
            class: "p-4 border-b border-gray-200 bg-gray-50 text-sm text-gray-500",
            "Marker oder Eintrag auswählen"
        }
    }
}
