//! Leaflet map surface
//!
//! Leaflet runs in the page; Rust pushes a [`MapPayload`] whenever the
//! snapshot changes and listens for marker clicks on the same channel.

use dioxus::prelude::*;
use laborsuche_core::{SelectionEvent, Snapshot, ViewportSettings};
use serde::Serialize;

use crate::state::use_map_state;

const MAP_ELEMENT_ID: &str = "provider-map";

const MAP_SCRIPT: &str = r#"
const waitFor = async (check) => {
    while (!check()) {
        await new Promise((resolve) => setTimeout(resolve, 50));
    }
};
await waitFor(() => window.L && document.getElementById("provider-map"));

const map = L.map("provider-map", { zoomControl: true });
L.tileLayer("https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png", {
    maxZoom: 19,
    attribution: "&copy; OpenStreetMap contributors",
}).addTo(map);
const layer = L.layerGroup().addTo(map);
let view = null;

const popup = (m) => {
    const root = document.createElement("div");
    const title = document.createElement("strong");
    title.textContent = m.name;
    root.appendChild(title);
    for (const line of [m.subtitle, m.phone]) {
        if (!line) continue;
        const row = document.createElement("div");
        row.textContent = line;
        root.appendChild(row);
    }
    if (m.website) {
        const link = document.createElement("a");
        link.href = m.website;
        link.target = "_blank";
        link.rel = "noopener";
        link.textContent = "Website";
        root.appendChild(link);
    }
    return root;
};

while (true) {
    const payload = await dioxus.recv();
    layer.clearLayers();
    for (const m of payload.markers) {
        const selected = m.id === payload.selected;
        const size = selected ? 22 : 16;
        const icon = L.divIcon({
            className: "",
            iconSize: [size, size],
            html: `<span style="display:block;width:${size}px;height:${size}px;border-radius:50%;background:${m.color};border:2px solid white;box-shadow:0 0 0 ${selected ? 3 : 1}px rgba(0,0,0,.35)"></span>`,
        });
        const marker = L.marker([m.lat, m.lng], { icon, title: m.name }).addTo(layer);
        marker.bindPopup(popup(m));
        marker.on("click", () => dioxus.send(m.id));
        if (selected) marker.openPopup();
    }
    const v = payload.view;
    if (view === null) {
        map.setView([v.lat, v.lng], v.zoom);
    } else if (view.lat !== v.lat || view.lng !== v.lng || view.zoom !== v.zoom) {
        map.flyTo([v.lat, v.lng], v.zoom, { duration: v.duration_ms / 1000 });
    }
    view = v;
}
"#;

/// Everything the page script needs to redraw the map
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapPayload {
    pub markers: Vec<MarkerPayload>,
    pub selected: Option<String>,
    pub view: ViewPayload,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarkerPayload {
    pub id: String,
    pub lat: f64,
    pub lng: f64,
    pub color: &'static str,
    pub name: String,
    pub subtitle: String,
    pub phone: Option<String>,
    pub website: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewPayload {
    pub lat: f64,
    pub lng: f64,
    pub zoom: u8,
    pub duration_ms: u64,
}

impl MapPayload {
    pub fn from_snapshot(snapshot: &Snapshot, settings: &ViewportSettings) -> Self {
        let markers = snapshot
            .items
            .iter()
            .filter_map(|item| {
                let point = item.point?;
                Some(MarkerPayload {
                    id: item.id.to_string(),
                    lat: point.lat,
                    lng: point.lng,
                    color: item.category().color(),
                    name: item.display_name().to_string(),
                    subtitle: item.subtitle().to_string(),
                    phone: item.record.phone.clone(),
                    website: item.record.website.clone(),
                })
            })
            .collect();

        Self {
            markers,
            selected: snapshot.selected.as_ref().map(ToString::to_string),
            view: ViewPayload {
                lat: snapshot.viewport.lat,
                lng: snapshot.viewport.lng,
                zoom: snapshot.viewport.zoom,
                duration_ms: settings.fly_duration.as_millis() as u64,
            },
        }
    }
}

/// Map with one marker per mappable provider
#[component]
pub fn MapView() -> Element {
    let state = use_map_state();
    let snapshot = state.snapshot;
    let settings = state.settings.clone();

    let map = use_hook(|| document::eval(MAP_SCRIPT));

    // Redraw on every snapshot change
    use_effect(move || {
        let payload = MapPayload::from_snapshot(&snapshot.read(), &settings);
        if let Err(e) = map.send(payload) {
            tracing::warn!(error = ?e, "Failed to update map");
        }
    });

    // Marker clicks
    use_future(move || {
        let state = state.clone();
        let mut map = map;
        async move {
            loop {
                match map.recv::<String>().await {
                    Ok(id) => state.select(SelectionEvent::from_map(id)),
                    Err(e) => {
                        tracing::warn!(error = ?e, "Map channel closed");
                        break;
                    }
                }
            }
        }
    });

    rsx! {
        div {
            id: MAP_ELEMENT_ID,
            class: "h-full w-full",
        }
    }
}
