//! Laborsuche - Dioxus Fullstack Web Application
//!
//! Map and list of DEXA body-composition and self-pay blood-test providers,
//! filtered by city. Provider data comes from the external data-provider
//! service, proxied through server functions.
//!
//! ## Running
//!
//! Development (with hot reload):
//! ```bash
//! API_BASE=http://localhost:8000 dx serve --features web,server
//! ```
//!
//! Production build:
//! ```bash
//! dx build --release --features web,server
//! ```

#![allow(non_snake_case)]

mod app;
mod components;
#[cfg(feature = "server")]
mod config;
mod routes;
mod server_fns;
mod state;

fn main() {
    // Initialize logging
    #[cfg(feature = "server")]
    {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "info,laborsuche_core=debug".into()),
            )
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
    #[cfg(not(feature = "server"))]
    dioxus::logger::initialize_default();

    // Launch the Dioxus app
    // In fullstack mode, this handles both server and client
    dioxus::launch(app::App);
}
