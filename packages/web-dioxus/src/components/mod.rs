//! Reusable UI components

mod loading;
mod map_view;
mod sidebar;
mod top_bar;

pub use loading::*;
pub use map_view::*;
pub use sidebar::*;
pub use top_bar::*;
