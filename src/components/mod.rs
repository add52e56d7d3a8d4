//! The components module contains all shared components for our app.

mod app;
mod app_view;
mod asset_dialog;
mod icons;
mod loading_indicator;
mod route_params;
pub mod views;

pub use app::*;
pub use app_view::*;
pub use asset_dialog::*;
pub use icons::*;
pub use loading_indicator::*;
pub use route_params::*;
