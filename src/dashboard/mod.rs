//! Dashboard session: state, reducer, controller and renderers

pub mod controller;
pub mod state;
pub mod text;
pub mod view;

pub use controller::{Dashboard, Event};
pub use state::{Action, AppState, LocationState, Preferences, Theme, WeatherSnapshot, reduce};
pub use text::render_text;
pub use view::{DashboardView, render};
