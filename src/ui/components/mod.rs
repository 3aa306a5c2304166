//! Reusable UI components

pub mod badge;
pub mod dialog_component;
pub mod dialogs;
pub mod grid_table;
pub mod stats_bar;
pub mod status_bar;
pub mod view_tabs;

pub use dialog_component::DialogComponent;
pub use grid_table::GridTableComponent;
pub use stats_bar::StatsBar;
pub use status_bar::StatusBar;
pub use view_tabs::ViewTabs;
