//! Core UI functionality for fraudwatch.
//!
//! - [`actions`] - Action definitions and UI state transitions
//! - [`component`] - Base component trait
//! - [`event_handler`] - Terminal input polling
//! - [`task_manager`] - Background requests reporting back as actions
//!
//! Components turn key presses into [`Action`]s; the app component applies
//! them, spawning requests through the [`TaskManager`] whose results come
//! back on the same action channel.

pub mod actions;
pub mod component;
pub mod event_handler;
pub mod task_manager;

pub use actions::{Action, DialogType};
pub use component::Component;
pub use event_handler::{EventHandler, EventType};
pub use task_manager::{Download, TaskId, TaskManager};
