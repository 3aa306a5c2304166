//! Dialog rendering helpers

pub mod common;
pub mod filter_dialog;
pub mod overview_dialog;
pub mod system_dialogs;
