//! Constants used throughout the application
//!
//! User-visible messages, dialog titles and configuration bounds live here so
//! the UI, the headless exporter and the tests agree on them.

// Notices
pub const NOTICE_NO_DATA_TO_EXPORT: &str = "No data to export";
pub const CONFIG_GENERATED: &str = "✅ Generated default configuration file";

// Success Messages
pub const SUCCESS_EXPORTED: &str = "✅ Exported";
pub const SUCCESS_ALERT_UPDATED: &str = "✅ Alert updated";
pub const SUCCESS_REPORT_SAVED: &str = "✅ Report saved";

// Error Messages
pub const ERROR_EXPORT_FAILED: &str = "❌ Export failed";
pub const ERROR_ALERT_UPDATE_FAILED: &str = "❌ Failed to update alert";
pub const ERROR_REPORT_FAILED: &str = "❌ Failed to download report";
pub const ERROR_INVALID_PAGE: &str = "❌ Page out of range";
pub const ERROR_INVALID_REPORT: &str = "❌ Invalid report request";

// Dialog titles
pub const DIALOG_TITLE_LOGS: &str = "Logs - Press 'Esc', 'G' or 'q' to close";
pub const DIALOG_TITLE_HELP: &str = "Help - Press 'Esc' or '?' to close";
pub const DIALOG_TITLE_ALERT: &str = "Alert details";
pub const DIALOG_TITLE_FILTERS: &str = "Filters";
pub const DIALOG_TITLE_REPORT: &str = "Generate CD01 report";
pub const DIALOG_TITLE_OVERVIEW: &str = "Dashboard overview - Press 'Esc' or 'D' to close";

// Configuration defaults and bounds
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:5001/api";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const MAX_TIMEOUT_SECS: u64 = 300;
pub const DEFAULT_PER_PAGE: u32 = 50;
pub const MAX_PER_PAGE: u32 = 500;
pub const DEFAULT_STATS_REFRESH_SECS: u64 = 30;

/// Page sizes offered by the per-page selector
pub const PER_PAGE_CHOICES: [u32; 4] = [20, 50, 100, 200];

/// Operator recorded on alert updates made from this client
pub const ALERT_PROCESSED_BY: &str = "fraudwatch";
