//! fraudwatch - a terminal dashboard for a fraud-monitoring backend
//!
//! The dashboard lists transactions, fraud alerts and account reactivations
//! from a REST API in paginated, filterable grids, and exports exactly what a
//! grid shows to CSV.
//!
//! # Modules
//!
//! * [`grid`] - Column descriptors, cell rendering and row identity
//! * [`export`] - Export derivation and CSV writing
//! * [`list`] - Paginated list state with filters and sorting
//! * [`backend`] - REST API interface and its HTTP implementation
//! * [`pages`] - The three list views
//! * [`config`] - Application configuration management
//! * [`ui`] - Terminal user interface

/// Backend abstraction layer for the monitoring API
pub mod backend;

/// Configuration module for managing application settings
pub mod config;

/// Application constants and default values
pub mod constants;

/// CSV export of grid contents
pub mod export;

/// Column model and cell rendering pipeline
pub mod grid;

/// Paginated list controller and filters
pub mod list;

/// Logging to an in-memory buffer and an optional log file
pub mod logger;

/// Page definitions for each list view
pub mod pages;

/// Terminal user interface components and rendering
pub mod ui;

/// Utility functions for date/time handling and number formatting
pub mod utils;
