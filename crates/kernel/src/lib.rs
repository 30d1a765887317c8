//! Shared configuration for the bookshelf client crates.

pub mod settings;

pub use settings::{ApiSettings, Environment, LogFormat, Settings, TelemetrySettings};
