//! Configure or remove the rsyslog forwarding integration for Loggly.
//!
//! A run resolves options from the command line and environment, renders the
//! rsyslog directives, replaces the config file when its contents changed and
//! restarts rsyslog. Removal deletes the file and restarts rsyslog.

pub mod cli;
pub mod config;
pub mod control;
pub mod error;
pub mod file_ops;
pub mod options;
pub mod orchestration;
pub mod privileges;
pub mod render;

pub use config::Settings;
pub use error::LogglyError;
pub use options::{Action, Configuration};
