use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::LogglyError;

/// Fixed locations and vendor identifiers used by every step of a run.
///
/// The defaults describe a stock Linux host shipping logs to Loggly. A TOML
/// file passed with `--settings` may override any subset of the fields.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Directory rsyslog reads drop-in configuration from
    pub rsyslog_conf_dir: PathBuf,
    pub conf_file_name: String,
    /// Appended to the full config file name to form the backup path
    pub backup_suffix: String,
    pub service_name: String,
    /// Service-management executable, invoked as `<cmd> <service> restart`
    pub service_command: String,
    /// Identifies this client type to the collector
    pub distribution_id: String,
    pub logs_host: String,
    pub syslog_port: u16,
    /// Always emitted as the first tag
    pub default_tag: String,
    /// rsyslog property substituted when no hostname is configured
    pub hostname_placeholder: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            rsyslog_conf_dir: PathBuf::from("/etc/rsyslog.d"),
            conf_file_name: "22-loggly.conf".to_string(),
            backup_suffix: ".loggly.bk".to_string(),
            service_name: "rsyslog".to_string(),
            service_command: "service".to_string(),
            distribution_id: "41058".to_string(),
            logs_host: "logs-01.loggly.com".to_string(),
            syslog_port: 514,
            default_tag: "Rsyslog".to_string(),
            hostname_placeholder: "%HOSTNAME%".to_string(),
        }
    }
}

impl Settings {
    /// Load settings from a TOML file, keeping defaults for absent fields.
    pub fn load(path: &Path) -> Result<Self, LogglyError> {
        let raw = fs::read_to_string(path).map_err(|source| LogglyError::SettingsRead {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&raw).map_err(|source| LogglyError::SettingsParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Path of the managed rsyslog configuration file.
    pub fn conf_file(&self) -> PathBuf {
        self.rsyslog_conf_dir.join(&self.conf_file_name)
    }

    /// Path the previous config file is moved to when its content changes.
    pub fn backup_file(&self) -> PathBuf {
        let mut name = self.conf_file().into_os_string();
        name.push(&self.backup_suffix);
        PathBuf::from(name)
    }
}
