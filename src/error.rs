//! Error type shared by every stage of a configure or remove run.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LogglyError {
    /// Account or token was not supplied on the command line or in the environment
    #[error("a Loggly account and token are required")]
    MissingCredentials,

    #[error("could not split {var} into tags, check its quoting: {value:?}")]
    InvalidTags { var: &'static str, value: String },

    #[error("failed to read settings file {}", .path.display())]
    SettingsRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse settings file {}", .path.display())]
    SettingsParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// A filesystem call on the managed config file failed
    #[error("failed to {action} {}", .path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("service command {command:?} not found")]
    CommandNotFound {
        command: String,
        #[source]
        source: which::Error,
    },

    #[error("failed to execute {command:?}")]
    Spawn {
        command: String,
        #[source]
        source: io::Error,
    },
}

impl LogglyError {
    pub(crate) fn io(action: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            action,
            path: path.into(),
            source,
        }
    }
}
