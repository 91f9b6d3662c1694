//! Logging daemon restart through the host's service-management command.

use std::process::{Command, ExitStatus};

use log::{info, warn};

use crate::config::Settings;
use crate::error::LogglyError;

/// Result of a restart attempt. A failed restart is reported, not raised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RestartOutcome {
    Restarted,
    Failed(ExitStatus),
}

impl RestartOutcome {
    pub fn is_restarted(&self) -> bool {
        matches!(self, Self::Restarted)
    }
}

/// Restart the configured service via `<service_command> <service_name> restart`
pub fn restart_service(settings: &Settings) -> Result<RestartOutcome, LogglyError> {
    let service = &settings.service_name;
    info!("Restarting the {service} service.");

    let program =
        which::which(&settings.service_command).map_err(|source| LogglyError::CommandNotFound {
            command: settings.service_command.clone(),
            source,
        })?;

    let output = Command::new(&program)
        .args([service.as_str(), "restart"])
        .output()
        .map_err(|source| LogglyError::Spawn {
            command: format!("{} {service} restart", program.display()),
            source,
        })?;

    if output.status.success() {
        info!("The {service} service restarted.");
        return Ok(RestartOutcome::Restarted);
    }

    let stderr = String::from_utf8_lossy(&output.stderr);
    let stderr = stderr.trim();
    if !stderr.is_empty() {
        warn!("{} {service} restart: {stderr}", settings.service_command);
    }
    warn!(
        "{service} did not restart gracefully ({}). Please restart {service} manually.",
        output.status
    );
    Ok(RestartOutcome::Failed(output.status))
}
