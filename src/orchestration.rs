//! Configure and unconfigure runs, composed from the individual steps.

use std::io::Write;

use log::info;

use crate::config::Settings;
use crate::control::{self, RestartOutcome};
use crate::error::LogglyError;
use crate::file_ops::{self, ConfState, WriteOutcome};
use crate::options::{Action, Configuration};
use crate::privileges;
use crate::render::render_conf;

/// Summary of a configure or unconfigure run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Report {
    Configured {
        write: WriteOutcome,
        restart: RestartOutcome,
    },
    Removed {
        removed: bool,
        restart: RestartOutcome,
    },
    /// Dry run: nothing was touched
    Planned { plan: Plan },
}

/// File action a dry run would have taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Plan {
    Create,
    Unchanged,
    ReplaceWithBackup,
    Remove,
    NothingToRemove,
}

impl Plan {
    fn describe(self) -> &'static str {
        match self {
            Self::Create => "create the config file",
            Self::Unchanged => "leave the config file unchanged",
            Self::ReplaceWithBackup => "back up and replace the config file",
            Self::Remove => "remove the config file",
            Self::NothingToRemove => "do nothing, the config file is absent",
        }
    }
}

/// Run `action` against `settings`, writing dry-run renderings to `out`.
pub fn run<W: Write>(
    action: &Action,
    settings: &Settings,
    dry_run: bool,
    out: &mut W,
) -> Result<Report, LogglyError> {
    match (action, dry_run) {
        (Action::Configure(config), false) => configure(config, settings),
        (Action::Configure(config), true) => plan_configure(config, settings, out),
        (Action::Remove, false) => unconfigure(settings),
        (Action::Remove, true) => plan_unconfigure(settings),
    }
}

/// Write the rsyslog config for `config` and restart rsyslog.
pub fn configure(config: &Configuration, settings: &Settings) -> Result<Report, LogglyError> {
    info!("Initiating Configure Loggly for Linux.");
    privileges::check_privileges(&settings.rsyslog_conf_dir);

    let contents = render_conf(config, settings);
    let write = file_ops::write_conf(&settings.conf_file(), &settings.backup_file(), &contents)?;
    let restart = control::restart_service(settings)?;

    info!("SUCCESS: Linux system successfully configured to send logs via Loggly.");
    Ok(Report::Configured { write, restart })
}

/// Remove the rsyslog config and restart rsyslog, whether or not a file was present.
pub fn unconfigure(settings: &Settings) -> Result<Report, LogglyError> {
    info!("Initiating uninstall Loggly for Linux.");
    privileges::check_privileges(&settings.rsyslog_conf_dir);

    let removed = file_ops::remove_conf(&settings.conf_file())?;
    let restart = control::restart_service(settings)?;

    info!("SUCCESS: Uninstalled Loggly configuration from Linux system.");
    Ok(Report::Removed { removed, restart })
}

fn plan_configure<W: Write>(
    config: &Configuration,
    settings: &Settings,
    out: &mut W,
) -> Result<Report, LogglyError> {
    let path = settings.conf_file();
    let contents = render_conf(config, settings);
    let plan = match file_ops::inspect(&path, &contents)? {
        ConfState::Absent => Plan::Create,
        ConfState::Unchanged => Plan::Unchanged,
        ConfState::Changed => Plan::ReplaceWithBackup,
    };

    out.write_all(contents.as_bytes())
        .map_err(|e| LogglyError::io("print rendering of", &path, e))?;
    info!("Dry run: would {} at {}", plan.describe(), path.display());
    info!("Dry run: would restart the {} service", settings.service_name);
    Ok(Report::Planned { plan })
}

fn plan_unconfigure(settings: &Settings) -> Result<Report, LogglyError> {
    let path = settings.conf_file();
    let plan = if path.exists() {
        Plan::Remove
    } else {
        Plan::NothingToRemove
    };
    info!("Dry run: would {} at {}", plan.describe(), path.display());
    info!("Dry run: would restart the {} service", settings.service_name);
    Ok(Report::Planned { plan })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn settings_in(dir: &TempDir, command: &str) -> Settings {
        Settings {
            rsyslog_conf_dir: dir.path().to_path_buf(),
            service_command: command.to_string(),
            ..Settings::default()
        }
    }

    fn acme() -> Configuration {
        Configuration {
            account: "acme".to_string(),
            token: "XYZ".to_string(),
            tags: Some(vec!["prod".to_string()]),
            hostname: None,
        }
    }

    #[test]
    fn configure_twice_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let settings = settings_in(&dir, "true");

        let first = configure(&acme(), &settings).unwrap();
        assert_eq!(
            first,
            Report::Configured {
                write: WriteOutcome::Created,
                restart: RestartOutcome::Restarted
            }
        );

        let second = configure(&acme(), &settings).unwrap();
        assert!(matches!(
            second,
            Report::Configured {
                write: WriteOutcome::Unchanged,
                ..
            }
        ));
        assert!(!settings.backup_file().exists());
    }

    #[test]
    fn failed_restart_does_not_fail_configure() {
        let dir = TempDir::new().unwrap();
        let settings = settings_in(&dir, "false");

        let report = configure(&acme(), &settings).unwrap();
        assert!(matches!(
            report,
            Report::Configured {
                restart: RestartOutcome::Failed(_),
                ..
            }
        ));
        assert_eq!(
            fs::read_to_string(settings.conf_file()).unwrap(),
            render_conf(&acme(), &settings)
        );
    }

    #[test]
    fn unconfigure_restarts_even_without_file() {
        let dir = TempDir::new().unwrap();
        let settings = settings_in(&dir, "true");

        let report = unconfigure(&settings).unwrap();
        assert_eq!(
            report,
            Report::Removed {
                removed: false,
                restart: RestartOutcome::Restarted
            }
        );
    }

    #[test]
    fn dry_run_touches_nothing() {
        let dir = TempDir::new().unwrap();
        // A missing command would fail if the restart were attempted
        let settings = settings_in(&dir, "loggly-rsyslog-no-such-command");
        fs::write(settings.conf_file(), "old").unwrap();

        let mut out = Vec::new();
        let report = run(&Action::Configure(acme()), &settings, true, &mut out).unwrap();
        assert_eq!(
            report,
            Report::Planned {
                plan: Plan::ReplaceWithBackup
            }
        );
        assert_eq!(String::from_utf8(out).unwrap(), render_conf(&acme(), &settings));
        assert_eq!(fs::read_to_string(settings.conf_file()).unwrap(), "old");
        assert!(!settings.backup_file().exists());

        let report = run(&Action::Remove, &settings, true, &mut Vec::new()).unwrap();
        assert_eq!(report, Report::Planned { plan: Plan::Remove });
        assert!(settings.conf_file().exists());
    }
}
