//! Layered option resolution: command-line value, else environment, else none.

use std::fmt;

use log::debug;

use crate::cli::Cli;
use crate::error::LogglyError;

pub const ACCOUNT_ENV: &str = "LOGGLY_ACCOUNT";
pub const TOKEN_ENV: &str = "LOGGLY_TOKEN";
pub const TAGS_ENV: &str = "LOGGLY_TAGS";
pub const HOSTNAME_ENV: &str = "LOGGLY_HOSTNAME";

/// Values rendered into the rsyslog config file.
#[derive(Clone, PartialEq, Eq)]
pub struct Configuration {
    pub account: String,
    pub token: String,
    pub tags: Option<Vec<String>>,
    pub hostname: Option<String>,
}

impl fmt::Debug for Configuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Configuration")
            .field("account", &self.account)
            .field("token", &"<redacted>")
            .field("tags", &self.tags)
            .field("hostname", &self.hostname)
            .finish()
    }
}

/// What a run should do once options are resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Configure(Configuration),
    Remove,
}

/// Resolve the command line against `env` into an [`Action`].
///
/// `env` is consulted only for fields the command line leaves unset. Removal
/// needs no credentials, so it short-circuits validation.
pub fn resolve<F>(cli: &Cli, env: F) -> Result<Action, LogglyError>
where
    F: Fn(&str) -> Option<String>,
{
    if cli.remove {
        return Ok(Action::Remove);
    }

    let account = layered(cli.account.as_ref(), ACCOUNT_ENV, &env);
    let token = layered(cli.token.as_ref(), TOKEN_ENV, &env);
    let (Some(account), Some(token)) = (non_empty(account), non_empty(token)) else {
        return Err(LogglyError::MissingCredentials);
    };

    let tags = match &cli.tags {
        Some(tags) => Some(tags.clone()),
        None => match env(TAGS_ENV).filter(|raw| !raw.is_empty()) {
            Some(raw) => Some(split_tags(&raw)?),
            None => None,
        },
    };

    let hostname = non_empty(layered(cli.hostname.as_ref(), HOSTNAME_ENV, &env));

    let config = Configuration {
        account,
        token,
        tags,
        hostname,
    };
    debug!("Resolved options: {config:?}");
    Ok(Action::Configure(config))
}

fn layered<F>(flag: Option<&String>, var: &str, env: &F) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    match flag {
        Some(value) => Some(value.clone()),
        None => env(var),
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

fn split_tags(raw: &str) -> Result<Vec<String>, LogglyError> {
    shlex::split(raw).ok_or_else(|| LogglyError::InvalidTags {
        var: TAGS_ENV,
        value: raw.to_string(),
    })
}
