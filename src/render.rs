//! rsyslog forwarding directives for Loggly.
//!
//! The layout below is read by rsyslog's legacy directive parser, so every
//! line, including spacing inside comments, is emitted exactly as rsyslog
//! installations already carry it.

use crate::config::Settings;
use crate::options::Configuration;

const RULE: &str = "-------------------------------------------------------";

/// Render the config file contents for `config`.
pub fn render_conf(config: &Configuration, settings: &Settings) -> String {
    let hostname = config
        .hostname
        .as_deref()
        .filter(|h| !h.is_empty())
        .unwrap_or(settings.hostname_placeholder.as_str());
    let tags = tag_clause(&settings.default_tag, config.tags.as_deref().unwrap_or_default());

    let mut content = String::with_capacity(1024);

    content.push_str(&format!("#          {RULE}\n"));
    content.push_str(&format!(
        "#          Syslog Logging Directives for Loggly ({}.loggly.com)\n",
        config.account
    ));
    content.push_str(&format!("#          {RULE}\n"));
    content.push_str(
        "# Define the template used for sending logs to Loggly. Do not change this format.\n",
    );
    // `\n` stays a literal backslash sequence; rsyslog expands it.
    content.push_str(&format!(
        "$template LogglyFormat,\"<%pri%>%protocol-version% %timestamp:::date-rfc3339% {} %app-name% %procid% %msgid% [{}@{} {}] %msg%\\n\"\n",
        hostname, config.token, settings.distribution_id, tags
    ));
    content.push('\n');

    // Disk-assisted queue so messages survive collector outages
    content.push_str("$WorkDirectory /var/spool/rsyslog # where to place spool files\n");
    content.push_str("$ActionQueueFileName fwdRule1 # unique name prefix for spool files\n");
    content.push_str("$ActionQueueMaxDiskSpace 1g   # 1gb space limit (use as much as possible)\n");
    content.push_str("$ActionQueueSaveOnShutdown on # save messages to disk on shutdown\n");
    content.push_str("$ActionQueueType LinkedList   # run asynchronously\n");
    content.push_str("$ActionResumeRetryCount -1    # infinite retries if host is down\n");
    content.push('\n');

    content.push_str("# Send messages to Loggly over TCP using the template.\n");
    content.push_str(&format!(
        "*.*             @@{}:{};LogglyFormat\n",
        settings.logs_host, settings.syslog_port
    ));
    content.push_str(&format!("#     {RULE}\n"));

    content
}

/// Space-joined `tag=\"X\"` entries, `default_tag` first.
fn tag_clause(default_tag: &str, tags: &[String]) -> String {
    std::iter::once(default_tag)
        .chain(tags.iter().map(String::as_str))
        .map(|tag| format!("tag=\\\"{tag}\\\""))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn acme(tags: Option<&[&str]>, hostname: Option<&str>) -> Configuration {
        Configuration {
            account: "acme".to_string(),
            token: "XYZ".to_string(),
            tags: tags.map(|t| t.iter().map(|s| s.to_string()).collect()),
            hostname: hostname.map(str::to_string),
        }
    }

    const EXPECTED: &str = r#"#          -------------------------------------------------------
#          Syslog Logging Directives for Loggly (acme.loggly.com)
#          -------------------------------------------------------
# Define the template used for sending logs to Loggly. Do not change this format.
$template LogglyFormat,"<%pri%>%protocol-version% %timestamp:::date-rfc3339% %HOSTNAME% %app-name% %procid% %msgid% [XYZ@41058 tag=\"Rsyslog\" tag=\"prod\"] %msg%\n"

$WorkDirectory /var/spool/rsyslog # where to place spool files
$ActionQueueFileName fwdRule1 # unique name prefix for spool files
$ActionQueueMaxDiskSpace 1g   # 1gb space limit (use as much as possible)
$ActionQueueSaveOnShutdown on # save messages to disk on shutdown
$ActionQueueType LinkedList   # run asynchronously
$ActionResumeRetryCount -1    # infinite retries if host is down

# Send messages to Loggly over TCP using the template.
*.*             @@logs-01.loggly.com:514;LogglyFormat
#     -------------------------------------------------------
"#;

    #[test]
    fn renders_exact_layout() {
        let out = render_conf(&acme(Some(&["prod"]), None), &Settings::default());
        assert_eq!(out, EXPECTED);
    }

    #[test]
    fn rendering_is_deterministic() {
        let config = acme(Some(&["a", "b"]), Some("web1"));
        let settings = Settings::default();
        assert_eq!(render_conf(&config, &settings), render_conf(&config, &settings));
    }

    #[test]
    fn no_tags_renders_only_default_tag() {
        let out = render_conf(&acme(None, None), &Settings::default());
        assert_eq!(out.matches("tag=").count(), 1);
        assert!(out.contains(r#"[XYZ@41058 tag=\"Rsyslog\"] %msg%"#));

        let empty = render_conf(&acme(Some(&[]), None), &Settings::default());
        assert_eq!(empty, out);
    }

    #[test]
    fn tags_keep_input_order_after_default() {
        let out = render_conf(&acme(Some(&["z", "a", "m"]), None), &Settings::default());
        assert_eq!(out.matches("tag=").count(), 4);
        assert!(out.contains(r#"tag=\"Rsyslog\" tag=\"z\" tag=\"a\" tag=\"m\""#));
    }

    #[test]
    fn explicit_hostname_replaces_placeholder() {
        let out = render_conf(&acme(None, Some("web1")), &Settings::default());
        assert!(out.contains("date-rfc3339% web1 %app-name%"));
        assert!(!out.contains("%HOSTNAME%"));
    }

    #[test]
    fn empty_hostname_uses_placeholder() {
        let out = render_conf(&acme(None, Some("")), &Settings::default());
        assert!(out.contains("date-rfc3339% %HOSTNAME% %app-name%"));
    }

    #[test]
    fn collector_settings_are_substituted() {
        let settings = Settings {
            logs_host: "logs.example.net".to_string(),
            syslog_port: 6514,
            distribution_id: "7".to_string(),
            ..Settings::default()
        };
        let out = render_conf(&acme(None, None), &settings);
        assert!(out.contains("@@logs.example.net:6514;LogglyFormat\n"));
        assert!(out.contains("[XYZ@7 "));
    }
}
