//! Run configuration, built once from the command line.

use std::time::Duration;

use hashrun_notify::NotifyConfig;
use hashrun_stager::{StagerConfig, TargetSpec};
use hashrun_supervisor::SupervisorConfig;

use crate::cli::Cli;

/// Everything a run needs, split per component.
#[derive(Debug, Clone)]
pub struct Config {
    /// Hash target; `None` when neither a hash nor a URL was given.
    pub target: Option<TargetSpec>,

    /// Optional wordlist to stage.
    pub wordlist: Option<TargetSpec>,

    /// Attack arguments forwarded to hashcat verbatim.
    pub attack_params: Vec<String>,

    pub supervisor: SupervisorConfig,
    pub notify: NotifyConfig,
    pub stager: StagerConfig,
}

impl Config {
    pub fn from_cli(cli: Cli) -> Self {
        let target = match cli.hash.as_deref().map(str::trim) {
            Some(hash) if !hash.is_empty() => Some(TargetSpec::from_argument(hash)),
            _ => non_empty(cli.hashes_url).map(TargetSpec::Url),
        };
        let wordlist = non_empty(cli.dict_url).map(TargetSpec::Url);

        let mut attack_params: Vec<String> =
            cli.attack.split_whitespace().map(str::to_string).collect();
        attack_params.extend(cli.extra);

        let supervisor = SupervisorConfig {
            binary: cli.hashcat,
            workload: cli.workload,
            status_timer: Duration::from_secs(cli.status_timer_secs),
            notification_interval: Duration::from_secs(cli.notify_interval_secs),
            ..SupervisorConfig::default()
        }
        .with_work_dir(&cli.work_dir);

        let notify = NotifyConfig {
            server: cli.ntfy_server,
            topic: non_empty(cli.ntfy_topic),
            disabled: cli.disable_ntfy,
            ..NotifyConfig::default()
        };

        let stager = StagerConfig {
            work_dir: cli.work_dir,
            ..StagerConfig::default()
        };

        Self {
            target,
            wordlist,
            attack_params,
            supervisor,
            notify,
            stager,
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use clap::Parser;

    use super::*;

    fn parse(args: &[&str]) -> Config {
        let mut argv = vec!["hashrun"];
        argv.extend_from_slice(args);
        Config::from_cli(Cli::try_parse_from(argv).unwrap())
    }

    #[test]
    fn test_inline_hash_wins_over_url() {
        let config = parse(&["--hashes-url", "https://example.com/h.txt", "abc123"]);
        assert_eq!(config.target, Some(TargetSpec::Inline("abc123".to_string())));
    }

    #[test]
    fn test_empty_hash_falls_back_to_url() {
        let config = parse(&["--hashes-url", "https://example.com/h.txt", ""]);
        assert_eq!(
            config.target,
            Some(TargetSpec::Url("https://example.com/h.txt".to_string()))
        );
    }

    #[test]
    fn test_attack_params_then_extras() {
        let config = parse(&[
            "--attack",
            "-m 0  -a 3",
            "hash",
            "--",
            "?d?d?d?d",
            "--increment",
        ]);
        assert_eq!(
            config.attack_params,
            vec!["-m", "0", "-a", "3", "?d?d?d?d", "--increment"]
        );
    }

    #[test]
    fn test_component_configs() {
        let config = parse(&[
            "--work-dir",
            "/var/lib/hashrun",
            "--hashcat",
            "/opt/hashcat/hashcat.bin",
            "--notify-interval-secs",
            "60",
            "--ntfy-topic",
            "cracks",
            "--dict-url",
            "https://example.com/rockyou.txt.gz",
            "hash",
        ]);

        assert_eq!(config.supervisor.binary, "/opt/hashcat/hashcat.bin");
        assert_eq!(
            config.supervisor.outfile,
            PathBuf::from("/var/lib/hashrun/hashcat.out")
        );
        assert_eq!(config.supervisor.notification_interval, Duration::from_secs(60));
        assert_eq!(config.stager.work_dir, PathBuf::from("/var/lib/hashrun"));
        assert_eq!(config.notify.topic.as_deref(), Some("cracks"));
        assert_eq!(
            config.wordlist,
            Some(TargetSpec::Url("https://example.com/rockyou.txt.gz".to_string()))
        );
    }
}
