//! Command-line and environment arguments.

use std::path::PathBuf;

use clap::{ArgAction, Parser};

#[derive(Debug, Parser)]
#[command(name = "hashrun")]
#[command(about = "Run hashcat and push progress and cracked hashes to ntfy")]
#[command(version)]
pub struct Cli {
    /// Hash to crack, or path to a hash file. Falls back to --hashes-url when empty.
    pub hash: Option<String>,

    /// Extra hashcat arguments, appended after --attack
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub extra: Vec<String>,

    /// URL of a hash list to download when no hash is given
    #[arg(long, env = "HASHES_URL")]
    pub hashes_url: Option<String>,

    /// URL of a wordlist to download (.gz, .tar, .tar.gz and .tgz are unpacked)
    #[arg(long, env = "DICT_URL")]
    pub dict_url: Option<String>,

    /// Attack arguments for hashcat, e.g. "-m 0 -a 3 ?d?d?d?d"
    #[arg(long, env = "HASHCAT_ATTACK", default_value = "", allow_hyphen_values = true)]
    pub attack: String,

    /// hashcat executable
    #[arg(long, env = "HASHCAT_BIN", default_value = "hashcat")]
    pub hashcat: String,

    /// Workload profile (-w)
    #[arg(short, long, env = "HASHCAT_WORKLOAD", default_value = "4")]
    pub workload: String,

    /// Directory for downloads and the results file
    #[arg(long, env = "HASHRUN_WORK_DIR", default_value = "/tmp")]
    pub work_dir: PathBuf,

    /// Seconds between hashcat status lines
    #[arg(long, env = "STATUS_TIMER_SECS", default_value = "10")]
    pub status_timer_secs: u64,

    /// Minimum seconds between progress notifications
    #[arg(long, env = "NOTIFY_INTERVAL_SECS", default_value = "1800")]
    pub notify_interval_secs: u64,

    /// ntfy topic to publish to
    #[arg(long, env = "NTFY_TOPIC")]
    pub ntfy_topic: Option<String>,

    /// ntfy server
    #[arg(long, env = "NTFY_SERVER", default_value = "https://ntfy.sh")]
    pub ntfy_server: String,

    /// Log notifications instead of sending them ("true" to disable)
    #[arg(
        long,
        env = "DISABLE_NTFY",
        default_value = "false",
        action = ArgAction::Set,
        value_parser = parse_switch
    )]
    pub disable_ntfy: bool,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

/// Only a case-insensitive "true" switches on; anything else is off.
fn parse_switch(value: &str) -> Result<bool, String> {
    Ok(value.trim().eq_ignore_ascii_case("true"))
}
