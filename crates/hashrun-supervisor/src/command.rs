//! Construction of the hashcat command line.

use std::ffi::OsString;
use std::fmt;
use std::path::PathBuf;

use tokio::process::Command;

use crate::config::SupervisorConfig;
use crate::error::SupervisorError;

/// A fully resolved hashcat invocation.
///
/// Arguments are laid out as: workload, status reporting, targets, attack
/// parameters. Attack parameters are forwarded verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttackCommand {
    binary: String,
    workload: String,
    status_timer_secs: u64,
    outfile: PathBuf,
    targets: Vec<PathBuf>,
    attack_params: Vec<String>,
}

impl AttackCommand {
    /// Build the invocation for `targets` using the settings in `config`.
    pub fn new(
        config: &SupervisorConfig,
        targets: &[PathBuf],
        attack_params: &[String],
    ) -> Result<Self, SupervisorError> {
        if targets.is_empty() {
            return Err(SupervisorError::NoTargets);
        }

        Ok(Self {
            binary: config.binary.clone(),
            workload: config.workload.clone(),
            status_timer_secs: config.status_timer.as_secs().max(1),
            outfile: config.outfile.clone(),
            targets: targets.to_vec(),
            attack_params: attack_params.to_vec(),
        })
    }

    pub fn binary(&self) -> &str {
        &self.binary
    }

    /// Argument vector, without the binary.
    pub fn args(&self) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec![
            format!("-w{}", self.workload).into(),
            "--quiet".into(),
            "--status".into(),
            "--status-json".into(),
            format!("--status-timer={}", self.status_timer_secs).into(),
            "--outfile".into(),
            self.outfile.clone().into_os_string(),
        ];
        args.extend(self.targets.iter().map(|t| t.clone().into_os_string()));
        args.extend(self.attack_params.iter().map(OsString::from));
        args
    }

    /// A process builder with the arguments applied; stdio is left to the caller.
    pub fn to_command(&self) -> Command {
        let mut cmd = Command::new(&self.binary);
        cmd.args(self.args());
        cmd
    }
}

impl fmt::Display for AttackCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.binary)?;
        for arg in self.args() {
            write!(f, " {}", arg.to_string_lossy())?;
        }
        Ok(())
    }
}
