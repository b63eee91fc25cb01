use std::process::ExitCode;

/// Exit status for CLI commands.
///
/// - `Success` (0): command completed, outputs written or already up to date
/// - `Failure` (1): command completed but the outputs are stale, or `init`
///   found an existing config
/// - `Error` (2): internal error (invalid config, unreadable map, write failure)
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExitStatus {
    Success,
    Failure,
    Error,
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        match status {
            ExitStatus::Success => ExitCode::from(0),
            ExitStatus::Failure => ExitCode::from(1),
            ExitStatus::Error => ExitCode::from(2),
        }
    }
}
