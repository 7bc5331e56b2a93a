use std::process::{ExitStatus, Stdio};
use std::time::Duration;

use thiserror::Error;
use tokio::process::Command;

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("failed to run `{program}`: {source}")]
    Io {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{program}` timed out after {timeout:?}")]
    TimedOut { program: String, timeout: Duration },

    #[error("`{program}` exited with {status}")]
    Failed {
        program: String,
        status: ExitStatus,
        stdout: String,
    },
}

/// Runs `program` and returns its stdout.
///
/// The child is killed when `timeout` elapses first. A non-zero exit keeps the
/// captured stdout in [`CommandError::Failed`] since some tools (ping) report
/// useful data on failure.
pub async fn run(program: &str, args: &[&str], timeout: Duration) -> Result<String, CommandError> {
    let child = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .kill_on_drop(true)
        .spawn()
        .map_err(|source| CommandError::Io {
            program: program.to_string(),
            source,
        })?;

    let output = match tokio::time::timeout(timeout, child.wait_with_output()).await {
        Ok(Ok(output)) => output,
        Ok(Err(source)) => {
            return Err(CommandError::Io {
                program: program.to_string(),
                source,
            });
        }
        Err(_elapsed) => {
            return Err(CommandError::TimedOut {
                program: program.to_string(),
                timeout,
            });
        }
    };

    let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
    if output.status.success() {
        Ok(stdout)
    } else {
        Err(CommandError::Failed {
            program: program.to_string(),
            status: output.status,
            stdout,
        })
    }
}
