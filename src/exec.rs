// Child process execution
use crate::error::{ConsoleError, Result};
use std::process::{Command, Stdio};

/// Runs external programs on behalf of the login and browser steps
#[cfg_attr(test, mockall::automock)]
pub trait CommandExecutor: Send + Sync {
    /// Run in the foreground with inherited stdio and wait for completion
    fn run(&self, program: &str, args: &[String]) -> Result<()>;

    /// Start without waiting for the child to exit
    fn spawn(&self, program: &str, args: &[String]) -> Result<()>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemExecutor;

impl CommandExecutor for SystemExecutor {
    fn run(&self, program: &str, args: &[String]) -> Result<()> {
        tracing::debug!("Running {} {:?}", program, args);

        let status = Command::new(program)
            .args(args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|e| ConsoleError::CommandFailed {
                program: program.to_string(),
                reason: e.to_string(),
            })?;

        if !status.success() {
            let reason = match status.code() {
                Some(code) => format!("exited with status {}", code),
                None => "terminated by signal".to_string(),
            };
            return Err(ConsoleError::CommandFailed {
                program: program.to_string(),
                reason,
            });
        }

        Ok(())
    }

    fn spawn(&self, program: &str, args: &[String]) -> Result<()> {
        tracing::debug!("Spawning {} {:?}", program, args);

        Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| ConsoleError::CommandFailed {
                program: program.to_string(),
                reason: e.to_string(),
            })?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_missing_program() {
        let err = SystemExecutor
            .run("aws-console-definitely-missing-binary", &[])
            .unwrap_err();
        assert!(matches!(err, ConsoleError::CommandFailed { .. }));
        assert!(err
            .to_string()
            .contains("aws-console-definitely-missing-binary"));
    }

    #[cfg(unix)]
    #[test]
    fn test_run_reports_exit_status() {
        let err = SystemExecutor
            .run("sh", &["-c".to_string(), "exit 3".to_string()])
            .unwrap_err();
        assert!(err.to_string().contains("exited with status 3"));
    }

    #[cfg(unix)]
    #[test]
    fn test_run_success() {
        assert!(SystemExecutor.run("true", &[]).is_ok());
    }

    #[cfg(unix)]
    #[test]
    fn test_spawn_success() {
        assert!(SystemExecutor.spawn("true", &[]).is_ok());
    }

    #[cfg(unix)]
    #[test]
    fn test_spawn_missing_program() {
        let err = SystemExecutor
            .spawn("aws-console-definitely-missing-binary", &["x".to_string()])
            .unwrap_err();
        assert!(matches!(err, ConsoleError::CommandFailed { .. }));
        assert!(err
            .to_string()
            .contains("aws-console-definitely-missing-binary"));
    }
}
