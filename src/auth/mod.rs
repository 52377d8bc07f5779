// Interactive re-authentication through the AWS CLI
use crate::error::Result;
use crate::exec::CommandExecutor;
use std::sync::Arc;

pub const DEFAULT_LOGIN_COMMAND: &str = "aws";

/// Performs out-of-band re-authentication for a profile
#[cfg_attr(test, mockall::automock)]
pub trait Authenticator: Send + Sync {
    fn login<'a>(&self, profile: Option<&'a str>) -> Result<()>;
}

/// Refreshes an SSO session by running `aws sso login`
pub struct SsoLogin {
    executor: Arc<dyn CommandExecutor>,
    program: String,
}

impl SsoLogin {
    pub fn with_program(executor: Arc<dyn CommandExecutor>, program: impl Into<String>) -> Self {
        Self {
            executor,
            program: program.into(),
        }
    }

    fn login_args(profile: Option<&str>) -> Vec<String> {
        let mut args = vec!["sso".to_string(), "login".to_string()];
        if let Some(profile) = profile.filter(|p| !p.is_empty()) {
            args.push("--profile".to_string());
            args.push(profile.to_string());
        }
        args
    }
}

impl Authenticator for SsoLogin {
    fn login<'a>(&self, profile: Option<&'a str>) -> Result<()> {
        let args = Self::login_args(profile);
        tracing::debug!("Starting SSO login via '{}'", self.program);
        self.executor.run(&self.program, &args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConsoleError;
    use crate::exec::MockCommandExecutor;

    fn expect_run(
        executor: &mut MockCommandExecutor,
        program: &'static str,
        want_args: Vec<&'static str>,
        result: fn() -> Result<()>,
    ) {
        executor
            .expect_run()
            .withf(move |p, args| {
                p == program && args.iter().map(String::as_str).eq(want_args.iter().copied())
            })
            .times(1)
            .returning(move |_, _| result());
    }

    #[test]
    fn test_login_without_profile() {
        let mut executor = MockCommandExecutor::new();
        expect_run(&mut executor, "aws", vec!["sso", "login"], || Ok(()));

        let login = SsoLogin::with_program(Arc::new(executor), DEFAULT_LOGIN_COMMAND);
        assert!(login.login(None).is_ok());
    }

    #[test]
    fn test_login_with_profile() {
        let mut executor = MockCommandExecutor::new();
        expect_run(
            &mut executor,
            "aws",
            vec!["sso", "login", "--profile", "dev-profile"],
            || Ok(()),
        );

        let login = SsoLogin::with_program(Arc::new(executor), DEFAULT_LOGIN_COMMAND);
        assert!(login.login(Some("dev-profile")).is_ok());
    }

    #[test]
    fn test_login_empty_profile_is_ignored() {
        let mut executor = MockCommandExecutor::new();
        expect_run(&mut executor, "aws", vec!["sso", "login"], || Ok(()));

        let login = SsoLogin::with_program(Arc::new(executor), DEFAULT_LOGIN_COMMAND);
        assert!(login.login(Some("")).is_ok());
    }

    #[test]
    fn test_login_executor_error() {
        let mut executor = MockCommandExecutor::new();
        expect_run(
            &mut executor,
            "aws",
            vec!["sso", "login", "--profile", "dev-profile"],
            || {
                Err(ConsoleError::CommandFailed {
                    program: "aws".to_string(),
                    reason: "exec failed".to_string(),
                })
            },
        );

        let login = SsoLogin::with_program(Arc::new(executor), DEFAULT_LOGIN_COMMAND);
        let err = login.login(Some("dev-profile")).unwrap_err();
        assert!(err.to_string().contains("exec failed"));
    }

    #[test]
    fn test_login_custom_program() {
        let mut executor = MockCommandExecutor::new();
        expect_run(&mut executor, "aws2", vec!["sso", "login"], || Ok(()));

        let login = SsoLogin::with_program(Arc::new(executor), "aws2");
        assert!(login.login(None).is_ok());
    }
}
