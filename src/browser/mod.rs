// Opening the sign-in URL
use crate::error::{ConsoleError, Result};
use crate::exec::CommandExecutor;
use std::sync::Arc;

/// What the caller still has to do with the URL after `open`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    /// A browser was started with the URL
    Launched,
    /// Nothing was started; the caller shows the URL to the user
    Print,
}

/// Delivers the console sign-in URL to the user
#[cfg_attr(test, mockall::automock)]
pub trait BrowserLauncher: Send + Sync {
    /// Status line shown before `open` is called
    fn announce(&self) -> String;

    fn open(&self, url: &str) -> Result<Delivery>;
}

/// Opens URLs with the platform default application
pub struct SystemBrowser {
    os: String,
    executor: Arc<dyn CommandExecutor>,
}

impl SystemBrowser {
    pub fn new(executor: Arc<dyn CommandExecutor>) -> Self {
        Self::for_os(std::env::consts::OS, executor)
    }

    pub fn for_os(os: impl Into<String>, executor: Arc<dyn CommandExecutor>) -> Self {
        Self {
            os: os.into(),
            executor,
        }
    }

    /// Resolve the opener command and its leading arguments for the target OS
    fn opener(&self) -> Result<(&'static str, Vec<String>)> {
        match self.os.as_str() {
            "macos" => Ok(("open", Vec::new())),
            "linux" | "freebsd" | "openbsd" | "netbsd" | "dragonfly" => {
                Ok(("xdg-open", Vec::new()))
            }
            "windows" => Ok((
                "rundll32",
                vec!["url.dll,FileProtocolHandler".to_string()],
            )),
            other => Err(ConsoleError::UnsupportedPlatform(other.to_string())),
        }
    }
}

impl BrowserLauncher for SystemBrowser {
    fn announce(&self) -> String {
        "Opening AWS Console in your browser...".to_string()
    }

    fn open(&self, url: &str) -> Result<Delivery> {
        let (program, mut args) = self.opener()?;
        args.push(url.to_string());

        tracing::debug!("Launching browser with '{}'", program);
        self.executor
            .spawn(program, &args)
            .map_err(|e| ConsoleError::BrowserLaunchFailed(e.to_string()))?;

        Ok(Delivery::Launched)
    }
}

/// Hands the URL back for printing instead of launching a browser (headless sessions, `--print`)
#[derive(Debug, Default, Clone, Copy)]
pub struct UrlPrinter;

impl BrowserLauncher for UrlPrinter {
    fn announce(&self) -> String {
        "Console sign-in URL (single use, valid for 15 minutes):".to_string()
    }

    fn open(&self, _url: &str) -> Result<Delivery> {
        Ok(Delivery::Print)
    }
}
