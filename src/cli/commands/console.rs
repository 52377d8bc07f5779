use crate::auth::SsoLogin;
use crate::browser::{BrowserLauncher, SystemBrowser, UrlPrinter};
use crate::cli::OpenArgs;
use crate::config::Config;
use crate::console::FederationClient;
use crate::env;
use crate::error::Result;
use crate::exec::SystemExecutor;
use crate::identity::StsIdentityService;
use crate::workflow::Workflow;
use std::io;
use std::sync::Arc;

/// Merge command line flags over the config file
fn apply_overrides(mut config: Config, args: &OpenArgs) -> Config {
    if let Some(region) = &args.region {
        config.console.region = Some(region.clone());
    }
    if let Some(duration) = args.duration {
        config.console.session_duration = duration;
    }
    if args.print {
        config.browser.print_only = true;
    }
    if args.no_login {
        config.login.enabled = false;
    }
    config
}

fn select_launcher(config: &Config, headless: bool) -> Arc<dyn BrowserLauncher> {
    if config.browser.print_only || headless {
        Arc::new(UrlPrinter)
    } else {
        Arc::new(SystemBrowser::new(Arc::new(SystemExecutor)))
    }
}

pub async fn execute(args: OpenArgs) -> Result<()> {
    let config = apply_overrides(Config::load()?, &args);
    let profile = args.profile.as_deref().filter(|p| !p.is_empty());

    tracing::debug!(
        "Opening console for profile {:?} ({}s session)",
        profile,
        config.console.session_duration
    );

    let identity = Arc::new(StsIdentityService::new(config.console.region.clone()));
    let federation = Arc::new(FederationClient::from_config(&config)?);
    let launcher = select_launcher(&config, env::is_headless_environment());

    let mut workflow = Workflow::new(
        identity,
        federation,
        launcher,
        config.console.session_duration,
    );

    if config.login.enabled {
        let login = SsoLogin::with_program(Arc::new(SystemExecutor), config.login.command.clone());
        workflow = workflow.with_authenticator(Arc::new(login));
    }

    let mut stdout = io::stdout();
    let mut stderr = io::stderr();
    workflow.run(profile, &mut stdout, &mut stderr).await
}
