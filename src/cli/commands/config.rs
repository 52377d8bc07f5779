use crate::cli::ConfigCommand;
use crate::config::Config;
use crate::error::Result;

pub fn execute(command: ConfigCommand) -> Result<()> {
    match command {
        ConfigCommand::Init => {
            let config_path = Config::create_sample()?;
            println!("Created sample config file at: {}", config_path.display());
        }
        ConfigCommand::Path => {
            let config_path = Config::config_file_path()?;
            println!("Config file path: {}", config_path.display());

            if !config_path.exists() {
                println!("Status: File does not exist (built-in defaults are used)");
                println!("\nTo create a sample config file, run:");
                println!("  aws-console config init");
                return Ok(());
            }

            println!("Status: File exists");
            match Config::load_from(&config_path) {
                Ok(config) => {
                    println!("Valid: Yes");
                    println!("\nConsole:");
                    println!("  Session duration: {}s", config.console.session_duration);
                    println!(
                        "  Region: {}",
                        config.console.region.as_deref().unwrap_or("(default)")
                    );
                    println!("  Destination: {}", config.destination());
                    println!(
                        "  SSO login fallback: {}",
                        if config.login.enabled {
                            config.login.command.as_str()
                        } else {
                            "disabled"
                        }
                    );
                }
                Err(e) => {
                    println!("Valid: No");
                    println!("Error: {}", e);
                }
            }
        }
    }

    Ok(())
}
