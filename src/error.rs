use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConsoleError {
    #[error("AWS SDK error: {0}")]
    AwsSdk(String),

    #[error("failed to load AWS config: {0}")]
    AwsConfig(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("{0}")]
    Federation(String),

    #[error("failed to request signin token: {0}")]
    Http(#[from] reqwest::Error),

    #[error("command '{program}' failed: {reason}")]
    CommandFailed { program: String, reason: String },

    #[error("unsupported platform: {0}")]
    UnsupportedPlatform(String),

    #[error("Browser launch failed: {0}")]
    BrowserLaunchFailed(String),

    #[error("credentials are not valid: {0}")]
    InvalidCredentials(Box<ConsoleError>),

    #[error("SSO login failed: {0}")]
    LoginFailed(Box<ConsoleError>),

    #[error("credentials still invalid after SSO login: {0}")]
    StillUnauthenticated(Box<ConsoleError>),

    #[error("failed to retrieve credentials: {0}")]
    CredentialRetrieval(Box<ConsoleError>),

    #[error("failed to get temporary credentials: {0}")]
    TemporaryCredentials(Box<ConsoleError>),

    #[error("failed to build console URL: {0}")]
    ConsoleUrl(Box<ConsoleError>),

    #[error("background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ConsoleError>;
