use clap::Parser;

/// CLI arguments for ottochat
#[derive(Parser)]
#[command(name = "ottochat")]
#[command(about = "Otto - the Fluxstream site assistant, in your terminal")]
#[command(version)]
pub struct Cli {
    /// Assistant endpoint URL (defaults to the production endpoint)
    #[arg(long, value_name = "URL", env = "OTTOCHAT_ASSISTANT_URL")]
    pub assistant_url: Option<String>,

    /// Lead-capture webhook URL (defaults to the production workflow)
    #[arg(long, value_name = "URL", env = "OTTOCHAT_WEBHOOK_URL")]
    pub webhook_url: Option<String>,

    /// Seed for greeting selection, for reproducible sessions
    #[arg(long, value_name = "SEED")]
    pub seed: Option<u64>,

    /// Disable the transcript log under ~/.ottochat/logs
    #[arg(long)]
    pub no_log: bool,

    /// Run the chatbot API server instead of the interactive widget
    #[arg(long, action = clap::ArgAction::SetTrue)]
    pub web: bool,

    /// Web server port
    #[arg(long, default_value = "8080", env = "OTTOCHAT_WEB_PORT")]
    pub web_port: u16,

    /// Web server bind address
    #[arg(long, default_value = "127.0.0.1", env = "OTTOCHAT_WEB_BIND")]
    pub web_bind: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["ottochat"]);
        assert!(cli.assistant_url.is_none());
        assert!(!cli.web);
        assert_eq!(cli.web_port, 8080);
        assert_eq!(cli.web_bind, "127.0.0.1");
    }

    #[test]
    fn test_web_flags() {
        let cli = Cli::parse_from(["ottochat", "--web", "--web-port", "9000", "--seed", "7"]);
        assert!(cli.web);
        assert_eq!(cli.web_port, 9000);
        assert_eq!(cli.seed, Some(7));
    }
}
