use clap::{Parser, Subcommand, Args};

#[derive(Parser)]
#[command(name = "pagescope", version, about = "Batch page-speed audits: scores and failing checks for many URLs")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase log verbosity (repeat for more)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress progress output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub log_json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Audit a list of URLs and print per-URL scores
    Audit(AuditArgs),
    /// Serve the dashboard API on a local port
    Serve(ServeArgs),
    /// Validate a configuration file
    Validate(ValidateArgs),
}

/// Settings shared by every command that talks to the scoring service.
#[derive(Args, Clone, Debug, Default)]
pub struct ClientArgs {
    /// YAML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Scoring API key (or set PAGESCOPE_API_KEY / PSI_API_KEY)
    #[arg(long)]
    pub api_key: Option<String>,

    /// Scoring API endpoint
    #[arg(long)]
    pub endpoint: Option<String>,

    /// Device profile: mobile, desktop
    #[arg(long)]
    pub strategy: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Retries for transient failures (network, timeout, rate limit)
    #[arg(long)]
    pub retries: Option<u32>,
}

#[derive(Args, Clone, Debug)]
pub struct AuditArgs {
    /// URLs to audit
    pub urls: Vec<String>,

    /// Read URLs from a file, one per line ("-" for stdin)
    #[arg(short, long)]
    pub file: Option<String>,

    /// Metric: performance, accessibility, best-practices, seo
    #[arg(short, long)]
    pub metric: Option<String>,

    #[command(flatten)]
    pub client: ClientArgs,

    /// Write the JSON report to this path
    #[arg(short, long)]
    pub output: Option<String>,

    /// Print the JSON report to stdout instead of the summary
    #[arg(long)]
    pub json: bool,

    /// Include each URL's failing checks in the summary
    #[arg(long)]
    pub details: bool,
}

#[derive(Args, Clone, Debug)]
pub struct ServeArgs {
    /// Listen port
    #[arg(long, default_value = "8080")]
    pub port: u16,

    /// Listen address
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    #[command(flatten)]
    pub client: ClientArgs,
}

#[derive(Args, Clone, Debug)]
pub struct ValidateArgs {
    /// Config file to validate
    pub config: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_audit_command() {
        let cli = Cli::try_parse_from([
            "pagescope", "audit", "https://a.example", "https://b.example",
            "--metric", "seo", "--timeout", "10", "--details", "-vv",
        ]).unwrap();
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Audit(args) => {
                assert_eq!(args.urls, vec!["https://a.example", "https://b.example"]);
                assert_eq!(args.metric.as_deref(), Some("seo"));
                assert_eq!(args.client.timeout, Some(10));
                assert!(args.details);
                assert!(!args.json);
            }
            _ => panic!("expected audit"),
        }
    }

    #[test]
    fn test_parse_serve_defaults() {
        let cli = Cli::try_parse_from(["pagescope", "serve"]).unwrap();
        match cli.command {
            Commands::Serve(args) => {
                assert_eq!(args.port, 8080);
                assert_eq!(args.host, "127.0.0.1");
                assert!(args.client.api_key.is_none());
            }
            _ => panic!("expected serve"),
        }
    }

    #[test]
    fn test_validate_requires_path() {
        assert!(Cli::try_parse_from(["pagescope", "validate"]).is_err());
    }
}
