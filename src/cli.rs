// src/cli.rs
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{error, info};

use crate::client::ApiClient;
use crate::config::{ApiConfig, Environment};
use crate::endpoints::{Endpoint, Endpoints};

#[derive(Parser)]
#[command(name = "offre-client")]
#[command(about = "Resolve endpoints of and talk to the job-marketplace API")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// development or production
    #[arg(long, global = true)]
    pub env: Option<String>,

    /// Override the environment's base URL
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Insert the /api prefix after the base URL
    #[arg(long, global = true)]
    pub api_prefix: bool,

    /// Bearer token for authenticated commands
    #[arg(long, global = true)]
    pub token: Option<String>,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub json_logs: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Print the effective configuration
    Config,
    /// Print the URL of a named operation
    Resolve {
        operation: String,
        args: Vec<String>,
    },
    /// List every operation with its methods and URL template
    Endpoints,
    /// Log in and print the session token
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// List offers, optionally filtered
    Offers {
        #[arg(long)]
        search: Option<String>,
        #[arg(long)]
        city: Option<String>,
    },
    /// Check whether an account exists for an email
    EmailExists { email: String },
}

impl Cli {
    /// Configuration from the environment plus command-line overrides
    pub fn config(&self) -> Result<ApiConfig> {
        self.config_with(|key| std::env::var(key).ok())
    }

    /// `--env` decides which config file section applies, so it is
    /// resolved before loading rather than patched on afterwards
    pub fn config_with<F>(&self, lookup: F) -> Result<ApiConfig>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = self
            .env
            .as_deref()
            .map(|env| env.parse::<Environment>())
            .transpose()?;
        let mut config = ApiConfig::load_for(environment, lookup)?;

        if let Some(url) = &self.base_url {
            config = config.with_base_url(url.clone());
        }
        if self.api_prefix {
            config = config.with_api_prefix(true);
        }

        Ok(config)
    }
}

pub async fn handle_command(cli: Cli) -> Result<()> {
    let config = cli.config()?;

    match &cli.command {
        Command::Config => {
            println!("environment:    {}", config.environment);
            println!("base url:       {}", config.base_url());
            println!("api prefix:     {}", config.use_api_prefix);
            println!("api root:       {}", config.api_root());
            println!("ai service:     {}", config.ai_base_url());
            println!("socket:         {}", config.socket_url());
            println!("timeout (s):    {}", config.timeout_seconds);
            println!("configured:     {}", config.is_configured());
        }

        Command::Resolve { operation, args } => {
            let endpoint = Endpoint::from_name(operation, args)?;
            println!("{}", Endpoints::new(&config).resolve(&endpoint)?);
        }

        Command::Endpoints => {
            let endpoints = Endpoints::new(&config);
            for endpoint in Endpoint::catalog() {
                let route = endpoint.route();
                let root = match route.host {
                    crate::endpoints::Host::Backend => endpoints.api_root().to_string(),
                    crate::endpoints::Host::AiService => config.ai_base_url().to_string(),
                };
                println!(
                    "{:<30} {:<18} {}{}",
                    route.name, route.methods, root, route.template
                );
            }
        }

        Command::Login { email, password } => {
            let mut client = ApiClient::new(config)?;
            match client.login(email, password).await {
                Ok(session) => {
                    info!("Logged in as {}", session.email().unwrap_or(email));
                    if let Some(expires) = session.expires_at() {
                        println!("expires: {}", expires.to_rfc3339());
                    }
                    println!("{}", session.access_token);
                }
                Err(e) => {
                    error!("Login failed: {}", e);
                    return Err(e).context("Login failed");
                }
            }
        }

        Command::Offers { search, city } => {
            let client = authenticated(config, cli.token.clone())?;
            let offers = match (search, city) {
                (Some(q), _) => client.search_offers(q).await?,
                (None, Some(city)) => client.offers_by_location(city).await?,
                (None, None) => client.offers().await?,
            };
            info!("Fetched {} offers", offers.len());
            for offer in offers {
                println!(
                    "{}  {}  {}  {}",
                    offer.id,
                    offer.title,
                    offer.company.as_deref().unwrap_or("-"),
                    offer.location.as_deref().unwrap_or("-")
                );
            }
        }

        Command::EmailExists { email } => {
            let client = ApiClient::new(config)?;
            let exists = client
                .email_exists(email)
                .await
                .with_context(|| format!("Failed to check {}", email))?;
            println!("{}", exists);
        }
    }

    Ok(())
}

fn authenticated(config: ApiConfig, token: Option<String>) -> Result<ApiClient> {
    let client = ApiClient::new(config)?;
    let token = token.or_else(|| std::env::var("OFFRE_TOKEN").ok());
    Ok(match token {
        Some(token) => client.with_token(token),
        None => client,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn config_file() -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "development:\n  base_url: http://192.168.1.10:3000\nproduction:\n  base_url: https://prod.example.com"
        )
        .unwrap();
        file
    }

    #[test]
    fn test_env_flag_selects_config_section() {
        let file = config_file();
        let path = file.path().to_string_lossy().to_string();
        let lookup = |key: &str| (key == "OFFRE_CONFIG").then(|| path.clone());

        let cli = Cli::try_parse_from(["offre-client", "config", "--env", "production"]).unwrap();
        let config = cli.config_with(lookup).unwrap();
        assert_eq!(config.environment, Environment::Production);
        assert_eq!(config.base_url(), "https://prod.example.com");

        let cli = Cli::try_parse_from(["offre-client", "config"]).unwrap();
        let config = cli.config_with(lookup).unwrap();
        assert_eq!(config.environment, Environment::Development);
        assert_eq!(config.base_url(), "http://192.168.1.10:3000");
    }

    #[test]
    fn test_env_flag_overrides_environment_variable() {
        let file = config_file();
        let path = file.path().to_string_lossy().to_string();
        let lookup = |key: &str| match key {
            "OFFRE_CONFIG" => Some(path.clone()),
            "OFFRE_ENV" => Some("development".to_string()),
            _ => None,
        };

        let cli = Cli::try_parse_from([
            "offre-client",
            "config",
            "--env",
            "prod",
            "--api-prefix",
        ])
        .unwrap();
        let config = cli.config_with(lookup).unwrap();
        assert_eq!(config.api_root(), "https://prod.example.com/api");

        let cli = Cli::try_parse_from(["offre-client", "config", "--env", "staging"]).unwrap();
        assert!(cli.config_with(lookup).is_err());
    }

    #[test]
    fn test_parse_resolve_with_args() {
        let cli = Cli::try_parse_from([
            "offre-client",
            "resolve",
            "chat-messages",
            "c1",
            "2",
            "20",
            "--api-prefix",
        ])
        .unwrap();
        assert!(cli.api_prefix);
        match cli.command {
            Command::Resolve { operation, args } => {
                assert_eq!(operation, "chat-messages");
                assert_eq!(args, vec!["c1", "2", "20"]);
            }
            _ => panic!("expected resolve"),
        }
    }

    #[test]
    fn test_parse_login_requires_flags() {
        assert!(Cli::try_parse_from(["offre-client", "login", "--email", "a@b.c"]).is_err());
        assert!(Cli::try_parse_from([
            "offre-client",
            "login",
            "--email",
            "a@b.c",
            "--password",
            "x"
        ])
        .is_ok());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "offre-client",
            "config",
            "--env",
            "production",
            "--base-url",
            "https://staging.example.com",
        ])
        .unwrap();
        assert_eq!(cli.env.as_deref(), Some("production"));
        assert_eq!(cli.base_url.as_deref(), Some("https://staging.example.com"));
    }
}
