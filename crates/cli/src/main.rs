//! # Mailauth
//!
//! Checks a domain's SPF, DKIM, DMARC and MX records and prints or serves the
//! records to publish for the mail service.

mod bootstrap;
mod commands;
mod di;
mod server;

use clap::{Parser, Subcommand};
use mailauth_domain::CliOverrides;

use bootstrap::{init_logging, load_config};
use commands::{run_check, CheckArgs};
use di::build_app_state;
use server::start_web_server;

#[derive(Parser)]
#[command(name = "mailauth")]
#[command(version)]
#[command(about = "Email-authentication DNS checker (SPF, DKIM, DMARC, MX)")]
struct Cli {
    /// Path to a TOML configuration file (default: ./mailauth.toml if present)
    #[arg(short = 'c', long, global = true)]
    config: Option<String>,

    /// Log level: trace, debug, info, warn, error
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Upstream DNS server as ip:port; repeat to set several
    #[arg(long = "upstream", global = true)]
    upstreams: Vec<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP API
    Serve {
        /// Bind address
        #[arg(short = 'b', long)]
        bind: Option<String>,

        /// Web server port
        #[arg(short = 'w', long)]
        web_port: Option<u16>,
    },
    /// Check one domain and print the records to publish
    Check {
        /// DKIM selector of the mail service
        #[arg(short = 's', long)]
        selector: Option<String>,

        #[command(flatten)]
        args: CheckArgs,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut overrides = CliOverrides {
        log_level: cli.log_level.clone(),
        upstream_servers: (!cli.upstreams.is_empty()).then(|| cli.upstreams.clone()),
        ..CliOverrides::default()
    };
    match &cli.command {
        Command::Serve { bind, web_port } => {
            overrides.bind_address = bind.clone();
            overrides.web_port = *web_port;
        }
        Command::Check { selector, .. } => {
            overrides.dkim_selector = selector.clone();
        }
    }

    let config = load_config(cli.config.as_deref(), overrides)?;
    init_logging(&config);

    let state = build_app_state(&config)?;

    match cli.command {
        Command::Serve { .. } => start_web_server(state, &config.server).await,
        Command::Check { args, .. } => {
            run_check(&state, &config.mail_service.dkim_selector, args).await
        }
    }
}
