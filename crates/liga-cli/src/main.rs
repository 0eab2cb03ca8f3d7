mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "liga")]
#[command(about = "League roles and permissions tool")]
#[command(version)]
struct Cli {
    /// Path to the liga config directory (default: ~/.liga)
    #[arg(long, global = true, env = "LIGA_CONFIG_DIR")]
    config_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a default config with a fresh JWT secret
    Init,

    /// Show current configuration
    Config,

    /// List league roles
    Roles,

    /// List every capability with its description
    Capabilities,

    /// Show the capabilities granted to a role
    Grants {
        /// Role id or name (e.g. 3, delegate, delegado)
        role: String,
    },

    /// Check whether a role holds one or more capabilities
    Check {
        /// Role id or name; unknown roles are denied
        #[arg(long)]
        role: String,
        /// Require every capability instead of any one
        #[arg(long)]
        all: bool,
        /// Capability names (e.g. create_championship)
        #[arg(required = true)]
        capabilities: Vec<String>,
    },

    /// Issue or inspect session tokens
    Token {
        #[command(subcommand)]
        action: TokenAction,
    },
}

#[derive(Subcommand)]
enum TokenAction {
    /// Issue a signed session token
    Issue {
        /// User id placed in `sub`
        #[arg(long)]
        user: String,
        #[arg(long)]
        username: String,
        /// Role id or name; omitted means no role
        #[arg(long)]
        role: Option<String>,
    },
    /// Verify a token and print its claims
    Inspect { token: String },
}

fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("liga=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let base_dir = match cli.config_dir {
        Some(ref dir) => dir.clone(),
        None => liga_core::config::LigaConfig::default_base_dir()?,
    };

    match cli.command {
        Commands::Init => commands::init::run(&base_dir)?,
        Commands::Config => commands::config::run(&base_dir)?,
        Commands::Roles => commands::roles::run()?,
        Commands::Capabilities => commands::capabilities::run()?,
        Commands::Grants { ref role } => commands::grants::run(role, &base_dir)?,
        Commands::Check {
            ref role,
            all,
            ref capabilities,
        } => {
            let allowed = commands::check::run(role, capabilities, all, &base_dir)?;
            if !allowed {
                return Ok(ExitCode::FAILURE);
            }
        }
        Commands::Token { ref action } => match action {
            TokenAction::Issue {
                user,
                username,
                role,
            } => commands::token::issue(user, username, role.as_deref(), &base_dir)?,
            TokenAction::Inspect { token } => commands::token::inspect(token, &base_dir)?,
        },
    }

    Ok(ExitCode::SUCCESS)
}
