//! `qrportal`: admin console for the conference QR portal.
//!
//! Manages backend contexts and sign-in, and drives the console
//! operations for QR codes, event types and lookups.

mod commands;
mod config;

use clap::{Parser, Subcommand};
use qrportal_client::EventCategory;

/// Conference QR portal admin CLI.
#[derive(Parser, Debug)]
#[command(name = "qrportal", about = "Conference QR portal admin console")]
struct Cli {
    /// Path to client config file (default: ~/.qrportal/config.toml).
    #[arg(long = "config", global = true)]
    config: Option<String>,

    /// Output format: table or json.
    #[arg(long = "output", short = 'o', global = true, default_value = "table")]
    output: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Manage backend contexts.
    #[command(name = "context")]
    Context {
        #[command(subcommand)]
        action: ContextAction,
    },

    /// Switch the current context.
    #[command(name = "use")]
    Use {
        #[command(subcommand)]
        what: UseWhat,
    },

    /// Sign in to the current context with an identity-provider ID token.
    Login {
        /// ID token. Prompted for when omitted.
        #[arg(long)]
        token: Option<String>,
    },

    /// Clear the token from the current context.
    Logout,

    /// Show the signed-in user, roles and pages.
    Whoami,

    /// QR codes.
    Qr {
        #[command(subcommand)]
        action: QrAction,
    },

    /// Event types.
    #[command(name = "event-types")]
    EventTypes {
        #[command(subcommand)]
        action: EventTypeAction,
    },

    /// List conference sessions.
    Sessions,

    /// List employees.
    Employees {
        /// Filter by name or email (at least 2 characters).
        #[arg(long)]
        search: Option<String>,
    },

    /// Show version.
    Version,
}

#[derive(Subcommand, Debug)]
enum ContextAction {
    /// Create a new context.
    Create {
        /// Context name.
        name: String,
        /// Backend URL.
        #[arg(long)]
        server: String,
    },
    /// List all contexts.
    List,
    /// Set properties on a context.
    Set {
        name: String,
        #[arg(long)]
        server: Option<String>,
    },
    /// Delete a context.
    Delete { name: String },
}

#[derive(Subcommand, Debug)]
enum UseWhat {
    /// Switch to a context.
    Context { name: String },
}

#[derive(Subcommand, Debug)]
enum QrAction {
    /// List one page of QR codes.
    List {
        /// Page number, starting at 1.
        #[arg(long, default_value_t = 1)]
        page: usize,
        /// Rows per page: 5, 10, 20 or 50.
        #[arg(long)]
        page_size: Option<usize>,
        /// Filter the page by id, description, email, session or event type.
        #[arg(long)]
        search: Option<String>,
    },
    /// Issue a QR code.
    Create {
        /// SESSION, O2BAR or GENERAL.
        #[arg(long)]
        category: EventCategory,
        /// Recipient email (O2BAR).
        #[arg(long)]
        email: Option<String>,
        /// Session id (SESSION).
        #[arg(long)]
        session_id: Option<String>,
        /// Event type name (GENERAL).
        #[arg(long)]
        event_type: Option<String>,
        /// Coins awarded. Defaults to the event type's default.
        #[arg(long, allow_negative_numbers = true)]
        coins: Option<i64>,
        #[arg(long)]
        description: Option<String>,
    },
    /// Delete a QR code you created.
    Delete {
        id: String,
        /// Skip confirmation.
        #[arg(long = "yes", short = 'y')]
        yes: bool,
    },
}

#[derive(Subcommand, Debug)]
enum EventTypeAction {
    /// List event types.
    List,
    /// Create a GENERAL event type.
    Create {
        name: String,
        #[arg(long, allow_negative_numbers = true)]
        coins: i64,
        #[arg(long)]
        description: Option<String>,
    },
    /// Update an event type's coins or description.
    Update {
        name: String,
        #[arg(long, allow_negative_numbers = true)]
        coins: Option<i64>,
        /// Pass an empty string to clear.
        #[arg(long)]
        description: Option<String>,
    },
    /// Delete a GENERAL event type.
    Delete {
        name: String,
        /// Skip confirmation.
        #[arg(long = "yes", short = 'y')]
        yes: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config_path = cli
        .config
        .map(std::path::PathBuf::from)
        .unwrap_or_else(config::ClientConfig::default_path);
    let json_output = cli.output == "json";
    tracing::debug!(config = %config_path.display(), "using client config");

    match cli.command {
        Commands::Context { action } => match action {
            ContextAction::Create { name, server } => {
                commands::context::create(&name, &server, &config_path)?;
            }
            ContextAction::List => {
                commands::context::list(&config_path)?;
            }
            ContextAction::Set { name, server } => {
                commands::context::set(&name, server.as_deref(), &config_path)?;
            }
            ContextAction::Delete { name } => {
                commands::context::delete(&name, &config_path)?;
            }
        },

        Commands::Use { what } => match what {
            UseWhat::Context { name } => {
                commands::context::use_context(&name, &config_path)?;
            }
        },

        Commands::Login { token } => {
            let token = match token {
                Some(t) => t,
                None => rpassword::prompt_password("ID token: ")?,
            };
            commands::login::login(&token, &config_path).await?;
        }

        Commands::Logout => {
            commands::login::logout(&config_path)?;
        }

        Commands::Whoami => {
            commands::login::whoami(json_output, &config_path).await?;
        }

        Commands::Qr { action } => match action {
            QrAction::List {
                page,
                page_size,
                search,
            } => {
                let args = commands::qr::ListArgs {
                    page,
                    page_size,
                    search,
                };
                commands::qr::list(args, json_output, &config_path).await?;
            }
            QrAction::Create {
                category,
                email,
                session_id,
                event_type,
                coins,
                description,
            } => {
                let args = commands::qr::CreateArgs {
                    category,
                    email,
                    session_id,
                    event_type,
                    coins,
                    description,
                };
                commands::qr::create(args, &config_path).await?;
            }
            QrAction::Delete { id, yes } => {
                commands::qr::delete(&id, yes, &config_path).await?;
            }
        },

        Commands::EventTypes { action } => match action {
            EventTypeAction::List => {
                commands::event_types::list(json_output, &config_path).await?;
            }
            EventTypeAction::Create {
                name,
                coins,
                description,
            } => {
                commands::event_types::create(&name, coins, description, &config_path).await?;
            }
            EventTypeAction::Update {
                name,
                coins,
                description,
            } => {
                commands::event_types::update(&name, coins, description, &config_path).await?;
            }
            EventTypeAction::Delete { name, yes } => {
                commands::event_types::delete(&name, yes, &config_path).await?;
            }
        },

        Commands::Sessions => {
            commands::lookups::sessions(json_output, &config_path).await?;
        }

        Commands::Employees { search } => {
            commands::lookups::employees(search.as_deref(), json_output, &config_path).await?;
        }

        Commands::Version => {
            println!("qrportal cli v{}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
