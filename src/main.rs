use std::path::PathBuf;

use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

use deepwork::block_spec::BlockSpec;
use deepwork::commands::{default_session_name, parse_color, Planner, Transition};
use deepwork::config::{get_config_path, AppConfig};
use deepwork::db::Database;
use deepwork::render;

#[derive(Parser)]
#[command(name = "dw")]
#[command(about = "Plan deep work sessions out of typed time blocks")]
struct Cli {
    /// Database file. Overrides the config file and the default location
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List or add categories
    Categories {
        #[command(subcommand)]
        command: CategoryCommands,
    },
    /// Compose a session from blocks and save it
    Plan {
        /// Session name. Defaults to the configured prefix and the start date
        name: Option<String>,

        /// A block as kind:minutes[:category,...]. Repeat in schedule order
        #[arg(short, long = "block", value_parser = BlockSpec::parse, required = true)]
        blocks: Vec<BlockSpec>,

        /// Planned start as RFC 3339. Defaults to now
        #[arg(long, value_parser = parse_start)]
        start: Option<DateTime<Utc>>,

        #[arg(long)]
        description: Option<String>,
    },
    /// Inspect saved sessions and move them through their lifecycle
    Sessions {
        #[command(subcommand)]
        command: SessionCommands,
    },
    /// Save reusable session shapes and schedule from them
    Templates {
        #[command(subcommand)]
        command: TemplateCommands,
    },
    /// Show or change the config file
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand)]
enum CategoryCommands {
    List,
    Add {
        name: String,

        /// 0xAARRGGBB or #RRGGBB
        #[arg(long, value_parser = parse_color, default_value = "0xFF9E9E9E")]
        color: u32,
    },
}

#[derive(Subcommand)]
enum SessionCommands {
    List,
    Show { id: Uuid },
    Start { id: Uuid },
    Complete { id: Uuid },
    Cancel { id: Uuid },
    Delete { id: Uuid },
}

#[derive(Subcommand)]
enum TemplateCommands {
    Save {
        name: String,

        #[arg(short, long = "block", value_parser = BlockSpec::parse, required = true)]
        blocks: Vec<BlockSpec>,

        #[arg(long)]
        description: Option<String>,
    },
    List,
    /// Schedule a new session from a template
    Use {
        id: Uuid,

        #[arg(long, value_parser = parse_start)]
        start: Option<DateTime<Utc>>,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    Show,
    Set {
        #[arg(long)]
        database_path: Option<PathBuf>,

        #[arg(long)]
        session_name_prefix: Option<String>,
    },
}

fn parse_start(s: &str) -> Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| format!("expected an RFC 3339 timestamp: {e}"))
}

/// Logs go to stderr so command output on stdout stays clean.
fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| "deepwork=info,deepwork_core=info".into()),
    );

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let mut config = AppConfig::load();
    let command = match cli.command {
        Commands::Config { command } => return run_config(&mut config, command),
        other => other,
    };

    let db = Database::open(config.resolve_database_path(cli.db)?)?;
    db.migrate()?;
    let planner = Planner::new(db);

    match command {
        Commands::Categories { command } => match command {
            CategoryCommands::List => {
                for category in planner.categories().await? {
                    println!("{}", render::render_category(&category));
                }
            }
            CategoryCommands::Add { name, color } => {
                let category = planner.add_category(&name, color).await?;
                println!("{}", render::render_category(&category));
            }
        },
        Commands::Plan {
            name,
            blocks,
            start,
            description,
        } => {
            let start = start.unwrap_or_else(|| planner.now());
            let name =
                name.unwrap_or_else(|| default_session_name(&config.session_name_prefix, start));
            let session = planner.plan(&name, description, start, &blocks).await?;
            println!("{}", session.id);
            print!("{}", render::render_session(&session));
        }
        Commands::Sessions { command } => match command {
            SessionCommands::List => {
                for session in planner.sessions()? {
                    println!("{}", render::render_session_summary(&session));
                }
            }
            SessionCommands::Show { id } => {
                print!("{}", render::render_session(&planner.session(id)?));
            }
            SessionCommands::Start { id } => {
                let session = planner.transition(id, Transition::Start).await?;
                println!("{}", render::render_session_summary(&session));
            }
            SessionCommands::Complete { id } => {
                let session = planner.transition(id, Transition::Complete).await?;
                println!("{}", render::render_session_summary(&session));
            }
            SessionCommands::Cancel { id } => {
                let session = planner.transition(id, Transition::Cancel).await?;
                println!("{}", render::render_session_summary(&session));
            }
            SessionCommands::Delete { id } => {
                planner.delete_session(id)?;
                println!("Deleted session {}", id);
            }
        },
        Commands::Templates { command } => match command {
            TemplateCommands::Save {
                name,
                blocks,
                description,
            } => {
                let template = planner.save_template(&name, description, &blocks).await?;
                print!("{}", render::render_template(&template));
            }
            TemplateCommands::List => {
                for template in planner.templates()? {
                    print!("{}", render::render_template(&template));
                }
            }
            TemplateCommands::Use { id, start } => {
                let start = start.unwrap_or_else(|| planner.now());
                let session = planner.use_template(id, start).await?;
                println!("{}", session.id);
                print!("{}", render::render_session(&session));
            }
        },
        Commands::Config { .. } => unreachable!("handled before the database is opened"),
    }

    Ok(())
}

fn run_config(config: &mut AppConfig, command: ConfigCommands) -> anyhow::Result<()> {
    match command {
        ConfigCommands::Show => {
            println!("# {}", get_config_path()?.display());
            println!("{}", serde_json::to_string_pretty(config)?);
        }
        ConfigCommands::Set {
            database_path,
            session_name_prefix,
        } => {
            config.apply(database_path, session_name_prefix)?;
            config.save()?;
            println!("{}", serde_json::to_string_pretty(config)?);
        }
    }
    Ok(())
}
