mod config;
mod plan_cmds;
mod render;
mod serve_cmd;
mod wizard;

use clap::{Parser, Subcommand};

use dreamplan_db::pool;

use config::DreamplanConfig;

#[derive(Parser)]
#[command(
    name = "dreamplan",
    about = "Dream Life Planner -- guided questionnaire with an AI analysis relay"
)]
struct Cli {
    /// Database URL (overrides DREAMPLAN_DATABASE_URL env var)
    #[arg(long, global = true)]
    database_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write a dreamplan config file (no database required)
    Init {
        /// PostgreSQL connection URL
        #[arg(long, default_value = "postgresql://localhost:5432/dreamplan")]
        db_url: String,
        /// Base URL of the analysis relay (`dreamplan serve`)
        #[arg(long, default_value = config::DEFAULT_RELAY_URL)]
        relay_url: String,
        /// Overwrite existing config file
        #[arg(long)]
        force: bool,
    },
    /// Initialize the dreamplan database (requires config file or env vars)
    DbInit,
    /// Run the analysis relay and read API
    Serve {
        /// Address to bind
        #[arg(long, default_value = "127.0.0.1")]
        bind: String,
        /// Port to listen on
        #[arg(long, default_value_t = 8080)]
        port: u16,
    },
    /// Run the interactive five-step questionnaire
    Wizard,
    /// Plan management
    Plan {
        #[command(subcommand)]
        command: PlanCommands,
    },
}

#[derive(Subcommand)]
pub enum PlanCommands {
    /// Show plan details and analysis (omit plan_id to list all plans)
    Show {
        /// Plan ID to show (omit to list all)
        plan_id: Option<String>,
    },
}

/// Execute the `dreamplan init` command: write config file.
fn cmd_init(db_url: &str, relay_url: &str, force: bool) -> anyhow::Result<()> {
    let path = config::config_path();

    if path.exists() && !force {
        anyhow::bail!(
            "config file already exists at {}\nUse --force to overwrite.",
            path.display()
        );
    }

    let cfg = config::ConfigFile {
        database: config::DatabaseSection {
            url: db_url.to_string(),
        },
        relay: config::RelaySection {
            url: relay_url.to_string(),
        },
    };

    config::save_config(&cfg)?;

    println!("Config written to {}", path.display());
    println!("  database.url = {db_url}");
    println!("  relay.url    = {relay_url}");
    println!();
    println!("Next: run `dreamplan db-init` to create and migrate the database.");

    Ok(())
}

/// Execute the `dreamplan db-init` command: create database and run migrations.
async fn cmd_db_init(cli_db_url: Option<&str>) -> anyhow::Result<()> {
    let resolved = DreamplanConfig::resolve(cli_db_url)?;

    println!("Initializing dreamplan database...");

    // 1. Create the database if it does not exist.
    pool::ensure_database_exists(&resolved.db_config).await?;

    // 2. Connect to the target database.
    let db_pool = pool::create_pool(&resolved.db_config).await?;

    // 3. Run migrations.
    pool::run_migrations(&db_pool).await?;

    // 4. Print success with table counts.
    let counts = pool::table_counts(&db_pool).await?;
    println!("Database ready. Tables:");
    for (table, count) in &counts {
        println!("  {table}: {count} rows");
    }

    // 5. Clean shutdown.
    db_pool.close().await;

    println!("dreamplan db-init complete.");
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Init {
            db_url,
            relay_url,
            force,
        } => {
            cmd_init(&db_url, &relay_url, force)?;
        }
        Commands::DbInit => {
            cmd_db_init(cli.database_url.as_deref()).await?;
        }
        Commands::Serve { bind, port } => {
            let resolved = DreamplanConfig::resolve(cli.database_url.as_deref())?;
            let db_pool = pool::create_pool(&resolved.db_config).await?;
            let result = serve_cmd::run_serve(db_pool.clone(), &bind, port).await;
            db_pool.close().await;
            result?;
        }
        Commands::Wizard => {
            let resolved = DreamplanConfig::resolve(cli.database_url.as_deref())?;
            let db_pool = pool::create_pool(&resolved.db_config).await?;
            let result = wizard::run_wizard(db_pool.clone(), resolved.relay_url.clone()).await;
            db_pool.close().await;
            let outcome = result?;

            // The TUI has exited; print the rendered action plan, if any.
            if let Some(outcome) = outcome {
                println!("Plan {} analyzed.", outcome.plan_id);
                println!();
                print!("{}", render::render_analysis(&outcome.analysis));
            }
        }
        Commands::Plan { command } => {
            let resolved = DreamplanConfig::resolve(cli.database_url.as_deref())?;
            let db_pool = pool::create_pool(&resolved.db_config).await?;
            let result = plan_cmds::run_plan_command(command, &db_pool).await;
            db_pool.close().await;
            result?;
        }
    }

    Ok(())
}

#[cfg(test)]
pub(crate) mod test_util {
    use std::sync::{Mutex, MutexGuard};

    static ENV_LOCK: Mutex<()> = Mutex::new(());

    /// Serialise tests that mutate process-wide environment variables.
    pub fn lock_env() -> MutexGuard<'static, ()> {
        ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
