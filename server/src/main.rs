mod cep;
mod config;
mod http;
mod routes;
mod seed;

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use migration::{Migrator, MigratorTrait};
use platform_db::{DatabaseSettings, DbPool, Store};
use platform_obs::{ObsConfig, init_tracing, shutdown_tracing};
use tracing::info;

use crate::{
    cep::CepClient,
    config::AppConfig,
    http::{AppState, ServeConfig},
    seed::SeedOutcome,
};

#[derive(Parser, Debug)]
#[command(name = "franquias-server", version, about = "Franchise and employee management API")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP server.
    Serve(ServeCommand),
    /// Run database migrations.
    #[command(subcommand)]
    Migrate(MigrateCommand),
    /// Insert demo franchises and employees into an empty database.
    Seed,
}

#[derive(Subcommand, Debug)]
enum MigrateCommand {
    /// Apply pending migrations.
    Up,
    /// Rollback the most recent migration.
    Down,
}

#[derive(Args, Debug)]
struct ServeCommand {
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    host: std::net::IpAddr,
    #[arg(long, env = "PORT", default_value_t = 3001)]
    port: u16,
    #[arg(long, help = "Allow starting even when migrations are pending")]
    allow_dirty: bool,
}

impl From<&ServeCommand> for ServeConfig {
    fn from(value: &ServeCommand) -> Self {
        ServeConfig::new(value.host, value.port)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing(ObsConfig::from_env())?;
    let cli = Cli::parse();
    let result = match cli.command {
        Command::Serve(cmd) => run_server(cmd).await,
        Command::Migrate(action) => match action {
            MigrateCommand::Up => migrate_up().await,
            MigrateCommand::Down => migrate_down().await,
        },
        Command::Seed => run_seed().await,
    };
    shutdown_tracing();
    result
}

async fn open_store() -> Result<Store> {
    let settings = DatabaseSettings::from_env();
    Store::connect(&settings).await.map_err(Into::into)
}

async fn run_server(cmd: ServeCommand) -> Result<()> {
    let config = Arc::new(AppConfig::load()?);
    let store = open_store().await?;
    ensure_migrations(store.pool(), cmd.allow_dirty).await?;
    let cep = CepClient::new(config.viacep_base_url.clone(), config.cep_timeout)
        .context("failed to build CEP client")?;
    let state = AppState {
        store,
        cep: Arc::new(cep),
        config,
    };
    http::serve((&cmd).into(), state).await
}

async fn ensure_migrations(pool: &DbPool, allow_dirty: bool) -> Result<()> {
    let pending = Migrator::get_pending_migrations(pool).await?;
    if !pending.is_empty() && !allow_dirty {
        anyhow::bail!(
            "pending migrations detected; run `franquias-server migrate up` or pass --allow-dirty"
        );
    }
    Ok(())
}

async fn migrate_up() -> Result<()> {
    let store = open_store().await?;
    Migrator::up(store.pool(), None).await?;
    info!("database migrations applied");
    store.close().await?;
    Ok(())
}

async fn migrate_down() -> Result<()> {
    let store = open_store().await?;
    Migrator::down(store.pool(), Some(1)).await?;
    info!("most recent migration rolled back");
    store.close().await?;
    Ok(())
}

async fn run_seed() -> Result<()> {
    let store = open_store().await?;
    ensure_migrations(store.pool(), false).await?;
    if let SeedOutcome::Seeded {
        franchises,
        employees,
    } = seed::seed_demo_data(&store).await?
    {
        info!(franchises, employees, "seed finished");
    }
    store.close().await?;
    Ok(())
}

#[cfg(test)]
mod tests;
