//! News portal API: token authentication and category management.
//! Used by: binary entrypoint.

pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod pagination;
pub mod repository;
pub mod response;
pub mod server;
pub mod state;
pub mod token;

use clap::Parser;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let config = config::Config::parse();
    let state = state::build_state(&config)?;
    let addr = config.bind_addr();
    tracing::info!(
        issuer = %config.jwt_issuer,
        db = %config.database_path,
        "starting news portal on {}",
        addr
    );

    server::run(state, &addr).await?;
    tracing::info!("server stopped");
    Ok(())
}
