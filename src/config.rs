//! Process configuration from flags, environment, and `.env`.
//! Used by: main, state.

use clap::builder::NonEmptyStringValueParser;
use clap::Parser;

#[derive(Clone, Parser)]
#[command(author, version, about = "News portal API", long_about = None)]
pub struct Config {
    /// Interface the HTTP server binds to.
    #[arg(long, env = "APP_HOST", default_value = "0.0.0.0")]
    pub app_host: String,

    /// Port the HTTP server listens on.
    #[arg(long, env = "APP_PORT", default_value_t = 8080)]
    pub app_port: u16,

    /// HMAC secret used to sign access tokens.
    #[arg(long, env = "JWT_SECRET_KEY", hide_env_values = true,
        value_parser = NonEmptyStringValueParser::new())]
    pub jwt_secret_key: String,

    /// Issuer recorded in every access token.
    #[arg(long, env = "JWT_ISSUER", default_value = "news-portal")]
    pub jwt_issuer: String,

    /// SQLite database file.
    #[arg(long, env = "DATABASE_PATH", default_value = "news-portal.db")]
    pub database_path: String,
}

impl Config {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.app_host, self.app_port)
    }
}
