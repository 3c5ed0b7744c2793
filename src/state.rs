//! Shared application state.

use std::sync::Arc;

use crate::config::Config;
use crate::error::Result;
use crate::repository::sqlite::Database;
use crate::token::authority::TokenAuthority;

pub struct AppStateInner {
    pub tokens: TokenAuthority,
    pub db: Database,
}

pub type AppState = Arc<AppStateInner>;

struct StateBuilder {
    tokens: TokenAuthority,
    db: Database,
}

impl StateBuilder {
    fn build(self) -> Result<AppState> {
        self.db.seed_admin()?;
        Ok(Arc::new(AppStateInner {
            tokens: self.tokens,
            db: self.db,
        }))
    }
}

pub fn build_state(config: &Config) -> Result<AppState> {
    StateBuilder {
        tokens: TokenAuthority::new(config.jwt_secret_key.clone(), config.jwt_issuer.clone()),
        db: Database::open(&config.database_path)?,
    }
    .build()
}

pub fn build_test_state() -> Result<AppState> {
    StateBuilder {
        tokens: TokenAuthority::new("test-secret", "news-portal-test"),
        db: Database::open_in_memory()?,
    }
    .build()
}
