//! User lookup and the seeded admin account.
//! Used by: handlers::auth, state.

use chrono::Utc;
use rusqlite::{params, OptionalExtension, Row};

use crate::error::Result;
use crate::repository::sqlite::Database;

pub const ADMIN_NAME: &str = "Admin";
pub const ADMIN_EMAIL: &str = "admin@mail.com";
pub const ADMIN_PASSWORD: &str = "password123";

#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub password_hash: String,
}

impl User {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            name: row.get(1)?,
            email: row.get(2)?,
            password_hash: row.get(3)?,
        })
    }
}

impl Database {
    pub fn find_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let conn = self.conn()?;
        let user = conn
            .query_row(
                "SELECT id, name, email, password FROM users WHERE email = ?1",
                [email],
                User::from_row,
            )
            .optional()?;
        Ok(user)
    }

    pub fn create_user(&self, name: &str, email: &str, password_hash: &str) -> Result<User> {
        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO users (name, email, password, created_at) VALUES (?1, ?2, ?3, ?4)",
            params![name, email, password_hash, Utc::now().to_rfc3339()],
        )?;
        Ok(User {
            id: conn.last_insert_rowid(),
            name: name.to_owned(),
            email: email.to_owned(),
            password_hash: password_hash.to_owned(),
        })
    }

    /// Creates the admin account unless one with the same email exists.
    pub fn seed_admin(&self) -> Result<User> {
        if let Some(existing) = self.find_user_by_email(ADMIN_EMAIL)? {
            return Ok(existing);
        }
        let hash = password_auth::generate_hash(ADMIN_PASSWORD);
        let user = self.create_user(ADMIN_NAME, ADMIN_EMAIL, &hash)?;
        tracing::info!(user_id = user.id, email = ADMIN_EMAIL, "admin user seeded");
        Ok(user)
    }
}
