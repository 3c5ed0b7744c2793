//! Category persistence with unique slugs.
//! Used by: handlers::category.

use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension, Row};
use serde::Serialize;
use slugify::slugify;

use crate::error::{Error, Result};
use crate::repository::sqlite::Database;

const SELECT_CATEGORY: &str = "
    SELECT c.id, c.title, c.slug, c.created_by_id, u.name
    FROM categories c
    JOIN users u ON u.id = c.created_by_id";

/// Used when nothing in a title survives transliteration.
const FALLBACK_SLUG: &str = "category";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Category {
    pub id: i64,
    pub title: String,
    pub slug: String,
    #[serde(skip)]
    pub created_by_id: i64,
    pub created_by_name: String,
}

impl Category {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            title: row.get(1)?,
            slug: row.get(2)?,
            created_by_id: row.get(3)?,
            created_by_name: row.get(4)?,
        })
    }
}

fn find(conn: &Connection, id: i64) -> Result<Option<Category>> {
    let category = conn
        .query_row(
            &format!("{SELECT_CATEGORY} WHERE c.id = ?1"),
            [id],
            Category::from_row,
        )
        .optional()?;
    Ok(category)
}

/// Appends `-2`, `-3`, ... until no other category holds the slug.
fn unique_slug(conn: &Connection, title: &str, except_id: Option<i64>) -> Result<String> {
    let mut base = slugify!(title);
    if base.is_empty() {
        base = FALLBACK_SLUG.to_owned();
    }
    let mut stmt = conn.prepare("SELECT id FROM categories WHERE slug = ?1")?;
    let mut candidate = base.clone();
    let mut suffix = 1;
    loop {
        let holder: Option<i64> = stmt
            .query_row([&candidate], |row| row.get(0))
            .optional()?;
        match holder {
            None => return Ok(candidate),
            Some(id) if Some(id) == except_id => return Ok(candidate),
            Some(_) => {
                suffix += 1;
                candidate = format!("{base}-{suffix}");
            }
        }
    }
}

impl Database {
    pub fn count_categories(&self) -> Result<u64> {
        let conn = self.conn()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM categories", [], |row| row.get(0))?;
        Ok(count as u64)
    }

    /// Newest first, `limit` rows starting at `offset`.
    pub fn list_categories(&self, offset: u64, limit: u64) -> Result<Vec<Category>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!(
            "{SELECT_CATEGORY} ORDER BY c.created_at DESC, c.id DESC LIMIT ?1 OFFSET ?2"
        ))?;
        let categories = stmt
            .query_map([limit as i64, offset as i64], Category::from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(categories)
    }

    pub fn find_category(&self, id: i64) -> Result<Option<Category>> {
        let conn = self.conn()?;
        find(&conn, id)
    }

    pub fn create_category(&self, title: &str, created_by_id: i64) -> Result<Category> {
        let conn = self.conn()?;
        let slug = unique_slug(&conn, title, None)?;
        conn.execute(
            "INSERT INTO categories (title, slug, created_by_id, created_at) VALUES (?1, ?2, ?3, ?4)",
            params![title, slug, created_by_id, Utc::now().to_rfc3339()],
        )?;
        let id = conn.last_insert_rowid();
        find(&conn, id)?.ok_or(Error::NotFound("category"))
    }

    /// Keeps the stored slug when the title is unchanged. Returns `None` if
    /// no category has `id`.
    pub fn update_category(&self, id: i64, title: &str) -> Result<Option<Category>> {
        let conn = self.conn()?;
        let Some(existing) = find(&conn, id)? else {
            return Ok(None);
        };
        let slug = if existing.title == title {
            existing.slug
        } else {
            unique_slug(&conn, title, Some(id))?
        };
        conn.execute(
            "UPDATE categories SET title = ?1, slug = ?2, updated_at = ?3 WHERE id = ?4",
            params![title, slug, Utc::now().to_rfc3339(), id],
        )?;
        find(&conn, id)
    }

    /// Returns whether a row was removed.
    pub fn delete_category(&self, id: i64) -> Result<bool> {
        let conn = self.conn()?;
        let removed = conn.execute("DELETE FROM categories WHERE id = ?1", [id])?;
        Ok(removed > 0)
    }
}
