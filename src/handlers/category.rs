//! Category CRUD endpoints.
//! Used by: server.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use crate::error::{Error, Result};
use crate::middleware::CurrentUser;
use crate::pagination::compute_page;
use crate::repository::category::Category;
use crate::response::SuccessResponse;
use crate::state::AppState;

const MAX_TITLE_LEN: usize = 255;

#[derive(Deserialize)]
pub struct ListQuery {
    #[serde(default = "default_page")]
    pub page: i64,
    #[serde(default)]
    pub limit: i64,
}

fn default_page() -> i64 {
    1
}

#[derive(Deserialize)]
pub struct CategoryRequest {
    #[serde(default)]
    pub title: String,
}

fn validate_request(req: &CategoryRequest) -> Result<&str> {
    let title = req.title.trim();
    if title.is_empty() {
        return Err(Error::Validation("Field title is required".into()));
    }
    if title.chars().count() > MAX_TITLE_LEN {
        return Err(Error::Validation("title must be at most 255 characters".into()));
    }
    Ok(title)
}

fn category_id(path: std::result::Result<Path<i64>, PathRejection>) -> Result<i64> {
    let Path(id) = path.map_err(|e| Error::Validation(e.body_text()))?;
    Ok(id)
}

pub async fn list(
    State(state): State<AppState>,
    user: CurrentUser,
    query: std::result::Result<Query<ListQuery>, QueryRejection>,
) -> Result<Json<SuccessResponse<Vec<Category>>>> {
    let Query(query) = query.map_err(|e| Error::Validation(e.body_text()))?;
    let total = state.db.count_categories()?;
    let page = compute_page(total, query.page, query.limit)?;
    let categories = state.db.list_categories(page.first, page.len())?;
    tracing::debug!(
        user_id = user.user_id,
        page = page.page,
        rows = categories.len(),
        "categories listed"
    );
    Ok(Json(
        SuccessResponse::new("Categories fetched successfully", Some(categories))
            .with_pagination(&page),
    ))
}

pub async fn get(
    State(state): State<AppState>,
    _user: CurrentUser,
    path: std::result::Result<Path<i64>, PathRejection>,
) -> Result<Json<SuccessResponse<Category>>> {
    let id = category_id(path)?;
    let category = state
        .db
        .find_category(id)?
        .ok_or(Error::NotFound("category"))?;
    Ok(Json(SuccessResponse::new(
        "Category fetched successfully",
        Some(category),
    )))
}

pub async fn create(
    State(state): State<AppState>,
    user: CurrentUser,
    payload: std::result::Result<Json<CategoryRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<SuccessResponse<Category>>)> {
    let Json(req) = payload.map_err(|e| Error::Validation(e.body_text()))?;
    let title = validate_request(&req)?;
    let category = state.db.create_category(title, user.user_id)?;
    tracing::info!(
        user_id = user.user_id,
        category_id = category.id,
        slug = %category.slug,
        "category created"
    );
    Ok((
        StatusCode::CREATED,
        Json(SuccessResponse::new("Category created successfully", Some(category))),
    ))
}

pub async fn update(
    State(state): State<AppState>,
    user: CurrentUser,
    path: std::result::Result<Path<i64>, PathRejection>,
    payload: std::result::Result<Json<CategoryRequest>, JsonRejection>,
) -> Result<Json<SuccessResponse<Category>>> {
    let id = category_id(path)?;
    let Json(req) = payload.map_err(|e| Error::Validation(e.body_text()))?;
    let title = validate_request(&req)?;
    let category = state
        .db
        .update_category(id, title)?
        .ok_or(Error::NotFound("category"))?;
    tracing::info!(
        user_id = user.user_id,
        category_id = id,
        slug = %category.slug,
        "category updated"
    );
    Ok(Json(SuccessResponse::new(
        "Category updated successfully",
        Some(category),
    )))
}

pub async fn delete(
    State(state): State<AppState>,
    user: CurrentUser,
    path: std::result::Result<Path<i64>, PathRejection>,
) -> Result<Json<SuccessResponse<()>>> {
    let id = category_id(path)?;
    if !state.db.delete_category(id)? {
        return Err(Error::NotFound("category"));
    }
    tracing::info!(user_id = user.user_id, category_id = id, "category deleted");
    Ok(Json(SuccessResponse::new("Category deleted successfully", None)))
}
