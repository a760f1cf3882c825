//! Category Commands

use serde::Serialize;

use super::{encode, fetch_json, fetch_unit, ApiResult};
use crate::models::RawCategory;

#[derive(Serialize)]
pub struct CreateCategoryArgs<'a> {
    pub name: &'a str,
    pub collection_id: u32,
}

#[derive(Serialize)]
struct RenameCategoryArgs<'a> {
    name: &'a str,
}

pub async fn create_category(args: &CreateCategoryArgs<'_>) -> ApiResult<RawCategory> {
    fetch_json("POST", "/categories", Some(encode(args)?)).await
}

pub async fn rename_category(id: u32, name: &str) -> ApiResult<RawCategory> {
    let body = encode(&RenameCategoryArgs { name })?;
    fetch_json("PATCH", &format!("/categories/{id}"), Some(body)).await
}

/// Delete a category and everything inside it.
pub async fn delete_category_bulk(id: u32) -> ApiResult<()> {
    fetch_unit("DELETE", &format!("/categories/{id}/bulk"), None).await
}
