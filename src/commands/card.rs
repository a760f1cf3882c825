//! Card Commands
//!
//! Hierarchy fetches and card CRUD against the backend.

use serde::Serialize;

use super::{encode, fetch_json, fetch_unit, ApiResult};
use crate::models::{RawCategory, RawNode};

#[derive(Serialize)]
pub struct CreateCardArgs<'a> {
    pub name: &'a str,
    pub parent_id: Option<u32>,
    pub is_folder: bool,
    pub category_id: u32,
}

#[derive(Serialize)]
struct RenameArgs<'a> {
    name: &'a str,
}

#[derive(Serialize)]
struct MoveCardArgs {
    parent_id: Option<u32>,
    category_id: u32,
}

/// Full nested hierarchy for every category in the collection.
pub async fn fetch_hierarchy(collection_id: u32) -> ApiResult<Vec<RawCategory>> {
    fetch_json("GET", &format!("/hierarchy?collection={collection_id}"), None).await
}

/// One category's nested hierarchy (single-category refresh).
pub async fn fetch_category(category_id: u32) -> ApiResult<RawCategory> {
    fetch_json("GET", &format!("/hierarchy?category={category_id}"), None).await
}

pub async fn create_card(args: &CreateCardArgs<'_>) -> ApiResult<RawNode> {
    fetch_json("POST", "/cards", Some(encode(args)?)).await
}

pub async fn rename_card(id: u32, name: &str) -> ApiResult<RawNode> {
    fetch_json("PATCH", &format!("/cards/{id}"), Some(encode(&RenameArgs { name })?)).await
}

/// Reparent a card or folder; failure triggers rollback at the caller.
pub async fn move_card(id: u32, parent_id: Option<u32>, category_id: u32) -> ApiResult<()> {
    let body = encode(&MoveCardArgs { parent_id, category_id })?;
    fetch_unit("PATCH", &format!("/cards/{id}/move"), Some(body)).await
}

pub async fn delete_card(id: u32) -> ApiResult<()> {
    fetch_unit("DELETE", &format!("/cards/{id}"), None).await
}

/// Recursive delete, used when the node still has children.
pub async fn delete_card_bulk(id: u32) -> ApiResult<()> {
    fetch_unit("DELETE", &format!("/cards/{id}/bulk"), None).await
}
