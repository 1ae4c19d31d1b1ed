//! 产品处理器

use std::collections::BTreeMap;

use axum::{extract::State, http::StatusCode, response::Json};

use super::model::{DeletedProduct, Product, ProductPage, ProductQuery};
use crate::{
    app::AppState,
    core::{
        error::CoreError,
        extract::{JsonBody, PathParam, QueryParams},
    },
};

pub async fn list_products(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<ProductQuery>,
) -> Result<Json<ProductPage>, CoreError> {
    Ok(Json(state.products.list(&query)?))
}

pub async fn product_stats(
    State(state): State<AppState>,
) -> Result<Json<BTreeMap<String, usize>>, CoreError> {
    Ok(Json(state.products.stats()?))
}

pub async fn get_product(
    State(state): State<AppState>,
    PathParam(id): PathParam<String>,
) -> Result<Json<Product>, CoreError> {
    Ok(Json(state.products.get(&id)?))
}

pub async fn create_product(
    State(state): State<AppState>,
    JsonBody(body): JsonBody,
) -> Result<(StatusCode, Json<Product>), CoreError> {
    let product = state.products.create(&body)?;
    Ok((StatusCode::CREATED, Json(product)))
}

pub async fn update_product(
    State(state): State<AppState>,
    PathParam(id): PathParam<String>,
    JsonBody(body): JsonBody,
) -> Result<Json<Product>, CoreError> {
    Ok(Json(state.products.update(&id, &body)?))
}

pub async fn delete_product(
    State(state): State<AppState>,
    PathParam(id): PathParam<String>,
) -> Result<Json<DeletedProduct>, CoreError> {
    let product = state.products.delete(&id)?;
    Ok(Json(DeletedProduct::new(product)))
}
