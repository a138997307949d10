//! Product handlers. Each one is reached only after its rule set has passed.

use crate::docs::{
    CreateProductBody, DeletedResponse, ProductListResponse, ProductResponse, UpdateProductBody,
};
use crate::error::{AppError, ErrorBody, ValidationErrorBody, PRODUCT_NOT_FOUND};
use crate::extractors::Validated;
use crate::model::NewProduct;
use crate::response::{success_created, success_ok};
use crate::rules::{ProductId, ProductUpdate};
use crate::state::AppState;
use axum::{extract::State, response::IntoResponse};

pub const PRODUCT_DELETED: &str = "Product deleted";

#[utoipa::path(
    get,
    path = "/api/products",
    tag = "Products",
    summary = "Get all products from the database",
    description = "Retrieve a list of products",
    responses(
        (status = 200, description = "Successful response", body = ProductListResponse)
    )
)]
pub async fn get_products(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let products = state.store.list_all().await?;
    Ok(success_ok(products))
}

#[utoipa::path(
    get,
    path = "/api/products/{id}",
    tag = "Products",
    summary = "Get a product by ID",
    description = "Retrieve a product by ID",
    params(("id" = i64, Path, description = "The product ID to retrieve")),
    responses(
        (status = 200, description = "Successful response", body = ProductResponse),
        (status = 404, description = "Product not found", body = ErrorBody),
        (status = 400, description = "Bad request - Invalid product ID", body = ValidationErrorBody)
    )
)]
pub async fn get_product_by_id(
    State(state): State<AppState>,
    Validated(ProductId(id)): Validated<ProductId>,
) -> Result<impl IntoResponse, AppError> {
    let product = state
        .store
        .get_by_id(id)
        .await?
        .ok_or(AppError::NotFound(PRODUCT_NOT_FOUND))?;
    Ok(success_ok(product))
}

#[utoipa::path(
    post,
    path = "/api/products",
    tag = "Products",
    summary = "Create a new product",
    description = "Returns the created product",
    request_body = CreateProductBody,
    responses(
        (status = 201, description = "Product created successfully", body = ProductResponse),
        (
            status = 400,
            description = "Bad request - Invalid product data",
            body = ValidationErrorBody
        )
    )
)]
pub async fn create_product(
    State(state): State<AppState>,
    Validated(input): Validated<NewProduct>,
) -> Result<impl IntoResponse, AppError> {
    let product = state.store.create(input).await?;
    tracing::info!(product_id = product.id, "product created");
    Ok(success_created(product))
}

#[utoipa::path(
    put,
    path = "/api/products/{id}",
    tag = "Products",
    summary = "Update a product by ID",
    description = "Returns the updated product",
    params(("id" = i64, Path, description = "The product ID to update")),
    request_body = UpdateProductBody,
    responses(
        (status = 200, description = "Product updated successfully", body = ProductResponse),
        (status = 404, description = "Product not found", body = ErrorBody),
        (
            status = 400,
            description = "Bad request - Invalid product data",
            body = ValidationErrorBody
        )
    )
)]
pub async fn update_product(
    State(state): State<AppState>,
    Validated(ProductUpdate { id, changes }): Validated<ProductUpdate>,
) -> Result<impl IntoResponse, AppError> {
    state
        .store
        .get_by_id(id)
        .await?
        .ok_or(AppError::NotFound(PRODUCT_NOT_FOUND))?;
    let product = state
        .store
        .update(id, changes)
        .await?
        .ok_or(AppError::NotFound(PRODUCT_NOT_FOUND))?;
    Ok(success_ok(product))
}

#[utoipa::path(
    patch,
    path = "/api/products/{id}",
    tag = "Products",
    summary = "Update the availability of a product by ID",
    description = "Returns the updated product",
    params(("id" = i64, Path, description = "The product ID to update")),
    responses(
        (
            status = 200,
            description = "Product availability updated successfully",
            body = ProductResponse
        ),
        (status = 404, description = "Product not found", body = ErrorBody),
        (
            status = 400,
            description = "Bad request - Invalid product data",
            body = ValidationErrorBody
        )
    )
)]
pub async fn update_availability(
    State(state): State<AppState>,
    Validated(ProductId(id)): Validated<ProductId>,
) -> Result<impl IntoResponse, AppError> {
    state
        .store
        .get_by_id(id)
        .await?
        .ok_or(AppError::NotFound(PRODUCT_NOT_FOUND))?;
    let product = state
        .store
        .toggle_availability(id)
        .await?
        .ok_or(AppError::NotFound(PRODUCT_NOT_FOUND))?;
    Ok(success_ok(product))
}

#[utoipa::path(
    delete,
    path = "/api/products/{id}",
    tag = "Products",
    summary = "Delete a product by ID",
    description = "Returns a confirmation message",
    params(("id" = i64, Path, description = "The product ID to delete")),
    responses(
        (status = 200, description = "Product deleted successfully", body = DeletedResponse),
        (status = 404, description = "Product not found", body = ErrorBody),
        (status = 400, description = "Bad request - Invalid product ID", body = ValidationErrorBody)
    )
)]
pub async fn delete_product(
    State(state): State<AppState>,
    Validated(ProductId(id)): Validated<ProductId>,
) -> Result<impl IntoResponse, AppError> {
    state
        .store
        .get_by_id(id)
        .await?
        .ok_or(AppError::NotFound(PRODUCT_NOT_FOUND))?;
    if !state.store.delete(id).await? {
        return Err(AppError::NotFound(PRODUCT_NOT_FOUND));
    }
    tracing::info!(product_id = id, "product deleted");
    Ok(success_ok(PRODUCT_DELETED))
}
