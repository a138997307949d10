//! OpenAPI document and the Swagger UI that serves it.

use crate::error::{ErrorBody, ValidationErrorBody};
use crate::handlers::product;
use crate::model::Product;
use crate::validation::{FieldError, Location};
use utoipa::{OpenApi, ToSchema};
use utoipa_swagger_ui::SwaggerUi;

pub const DOCS_PATH: &str = "/api-docs";
pub const OPENAPI_JSON_PATH: &str = "/api-docs/openapi.json";

#[derive(ToSchema)]
pub struct CreateProductBody {
    #[schema(example = "Monitor Curvo 40 Pulgadas")]
    pub name: String,
    #[schema(example = 399.99)]
    pub price: f64,
    #[schema(example = true)]
    pub availability: Option<bool>,
}

#[derive(ToSchema)]
pub struct UpdateProductBody {
    #[schema(example = "Monitor Curvo 45 Pulgadas")]
    pub name: String,
    #[schema(example = 500.99)]
    pub price: f64,
    #[schema(example = true)]
    pub availability: bool,
}

#[derive(ToSchema)]
pub struct ProductResponse {
    pub data: Product,
}

#[derive(ToSchema)]
pub struct ProductListResponse {
    pub data: Vec<Product>,
}

#[derive(ToSchema)]
pub struct DeletedResponse {
    #[schema(example = "Product deleted")]
    pub data: String,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        product::get_products,
        product::get_product_by_id,
        product::create_product,
        product::update_product,
        product::update_availability,
        product::delete_product,
    ),
    components(schemas(
        Product,
        CreateProductBody,
        UpdateProductBody,
        ProductResponse,
        ProductListResponse,
        DeletedResponse,
        ErrorBody,
        ValidationErrorBody,
        FieldError,
        Location,
    )),
    info(description = "API Documentation"),
    tags((name = "Products", description = "Products related endpoints"))
)]
pub struct ApiDoc;

/// Swagger UI at `/api-docs`, backed by the generated document.
pub fn swagger_ui() -> SwaggerUi {
    SwaggerUi::new(DOCS_PATH).url(OPENAPI_JSON_PATH, ApiDoc::openapi())
}
