//! Product entity and the values used to create and change it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Availability assigned when a create request does not supply one.
pub const DEFAULT_AVAILABILITY: bool = true;

/// Width of the `name` column, in characters.
pub const NAME_MAX_LENGTH: usize = 100;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// The product ID
    #[schema(example = 1)]
    pub id: i64,
    /// The product name
    #[schema(example = "Monitor Curvo 40 Pulgadas")]
    pub name: String,
    /// The product price
    #[schema(example = 399.99)]
    pub price: f64,
    /// The product availability
    #[schema(example = true)]
    pub availability: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields for a product that does not exist yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub price: f64,
    pub availability: Option<bool>,
}

/// Full replacement of the mutable fields. A missing availability keeps the stored one.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductChanges {
    pub name: String,
    pub price: f64,
    pub availability: Option<bool>,
}
