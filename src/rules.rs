//! Rule sets for the product routes and the inputs they produce.

use crate::error::{AppError, PRODUCT_NOT_FOUND};
use crate::extractors::ValidatedInput;
use crate::model::{NewProduct, ProductChanges, NAME_MAX_LENGTH};
use crate::validation::{coerce_to_bool, coerce_to_f64, coerce_to_string, FieldRule, RequestInput};

pub const MSG_ID_NOT_NUMBER: &str = "Product ID must be a number";
pub const MSG_NAME_EMPTY: &str = "Name cannot be empty";
pub const MSG_NAME_TOO_SHORT: &str = "Name must be at least 3 characters long";
pub const MSG_NAME_TOO_LONG: &str = "Name must be at most 100 characters long";
pub const MSG_PRICE_NOT_NUMBER: &str = "Price must be a number";
pub const MSG_PRICE_EMPTY: &str = "Price cannot be empty";
pub const MSG_PRICE_NOT_POSITIVE: &str = "Price must be greater than 0";
pub const MSG_AVAILABILITY_NOT_BOOLEAN: &str = "Availability must be either true or false";

pub const NAME_MIN_LENGTH: usize = 3;

fn id_rule() -> FieldRule {
    FieldRule::param("id").integer(MSG_ID_NOT_NUMBER)
}

fn name_rule() -> FieldRule {
    FieldRule::body("name")
        .not_empty(MSG_NAME_EMPTY)
        .min_length(NAME_MIN_LENGTH, MSG_NAME_TOO_SHORT)
        .max_length(NAME_MAX_LENGTH, MSG_NAME_TOO_LONG)
}

fn price_rule() -> FieldRule {
    FieldRule::body("price")
        .numeric(MSG_PRICE_NOT_NUMBER)
        .not_empty(MSG_PRICE_EMPTY)
        .positive(MSG_PRICE_NOT_POSITIVE)
}

fn availability_rule() -> FieldRule {
    FieldRule::body("availability").boolean(MSG_AVAILABILITY_NOT_BOOLEAN)
}

/// An id that parses as an integer but overflows `i64` cannot name a stored row.
fn parse_id(input: &RequestInput) -> Result<i64, AppError> {
    input
        .param("id")
        .and_then(|id| id.parse::<i64>().ok())
        .ok_or(AppError::NotFound(PRODUCT_NOT_FOUND))
}

fn parse_price(input: &RequestInput) -> Result<f64, AppError> {
    coerce_to_f64(input.body_field("price"))
        .ok_or_else(|| AppError::BadRequest(MSG_PRICE_NOT_NUMBER.to_string()))
}

/// `:id` path parameter of get, toggle and delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProductId(pub i64);

impl ValidatedInput for ProductId {
    fn rules() -> Vec<FieldRule> {
        vec![id_rule()]
    }

    fn from_input(input: &RequestInput) -> Result<Self, AppError> {
        parse_id(input).map(ProductId)
    }
}

impl ValidatedInput for NewProduct {
    fn rules() -> Vec<FieldRule> {
        vec![name_rule(), price_rule(), availability_rule().optional()]
    }

    fn from_input(input: &RequestInput) -> Result<Self, AppError> {
        Ok(NewProduct {
            name: coerce_to_string(input.body_field("name")),
            price: parse_price(input)?,
            availability: input
                .body_field("availability")
                .and_then(|v| coerce_to_bool(Some(v))),
        })
    }
}

/// Path id plus the replacement fields of a full update.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductUpdate {
    pub id: i64,
    pub changes: ProductChanges,
}

impl ValidatedInput for ProductUpdate {
    fn rules() -> Vec<FieldRule> {
        vec![id_rule(), name_rule(), price_rule(), availability_rule()]
    }

    fn from_input(input: &RequestInput) -> Result<Self, AppError> {
        Ok(ProductUpdate {
            id: parse_id(input)?,
            changes: ProductChanges {
                name: coerce_to_string(input.body_field("name")),
                price: parse_price(input)?,
                availability: coerce_to_bool(input.body_field("availability")),
            },
        })
    }
}
