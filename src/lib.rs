//! Product API: CRUD over a single `products` table with validated input and OpenAPI docs.

pub mod config;
pub mod docs;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod migration;
pub mod model;
pub mod response;
pub mod routes;
pub mod rules;
pub mod server;
pub mod state;
pub mod store;
pub mod validation;

pub use config::Settings;
pub use docs::ApiDoc;
pub use error::AppError;
pub use model::{NewProduct, Product, ProductChanges};
pub use server::{app, connect_to_db, cors_layer, shutdown_signal};
pub use state::AppState;
pub use store::{InMemoryProductStore, PgProductStore, ProductStore};
