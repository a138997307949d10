//! DDL for the `products` table: create on startup, drop and recreate on `--clear`.

use crate::error::AppError;
use crate::model::NAME_MAX_LENGTH;
use sqlx::PgPool;

pub const PRODUCTS_TABLE: &str = "products";

fn create_table_ddl() -> String {
    format!(
        r#"
        CREATE TABLE IF NOT EXISTS {} (
            id BIGSERIAL PRIMARY KEY,
            name VARCHAR({}) NOT NULL,
            price DOUBLE PRECISION NOT NULL,
            availability BOOLEAN NOT NULL DEFAULT TRUE,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
        PRODUCTS_TABLE, NAME_MAX_LENGTH
    )
}

/// Create the products table if it does not exist. Idempotent.
pub async fn ensure_products_table(pool: &PgPool) -> Result<(), AppError> {
    sqlx::query(&create_table_ddl()).execute(pool).await?;
    Ok(())
}

/// Drop the products table with all of its rows and create it again.
pub async fn reset_products_table(pool: &PgPool) -> Result<(), AppError> {
    let mut tx = pool.begin().await?;
    sqlx::query(&format!("DROP TABLE IF EXISTS {}", PRODUCTS_TABLE))
        .execute(&mut *tx)
        .await?;
    sqlx::query(&create_table_ddl()).execute(&mut *tx).await?;
    tx.commit().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ddl_declares_every_product_column() {
        let ddl = create_table_ddl();
        for column in [
            "id BIGSERIAL",
            "name VARCHAR(100)",
            "price DOUBLE PRECISION",
            "availability BOOLEAN",
            "created_at",
            "updated_at",
        ] {
            assert!(ddl.contains(column), "missing {column}");
        }
        assert!(ddl.contains("DEFAULT TRUE"));
    }
}
