//! Runtime settings, read from flags or the environment (`.env` is loaded first by the binary).

use clap::Parser;

pub const DEFAULT_DATABASE_URL: &str = "postgres://localhost/products";

#[derive(Parser, Debug, Clone)]
#[command(name = "product-api", version, about = "Product catalogue REST API")]
pub struct Settings {
    /// Port to listen on
    #[arg(long, env = "PORT", default_value_t = 3000)]
    pub port: u16,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", default_value = DEFAULT_DATABASE_URL)]
    pub database_url: String,

    /// Only this origin may make cross-origin requests; CORS is off when unset
    #[arg(long, env = "FRONTEND_URL")]
    pub frontend_url: Option<String>,

    #[arg(long, env = "DATABASE_MAX_CONNECTIONS", default_value_t = 5)]
    pub max_connections: u32,

    /// Drop and recreate the products table, then exit
    #[arg(long)]
    pub clear: bool,
}
