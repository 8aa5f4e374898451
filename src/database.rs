//! # MongoDB
//!
//! Document store for the append-only collections behind the sites.
//!
//! Each request performs an independent insert, so a single shared handle is
//! safe for any number of concurrent requests. The handle is opened lazily on
//! the first request that needs it and reused for the rest of the process
//! lifetime; there is no teardown path.

use mongodb::{Client, Database};
use tokio::sync::OnceCell;
use tracing::info;

use crate::{config::Config, error::AppError};

pub const DB_NAME: &str = "cicerodb";
pub const FEEDBACK_COLLECTION: &str = "feedback";
pub const CONTACT_COLLECTION: &str = "contacts";

static DATABASE: OnceCell<Database> = OnceCell::const_new();

/// Returns the process-wide database handle, opening the connection on first
/// use. Concurrent first callers share a single initialization, so at most
/// one connection is ever established.
pub async fn get_database(config: &Config) -> Result<&'static Database, AppError> {
    DATABASE
        .get_or_try_init(|| async {
            info!("Opening MongoDB connection");
            let client = Client::with_uri_str(&config.mongo_uri)
                .await
                .map_err(AppError::internal)?;
            Ok(client.database(DB_NAME))
        })
        .await
}
