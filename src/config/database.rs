//! Database configuration module.
//!
//! Handles the `SQLite` connection and table creation using `SeaORM`. Tables are
//! generated from the entity definitions with `Schema::create_table_from_entity`,
//! so the schema always matches the Rust structs. When no database is configured
//! or it cannot be reached, [`open_store`] hands back an unconfigured store that
//! serves the demo data set instead of failing startup.

use crate::core::store::Store;
use crate::entities::{Booking, Client, CrewMember};
use crate::errors::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Schema};
use tracing::{info, warn};

/// Gets the database URL from the `DATABASE_URL` environment variable, if set.
#[must_use]
pub fn get_database_url() -> Option<String> {
    std::env::var("DATABASE_URL")
        .ok()
        .filter(|url| !url.trim().is_empty())
}

/// Establishes a connection to the database at `database_url`.
pub async fn create_connection(database_url: &str) -> Result<DatabaseConnection> {
    Database::connect(database_url).await.map_err(Into::into)
}

/// Creates all tables from the entity definitions, skipping ones that already exist.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let mut client_table = schema.create_table_from_entity(Client);
    let mut crew_table = schema.create_table_from_entity(CrewMember);
    let mut booking_table = schema.create_table_from_entity(Booking);

    client_table.if_not_exists();
    crew_table.if_not_exists();
    booking_table.if_not_exists();

    db.execute(builder.build(&client_table)).await?;
    db.execute(builder.build(&crew_table)).await?;
    db.execute(builder.build(&booking_table)).await?;

    Ok(())
}

/// Opens the entity store.
///
/// Falls back to [`Store::Unconfigured`] when `DATABASE_URL` is missing or the
/// database cannot be opened, so the console stays usable for demos.
pub async fn open_store() -> Store {
    let Some(url) = get_database_url() else {
        warn!("DATABASE_URL is not set; serving fallback data and refusing writes");
        return Store::Unconfigured;
    };

    match create_connection(&url).await {
        Ok(db) => match create_tables(&db).await {
            Ok(()) => {
                info!("Connected to database and ensured tables");
                Store::Connected(db)
            }
            Err(e) => {
                warn!("Failed to create tables: {e}; serving fallback data");
                Store::Unconfigured
            }
        },
        Err(e) => {
            warn!("Failed to connect to database: {e}; serving fallback data");
            Store::Unconfigured
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{BookingModel, ClientModel, CrewMemberModel};
    use sea_orm::{EntityTrait, QuerySelect};

    #[tokio::test]
    async fn test_create_tables() -> Result<()> {
        let db = Database::connect("sqlite::memory:").await?;
        create_tables(&db).await?;

        let _: Vec<ClientModel> = Client::find().limit(1).all(&db).await?;
        let _: Vec<CrewMemberModel> = CrewMember::find().limit(1).all(&db).await?;
        let _: Vec<BookingModel> = Booking::find().limit(1).all(&db).await?;
        Ok(())
    }

    #[tokio::test]
    async fn test_create_tables_is_repeatable() -> Result<()> {
        let db = Database::connect("sqlite::memory:").await?;
        create_tables(&db).await?;
        create_tables(&db).await?;
        Ok(())
    }
}
