//! Entity store - one entry point for every read and write of clients, crew,
//! and bookings.
//!
//! A connected store delegates to the `SeaORM` functions in the sibling
//! modules. An unconfigured store answers reads from the demo data set in
//! [`fallback`](super::fallback) and refuses every write with
//! [`Error::StoreNotConfigured`]. A connected store whose database stops
//! answering falls back to the same demo data for reads. [`StoreOutcome`] is the uniform success/error
//! shape handed to the console so raw errors never travel past this boundary.

use crate::{
    core::{booking, client, crew, fallback},
    entities::{BookingModel, ClientModel, CrewMemberModel},
    errors::{Error, Result},
};
use sea_orm::DatabaseConnection;
use serde::Serialize;
use tracing::{debug, warn};

/// Handle to the backing data store.
#[derive(Debug, Clone)]
pub enum Store {
    /// Backed by a live database
    Connected(DatabaseConnection),
    /// No database: reads serve demo data, writes fail
    Unconfigured,
}

/// Uniform result of a write, as shown to the operator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoreOutcome {
    pub success: bool,
    pub id: Option<String>,
    pub error: Option<String>,
}

impl StoreOutcome {
    /// Converts a write result into an outcome, logging failures.
    #[must_use]
    pub fn from_result(operation: &str, result: Result<String>) -> Self {
        match result {
            Ok(id) => Self {
                success: true,
                id: Some(id),
                error: None,
            },
            Err(e) => {
                warn!("{operation} failed: {e}");
                Self {
                    success: false,
                    id: None,
                    error: Some(e.user_message(operation)),
                }
            }
        }
    }
}

/// Serves `fallback` when the database could not be reached.
fn or_fallback<T>(what: &str, result: Result<T>, fallback: impl FnOnce() -> T) -> Result<T> {
    match result {
        Err(e) if e.is_unreachable() => {
            warn!("Database unreachable while reading {what}, serving demo data: {e}");
            Ok(fallback())
        }
        other => other,
    }
}

impl Store {
    /// Whether writes can succeed.
    #[must_use]
    pub const fn is_configured(&self) -> bool {
        matches!(self, Self::Connected(_))
    }

    fn writable(&self) -> Result<&DatabaseConnection> {
        match self {
            Self::Connected(db) => Ok(db),
            Self::Unconfigured => Err(Error::StoreNotConfigured),
        }
    }

    /// Clients ordered by name.
    pub async fn list_clients(&self) -> Result<Vec<ClientModel>> {
        match self {
            Self::Connected(db) => {
                or_fallback("clients", client::get_all_clients(db).await, fallback::clients)
            }
            Self::Unconfigured => Ok(fallback::clients()),
        }
    }

    /// Looks a client up by id.
    pub async fn get_client(&self, client_id: &str) -> Result<Option<ClientModel>> {
        let from_fallback = || fallback::clients().into_iter().find(|c| c.id == client_id);
        match self {
            Self::Connected(db) => or_fallback(
                "client",
                client::get_client_by_id(db, client_id).await,
                from_fallback,
            ),
            Self::Unconfigured => Ok(from_fallback()),
        }
    }

    /// Creates a client.
    pub async fn create_client(&self, new_client: client::NewClient) -> Result<ClientModel> {
        client::create_client(self.writable()?, new_client).await
    }

    /// Edits a client; bookings keep the name they captured.
    pub async fn update_client(
        &self,
        client_id: &str,
        changes: client::ClientUpdate,
    ) -> Result<ClientModel> {
        client::update_client(self.writable()?, client_id, changes).await
    }

    /// Deletes a client; bookings referencing it are kept.
    pub async fn delete_client(&self, client_id: &str) -> Result<()> {
        client::delete_client(self.writable()?, client_id).await
    }

    /// Crew members ordered by name.
    pub async fn list_crew(&self) -> Result<Vec<CrewMemberModel>> {
        match self {
            Self::Connected(db) => or_fallback("crew", crew::get_all_crew(db).await, fallback::crew),
            Self::Unconfigured => Ok(fallback::crew()),
        }
    }

    /// Looks a crew member up by id.
    pub async fn get_crew_member(&self, crew_id: &str) -> Result<Option<CrewMemberModel>> {
        let from_fallback = || fallback::crew().into_iter().find(|m| m.id == crew_id);
        match self {
            Self::Connected(db) => or_fallback(
                "crew member",
                crew::get_crew_member_by_id(db, crew_id).await,
                from_fallback,
            ),
            Self::Unconfigured => Ok(from_fallback()),
        }
    }

    /// Creates a crew member.
    pub async fn create_crew_member(
        &self,
        name: String,
        role: String,
        status: crew::CrewStatus,
    ) -> Result<CrewMemberModel> {
        crew::create_crew_member(self.writable()?, name, role, status).await
    }

    /// Edits a crew member's name, role, or availability.
    pub async fn update_crew_member(
        &self,
        crew_id: &str,
        changes: crew::CrewUpdate,
    ) -> Result<CrewMemberModel> {
        crew::update_crew_member(self.writable()?, crew_id, changes).await
    }

    /// Deletes a crew member; bookings keep the id in their crew set.
    pub async fn delete_crew_member(&self, crew_id: &str) -> Result<()> {
        crew::delete_crew_member(self.writable()?, crew_id).await
    }

    /// Bookings in insertion order, narrowed by `filter`.
    pub async fn list_bookings(&self, filter: &booking::BookingFilter) -> Result<Vec<BookingModel>> {
        let from_fallback = || -> Vec<BookingModel> {
            let bookings: Vec<BookingModel> = fallback::bookings()
                .into_iter()
                .filter(|b| filter.matches(b))
                .collect();
            debug!("Serving {} fallback bookings", bookings.len());
            bookings
        };
        match self {
            Self::Connected(db) => or_fallback(
                "bookings",
                booking::list_bookings(db, filter).await,
                from_fallback,
            ),
            Self::Unconfigured => Ok(from_fallback()),
        }
    }

    /// Looks a booking up by id.
    pub async fn get_booking(&self, booking_id: &str) -> Result<Option<BookingModel>> {
        let from_fallback = || fallback::bookings().into_iter().find(|b| b.id == booking_id);
        match self {
            Self::Connected(db) => or_fallback(
                "booking",
                booking::get_booking_by_id(db, booking_id).await,
                from_fallback,
            ),
            Self::Unconfigured => Ok(from_fallback()),
        }
    }

    /// Inserts a validated booking.
    pub async fn create_booking(&self, validated: booking::ValidatedBooking) -> Result<BookingModel> {
        booking::insert_booking(self.writable()?, validated).await
    }

    /// Replaces a booking wholesale.
    pub async fn update_booking(
        &self,
        booking_id: &str,
        validated: booking::ValidatedBooking,
    ) -> Result<BookingModel> {
        booking::replace_booking(self.writable()?, booking_id, validated).await
    }

    /// Deletes a booking.
    pub async fn delete_booking(&self, booking_id: &str) -> Result<()> {
        booking::delete_booking(self.writable()?, booking_id).await
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::core::booking::{BookingFilter, BookingStatus};
    use crate::test_utils::*;
    use chrono::NaiveDate;

    #[tokio::test]
    async fn test_unconfigured_reads_serve_fallback() -> Result<()> {
        let store = Store::Unconfigured;
        assert_eq!(store.list_clients().await?.len(), 2);
        assert_eq!(store.list_crew().await?.len(), 3);
        assert_eq!(store.list_bookings(&BookingFilter::default()).await?.len(), 2);

        let drafts = store
            .list_bookings(&BookingFilter {
                status: Some(BookingStatus::Draft),
                ..Default::default()
            })
            .await?;
        assert_eq!(drafts.len(), 1);
        assert_eq!(drafts[0].id, fallback::BOOKING_GALA);

        assert!(store.get_booking(fallback::BOOKING_WEDDING).await?.is_some());
        assert!(store.get_client("nope").await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn test_unconfigured_writes_fail_explicitly() {
        let store = Store::Unconfigured;
        let created = store
            .create_client(client::NewClient {
                name: "Ana".to_string(),
                ..Default::default()
            })
            .await;
        assert!(matches!(created, Err(Error::StoreNotConfigured)));

        let validated =
            validated_booking("c1", "Ana", NaiveDate::from_ymd_opt(2024, 12, 1).unwrap());
        assert!(matches!(
            store.create_booking(validated).await,
            Err(Error::StoreNotConfigured)
        ));
        assert!(matches!(
            store.delete_booking(fallback::BOOKING_GALA).await,
            Err(Error::StoreNotConfigured)
        ));
    }

    #[test]
    fn test_store_outcome_from_result() {
        let ok = StoreOutcome::from_result("add client", Ok("id-1".to_string()));
        assert!(ok.success);
        assert_eq!(ok.id.as_deref(), Some("id-1"));

        let failed = StoreOutcome::from_result("add client", Err(Error::StoreNotConfigured));
        assert!(!failed.success);
        assert!(failed.error.unwrap().starts_with("Failed to add client"));
    }

    #[tokio::test]
    async fn test_lost_connection_reads_serve_fallback() -> Result<()> {
        let db = setup_test_db().await?;
        let store = Store::Connected(db.clone());
        db.close().await?;

        assert_eq!(store.list_clients().await?.len(), 2);
        assert_eq!(store.list_crew().await?.len(), 3);
        assert_eq!(store.list_bookings(&BookingFilter::default()).await?.len(), 2);
        assert!(store.get_booking(fallback::BOOKING_WEDDING).await?.is_some());
        assert!(store.get_crew_member("nobody").await?.is_none());

        let written = store
            .create_client(client::NewClient {
                name: "Ana".to_string(),
                ..Default::default()
            })
            .await;
        assert!(matches!(written, Err(Error::Database(_))));
        Ok(())
    }

    #[tokio::test]
    async fn test_edits_go_through_the_store() -> Result<()> {
        let db = setup_test_db().await?;
        let ana = create_test_client(&db, "Ana").await?;
        let dewi = create_test_crew(&db, "Dewi").await?;
        let store = Store::Connected(db);

        let ana = store
            .update_client(
                &ana.id,
                client::ClientUpdate {
                    contact_phone: Some("0899 1111 2222".to_string()),
                    ..Default::default()
                },
            )
            .await?;
        assert_eq!(ana.contact_phone.as_deref(), Some("0899 1111 2222"));

        let dewi = store
            .update_crew_member(
                &dewi.id,
                crew::CrewUpdate {
                    role: Some("Rigger".to_string()),
                    ..Default::default()
                },
            )
            .await?;
        assert_eq!(store.get_crew_member(&dewi.id).await?.map(|m| m.role), Some("Rigger".to_string()));

        assert!(matches!(
            Store::Unconfigured
                .update_client(fallback::CLIENT_SARI, client::ClientUpdate::default())
                .await,
            Err(Error::StoreNotConfigured)
        ));
        Ok(())
    }

    #[tokio::test]
    async fn test_connected_store_round_trip() -> Result<()> {
        let store = Store::Connected(setup_test_db().await?);
        assert!(store.is_configured());
        let created = store
            .create_client(client::NewClient {
                name: "Ana".to_string(),
                ..Default::default()
            })
            .await?;
        let fetched = store.get_client(&created.id).await?.unwrap();
        assert_eq!(fetched.name, "Ana");
        Ok(())
    }
}
