//! Booking views - the console snapshot, the booking list, and deletion.
//!
//! Every view reads the same [`ConsoleSnapshot`], loaded once per page. Views
//! never poll; after any write the caller loads a fresh snapshot.

use crate::{
    core::{
        booking::{BookingFilter, BookingStatus, PaymentStatus},
        calendar::status_color,
        store::{Store, StoreOutcome},
    },
    entities::{BookingModel, ClientModel, CrewMemberModel},
    errors::{Error, Result},
};
use chrono::NaiveDate;
use serde::Serialize;
use tracing::{debug, instrument};

/// Everything the console pages render from.
#[derive(Debug, Clone, Default)]
pub struct ConsoleSnapshot {
    pub clients: Vec<ClientModel>,
    pub crew: Vec<CrewMemberModel>,
    pub bookings: Vec<BookingModel>,
}

/// Loads clients, crew, and bookings concurrently.
#[instrument(skip(store))]
pub async fn load_console(store: &Store) -> Result<ConsoleSnapshot> {
    let no_filter = BookingFilter::default();
    let (clients, crew, bookings) = tokio::try_join!(
        store.list_clients(),
        store.list_crew(),
        store.list_bookings(&no_filter)
    )?;
    debug!(
        "Loaded {} clients, {} crew, {} bookings",
        clients.len(),
        crew.len(),
        bookings.len()
    );
    Ok(ConsoleSnapshot {
        clients,
        crew,
        bookings,
    })
}

impl ConsoleSnapshot {
    /// Finds a booking in the snapshot.
    ///
    /// # Errors
    /// Returns [`Error::BookingNotFound`] when it is not there.
    pub fn booking(&self, booking_id: &str) -> Result<&BookingModel> {
        self.bookings
            .iter()
            .find(|b| b.id == booking_id)
            .ok_or_else(|| Error::BookingNotFound {
                id: booking_id.to_string(),
            })
    }

    /// Finds a client in the snapshot.
    #[must_use]
    pub fn client(&self, client_id: &str) -> Option<&ClientModel> {
        self.clients.iter().find(|c| c.id == client_id)
    }

    /// Names of the crew assigned to a booking. Ids with no matching member
    /// are shown by a short id prefix.
    #[must_use]
    pub fn crew_names(&self, booking: &BookingModel) -> Vec<String> {
        booking
            .assigned_crew
            .0
            .iter()
            .map(|id| {
                self.crew.iter().find(|m| &m.id == id).map_or_else(
                    || format!("Unknown ({})", id.chars().take(8).collect::<String>()),
                    |m| m.name.clone(),
                )
            })
            .collect()
    }
}

/// Colored label for a status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusBadge {
    pub label: String,
    pub color: &'static str,
}

/// Badge for a stored booking status; unknown labels keep their text and turn gray.
#[must_use]
pub fn status_badge(label: &str) -> StatusBadge {
    StatusBadge {
        label: BookingStatus::parse(label).map_or_else(|| label.to_string(), |s| s.to_string()),
        color: status_color(label),
    }
}

/// Badge for a stored payment status.
#[must_use]
pub fn payment_badge(label: &str) -> StatusBadge {
    let parsed = PaymentStatus::parse(label);
    StatusBadge {
        label: parsed.map_or_else(|| label.to_string(), |s| s.to_string()),
        color: match parsed {
            Some(PaymentStatus::Unpaid) => "#ef4444",
            Some(PaymentStatus::DownPayment) => "#f97316",
            Some(PaymentStatus::Paid) => "#22c55e",
            Some(PaymentStatus::Refunded) | None => "#6b7280",
        },
    }
}

/// Localized event date, e.g. `01 Dec 2024`.
#[must_use]
pub fn format_event_date(date: NaiveDate) -> String {
    date.format("%d %b %Y").to_string()
}

/// One row of the booking table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookingRow {
    pub booking_id: String,
    pub client_name: String,
    pub location: String,
    pub event_date: String,
    pub status: StatusBadge,
}

/// Table rows for the booking list, optionally narrowed to one status.
#[must_use]
pub fn list_rows(bookings: &[BookingModel], status: Option<BookingStatus>) -> Vec<BookingRow> {
    let filter = BookingFilter {
        status,
        ..Default::default()
    };
    bookings
        .iter()
        .filter(|b| filter.matches(b))
        .map(|b| BookingRow {
            booking_id: b.id.clone(),
            client_name: b.client_name.clone(),
            location: b.location.clone(),
            event_date: format_event_date(b.event_date),
            status: status_badge(&b.status),
        })
        .collect()
}

/// A pending, not yet confirmed deletion.
///
/// Deleting is irreversible, so the list view first builds this request and
/// shows `prompt()`; only [`DeleteRequest::confirm`] issues the delete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteRequest {
    booking_id: String,
    prompt: String,
}

impl DeleteRequest {
    /// Starts deleting a booking from the snapshot.
    ///
    /// # Errors
    /// Returns [`Error::BookingNotFound`] for an unknown id.
    pub fn new(snapshot: &ConsoleSnapshot, booking_id: &str) -> Result<Self> {
        let booking = snapshot.booking(booking_id)?;
        Ok(Self {
            booking_id: booking.id.clone(),
            prompt: format!(
                "Delete the {} booking for {} on {}? This cannot be undone.",
                booking.event_type,
                booking.client_name,
                format_event_date(booking.event_date)
            ),
        })
    }

    /// Id of the booking that would be deleted.
    #[must_use]
    pub fn booking_id(&self) -> &str {
        &self.booking_id
    }

    /// Confirmation question for the operator.
    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// Performs the delete.
    pub async fn confirm(self, store: &Store) -> StoreOutcome {
        let result = store
            .delete_booking(&self.booking_id)
            .await
            .map(|()| self.booking_id.clone());
        StoreOutcome::from_result("delete booking", result)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::core::{
        booking::BookingInput,
        calendar::{self, COLOR_DRAFT},
        editor::{SubmitOutcome, submit},
        fallback,
    };
    use crate::test_utils::*;

    #[tokio::test]
    async fn test_load_console_from_fallback() -> Result<()> {
        let snapshot = load_console(&Store::Unconfigured).await?;
        assert_eq!(snapshot.clients.len(), 2);
        assert_eq!(snapshot.crew.len(), 3);
        assert_eq!(snapshot.bookings.len(), 2);

        let wedding = snapshot.booking(fallback::BOOKING_WEDDING)?;
        assert_eq!(snapshot.crew_names(wedding), vec!["Adi Nugroho", "Rina Pratiwi"]);
        assert!(snapshot.booking("missing").is_err());
        Ok(())
    }

    #[test]
    fn test_list_rows_and_status_filter() {
        let bookings = fallback::bookings();
        let rows = list_rows(&bookings, None);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].client_name, "Sari Wulandari");
        assert_eq!(rows[0].event_date, "14 Dec 2024");
        assert_eq!(rows[0].status.label, "Confirmed");

        let drafts = list_rows(&bookings, Some(BookingStatus::Draft));
        assert_eq!(drafts.len(), 1);
        assert_eq!(drafts[0].booking_id, fallback::BOOKING_GALA);
    }

    #[test]
    fn test_unknown_status_badge_keeps_label() {
        let badge = status_badge("Postponed");
        assert_eq!(badge.label, "Postponed");
        assert_eq!(badge.color, COLOR_DRAFT);
        assert_eq!(payment_badge("DownPayment").label, "Down Payment");
    }

    #[tokio::test]
    async fn test_create_shows_one_row_and_one_gray_event() -> Result<()> {
        let (store, client) = setup_store_with_client("C1 Client").await?;
        let input = BookingInput {
            client_id: client.id.clone(),
            location: "Hotel X".to_string(),
            event_date: NaiveDate::from_ymd_opt(2024, 12, 1),
            event_type: "Wedding".to_string(),
            ..Default::default()
        };
        assert!(submit(&store, &input, None).await.is_success());

        let snapshot = load_console(&store).await?;
        let rows = list_rows(&snapshot.bookings, None);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].status.label, "Draft");

        let events = calendar::events(&snapshot.bookings);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].date, NaiveDate::from_ymd_opt(2024, 12, 1).unwrap());
        assert_eq!(events[0].color, COLOR_DRAFT);
        assert!(events[0].all_day);
        Ok(())
    }

    #[tokio::test]
    async fn test_deleting_client_keeps_booking_and_name() -> Result<()> {
        let (store, client) = setup_store_with_client("Ana Lestari").await?;
        let input = BookingInput {
            client_id: client.id.clone(),
            location: "Hotel X".to_string(),
            event_date: NaiveDate::from_ymd_opt(2024, 12, 1),
            event_type: "Wedding".to_string(),
            ..Default::default()
        };
        let SubmitOutcome::Saved { id, .. } = submit(&store, &input, None).await else {
            panic!("create failed");
        };

        store.delete_client(&client.id).await?;

        let snapshot = load_console(&store).await?;
        assert!(snapshot.clients.is_empty());
        let booking = snapshot.booking(&id)?;
        assert_eq!(booking.client_name, "Ana Lestari");
        Ok(())
    }

    #[tokio::test]
    async fn test_delete_requires_confirmation_step() -> Result<()> {
        let (store, client) = setup_store_with_client("Ana").await?;
        let input = BookingInput {
            client_id: client.id.clone(),
            location: "Hotel X".to_string(),
            event_date: NaiveDate::from_ymd_opt(2024, 12, 1),
            event_type: "Wedding".to_string(),
            ..Default::default()
        };
        let SubmitOutcome::Saved { id, .. } = submit(&store, &input, None).await else {
            panic!("create failed");
        };

        let snapshot = load_console(&store).await?;
        let request = DeleteRequest::new(&snapshot, &id)?;
        assert!(request.prompt().contains("01 Dec 2024"));
        // Building the request alone deletes nothing.
        assert_eq!(load_console(&store).await?.bookings.len(), 1);

        let outcome = request.confirm(&store).await;
        assert!(outcome.success);
        assert!(load_console(&store).await?.bookings.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_delete_without_store_reports_failure() -> Result<()> {
        let snapshot = load_console(&Store::Unconfigured).await?;
        let request = DeleteRequest::new(&snapshot, fallback::BOOKING_GALA)?;
        assert_eq!(request.booking_id(), fallback::BOOKING_GALA);
        let outcome = request.confirm(&Store::Unconfigured).await;
        assert!(!outcome.success);
        assert!(outcome.error.unwrap().contains("not configured"));
        Ok(())
    }
}
