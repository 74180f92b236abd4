//! Booking entity - A reservation of equipment and crew for a client's event.
//!
//! Checklists and the assigned crew set are stored as JSON columns and always
//! written whole. `status` and `payment_status` are stored as text so rows
//! written by other tools with unknown values can still be read.

use sea_orm::FromJsonQueryResult;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// One line of a technical-needs or crew-task checklist.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistItem {
    /// What needs to be done or brought
    pub description: String,
    /// Whether the item has been ticked off
    pub completed: bool,
}

impl ChecklistItem {
    /// Creates an open (not completed) item.
    #[must_use]
    pub fn open(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            completed: false,
        }
    }
}

/// Ordered checklist; insertion order is the display order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult)]
pub struct Checklist(pub Vec<ChecklistItem>);

/// Ids of the crew members assigned to a booking, without duplicates.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult)]
pub struct CrewIds(pub Vec<String>);

/// Booking database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "bookings")]
pub struct Model {
    /// Generated identifier (UUID v4 string); the invoice number derives from it
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    /// Id of the client at creation time
    pub client_id: String,
    /// Client name captured when the booking was last saved
    pub client_name: String,
    /// Venue or address of the event
    pub location: String,
    /// Calendar day of the event
    pub event_date: Date,
    /// Free-text type of event (e.g., "Wedding")
    pub event_type: String,
    /// Lifecycle label, see `core::booking::BookingStatus`
    pub status: String,
    /// Payment label, see `core::booking::PaymentStatus`
    pub payment_status: String,
    /// Equipment and technical requirements
    pub technical_needs: Checklist,
    /// Work items for the crew
    pub crew_tasks: Checklist,
    /// Assigned crew member ids
    pub assigned_crew: CrewIds,
    /// Agreed total in whole currency units
    pub total_amount: Option<i64>,
    /// Amount received so far in whole currency units
    pub amount_paid: Option<i64>,
    /// When the booking was created; also the invoice issue date
    pub created_at: DateTimeUtc,
    /// When the booking was last saved
    pub updated_at: DateTimeUtc,
}

/// Bookings keep weak references only
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
