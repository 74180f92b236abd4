//! Booking aggregate - shape, field validation, and persistence of bookings.
//!
//! A booking bundles a client reference, an event (date, location, type), two
//! checklists, a set of assigned crew, two independent status labels, and the
//! agreed amounts. Validation here is field-level only and shared by the editor
//! and the store; cross-booking checks such as crew double-booking are not made.
//! Every save replaces the whole row, checklists and crew set included.

use crate::{
    entities::{Booking, ChecklistItem, Checklist, CrewIds, booking},
    errors::{Error, Result},
};
use chrono::{Datelike, NaiveDate};
use sea_orm::{QueryOrder, Set, prelude::*};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::{debug, info};

/// Minimum length of `event_type`, in characters.
pub const MIN_EVENT_TYPE_LEN: usize = 2;
/// Minimum length of `location`, in characters.
pub const MIN_LOCATION_LEN: usize = 3;

/// Lifecycle label of a booking. Any value may be replaced by any other.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BookingStatus {
    #[default]
    Draft,
    Confirmed,
    Ongoing,
    Completed,
    Cancelled,
}

impl BookingStatus {
    /// All statuses in lifecycle order.
    pub const ALL: [Self; 5] = [
        Self::Draft,
        Self::Confirmed,
        Self::Ongoing,
        Self::Completed,
        Self::Cancelled,
    ];

    /// Stored label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "Draft",
            Self::Confirmed => "Confirmed",
            Self::Ongoing => "Ongoing",
            Self::Completed => "Completed",
            Self::Cancelled => "Cancelled",
        }
    }

    /// Parses a stored label, returning `None` for anything unrecognized.
    #[must_use]
    pub fn parse(label: &str) -> Option<Self> {
        let key = normalize_label(label);
        Self::ALL
            .into_iter()
            .find(|status| normalize_label(status.as_str()) == key)
    }
}

/// Payment label of a booking, independent of [`BookingStatus`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentStatus {
    #[default]
    Unpaid,
    DownPayment,
    Paid,
    Refunded,
}

impl PaymentStatus {
    /// All payment statuses.
    pub const ALL: [Self; 4] = [Self::Unpaid, Self::DownPayment, Self::Paid, Self::Refunded];

    /// Stored label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Unpaid => "Unpaid",
            Self::DownPayment => "DownPayment",
            Self::Paid => "Paid",
            Self::Refunded => "Refunded",
        }
    }

    /// Human label for badges.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::DownPayment => "Down Payment",
            other => other.as_str(),
        }
    }

    /// Parses a stored label, returning `None` for anything unrecognized.
    #[must_use]
    pub fn parse(label: &str) -> Option<Self> {
        let key = normalize_label(label);
        Self::ALL
            .into_iter()
            .find(|status| normalize_label(status.as_str()) == key)
    }
}

fn normalize_label(label: &str) -> String {
    label
        .chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for BookingStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s).ok_or_else(|| Error::Config {
            message: format!("Unknown booking status '{s}'"),
        })
    }
}

impl FromStr for PaymentStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s).ok_or_else(|| Error::Config {
            message: format!("Unknown payment status '{s}'"),
        })
    }
}

/// A single field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    /// Field path, e.g. `location` or `technical_needs.2`
    pub field: String,
    /// What is wrong with it
    pub message: String,
}

impl FieldError {
    /// Creates a new field error.
    #[must_use]
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Everything an operator supplies when creating or saving a booking.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookingInput {
    pub client_id: String,
    pub location: String,
    pub event_date: Option<NaiveDate>,
    pub event_type: String,
    pub status: BookingStatus,
    pub payment_status: PaymentStatus,
    pub technical_needs: Vec<ChecklistItem>,
    pub crew_tasks: Vec<ChecklistItem>,
    pub assigned_crew: Vec<String>,
    pub total_amount: Option<i64>,
    pub amount_paid: Option<i64>,
}

impl BookingInput {
    /// Rebuilds the input that would reproduce `model` when saved.
    ///
    /// An unrecognized stored label reads as the default status; saving that
    /// default back keeps the stored label (see [`replace_booking`]).
    #[must_use]
    pub fn from_model(model: &booking::Model) -> Self {
        Self {
            client_id: model.client_id.clone(),
            location: model.location.clone(),
            event_date: Some(model.event_date),
            event_type: model.event_type.clone(),
            status: BookingStatus::parse(&model.status).unwrap_or_default(),
            payment_status: PaymentStatus::parse(&model.payment_status).unwrap_or_default(),
            technical_needs: model.technical_needs.0.clone(),
            crew_tasks: model.crew_tasks.0.clone(),
            assigned_crew: model.assigned_crew.0.clone(),
            total_amount: model.total_amount,
            amount_paid: model.amount_paid,
        }
    }
}

/// Input that passed validation, with the client name captured for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedBooking {
    pub client_id: String,
    pub client_name: String,
    pub location: String,
    pub event_date: NaiveDate,
    pub event_type: String,
    pub status: BookingStatus,
    pub payment_status: PaymentStatus,
    pub technical_needs: Vec<ChecklistItem>,
    pub crew_tasks: Vec<ChecklistItem>,
    pub assigned_crew: Vec<String>,
    pub total_amount: Option<i64>,
    pub amount_paid: Option<i64>,
}

/// Checks a single checklist description.
#[must_use]
pub fn check_item_description(description: &str) -> Option<&'static str> {
    description
        .trim()
        .is_empty()
        .then_some("Description cannot be empty")
}

/// Field-level validation shared by the editor and the store.
///
/// Returns every problem found, in field order. Reference checks against the
/// client and crew lists are done by the editor.
#[must_use]
pub fn validate_fields(input: &BookingInput) -> Vec<FieldError> {
    let mut errors = Vec::new();

    if input.client_id.trim().is_empty() {
        errors.push(FieldError::new("client_id", "Client is required"));
    }
    if input.location.trim().chars().count() < MIN_LOCATION_LEN {
        errors.push(FieldError::new(
            "location",
            format!("Location must be at least {MIN_LOCATION_LEN} characters"),
        ));
    }
    if input.event_date.is_none() {
        errors.push(FieldError::new("event_date", "Event date is required"));
    }
    if input.event_type.trim().chars().count() < MIN_EVENT_TYPE_LEN {
        errors.push(FieldError::new(
            "event_type",
            format!("Event type must be at least {MIN_EVENT_TYPE_LEN} characters"),
        ));
    }

    for (list, items) in [
        ("technical_needs", &input.technical_needs),
        ("crew_tasks", &input.crew_tasks),
    ] {
        for (index, item) in items.iter().enumerate() {
            if let Some(message) = check_item_description(&item.description) {
                errors.push(FieldError::new(format!("{list}.{index}"), message));
            }
        }
    }

    for (field, amount) in [
        ("total_amount", input.total_amount),
        ("amount_paid", input.amount_paid),
    ] {
        if amount.is_some_and(|value| value < 0) {
            errors.push(FieldError::new(field, "Amount cannot be negative"));
        }
    }

    errors
}

/// Optional narrowing of the booking list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookingFilter {
    pub status: Option<BookingStatus>,
    pub payment_status: Option<PaymentStatus>,
    pub client_id: Option<String>,
    /// `(year, month)` of the event date
    pub month: Option<(i32, u32)>,
}

impl BookingFilter {
    /// Whether `model` passes this filter. Used for in-memory data sets.
    #[must_use]
    pub fn matches(&self, model: &booking::Model) -> bool {
        self.status
            .is_none_or(|status| BookingStatus::parse(&model.status) == Some(status))
            && self
                .payment_status
                .is_none_or(|status| PaymentStatus::parse(&model.payment_status) == Some(status))
            && self
                .client_id
                .as_ref()
                .is_none_or(|client_id| &model.client_id == client_id)
            && self.month.is_none_or(|(year, month)| {
                model.event_date.year() == year && model.event_date.month() == month
            })
    }
}

fn month_bounds(year: i32, month: u32) -> Option<(NaiveDate, NaiveDate)> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    Some((first, next))
}

/// Lists bookings in insertion order, narrowed by `filter`.
pub async fn list_bookings(
    db: &DatabaseConnection,
    filter: &BookingFilter,
) -> Result<Vec<booking::Model>> {
    let mut query = Booking::find();

    if let Some(status) = filter.status {
        query = query.filter(booking::Column::Status.eq(status.as_str()));
    }
    if let Some(payment_status) = filter.payment_status {
        query = query.filter(booking::Column::PaymentStatus.eq(payment_status.as_str()));
    }
    if let Some(client_id) = &filter.client_id {
        query = query.filter(booking::Column::ClientId.eq(client_id.as_str()));
    }
    if let Some((year, month)) = filter.month {
        let (first, next) = month_bounds(year, month).ok_or_else(|| Error::Config {
            message: format!("Invalid month {year}-{month}"),
        })?;
        query = query
            .filter(booking::Column::EventDate.gte(first))
            .filter(booking::Column::EventDate.lt(next));
    }

    let bookings = query
        .order_by_asc(booking::Column::CreatedAt)
        .order_by_asc(booking::Column::Id)
        .all(db)
        .await?;
    debug!("Fetched {} bookings", bookings.len());
    Ok(bookings)
}

/// Finds a booking by id.
pub async fn get_booking_by_id(
    db: &DatabaseConnection,
    booking_id: &str,
) -> Result<Option<booking::Model>> {
    Booking::find_by_id(booking_id.to_string())
        .one(db)
        .await
        .map_err(Into::into)
}

/// Inserts a new booking with a generated id.
pub async fn insert_booking(
    db: &DatabaseConnection,
    booking: ValidatedBooking,
) -> Result<booking::Model> {
    let now = chrono::Utc::now();
    let id = uuid::Uuid::new_v4().to_string();

    let model = booking::ActiveModel {
        id: Set(id),
        client_id: Set(booking.client_id),
        client_name: Set(booking.client_name),
        location: Set(booking.location),
        event_date: Set(booking.event_date),
        event_type: Set(booking.event_type),
        status: Set(booking.status.as_str().to_string()),
        payment_status: Set(booking.payment_status.as_str().to_string()),
        technical_needs: Set(Checklist(booking.technical_needs)),
        crew_tasks: Set(Checklist(booking.crew_tasks)),
        assigned_crew: Set(CrewIds(booking.assigned_crew)),
        total_amount: Set(booking.total_amount),
        amount_paid: Set(booking.amount_paid),
        created_at: Set(now),
        updated_at: Set(now),
    };

    let inserted = model.insert(db).await?;
    info!("Created booking {} for {}", inserted.id, inserted.client_name);
    Ok(inserted)
}

/// Label to write for a status: the stored label survives when it is not one
/// we recognize and the save carries only the default it was read as.
fn label_to_write(stored: &str, recognized: bool, chosen: &'static str, chosen_is_default: bool) -> String {
    if !recognized && chosen_is_default {
        stored.to_string()
    } else {
        chosen.to_string()
    }
}

/// Replaces every editable field of an existing booking.
///
/// There is no version check: the last save wins.
pub async fn replace_booking(
    db: &DatabaseConnection,
    booking_id: &str,
    booking: ValidatedBooking,
) -> Result<booking::Model> {
    let existing = Booking::find_by_id(booking_id.to_string())
        .one(db)
        .await?
        .ok_or_else(|| Error::BookingNotFound {
            id: booking_id.to_string(),
        })?;
    let status = label_to_write(
        &existing.status,
        BookingStatus::parse(&existing.status).is_some(),
        booking.status.as_str(),
        booking.status == BookingStatus::default(),
    );
    let payment_status = label_to_write(
        &existing.payment_status,
        PaymentStatus::parse(&existing.payment_status).is_some(),
        booking.payment_status.as_str(),
        booking.payment_status == PaymentStatus::default(),
    );
    let mut model: booking::ActiveModel = existing.into();

    model.client_id = Set(booking.client_id);
    model.client_name = Set(booking.client_name);
    model.location = Set(booking.location);
    model.event_date = Set(booking.event_date);
    model.event_type = Set(booking.event_type);
    model.status = Set(status);
    model.payment_status = Set(payment_status);
    model.technical_needs = Set(Checklist(booking.technical_needs));
    model.crew_tasks = Set(Checklist(booking.crew_tasks));
    model.assigned_crew = Set(CrewIds(booking.assigned_crew));
    model.total_amount = Set(booking.total_amount);
    model.amount_paid = Set(booking.amount_paid);
    model.updated_at = Set(chrono::Utc::now());

    let updated = model.update(db).await?;
    info!("Saved booking {}", updated.id);
    Ok(updated)
}

/// Permanently deletes a booking.
pub async fn delete_booking(db: &DatabaseConnection, booking_id: &str) -> Result<()> {
    let result = Booking::delete_by_id(booking_id.to_string())
        .exec(db)
        .await?;
    if result.rows_affected == 0 {
        return Err(Error::BookingNotFound {
            id: booking_id.to_string(),
        });
    }
    info!("Deleted booking {booking_id}");
    Ok(())
}
