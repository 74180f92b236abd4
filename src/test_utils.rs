//! Shared test utilities for the rental desk.
//!
//! This module provides common helper functions for setting up test databases
//! and creating test entities with sensible defaults.

use crate::{
    core::{
        booking::{BookingStatus, PaymentStatus, ValidatedBooking},
        client::{self, NewClient},
        crew::{self, CrewStatus},
        store::Store,
    },
    entities::{self, Checklist, CrewIds},
    errors::Result,
};
use chrono::{NaiveDate, Utc};
use sea_orm::DatabaseConnection;

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Creates a test client with sensible defaults.
///
/// # Defaults
/// * `contact_phone`: `"081234567890"`
/// * everything else optional: None
pub async fn create_test_client(db: &DatabaseConnection, name: &str) -> Result<entities::ClientModel> {
    client::create_client(
        db,
        NewClient {
            name: name.to_string(),
            contact_phone: Some("081234567890".to_string()),
            ..Default::default()
        },
    )
    .await
}

/// Creates a test crew member with role `"Technician"`, available.
pub async fn create_test_crew(db: &DatabaseConnection, name: &str) -> Result<entities::CrewMemberModel> {
    crew::create_crew_member(
        db,
        name.to_string(),
        "Technician".to_string(),
        CrewStatus::Available,
    )
    .await
}

/// Sets up a connected store holding one client.
/// Returns (store, client) for editor and view scenarios.
pub async fn setup_store_with_client(name: &str) -> Result<(Store, entities::ClientModel)> {
    let db = setup_test_db().await?;
    let client = create_test_client(&db, name).await?;
    Ok((Store::Connected(db), client))
}

/// A validated booking with empty checklists and default statuses.
#[must_use]
pub fn validated_booking(client_id: &str, client_name: &str, event_date: NaiveDate) -> ValidatedBooking {
    ValidatedBooking {
        client_id: client_id.to_string(),
        client_name: client_name.to_string(),
        location: "Hotel X".to_string(),
        event_date,
        event_type: "Wedding".to_string(),
        status: BookingStatus::Draft,
        payment_status: PaymentStatus::Unpaid,
        technical_needs: Vec::new(),
        crew_tasks: Vec::new(),
        assigned_crew: Vec::new(),
        total_amount: None,
        amount_paid: None,
    }
}

/// An unsaved booking model with the given id and raw status label.
/// The label is stored as-is, so unrecognized values can be tested.
#[must_use]
pub fn sample_booking_model(id: &str, status: &str) -> entities::BookingModel {
    let now = Utc::now();
    entities::BookingModel {
        id: id.to_string(),
        client_id: "c1".to_string(),
        client_name: "Ana".to_string(),
        location: "Hotel X".to_string(),
        event_date: NaiveDate::from_ymd_opt(2024, 12, 1).unwrap_or_default(),
        event_type: "Wedding".to_string(),
        status: status.to_string(),
        payment_status: PaymentStatus::Unpaid.as_str().to_string(),
        technical_needs: Checklist::default(),
        crew_tasks: Checklist::default(),
        assigned_crew: CrewIds::default(),
        total_amount: None,
        amount_paid: None,
        created_at: now,
        updated_at: now,
    }
}
