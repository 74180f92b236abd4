//! Client entity - A customer who books equipment and crew for an event.
//!
//! Bookings refer to clients by id without a foreign key, so removing a client
//! never touches existing bookings.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Client database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "clients")]
pub struct Model {
    /// Generated identifier (UUID v4 string)
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    /// Display name of the client
    pub name: String,
    /// Company the client books for, if any
    pub company: Option<String>,
    /// Contact email address
    pub contact_email: Option<String>,
    /// Contact phone number as entered (used for invoice sharing)
    pub contact_phone: Option<String>,
    /// Free-form notes
    pub notes: Option<String>,
    /// When the client was created
    pub created_at: DateTimeUtc,
}

/// Clients are only weakly referenced by bookings
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
