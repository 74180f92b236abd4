//! Crew member entity - Staff that can be assigned to bookings.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Crew member database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "crew_members")]
pub struct Model {
    /// Generated identifier (UUID v4 string)
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    /// Full name
    pub name: String,
    /// Free-text role (e.g., "Sound engineer")
    pub role: String,
    /// Availability: `"Available"`, `"OnDuty"` or `"OnLeave"`
    pub status: String,
    /// When the crew member was created
    pub created_at: DateTimeUtc,
}

/// Crew members are only weakly referenced by bookings
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
