//! Entity module - Contains all SeaORM entity definitions for the database.
//! Each entity has a Model struct for data and an Entity struct for operations.
//! None of the tables declare foreign keys; bookings reference clients and crew weakly.

pub mod booking;
pub mod client;
pub mod crew_member;

// Re-export specific types to avoid conflicts
pub use booking::{
    Checklist, ChecklistItem, Column as BookingColumn, CrewIds, Entity as Booking,
    Model as BookingModel,
};
pub use client::{Column as ClientColumn, Entity as Client, Model as ClientModel};
pub use crew_member::{
    Column as CrewMemberColumn, Entity as CrewMember, Model as CrewMemberModel,
};
