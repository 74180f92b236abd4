//! Core business logic - framework-agnostic booking, calendar, and invoice operations.
//!
//! Nothing in here knows about Discord. The bot layer parses arguments, calls
//! these functions, and renders whatever they return.

/// Booking shape, status enums, field validation, and `SeaORM` persistence
pub mod booking;
/// Calendar projection and month grid
pub mod calendar;
/// Checklist row editing and crew selection
pub mod checklist;
/// Client persistence
pub mod client;
/// Crew member persistence and availability
pub mod crew;
/// Booking editor: form state, validation against loaded lists, submit
pub mod editor;
/// Demo data served when no database is configured
pub mod fallback;
/// Invoice rendering and sharing
pub mod invoice;
/// Invoice PDF export
pub mod pdf;
/// Operator session and access gate
pub mod session;
/// Entity store facade over the database or the demo data
pub mod store;
/// Console snapshot, booking list, and delete confirmation
pub mod views;
