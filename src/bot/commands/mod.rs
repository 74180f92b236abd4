//! Discord command implementations organized by category.

#![allow(clippy::too_long_first_doc_paragraph)]

/// Booking editor, list, calendar, and deletion commands
pub mod booking;

/// Client management commands
pub mod client;

/// Crew management commands
pub mod crew;

/// General utility and sign-in commands
pub mod general;

/// Invoice commands
pub mod invoice;

// Export commands
pub use booking::booking;
pub use client::client;
pub use crew::crew;
pub use general::*;
pub use invoice::invoice;
