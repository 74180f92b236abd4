//! `RentalDesk` - An operator console for an event-equipment rental business
//!
//! This crate manages clients, crew, and bookings for equipment rentals, shows
//! them as a list and a calendar, and produces invoices that can be printed,
//! exported as PDF, or shared over WhatsApp. The console is delivered as a
//! Discord bot; all business logic lives in [`core`].

#![deny(unsafe_code, unused_must_use, rustdoc::broken_intra_doc_links)]
#![warn(
    missing_docs,
    clippy::all,
    clippy::pedantic,
    clippy::expect_used,
    clippy::unwrap_used,
    clippy::dbg_macro,
    clippy::todo,
    rust_2018_idioms
)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]

/// Discord bot interface - commands, handlers, and bot context
pub mod bot;
/// Configuration management for database and application settings
pub mod config;
/// Core business logic - framework-agnostic booking, calendar, and invoice operations
pub mod core;
/// SeaORM entity definitions for database tables
pub mod entities;
/// Unified error types and result handling
pub mod errors;

#[cfg(test)]
pub mod test_utils;
