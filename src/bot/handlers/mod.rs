//! Discord interaction handlers
//!
//! This module provides handlers for Discord interactions such as autocomplete,
//! the operator session check, and the replies shared by several commands.

/// Autocomplete handlers for booking, client, and crew ids
pub mod autocomplete;
/// Session gate run before protected commands
pub mod checks;
/// Reply formatting shared across commands
pub mod notices;
