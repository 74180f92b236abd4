//! Autocomplete handlers for Discord slash command parameters.
//!
//! Bookings, clients, and crew are addressed by id. These handlers show the
//! operator a readable label while submitting the id as the value.

use crate::{
    bot::BotData,
    core::{booking::BookingFilter, views::format_event_date},
    errors::Error,
};
use poise::serenity_prelude as serenity;

/// Discord autocomplete limit
const MAX_CHOICES: usize = 25;

fn matches_partial(label: &str, id: &str, partial: &str) -> bool {
    let partial = partial.to_lowercase();
    label.to_lowercase().contains(&partial) || id.starts_with(&partial)
}

/// Suggests bookings as "client - event type (date)".
pub async fn autocomplete_booking(
    ctx: poise::Context<'_, BotData, Error>,
    partial: &str,
) -> Vec<serenity::AutocompleteChoice> {
    let Ok(bookings) = ctx.data().store.list_bookings(&BookingFilter::default()).await else {
        return Vec::new();
    };

    bookings
        .into_iter()
        .map(|b| {
            let label = format!(
                "{} - {} ({})",
                b.client_name,
                b.event_type,
                format_event_date(b.event_date)
            );
            (label, b.id)
        })
        .filter(|(label, id)| matches_partial(label, id, partial))
        .take(MAX_CHOICES)
        .map(|(label, id)| serenity::AutocompleteChoice::new(label, id))
        .collect()
}

/// Suggests clients by name.
pub async fn autocomplete_client(
    ctx: poise::Context<'_, BotData, Error>,
    partial: &str,
) -> Vec<serenity::AutocompleteChoice> {
    let Ok(clients) = ctx.data().store.list_clients().await else {
        return Vec::new();
    };

    clients
        .into_iter()
        .filter(|c| matches_partial(&c.name, &c.id, partial))
        .take(MAX_CHOICES)
        .map(|c| serenity::AutocompleteChoice::new(c.name, c.id))
        .collect()
}

/// Suggests crew members as "name (role)".
pub async fn autocomplete_crew(
    ctx: poise::Context<'_, BotData, Error>,
    partial: &str,
) -> Vec<serenity::AutocompleteChoice> {
    let Ok(crew) = ctx.data().store.list_crew().await else {
        return Vec::new();
    };

    crew.into_iter()
        .map(|m| (format!("{} ({})", m.name, m.role), m.id))
        .filter(|(label, id)| matches_partial(label, id, partial))
        .take(MAX_CHOICES)
        .map(|(label, id)| serenity::AutocompleteChoice::new(label, id))
        .collect()
}
