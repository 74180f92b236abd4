//! Reply formatting shared by the booking, client, crew, and invoice commands.
//!
//! Every write ends in a notice naming the operation and its outcome; nothing
//! fails silently.

use crate::{
    core::{
        calendar::{EventDetail, MonthGrid},
        editor::SubmitOutcome,
        store::StoreOutcome,
        views::{BookingRow, format_event_date, payment_badge, status_badge},
    },
    entities::{BookingModel, ChecklistItem},
    errors::{Error, ErrorKind, Result},
};
use poise::serenity_prelude as serenity;
use std::fmt::Write;

/// Parses a `#rrggbb` palette entry into an embed color. Falls back to gray.
#[must_use]
pub fn embed_color(hex: &str) -> u32 {
    u32::from_str_radix(hex.trim_start_matches('#'), 16).unwrap_or(0x006B_7280)
}

/// Notice for a failed operation, marked by the kind of failure.
#[must_use]
pub fn error_notice(error: &Error, operation: &str) -> String {
    let message = error.user_message(operation);
    match error.kind() {
        ErrorKind::Validation => format!("⚠️ {message}. Fix the input and try again."),
        ErrorKind::NotFound => format!("🔍 {message}"),
        ErrorKind::Persistence => format!("❌ {message}"),
        ErrorKind::ExternalService => format!("📡 {message}"),
    }
}

/// One-line notice for a store write.
#[must_use]
pub fn outcome_notice(done: &str, outcome: &StoreOutcome) -> String {
    if outcome.success {
        format!("✅ {done}")
    } else {
        format!(
            "❌ {}",
            outcome.error.as_deref().unwrap_or("The operation failed")
        )
    }
}

/// Notice for a booking editor submit, listing every field error.
pub fn submit_notice(outcome: &SubmitOutcome) -> Result<String> {
    let mut text = String::new();
    match outcome {
        SubmitOutcome::Saved { id, created: true } => write!(text, "✅ Booking created (`{id}`)")?,
        SubmitOutcome::Saved { id, created: false } => write!(text, "✅ Booking saved (`{id}`)")?,
        SubmitOutcome::Invalid { errors } => {
            writeln!(text, "❌ Please fix the following:")?;
            for error in errors {
                writeln!(text, "• **{}**: {}", error.field, error.message)?;
            }
        }
        SubmitOutcome::Failed { message } => write!(text, "❌ {message}")?,
    }
    Ok(text)
}

/// Numbered checklist with check marks, positions starting at 1.
pub fn checklist_text(items: &[ChecklistItem]) -> Result<String> {
    if items.is_empty() {
        return Ok("_None_".to_string());
    }
    let mut text = String::new();
    for (index, item) in items.iter().enumerate() {
        let mark = if item.completed { "☑" } else { "☐" };
        writeln!(text, "{}. {mark} {}", index + 1, item.description)?;
    }
    Ok(text)
}

/// Booking table as a code block.
pub fn rows_text(rows: &[BookingRow]) -> Result<String> {
    let mut text = String::from("```\n");
    for row in rows {
        writeln!(
            text,
            "{:<12} {:<20} {:<24} {}",
            row.event_date,
            truncate(&row.client_name, 20),
            truncate(&row.location, 24),
            row.status.label
        )?;
    }
    text.push_str("```");
    Ok(text)
}

fn truncate(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        value.to_string()
    } else {
        let mut cut: String = value.chars().take(width.saturating_sub(1)).collect();
        cut.push('…');
        cut
    }
}

/// Full booking card.
pub fn booking_embed(booking: &BookingModel, crew_names: &[String]) -> Result<serenity::CreateEmbed> {
    let status = status_badge(&booking.status);
    let payment = payment_badge(&booking.payment_status);
    let crew = if crew_names.is_empty() {
        "_None_".to_string()
    } else {
        crew_names.join(", ")
    };
    let amounts = format!(
        "Total: {}\nPaid: {}",
        booking
            .total_amount
            .map_or_else(|| "-".to_string(), crate::core::invoice::format_idr),
        booking
            .amount_paid
            .map_or_else(|| "-".to_string(), crate::core::invoice::format_idr)
    );

    Ok(serenity::CreateEmbed::default()
        .title(format!("{} - {}", booking.client_name, booking.event_type))
        .description(format!("`{}`", booking.id))
        .color(embed_color(status.color))
        .field("Date", format_event_date(booking.event_date), true)
        .field("Location", booking.location.clone(), true)
        .field("Status", status.label, true)
        .field("Payment", payment.label, true)
        .field("Amounts", amounts, true)
        .field("Crew", crew, false)
        .field("Technical needs", checklist_text(&booking.technical_needs.0)?, false)
        .field("Crew tasks", checklist_text(&booking.crew_tasks.0)?, false))
}

/// Read-only calendar event panel.
#[must_use]
pub fn event_detail_embed(detail: &EventDetail) -> serenity::CreateEmbed {
    serenity::CreateEmbed::default()
        .title(format!("{} - {}", detail.client_name, detail.event_type))
        .color(embed_color(detail.status.color))
        .field("Date", detail.event_date.clone(), true)
        .field("Location", detail.location.clone(), true)
        .field("Status", detail.status.label.clone(), true)
        .field("Payment", detail.payment_status.label.clone(), true)
        .field("Open editor", detail.editor_link.clone(), false)
}

/// Month grid as a text calendar; days with events are listed below it.
pub fn month_text(grid: &MonthGrid) -> Result<String> {
    let mut text = String::from("```\nMon Tue Wed Thu Fri Sat Sun\n");
    for week in &grid.weeks {
        for day in week {
            if !day.in_month {
                text.push_str("    ");
            } else if day.events.is_empty() {
                write!(text, "{:>3} ", chrono::Datelike::day(&day.date))?;
            } else {
                write!(text, "{:>2}* ", chrono::Datelike::day(&day.date))?;
            }
        }
        text.push('\n');
    }
    text.push_str("```\n");

    for day in grid.weeks.iter().flatten().filter(|d| d.in_month) {
        for event in &day.events {
            writeln!(
                text,
                "**{}** {} {} (`{}`)",
                format_event_date(day.date),
                color_dot(event.color),
                event.title,
                event.booking_id
            )?;
        }
    }
    Ok(text)
}

fn color_dot(color: &str) -> &'static str {
    use crate::core::calendar::{COLOR_CANCELLED, COLOR_COMPLETED, COLOR_CONFIRMED, COLOR_ONGOING};
    match color {
        c if c == COLOR_CONFIRMED => "🔵",
        c if c == COLOR_ONGOING => "🟠",
        c if c == COLOR_COMPLETED => "🟢",
        c if c == COLOR_CANCELLED => "🔴",
        _ => "⚪",
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::core::{booking::FieldError, calendar, fallback, views::list_rows};

    #[test]
    fn test_embed_color_parses_palette() {
        assert_eq!(embed_color(calendar::COLOR_CONFIRMED), 0x003B_82F6);
        assert_eq!(embed_color("not a color"), 0x006B_7280);
    }

    #[test]
    fn test_error_notice_follows_kind() {
        let invalid = Error::invalid_field("name", "Client name cannot be empty");
        assert_eq!(
            error_notice(&invalid, "add client"),
            "⚠️ Failed to add client: Validation failed: name: Client name cannot be empty. Fix the input and try again."
        );
        let missing = Error::BookingNotFound { id: "b1".into() };
        assert!(error_notice(&missing, "show booking").starts_with("🔍 Failed to show booking"));
        assert!(error_notice(&Error::StoreNotConfigured, "delete booking").starts_with("❌ "));
    }

    #[test]
    fn test_outcome_notice() {
        let failed = StoreOutcome {
            success: false,
            id: None,
            error: Some("Failed to delete booking: not configured".to_string()),
        };
        assert_eq!(
            outcome_notice("Deleted", &failed),
            "❌ Failed to delete booking: not configured"
        );
    }

    #[test]
    fn test_submit_notice_lists_field_errors() {
        let outcome = SubmitOutcome::Invalid {
            errors: vec![
                FieldError::new("location", "Location must be at least 3 characters"),
                FieldError::new("crew_tasks.0", "Description is required"),
            ],
        };
        let text = submit_notice(&outcome).unwrap();
        assert!(text.contains("**location**"));
        assert!(text.contains("**crew_tasks.0**"));
    }

    #[test]
    fn test_checklist_text_numbers_from_one() {
        let booking = fallback::bookings().remove(0);
        let text = checklist_text(&booking.technical_needs.0).unwrap();
        assert!(text.starts_with("1. ☑ "));
        assert!(text.contains("2. ☐ "));
        assert_eq!(checklist_text(&[]).unwrap(), "_None_");
    }

    #[test]
    fn test_month_text_lists_events() {
        let bookings = fallback::bookings();
        let grid = calendar::month_grid(2024, 12, &calendar::events(&bookings)).unwrap();
        let text = month_text(&grid).unwrap();
        assert!(text.contains("14* "));
        assert!(text.contains("🔵 Sari Wulandari - Wedding"));
        assert!(text.contains("⚪ PT Cahaya Abadi - Corporate gala"));

        let rows = rows_text(&list_rows(&bookings, None)).unwrap();
        assert!(rows.contains("14 Dec 2024"));
    }
}
