//! Invoice generation - a read-time projection of a booking and its client.
//!
//! Invoices are never stored. [`render`] is a pure function: the issue date is
//! taken from the booking's creation time and the number from its id, so the
//! same inputs always produce the same document.

use crate::{
    config::business::BusinessConfig,
    core::{booking::PaymentStatus, views::format_event_date},
    entities::{BookingModel, ClientModel},
    errors::{Error, Result},
};
use serde::Serialize;
use std::fmt::Write as _;
use tracing::debug;

/// Width of the fixed-width print layout, in characters.
pub const PRINT_WIDTH: usize = 48;

const WHATSAPP_BASE: &str = "https://wa.me";

/// Who issues the invoice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Issuer {
    pub name: String,
    pub address: String,
    pub phone: String,
    pub email: String,
}

/// Who the invoice is addressed to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BillTo {
    pub name: String,
    pub company: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineItem {
    pub description: String,
    pub quantity: u32,
    pub unit_price: i64,
    pub amount: i64,
}

/// Totals block. `balance_due` may be negative when a booking is overpaid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Totals {
    pub subtotal: i64,
    pub tax: i64,
    pub total: i64,
    pub amount_paid: i64,
    pub balance_due: i64,
}

/// A rendered invoice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InvoiceDocument {
    pub invoice_number: String,
    pub booking_id: String,
    pub issue_date: String,
    pub event_date: String,
    pub event_type: String,
    pub location: String,
    pub payment_status: String,
    pub issuer: Issuer,
    pub bill_to: BillTo,
    pub line_items: Vec<LineItem>,
    pub totals: Totals,
}

/// Invoice number for a booking: the prefix plus the first eight characters
/// of the id, uppercased.
#[must_use]
pub fn invoice_number(prefix: &str, booking_id: &str) -> String {
    let head: String = booking_id.chars().take(8).collect();
    format!("{prefix}{}", head.to_uppercase())
}

/// Builds the invoice for a booking.
#[must_use]
pub fn render(booking: &BookingModel, client: &ClientModel, business: &BusinessConfig) -> InvoiceDocument {
    let total = booking.total_amount.unwrap_or(0);
    let amount_paid = booking.amount_paid.unwrap_or(0);
    let tax = 0;

    let payment_status = PaymentStatus::parse(&booking.payment_status)
        .map_or_else(|| booking.payment_status.clone(), |p| p.to_string());

    InvoiceDocument {
        invoice_number: invoice_number(&business.invoice_prefix, &booking.id),
        booking_id: booking.id.clone(),
        issue_date: format_event_date(booking.created_at.date_naive()),
        event_date: format_event_date(booking.event_date),
        event_type: booking.event_type.clone(),
        location: booking.location.clone(),
        payment_status,
        issuer: Issuer {
            name: business.name.clone(),
            address: business.address.clone(),
            phone: business.phone.clone(),
            email: business.email.clone(),
        },
        bill_to: BillTo {
            name: client.name.clone(),
            company: client.company.clone(),
            email: client.contact_email.clone(),
            phone: client.contact_phone.clone(),
        },
        line_items: vec![LineItem {
            description: format!("Equipment rental for {}", booking.event_type),
            quantity: 1,
            unit_price: total,
            amount: total,
        }],
        totals: Totals {
            subtotal: total,
            tax,
            total: total + tax,
            amount_paid,
            balance_due: total - amount_paid,
        },
    }
}

/// Formats an amount as Indonesian rupiah, e.g. `Rp 3.000.000`.
#[must_use]
pub fn format_idr(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }
    if amount < 0 {
        format!("-Rp {grouped}")
    } else {
        format!("Rp {grouped}")
    }
}

/// Normalizes a phone number to international digits.
///
/// Non-digits are stripped; a leading local trunk `0` is replaced by the
/// country code.
///
/// # Errors
/// Returns [`Error::MissingPhone`] when nothing dialable is left.
pub fn normalize_phone(raw: Option<&str>, country_code: &str, client_name: &str) -> Result<String> {
    let digits: String = raw
        .unwrap_or_default()
        .chars()
        .filter(char::is_ascii_digit)
        .collect();

    let normalized = match digits.strip_prefix('0') {
        Some(rest) if !rest.is_empty() => format!("{country_code}{rest}"),
        Some(_) => String::new(),
        None => digits,
    };

    if normalized.is_empty() {
        return Err(Error::MissingPhone {
            name: client_name.to_string(),
        });
    }
    Ok(normalized)
}

impl InvoiceDocument {
    /// Fixed-width layout for printing or pasting into a chat.
    pub fn print_text(&self) -> Result<String> {
        let rule = "=".repeat(PRINT_WIDTH);
        let thin = "-".repeat(PRINT_WIDTH);
        let mut out = String::new();

        writeln!(out, "{rule}")?;
        writeln!(out, "{}", self.issuer.name)?;
        for line in [&self.issuer.address, &self.issuer.phone, &self.issuer.email] {
            if !line.is_empty() {
                writeln!(out, "{line}")?;
            }
        }
        writeln!(out, "{rule}")?;
        writeln!(out, "{}", pad_pair("INVOICE", &self.invoice_number))?;
        writeln!(out, "{}", pad_pair("Issued", &self.issue_date))?;
        writeln!(out, "{}", pad_pair("Payment", &self.payment_status))?;
        writeln!(out, "{thin}")?;

        writeln!(out, "Bill to:")?;
        writeln!(out, "  {}", self.bill_to.name)?;
        for line in [&self.bill_to.company, &self.bill_to.email, &self.bill_to.phone]
            .into_iter()
            .flatten()
        {
            writeln!(out, "  {line}")?;
        }
        writeln!(out, "Event: {} on {}", self.event_type, self.event_date)?;
        writeln!(out, "Venue: {}", self.location)?;
        writeln!(out, "{thin}")?;

        for item in &self.line_items {
            writeln!(out, "{}", item.description)?;
            writeln!(
                out,
                "{}",
                pad_pair(
                    &format!("  {} x {}", item.quantity, format_idr(item.unit_price)),
                    &format_idr(item.amount)
                )
            )?;
        }
        writeln!(out, "{thin}")?;

        let totals = &self.totals;
        writeln!(out, "{}", pad_pair("Subtotal", &format_idr(totals.subtotal)))?;
        writeln!(out, "{}", pad_pair("Tax", &format_idr(totals.tax)))?;
        writeln!(out, "{}", pad_pair("Total", &format_idr(totals.total)))?;
        writeln!(out, "{}", pad_pair("Paid", &format_idr(totals.amount_paid)))?;
        writeln!(out, "{}", pad_pair("Balance due", &format_idr(totals.balance_due)))?;
        write!(out, "{rule}")?;

        Ok(out)
    }

    /// Pre-filled message for sending the invoice to the client.
    #[must_use]
    pub fn share_message(&self) -> String {
        format!(
            "Hello {}, here is invoice {} for your {} on {}. Total: {}. Balance due: {}. Thank you, {}.",
            self.bill_to.name,
            self.invoice_number,
            self.event_type,
            self.event_date,
            format_idr(self.totals.total),
            format_idr(self.totals.balance_due),
            self.issuer.name
        )
    }

    /// WhatsApp deep link carrying [`Self::share_message`] to the client's phone.
    ///
    /// # Errors
    /// Returns [`Error::MissingPhone`] when the client has no usable number.
    pub fn share_link(&self, country_code: &str) -> Result<String> {
        let phone = normalize_phone(self.bill_to.phone.as_deref(), country_code, &self.bill_to.name)?;
        debug!("Sharing invoice {} to {phone}", self.invoice_number);
        Ok(format!(
            "{WHATSAPP_BASE}/{phone}?text={}",
            urlencoding::encode(&self.share_message())
        ))
    }
}

fn pad_pair(left: &str, right: &str) -> String {
    let used = left.chars().count() + right.chars().count();
    let gap = PRINT_WIDTH.saturating_sub(used).max(1);
    format!("{left}{}{right}", " ".repeat(gap))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::core::fallback;

    fn wedding() -> (BookingModel, ClientModel) {
        let booking = fallback::bookings()
            .into_iter()
            .find(|b| b.id == fallback::BOOKING_WEDDING)
            .unwrap();
        let client = fallback::clients()
            .into_iter()
            .find(|c| c.id == fallback::CLIENT_SARI)
            .unwrap();
        (booking, client)
    }

    #[test]
    fn test_invoice_number_from_id() {
        assert_eq!(
            invoice_number("INV-", "c3a9f2d1-7b4e-4f60-a1b2-c3d4e5f60a33"),
            "INV-C3A9F2D1"
        );
        assert_eq!(invoice_number("INV-", "ab"), "INV-AB");
    }

    #[test]
    fn test_balance_due_and_idr_format() {
        let (booking, client) = wedding();
        let doc = render(&booking, &client, &BusinessConfig::default());

        assert_eq!(doc.totals.subtotal, 5_000_000);
        assert_eq!(doc.totals.tax, 0);
        assert_eq!(doc.totals.total, 5_000_000);
        assert_eq!(doc.totals.balance_due, 3_000_000);
        assert_eq!(format_idr(doc.totals.balance_due), "Rp 3.000.000");
        assert!(doc.print_text().unwrap().contains("Rp 3.000.000"));
        assert_eq!(doc.line_items.len(), 1);
        assert_eq!(doc.line_items[0].description, "Equipment rental for Wedding");
        assert_eq!(doc.payment_status, "Down Payment");
    }

    #[test]
    fn test_overpayment_is_not_clamped() {
        let (mut booking, client) = wedding();
        booking.total_amount = Some(1_000_000);
        booking.amount_paid = Some(1_500_000);
        let doc = render(&booking, &client, &BusinessConfig::default());
        assert_eq!(doc.totals.balance_due, -500_000);
        assert_eq!(format_idr(doc.totals.balance_due), "-Rp 500.000");
    }

    #[test]
    fn test_missing_amounts_count_as_zero() {
        let (mut booking, client) = wedding();
        booking.total_amount = None;
        booking.amount_paid = None;
        let doc = render(&booking, &client, &BusinessConfig::default());
        assert_eq!(doc.totals.total, 0);
        assert_eq!(doc.totals.balance_due, 0);
    }

    #[test]
    fn test_render_is_deterministic() {
        let (booking, client) = wedding();
        let business = BusinessConfig::default();
        let first = render(&booking, &client, &business);
        let second = render(&booking, &client, &business);
        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
        assert_eq!(first.print_text().unwrap(), second.print_text().unwrap());
    }

    #[test]
    fn test_format_idr_grouping() {
        assert_eq!(format_idr(0), "Rp 0");
        assert_eq!(format_idr(999), "Rp 999");
        assert_eq!(format_idr(1_000), "Rp 1.000");
        assert_eq!(format_idr(12_500_000), "Rp 12.500.000");
    }

    #[test]
    fn test_normalize_phone() {
        assert_eq!(normalize_phone(Some("081234567890"), "62", "Sari").unwrap(), "6281234567890");
        assert_eq!(normalize_phone(Some("+62 812-3456-7890"), "62", "Sari").unwrap(), "6281234567890");
        assert!(matches!(
            normalize_phone(None, "62", "Sari"),
            Err(Error::MissingPhone { .. })
        ));
        assert!(normalize_phone(Some("  - "), "62", "Sari").is_err());
        assert!(normalize_phone(Some("0"), "62", "Sari").is_err());
    }

    #[test]
    fn test_share_link_uses_normalized_phone() {
        let (booking, client) = wedding();
        let doc = render(&booking, &client, &BusinessConfig::default());
        let link = doc.share_link("62").unwrap();
        assert!(link.starts_with("https://wa.me/6281234567890?text="));
        assert!(link.contains("INV-C3A9F2D1"));
        assert!(!link.contains(' '));
    }

    #[test]
    fn test_share_without_phone_fails() {
        let (booking, mut client) = wedding();
        client.contact_phone = None;
        let doc = render(&booking, &client, &BusinessConfig::default());
        let err = doc.share_link("62").unwrap_err();
        assert!(err.to_string().contains("Sari Wulandari"));
    }
}
