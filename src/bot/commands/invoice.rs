//! Invoice Discord commands - print, PDF export, and WhatsApp sharing.
//!
//! Invoices are rendered on demand from the booking and its client; none of
//! these commands write anything.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{
            BotData,
            handlers::{autocomplete, checks::require_session, notices},
        },
        core::{
            invoice::{self, InvoiceDocument},
            pdf,
        },
        errors::{Error, Result},
    };
    use poise::serenity_prelude as serenity;

    type Context<'a> = poise::Context<'a, BotData, Error>;

    /// Renders the invoice for a booking.
    ///
    /// # Errors
    /// Returns a not-found error when the booking or its client is missing.
    async fn load_invoice(ctx: Context<'_>, booking_id: &str) -> Result<InvoiceDocument> {
        let store = &ctx.data().store;
        let booking = store
            .get_booking(booking_id)
            .await?
            .ok_or_else(|| Error::BookingNotFound {
                id: booking_id.to_string(),
            })?;
        let client = store
            .get_client(&booking.client_id)
            .await?
            .ok_or_else(|| Error::ClientNotFound {
                id: booking.client_id.clone(),
            })?;
        Ok(invoice::render(&booking, &client, &ctx.data().config.business))
    }

    /// Parent command for invoices.
    #[poise::command(
        slash_command,
        subcommands("invoice_show", "invoice_pdf", "invoice_share"),
        check = "require_session"
    )]
    pub async fn invoice(ctx: Context<'_>) -> Result<()> {
        let help_text = "Invoice command. Available subcommands:\n\
            `/invoice show` - Print layout of the invoice\n\
            `/invoice pdf` - Invoice as a PDF file\n\
            `/invoice share` - WhatsApp link with the invoice summary";

        ctx.say(help_text).await?;
        Ok(())
    }

    /// Shows the print layout of a booking's invoice.
    #[poise::command(slash_command, rename = "show", check = "require_session")]
    pub async fn invoice_show(
        ctx: Context<'_>,
        #[description = "Booking"]
        #[autocomplete = "autocomplete::autocomplete_booking"]
        booking: String,
    ) -> Result<()> {
        let document = load_invoice(ctx, &booking).await?;
        ctx.say(format!("```\n{}\n```", document.print_text()?)).await?;
        Ok(())
    }

    /// Sends a booking's invoice as a PDF attachment.
    #[poise::command(slash_command, rename = "pdf", check = "require_session")]
    pub async fn invoice_pdf(
        ctx: Context<'_>,
        #[description = "Booking"]
        #[autocomplete = "autocomplete::autocomplete_booking"]
        booking: String,
    ) -> Result<()> {
        ctx.defer().await?;
        let document = load_invoice(ctx, &booking).await?;
        let bytes = pdf::export_pdf(&document)?;
        let filename = format!("{}.pdf", document.invoice_number);

        ctx.send(
            poise::CreateReply::default()
                .content(format!("🧾 Invoice **{}**", document.invoice_number))
                .attachment(serenity::CreateAttachment::bytes(bytes, filename)),
        )
        .await?;
        Ok(())
    }

    /// Builds a WhatsApp link that sends the invoice summary to the client.
    #[poise::command(slash_command, rename = "share", check = "require_session")]
    pub async fn invoice_share(
        ctx: Context<'_>,
        #[description = "Booking"]
        #[autocomplete = "autocomplete::autocomplete_booking"]
        booking: String,
    ) -> Result<()> {
        let document = load_invoice(ctx, &booking).await?;
        let country_code = &ctx.data().config.business.country_code;

        let reply = match document.share_link(country_code) {
            Ok(link) => format!(
                "📨 Send invoice **{}** to {}:\n{link}",
                document.invoice_number, document.bill_to.name
            ),
            Err(e) => notices::error_notice(&e, "share invoice"),
        };
        ctx.say(reply).await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
