//! General Discord commands - ping, help, and operator sign-in.
//! These commands don't touch the store; `/login` and `/logout` update the
//! shared operator session that protected commands check.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::BotData,
        config::operators,
        errors::{Error, Result},
    };
    use tracing::warn;

    /// Responds with "Pong!" to test bot connectivity.
    #[poise::command(slash_command, prefix_command)]
    pub async fn ping(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        ctx.say("Pong!").await?;
        Ok(())
    }

    /// Displays help information about available commands.
    #[poise::command(slash_command, prefix_command)]
    pub async fn help(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let help_text = "**Rental Desk Help**\n\
        Sign in with `/login` before using the console commands.\n\n\
        **Bookings**\n\
        • `/booking create` - Creates a booking (starts as Draft / Unpaid).\n\
        • `/booking edit <booking>` - Changes any field; omitted fields keep their value.\n\
        • `/booking list [status]` - Lists bookings.\n\
        • `/booking calendar [month]` - Shows a month of events.\n\
        • `/booking show <booking>` - Shows one booking in full.\n\
        • `/booking crew <booking> <member>` - Assigns or unassigns a crew member.\n\
        • `/booking checklist_add|checklist_remove|checklist_toggle` - Edits checklists.\n\
        • `/booking delete <booking>` - Deletes a booking after confirmation.\n\n\
        **Invoices**\n\
        • `/invoice show|pdf|share <booking>` - Prints, exports, or shares an invoice.\n\n\
        **Clients and crew**\n\
        • `/client add|edit|list|delete` and `/crew add|edit|list|status|delete`.\n\n\
        **Utility**\n\
        • `/login <passcode>` / `/logout` - Operator session.\n\
        • `/ping` - Checks if the bot is responsive.\n\
        • `/help` - Shows this help message.";

        ctx.say(help_text).await?;
        Ok(())
    }

    /// Signs in to the console with the shared passcode.
    #[poise::command(slash_command, ephemeral)]
    pub async fn login(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Console passcode"] passcode: String,
    ) -> Result<()> {
        let configured = operators::get_console_passcode();
        if !operators::passcode_matches(configured.as_deref(), &passcode) {
            warn!("Rejected sign-in attempt by {}", ctx.author().name);
            ctx.say("❌ Wrong passcode.").await?;
            return Ok(());
        }

        ctx.data().session.sign_in(ctx.author().name.clone());
        ctx.say(format!("✅ Signed in as **{}**.", ctx.author().name))
            .await?;
        Ok(())
    }

    /// Signs the current operator out.
    #[poise::command(slash_command, ephemeral)]
    pub async fn logout(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        ctx.data().session.sign_out();
        ctx.say("👋 Signed out.").await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
