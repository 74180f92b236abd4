//! Client Discord commands - add, edit, list, and delete clients.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{
            BotData,
            handlers::{autocomplete, checks::require_session, notices},
        },
        core::{
            client::{ClientUpdate, NewClient},
            store::StoreOutcome,
        },
        errors::{Error, Result},
    };
    use std::fmt::Write;

    /// Parent command for managing clients.
    #[poise::command(
        slash_command,
        subcommands("client_add", "client_edit", "client_list", "client_delete"),
        check = "require_session"
    )]
    pub async fn client(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let help_text = "Client management command. Available subcommands:\n\
            `/client add` - Add a new client\n\
            `/client edit` - Change a client's details\n\
            `/client list` - List all clients\n\
            `/client delete` - Delete a client (their bookings are kept)";

        ctx.say(help_text).await?;
        Ok(())
    }

    /// Adds a new client.
    #[poise::command(slash_command, rename = "add", check = "require_session")]
    pub async fn client_add(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Client name"] name: String,
        #[description = "Company"] company: Option<String>,
        #[description = "Contact email"] email: Option<String>,
        #[description = "Contact phone (used for WhatsApp invoices)"] phone: Option<String>,
        #[description = "Notes"] notes: Option<String>,
    ) -> Result<()> {
        let result = ctx
            .data()
            .store
            .create_client(NewClient {
                name,
                company,
                contact_email: email,
                contact_phone: phone,
                notes,
            })
            .await;

        let reply = match result {
            Ok(client) => format!("✅ Added client **{}** (`{}`)", client.name, client.id),
            Err(e) => notices::error_notice(&e, "add client"),
        };
        ctx.say(reply).await?;
        Ok(())
    }

    /// Changes a client's details.
    ///
    /// Omitted options keep their value; an empty value clears an optional
    /// field.
    #[poise::command(slash_command, rename = "edit", check = "require_session")]
    pub async fn client_edit(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Client to edit"]
        #[autocomplete = "autocomplete::autocomplete_client"]
        client: String,
        #[description = "New name"] name: Option<String>,
        #[description = "Company"] company: Option<String>,
        #[description = "Contact email"] email: Option<String>,
        #[description = "Contact phone (used for WhatsApp invoices)"] phone: Option<String>,
        #[description = "Notes"] notes: Option<String>,
    ) -> Result<()> {
        let changes = ClientUpdate {
            name,
            company,
            contact_email: email,
            contact_phone: phone,
            notes,
        };
        let reply = match ctx.data().store.update_client(&client, changes).await {
            Ok(updated) => format!(
                "✅ Updated client **{}**. Existing bookings keep the name they were saved with.",
                updated.name
            ),
            Err(e) => notices::error_notice(&e, "edit client"),
        };
        ctx.say(reply).await?;
        Ok(())
    }

    /// Lists all clients.
    #[poise::command(slash_command, rename = "list", check = "require_session")]
    pub async fn client_list(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let clients = ctx.data().store.list_clients().await?;

        if clients.is_empty() {
            ctx.say("👥 No clients yet. Add one with `/client add`.").await?;
            return Ok(());
        }

        let mut response = String::from("👥 **Clients**\n\n");
        for client in clients {
            write!(&mut response, "**{}**", client.name)?;
            if let Some(company) = &client.company {
                write!(&mut response, " - {company}")?;
            }
            if let Some(phone) = &client.contact_phone {
                write!(&mut response, " 📞 {phone}")?;
            }
            if let Some(email) = &client.contact_email {
                write!(&mut response, " ✉️ {email}")?;
            }
            writeln!(&mut response)?;
        }

        ctx.say(response).await?;
        Ok(())
    }

    /// Deletes a client. Bookings that reference the client are kept.
    #[poise::command(slash_command, rename = "delete", check = "require_session")]
    pub async fn client_delete(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Client to delete"]
        #[autocomplete = "autocomplete::autocomplete_client"]
        client: String,
    ) -> Result<()> {
        let result = ctx
            .data()
            .store
            .delete_client(&client)
            .await
            .map(|()| client.clone());
        let outcome = StoreOutcome::from_result("delete client", result);
        ctx.say(notices::outcome_notice(
            "Client deleted. Their bookings are unchanged.",
            &outcome,
        ))
        .await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
