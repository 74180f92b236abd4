//! Crew Discord commands - add, edit, list, delete, and change availability.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{
            BotData,
            handlers::{autocomplete, checks::require_session, notices},
        },
        core::{
            crew::{CrewStatus, CrewUpdate},
            store::StoreOutcome,
        },
        errors::{Error, Result},
    };
    use std::fmt::Write;

    #[derive(Debug, Clone, Copy, poise::ChoiceParameter)]
    pub enum CrewStatusChoice {
        Available,
        #[name = "On Duty"]
        OnDuty,
        #[name = "On Leave"]
        OnLeave,
    }

    impl From<CrewStatusChoice> for CrewStatus {
        fn from(choice: CrewStatusChoice) -> Self {
            match choice {
                CrewStatusChoice::Available => Self::Available,
                CrewStatusChoice::OnDuty => Self::OnDuty,
                CrewStatusChoice::OnLeave => Self::OnLeave,
            }
        }
    }

    /// Parent command for managing crew members.
    #[poise::command(
        slash_command,
        subcommands("crew_add", "crew_edit", "crew_list", "crew_status", "crew_delete"),
        check = "require_session"
    )]
    pub async fn crew(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let help_text = "Crew management command. Available subcommands:\n\
            `/crew add` - Add a crew member\n\
            `/crew edit` - Change a member's name, role, or availability\n\
            `/crew list` - List the crew with availability\n\
            `/crew status` - Change a member's availability\n\
            `/crew delete` - Remove a crew member";

        ctx.say(help_text).await?;
        Ok(())
    }

    /// Adds a crew member.
    #[poise::command(slash_command, rename = "add", check = "require_session")]
    pub async fn crew_add(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Name"] name: String,
        #[description = "Role (e.g., 'Sound engineer')"] role: String,
        #[description = "Availability (default: Available)"] status: Option<CrewStatusChoice>,
    ) -> Result<()> {
        let status = status.map_or(CrewStatus::Available, CrewStatus::from);
        let reply = match ctx.data().store.create_crew_member(name, role, status).await {
            Ok(member) => format!(
                "✅ Added **{}** as {} ({})",
                member.name, member.role, status
            ),
            Err(e) => notices::error_notice(&e, "add crew member"),
        };
        ctx.say(reply).await?;
        Ok(())
    }

    /// Changes a crew member's details. Omitted options keep their value.
    #[poise::command(slash_command, rename = "edit", check = "require_session")]
    pub async fn crew_edit(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Crew member"]
        #[autocomplete = "autocomplete::autocomplete_crew"]
        member: String,
        #[description = "New name"] name: Option<String>,
        #[description = "New role"] role: Option<String>,
        #[description = "New availability"] status: Option<CrewStatusChoice>,
    ) -> Result<()> {
        let changes = CrewUpdate {
            name,
            role,
            status: status.map(CrewStatus::from),
        };
        let reply = match ctx.data().store.update_crew_member(&member, changes).await {
            Ok(updated) => format!("✅ Updated **{}** ({})", updated.name, updated.role),
            Err(e) => notices::error_notice(&e, "edit crew member"),
        };
        ctx.say(reply).await?;
        Ok(())
    }

    /// Lists the crew with availability.
    #[poise::command(slash_command, rename = "list", check = "require_session")]
    pub async fn crew_list(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let crew = ctx.data().store.list_crew().await?;

        if crew.is_empty() {
            ctx.say("🧰 No crew members yet. Add one with `/crew add`.").await?;
            return Ok(());
        }

        let mut response = String::from("🧰 **Crew**\n\n");
        for member in crew {
            let (emoji, label) = match CrewStatus::parse(&member.status) {
                Some(CrewStatus::Available) => ("🟢", CrewStatus::Available.to_string()),
                Some(CrewStatus::OnDuty) => ("🟠", CrewStatus::OnDuty.to_string()),
                Some(CrewStatus::OnLeave) => ("⚪", CrewStatus::OnLeave.to_string()),
                None => ("❔", member.status.clone()),
            };
            writeln!(
                &mut response,
                "{emoji} **{}** - {} ({label})",
                member.name, member.role
            )?;
        }

        ctx.say(response).await?;
        Ok(())
    }

    /// Changes a crew member's availability.
    #[poise::command(slash_command, rename = "status", check = "require_session")]
    pub async fn crew_status(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Crew member"]
        #[autocomplete = "autocomplete::autocomplete_crew"]
        member: String,
        #[description = "New availability"] status: CrewStatusChoice,
    ) -> Result<()> {
        let status = CrewStatus::from(status);
        let changes = CrewUpdate {
            status: Some(status),
            ..Default::default()
        };
        let reply = match ctx.data().store.update_crew_member(&member, changes).await {
            Ok(updated) => format!("✅ **{}** is now {status}", updated.name),
            Err(e) => notices::error_notice(&e, "update crew status"),
        };
        ctx.say(reply).await?;
        Ok(())
    }

    /// Removes a crew member. Bookings keep the id in their crew set.
    #[poise::command(slash_command, rename = "delete", check = "require_session")]
    pub async fn crew_delete(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Crew member"]
        #[autocomplete = "autocomplete::autocomplete_crew"]
        member: String,
    ) -> Result<()> {
        let result = ctx
            .data()
            .store
            .delete_crew_member(&member)
            .await
            .map(|()| member.clone());
        let outcome = StoreOutcome::from_result("delete crew member", result);
        ctx.say(notices::outcome_notice("Crew member removed.", &outcome))
            .await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
