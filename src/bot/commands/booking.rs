//! Booking Discord commands - the booking editor, list, calendar, and deletion.
//!
//! Every change goes through the booking editor: the stored booking is loaded
//! into a form, the command changes the form, and the whole form is submitted.
//! Replies are built from a freshly loaded snapshot.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{
            BotData,
            handlers::{autocomplete, checks::require_session, notices},
        },
        core::{
            booking::{BookingStatus, PaymentStatus},
            calendar,
            checklist::ChecklistEditor,
            editor::{BookingForm, SubmitOutcome},
            views::{self, DeleteRequest},
        },
        errors::{Error, Result},
    };
    use chrono::{Datelike, NaiveDate};
    use poise::serenity_prelude as serenity;
    use std::time::Duration;
    use tracing::{info, warn};

    type Context<'a> = poise::Context<'a, BotData, Error>;

    const CONFIRM_TIMEOUT: Duration = Duration::from_secs(60);

    #[derive(Debug, Clone, Copy, poise::ChoiceParameter)]
    pub enum BookingStatusChoice {
        Draft,
        Confirmed,
        Ongoing,
        Completed,
        Cancelled,
    }

    impl From<BookingStatusChoice> for BookingStatus {
        fn from(choice: BookingStatusChoice) -> Self {
            match choice {
                BookingStatusChoice::Draft => Self::Draft,
                BookingStatusChoice::Confirmed => Self::Confirmed,
                BookingStatusChoice::Ongoing => Self::Ongoing,
                BookingStatusChoice::Completed => Self::Completed,
                BookingStatusChoice::Cancelled => Self::Cancelled,
            }
        }
    }

    #[derive(Debug, Clone, Copy, poise::ChoiceParameter)]
    pub enum PaymentStatusChoice {
        Unpaid,
        #[name = "Down Payment"]
        DownPayment,
        Paid,
        Refunded,
    }

    impl From<PaymentStatusChoice> for PaymentStatus {
        fn from(choice: PaymentStatusChoice) -> Self {
            match choice {
                PaymentStatusChoice::Unpaid => Self::Unpaid,
                PaymentStatusChoice::DownPayment => Self::DownPayment,
                PaymentStatusChoice::Paid => Self::Paid,
                PaymentStatusChoice::Refunded => Self::Refunded,
            }
        }
    }

    #[derive(Debug, Clone, Copy, poise::ChoiceParameter)]
    pub enum ChecklistChoice {
        #[name = "Technical needs"]
        TechnicalNeeds,
        #[name = "Crew tasks"]
        CrewTasks,
    }

    fn checklist_mut(form: &mut BookingForm, which: ChecklistChoice) -> &mut ChecklistEditor {
        match which {
            ChecklistChoice::TechnicalNeeds => &mut form.technical_needs,
            ChecklistChoice::CrewTasks => &mut form.crew_tasks,
        }
    }

    fn parse_date(raw: &str) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok()
    }

    fn parse_month(raw: &str) -> Option<(i32, u32)> {
        let (year, month) = raw.trim().split_once('-')?;
        let year = year.parse().ok()?;
        let month = month.parse().ok()?;
        (1..=12).contains(&month).then_some((year, month))
    }

    /// Splits `a; b; c` into checklist rows.
    fn split_items(raw: Option<&str>) -> Vec<String> {
        raw.unwrap_or_default()
            .split(';')
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(ToString::to_string)
            .collect()
    }

    /// Loads a booking into an editor form, replying when it does not exist.
    async fn load_form(ctx: Context<'_>, booking_id: &str) -> Result<Option<BookingForm>> {
        match ctx.data().store.get_booking(booking_id).await? {
            Some(model) => Ok(Some(BookingForm::from_booking(&model))),
            None => {
                ctx.say(format!("❌ {}", Error::BookingNotFound { id: booking_id.to_string() }))
                    .await?;
                Ok(None)
            }
        }
    }

    /// Submits a form and replies with the outcome.
    async fn save_form(ctx: Context<'_>, form: &mut BookingForm) -> Result<()> {
        let outcome = form.submit(&ctx.data().store).await;
        if !outcome.is_success() {
            warn!("Booking save from /{} not written: {outcome:?}", ctx.command().qualified_name);
        }
        ctx.say(notices::submit_notice(&outcome)?).await?;
        Ok(())
    }

    /// Parent command for bookings.
    #[poise::command(
        slash_command,
        subcommands(
            "booking_create",
            "booking_edit",
            "booking_list",
            "booking_calendar",
            "booking_show",
            "booking_delete",
            "booking_crew",
            "booking_checklist_add",
            "booking_checklist_remove",
            "booking_checklist_toggle"
        ),
        check = "require_session"
    )]
    pub async fn booking(ctx: Context<'_>) -> Result<()> {
        ctx.say("Booking command. See `/help` for the available subcommands.")
            .await?;
        Ok(())
    }

    /// Creates a booking. It starts as Draft / Unpaid unless told otherwise.
    #[allow(clippy::too_many_arguments)]
    #[poise::command(slash_command, rename = "create", check = "require_session")]
    pub async fn booking_create(
        ctx: Context<'_>,
        #[description = "Client"]
        #[autocomplete = "autocomplete::autocomplete_client"]
        client: String,
        #[description = "Venue or address"] location: String,
        #[description = "Event date (YYYY-MM-DD)"] event_date: String,
        #[description = "Type of event (e.g., 'Wedding')"] event_type: String,
        #[description = "Status (default: Draft)"] status: Option<BookingStatusChoice>,
        #[description = "Payment status (default: Unpaid)"] payment: Option<PaymentStatusChoice>,
        #[description = "Total amount"] total_amount: Option<i64>,
        #[description = "Amount paid"] amount_paid: Option<i64>,
        #[description = "Technical needs, separated by ';'"] technical_needs: Option<String>,
        #[description = "Crew tasks, separated by ';'"] crew_tasks: Option<String>,
        #[description = "Crew member to assign"]
        #[autocomplete = "autocomplete::autocomplete_crew"]
        crew: Option<String>,
    ) -> Result<()> {
        let Some(date) = parse_date(&event_date) else {
            ctx.say("❌ Event date must look like 2024-12-01.").await?;
            return Ok(());
        };

        let mut form = BookingForm::new();
        form.client_id = client;
        form.location = location;
        form.event_date = Some(date);
        form.event_type = event_type;
        form.status = status.map(Into::into).unwrap_or_default();
        form.payment_status = payment.map(Into::into).unwrap_or_default();
        form.total_amount = total_amount;
        form.amount_paid = amount_paid;
        for item in split_items(technical_needs.as_deref()) {
            form.technical_needs.append_with(item);
        }
        for item in split_items(crew_tasks.as_deref()) {
            form.crew_tasks.append_with(item);
        }
        if let Some(member) = crew {
            form.crew.select(member);
        }

        save_form(ctx, &mut form).await
    }

    /// Changes a booking. Omitted fields keep their current value.
    #[allow(clippy::too_many_arguments)]
    #[poise::command(slash_command, rename = "edit", check = "require_session")]
    pub async fn booking_edit(
        ctx: Context<'_>,
        #[description = "Booking"]
        #[autocomplete = "autocomplete::autocomplete_booking"]
        booking: String,
        #[description = "Client"]
        #[autocomplete = "autocomplete::autocomplete_client"]
        client: Option<String>,
        #[description = "Venue or address"] location: Option<String>,
        #[description = "Event date (YYYY-MM-DD)"] event_date: Option<String>,
        #[description = "Type of event"] event_type: Option<String>,
        #[description = "Status"] status: Option<BookingStatusChoice>,
        #[description = "Payment status"] payment: Option<PaymentStatusChoice>,
        #[description = "Total amount"] total_amount: Option<i64>,
        #[description = "Amount paid"] amount_paid: Option<i64>,
    ) -> Result<()> {
        let Some(mut form) = load_form(ctx, &booking).await? else {
            return Ok(());
        };

        if let Some(raw) = event_date {
            let Some(date) = parse_date(&raw) else {
                ctx.say("❌ Event date must look like 2024-12-01.").await?;
                return Ok(());
            };
            form.event_date = Some(date);
        }
        if let Some(client) = client {
            form.client_id = client;
        }
        if let Some(location) = location {
            form.location = location;
        }
        if let Some(event_type) = event_type {
            form.event_type = event_type;
        }
        if let Some(status) = status {
            form.status = status.into();
        }
        if let Some(payment) = payment {
            form.payment_status = payment.into();
        }
        if total_amount.is_some() {
            form.total_amount = total_amount;
        }
        if amount_paid.is_some() {
            form.amount_paid = amount_paid;
        }

        save_form(ctx, &mut form).await
    }

    /// Lists bookings, optionally only those with one status.
    #[poise::command(slash_command, rename = "list", check = "require_session")]
    pub async fn booking_list(
        ctx: Context<'_>,
        #[description = "Only show this status"] status: Option<BookingStatusChoice>,
    ) -> Result<()> {
        let snapshot = views::load_console(&ctx.data().store).await?;
        let rows = views::list_rows(&snapshot.bookings, status.map(Into::into));

        if rows.is_empty() {
            ctx.say("📅 No bookings found. Create one with `/booking create`.")
                .await?;
            return Ok(());
        }

        let mut response = format!("📅 **Bookings** ({})\n", rows.len());
        response.push_str(&notices::rows_text(&rows)?);
        ctx.say(response).await?;
        Ok(())
    }

    /// Shows a month of bookings, or one event's details.
    #[poise::command(slash_command, rename = "calendar", check = "require_session")]
    pub async fn booking_calendar(
        ctx: Context<'_>,
        #[description = "Month (YYYY-MM, default: this month)"] month: Option<String>,
        #[description = "Open one event"]
        #[autocomplete = "autocomplete::autocomplete_booking"]
        event: Option<String>,
    ) -> Result<()> {
        let snapshot = views::load_console(&ctx.data().store).await?;

        if let Some(booking_id) = event {
            let detail = calendar::event_detail(
                &snapshot.bookings,
                &booking_id,
                &ctx.data().config.console.editor_base_url,
            )?;
            ctx.send(poise::CreateReply::default().embed(notices::event_detail_embed(&detail)))
                .await?;
            return Ok(());
        }

        let (year, month) = match month {
            Some(raw) => {
                let Some(parsed) = parse_month(&raw) else {
                    ctx.say("❌ Month must look like 2024-12.").await?;
                    return Ok(());
                };
                parsed
            }
            None => {
                let today = chrono::Local::now().date_naive();
                (today.year(), today.month())
            }
        };

        let grid = calendar::month_grid(year, month, &calendar::events(&snapshot.bookings))?;
        let title = NaiveDate::from_ymd_opt(year, month, 1)
            .map_or_else(String::new, |first| first.format("%B %Y").to_string());
        let mut response = format!("🗓️ **{title}** - {} event(s)\n", grid.event_count());
        response.push_str(&notices::month_text(&grid)?);
        ctx.say(response).await?;
        Ok(())
    }

    /// Shows one booking in full.
    #[poise::command(slash_command, rename = "show", check = "require_session")]
    pub async fn booking_show(
        ctx: Context<'_>,
        #[description = "Booking"]
        #[autocomplete = "autocomplete::autocomplete_booking"]
        booking: String,
    ) -> Result<()> {
        let snapshot = views::load_console(&ctx.data().store).await?;
        let model = snapshot.booking(&booking)?;
        let embed = notices::booking_embed(model, &snapshot.crew_names(model))?;
        ctx.send(poise::CreateReply::default().embed(embed)).await?;
        Ok(())
    }

    /// Deletes a booking after an explicit confirmation.
    #[poise::command(slash_command, rename = "delete", check = "require_session")]
    pub async fn booking_delete(
        ctx: Context<'_>,
        #[description = "Booking"]
        #[autocomplete = "autocomplete::autocomplete_booking"]
        booking: String,
    ) -> Result<()> {
        let snapshot = views::load_console(&ctx.data().store).await?;
        let request = DeleteRequest::new(&snapshot, &booking)?;

        let ctx_id = ctx.id().to_string();
        let confirm_id = format!("{ctx_id}:confirm");
        let cancel_id = format!("{ctx_id}:cancel");
        let buttons = serenity::CreateActionRow::Buttons(vec![
            serenity::CreateButton::new(&confirm_id)
                .label("Delete")
                .style(serenity::ButtonStyle::Danger),
            serenity::CreateButton::new(&cancel_id)
                .label("Cancel")
                .style(serenity::ButtonStyle::Secondary),
        ]);

        let reply = ctx
            .send(
                poise::CreateReply::default()
                    .content(format!("⚠️ {}", request.prompt()))
                    .components(vec![buttons]),
            )
            .await?;

        let press = serenity::ComponentInteractionCollector::new(ctx.serenity_context())
            .author_id(ctx.author().id)
            .channel_id(ctx.channel_id())
            .timeout(CONFIRM_TIMEOUT)
            .filter(move |press| press.data.custom_id.starts_with(&ctx_id))
            .await;

        let Some(press) = press else {
            reply
                .edit(
                    ctx,
                    poise::CreateReply::default()
                        .content("⌛ No confirmation received; nothing was deleted.")
                        .components(Vec::new()),
                )
                .await?;
            return Ok(());
        };

        let text = if press.data.custom_id == confirm_id {
            let outcome = request.confirm(&ctx.data().store).await;
            if outcome.success {
                info!("Booking {booking} deleted by {}", ctx.author().name);
            }
            notices::outcome_notice("Booking deleted.", &outcome)
        } else {
            "Deletion cancelled.".to_string()
        };

        press
            .create_response(
                ctx.serenity_context(),
                serenity::CreateInteractionResponse::UpdateMessage(
                    serenity::CreateInteractionResponseMessage::new()
                        .content(text)
                        .components(Vec::new()),
                ),
            )
            .await?;
        Ok(())
    }

    /// Assigns a crew member, or unassigns them if already assigned.
    #[poise::command(slash_command, rename = "crew", check = "require_session")]
    pub async fn booking_crew(
        ctx: Context<'_>,
        #[description = "Booking"]
        #[autocomplete = "autocomplete::autocomplete_booking"]
        booking: String,
        #[description = "Crew member"]
        #[autocomplete = "autocomplete::autocomplete_crew"]
        member: String,
    ) -> Result<()> {
        let Some(mut form) = load_form(ctx, &booking).await? else {
            return Ok(());
        };
        // Removed members are listed by id prefix; let that prefix unassign them.
        let member = form
            .crew
            .ids()
            .iter()
            .find(|id| member.len() >= 8 && id.starts_with(member.as_str()))
            .cloned()
            .unwrap_or(member);
        let name = ctx
            .data()
            .store
            .get_crew_member(&member)
            .await?
            .map_or_else(|| member.clone(), |m| m.name);

        let assigned = form.crew.toggle(&member);
        info!(
            "Crew {name} {} booking {booking}",
            if assigned { "assigned to" } else { "removed from" }
        );
        save_form(ctx, &mut form).await
    }

    /// Appends a row to a checklist.
    #[poise::command(slash_command, rename = "checklist_add", check = "require_session")]
    pub async fn booking_checklist_add(
        ctx: Context<'_>,
        #[description = "Booking"]
        #[autocomplete = "autocomplete::autocomplete_booking"]
        booking: String,
        #[description = "Which checklist"] list: ChecklistChoice,
        #[description = "What needs doing or bringing"] description: String,
    ) -> Result<()> {
        let Some(mut form) = load_form(ctx, &booking).await? else {
            return Ok(());
        };
        checklist_mut(&mut form, list).append_with(description);

        let row_errors = form.live_row_errors();
        if !row_errors.is_empty() {
            let outcome = SubmitOutcome::Invalid { errors: row_errors };
            ctx.say(notices::submit_notice(&outcome)?).await?;
            return Ok(());
        }
        save_form(ctx, &mut form).await
    }

    /// Removes the row at a position (starting at 1).
    #[poise::command(slash_command, rename = "checklist_remove", check = "require_session")]
    pub async fn booking_checklist_remove(
        ctx: Context<'_>,
        #[description = "Booking"]
        #[autocomplete = "autocomplete::autocomplete_booking"]
        booking: String,
        #[description = "Which checklist"] list: ChecklistChoice,
        #[description = "Row number, as shown by /booking show"]
        #[min = 1]
        position: u32,
    ) -> Result<()> {
        let Some(mut form) = load_form(ctx, &booking).await? else {
            return Ok(());
        };
        let editor = checklist_mut(&mut form, list);
        let Some(key) = row_key(editor, position) else {
            ctx.say(format!("❌ There is no row {position} in that checklist."))
                .await?;
            return Ok(());
        };
        editor.remove(key);
        save_form(ctx, &mut form).await
    }

    /// Ticks or unticks the row at a position (starting at 1).
    #[poise::command(slash_command, rename = "checklist_toggle", check = "require_session")]
    pub async fn booking_checklist_toggle(
        ctx: Context<'_>,
        #[description = "Booking"]
        #[autocomplete = "autocomplete::autocomplete_booking"]
        booking: String,
        #[description = "Which checklist"] list: ChecklistChoice,
        #[description = "Row number, as shown by /booking show"]
        #[min = 1]
        position: u32,
    ) -> Result<()> {
        let Some(mut form) = load_form(ctx, &booking).await? else {
            return Ok(());
        };
        let editor = checklist_mut(&mut form, list);
        let Some(key) = row_key(editor, position) else {
            ctx.say(format!("❌ There is no row {position} in that checklist."))
                .await?;
            return Ok(());
        };
        editor.toggle(key);
        save_form(ctx, &mut form).await
    }

    fn row_key(editor: &ChecklistEditor, position: u32) -> Option<crate::core::checklist::RowKey> {
        let index = usize::try_from(position).ok()?.checked_sub(1)?;
        editor.key_at(index)
    }

    #[cfg(test)]
    mod tests {
        #![allow(clippy::unwrap_used)]
        use super::*;
        use crate::entities::ChecklistItem;

        #[test]
        fn test_parse_date_and_month() {
            assert_eq!(parse_date(" 2024-12-01 "), NaiveDate::from_ymd_opt(2024, 12, 1));
            assert_eq!(parse_date("01/12/2024"), None);
            assert_eq!(parse_month("2024-12"), Some((2024, 12)));
            assert_eq!(parse_month("2024-13"), None);
            assert_eq!(parse_month("december"), None);
        }

        #[test]
        fn test_split_items_drops_blanks() {
            assert_eq!(split_items(Some("Mixer; ;Lights ")), vec!["Mixer", "Lights"]);
            assert!(split_items(None).is_empty());
        }

        #[test]
        fn test_row_key_is_one_based() {
            let editor = ChecklistEditor::with_items(
                "crew_tasks",
                vec![ChecklistItem::open("Load"), ChecklistItem::open("Rig")],
            );
            assert_eq!(row_key(&editor, 1), editor.key_at(0));
            assert_eq!(row_key(&editor, 2), editor.key_at(1));
            assert_eq!(row_key(&editor, 0), None);
            assert_eq!(row_key(&editor, 3), None);
        }

        #[test]
        fn test_status_choices_map_to_stored_labels() {
            assert_eq!(BookingStatus::from(BookingStatusChoice::Ongoing).as_str(), "Ongoing");
            assert_eq!(
                PaymentStatus::from(PaymentStatusChoice::DownPayment).as_str(),
                "DownPayment"
            );
        }
    }
}

// Re-export all commands
pub use inner::*;
