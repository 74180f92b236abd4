//! Booking editor - validates operator input and saves it.
//!
//! [`validate`] checks the fields and the references to clients and crew
//! against the lists loaded for the form. [`submit`] validates first and only
//! then performs a single create or full-replace write. After a successful
//! submit the caller reloads its booking list; nothing is patched locally.

use crate::{
    core::{
        booking::{BookingInput, BookingStatus, FieldError, PaymentStatus, ValidatedBooking, validate_fields},
        checklist::{ChecklistEditor, CrewSelection},
        store::Store,
    },
    entities::{BookingModel, ChecklistItem, ClientModel, CrewMemberModel},
    errors::Result,
};
use chrono::NaiveDate;
use tracing::{debug, info, instrument};

/// Client and crew lists the form validates references against.
#[derive(Debug, Clone, Default)]
pub struct EditorContext {
    pub clients: Vec<ClientModel>,
    pub crew: Vec<CrewMemberModel>,
    /// Crew ids already on the booking being edited. They stay valid after
    /// the crew member is removed.
    pub kept_crew: Vec<String>,
}

impl EditorContext {
    /// Loads both lists concurrently.
    pub async fn load(store: &Store) -> Result<Self> {
        let (clients, crew) = tokio::try_join!(store.list_clients(), store.list_crew())?;
        Ok(Self {
            clients,
            crew,
            kept_crew: Vec::new(),
        })
    }

    fn client(&self, client_id: &str) -> Option<&ClientModel> {
        self.clients.iter().find(|c| c.id == client_id)
    }

    fn allows_crew(&self, crew_id: &str) -> bool {
        self.crew.iter().any(|m| m.id == crew_id) || self.kept_crew.iter().any(|id| id == crew_id)
    }
}

fn trimmed_items(items: &[ChecklistItem]) -> Vec<ChecklistItem> {
    items
        .iter()
        .map(|item| ChecklistItem {
            description: item.description.trim().to_string(),
            completed: item.completed,
        })
        .collect()
}

/// Validates and normalizes booking input.
///
/// Accepts iff the client exists, the event date is present, the event type and
/// location are long enough, every checklist row has a description, amounts are
/// not negative, and every assigned crew id either exists or was already on
/// the booking being edited.
///
/// # Errors
/// Returns every field error found.
pub fn validate(
    input: &BookingInput,
    context: &EditorContext,
) -> std::result::Result<ValidatedBooking, Vec<FieldError>> {
    let mut errors = validate_fields(input);

    let client = context.client(input.client_id.trim());
    if client.is_none() && !input.client_id.trim().is_empty() {
        errors.push(FieldError::new("client_id", "Selected client does not exist"));
    }

    let crew = CrewSelection::from_ids(input.assigned_crew.iter().cloned());
    for crew_id in crew.ids() {
        if !context.allows_crew(crew_id) {
            errors.push(FieldError::new(
                "assigned_crew",
                format!("Unknown crew member '{crew_id}'"),
            ));
        }
    }

    let (Some(client), Some(event_date), true) = (client, input.event_date, errors.is_empty())
    else {
        debug!("Booking input rejected with {} errors", errors.len());
        return Err(errors);
    };

    Ok(ValidatedBooking {
        client_id: client.id.clone(),
        client_name: client.name.clone(),
        location: input.location.trim().to_string(),
        event_date,
        event_type: input.event_type.trim().to_string(),
        status: input.status,
        payment_status: input.payment_status,
        technical_needs: trimmed_items(&input.technical_needs),
        crew_tasks: trimmed_items(&input.crew_tasks),
        assigned_crew: crew.into_ids(),
        total_amount: input.total_amount,
        amount_paid: input.amount_paid,
    })
}

/// Result of a submit, as shown to the operator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The booking was written
    Saved { id: String, created: bool },
    /// Validation failed; nothing was written
    Invalid { errors: Vec<FieldError> },
    /// The write failed; the stored booking is unchanged
    Failed { message: String },
}

impl SubmitOutcome {
    /// Whether the booking was written.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Saved { .. })
    }
}

/// Validates and saves a booking.
///
/// With `existing_id`, every field of that booking is replaced, including the
/// checklists and crew set. Without it, a new booking is created.
#[instrument(skip(store, input))]
pub async fn submit(store: &Store, input: &BookingInput, existing_id: Option<&str>) -> SubmitOutcome {
    let mut context = match EditorContext::load(store).await {
        Ok(context) => context,
        Err(e) => {
            return SubmitOutcome::Failed {
                message: e.user_message("load clients and crew"),
            };
        }
    };
    if let Some(id) = existing_id {
        match store.get_booking(id).await {
            Ok(Some(stored)) => context.kept_crew = stored.assigned_crew.0,
            Ok(None) => {}
            Err(e) => {
                return SubmitOutcome::Failed {
                    message: e.user_message("load booking"),
                };
            }
        }
    }

    let validated = match validate(input, &context) {
        Ok(validated) => validated,
        Err(errors) => return SubmitOutcome::Invalid { errors },
    };

    let written = match existing_id {
        Some(id) => store.update_booking(id, validated).await,
        None => store.create_booking(validated).await,
    };

    match written {
        Ok(model) => {
            info!("Booking {} saved", model.id);
            SubmitOutcome::Saved {
                id: model.id,
                created: existing_id.is_none(),
            }
        }
        Err(e) => SubmitOutcome::Failed {
            message: e.user_message("save booking"),
        },
    }
}

/// Marks a form busy until dropped, so a cancelled submit cannot leave it stuck.
struct BusyGuard<'a>(&'a mut bool);

impl<'a> BusyGuard<'a> {
    fn engage(flag: &'a mut bool) -> Self {
        *flag = true;
        Self(flag)
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        *self.0 = false;
    }
}

/// Form state behind the booking editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingForm {
    pub client_id: String,
    pub location: String,
    pub event_date: Option<NaiveDate>,
    pub event_type: String,
    pub status: BookingStatus,
    pub payment_status: PaymentStatus,
    pub technical_needs: ChecklistEditor,
    pub crew_tasks: ChecklistEditor,
    pub crew: CrewSelection,
    pub total_amount: Option<i64>,
    pub amount_paid: Option<i64>,
    existing_id: Option<String>,
    busy: bool,
}

impl Default for BookingForm {
    fn default() -> Self {
        Self {
            client_id: String::new(),
            location: String::new(),
            event_date: None,
            event_type: String::new(),
            status: BookingStatus::default(),
            payment_status: PaymentStatus::default(),
            technical_needs: ChecklistEditor::new("technical_needs"),
            crew_tasks: ChecklistEditor::new("crew_tasks"),
            crew: CrewSelection::default(),
            total_amount: None,
            amount_paid: None,
            existing_id: None,
            busy: false,
        }
    }
}

impl BookingForm {
    /// Blank form for a new booking.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Form pre-filled from a stored booking; submitting it replaces that booking.
    #[must_use]
    pub fn from_booking(model: &BookingModel) -> Self {
        let input = BookingInput::from_model(model);
        Self {
            client_id: input.client_id,
            location: input.location,
            event_date: input.event_date,
            event_type: input.event_type,
            status: input.status,
            payment_status: input.payment_status,
            technical_needs: ChecklistEditor::with_items("technical_needs", input.technical_needs),
            crew_tasks: ChecklistEditor::with_items("crew_tasks", input.crew_tasks),
            crew: CrewSelection::from_ids(input.assigned_crew),
            total_amount: input.total_amount,
            amount_paid: input.amount_paid,
            existing_id: Some(model.id.clone()),
            busy: false,
        }
    }

    /// Id of the booking being edited, if any.
    #[must_use]
    pub fn existing_id(&self) -> Option<&str> {
        self.existing_id.as_deref()
    }

    /// Whether a submit is in flight.
    #[must_use]
    pub const fn is_busy(&self) -> bool {
        self.busy
    }

    /// The form cannot be closed while a submit is in flight.
    #[must_use]
    pub const fn can_close(&self) -> bool {
        !self.busy
    }

    /// Snapshot of the form as booking input.
    #[must_use]
    pub fn to_input(&self) -> BookingInput {
        BookingInput {
            client_id: self.client_id.clone(),
            location: self.location.clone(),
            event_date: self.event_date,
            event_type: self.event_type.clone(),
            status: self.status,
            payment_status: self.payment_status,
            technical_needs: self.technical_needs.items(),
            crew_tasks: self.crew_tasks.items(),
            assigned_crew: self.crew.ids().to_vec(),
            total_amount: self.total_amount,
            amount_paid: self.amount_paid,
        }
    }

    /// Errors for checklist rows the operator has touched, shown while editing.
    #[must_use]
    pub fn live_row_errors(&self) -> Vec<FieldError> {
        self.technical_needs
            .touched_errors()
            .into_iter()
            .chain(self.crew_tasks.touched_errors())
            .map(|(_, error)| error)
            .collect()
    }

    /// Submits the form.
    ///
    /// The exclusive borrow is what rules out a second submit while one is in
    /// flight. The busy flag is cleared even when the returned future is
    /// dropped before it completes.
    pub async fn submit(&mut self, store: &Store) -> SubmitOutcome {
        let input = self.to_input();
        let existing_id = self.existing_id.clone();
        let outcome = {
            let _busy = BusyGuard::engage(&mut self.busy);
            submit(store, &input, existing_id.as_deref()).await
        };

        if let SubmitOutcome::Saved { id, .. } = &outcome {
            self.existing_id = Some(id.clone());
        }
        outcome
    }
}
