//! The add spending view and the endpoints for confirming and committing a new entry.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use axum_extra::extract::Form;
use maud::{Markup, html};
use rusqlite::Connection;
use serde::Deserialize;
use time::Date;

use crate::{
    AppState, Error,
    alert::Alert,
    app_state::lock_connection,
    endpoints,
    html::{
        BUTTON_PRIMARY_STYLE, BUTTON_SECONDARY_STYLE, FORM_CONTAINER_STYLE, base,
        loading_spinner, rupee_input_styles,
    },
    navigation::NavBar,
    spending::{
        NewSpending,
        domain::SpendingForm,
        flow::{Decision, Interaction, Outcome},
        form::{SpendingFields, hidden_spending_fields, spending_form_fields},
    },
    timezone::local_today,
};

/// The state needed to add a spending entry.
#[derive(Debug, Clone)]
pub struct CreateSpendingState {
    /// The database connection for storing spending.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The local timezone as a canonical timezone name, e.g. "Asia/Kolkata".
    pub local_timezone: String,
}

impl FromRef<AppState> for CreateSpendingState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// The confirmed values sent back from the confirmation prompt, plus the user's answer.
#[derive(Debug, Deserialize)]
pub struct ConfirmationForm {
    pub member: String,
    pub item: String,
    pub cost: f64,
    pub date: Date,
    pub decision: Decision,
}

impl ConfirmationForm {
    fn into_parts(self) -> (SpendingForm, Decision) {
        (
            SpendingForm {
                member: self.member,
                item: self.item,
                cost: self.cost,
                date: self.date,
            },
            self.decision,
        )
    }
}

/// Renders the page for adding a spending entry.
pub async fn get_new_spending_page(
    State(state): State<CreateSpendingState>,
) -> Result<Response, Error> {
    let today = local_today(&state.local_timezone)?;

    let nav_bar = NavBar::new(endpoints::NEW_SPENDING_VIEW).into_html();

    let content = html! {
        (nav_bar)

        div class=(FORM_CONTAINER_STYLE)
        {
            div id="spending-panel" class="w-full"
            {
                (new_spending_form(today))
            }
        }
    };

    Ok(base("Add Spending", &[rupee_input_styles()], &content).into_response())
}

fn new_spending_form(today: Date) -> Markup {
    let spinner = loading_spinner();

    html! {
        form
            hx-post=(endpoints::CONFIRM_SPENDING)
            hx-target="#spending-panel"
            hx-target-error="#alert-container"
            class="w-full space-y-4 md:space-y-6"
        {
            h2 class="text-xl font-bold" { "Add Spending" }

            (spending_form_fields(&SpendingFields::blank(today)))

            button type="submit" id="submit-button" tabindex="0" class=(BUTTON_PRIMARY_STYLE)
            {
                span id="indicator" class="inline htmx-indicator" { (spinner) }
                " Add Entry"
            }
        }
    }
}

fn confirmation_prompt(new_spending: &NewSpending) -> Markup {
    html! {
        form
            hx-post=(endpoints::SPENDING_API)
            hx-target="#spending-panel"
            hx-target-error="#alert-container"
            class="w-full space-y-4 md:space-y-6"
        {
            h2 class="text-xl font-bold" { "Confirm Entry" }

            p id="confirmation-message"
            {
                "Are you sure you want to add this entry: " (new_spending) "?"
            }

            (hidden_spending_fields(new_spending))

            button type="submit" name="decision" value="yes" class=(BUTTON_PRIMARY_STYLE)
            {
                "Yes, add this entry"
            }

            button type="submit" name="decision" value="no" class=(BUTTON_SECONDARY_STYLE)
            {
                "No, go back"
            }
        }
    }
}

/// A route handler that checks a new entry and asks the user to confirm it.
///
/// Nothing is stored until the user answers the prompt.
pub async fn confirm_spending_endpoint(Form(form): Form<SpendingForm>) -> Response {
    let new_spending = match NewSpending::try_from(form) {
        Ok(new_spending) => new_spending,
        Err(error) => {
            tracing::debug!("rejected new spending: {error}");
            return error.into_alert_response();
        }
    };

    match Interaction::Idle.review(new_spending) {
        Ok(Interaction::Confirming(new_spending)) => {
            confirmation_prompt(&new_spending).into_response()
        }
        Ok(_) => Error::InvalidTransition.into_alert_response(),
        Err(error) => error.into_alert_response(),
    }
}

/// A route handler that stores the confirmed entry or discards it, depending on the user's answer.
///
/// Responds with a fresh add form and an alert describing what happened.
///
/// The entry is read back from the prompt's hidden inputs, so the prompt is
/// advisory: a client can post a decision without having seen it. The values
/// are validated again before anything is stored.
pub async fn commit_spending_endpoint(
    State(state): State<CreateSpendingState>,
    Form(form): Form<ConfirmationForm>,
) -> Response {
    let today = match local_today(&state.local_timezone) {
        Ok(today) => today,
        Err(error) => return error.into_alert_response(),
    };

    let (form, decision) = form.into_parts();

    let new_spending = match NewSpending::try_from(form) {
        Ok(new_spending) => new_spending,
        Err(error) => {
            tracing::debug!("rejected confirmed spending: {error}");
            return error.into_alert_response();
        }
    };

    let outcome = {
        let connection = match lock_connection(&state.db_connection) {
            Ok(connection) => connection,
            Err(error) => return error.into_alert_response(),
        };

        Interaction::Confirming(new_spending).decide(decision, &connection)
    };

    let alert = match outcome {
        Ok((_, Outcome::Added(spending))) => {
            tracing::info!("added spending {}", spending.id);
            Alert::SuccessSimple {
                message: format!("Added spending: {}", spending.to_new()),
            }
        }
        Ok((_, Outcome::Discarded)) => Alert::Warning {
            message: "Entry not added.".to_owned(),
        },
        Ok((_, outcome)) => {
            tracing::error!("unexpected outcome when adding spending: {outcome:?}");
            return Error::InvalidTransition.into_alert_response();
        }
        Err(error) => {
            tracing::error!("could not add spending: {error}");
            return error.into_alert_response();
        }
    };

    html! {
        (new_spending_form(today))
        (alert.into_oob_html())
    }
    .into_response()
}
