//! Loading a spending entry into the edit form and saving the changes.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Path, Query, State},
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::Form;
use axum_htmx::HxRequest;
use maud::{Markup, html};
use rusqlite::Connection;
use serde::Deserialize;
use time::Date;

use crate::{
    AppState, Error,
    alert::Alert,
    app_state::lock_connection,
    endpoints,
    html::{BUTTON_PRIMARY_STYLE, loading_spinner},
    member::MemberFilter,
    spending::{
        NewSpending, Spending, SpendingId,
        aggregation::filter_by_member,
        browse::spending_table,
        domain::SpendingForm,
        flow::{Interaction, Outcome},
        form::{SpendingFields, spending_form_fields},
        get_all_spending,
    },
};

/// The state needed to edit a spending entry.
#[derive(Debug, Clone)]
pub struct EditSpendingState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for EditSpendingState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// The query string for loading an entry, e.g. `?id=3&member=All`.
#[derive(Debug, Deserialize)]
pub struct LoadSpendingQuery {
    pub id: SpendingId,
    /// The filter applied to the spending table the request came from.
    #[serde(default)]
    pub member: MemberFilter,
}

/// The form data for updating an entry.
#[derive(Debug, Deserialize)]
pub struct EditSpendingForm {
    pub member: String,
    pub item: String,
    pub cost: f64,
    pub date: Date,
    /// The filter applied to the spending table, so that the refreshed table matches.
    #[serde(default)]
    pub filter: MemberFilter,
}

impl EditSpendingForm {
    fn into_parts(self) -> (SpendingForm, MemberFilter) {
        (
            SpendingForm {
                member: self.member,
                item: self.item,
                cost: self.cost,
                date: self.date,
            },
            self.filter,
        )
    }
}

/// A route handler that returns the edit form for the requested entry.
///
/// If there is no entry with the requested ID, a message saying so is
/// returned in place of the form. Requests that were not made by htmx, e.g.
/// the URL was opened directly, are redirected to the browse spending page.
pub async fn get_edit_spending_form(
    State(state): State<EditSpendingState>,
    HxRequest(is_htmx_request): HxRequest,
    Query(query): Query<LoadSpendingQuery>,
) -> Response {
    if !is_htmx_request {
        let browse_url =
            endpoints::with_member_filter(endpoints::SPENDING_VIEW, query.member.as_str());
        return Redirect::to(&browse_url).into_response();
    }

    let loaded = {
        let connection = match lock_connection(&state.db_connection) {
            Ok(connection) => connection,
            Err(error) => return error.into_alert_response(),
        };

        Interaction::Idle.load(query.id, &connection)
    };

    match loaded {
        Ok((_, Outcome::Loaded(spending))) => edit_form(&spending, query.member).into_response(),
        Ok((_, Outcome::NotFound(id))) => html! {
            p id="edit-message" class="text-gray-900 dark:text-white"
            {
                "No entry found with ID " (id)
            }
        }
        .into_response(),
        Ok((_, outcome)) => {
            tracing::error!("unexpected outcome when loading spending: {outcome:?}");
            Error::InvalidTransition.into_alert_response()
        }
        Err(error) => {
            tracing::error!("could not load spending {}: {error}", query.id);
            error.into_alert_response()
        }
    }
}

fn edit_form(spending: &Spending, filter: MemberFilter) -> Markup {
    let update_endpoint = endpoints::format_endpoint(endpoints::PUT_SPENDING, spending.id);
    let spinner = loading_spinner();

    html! {
        form
            hx-put=(update_endpoint)
            hx-target="#edit-panel"
            hx-target-error="#alert-container"
            class="w-full space-y-4 md:space-y-6"
        {
            h2 class="text-xl font-bold" { "Edit Entry " (spending.id) }

            (spending_form_fields(&SpendingFields::from(spending)))

            input type="hidden" name="filter" value=(filter);

            button type="submit" id="submit-button" tabindex="0" class=(BUTTON_PRIMARY_STYLE)
            {
                span id="indicator" class="inline htmx-indicator" { (spinner) }
                " Update Entry"
            }
        }
    }
}

/// A route handler for overwriting a spending entry.
///
/// On success the edit form is cleared and the spending table is refreshed.
pub async fn update_spending_endpoint(
    State(state): State<EditSpendingState>,
    Path(id): Path<SpendingId>,
    Form(form): Form<EditSpendingForm>,
) -> Response {
    let (form, filter) = form.into_parts();

    let new_spending = match NewSpending::try_from(form) {
        Ok(new_spending) => new_spending,
        Err(error) => {
            tracing::debug!("rejected update to spending {id}: {error}");
            return error.into_alert_response();
        }
    };

    let connection = match lock_connection(&state.db_connection) {
        Ok(connection) => connection,
        Err(error) => return error.into_alert_response(),
    };

    let spending = match Interaction::Editing(id).submit(new_spending, &connection) {
        Ok((_, Outcome::Updated(spending))) => spending,
        Ok((_, Outcome::NotFound(id))) => {
            tracing::warn!("tried to update missing spending {id}");
            return Error::UpdateMissingSpending(id).into_alert_response();
        }
        Ok((_, outcome)) => {
            tracing::error!("unexpected outcome when updating spending: {outcome:?}");
            return Error::InvalidTransition.into_alert_response();
        }
        Err(error) => {
            tracing::error!("could not update spending {id}: {error}");
            return error.into_alert_response();
        }
    };

    let all_spending = match get_all_spending(&connection) {
        Ok(all_spending) => all_spending,
        Err(error) => return error.into_alert_response(),
    };
    drop(connection);

    tracing::info!("updated spending {}", spending.id);

    let alert = Alert::SuccessSimple {
        message: format!("Updated spending ID {}: {}", spending.id, spending.to_new()),
    };

    html! {
        p id="edit-message" class="text-gray-900 dark:text-white"
        {
            "Enter an ID to edit another entry."
        }
        (alert.into_oob_html())
        (spending_table(&filter_by_member(all_spending, filter), true))
    }
    .into_response()
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::{
        extract::{Path, Query, State},
        http::StatusCode,
    };
    use axum_extra::extract::Form;
    use axum_htmx::HxRequest;
    use rusqlite::Connection;
    use scraper::Selector;
    use time::macros::date;

    use crate::{
        db::initialize,
        member::{Member, MemberFilter},
        spending::{
            ItemName, NewSpending, Spending, add_spending,
            edit::{
                EditSpendingForm, EditSpendingState, LoadSpendingQuery, get_edit_spending_form,
                update_spending_endpoint,
            },
            get_all_spending, get_spending,
        },
        test_utils::{
            assert_form_input_with_value, assert_hidden_input, assert_hx_endpoint,
            assert_selected_option, assert_status_ok, assert_valid_html, must_get_form,
            parse_html_fragment, table_rows,
        },
    };

    fn get_test_state() -> (EditSpendingState, Spending) {
        let connection = Connection::open_in_memory().unwrap();
        initialize(&connection).unwrap();
        let spending = add_spending(
            NewSpending::new(
                Member::George,
                ItemName::new_unchecked("Feed"),
                250.0,
                date!(2024 - 01 - 01),
            )
            .unwrap(),
            &connection,
        )
        .unwrap();

        (
            EditSpendingState {
                db_connection: Arc::new(Mutex::new(connection)),
            },
            spending,
        )
    }

    fn edit_form(cost: f64, filter: MemberFilter) -> EditSpendingForm {
        EditSpendingForm {
            member: "George".to_owned(),
            item: "Feed".to_owned(),
            cost,
            date: date!(2024 - 01 - 01),
            filter,
        }
    }

    #[tokio::test]
    async fn load_returns_prefilled_form() {
        let (state, spending) = get_test_state();

        let response = get_edit_spending_form(
            State(state),
            HxRequest(true),
            Query(LoadSpendingQuery {
                id: spending.id,
                member: MemberFilter::Only(Member::George),
            }),
        )
        .await;

        assert_status_ok(&response);
        let html = parse_html_fragment(response).await;
        assert_valid_html(&html);
        let form = must_get_form(&html);
        assert_hx_endpoint(&form, &format!("/api/spending/{}", spending.id), "hx-put");
        assert_selected_option(&form, "member", "George");
        assert_form_input_with_value(&form, "item", "text", "Feed");
        assert_form_input_with_value(&form, "cost", "number", "250");
        assert_form_input_with_value(&form, "date", "date", "2024-01-01");
        assert_hidden_input(&form, "filter", "George");
    }

    #[tokio::test]
    async fn load_missing_entry_says_so() {
        let (state, _) = get_test_state();

        let response = get_edit_spending_form(
            State(state),
            HxRequest(true),
            Query(LoadSpendingQuery {
                id: 42,
                member: MemberFilter::All,
            }),
        )
        .await;

        assert_status_ok(&response);
        let html = parse_html_fragment(response).await;
        let message = html
            .select(&Selector::parse("#edit-message").unwrap())
            .next()
            .expect("No message found")
            .text()
            .collect::<String>();
        assert_eq!(message.trim(), "No entry found with ID 42");
        assert!(html.select(&Selector::parse("form").unwrap()).next().is_none());
    }

    #[tokio::test]
    async fn load_outside_htmx_redirects_to_browse_page() {
        let (state, spending) = get_test_state();

        let response = get_edit_spending_form(
            State(state),
            HxRequest(false),
            Query(LoadSpendingQuery {
                id: spending.id,
                member: MemberFilter::Only(Member::Poondi),
            }),
        )
        .await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            response.headers().get("location").unwrap(),
            "/spending?member=Poondi"
        );
    }

    #[tokio::test]
    async fn update_overwrites_entry_and_refreshes_table() {
        let (state, spending) = get_test_state();

        let response = update_spending_endpoint(
            State(state.clone()),
            Path(spending.id),
            Form(edit_form(300.0, MemberFilter::All)),
        )
        .await;

        assert_status_ok(&response);
        let html = parse_html_fragment(response).await;
        let alert = html
            .select(&Selector::parse("#alert-container [role=alert]").unwrap())
            .next()
            .expect("No alert found")
            .text()
            .collect::<String>();
        assert!(
            alert.contains(&format!(
                "Updated spending ID {}: George spent ₹300 on Feed on 2024-01-01",
                spending.id
            )),
            "got {alert:?}"
        );
        let table = html
            .select(&Selector::parse("#spending-table").unwrap())
            .next()
            .expect("No table found");
        assert_eq!(table.value().attr("hx-swap-oob"), Some("true"));
        assert_eq!(
            table_rows(&html, "#spending-table"),
            [[
                spending.id.to_string().as_str(),
                "George",
                "Feed",
                "₹300",
                "2024-01-01"
            ]]
        );

        let connection = state.db_connection.lock().unwrap();
        let got = get_spending(spending.id, &connection).unwrap().unwrap();
        assert_eq!(got.cost, 300.0);
    }

    #[tokio::test]
    async fn refreshed_table_keeps_filter() {
        let (state, spending) = get_test_state();

        let response = update_spending_endpoint(
            State(state),
            Path(spending.id),
            Form(edit_form(300.0, MemberFilter::Only(Member::Poondi))),
        )
        .await;

        let html = parse_html_fragment(response).await;
        assert_eq!(
            table_rows(&html, "#spending-table"),
            [["No spending recorded yet."]]
        );
    }

    #[tokio::test]
    async fn update_missing_entry_is_not_found() {
        let (state, _) = get_test_state();
        let before = get_all_spending(&state.db_connection.lock().unwrap()).unwrap();

        let response = update_spending_endpoint(
            State(state.clone()),
            Path(999),
            Form(edit_form(300.0, MemberFilter::All)),
        )
        .await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let html = parse_html_fragment(response).await;
        let text = html.root_element().text().collect::<String>();
        assert!(text.contains("No entry found with ID 999"), "got {text:?}");
        let after = get_all_spending(&state.db_connection.lock().unwrap()).unwrap();
        assert_eq!(before, after);
    }

    #[tokio::test]
    async fn update_with_negative_cost_is_rejected() {
        let (state, spending) = get_test_state();

        let response = update_spending_endpoint(
            State(state.clone()),
            Path(spending.id),
            Form(edit_form(-5.0, MemberFilter::All)),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let connection = state.db_connection.lock().unwrap();
        assert_eq!(get_spending(spending.id, &connection), Ok(Some(spending)));
    }
}
