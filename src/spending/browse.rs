//! The page for browsing spending and choosing an entry to edit.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Query, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use rusqlite::Connection;
use serde::Deserialize;

use crate::{
    AppState, Error,
    app_state::lock_connection,
    endpoints,
    html::{
        BUTTON_PRIMARY_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, LINK_STYLE,
        PAGE_CONTAINER_STYLE, TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE, base,
        format_rupees, rupee_input_styles,
    },
    member::MemberFilter,
    navigation::NavBar,
    spending::{
        Spending, aggregation::filter_by_member, form::member_filter_form, get_all_spending,
    },
};

/// The state needed for the browse spending page.
#[derive(Debug, Clone)]
pub struct BrowseSpendingState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for BrowseSpendingState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// The query string for views that can be filtered by member, e.g. `?member=George`.
#[derive(Debug, Default, Deserialize)]
pub struct MemberFilterQuery {
    #[serde(default)]
    pub member: MemberFilter,
}

/// Render the table of spending with a form for loading an entry into the editor.
pub async fn get_spending_page(
    State(state): State<BrowseSpendingState>,
    Query(query): Query<MemberFilterQuery>,
) -> Result<Response, Error> {
    let spending = {
        let connection = lock_connection(&state.db_connection)?;
        get_all_spending(&connection)
            .inspect_err(|error| tracing::error!("Failed to retrieve spending: {error}"))?
    };

    let spending = filter_by_member(spending, query.member);

    Ok(spending_view(&spending, query.member).into_response())
}

fn spending_view(spending: &[Spending], filter: MemberFilter) -> Markup {
    let nav_bar = NavBar::new(endpoints::SPENDING_VIEW).into_html();

    let content = html! {
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            section class="space-y-6 w-full lg:max-w-5xl"
            {
                header class="flex justify-between flex-wrap items-end"
                {
                    h1 class="text-xl font-bold" { "Spending" }

                    a
                        href=(endpoints::with_member_filter(endpoints::SUMMARY_VIEW, filter.as_str()))
                        class=(LINK_STYLE)
                    {
                        "Summarise"
                    }
                }

                (member_filter_form(endpoints::SPENDING_VIEW, filter))

                (spending_table(spending, false))

                (load_entry_form(filter))

                div id="edit-panel" class="w-full max-w-md" {}
            }
        }
    };

    base("Spending", &[rupee_input_styles()], &content)
}

/// The table listing `spending`.
///
/// Set `swap_oob` to replace the table already on the page when sent
/// alongside another fragment.
pub(super) fn spending_table(spending: &[Spending], swap_oob: bool) -> Markup {
    html! {
        div
            id="spending-table"
            hx-swap-oob=[swap_oob.then_some("true")]
            class="overflow-x-auto w-full dark:bg-gray-800"
        {
            table class="w-full text-sm text-left rtl:text-right text-gray-500 dark:text-gray-400"
            {
                thead class=(TABLE_HEADER_STYLE)
                {
                    tr
                    {
                        th scope="col" class=(TABLE_CELL_STYLE) { "ID" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Member" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Item" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Cost" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Date" }
                    }
                }

                tbody
                {
                    @for entry in spending {
                        tr class=(TABLE_ROW_STYLE)
                        {
                            td class=(TABLE_CELL_STYLE) { (entry.id) }
                            td class=(TABLE_CELL_STYLE) { (entry.member) }
                            td class=(TABLE_CELL_STYLE) { (entry.item) }
                            td class={ (TABLE_CELL_STYLE) " text-right tabular-nums" }
                            {
                                (format_rupees(entry.cost))
                            }
                            td class=(TABLE_CELL_STYLE) { (entry.date) }
                        }
                    }

                    @if spending.is_empty() {
                        tr
                        {
                            td colspan="5" class="px-6 py-4 text-center"
                            {
                                "No spending recorded yet."
                            }
                        }
                    }
                }
            }
        }
    }
}

fn load_entry_form(filter: MemberFilter) -> Markup {
    html! {
        form
            hx-get=(endpoints::EDIT_SPENDING_VIEW)
            hx-target="#edit-panel"
            hx-target-error="#alert-container"
            class="flex items-end gap-2 w-full max-w-md"
        {
            div class="grow"
            {
                label for="id" class=(FORM_LABEL_STYLE) { "Entry ID" }

                input
                    name="id"
                    id="id"
                    type="number"
                    min="1"
                    step="1"
                    placeholder="e.g. 1"
                    required
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            input type="hidden" name="member" value=(filter);

            div
            {
                button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Load Entry" }
            }
        }
    }
}
