//! The page that shows how much each member has spent.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Query, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    app_state::lock_connection,
    endpoints,
    html::{
        LINK_STYLE, PAGE_CONTAINER_STYLE, TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE,
        base, format_rupees,
    },
    member::MemberFilter,
    navigation::NavBar,
    spending::{
        aggregation::{SpendingSummary, filter_by_member, summarize},
        browse::MemberFilterQuery,
        form::member_filter_form,
        get_all_spending,
    },
};

/// The state needed for the summary page.
#[derive(Debug, Clone)]
pub struct SummaryPageState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for SummaryPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Render the per-member totals for the spending that passes the member filter.
pub async fn get_summary_page(
    State(state): State<SummaryPageState>,
    Query(query): Query<MemberFilterQuery>,
) -> Result<Response, Error> {
    let spending = {
        let connection = lock_connection(&state.db_connection)?;
        get_all_spending(&connection)
            .inspect_err(|error| tracing::error!("Failed to retrieve spending: {error}"))?
    };

    let summary = summarize(&filter_by_member(spending, query.member));

    Ok(summary_view(&summary, query.member).into_response())
}

fn summary_view(summary: &SpendingSummary, filter: MemberFilter) -> Markup {
    let nav_bar = NavBar::new(endpoints::SUMMARY_VIEW).into_html();

    let content = html! {
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            section class="space-y-6 w-full lg:max-w-3xl"
            {
                header class="flex justify-between flex-wrap items-end"
                {
                    h1 class="text-xl font-bold" { "Summary" }

                    a
                        href=(endpoints::with_member_filter(endpoints::SPENDING_VIEW, filter.as_str()))
                        class=(LINK_STYLE)
                    {
                        "View these entries"
                    }
                }

                (member_filter_form(endpoints::SUMMARY_VIEW, filter))

                div class="overflow-x-auto w-full dark:bg-gray-800"
                {
                    table id="summary-table" class="w-full text-sm text-left rtl:text-right text-gray-500 dark:text-gray-400"
                    {
                        thead class=(TABLE_HEADER_STYLE)
                        {
                            tr
                            {
                                th scope="col" class=(TABLE_CELL_STYLE) { "#" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Member" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Cost" }
                            }
                        }

                        tbody
                        {
                            @for (index, member_total) in summary.totals.iter().enumerate() {
                                tr class=(TABLE_ROW_STYLE)
                                {
                                    td class=(TABLE_CELL_STYLE) { (index + 1) }
                                    td class=(TABLE_CELL_STYLE) { (member_total.member) }
                                    td class={ (TABLE_CELL_STYLE) " text-right tabular-nums" }
                                    {
                                        (format_rupees(member_total.total))
                                    }
                                }
                            }

                            @if summary.totals.is_empty() {
                                tr
                                {
                                    td colspan="3" class="px-6 py-4 text-center"
                                    {
                                        "No spending recorded yet."
                                    }
                                }
                            }
                        }
                    }
                }

                p id="grand-total" class="text-lg font-semibold"
                {
                    "Total Cost Spent: " (format_rupees(summary.grand_total))
                }
            }
        }
    };

    base("Summary", &[], &content)
}
