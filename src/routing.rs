//! Application router configuration.

use axum::{
    Router,
    response::Redirect,
    routing::{get, post, put},
};

use crate::{
    AppState, endpoints,
    error_page::{get_404_not_found, get_internal_server_error_page},
    spending::{
        commit_spending_endpoint, confirm_spending_endpoint, get_edit_spending_form,
        get_new_spending_page, get_spending_page, get_summary_page, update_spending_endpoint,
    },
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(endpoints::ROOT, get(get_index_page))
        .route(endpoints::NEW_SPENDING_VIEW, get(get_new_spending_page))
        .route(endpoints::SPENDING_VIEW, get(get_spending_page))
        .route(endpoints::EDIT_SPENDING_VIEW, get(get_edit_spending_form))
        .route(endpoints::SUMMARY_VIEW, get(get_summary_page))
        .route(
            endpoints::INTERNAL_ERROR_VIEW,
            get(get_internal_server_error_page),
        )
        .route(endpoints::CONFIRM_SPENDING, post(confirm_spending_endpoint))
        .route(endpoints::SPENDING_API, post(commit_spending_endpoint))
        .route(endpoints::PUT_SPENDING, put(update_spending_endpoint))
        .fallback(get_404_not_found)
        .with_state(state)
}

/// The root path '/' redirects to the add spending page.
async fn get_index_page() -> Redirect {
    Redirect::to(endpoints::NEW_SPENDING_VIEW)
}
