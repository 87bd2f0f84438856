//! Full-page responses for missing pages and internal server errors.

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use maud::html;

use crate::{
    endpoints,
    html::{BUTTON_PRIMARY_STYLE, base},
};

/// A page explaining that something went wrong, with a hint on how to fix it.
pub struct ErrorPage<'a> {
    pub status: StatusCode,
    pub description: &'a str,
    pub fix: &'a str,
}

impl<'a> ErrorPage<'a> {
    /// The page shown when a route or resource does not exist.
    pub fn not_found() -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            description: "Something's missing.",
            fix: "Sorry, we can't find that page. Head back to add some spending instead.",
        }
    }

    /// The page shown when the server could not handle a request.
    pub fn internal(description: &'a str, fix: &'a str) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            description,
            fix,
        }
    }
}

impl Default for ErrorPage<'_> {
    fn default() -> Self {
        Self::internal(
            "Sorry, something went wrong.",
            "Try again later or check the server logs",
        )
    }
}

impl IntoResponse for ErrorPage<'_> {
    fn into_response(self) -> Response {
        let title = if self.status == StatusCode::NOT_FOUND {
            "Not Found"
        } else {
            "Internal Server Error"
        };

        let content = html! {
            main class="flex flex-col items-center gap-4 px-4 py-16 mx-auto max-w-screen-sm text-center text-gray-900 dark:text-white"
            {
                h1 class="text-7xl lg:text-9xl font-extrabold tracking-tight text-blue-600 dark:text-blue-500"
                {
                    (self.status.as_str())
                }

                p class="text-3xl md:text-4xl font-bold" { (self.description) }

                p class="text-xl md:text-2xl" { (self.fix) }

                a href=(endpoints::NEW_SPENDING_VIEW) class={ (BUTTON_PRIMARY_STYLE) " max-w-xs" }
                {
                    "Back to Add Spending"
                }
            }
        };

        let markup = base(title, &[], &content);

        (self.status, Html(markup.into_string())).into_response()
    }
}

pub async fn get_404_not_found() -> Response {
    ErrorPage::not_found().into_response()
}

pub async fn get_internal_server_error_page() -> Response {
    ErrorPage::default().into_response()
}
