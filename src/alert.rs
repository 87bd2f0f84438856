//! Alert system for displaying success, warning and error messages to users.
//!
//! Alerts are either swapped into the page's alert container by htmx
//! (`hx-target-error="#alert-container"`) or sent alongside another fragment
//! as an out-of-band swap with [Alert::into_oob_html].

use axum::response::{Html, IntoResponse, Response};
use maud::{Markup, html};

const ALERT_CONTAINER_ID: &str = "alert-container";

/// A message to show the user after they do something.
#[derive(Debug, Clone, PartialEq)]
pub enum Alert {
    /// The action worked.
    SuccessSimple { message: String },
    /// Nothing went wrong, but the action did not happen.
    Warning { message: String },
    /// The action failed, with extra details.
    Error { message: String, details: String },
    /// The action failed.
    ErrorSimple { message: String },
}

impl Alert {
    pub fn into_html(self) -> Markup {
        let (style, message, details) = match self {
            Alert::SuccessSimple { message } => (SUCCESS_STYLE, message, None),
            Alert::Warning { message } => (WARNING_STYLE, message, None),
            Alert::Error { message, details } => (ERROR_STYLE, message, Some(details)),
            Alert::ErrorSimple { message } => (ERROR_STYLE, message, None),
        };

        html! {
            div role="alert" class=(style)
            {
                div class="flex items-start justify-between gap-4"
                {
                    div
                    {
                        p class="font-semibold" { (message) }

                        @if let Some(details) = details.filter(|details| !details.is_empty()) {
                            p class="mt-1 text-sm" { (details) }
                        }
                    }

                    button
                        type="button"
                        aria-label="Dismiss"
                        class="text-lg leading-none opacity-70 hover:opacity-100"
                        onclick="this.closest('[role=alert]').remove()"
                    {
                        "×"
                    }
                }
            }
        }
    }

    /// Wrap the alert so that htmx swaps it into the alert container
    /// regardless of where the rest of the response is placed.
    pub fn into_oob_html(self) -> Markup {
        html! {
            div id=(ALERT_CONTAINER_ID) hx-swap-oob="true" class=(CONTAINER_STYLE) style=(CONTAINER_POSITION)
            {
                (self.into_html())
            }
        }
    }
}

impl IntoResponse for Alert {
    fn into_response(self) -> Response {
        Html(self.into_html().into_string()).into_response()
    }
}

/// The empty container that alerts are swapped into.
pub fn alert_container() -> Markup {
    html! {
        div id=(ALERT_CONTAINER_ID) class=(CONTAINER_STYLE) style=(CONTAINER_POSITION) {}
    }
}

const CONTAINER_STYLE: &str = "w-full max-w-md px-4";
const CONTAINER_POSITION: &str =
    "position: fixed; bottom: 1rem; left: 50%; transform: translateX(-50%); z-index: 9999;";

const SUCCESS_STYLE: &str = "p-4 mb-4 rounded-lg shadow text-green-800 bg-green-50 \
    border border-green-300 dark:bg-gray-800 dark:text-green-400 dark:border-green-800";
const WARNING_STYLE: &str = "p-4 mb-4 rounded-lg shadow text-yellow-800 bg-yellow-50 \
    border border-yellow-300 dark:bg-gray-800 dark:text-yellow-300 dark:border-yellow-800";
const ERROR_STYLE: &str = "p-4 mb-4 rounded-lg shadow text-red-800 bg-red-50 \
    border border-red-300 dark:bg-gray-800 dark:text-red-400 dark:border-red-800";
