//! The navigation bar shared by the add, browse and summary views.

use maud::{Markup, html};

use crate::endpoints;

/// The views listed in the navigation bar, in display order.
const VIEWS: [(&str, &str); 3] = [
    (endpoints::NEW_SPENDING_VIEW, "Add Spending"),
    (endpoints::SPENDING_VIEW, "View/Edit Spending"),
    (endpoints::SUMMARY_VIEW, "Summary & Filter"),
];

/// Where a link is shown: the top bar on large screens or the bottom bar on small screens.
#[derive(Clone, Copy)]
enum Placement {
    Top,
    Bottom,
}

const TOP_LINK_STYLE: &str = "block py-2 px-3 rounded-sm lg:p-0 text-gray-900 \
    hover:bg-gray-100 lg:hover:bg-transparent lg:hover:text-blue-700 \
    dark:text-white lg:dark:hover:text-blue-500 dark:hover:bg-gray-700";
const TOP_LINK_CURRENT_STYLE: &str = "block py-2 px-3 rounded-sm lg:p-0 text-white \
    bg-blue-700 lg:bg-transparent lg:text-blue-700 lg:dark:text-blue-500";
const BOTTOM_LINK_STYLE: &str = "flex w-full min-w-0 items-center justify-center \
    rounded-lg px-2.5 py-2 text-xs font-semibold text-gray-600 sm:text-sm \
    hover:text-blue-700 dark:text-gray-300 dark:hover:text-blue-200";
const BOTTOM_LINK_CURRENT_STYLE: &str = "flex w-full min-w-0 items-center justify-center \
    rounded-lg px-2.5 py-2 text-xs font-semibold sm:text-sm bg-blue-50 \
    text-blue-700 shadow-sm dark:bg-blue-900/30 dark:text-blue-200";

impl Placement {
    fn link_style(self, is_current: bool) -> &'static str {
        match (self, is_current) {
            (Placement::Top, false) => TOP_LINK_STYLE,
            (Placement::Top, true) => TOP_LINK_CURRENT_STYLE,
            (Placement::Bottom, false) => BOTTOM_LINK_STYLE,
            (Placement::Bottom, true) => BOTTOM_LINK_CURRENT_STYLE,
        }
    }
}

/// The links to each view, with the view being shown highlighted.
pub struct NavBar<'a> {
    active_endpoint: &'a str,
}

impl NavBar<'_> {
    /// Create the navigation bar for the view at `active_endpoint`.
    ///
    /// If no link matches `active_endpoint`, no link is highlighted.
    pub fn new(active_endpoint: &str) -> NavBar<'_> {
        NavBar { active_endpoint }
    }

    fn links(&self, placement: Placement) -> Markup {
        html! {
            @for (url, title) in VIEWS {
                @let is_current = url == self.active_endpoint;

                li class="min-w-0"
                {
                    a href=(url) class=(placement.link_style(is_current)) aria-current=[is_current.then_some("page")]
                    {
                        span class="truncate" { (title) }
                    }
                }
            }
        }
    }

    pub fn into_html(self) -> Markup {
        html!(
            nav class="bg-white border-gray-200 dark:bg-gray-900"
            {
                div class="max-w-screen-xl flex flex-wrap items-center justify-between mx-auto p-4"
                {
                    a href=(endpoints::ROOT) class="flex items-center gap-3"
                    {
                        span class="text-2xl" { "🐔" }
                        span class="text-2xl font-semibold whitespace-nowrap dark:text-white"
                        {
                            "Poultry Spending Tracker"
                        }
                    }

                    ul class="hidden lg:flex lg:flex-row lg:gap-8 font-medium"
                    {
                        (self.links(Placement::Top))
                    }
                }
            }

            // Small screens get a tab bar fixed to the bottom of the screen instead.
            nav class="fixed inset-x-0 bottom-0 z-40 lg:hidden"
            {
                ul
                    class="grid grid-cols-3 gap-2 m-4 px-4 py-3 rounded-xl border
                        border-gray-200 bg-white/95 shadow-lg dark:border-gray-700
                        dark:bg-gray-900/95"
                    aria-label="Primary"
                {
                    (self.links(Placement::Bottom))
                }
            }
        )
    }
}
