//! Markup shared by the add, edit, browse and summary views.

use maud::{Markup, html};
use time::Date;

use crate::{
    html::{BUTTON_SECONDARY_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE},
    member::{Member, MemberFilter},
    spending::{NewSpending, Spending, domain::MAX_COST},
};

/// The values the spending form fields start with.
#[derive(Debug, Clone, PartialEq)]
pub(super) struct SpendingFields<'a> {
    pub member: Option<Member>,
    pub item: &'a str,
    pub cost: Option<f64>,
    pub date: Date,
}

impl<'a> SpendingFields<'a> {
    /// Empty fields with the date set to `today`.
    pub fn blank(today: Date) -> Self {
        Self {
            member: None,
            item: "",
            cost: None,
            date: today,
        }
    }
}

impl<'a> From<&'a Spending> for SpendingFields<'a> {
    fn from(spending: &'a Spending) -> Self {
        Self {
            member: Some(spending.member),
            item: spending.item.as_ref(),
            cost: Some(spending.cost),
            date: spending.date,
        }
    }
}

/// The member, item, cost and date inputs.
pub(super) fn spending_form_fields(fields: &SpendingFields<'_>) -> Markup {
    html! {
        div
        {
            label for="member" class=(FORM_LABEL_STYLE) { "Member" }

            select name="member" id="member" required class=(FORM_TEXT_INPUT_STYLE)
            {
                @for member in Member::ALL {
                    option value=(member) selected[fields.member == Some(member)] { (member) }
                }
            }
        }

        div
        {
            label for="item" class=(FORM_LABEL_STYLE) { "Item" }

            input
                name="item"
                id="item"
                type="text"
                placeholder="e.g. Feed"
                value=(fields.item)
                required
                class=(FORM_TEXT_INPUT_STYLE);
        }

        div
        {
            label for="cost" class=(FORM_LABEL_STYLE) { "Cost" }

            // w-full needed to ensure input takes the full width when prefilled with a value
            div class="input-wrapper w-full"
            {
                input
                    name="cost"
                    id="cost"
                    type="number"
                    min="0"
                    max=(MAX_COST)
                    step="0.1"
                    placeholder="0"
                    value=[fields.cost]
                    required
                    class=(FORM_TEXT_INPUT_STYLE);
            }
        }

        div
        {
            label for="date" class=(FORM_LABEL_STYLE) { "Date" }

            input
                name="date"
                id="date"
                type="date"
                value=(fields.date)
                required
                class=(FORM_TEXT_INPUT_STYLE);
        }
    }
}

/// Hidden inputs that send `new_spending` back to the server unchanged.
pub(super) fn hidden_spending_fields(new_spending: &NewSpending) -> Markup {
    html! {
        input type="hidden" name="member" value=(new_spending.member);
        input type="hidden" name="item" value=(new_spending.item);
        input type="hidden" name="cost" value=(new_spending.cost);
        input type="hidden" name="date" value=(new_spending.date);
    }
}

/// A GET form that reloads `action` showing only the spending for the chosen member.
pub(super) fn member_filter_form(action: &str, selected: MemberFilter) -> Markup {
    html! {
        form method="get" action=(action) class="flex items-end gap-2 w-full max-w-md"
        {
            div class="grow"
            {
                label for="member-filter" class=(FORM_LABEL_STYLE) { "Filter by member" }

                select name="member" id="member-filter" class=(FORM_TEXT_INPUT_STYLE)
                {
                    @for option in MemberFilter::options() {
                        option value=(option) selected[option == selected] { (option) }
                    }
                }
            }

            div
            {
                button type="submit" class=(BUTTON_SECONDARY_STYLE) { "Filter" }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use maud::html;
    use scraper::{Html, Selector};
    use time::macros::date;

    use crate::{
        member::{Member, MemberFilter},
        spending::{ItemName, Spending},
        test_utils::{
            assert_form_input, assert_form_input_with_value, assert_select_options,
            assert_selected_option, must_get_form,
        },
    };

    use super::{SpendingFields, member_filter_form, spending_form_fields};

    fn render_in_form(fields: &SpendingFields<'_>) -> Html {
        let markup = html! { form { (spending_form_fields(fields)) } };
        Html::parse_fragment(&markup.into_string())
    }

    #[test]
    fn blank_fields_default_to_today() {
        let html = render_in_form(&SpendingFields::blank(date!(2024 - 03 - 09)));
        let form = must_get_form(&html);

        assert_select_options(&form, "member", &["George", "Lourdumary", "Poondi"]);
        assert_form_input(&form, "item", "text");
        assert_form_input(&form, "cost", "number");
        assert_form_input_with_value(&form, "date", "date", "2024-03-09");
    }

    #[test]
    fn cost_input_is_bounded() {
        let html = render_in_form(&SpendingFields::blank(date!(2024 - 03 - 09)));
        let cost = html
            .select(&Selector::parse("input[name=cost]").unwrap())
            .next()
            .expect("No cost input found");

        assert_eq!(cost.value().attr("min"), Some("0"));
        assert_eq!(cost.value().attr("max"), Some("1000000000000"));
        assert_eq!(cost.value().attr("step"), Some("0.1"));
        assert_eq!(cost.value().attr("value"), None);
    }

    #[test]
    fn fields_from_spending_are_prefilled() {
        let spending = Spending {
            id: 3,
            member: Member::Lourdumary,
            item: ItemName::new_unchecked("Vaccine"),
            cost: 120.5,
            date: date!(2024 - 02 - 14),
        };

        let html = render_in_form(&SpendingFields::from(&spending));
        let form = must_get_form(&html);

        assert_selected_option(&form, "member", "Lourdumary");
        assert_form_input_with_value(&form, "item", "text", "Vaccine");
        assert_form_input_with_value(&form, "cost", "number", "120.5");
        assert_form_input_with_value(&form, "date", "date", "2024-02-14");
    }

    #[test]
    fn filter_form_lists_all_then_members() {
        let markup = member_filter_form("/summary", MemberFilter::Only(Member::Poondi));
        let html = Html::parse_fragment(&markup.into_string());
        let form = must_get_form(&html);

        assert_eq!(form.value().attr("method"), Some("get"));
        assert_eq!(form.value().attr("action"), Some("/summary"));
        assert_select_options(&form, "member", &["All", "George", "Lourdumary", "Poondi"]);
        assert_selected_option(&form, "member", "Poondi");
    }
}
