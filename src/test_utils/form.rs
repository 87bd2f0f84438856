use scraper::{ElementRef, Html, Selector};

#[track_caller]
pub(crate) fn must_get_form(html: &Html) -> ElementRef<'_> {
    html.select(&Selector::parse("form").unwrap())
        .next()
        .expect("No form found")
}

#[track_caller]
pub(crate) fn assert_hx_endpoint(form: &ElementRef<'_>, endpoint: &str, attribute: &str) {
    let got = form
        .value()
        .attr(attribute)
        .unwrap_or_else(|| panic!("{attribute} attribute missing"));

    assert_eq!(
        got, endpoint,
        "want form with attribute {attribute}=\"{endpoint}\", got {got:?}"
    );
}

#[track_caller]
fn must_get_input<'a>(form: &ElementRef<'a>, name: &str) -> ElementRef<'a> {
    let selector = Selector::parse(&format!("input[name=\"{name}\"]")).unwrap();

    form.select(&selector)
        .next()
        .unwrap_or_else(|| panic!("No input found with name \"{name}\""))
}

/// Check that the form has a required input called `name` of type `type_`.
#[track_caller]
pub(crate) fn assert_form_input(form: &ElementRef<'_>, name: &str, type_: &str) {
    let input = must_get_input(form, name);
    let input_type = input.value().attr("type").unwrap_or_default();

    assert_eq!(
        input_type, type_,
        "want input {name} with type \"{type_}\", got {input_type:?}"
    );
    assert!(
        input.value().attr("required").is_some(),
        "want input with name {name} to have the required attribute but got none"
    );
}

/// Like [assert_form_input], but also checks the input's initial value.
#[track_caller]
pub(crate) fn assert_form_input_with_value(
    form: &ElementRef<'_>,
    name: &str,
    type_: &str,
    value: &str,
) {
    assert_form_input(form, name, type_);

    let input_value = must_get_input(form, name)
        .value()
        .attr("value")
        .unwrap_or_default();

    assert_eq!(
        input_value, value,
        "want input {name} with value \"{value}\", got {input_value:?}"
    );
}

#[track_caller]
pub(crate) fn assert_hidden_input(form: &ElementRef<'_>, name: &str, value: &str) {
    let input = must_get_input(form, name);

    assert_eq!(input.value().attr("type"), Some("hidden"));
    assert_eq!(
        input.value().attr("value"),
        Some(value),
        "want hidden input {name} with value \"{value}\""
    );
}

#[track_caller]
fn must_get_select<'a>(form: &ElementRef<'a>, name: &str) -> ElementRef<'a> {
    let selector = Selector::parse(&format!("select[name=\"{name}\"]")).unwrap();

    form.select(&selector)
        .next()
        .unwrap_or_else(|| panic!("No select found with name \"{name}\""))
}

/// Check the values of a dropdown's options, in order.
#[track_caller]
pub(crate) fn assert_select_options(form: &ElementRef<'_>, name: &str, want: &[&str]) {
    let select = must_get_select(form, name);
    let got = select
        .select(&Selector::parse("option").unwrap())
        .map(|option| option.value().attr("value").unwrap_or_default())
        .collect::<Vec<_>>();

    assert_eq!(got, want, "unexpected options for select {name}");
}

#[track_caller]
pub(crate) fn assert_selected_option(form: &ElementRef<'_>, name: &str, want: &str) {
    let select = must_get_select(form, name);
    let selected = select
        .select(&Selector::parse("option[selected]").unwrap())
        .map(|option| option.value().attr("value").unwrap_or_default())
        .collect::<Vec<_>>();

    assert_eq!(selected, [want], "unexpected selection for select {name}");
}
