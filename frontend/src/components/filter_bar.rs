use shared::Gender;
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

/// Select value meaning "no filter"
pub const ALL_OPTION: &str = "all";

#[derive(Properties, PartialEq)]
pub struct FilterBarProps {
    /// Text currently in the search box (not yet applied)
    pub search_input: String,
    pub program: String,
    pub gender: String,
    /// Programs offered in the program filter
    pub programs: Vec<String>,
    pub loading: bool,
    pub on_search_input: Callback<String>,
    /// Apply the search box contents
    pub on_search: Callback<()>,
    pub on_program_change: Callback<String>,
    pub on_gender_change: Callback<String>,
    pub on_refresh: Callback<()>,
    pub on_clear: Callback<()>,
}

#[function_component(FilterBar)]
pub fn filter_bar(props: &FilterBarProps) -> Html {
    let on_input = {
        let on_search_input = props.on_search_input.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            on_search_input.emit(input.value());
        })
    };

    let on_keyup = {
        let on_search = props.on_search.clone();
        Callback::from(move |e: KeyboardEvent| {
            if e.key() == "Enter" {
                on_search.emit(());
            }
        })
    };

    let select_handler = |callback: &Callback<String>| {
        let callback = callback.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            callback.emit(select.value());
        })
    };

    let on_search_click = props.on_search.reform(|_: MouseEvent| ());
    let on_refresh_click = props.on_refresh.reform(|_: MouseEvent| ());
    let on_clear_click = props.on_clear.reform(|_: MouseEvent| ());

    html! {
        <div class="row g-2 mb-3 filter-bar">
            <div class="col-md-4">
                <div class="input-group">
                    <input id="search-input" type="text" class="form-control"
                        placeholder="Search by name, ID or email"
                        value={props.search_input.clone()} oninput={on_input} onkeyup={on_keyup} />
                    <button id="search-btn" class="btn btn-outline-primary" type="button" onclick={on_search_click}>
                        {"Search"}
                    </button>
                </div>
            </div>
            <div class="col-md-3">
                <select id="program-filter" class="form-select" onchange={select_handler(&props.on_program_change)}>
                    <option value={ALL_OPTION} selected={props.program == ALL_OPTION}>{"All Programs"}</option>
                    { for props.programs.iter().map(|p| html! {
                        <option value={p.clone()} selected={props.program == *p}>{ p.clone() }</option>
                    }) }
                </select>
            </div>
            <div class="col-md-2">
                <select id="gender-filter" class="form-select" onchange={select_handler(&props.on_gender_change)}>
                    <option value={ALL_OPTION} selected={props.gender == ALL_OPTION}>{"All Genders"}</option>
                    { for Gender::ALL.iter().map(|g| html! {
                        <option value={g.as_str()} selected={props.gender == g.as_str()}>{ g.as_str() }</option>
                    }) }
                </select>
            </div>
            <div class="col-md-3 d-flex gap-2">
                <button id="refresh-btn" class="btn btn-outline-secondary" type="button"
                    onclick={on_refresh_click} disabled={props.loading}>
                    { if props.loading { "Refreshing..." } else { "Refresh" } }
                </button>
                <button id="clear-filters" class="btn btn-outline-secondary" type="button"
                    onclick={on_clear_click} disabled={props.loading}>
                    {"Clear Filters"}
                </button>
            </div>
        </div>
    }
}
