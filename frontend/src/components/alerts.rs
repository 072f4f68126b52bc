use yew::prelude::*;

use crate::hooks::AlertsState;

#[derive(Properties, PartialEq)]
pub struct AlertsProps {
    pub state: AlertsState,
}

#[function_component(Alerts)]
pub fn alerts(props: &AlertsProps) -> Html {
    html! {
        <>
            { if let Some(message) = &props.state.success {
                html! { <div class="alert alert-success" role="alert">{ message.clone() }</div> }
            } else {
                html! {}
            } }
            { if let Some(message) = &props.state.error {
                html! { <div class="alert alert-danger" role="alert">{ message.clone() }</div> }
            } else {
                html! {}
            } }
        </>
    }
}
