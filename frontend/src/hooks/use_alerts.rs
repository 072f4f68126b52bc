use std::cell::RefCell;
use std::rc::Rc;

use gloo::timers::future::TimeoutFuture;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

/// How long an alert stays on screen
const ALERT_DURATION_MS: u32 = 5_000;

#[derive(Clone, PartialEq)]
pub struct AlertsState {
    pub success: Option<String>,
    pub error: Option<String>,
}

pub struct UseAlertsResult {
    pub state: AlertsState,
    pub show_success: Callback<String>,
    pub show_error: Callback<String>,
}

/// Transient success/error banners. A newer alert of the same kind replaces
/// the older one and restarts its timer.
#[hook]
pub fn use_alerts() -> UseAlertsResult {
    let success = use_state(|| Option::<String>::None);
    let error = use_state(|| Option::<String>::None);
    let success_generation = use_mut_ref(|| 0u32);
    let error_generation = use_mut_ref(|| 0u32);

    let show_success = {
        let success = success.clone();
        let generation = success_generation.clone();
        use_callback((), move |message: String, _| {
            show_for_a_while(success.clone(), generation.clone(), message);
        })
    };

    let show_error = {
        let error = error.clone();
        let generation = error_generation.clone();
        use_callback((), move |message: String, _| {
            show_for_a_while(error.clone(), generation.clone(), message);
        })
    };

    UseAlertsResult {
        state: AlertsState {
            success: (*success).clone(),
            error: (*error).clone(),
        },
        show_success,
        show_error,
    }
}

fn show_for_a_while(
    slot: UseStateHandle<Option<String>>,
    generation: Rc<RefCell<u32>>,
    message: String,
) {
    let current = {
        let mut counter = generation.borrow_mut();
        *counter = counter.wrapping_add(1);
        *counter
    };
    slot.set(Some(message));

    spawn_local(async move {
        TimeoutFuture::new(ALERT_DURATION_MS).await;
        if *generation.borrow() == current {
            slot.set(None);
        }
    });
}
