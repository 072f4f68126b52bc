use shared::{StudentListQuery, StudentListResponse, StudentRecord};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::services::api::ApiClient;
use crate::services::logging::Logger;

#[derive(Clone, PartialEq)]
pub struct StudentsState {
    /// Records currently displayed
    pub students: Vec<StudentRecord>,
    /// Size of the whole collection on the server
    pub total: usize,
    pub loading: bool,
}

/// What a finished fetch leaves on screen
#[derive(Debug, PartialEq)]
struct Settled {
    students: Vec<StudentRecord>,
    total: usize,
    error: Option<String>,
}

/// A failed fetch empties the list and its total, and reports why.
fn settle(result: Result<StudentListResponse, String>) -> Settled {
    match result {
        Ok(response) if response.success => Settled {
            students: response.data,
            total: response.total,
            error: None,
        },
        Ok(_) => Settled {
            students: Vec::new(),
            total: 0,
            error: Some("Failed to load students".to_string()),
        },
        Err(e) => Settled {
            students: Vec::new(),
            total: 0,
            error: Some(format!("Failed to load students: {}", e)),
        },
    }
}

/// Keeps the displayed student list in sync with the server.
///
/// Refetches whenever `query` changes or `reload_tick` is bumped. If several
/// requests overlap, only the latest one updates state.
#[hook]
pub fn use_students(
    api_client: &ApiClient,
    query: StudentListQuery,
    reload_tick: u32,
    on_error: Callback<String>,
) -> StudentsState {
    let students = use_state(Vec::<StudentRecord>::new);
    let total = use_state(|| 0usize);
    let loading = use_state(|| true);
    let latest_request = use_mut_ref(|| 0u32);

    {
        let api_client = api_client.clone();
        let students = students.clone();
        let total = total.clone();
        let loading = loading.clone();

        use_effect_with((query, reload_tick), move |(query, _)| {
            let query = query.clone();
            let request_id = {
                let mut latest = latest_request.borrow_mut();
                *latest = latest.wrapping_add(1);
                *latest
            };
            loading.set(true);

            spawn_local(async move {
                let result = api_client.list_students(&query).await;
                if *latest_request.borrow() != request_id {
                    return;
                }

                let settled = settle(result);
                if let Some(message) = &settled.error {
                    Logger::error_with_component("StudentList", message);
                    on_error.emit(message.clone());
                }
                total.set(settled.total);
                students.set(settled.students);
                loading.set(false);
            });
            || ()
        });
    }

    StudentsState {
        students: (*students).clone(),
        total: *total,
        loading: *loading,
    }
}
