use std::collections::BTreeSet;
use std::rc::Rc;

use shared::{StudentListQuery, StudentStats};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

mod components;
mod hooks;
mod services;

use components::{Alerts, FilterBar, StatsCards, StudentForm, StudentTable, ALL_OPTION};
use hooks::{use_alerts, use_students};
use services::api::ApiClient;
use services::logging::Logger;

const DELETE_CONFIRMATION: &str = "Are you sure you want to delete this student?";

/// Bumped to force the student list to refetch with unchanged filters
#[derive(Default, PartialEq)]
struct ReloadTick(u32);

impl Reducible for ReloadTick {
    type Action = ();

    fn reduce(self: Rc<Self>, _: ()) -> Rc<Self> {
        Rc::new(Self(self.0.wrapping_add(1)))
    }
}

/// Builds the list query from the filter controls; "all" and blanks are omitted.
fn build_query(search: &str, program: &str, gender: &str) -> StudentListQuery {
    let filter_value = |value: &str| {
        let value = value.trim();
        (!value.is_empty() && !value.eq_ignore_ascii_case(ALL_OPTION)).then(|| value.to_string())
    };

    StudentListQuery {
        search: filter_value(search),
        program: filter_value(program),
        gender: filter_value(gender),
    }
}

#[function_component(App)]
fn app() -> Html {
    let api_client = use_memo((), |_| ApiClient::new());
    let api_client = (*api_client).clone();

    // Filter controls. The search box is only applied on Search/Enter.
    let search_input = use_state(String::new);
    let applied_search = use_state(String::new);
    let program_filter = use_state(|| ALL_OPTION.to_string());
    let gender_filter = use_state(|| ALL_OPTION.to_string());
    let reload_tick = use_reducer(ReloadTick::default);

    let known_programs = use_mut_ref(BTreeSet::<String>::new);
    let backend_connected = use_state(|| Option::<bool>::None);

    let alerts = use_alerts();

    let query = build_query(&applied_search, &program_filter, &gender_filter);
    let students = use_students(&api_client, query, reload_tick.0, alerts.show_error.clone());

    known_programs
        .borrow_mut()
        .extend(students.students.iter().map(|s| s.program.clone()));
    let programs: Vec<String> = known_programs.borrow().iter().cloned().collect();

    // Connection check on startup
    {
        let api_client = api_client.clone();
        let backend_connected = backend_connected.clone();
        use_effect_with((), move |_| {
            spawn_local(async move {
                match api_client.health().await {
                    Ok(health) => {
                        Logger::info_with_component("App", &health.message);
                        backend_connected.set(Some(true));
                    }
                    Err(e) => {
                        gloo::console::error!("Failed to connect to backend:", e);
                        backend_connected.set(Some(false));
                    }
                }
            });
            || ()
        });
    }

    let reload = {
        let dispatcher = reload_tick.dispatcher();
        Callback::from(move |_: ()| dispatcher.dispatch(()))
    };

    let on_created = {
        let reload = reload.clone();
        let show_success = alerts.show_success.clone();
        Callback::from(move |message: String| {
            show_success.emit(message);
            reload.emit(());
        })
    };

    let on_delete = {
        let api_client = api_client.clone();
        let reload = reload.clone();
        let show_success = alerts.show_success.clone();
        let show_error = alerts.show_error.clone();
        Callback::from(move |student_id: String| {
            if !gloo::dialogs::confirm(DELETE_CONFIRMATION) {
                return;
            }

            let api_client = api_client.clone();
            let reload = reload.clone();
            let show_success = show_success.clone();
            let show_error = show_error.clone();
            spawn_local(async move {
                match api_client.delete_student(&student_id).await {
                    Ok(message) => {
                        Logger::info_with_component("App", &format!("Deleted student {}", student_id));
                        show_success.emit(message);
                        reload.emit(());
                    }
                    Err(error) => {
                        Logger::warn_with_component("App", &format!("Delete failed: {}", error));
                        show_error.emit(error);
                    }
                }
            });
        })
    };

    let on_search_input = {
        let search_input = search_input.clone();
        Callback::from(move |value: String| search_input.set(value))
    };
    let on_search = {
        let search_input = search_input.clone();
        let applied_search = applied_search.clone();
        let reload = reload.clone();
        Callback::from(move |_: ()| {
            if *applied_search == *search_input {
                reload.emit(());
            } else {
                applied_search.set((*search_input).clone());
            }
        })
    };
    let on_program_change = {
        let program_filter = program_filter.clone();
        Callback::from(move |value: String| program_filter.set(value))
    };
    let on_gender_change = {
        let gender_filter = gender_filter.clone();
        Callback::from(move |value: String| gender_filter.set(value))
    };
    let on_clear = {
        let search_input = search_input.clone();
        let applied_search = applied_search.clone();
        let program_filter = program_filter.clone();
        let gender_filter = gender_filter.clone();
        let reload = reload.clone();
        Callback::from(move |_: ()| {
            search_input.set(String::new());
            applied_search.set(String::new());
            program_filter.set(ALL_OPTION.to_string());
            gender_filter.set(ALL_OPTION.to_string());
            reload.emit(());
        })
    };

    let stats = StudentStats::from_records(&students.students);

    html! {
        <>
            <header class="app-header">
                <h1>{"Student Information Management System"}</h1>
                <span class="connection-status">
                    { match *backend_connected {
                        None => "Checking...".to_string(),
                        Some(true) => format!("Connected to {}", api_client.base_url()),
                        Some(false) => "Connection failed".to_string(),
                    } }
                </span>
            </header>

            <main class="container-fluid">
                <Alerts state={alerts.state.clone()} />
                <StatsCards stats={stats} />

                <div class="row">
                    <section class="col-lg-4">
                        <h2 class="h5">{"Add Student"}</h2>
                        <StudentForm
                            api_client={api_client.clone()}
                            programs={programs.clone()}
                            on_created={on_created}
                            on_error={alerts.show_error.clone()}
                        />
                    </section>

                    <section class="col-lg-8">
                        <FilterBar
                            search_input={(*search_input).clone()}
                            program={(*program_filter).clone()}
                            gender={(*gender_filter).clone()}
                            programs={programs}
                            loading={students.loading}
                            on_search_input={on_search_input}
                            on_search={on_search}
                            on_program_change={on_program_change}
                            on_gender_change={on_gender_change}
                            on_refresh={reload}
                            on_clear={on_clear}
                        />
                        <p class="text-muted small" id="student-count">
                            { format!("Showing {} of {} students", students.students.len(), students.total) }
                        </p>
                        <StudentTable
                            students={students.students.clone()}
                            loading={students.loading}
                            on_delete={on_delete}
                        />
                    </section>
                </div>
            </main>
        </>
    }
}

fn main() {
    yew::Renderer::<App>::new().render();
}
