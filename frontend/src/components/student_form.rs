use std::collections::HashMap;

use shared::{
    validate_student, Gender, NewStudentRequest, StudentField, ValidationError, YearLevel,
    DUPLICATE_ID_MESSAGE,
};
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

use crate::services::api::ApiClient;
use crate::services::logging::Logger;

/// Raw form contents, exactly as typed
#[derive(Clone, Default, PartialEq)]
pub struct StudentFormFields {
    pub id: String,
    pub full_name: String,
    /// `None` until a radio button is picked
    pub gender: Option<Gender>,
    pub email: String,
    pub program: String,
    /// Empty until an option is picked
    pub year_level: String,
    pub university: String,
}

impl StudentFormFields {
    pub fn to_request(&self) -> NewStudentRequest {
        NewStudentRequest {
            id: Some(self.id.clone()),
            full_name: Some(self.full_name.clone()),
            gender: self.gender.map(|g| g.as_str().to_string()),
            email: Some(self.email.clone()),
            program: Some(self.program.clone()),
            year_level: Some(self.year_level.clone()).filter(|y| !y.is_empty()),
            university: Some(self.university.clone()),
        }
    }
}

/// First message per invalid field, for the feedback text under each input
pub fn field_feedback(errors: &[ValidationError]) -> HashMap<StudentField, String> {
    let mut feedback = HashMap::new();
    for error in errors {
        feedback.entry(error.field()).or_insert_with(|| error.to_string());
    }
    feedback
}

/// Field-level feedback for a failed submission reported by the server
pub fn server_error_feedback(error: &str) -> HashMap<StudentField, String> {
    let mut feedback = HashMap::new();
    if error.contains(DUPLICATE_ID_MESSAGE) {
        feedback.insert(StudentField::Id, format!("{}.", DUPLICATE_ID_MESSAGE));
    }
    feedback
}

#[derive(Properties, PartialEq)]
pub struct StudentFormProps {
    pub api_client: ApiClient,
    /// Known programs, offered as suggestions
    pub programs: Vec<String>,
    /// Called with the server's success message after a student is stored
    pub on_created: Callback<String>,
    pub on_error: Callback<String>,
}

#[function_component(StudentForm)]
pub fn student_form(props: &StudentFormProps) -> Html {
    let fields = use_state(StudentFormFields::default);
    let feedback = use_state(HashMap::<StudentField, String>::new);
    let is_submitting = use_state(|| false);

    let text_input = |update: fn(&mut StudentFormFields, String)| {
        let fields = fields.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let mut next = (*fields).clone();
            update(&mut next, input.value());
            fields.set(next);
        })
    };
    let on_id_input = text_input(|f, v| f.id = v);
    let on_name_input = text_input(|f, v| f.full_name = v);
    let on_email_input = text_input(|f, v| f.email = v);
    let on_program_input = text_input(|f, v| f.program = v);
    let on_university_input = text_input(|f, v| f.university = v);

    let on_year_change = {
        let fields = fields.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            let mut next = (*fields).clone();
            next.year_level = select.value();
            fields.set(next);
        })
    };

    let on_gender_change = |gender: Gender| {
        let fields = fields.clone();
        Callback::from(move |_: Event| {
            let mut next = (*fields).clone();
            next.gender = Some(gender);
            fields.set(next);
        })
    };

    let on_submit = {
        let fields = fields.clone();
        let feedback = feedback.clone();
        let is_submitting = is_submitting.clone();
        let api_client = props.api_client.clone();
        let on_created = props.on_created.clone();
        let on_error = props.on_error.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if *is_submitting {
                return;
            }

            let request = fields.to_request();
            let errors = validate_student(&request);
            if !errors.is_empty() {
                feedback.set(field_feedback(&errors));
                return;
            }

            feedback.set(HashMap::new());
            is_submitting.set(true);

            let fields = fields.clone();
            let feedback = feedback.clone();
            let is_submitting = is_submitting.clone();
            let api_client = api_client.clone();
            let on_created = on_created.clone();
            let on_error = on_error.clone();

            spawn_local(async move {
                match api_client.create_student(&request).await {
                    Ok((student, message)) => {
                        Logger::info_with_component("StudentForm", &format!("Added student {}", student.id));
                        fields.set(StudentFormFields::default());
                        on_created.emit(message);
                    }
                    Err(error) => {
                        Logger::warn_with_component("StudentForm", &format!("Add failed: {}", error));
                        feedback.set(server_error_feedback(&error));
                        on_error.emit(error);
                    }
                }
                is_submitting.set(false);
            });
        })
    };

    let input_class = |field: StudentField| {
        if feedback.contains_key(&field) {
            "form-control is-invalid"
        } else {
            "form-control"
        }
    };
    let feedback_for = |field: StudentField| -> Html {
        match feedback.get(&field) {
            Some(message) => html! { <div class="invalid-feedback d-block">{ message.clone() }</div> },
            None => html! {},
        }
    };

    html! {
        <form class="student-form" onsubmit={on_submit} novalidate=true>
            <div class="mb-3">
                <label for="student-id" class="form-label">{"Student ID"}</label>
                <input id="student-id" type="text" class={input_class(StudentField::Id)}
                    value={fields.id.clone()} oninput={on_id_input} disabled={*is_submitting} />
                { feedback_for(StudentField::Id) }
            </div>
            <div class="mb-3">
                <label for="full-name" class="form-label">{"Full Name"}</label>
                <input id="full-name" type="text" class={input_class(StudentField::FullName)}
                    value={fields.full_name.clone()} oninput={on_name_input} disabled={*is_submitting} />
                { feedback_for(StudentField::FullName) }
            </div>
            <div class="mb-3">
                <span class="form-label d-block">{"Gender"}</span>
                { for Gender::ALL.iter().map(|gender| {
                    let id = format!("gender-{}", gender.as_str().to_lowercase());
                    html! {
                        <div class="form-check form-check-inline">
                            <input id={id.clone()} class="form-check-input" type="radio" name="gender"
                                value={gender.as_str()}
                                checked={fields.gender == Some(*gender)}
                                onchange={on_gender_change(*gender)}
                                disabled={*is_submitting} />
                            <label for={id} class="form-check-label">{ gender.as_str() }</label>
                        </div>
                    }
                }) }
                { feedback_for(StudentField::Gender) }
            </div>
            <div class="mb-3">
                <label for="email" class="form-label">{"Email"}</label>
                <input id="email" type="email" class={input_class(StudentField::Email)}
                    value={fields.email.clone()} oninput={on_email_input} disabled={*is_submitting} />
                { feedback_for(StudentField::Email) }
            </div>
            <div class="mb-3">
                <label for="program" class="form-label">{"Program"}</label>
                <input id="program" type="text" list="program-options" class={input_class(StudentField::Program)}
                    value={fields.program.clone()} oninput={on_program_input} disabled={*is_submitting} />
                <datalist id="program-options">
                    { for props.programs.iter().map(|p| html! { <option value={p.clone()} /> }) }
                </datalist>
                { feedback_for(StudentField::Program) }
            </div>
            <div class="mb-3">
                <label for="year-level" class="form-label">{"Year Level"}</label>
                <select id="year-level"
                    class={if feedback.contains_key(&StudentField::YearLevel) { "form-select is-invalid" } else { "form-select" }}
                    onchange={on_year_change} disabled={*is_submitting}>
                    <option value="" selected={fields.year_level.is_empty()}>{"Select year level"}</option>
                    { for YearLevel::ALL.iter().map(|level| html! {
                        <option value={level.as_str()} selected={fields.year_level == level.as_str()}>
                            { level.as_str() }
                        </option>
                    }) }
                </select>
                { feedback_for(StudentField::YearLevel) }
            </div>
            <div class="mb-3">
                <label for="university" class="form-label">{"University"}</label>
                <input id="university" type="text" class={input_class(StudentField::University)}
                    value={fields.university.clone()} oninput={on_university_input} disabled={*is_submitting} />
                { feedback_for(StudentField::University) }
            </div>
            <button type="submit" class="btn btn-primary w-100" disabled={*is_submitting}>
                { if *is_submitting { "Adding..." } else { "Add Student" } }
            </button>
        </form>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    fn filled() -> StudentFormFields {
        StudentFormFields {
            id: "S1".to_string(),
            full_name: "Ann Lee".to_string(),
            gender: Some(Gender::Female),
            email: "ann@example.edu".to_string(),
            program: "CS".to_string(),
            year_level: "1st Year".to_string(),
            university: "ABC".to_string(),
        }
    }

    #[wasm_bindgen_test]
    fn filled_form_passes_validation() {
        assert!(validate_student(&filled().to_request()).is_empty());
    }

    #[wasm_bindgen_test]
    fn blank_form_flags_every_field() {
        let errors = validate_student(&StudentFormFields::default().to_request());
        let feedback = field_feedback(&errors);

        assert_eq!(feedback.len(), StudentField::ALL.len());
        assert_eq!(feedback[&StudentField::Id], "Student ID is required");
        assert_eq!(feedback[&StudentField::Gender], "Gender must be Male or Female");
    }

    #[wasm_bindgen_test]
    fn client_applies_length_rules() {
        let mut fields = filled();
        fields.full_name = "A".to_string();

        let feedback = field_feedback(&validate_student(&fields.to_request()));

        assert_eq!(
            feedback.get(&StudentField::FullName).map(String::as_str),
            Some("Full Name must be at least 2 characters long")
        );
    }

    #[wasm_bindgen_test]
    fn duplicate_id_error_highlights_id_field() {
        let feedback = server_error_feedback("Student ID already exists");
        assert_eq!(feedback[&StudentField::Id], "Student ID already exists.");

        assert!(server_error_feedback("Network error: offline").is_empty());
    }
}
