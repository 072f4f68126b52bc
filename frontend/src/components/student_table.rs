use shared::{Gender, StudentRecord};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct StudentTableProps {
    pub students: Vec<StudentRecord>,
    pub loading: bool,
    /// Called with the ID of the student to delete
    pub on_delete: Callback<String>,
}

const COLUMN_COUNT: &str = "8";

#[function_component(StudentTable)]
pub fn student_table(props: &StudentTableProps) -> Html {
    let body = if props.loading && props.students.is_empty() {
        html! {
            <tr>
                <td colspan={COLUMN_COUNT} class="text-center py-4">
                    <div class="loading-spinner mx-auto mb-3"></div>
                    <p class="text-muted">{"Loading students..."}</p>
                </td>
            </tr>
        }
    } else if props.students.is_empty() {
        html! {
            <tr>
                <td colspan={COLUMN_COUNT} class="text-center py-4">
                    <p class="text-muted">{"No students found matching your criteria."}</p>
                </td>
            </tr>
        }
    } else {
        props
            .students
            .iter()
            .map(|student| {
                let on_click = {
                    let on_delete = props.on_delete.clone();
                    let id = student.id.clone();
                    Callback::from(move |_: MouseEvent| on_delete.emit(id.clone()))
                };
                let gender_class = match student.gender {
                    Gender::Male => "gender-male",
                    Gender::Female => "gender-female",
                };

                html! {
                    <tr key={student.id.clone()}>
                        <td>{ student.id.clone() }</td>
                        <td>{ student.full_name.clone() }</td>
                        <td><span class={gender_class}>{ student.gender.as_str() }</span></td>
                        <td>{ student.email.clone() }</td>
                        <td>{ student.program.clone() }</td>
                        <td>{ student.year_level.as_str() }</td>
                        <td>{ student.university.clone() }</td>
                        <td>
                            <button type="button" class="btn btn-sm btn-outline-danger delete-btn"
                                title="Delete Student" onclick={on_click}>
                                {"Delete"}
                            </button>
                        </td>
                    </tr>
                }
            })
            .collect::<Html>()
    };

    html! {
        <table class="table table-hover">
            <thead>
                <tr>
                    <th>{"ID"}</th>
                    <th>{"Full Name"}</th>
                    <th>{"Gender"}</th>
                    <th>{"Email"}</th>
                    <th>{"Program"}</th>
                    <th>{"Year Level"}</th>
                    <th>{"University"}</th>
                    <th>{"Actions"}</th>
                </tr>
            </thead>
            <tbody>{ body }</tbody>
        </table>
    }
}
