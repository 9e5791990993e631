use crate::{
    data::{
        StudentRepository,
        gender::{Gender, GenderFormatter},
        student::{FieldErrors, Student, StudentForm},
    },
    error::RosterResult,
    maud_conveniences::{form_element, form_submit_button, simple_form_element, title},
    state::RosterState,
};
use axum::{
    Form,
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
};
use maud::{Markup, html};

/// Shared by creation and editing; `id` decides where the form posts back to.
pub fn render_student_form(
    id: Option<i32>,
    form: &StudentForm,
    genders: &[Gender],
    errors: &FieldErrors,
) -> Markup {
    let (heading, action, button) = match id {
        None => ("New Student", "/students/new".to_string(), "Add Student"),
        Some(id) => ("Edit Student", format!("/students/{id}/edit"), "Update Student"),
    };

    html! {
        div class="bg-gray-800 shadow-md rounded px-8 pt-6 pb-8 mb-4 w-full max-w-md" {
            (title(heading))
            form method="post" action=(action) {
                (simple_form_element("firstName", "First Name", true, None, &form.first_name, errors))
                (simple_form_element("lastName", "Last Name", true, None, &form.last_name, errors))
                (simple_form_element("birthDate", "Birth Date (optional)", false, Some("date"), &form.birth_date, errors))
                (simple_form_element("hometown", "Hometown", true, None, &form.hometown, errors))
                (simple_form_element("department", "Department", true, None, &form.department, errors))
                (simple_form_element("studentId", "Student ID", true, None, &form.student_id, errors))
                (form_element("gender", "Gender", errors, html!{
                    select id="gender" name="gender" class="shadow appearance-none border rounded w-full py-2 px-3 leading-tight focus:outline-none focus:shadow-outline bg-gray-700 border-gray-600" {
                        option value="" {"Select a Gender (optional)"}
                        @for gender in genders {
                            @let name = GenderFormatter::print(gender);
                            option value=(name) selected[name == form.gender] {(name)}
                        }
                    }
                }))

                (form_submit_button(Some(button)))
            }
        }
    }
}

pub async fn get_new_student(State(state): State<RosterState>) -> RosterResult<Markup> {
    let genders = state.find_genders().await?;

    Ok(state.render(render_student_form(
        None,
        &StudentForm::default(),
        &genders,
        &FieldErrors::default(),
    )))
}

pub async fn post_new_student(
    State(state): State<RosterState>,
    Form(form): Form<StudentForm>,
) -> RosterResult<Response> {
    let formatter = GenderFormatter::new(&*state);

    match form.bind(&formatter).await {
        Err(errors) => {
            let fields: Vec<_> = errors.fields().collect();
            debug!(?fields, "rejected new student");
            let genders = formatter.genders().await?;
            Ok(state
                .render(render_student_form(None, &form, &genders, &errors))
                .into_response())
        }
        Ok(student) => {
            let saved = state.save(student).await?;
            let id = saved.id.unwrap_or_default();
            Ok(Redirect::to(&format!("/students/{id}")).into_response())
        }
    }
}

pub async fn get_edit_student(
    State(state): State<RosterState>,
    Path(id): Path<i32>,
) -> RosterResult<Markup> {
    let student = state.find_by_id(id).await?;
    let genders = state.find_genders().await?;

    Ok(state.render(render_student_form(
        Some(id),
        &StudentForm::from_student(&student, &genders),
        &genders,
        &FieldErrors::default(),
    )))
}

pub async fn post_edit_student(
    State(state): State<RosterState>,
    Path(id): Path<i32>,
    Form(form): Form<StudentForm>,
) -> RosterResult<Response> {
    let formatter = GenderFormatter::new(&*state);

    match form.bind(&formatter).await {
        Err(errors) => {
            let fields: Vec<_> = errors.fields().collect();
            debug!(id, ?fields, "rejected student edit");
            let genders = formatter.genders().await?;
            Ok(state
                .render(render_student_form(Some(id), &form, &genders, &errors))
                .into_response())
        }
        Ok(student) => {
            state
                .save(Student {
                    id: Some(id),
                    ..student
                })
                .await?;
            Ok(Redirect::to(&format!("/students/{id}")).into_response())
        }
    }
}
