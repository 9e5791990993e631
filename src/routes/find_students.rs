use crate::{
    data::{
        StudentRepository,
        gender::Gender,
        student::{FieldErrors, Student},
    },
    error::RosterResult,
    maud_conveniences::{escape, form_submit_button, simple_form_element, table, title},
    state::RosterState,
};
use axum::{
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
};
use maud::{Markup, html};
use serde::Deserialize;

pub fn render_find_form(last_name: &str, errors: &FieldErrors) -> Markup {
    html! {
        div class="bg-gray-800 shadow-md rounded px-8 pt-6 pb-8 mb-4 w-full max-w-md" {
            (title("Find Students"))
            form method="get" action="/students" {
                (simple_form_element("lastName", "Last Name", false, Some("search"), last_name, errors))
                (form_submit_button(Some("Find Student")))
            }
            br;
            a href="/students/new" class="text-blue-300 underline" {"Add Student"}
        }
    }
}

pub fn render_student_list(heading: &str, students: Vec<Student>, genders: &[Gender]) -> Markup {
    let rows = students
        .into_iter()
        .map(|student| {
            let href = format!("/students/{}", student.id.unwrap_or_default());
            let gender = student.gender(genders).cloned();
            [
                html! {
                    a class="hover:text-blue-300 underline" href=(href) {(student)}
                },
                escape(&student.student_id),
                escape(&student.department),
                escape(&student.hometown),
                html! {
                    @if let Some(gender) = gender {
                        (gender)
                    } @else {
                        span class="italic" {"-"}
                    }
                },
            ]
        })
        .collect();

    table(
        title(heading),
        ["Name", "Student ID", "Department", "Hometown", "Gender"],
        rows,
    )
}

pub async fn get_find_form(State(state): State<RosterState>) -> Markup {
    state.render(render_find_form("", &FieldErrors::default()))
}

#[derive(Deserialize)]
pub struct FindStudentsQuery {
    #[serde(rename = "lastName")]
    pub last_name: Option<String>,
}

pub async fn get_students(
    State(state): State<RosterState>,
    Query(FindStudentsQuery { last_name }): Query<FindStudentsQuery>,
) -> RosterResult<Response> {
    //no parameter at all is the broadest possible search
    let last_name = last_name.unwrap_or_default();

    let mut results = state.find_by_last_name(&last_name).await?;
    match results.len() {
        0 => {
            let mut errors = FieldErrors::default();
            errors.reject("lastName", "not found");
            Ok(state
                .render(render_find_form(&last_name, &errors))
                .into_response())
        }
        1 => {
            let id = results.swap_remove(0).id.unwrap_or_default();
            Ok(Redirect::to(&format!("/students/{id}")).into_response())
        }
        _ => {
            let genders = state.find_genders().await?;
            Ok(state
                .render(render_student_list("Students", results, &genders))
                .into_response())
        }
    }
}
