use crate::{
    data::StudentRepository,
    error::RosterResult,
    maud_conveniences::{labelled_value, link_button, title},
    state::RosterState,
};
use axum::{
    extract::{Path, State},
    response::Redirect,
};
use maud::{Markup, html};

pub async fn get_student(
    State(state): State<RosterState>,
    Path(id): Path<i32>,
) -> RosterResult<Markup> {
    let student = state.find_by_id(id).await?;
    let genders = state.find_genders().await?;
    let gender = student.gender(&genders);

    Ok(state.render(html! {
        div class="container mx-auto px-4 py-8 max-w-2xl" {
            div class="bg-gray-800 p-6 md:p-8 rounded-lg shadow-xl" {
                (title(&student))

                div class="py-4" {
                    (labelled_value("Student ID", &student.student_id))
                    (labelled_value("Department", &student.department))
                    (labelled_value("Hometown", &student.hometown))
                    @if let Some(birth_date) = student.birth_date {
                        (labelled_value("Birth Date", birth_date.format("%Y-%m-%d").to_string()))
                    }
                    @if let Some(gender) = gender {
                        (labelled_value("Gender", gender))
                    }
                }

                div class="flex flex-row space-x-4" {
                    (link_button(&format!("/students/{id}/edit"), "Edit Student", "blue"))
                    (link_button(&format!("/students/{id}/delete"), "Delete Student", "red"))
                }
            }
        }
    }))
}

pub async fn get_delete_student(
    State(state): State<RosterState>,
    Path(id): Path<i32>,
) -> RosterResult<Redirect> {
    state.delete_by_id(id).await?;
    Ok(Redirect::to("/"))
}
