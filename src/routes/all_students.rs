use crate::{
    data::StudentRepository, error::RosterResult, routes::find_students::render_student_list,
    state::RosterState,
};
use axum::extract::State;
use maud::{Markup, html};

pub async fn get_all_students(State(state): State<RosterState>) -> RosterResult<Markup> {
    let students = state.find_all().await?;
    let genders = state.find_genders().await?;

    Ok(state.render(html! {
        div class="mx-auto bg-gray-800 p-8 rounded shadow-md max-w-4xl w-full flex flex-col space-y-4" {
            @if students.is_empty() {
                p class="italic text-gray-400" {"No students yet."}
            } @else {
                (render_student_list("All Students", students, &genders))
            }
        }
    }))
}
