use crate::state::RosterState;
use all_students::get_all_students;
use axum::{Router, routing::get};
use find_students::{get_find_form, get_students};
use index::get_index_route;
use student_form::{get_edit_student, get_new_student, post_edit_student, post_new_student};
use student_in_detail::{get_delete_student, get_student};
use tower_http::trace::TraceLayer;

pub mod all_students;
pub mod find_students;
pub mod index;
pub mod student_form;
pub mod student_in_detail;

pub fn router(state: RosterState) -> Router {
    Router::new()
        .route("/", get(get_index_route))
        .route("/students", get(get_students))
        .route("/students/find", get(get_find_form))
        .route("/students/list", get(get_all_students))
        .route("/students/new", get(get_new_student).post(post_new_student))
        .route("/students/{id}", get(get_student))
        .route(
            "/students/{id}/edit",
            get(get_edit_student).post(post_edit_student),
        )
        .route("/students/{id}/delete", get(get_delete_student))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{StudentRepository, memory::InMemoryStudentRepository};
    use axum::{
        body::Body,
        http::{Request, StatusCode, header},
    };
    use std::sync::Arc;
    use tower::ServiceExt;

    fn app() -> (Router, InMemoryStudentRepository) {
        let repo = InMemoryStudentRepository::seeded();
        let state = RosterState::with_repository(Arc::new(repo.clone()));
        (router(state), repo)
    }

    async fn get(router: &Router, uri: &str) -> (StatusCode, Option<String>, String) {
        let req = Request::builder().uri(uri).body(Body::empty()).unwrap();
        send(router, req).await
    }

    async fn post_form(router: &Router, uri: &str, body: &str) -> (StatusCode, Option<String>, String) {
        let req = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .unwrap();
        send(router, req).await
    }

    async fn send(router: &Router, req: Request<Body>) -> (StatusCode, Option<String>, String) {
        let resp = router.clone().oneshot(req).await.unwrap();
        let status = resp.status();
        let location = resp
            .headers()
            .get(header::LOCATION)
            .map(|l| l.to_str().unwrap().to_string());
        let body = axum::body::to_bytes(resp.into_body(), 1024 * 1024).await.unwrap();
        (status, location, String::from_utf8(body.to_vec()).unwrap())
    }

    const SCHULTZ: &str = "firstName=Sam&lastName=Schultz&birthDate=2002-02-02&hometown=4%2C+Evans+Street&department=Wollongong&studentId=4444444444&gender=male";

    #[tokio::test]
    async fn landing_page_links_everywhere() {
        let (router, _) = app();
        let (status, _, body) = get(&router, "/").await;

        assert_eq!(status, StatusCode::OK);
        for href in ["/students/find", "/students/list", "/students/new"] {
            assert!(body.contains(href), "missing {href}");
        }
    }

    #[tokio::test]
    async fn create_redirects_to_new_student() {
        let (router, repo) = app();
        let (status, location, _) = post_form(&router, "/students/new", SCHULTZ).await;

        assert_eq!(status, StatusCode::SEE_OTHER);
        let created = repo.find_by_last_name("Schultz").await.unwrap();
        assert_eq!(created.len(), 1);
        let id = created[0].id.unwrap();
        assert_eq!(location.as_deref(), Some(format!("/students/{id}").as_str()));

        let (status, _, body) = get(&router, &format!("/students/{id}")).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Sam Schultz"));
        assert!(body.contains("Wollongong"));
        assert!(body.contains("male"));
    }

    #[tokio::test]
    async fn create_with_bad_student_id_redisplays_form() {
        let (router, repo) = app();
        let before = repo.find_all().await.unwrap().len();

        let body = SCHULTZ.replace("studentId=4444444444", "studentId=abc");
        let (status, location, page) = post_form(&router, "/students/new", &body).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(location, None);
        assert!(page.contains("numeric value out of bounds"));
        assert!(page.contains("value=\"abc\""));
        assert_eq!(repo.find_all().await.unwrap().len(), before);
    }

    #[tokio::test]
    async fn create_ignores_client_id() {
        let (router, repo) = app();
        let body = format!("id=1&{SCHULTZ}");
        let (status, _, _) = post_form(&router, "/students/new", &body).await;

        assert_eq!(status, StatusCode::SEE_OTHER);
        assert_eq!(repo.find_by_id(1).await.unwrap().last_name, "Franklin");
        assert_eq!(repo.find_by_last_name("Schultz").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn create_with_unknown_gender_is_a_field_error() {
        let (router, repo) = app();
        let body = SCHULTZ.replace("gender=male", "gender=robot");
        let (status, _, page) = post_form(&router, "/students/new", &body).await;

        assert_eq!(status, StatusCode::OK);
        assert!(page.contains("type not found: robot"));
        assert!(repo.find_by_last_name("Schultz").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn find_with_no_matches_reports_not_found() {
        let (router, _) = app();
        let (status, location, page) = get(&router, "/students?lastName=Daviss").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(location, None);
        assert!(page.contains("not found"));
    }

    #[tokio::test]
    async fn find_with_one_match_redirects() {
        let (router, _) = app();
        let (status, location, _) = get(&router, "/students?lastName=Frank").await;

        assert_eq!(status, StatusCode::SEE_OTHER);
        assert_eq!(location.as_deref(), Some("/students/1"));
    }

    #[tokio::test]
    async fn find_with_many_matches_lists_them() {
        let (router, _) = app();
        let (status, _, page) = get(&router, "/students?lastName=Davis").await;

        assert_eq!(status, StatusCode::OK);
        assert!(page.contains("Betty Davis"));
        assert!(page.contains("Harold Davis"));
        assert!(!page.contains("Franklin"));
    }

    #[tokio::test]
    async fn find_without_parameter_matches_everyone() {
        let (router, repo) = app();
        let (status, _, page) = get(&router, "/students").await;

        assert_eq!(status, StatusCode::OK);
        for student in repo.find_all().await.unwrap() {
            assert!(page.contains(&student.last_name));
        }
    }

    #[tokio::test]
    async fn list_shows_everyone() {
        let (router, repo) = app();
        let (status, _, page) = get(&router, "/students/list").await;

        assert_eq!(status, StatusCode::OK);
        for student in repo.find_all().await.unwrap() {
            assert!(page.contains(&student.student_id));
        }
    }

    #[tokio::test]
    async fn edit_form_is_prefilled() {
        let (router, _) = app();
        let (status, _, page) = get(&router, "/students/2/edit").await;

        assert_eq!(status, StatusCode::OK);
        assert!(page.contains("value=\"Betty\""));
        assert!(page.contains("value=\"2002-07-02\""));
        assert!(page.contains("action=\"/students/2/edit\""));
    }

    #[tokio::test]
    async fn edit_uses_path_id_not_body_id() {
        let (router, repo) = app();
        let before = repo.find_all().await.unwrap();

        let body = format!("id=99&{SCHULTZ}");
        let (status, location, _) = post_form(&router, "/students/1/edit", &body).await;

        assert_eq!(status, StatusCode::SEE_OTHER);
        assert_eq!(location.as_deref(), Some("/students/1"));

        assert_eq!(repo.find_by_id(1).await.unwrap().last_name, "Schultz");
        assert!(repo.find_by_id(99).await.is_err());

        let after = repo.find_all().await.unwrap();
        assert_eq!(before.len(), after.len());
        assert_eq!(before[1..], after[1..]);
    }

    #[tokio::test]
    async fn edit_with_errors_keeps_row() {
        let (router, repo) = app();
        let original = repo.find_by_id(1).await.unwrap();

        let body = SCHULTZ.replace("firstName=Sam", "firstName=");
        let (status, _, page) = post_form(&router, "/students/1/edit", &body).await;

        assert_eq!(status, StatusCode::OK);
        assert!(page.contains("must not be empty"));
        assert_eq!(repo.find_by_id(1).await.unwrap(), original);
    }

    #[tokio::test]
    async fn missing_students_are_404() {
        let (router, _) = app();

        for uri in ["/students/404", "/students/404/edit", "/students/404/delete"] {
            let (status, _, _) = get(&router, uri).await;
            assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
        }

        let (status, _, _) = post_form(&router, "/students/404/edit", SCHULTZ).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn delete_redirects_to_landing_page() {
        let (router, repo) = app();
        let (status, location, _) = get(&router, "/students/3/delete").await;

        assert_eq!(status, StatusCode::SEE_OTHER);
        assert_eq!(location.as_deref(), Some("/"));
        assert!(repo.find_by_id(3).await.is_err());
    }
}
