//! Volunteer sign-up and task creation handlers.
//!
//! ```text
//! GET  /volunteers/new        Volunteerss view
//! POST /volunteers/new        Skills, Availability
//! GET  /volunteer-tasks/new   VolunteerTask view listing volunteers
//! POST /volunteer-tasks/new   Name, Description, Status, AssignedTo
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::Serialize;
use tracing::info;

use crate::domain::Volunteer;
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::{SignedIn, end_stale_session};
use crate::inbound::http::forms::{TaskForm, VolunteerForm};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::view::{View, paths, see_other};

// The sign-up view has always been published under this name.
const SIGN_UP_VIEW: &str = "Volunteerss";
const TASK_VIEW: &str = "VolunteerTask";

#[derive(Serialize)]
struct TaskPage<'a> {
    volunteers: Vec<Volunteer>,
    form: &'a TaskForm,
}

/// Empty sign-up form.
#[utoipa::path(
    get,
    path = "/volunteers/new",
    responses(
        (status = 200, description = "Volunteerss view", body = View),
        (status = 303, description = "No session; redirect to /login")
    ),
    tags = ["volunteers"],
    operation_id = "volunteerSignUpForm"
)]
#[get("/volunteers/new")]
pub async fn sign_up_form(_user: SignedIn) -> HttpResponse {
    View::new(SIGN_UP_VIEW).ok()
}

/// Create the signed-in user's volunteer profile.
///
/// When the account is promoted to `Volunteer` the session role follows.
#[utoipa::path(
    post,
    path = "/volunteers/new",
    request_body(content = VolunteerForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Signed up; redirect to /home/user, or /login without a session"),
        (status = 400, description = "Volunteerss view with field errors", body = View)
    ),
    tags = ["volunteers"],
    operation_id = "volunteerSignUp"
)]
#[post("/volunteers/new")]
pub async fn sign_up(
    SignedIn(user): SignedIn,
    session: SessionContext,
    state: web::Data<HttpState>,
    form: web::Form<VolunteerForm>,
) -> ApiResult<HttpResponse> {
    let form = form.into_inner();
    let outcome = match state.volunteers.sign_up(user.id, form.clone().into()).await {
        Ok(outcome) => outcome,
        Err(error) => {
            let view = View::new(SIGN_UP_VIEW).with_model(&form)?;
            return match view.or_invalid(error) {
                Ok(response) => Ok(response),
                Err(error) => end_stale_session(&session, error),
            };
        }
    };

    if outcome.role != user.role {
        session.set_role(outcome.role)?;
    }
    info!(volunteer_id = %outcome.volunteer.id, user_id = %user.id, "volunteer signed up");
    Ok(see_other(paths::USER_HOME))
}

/// Task form with the volunteers available for assignment.
#[utoipa::path(
    get,
    path = "/volunteer-tasks/new",
    responses(
        (status = 200, description = "VolunteerTask view", body = View),
        (status = 303, description = "No session; redirect to /login")
    ),
    tags = ["volunteers"],
    operation_id = "volunteerTaskForm"
)]
#[get("/volunteer-tasks/new")]
pub async fn task_form(_user: SignedIn, state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    let page = TaskPage {
        volunteers: state.volunteers.task_form().await?,
        form: &TaskForm::default(),
    };
    Ok(View::new(TASK_VIEW).with_model(&page)?.ok())
}

/// Create a task, optionally assigned to a volunteer.
#[utoipa::path(
    post,
    path = "/volunteer-tasks/new",
    request_body(content = TaskForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Created; redirect to /home/volunteer, or /login without a session"),
        (status = 400, description = "VolunteerTask view with field errors", body = View)
    ),
    tags = ["volunteers"],
    operation_id = "createVolunteerTask"
)]
#[post("/volunteer-tasks/new")]
pub async fn create_task(
    _user: SignedIn,
    state: web::Data<HttpState>,
    form: web::Form<TaskForm>,
) -> ApiResult<HttpResponse> {
    let form = form.into_inner();
    match state.volunteers.create_task(form.clone().into()).await {
        Ok(task) => {
            info!(task_id = task.id, assigned_to = ?task.assigned_to, "volunteer task created");
            Ok(see_other(paths::VOLUNTEER_HOME))
        }
        Err(error) => {
            let page = TaskPage {
                volunteers: state.volunteers.task_form().await?,
                form: &form,
            };
            View::new(TASK_VIEW).with_model(&page)?.or_invalid(error)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{MockVolunteerCommand, SignUpOutcome};
    use crate::domain::{Error, FieldErrors, Role, UserId, VolunteerId};
    use crate::inbound::http::test_utils::{session_cookie, test_session_middleware, test_state};
    use actix_session::Session;
    use actix_web::http::{StatusCode, header};
    use actix_web::{App, test};
    use chrono::Utc;
    use rstest::rstest;
    use serde_json::Value;
    use std::sync::Arc;

    fn volunteer(id: i32, user: i32) -> Volunteer {
        Volunteer {
            id: VolunteerId::new(id),
            user_id: UserId::new(user),
            skills: "First aid".into(),
            availability: "Weekends".into(),
            joined_at: Utc::now(),
        }
    }

    async fn seed(session: Session) -> HttpResponse {
        session.insert("UserId", 5).expect("id");
        session.insert("UserEmail", "ada@example.org").expect("email");
        session.insert("UserRole", "User").expect("role");
        session.insert("UserName", "Ada").expect("name");
        HttpResponse::Ok().finish()
    }

    async fn role(session: SessionContext) -> HttpResponse {
        match session.identity() {
            Some(user) => HttpResponse::Ok().body(user.role.as_str()),
            None => HttpResponse::Unauthorized().finish(),
        }
    }

    #[rstest]
    #[actix_web::test]
    async fn sign_up_refreshes_session_role() {
        let mut commands = MockVolunteerCommand::new();
        commands.expect_sign_up().returning(|user, _| {
            Ok(SignUpOutcome {
                volunteer: volunteer(1, user.get()),
                role: Role::Volunteer,
            })
        });
        let mut state = test_state();
        state.volunteers = Arc::new(commands);

        let app = test::init_service(
            App::new()
                .wrap(test_session_middleware())
                .app_data(web::Data::new(state))
                .route("/seed", web::get().to(seed))
                .route("/role", web::get().to(role))
                .service(sign_up),
        )
        .await;
        let seeded =
            test::call_service(&app, test::TestRequest::get().uri("/seed").to_request()).await;
        let req = test::TestRequest::post()
            .uri("/volunteers/new")
            .cookie(session_cookie(&seeded))
            .set_form([("Skills", "First aid"), ("Availability", "Weekends")])
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            res.headers().get(header::LOCATION).map(|v| v.as_bytes()),
            Some(b"/home/user".as_slice())
        );

        let req = test::TestRequest::get()
            .uri("/role")
            .cookie(session_cookie(&res))
            .to_request();
        let body = test::call_and_read_body(&app, req).await;
        assert_eq!(body, "Volunteer");
    }

    #[rstest]
    #[actix_web::test]
    async fn failed_task_lists_volunteers_again() {
        let mut commands = MockVolunteerCommand::new();
        commands.expect_create_task().returning(|_| {
            Err(Error::from(FieldErrors::single(
                "AssignedTo",
                "Assigned volunteer does not exist.",
            )))
        });
        commands
            .expect_task_form()
            .returning(|| Ok(vec![volunteer(1, 5), volunteer(2, 6)]));
        let mut state = test_state();
        state.volunteers = Arc::new(commands);

        let app = test::init_service(
            App::new()
                .wrap(test_session_middleware())
                .app_data(web::Data::new(state))
                .route("/seed", web::get().to(seed))
                .service(create_task),
        )
        .await;
        let seeded =
            test::call_service(&app, test::TestRequest::get().uri("/seed").to_request()).await;
        let req = test::TestRequest::post()
            .uri("/volunteer-tasks/new")
            .cookie(session_cookie(&seeded))
            .set_form([("Name", "Sandbags"), ("Description", "Fill"), ("AssignedTo", "42")])
            .to_request();
        let res = test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["view"], "VolunteerTask");
        assert_eq!(body["model"]["volunteers"].as_array().map(Vec::len), Some(2));
        assert_eq!(body["model"]["form"]["AssignedTo"], "42");
        assert!(body["errors"]["AssignedTo"].is_array());
    }

    #[rstest]
    #[actix_web::test]
    async fn sign_up_for_deleted_account_ends_session() {
        let mut commands = MockVolunteerCommand::new();
        commands
            .expect_sign_up()
            .returning(|_, _| Err(Error::unauthorized("account no longer exists")));
        let mut state = test_state();
        state.volunteers = Arc::new(commands);

        let app = test::init_service(
            App::new()
                .wrap(test_session_middleware())
                .app_data(web::Data::new(state))
                .route("/seed", web::get().to(seed))
                .service(sign_up),
        )
        .await;
        let seeded =
            test::call_service(&app, test::TestRequest::get().uri("/seed").to_request()).await;
        let req = test::TestRequest::post()
            .uri("/volunteers/new")
            .cookie(session_cookie(&seeded))
            .set_form([("Skills", "First aid"), ("Availability", "Weekends")])
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            res.headers().get(header::LOCATION).map(|v| v.as_bytes()),
            Some(b"/login".as_slice())
        );
    }
}
