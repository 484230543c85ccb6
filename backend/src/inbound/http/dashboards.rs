//! Role dashboards.
//!
//! ```text
//! GET /home/user        UserHome
//! GET /home/volunteer   VolunteerHome
//! GET /home/admin       AdminHome (Admin role only)
//! ```

use actix_web::{HttpResponse, get, web};
use serde::Serialize;

use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::{AdminOnly, SignedIn, end_stale_session};
use crate::inbound::http::session::{SessionContext, SessionUser};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::view::View;

/// Dashboard model: who is looking, plus the rows they see.
#[derive(Serialize)]
struct Home<'a, T: Serialize> {
    user: &'a SessionUser,
    #[serde(flatten)]
    data: T,
}

fn render<T: Serialize>(name: &str, user: &SessionUser, data: T) -> ApiResult<HttpResponse> {
    Ok(View::new(name).with_model(&Home { user, data })?.ok())
}

/// Reports, donations and volunteer profile of the signed-in user.
#[utoipa::path(
    get,
    path = "/home/user",
    responses(
        (status = 200, description = "UserHome view", body = View),
        (status = 303, description = "No session; redirect to /login")
    ),
    tags = ["dashboards"],
    operation_id = "userHome"
)]
#[get("/home/user")]
pub async fn user_home(
    SignedIn(user): SignedIn,
    session: SessionContext,
    state: web::Data<HttpState>,
) -> ApiResult<HttpResponse> {
    match state.dashboards.user_home(user.id).await {
        Ok(dashboard) => render("UserHome", &user, dashboard),
        Err(error) => end_stale_session(&session, error),
    }
}

/// Volunteer profile, assigned tasks and unassigned tasks.
#[utoipa::path(
    get,
    path = "/home/volunteer",
    responses(
        (status = 200, description = "VolunteerHome view", body = View),
        (status = 303, description = "No session; redirect to /login")
    ),
    tags = ["dashboards"],
    operation_id = "volunteerHome"
)]
#[get("/home/volunteer")]
pub async fn volunteer_home(
    SignedIn(user): SignedIn,
    session: SessionContext,
    state: web::Data<HttpState>,
) -> ApiResult<HttpResponse> {
    match state.dashboards.volunteer_home(user.id).await {
        Ok(dashboard) => render("VolunteerHome", &user, dashboard),
        Err(error) => end_stale_session(&session, error),
    }
}

/// Every account, report, donation, volunteer and task.
#[utoipa::path(
    get,
    path = "/home/admin",
    responses(
        (status = 200, description = "AdminHome view", body = View),
        (status = 303, description = "No admin session; redirect to /login")
    ),
    tags = ["dashboards"],
    operation_id = "adminHome"
)]
#[get("/home/admin")]
pub async fn admin_home(
    AdminOnly(user): AdminOnly,
    state: web::Data<HttpState>,
) -> ApiResult<HttpResponse> {
    let dashboard = state.dashboards.admin_home().await?;
    render("AdminHome", &user, dashboard)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::MockDashboardQuery;
    use crate::domain::{Error, UserDashboard};
    use crate::inbound::http::test_utils::{session_cookie, test_session_middleware, test_state};
    use actix_session::Session;
    use actix_web::http::{StatusCode, header};
    use actix_web::{App, test};
    use rstest::rstest;
    use serde_json::Value;
    use std::sync::Arc;

    async fn seed(session: Session) -> HttpResponse {
        session.insert("UserId", 3).expect("id");
        session.insert("UserEmail", "ada@example.org").expect("email");
        session.insert("UserRole", "User").expect("role");
        session.insert("UserName", "Ada").expect("name");
        HttpResponse::Ok().finish()
    }

    #[rstest]
    #[actix_web::test]
    async fn user_home_renders_dashboard_with_identity() {
        let mut dashboards = MockDashboardQuery::new();
        dashboards
            .expect_user_home()
            .returning(|_| Ok(UserDashboard::default()));
        let mut state = test_state();
        state.dashboards = Arc::new(dashboards);

        let app = test::init_service(
            App::new()
                .wrap(test_session_middleware())
                .app_data(web::Data::new(state))
                .route("/seed", web::get().to(seed))
                .service(user_home),
        )
        .await;
        let seeded =
            test::call_service(&app, test::TestRequest::get().uri("/seed").to_request()).await;
        let req = test::TestRequest::get()
            .uri("/home/user")
            .cookie(session_cookie(&seeded))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["view"], "UserHome");
        assert_eq!(body["model"]["user"]["email"], "ada@example.org");
        assert_eq!(body["model"]["incidents"], serde_json::json!([]));
        assert!(body["model"]["volunteer"].is_null());
    }

    #[rstest]
    #[actix_web::test]
    async fn missing_account_clears_session() {
        let mut dashboards = MockDashboardQuery::new();
        dashboards
            .expect_user_home()
            .returning(|_| Err(Error::unauthorized("account no longer exists")));
        let mut state = test_state();
        state.dashboards = Arc::new(dashboards);

        let app = test::init_service(
            App::new()
                .wrap(test_session_middleware())
                .app_data(web::Data::new(state))
                .route("/seed", web::get().to(seed))
                .service(user_home),
        )
        .await;
        let seeded =
            test::call_service(&app, test::TestRequest::get().uri("/seed").to_request()).await;
        let req = test::TestRequest::get()
            .uri("/home/user")
            .cookie(session_cookie(&seeded))
            .to_request();
        let res = test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            res.headers().get(header::LOCATION).map(|v| v.as_bytes()),
            Some(b"/login".as_slice())
        );
        let cleared = session_cookie(&res);
        assert_eq!(cleared.value(), "");
    }

    #[rstest]
    #[actix_web::test]
    async fn admin_home_refuses_user_role() {
        let mut dashboards = MockDashboardQuery::new();
        dashboards.expect_admin_home().never();
        let mut state = test_state();
        state.dashboards = Arc::new(dashboards);

        let app = test::init_service(
            App::new()
                .wrap(test_session_middleware())
                .app_data(web::Data::new(state))
                .route("/seed", web::get().to(seed))
                .service(admin_home),
        )
        .await;
        let seeded =
            test::call_service(&app, test::TestRequest::get().uri("/seed").to_request()).await;
        let req = test::TestRequest::get()
            .uri("/home/admin")
            .cookie(session_cookie(&seeded))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::SEE_OTHER);
    }
}
