//! Account handlers: registration, login and logout.
//!
//! ```text
//! GET  /register   Register view
//! POST /register   FullName, Email, Password, ConfirmPassword
//! GET  /login      Login view
//! POST /login      Email, Password
//! POST /logout
//! ```

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, get, post, web};
use tracing::info;

use crate::domain::{Error, ErrorCode, LoginCredentials, Role};
use crate::inbound::http::ApiResult;
use crate::inbound::http::forms::{LoginForm, RegisterForm};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::view::{View, paths, see_other};

const REGISTER_VIEW: &str = "Register";
const LOGIN_VIEW: &str = "Login";

/// Landing page for each role after login.
pub fn home_for(role: Role) -> &'static str {
    match role {
        Role::User => paths::USER_HOME,
        Role::Volunteer => paths::VOLUNTEER_HOME,
        Role::Admin => paths::ADMIN_HOME,
    }
}

/// Empty registration form.
#[utoipa::path(
    get,
    path = "/register",
    responses((status = 200, description = "Register view", body = View)),
    tags = ["accounts"],
    operation_id = "registerForm",
    security([])
)]
#[get("/register")]
pub async fn register_form() -> HttpResponse {
    View::new(REGISTER_VIEW).ok()
}

/// Create a `User` account and send the browser to login.
#[utoipa::path(
    post,
    path = "/register",
    request_body(content = RegisterForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Registered; redirect to /login"),
        (status = 400, description = "Register view with field errors", body = View),
        (status = 503, description = "Store unavailable", body = Error)
    ),
    tags = ["accounts"],
    operation_id = "register",
    security([])
)]
#[post("/register")]
pub async fn register(
    state: web::Data<HttpState>,
    form: web::Form<RegisterForm>,
) -> ApiResult<HttpResponse> {
    let form = form.into_inner();
    match state.registration.register(form.clone().into()).await {
        Ok(_) => Ok(see_other(paths::LOGIN)),
        Err(error) => View::new(REGISTER_VIEW).with_model(&form)?.or_invalid(error),
    }
}

/// Empty login form.
#[utoipa::path(
    get,
    path = "/login",
    responses((status = 200, description = "Login view", body = View)),
    tags = ["accounts"],
    operation_id = "loginForm",
    security([])
)]
#[get("/login")]
pub async fn login_form() -> HttpResponse {
    View::new(LOGIN_VIEW).ok()
}

/// Check credentials, start a session and redirect to the role's home.
///
/// A rejected login re-renders the form with `401` and leaves the session
/// untouched.
#[utoipa::path(
    post,
    path = "/login",
    request_body(content = LoginForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Signed in; redirect to the role's home",
            headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Login view with field errors", body = View),
        (status = 401, description = "Login view with a message", body = View),
        (status = 503, description = "Store unavailable", body = Error)
    ),
    tags = ["accounts"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    form: web::Form<LoginForm>,
) -> ApiResult<HttpResponse> {
    let form = form.into_inner();
    let view = View::new(LOGIN_VIEW).with_model(&form)?;
    let credentials = match LoginCredentials::try_from_parts(&form.email, &form.password) {
        Ok(credentials) => credentials,
        Err(fields) => return Ok(view.with_errors(fields).respond(StatusCode::BAD_REQUEST)),
    };

    match state.login.authenticate(&credentials).await {
        Ok(user) => {
            session.sign_in(&user)?;
            info!(user_id = %user.id, role = %user.role, "signed in");
            Ok(see_other(home_for(user.role)))
        }
        Err(error) if error.code() == ErrorCode::Unauthorized => Ok(view
            .with_message(error.message())
            .respond(StatusCode::UNAUTHORIZED)),
        Err(error) => Err(error),
    }
}

/// End the session.
#[utoipa::path(
    post,
    path = "/logout",
    responses((status = 303, description = "Signed out; redirect to /login")),
    tags = ["accounts"],
    operation_id = "logout",
    security([])
)]
#[post("/logout")]
pub async fn logout(session: SessionContext) -> HttpResponse {
    if let Some(user) = session.identity() {
        info!(user_id = %user.id, "signed out");
    }
    session.sign_out();
    see_other(paths::LOGIN)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{MockLoginService, MockRegistrationService};
    use crate::domain::{FieldErrors, INVALID_CREDENTIALS};
    use crate::inbound::http::test_utils::{test_session_middleware, test_state};
    use actix_web::http::header;
    use actix_web::{App, test as actix_test};
    use rstest::rstest;
    use serde_json::Value;
    use std::sync::Arc;

    #[rstest]
    #[case(Role::User, "/home/user")]
    #[case(Role::Volunteer, "/home/volunteer")]
    #[case(Role::Admin, "/home/admin")]
    fn each_role_has_a_home(#[case] role: Role, #[case] path: &str) {
        assert_eq!(home_for(role), path);
    }

    #[rstest]
    #[actix_web::test]
    async fn rejected_login_renders_message_without_cookie() {
        let mut logins = MockLoginService::new();
        logins
            .expect_authenticate()
            .returning(|_| Err(Error::unauthorized(INVALID_CREDENTIALS)));
        let mut state = test_state();
        state.login = Arc::new(logins);

        let app = actix_test::init_service(
            App::new()
                .wrap(test_session_middleware())
                .app_data(web::Data::new(state))
                .service(login),
        )
        .await;
        let req = actix_test::TestRequest::post()
            .uri("/login")
            .set_form([("Email", "ada@example.org"), ("Password", "wrong")])
            .to_request();
        let res = actix_test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        assert!(res.response().cookies().next().is_none());
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(body["view"], "Login");
        assert_eq!(body["message"], INVALID_CREDENTIALS);
        assert!(body["model"].get("Password").is_none());
    }

    #[rstest]
    #[actix_web::test]
    async fn blank_login_fields_are_annotated_without_calling_the_service() {
        let mut logins = MockLoginService::new();
        logins.expect_authenticate().never();
        let mut state = test_state();
        state.login = Arc::new(logins);

        let app = actix_test::init_service(
            App::new()
                .wrap(test_session_middleware())
                .app_data(web::Data::new(state))
                .service(login),
        )
        .await;
        let req = actix_test::TestRequest::post()
            .uri("/login")
            .set_form([("Email", ""), ("Password", "")])
            .to_request();
        let res = actix_test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: Value = actix_test::read_body_json(res).await;
        assert!(body["errors"]["Email"].is_array());
        assert!(body["errors"]["Password"].is_array());
    }

    #[rstest]
    #[actix_web::test]
    async fn registration_field_errors_rerender_the_form() {
        let mut registrations = MockRegistrationService::new();
        registrations.expect_register().returning(|_| {
            Err(FieldErrors::single("Email", "Email is already registered.").into())
        });
        let mut state = test_state();
        state.registration = Arc::new(registrations);

        let app = actix_test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .service(register),
        )
        .await;
        let req = actix_test::TestRequest::post()
            .uri("/register")
            .set_form([
                ("FullName", "Ada"),
                ("Email", "ada@example.org"),
                ("Password", "secret1"),
                ("ConfirmPassword", "secret1"),
            ])
            .to_request();
        let res = actix_test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(body["view"], "Register");
        assert_eq!(body["model"]["Email"], "ada@example.org");
        assert_eq!(body["errors"]["Email"][0], "Email is already registered.");
    }

    #[rstest]
    #[actix_web::test]
    async fn store_outage_surfaces_as_error_envelope() {
        let mut registrations = MockRegistrationService::new();
        registrations
            .expect_register()
            .returning(|_| Err(Error::service_unavailable("users repository unavailable")));
        let mut state = test_state();
        state.registration = Arc::new(registrations);

        let app = actix_test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .service(register),
        )
        .await;
        let req = actix_test::TestRequest::post()
            .uri("/register")
            .set_form([("FullName", "Ada")])
            .to_request();
        let res = actix_test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::SERVICE_UNAVAILABLE);
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(body["code"], "service_unavailable");
    }

    #[rstest]
    #[actix_web::test]
    async fn logout_redirects_to_login() {
        let app = actix_test::init_service(App::new().wrap(test_session_middleware()).service(logout))
            .await;
        let res =
            actix_test::call_service(&app, actix_test::TestRequest::post().uri("/logout").to_request()).await;
        assert_eq!(res.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            res.headers().get(header::LOCATION).map(|v| v.as_bytes()),
            Some(b"/login".as_slice())
        );
    }
}
