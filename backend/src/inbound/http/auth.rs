//! Session gates for protected handlers.
//!
//! Handlers declare the gate they need as an extractor argument. A request
//! that fails the gate never reaches the handler body: it is answered with a
//! redirect to the login page.

use actix_session::Session;
use actix_web::http::StatusCode;
use actix_web::{FromRequest, HttpRequest, HttpResponse, ResponseError, dev::Payload};
use futures_util::future::LocalBoxFuture;
use tracing::{debug, warn};

use super::ApiResult;
use super::session::{SessionContext, SessionUser};
use super::view::{paths, see_other};
use crate::domain::{Error, ErrorCode, Role};

/// Rejection raised by the gates below; always rendered as `303` to login.
#[derive(Debug, thiserror::Error)]
#[error("sign-in required")]
pub struct LoginRequired;

impl ResponseError for LoginRequired {
    fn status_code(&self) -> StatusCode {
        StatusCode::SEE_OTHER
    }

    fn error_response(&self) -> HttpResponse {
        see_other(paths::LOGIN)
    }
}

/// Any signed-in user.
#[derive(Debug, Clone)]
pub struct SignedIn(pub SessionUser);

/// A signed-in user whose session role is `Admin`.
#[derive(Debug, Clone)]
pub struct AdminOnly(pub SessionUser);

fn session_user(
    req: &HttpRequest,
    payload: &mut Payload,
) -> LocalBoxFuture<'static, Option<SessionUser>> {
    let path = req.path().to_owned();
    let fut = Session::from_request(req, payload);
    Box::pin(async move {
        let user = fut.await.ok().map(SessionContext::new)?.identity();
        if user.is_none() {
            debug!(%path, "no session identity; redirecting to login");
        }
        user
    })
}

impl FromRequest for SignedIn {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = session_user(req, payload);
        Box::pin(async move { fut.await.map(SignedIn).ok_or_else(|| LoginRequired.into()) })
    }
}

impl FromRequest for AdminOnly {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = session_user(req, payload);
        Box::pin(async move {
            match fut.await {
                Some(user) if user.role == Role::Admin => Ok(AdminOnly(user)),
                Some(user) => {
                    debug!(role = %user.role, "non-admin session refused");
                    Err(LoginRequired.into())
                }
                None => Err(LoginRequired.into()),
            }
        })
    }
}

/// Sign out and redirect when a service reports the session's account gone.
///
/// Any other error is handed back unchanged.
pub fn end_stale_session(session: &SessionContext, error: Error) -> ApiResult<HttpResponse> {
    if error.code() != ErrorCode::Unauthorized {
        return Err(error);
    }
    warn!(message = %error.message(), "session refers to a missing account");
    session.sign_out();
    Ok(see_other(paths::LOGIN))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inbound::http::test_utils::{session_cookie, test_session_middleware};
    use actix_web::http::header;
    use actix_web::{App, test, web};
    use rstest::rstest;

    async fn seed(session: Session, role: web::Path<String>) -> HttpResponse {
        session.insert("UserId", 4).expect("id");
        session.insert("UserEmail", "ada@example.org").expect("email");
        session.insert("UserRole", role.into_inner()).expect("role");
        session.insert("UserName", "Ada").expect("name");
        HttpResponse::Ok().finish()
    }

    async fn members(SignedIn(user): SignedIn) -> HttpResponse {
        HttpResponse::Ok().body(user.email)
    }

    async fn admins(AdminOnly(user): AdminOnly) -> HttpResponse {
        HttpResponse::Ok().body(user.name)
    }

    macro_rules! gated_app {
        () => {
            test::init_service(
                App::new()
                    .wrap(test_session_middleware())
                    .route("/seed/{role}", web::get().to(seed))
                    .route("/members", web::get().to(members))
                    .route("/admins", web::get().to(admins)),
            )
            .await
        };
    }

    #[rstest]
    #[case("/members")]
    #[case("/admins")]
    #[actix_web::test]
    async fn missing_session_redirects_to_login(#[case] uri: &str) {
        let app = gated_app!();
        let res = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
        assert_eq!(res.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            res.headers().get(header::LOCATION).map(|v| v.as_bytes()),
            Some(b"/login".as_slice())
        );
    }

    #[rstest]
    #[actix_web::test]
    async fn only_unauthorized_errors_end_the_session() {
        let req = test::TestRequest::default().to_http_request();
        let context = SessionContext::new(Session::extract(&req).await.expect("session"));

        let redirect = end_stale_session(&context, Error::unauthorized("account no longer exists"))
            .expect("redirect");
        assert_eq!(redirect.status(), StatusCode::SEE_OTHER);

        let passed = end_stale_session(&context, Error::internal("boom")).expect_err("passed");
        assert_eq!(passed.code(), ErrorCode::InternalError);
    }

    #[rstest]
    #[case("User", StatusCode::SEE_OTHER)]
    #[case("Volunteer", StatusCode::SEE_OTHER)]
    #[case("Admin", StatusCode::OK)]
    #[actix_web::test]
    async fn admin_gate_checks_role(#[case] role: &str, #[case] expected: StatusCode) {
        let app = gated_app!();
        let seeded = test::call_service(
            &app,
            test::TestRequest::get().uri(&format!("/seed/{role}")).to_request(),
        )
        .await;
        let cookie = session_cookie(&seeded);

        let res = test::call_service(
            &app,
            test::TestRequest::get().uri("/admins").cookie(cookie.clone()).to_request(),
        )
        .await;
        assert_eq!(res.status(), expected);

        let member = test::call_service(
            &app,
            test::TestRequest::get().uri("/members").cookie(cookie).to_request(),
        )
        .await;
        assert_eq!(member.status(), StatusCode::OK);
    }
}
