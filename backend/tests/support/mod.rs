//! Shared helpers for the end-to-end page tests.
//!
//! Integration tests compile as separate crates under `backend/tests/`, so
//! each suite pulls this module in with `mod support;`. The app is wired the
//! same way as the server binary, over a fresh [`MemoryStore`].

#![expect(
    dead_code,
    reason = "Each test crate compiles this module but uses only some helpers"
)]

use std::sync::Arc;

use actix_http::Request;
use actix_web::body::MessageBody;
use actix_web::cookie::{Cookie, Key, SameSite};
use actix_web::dev::{Service, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::http::{StatusCode, header};
use actix_web::{App, test, web};
use mockable::DefaultClock;
use serde_json::Value;

use reliefdesk::Trace;
use reliefdesk::domain::ports::Repositories;
use reliefdesk::domain::{AccountService, RegisterRequest, User};
use reliefdesk::inbound::http::session_config::SessionSettings;
use reliefdesk::inbound::http::state::HttpState;
use reliefdesk::inbound::http::{SESSION_COOKIE_NAME, configure, session_middleware};
use reliefdesk::outbound::memory::MemoryStore;

pub const PASSWORD: &str = "correct horse";

/// A fresh in-memory store.
pub fn repositories() -> Repositories {
    MemoryStore::new().repositories()
}

/// The page app over `repos`, wrapped like the production server.
pub fn app(
    repos: Repositories,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    app_with_key(repos, Key::generate())
}

/// Like [`app`], sealing sessions with `key`.
pub fn app_with_key(
    repos: Repositories,
    key: Key,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let settings = SessionSettings {
        key,
        cookie_secure: false,
        same_site: SameSite::Lax,
    };
    App::new()
        .app_data(web::Data::new(HttpState::from_repositories(
            repos,
            Arc::new(DefaultClock),
        )))
        .wrap(session_middleware(&settings))
        .wrap(Trace)
        .configure(configure)
}

/// Send `req` through `app`.
pub async fn send<S, B>(app: &S, req: test::TestRequest) -> ServiceResponse<B>
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
{
    test::call_service(app, req.to_request()).await
}

/// A urlencoded `POST`, optionally carrying a session cookie.
pub fn form(path: &str, fields: &[(&str, &str)], cookie: Option<&Cookie<'static>>) -> test::TestRequest {
    let req = test::TestRequest::post().uri(path).set_form(fields);
    match cookie {
        Some(cookie) => req.cookie(cookie.clone()),
        None => req,
    }
}

/// A `GET`, optionally carrying a session cookie.
pub fn page(path: &str, cookie: Option<&Cookie<'static>>) -> test::TestRequest {
    let req = test::TestRequest::get().uri(path);
    match cookie {
        Some(cookie) => req.cookie(cookie.clone()),
        None => req,
    }
}

/// The `Location` of a `303 See Other`.
pub fn redirect_target<B>(res: &ServiceResponse<B>) -> String {
    assert_eq!(res.status(), StatusCode::SEE_OTHER, "expected a redirect");
    res.headers()
        .get(header::LOCATION)
        .and_then(|value| value.to_str().ok())
        .expect("location header")
        .to_owned()
}

/// The session cookie set by `res`, if any.
pub fn set_session_cookie<B>(res: &ServiceResponse<B>) -> Option<Cookie<'static>> {
    res.response()
        .cookies()
        .find(|cookie| cookie.name() == SESSION_COOKIE_NAME)
        .map(Cookie::into_owned)
}

/// Decode a rendered view, asserting its status and name.
pub async fn view<B: MessageBody>(res: ServiceResponse<B>, status: StatusCode, name: &str) -> Value {
    assert_eq!(res.status(), status);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["view"], name, "unexpected view: {body}");
    body
}

/// Register an account through the page.
pub async fn register<S, B>(app: &S, full_name: &str, email: &str) -> ServiceResponse<B>
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
{
    let fields = [
        ("FullName", full_name),
        ("Email", email),
        ("Password", PASSWORD),
        ("ConfirmPassword", PASSWORD),
    ];
    send(app, form("/register", &fields, None)).await
}

/// Log in and return the session cookie plus the landing page.
pub async fn sign_in<S, B>(app: &S, email: &str) -> (Cookie<'static>, String)
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
{
    let res = send(
        app,
        form("/login", &[("Email", email), ("Password", PASSWORD)], None),
    )
    .await;
    let landing = redirect_target(&res);
    let cookie = set_session_cookie(&res).expect("login sets the session cookie");
    (cookie, landing)
}

/// Register then log in a `User`.
pub async fn signed_in_user<S, B>(app: &S, full_name: &str, email: &str) -> Cookie<'static>
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
{
    let res = register(app, full_name, email).await;
    assert_eq!(redirect_target(&res), "/login");
    sign_in(app, email).await.0
}

/// Create an administrator directly in the store.
pub async fn admin(repos: &Repositories, email: &str) -> User {
    AccountService::new(repos.users.clone(), Arc::new(DefaultClock))
        .ensure_admin(RegisterRequest {
            full_name: "Desk Admin".into(),
            email: email.into(),
            password: PASSWORD.into(),
            confirm_password: PASSWORD.into(),
        })
        .await
        .expect("bootstrap admin")
}
