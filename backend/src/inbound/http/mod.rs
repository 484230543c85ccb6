//! HTTP inbound adapter: form handlers, session gates and view rendering.

use actix_session::config::{CookieContentSecurity, PersistentSession};
use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::time::Duration;
use actix_web::web;

use crate::domain::Error;

pub mod accounts;
pub mod auth;
pub mod dashboards;
pub mod error;
pub mod forms;
pub mod health;
pub mod reports;
pub mod session;
pub mod session_config;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod view;
pub mod volunteers;

pub use error::ApiResult;

/// Name of the session cookie.
pub const SESSION_COOKIE_NAME: &str = "session";

/// Sessions outlive browser restarts for this long.
pub const SESSION_TTL: Duration = Duration::hours(2);

/// Private cookie-session middleware built from validated settings.
pub fn session_middleware(
    settings: &session_config::SessionSettings,
) -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), settings.key.clone())
        .cookie_name(SESSION_COOKIE_NAME.to_owned())
        .cookie_content_security(CookieContentSecurity::Private)
        .cookie_http_only(true)
        .cookie_secure(settings.cookie_secure)
        .cookie_same_site(settings.same_site)
        .session_lifecycle(PersistentSession::default().session_ttl(SESSION_TTL))
        .build()
}

/// Register every page handler and the form decoding policy.
///
/// Health probes are registered separately because they need the
/// [`health::HealthState`] owned by the server.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::FormConfig::default().error_handler(|err, _req| {
        Error::invalid_request(format!("unreadable form body: {err}")).into()
    }))
    .service(accounts::register_form)
    .service(accounts::register)
    .service(accounts::login_form)
    .service(accounts::login)
    .service(accounts::logout)
    .service(reports::incident_form)
    .service(reports::log_incident)
    .service(reports::donation_form)
    .service(reports::log_donation)
    .service(volunteers::sign_up_form)
    .service(volunteers::sign_up)
    .service(volunteers::task_form)
    .service(volunteers::create_task)
    .service(dashboards::user_home)
    .service(dashboards::volunteer_home)
    .service(dashboards::admin_home);
}
