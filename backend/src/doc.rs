//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every form page, dashboard and health probe, the
//! shared [`View`](crate::inbound::http::view::View) and error payloads, the
//! urlencoded form bodies, and the session cookie security scheme. Swagger UI
//! serves it in debug builds.

use crate::domain::{Error, ErrorCode};
use crate::inbound::http::forms::{
    DonationForm, IncidentForm, LoginForm, RegisterForm, TaskForm, VolunteerForm,
};
use crate::inbound::http::view::View;
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Private session cookie issued by POST /login.",
            ))),
        );
    }
}

/// OpenAPI document for the relief desk.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Relief desk",
        description = "Form-driven pages for reporting incidents, pledging donations and coordinating volunteers."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::accounts::register_form,
        crate::inbound::http::accounts::register,
        crate::inbound::http::accounts::login_form,
        crate::inbound::http::accounts::login,
        crate::inbound::http::accounts::logout,
        crate::inbound::http::reports::incident_form,
        crate::inbound::http::reports::log_incident,
        crate::inbound::http::reports::donation_form,
        crate::inbound::http::reports::log_donation,
        crate::inbound::http::volunteers::sign_up_form,
        crate::inbound::http::volunteers::sign_up,
        crate::inbound::http::volunteers::task_form,
        crate::inbound::http::volunteers::create_task,
        crate::inbound::http::dashboards::user_home,
        crate::inbound::http::dashboards::volunteer_home,
        crate::inbound::http::dashboards::admin_home,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        View,
        Error,
        ErrorCode,
        RegisterForm,
        LoginForm,
        IncidentForm,
        DonationForm,
        VolunteerForm,
        TaskForm
    )),
    tags(
        (name = "accounts", description = "Registration, login and logout"),
        (name = "reports", description = "Incident reports and donation pledges"),
        (name = "volunteers", description = "Volunteer profiles and tasks"),
        (name = "dashboards", description = "Role home pages"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
