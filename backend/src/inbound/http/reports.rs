//! Incident and donation submission handlers.
//!
//! ```text
//! GET  /incidents/new   LogIncident view
//! POST /incidents/new   Title, Description, Location
//! GET  /donations/new   LogDonation view, prefilled from the session
//! POST /donations/new   DonorName, Email, ResourceType, Quantity, ...
//! ```

use actix_web::{HttpResponse, get, post, web};
use tracing::info;

use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::SignedIn;
use crate::inbound::http::forms::{DonationForm, IncidentForm};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::view::{View, paths, see_other};

const LOG_INCIDENT_VIEW: &str = "LogIncident";
const LOG_DONATION_VIEW: &str = "LogDonation";

/// Empty incident form.
#[utoipa::path(
    get,
    path = "/incidents/new",
    responses(
        (status = 200, description = "LogIncident view", body = View),
        (status = 303, description = "No session; redirect to /login")
    ),
    tags = ["reports"],
    operation_id = "logIncidentForm"
)]
#[get("/incidents/new")]
pub async fn incident_form(_user: SignedIn) -> HttpResponse {
    View::new(LOG_INCIDENT_VIEW).ok()
}

/// File an incident as the signed-in user.
#[utoipa::path(
    post,
    path = "/incidents/new",
    request_body(content = IncidentForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Logged; redirect to /home/user, or /login without a session"),
        (status = 400, description = "LogIncident view with field errors", body = View)
    ),
    tags = ["reports"],
    operation_id = "logIncident"
)]
#[post("/incidents/new")]
pub async fn log_incident(
    SignedIn(user): SignedIn,
    state: web::Data<HttpState>,
    form: web::Form<IncidentForm>,
) -> ApiResult<HttpResponse> {
    let form = form.into_inner();
    match state.relief.log_incident(user.id, form.clone().into()).await {
        Ok(incident) => {
            info!(incident_id = incident.id, reporter = %user.id, "incident logged");
            Ok(see_other(paths::USER_HOME))
        }
        Err(error) => View::new(LOG_INCIDENT_VIEW).with_model(&form)?.or_invalid(error),
    }
}

/// Donation form with the donor's name and email filled in.
#[utoipa::path(
    get,
    path = "/donations/new",
    responses(
        (status = 200, description = "LogDonation view", body = View),
        (status = 303, description = "No session; redirect to /login")
    ),
    tags = ["reports"],
    operation_id = "logDonationForm"
)]
#[get("/donations/new")]
pub async fn donation_form(SignedIn(user): SignedIn) -> ApiResult<HttpResponse> {
    let prefill = DonationForm {
        donor_name: user.name,
        email: user.email,
        ..DonationForm::default()
    };
    Ok(View::new(LOG_DONATION_VIEW).with_model(&prefill)?.ok())
}

/// Record a donation; it starts out `Pending`.
#[utoipa::path(
    post,
    path = "/donations/new",
    request_body(content = DonationForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Logged; redirect to /home/user, or /login without a session"),
        (status = 400, description = "LogDonation view with field errors", body = View)
    ),
    tags = ["reports"],
    operation_id = "logDonation"
)]
#[post("/donations/new")]
pub async fn log_donation(
    _user: SignedIn,
    state: web::Data<HttpState>,
    form: web::Form<DonationForm>,
) -> ApiResult<HttpResponse> {
    let form = form.into_inner();
    match state.relief.log_donation(form.clone().into()).await {
        Ok(donation) => {
            info!(donation_id = donation.id, quantity = donation.quantity, "donation logged");
            Ok(see_other(paths::USER_HOME))
        }
        Err(error) => View::new(LOG_DONATION_VIEW).with_model(&form)?.or_invalid(error),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::MockReliefCommand;
    use crate::domain::{Error, FieldErrors};
    use crate::inbound::http::test_utils::{session_cookie, test_session_middleware, test_state};
    use actix_session::Session;
    use actix_web::http::StatusCode;
    use actix_web::{App, test};
    use rstest::rstest;
    use serde_json::Value;
    use std::sync::Arc;

    async fn seed(session: Session) -> HttpResponse {
        session.insert("UserId", 9).expect("id");
        session.insert("UserEmail", "grace@example.org").expect("email");
        session.insert("UserRole", "User").expect("role");
        session.insert("UserName", "Grace Hopper").expect("name");
        HttpResponse::Ok().finish()
    }

    #[rstest]
    #[actix_web::test]
    async fn donation_form_is_prefilled_from_session() {
        let app = test::init_service(
            App::new()
                .wrap(test_session_middleware())
                .route("/seed", web::get().to(seed))
                .service(donation_form),
        )
        .await;
        let seeded =
            test::call_service(&app, test::TestRequest::get().uri("/seed").to_request()).await;
        let req = test::TestRequest::get()
            .uri("/donations/new")
            .cookie(session_cookie(&seeded))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["view"], "LogDonation");
        assert_eq!(body["model"]["DonorName"], "Grace Hopper");
        assert_eq!(body["model"]["Email"], "grace@example.org");
        assert_eq!(body["model"]["Quantity"], "");
    }

    #[rstest]
    #[actix_web::test]
    async fn invalid_incident_rerenders_with_submitted_values() {
        let mut relief = MockReliefCommand::new();
        relief.expect_log_incident().returning(|_, _| {
            Err(Error::from(FieldErrors::single("Location", "Location is required.")))
        });
        let mut state = test_state();
        state.relief = Arc::new(relief);

        let app = test::init_service(
            App::new()
                .wrap(test_session_middleware())
                .app_data(web::Data::new(state))
                .route("/seed", web::get().to(seed))
                .service(log_incident),
        )
        .await;
        let seeded =
            test::call_service(&app, test::TestRequest::get().uri("/seed").to_request()).await;
        let req = test::TestRequest::post()
            .uri("/incidents/new")
            .cookie(session_cookie(&seeded))
            .set_form([("Title", "Flooding"), ("Description", "Road under water")])
            .to_request();
        let res = test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["view"], "LogIncident");
        assert_eq!(body["model"]["Title"], "Flooding");
        assert_eq!(body["errors"]["Location"][0], "Location is required.");
    }

    #[rstest]
    #[actix_web::test]
    async fn donation_without_session_never_reaches_the_service() {
        let mut relief = MockReliefCommand::new();
        relief.expect_log_donation().never();
        let mut state = test_state();
        state.relief = Arc::new(relief);

        let app = test::init_service(
            App::new()
                .wrap(test_session_middleware())
                .app_data(web::Data::new(state))
                .service(log_donation),
        )
        .await;
        let req = test::TestRequest::post()
            .uri("/donations/new")
            .set_form([("DonorName", "Grace"), ("Quantity", "3")])
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::SEE_OTHER);
    }
}
