//! Server construction and middleware wiring.

mod config;
mod state_builders;

pub use config::AppSettings;
pub use state_builders::build_http_state;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};

use reliefdesk::Trace;
#[cfg(debug_assertions)]
use reliefdesk::doc::ApiDoc;
use reliefdesk::inbound::http::health::{HealthState, live, ready};
use reliefdesk::inbound::http::session_config::SessionSettings;
use reliefdesk::inbound::http::state::HttpState;
use reliefdesk::inbound::http::{configure, session_middleware};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

use std::net::SocketAddr;
use std::sync::Arc;

/// Everything the per-worker app factory needs.
#[derive(Clone)]
struct AppDependencies {
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
    session: Arc<SessionSettings>,
}

fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
        session,
    } = deps;

    let pages = web::scope("")
        .wrap(session_middleware(&session))
        .configure(configure);

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(Trace)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app.service(pages)
}

/// Bind the HTTP server.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    http_state: HttpState,
    session: SessionSettings,
    bind_addr: SocketAddr,
) -> std::io::Result<Server> {
    let deps = AppDependencies {
        health_state,
        http_state: web::Data::new(http_state),
        session: Arc::new(session),
    };

    let server = HttpServer::new(move || build_app(deps.clone()))
        .bind(bind_addr)?
        .run();
    Ok(server)
}
