//! Server construction and middleware wiring.

mod config;
#[cfg(feature = "metrics")]
mod metrics;
mod state_builders;

pub use config::{ServerConfig, ServerSettings, load_provider_settings};

use actix_web::body::MessageBody;
use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};

#[cfg(debug_assertions)]
use homework_backend::ApiDoc;
use homework_backend::inbound::http::health::{HealthState, live, ready};
use homework_backend::inbound::http::solve::solve_homework;
use homework_backend::inbound::http::state::HttpState;
use homework_backend::{Cors, Trace};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

use state_builders::build_http_state;

fn build_app(
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let api = web::scope("/api/v1").service(solve_homework);

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(Cors)
        .wrap(Trace)
        .service(api)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));
    #[cfg(not(debug_assertions))]
    let app = app;

    app
}

/// Construct an Actix HTTP server from the health state and configuration.
///
/// The readiness probe flips to ready once the listener is bound.
///
/// # Errors
/// Propagates [`std::io::Error`] when an adapter cannot be built or the
/// socket cannot be bound.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let http_state = build_http_state(&config)?;
    let server_health_state = health_state.clone();
    let bind_addr = config.bind_addr;

    #[cfg(feature = "metrics")]
    let prometheus = metrics::make_metrics()?;

    let server = HttpServer::new(move || {
        let app = build_app(server_health_state.clone(), http_state.clone());

        #[cfg(feature = "metrics")]
        let app = app.wrap(prometheus.clone());

        app
    })
    .bind(bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}
