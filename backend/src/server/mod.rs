//! Server construction and middleware wiring.

mod config;

pub use config::ServerConfig;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use tracing::{info, warn};

use userbank::Trace;
#[cfg(debug_assertions)]
use userbank::doc::ApiDoc;
use userbank::domain::Workspace;
use userbank::inbound::http::health::{HealthState, live, ready};
use userbank::inbound::http::home::home;
use userbank::inbound::http::screens;
use userbank::inbound::http::state::HttpState;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[derive(Clone)]
struct AppDependencies {
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
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
    } = deps;

    let api = web::scope("/api/v1").configure(screens::configure);

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(Trace)
        .service(home)
        .service(ready)
        .service(live)
        .service(api);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));
    #[cfg(not(debug_assertions))]
    let app = app;

    app
}

/// Activate both screens, then construct the Actix HTTP server.
///
/// A screen whose initial fetch fails starts empty; the server still comes up
/// and records can be added later.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub async fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let ServerConfig {
        bind_addr,
        initial_batch_size,
        source,
    } = config;

    let mut workspace = Workspace::new();
    let reports = workspace.activate(source.as_ref(), initial_batch_size).await;
    health_state.record_activation(&reports);
    for report in reports {
        match report.outcome {
            Ok(count) => info!(kind = %report.kind, count, "screen activated"),
            Err(error) => warn!(kind = %report.kind, %error, "screen starts empty"),
        }
    }

    let http_state = web::Data::new(HttpState::new(workspace, source));
    let server_health_state = health_state.clone();
    let server = HttpServer::new(move || {
        build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
        })
    })
    .bind(bind_addr)?
    .run();

    info!(%bind_addr, "listening");
    health_state.mark_ready();
    Ok(server)
}
