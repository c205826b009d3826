pub mod application;
pub mod config;
pub mod domain;
pub mod errors;
pub mod handlers;
pub mod infrastructure;
pub mod presentation;

use std::sync::Arc;

use actix_web::{middleware::Logger, web, App, HttpServer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub use application::order_history::OrderHistoryService;
pub use config::AppConfig;
pub use domain::ports::OrderRepository;
pub use infrastructure::kv_store::{FileKeyValueStore, KeyValueStore, MemoryKeyValueStore};
pub use infrastructure::order_repo::KeyValueOrderRepository;

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::orders::orders_page,
        handlers::orders::orders_api,
        handlers::orders::order_detail_api,
        handlers::orders::track_order,
    ),
    tags((name = "orders", description = "Customer order history"))
)]
pub struct ApiDoc;

/// Register the order routes against a shared service.
pub fn configure(
    service: web::Data<OrderHistoryService>,
) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg: &mut web::ServiceConfig| {
        cfg.app_data(service)
            .route("/orders", web::get().to(handlers::orders::orders_page))
            .route(
                "/orders/{id}/track",
                web::get().to(handlers::orders::track_order),
            )
            .route("/api/orders", web::get().to(handlers::orders::orders_api))
            .route(
                "/api/orders/{id}",
                web::get().to(handlers::orders::order_detail_api),
            );
    }
}

/// Service reading orders and the session flag from the store at `config.store_path`.
pub fn file_backed_service(config: &AppConfig) -> OrderHistoryService {
    let store = FileKeyValueStore::new(&config.store_path);
    OrderHistoryService::new(
        Arc::new(KeyValueOrderRepository::new(store)),
        config.tracking_url.clone(),
    )
}

/// Build and return an actix-web `Server` bound to `host:port`.
///
/// The caller is responsible for `.await`-ing (or `tokio::spawn`-ing) the
/// returned server.
pub fn build_server(
    service: OrderHistoryService,
    host: &str,
    port: u16,
) -> std::io::Result<actix_web::dev::Server> {
    let service = web::Data::new(service);
    Ok(HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .configure(configure(service.clone()))
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", ApiDoc::openapi()),
            )
    })
    .bind((host.to_string(), port))?
    .run())
}
