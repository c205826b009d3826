use actix_web::http::header::{self, ContentType};
use actix_web::{web, HttpResponse};

use crate::application::order_history::{
    OrderHistoryService, PageOutcome, TrackOutcome, ORDERS_PATH,
};
use crate::errors::AppError;
use crate::presentation::html::render_page;
use crate::presentation::view::{order_details_href, track_href, OrderCard, OrdersPage};

fn redirect(location: String) -> HttpResponse {
    HttpResponse::Found()
        .insert_header((header::LOCATION, location))
        .finish()
}

async fn resolve_page(service: web::Data<OrderHistoryService>) -> Result<PageOutcome, AppError> {
    // The store is a plain file read; keep it off the async workers.
    web::block(move || {
        let session = service.session(ORDERS_PATH);
        service.order_history(&session)
    })
    .await
    .map_err(|e| AppError::Internal(e.to_string()))
}

// ── Handlers ─────────────────────────────────────────────────────────────────

/// GET /orders
///
/// Renders the order history page, or redirects anonymous visitors to the
/// login page with a hint to come back here.
#[utoipa::path(
    get,
    path = "/orders",
    responses(
        (status = 200, description = "Rendered order history", body = String, content_type = "text/html"),
        (status = 302, description = "Not logged in; redirect to /login?returnTo=/orders"),
    ),
    tag = "orders"
)]
pub async fn orders_page(
    service: web::Data<OrderHistoryService>,
) -> Result<HttpResponse, AppError> {
    match resolve_page(service).await? {
        PageOutcome::Redirect { location } => Ok(redirect(location)),
        PageOutcome::Render(page) => Ok(HttpResponse::Ok()
            .content_type(ContentType::html())
            .body(render_page(&page))),
    }
}

/// GET /api/orders
///
/// Returns the same page model as JSON.
#[utoipa::path(
    get,
    path = "/api/orders",
    responses(
        (status = 200, description = "Order history page model", body = OrdersPage),
        (status = 401, description = "Not logged in"),
    ),
    tag = "orders"
)]
pub async fn orders_api(
    service: web::Data<OrderHistoryService>,
) -> Result<HttpResponse, AppError> {
    match resolve_page(service).await? {
        PageOutcome::Redirect { .. } => Err(AppError::Unauthorized),
        PageOutcome::Render(page) => Ok(HttpResponse::Ok().json(page)),
    }
}

/// GET /api/orders/{id}
///
/// Returns the card for one order.
#[utoipa::path(
    get,
    path = "/api/orders/{id}",
    params(
        ("id" = String, Path, description = "Order identifier"),
    ),
    responses(
        (status = 200, description = "Order card", body = OrderCard),
        (status = 401, description = "Not logged in"),
        (status = 404, description = "No such order"),
    ),
    tag = "orders"
)]
pub async fn order_detail_api(
    service: web::Data<OrderHistoryService>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let order_id = path.into_inner();

    let card = web::block(move || -> Result<OrderCard, AppError> {
        let session = service.session(&order_details_href(&order_id));
        if !session.logged_in {
            return Err(AppError::Unauthorized);
        }
        Ok(service.order_card(&order_id)?)
    })
    .await
    .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(card))
}

/// GET /orders/{id}/track
///
/// Sends the visitor to the carrier's tracking site when the order has
/// shipped and carries a tracking number; otherwise back to the order list.
#[utoipa::path(
    get,
    path = "/orders/{id}/track",
    params(
        ("id" = String, Path, description = "Order identifier"),
    ),
    responses(
        (status = 302, description = "Redirect to the carrier tracking site, or to login"),
        (status = 303, description = "Tracking unavailable; back to /orders"),
    ),
    tag = "orders"
)]
pub async fn track_order(
    service: web::Data<OrderHistoryService>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let order_id = path.into_inner();

    let outcome = web::block(move || {
        let session = service.session(&track_href(&order_id));
        service.track(&session, &order_id)
    })
    .await
    .map_err(|e| AppError::Internal(e.to_string()))?;

    Ok(match outcome {
        TrackOutcome::LoginRequired { location } => redirect(location),
        TrackOutcome::External { url } => redirect(url),
        TrackOutcome::Unavailable => HttpResponse::SeeOther()
            .insert_header((header::LOCATION, ORDERS_PATH))
            .finish(),
    })
}
