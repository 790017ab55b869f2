use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};

use crate::{handlers, system};

/// Бизнес-маршруты; все требуют Bearer-токен
fn business_routes() -> Router {
    Router::new()
        // a001 склады
        .route(
            "/api/warehouses",
            get(handlers::a001_warehouse::list_all).post(handlers::a001_warehouse::create),
        )
        .route(
            "/api/warehouses/:id",
            get(handlers::a001_warehouse::get_by_id),
        )
        // a002 перемещения
        .route(
            "/api/transfers",
            get(handlers::a002_warehouse_transfer::list)
                .post(handlers::a002_warehouse_transfer::create),
        )
        .route(
            "/api/transfers/:id",
            get(handlers::a002_warehouse_transfer::get_by_id),
        )
        .route(
            "/api/transfers/:id/plan",
            post(handlers::a002_warehouse_transfer::plan),
        )
        .route(
            "/api/transfers/:id/approve",
            post(handlers::a002_warehouse_transfer::approve),
        )
        .route(
            "/api/transfers/:id/cancel",
            post(handlers::a002_warehouse_transfer::cancel),
        )
        .route(
            "/api/transfers/:id/complete",
            post(handlers::a002_warehouse_transfer::complete),
        )
        // a003 заявки на отгрузку
        .route(
            "/api/export-requests",
            get(handlers::a003_export_request::list_all)
                .post(handlers::a003_export_request::create),
        )
        .route(
            "/api/export-requests/:id",
            get(handlers::a003_export_request::get_by_id),
        )
        .route(
            "/api/export-requests/:id/process",
            post(handlers::a003_export_request::process),
        )
        .route(
            "/api/export-requests/:id/approve",
            post(handlers::a003_export_request::approve),
        )
        .route(
            "/api/export-requests/:id/cancel",
            post(handlers::a003_export_request::cancel),
        )
        .route(
            "/api/export-requests/:id/receipt",
            post(handlers::a003_export_request::create_receipt),
        )
        // a004 расходные документы; для approve в пути ID строки
        .route(
            "/api/export-receipts",
            get(handlers::a004_export_receipt::list_all),
        )
        .route(
            "/api/export-receipts/:id",
            get(handlers::a004_export_receipt::get_by_id),
        )
        .route(
            "/api/export-receipts/:id/approve",
            put(handlers::a004_export_receipt::approve_line),
        )
        .route_layer(middleware::from_fn(system::auth::middleware::require_auth))
}

/// Конфигурация всех роутов приложения
pub fn configure_routes() -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route(
            "/api/system/auth/login",
            post(system::handlers::auth::login),
        )
        .route(
            "/api/system/auth/me",
            get(system::handlers::auth::current_user)
                .layer(middleware::from_fn(system::auth::middleware::require_auth)),
        )
        .merge(business_routes())
}
