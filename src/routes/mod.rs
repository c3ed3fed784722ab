//! Routers de la API
//!
//! Cada área expone un router público y, si aplica, uno de administración.
//! Los de administración se montan juntos bajo `/api/admin` detrás del
//! middleware JWT.

pub mod activity_routes;
pub mod auth_routes;
pub mod category_routes;
pub mod craft_routes;
pub mod establishment_routes;
pub mod event_routes;
pub mod moderation_routes;
pub mod photo_routes;
pub mod portal_routes;
pub mod post_routes;
pub mod route_routes;
pub mod search_routes;
pub mod site_routes;
pub mod transport_routes;

use axum::{extract::State, middleware::from_fn_with_state, routing::get, Json, Router};
use serde_json::{json, Value};

use crate::middleware::admin_auth_middleware;
use crate::state::AppState;

/// Endpoints públicos bajo `/api`
pub fn create_public_router() -> Router<AppState> {
    Router::new()
        .nest("/categories", category_routes::create_category_router())
        .nest("/sites", site_routes::create_site_router())
        .nest("/establishments", establishment_routes::create_establishment_router())
        .nest("/events", event_routes::create_event_router())
        .nest("/transport", transport_routes::create_transport_router())
        .nest("/crafts", craft_routes::create_craft_router())
        .nest("/activities", activity_routes::create_activity_router())
        .nest("/photos", photo_routes::create_photo_router())
        .nest("/posts", post_routes::create_post_router())
        .nest("/routes", route_routes::create_route_router())
        .nest("/search", search_routes::create_search_router())
        .merge(portal_routes::create_portal_router())
}

/// Panel de administración: todo salvo el login exige token
pub fn create_admin_router(state: AppState) -> Router<AppState> {
    let protected = Router::new()
        .merge(auth_routes::create_session_router())
        .merge(category_routes::create_admin_category_router())
        .merge(site_routes::create_admin_site_router())
        .merge(establishment_routes::create_admin_establishment_router())
        .merge(event_routes::create_admin_event_router())
        .merge(transport_routes::create_admin_transport_router())
        .merge(craft_routes::create_admin_craft_router())
        .merge(activity_routes::create_admin_activity_router())
        .merge(photo_routes::create_admin_photo_router())
        .merge(post_routes::create_admin_post_router())
        .merge(route_routes::create_admin_route_router())
        .merge(moderation_routes::create_moderation_router())
        .route_layer(from_fn_with_state(state, admin_auth_middleware));

    Router::new()
        .merge(auth_routes::create_login_router())
        .merge(protected)
}

async fn health_check(State(state): State<AppState>) -> Json<Value> {
    let cache = match &state.cache {
        Some(client) => {
            if client.ping().await {
                "connected"
            } else {
                "unavailable"
            }
        }
        None => "disabled",
    };

    Json(json!({
        "status": "ok",
        "service": "garzon-turismo",
        "cache": cache,
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// Router completo de la aplicación, sin capas de transporte
pub fn create_app_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .nest("/api", create_public_router())
        .nest("/api/admin", create_admin_router(state.clone()))
        .with_state(state)
}
