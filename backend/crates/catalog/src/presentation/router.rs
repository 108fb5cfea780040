//! Catalog Routers

use axum::{
    Router, middleware,
    routing::{delete, get, post, put},
};

use crate::domain::repository::CatalogRepository;
use crate::domain::value_object::resource_kind::ResourceKind;
use crate::presentation::handlers::{self, CatalogAppState, FamilyState};

/// Browse, detail and comment routes shared by every family
fn common_routes<R>() -> Router<FamilyState<R>>
where
    R: CatalogRepository,
{
    Router::new()
        .route("/profile", get(handlers::list::<R>))
        .route("/search", get(handlers::search::<R>))
        .route("/{id}/like", post(handlers::like::<R>).delete(handlers::unlike::<R>))
        .route(
            "/{id}/comments",
            post(handlers::add_comment::<R>).delete(handlers::delete_comment::<R>),
        )
        .route(
            "/{id}/comments/{comment_id}/reply",
            post(handlers::reply_comment::<R>).delete(handlers::delete_reply::<R>),
        )
}

fn family<R>(state: CatalogAppState<R>, kind: ResourceKind) -> FamilyState<R>
where
    R: CatalogRepository,
{
    FamilyState {
        catalog: state,
        kind,
    }
}

/// `/tools` routes
pub fn tools_router<R>(state: CatalogAppState<R>) -> Router
where
    R: CatalogRepository,
{
    common_routes::<R>()
        .route("/submit", post(handlers::submit_tool::<R>))
        .route("/{id}", get(handlers::get_detail::<R>))
        .route("/{id}/views", post(handlers::record_view::<R>))
        .route(
            "/{id}/collections",
            post(handlers::collect::<R>).delete(handlers::uncollect::<R>),
        )
        .with_state(family(state, ResourceKind::Tool))
}

/// `/courses` routes
pub fn courses_router<R>(state: CatalogAppState<R>) -> Router
where
    R: CatalogRepository,
{
    common_routes::<R>()
        .route("/submit", post(handlers::submit_course::<R>))
        .route(
            "/{id}",
            get(handlers::get_detail::<R>).put(handlers::update_course::<R>),
        )
        .route("/{id}/upload", post(handlers::upload_material::<R>))
        .route(
            "/{id}/textbooks/{textbook_id}/download",
            get(handlers::download_material::<R>),
        )
        .route("/{id}/view", post(handlers::record_view::<R>))
        .route(
            "/{id}/collected",
            post(handlers::collect::<R>).delete(handlers::uncollect::<R>),
        )
        .with_state(family(state, ResourceKind::Course))
}

/// `/projects` routes
pub fn projects_router<R>(state: CatalogAppState<R>) -> Router
where
    R: CatalogRepository,
{
    common_routes::<R>()
        .route("/upload", post(handlers::submit_project::<R>))
        .route(
            "/{id}",
            get(handlers::get_detail::<R>).put(handlers::update_project::<R>),
        )
        .route("/{id}/view", post(handlers::record_view::<R>))
        .route(
            "/{id}/collected",
            post(handlers::collect::<R>).delete(handlers::uncollect::<R>),
        )
        .with_state(family(state, ResourceKind::Project))
}

/// `/users` library routes; merged next to the account routes and gated
/// on a bearer token
pub fn library_router<R>(state: CatalogAppState<R>) -> Router
where
    R: CatalogRepository,
{
    Router::new()
        .route("/collection", get(handlers::get_collection::<R>))
        .route(
            "/collection/{resource_type}/{resource_id}",
            delete(handlers::remove_collection::<R>),
        )
        .route(
            "/collection/{resource_type}/{resource_id}/",
            delete(handlers::remove_collection::<R>),
        )
        .route("/summit", get(handlers::get_submissions::<R>))
        .route("/status", get(handlers::get_status::<R>))
        .route(
            "/status/{resource_type}/{resource_id}/statu",
            put(handlers::change_status::<R>),
        )
        .route(
            "/status/{resource_type}/{resource_id}",
            put(handlers::change_status::<R>),
        )
        .route_layer(middleware::from_fn_with_state(
            state.tokens.clone(),
            auth::middleware::require_auth,
        ))
        .with_state(state)
}

/// `/admin` routes; every route requires the admin role
pub fn admin_router<R>(state: CatalogAppState<R>) -> Router
where
    R: CatalogRepository,
{
    Router::new()
        .route("/pending", get(handlers::get_pending::<R>))
        .route("/review/{item_id}", post(handlers::review_item::<R>))
        .route_layer(middleware::from_fn_with_state(
            state.tokens.clone(),
            auth::middleware::require_admin,
        ))
        .with_state(state)
}
