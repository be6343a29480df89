use actix_web::{web, HttpResponse, Responder};
use validator::Validate;
use crate::core::{FilterField, SortKey};
use crate::models::{ErrorResponse, HealthResponse, PageInput, PageInputRequest, SelectUserRequest, SetFilterRequest, SortRequest};
use crate::services::ViewSession;
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub session: Arc<ViewSession>,
}

/// Configure all view routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/view", web::get().to(get_view))
        .route("/view/refresh", web::post().to(refresh))
        .route("/view/filters", web::post().to(set_filter))
        .route("/view/filters", web::delete().to(clear_filters))
        .route("/view/sort", web::post().to(sort_by))
        .route("/view/select", web::post().to(select_user))
        .route("/view/back", web::post().to(go_back))
        .route("/view/page", web::post().to(go_to_page))
        .route("/view/next", web::post().to(next_page))
        .route("/view/prev", web::post().to(prev_page))
        .route("/view/all", web::post().to(toggle_all_mode));
}

fn bad_request(error: &str, message: String) -> HttpResponse {
    HttpResponse::BadRequest().json(ErrorResponse {
        error: error.to_string(),
        message,
        status_code: 400,
    })
}

async fn snapshot(state: &AppState) -> HttpResponse {
    HttpResponse::Ok().json(state.session.snapshot().await)
}

/// Health check endpoint
async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Current view snapshot
///
/// GET /api/v1/view
async fn get_view(state: web::Data<AppState>) -> impl Responder {
    snapshot(&state).await
}

/// POST /api/v1/view/refresh
async fn refresh(state: web::Data<AppState>) -> impl Responder {
    state.session.refresh().await;
    snapshot(&state).await
}

/// Set one filter input
///
/// POST /api/v1/view/filters
///
/// Request body:
/// ```json
/// { "field": "firstName|lastName|email|interestedIn|minMatchesCount|minMatchLevel", "value": "string" }
/// ```
async fn set_filter(
    state: web::Data<AppState>,
    req: web::Json<SetFilterRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return bad_request("Validation failed", errors.to_string());
    }

    let field = match req.field.parse::<FilterField>() {
        Ok(field) => field,
        Err(message) => return bad_request("Invalid filter field", message),
    };

    let req = req.into_inner();
    tracing::debug!("Filter {} set to {:?}", field.as_str(), req.value);
    state.session.set_filter(field, req.value).await;
    snapshot(&state).await
}

/// DELETE /api/v1/view/filters
async fn clear_filters(state: web::Data<AppState>) -> impl Responder {
    state.session.clear_filters().await;
    snapshot(&state).await
}

/// Sort by a column, toggling direction when it is already the active ascending key
///
/// POST /api/v1/view/sort
async fn sort_by(
    state: web::Data<AppState>,
    req: web::Json<SortRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return bad_request("Validation failed", errors.to_string());
    }

    match req.key.parse::<SortKey>() {
        Ok(key) => {
            state.session.sort_by(key).await;
            snapshot(&state).await
        }
        Err(message) => bad_request("Invalid sort key", message),
    }
}

/// Open the detail view for one user
///
/// POST /api/v1/view/select
///
/// Request body:
/// ```json
/// { "userId": "string" }
/// ```
async fn select_user(
    state: web::Data<AppState>,
    req: web::Json<SelectUserRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return bad_request("Validation failed", errors.to_string());
    }

    let outcome = state.session.select_user(&req.user_id).await;
    tracing::info!("Detail for user {}: {:?}", req.user_id, outcome);
    snapshot(&state).await
}

/// POST /api/v1/view/back
async fn go_back(state: web::Data<AppState>) -> impl Responder {
    state.session.go_back().await;
    snapshot(&state).await
}

/// Jump to a typed page number; malformed or out-of-range input is ignored
///
/// POST /api/v1/view/page
async fn go_to_page(
    state: web::Data<AppState>,
    req: web::Json<PageInputRequest>,
) -> impl Responder {
    match &req.page {
        PageInput::Number(page) => {
            state.session.go_to_page(*page).await;
        }
        PageInput::Signed(page) => {
            tracing::debug!("Ignoring negative page number {}", page);
        }
        PageInput::Text(input) => {
            state.session.go_to_page_input(input).await;
        }
    }
    snapshot(&state).await
}

/// POST /api/v1/view/next
async fn next_page(state: web::Data<AppState>) -> impl Responder {
    state.session.next().await;
    snapshot(&state).await
}

/// POST /api/v1/view/prev
async fn prev_page(state: web::Data<AppState>) -> impl Responder {
    state.session.prev().await;
    snapshot(&state).await
}

/// Toggle between paged and all-records mode
///
/// POST /api/v1/view/all
async fn toggle_all_mode(state: web::Data<AppState>) -> impl Responder {
    state.session.toggle_all_mode().await;
    snapshot(&state).await
}
