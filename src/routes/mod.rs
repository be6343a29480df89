// Route exports
pub mod view;

use actix_web::web;

pub use view::AppState;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .configure(view::configure),
    );
}
