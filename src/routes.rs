use actix_web::web;

use crate::handlers::{health_check, home, recommendations_config};

/// Configure all routes for the API
pub fn api_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(home)
        .service(health_check)
        .configure(recommendations_config);
}
