use crate::{models::ErrorResponse, services::RecommendationService};
use actix_web::{web, HttpResponse};
use tracing::debug;

pub fn recommendations_config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/recommend/{product}").route(web::get().to(get_recommendations)));
}

/// Look up a product by description and return up to five similar ones.
///
/// Both outcomes use a 200 status; failures are signalled purely by the
/// `error` key in the body, so clients distinguish them by shape alone.
pub async fn get_recommendations(
    product: web::Path<String>,
    recommendation_service: web::Data<RecommendationService>,
) -> HttpResponse {
    match recommendation_service.recommend(&product) {
        Ok(recommendation) => HttpResponse::Ok().json(recommendation),
        Err(err) => {
            debug!("recommendation lookup failed: {err}");
            HttpResponse::Ok().json(ErrorResponse {
                error: err.to_string(),
            })
        }
    }
}
