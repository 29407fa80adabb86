use actix_web::{get, HttpResponse};

#[get("/")]
pub async fn home() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "message": "E-Commerce Recommendation System API"
    }))
}
